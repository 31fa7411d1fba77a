use std::sync::Arc;

use engine::config::{config_path_from_env, load_or_create_config};
use engine::{resolve_selectors, SyncScheduler};
use library::{server_name, PlexClient};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config_path = config_path_from_env();
    let (mut config, created) = load_or_create_config(&config_path)?;
    if created {
        info!("Created default config at {:?}", config_path);
    } else {
        info!("Loaded config from {:?}", config_path);
    }
    config.apply_env()?;
    config.validate()?;

    let client = Arc::new(PlexClient::new(&config.host, &config.token, config.timeout())?);
    match server_name(client.as_ref()).await {
        Ok(name) => info!("Connected to {} at {}", name, client.host()),
        Err(err) => {
            error!("Cannot reach {}: {}", client.host(), err);
            return Err(err.into());
        }
    }

    let selectors = resolve_selectors(client.as_ref(), &config.sections).await?;
    if selectors.is_empty() {
        warn!("No matching movie, show or music sections");
        return Ok(());
    }

    let scheduler = SyncScheduler::new(client, config.tag_map())
        .with_page_size(config.page_size)
        .with_dry_run(config.dry_run);
    let report = scheduler.run(&selectors, config.workers).await?;

    for (rating_key, err) in &report.errors {
        warn!("{}: {}", rating_key, err);
    }
    println!(
        "scanned {} changed {} skipped {} failed {} writes {}{}",
        report.items_scanned,
        report.items_changed,
        report.items_skipped,
        report.items_failed,
        report.writes_applied,
        if report.dry_run { " (dry run)" } else { "" }
    );

    Ok(())
}
