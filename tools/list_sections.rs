use std::env;
use std::time::Duration;

use library::{expand_selectors, list_sections, server_name, PlexClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let host = args
        .next()
        .or_else(|| env::var("PLEX_HOST").ok())
        .ok_or("PLEX_HOST not set and no host argument")?;
    let token = args
        .next()
        .or_else(|| env::var("PLEX_TOKEN").ok())
        .ok_or("PLEX_TOKEN not set and no token argument")?;

    let client = PlexClient::new(&host, &token, Duration::from_secs(30))?;
    let name = server_name(&client).await?;
    info!("Connected to {} at {}", name, client.host());

    for section in list_sections(&client).await? {
        println!("[{}] {} ({})", section.id, section.title, section.kind.as_str());
        for selector in expand_selectors(&section) {
            println!("    {}", selector);
        }
    }

    Ok(())
}
