use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::transport::{Query, Transport, TransportError};

type GetHandler = Box<dyn Fn(&str, &Query) -> Result<Value, TransportError> + Send + Sync>;
type PutHandler = Box<dyn Fn(&str, &Query) -> Result<(), TransportError> + Send + Sync>;

pub(crate) struct FnTransport {
    get: GetHandler,
    put: PutHandler,
    pub gets: Mutex<Vec<(String, Vec<(String, String)>)>>,
    pub puts: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl FnTransport {
    pub fn new<G>(get: G) -> Self
    where
        G: Fn(&str, &Query) -> Result<Value, TransportError> + Send + Sync + 'static,
    {
        Self {
            get: Box::new(get),
            put: Box::new(|_, _| Ok(())),
            gets: Mutex::new(Vec::new()),
            puts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_put<P>(mut self, put: P) -> Self
    where
        P: Fn(&str, &Query) -> Result<(), TransportError> + Send + Sync + 'static,
    {
        self.put = Box::new(put);
        self
    }
}

#[async_trait]
impl Transport for FnTransport {
    async fn get(&self, path: &str, query: &Query) -> Result<Value, TransportError> {
        self.gets.lock().push((path.to_string(), query.to_vec()));
        (self.get)(path, query)
    }

    async fn put(&self, path: &str, query: &Query) -> Result<(), TransportError> {
        self.puts.lock().push((path.to_string(), query.to_vec()));
        (self.put)(path, query)
    }
}

pub(crate) fn param<'a>(query: &'a Query, key: &str) -> Option<&'a str> {
    query
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}
