use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Raw transport failure; the dispatcher adds the feature context.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends one JSON document and returns the parsed JSON reply.
///
/// Implementations must hand back the body whatever the HTTP status is.
/// Only failing to reach the server or to parse the reply is an error.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, TransportError>;
}

#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_connect_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                log::warn!("Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, TransportError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            log::debug!("{} answered with HTTP {}", url, status);
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| TransportError(e.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    pub(crate) enum Scripted {
        Reply(Value),
        Fail(String),
        Hang,
    }

    /// Replays scripted replies in order and records every request.
    pub(crate) struct MockTransport {
        script: Mutex<VecDeque<Scripted>>,
        calls: Mutex<Vec<(String, Value)>>,
    }

    impl MockTransport {
        pub(crate) fn new(script: Vec<Scripted>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn replying(body: Value) -> Self {
            Self::new(vec![Scripted::Reply(body)])
        }

        pub(crate) fn failing(message: &str) -> Self {
            Self::new(vec![Scripted::Fail(message.to_string())])
        }

        pub(crate) fn calls(&self) -> Vec<(String, Value)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn post_json(&self, url: &str, body: &Value) -> Result<Value, TransportError> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), body.clone()));
            let next = self.script.lock().unwrap().pop_front();
            match next {
                Some(Scripted::Reply(value)) => Ok(value),
                Some(Scripted::Fail(message)) => Err(TransportError(message)),
                Some(Scripted::Hang) => futures::future::pending().await,
                None => Err(TransportError("no scripted reply left".into())),
            }
        }
    }
}
