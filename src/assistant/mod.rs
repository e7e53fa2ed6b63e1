pub mod image_client;
pub mod text_client;
pub mod transport;

use crate::{
    config::ClientConfig,
    error::{Result, StudyError},
    logger,
    models::{ApiOutcome, Feature},
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

pub use image_client::ImageClient;
pub use text_client::TextClient;
pub use transport::{HttpTransport, Transport, TransportError};

/// Shared send path behind every feature operation.
#[derive(Clone)]
pub struct Dispatcher {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Serializes `payload`, POSTs it to the feature's endpoint and decodes
    /// the reply. Transport failures come back as `Err` prefixed with the
    /// feature's context; application errors come back as
    /// `Ok(ApiOutcome::Failure)`.
    pub async fn send<P>(&self, feature: Feature, payload: &P) -> Result<ApiOutcome>
    where
        P: Serialize + ?Sized,
    {
        let context = feature.failure_context();
        let body = serde_json::to_value(payload)?;

        let url = self.config.endpoint(feature.path());
        let request_id = Uuid::new_v4().to_string();

        log::info!("Calling {} [req:{}]", feature, &request_id[..8]);
        log::debug!("POST {} ({} bytes)", url, body.to_string().len());

        let _timer = logger::timer(&format!("{} [req:{}]", feature, &request_id[..8]));
        let call = self.transport.post_json(&url, &body);

        let reply = match self.config.timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(reply) => reply,
                Err(_) => {
                    log::error!("{} timed out after {:?}", feature, limit);
                    return Err(StudyError::Timeout {
                        context,
                        after: limit,
                    });
                }
            },
            None => call.await,
        };

        let value = reply.map_err(|e| {
            log::error!("{} transport failure: {}", feature, e);
            StudyError::Transport {
                context,
                message: e.0,
            }
        })?;

        let outcome = ApiOutcome::decode(value);
        if let Some(message) = outcome.error_message() {
            log::warn!("{} returned an application error: {}", feature, message);
        }
        Ok(outcome)
    }
}

/// Entry point: one client per base URL, split into text and image
/// feature groups.
#[derive(Clone)]
pub struct StudyClient {
    text_client: TextClient,
    image_client: ImageClient,
    dispatcher: Dispatcher,
}

impl StudyClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = match config.timeout {
            Some(timeout) => HttpTransport::with_connect_timeout(timeout),
            None => HttpTransport::new(),
        };
        Self::with_transport(config, Arc::new(transport))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        log::debug!("Study client targeting {}", config.base_url);

        let dispatcher = Dispatcher::new(config, transport);
        Ok(Self {
            text_client: TextClient::new(dispatcher.clone()),
            image_client: ImageClient::new(dispatcher.clone()),
            dispatcher,
        })
    }

    pub fn text(&self) -> &TextClient {
        &self.text_client
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }

    pub fn config(&self) -> &ClientConfig {
        self.dispatcher.config()
    }

    /// Untyped call: send any field mapping to any feature.
    pub async fn call(
        &self,
        feature: Feature,
        payload: &serde_json::Map<String, Value>,
    ) -> Result<ApiOutcome> {
        self.dispatcher.send(feature, payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::transport::testing::{MockTransport, Scripted};
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn client_with(mock: Arc<MockTransport>, config: ClientConfig) -> StudyClient {
        StudyClient::with_transport(config, mock).unwrap()
    }

    #[tokio::test]
    async fn every_feature_passes_the_body_through() {
        for feature in Feature::ALL {
            let body = json!({ "payload": feature.path(), "nested": { "n": [1, 2, 3] } });
            let mock = Arc::new(MockTransport::replying(body.clone()));
            let client = client_with(mock.clone(), ClientConfig::new().with_base_url("http://stub"));

            let mut payload = serde_json::Map::new();
            payload.insert("text".into(), json!("hello"));
            let outcome = client.call(feature, &payload).await.unwrap();

            assert_eq!(outcome.body().as_value(), &body);
            let calls = mock.calls();
            assert_eq!(calls.len(), 1);
            assert_eq!(calls[0].0, format!("http://stub{}", feature.path()));
            assert_eq!(calls[0].1, json!({ "text": "hello" }));
        }
    }

    #[tokio::test]
    async fn every_feature_prefixes_transport_errors() {
        for feature in Feature::ALL {
            let mock = Arc::new(MockTransport::failing("connection refused"));
            let client = client_with(mock, ClientConfig::new());

            let err = client
                .call(feature, &serde_json::Map::new())
                .await
                .unwrap_err();
            let message = err.to_string();
            assert!(message.starts_with(&format!("{}: ", feature.failure_context())));
            assert!(message.contains("connection refused"));
        }
    }

    #[tokio::test]
    async fn hung_transport_times_out() {
        let mock = Arc::new(MockTransport::new(vec![Scripted::Hang]));
        let config = ClientConfig::new().with_timeout(Duration::from_millis(50));
        let client = client_with(mock, config);

        let err = client
            .call(Feature::Chat, &serde_json::Map::new())
            .await
            .unwrap_err();
        assert!(matches!(err, StudyError::Timeout { context: "Failed to chat", .. }));
        assert!(err.is_transport());
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let mock = Arc::new(MockTransport::new(vec![]));
        let result = StudyClient::with_transport(ClientConfig::new().with_base_url(""), mock);
        assert!(matches!(result, Err(StudyError::Config(_))));
    }
}
