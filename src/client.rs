//! src/client.rs
use crate::configuration::SubscribeSettings;
use crate::domain::Subscriber;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

#[derive(thiserror::Error)]
pub enum SubmitError {
    #[error("Subscribe endpoint answered with {0}")]
    Status(StatusCode),
    #[error("Failed to reach the subscribe endpoint")]
    Request(#[source] reqwest::Error),
    #[error("Subscribe endpoint returned an unreadable body")]
    Body(#[source] reqwest::Error),
}

impl std::fmt::Debug for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

/// What the endpoint sends back on success. Extra fields are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SubscribeResponse {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct SubscriptionClient {
    http_client: Client,
    url: String,
}

impl SubscriptionClient {
    pub fn new(settings: &SubscribeSettings) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            url: settings.url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    #[tracing::instrument(name = "POST subscription", skip(self, subscriber), fields(url = %self.url))]
    pub async fn subscribe(&self, subscriber: &Subscriber) -> Result<SubscribeResponse, SubmitError> {
        let response = self
            .http_client
            .post(&self.url)
            .header("content-type", "application/json")
            .json(subscriber)
            .send()
            .await
            .map_err(SubmitError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Status(status));
        }

        response
            .json::<SubscribeResponse>()
            .await
            .map_err(SubmitError::Body)
    }
}
