//! src/startup.rs
use crate::client::SubscriptionClient;
use crate::configuration::Settings;
use crate::form::SubscriptionForm;
use crate::notify::Notifier;

/// Builds a form that submits to the configured endpoint and reports
/// through `notifier`.
pub fn build<N: Notifier>(
    settings: &Settings,
    notifier: N,
) -> Result<SubscriptionForm<N>, reqwest::Error> {
    let client = SubscriptionClient::new(&settings.subscribe)?;
    tracing::info!(url = %client.url(), "Subscription form ready");

    Ok(SubscriptionForm::new(client, notifier, settings.form.clone()))
}
