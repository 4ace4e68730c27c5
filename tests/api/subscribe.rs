//! tests/api/subscribe.rs

use crate::helpers::{mount_subscribed, setup, subscribed, SUBSCRIBE_PATH};
use newsletter::form::SubmitOutcome;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::Mock;

#[tokio::test]
async fn a_valid_form_sends_exactly_one_json_post() {
    // Arrange
    let test = setup().await;
    Mock::given(method("POST"))
        .and(path(SUBSCRIBE_PATH))
        .and(header("Content-Type", "application/json"))
        .and(body_json(serde_json::json!({
            "name": "le guin",
            "email": "ursula_le_guin@gmail.com",
        })))
        .respond_with(subscribed("Subscribed!"))
        .expect(1)
        .mount(&test.server)
        .await;
    test.fill("le guin", "ursula_le_guin@gmail.com");

    // Act
    let outcome = test.form.submit().await;

    // Assert
    assert_eq!(outcome, SubmitOutcome::Subscribed("Subscribed!".into()));
}

#[tokio::test]
async fn the_name_field_sends_the_name_not_the_email() {
    // Arrange
    let test = setup().await;
    mount_subscribed(&test.server, "ok", 1).await;
    test.fill("Mc Lovin", "mclovin@hawaii.gov");

    // Act
    test.form.submit().await;

    // Assert
    let bodies = test.received_bodies().await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["name"], "Mc Lovin");
    assert_eq!(bodies[0]["email"], "mclovin@hawaii.gov");
}

#[tokio::test]
async fn values_are_kept_after_a_successful_submission() {
    // Arrange
    let test = setup().await;
    mount_subscribed(&test.server, "ok", 2).await;
    test.fill("Mc Lovin", "mclovin@hawaii.gov");

    // Act
    test.form.submit().await;
    let outcome = test.form.submit().await;

    // Assert
    assert_eq!(outcome, SubmitOutcome::Subscribed("ok".into()));
    assert_eq!(test.form.values().email, "mclovin@hawaii.gov");
}
