//! tests/api/validation.rs

use crate::helpers::setup;
use newsletter::domain::{Field, FieldError};
use newsletter::form::SubmitOutcome;
use wiremock::matchers::any;
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn invalid_emails_never_reach_the_network() {
    // Arrange
    let test = setup().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&test.server)
        .await;
    let test_cases = vec![
        ("", "empty email"),
        ("   ", "whitespace email"),
        ("ursula_le_guin", "missing the at sign"),
        ("@gmail.com", "missing the local part"),
        ("ursula@", "missing the domain"),
        ("ursula@localhost", "a bare host"),
        ("ursula@gmail", "a domain without a dot"),
        ("ursula@gmail.c", "a one-letter top-level domain"),
        (".ursula@gmail.com", "a leading dot"),
        ("ursula..le_guin@gmail.com", "consecutive dots"),
    ];

    for (email, description) in test_cases {
        test.fill("le guin", email);

        // Act
        let outcome = test.form.submit().await;

        // Assert
        let errors = match outcome {
            SubmitOutcome::Invalid(errors) => errors,
            other => panic!("Expected a validation failure for {}, got {:?}", description, other),
        };
        assert!(
            errors.contains(Field::Email),
            "No email error was reported for {}.",
            description
        );
        assert_eq!(
            test.form.view().email.error.as_deref(),
            Some("E-mail inválido"),
            "No inline message was shown for {}.",
            description
        );
    }

    assert!(test.toasts().is_empty());
    // Mock verifies on Drop that no request was sent
}

#[tokio::test]
async fn a_blank_name_blocks_the_submission() {
    // Arrange
    let test = setup().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&test.server)
        .await;
    test.fill(" ", "ursula_le_guin@gmail.com");

    // Act
    let outcome = test.form.submit().await;

    // Assert
    match outcome {
        SubmitOutcome::Invalid(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors.get(Field::Name), Some(&FieldError::NameRequired));
        }
        other => panic!("Expected a validation failure, got {:?}", other),
    }
    assert_eq!(
        test.form.view().name.error.as_deref(),
        Some("Preencha seu nome")
    );
}

#[tokio::test]
async fn fixing_the_fields_clears_the_inline_errors() {
    // Arrange
    let test = setup().await;
    test.fill("", "nope");
    test.form.submit().await;

    // Act
    test.form.set_name("le guin");
    test.form.set_email("ursula_le_guin@gmail.com");

    // Assert
    let view = test.form.view();
    assert_eq!(view.name.error, None);
    assert_eq!(view.email.error, None);
    assert!(test.form.errors().is_empty());
}
