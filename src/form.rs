//! src/form.rs
use crate::client::SubscriptionClient;
use crate::configuration::FormCopy;
use crate::domain::{validate, validate_field, Field, FormInput, ValidationErrors};
use crate::notify::{NotificationKind, Notifier};
use crate::view::{ButtonView, FieldView, FormView, InputType};
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// How a call to [`SubscriptionForm::submit`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submission was still in flight; nothing happened.
    Busy,
    /// Validation failed; no request was sent.
    Invalid(ValidationErrors),
    /// The endpoint accepted the subscription with this message.
    Subscribed(String),
    /// The request failed or the endpoint rejected it.
    Failed,
}

#[derive(Debug, Default)]
struct FormState {
    values: FormInput,
    errors: ValidationErrors,
    in_flight: bool,
    // Set after the first failed validation pass; from then on every edit
    // re-validates the edited field.
    revalidate: bool,
}

/// Name + email subscription form.
///
/// State sits behind a mutex that is never held across an `.await`, so
/// `view()` can be called while `submit()` is pending.
pub struct SubscriptionForm<N> {
    client: SubscriptionClient,
    notifier: N,
    copy: FormCopy,
    state: Mutex<FormState>,
}

/// Clears the in-flight flag when the submission settles, including when
/// the submit future is dropped half way.
struct InFlight<'a>(&'a Mutex<FormState>);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        lock(self.0).in_flight = false;
    }
}

fn lock(state: &Mutex<FormState>) -> MutexGuard<'_, FormState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<N: Notifier> SubscriptionForm<N> {
    pub fn new(client: SubscriptionClient, notifier: N, copy: FormCopy) -> Self {
        Self {
            client,
            notifier,
            copy,
            state: Mutex::new(FormState::default()),
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn is_in_flight(&self) -> bool {
        lock(&self.state).in_flight
    }

    pub fn values(&self) -> FormInput {
        lock(&self.state).values.clone()
    }

    pub fn errors(&self) -> ValidationErrors {
        lock(&self.state).errors.clone()
    }

    /// Updates one field. Returns `false` if the input was ignored because
    /// the controls are disabled.
    pub fn input(&self, field: Field, value: impl Into<String>) -> bool {
        let mut state = lock(&self.state);
        if state.in_flight {
            tracing::debug!(%field, "Ignoring input while a submission is in flight");
            return false;
        }

        match field {
            Field::Name => state.values.name = value.into(),
            Field::Email => state.values.email = value.into(),
        }

        if state.revalidate {
            let result = validate_field(&state.values, field);
            state.errors.set(field, result);
        }
        true
    }

    pub fn set_name(&self, value: impl Into<String>) -> bool {
        self.input(Field::Name, value)
    }

    pub fn set_email(&self, value: impl Into<String>) -> bool {
        self.input(Field::Email, value)
    }

    #[tracing::instrument(
        name = "Submitting newsletter subscription",
        skip(self),
        fields(submission_id = %Uuid::new_v4())
    )]
    pub async fn submit(&self) -> SubmitOutcome {
        let (subscriber, _in_flight) = {
            let mut state = lock(&self.state);
            if state.in_flight {
                tracing::warn!("A submission is already in flight");
                return SubmitOutcome::Busy;
            }

            match validate(&state.values) {
                Ok(subscriber) => {
                    state.errors.clear();
                    state.in_flight = true;
                    (subscriber, InFlight(&self.state))
                }
                Err(errors) => {
                    tracing::info!(%errors, "Subscription form failed validation");
                    state.errors = errors.clone();
                    state.revalidate = true;
                    return SubmitOutcome::Invalid(errors);
                }
            }
        };

        match self.client.subscribe(&subscriber).await {
            Ok(response) => {
                tracing::info!(
                    subscriber_name = %subscriber.name,
                    subscriber_email = %subscriber.email,
                    "Subscription accepted"
                );
                self.notifier
                    .notify(NotificationKind::Success, &response.message);
                SubmitOutcome::Subscribed(response.message)
            }
            Err(e) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Failed to submit subscription"
                );
                self.notifier
                    .notify(NotificationKind::Error, &self.copy.failure_message);
                SubmitOutcome::Failed
            }
        }
    }

    pub fn view(&self) -> FormView {
        let state = lock(&self.state);
        let disabled = state.in_flight;
        let error = |field| {
            state
                .errors
                .get(field)
                .map(|e| self.copy.message_for(e).to_string())
        };

        FormView {
            name: FieldView {
                id: Field::Name.as_str(),
                label: self.copy.name_label.clone(),
                input_type: InputType::Text,
                placeholder: self.copy.name_placeholder.clone(),
                value: state.values.name.clone(),
                disabled,
                error: error(Field::Name),
            },
            email: FieldView {
                id: Field::Email.as_str(),
                label: self.copy.email_label.clone(),
                input_type: InputType::Email,
                placeholder: self.copy.email_placeholder.clone(),
                value: state.values.email.clone(),
                disabled,
                error: error(Field::Email),
            },
            button: ButtonView {
                caption: if disabled {
                    self.copy.loading_caption.clone()
                } else {
                    self.copy.submit_caption.clone()
                },
                disabled,
            },
        }
    }
}
