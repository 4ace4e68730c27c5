//! src/domain/validation.rs
use super::{email, name, Email, Name};
use serde::Serialize;
use std::collections::BTreeMap;

/// Raw field values as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub email: String,
}

/// The validated payload sent to the subscribe endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subscriber {
    pub name: Name,
    pub email: Email,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Name is required")]
    NameRequired,
    #[error("Email is required")]
    EmailRequired,
    #[error("Invalid email")]
    EmailInvalid,
}

impl From<name::Error> for FieldError {
    fn from(e: name::Error) -> Self {
        match e {
            name::Error::Empty => FieldError::NameRequired,
        }
    }
}

impl From<email::Error> for FieldError {
    fn from(e: email::Error) -> Self {
        match e {
            email::Error::Empty => FieldError::EmailRequired,
            email::Error::Invalid(_) => FieldError::EmailInvalid,
        }
    }
}

/// Field-keyed errors from one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }

    pub(crate) fn set(&mut self, field: Field, result: Result<(), FieldError>) {
        match result {
            Ok(()) => {
                self.0.remove(&field);
            }
            Err(e) => {
                self.0.insert(field, e);
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, error) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, error)?;
            first = false;
        }
        Ok(())
    }
}

/// Checks a single field of the input.
pub fn validate_field(input: &FormInput, field: Field) -> Result<(), FieldError> {
    match field {
        Field::Name => Name::parse(input.name.clone()).map(|_| ())?,
        Field::Email => Email::parse(input.email.clone()).map(|_| ())?,
    }
    Ok(())
}

/// Checks every field and either builds a `Subscriber` or reports all
/// failing fields at once.
pub fn validate(input: &FormInput) -> Result<Subscriber, ValidationErrors> {
    let name = Name::parse(input.name.clone());
    let email = Email::parse(input.email.clone());

    match (name, email) {
        (Ok(name), Ok(email)) => Ok(Subscriber { name, email }),
        (name, email) => {
            let mut errors = ValidationErrors::default();
            if let Err(e) = name {
                errors.set(Field::Name, Err(e.into()));
            }
            if let Err(e) = email {
                errors.set(Field::Email, Err(e.into()));
            }
            Err(errors)
        }
    }
}
