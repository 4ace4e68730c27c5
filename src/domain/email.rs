//! src/domain/email.rs
use serde::Serialize;
use validator::validate_email;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Empty email")]
    Empty,
    #[error("Invalid email: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Email(String);

impl Email {
    pub fn parse(s: String) -> Result<Self, Error> {
        if s.trim().is_empty() {
            return Err(Error::Empty);
        }

        if validate_email(&s) && has_conventional_shape(&s) {
            Ok(Self(s))
        } else {
            Err(Error::Invalid(s))
        }
    }
}

/// `validate_email` lets through addresses that browsers and the usual
/// form schemas reject: bare hosts (`user@localhost`), one-letter or
/// numeric TLDs, and dots at the start of or doubled in the local part.
fn has_conventional_shape(s: &str) -> bool {
    let (local, domain) = match s.rsplit_once('@') {
        Some(parts) => parts,
        None => return false,
    };

    if local.starts_with('.') || local.contains("..") {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) => {
            !host.is_empty() && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
        }
        None => false,
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}
