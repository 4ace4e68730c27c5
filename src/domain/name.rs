//! src/domain/name.rs
use serde::Serialize;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("A name must not be empty")]
    Empty,
}

/// A subscriber's name: any string that is not blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Name(String);

impl Name {
    pub fn parse(s: String) -> Result<Self, Error> {
        if s.trim().is_empty() {
            return Err(Error::Empty);
        }

        Ok(Self(s))
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
