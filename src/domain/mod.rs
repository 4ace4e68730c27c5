//! src/domain/mod.rs
mod name;
pub use name::Name;

mod email;
pub use email::Email;

mod validation;
pub use validation::{
    validate, validate_field, Field, FieldError, FormInput, Subscriber, ValidationErrors,
};
