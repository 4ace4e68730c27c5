pub mod client;
pub mod configuration;
pub mod domain;
pub mod form;
pub mod notify;
pub mod startup;
pub mod telemetry;
pub mod view;
