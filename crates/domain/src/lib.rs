//! Ferrous Relay Domain Layer
pub mod config;
pub mod errors;
pub mod wire;

pub use config::{CliOverrides, Config, UpstreamAddr};
pub use errors::DomainError;
pub use wire::{Header, Question, ResourceRecord};
