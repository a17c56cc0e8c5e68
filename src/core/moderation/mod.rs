// Core moderation module - polarity validation and cleanup sweeps.
// Following the same pattern as the blogs module.

pub mod lexicon;
pub mod moderation_models;
pub mod moderation_service;
pub mod polarity_validator;
pub mod sweeper;

pub use moderation_models::*;
pub use moderation_service::*;
pub use polarity_validator::{validate, ValidationError};
