//! Survey definition files
//!
//! This module contains the configuration system components:
//! - `types`: Choice, target and validation types shared by questions
//! - `question`: Question definitions and their conversion into survey questions
//! - `loader`: Survey file loading and validation

pub mod loader;
pub mod question;
pub mod types;

#[cfg(test)]
mod tests;

pub use loader::{Config, ConfigV1};
pub use question::QuestionConfig;
pub use types::{Choice, Target, Type, Validation};
