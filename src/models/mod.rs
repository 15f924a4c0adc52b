//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod problem;
pub mod submission;
pub mod test_case;

pub use problem::*;
pub use submission::*;
pub use test_case::*;
