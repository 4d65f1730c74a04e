//! # Quill Core
//!
//! The domain layer of the Quill blog platform.
//! This crate contains pure business rules with zero infrastructure dependencies:
//! the entities, the post visibility rules, and the ports infrastructure must implement.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::RepoError;
