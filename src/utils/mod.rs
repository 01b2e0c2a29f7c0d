//! Utility functions.
//!
//! - [`code_generator`] - Short code generation
//! - [`location`] - Redirect `Location` header construction

pub mod code_generator;
pub mod location;
