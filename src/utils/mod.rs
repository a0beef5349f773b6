//! Utility functions for code generation and input validation.
//!
//! - [`code_generator`] - Short code generation
//! - [`slug`] - Slug validation and the reserved-word list

pub mod code_generator;
pub mod slug;
