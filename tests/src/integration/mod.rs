//! Cross-crate lifecycle scenarios.

pub mod lifecycle;
pub mod services;
