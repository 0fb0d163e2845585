//! # Lifecycle Test Suite
//!
//! Unified test crate for cross-crate lifecycle scenarios.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Collaborators shared by the scenarios
//! └── integration/      # Controller + container + profiler together
//!     ├── bootstrap.rs
//!     ├── lifecycle.rs
//!     ├── profiling.rs
//!     └── services.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p lifecycle-tests
//!
//! # By category
//! cargo test -p lifecycle-tests integration::bootstrap
//!
//! # Benchmarks
//! cargo bench -p lifecycle-tests
//! ```

#![allow(dead_code)]

pub mod fixtures;
pub mod integration;
