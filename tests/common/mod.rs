//! Shared test utilities for thumbrank integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. The fake servers bind to a random port on 127.0.0.1 and
//! live for the rest of the test's runtime.

pub mod assertions;
pub mod builders;
pub mod fake_gemini;
pub mod fake_sheet;
pub mod fixtures;

pub use builders::*;
pub use fixtures::*;
