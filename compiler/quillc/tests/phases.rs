// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Phase-based compiler tests.
//!
//! Each module drives the full `quillc` pipeline but asserts on the behavior
//! of one phase.
//!
//! # Organization
//!
//! - `parse/` - Lexer and parser errors seen through `compile`
//! - `typeck/` - Promotion, return paths, type errors
//! - `codegen/` - Shape of the emitted WAT
//! - `end_to_end/` - Emitted modules assembled with `wat` and run on `wasmi`
//! - `common/` - Shared test utilities
//!
//! # Running Phase Tests
//!
//! ```bash
//! cargo test -p quillc --test phases
//! cargo test -p quillc --test phases end_to_end
//! ```

#[path = "phases/common/mod.rs"]
mod common;

#[path = "phases/parse/mod.rs"]
mod parse;

#[path = "phases/typeck/mod.rs"]
mod typeck;

#[path = "phases/codegen/mod.rs"]
mod codegen;

#[path = "phases/end_to_end/mod.rs"]
mod end_to_end;
