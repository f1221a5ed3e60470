//! Script compilation for script processes.
//!
//! Script processes carry their source as document data; this crate
//! turns sources into compiled [`rhai::AST`]s through a bounded,
//! content-addressed [`ScriptCache`].

mod cache;
mod errors;

pub use cache::{content_hash, Compiled, ScriptCache, DEFAULT_CAPACITY};
pub use errors::{Result, ScriptError};
