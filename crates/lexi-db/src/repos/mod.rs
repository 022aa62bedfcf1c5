//! Repository modules implementing storage operations for all Lexi entities.
//!
//! Each module adds methods to `LexiDb` via `impl LexiDb` blocks. Statements
//! that must also run inside a batch transaction are free functions over
//! `&libsql::Connection`, shared by both entry points.

pub mod batch;
pub mod callbacks;
pub mod words;
