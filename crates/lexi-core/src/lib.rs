//! # lexi-core
//!
//! Core types, mastery rules, and error types for Lexi.
//!
//! This crate provides the foundational types shared across all Lexi crates:
//! - Entity structs for words, learning-batch statistics, and pending quiz callbacks
//! - The mastery state machine that turns quiz outcomes into streak/review updates
//! - Inbound action payload codec (`correct:<token>` and friends)
//! - User-visible reply texts
//! - The daily dispatch window and the `Clock` seam used by every background loop
//! - Word-list import parsing
//!
//! Nothing in here performs I/O.

pub mod action;
pub mod clock;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod import;
pub mod mastery;
pub mod responses;
pub mod schedule;
