//! RackGen CLI library.
//!
//! This crate provides the core functionality for the RackGen CLI,
//! including rack and config loading and the command implementations.

pub mod commands;
pub mod input;
