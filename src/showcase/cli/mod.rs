//! # CLI Layer
//!
//! This module is **one possible UI client** for showcase; it is not the
//! application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `setup.rs`: clap definitions
//! - `commands.rs`: `run()`, logging and configuration setup
//! - `handlers.rs`: argument-to-form conversion and API dispatch
//! - `render.rs`, `styles.rs`, `templates/`: terminal output
//!
//! Handlers return the rendered text instead of printing it, so tests can
//! drive the whole layer against an in-memory store. Business logic is not
//! tested here; that is the command layer's job.

mod commands;
mod handlers;
mod render;
mod setup;
mod styles;
mod templates;

pub use commands::run;
