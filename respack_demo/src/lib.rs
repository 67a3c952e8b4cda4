//! # Respack Demo Library
//!
//! A small layered application built on `respack` result codes, and the
//! pieces behind the `respack_demo` CLI.
//!
//! # Module Structure
//!
//! - [`app`] - Sample application: backend access and UI layers
//! - [`config`] - TOML configuration (`[shared]` and `[layout]`)
//! - [`report`] - Run, decode and layout reports in text or JSON

pub mod app;
pub mod config;
pub mod report;
