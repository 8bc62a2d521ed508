//! # arpsentry (app library)
//!
//! CLI surface and trace format for the arpsentry binary. Exposed as a
//! library so integration tests can drive commands directly.

pub mod cli;
pub mod trace;
