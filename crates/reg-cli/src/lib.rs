//! Library side of the `regdesk` binary: settings and logging setup.

pub mod config;
pub mod logging;
