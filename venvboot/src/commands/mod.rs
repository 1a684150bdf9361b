//! Command handlers. `bootstrap` is the default (no subcommand); `status`
//! and `clean` manage the environment directory.

pub mod bootstrap;
pub mod clean;
pub mod status;
