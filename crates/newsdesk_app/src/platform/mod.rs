//! Terminal front end: wires stdin commands, the core state machine and the
//! engine together.
mod app;
mod config;
mod effects;
mod logging;
mod ui;

pub use app::run_app;
pub use config::Cli;
