//! Terminal front end: argument parsing, configuration, logging and the session loop.
mod app;
mod args;
mod config;
mod effects;
mod export;
mod logging;
mod render;
mod repl;

pub use app::run_app;
