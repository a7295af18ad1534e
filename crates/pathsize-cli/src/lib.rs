/// pathsize CLI: command-line frontend.
///
/// This crate contains argument parsing, configuration precedence, logging
/// setup, and report printing. Business logic lives in `pathsize-core`.
pub mod app;
pub mod args;
pub mod logging;
pub mod settings;

pub use app::run;
pub use args::Cli;
