//! Multi-language code execution sandbox for the playground.
//!
//! A request carries `(code, language, stdin)`; the dispatcher provisions an
//! isolated workspace, the language runner materializes and (if needed)
//! compiles the source, and the supervisor runs the program under a hard
//! wall-clock timeout. Every artifact is reclaimed when the request
//! finishes, whatever the outcome.

pub mod config;
pub mod error;
pub mod executor;
pub mod language;
pub mod runner;
pub mod server;
pub mod supervisor;
pub mod workspace;
