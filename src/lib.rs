//! htmlstamp library.
//!
//! Git pre-commit helper that keeps an `updated DD/Mon/YYYY` line in the
//! footer of every staged HTML file.

pub mod cli;
pub mod config;
pub mod error;
pub mod footer;
pub mod stamp;
pub mod vcs;

pub use error::Error;
