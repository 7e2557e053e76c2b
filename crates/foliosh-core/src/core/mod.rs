//! Core interpreter logic.
//!
//! This module provides:
//! - [`VirtualFs`] virtual filesystem built from the site content
//! - [`commands`] registry, handlers and [`commands::dispatch`]
//! - [`complete`] for tab completion
//! - [`Terminal`] session state machine tying it all together

pub mod autocomplete;
pub mod commands;
pub mod error;
pub mod filesystem;
pub mod history;
pub mod parser;
pub mod session;
pub mod tutorial;

pub use autocomplete::{Completion, complete};
pub use error::{BackendError, SiteError};
pub use filesystem::VirtualFs;
pub use history::InputHistory;
pub use parser::{ParsedCommand, parse_input};
pub use session::{Mode, Subprogram, Terminal};
