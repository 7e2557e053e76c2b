//! Interpreter for a portfolio terminal.
//!
//! A visitor types shell-style commands against a small read-only virtual
//! filesystem built from the site content. Account and blog commands go
//! through the [`backend::Backend`] capability. The whole interactive state
//! lives in [`core::Terminal`]; front ends feed it key events and render its
//! scrollback.

pub mod backend;
pub mod config;
pub mod core;
pub mod models;
pub mod utils;
