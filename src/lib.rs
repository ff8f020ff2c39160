//! Locbake - locale resolution for serializable models
//!
//! Locbake loads YAML locale resources into an immutable store and resolves
//! models holding localizable values (strings, integers, dates, arrays, joined
//! pieces and `%{placeholder}` templates) into plain constants for one locale,
//! ready to be serialized.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface for inspecting resource trees
//! - `config`: Configuration file loading and parsing
//! - `core`: Store, value family and the resolution pass
//! - `error`: Store and resolution error types

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
