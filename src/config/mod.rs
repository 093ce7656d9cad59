// src/config/mod.rs

//! Configuration loading and validation for watchreact.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file and merge CLI flags over it (`loader.rs`).
//! - Validate and compile it into an immutable `ReactConfig` (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, resolve};
pub use model::{RawConfigFile, ReactConfig};
