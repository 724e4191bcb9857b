//! Layered configuration for the CLI.
//!
//! Values are merged in the order command line > `-S` overrides > config file >
//! [`defaults::DefaultsConfig`], and handed to the library as its own config types.

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;
