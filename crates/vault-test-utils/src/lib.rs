//! Shared test utilities for the AppVault workspace.
//!
//! Dev-dependency only, never published. Depends on no workspace crate so
//! every crate's test suite can use it.
//!
//! # Modules
//!
//! - [`vault`]: [`TestVault`] builder for a complete working layout

pub mod vault;

pub use vault::{HOME_VAR, TestVault};
