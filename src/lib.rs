//! Library crate for randuser-manager.
//!
//! This crate exposes the building blocks of the TUI:
//! - Application state, controller and event loop (`app`)
//! - Random-user API client and record types (`api`)
//! - Error and result types (`error`)
//! - Display formatting (`format`)
//! - Transient notification banner (`notify`)
//! - In-memory user store (`store`)
//! - UI rendering and widgets (`ui`)
//! - Count validation (`validate`)
//!
//! It is used by the `randuser-manager` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod api;
pub mod app;
pub mod error;
pub mod format;
pub mod notify;
pub mod store;
pub mod ui;
pub mod validate;

/// Convenient error and result types shared across the crate.
pub use error::{GenerateError, Result};
