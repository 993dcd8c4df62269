//! # Isovox Collab
//!
//! AI collaborator client for the sculpture editor: sends the current
//! block list out for critique, and requests remix proposals that
//! rearrange the existing inventory into a new sculpture.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │             CollabClient                  │
//! │  critique(blocks) -> SculptureAnalysis    │
//! │  remix(blocks)    -> RemixBlueprint       │
//! └──────────────┬───────────────────────────┘
//!                │ reqwest (JSON, schema-constrained output)
//!                ▼
//!      generateContent REST endpoint
//! ```
//!
//! Remix proposals are validated before they reach the caller: the
//! per-color block counts must match the sculpture the request was made
//! for, and no two proposed blocks may share a cell.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod error;
pub mod validate;

pub use client::{CollabClient, RemixBlueprint, SculptureAnalysis};
pub use error::{CollabError, CollabResult};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
