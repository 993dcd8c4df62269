//! # Isovox Core
//!
//! Engine for a unit-cube sculpture editor on an unbounded integer grid,
//! rendered as a fixed 2D isometric projection.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               isovox-core                   │
//! ├─────────────────────────────────────────────┤
//! │  Block Store     │  Picking                 │
//! │  - sparse map    │  - depth ordering        │
//! │  - inventory     │  - face hit test         │
//! │  - JSON I/O      │  - front-to-back resolve │
//! ├─────────────────────────────────────────────┤
//! │  Edit Engine     │  Session                 │
//! │  - add/remove    │  - hover tracking        │
//! │  - paint         │  - bounded undo          │
//! │  - no-op guard   │  - remix application     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Picking and rendering are pure over the current store contents; the
//! store is only mutated through the edit engine or an explicit remix,
//! both of which snapshot to the undo history first.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod depth;
pub mod edit;
pub mod error;
pub mod grid;
pub mod history;
pub mod pick;
pub mod session;
pub mod store;

pub use color::{lighten, parse_hex, shade, PALETTE};
pub use depth::{back_to_front, front_to_back};
pub use edit::{add_target, apply, EditOutcome, ToolMode};
pub use error::{SculptError, SculptResult};
pub use grid::{Face, GridCoord, Projection, ScreenPoint};
pub use history::UndoHistory;
pub use pick::{hit_face, resolve_pick, Pick};
pub use session::EditorSession;
pub use store::{Block, BlockStore};

/// Core crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
