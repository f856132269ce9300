//! Patchwork - an undoable overlay of pending edits for binary editors.
//!
//! The data being edited is never touched. Edits are kept as a sparse set
//! of non-overlapping change records on top of it, with a bounded undo
//! history, until the host projects them onto a view or drains them for
//! commit.
//!
//! # Quick Start
//!
//! ```
//! use patchwork::{EditEngine, Limit};
//!
//! let mut engine: EditEngine<u8> = EditEngine::default();
//!
//! // Overwrite two bytes at offset 10.
//! engine.change_bytes(10, &[0xAA, 0xBB], &[0x00, 0x00]).unwrap();
//! assert_eq!(engine.byte_value(11), 0xBB);
//!
//! // Project pending edits onto base data read from offset 8.
//! let mut view = [0u8; 5];
//! engine.apply_changes(&mut view, 8, Limit::Unbounded);
//! assert_eq!(view, [0, 0, 0xAA, 0xBB, 0]);
//!
//! // Undo brings back the unedited state.
//! assert_eq!(engine.undo(), Some(10));
//! assert!(!engine.has_changes());
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub(crate) mod history;
pub mod interval;
pub(crate) mod overlay;
pub mod span;

pub use config::EngineConfig;
pub use engine::EditEngine;
pub use engine::Limit;
pub use error::EditError;
pub use overlay::ChangeRecord;
pub use span::ByteSpan;
pub use span::Element;
