//! Word Maker: invents pronounceable nonsense words and serves them
//! through a turn-based dialog.
//!
//! Words are built from Latin and Greek roots plus an English suffix,
//! then screened against real-word corpora and unpronounceable letter
//! sequences. A small state machine sequences launch, word delivery,
//! spelling, and "another one?" prompts.

pub mod core;
pub mod schema;

pub use crate::core::engine::{WordMaker, WordMakerBuilder, WordMakerError};
