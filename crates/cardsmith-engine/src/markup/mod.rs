//! # Card Markup
//!
//! Parses the constrained markdown used for card back text into [`Block`]s.
//!
//! ## Grammar
//!
//! - `## text` on its own line is a header
//! - `* text` on its own line is a bullet item
//! - consecutive other lines form one paragraph; a blank line ends it
//! - `**bold**` or `__bold__` inside any block marks bold text
//!
//! ## Modules
//!
//! - **`types`**: `Block`, `BlockKind` and `Segment`
//! - **`blocks`**: `LineClass` and the `BlockBuilder` state machine
//! - **`emphasis`**: `split_emphasis()` scanner for bold spans
//! - **`cursor`**: `Cursor` for character-by-character scanning

pub mod blocks;
pub mod cursor;
pub mod emphasis;
pub mod types;


pub use emphasis::split_emphasis;
pub use types::{Block, BlockKind, Segment};

use blocks::{BlockBuilder, LineClass};

/// Parses card text into an ordered sequence of blocks.
pub fn parse(text: &str) -> Vec<Block> {
    let mut builder = BlockBuilder::new();
    for line in text.lines() {
        builder.push(LineClass::classify(line));
    }
    builder.finish()
}
