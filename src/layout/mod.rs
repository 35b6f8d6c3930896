//! # Text Layout Module
//!
//! Pure text-fitting and vertical stacking math. No I/O, no backend
//! awareness: everything here is deterministic on its inputs.

pub mod stack;
pub mod text;

pub use stack::{block_height, stack_blocks, StackLayout};
pub use text::{layout_text, FitSpec, TextBlock};
