//! Rendering: cell buffer and the per-frame render pass.

pub mod buffer;
pub mod pass;

pub use buffer::{Buffer, Cell, CellStyle};
pub use pass::{render, RenderPass};
