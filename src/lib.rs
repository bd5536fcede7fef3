//! # weft-tui
//!
//! A CSS-styled layout and cascade engine for terminal UIs: a retained
//! element tree, a flexbox-like constraint solver, and a CSS-inspired
//! selector/cascade engine that together compute per-element rectangles
//! and resolved styles, composited onto an in-memory cell buffer.
//!
//! weft-tui deliberately stops at the buffer: terminal I/O, the event
//! loop, and input dispatch are external collaborators that consume the
//! painted cells and drive tree mutation between frames.
//!
//! ## Core Systems
//!
//! - **[`geometry`]** — Rect, Size, Edges, direction/alignment primitives
//! - **[`css`]** — Tokenizer, parser, selector matcher, specificity,
//!   cascade, and typed style resolution
//! - **[`layout`]** — Axis constraint solving and per-variant arrangement
//!   (rows, grids, flows, docks, stacks)
//! - **[`element`]** — The element tree, measurement, and painting
//! - **[`render`]** — Cell buffer and the single-threaded render pass
//! - **[`testing`]** — Plain-text snapshot helpers
//!
//! ## A minimal frame
//!
//! ```
//! use weft_tui::css::cascade::CompiledStylesheet;
//! use weft_tui::element::Element;
//! use weft_tui::geometry::Direction;
//! use weft_tui::render::{render, Buffer};
//!
//! let sheet = CompiledStylesheet::parse("Panel { padding: 0; }").unwrap();
//! let tree = Element::panel(Direction::Vertical)
//!     .title("Demo")
//!     .child(Element::text("hello"));
//! let mut buf = Buffer::new(20, 5);
//! render(&tree, &sheet, buf.area(), &mut buf);
//! ```

// Foundation
pub mod geometry;

// Core systems
pub mod css;
pub mod layout;

// Element tree
pub mod element;

// Rendering
pub mod render;

// Test support
pub mod testing;

pub use element::Element;
pub use geometry::{Direction, Edges, FlexAlign, Rect, Size, StackAlign};
pub use layout::Constraint;
pub use render::{render, Buffer, CellStyle, RenderPass};
