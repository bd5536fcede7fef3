//! Layout engine: axis constraint solving and per-variant arrangement.

pub mod arrange;
pub mod solver;

pub use arrange::TrackOrder;
pub use solver::{resolve_axis, solve_axis, Constraint};
