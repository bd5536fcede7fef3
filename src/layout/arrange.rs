//! Per-variant arrangement: partitioning a rect among children.
//!
//! Every function here is a pure mapping from an available rect plus child
//! sizing data to child rects. Nothing in this module touches elements,
//! styles, or buffers; the render layer resolves constraints first and
//! feeds the results in. Returned rects may extend past the available rect
//! (overfull flows, Min overflow); painting clips.

use crate::geometry::{Direction, FlexAlign, Rect, Size, StackAlign};
use crate::layout::solver::{solve_axis, Constraint};

/// Lay children along `direction` with `spacing` cells between them,
/// placing leftover main-axis space per `flex`. Children span the full
/// cross extent; the caller narrows them afterwards if a cross constraint
/// says otherwise.
pub fn arrange_line(
    area: Rect,
    direction: Direction,
    constraints: &[Constraint],
    spacing: i32,
    flex: FlexAlign,
) -> Vec<Rect> {
    let count = constraints.len();
    if count == 0 {
        return Vec::new();
    }

    let main_extent = match direction {
        Direction::Horizontal => area.width,
        Direction::Vertical => area.height,
    };
    let spacing = spacing.max(0);
    let spacing_total = spacing * (count as i32 - 1);
    let sizes = solve_axis(constraints, (main_extent - spacing_total).max(0));

    let used: i32 = sizes.iter().sum::<i32>() + spacing_total;
    let leftover = (main_extent - used).max(0);

    // Gap widths after flex placement: SpaceBetween widens the gaps, the
    // other modes shift the whole run.
    let (lead, gaps) = match flex {
        FlexAlign::Start => (0, vec![spacing; count.saturating_sub(1)]),
        FlexAlign::Center => (leftover / 2, vec![spacing; count.saturating_sub(1)]),
        FlexAlign::End => (leftover, vec![spacing; count.saturating_sub(1)]),
        FlexAlign::SpaceBetween => {
            let slots = count.saturating_sub(1);
            if slots == 0 {
                (0, Vec::new())
            } else {
                let extra = leftover / slots as i32;
                let remainder = (leftover % slots as i32) as usize;
                // Remainder cells widen the trailing gaps.
                let gaps = (0..slots)
                    .map(|i| spacing + extra + i32::from(i >= slots - remainder))
                    .collect();
                (0, gaps)
            }
        }
    };

    let mut out = Vec::with_capacity(count);
    let mut cursor = lead;
    for (i, size) in sizes.iter().enumerate() {
        let rect = match direction {
            Direction::Horizontal => Rect::new(area.x + cursor, area.y, *size, area.height),
            Direction::Vertical => Rect::new(area.x, area.y + cursor, area.width, *size),
        };
        out.push(rect);
        cursor += size;
        if let Some(gap) = gaps.get(i) {
            cursor += gap;
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Grid/columns item placement order lives in the css layer; re-exported
/// here for arrangement callers.
pub use crate::css::computed::TrackOrder;

/// Place `count` children into a grid over `area`.
///
/// Column count defaults to `ceil(sqrt(count))` and row count to
/// `ceil(count / columns)`. Track constraint lists are cycled when shorter
/// than the track count (empty list means every track is `Fill(1)`).
/// Gutters become synthetic `Length` tracks interleaved with the real ones
/// and threaded through the same axis solver.
pub fn arrange_grid(
    area: Rect,
    count: usize,
    columns: Option<i32>,
    rows: Option<i32>,
    col_tracks: &[Constraint],
    row_tracks: &[Constraint],
    gutter: (i32, i32),
    order: TrackOrder,
) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }

    let cols = columns.unwrap_or_else(|| (count as f64).sqrt().ceil() as i32).max(1);
    let rows = rows
        .unwrap_or_else(|| (count as i32 + cols - 1) / cols)
        .max(1);

    let col_spans = solve_tracks(area.width, cols, col_tracks, gutter.0);
    let row_spans = solve_tracks(area.height, rows, row_tracks, gutter.1);

    (0..count)
        .map(|i| {
            let (col, row) = match order {
                TrackOrder::RowFirst => (i as i32 % cols, i as i32 / cols),
                TrackOrder::ColumnFirst => (i as i32 / rows, i as i32 % rows),
            };
            cell_rect(area, &col_spans, &row_spans, col, row)
        })
        .collect()
}

/// Solve one grid axis: real tracks interleaved with fixed gutter tracks.
/// Returns `(offset, size)` per real track.
fn solve_tracks(extent: i32, count: i32, tracks: &[Constraint], gutter: i32) -> Vec<(i32, i32)> {
    let mut constraints = Vec::new();
    for i in 0..count {
        if i > 0 && gutter > 0 {
            constraints.push(Constraint::Length(gutter));
        }
        let track = if tracks.is_empty() {
            Constraint::Fill(1)
        } else {
            tracks[i as usize % tracks.len()]
        };
        constraints.push(track);
    }

    let sizes = solve_axis(&constraints, extent);
    let mut spans = Vec::with_capacity(constraints.len());
    let mut cursor = 0;
    for size in &sizes {
        spans.push((cursor, *size));
        cursor += size;
    }

    // Real tracks sit at every second slot when gutter entries were
    // interleaved, at every slot otherwise.
    if gutter > 0 {
        spans.into_iter().step_by(2).collect()
    } else {
        spans
    }
}

fn cell_rect(area: Rect, col_spans: &[(i32, i32)], row_spans: &[(i32, i32)], col: i32, row: i32) -> Rect {
    let (x, w) = col_spans
        .get(col as usize)
        .copied()
        .unwrap_or((0, 0));
    let (y, h) = row_spans
        .get(row as usize)
        .copied()
        .unwrap_or((0, 0));
    Rect::new(area.x + x, area.y + y, w, h)
}

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

/// Distribute items into a fixed number of equal-width columns, growing
/// rows as needed.
///
/// With no explicit count, `floor((width + spacing) / (max_item_width +
/// spacing))` columns are used, clamped to at least one.
pub fn arrange_columns(
    area: Rect,
    sizes: &[Size],
    count: Option<i32>,
    spacing: i32,
    order: TrackOrder,
) -> Vec<Rect> {
    if sizes.is_empty() {
        return Vec::new();
    }
    let spacing = spacing.max(0);

    let count = count
        .unwrap_or_else(|| {
            let max_w = sizes.iter().map(|s| s.width).max().unwrap_or(0);
            if max_w + spacing <= 0 {
                1
            } else {
                (area.width + spacing) / (max_w + spacing)
            }
        })
        .max(1);

    let col_constraints = vec![Constraint::Fill(1); count as usize];
    let col_rects = arrange_line(
        area,
        Direction::Horizontal,
        &col_constraints,
        spacing,
        FlexAlign::Start,
    );

    let rows = (sizes.len() as i32 + count - 1) / count;

    // Assign each item a (column, row) slot per the order flag.
    let slots: Vec<(i32, i32)> = (0..sizes.len() as i32)
        .map(|i| match order {
            TrackOrder::RowFirst => (i % count, i / count),
            TrackOrder::ColumnFirst => (i / rows, i % rows),
        })
        .collect();

    // Each visual row is as tall as its tallest item.
    let mut row_heights = vec![0; rows as usize];
    for (size, (_, row)) in sizes.iter().zip(&slots) {
        let h = &mut row_heights[*row as usize];
        *h = (*h).max(size.height);
    }
    let mut row_offsets = Vec::with_capacity(rows as usize);
    let mut y = 0;
    for h in &row_heights {
        row_offsets.push(y);
        y += h + spacing;
    }

    sizes
        .iter()
        .zip(&slots)
        .map(|(size, (col, row))| {
            let col_rect = col_rects[*col as usize];
            Rect::new(
                col_rect.x,
                area.y + row_offsets[*row as usize],
                col_rect.width,
                size.height.min(row_heights[*row as usize]),
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Flow
// ---------------------------------------------------------------------------

/// Greedy line-wrapping packer: children flow left to right with `spacing`
/// between them; a child that would overflow the width starts a new row
/// (separated by `row_spacing`). A child wider than the whole area still
/// lands alone on its own row.
pub fn arrange_flow(area: Rect, sizes: &[Size], spacing: i32, row_spacing: i32) -> Vec<Rect> {
    let spacing = spacing.max(0);
    let row_spacing = row_spacing.max(0);

    let mut out = Vec::with_capacity(sizes.len());
    let mut x = 0;
    let mut y = 0;
    let mut row_height = 0;

    for size in sizes {
        if x > 0 && x + spacing + size.width > area.width {
            y += row_height + row_spacing;
            x = 0;
            row_height = 0;
        }
        let gap = if x > 0 { spacing } else { 0 };
        out.push(Rect::new(area.x + x + gap, area.y + y, size.width, size.height));
        x += gap + size.width;
        row_height = row_height.max(size.height);
    }
    out
}

// ---------------------------------------------------------------------------
// Dock
// ---------------------------------------------------------------------------

/// Resolved extents for the dock regions that are present. `None` means
/// the region is absent and contributes zero space.
#[derive(Debug, Clone, Copy, Default)]
pub struct DockExtents {
    pub top: Option<i32>,
    pub bottom: Option<i32>,
    pub left: Option<i32>,
    pub right: Option<i32>,
    pub center: bool,
}

/// Computed rects for present dock regions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DockAreas {
    pub top: Option<Rect>,
    pub bottom: Option<Rect>,
    pub left: Option<Rect>,
    pub right: Option<Rect>,
    pub center: Option<Rect>,
}

/// Carve `area` into dock regions: top/bottom take full width first,
/// left/right take the remaining height, center fills what is left.
/// Omitted regions leave no gap behind.
pub fn arrange_dock(area: Rect, extents: DockExtents) -> DockAreas {
    let mut areas = DockAreas::default();
    let mut rest = area;

    if let Some(h) = extents.top {
        let (top, below) = rest.take_top(h.max(0));
        areas.top = Some(top);
        rest = below;
    }
    if let Some(h) = extents.bottom {
        let (above, bottom) = rest.take_bottom(h.max(0));
        areas.bottom = Some(bottom);
        rest = above;
    }
    if let Some(w) = extents.left {
        let (left, remainder) = rest.take_left(w.max(0));
        areas.left = Some(left);
        rest = remainder;
    }
    if let Some(w) = extents.right {
        let (remainder, right) = rest.take_right(w.max(0));
        areas.right = Some(right);
        rest = remainder;
    }
    if extents.center {
        areas.center = Some(rest);
    }
    areas
}

// ---------------------------------------------------------------------------
// Stack
// ---------------------------------------------------------------------------

/// All children share `area`. `Stretch` fills it; the other alignments pin
/// each child's preferred size (clamped to the area) at the anchor.
pub fn arrange_stack(area: Rect, sizes: &[Size], align: StackAlign) -> Vec<Rect> {
    sizes
        .iter()
        .map(|size| {
            if align == StackAlign::Stretch {
                return area;
            }
            let w = size.width.min(area.width);
            let h = size.height.min(area.height);
            let (x, y) = match align {
                StackAlign::Stretch => unreachable!(),
                StackAlign::TopLeft => (area.x, area.y),
                StackAlign::TopRight => (area.right() - w, area.y),
                StackAlign::BottomLeft => (area.x, area.bottom() - h),
                StackAlign::BottomRight => (area.right() - w, area.bottom() - h),
                StackAlign::Center => (
                    area.x + (area.width - w) / 2,
                    area.y + (area.height - h) / 2,
                ),
            };
            Rect::new(x, y, w, h)
        })
        .collect()
}

// ===========================================================================
// Tests
// ===========================================================================
