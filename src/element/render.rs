//! Top-down arrangement and painting.
//!
//! `render_element` resolves the element's style at its tree position,
//! partitions its area among children per the container kind, and recurses.
//! A zero-width or zero-height area short-circuits the whole subtree
//! before any work happens, leaving the buffer untouched.

use crate::css::computed::ComputedStyle;
use crate::element::measure::{
    self, columns_count, height_constraint, preferred_height, preferred_width, width_constraint,
    StyleContext,
};
use crate::element::text;
use crate::element::{DockRegion, Element, ElementKind};
use crate::geometry::{Direction, Rect, Size};
use crate::layout::arrange::{
    arrange_columns, arrange_dock, arrange_flow, arrange_grid, arrange_line, arrange_stack,
    DockExtents, TrackOrder,
};
use crate::layout::solver::{resolve_axis, solve_axis, Constraint};
use crate::render::buffer::{Buffer, CellStyle};

pub(crate) fn render_element<'t>(
    element: &'t Element,
    area: Rect,
    ctx: &mut StyleContext<'_, 't>,
    buf: &mut Buffer,
) {
    if area.is_empty() {
        return;
    }
    let area = area.shrink(element.margin);
    if area.is_empty() {
        return;
    }

    let style = ctx.style(element);
    let paint = CellStyle::from_computed(&style);
    if style.background.is_some() {
        buf.fill(area, ' ', &paint);
    }

    match &element.kind {
        ElementKind::Row => render_line(element, &style, area, Direction::Horizontal, ctx, buf),
        ElementKind::Column => render_line(element, &style, area, Direction::Vertical, ctx, buf),
        ElementKind::Panel { direction, bordered } => {
            render_panel(element, &style, &paint, area, *direction, *bordered, ctx, buf)
        }
        ElementKind::Grid => render_grid(element, &style, area, ctx, buf),
        ElementKind::Columns => render_columns(element, &style, area, ctx, buf),
        ElementKind::Flow => render_flow(element, &style, area, ctx, buf),
        ElementKind::Dock { regions } => render_dock(element, &style, regions, area, ctx, buf),
        ElementKind::Stack { align } => {
            let sizes = child_sizes(element, ctx);
            let rects = arrange_stack(area, &sizes, *align);
            ctx.scoped(element, |ctx| {
                // Declaration order is paint order: the last child wins
                // every cell both cover.
                for (child, rect) in element.children.iter().zip(rects) {
                    render_element(child, rect, ctx, buf);
                }
            });
        }
        ElementKind::Text { content, .. } => {
            let mode = measure::text_overflow(element, &style);
            let lines = text::wrap_lines(content, area.width, mode);
            for (i, line) in lines.iter().take(area.height as usize).enumerate() {
                let visible = text::truncate_line(line, area.width, mode);
                buf.set_string(area.x, area.y + i as i32, &visible, &paint);
            }
        }
        ElementKind::Spacer => {}
        ElementKind::Custom { paint: painter, .. } => painter(area, &paint, buf),
    }
}

// ---------------------------------------------------------------------------
// Linear containers
// ---------------------------------------------------------------------------

fn render_line<'t>(
    element: &'t Element,
    style: &ComputedStyle,
    area: Rect,
    direction: Direction,
    ctx: &mut StyleContext<'_, 't>,
    buf: &mut Buffer,
) {
    if element.children.is_empty() {
        return;
    }
    let spacing = style.spacing.unwrap_or(0).max(0);
    let flex = style.flex.unwrap_or_default();

    ctx.scoped(element, |ctx| {
        let constraints: Vec<Constraint> = match direction {
            Direction::Horizontal => element
                .children
                .iter()
                .map(|c| width_constraint(c, ctx))
                .collect(),
            Direction::Vertical => element
                .children
                .iter()
                .map(|c| height_constraint(c, area.width, ctx))
                .collect(),
        };
        let slots = arrange_line(area, direction, &constraints, spacing, flex);

        for (child, slot) in element.children.iter().zip(slots) {
            // The cross axis defaults to the full extent unless the
            // child's own cross constraint narrows it.
            let child_style = ctx.style(child);
            let rect = match direction {
                Direction::Horizontal => {
                    let h = cross_extent(child.height, child_style.height, slot.height);
                    Rect::new(slot.x, slot.y, slot.width, h)
                }
                Direction::Vertical => {
                    let w = cross_extent(child.width, child_style.width, slot.width);
                    Rect::new(slot.x, slot.y, w, slot.height)
                }
            };
            render_element(child, rect, ctx, buf);
        }
    });
}

fn cross_extent(explicit: Option<Constraint>, css: Option<Constraint>, extent: i32) -> i32 {
    let constraint = resolve_axis(explicit, css, None, Constraint::Fill(1));
    solve_axis(&[constraint], extent)[0]
}

// ---------------------------------------------------------------------------
// Panel
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn render_panel<'t>(
    element: &'t Element,
    style: &ComputedStyle,
    paint: &CellStyle,
    area: Rect,
    direction: Direction,
    bordered: bool,
    ctx: &mut StyleContext<'_, 't>,
    buf: &mut Buffer,
) {
    let mut inner = area;
    if bordered {
        draw_border(buf, area, paint, element);
        inner = inner.inset(1);
    }
    inner = inner.shrink(style.padding.unwrap_or_default());
    if inner.is_empty() {
        return;
    }
    render_line(element, style, inner, direction, ctx, buf);
}

fn draw_border(buf: &mut Buffer, area: Rect, style: &CellStyle, element: &Element) {
    let (right, bottom) = (area.right() - 1, area.bottom() - 1);

    for x in area.x..=right {
        buf.set_cell(x, area.y, '─', style.clone());
        buf.set_cell(x, bottom, '─', style.clone());
    }
    for y in area.y..=bottom {
        buf.set_cell(area.x, y, '│', style.clone());
        buf.set_cell(right, y, '│', style.clone());
    }
    buf.set_cell(area.x, area.y, '┌', style.clone());
    buf.set_cell(right, area.y, '┐', style.clone());
    buf.set_cell(area.x, bottom, '└', style.clone());
    buf.set_cell(right, bottom, '┘', style.clone());

    if let Some(title) = element.attributes.get("title") {
        draw_title(buf, area, area.y, title, style);
    }
    if let Some(title) = element.attributes.get("bottom-title") {
        draw_title(buf, area, bottom, title, style);
    }
}

/// Draw a title into a border row, clipped to the available span. Titles
/// are never wrapped.
fn draw_title(buf: &mut Buffer, area: Rect, y: i32, title: &str, style: &CellStyle) {
    let span = area.width - 4;
    if span <= 0 || title.is_empty() {
        return;
    }
    let clipped = text::take_cells(title, span);
    buf.set_string(area.x + 1, y, &format!(" {clipped} "), style);
}

// ---------------------------------------------------------------------------
// Grid / Columns / Flow
// ---------------------------------------------------------------------------

fn render_grid<'t>(
    element: &'t Element,
    style: &ComputedStyle,
    area: Rect,
    ctx: &mut StyleContext<'_, 't>,
    buf: &mut Buffer,
) {
    let (columns, rows) = match style.grid_size {
        Some((c, r)) => (Some(c), r),
        None => (None, None),
    };
    let rects = arrange_grid(
        area,
        element.children.len(),
        columns,
        rows,
        style.grid_columns.as_deref().unwrap_or(&[]),
        style.grid_rows.as_deref().unwrap_or(&[]),
        style.grid_gutter.unwrap_or((0, 0)),
        style.column_order.unwrap_or_default(),
    );
    ctx.scoped(element, |ctx| {
        for (child, rect) in element.children.iter().zip(rects) {
            render_element(child, rect, ctx, buf);
        }
    });
}

fn render_columns<'t>(
    element: &'t Element,
    style: &ComputedStyle,
    area: Rect,
    ctx: &mut StyleContext<'_, 't>,
    buf: &mut Buffer,
) {
    let count = ctx.scoped(element, |ctx| columns_count(element, style, area.width, ctx));
    let sizes = child_sizes(element, ctx);
    let rects = arrange_columns(
        area,
        &sizes,
        Some(count),
        style.spacing.unwrap_or(0),
        style.column_order.unwrap_or(TrackOrder::RowFirst),
    );
    ctx.scoped(element, |ctx| {
        for (child, rect) in element.children.iter().zip(rects) {
            render_element(child, rect.intersection(area), ctx, buf);
        }
    });
}

fn render_flow<'t>(
    element: &'t Element,
    style: &ComputedStyle,
    area: Rect,
    ctx: &mut StyleContext<'_, 't>,
    buf: &mut Buffer,
) {
    let sizes = child_sizes(element, ctx);
    let rects = arrange_flow(
        area,
        &sizes,
        style.spacing.unwrap_or(0),
        style.row_spacing.unwrap_or(0),
    );
    ctx.scoped(element, |ctx| {
        for (child, rect) in element.children.iter().zip(rects) {
            render_element(child, rect.intersection(area), ctx, buf);
        }
    });
}

/// Preferred (width, height-at-that-width) per child, measured in the
/// element's scope.
fn child_sizes<'t>(element: &'t Element, ctx: &mut StyleContext<'_, 't>) -> Vec<Size> {
    ctx.scoped(element, |ctx| {
        element
            .children
            .iter()
            .map(|c| {
                let w = preferred_width(c, ctx);
                Size::new(w, preferred_height(c, w, ctx))
            })
            .collect()
    })
}

// ---------------------------------------------------------------------------
// Dock
// ---------------------------------------------------------------------------

fn render_dock<'t>(
    element: &'t Element,
    style: &ComputedStyle,
    regions: &[DockRegion],
    area: Rect,
    ctx: &mut StyleContext<'_, 't>,
    buf: &mut Buffer,
) {
    let child_of = |region: DockRegion| {
        regions
            .iter()
            .position(|r| *r == region)
            .map(|i| &element.children[i])
    };

    let mut extents = DockExtents::default();
    ctx.scoped(element, |ctx| {
        if let Some(child) = child_of(DockRegion::Top) {
            extents.top = Some(
                style
                    .dock_top_height
                    .unwrap_or_else(|| preferred_height(child, area.width, ctx)),
            );
        }
        if let Some(child) = child_of(DockRegion::Bottom) {
            extents.bottom = Some(
                style
                    .dock_bottom_height
                    .unwrap_or_else(|| preferred_height(child, area.width, ctx)),
            );
        }
        if let Some(child) = child_of(DockRegion::Left) {
            extents.left = Some(
                style
                    .dock_left_width
                    .unwrap_or_else(|| preferred_width(child, ctx)),
            );
        }
        if let Some(child) = child_of(DockRegion::Right) {
            extents.right = Some(
                style
                    .dock_right_width
                    .unwrap_or_else(|| preferred_width(child, ctx)),
            );
        }
        extents.center = child_of(DockRegion::Center).is_some();

        // Both sides present with neither width set by stylesheet: the
        // docked pair splits the width evenly, left taking the smaller
        // half on odd widths.
        if extents.left.is_some()
            && extents.right.is_some()
            && style.dock_left_width.is_none()
            && style.dock_right_width.is_none()
        {
            let half = area.width / 2;
            extents.left = Some(half);
            extents.right = Some(area.width - half);
        }

        let areas = arrange_dock(area, extents);
        let pairs = [
            (DockRegion::Top, areas.top),
            (DockRegion::Bottom, areas.bottom),
            (DockRegion::Left, areas.left),
            (DockRegion::Right, areas.right),
            (DockRegion::Center, areas.center),
        ];
        for (region, rect) in pairs {
            if let (Some(child), Some(rect)) = (child_of(region), rect) {
                render_element(child, rect, ctx, buf);
            }
        }
    });
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::cascade::CompiledStylesheet;
    use crate::testing::buffer_to_string;

    fn render_str(el: &Element, css: &str, width: i32, height: i32) -> String {
        let sheet = CompiledStylesheet::parse(css).unwrap_or_else(|e| panic!("bad css: {e}"));
        let mut buf = Buffer::new(width, height);
        let mut ctx = StyleContext::new(&sheet);
        render_element(el, Rect::new(0, 0, width, height), &mut ctx, &mut buf);
        buffer_to_string(&buf)
    }

    // -----------------------------------------------------------------------
    // Leaves
    // -----------------------------------------------------------------------

    #[test]
    fn text_paints_at_origin() {
        let el = Element::text("hi");
        assert_eq!(render_str(&el, "", 4, 1), "hi  ");
    }

    #[test]
    fn text_ellipsis_truncates() {
        let el = Element::text("hello world").overflow(text::TextOverflow::Ellipsis);
        assert_eq!(render_str(&el, "", 5, 1), "hell…");
    }

    #[test]
    fn wrapped_text_fills_lines() {
        let el = Element::text("one two three").overflow(text::TextOverflow::WrapWord);
        assert_eq!(render_str(&el, "", 5, 3), "one  \ntwo  \nthree");
    }

    #[test]
    fn custom_leaf_paints_through_callback() {
        let el = Element::custom(
            "Dot",
            Box::new(|area, style, buf| buf.set_cell(area.x, area.y, '*', style.clone())),
        );
        assert_eq!(render_str(&el, "", 3, 1), "*  ");
    }

    // -----------------------------------------------------------------------
    // Row behavior
    // -----------------------------------------------------------------------

    #[test]
    fn row_with_fixed_children_and_gap() {
        let row = Element::row()
            .child(Element::text("aaaaa").width(Constraint::Length(5)))
            .child(Element::text("bbbbb").width(Constraint::Length(5)));
        let out = render_str(&row, "Row { spacing: 2; }", 20, 1);
        assert_eq!(out, "aaaaa  bbbbb        ");
    }

    #[test]
    fn zero_sized_child_does_not_paint() {
        let row = Element::row()
            .child(Element::text("xxxx").width(Constraint::Length(0)))
            .child(Element::text("yy"));
        assert_eq!(render_str(&row, "", 6, 1), "yy    ");
    }

    // -----------------------------------------------------------------------
    // Panel chrome
    // -----------------------------------------------------------------------

    #[test]
    fn bordered_panel_draws_box() {
        let panel = Element::panel(Direction::Vertical).child(Element::text("ab"));
        assert_eq!(render_str(&panel, "", 4, 3), "┌──┐\n│ab│\n└──┘");
    }

    #[test]
    fn panel_title_sits_in_top_border() {
        let panel = Element::panel(Direction::Vertical).title("Hi");
        let out = render_str(&panel, "", 8, 2);
        assert_eq!(out.lines().next().unwrap(), "┌ Hi ──┐");
    }

    #[test]
    fn panel_frame_snapshot() {
        let panel = Element::panel(Direction::Vertical)
            .title("Hi")
            .child(Element::text("ab"));
        insta::assert_snapshot!(render_str(&panel, "", 6, 3), @r"
        ┌ Hi ┐
        │ab  │
        └────┘
        ");
    }

    #[test]
    fn panel_long_title_is_clipped() {
        let panel = Element::panel(Direction::Vertical).title("Extremely long");
        let out = render_str(&panel, "", 8, 2);
        assert_eq!(out.lines().next().unwrap(), "┌ Extr ┐");
    }

    // -----------------------------------------------------------------------
    // Empty-area idempotence
    // -----------------------------------------------------------------------

    #[test]
    fn empty_area_leaves_buffer_untouched() {
        let el = Element::row().child(Element::text("x"));
        let sheet = CompiledStylesheet::parse("").unwrap();
        let mut buf = Buffer::new(5, 5);
        let before = buf.clone();
        let mut ctx = StyleContext::new(&sheet);
        render_element(&el, Rect::new(0, 0, 0, 5), &mut ctx, &mut buf);
        render_element(&el, Rect::new(0, 0, 5, 0), &mut ctx, &mut buf);
        assert_eq!(buf, before);
    }

    // -----------------------------------------------------------------------
    // Stack paint order
    // -----------------------------------------------------------------------

    #[test]
    fn stack_last_child_wins() {
        let stack = Element::stack()
            .child(Element::text("AAAA"))
            .child(Element::text("BB"));
        assert_eq!(render_str(&stack, "", 4, 1), "BBAA");
    }
}
