//! Bottom-up measurement: preferred sizes and per-axis fit constraints.
//!
//! `preferred_width` and `preferred_height` are pure functions of
//! (element state, stylesheet, available width). They may run several
//! times per render pass and nothing memoizes across calls, so they must
//! never mutate the tree.

use crate::css::cascade::CompiledStylesheet;
use crate::css::computed::ComputedStyle;
use crate::css::matcher::ElementIdentity;
use crate::element::text::{self, TextOverflow};
use crate::element::{DockRegion, Element, ElementKind};
use crate::geometry::Direction;
use crate::layout::solver::{resolve_axis, solve_axis, Constraint};

/// The stylesheet plus the ancestor chain (outermost first) that selector
/// matching needs at the current tree position. Measurement and rendering
/// both thread one of these down the recursion. Ancestors are kept as
/// elements rather than identities so sibling runs can be rebuilt for the
/// adjacent combinator.
pub struct StyleContext<'s, 't> {
    sheet: &'s CompiledStylesheet,
    ancestors: Vec<&'t Element>,
}

impl<'s, 't> StyleContext<'s, 't> {
    pub fn new(sheet: &'s CompiledStylesheet) -> Self {
        Self {
            sheet,
            ancestors: Vec::new(),
        }
    }

    /// Resolve the element's style at the current position. Never cached;
    /// classes and attributes may have changed since the last pass.
    pub fn style(&self, element: &Element) -> ComputedStyle {
        let mut parent: Option<&Element> = None;
        let mut chain: Vec<ElementIdentity<'_>> = Vec::with_capacity(self.ancestors.len());
        for &ancestor in &self.ancestors {
            chain.push(ancestor.identity_within(parent));
            parent = Some(ancestor);
        }
        let target = element.identity_within(parent);
        ComputedStyle::resolve(self.sheet, &target, &chain)
    }

    /// Descend into `element`: it joins the ancestor chain for the
    /// duration of `f`.
    pub fn scoped<R>(&mut self, element: &'t Element, f: impl FnOnce(&mut Self) -> R) -> R {
        self.ancestors.push(element);
        let result = f(self);
        self.ancestors.pop();
        result
    }
}

/// Effective overflow mode for a text element: programmatic, then CSS,
/// then clip.
pub(crate) fn text_overflow(element: &Element, style: &ComputedStyle) -> TextOverflow {
    match &element.kind {
        ElementKind::Text { overflow, .. } => {
            (*overflow).or(style.text_overflow).unwrap_or_default()
        }
        _ => TextOverflow::default(),
    }
}

/// The width constraint a parent should solve with for this child:
/// explicit, then stylesheet, then fit content.
pub fn width_constraint<'t>(element: &'t Element, ctx: &mut StyleContext<'_, 't>) -> Constraint {
    let style = ctx.style(element);
    let fit = Constraint::Length(preferred_width(element, ctx));
    resolve_axis(element.width, style.width, Some(fit), Constraint::Fill(1))
}

/// The height constraint a parent should solve with at a known width.
/// Wrapping text contributes `Min(line_count)` so it can never collapse
/// below its content.
pub fn height_constraint<'t>(
    element: &'t Element,
    available_width: i32,
    ctx: &mut StyleContext<'_, 't>,
) -> Constraint {
    let style = ctx.style(element);
    let content = preferred_height(element, available_width, ctx);
    let fit = if text_overflow(element, &style).wraps() {
        Constraint::Min(content)
    } else {
        Constraint::Length(content)
    };
    resolve_axis(element.height, style.height, Some(fit), Constraint::Fill(1))
}

/// Preferred width including the element's own margin.
pub fn preferred_width<'t>(element: &'t Element, ctx: &mut StyleContext<'_, 't>) -> i32 {
    let style = ctx.style(element);
    let margin = element.margin.width();

    if let Some(Constraint::Length(n)) = element.width.or(style.width) {
        return n.max(0) + margin;
    }
    margin + content_width(element, &style, ctx)
}

/// Preferred height at `available_width`, including margin.
pub fn preferred_height<'t>(
    element: &'t Element,
    available_width: i32,
    ctx: &mut StyleContext<'_, 't>,
) -> i32 {
    let style = ctx.style(element);
    let margin = element.margin.height();

    if let Some(Constraint::Length(n)) = element.height.or(style.height) {
        return n.max(0) + margin;
    }
    let inner_width = (available_width - element.margin.width()).max(0);
    margin + content_height(element, &style, inner_width, ctx)
}

// ---------------------------------------------------------------------------
// Per-kind content sizes
// ---------------------------------------------------------------------------

fn content_width<'t>(
    element: &'t Element,
    style: &ComputedStyle,
    ctx: &mut StyleContext<'_, 't>,
) -> i32 {
    let spacing = style.spacing.unwrap_or(0).max(0);

    match &element.kind {
        ElementKind::Text { content, .. } => content
            .split('\n')
            .map(text::display_width)
            .max()
            .unwrap_or(0),
        ElementKind::Spacer | ElementKind::Custom { .. } => 0,

        ElementKind::Row | ElementKind::Flow => ctx.scoped(element, |ctx| {
            let n = element.children.len() as i32;
            let sum: i32 = element
                .children
                .iter()
                .map(|c| preferred_width(c, ctx))
                .sum();
            sum + spacing * (n - 1).max(0)
        }),

        ElementKind::Column | ElementKind::Stack { .. } | ElementKind::Columns => {
            ctx.scoped(element, |ctx| {
                element
                    .children
                    .iter()
                    .map(|c| preferred_width(c, ctx))
                    .max()
                    .unwrap_or(0)
            })
        }

        ElementKind::Panel { direction, bordered } => {
            let chrome = if *bordered { 2 } else { 0 };
            let padding = style.padding.unwrap_or_default().width();
            let inner = ctx.scoped(element, |ctx| {
                let widths: Vec<i32> = element
                    .children
                    .iter()
                    .map(|c| preferred_width(c, ctx))
                    .collect();
                match direction {
                    Direction::Horizontal => {
                        let n = widths.len() as i32;
                        widths.iter().sum::<i32>() + spacing * (n - 1).max(0)
                    }
                    Direction::Vertical => widths.into_iter().max().unwrap_or(0),
                }
            });
            chrome + padding + inner
        }

        ElementKind::Grid => ctx.scoped(element, |ctx| {
            let n = element.children.len() as i32;
            if n == 0 {
                return 0;
            }
            let cols = style
                .grid_size
                .map(|(c, _)| c)
                .unwrap_or_else(|| (n as f64).sqrt().ceil() as i32)
                .max(1);
            let widest = element
                .children
                .iter()
                .map(|c| preferred_width(c, ctx))
                .max()
                .unwrap_or(0);
            let gutter = style.grid_gutter.unwrap_or((0, 0)).0;
            widest * cols + gutter * (cols - 1).max(0)
        }),

        ElementKind::Dock { regions } => ctx.scoped(element, |ctx| {
            let mut full_span = 0;
            let mut middle = 0;
            for (region, child) in regions.iter().zip(&element.children) {
                let w = preferred_width(child, ctx);
                match region {
                    DockRegion::Top | DockRegion::Bottom => full_span = full_span.max(w),
                    DockRegion::Left | DockRegion::Right | DockRegion::Center => middle += w,
                }
            }
            full_span.max(middle)
        }),
    }
}

fn content_height<'t>(
    element: &'t Element,
    style: &ComputedStyle,
    width: i32,
    ctx: &mut StyleContext<'_, 't>,
) -> i32 {
    let spacing = style.spacing.unwrap_or(0).max(0);

    match &element.kind {
        ElementKind::Text { content, .. } => {
            let mode = text_overflow(element, style);
            text::wrap_lines(content, width, mode).len() as i32
        }
        ElementKind::Spacer | ElementKind::Custom { .. } => 0,

        ElementKind::Row => ctx.scoped(element, |ctx| {
            // Solve the row's widths so wrapping children measure at the
            // width they will actually get.
            let constraints: Vec<Constraint> = element
                .children
                .iter()
                .map(|c| width_constraint(c, ctx))
                .collect();
            let n = constraints.len() as i32;
            let widths = solve_axis(&constraints, (width - spacing * (n - 1).max(0)).max(0));
            element
                .children
                .iter()
                .zip(&widths)
                .map(|(c, w)| preferred_height(c, *w, ctx))
                .max()
                .unwrap_or(0)
        }),

        ElementKind::Column => ctx.scoped(element, |ctx| {
            let n = element.children.len() as i32;
            let sum: i32 = element
                .children
                .iter()
                .map(|c| preferred_height(c, width, ctx))
                .sum();
            sum + spacing * (n - 1).max(0)
        }),

        ElementKind::Stack { .. } => ctx.scoped(element, |ctx| {
            element
                .children
                .iter()
                .map(|c| preferred_height(c, width, ctx))
                .max()
                .unwrap_or(0)
        }),

        ElementKind::Panel { direction, bordered } => {
            let chrome = if *bordered { 2 } else { 0 };
            let padding = style.padding.unwrap_or_default();
            let inner_width = (width - chrome - padding.width()).max(0);
            let inner = ctx.scoped(element, |ctx| {
                let heights: Vec<i32> = element
                    .children
                    .iter()
                    .map(|c| preferred_height(c, inner_width, ctx))
                    .collect();
                match direction {
                    Direction::Vertical => {
                        let n = heights.len() as i32;
                        heights.iter().sum::<i32>() + spacing * (n - 1).max(0)
                    }
                    Direction::Horizontal => heights.into_iter().max().unwrap_or(0),
                }
            });
            chrome + padding.height() + inner
        }

        ElementKind::Grid => ctx.scoped(element, |ctx| {
            let n = element.children.len() as i32;
            if n == 0 {
                return 0;
            }
            let cols = style
                .grid_size
                .map(|(c, _)| c)
                .unwrap_or_else(|| (n as f64).sqrt().ceil() as i32)
                .max(1);
            let rows = style
                .grid_size
                .and_then(|(_, r)| r)
                .unwrap_or((n + cols - 1) / cols)
                .max(1);
            let tallest = element
                .children
                .iter()
                .map(|c| {
                    let w = preferred_width(c, ctx);
                    preferred_height(c, w, ctx)
                })
                .max()
                .unwrap_or(0);
            let gutter = style.grid_gutter.unwrap_or((0, 0)).1;
            tallest * rows + gutter * (rows - 1).max(0)
        }),

        ElementKind::Columns => ctx.scoped(element, |ctx| {
            let n = element.children.len() as i32;
            if n == 0 {
                return 0;
            }
            let count = columns_count(element, style, width, ctx);
            let rows = (n + count - 1) / count;
            let tallest = element
                .children
                .iter()
                .map(|c| {
                    let w = preferred_width(c, ctx);
                    preferred_height(c, w, ctx)
                })
                .max()
                .unwrap_or(0);
            rows * tallest + spacing * (rows - 1).max(0)
        }),

        ElementKind::Flow => ctx.scoped(element, |ctx| {
            let row_spacing = style.row_spacing.unwrap_or(0).max(0);
            let mut x = 0;
            let mut total = 0;
            let mut row_height = 0;
            for child in &element.children {
                let w = preferred_width(child, ctx);
                let h = preferred_height(child, w, ctx);
                if x > 0 && x + spacing + w > width {
                    total += row_height + row_spacing;
                    x = 0;
                    row_height = 0;
                }
                let gap = if x > 0 { spacing } else { 0 };
                x += gap + w;
                row_height = row_height.max(h);
            }
            total + row_height
        }),

        ElementKind::Dock { regions } => ctx.scoped(element, |ctx| {
            let mut stacked = 0;
            let mut middle = 0;
            for (region, child) in regions.iter().zip(&element.children) {
                let w = preferred_width(child, ctx);
                let h = preferred_height(child, w, ctx);
                match region {
                    DockRegion::Top | DockRegion::Bottom => stacked += h,
                    DockRegion::Left | DockRegion::Right | DockRegion::Center => {
                        middle = middle.max(h)
                    }
                }
            }
            stacked + middle
        }),
    }
}

/// Column count for a Columns container: explicit from CSS, otherwise
/// derived from the widest item.
pub(crate) fn columns_count<'t>(
    element: &'t Element,
    style: &ComputedStyle,
    width: i32,
    ctx: &mut StyleContext<'_, 't>,
) -> i32 {
    if let Some(count) = style.column_count {
        return count.max(1);
    }
    let spacing = style.spacing.unwrap_or(0).max(0);
    let widest = element
        .children
        .iter()
        .map(|c| preferred_width(c, ctx))
        .max()
        .unwrap_or(0);
    if widest + spacing <= 0 {
        1
    } else {
        ((width + spacing) / (widest + spacing)).max(1)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
