//! Typed style resolution on top of the raw cascade.
//!
//! The cascade ([`crate::css::cascade`]) deals only in raw strings. This
//! module parses those strings into the typed values layout and paint code
//! consume. An unparsable value is skipped, falling through to the
//! next-lower-ranked candidate for the same property, so a single bad
//! declaration never blanks out unrelated properties or stronger rules'
//! other values.

use crate::css::cascade::{CompiledStylesheet, MatchedDeclaration};
use crate::css::matcher::ElementIdentity;
use crate::element::text::TextOverflow;
use crate::geometry::{Edges, FlexAlign};
use crate::layout::solver::Constraint;

/// Errors from typed value parsing.
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    #[error("invalid integer: {0}")]
    InvalidInt(String),
    #[error("invalid constraint value: {0}")]
    InvalidConstraint(String),
    #[error("expected 1, 2, or 4 values, got {0}")]
    BadShorthandArity(usize),
    #[error("unknown keyword: {0}")]
    UnknownKeyword(String),
    #[error("empty value")]
    Empty,
}

/// Grid/columns item placement order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrackOrder {
    /// Fill each row before moving to the next.
    #[default]
    RowFirst,
    /// Fill each column before moving to the next.
    ColumnFirst,
}

/// Text style flags resolved from `text-style` declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyleFlags {
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub reverse: bool,
}

/// The typed per-element style consumed by layout and paint.
///
/// Every field is `Option<T>`; `None` means no matching rule declared a
/// parsable value, and the consumer falls back to its own default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedStyle {
    // Sizing
    pub width: Option<Constraint>,
    pub height: Option<Constraint>,

    // Linear containers
    pub spacing: Option<i32>,
    pub row_spacing: Option<i32>,
    pub flex: Option<FlexAlign>,

    // Insets
    pub margin: Option<Edges>,
    pub padding: Option<Edges>,

    // Grid
    pub grid_size: Option<(i32, Option<i32>)>,
    pub grid_columns: Option<Vec<Constraint>>,
    pub grid_rows: Option<Vec<Constraint>>,
    pub grid_gutter: Option<(i32, i32)>,

    // Dock regions
    pub dock_top_height: Option<i32>,
    pub dock_bottom_height: Option<i32>,
    pub dock_left_width: Option<i32>,
    pub dock_right_width: Option<i32>,

    // Columns / text
    pub column_count: Option<i32>,
    pub column_order: Option<TrackOrder>,
    pub text_overflow: Option<TextOverflow>,

    // Paint
    pub color: Option<String>,
    pub background: Option<String>,
    pub text_style: Option<TextStyleFlags>,
}

impl ComputedStyle {
    /// Resolve the typed style for an element against a compiled stylesheet.
    pub fn resolve(
        sheet: &CompiledStylesheet,
        target: &ElementIdentity<'_>,
        ancestors: &[ElementIdentity<'_>],
    ) -> ComputedStyle {
        let candidates = sheet.candidates(target, ancestors);

        ComputedStyle {
            width: pick(&candidates, "width", parse_constraint),
            height: pick(&candidates, "height", parse_constraint),
            spacing: pick(&candidates, "spacing", parse_non_negative),
            row_spacing: pick(&candidates, "row-spacing", parse_non_negative),
            flex: pick(&candidates, "flex", parse_flex),
            margin: pick(&candidates, "margin", parse_edges),
            padding: pick(&candidates, "padding", parse_edges),
            grid_size: pick(&candidates, "grid-size", parse_grid_size),
            grid_columns: pick(&candidates, "grid-columns", parse_track_list),
            grid_rows: pick(&candidates, "grid-rows", parse_track_list),
            grid_gutter: pick(&candidates, "grid-gutter", parse_gutter),
            dock_top_height: pick(&candidates, "dock-top-height", parse_non_negative),
            dock_bottom_height: pick(&candidates, "dock-bottom-height", parse_non_negative),
            dock_left_width: pick(&candidates, "dock-left-width", parse_non_negative),
            dock_right_width: pick(&candidates, "dock-right-width", parse_non_negative),
            column_count: pick(&candidates, "column-count", parse_positive),
            column_order: pick(&candidates, "column-order", parse_track_order),
            text_overflow: pick(&candidates, "text-overflow", parse_text_overflow),
            color: pick(&candidates, "color", parse_color),
            background: pick(&candidates, "background", parse_color),
            text_style: pick(&candidates, "text-style", parse_text_style),
        }
    }
}

/// Walk candidates for `property` from strongest to weakest, returning the
/// first value that parses. Unparsable values fall through.
fn pick<T>(
    candidates: &[MatchedDeclaration<'_>],
    property: &str,
    parse: impl Fn(&str) -> Result<T, ValueError>,
) -> Option<T> {
    candidates
        .iter()
        .rev()
        .filter(|m| m.declaration.property == property)
        .find_map(|m| parse(&m.declaration.value).ok())
}

// ---------------------------------------------------------------------------
// Value parsers
// ---------------------------------------------------------------------------

/// Parse a sizing value: an integer, `fit`, `p%`, `fill`, or `fill(n)`.
pub fn parse_constraint(value: &str) -> Result<Constraint, ValueError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValueError::Empty);
    }

    if value == "fit" {
        // Falls through the precedence chain to intrinsic sizing.
        return Ok(Constraint::Unspecified);
    }
    if value == "fill" {
        return Ok(Constraint::Fill(1));
    }
    if let Some(rest) = value.strip_prefix("fill(") {
        let inner = rest
            .strip_suffix(')')
            .ok_or_else(|| ValueError::InvalidConstraint(value.into()))?;
        let weight: u32 = inner
            .trim()
            .parse()
            .map_err(|_| ValueError::InvalidConstraint(value.into()))?;
        if weight == 0 {
            return Err(ValueError::InvalidConstraint(value.into()));
        }
        return Ok(Constraint::Fill(weight));
    }
    if let Some(percent) = value.strip_suffix('%') {
        let p: f64 = percent
            .parse()
            .map_err(|_| ValueError::InvalidConstraint(value.into()))?;
        return Ok(Constraint::Percentage(p.round() as i32));
    }

    let n: i32 = value
        .parse()
        .map_err(|_| ValueError::InvalidConstraint(value.into()))?;
    Ok(Constraint::Length(n))
}

fn parse_int(value: &str) -> Result<i32, ValueError> {
    value
        .trim()
        .parse()
        .map_err(|_| ValueError::InvalidInt(value.into()))
}

fn parse_non_negative(value: &str) -> Result<i32, ValueError> {
    let n = parse_int(value)?;
    if n < 0 {
        return Err(ValueError::InvalidInt(value.into()));
    }
    Ok(n)
}

fn parse_positive(value: &str) -> Result<i32, ValueError> {
    let n = parse_int(value)?;
    if n < 1 {
        return Err(ValueError::InvalidInt(value.into()));
    }
    Ok(n)
}

/// Parse margin/padding shorthand: 1 value (all sides), 2 values
/// (vertical horizontal), or 4 values (top right bottom left).
pub fn parse_edges(value: &str) -> Result<Edges, ValueError> {
    let parts: Result<Vec<i32>, ValueError> =
        value.split_whitespace().map(parse_non_negative).collect();
    let parts = parts?;

    match parts.as_slice() {
        [all] => Ok(Edges::all(*all)),
        [vertical, horizontal] => Ok(Edges::symmetric(*vertical, *horizontal)),
        [top, right, bottom, left] => Ok(Edges::new(*top, *right, *bottom, *left)),
        other => Err(ValueError::BadShorthandArity(other.len())),
    }
}

fn parse_flex(value: &str) -> Result<FlexAlign, ValueError> {
    match value.trim() {
        "start" => Ok(FlexAlign::Start),
        "center" => Ok(FlexAlign::Center),
        "end" => Ok(FlexAlign::End),
        "space-between" => Ok(FlexAlign::SpaceBetween),
        other => Err(ValueError::UnknownKeyword(other.into())),
    }
}

fn parse_text_overflow(value: &str) -> Result<TextOverflow, ValueError> {
    match value.trim() {
        "clip" => Ok(TextOverflow::Clip),
        "ellipsis" => Ok(TextOverflow::Ellipsis),
        "wrap-word" => Ok(TextOverflow::WrapWord),
        "wrap-character" => Ok(TextOverflow::WrapCharacter),
        other => Err(ValueError::UnknownKeyword(other.into())),
    }
}

fn parse_track_order(value: &str) -> Result<TrackOrder, ValueError> {
    match value.trim() {
        "row-first" => Ok(TrackOrder::RowFirst),
        "column-first" => Ok(TrackOrder::ColumnFirst),
        other => Err(ValueError::UnknownKeyword(other.into())),
    }
}

/// Parse `grid-size`: `columns` or `columns rows`.
fn parse_grid_size(value: &str) -> Result<(i32, Option<i32>), ValueError> {
    let parts: Result<Vec<i32>, ValueError> =
        value.split_whitespace().map(parse_positive).collect();
    let parts = parts?;
    match parts.as_slice() {
        [cols] => Ok((*cols, None)),
        [cols, rows] => Ok((*cols, Some(*rows))),
        other => Err(ValueError::BadShorthandArity(other.len())),
    }
}

/// Parse `grid-gutter`: one integer (uniform) or two
/// (horizontal vertical).
fn parse_gutter(value: &str) -> Result<(i32, i32), ValueError> {
    let parts: Result<Vec<i32>, ValueError> =
        value.split_whitespace().map(parse_non_negative).collect();
    let parts = parts?;
    match parts.as_slice() {
        [both] => Ok((*both, *both)),
        [horizontal, vertical] => Ok((*horizontal, *vertical)),
        other => Err(ValueError::BadShorthandArity(other.len())),
    }
}

/// Parse a whitespace-separated list of track constraints, e.g.
/// `grid-columns: 10 fill 25%`.
fn parse_track_list(value: &str) -> Result<Vec<Constraint>, ValueError> {
    let tracks: Result<Vec<Constraint>, ValueError> =
        value.split_whitespace().map(parse_constraint).collect();
    let tracks = tracks?;
    if tracks.is_empty() {
        return Err(ValueError::Empty);
    }
    Ok(tracks)
}

/// A color is kept as its raw spelling: a name (`cyan`) or hex (`#ff00aa`).
fn parse_color(value: &str) -> Result<String, ValueError> {
    let value = value.trim();
    let is_name = !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    let is_hex = value.len() >= 4
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit());
    if is_name || is_hex {
        Ok(value.to_string())
    } else {
        Err(ValueError::UnknownKeyword(value.into()))
    }
}

/// Parse `text-style`: one or more of bold, dim, italic, underline,
/// strikethrough, reverse.
fn parse_text_style(value: &str) -> Result<TextStyleFlags, ValueError> {
    let mut flags = TextStyleFlags::default();
    let mut any = false;

    for word in value.split_whitespace() {
        any = true;
        match word {
            "bold" => flags.bold = true,
            "dim" => flags.dim = true,
            "italic" => flags.italic = true,
            "underline" => flags.underline = true,
            "strikethrough" => flags.strikethrough = true,
            "reverse" => flags.reverse = true,
            other => return Err(ValueError::UnknownKeyword(other.into())),
        }
    }
    if !any {
        return Err(ValueError::Empty);
    }
    Ok(flags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    fn resolve_for(css: &str, type_name: &str) -> ComputedStyle {
        let sheet = CompiledStylesheet::parse(css).unwrap_or_else(|e| panic!("bad css: {e}"));
        let classes = BTreeSet::new();
        let attributes = BTreeMap::new();
        let pseudo = BTreeSet::new();
        let identity = ElementIdentity {
            type_name,
            id: None,
            classes: &classes,
            attributes: &attributes,
            pseudo_states: &pseudo,
            preceding: Vec::new(),
        };
        ComputedStyle::resolve(&sheet, &identity, &[])
    }

    // ── parse_constraint ─────────────────────────────────────────────

    #[test]
    fn constraint_values() {
        assert_eq!(parse_constraint("10").unwrap(), Constraint::Length(10));
        assert_eq!(parse_constraint("50%").unwrap(), Constraint::Percentage(50));
        assert_eq!(parse_constraint("fill").unwrap(), Constraint::Fill(1));
        assert_eq!(parse_constraint("fill(3)").unwrap(), Constraint::Fill(3));
        assert_eq!(parse_constraint("fit").unwrap(), Constraint::Unspecified);
    }

    #[test]
    fn constraint_rejects_garbage() {
        assert!(parse_constraint("").is_err());
        assert!(parse_constraint("banana").is_err());
        assert!(parse_constraint("fill(").is_err());
        assert!(parse_constraint("fill(0)").is_err());
        assert!(parse_constraint("fill(x)").is_err());
        assert!(parse_constraint("%").is_err());
    }

    // ── parse_edges ──────────────────────────────────────────────────

    #[test]
    fn edges_shorthand_arities() {
        assert_eq!(parse_edges("2").unwrap(), Edges::all(2));
        assert_eq!(parse_edges("1 3").unwrap(), Edges::symmetric(1, 3));
        assert_eq!(parse_edges("1 2 3 4").unwrap(), Edges::new(1, 2, 3, 4));
        assert!(parse_edges("1 2 3").is_err());
        assert!(parse_edges("").is_err());
        assert!(parse_edges("-1").is_err());
    }

    // ── other parsers ────────────────────────────────────────────────

    #[test]
    fn gutter_one_or_two_values() {
        assert_eq!(parse_gutter("2").unwrap(), (2, 2));
        assert_eq!(parse_gutter("1 3").unwrap(), (1, 3));
        assert!(parse_gutter("1 2 3").is_err());
    }

    #[test]
    fn track_list_values() {
        assert_eq!(
            parse_track_list("10 fill 25%").unwrap(),
            vec![Constraint::Length(10), Constraint::Fill(1), Constraint::Percentage(25)]
        );
        assert!(parse_track_list("").is_err());
        assert!(parse_track_list("10 junk").is_err());
    }

    #[test]
    fn color_names_and_hex() {
        assert_eq!(parse_color("cyan").unwrap(), "cyan");
        assert_eq!(parse_color("#ff00aa").unwrap(), "#ff00aa");
        assert!(parse_color("not a color").is_err());
        assert!(parse_color("#xyz").is_err());
    }

    #[test]
    fn text_style_flags() {
        let flags = parse_text_style("bold underline").unwrap();
        assert!(flags.bold);
        assert!(flags.underline);
        assert!(!flags.italic);
        assert!(parse_text_style("bold sparkly").is_err());
        assert!(parse_text_style("").is_err());
    }

    // ── Resolution through the cascade ───────────────────────────────

    #[test]
    fn resolves_typed_fields() {
        let style = resolve_for(
            "Row { width: fill(2); spacing: 1; flex: center; margin: 1 2; }",
            "Row",
        );
        assert_eq!(style.width, Some(Constraint::Fill(2)));
        assert_eq!(style.spacing, Some(1));
        assert_eq!(style.flex, Some(FlexAlign::Center));
        assert_eq!(style.margin, Some(Edges::symmetric(1, 2)));
        assert_eq!(style.height, None);
    }

    #[test]
    fn unparsable_value_falls_through_to_weaker_rule() {
        // The stronger rule's width is garbage; the weaker one still applies.
        let style = resolve_for(
            "Text { width: 10; } Text { width: banana; }",
            "Text",
        );
        assert_eq!(style.width, Some(Constraint::Length(10)));
    }

    #[test]
    fn unparsable_value_does_not_blank_other_properties() {
        let style = resolve_for(
            "Text { width: banana; height: 4; }",
            "Text",
        );
        assert_eq!(style.width, None);
        assert_eq!(style.height, Some(Constraint::Length(4)));
    }

    #[test]
    fn grid_and_dock_properties() {
        let style = resolve_for(
            "Grid { grid-size: 3 2; grid-gutter: 1; grid-columns: fill 10; } \
             Dock { dock-top-height: 3; dock-left-width: 20; }",
            "Grid",
        );
        assert_eq!(style.grid_size, Some((3, Some(2))));
        assert_eq!(style.grid_gutter, Some((1, 1)));
        assert_eq!(
            style.grid_columns,
            Some(vec![Constraint::Fill(1), Constraint::Length(10)])
        );
        assert_eq!(style.dock_top_height, None);

        let style = resolve_for("Dock { dock-top-height: 3; }", "Dock");
        assert_eq!(style.dock_top_height, Some(3));
    }

    #[test]
    fn text_overflow_keywords() {
        for (value, expected) in [
            ("clip", TextOverflow::Clip),
            ("ellipsis", TextOverflow::Ellipsis),
            ("wrap-word", TextOverflow::WrapWord),
            ("wrap-character", TextOverflow::WrapCharacter),
        ] {
            let style = resolve_for(&format!("Text {{ text-overflow: {value}; }}"), "Text");
            assert_eq!(style.text_overflow, Some(expected), "value: {value}");
        }
    }

    #[test]
    fn important_wins_at_typed_level() {
        let style = resolve_for(
            "Text { width: 10 !important; } Text { width: 20; }",
            "Text",
        );
        assert_eq!(style.width, Some(Constraint::Length(10)));
    }
}
