//! Snapshot helpers: render trees to plain text for assertions.

use crate::css::cascade::CompiledStylesheet;
use crate::css::parser::ParseError;
use crate::element::Element;
use crate::render::buffer::Buffer;
use crate::render::pass;

/// Flatten a buffer into newline-joined rows of symbols, styles dropped.
pub fn buffer_to_string(buf: &Buffer) -> String {
    let mut out = String::new();
    for y in 0..buf.height() {
        if y > 0 {
            out.push('\n');
        }
        for x in 0..buf.width() {
            out.push(buf.get(x, y).map(|c| c.symbol).unwrap_or(' '));
        }
    }
    out
}

/// Parse `css`, render `root` into a fresh `width` x `height` buffer, and
/// return the text. The workhorse for snapshot-style tests.
pub fn render_to_string(
    root: &Element,
    css: &str,
    width: i32,
    height: i32,
) -> Result<String, ParseError> {
    let sheet = CompiledStylesheet::parse(css)?;
    let mut buf = Buffer::new(width, height);
    pass::render(root, &sheet, buf.area(), &mut buf);
    Ok(buffer_to_string(&buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::buffer::CellStyle;

    #[test]
    fn buffer_to_string_rows() {
        let mut buf = Buffer::new(3, 2);
        buf.set_string(0, 0, "ab", &CellStyle::default());
        buf.set_string(0, 1, "c", &CellStyle::default());
        assert_eq!(buffer_to_string(&buf), "ab \nc  ");
    }

    #[test]
    fn render_to_string_end_to_end() {
        let out = render_to_string(&Element::text("hey"), "", 5, 1).unwrap();
        assert_eq!(out, "hey  ");
    }

    #[test]
    fn render_to_string_rejects_bad_css() {
        assert!(render_to_string(&Element::text("x"), "Text {", 5, 1).is_err());
    }
}
