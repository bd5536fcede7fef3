//! Text shaping: overflow modes, wrapping, and display-width measurement.
//!
//! All measurement is in terminal display cells via `unicode-width`, not
//! bytes or chars, so wide glyphs (CJK) occupy two cells.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// How text behaves when it exceeds its available width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextOverflow {
    /// Excess is cut at the right edge.
    #[default]
    Clip,
    /// Excess is cut and the last visible cell becomes `…`.
    Ellipsis,
    /// Break at whitespace; a single word wider than the line falls back
    /// to character breaking for that word only.
    WrapWord,
    /// Break at any character boundary.
    WrapCharacter,
}

impl TextOverflow {
    pub const fn wraps(self) -> bool {
        matches!(self, TextOverflow::WrapWord | TextOverflow::WrapCharacter)
    }
}

/// Display width of a string in terminal cells.
pub fn display_width(text: &str) -> i32 {
    UnicodeWidthStr::width(text) as i32
}

/// Split `text` into the lines it will occupy at `width` cells.
///
/// Non-wrapping modes split only at explicit newlines (clipping happens at
/// paint time). A non-positive width returns the newline-split lines
/// untouched, since the caller will short-circuit painting anyway.
pub fn wrap_lines(text: &str, width: i32, mode: TextOverflow) -> Vec<String> {
    let raw: Vec<&str> = text.split('\n').collect();
    if width <= 0 || !mode.wraps() {
        return raw.into_iter().map(str::to_string).collect();
    }

    let mut lines = Vec::new();
    for line in raw {
        match mode {
            TextOverflow::WrapWord => wrap_word(line, width, &mut lines),
            TextOverflow::WrapCharacter => wrap_character(line, width, &mut lines),
            _ => unreachable!(),
        }
    }
    lines
}

/// Truncate a single line to `width` cells per the overflow mode. Used at
/// paint time; wrapping modes were already split and just clip here.
pub fn truncate_line(line: &str, width: i32, mode: TextOverflow) -> String {
    if display_width(line) <= width {
        return line.to_string();
    }
    match mode {
        TextOverflow::Ellipsis => {
            let mut out = take_cells(line, width - 1);
            out.push('…');
            out
        }
        _ => take_cells(line, width),
    }
}

/// Take the longest prefix of `line` fitting within `width` cells.
pub(crate) fn take_cells(line: &str, width: i32) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in line.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0) as i32;
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out
}

fn wrap_word(line: &str, width: i32, out: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_width = 0;

    for word in line.split_whitespace() {
        let word_width = display_width(word);

        if word_width > width {
            // Oversized word: flush, then character-break the word itself.
            // The last fragment stays open so following words can join it.
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
                current_width = 0;
            }
            let mut fragments = Vec::new();
            wrap_character(word, width, &mut fragments);
            if let Some(last) = fragments.pop() {
                out.extend(fragments);
                current_width = display_width(&last);
                current = last;
            }
            continue;
        }

        let separator = if current.is_empty() { 0 } else { 1 };
        if current_width + separator + word_width > width {
            out.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_width += 1;
        }
        current.push_str(word);
        current_width += word_width;
    }

    out.push(current);
}

fn wrap_character(line: &str, width: i32, out: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_width = 0;

    for ch in line.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0) as i32;
        if current_width + w > width && !current.is_empty() {
            out.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(ch);
        current_width += w;
    }

    out.push(current);
}

// ===========================================================================
// Tests
// ===========================================================================
