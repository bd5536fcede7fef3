//! Cell buffer: the in-memory character grid the tree paints into.
//!
//! The buffer is the write surface leaves render through. All writes are
//! clipped to the buffer's own bounds; out-of-bounds writes are silently
//! dropped. The buffer's allocation lifecycle belongs to the caller, the
//! layout core only writes into it for the duration of one render pass.

use unicode_width::UnicodeWidthChar;

use crate::css::computed::ComputedStyle;
use crate::geometry::Rect;

// ---------------------------------------------------------------------------
// CellStyle
// ---------------------------------------------------------------------------

/// Visual style for a single terminal cell.
///
/// Colors are stored as their stylesheet spelling (a name like `cyan` or a
/// `#rrggbb` hex value); translation to terminal escape codes belongs to the
/// backend, not this crate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub fg: Option<String>,
    pub bg: Option<String>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub reverse: bool,
}

impl CellStyle {
    /// A `CellStyle` with all attributes unset/false.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract the paint-relevant parts of a resolved style.
    pub fn from_computed(style: &ComputedStyle) -> Self {
        let flags = style.text_style.unwrap_or_default();
        CellStyle {
            fg: style.color.clone(),
            bg: style.background.clone(),
            bold: flags.bold,
            dim: flags.dim,
            italic: flags.italic,
            underline: flags.underline,
            strikethrough: flags.strikethrough,
            reverse: flags.reverse,
        }
    }
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A single cell: one character with associated style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub symbol: char,
    pub style: CellStyle,
}

impl Cell {
    pub fn new(symbol: char, style: CellStyle) -> Self {
        Self { symbol, style }
    }

    /// A blank (space) cell with default style.
    pub fn blank() -> Self {
        Self {
            symbol: ' ',
            style: CellStyle::default(),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}

// ---------------------------------------------------------------------------
// Buffer
// ---------------------------------------------------------------------------

/// A rectangular grid of cells, row-major, origin at the top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Allocate a blank buffer. Negative dimensions clamp to zero.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![Cell::blank(); (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// The buffer's own bounds as a rect at the origin.
    pub fn area(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    /// The cell at `(x, y)`, or `None` out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Write a single cell. Out-of-bounds writes are silently dropped.
    pub fn set_cell(&mut self, x: i32, y: i32, symbol: char, style: CellStyle) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Cell::new(symbol, style);
        }
    }

    /// Write a string left to right starting at `(x, y)`. The cursor
    /// advances by each character's display width so wide glyphs stay
    /// aligned with measured text; the cell a wide glyph covers is
    /// blanked, and zero-width characters are skipped. Characters that
    /// fall outside the buffer are silently dropped.
    pub fn set_string(&mut self, x: i32, y: i32, text: &str, style: &CellStyle) {
        let mut cursor = x;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as i32;
            if w == 0 {
                continue;
            }
            self.set_cell(cursor, y, ch, style.clone());
            for covered in cursor + 1..cursor + w {
                self.set_cell(covered, y, ' ', style.clone());
            }
            cursor += w;
        }
    }

    /// Fill every cell of `area` (clipped to the buffer) with `symbol`.
    pub fn fill(&mut self, area: Rect, symbol: char, style: &CellStyle) {
        let area = area.intersection(self.area());
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                self.set_cell(x, y, symbol, style.clone());
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
