//! Core geometry types: Size, Rect, Edges, and the layout alignment enums.
//!
//! These are the foundational coordinate types used throughout weft-tui for
//! positioning and sizing elements in the terminal cell grid. A [`Rect`]
//! never has negative dimensions; constructors clamp to zero.

use std::ops::Add;

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D size in terminal cells (width x height).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Size = Size { width: 0, height: 0 };

    /// Create a new size. Negative dimensions are clamped to zero.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width: if width > 0 { width } else { 0 },
            height: if height > 0 { height } else { 0 },
        }
    }

    /// Total area (width * height).
    #[inline]
    pub const fn area(self) -> i32 {
        self.width * self.height
    }

    /// Convert to a [`Rect`] positioned at the origin.
    #[inline]
    pub const fn to_rect(self) -> Rect {
        Rect { x: 0, y: 0, width: self.width, height: self.height }
    }
}

impl Add for Size {
    type Output = Size;
    #[inline]
    fn add(self, rhs: Size) -> Size {
        Size { width: self.width + rhs.width, height: self.height + rhs.height }
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// A rectangular area in terminal cells defined by position and size.
///
/// This is the most heavily-used geometry type. Width and height are never
/// negative; every operation that could produce a negative dimension clamps
/// it to zero instead.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// An empty rect at the origin.
    pub const EMPTY: Rect = Rect { x: 0, y: 0, width: 0, height: 0 };

    /// Create a new rect. Negative dimensions are clamped to zero.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: if width > 0 { width } else { 0 },
            height: if height > 0 { height } else { 0 },
        }
    }

    /// The right edge (exclusive): `x + width`.
    #[inline]
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    /// The bottom edge (exclusive): `y + height`.
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    /// The dimensions as a [`Size`].
    #[inline]
    pub const fn size(self) -> Size {
        Size { width: self.width, height: self.height }
    }

    /// Whether this rect covers no cells.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the point (x, y) lies inside this rect.
    #[inline]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Whether `other` is entirely contained within this rect.
    #[inline]
    pub const fn contains_rect(self, other: Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Compute the intersection of two rects.
    ///
    /// Returns [`Rect::EMPTY`] if the rects do not overlap.
    #[inline]
    pub const fn intersection(self, other: Rect) -> Rect {
        let x1 = if self.x > other.x { self.x } else { other.x };
        let y1 = if self.y > other.y { self.y } else { other.y };

        let sr = self.right();
        let or = other.right();
        let x2 = if sr < or { sr } else { or };

        let sb = self.bottom();
        let ob = other.bottom();
        let y2 = if sb < ob { sb } else { ob };

        if x2 - x1 <= 0 || y2 - y1 <= 0 {
            Rect::EMPTY
        } else {
            Rect { x: x1, y: y1, width: x2 - x1, height: y2 - y1 }
        }
    }

    /// Contract the rect inward by the given [`Edges`].
    ///
    /// Width and height clamp to zero when the insets exceed the rect.
    #[inline]
    pub const fn shrink(self, insets: Edges) -> Rect {
        let w = self.width - insets.left - insets.right;
        let h = self.height - insets.top - insets.bottom;
        Rect {
            x: self.x + insets.left,
            y: self.y + insets.top,
            width: if w > 0 { w } else { 0 },
            height: if h > 0 { h } else { 0 },
        }
    }

    /// Contract the rect inward by `amount` on every side.
    #[inline]
    pub const fn inset(self, amount: i32) -> Rect {
        self.shrink(Edges::all(amount))
    }

    /// Split off `amount` cells from the left edge; returns `(left, rest)`.
    ///
    /// The amount is clamped to `[0, width]`.
    #[inline]
    pub const fn take_left(self, amount: i32) -> (Rect, Rect) {
        let n = clamp(amount, 0, self.width);
        (
            Rect { x: self.x, y: self.y, width: n, height: self.height },
            Rect { x: self.x + n, y: self.y, width: self.width - n, height: self.height },
        )
    }

    /// Split off `amount` cells from the right edge; returns `(rest, right)`.
    #[inline]
    pub const fn take_right(self, amount: i32) -> (Rect, Rect) {
        let n = clamp(amount, 0, self.width);
        (
            Rect { x: self.x, y: self.y, width: self.width - n, height: self.height },
            Rect { x: self.right() - n, y: self.y, width: n, height: self.height },
        )
    }

    /// Split off `amount` cells from the top edge; returns `(top, rest)`.
    #[inline]
    pub const fn take_top(self, amount: i32) -> (Rect, Rect) {
        let n = clamp(amount, 0, self.height);
        (
            Rect { x: self.x, y: self.y, width: self.width, height: n },
            Rect { x: self.x, y: self.y + n, width: self.width, height: self.height - n },
        )
    }

    /// Split off `amount` cells from the bottom edge; returns `(rest, bottom)`.
    #[inline]
    pub const fn take_bottom(self, amount: i32) -> (Rect, Rect) {
        let n = clamp(amount, 0, self.height);
        (
            Rect { x: self.x, y: self.y, width: self.width, height: self.height - n },
            Rect { x: self.x, y: self.bottom() - n, width: self.width, height: n },
        )
    }
}

#[inline]
const fn clamp(value: i32, lo: i32, hi: i32) -> i32 {
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

// ---------------------------------------------------------------------------
// Edges
// ---------------------------------------------------------------------------

/// Insets on the four sides of a rect, used for margin and padding.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Edges {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Edges {
    /// Zero insets on all sides.
    pub const ZERO: Edges = Edges { top: 0, right: 0, bottom: 0, left: 0 };

    /// Create insets with explicit values for each side.
    #[inline]
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self { top, right, bottom, left }
    }

    /// All four sides set to the same value.
    #[inline]
    pub const fn all(value: i32) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }

    /// Symmetric insets: `vertical` for top/bottom, `horizontal` for left/right.
    #[inline]
    pub const fn symmetric(vertical: i32, horizontal: i32) -> Self {
        Self { top: vertical, right: horizontal, bottom: vertical, left: horizontal }
    }

    /// Total horizontal extent: `left + right`.
    #[inline]
    pub const fn width(self) -> i32 {
        self.left + self.right
    }

    /// Total vertical extent: `top + bottom`.
    #[inline]
    pub const fn height(self) -> i32 {
        self.top + self.bottom
    }
}

impl Add for Edges {
    type Output = Edges;
    #[inline]
    fn add(self, rhs: Edges) -> Edges {
        Edges {
            top: self.top + rhs.top,
            right: self.right + rhs.right,
            bottom: self.bottom + rhs.bottom,
            left: self.left + rhs.left,
        }
    }
}

// ---------------------------------------------------------------------------
// Layout enums
// ---------------------------------------------------------------------------

/// The axis a linear container stacks its children along.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Horizontal,
    Vertical,
}

impl Direction {
    /// The perpendicular axis.
    #[inline]
    pub const fn cross(self) -> Direction {
        match self {
            Direction::Horizontal => Direction::Vertical,
            Direction::Vertical => Direction::Horizontal,
        }
    }
}

/// How a linear container distributes leftover space along its main axis
/// when the children do not fill it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FlexAlign {
    /// Pack children at the start; leftover space trails. The default.
    #[default]
    Start,
    /// Leftover space splits evenly before and after the children.
    Center,
    /// Pack children at the end; leftover space leads.
    End,
    /// Leftover space distributes into the gaps between children.
    SpaceBetween,
}

/// Where a stack container pins each child inside the shared area.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum StackAlign {
    /// Each child fills the whole shared area. The default.
    #[default]
    Stretch,
    Center,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

// ===========================================================================
// Tests
// ===========================================================================
