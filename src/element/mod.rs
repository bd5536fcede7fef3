//! The element tree: containers, leaves, and their configuration surface.
//!
//! Elements are plain owned data; the parent exclusively owns its children
//! and no back-pointers exist. Resolved style is never cached on a node,
//! each render pass re-derives it from the current stylesheet and tree
//! position, so classes and attributes may mutate freely between frames.

pub mod measure;
pub mod render;
pub mod text;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::css::matcher::ElementIdentity;
use crate::element::text::TextOverflow;
use crate::geometry::{Direction, Edges, Rect, StackAlign};
use crate::layout::solver::Constraint;
use crate::render::buffer::{Buffer, CellStyle};

/// Paint callback for [`ElementKind::Custom`] leaves. Receives the computed
/// area, the resolved paint style, and the buffer to write into.
pub type PaintFn = Box<dyn Fn(Rect, &CellStyle, &mut Buffer)>;

/// The five named regions of a dock container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockRegion {
    Top,
    Bottom,
    Left,
    Right,
    Center,
}

/// The closed set of element kinds.
///
/// Containers lay out `Element::children`; `Custom` is the open extension
/// point for arbitrary user widgets, which only consume their computed area
/// and resolved style.
pub enum ElementKind {
    Row,
    Column,
    Panel { direction: Direction, bordered: bool },
    Grid,
    Columns,
    Flow,
    /// `regions[i]` names the region `children[i]` occupies.
    Dock { regions: Vec<DockRegion> },
    Stack { align: StackAlign },
    Text { content: String, overflow: Option<TextOverflow> },
    Spacer,
    Custom { name: String, paint: PaintFn },
}

impl ElementKind {
    /// The style-type name used by type selectors.
    pub fn type_name(&self) -> &str {
        match self {
            ElementKind::Row => "Row",
            ElementKind::Column => "Column",
            ElementKind::Panel { .. } => "Panel",
            ElementKind::Grid => "Grid",
            ElementKind::Columns => "Columns",
            ElementKind::Flow => "Flow",
            ElementKind::Dock { .. } => "Dock",
            ElementKind::Stack { .. } => "Stack",
            ElementKind::Text { .. } => "Text",
            ElementKind::Spacer => "Spacer",
            ElementKind::Custom { name, .. } => name,
        }
    }
}

impl fmt::Debug for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Panel { direction, bordered } => f
                .debug_struct("Panel")
                .field("direction", direction)
                .field("bordered", bordered)
                .finish(),
            ElementKind::Dock { regions } => {
                f.debug_struct("Dock").field("regions", regions).finish()
            }
            ElementKind::Stack { align } => {
                f.debug_struct("Stack").field("align", align).finish()
            }
            ElementKind::Text { content, overflow } => f
                .debug_struct("Text")
                .field("content", content)
                .field("overflow", overflow)
                .finish(),
            ElementKind::Custom { name, .. } => {
                f.debug_struct("Custom").field("name", name).finish()
            }
            other => f.write_str(other.type_name()),
        }
    }
}

/// A node in the element tree.
#[derive(Debug)]
pub struct Element {
    pub kind: ElementKind,
    /// Optional unique id (`#id` selector).
    pub id: Option<String>,
    /// CSS classes (`.class` selector).
    pub classes: BTreeSet<String>,
    /// String attributes queried by `[attr…]` selectors. Absence of a key
    /// is distinguishable from presence with an empty value.
    pub attributes: BTreeMap<String, String>,
    /// Pseudo-class flags (`:selected` etc.), switched by the application.
    pub pseudo_states: BTreeSet<String>,
    /// Explicit programmatic width; outranks any stylesheet value.
    pub width: Option<Constraint>,
    /// Explicit programmatic height; outranks any stylesheet value.
    pub height: Option<Constraint>,
    pub margin: Edges,
    pub children: Vec<Element>,
}

impl Element {
    fn with_kind(kind: ElementKind) -> Self {
        Self {
            kind,
            id: None,
            classes: BTreeSet::new(),
            attributes: BTreeMap::new(),
            pseudo_states: BTreeSet::new(),
            width: None,
            height: None,
            margin: Edges::default(),
            children: Vec::new(),
        }
    }

    // ── Constructors ─────────────────────────────────────────────────

    pub fn row() -> Self {
        Self::with_kind(ElementKind::Row)
    }

    pub fn column() -> Self {
        Self::with_kind(ElementKind::Column)
    }

    /// A bordered wrapper laying out children in `direction` inside the
    /// border and padding.
    pub fn panel(direction: Direction) -> Self {
        Self::with_kind(ElementKind::Panel {
            direction,
            bordered: true,
        })
    }

    pub fn grid() -> Self {
        Self::with_kind(ElementKind::Grid)
    }

    pub fn columns() -> Self {
        Self::with_kind(ElementKind::Columns)
    }

    pub fn flow() -> Self {
        Self::with_kind(ElementKind::Flow)
    }

    pub fn dock() -> Self {
        Self::with_kind(ElementKind::Dock {
            regions: Vec::new(),
        })
    }

    pub fn stack() -> Self {
        Self::with_kind(ElementKind::Stack {
            align: StackAlign::default(),
        })
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::with_kind(ElementKind::Text {
            content: content.into(),
            overflow: None,
        })
    }

    /// An empty leaf that occupies space without painting.
    pub fn spacer() -> Self {
        Self::with_kind(ElementKind::Spacer)
    }

    /// A leaf painted by an arbitrary callback.
    pub fn custom(name: impl Into<String>, paint: PaintFn) -> Self {
        Self::with_kind(ElementKind::Custom {
            name: name.into(),
            paint,
        })
    }

    // ── Identity builders ────────────────────────────────────────────

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }

    pub fn with_classes(mut self, classes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.classes.extend(classes.into_iter().map(Into::into));
        self
    }

    /// Set a string attribute, visible to `[attr…]` selectors.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn title(self, title: impl Into<String>) -> Self {
        self.attr("title", title)
    }

    pub fn bottom_title(self, title: impl Into<String>) -> Self {
        self.attr("bottom-title", title)
    }

    pub fn label(self, label: impl Into<String>) -> Self {
        self.attr("label", label)
    }

    pub fn placeholder(self, placeholder: impl Into<String>) -> Self {
        self.attr("placeholder", placeholder)
    }

    /// Switch a pseudo-class flag on (builder form).
    pub fn with_pseudo(mut self, state: impl Into<String>) -> Self {
        self.pseudo_states.insert(state.into());
        self
    }

    // ── Constraint / geometry builders ───────────────────────────────

    pub fn width(mut self, constraint: Constraint) -> Self {
        self.width = Some(constraint);
        self
    }

    pub fn height(mut self, constraint: Constraint) -> Self {
        self.height = Some(constraint);
        self
    }

    pub fn margin(mut self, margin: Edges) -> Self {
        self.margin = margin;
        self
    }

    // ── Kind-specific configuration ──────────────────────────────────

    /// Toggle the panel border. Panics on a non-panel element.
    pub fn bordered(mut self, on: bool) -> Self {
        match &mut self.kind {
            ElementKind::Panel { bordered, .. } => *bordered = on,
            other => panic!("bordered() is only valid on Panel, not {}", other.type_name()),
        }
        self
    }

    /// Set the text overflow mode. Panics on a non-text element.
    pub fn overflow(mut self, mode: TextOverflow) -> Self {
        match &mut self.kind {
            ElementKind::Text { overflow, .. } => *overflow = Some(mode),
            other => panic!("overflow() is only valid on Text, not {}", other.type_name()),
        }
        self
    }

    /// Set the stack alignment. Panics on a non-stack element.
    pub fn align(mut self, align: StackAlign) -> Self {
        match &mut self.kind {
            ElementKind::Stack { align: slot } => *slot = align,
            other => panic!("align() is only valid on Stack, not {}", other.type_name()),
        }
        self
    }

    // ── Children ─────────────────────────────────────────────────────

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    fn dock_child(mut self, region: DockRegion, child: Element) -> Self {
        match &mut self.kind {
            ElementKind::Dock { regions } => {
                if regions.contains(&region) {
                    panic!("Dock already has a {region:?} region");
                }
                regions.push(region);
            }
            other => panic!(
                "dock regions are only valid on Dock, not {}",
                other.type_name()
            ),
        }
        self.children.push(child);
        self
    }

    pub fn top(self, child: Element) -> Self {
        self.dock_child(DockRegion::Top, child)
    }

    pub fn bottom(self, child: Element) -> Self {
        self.dock_child(DockRegion::Bottom, child)
    }

    pub fn left(self, child: Element) -> Self {
        self.dock_child(DockRegion::Left, child)
    }

    pub fn right(self, child: Element) -> Self {
        self.dock_child(DockRegion::Right, child)
    }

    pub fn center(self, child: Element) -> Self {
        self.dock_child(DockRegion::Center, child)
    }

    // ── Mutable state used between frames ────────────────────────────

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_owned());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    pub fn toggle_class(&mut self, class: &str) {
        if !self.classes.remove(class) {
            self.classes.insert(class.to_owned());
        }
    }

    /// Switch a pseudo-class flag on or off.
    pub fn set_pseudo(&mut self, state: &str, on: bool) {
        if on {
            self.pseudo_states.insert(state.to_owned());
        } else {
            self.pseudo_states.remove(state);
        }
    }

    /// The borrowed identity view selector matching consumes. Sibling
    /// information is not known to the element itself; `identity_within`
    /// attaches it from the parent.
    pub fn identity(&self) -> ElementIdentity<'_> {
        ElementIdentity {
            type_name: self.kind.type_name(),
            id: self.id.as_deref(),
            classes: &self.classes,
            attributes: &self.attributes,
            pseudo_states: &self.pseudo_states,
            preceding: Vec::new(),
        }
    }

    /// Identity with the preceding siblings attached, located by address
    /// within the parent's children. An element that is not a child of
    /// `parent` gets no sibling information.
    pub(crate) fn identity_within<'a>(&'a self, parent: Option<&'a Element>) -> ElementIdentity<'a> {
        let mut identity = self.identity();
        if let Some(parent) = parent {
            if let Some(idx) = parent.children.iter().position(|c| std::ptr::eq(c, self)) {
                identity.preceding = parent.children[..idx].iter().map(Element::identity).collect();
            }
        }
        identity
    }
}

// ===========================================================================
// Tests
// ===========================================================================
