//! Stylesheet AST: selectors, declarations, rules.

/// How an attribute predicate compares its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrOp {
    /// `[attr]` — key present with any value, including empty string.
    Present,
    /// `[attr=value]` — exact string equality.
    Equals,
    /// `[attr^=value]` — case-sensitive prefix.
    StartsWith,
    /// `[attr$=value]` — case-sensitive suffix.
    EndsWith,
    /// `[attr*=value]` — substring containment.
    Contains,
}

/// A single simple-selector component.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    /// Type selector: matches the element's style-type name (e.g. `Panel`).
    Type(String),
    /// Universal selector: `*`.
    Universal,
    /// Class selector: `.classname`.
    Class(String),
    /// ID selector: `#id`.
    Id(String),
    /// Attribute predicate: `[title]`, `[title="x"]`, `[title^=x]`, ...
    ///
    /// `value` is empty for [`AttrOp::Present`].
    Attribute { name: String, op: AttrOp, value: String },
    /// Pseudo-class: `:selected`, `:focus`, etc.
    PseudoClass(String),
}

/// A combinator between compound selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Descendant combinator (whitespace): `A B`.
    Descendant,
    /// Child combinator: `A > B`.
    Child,
    /// Adjacent sibling combinator: `A + B`.
    Adjacent,
}

/// A single compound selector (sequence of components without combinators).
///
/// For example, `Panel.primary[title^=Log]:selected` is one
/// `CompoundSelector` with four components.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompoundSelector {
    pub components: Vec<SelectorComponent>,
}

impl CompoundSelector {
    /// Create an empty compound selector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a component to this compound selector.
    pub fn push(&mut self, component: SelectorComponent) {
        self.components.push(component);
    }

    /// Returns `true` if this selector is the universal selector `*` alone.
    pub fn is_universal(&self) -> bool {
        self.components.len() == 1
            && matches!(self.components[0], SelectorComponent::Universal)
    }
}

/// One element in a selector chain: either a compound selector or a combinator.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorPart {
    Compound(CompoundSelector),
    Combinator(Combinator),
}

/// A full selector: chain of compound selectors joined by combinators.
///
/// For example, `Row > Text.primary` is a `Selector` with parts:
/// `[Compound(Row), Combinator(Child), Compound(Text.primary)]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selector {
    /// Alternating compound selectors and combinators.
    /// Always starts and ends with a `SelectorPart::Compound`.
    pub parts: Vec<SelectorPart>,
}

impl Selector {
    /// Create an empty selector.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A single property declaration, e.g. `width: 50%` or `margin: 1 2`.
///
/// The value is kept as the raw source text; typed parsing happens in a
/// separate conversion step consumed by layout and paint code, so a value
/// one consumer cannot parse is still visible to another.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// The property name, e.g. `"width"`, `"margin"`.
    pub property: String,
    /// The raw value text, whitespace-trimmed, e.g. `"fill(2)"`, `"1 2 3 4"`.
    pub value: String,
    /// Whether `!important` was specified.
    pub important: bool,
}

impl Declaration {
    /// Create a new declaration.
    pub fn new(property: impl Into<String>, value: impl Into<String>, important: bool) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            important,
        }
    }
}

/// A rule: one or more selectors paired with declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// The selectors for this rule (comma-separated in source).
    pub selectors: Vec<Selector>,
    /// The property declarations inside the `{ ... }` block.
    pub declarations: Vec<Declaration>,
}

/// A parsed stylesheet: an ordered list of rules.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

impl Stylesheet {
    /// Create an empty stylesheet.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compound_selector_push() {
        let mut cs = CompoundSelector::new();
        cs.push(SelectorComponent::Type("Panel".into()));
        cs.push(SelectorComponent::Class("primary".into()));
        assert_eq!(cs.components.len(), 2);
        assert!(!cs.is_universal());
    }

    #[test]
    fn compound_selector_is_universal() {
        let mut cs = CompoundSelector::new();
        cs.push(SelectorComponent::Universal);
        assert!(cs.is_universal());

        cs.push(SelectorComponent::Class("foo".into()));
        assert!(!cs.is_universal());
    }

    #[test]
    fn selector_with_parts() {
        let mut row = CompoundSelector::new();
        row.push(SelectorComponent::Type("Row".into()));

        let mut text = CompoundSelector::new();
        text.push(SelectorComponent::Type("Text".into()));
        text.push(SelectorComponent::Class("primary".into()));

        let selector = Selector {
            parts: vec![
                SelectorPart::Compound(row),
                SelectorPart::Combinator(Combinator::Child),
                SelectorPart::Compound(text),
            ],
        };

        assert_eq!(selector.parts.len(), 3);
        assert!(matches!(&selector.parts[1], SelectorPart::Combinator(Combinator::Child)));
    }

    #[test]
    fn declaration_keeps_raw_value() {
        let decl = Declaration::new("width", "fill(2)", false);
        assert_eq!(decl.property, "width");
        assert_eq!(decl.value, "fill(2)");
        assert!(!decl.important);

        let decl = Declaration::new("margin", "1 2 3 4", true);
        assert_eq!(decl.value, "1 2 3 4");
        assert!(decl.important);
    }

    #[test]
    fn attribute_component_variants() {
        let present = SelectorComponent::Attribute {
            name: "title".into(),
            op: AttrOp::Present,
            value: String::new(),
        };
        let exact = SelectorComponent::Attribute {
            name: "title".into(),
            op: AttrOp::Equals,
            value: "Test".into(),
        };
        assert_ne!(present, exact);
    }

    #[test]
    fn stylesheet_starts_empty() {
        assert!(Stylesheet::new().rules.is_empty());
        assert!(Stylesheet::default().rules.is_empty());
    }
}
