//! Selector matching against element identity.
//!
//! The matcher never walks a tree itself: the caller hands it the target
//! element's identity plus the ancestor chain (outermost first), which the
//! render pass maintains as it recurses. Selectors are walked right to
//! left, consuming ancestors through combinators; sibling combinators
//! consume the `preceding` list carried on each identity.

use std::collections::{BTreeMap, BTreeSet};

use crate::css::model::{AttrOp, Combinator, CompoundSelector, Selector, SelectorComponent, SelectorPart};

/// A borrowed view of everything selector matching needs to know about one
/// element: its style-type name, id, classes, attribute map, the
/// pseudo-class flags the caller has switched on for this match, and the
/// identities of its earlier siblings.
#[derive(Debug, Clone)]
pub struct ElementIdentity<'a> {
    pub type_name: &'a str,
    pub id: Option<&'a str>,
    pub classes: &'a BTreeSet<String>,
    pub attributes: &'a BTreeMap<String, String>,
    pub pseudo_states: &'a BTreeSet<String>,
    /// Earlier siblings in document order, nearest last. Leave empty when
    /// the caller has no sibling information; adjacent combinators then
    /// simply fail to match.
    pub preceding: Vec<ElementIdentity<'a>>,
}

/// Check whether any selector in a list matches the element.
///
/// Short-circuits on the first match; alternatives are independent, so the
/// result does not depend on evaluation order.
pub fn matches_any(
    selectors: &[Selector],
    target: &ElementIdentity<'_>,
    ancestors: &[ElementIdentity<'_>],
) -> bool {
    selectors.iter().any(|sel| matches_selector(sel, target, ancestors))
}

/// Check whether a full selector matches the element.
///
/// Walks the selector parts from right to left. The rightmost compound must
/// match the target; each combinator then moves the cursor: child takes
/// exactly the next ancestor, descendant scans for the nearest matching
/// ancestor, and adjacent steps back through the current element's
/// preceding siblings.
pub fn matches_selector(
    selector: &Selector,
    target: &ElementIdentity<'_>,
    ancestors: &[ElementIdentity<'_>],
) -> bool {
    let parts = &selector.parts;
    if parts.is_empty() {
        return false;
    }

    let mut part_idx = parts.len() - 1;
    match &parts[part_idx] {
        SelectorPart::Compound(compound) => {
            if !matches_compound(compound, target) {
                return false;
            }
        }
        SelectorPart::Combinator(_) => return false,
    }

    // Ancestors still available to the remaining selector parts:
    // `ancestors[..upper]`, nearest at the end. The sibling cursor walks
    // the preceding run of whichever level the cursor sits on; `run.len()`
    // is the level's own element, smaller values index into its siblings.
    let mut upper = ancestors.len();
    let mut run: &[ElementIdentity<'_>] = &target.preceding;
    let mut pos = run.len();

    loop {
        if part_idx == 0 {
            return true;
        }

        // parts alternate compound / combinator; a malformed chain fails.
        part_idx -= 1;
        let combinator = match &parts[part_idx] {
            SelectorPart::Combinator(c) => *c,
            SelectorPart::Compound(_) => return false,
        };
        if part_idx == 0 {
            return false;
        }
        part_idx -= 1;
        let compound = match &parts[part_idx] {
            SelectorPart::Compound(c) => c,
            SelectorPart::Combinator(_) => return false,
        };

        match combinator {
            Combinator::Child => {
                // The immediate parent must match. Siblings share it.
                if upper == 0 {
                    return false;
                }
                upper -= 1;
                if !matches_compound(compound, &ancestors[upper]) {
                    return false;
                }
                run = &ancestors[upper].preceding;
                pos = run.len();
            }
            Combinator::Descendant => {
                // The nearest matching ancestor anchors the rest of the chain.
                match ancestors[..upper].iter().rposition(|a| matches_compound(compound, a)) {
                    Some(idx) => {
                        upper = idx;
                        run = &ancestors[idx].preceding;
                        pos = run.len();
                    }
                    None => return false,
                }
            }
            Combinator::Adjacent => {
                // The immediately preceding sibling must match.
                if pos == 0 {
                    return false;
                }
                pos -= 1;
                if !matches_compound(compound, &run[pos]) {
                    return false;
                }
            }
        }
    }
}

/// Check whether a compound selector matches a single element identity.
pub fn matches_compound(compound: &CompoundSelector, element: &ElementIdentity<'_>) -> bool {
    compound.components.iter().all(|component| match component {
        SelectorComponent::Type(name) => element.type_name == name,
        SelectorComponent::Universal => true,
        SelectorComponent::Class(name) => element.classes.contains(name),
        SelectorComponent::Id(name) => element.id == Some(name.as_str()),
        SelectorComponent::PseudoClass(name) => element.pseudo_states.contains(name),
        SelectorComponent::Attribute { name, op, value } => {
            // A missing key fails every predicate, including bare [attr].
            match element.attributes.get(name) {
                None => false,
                Some(actual) => match op {
                    AttrOp::Present => true,
                    AttrOp::Equals => actual == value,
                    AttrOp::StartsWith => actual.starts_with(value.as_str()),
                    AttrOp::EndsWith => actual.ends_with(value.as_str()),
                    AttrOp::Contains => actual.contains(value.as_str()),
                },
            }
        }
    })
}
