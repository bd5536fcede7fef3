//! Selector specificity calculation and comparison.
//!
//! Specificity determines which rule wins when multiple rules match the
//! same element. Our tuple model is the classic CSS one plus source order:
//!
//! ```text
//! (id_count, class_count, type_count, source_order)
//! ```
//!
//! Fields are ordered so that derived `Ord` (lexicographic) gives the
//! correct result:
//! - More IDs beat fewer IDs
//! - More classes/attribute predicates/pseudo-classes beat fewer
//! - More type selectors beat fewer
//! - Later source order wins as tie-breaker
//!
//! `!important` is a per-declaration flag, not a selector property; the
//! cascade layers it on top of this ordering.

use crate::css::model::{Selector, SelectorComponent, SelectorPart};

/// Selector specificity, ordered from highest to lowest priority field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Specificity {
    /// Number of ID selectors (`#id`).
    pub id_count: u16,
    /// Number of class, attribute, and pseudo-class selectors
    /// (`.class`, `[attr]`, `:selected`).
    pub class_count: u16,
    /// Number of type selectors (`Panel`, `Row`).
    pub type_count: u16,
    /// The rule's index in the stylesheet (later = higher, tie-breaker).
    pub source_order: u32,
}

impl Specificity {
    /// Compute specificity from a parsed selector.
    pub fn from_selector(selector: &Selector, source_order: u32) -> Self {
        let mut id_count: u16 = 0;
        let mut class_count: u16 = 0;
        let mut type_count: u16 = 0;

        for part in &selector.parts {
            if let SelectorPart::Compound(compound) = part {
                for component in &compound.components {
                    match component {
                        SelectorComponent::Id(_) => id_count += 1,
                        SelectorComponent::Class(_)
                        | SelectorComponent::Attribute { .. }
                        | SelectorComponent::PseudoClass(_) => class_count += 1,
                        SelectorComponent::Type(_) => type_count += 1,
                        SelectorComponent::Universal => {
                            // Universal selector has zero specificity.
                        }
                    }
                }
            }
        }

        Self { id_count, class_count, type_count, source_order }
    }
}
