//! Cascade resolution: which declaration wins per property.
//!
//! A parsed [`Stylesheet`] is compiled once (per-selector specificity is
//! precomputed); resolution then filters to matching rules, sorts by
//! `(specificity, source order)`, and folds declarations per property key.
//! Values stay raw strings here; typed parsing lives in
//! [`crate::css::computed`].

use std::collections::BTreeMap;

use crate::css::matcher::{matches_selector, ElementIdentity};
use crate::css::model::{Declaration, Rule, Stylesheet};
use crate::css::specificity::Specificity;

/// A compiled stylesheet ready for matching.
#[derive(Debug, Default)]
pub struct CompiledStylesheet {
    rules: Vec<CompiledRule>,
}

/// A rule with per-selector specificity precomputed.
#[derive(Debug)]
struct CompiledRule {
    rule: Rule,
    /// One specificity per selector alternative, index-aligned.
    specificities: Vec<Specificity>,
}

/// One declaration that matched, tagged with its cascade rank.
#[derive(Debug, Clone, Copy)]
pub struct MatchedDeclaration<'a> {
    pub declaration: &'a Declaration,
    pub specificity: Specificity,
}

impl MatchedDeclaration<'_> {
    /// The cascade sort key: `!important` outranks any specificity, then
    /// specificity (which embeds source order) breaks ties.
    fn rank(&self) -> (bool, Specificity) {
        (self.declaration.important, self.specificity)
    }
}

/// The resolved per-property winners, as raw value strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyBag {
    values: BTreeMap<String, String>,
}

impl PropertyBag {
    /// The winning raw value for a property, if any rule declared it.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.values.get(property).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

impl CompiledStylesheet {
    /// Compile a parsed [`Stylesheet`], computing specificity per selector.
    pub fn compile(stylesheet: &Stylesheet) -> Self {
        let rules = stylesheet
            .rules
            .iter()
            .enumerate()
            .map(|(order, rule)| CompiledRule {
                specificities: rule
                    .selectors
                    .iter()
                    .map(|sel| Specificity::from_selector(sel, order as u32))
                    .collect(),
                rule: rule.clone(),
            })
            .collect();

        CompiledStylesheet { rules }
    }

    /// Parse and compile in one step.
    pub fn parse(input: &str) -> Result<Self, crate::css::parser::ParseError> {
        Ok(Self::compile(&crate::css::parser::parse_stylesheet(input)?))
    }

    /// All declarations from rules matching the element, sorted ascending
    /// by `(important, specificity, source order)`; the strongest candidate
    /// comes last. Consumers fold forward (last wins) or scan backward
    /// (first parsable wins).
    pub fn candidates<'a>(
        &'a self,
        target: &ElementIdentity<'_>,
        ancestors: &[ElementIdentity<'_>],
    ) -> Vec<MatchedDeclaration<'a>> {
        let mut matched: Vec<MatchedDeclaration<'a>> = Vec::new();

        for compiled in &self.rules {
            // The rule matches through its most specific matching selector.
            let best = compiled
                .rule
                .selectors
                .iter()
                .zip(&compiled.specificities)
                .filter(|(sel, _)| matches_selector(sel, target, ancestors))
                .map(|(_, s)| *s)
                .max();

            if let Some(specificity) = best {
                for declaration in &compiled.rule.declarations {
                    matched.push(MatchedDeclaration { declaration, specificity });
                }
            }
        }

        matched.sort_by_key(|m| m.rank());
        matched
    }

    /// Resolve the winning raw value per property for the element.
    ///
    /// Folds candidates in ascending rank order into a map, later entries
    /// overwriting earlier ones per key: highest specificity (or latest
    /// source order on a tie) wins for every property independently.
    pub fn resolve(
        &self,
        target: &ElementIdentity<'_>,
        ancestors: &[ElementIdentity<'_>],
    ) -> PropertyBag {
        let mut values = BTreeMap::new();
        for m in self.candidates(target, ancestors) {
            values.insert(m.declaration.property.clone(), m.declaration.value.clone());
        }
        PropertyBag { values }
    }
}
