//! CSS engine: tokenizer, parser, selector matching, cascade, typed styles.

pub mod tokenizer;
pub mod model;
pub mod parser;
pub mod specificity;
pub mod matcher;
pub mod cascade;
pub mod computed;
