//! Recursive descent stylesheet parser.
//!
//! Parses stylesheet text into a [`Stylesheet`] (a vector of [`Rule`]s),
//! using the logos-based tokenizer from [`crate::css::tokenizer`].
//! Declaration values are captured as raw source slices; typed parsing is
//! a later, per-consumer step.

use logos::Logos;

use crate::css::model::*;
use crate::css::tokenizer::Token;

/// Errors from stylesheet parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
}

/// A positioned token with byte-level span information.
///
/// Byte spans serve two purposes: whitespace detection between selector
/// parts (compound vs descendant) and raw-text recovery of declaration
/// values.
#[derive(Debug, Clone)]
struct PToken {
    token: Token,
    text: String,
    /// Index in the token stream (for error reporting).
    pos: usize,
    /// Byte offset where this token starts in the source.
    byte_start: usize,
    /// Byte offset where this token ends in the source.
    byte_end: usize,
}

/// Strip block comments (`/* ... */`) from the input, replacing each
/// comment with a single space.
///
/// Text between comments is copied as whole `&str` slices, so multi-byte
/// characters pass through untouched. The delimiters themselves are ASCII,
/// which makes the byte scan safe.
fn strip_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut segment_start = 0;
    let mut i = 0;

    while i + 1 < len {
        if bytes[i] == b'/' && bytes[i + 1] == b'*' {
            result.push_str(&input[segment_start..i]);
            // Scan for the closing */; an unterminated comment consumes
            // the rest of the input.
            i += 2;
            let mut found_end = false;
            while i + 1 < len {
                if bytes[i] == b'*' && bytes[i + 1] == b'/' {
                    i += 2;
                    found_end = true;
                    break;
                }
                i += 1;
            }
            if !found_end {
                i = len;
            }
            result.push(' ');
            segment_start = i;
        } else {
            i += 1;
        }
    }

    result.push_str(&input[segment_start..]);
    result
}

/// Tokenize input using logos with span information preserved.
fn tokenize_with_spans(input: &str) -> Vec<PToken> {
    let lexer = Token::lexer(input);
    let mut tokens = Vec::new();
    let mut idx = 0;

    for (result, span) in lexer.spanned() {
        if let Ok(token) = result {
            tokens.push(PToken {
                text: input[span.clone()].to_string(),
                token,
                pos: idx,
                byte_start: span.start,
                byte_end: span.end,
            });
            idx += 1;
        }
    }

    tokens
}

/// Parse a stylesheet string into a [`Stylesheet`].
pub fn parse_stylesheet(input: &str) -> Result<Stylesheet, ParseError> {
    let cleaned = strip_comments(input);
    let tokens = tokenize_with_spans(&cleaned);

    let mut parser = Parser { source: cleaned, tokens, cursor: 0 };

    let mut rules = Vec::new();
    while !parser.is_eof() {
        rules.push(parser.parse_rule()?);
    }

    Ok(Stylesheet { rules })
}

/// Recursive descent parser state.
struct Parser {
    /// The comment-stripped source; declaration values slice out of it.
    source: String,
    tokens: Vec<PToken>,
    cursor: usize,
}

impl Parser {
    fn is_eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    fn peek(&self) -> Option<&PToken> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<&PToken> {
        if self.cursor < self.tokens.len() {
            let tok = &self.tokens[self.cursor];
            self.cursor += 1;
            Some(tok)
        } else {
            None
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<PToken, ParseError> {
        match self.advance() {
            Some(tok) if &tok.token == expected => Ok(tok.clone()),
            Some(tok) => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected {:?}, got {:?} '{}'", expected, tok.token, tok.text),
            }),
            None => Err(ParseError::UnexpectedEof(format!("expected {expected:?}"))),
        }
    }

    /// Consume an `Ident` token or fail with `context` in the message.
    fn expect_ident(&mut self, context: &str) -> Result<PToken, ParseError> {
        match self.advance() {
            Some(tok) if tok.token == Token::Ident => Ok(tok.clone()),
            Some(tok) => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected {context}, got {:?} '{}'", tok.token, tok.text),
            }),
            None => Err(ParseError::UnexpectedEof(format!("expected {context}"))),
        }
    }

    fn current_pos(&self) -> usize {
        self.peek().map(|t| t.pos).unwrap_or(self.tokens.len())
    }

    /// Returns `true` if the current token is immediately adjacent (no
    /// whitespace) to the previous token.
    fn is_adjacent(&self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = &self.tokens[self.cursor - 1];
        match self.peek() {
            Some(curr) => curr.byte_start == prev.byte_end,
            None => false,
        }
    }

    /// Parse a single rule: selector(s) `{` declarations `}`.
    fn parse_rule(&mut self) -> Result<Rule, ParseError> {
        let selectors = self.parse_selector_list()?;
        self.expect(&Token::BraceOpen)?;
        let declarations = self.parse_declarations()?;
        self.expect(&Token::BraceClose)?;

        Ok(Rule { selectors, declarations })
    }

    /// Parse a comma-separated list of selectors (before `{`).
    fn parse_selector_list(&mut self) -> Result<Vec<Selector>, ParseError> {
        let mut selectors = Vec::new();

        selectors.push(self.parse_selector()?);

        while self.peek().is_some_and(|t| t.token == Token::Comma) {
            self.advance(); // consume comma
            selectors.push(self.parse_selector()?);
        }

        Ok(selectors)
    }

    /// Parse a single selector: a sequence of compound selectors with
    /// combinators.
    ///
    /// `Row > Text.primary` becomes parts:
    /// `[Compound(Row), Combinator(Child), Compound(Text.primary)]`.
    fn parse_selector(&mut self) -> Result<Selector, ParseError> {
        let mut parts = Vec::new();

        parts.push(SelectorPart::Compound(self.parse_compound_selector()?));

        loop {
            match self.peek() {
                // `>` means child combinator.
                Some(t) if t.token == Token::GreaterThan => {
                    self.advance();
                    parts.push(SelectorPart::Combinator(Combinator::Child));
                    parts.push(SelectorPart::Compound(self.parse_compound_selector()?));
                }
                // `+` means adjacent sibling combinator.
                Some(t) if t.token == Token::Plus => {
                    self.advance();
                    parts.push(SelectorPart::Combinator(Combinator::Adjacent));
                    parts.push(SelectorPart::Compound(self.parse_compound_selector()?));
                }
                // A selector-starting token separated from the previous one
                // by whitespace is a descendant combinator. Adjacent tokens
                // were already consumed by parse_compound_selector.
                Some(t)
                    if matches!(
                        t.token,
                        Token::Ident
                            | Token::Hash
                            | Token::Dot
                            | Token::Star
                            | Token::BracketOpen
                            | Token::PseudoClass
                    ) =>
                {
                    parts.push(SelectorPart::Combinator(Combinator::Descendant));
                    parts.push(SelectorPart::Compound(self.parse_compound_selector()?));
                }
                // Anything else ends this selector.
                _ => break,
            }
        }

        Ok(Selector { parts })
    }

    /// Parse a compound selector: a sequence of simple selector components
    /// with no whitespace between them, e.g. `Panel.primary[title]:selected`.
    ///
    /// Uses span-based adjacency detection: `.class`, `#id`, `[attr...]`,
    /// and `:pseudo` only join the current compound when they appear
    /// immediately after the previous token.
    fn parse_compound_selector(&mut self) -> Result<CompoundSelector, ParseError> {
        let mut components = Vec::new();

        // First part: type, universal, or any simple component.
        match self.peek() {
            Some(t) if t.token == Token::Ident => {
                let name = t.text.clone();
                self.advance();
                components.push(SelectorComponent::Type(name));
            }
            Some(t) if t.token == Token::Star => {
                self.advance();
                components.push(SelectorComponent::Universal);
            }
            Some(t)
                if matches!(
                    t.token,
                    Token::Dot | Token::Hash | Token::BracketOpen | Token::PseudoClass
                ) =>
            {
                components.push(self.parse_simple_component()?);
            }
            _ => {
                return Err(ParseError::UnexpectedToken {
                    position: self.current_pos(),
                    message: "expected selector part".into(),
                });
            }
        }

        // Continue appending only while the next token is adjacent.
        while self.is_adjacent() {
            match self.peek() {
                Some(t)
                    if matches!(
                        t.token,
                        Token::Dot | Token::Hash | Token::BracketOpen | Token::PseudoClass
                    ) =>
                {
                    components.push(self.parse_simple_component()?);
                }
                _ => break,
            }
        }

        Ok(CompoundSelector { components })
    }

    /// Parse one non-type simple component: `.class`, `#id`, `[attr...]`,
    /// or `:pseudo`. The caller has peeked the introducing token.
    fn parse_simple_component(&mut self) -> Result<SelectorComponent, ParseError> {
        let tok = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof("expected selector part".into()))?
            .clone();

        match tok.token {
            Token::Dot => {
                let name = self.expect_ident("class name after '.'")?;
                Ok(SelectorComponent::Class(name.text))
            }
            Token::Hash => {
                let name = self.expect_ident("id name after '#'")?;
                Ok(SelectorComponent::Id(name.text))
            }
            Token::PseudoClass => Ok(SelectorComponent::PseudoClass(tok.text[1..].to_string())),
            Token::BracketOpen => self.parse_attribute(),
            other => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected selector part, got {:?} '{}'", other, tok.text),
            }),
        }
    }

    /// Parse an attribute predicate after the `[` has been consumed:
    /// `attr]`, `attr=value]`, `attr^=value]`, `attr$=value]`, `attr*=value]`.
    fn parse_attribute(&mut self) -> Result<SelectorComponent, ParseError> {
        let name = self.expect_ident("attribute name after '['")?.text;

        let op = match self.peek().map(|t| t.token.clone()) {
            Some(Token::BracketClose) => {
                self.advance();
                return Ok(SelectorComponent::Attribute {
                    name,
                    op: AttrOp::Present,
                    value: String::new(),
                });
            }
            Some(Token::Equals) => AttrOp::Equals,
            Some(Token::PrefixMatch) => AttrOp::StartsWith,
            Some(Token::SuffixMatch) => AttrOp::EndsWith,
            Some(Token::SubstringMatch) => AttrOp::Contains,
            _ => {
                return Err(ParseError::UnexpectedToken {
                    position: self.current_pos(),
                    message: "expected attribute operator or ']'".into(),
                });
            }
        };
        self.advance(); // consume the operator

        let value_tok = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof("expected attribute value".into()))?
            .clone();
        let value = match value_tok.token {
            Token::Ident | Token::Number => value_tok.text,
            Token::StringLiteral | Token::StringLiteralSingle => {
                value_tok.text[1..value_tok.text.len() - 1].to_string()
            }
            other => {
                return Err(ParseError::UnexpectedToken {
                    position: value_tok.pos,
                    message: format!(
                        "expected attribute value, got {:?} '{}'",
                        other, value_tok.text
                    ),
                });
            }
        };

        self.expect(&Token::BracketClose)?;
        Ok(SelectorComponent::Attribute { name, op, value })
    }

    /// Parse declarations between `{` and `}`.
    fn parse_declarations(&mut self) -> Result<Vec<Declaration>, ParseError> {
        let mut declarations = Vec::new();

        while self.peek().is_some_and(|t| t.token != Token::BraceClose) {
            declarations.push(self.parse_declaration()?);
        }

        Ok(declarations)
    }

    /// Parse a single declaration: `property: value... [!important];`
    ///
    /// The value is the raw source text between the colon and the
    /// terminator, whitespace-trimmed.
    fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        let property = self.expect_ident("property name")?.text;
        self.expect(&Token::Colon)?;

        let mut important = false;
        let mut span: Option<(usize, usize)> = None;

        loop {
            match self.peek() {
                None
                | Some(PToken { token: Token::Semicolon, .. })
                | Some(PToken { token: Token::BraceClose, .. }) => break,
                Some(PToken { token: Token::Important, .. }) => {
                    self.advance();
                    important = true;
                    break;
                }
                Some(tok) => {
                    let (start, _) = *span.get_or_insert((tok.byte_start, tok.byte_end));
                    span = Some((start, tok.byte_end));
                    self.advance();
                }
            }
        }

        // Consume optional semicolon.
        if self.peek().is_some_and(|t| t.token == Token::Semicolon) {
            self.advance();
        }

        let value = match span {
            Some((start, end)) => self.source[start..end].trim().to_string(),
            None => String::new(),
        };

        Ok(Declaration { property, value, important })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Helpers ──────────────────────────────────────────────────────

    fn parse(input: &str) -> Stylesheet {
        parse_stylesheet(input).unwrap_or_else(|e| panic!("parse failed: {e}"))
    }

    fn first_rule(input: &str) -> Rule {
        let sheet = parse(input);
        assert!(!sheet.rules.is_empty(), "expected at least one rule");
        sheet.rules.into_iter().next().unwrap()
    }

    /// Extract the first compound selector's components from a selector.
    fn first_compound(sel: &Selector) -> &[SelectorComponent] {
        match &sel.parts[0] {
            SelectorPart::Compound(c) => &c.components,
            _ => panic!("expected compound selector at index 0"),
        }
    }

    // ── Simple rule ──────────────────────────────────────────────────

    #[test]
    fn parse_simple_rule() {
        let rule = first_rule("Panel { width: 10; }");
        assert_eq!(rule.selectors.len(), 1);
        assert_eq!(rule.declarations.len(), 1);

        let comps = first_compound(&rule.selectors[0]);
        assert_eq!(comps, [SelectorComponent::Type("Panel".into())]);

        let decl = &rule.declarations[0];
        assert_eq!(decl.property, "width");
        assert_eq!(decl.value, "10");
        assert!(!decl.important);
    }

    // ── Compound selector (no whitespace between parts) ──────────────

    #[test]
    fn parse_compound_selector() {
        let rule = first_rule("Text.primary:selected { width: fit; }");
        let comps = first_compound(&rule.selectors[0]);
        assert_eq!(comps.len(), 3);
        assert_eq!(comps[0], SelectorComponent::Type("Text".into()));
        assert_eq!(comps[1], SelectorComponent::Class("primary".into()));
        assert_eq!(comps[2], SelectorComponent::PseudoClass("selected".into()));
    }

    // ── Combinators ──────────────────────────────────────────────────

    #[test]
    fn parse_descendant_combinator() {
        let rule = first_rule("Column Panel { margin: 1; }");
        let sel = &rule.selectors[0];
        assert_eq!(sel.parts.len(), 3);
        assert_eq!(sel.parts[1], SelectorPart::Combinator(Combinator::Descendant));
    }

    #[test]
    fn parse_child_combinator() {
        let rule = first_rule("Column > Text { padding: 1 2; }");
        let sel = &rule.selectors[0];
        assert_eq!(sel.parts.len(), 3);
        assert_eq!(sel.parts[1], SelectorPart::Combinator(Combinator::Child));
    }

    #[test]
    fn parse_adjacent_combinator() {
        let rule = first_rule("Text + Text.primary { margin: 1; }");
        let sel = &rule.selectors[0];
        assert_eq!(sel.parts.len(), 3);
        assert_eq!(sel.parts[1], SelectorPart::Combinator(Combinator::Adjacent));
        assert_eq!(first_compound(sel).len(), 1);
    }

    /// `Panel.item` (no space) is a single compound; `Panel .item` (space)
    /// is two compounds with a descendant combinator.
    #[test]
    fn whitespace_distinguishes_compound_from_descendant() {
        let rule = first_rule("Panel.item { spacing: 1; }");
        assert_eq!(rule.selectors[0].parts.len(), 1);
        assert_eq!(first_compound(&rule.selectors[0]).len(), 2);

        let rule = first_rule("Panel .item { spacing: 1; }");
        let sel = &rule.selectors[0];
        assert_eq!(sel.parts.len(), 3);
        assert_eq!(sel.parts[1], SelectorPart::Combinator(Combinator::Descendant));
    }

    // ── Attribute predicates ─────────────────────────────────────────

    #[test]
    fn parse_attribute_present() {
        let rule = first_rule("[title] { height: 3; }");
        let comps = first_compound(&rule.selectors[0]);
        assert_eq!(
            comps[0],
            SelectorComponent::Attribute {
                name: "title".into(),
                op: AttrOp::Present,
                value: String::new(),
            }
        );
    }

    #[test]
    fn parse_attribute_operators() {
        let cases = [
            ("[title=Log]", AttrOp::Equals),
            ("[title^=Log]", AttrOp::StartsWith),
            ("[title$=Log]", AttrOp::EndsWith),
            ("[title*=Log]", AttrOp::Contains),
        ];
        for (selector, expected_op) in cases {
            let rule = first_rule(&format!("{selector} {{ height: 1; }}"));
            let comps = first_compound(&rule.selectors[0]);
            assert_eq!(
                comps[0],
                SelectorComponent::Attribute {
                    name: "title".into(),
                    op: expected_op,
                    value: "Log".into(),
                },
                "selector: {selector}"
            );
        }
    }

    #[test]
    fn parse_attribute_quoted_value() {
        let rule = first_rule(r#"Panel[title="Event Log"] { height: 10; }"#);
        let comps = first_compound(&rule.selectors[0]);
        assert_eq!(comps.len(), 2);
        assert_eq!(
            comps[1],
            SelectorComponent::Attribute {
                name: "title".into(),
                op: AttrOp::Equals,
                value: "Event Log".into(),
            }
        );
    }

    #[test]
    fn attribute_joins_compound_when_adjacent() {
        let rule = first_rule("Panel[title] { width: 5; }");
        assert_eq!(rule.selectors[0].parts.len(), 1);

        let rule = first_rule("Panel [title] { width: 5; }");
        assert_eq!(rule.selectors[0].parts.len(), 3);
    }

    #[test]
    fn parse_attribute_missing_bracket_is_error() {
        assert!(parse_stylesheet("[title { width: 1; }").is_err());
    }

    // ── Declarations ─────────────────────────────────────────────────

    #[test]
    fn declaration_value_is_raw_text() {
        let rule = first_rule("Row { width: fill(2); margin: 1 2 3 4; flex: space-between; }");
        assert_eq!(rule.declarations[0].value, "fill(2)");
        assert_eq!(rule.declarations[1].value, "1 2 3 4");
        assert_eq!(rule.declarations[2].value, "space-between");
    }

    #[test]
    fn parse_percentage_value() {
        let rule = first_rule("Panel { width: 50%; }");
        assert_eq!(rule.declarations[0].value, "50%");
    }

    #[test]
    fn parse_important() {
        let rule = first_rule("Text { width: 10 !important; }");
        assert!(rule.declarations[0].important);
        assert_eq!(rule.declarations[0].value, "10");
    }

    #[test]
    fn parse_multiple_declarations() {
        let rule = first_rule("Row { spacing: 2; width: fill; flex: center; }");
        assert_eq!(rule.declarations.len(), 3);
        assert_eq!(rule.declarations[0].property, "spacing");
        assert_eq!(rule.declarations[1].property, "width");
        assert_eq!(rule.declarations[2].property, "flex");
    }

    #[test]
    fn parse_declaration_without_trailing_semicolon() {
        let rule = first_rule("Text { width: 10 }");
        assert_eq!(rule.declarations.len(), 1);
        assert_eq!(rule.declarations[0].value, "10");
    }

    #[test]
    fn parse_empty_declaration_value() {
        let rule = first_rule("Text { width: ; }");
        assert_eq!(rule.declarations[0].value, "");
    }

    // ── Multiple selectors / rules ───────────────────────────────────

    #[test]
    fn parse_multiple_selectors() {
        let rule = first_rule("Row, Column { spacing: 1; }");
        assert_eq!(rule.selectors.len(), 2);
        assert_eq!(first_compound(&rule.selectors[0])[0], SelectorComponent::Type("Row".into()));
        assert_eq!(
            first_compound(&rule.selectors[1])[0],
            SelectorComponent::Type("Column".into())
        );
    }

    #[test]
    fn parse_multiple_rules() {
        let sheet = parse("Row { spacing: 1; } Text { width: fit; }");
        assert_eq!(sheet.rules.len(), 2);
    }

    // ── Comments ─────────────────────────────────────────────────────

    #[test]
    fn parse_with_comments() {
        let input = "/* top */ Row { spacing: 1; /* inline */ width: fill; }";
        let rule = first_rule(input);
        assert_eq!(rule.declarations.len(), 2);
    }

    #[test]
    fn parse_comment_between_rules() {
        let sheet = parse("Row { spacing: 1; } /* between */ Text { width: 2; }");
        assert_eq!(sheet.rules.len(), 2);
    }

    // ── Other selectors ──────────────────────────────────────────────

    #[test]
    fn parse_universal_selector() {
        let rule = first_rule("* { spacing: 0; }");
        assert_eq!(first_compound(&rule.selectors[0])[0], SelectorComponent::Universal);
    }

    #[test]
    fn parse_id_selector() {
        let rule = first_rule("#sidebar { width: 30; }");
        assert_eq!(first_compound(&rule.selectors[0])[0], SelectorComponent::Id("sidebar".into()));
    }

    #[test]
    fn parse_class_only_selector() {
        let rule = first_rule(".primary { width: fill; }");
        assert_eq!(
            first_compound(&rule.selectors[0])[0],
            SelectorComponent::Class("primary".into())
        );
    }

    #[test]
    fn parse_complex_selector_chain() {
        let rule = first_rule("Dock > Panel .item:selected { width: 10; }");
        let sel = &rule.selectors[0];
        assert_eq!(sel.parts.len(), 5);
        assert_eq!(sel.parts[1], SelectorPart::Combinator(Combinator::Child));
        assert_eq!(sel.parts[3], SelectorPart::Combinator(Combinator::Descendant));
        match &sel.parts[4] {
            SelectorPart::Compound(c) => {
                assert_eq!(c.components.len(), 2);
                assert_eq!(c.components[0], SelectorComponent::Class("item".into()));
                assert_eq!(c.components[1], SelectorComponent::PseudoClass("selected".into()));
            }
            _ => panic!("expected compound"),
        }
    }

    // ── Error handling ───────────────────────────────────────────────

    #[test]
    fn parse_unclosed_brace() {
        assert!(parse_stylesheet("Row { spacing: 1;").is_err());
    }

    #[test]
    fn parse_empty_input() {
        assert!(parse("").rules.is_empty());
    }

    // ── strip_comments ───────────────────────────────────────────────

    #[test]
    fn strip_comments_basic() {
        // Space before /* + replacement space + space after */ = 3 spaces.
        assert_eq!(strip_comments("a /* comment */ b"), "a   b");
    }

    #[test]
    fn strip_comments_unterminated() {
        assert_eq!(strip_comments("a /* unterminated"), "a  ");
    }

    #[test]
    fn strip_comments_no_comments() {
        assert_eq!(strip_comments("hello world"), "hello world");
    }

    #[test]
    fn strip_comments_preserves_multibyte_text() {
        assert_eq!(strip_comments("café /* zürich */ 你好"), "café   你好");
        assert_eq!(strip_comments("émigré"), "émigré");
    }

    #[test]
    fn parse_attribute_non_ascii_value() {
        let rule = first_rule(r#"[title="café"] { width: 3; }"#);
        let comps = first_compound(&rule.selectors[0]);
        assert_eq!(
            comps[0],
            SelectorComponent::Attribute {
                name: "title".into(),
                op: AttrOp::Equals,
                value: "café".into(),
            }
        );
    }
}
