//! Syntax checker for ICU MessageFormat strings.
//!
//! Supports the dialect used by most JavaScript i18n tooling:
//!
//! - literal text, with `''` for an apostrophe and `'{...}'` quoting
//! - simple arguments: `{name}`
//! - formatted arguments: `{n, number}`, `{d, date, short}`, `{t, time, ::jmm}`
//! - `{n, plural, offset:1 =0 {none} one {# item} other {# items}}`
//! - `{n, selectordinal, one {#st} two {#nd} few {#rd} other {#th}}`
//! - `{g, select, male {he} female {she} other {they}}`
//! - rich text tags: `<b>bold</b>`, self-closing `<br/>`
//!
//! Branches and tags nest at most [`MAX_NESTING_DEPTH`] levels.
//!
//! Error messages use stable, greppable kind names (`EMPTY_ARGUMENT`, ...)
//! followed by the byte offset where the problem was detected.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IcuErrorKind {
    #[error("EXPECT_ARGUMENT_CLOSING_BRACE")]
    ExpectArgumentClosingBrace,
    #[error("EMPTY_ARGUMENT")]
    EmptyArgument,
    #[error("MALFORMED_ARGUMENT")]
    MalformedArgument,
    #[error("EXPECT_ARGUMENT_TYPE")]
    ExpectArgumentType,
    #[error("INVALID_ARGUMENT_TYPE")]
    InvalidArgumentType,
    #[error("EXPECT_ARGUMENT_STYLE")]
    ExpectArgumentStyle,
    #[error("UNCLOSED_QUOTE_IN_ARGUMENT_STYLE")]
    UnclosedQuoteInArgumentStyle,
    #[error("EXPECT_SELECT_ARGUMENT_OPTIONS")]
    ExpectSelectArgumentOptions,
    #[error("EXPECT_PLURAL_ARGUMENT_OPTIONS")]
    ExpectPluralArgumentOptions,
    #[error("EXPECT_PLURAL_ARGUMENT_OFFSET_VALUE")]
    ExpectPluralArgumentOffsetValue,
    #[error("INVALID_PLURAL_ARGUMENT_OFFSET_VALUE")]
    InvalidPluralArgumentOffsetValue,
    #[error("EXPECT_SELECT_ARGUMENT_SELECTOR")]
    ExpectSelectArgumentSelector,
    #[error("EXPECT_PLURAL_ARGUMENT_SELECTOR")]
    ExpectPluralArgumentSelector,
    #[error("INVALID_PLURAL_ARGUMENT_SELECTOR")]
    InvalidPluralArgumentSelector,
    #[error("EXPECT_SELECT_ARGUMENT_SELECTOR_FRAGMENT")]
    ExpectSelectArgumentSelectorFragment,
    #[error("EXPECT_PLURAL_ARGUMENT_SELECTOR_FRAGMENT")]
    ExpectPluralArgumentSelectorFragment,
    #[error("DUPLICATE_SELECT_ARGUMENT_SELECTOR")]
    DuplicateSelectArgumentSelector,
    #[error("DUPLICATE_PLURAL_ARGUMENT_SELECTOR")]
    DuplicatePluralArgumentSelector,
    #[error("MISSING_OTHER_CLAUSE")]
    MissingOtherClause,
    #[error("INVALID_TAG")]
    InvalidTag,
    #[error("UNCLOSED_TAG")]
    UnclosedTag,
    #[error("UNMATCHED_CLOSING_TAG")]
    UnmatchedClosingTag,
    #[error("NESTING_TOO_DEEP")]
    NestingTooDeep,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at offset {offset}")]
pub struct IcuError {
    pub kind: IcuErrorKind,
    /// Byte offset into the message
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    Number,
    Date,
    Time,
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatKind::Number => write!(f, "number"),
            FormatKind::Date => write!(f, "date"),
            FormatKind::Time => write!(f, "time"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Literal(String),
    /// `{name}`
    Argument(String),
    /// `{name, number|date|time[, style]}`
    Formatted {
        name: String,
        format: FormatKind,
        style: Option<String>,
    },
    Plural {
        name: String,
        ordinal: bool,
        offset: i64,
        branches: Vec<Branch>,
    },
    Select {
        name: String,
        branches: Vec<Branch>,
    },
    /// `#` inside a plural branch
    Pound,
    Tag {
        name: String,
        children: Vec<Element>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// Keyword (`one`, `other`, `male`) or exact match (`=0`)
    pub selector: String,
    pub value: Vec<Element>,
}

/// Deepest allowed nesting of plural/select branches and tags.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Parse a single ICU message.
pub fn parse(message: &str) -> Result<Vec<Element>, IcuError> {
    let mut parser = Parser {
        src: message,
        pos: 0,
    };
    parser.parse_message(0, false, false)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum SelectorKind {
    Plural,
    Select,
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, kind: IcuErrorKind, offset: usize) -> IcuError {
        IcuError { kind, offset }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn bump_str(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    fn parse_message(
        &mut self,
        depth: usize,
        in_plural: bool,
        in_tag: bool,
    ) -> Result<Vec<Element>, IcuError> {
        if depth > MAX_NESTING_DEPTH {
            return Err(self.error(IcuErrorKind::NestingTooDeep, self.pos));
        }

        let mut elements = Vec::new();

        while let Some(c) = self.peek() {
            match c {
                '{' => elements.push(self.parse_argument(depth)?),
                '}' if depth > 0 => break,
                '#' if in_plural => {
                    self.bump();
                    elements.push(Element::Pound);
                }
                '<' if self.peek_second() == Some('/') => {
                    if in_tag {
                        break;
                    }
                    return Err(self.error(IcuErrorKind::UnmatchedClosingTag, self.pos));
                }
                '<' if self.peek_second().is_some_and(|c| c.is_ascii_alphabetic()) => {
                    let tag = self.parse_tag(depth, in_plural)?;
                    push_element(&mut elements, tag);
                }
                _ => {
                    let literal = self.parse_literal(depth, in_plural);
                    push_element(&mut elements, Element::Literal(literal));
                }
            }
        }

        Ok(elements)
    }

    fn parse_literal(&mut self, depth: usize, in_plural: bool) -> String {
        let mut text = String::new();

        while let Some(c) = self.peek() {
            match c {
                '{' => break,
                '}' if depth > 0 => break,
                '#' if in_plural => break,
                '<' if self
                    .peek_second()
                    .is_some_and(|n| n == '/' || n.is_ascii_alphabetic()) =>
                {
                    break
                }
                '\'' => self.parse_quote(in_plural, &mut text),
                _ => {
                    text.push(c);
                    self.bump();
                }
            }
        }

        text
    }

    /// Handle an apostrophe at the cursor, appending the literal text it
    /// stands for.
    fn parse_quote(&mut self, in_plural: bool, text: &mut String) {
        self.bump();
        match self.peek() {
            Some('\'') => {
                self.bump();
                text.push('\'');
            }
            Some('{' | '}' | '<' | '>' | '|') => self.take_quoted(text),
            Some('#') if in_plural => self.take_quoted(text),
            _ => text.push('\''),
        }
    }

    /// Consume quoted text up to the closing apostrophe, or the end of input.
    fn take_quoted(&mut self, text: &mut String) {
        while let Some(c) = self.bump() {
            if c == '\'' {
                if self.peek() == Some('\'') {
                    self.bump();
                    text.push('\'');
                } else {
                    return;
                }
            } else {
                text.push(c);
            }
        }
    }

    fn parse_argument(&mut self, depth: usize) -> Result<Element, IcuError> {
        let start = self.pos;
        self.bump();
        self.skip_whitespace();

        match self.peek() {
            None => return Err(self.error(IcuErrorKind::ExpectArgumentClosingBrace, start)),
            Some('}') => {
                self.bump();
                return Err(self.error(IcuErrorKind::EmptyArgument, start));
            }
            Some(_) => {}
        }

        let name = self.take_while(is_identifier_char).to_string();
        if name.is_empty() {
            return Err(self.error(IcuErrorKind::MalformedArgument, start));
        }
        self.skip_whitespace();

        match self.peek() {
            None => Err(self.error(IcuErrorKind::ExpectArgumentClosingBrace, start)),
            Some('}') => {
                self.bump();
                Ok(Element::Argument(name))
            }
            Some(',') => {
                self.bump();
                self.skip_whitespace();
                self.parse_argument_options(name, start, depth)
            }
            Some(_) => Err(self.error(IcuErrorKind::MalformedArgument, start)),
        }
    }

    fn parse_argument_options(
        &mut self,
        name: String,
        start: usize,
        depth: usize,
    ) -> Result<Element, IcuError> {
        let type_start = self.pos;
        let arg_type = self.take_while(|c| c.is_ascii_alphabetic());
        if arg_type.is_empty() {
            return Err(self.error(IcuErrorKind::ExpectArgumentType, type_start));
        }

        let element = match arg_type {
            "number" | "date" | "time" => {
                let format = match arg_type {
                    "number" => FormatKind::Number,
                    "date" => FormatKind::Date,
                    _ => FormatKind::Time,
                };
                self.skip_whitespace();
                let style = if self.bump_str(",") {
                    self.skip_whitespace();
                    let style_start = self.pos;
                    let style = self.parse_style(start)?.trim_end();
                    if style.is_empty() {
                        return Err(self.error(IcuErrorKind::ExpectArgumentStyle, style_start));
                    }
                    Some(style.to_string())
                } else {
                    None
                };
                Element::Formatted {
                    name,
                    format,
                    style,
                }
            }
            "plural" | "selectordinal" => {
                let ordinal = arg_type == "selectordinal";
                self.skip_whitespace();
                if !self.bump_str(",") {
                    return Err(self.error(IcuErrorKind::ExpectPluralArgumentOptions, self.pos));
                }
                self.skip_whitespace();
                let offset = self.parse_plural_offset()?;
                let branches = self.parse_branches(SelectorKind::Plural, depth)?;
                Element::Plural {
                    name,
                    ordinal,
                    offset,
                    branches,
                }
            }
            "select" => {
                self.skip_whitespace();
                if !self.bump_str(",") {
                    return Err(self.error(IcuErrorKind::ExpectSelectArgumentOptions, self.pos));
                }
                let branches = self.parse_branches(SelectorKind::Select, depth)?;
                Element::Select { name, branches }
            }
            _ => return Err(self.error(IcuErrorKind::InvalidArgumentType, type_start)),
        };

        self.skip_whitespace();
        if !self.bump_str("}") {
            return Err(self.error(IcuErrorKind::ExpectArgumentClosingBrace, start));
        }
        Ok(element)
    }

    /// Style text runs up to the argument's closing brace. Nested braces must
    /// balance and apostrophes quote.
    fn parse_style(&mut self, arg_start: usize) -> Result<&'a str, IcuError> {
        let start = self.pos;
        let mut nested = 0usize;

        loop {
            match self.peek() {
                None => return Err(self.error(IcuErrorKind::ExpectArgumentClosingBrace, arg_start)),
                Some('\'') => {
                    let quote_start = self.pos;
                    self.bump();
                    match self.rest().find('\'') {
                        Some(end) => self.pos += end + 1,
                        None => {
                            return Err(self.error(
                                IcuErrorKind::UnclosedQuoteInArgumentStyle,
                                quote_start,
                            ))
                        }
                    }
                }
                Some('{') => {
                    nested += 1;
                    self.bump();
                }
                Some('}') if nested == 0 => break,
                Some('}') => {
                    nested -= 1;
                    self.bump();
                }
                Some(_) => {
                    self.bump();
                }
            }
        }

        Ok(&self.src[start..self.pos])
    }

    fn parse_plural_offset(&mut self) -> Result<i64, IcuError> {
        if !self.bump_str("offset:") {
            return Ok(0);
        }
        self.skip_whitespace();
        let value_start = self.pos;
        let value = self.take_signed_integer();
        if value.is_empty() {
            return Err(self.error(IcuErrorKind::ExpectPluralArgumentOffsetValue, value_start));
        }
        let offset = value
            .parse()
            .map_err(|_| self.error(IcuErrorKind::InvalidPluralArgumentOffsetValue, value_start))?;
        self.skip_whitespace();
        Ok(offset)
    }

    fn take_signed_integer(&mut self) -> &'a str {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.bump();
        }
        self.take_while(|c| c.is_ascii_digit());
        &self.src[start..self.pos]
    }

    fn parse_branches(&mut self, kind: SelectorKind, depth: usize) -> Result<Vec<Branch>, IcuError> {
        let plural = kind == SelectorKind::Plural;
        let mut branches: Vec<Branch> = Vec::new();
        let mut saw_other = false;

        loop {
            self.skip_whitespace();
            let selector_start = self.pos;

            let selector = if plural && self.peek() == Some('=') {
                self.bump();
                let value = self.take_signed_integer();
                if value.parse::<i64>().is_err() {
                    return Err(self.error(IcuErrorKind::InvalidPluralArgumentSelector, selector_start));
                }
                format!("={}", value)
            } else {
                self.take_while(is_identifier_char).to_string()
            };
            if selector.is_empty() {
                break;
            }

            if branches.iter().any(|b| b.selector == selector) {
                let kind = if plural {
                    IcuErrorKind::DuplicatePluralArgumentSelector
                } else {
                    IcuErrorKind::DuplicateSelectArgumentSelector
                };
                return Err(self.error(kind, selector_start));
            }

            self.skip_whitespace();
            let fragment_start = self.pos;
            if !self.bump_str("{") {
                let kind = if plural {
                    IcuErrorKind::ExpectPluralArgumentSelectorFragment
                } else {
                    IcuErrorKind::ExpectSelectArgumentSelectorFragment
                };
                return Err(self.error(kind, fragment_start));
            }

            let value = self.parse_message(depth + 1, plural, false)?;
            if !self.bump_str("}") {
                return Err(self.error(IcuErrorKind::ExpectArgumentClosingBrace, fragment_start));
            }

            saw_other |= selector == "other";
            branches.push(Branch { selector, value });
        }

        if branches.is_empty() {
            let kind = if plural {
                IcuErrorKind::ExpectPluralArgumentSelector
            } else {
                IcuErrorKind::ExpectSelectArgumentSelector
            };
            return Err(self.error(kind, self.pos));
        }
        if !saw_other {
            return Err(self.error(IcuErrorKind::MissingOtherClause, self.pos));
        }

        Ok(branches)
    }

    fn parse_tag(&mut self, depth: usize, in_plural: bool) -> Result<Element, IcuError> {
        let start = self.pos;
        self.bump();
        let name = self.take_while(is_tag_name_char).to_string();
        self.skip_whitespace();

        if self.bump_str("/>") {
            return Ok(Element::Literal(format!("<{}/>", name)));
        }
        if !self.bump_str(">") {
            return Err(self.error(IcuErrorKind::InvalidTag, start));
        }

        let children = self.parse_message(depth + 1, in_plural, true)?;

        if !self.bump_str("</") {
            return Err(self.error(IcuErrorKind::UnclosedTag, start));
        }
        let closing_start = self.pos;
        let closing = self.take_while(is_tag_name_char);
        if closing != name {
            return Err(self.error(IcuErrorKind::UnmatchedClosingTag, closing_start));
        }
        self.skip_whitespace();
        if !self.bump_str(">") {
            return Err(self.error(IcuErrorKind::InvalidTag, closing_start));
        }

        Ok(Element::Tag { name, children })
    }
}

fn is_identifier_char(c: char) -> bool {
    if c.is_ascii() {
        c.is_ascii_alphanumeric() || c == '_'
    } else {
        !c.is_whitespace()
    }
}

fn is_tag_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

/// Append an element, merging adjacent literal runs.
fn push_element(elements: &mut Vec<Element>, element: Element) {
    if let Element::Literal(text) = &element {
        if text.is_empty() {
            return;
        }
        if let Some(Element::Literal(prev)) = elements.last_mut() {
            prev.push_str(text);
            return;
        }
    }
    elements.push(element);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn literal(s: &str) -> Element {
        Element::Literal(s.to_string())
    }

    fn kind_of(message: &str) -> IcuErrorKind {
        parse(message)
            .expect_err(&format!("expected {:?} to fail", message))
            .kind
    }

    // ==================== Literal Tests ====================

    #[test]
    fn test_plain_text() {
        assert_eq!(parse("Hello world").unwrap(), vec![literal("Hello world")]);
    }

    #[test]
    fn test_empty_message() {
        assert_eq!(parse("").unwrap(), Vec::<Element>::new());
    }

    #[test]
    fn test_escaped_apostrophe() {
        assert_eq!(parse("It''s here").unwrap(), vec![literal("It's here")]);
    }

    #[test]
    fn test_lone_apostrophe_is_literal() {
        assert_eq!(parse("It's here").unwrap(), vec![literal("It's here")]);
    }

    #[test]
    fn test_quoted_braces() {
        assert_eq!(
            parse("Use '{name}' literally").unwrap(),
            vec![literal("Use {name} literally")]
        );
    }

    #[test]
    fn test_unterminated_quote_runs_to_end() {
        assert_eq!(parse("a '{b").unwrap(), vec![literal("a {b")]);
    }

    #[test]
    fn test_top_level_closing_brace_is_literal() {
        assert_eq!(parse("a } b").unwrap(), vec![literal("a } b")]);
    }

    #[test]
    fn test_unicode_text() {
        assert_eq!(
            parse("你好 {name} 👋").unwrap(),
            vec![
                literal("你好 "),
                Element::Argument("name".to_string()),
                literal(" 👋")
            ]
        );
    }

    // ==================== Argument Tests ====================

    #[test]
    fn test_simple_argument() {
        assert_eq!(
            parse("Hello {name}").unwrap(),
            vec![literal("Hello "), Element::Argument("name".to_string())]
        );
    }

    #[test]
    fn test_argument_with_whitespace_and_digits() {
        assert_eq!(
            parse("{ 0 }").unwrap(),
            vec![Element::Argument("0".to_string())]
        );
    }

    #[test]
    fn test_formatted_arguments() {
        assert_eq!(
            parse("{n, number}").unwrap(),
            vec![Element::Formatted {
                name: "n".to_string(),
                format: FormatKind::Number,
                style: None
            }]
        );
        assert_eq!(
            parse("{d, date, short}").unwrap(),
            vec![Element::Formatted {
                name: "d".to_string(),
                format: FormatKind::Date,
                style: Some("short".to_string())
            }]
        );
        assert_eq!(
            parse("{t, time, ::jmm}").unwrap(),
            vec![Element::Formatted {
                name: "t".to_string(),
                format: FormatKind::Time,
                style: Some("::jmm".to_string())
            }]
        );
    }

    #[test]
    fn test_number_style_with_quotes() {
        assert!(parse("{n, number, '#'.00}").is_ok());
    }

    #[test]
    fn test_argument_errors() {
        assert_eq!(kind_of("Hello {name"), IcuErrorKind::ExpectArgumentClosingBrace);
        assert_eq!(kind_of("Hello {"), IcuErrorKind::ExpectArgumentClosingBrace);
        assert_eq!(kind_of("Hello {}"), IcuErrorKind::EmptyArgument);
        assert_eq!(kind_of("Hello { }"), IcuErrorKind::EmptyArgument);
        assert_eq!(kind_of("{na me}"), IcuErrorKind::MalformedArgument);
        assert_eq!(kind_of("{#}"), IcuErrorKind::MalformedArgument);
        assert_eq!(kind_of("{n,}"), IcuErrorKind::ExpectArgumentType);
        assert_eq!(kind_of("{n, money}"), IcuErrorKind::InvalidArgumentType);
        assert_eq!(kind_of("{n, number,}"), IcuErrorKind::ExpectArgumentStyle);
        assert_eq!(kind_of("{n, number, short"), IcuErrorKind::ExpectArgumentClosingBrace);
        assert_eq!(
            kind_of("{n, number, 'abc}"),
            IcuErrorKind::UnclosedQuoteInArgumentStyle
        );
    }

    #[test]
    fn test_error_offset_points_at_argument() {
        let err = parse("Hello {name").unwrap_err();
        assert_eq!(err.offset, 6);
        assert_eq!(err.to_string(), "EXPECT_ARGUMENT_CLOSING_BRACE at offset 6");
    }

    // ==================== Plural / Select Tests ====================

    #[test]
    fn test_plural() {
        let ast = parse("{count, plural, =0 {no items} one {# item} other {# items}}").unwrap();
        let Element::Plural {
            name,
            ordinal,
            offset,
            branches,
        } = &ast[0]
        else {
            panic!("expected plural, got {:?}", ast);
        };

        assert_eq!(name, "count");
        assert!(!ordinal);
        assert_eq!(*offset, 0);
        let selectors: Vec<&str> = branches.iter().map(|b| b.selector.as_str()).collect();
        assert_eq!(selectors, vec!["=0", "one", "other"]);
        assert_eq!(branches[1].value, vec![Element::Pound, literal(" item")]);
    }

    #[test]
    fn test_plural_offset() {
        let ast = parse("{n, plural, offset:1 =0 {nobody} other {# others}}").unwrap();
        assert!(matches!(&ast[0], Element::Plural { offset: 1, .. }));
    }

    #[test]
    fn test_selectordinal() {
        let ast = parse("{n, selectordinal, one {#st} two {#nd} few {#rd} other {#th}}").unwrap();
        assert!(matches!(&ast[0], Element::Plural { ordinal: true, .. }));
    }

    #[test]
    fn test_select() {
        let ast = parse("{g, select, male {He} female {She} other {They}} left").unwrap();
        assert_eq!(ast.len(), 2);
        assert!(matches!(&ast[0], Element::Select { branches, .. } if branches.len() == 3));
        assert_eq!(ast[1], literal(" left"));
    }

    #[test]
    fn test_pound_outside_plural_is_literal() {
        assert_eq!(parse("Item #1").unwrap(), vec![literal("Item #1")]);
        let ast = parse("{g, select, other {#1}}").unwrap();
        let Element::Select { branches, .. } = &ast[0] else {
            panic!("expected select");
        };
        assert_eq!(branches[0].value, vec![literal("#1")]);
    }

    #[test]
    fn test_quoted_pound_in_plural() {
        let ast = parse("{n, plural, other {'#' is #}}").unwrap();
        let Element::Plural { branches, .. } = &ast[0] else {
            panic!("expected plural");
        };
        assert_eq!(branches[0].value, vec![literal("# is "), Element::Pound]);
    }

    #[test]
    fn test_nested_plural_in_select() {
        let message = "{g, select, female {{n, plural, one {She has # cat} other {She has # cats}}} other {{n, plural, other {They have # cats}}}}";
        assert!(parse(message).is_ok());
    }

    #[test]
    fn test_plural_and_select_errors() {
        assert_eq!(kind_of("{n, plural}"), IcuErrorKind::ExpectPluralArgumentOptions);
        assert_eq!(kind_of("{n, select}"), IcuErrorKind::ExpectSelectArgumentOptions);
        assert_eq!(kind_of("{n, plural, }"), IcuErrorKind::ExpectPluralArgumentSelector);
        assert_eq!(kind_of("{n, select, }"), IcuErrorKind::ExpectSelectArgumentSelector);
        assert_eq!(kind_of("{n, plural, one {x}}"), IcuErrorKind::MissingOtherClause);
        assert_eq!(kind_of("{g, select, male {x}}"), IcuErrorKind::MissingOtherClause);
        assert_eq!(
            kind_of("{n, plural, one x other {y}}"),
            IcuErrorKind::ExpectPluralArgumentSelectorFragment
        );
        assert_eq!(
            kind_of("{g, select, male x other {y}}"),
            IcuErrorKind::ExpectSelectArgumentSelectorFragment
        );
        assert_eq!(
            kind_of("{n, plural, one {a} one {b} other {c}}"),
            IcuErrorKind::DuplicatePluralArgumentSelector
        );
        assert_eq!(
            kind_of("{g, select, a {a} a {b} other {c}}"),
            IcuErrorKind::DuplicateSelectArgumentSelector
        );
        assert_eq!(
            kind_of("{n, plural, =x {a} other {b}}"),
            IcuErrorKind::InvalidPluralArgumentSelector
        );
        assert_eq!(
            kind_of("{n, plural, offset: other {b}}"),
            IcuErrorKind::ExpectPluralArgumentOffsetValue
        );
        assert_eq!(
            kind_of("{n, plural, offset:99999999999999999999 other {b}}"),
            IcuErrorKind::InvalidPluralArgumentOffsetValue
        );
        assert_eq!(
            kind_of("{n, plural, other {# items}"),
            IcuErrorKind::ExpectArgumentClosingBrace
        );
        assert_eq!(
            kind_of("{n, plural, other {# items"),
            IcuErrorKind::ExpectArgumentClosingBrace
        );
    }

    // ==================== Tag Tests ====================

    #[test]
    fn test_tag() {
        assert_eq!(
            parse("Click <b>here</b>").unwrap(),
            vec![
                literal("Click "),
                Element::Tag {
                    name: "b".to_string(),
                    children: vec![literal("here")]
                }
            ]
        );
    }

    #[test]
    fn test_tag_with_argument() {
        let ast = parse("<link>{name}</link>").unwrap();
        assert_eq!(
            ast,
            vec![Element::Tag {
                name: "link".to_string(),
                children: vec![Element::Argument("name".to_string())]
            }]
        );
    }

    #[test]
    fn test_self_closing_tag_is_literal() {
        assert_eq!(parse("a<br/>b").unwrap(), vec![literal("a<br/>b")]);
    }

    #[test]
    fn test_less_than_is_literal() {
        assert_eq!(parse("1 < 2").unwrap(), vec![literal("1 < 2")]);
    }

    #[test]
    fn test_tag_errors() {
        assert_eq!(kind_of("<b>bold"), IcuErrorKind::UnclosedTag);
        assert_eq!(kind_of("<b>bold</i>"), IcuErrorKind::UnmatchedClosingTag);
        assert_eq!(kind_of("bold</b>"), IcuErrorKind::UnmatchedClosingTag);
        assert_eq!(kind_of("<b bold</b>"), IcuErrorKind::InvalidTag);
        assert_eq!(kind_of("<b>bold</b"), IcuErrorKind::InvalidTag);
    }

    // ==================== Nesting Tests ====================

    fn nested_tags(depth: usize) -> String {
        format!("{}x{}", "<b>".repeat(depth), "</b>".repeat(depth))
    }

    fn nested_selects(depth: usize) -> String {
        format!("{}x{}", "{a, select, other {".repeat(depth), "}}".repeat(depth))
    }

    #[test]
    fn test_nesting_at_limit_is_accepted() {
        assert!(parse(&nested_tags(MAX_NESTING_DEPTH)).is_ok());
        assert!(parse(&nested_selects(MAX_NESTING_DEPTH)).is_ok());
    }

    #[test]
    fn test_nesting_past_limit_is_rejected() {
        assert_eq!(
            kind_of(&nested_tags(MAX_NESTING_DEPTH + 1)),
            IcuErrorKind::NestingTooDeep
        );
        assert_eq!(
            kind_of(&nested_selects(MAX_NESTING_DEPTH + 1)),
            IcuErrorKind::NestingTooDeep
        );
    }

    #[test]
    fn test_deep_nesting_does_not_overflow_worker_stack() {
        // Same stack size as a tokio worker thread
        let handle = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(|| {
                (
                    parse(&"<b>".repeat(20_000)).map_err(|e| e.kind),
                    parse(&"{a,select,other{".repeat(20_000)).map_err(|e| e.kind),
                )
            })
            .unwrap();

        let (tags, selects) = handle.join().unwrap();
        assert_eq!(tags, Err(IcuErrorKind::NestingTooDeep));
        assert_eq!(selects, Err(IcuErrorKind::NestingTooDeep));
    }

    proptest! {
        #[test]
        fn prop_parse_never_panics(message in ".{0,64}") {
            let _ = parse(&message);
        }

        #[test]
        fn prop_plain_words_parse_to_one_literal(message in "[a-zA-Z0-9 .,!?]{1,64}") {
            prop_assert_eq!(parse(&message).unwrap(), vec![Element::Literal(message.clone())]);
        }
    }
}
