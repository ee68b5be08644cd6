//! Node types and parser for printf-style templates.
//!
//! A template is literal text interleaved with verbs of the form
//! `%[flags][[index]][width][.precision][[index]]verb`.
//!
//! Widths and precisions above [`MAX_WIDTH`] are rejected so a template can
//! never ask for an unbounded amount of padding.

/// Largest width or precision a verb may carry.
pub const MAX_WIDTH: usize = 1_000_000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags {
    /// `-`: pad on the right
    pub minus: bool,
    /// `+`: always print a sign
    pub plus: bool,
    /// `0`: pad numbers with leading zeros
    pub zero: bool,
    /// `#`: alternate form (radix prefixes)
    pub sharp: bool,
    /// ` `: leave a space for the sign of positive numbers
    pub space: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verb {
    pub flags: Flags,
    pub width: Option<usize>,
    pub precision: Option<usize>,
    /// Explicit 1-indexed argument, from `%[n]d`
    pub index: Option<usize>,
    pub verb: char,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateNode {
    Text(String),
    Verb(Verb),
    /// `%[...]` with something other than a positive number inside
    BadIndex,
    /// A `%` at the end of the template
    NoVerb,
    /// Width above [`MAX_WIDTH`]; the verb that follows is rendered without one
    BadWidth,
    /// Precision above [`MAX_WIDTH`]; the verb that follows is rendered without one
    BadPrecision,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template(pub Vec<TemplateNode>);

impl Template {
    pub fn new() -> Self {
        Template(Vec::new())
    }

    pub fn parse(input: &str) -> Self {
        Parser::new(input).parse()
    }

    pub fn push(&mut self, node: TemplateNode) {
        self.0.push(node);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TemplateNode> {
        self.0.get(index)
    }

    /// Whether any verb selects its argument explicitly.
    pub fn is_reordered(&self) -> bool {
        self.0.iter().any(|node| match node {
            TemplateNode::Verb(verb) => verb.index.is_some(),
            TemplateNode::BadIndex => true,
            _ => false,
        })
    }
}

impl<'a> IntoIterator for &'a Template {
    type Item = &'a TemplateNode;
    type IntoIter = std::slice::Iter<'a, TemplateNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Parser for printf-style templates.
pub struct Parser<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Parser { input, position: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Consumes the current character and advances the position.
    fn consume(&mut self) -> Option<char> {
        let c = self.peek();
        if let Some(c) = c {
            self.position += c.len_utf8();
        }
        c
    }

    fn parse_text(&mut self) -> TemplateNode {
        let start = self.position;
        while let Some(c) = self.peek() {
            if c == '%' {
                break;
            }
            self.consume();
        }
        TemplateNode::Text(self.input[start..self.position].to_string())
    }

    /// Parses a run of digits. Returns `Some(None)` when the number is above
    /// [`MAX_WIDTH`] or does not fit in a `usize`.
    fn parse_number(&mut self) -> Option<Option<usize>> {
        let start = self.position;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.consume();
        }
        let digits = &self.input[start..self.position];
        if digits.is_empty() {
            return None;
        }
        Some(digits.parse::<usize>().ok().filter(|n| *n <= MAX_WIDTH))
    }

    /// Parses `[n]`. Returns `Some(None)` when the brackets hold no valid index.
    fn parse_index(&mut self) -> Option<Option<usize>> {
        if self.peek() != Some('[') {
            return None;
        }
        self.consume();
        let start = self.position;
        while let Some(c) = self.peek() {
            if c == ']' {
                break;
            }
            self.consume();
        }
        let inner = &self.input[start..self.position];
        if self.consume() != Some(']') {
            return Some(None);
        }
        Some(inner.parse::<usize>().ok().filter(|index| *index > 0))
    }

    fn parse_flags(&mut self) -> Flags {
        let mut flags = Flags::default();
        while let Some(c) = self.peek() {
            match c {
                '-' => flags.minus = true,
                '+' => flags.plus = true,
                '0' => flags.zero = true,
                '#' => flags.sharp = true,
                ' ' => flags.space = true,
                _ => break,
            }
            self.consume();
        }
        flags
    }

    /// Parses a verb starting at `%` into `template`.
    ///
    /// `%%` becomes a literal percent sign. An oversized width or precision
    /// adds a marker node ahead of the verb.
    fn parse_verb(&mut self, template: &mut Template) {
        self.consume(); // Consume '%'
        if self.peek() == Some('%') {
            self.consume();
            template.push(TemplateNode::Text("%".to_string()));
            return;
        }

        let flags = self.parse_flags();
        let mut index = match self.parse_index() {
            Some(None) => {
                template.push(TemplateNode::BadIndex);
                return;
            }
            Some(found) => found,
            None => None,
        };
        let width = match self.parse_number() {
            Some(None) => {
                template.push(TemplateNode::BadWidth);
                None
            }
            Some(found) => found,
            None => None,
        };
        let mut precision = None;
        if self.peek() == Some('.') {
            self.consume();
            precision = match self.parse_number() {
                Some(None) => {
                    template.push(TemplateNode::BadPrecision);
                    None
                }
                Some(found) => found,
                None => Some(0),
            };
        }
        match self.parse_index() {
            Some(None) => {
                template.push(TemplateNode::BadIndex);
                return;
            }
            Some(found) => index = found,
            None => {}
        }

        let node = match self.consume() {
            Some(verb) => TemplateNode::Verb(Verb {
                flags,
                width,
                precision,
                index,
                verb,
            }),
            None => TemplateNode::NoVerb,
        };
        template.push(node);
    }

    pub fn parse(&mut self) -> Template {
        let mut template = Template::new();
        while self.position < self.input.len() {
            match self.peek() {
                Some('%') => self.parse_verb(&mut template),
                _ => template.push(self.parse_text()),
            }
        }
        template
    }
}
