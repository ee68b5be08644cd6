//! Plural rule compilation
//!
//! A rule set is built from a flat list of `(expression, template)` pairs:
//!
//! ```
//! use i18n_printer::plural;
//!
//! let rules = plural(&["[1]d=1", "you have one item", "[1]d>1", "you have %d items"]);
//! assert_eq!(rules.len(), 2);
//! ```
//!
//! An expression has the shape `[<position>]<c><op><threshold>`. `position` is the
//! 1-indexed argument to test, `<c>` is a single verb character that is ignored,
//! `op` is `=` or `>` and `threshold` is an unsigned integer at the very end of the
//! expression. Whitespace is allowed around the operator.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static EXPRESSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([0-9]+)\][^=>]\s*([=>])\s*([0-9]+)$").expect("plural expression pattern is valid")
});

/// Comparison applied between an argument and a rule's threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// `=`: the argument equals the threshold
    #[serde(rename = "=")]
    Eq,
    /// `>`: the argument is strictly greater than the threshold
    #[serde(rename = ">")]
    Gt,
}

impl Operator {
    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" => Some(Operator::Eq),
            ">" => Some(Operator::Gt),
            _ => None,
        }
    }

    /// Compare `value` against `threshold`.
    pub fn holds(self, value: i128, threshold: i64) -> bool {
        let threshold = i128::from(threshold);
        match self {
            Operator::Eq => value == threshold,
            Operator::Gt => value > threshold,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Eq => write!(f, "="),
            Operator::Gt => write!(f, ">"),
        }
    }
}

/// "If argument `position` satisfies `operator threshold`, use `template`."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluralRule {
    /// 1-indexed position into the positional arguments
    pub position: usize,
    pub operator: Operator,
    pub threshold: i64,
    pub template: String,
}

impl PluralRule {
    /// Parse a single expression, pairing it with `template` when it matches.
    pub fn parse(expression: &str, template: &str) -> Option<Self> {
        let captures = EXPRESSION.captures(expression)?;
        let position = captures[1].parse::<usize>().ok()?;
        let operator = Operator::from_symbol(&captures[2])?;
        let threshold = captures[3].parse::<i64>().ok()?;
        Some(PluralRule {
            position,
            operator,
            threshold,
            template: template.to_string(),
        })
    }
}

impl fmt::Display for PluralRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}]{}{} => {:?}",
            self.position, self.operator, self.threshold, self.template
        )
    }
}

/// Ordered plural rules, evaluated first-match-wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet(pub Vec<PluralRule>);

impl RuleSet {
    pub fn new() -> Self {
        RuleSet(Vec::new())
    }

    pub fn push(&mut self, rule: PluralRule) {
        self.0.push(rule);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PluralRule> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PluralRule> {
        self.0.iter()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, rule) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{rule}")?;
        }
        write!(f, "]")
    }
}

impl IntoIterator for RuleSet {
    type Item = PluralRule;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a PluralRule;
    type IntoIter = std::slice::Iter<'a, PluralRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<PluralRule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = PluralRule>>(iter: I) -> Self {
        RuleSet(iter.into_iter().collect())
    }
}

/// Compile interleaved `(expression, template)` pairs into a [`RuleSet`].
///
/// Parsing is best effort. An expression that does not match the grammar is
/// skipped on its own: the scan resumes at the item right after it, so that
/// item is read as the next expression rather than as the failed one's
/// template. A trailing expression without a template is ignored. Neither
/// case is reported to the caller.
pub fn plural<S: AsRef<str>>(cases: &[S]) -> RuleSet {
    let mut rules = RuleSet::new();
    let mut i = 0;
    while i + 1 < cases.len() {
        let expression = cases[i].as_ref();
        let template = cases[i + 1].as_ref();
        match PluralRule::parse(expression, template) {
            Some(rule) => {
                rules.push(rule);
                i += 2;
            }
            None => {
                tracing::debug!(expression, "skipping malformed plural expression");
                i += 1;
            }
        }
    }
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_equality() {
        let rule = PluralRule::parse("[1]d=1", "one").unwrap();
        assert_eq!(
            rule,
            PluralRule {
                position: 1,
                operator: Operator::Eq,
                threshold: 1,
                template: "one".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_whitespace_and_prefix() {
        let rule = PluralRule::parse("%[2]d > 10", "many").unwrap();
        assert_eq!(rule.position, 2);
        assert_eq!(rule.operator, Operator::Gt);
        assert_eq!(rule.threshold, 10);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for expression in [
            "bad-expr",
            "[1]=1",
            "[1]d<1",
            "[1]d=1x",
            "[x]d=1",
            "[1]d=",
            "1d=1",
            "[1]d=99999999999999999999",
        ] {
            assert!(
                PluralRule::parse(expression, "t").is_none(),
                "{expression} should not parse"
            );
        }
    }

    #[test]
    fn test_parse_ascii_digits_only() {
        // Arabic-Indic and fullwidth digits
        for expression in ["[\u{0661}]d=1", "[1]d=\u{0663}", "[\u{FF11}]d>\u{FF12}"] {
            assert!(
                PluralRule::parse(expression, "t").is_none(),
                "{expression} should not parse"
            );
        }
    }

    #[test]
    fn test_plural_preserves_order() {
        let rules = plural(&["[1]d=1", "one", "[1]d>1", "many", "[2]s=0", "none"]);
        let templates: Vec<&str> = rules.iter().map(|r| r.template.as_str()).collect();
        assert_eq!(templates, vec!["one", "many", "none"]);
    }

    #[test]
    fn test_plural_skips_malformed_pair() {
        let rules = plural(&["bad-expr", "X", "[2]d=1", "Y"]);
        assert_eq!(rules.len(), 1);
        let rule = rules.get(0).unwrap();
        assert_eq!(rule.position, 2);
        assert_eq!(rule.template, "Y");
    }

    #[test]
    fn test_plural_resumes_after_failed_expression() {
        // The failed expression is skipped alone; its neighbour is read next.
        let rules = plural(&["bad", "[1]d=1", "T"]);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.get(0).unwrap().template, "T");

        let rules = plural(&["bad", "[1]d=1"]);
        assert!(rules.is_empty());
    }

    #[test]
    fn test_plural_edge_inputs() {
        let empty: [&str; 0] = [];
        assert!(plural(&empty).is_empty());
        assert!(plural(&["[1]d=1"]).is_empty());
        assert_eq!(plural(&["[1]d=1", "one", "[1]d>1"]).len(), 1);
        assert!(plural(&["a", "b", "c", "d"]).is_empty());
    }

    #[test]
    fn test_operator_holds() {
        assert!(Operator::Eq.holds(1, 1));
        assert!(!Operator::Eq.holds(2, 1));
        assert!(Operator::Gt.holds(2, 1));
        assert!(!Operator::Gt.holds(1, 1));
        assert!(Operator::Gt.holds(i128::from(u64::MAX), i64::MAX));
    }

    #[test]
    fn test_display() {
        let rules = plural(&["[1]d=1", "one", "[1]d>1", "many"]);
        assert_eq!(
            rules.to_string(),
            "[[1]=1 => \"one\", [1]>1 => \"many\"]"
        );
    }
}
