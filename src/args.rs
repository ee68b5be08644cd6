//! Positional formatting arguments
//!
//! Arguments are a closed set of variants. A trailing [`Arg::Plural`] carries the
//! rule set that selects the template; it is recognised by its tag alone, so an
//! ordinary value in the last position is never mistaken for rules.

use std::fmt;

use serde::Serialize;

use crate::rule::RuleSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arg {
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    Bool(bool),
    Char(char),
    Plural(RuleSet),
}

impl Arg {
    /// Short type name used in formatting error markers.
    pub fn type_name(&self) -> &'static str {
        match self {
            Arg::Int(_) => "int",
            Arg::Uint(_) => "uint",
            Arg::Float(_) => "float",
            Arg::Str(_) => "str",
            Arg::Bool(_) => "bool",
            Arg::Char(_) => "char",
            Arg::Plural(_) => "plural",
        }
    }

    /// Integer value, if this argument holds one.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Arg::Int(value) => Some(i128::from(*value)),
            Arg::Uint(value) => Some(i128::from(*value)),
            _ => None,
        }
    }

    pub fn as_rules(&self) -> Option<&RuleSet> {
        match self {
            Arg::Plural(rules) => Some(rules),
            _ => None,
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Int(value) => write!(f, "{value}"),
            Arg::Uint(value) => write!(f, "{value}"),
            Arg::Float(value) => write!(f, "{value}"),
            Arg::Str(value) => write!(f, "{value}"),
            Arg::Bool(value) => write!(f, "{value}"),
            Arg::Char(value) => write!(f, "{value}"),
            Arg::Plural(rules) => write!(f, "{rules}"),
        }
    }
}

macro_rules! impl_from {
    ($variant:ident, $target:ty, $($source:ty),+) => {
        $(
            impl From<$source> for Arg {
                fn from(value: $source) -> Self {
                    Arg::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

impl_from!(Int, i64, i8, i16, i32, i64);
impl_from!(Uint, u64, u8, u16, u32, u64);
impl_from!(Float, f64, f32, f64);
impl_from!(Bool, bool, bool);
impl_from!(Char, char, char);
impl_from!(Str, String, String, &str, &String);
impl_from!(Plural, RuleSet, RuleSet);

impl From<usize> for Arg {
    fn from(value: usize) -> Self {
        Arg::Uint(value as u64)
    }
}

impl From<isize> for Arg {
    fn from(value: isize) -> Self {
        Arg::Int(value as i64)
    }
}

/// Build a `Vec<Arg>` from heterogeneous values.
///
/// ```
/// use i18n_printer::{Arg, args, plural};
///
/// let list = args![3, "apples", plural(&["[1]d=1", "one apple"])];
/// assert_eq!(list[0], Arg::Int(3));
/// assert!(list[2].as_rules().is_some());
/// ```
#[macro_export]
macro_rules! args {
    ($($value:expr),* $(,)?) => {
        ::std::vec![$($crate::Arg::from($value)),*]
    };
}
