//! Locale-aware printf-style formatting with conditional plural templates.
//!
//! A call carries a default template and its positional arguments. When the last
//! argument is a rule set built by [`plural`], the rules choose a replacement
//! template by comparing arguments against fixed numbers, and only the
//! arguments that template needs are passed on to the locale's engine.
//!
//! ```
//! use i18n_printer::{PrinterPool, args, plural};
//!
//! let pool = PrinterPool::new();
//! let printer = pool.acquire("en");
//! let rules = plural(&["[1]d=1", "you have one item", "[1]d>1", "you have %d items"]);
//!
//! let one = printer.sprintf("you have no items", &args![1, rules.clone()]).unwrap();
//! assert_eq!(one, "you have one item");
//! let many = printer.sprintf("you have no items", &args![1200, rules.clone()]).unwrap();
//! assert_eq!(many, "you have 1,200 items");
//! let none = printer.sprintf("you have no items", &args![0, rules]).unwrap();
//! assert_eq!(none, "you have no items");
//! ```

pub mod args;
pub mod engine;
pub mod error;
pub mod locale;
pub mod pool;
pub mod preprocess;
pub mod printer;
pub mod rule;
pub mod template;

#[cfg(test)]
mod integration_tests;

pub use args::Arg;
pub use engine::{EngineFactory, FormatEngine, IcuEngine, IcuEngineFactory};
pub use error::{PrinterError, PrinterResult};
pub use locale::LocaleInput;
pub use pool::{PoolConfig, PooledPrinter, PrinterPool};
pub use preprocess::{Resolved, preprocess};
pub use printer::Printer;
pub use rule::{Operator, PluralRule, RuleSet, plural};
pub use template::{Template, TemplateNode};
