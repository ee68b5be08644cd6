//! End-to-end tests: rule compilation, template selection and pooled printers together.

use icu_locale::locale;
use proptest::prelude::*;

use crate::args::Arg;
use crate::pool::{PoolConfig, PrinterPool};
use crate::preprocess::preprocess;
use crate::rule::{Operator, plural};
use crate::args;

fn item_rules() -> crate::RuleSet {
    plural(&["[1]d=1", "you have one item", "[1]d>1", "you have many items"])
}

// ============================================================================
// Template selection
// ============================================================================

#[test]
fn test_one_item() {
    let list = args![1, item_rules()];
    let resolved = preprocess("you have %d items", &list).unwrap();
    assert_eq!(resolved.format, "you have one item");
    assert!(resolved.args.is_empty());
}

#[test]
fn test_many_items() {
    let list = args![5, item_rules()];
    let resolved = preprocess("you have %d items", &list).unwrap();
    assert_eq!(resolved.format, "you have many items");
    assert!(resolved.args.is_empty());
}

#[test]
fn test_no_rule_matches() {
    let list = args![0, item_rules()];
    let resolved = preprocess("you have %d items", &list).unwrap();
    assert_eq!(resolved.format, "you have %d items");
    assert_eq!(resolved.args, &[Arg::Int(0)]);

    let pool = PrinterPool::new();
    let printer = pool.acquire("en");
    assert_eq!(
        printer.sprintf("you have %d items", &list).unwrap(),
        "you have 0 items"
    );
}

#[test]
fn test_malformed_pair_dropped() {
    let rules = plural(&["bad-expr", "X", "[2]d=1", "Y"]);
    assert_eq!(rules.len(), 1);
    let rule = rules.get(0).unwrap();
    assert_eq!(rule.position, 2);
    assert_eq!(rule.operator, Operator::Eq);
    assert_eq!(rule.threshold, 1);
    assert_eq!(rule.template, "Y");

    let list = args!["ignored", 1, rules];
    let resolved = preprocess("default", &list).unwrap();
    assert_eq!(resolved.format, "Y");
}

// ============================================================================
// Pool discipline
// ============================================================================

#[test]
fn test_reacquired_printer_uses_new_locale() {
    let pool = PrinterPool::with_config(PoolConfig { max_idle: Some(1) });

    let printer = pool.acquire("fr");
    let id = printer.id();
    let french = printer.sprintf("%d", &args![1234567]).unwrap();
    assert!(!french.contains(','), "unexpected French output {french:?}");
    printer.release();

    let printer = pool.acquire("en-US");
    assert_eq!(printer.id(), id);
    assert_eq!(printer.locale(), Some(locale!("en-US")));
    assert_eq!(printer.sprintf("%d", &args![1234567]).unwrap(), "1,234,567");
    assert_eq!(printer.sprintf("%.2f", &args![1234.5]).unwrap(), "1,234.50");
}

#[test]
fn test_plural_through_pooled_printer() {
    let pool = PrinterPool::new();
    let rules = plural(&[
        "[2]d=0",
        "%s has no new messages",
        "[2]d=1",
        "%s has one new message",
        "[2]d>1",
        "%s has %d new messages",
    ]);

    let printer = pool.acquire("en");
    let render = |count: i64| {
        printer
            .sprintf("%s has %d messages", &args!["Kai", count, rules.clone()])
            .unwrap()
    };
    assert_eq!(render(0), "Kai has no new messages");
    assert_eq!(render(1), "Kai has one new message");
    assert_eq!(render(4200), "Kai has 4,200 new messages");
    assert_eq!(render(-1), "Kai has -1 messages");
}

#[test]
fn test_fprintf_and_sprintf_agree() {
    let pool = PrinterPool::new();
    let printer = pool.acquire("de");
    let list = args![3, item_rules()];
    let mut out: Vec<u8> = Vec::new();
    let written = printer.fprintf(&mut out, "default", &list).unwrap();
    let text = printer.sprintf("default", &list).unwrap();
    assert_eq!(written, text.len());
    assert_eq!(String::from_utf8(out).unwrap(), text);
}

// ============================================================================
// Properties
// ============================================================================

fn plain_args() -> impl Strategy<Value = Vec<Arg>> {
    proptest::collection::vec(
        prop_oneof![
            any::<i64>().prop_map(Arg::Int),
            any::<u64>().prop_map(Arg::Uint),
            "[a-z ]{0,8}".prop_map(Arg::Str),
            any::<bool>().prop_map(Arg::Bool),
        ],
        0..6,
    )
}

proptest! {
    #[test]
    fn resolved_args_match_percent_count(
        count in -3i64..10,
        extra in 0usize..5,
        first in "[a-z %]{0,12}",
        second in "[a-z %]{0,12}",
        fallback in "[a-z %]{0,12}",
    ) {
        let rules = plural(&["[1]d=1", first.as_str(), "[1]d>1", second.as_str()]);
        let mut list = args![count];
        list.extend((0..extra).map(|n| Arg::Uint(n as u64)));
        list.push(Arg::Plural(rules));

        let resolved = preprocess(&fallback, &list).unwrap();
        let expected = resolved.format.matches('%').count().min(list.len() - 1);
        prop_assert_eq!(resolved.args.len(), expected);
        prop_assert_eq!(resolved.args, &list[..expected]);
    }

    #[test]
    fn no_rules_is_identity(format in "\\PC{0,20}", list in plain_args()) {
        let resolved = preprocess(&format, &list).unwrap();
        prop_assert_eq!(resolved.format, format.as_str());
        prop_assert_eq!(resolved.args, &list[..]);
    }

    #[test]
    fn well_formed_pairs_keep_order(
        specs in proptest::collection::vec((1usize..9, any::<bool>(), 0u32..1000), 0..8)
    ) {
        let mut cases = Vec::new();
        for (i, (position, greater, threshold)) in specs.iter().enumerate() {
            let op = if *greater { '>' } else { '=' };
            cases.push(format!("[{position}]d{op}{threshold}"));
            cases.push(format!("template {i}"));
        }
        let rules = plural(&cases);
        prop_assert_eq!(rules.len(), specs.len());
        for (i, rule) in rules.iter().enumerate() {
            prop_assert_eq!(rule.position, specs[i].0);
            prop_assert_eq!(rule.template.clone(), format!("template {i}"));
        }
    }
}
