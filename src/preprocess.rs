use crate::args::Arg;
use crate::error::{PrinterError, PrinterResult};
use crate::rule::RuleSet;

/// Template and arguments after plural selection, ready for an engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved<'a> {
    pub format: &'a str,
    pub args: &'a [Arg],
}

/// Select the template for a call and trim its arguments.
///
/// Without a trailing [`Arg::Plural`], `format` and `args` come back untouched.
/// With one, the rules are tried in order against the preceding positional
/// arguments and the first match supplies the template. The positional
/// arguments are then cut down to as many as the chosen template has `%`
/// characters, and the rule set itself is always dropped.
///
/// # Errors
///
/// A rule that points outside the positional arguments, or at an argument that
/// is not an integer, fails the call with [`PrinterError::RulePosition`] or
/// [`PrinterError::RuleArgument`].
pub fn preprocess<'a>(format: &'a str, args: &'a [Arg]) -> PrinterResult<Resolved<'a>> {
    let Some((Arg::Plural(rules), positional)) = args.split_last() else {
        return Ok(Resolved { format, args });
    };

    let format = select_template(format, rules, positional)?;
    let wanted = format.matches('%').count().min(positional.len());
    Ok(Resolved {
        format,
        args: &positional[..wanted],
    })
}

fn select_template<'a>(
    default: &'a str,
    rules: &'a RuleSet,
    positional: &[Arg],
) -> PrinterResult<&'a str> {
    for rule in rules {
        let arg = rule
            .position
            .checked_sub(1)
            .and_then(|index| positional.get(index))
            .ok_or(PrinterError::RulePosition {
                position: rule.position,
                available: positional.len(),
            })?;
        let value = arg.as_integer().ok_or(PrinterError::RuleArgument {
            position: rule.position,
            found: arg.type_name(),
        })?;
        if rule.operator.holds(value, rule.threshold) {
            return Ok(&rule.template);
        }
    }
    Ok(default)
}
