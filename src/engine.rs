//! Formatting engines
//!
//! A printer never renders text itself. It hands the resolved template and
//! arguments to a [`FormatEngine`] created for its locale by an
//! [`EngineFactory`]. The crate ships [`IcuEngine`], a printf-style renderer
//! whose numbers follow the locale's CLDR separators through ICU4X.
//!
//! # Verbs
//!
//! | verb | arguments | output |
//! |------|-----------|--------|
//! | `%v` | any | default form, numbers localized |
//! | `%d` | integers, chars | localized integer |
//! | `%f` `%F` | floats | localized fixed point, precision 6 unless given |
//! | `%s` | strings | the string, cut to the precision if one is given |
//! | `%q` | strings, chars | quoted and escaped |
//! | `%x` `%X` `%o` `%b` | integers (`%x`/`%X` also strings) | radix digits |
//! | `%c` | integers, chars | the character |
//! | `%t` | bools | `true` / `false` |
//!
//! Mistakes are rendered inline rather than reported: `%!d(MISSING)`,
//! `%!d(str=abc)`, `%!(BADINDEX)`, `%!(NOVERB)` and `%!(EXTRA int=3)`. A width
//! or precision above [`MAX_WIDTH`] renders `%!(BADWIDTH)` or `%!(BADPREC)`
//! and the verb is formatted without it.

use std::fmt;
use std::io;

use fixed_decimal::Decimal;
use icu_decimal::DecimalFormatter;
use icu_decimal::options::DecimalFormatterOptions;
use icu_locale::Locale;

use crate::args::Arg;
use crate::template::{MAX_WIDTH, Template, TemplateNode, Verb};

/// Renders resolved templates for one locale.
pub trait FormatEngine: Send {
    /// The locale this engine was created for
    fn locale(&self) -> &Locale;

    /// Render `template` with `args`.
    fn format(&self, template: &str, args: &[Arg]) -> String;

    /// Render into `out`, returning the number of bytes written.
    fn write_to(&self, out: &mut dyn io::Write, template: &str, args: &[Arg]) -> io::Result<usize> {
        let text = self.format(template, args);
        out.write_all(text.as_bytes())?;
        Ok(text.len())
    }
}

/// Creates a fresh engine each time a printer is bound to a locale.
pub trait EngineFactory: Send + Sync {
    fn new_engine(&self, locale: &Locale) -> Box<dyn FormatEngine>;
}

/// Factory for [`IcuEngine`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IcuEngineFactory;

impl EngineFactory for IcuEngineFactory {
    fn new_engine(&self, locale: &Locale) -> Box<dyn FormatEngine> {
        Box::new(IcuEngine::new(locale.clone()))
    }
}

/// printf-style engine with ICU4X number formatting.
pub struct IcuEngine {
    locale: Locale,
    decimals: Option<DecimalFormatter>,
}

impl IcuEngine {
    /// Load the locale's decimal data. Without it, numbers print as plain digits.
    pub fn new(locale: Locale) -> Self {
        let decimals = DecimalFormatter::try_new(
            locale.clone().into(),
            DecimalFormatterOptions::default(),
        )
        .map_err(|e| {
            tracing::debug!(locale = %locale, error = %e, "no decimal data, using plain digits");
        })
        .ok();
        IcuEngine { locale, decimals }
    }

    /// Format an unsigned decimal string such as `1234` or `1234.50`.
    fn digits(&self, plain: &str) -> String {
        let Some(formatter) = &self.decimals else {
            return plain.to_string();
        };
        match plain.parse::<Decimal>() {
            Ok(decimal) => formatter.format(&decimal).to_string(),
            Err(_) => plain.to_string(),
        }
    }
}

impl fmt::Debug for IcuEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IcuEngine")
            .field("locale", &self.locale)
            .field("localized", &self.decimals.is_some())
            .finish()
    }
}

impl FormatEngine for IcuEngine {
    fn locale(&self) -> &Locale {
        &self.locale
    }

    fn format(&self, template: &str, args: &[Arg]) -> String {
        let template = Template::parse(template);
        let mut result = String::new();
        let mut next = 0;

        for node in &template {
            match node {
                TemplateNode::Text(text) => result.push_str(text),
                TemplateNode::BadIndex => result.push_str("%!(BADINDEX)"),
                TemplateNode::NoVerb => result.push_str("%!(NOVERB)"),
                TemplateNode::BadWidth => result.push_str("%!(BADWIDTH)"),
                TemplateNode::BadPrecision => result.push_str("%!(BADPREC)"),
                TemplateNode::Verb(verb) => {
                    let slot = verb.index.map_or(next, |index| index - 1);
                    match args.get(slot) {
                        Some(arg) => {
                            let rendered = render_verb(verb, arg, self);
                            result.push_str(&pad(rendered, verb));
                            next = slot + 1;
                        }
                        None if verb.index.is_some() => {
                            result.push_str(&format!("%!{}(BADINDEX)", verb.verb));
                        }
                        None => result.push_str(&format!("%!{}(MISSING)", verb.verb)),
                    }
                }
            }
        }

        if !template.is_reordered() && next < args.len() {
            let extra: Vec<String> = args[next..].iter().map(describe).collect();
            result.push_str(&format!("%!(EXTRA {})", extra.join(", ")));
        }
        result
    }
}

fn describe(arg: &Arg) -> String {
    format!("{}={}", arg.type_name(), arg)
}

fn bad_verb(verb: &Verb, arg: &Arg) -> String {
    format!("%!{}({})", verb.verb, describe(arg))
}

fn render_verb(verb: &Verb, arg: &Arg, numbers: &IcuEngine) -> String {
    match (verb.verb, arg) {
        ('v' | 'd', Arg::Int(value)) => {
            signed(verb, *value < 0, numbers.digits(&value.unsigned_abs().to_string()))
        }
        ('v' | 'd', Arg::Uint(value)) => signed(verb, false, numbers.digits(&value.to_string())),
        ('d', Arg::Char(c)) => signed(verb, false, numbers.digits(&u32::from(*c).to_string())),
        ('v', Arg::Float(value)) => float(verb, *value, None, numbers),
        ('f' | 'F', Arg::Float(value)) => float(verb, *value, Some(verb.precision.unwrap_or(6)), numbers),
        ('v' | 's', Arg::Str(text)) => match verb.precision {
            Some(precision) => text.chars().take(precision).collect(),
            None => text.clone(),
        },
        ('q', Arg::Str(text)) => format!("{text:?}"),
        ('q', Arg::Char(c)) => format!("{c:?}"),
        ('v' | 'c', Arg::Char(c)) => c.to_string(),
        ('c', Arg::Int(_) | Arg::Uint(_)) => arg
            .as_integer()
            .and_then(|code| u32::try_from(code).ok())
            .and_then(char::from_u32)
            .map_or_else(|| '\u{FFFD}'.to_string(), |c| c.to_string()),
        ('v' | 't', Arg::Bool(value)) => value.to_string(),
        ('v', Arg::Plural(rules)) => rules.to_string(),
        ('x' | 'X' | 'o' | 'b', Arg::Int(_) | Arg::Uint(_)) => radix(verb, arg),
        ('x' | 'X', Arg::Str(text)) => {
            let hex: String = text.bytes().map(|b| format!("{b:02x}")).collect();
            if verb.verb == 'X' { hex.to_uppercase() } else { hex }
        }
        _ => bad_verb(verb, arg),
    }
}

fn float(verb: &Verb, value: f64, precision: Option<usize>, numbers: &IcuEngine) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return signed(verb, value < 0.0, "Inf".to_string());
    }
    let magnitude = value.abs();
    let plain = match precision {
        Some(precision) => {
            let precision = precision.min(MAX_WIDTH);
            format!("{magnitude:.precision$}")
        }
        None => format!("{magnitude}"),
    };
    signed(verb, value.is_sign_negative() && value != 0.0, numbers.digits(&plain))
}

/// Attach the sign and apply zero padding to rendered digits.
fn signed(verb: &Verb, negative: bool, digits: String) -> String {
    let sign = if negative {
        "-"
    } else if verb.flags.plus {
        "+"
    } else if verb.flags.space {
        " "
    } else {
        ""
    };
    let mut result = sign.to_string();
    if verb.flags.zero && !verb.flags.minus {
        let width = verb.width.unwrap_or(0).min(MAX_WIDTH);
        let used = sign.chars().count() + digits.chars().count();
        result.push_str(&"0".repeat(width.saturating_sub(used)));
    }
    result.push_str(&digits);
    result
}

fn radix(verb: &Verb, arg: &Arg) -> String {
    let (negative, magnitude) = match arg {
        Arg::Int(value) => (*value < 0, value.unsigned_abs()),
        Arg::Uint(value) => (false, *value),
        _ => return bad_verb(verb, arg),
    };
    let (prefix, digits) = match verb.verb {
        'x' => ("0x", format!("{magnitude:x}")),
        'X' => ("0X", format!("{magnitude:X}")),
        'o' => ("0", format!("{magnitude:o}")),
        _ => ("0b", format!("{magnitude:b}")),
    };
    let digits = if verb.flags.sharp {
        format!("{prefix}{digits}")
    } else {
        digits
    };
    signed(verb, negative, digits)
}

fn pad(rendered: String, verb: &Verb) -> String {
    let Some(width) = verb.width.map(|width| width.min(MAX_WIDTH)) else {
        return rendered;
    };
    let len = rendered.chars().count();
    if len >= width {
        return rendered;
    }
    let fill = " ".repeat(width - len);
    if verb.flags.minus {
        rendered + &fill
    } else {
        fill + &rendered
    }
}
