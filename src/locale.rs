use icu_locale::{Locale, locale};

/// A locale given either as a parsed tag or as a raw identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum LocaleInput {
    Tag(Locale),
    Raw(String),
}

impl LocaleInput {
    /// Resolve to a [`Locale`]. Identifiers that do not parse become `und`.
    pub fn resolve(self) -> Locale {
        match self {
            LocaleInput::Tag(locale) => locale,
            LocaleInput::Raw(raw) => raw.trim().parse::<Locale>().unwrap_or_else(|e| {
                tracing::debug!(locale = %raw, error = %e, "unparseable locale, using und");
                locale!("und")
            }),
        }
    }
}

impl From<Locale> for LocaleInput {
    fn from(locale: Locale) -> Self {
        LocaleInput::Tag(locale)
    }
}

impl From<&Locale> for LocaleInput {
    fn from(locale: &Locale) -> Self {
        LocaleInput::Tag(locale.clone())
    }
}

impl From<&str> for LocaleInput {
    fn from(raw: &str) -> Self {
        LocaleInput::Raw(raw.to_string())
    }
}

impl From<String> for LocaleInput {
    fn from(raw: String) -> Self {
        LocaleInput::Raw(raw)
    }
}
