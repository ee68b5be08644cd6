//! Locale-bound printer handles
//!
//! A [`Printer`] pairs an exclusive lock with the engine currently bound to it.
//! Printers normally come from a [`PrinterPool`](crate::PrinterPool), which
//! rebinds a fresh engine on every acquisition and unbinds it on release.

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use icu_locale::Locale;
use parking_lot::Mutex;

use crate::args::Arg;
use crate::engine::{EngineFactory, FormatEngine, IcuEngineFactory};
use crate::error::{PrinterError, PrinterResult};
use crate::locale::LocaleInput;
use crate::preprocess::preprocess;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

pub struct Printer {
    id: u64,
    binding: Mutex<Option<Box<dyn FormatEngine>>>,
}

impl Printer {
    /// Create an unpooled printer using the ICU engine.
    pub fn new(locale: impl Into<LocaleInput>) -> Self {
        let locale = locale.into().resolve();
        Printer::with_engine(IcuEngineFactory.new_engine(&locale))
    }

    /// Create an unpooled printer around an existing engine.
    pub fn with_engine(engine: Box<dyn FormatEngine>) -> Self {
        let mut printer = Printer::unbound();
        printer.bind(engine);
        printer
    }

    pub(crate) fn unbound() -> Self {
        Printer {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            binding: Mutex::new(None),
        }
    }

    /// Replace the engine wholesale.
    pub(crate) fn bind(&mut self, engine: Box<dyn FormatEngine>) {
        *self.binding.get_mut() = Some(engine);
    }

    pub(crate) fn unbind(&mut self) {
        *self.binding.get_mut() = None;
    }

    /// Identifier of this handle; stable across pool reuse.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_bound(&self) -> bool {
        self.binding.lock().is_some()
    }

    /// Locale of the bound engine.
    pub fn locale(&self) -> Option<Locale> {
        self.binding.lock().as_ref().map(|engine| engine.locale().clone())
    }

    /// Format to a `String`, like `format!`.
    ///
    /// A trailing [`Arg::Plural`] picks the template; see
    /// [`preprocess`](crate::preprocess()).
    ///
    /// ```
    /// use i18n_printer::{Printer, args, plural};
    ///
    /// let printer = Printer::new("en");
    /// let rules = plural(&["[1]d=1", "one file", "[1]d>1", "%d files"]);
    /// assert_eq!(printer.sprintf("no files", &args![1, rules.clone()]).unwrap(), "one file");
    /// assert_eq!(printer.sprintf("no files", &args![2500, rules]).unwrap(), "2,500 files");
    /// ```
    pub fn sprintf(&self, format: &str, args: &[Arg]) -> PrinterResult<String> {
        let resolved = preprocess(format, args)?;
        let binding = self.binding.lock();
        let engine = binding.as_ref().ok_or(PrinterError::Unbound)?;
        Ok(engine.format(resolved.format, resolved.args))
    }

    /// Format into `out`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// Rule faults as for [`sprintf`](Self::sprintf); write failures are
    /// returned as [`PrinterError::Io`].
    pub fn fprintf(&self, out: &mut dyn Write, format: &str, args: &[Arg]) -> PrinterResult<usize> {
        let resolved = preprocess(format, args)?;
        let binding = self.binding.lock();
        let engine = binding.as_ref().ok_or(PrinterError::Unbound)?;
        Ok(engine.write_to(out, resolved.format, resolved.args)?)
    }

    /// Format to stdout, like `print!`.
    ///
    /// # Panics
    ///
    /// Panics if formatting fails or stdout cannot be written.
    pub fn printf(&self, format: &str, args: &[Arg]) {
        let mut stdout = io::stdout().lock();
        if let Err(e) = self.fprintf(&mut stdout, format, args) {
            panic!("failed printing to stdout: {e}");
        }
    }
}

impl fmt::Debug for Printer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Printer")
            .field("id", &self.id)
            .field("locale", &self.locale())
            .finish()
    }
}
