//! Reuse pool for printer handles
//!
//! ```
//! use i18n_printer::{PrinterPool, args};
//!
//! let pool = PrinterPool::new();
//! let printer = pool.acquire("en-US");
//! assert_eq!(printer.sprintf("%d", &args![1234]).unwrap(), "1,234");
//! printer.release();
//! assert_eq!(pool.idle(), 1);
//! ```

use std::fmt;
use std::mem;
use std::ops::Deref;
use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;
use serde::Deserialize;

use crate::engine::{EngineFactory, IcuEngineFactory};
use crate::locale::LocaleInput;
use crate::printer::Printer;

static SHARED: LazyLock<PrinterPool> = LazyLock::new(PrinterPool::new);

/// Pool settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Most idle printers kept for reuse; `None` keeps all of them.
    pub max_idle: Option<usize>,
}

pub struct PrinterPool {
    free: Mutex<Vec<Printer>>,
    config: PoolConfig,
    factory: Arc<dyn EngineFactory>,
}

impl PrinterPool {
    /// Unbounded pool of ICU-backed printers.
    pub fn new() -> Self {
        PrinterPool::with_config(PoolConfig::default())
    }

    pub fn with_config(config: PoolConfig) -> Self {
        PrinterPool::with_factory(config, IcuEngineFactory)
    }

    /// Pool whose printers are bound to engines from `factory`.
    pub fn with_factory(config: PoolConfig, factory: impl EngineFactory + 'static) -> Self {
        PrinterPool {
            free: Mutex::new(Vec::new()),
            config,
            factory: Arc::new(factory),
        }
    }

    /// Process-wide pool for callers that do not manage their own.
    pub fn shared() -> &'static PrinterPool {
        &SHARED
    }

    /// Take an idle printer, or create one, and bind it to a new engine for `locale`.
    ///
    /// The printer belongs to the caller until it is released or dropped.
    pub fn acquire(&self, locale: impl Into<LocaleInput>) -> PooledPrinter<'_> {
        let locale = locale.into().resolve();
        let engine = self.factory.new_engine(&locale);
        let reused = self.free.lock().pop();
        let mut printer = reused.unwrap_or_else(Printer::unbound);
        printer.bind(engine);
        tracing::trace!(printer = printer.id(), locale = %locale, "acquired printer");
        PooledPrinter {
            printer,
            pool: self,
        }
    }

    fn put_back(&self, mut printer: Printer) {
        printer.unbind();
        let mut free = self.free.lock();
        if self.config.max_idle.is_some_and(|max| free.len() >= max) {
            tracing::trace!(printer = printer.id(), "pool full, dropping printer");
            return;
        }
        tracing::trace!(printer = printer.id(), "released printer");
        free.push(printer);
    }

    /// Number of printers waiting for reuse.
    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }
}

impl Default for PrinterPool {
    fn default() -> Self {
        PrinterPool::new()
    }
}

impl fmt::Debug for PrinterPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrinterPool")
            .field("idle", &self.idle())
            .field("config", &self.config)
            .finish()
    }
}

/// A printer on loan from a [`PrinterPool`]. Returns to the pool when dropped.
pub struct PooledPrinter<'p> {
    printer: Printer,
    pool: &'p PrinterPool,
}

impl PooledPrinter<'_> {
    /// Hand the printer back to its pool. Its engine is discarded.
    pub fn release(self) {
        drop(self);
    }
}

impl Deref for PooledPrinter<'_> {
    type Target = Printer;

    fn deref(&self) -> &Printer {
        &self.printer
    }
}

impl Drop for PooledPrinter<'_> {
    fn drop(&mut self) {
        // The placeholder is unbound and dropped with the handle.
        let printer = mem::replace(&mut self.printer, Printer::unbound());
        self.pool.put_back(printer);
    }
}

impl fmt::Debug for PooledPrinter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PooledPrinter").field(&self.printer).finish()
    }
}
