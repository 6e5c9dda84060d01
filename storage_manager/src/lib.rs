//! The process-wide table registry (spec.md §6). A name maps to at
//! most one [`storage::Table`]; callers get shared ownership of the
//! table behind an `Arc` so query operators can hold onto it after it
//! is dropped from the registry.

mod error;

use std::fmt::Write;
use std::sync::Arc;

use hashbrown::HashMap;
use observability_deps::tracing::debug;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use storage::Table;

pub use error::{Error, Result};
use error::{TableAlreadyExistsSnafu, TableNotFoundSnafu};

#[derive(Default)]
struct Inner {
    tables: HashMap<String, Arc<Table>>,
    /// Preserves insertion order for `table_names()`/`print()`,
    /// matching the original source's iteration order over its
    /// ordered map.
    order: Vec<String>,
}

/// A table registry. The teacher's `Catalog` (db/src/catalog.rs)
/// keeps its table map behind a `parking_lot::RwLock`; this follows
/// the same shape, but keyed by plain table name rather than a
/// partition/chunk hierarchy.
#[derive(Default)]
pub struct StorageManager {
    inner: RwLock<Inner>,
}

impl StorageManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails if `name` is already registered.
    pub fn add_table(&self, name: impl Into<String>, table: Arc<Table>) -> Result<()> {
        let name = name.into();
        let mut inner = self.inner.write();
        if inner.tables.contains_key(&name) {
            return TableAlreadyExistsSnafu { name }.fail();
        }
        debug!(%name, "registering table");
        inner.order.push(name.clone());
        inner.tables.insert(name, table);
        Ok(())
    }

    /// Fails if `name` is not registered.
    pub fn drop_table(&self, name: &str) -> Result<()> {
        let mut inner = self.inner.write();
        if inner.tables.remove(name).is_none() {
            return TableNotFoundSnafu { name }.fail();
        }
        inner.order.retain(|n| n != name);
        debug!(%name, "dropped table");
        Ok(())
    }

    /// Fails if `name` is not registered.
    pub fn get_table(&self, name: &str) -> Result<Arc<Table>> {
        self.inner
            .read()
            .tables
            .get(name)
            .cloned()
            .ok_or_else(|| TableNotFoundSnafu { name }.build())
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.inner.read().tables.contains_key(name)
    }

    /// Table names in registration order.
    pub fn table_names(&self) -> Vec<String> {
        self.inner.read().order.clone()
    }

    /// Atomically replaces the registry with an empty one.
    pub fn reset(&self) {
        let mut inner = self.inner.write();
        *inner = Inner::default();
    }

    /// Writes one line per registered table:
    /// `Table "<name>": <col_count> columns, <row_count> rows, <chunk_count> chunks`
    pub fn print(&self, out: &mut impl Write) -> std::fmt::Result {
        let inner = self.inner.read();
        for name in &inner.order {
            let table = &inner.tables[name];
            writeln!(
                out,
                "Table \"{}\": {} columns, {} rows, {} chunks",
                name,
                table.col_count(),
                table.row_count(),
                table.chunk_count()
            )?;
        }
        Ok(())
    }
}

static GLOBAL: OnceCell<StorageManager> = OnceCell::new();

/// The one process-wide instance (spec.md §6). Most code should
/// prefer an explicit `StorageManager` threaded through a context;
/// this accessor exists for callers (and tests mirroring the original
/// `StorageManager::get()`) that want the singleton directly.
pub fn global() -> &'static StorageManager {
    GLOBAL.get_or_init(StorageManager::new)
}
