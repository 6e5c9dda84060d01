//! Leaf operator: resolves a registered table by name (spec.md §4.8).

use std::sync::Arc;

use storage::Table;
use storage_manager::StorageManager;

use crate::error::Result;

#[derive(Debug)]
pub struct GetTable {
    table_name: String,
}

impl GetTable {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Fails if no table named `table_name` is registered.
    pub fn execute(&self, storage_manager: &StorageManager) -> Result<Arc<Table>> {
        Ok(storage_manager.get_table(&self.table_name)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use column_types::ColumnDataType;

    #[test]
    fn resolves_registered_table() {
        let sm = StorageManager::new();
        let table = Arc::new(Table::new(0));
        table.add_column("pk", ColumnDataType::Int).unwrap();
        sm.add_table("foobar", table).unwrap();

        let resolved = GetTable::new("foobar").execute(&sm).unwrap();
        assert_eq!(resolved.col_count(), 1);
    }

    #[test]
    fn unknown_table_fails() {
        let sm = StorageManager::new();
        assert!(GetTable::new("nope").execute(&sm).is_err());
    }
}
