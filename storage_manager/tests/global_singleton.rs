//! Exercises `storage_manager::global()` directly, kept as its own
//! integration test binary rather than a `#[cfg(test)]` module in
//! `lib.rs` so it's the only place touching process-wide shared state —
//! every other test in this crate builds its own `StorageManager::new()`
//! to avoid cross-test interference (SPEC_FULL.md §6).

use std::sync::Arc;

use storage::Table;
use storage_manager::global;

// A single test function: `global()` is process-wide shared state, so
// running these as separate `#[test]` functions would race under
// cargo's default parallel test execution.
#[test]
fn global_singleton() {
    let a = global();
    let b = global();
    assert!(std::ptr::eq(a, b));

    a.reset();
    a.add_table("global_test_table", Arc::new(Table::new(0)))
        .unwrap();
    assert!(b.has_table("global_test_table"));
    assert_eq!(b.get_table("global_test_table").unwrap().col_count(), 0);

    a.reset();
    assert!(!b.has_table("global_test_table"));
}
