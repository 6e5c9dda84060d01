//! Small test-only helpers shared by the columnar storage workspace's
//! crates, so individual test modules don't each reinvent them.

/// Asserts that `$result` is an `Err` whose value matches `$pattern`,
/// printing the actual value on failure instead of just panicking
/// with "assertion failed".
#[macro_export]
macro_rules! assert_error {
    ($result:expr, $pattern:pat) => {
        match $result {
            Err($pattern) => {}
            other => panic!(
                "expected Err matching {}, got {:?}",
                stringify!($pattern),
                other
            ),
        }
    };
}
