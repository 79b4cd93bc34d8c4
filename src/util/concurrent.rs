//! Order-preserving parallel map.

use anyhow::Result;
use rayon::prelude::*;

/// Apply `f` to every item using the rayon pool.
///
/// Results come back in input order no matter which invocation finishes
/// first. Every invocation runs to completion; if any failed, the error of
/// the lowest failing index is returned.
pub fn concurrent_map<T, U, F>(items: &[T], f: F) -> Result<Vec<U>>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> Result<U> + Sync + Send,
{
    let results: Vec<Result<U>> = items.par_iter().map(f).collect();
    results.into_iter().collect()
}

/// Sequential counterpart of [`concurrent_map`] with identical semantics.
///
/// Used when parallel resolution is disabled in the user configuration.
pub fn sequential_map<T, U, F>(items: &[T], f: F) -> Result<Vec<U>>
where
    F: Fn(&T) -> Result<U>,
{
    let results: Vec<Result<U>> = items.iter().map(f).collect();
    results.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_preserves_order() {
        let items: Vec<u64> = (0..64).collect();

        // Earlier items sleep longer so they finish last
        let result = concurrent_map(&items, |i| {
            thread::sleep(Duration::from_micros(64 - i));
            Ok(i * 2)
        })
        .unwrap();

        let expected: Vec<u64> = (0..64).map(|i| i * 2).collect();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_empty_input() {
        let items: Vec<u32> = Vec::new();
        let result = concurrent_map(&items, |i| Ok(*i)).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_error_after_all_invocations() {
        let calls = AtomicUsize::new(0);
        let items: Vec<usize> = (0..16).collect();

        let result = concurrent_map(&items, |i| {
            calls.fetch_add(1, Ordering::SeqCst);
            if *i == 3 {
                anyhow::bail!("item {} failed", i);
            }
            Ok(*i)
        });

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 16);
    }

    #[test]
    fn test_first_error_by_index() {
        let items: Vec<usize> = (0..8).collect();

        let err = concurrent_map(&items, |i| {
            if *i == 2 || *i == 6 {
                anyhow::bail!("item {} failed", i);
            }
            Ok(*i)
        })
        .unwrap_err();

        assert_eq!(err.to_string(), "item 2 failed");
    }

    #[test]
    fn test_sequential_map_matches() {
        let items = vec!["a", "b", "c"];
        let result = sequential_map(&items, |s| Ok(s.to_uppercase())).unwrap();
        assert_eq!(result, vec!["A", "B", "C"]);
    }
}
