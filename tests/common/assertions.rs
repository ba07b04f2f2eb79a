//! Domain-specific assertion macros for folio harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that name the
//! store invariant that was violated.

// ---------------------------------------------------------------------------
// Collection assertions
// ---------------------------------------------------------------------------

/// Assert that a store's display order equals the given ids.
///
/// ```rust
/// assert_ids!(store, [5, 2, 1]);
/// ```
#[macro_export]
macro_rules! assert_ids {
    ($store:expr, [$($id:expr),* $(,)?]) => {{
        let store: &folio_core::ExcerptStore = &$store;
        let actual: Vec<i64> = store.ids().iter().map(|id| id.get()).collect();
        let expected: Vec<i64> = vec![$($id),*];
        pretty_assertions::assert_eq!(actual, expected, "assert_ids! failed: display order differs");
    }};
}

/// Assert the normalization invariants: no duplicate id in the order, and the
/// order and the map hold the same ids.
#[macro_export]
macro_rules! assert_consistent {
    ($store:expr) => {{
        let store: &folio_core::ExcerptStore = &$store;
        let collection = store.collection();
        let ids = collection.ids();
        let unique: std::collections::HashSet<_> = ids.iter().copied().collect();
        assert_eq!(
            unique.len(),
            ids.len(),
            "assert_consistent! failed: duplicate id in display order {:?}",
            ids
        );
        for id in ids {
            assert!(
                collection.get(*id).is_some(),
                "assert_consistent! failed: id {} is ordered but has no entity",
                id
            );
        }
        assert!(
            collection.is_consistent(),
            "assert_consistent! failed: entity map has ids missing from the order {:?}",
            ids
        );
    }};
}

// ---------------------------------------------------------------------------
// Status assertions
// ---------------------------------------------------------------------------

/// Assert a store's request status, optionally with its message.
///
/// ```rust
/// assert_status!(store, RequestStatus::Succeeded);
/// assert_status!(store, RequestStatus::Succeeded, "Excerpt successfully created");
/// ```
#[macro_export]
macro_rules! assert_status {
    ($store:expr, $status:expr) => {{
        let store: &folio_core::ExcerptStore = &$store;
        let expected: folio_core::RequestStatus = $status;
        assert_eq!(
            store.status(),
            expected,
            "assert_status! failed:\n  message: {:?}\n  error:   {:?}",
            store.message(),
            store.error()
        );
    }};
    ($store:expr, $status:expr, $message:expr) => {{
        $crate::assert_status!($store, $status);
        let store: &folio_core::ExcerptStore = &$store;
        assert_eq!(store.message(), Some($message), "assert_status! failed: message differs");
    }};
}
