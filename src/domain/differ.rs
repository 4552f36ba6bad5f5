//! Listing snapshot differ.
//!
//! Pure set subtraction between two polls. Results come back sorted so
//! the order of trades and log lines is reproducible.

use std::collections::BTreeSet;

use super::listing::{Catalog, ProductId};

/// Items present in `current` but not in `previous`.
pub fn diff<T: Ord + Clone>(previous: &BTreeSet<T>, current: &BTreeSet<T>) -> BTreeSet<T> {
    current.difference(previous).cloned().collect()
}

/// Products listed in `current` that `previous` did not know about, in
/// ascending product ID order.
pub fn new_listings(previous: &Catalog, current: &Catalog) -> Vec<ProductId> {
    let known: BTreeSet<&ProductId> = previous.keys().collect();
    let seen: BTreeSet<&ProductId> = current.keys().collect();
    diff(&known, &seen).into_iter().cloned().collect()
}
