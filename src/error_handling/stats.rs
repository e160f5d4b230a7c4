//! Soft-failure statistics.
//!
//! Counts provider failures that were absorbed into result records. These
//! counters are observability only; they never influence request handling.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use strum::IntoEnumIterator;

use crate::providers::Category;

/// Per-category counters for absorbed provider failures.
#[derive(Debug)]
pub struct ProviderStats {
    counts: HashMap<Category, AtomicUsize>,
}

impl ProviderStats {
    /// Creates a new stats instance with all counters at zero.
    pub fn new() -> Self {
        ProviderStats {
            counts: Category::iter()
                .map(|category| (category, AtomicUsize::new(0)))
                .collect(),
        }
    }

    /// Records one absorbed failure for a category.
    pub fn record_soft_failure(&self, category: Category) {
        if let Some(counter) = self.counts.get(&category) {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Returns the number of absorbed failures for a category.
    pub fn soft_failures(&self, category: Category) -> usize {
        self.counts
            .get(&category)
            .map(|counter| counter.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Returns the total number of absorbed failures across all categories.
    pub fn total(&self) -> usize {
        self.counts
            .values()
            .map(|counter| counter.load(Ordering::SeqCst))
            .sum()
    }
}

impl Default for ProviderStats {
    fn default() -> Self {
        Self::new()
    }
}
