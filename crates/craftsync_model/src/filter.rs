//! Caller-supplied views over merged record sets.

use crate::record::Record;

/// Sort order applied to a merged record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// By update time descending, newest first. The default.
    #[default]
    NewestFirst,
    /// By update time ascending.
    OldestFirst,
    /// By `price` ascending.
    PriceLowHigh,
    /// By `price` descending.
    PriceHighLow,
}

/// Filter specification applied after merge, never before, so that
/// local-only records are always filter-eligible.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    /// Exact match on the `category` field.
    pub category: Option<String>,
    /// Exact match on the `region` field.
    pub region: Option<String>,
    /// Price ceiling, inclusive.
    pub max_price: Option<f64>,
    /// Case-insensitive substring over title, description, category,
    /// region and artisan name.
    pub search: Option<String>,
    /// Final sort order.
    pub sort: SortOrder,
}

impl FilterSpec {
    /// Creates an empty filter that matches everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the category filter.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the region filter.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets the price ceiling.
    #[must_use]
    pub fn with_max_price(mut self, ceiling: f64) -> Self {
        self.max_price = Some(ceiling);
        self
    }

    /// Sets the free-text search term.
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Sets the sort order.
    #[must_use]
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Returns true if every predicate matches the record.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(category) = &self.category {
            if record.text("category") != category {
                return false;
            }
        }

        if let Some(region) = &self.region {
            if record.text("region") != region {
                return false;
            }
        }

        if let Some(ceiling) = self.max_price {
            if record.number("price") > ceiling {
                return false;
            }
        }

        if let Some(term) = &self.search {
            let needle = term.to_lowercase();
            let haystacks = [
                record.text("title"),
                record.text("description"),
                record.text("category"),
                record.text("region"),
                record.text("artisanName"),
            ];
            if !haystacks
                .iter()
                .any(|h| h.to_lowercase().contains(&needle))
            {
                return false;
            }
        }

        true
    }
}
