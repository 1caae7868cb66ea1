//! Product query, filter, sort, and pagination.
//!
//! The backend returns the whole (small) catalog; this module derives the
//! view the customer asked for in memory. Filtering and sorting never
//! mutate the fetched list.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cms::types::Product;

/// Sort order for the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Preserve the backend's fetch order.
    #[default]
    None,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
}

/// Filter configuration for the product listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Case-insensitive substring match on the product name. Empty
    /// matches all.
    pub search: String,
    /// Exact category slug match. Empty matches all.
    pub category: String,
    /// Inclusive price bounds.
    pub min_price: Option<Decimal>,
    /// Inclusive price bounds.
    pub max_price: Option<Decimal>,
    /// Restrict to promoted offers.
    pub only_offers: bool,
    /// Sort order applied after filtering.
    pub sort: SortOrder,
}

impl ProductFilter {
    /// Whether a single product satisfies the filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if !self.search.is_empty()
            && !product
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase())
        {
            return false;
        }

        if !self.category.is_empty() && product.category.as_deref() != Some(&*self.category) {
            return false;
        }

        if let Some(min) = self.min_price
            && product.price.amount < min
        {
            return false;
        }

        if let Some(max) = self.max_price
            && product.price.amount > max
        {
            return false;
        }

        if self.only_offers && !product.offer {
            return false;
        }

        true
    }

    /// Apply the filter and sort to a fetched product list.
    ///
    /// The sort is stable; `SortOrder::None` preserves fetch order.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut filtered: Vec<Product> = products
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();

        match self.sort {
            SortOrder::None => {}
            SortOrder::PriceAsc => {
                filtered.sort_by(|a, b| a.price.amount.cmp(&b.price.amount));
            }
            SortOrder::PriceDesc => {
                filtered.sort_by(|a, b| b.price.amount.cmp(&a.price.amount));
            }
        }

        filtered
    }
}

/// Fixed-size pagination over a filtered list.
#[derive(Debug, Clone, Copy)]
pub struct Pager {
    page_size: usize,
}

/// One page of results.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// 1-based page number actually served.
    pub page: usize,
    /// Total number of pages (at least 1).
    pub total_pages: usize,
    /// Total items across all pages.
    pub total_items: usize,
}

impl Pager {
    /// Default items per page in the storefront listing.
    pub const DEFAULT_PAGE_SIZE: usize = 12;

    /// Create a pager. A zero page size is bumped to 1.
    #[must_use]
    pub const fn new(page_size: usize) -> Self {
        Self {
            page_size: if page_size == 0 { 1 } else { page_size },
        }
    }

    /// Slice one page out of the filtered list.
    ///
    /// A requested page of 0 or one past the end resets to page 1: an
    /// out-of-range page is never silently served empty.
    #[must_use]
    pub fn page<T: Clone>(&self, items: &[T], requested: usize) -> Page<T> {
        let total_items = items.len();
        let total_pages = std::cmp::max(1, total_items.div_ceil(self.page_size));

        let page = if requested == 0 || requested > total_pages {
            1
        } else {
            requested
        };

        let start = (page - 1) * self.page_size;
        let page_items = items
            .iter()
            .skip(start)
            .take(self.page_size)
            .cloned()
            .collect();

        Page {
            items: page_items,
            page,
            total_pages,
            total_items,
        }
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tio_pelotte_core::{Price, ProductId};

    fn product(id: i32, name: &str, price: &str, category: &str, offer: bool) -> Product {
        Product {
            id: ProductId::new(id),
            slug: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
            description: String::new(),
            price: Price::ars(price.parse().unwrap()),
            unit: "kg".to_string(),
            images: Vec::new(),
            active: true,
            featured: false,
            offer,
            category: if category.is_empty() {
                None
            } else {
                Some(category.to_string())
            },
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Tallarines", "10", "pastas-simples", false),
            product(2, "Sorrentinos", "50", "pastas-rellenas", true),
            product(3, "Ravioles", "30", "pastas-rellenas", false),
        ]
    }

    #[test]
    fn test_empty_filter_matches_all_in_fetch_order() {
        let filter = ProductFilter::default();
        let result = filter.apply(&catalog());
        let ids: Vec<i32> = result.iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let filter = ProductFilter {
            search: "SORRE".to_string(),
            ..Default::default()
        };
        let result = filter.apply(&catalog());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Sorrentinos");
    }

    #[test]
    fn test_category_exact_match() {
        let filter = ProductFilter {
            category: "pastas-rellenas".to_string(),
            ..Default::default()
        };
        let result = filter.apply(&catalog());
        let ids: Vec<i32> = result.iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let filter = ProductFilter {
            min_price: Some("0".parse().unwrap()),
            max_price: Some("20".parse().unwrap()),
            ..Default::default()
        };
        let result = filter.apply(&catalog());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id.as_i32(), 1);

        // Bound equal to a price still matches
        let filter = ProductFilter {
            min_price: Some("30".parse().unwrap()),
            max_price: Some("30".parse().unwrap()),
            ..Default::default()
        };
        let result = filter.apply(&catalog());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id.as_i32(), 3);
    }

    #[test]
    fn test_only_offers() {
        let filter = ProductFilter {
            only_offers: true,
            ..Default::default()
        };
        let result = filter.apply(&catalog());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id.as_i32(), 2);
    }

    #[test]
    fn test_sort_price_asc_and_desc() {
        let filter = ProductFilter {
            sort: SortOrder::PriceAsc,
            ..Default::default()
        };
        let prices: Vec<String> = filter
            .apply(&catalog())
            .iter()
            .map(|p| p.price.amount.to_string())
            .collect();
        assert_eq!(prices, vec!["10", "30", "50"]);

        let filter = ProductFilter {
            sort: SortOrder::PriceDesc,
            ..Default::default()
        };
        let prices: Vec<String> = filter
            .apply(&catalog())
            .iter()
            .map(|p| p.price.amount.to_string())
            .collect();
        assert_eq!(prices, vec!["50", "30", "10"]);
    }

    #[test]
    fn test_pager_slices_fixed_pages() {
        let items: Vec<i32> = (1..=7).collect();
        let pager = Pager::new(3);

        let page1 = pager.page(&items, 1);
        assert_eq!(page1.items, vec![1, 2, 3]);
        assert_eq!(page1.total_pages, 3);
        assert_eq!(page1.total_items, 7);

        let page3 = pager.page(&items, 3);
        assert_eq!(page3.items, vec![7]);
    }

    #[test]
    fn test_pager_resets_out_of_range_page() {
        let items: Vec<i32> = (1..=5).collect();
        let pager = Pager::new(3);

        // Page 9 does not exist; reset to page 1 instead of serving empty
        let page = pager.page(&items, 9);
        assert_eq!(page.page, 1);
        assert_eq!(page.items, vec![1, 2, 3]);

        // Page 0 is not a page either
        let page = pager.page(&items, 0);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn test_pager_empty_list_has_one_empty_page() {
        let items: Vec<i32> = Vec::new();
        let pager = Pager::default();
        let page = pager.page(&items, 1);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }
}
