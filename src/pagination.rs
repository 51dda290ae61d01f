use std::cmp::Ordering;

use serde::Serialize;

/// Pagination parameters shared by every listing endpoint.
///
/// `page` is deliberately signed: out-of-range values (zero, negative, past
/// the end) must come out as an empty page, never as an error. `page_size`
/// must be at least 1 and is validated at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    /// Optional cap applied after sorting, before paging. `None` and `Some(0)`
    /// both mean "no limit".
    pub limit: Option<usize>,
    /// 1-based page number
    pub page: i64,
    /// Items per page
    pub page_size: usize,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            limit: None,
            page: 1,
            page_size: 20,
        }
    }
}

/// One page of results plus the metadata needed to render pagination controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    /// Size of the collection before sorting, limiting, or paging
    pub total_count: usize,
    /// The requested page slice
    pub items: Vec<T>,
    pub page: i64,
    pub page_size: usize,
    /// Page count over the post-limit collection; 1 when it is empty
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
    /// Number of items in this page
    pub items_count: usize,
}

/// Sorts, limits, and pages a collection in one pass.
///
/// The order of operations is fixed: `total_count` is taken first, then the
/// optional stable sort (ties keep their input order, also under `reverse`),
/// then the optional truncation to `limit` (so a limit means "top N in the
/// requested order"), and only then the page slice. Page metadata is computed
/// over the post-limit collection.
pub fn paginate<T, C>(
    mut data: Vec<T>,
    query: &PageQuery,
    compare: Option<C>,
    reverse: bool,
) -> Paginated<T>
where
    C: FnMut(&T, &T) -> Ordering,
{
    let total_count = data.len();

    if let Some(mut compare) = compare {
        if reverse {
            data.sort_by(|a, b| compare(a, b).reverse());
        } else {
            data.sort_by(|a, b| compare(a, b));
        }
    }

    if let Some(limit) = query.limit.filter(|&limit| limit > 0) {
        data.truncate(limit);
    }

    let effective_count = data.len();
    let total_pages = if effective_count > 0 {
        effective_count.div_ceil(query.page_size)
    } else {
        1
    };

    let mut items = if query.page >= 1 {
        let start = (query.page as usize - 1).saturating_mul(query.page_size);
        if start < data.len() {
            data.split_off(start)
        } else {
            Vec::new()
        }
    } else {
        Vec::new()
    };
    items.truncate(query.page_size);

    let items_count = items.len();

    Paginated {
        total_count,
        items,
        page: query.page,
        page_size: query.page_size,
        total_pages,
        has_next: query.page < total_pages as i64,
        has_previous: query.page > 1,
        items_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(limit: Option<usize>, page: i64, page_size: usize) -> PageQuery {
        PageQuery {
            limit,
            page,
            page_size,
        }
    }

    fn numbers(n: usize) -> Vec<i32> {
        (1..=n as i32).collect()
    }

    /// `paginate` with the no-comparator contract: input order preserved
    fn unsorted<T>(data: Vec<T>, query: &PageQuery) -> Paginated<T> {
        paginate(data, query, None::<fn(&T, &T) -> Ordering>, false)
    }

    #[test]
    fn test_first_page() {
        let result = unsorted(numbers(50), &query(None, 1, 10));
        assert_eq!(result.items, (1..=10).collect::<Vec<_>>());
        assert_eq!(result.total_count, 50);
        assert_eq!(result.total_pages, 5);
        assert_eq!(result.items_count, 10);
        assert!(result.has_next);
        assert!(!result.has_previous);
    }

    #[test]
    fn test_middle_page() {
        let result = unsorted(numbers(50), &query(None, 3, 10));
        assert_eq!(result.items, (21..=30).collect::<Vec<_>>());
        assert_eq!(result.page, 3);
        assert!(result.has_next);
        assert!(result.has_previous);
    }

    #[test]
    fn test_last_page() {
        let result = unsorted(numbers(50), &query(None, 5, 10));
        assert_eq!(result.items, (41..=50).collect::<Vec<_>>());
        assert!(!result.has_next);
        assert!(result.has_previous);
    }

    #[test]
    fn test_partial_last_page() {
        let result = unsorted(numbers(25), &query(None, 3, 10));
        assert_eq!(result.items, (21..=25).collect::<Vec<_>>());
        assert_eq!(result.items_count, 5);
        assert_eq!(result.total_pages, 3);
        assert!(!result.has_next);
    }

    #[test]
    fn test_page_beyond_range() {
        let result = unsorted(numbers(20), &query(None, 5, 10));
        assert!(result.items.is_empty());
        assert_eq!(result.items_count, 0);
        assert_eq!(result.total_pages, 2);
        assert!(!result.has_next);
        assert!(result.has_previous);
    }

    #[test]
    fn test_zero_page_yields_empty() {
        let result = unsorted(numbers(10), &query(None, 0, 10));
        assert!(result.items.is_empty());
        assert!(!result.has_previous);
        // page < total_pages still holds for page 0
        assert!(result.has_next);
    }

    #[test]
    fn test_negative_page_yields_empty() {
        let result = unsorted(numbers(10), &query(None, -3, 5));
        assert!(result.items.is_empty());
        assert_eq!(result.total_pages, 2);
        assert!(!result.has_previous);
    }

    #[test]
    fn test_empty_data() {
        let result = unsorted(Vec::<i32>::new(), &query(None, 1, 10));
        assert!(result.items.is_empty());
        assert_eq!(result.total_count, 0);
        assert_eq!(result.total_pages, 1);
        assert!(!result.has_next);
        assert!(!result.has_previous);
    }

    #[test]
    fn test_single_page() {
        let result = unsorted(numbers(5), &query(None, 1, 10));
        assert_eq!(result.items_count, 5);
        assert_eq!(result.total_pages, 1);
        assert!(!result.has_next);
        assert!(!result.has_previous);
    }

    #[test]
    fn test_page_size_one() {
        let result = unsorted(numbers(3), &query(None, 2, 1));
        assert_eq!(result.items, vec![2]);
        assert_eq!(result.total_pages, 3);
        assert!(result.has_next);
        assert!(result.has_previous);
    }

    #[test]
    fn test_sort_ascending() {
        let data = vec!["banana", "apple", "cherry"];
        let result = paginate(data, &query(None, 1, 10), Some(|a: &&str, b: &&str| a.cmp(b)), false);
        assert_eq!(result.items, vec!["apple", "banana", "cherry"]);
    }

    #[test]
    fn test_sort_descending() {
        let data = vec!["banana", "apple", "cherry"];
        let result = paginate(data, &query(None, 1, 10), Some(|a: &&str, b: &&str| a.cmp(b)), true);
        assert_eq!(result.items, vec!["cherry", "banana", "apple"]);
    }

    #[test]
    fn test_sort_numeric() {
        let data = vec![30, 10, 20];
        let result = paginate(data, &query(None, 1, 10), Some(|a: &i32, b: &i32| a.cmp(b)), false);
        assert_eq!(result.items, vec![10, 20, 30]);
    }

    #[test]
    fn test_no_sort_preserves_input_order() {
        let data = vec![3, 1, 2];
        let result = unsorted(data.clone(), &query(None, 1, 10));
        assert_eq!(result.items, data);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let data = vec![("b", 1), ("a", 1), ("c", 1)];
        let asc = paginate(
            data.clone(),
            &query(None, 1, 10),
            Some(|a: &(&str, i32), b: &(&str, i32)| a.1.cmp(&b.1)),
            false,
        );
        assert_eq!(asc.items, data);

        // A reversed comparator leaves ties in input order too
        let desc = paginate(
            data.clone(),
            &query(None, 1, 10),
            Some(|a: &(&str, i32), b: &(&str, i32)| a.1.cmp(&b.1)),
            true,
        );
        assert_eq!(desc.items, data);
    }

    #[test]
    fn test_limit_truncates_after_sort() {
        let data = vec![5, 1, 4, 2, 3];
        let result = paginate(
            data,
            &query(Some(3), 1, 10),
            Some(|a: &i32, b: &i32| a.cmp(b)),
            true,
        );
        // top 3 by descending value, not the first 3 of the input
        assert_eq!(result.items, vec![5, 4, 3]);
        assert_eq!(result.total_count, 5);
        assert_eq!(result.total_pages, 1);
    }

    #[test]
    fn test_limit_drives_page_count() {
        let result = unsorted(numbers(100), &query(Some(25), 3, 10));
        assert_eq!(result.items, (21..=25).collect::<Vec<_>>());
        assert_eq!(result.items_count, 5);
        assert_eq!(result.total_count, 100);
        assert_eq!(result.total_pages, 3);
        assert!(!result.has_next);
    }

    #[test]
    fn test_limit_zero_means_no_limit() {
        let result = unsorted(numbers(30), &query(Some(0), 1, 50));
        assert_eq!(result.items_count, 30);
        assert_eq!(result.total_pages, 1);
    }

    #[test]
    fn test_limit_larger_than_data() {
        let result = unsorted(numbers(10), &query(Some(500), 1, 10));
        assert_eq!(result.items_count, 10);
        assert_eq!(result.total_pages, 1);
    }

    #[test]
    fn test_sort_limit_page_combined() {
        let result = paginate(
            numbers(100),
            &query(Some(10), 2, 3),
            Some(|a: &i32, b: &i32| a.cmp(b)),
            true,
        );
        // descending top 10 is 100..=91; page 2 of size 3 is positions 4-6
        assert_eq!(result.items, vec![97, 96, 95]);
        assert_eq!(result.total_pages, 4);
        assert!(result.has_next);
    }

    #[test]
    fn test_noop_parameters_are_identity() {
        let data = vec![4, 2, 7, 1];
        let result = unsorted(data.clone(), &query(None, 1, 100));
        assert_eq!(result.items, data);
        assert_eq!(result.total_count, data.len());
        assert_eq!(result.total_pages, 1);
    }

    #[test]
    fn test_total_count_ignores_limit_and_page() {
        for (limit, page) in [(None, 1), (Some(3), 1), (Some(3), 7), (None, 99)] {
            let result = unsorted(numbers(42), &query(limit, page, 5));
            assert_eq!(result.total_count, 42);
        }
    }

    #[test]
    fn test_pages_concatenate_to_limited_sorted_sequence() {
        let data = vec![9, 3, 7, 1, 8, 2, 6, 4, 5, 0];
        let mut expected = data.clone();
        expected.sort_by(|a, b| a.cmp(b).reverse());
        expected.truncate(7);

        let first = paginate(
            data.clone(),
            &query(Some(7), 1, 3),
            Some(|a: &i32, b: &i32| a.cmp(b)),
            true,
        );
        let mut collected = Vec::new();
        for page in 1..=first.total_pages as i64 {
            let result = paginate(
                data.clone(),
                &query(Some(7), page, 3),
                Some(|a: &i32, b: &i32| a.cmp(b)),
                true,
            );
            collected.extend(result.items);
        }
        assert_eq!(collected, expected);
    }

    #[test]
    fn test_metadata_consistency() {
        let result = unsorted(numbers(37), &query(Some(20), 2, 6));
        assert_eq!(result.items_count, result.items.len());
        assert_eq!(result.page, 2);
        assert_eq!(result.page_size, 6);
        assert_eq!(result.total_pages, 4);
        assert!(result.has_next);
        assert!(result.has_previous);
    }
}
