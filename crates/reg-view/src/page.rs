//! One-based pagination.

/// Rows per page in the admin listings.
pub const DEFAULT_PAGE_SIZE: usize = 15;

/// Number of pages for `count` items; never less than one.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Items of one-based `page`. Page zero and pages past the end are empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let Some(start) = page
        .checked_sub(1)
        .and_then(|index| index.checked_mul(page_size))
    else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 15), 1);
        assert_eq!(total_pages(15, 15), 1);
        assert_eq!(total_pages(16, 15), 2);
        assert_eq!(total_pages(31, 15), 3);
        assert_eq!(total_pages(3, 0), 3);
    }

    #[test]
    fn test_paginate() {
        let items: Vec<u32> = (1..=31).collect();
        assert_eq!(paginate(&items, 1, 15), &items[0..15]);
        assert_eq!(paginate(&items, 3, 15), &[31]);
        assert!(paginate(&items, 4, 15).is_empty());
        assert!(paginate(&items, 0, 15).is_empty());
        assert!(paginate(&items, usize::MAX, 15).is_empty());
    }

    #[test]
    fn test_thirty_two_records() {
        let items: Vec<u32> = (1..=32).collect();
        assert_eq!(total_pages(items.len(), 15), 3);
        assert_eq!(paginate(&items, 1, 15).len(), 15);
        assert_eq!(paginate(&items, 2, 15), &items[15..30]);
        assert_eq!(paginate(&items, 3, 15), &[31, 32]);
        assert!(paginate(&items, 4, 15).is_empty());
    }

    #[test]
    fn test_pages_cover_items_once() {
        let items: Vec<u32> = (0..47).collect();
        let pages = total_pages(items.len(), 15);
        let joined: Vec<u32> = (1..=pages)
            .flat_map(|p| paginate(&items, p, 15).iter().copied())
            .collect();
        assert_eq!(joined, items);
    }
}
