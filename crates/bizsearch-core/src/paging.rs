//! Offset arithmetic for the paged results table.

/// Which pager links are live for the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLinks {
    pub show_prev: bool,
    pub show_next: bool,
}

/// Computes the offset `page_delta` pages away from `current`.
///
/// - a result at or below zero floors to `0`;
/// - an unknown total yields `0`;
/// - a result past `total` returns `current` unchanged rather than clamping
///   to the last page boundary.
#[must_use]
pub fn compute_page_offset(current: u32, page_delta: i32, page_size: u32, total: Option<u32>) -> u32 {
    let next = i64::from(current) + i64::from(page_delta) * i64::from(page_size);
    if next <= 0 {
        return 0;
    }
    let Some(total) = total else {
        return 0;
    };
    if next > i64::from(total) {
        return current;
    }
    u32::try_from(next).unwrap_or(current)
}

/// Decides whether "previous" and "next" are available.
#[must_use]
pub fn page_links(offset: u32, total: Option<u32>, page_size: u32) -> PageLinks {
    match total {
        Some(total) => PageLinks {
            show_prev: offset > 0,
            show_next: u64::from(offset) + u64::from(page_size) <= u64::from(total),
        },
        None => PageLinks {
            show_prev: false,
            show_next: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_forward() {
        assert_eq!(compute_page_offset(0, 1, 20, Some(45)), 20);
    }

    #[test]
    fn second_page_forward() {
        assert_eq!(compute_page_offset(20, 1, 20, Some(45)), 40);
    }

    #[test]
    fn refuses_to_page_past_total() {
        assert_eq!(compute_page_offset(40, 1, 20, Some(45)), 40);
    }

    #[test]
    fn floors_at_zero() {
        assert_eq!(compute_page_offset(0, -1, 20, Some(45)), 0);
        assert_eq!(compute_page_offset(20, -1, 20, Some(45)), 0);
        assert_eq!(compute_page_offset(10, -1, 20, Some(45)), 0);
    }

    #[test]
    fn backward_from_middle() {
        assert_eq!(compute_page_offset(40, -1, 20, Some(45)), 20);
    }

    #[test]
    fn unknown_total_resets_to_zero() {
        assert_eq!(compute_page_offset(20, 1, 20, None), 0);
    }

    #[test]
    fn landing_exactly_on_total_is_allowed() {
        assert_eq!(compute_page_offset(20, 1, 20, Some(40)), 40);
    }

    #[test]
    fn links_on_first_page() {
        let links = page_links(0, Some(45), 20);
        assert!(!links.show_prev);
        assert!(links.show_next);
    }

    #[test]
    fn links_on_last_page() {
        let links = page_links(40, Some(45), 20);
        assert!(links.show_prev);
        assert!(!links.show_next);
    }

    #[test]
    fn links_hidden_without_total() {
        assert_eq!(
            page_links(20, None, 20),
            PageLinks {
                show_prev: false,
                show_next: false
            }
        );
    }

    #[test]
    fn next_shown_when_page_ends_exactly_at_total() {
        assert!(page_links(20, Some(40), 20).show_next);
    }
}
