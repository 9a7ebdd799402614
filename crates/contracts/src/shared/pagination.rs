//! Page navigation for server-paginated listings.
//!
//! Pages are 1-based. The cursor only does bookkeeping; fetching and
//! re-rendering after a page change is up to the caller.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

/// Page size of the analysis report listing.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Number of page buttons shown around the current page.
pub const DEFAULT_PAGE_WINDOW: u32 = 5;

/// Navigation request issued by pagination controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCommand {
    First,
    Prev,
    Next,
    Last,
    Goto(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("page {requested} is out of range 1..={total_pages}")]
    OutOfRange { requested: u32, total_pages: u32 },

    #[error("unknown page command: {0}")]
    UnknownCommand(String),
}

impl FromStr for PageCommand {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "first" => Ok(PageCommand::First),
            "prev" => Ok(PageCommand::Prev),
            "next" => Ok(PageCommand::Next),
            "last" => Ok(PageCommand::Last),
            other => other
                .parse::<u32>()
                .map(PageCommand::Goto)
                .map_err(|_| PageError::UnknownCommand(other.to_string())),
        }
    }
}

impl fmt::Display for PageCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageCommand::First => f.write_str("first"),
            PageCommand::Prev => f.write_str("prev"),
            PageCommand::Next => f.write_str("next"),
            PageCommand::Last => f.write_str("last"),
            PageCommand::Goto(p) => write!(f, "{}", p),
        }
    }
}

/// `ceil(total_items / page_size)`, 0 for an empty result set.
pub fn total_pages_for(total_items: u64, page_size: u32) -> u32 {
    let size = u64::from(page_size.max(1));
    let pages = total_items.div_ceil(size);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Next page for `command`, always within `1..=max(total_pages, 1)`.
///
/// An explicit page outside `1..=total_pages` is rejected.
pub fn resolve(command: PageCommand, current: u32, total_pages: u32) -> Result<u32, PageError> {
    let upper = total_pages.max(1);
    let next = match command {
        PageCommand::First => 1,
        PageCommand::Prev => current.saturating_sub(1).max(1),
        PageCommand::Next => {
            if total_pages == 0 {
                current
            } else {
                current.saturating_add(1).min(total_pages)
            }
        }
        PageCommand::Last => upper,
        PageCommand::Goto(p) => {
            if p < 1 || p > total_pages {
                return Err(PageError::OutOfRange {
                    requested: p,
                    total_pages,
                });
            }
            p
        }
    };
    Ok(next.clamp(1, upper))
}

/// Pagination state of one listing view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    current_page: u32,
    page_size: u32,
    total_items: u64,
    total_pages: u32,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageCursor {
    pub fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_items: 0,
            total_pages: 0,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Applies a navigation command. Returns `true` when the page changed.
    ///
    /// On error the cursor is left untouched.
    pub fn navigate(&mut self, command: PageCommand) -> Result<bool, PageError> {
        let next = resolve(command, self.current_page, self.total_pages)?;
        let changed = next != self.current_page;
        self.current_page = next;
        Ok(changed)
    }

    /// Page the cursor would move to, without moving it.
    pub fn peek(&self, command: PageCommand) -> Result<u32, PageError> {
        resolve(command, self.current_page, self.total_pages)
    }

    /// Refreshes totals from a successful response.
    ///
    /// `total_pages` is derived from `total_items` when the response does not
    /// carry it. The current page is clamped into the new bounds.
    pub fn sync(&mut self, page: u32, total_items: u64, total_pages: Option<u32>) {
        self.total_items = total_items;
        self.total_pages =
            total_pages.unwrap_or_else(|| total_pages_for(total_items, self.page_size));
        self.current_page = page.clamp(1, self.total_pages.max(1));
    }

    /// Back to page 1 with no known totals.
    pub fn reset(&mut self) {
        self.current_page = 1;
        self.total_items = 0;
        self.total_pages = 0;
    }

    /// Zero-based offset of the first row of the current page.
    pub fn offset(&self) -> u64 {
        u64::from(self.current_page - 1) * u64::from(self.page_size)
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Controls are hidden for a single page of results.
    pub fn is_paginated(&self) -> bool {
        self.total_pages > 1
    }

    /// Up to `max_visible` consecutive page numbers around the current page.
    ///
    /// Empty when there are no pages.
    pub fn page_window(&self, max_visible: u32) -> RangeInclusive<u32> {
        if self.total_pages == 0 || max_visible == 0 {
            return 1..=0;
        }
        let mut start = self.current_page.saturating_sub(max_visible / 2).max(1);
        let end = start
            .saturating_add(max_visible - 1)
            .min(self.total_pages);
        if end - start + 1 < max_visible {
            start = end.saturating_sub(max_visible - 1).max(1);
        }
        start..=end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(current: u32, total_items: u64, page_size: u32) -> PageCursor {
        let mut c = PageCursor::new(page_size);
        c.sync(current, total_items, None);
        c
    }

    #[test]
    fn test_total_pages_for() {
        assert_eq!(total_pages_for(0, 10), 0);
        assert_eq!(total_pages_for(1, 10), 1);
        assert_eq!(total_pages_for(10, 10), 1);
        assert_eq!(total_pages_for(11, 10), 2);
        assert_eq!(total_pages_for(5, 0), 5);
    }

    #[test]
    fn test_next_never_exceeds_total() {
        for total in 1..=12u32 {
            for current in 1..=total {
                let next = resolve(PageCommand::Next, current, total).unwrap();
                assert!(next <= total, "next={} total={}", next, total);
                assert!(next >= 1);
            }
        }
    }

    #[test]
    fn test_prev_never_below_one() {
        for total in 0..=12u32 {
            for current in 1..=total.max(1) {
                let prev = resolve(PageCommand::Prev, current, total).unwrap();
                assert!(prev >= 1);
            }
        }
    }

    #[test]
    fn test_first_and_last() {
        for total in 0..=8u32 {
            for current in 1..=total.max(1) {
                assert_eq!(resolve(PageCommand::First, current, total), Ok(1));
                let expected = if total > 0 { total } else { 1 };
                assert_eq!(resolve(PageCommand::Last, current, total), Ok(expected));
            }
        }
    }

    #[test]
    fn test_results_stay_in_bounds() {
        let commands = [
            PageCommand::First,
            PageCommand::Prev,
            PageCommand::Next,
            PageCommand::Last,
            PageCommand::Goto(1),
            PageCommand::Goto(3),
        ];
        for total in 0..=6u32 {
            for current in 1..=total.max(1) {
                for cmd in commands {
                    if let Ok(page) = resolve(cmd, current, total) {
                        assert!(page >= 1 && page <= total.max(1));
                    }
                }
            }
        }
    }

    #[test]
    fn test_scenario_five_pages() {
        let mut c = cursor(3, 50, 10);
        assert_eq!(c.total_pages(), 5);
        assert_eq!(c.peek(PageCommand::Next), Ok(4));
        assert_eq!(c.peek(PageCommand::Prev), Ok(2));
        assert_eq!(c.peek(PageCommand::Last), Ok(5));

        let err = c.navigate(PageCommand::Goto(7)).unwrap_err();
        assert_eq!(
            err,
            PageError::OutOfRange {
                requested: 7,
                total_pages: 5
            }
        );
        assert_eq!(c.current_page(), 3);

        assert!(c.navigate(PageCommand::Goto(0)).is_err());
        assert_eq!(c.current_page(), 3);
    }

    #[test]
    fn test_scenario_empty() {
        let mut c = cursor(1, 0, 10);
        assert_eq!(c.total_pages(), 0);
        assert_eq!(c.current_page(), 1);
        assert_eq!(c.navigate(PageCommand::Next), Ok(false));
        assert_eq!(c.navigate(PageCommand::Last), Ok(false));
        assert_eq!(c.current_page(), 1);
        assert!(c.navigate(PageCommand::Goto(1)).is_err());
        assert!(!c.is_paginated());
        assert!(c.page_window(5).is_empty());
    }

    #[test]
    fn test_navigate_reports_change() {
        let mut c = cursor(1, 30, 10);
        assert_eq!(c.navigate(PageCommand::Prev), Ok(false));
        assert_eq!(c.navigate(PageCommand::Next), Ok(true));
        assert_eq!(c.current_page(), 2);
        assert_eq!(c.navigate(PageCommand::Goto(2)), Ok(false));
        assert_eq!(c.navigate(PageCommand::Last), Ok(true));
        assert!(!c.has_next());
        assert!(c.has_prev());
        assert_eq!(c.offset(), 20);
    }

    #[test]
    fn test_sync_clamps_current_page() {
        let mut c = cursor(5, 50, 10);
        assert_eq!(c.current_page(), 5);
        // Result set shrank after filtering
        c.sync(5, 12, Some(2));
        assert_eq!(c.current_page(), 2);
        assert_eq!(c.total_items(), 12);
        c.sync(3, 0, Some(0));
        assert_eq!(c.current_page(), 1);
        c.sync(0, 40, None);
        assert_eq!(c.current_page(), 1);
        assert_eq!(c.total_pages(), 4);
    }

    #[test]
    fn test_reset() {
        let mut c = cursor(4, 80, 10);
        c.reset();
        assert_eq!(c.current_page(), 1);
        assert_eq!(c.total_pages(), 0);
        assert_eq!(c.total_items(), 0);
        assert_eq!(c.page_size(), 10);
    }

    #[test]
    fn test_page_window() {
        let c = cursor(1, 100, 10);
        assert_eq!(c.page_window(5), 1..=5);
        let c = cursor(6, 100, 10);
        assert_eq!(c.page_window(5), 4..=8);
        let c = cursor(10, 100, 10);
        assert_eq!(c.page_window(5), 6..=10);
        let c = cursor(2, 30, 10);
        assert_eq!(c.page_window(5), 1..=3);
        let c = cursor(3, 70, 10);
        assert_eq!(c.page_window(4), 1..=4);
    }

    #[test]
    fn test_parse_command() {
        assert_eq!("first".parse(), Ok(PageCommand::First));
        assert_eq!("prev".parse(), Ok(PageCommand::Prev));
        assert_eq!(" next ".parse(), Ok(PageCommand::Next));
        assert_eq!("last".parse(), Ok(PageCommand::Last));
        assert_eq!("7".parse(), Ok(PageCommand::Goto(7)));
        assert_eq!(
            "later".parse::<PageCommand>(),
            Err(PageError::UnknownCommand("later".to_string()))
        );
        assert_eq!(PageCommand::Goto(3).to_string(), "3");
    }
}
