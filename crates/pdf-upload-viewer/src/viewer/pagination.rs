use crate::constants::FIRST_PAGE;

/// One-based page cursor. Navigation is inert until a page count is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current: u16,
    page_count: Option<u16>,
}

impl Pagination {
    pub fn new() -> Self {
        Self {
            current: FIRST_PAGE,
            page_count: None,
        }
    }

    pub fn reset(&mut self) {
        self.current = FIRST_PAGE;
        self.page_count = None;
    }

    pub fn set_page_count(&mut self, page_count: u16) {
        let page_count = page_count.max(FIRST_PAGE);
        self.page_count = Some(page_count);
        self.current = self.current.clamp(FIRST_PAGE, page_count);
    }

    pub fn current(&self) -> u16 {
        self.current
    }

    pub fn page_count(&self) -> Option<u16> {
        self.page_count
    }

    pub fn can_previous(&self) -> bool {
        self.page_count.is_some() && self.current > FIRST_PAGE
    }

    pub fn can_next(&self) -> bool {
        self.page_count.is_some_and(|count| self.current < count)
    }

    pub fn previous(&mut self) -> bool {
        if !self.can_previous() {
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn next(&mut self) -> bool {
        if !self.can_next() {
            return false;
        }
        self.current += 1;
        true
    }

    pub fn contains(&self, page: u16) -> bool {
        self.page_count
            .is_some_and(|count| (FIRST_PAGE..=count).contains(&page))
    }

    pub fn label(&self) -> String {
        match self.page_count {
            Some(count) => format!("Page {} of {}", self.current, count),
            None => format!("Page {} of ", self.current),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new()
    }
}
