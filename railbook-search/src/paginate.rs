/// Fixed-size pagination over an already-filtered list. Pages are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    pub page_size: usize,
    pub page: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page: 1,
        }
    }

    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }

    /// Back to page one; called whenever the filter changes.
    pub fn reset(&mut self) {
        self.page = 1;
    }

    pub fn next_page(&mut self, len: usize) {
        if self.page < self.page_count(len) {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.page - 1) * self.page_size;
        if start >= items.len() {
            return &[];
        }
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }
}
