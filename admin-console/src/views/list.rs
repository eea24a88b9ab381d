//! Pagination, filtering and debounced search of a list page

use std::time::{Duration, Instant};

use super::debounce::Debounce;

/// Arguments of one list fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest<F> {
    pub page: u32,
    pub search: String,
    pub filters: F,
}

/// Page cursor, search and filters of a list page.
///
/// Changing a filter resets the page to 1 at once. Search text is debounced;
/// when it settles the page is reset to 1 in the same step, so the fetch it
/// triggers always asks for the first page. [`poll`](Self::poll) yields one
/// request per change of page, settled search or filters.
#[derive(Debug, Clone)]
pub struct ListController<F> {
    search_input: String,
    debounce: Debounce<String>,
    search: String,
    filters: F,
    page: u32,
    total_pages: u32,
    last_issued: Option<ListRequest<F>>,
}

impl<F: Clone + PartialEq> ListController<F> {
    pub fn new(filters: F, quiet: Duration) -> Self {
        Self {
            search_input: String::new(),
            debounce: Debounce::new(quiet),
            search: String::new(),
            filters,
            page: 1,
            total_pages: 1,
            last_issued: None,
        }
    }

    /// Text as typed, before debouncing
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Search text the current list was fetched with
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filters(&self) -> &F {
        &self.filters
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn set_search(&mut self, text: impl Into<String>, now: Instant) {
        self.search_input = text.into();
        self.debounce.set(self.search_input.clone(), now);
    }

    /// Apply a filter change; no-op when nothing changed
    pub fn update_filters(&mut self, update: impl FnOnce(&mut F)) {
        let mut next = self.filters.clone();
        update(&mut next);
        if next != self.filters {
            self.filters = next;
            self.page = 1;
        }
    }

    /// Move to `page`, clamped to the known page range
    pub fn set_page(&mut self, page: u32) {
        self.page = page.clamp(1, self.total_pages.max(1));
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    /// Page count reported by the last response. A page past the new end
    /// is pulled back to the last page.
    pub fn set_total_pages(&mut self, total: u32) {
        self.total_pages = total.max(1);
        self.page = self.page.clamp(1, self.total_pages);
    }

    /// Forget the last issued request so the next poll fetches again
    pub fn invalidate(&mut self) {
        self.last_issued = None;
    }

    /// When the pending search text settles, if any
    pub fn search_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    /// Wait for the pending search text to settle; `None` when nothing is pending
    pub async fn settled(&mut self) -> Option<ListRequest<F>> {
        let deadline = self.debounce.deadline()?;
        tokio::time::sleep_until(deadline.into()).await;
        self.poll(Instant::now())
    }

    /// The request to issue at `now`, if the list arguments changed
    pub fn poll(&mut self, now: Instant) -> Option<ListRequest<F>> {
        if let Some(text) = self.debounce.poll(now) {
            // Every settled input goes back to page 1, even when the
            // trimmed text is unchanged.
            self.search = text.trim().to_string();
            self.page = 1;
        }
        let request = ListRequest {
            page: self.page,
            search: self.search.clone(),
            filters: self.filters.clone(),
        };
        if self.last_issued.as_ref() == Some(&request) {
            return None;
        }
        self.last_issued = Some(request.clone());
        Some(request)
    }

    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            total_pages: self.total_pages,
        }
    }
}

/// What a table renders. Loading and the empty state never coexist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TableView<'a, T> {
    Loading,
    Empty,
    Rows(&'a [T]),
}

impl<'a, T> TableView<'a, T> {
    pub fn of(loading: bool, rows: &'a [T]) -> Self {
        if loading {
            TableView::Loading
        } else if rows.is_empty() {
            TableView::Empty
        } else {
            TableView::Rows(rows)
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, TableView::Loading)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TableView::Empty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub total_pages: u32,
}

impl Pagination {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn summary(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(500);

    fn controller() -> ListController<Option<&'static str>> {
        ListController::new(None, QUIET)
    }

    #[test]
    fn test_first_poll_fetches_page_one() {
        let mut list = controller();
        let req = list.poll(Instant::now()).unwrap();
        assert_eq!(req.page, 1);
        assert_eq!(req.search, "");
        assert_eq!(list.poll(Instant::now()), None);
    }

    #[test]
    fn test_filter_change_resets_page_before_fetch() {
        let t0 = Instant::now();
        let mut list = controller();
        list.set_search("john", t0);
        list.poll(t0 + QUIET).unwrap();
        list.set_total_pages(5);
        list.set_page(2);
        assert_eq!(list.poll(t0 + QUIET).unwrap().page, 2);

        list.update_filters(|f| *f = Some("completed"));
        assert_eq!(list.page(), 1);
        let req = list.poll(t0 + QUIET).unwrap();
        assert_eq!(
            req,
            ListRequest {
                page: 1,
                search: "john".into(),
                filters: Some("completed"),
            }
        );
    }

    #[test]
    fn test_same_filter_is_not_a_change() {
        let mut list = controller();
        list.set_total_pages(3);
        list.set_page(3);
        list.update_filters(|f| *f = None);
        assert_eq!(list.page(), 3);
    }

    #[test]
    fn test_settled_search_resets_page() {
        let t0 = Instant::now();
        let mut list = controller();
        list.poll(t0);
        list.set_total_pages(4);
        list.set_page(3);
        list.poll(t0);

        list.set_search("ann", t0);
        // Typing alone does not fetch
        assert_eq!(list.poll(t0 + Duration::from_millis(100)), None);
        assert_eq!(list.page(), 3);

        let req = list.poll(t0 + QUIET).unwrap();
        assert_eq!((req.page, req.search.as_str()), (1, "ann"));
    }

    #[test]
    fn test_page_is_clamped() {
        let mut list = controller();
        list.set_total_pages(2);
        list.set_page(9);
        assert_eq!(list.page(), 2);
        list.next_page();
        assert_eq!(list.page(), 2);
        list.set_page(0);
        assert_eq!(list.page(), 1);
        list.prev_page();
        assert_eq!(list.page(), 1);
    }

    #[test]
    fn test_shrinking_page_count_pulls_page_back() {
        let mut list = controller();
        list.set_total_pages(3);
        list.set_page(3);
        list.set_total_pages(2);
        assert_eq!(list.page(), 2);
        assert_eq!(list.pagination().summary(), "Page 2 of 2");
        list.set_total_pages(0);
        assert_eq!(list.page(), 1);
    }

    #[test]
    fn test_settled_padding_still_resets_page() {
        let t0 = Instant::now();
        let mut list = controller();
        list.set_search("john", t0);
        assert_eq!(list.poll(t0 + QUIET).unwrap().search, "john");
        list.set_total_pages(3);
        list.set_page(2);
        assert_eq!(list.poll(t0 + QUIET).unwrap().page, 2);

        list.set_search("john ", t0 + QUIET);
        let req = list.poll(t0 + QUIET * 2).unwrap();
        assert_eq!((req.page, req.search.as_str()), (1, "john"));
    }

    #[test]
    fn test_invalidate_refetches() {
        let mut list = controller();
        list.poll(Instant::now()).unwrap();
        list.invalidate();
        assert!(list.poll(Instant::now()).is_some());
    }

    #[test]
    fn test_table_view_states() {
        let rows = [1, 2];
        assert!(TableView::of(true, &rows).is_loading());
        assert!(TableView::<u8>::of(true, &[]).is_loading());
        assert!(TableView::<u8>::of(false, &[]).is_empty());
        assert_eq!(TableView::of(false, &rows), TableView::Rows(&rows[..]));
    }

    #[test]
    fn test_pagination_summary() {
        let p = Pagination {
            page: 1,
            total_pages: 3,
        };
        assert_eq!(p.summary(), "Page 1 of 3");
        assert!(!p.has_prev());
        assert!(p.has_next());
    }
}
