//! Offset-based pagination for Exchange listings
//!
//! The asset search pages with `offset`/`limit` and reports no total count,
//! so the only end-of-data signal is an empty page.

use std::future::Future;

use log::debug;

use crate::error::{ApiError, Result};

/// Page size used by the asset search unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Upper bound on pages fetched in one listing.
pub const DEFAULT_MAX_PAGES: usize = 500;

/// Offset/limit pair for a single page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetParams {
    pub offset: usize,
    pub limit: usize,
}

impl OffsetParams {
    /// Parameters for the first page.
    pub fn first(limit: usize) -> Self {
        Self { offset: 0, limit }
    }

    /// Parameters for the page after this one.
    pub fn next(self) -> Self {
        Self {
            offset: self.offset + self.limit,
            limit: self.limit,
        }
    }

    /// Convert to query string parameters.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("offset", self.offset.to_string()),
            ("limit", self.limit.to_string()),
        ]
    }
}

/// Bounds for walking a paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    /// Items requested per page
    pub page_size: usize,
    /// Pages fetched before giving up with [`ApiError::PaginationExceeded`]
    pub max_pages: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl PageLimits {
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self
    }

    pub fn max_pages(mut self, pages: usize) -> Self {
        self.max_pages = pages.max(1);
        self
    }
}

/// Fetch pages at increasing offsets until one comes back empty.
///
/// Items are appended in page order without inspection. Fails with
/// [`ApiError::PaginationExceeded`] if `max_pages` pages were fetched and
/// none of them was empty.
pub async fn collect_offset_pages<T, F, Fut>(limits: PageLimits, mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(OffsetParams) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut all_items = Vec::new();
    let mut params = OffsetParams::first(limits.page_size);

    for _ in 0..limits.max_pages {
        let page = fetch_page(params).await?;
        if page.is_empty() {
            debug!("No more data at offset {}", params.offset);
            return Ok(all_items);
        }

        debug!("Fetched {} items at offset {}", page.len(), params.offset);
        all_items.extend(page);
        params = params.next();
    }

    Err(ApiError::PaginationExceeded {
        max_pages: limits.max_pages,
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    /// Serve `total` sequential integers in pages, like the catalog would.
    fn paged_source(total: usize) -> impl FnMut(OffsetParams) -> std::future::Ready<Result<Vec<usize>>> {
        move |params: OffsetParams| {
            let end = (params.offset + params.limit).min(total);
            let page = (params.offset.min(total)..end).collect();
            std::future::ready(Ok(page))
        }
    }

    #[test]
    fn test_offset_params_advance_by_limit() {
        let first = OffsetParams::first(20);
        assert_eq!(first.offset, 0);
        assert_eq!(first.next().offset, 20);
        assert_eq!(first.next().next().offset, 40);

        let query = first.next().to_query_params();
        assert!(query.contains(&("offset", "20".to_string())));
        assert!(query.contains(&("limit", "20".to_string())));
    }

    #[test]
    fn test_page_limits_builder_clamps_to_one() {
        let limits = PageLimits::default().page_size(0).max_pages(0);
        assert_eq!(limits.page_size, 1);
        assert_eq!(limits.max_pages, 1);
        assert_eq!(PageLimits::default().page_size, DEFAULT_PAGE_SIZE);
    }

    #[tokio::test]
    async fn test_collect_returns_every_item_once() {
        for total in [0, 1, 19, 20, 21, 40, 57] {
            let items = collect_offset_pages(PageLimits::default(), paged_source(total))
                .await
                .unwrap();
            assert_eq!(items, (0..total).collect::<Vec<_>>(), "total = {}", total);
        }
    }

    #[tokio::test]
    async fn test_collect_stops_at_first_empty_page() {
        let mut requested = Vec::new();
        let pages = vec![vec![1, 2], vec![], vec![3]];

        let items = collect_offset_pages(PageLimits::default().page_size(2), |params| {
            requested.push(params.offset);
            let page = pages.get(params.offset / 2).cloned().unwrap_or_default();
            std::future::ready(Ok(page))
        })
        .await
        .unwrap();

        assert_eq!(items, vec![1, 2]);
        assert_eq!(requested, vec![0, 2]);
    }

    #[tokio::test]
    async fn test_collect_fails_when_pages_never_end() {
        let result = collect_offset_pages(PageLimits::default().max_pages(3), |_| {
            std::future::ready(Ok(vec!["again"]))
        })
        .await;

        match result {
            Err(Error::Api(ApiError::PaginationExceeded { max_pages })) => assert_eq!(max_pages, 3),
            other => panic!("Expected PaginationExceeded, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_collect_propagates_page_errors() {
        let result: Result<Vec<u8>> = collect_offset_pages(PageLimits::default(), |_| {
            std::future::ready(Err(ApiError::Forbidden.into()))
        })
        .await;

        assert!(matches!(result, Err(Error::Api(ApiError::Forbidden))));
    }
}
