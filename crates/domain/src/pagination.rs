use serde::Serialize;

pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;
/// Highest page accepted; keeps `page * limit` inside a signed 64-bit offset.
pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_LIMIT;

/// 1-based page request, already clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    pub fn new(page: Option<u64>, limit: Option<u64>) -> Self {
        Self {
            page: page.filter(|p| *p > 0).unwrap_or(1).min(MAX_PAGE),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// List envelope returned by every paginated endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub total_items: u64,
    pub total_pages: u64,
    pub current_page: u64,
    pub data: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total_items: u64, request: PageRequest) -> Self {
        Self {
            total_items,
            total_pages: total_items.div_ceil(request.limit),
            current_page: request.page,
            data,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            total_items: self.total_items,
            total_pages: self.total_pages,
            current_page: self.current_page,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_clamping() {
        let req = PageRequest::new(None, None);
        assert_eq!((req.page, req.limit), (1, DEFAULT_LIMIT));

        let req = PageRequest::new(Some(0), Some(1000));
        assert_eq!((req.page, req.limit), (1, MAX_LIMIT));

        let req = PageRequest::new(Some(3), Some(0));
        assert_eq!((req.page, req.limit), (3, 1));
        assert_eq!(req.offset(), 2);
    }

    #[test]
    fn test_huge_page_is_capped() {
        let req = PageRequest::new(Some(u64::MAX), Some(MAX_LIMIT));
        assert_eq!(req.page, MAX_PAGE);
        assert!(req.offset() <= i64::MAX as u64);
        assert!(req.limit.checked_mul(req.page).is_some());
    }

    #[test]
    fn test_page_envelope() {
        let page = Page::new(vec![1, 2], 12, PageRequest::new(Some(2), Some(5)));
        assert_eq!(page.total_pages, 3);

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalItems"], 12);
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["currentPage"], 2);
        assert_eq!(json["data"], serde_json::json!([1, 2]));
    }
}
