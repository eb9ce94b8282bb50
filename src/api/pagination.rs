use serde::Deserialize;

use crate::config;

/// `page`/`size` query parameters shared by every paged endpoint.
///
/// Zero-based page index. Size defaults to, and is capped by, the values in
/// `ApiConfig` so a client cannot request unbounded result sets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pageable {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl Pageable {
    pub fn limit(&self) -> i64 {
        let api = &config::config().api;
        let size = self.size.unwrap_or(api.default_page_size);
        size.clamp(1, api.max_page_size)
    }

    pub fn offset(&self) -> i64 {
        // Saturating keeps absurd page numbers from overflowing the i64 offset
        self.page.unwrap_or(0).max(0).saturating_mul(self.limit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_params_absent() {
        let p = Pageable::default();
        assert_eq!(p.limit(), config::config().api.default_page_size);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn size_is_clamped() {
        let p = Pageable {
            page: None,
            size: Some(10_000),
        };
        assert_eq!(p.limit(), config::config().api.max_page_size);

        let p = Pageable {
            page: None,
            size: Some(0),
        };
        assert_eq!(p.limit(), 1);
    }

    #[test]
    fn offset_is_page_times_limit() {
        let p = Pageable {
            page: Some(3),
            size: Some(10),
        };
        assert_eq!(p.offset(), 30);

        // Negative pages are treated as the first page
        let p = Pageable {
            page: Some(-2),
            size: Some(10),
        };
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn huge_page_numbers_saturate_instead_of_overflowing() {
        let p = Pageable {
            page: Some(i64::MAX),
            size: Some(10),
        };
        assert_eq!(p.offset(), i64::MAX);
    }
}
