//! Pagination metadata and list query parameters shared by the API and the
//! client-side paginator.

/// Page metadata. `total_pages` never drops below 1 so an empty list still
/// renders as "page 1 of 1".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PageMeta {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl PageMeta {
    /// Build metadata from a total count. `page` and `limit` of zero are
    /// treated as 1.
    pub fn compute(total: u64, page: u32, limit: u32) -> Self {
        let limit = limit.max(1);
        Self {
            total,
            page: page.max(1),
            limit,
            total_pages: total_pages(total, limit),
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// `max(1, ceil(total / limit))`
pub fn total_pages(total: u64, limit: u32) -> u32 {
    let limit = u64::from(limit.max(1));
    let pages = total.div_ceil(limit).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Wire shape of paginated list endpoints: `{ data: [...], meta: {...} }`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

/// Query parameters forwarded to server-paginated list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListParams {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
}

impl ListParams {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            ..Self::default()
        }
    }

    /// Flatten into query pairs, skipping blank optional values.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.max(1).to_string()),
            ("limit", self.limit.max(1).to_string()),
        ];
        let optional = [
            ("search", &self.search),
            ("status", &self.status),
            ("category", &self.category),
        ];
        for (key, value) in optional {
            if let Some(value) = value
                && !value.trim().is_empty()
            {
                pairs.push((key, value.trim().to_string()));
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_total_still_has_one_page() {
        let meta = PageMeta::compute(0, 1, 10);
        assert_eq!(meta.total_pages, 1);
        assert!(!meta.has_next());
        assert!(!meta.has_previous());
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(20, 10), 2);
        assert_eq!(total_pages(1, 0), 1);
    }

    #[test]
    fn query_pairs_skip_blank_values() {
        let params = ListParams {
            page: 2,
            limit: 20,
            search: Some("  ".into()),
            status: Some("ACTIVE".into()),
            category: None,
        };
        assert_eq!(
            params.to_query_pairs(),
            vec![
                ("page", "2".to_string()),
                ("limit", "20".to_string()),
                ("status", "ACTIVE".to_string()),
            ]
        );
    }
}
