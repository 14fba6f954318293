//! Client-side filter state and the predicate every list view applies.
//!
//! Text search is a case-insensitive substring match over the entity's
//! searchable fields; status and category are exact matches (categories
//! ignore ASCII case). All active dimensions are ANDed together and
//! filtering never reorders the input.

use super::listable::Listable;
use atelier_model::ListParams;

/// Default rows per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter<S> {
    All,
    Only(S),
}

impl<S> Default for StatusFilter<S> {
    fn default() -> Self {
        StatusFilter::All
    }
}

impl<S: PartialEq> StatusFilter<S> {
    pub fn admits(&self, status: &S) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// `"ALL"` (any case) and blank input both mean no filter.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(trimmed.to_string())
        }
    }

    /// Matches when the wanted value equals any of the item's categories,
    /// which also covers multi-valued fields such as specialisations.
    pub fn admits<'a>(&self, categories: impl IntoIterator<Item = &'a str>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => categories
                .into_iter()
                .any(|c| c.trim().eq_ignore_ascii_case(wanted)),
        }
    }
}

/// Everything a list view lets the operator tweak.
///
/// Every setter that narrows or widens the result set resets `page` to 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState<S> {
    pub search_query: String,
    pub status: StatusFilter<S>,
    pub category: CategoryFilter,
    pub page: u32,
    pub page_size: u32,
}

impl<S> Default for FilterState<S> {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl<S> FilterState<S> {
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            search_query: String::new(),
            status: StatusFilter::All,
            category: CategoryFilter::All,
            page: 1,
            page_size: page_size.max(1),
        }
    }
}

impl<S: PartialEq + Copy + std::fmt::Display> FilterState<S> {
    /// Returns `true` when the value changed.
    pub fn set_search(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        if query == self.search_query {
            return false;
        }
        self.search_query = query;
        self.page = 1;
        true
    }

    pub fn set_status(&mut self, status: StatusFilter<S>) -> bool {
        if status == self.status {
            return false;
        }
        self.status = status;
        self.page = 1;
        true
    }

    pub fn set_category(&mut self, category: CategoryFilter) -> bool {
        if category == self.category {
            return false;
        }
        self.category = category;
        self.page = 1;
        true
    }

    pub fn set_page_size(&mut self, page_size: u32) -> bool {
        let page_size = page_size.max(1);
        if page_size == self.page_size {
            return false;
        }
        self.page_size = page_size;
        self.page = 1;
        true
    }

    /// Moves to `page`, clamped to `[1, total_pages]`.
    pub fn set_page(&mut self, page: u32, total_pages: u32) -> bool {
        let page = page.clamp(1, total_pages.max(1));
        if page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    /// Query parameters for server-paginated endpoints.
    pub fn to_list_params(&self) -> ListParams {
        let search = self.search_query.trim();
        ListParams {
            page: self.page,
            limit: self.page_size,
            search: (!search.is_empty()).then(|| search.to_string()),
            status: match &self.status {
                StatusFilter::All => None,
                StatusFilter::Only(status) => Some(status.to_string()),
            },
            category: match &self.category {
                CategoryFilter::All => None,
                CategoryFilter::Only(category) => Some(category.clone()),
            },
        }
    }
}

fn search_matches<T: Listable>(item: &T, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    item.searchable_fields()
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
}

fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Whether `item` passes every active filter dimension.
pub fn matches<T: Listable>(item: &T, filters: &FilterState<T::Status>) -> bool {
    filters.status.admits(&item.status())
        && filters.category.admits(item.categories())
        && search_matches(item, &normalize_query(&filters.search_query))
}

/// Order-preserving selection of the items that pass `filters`.
pub fn filter_items<'a, T: Listable>(
    items: &'a [T],
    filters: &FilterState<T::Status>,
) -> Vec<&'a T> {
    let needle = normalize_query(&filters.search_query);
    items
        .iter()
        .filter(|item| {
            filters.status.admits(&item.status())
                && filters.category.admits(item.categories())
                && search_matches(*item, &needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_model::{
        Examiner, ExaminerId, ExaminerStatus, User, UserId, UserRole,
        UserStatus,
    };
    use chrono::Utc;

    fn user(name: &str, status: UserStatus, role: UserRole) -> User {
        User {
            id: UserId::new(),
            username: name.to_lowercase().replace(' ', "."),
            full_name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', "")),
            role,
            status,
            phone: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let users = vec![
            user("John Doe", UserStatus::Active, UserRole::Competitor),
            user("Jane Smith", UserStatus::Active, UserRole::Competitor),
        ];
        let mut filters = FilterState::default();
        filters.set_search("john");
        let found = filter_items(&users, &filters);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].full_name, "John Doe");
    }

    #[test]
    fn blank_search_matches_everything() {
        let users = vec![user("A B", UserStatus::Pending, UserRole::Staff)];
        let mut filters = FilterState::default();
        filters.set_search("   ");
        assert!(matches(&users[0], &filters));
    }

    #[test]
    fn dimensions_are_anded() {
        let users = vec![
            user("Ann Active", UserStatus::Active, UserRole::Guardian),
            user("Ann Suspended", UserStatus::Suspended, UserRole::Guardian),
            user("Ann Staff", UserStatus::Active, UserRole::Staff),
        ];
        let mut filters = FilterState::default();
        filters.set_search("ann");
        filters.set_status(StatusFilter::Only(UserStatus::Active));
        filters.set_category(CategoryFilter::parse("guardian"));
        let found = filter_items(&users, &filters);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].full_name, "Ann Active");
    }

    #[test]
    fn multi_valued_category_uses_membership() {
        let examiner = Examiner {
            id: ExaminerId::new(),
            full_name: "Minh Tran".into(),
            email: "minh@example.com".into(),
            specializations: vec!["Watercolor".into(), "Oil".into()],
            status: ExaminerStatus::Active,
            assigned_count: 0,
            created_at: Utc::now(),
        };
        let mut filters = FilterState::default();
        filters.set_category(CategoryFilter::Only("oil".into()));
        assert!(matches(&examiner, &filters));
        filters.set_category(CategoryFilter::Only("Digital".into()));
        assert!(!matches(&examiner, &filters));
    }

    #[test]
    fn every_filter_change_resets_page() {
        let mut filters: FilterState<UserStatus> = FilterState::default();
        filters.set_page(3, 5);
        assert_eq!(filters.page, 3);
        assert!(filters.set_search("x"));
        assert_eq!(filters.page, 1);

        filters.set_page(2, 5);
        assert!(filters.set_status(StatusFilter::Only(UserStatus::Active)));
        assert_eq!(filters.page, 1);

        filters.set_page(2, 5);
        assert!(filters.set_category(CategoryFilter::parse("STAFF")));
        assert_eq!(filters.page, 1);

        filters.set_page(2, 5);
        assert!(filters.set_page_size(20));
        assert_eq!(filters.page, 1);
    }

    #[test]
    fn unchanged_values_do_not_reset_page() {
        let mut filters: FilterState<UserStatus> = FilterState::default();
        filters.set_page(2, 5);
        assert!(!filters.set_search(""));
        assert!(!filters.set_page_size(DEFAULT_PAGE_SIZE));
        assert_eq!(filters.page, 2);
    }

    #[test]
    fn set_page_clamps() {
        let mut filters: FilterState<UserStatus> = FilterState::default();
        filters.set_page(9, 3);
        assert_eq!(filters.page, 3);
        filters.set_page(0, 3);
        assert_eq!(filters.page, 1);
    }

    #[test]
    fn list_params_forward_active_filters() {
        let mut filters: FilterState<UserStatus> = FilterState::with_page_size(25);
        filters.set_search("  doe ");
        filters.set_status(StatusFilter::Only(UserStatus::Suspended));
        let params = filters.to_list_params();
        assert_eq!(params.search.as_deref(), Some("doe"));
        assert_eq!(params.status.as_deref(), Some("SUSPENDED"));
        assert_eq!(params.category, None);
        assert_eq!(params.limit, 25);
    }
}
