macro_rules! v1_path {
    ($path:literal) => {
        concat!("/api/v1", $path)
    };
}

/// Versioned REST routes consumed by the admin console.
pub mod v1 {
    pub const ROOT: &str = "/api/v1";
    pub const VERSION: &str = "v1";

    pub mod auth {
        pub const ME: &str = v1_path!("/auth/me");
    }

    pub mod users {
        pub const COLLECTION: &str = v1_path!("/users");
        pub const ITEM: &str = v1_path!("/users/{id}");
        pub const BAN: &str = v1_path!("/users/{id}/ban");
        pub const ACTIVATE: &str = v1_path!("/users/{id}/activate");
    }

    pub mod contests {
        pub const COLLECTION: &str = v1_path!("/staff/contests");
        pub const ITEM: &str = v1_path!("/staff/contests/{id}");
        pub const STATUS: &str = v1_path!("/staff/contests/{id}/status");
    }

    pub mod rounds {
        pub const ITEM: &str = v1_path!("/staff/rounds/{id}");
        pub const STATUS: &str = v1_path!("/staff/rounds/{id}/status");
    }

    pub mod submissions {
        pub const COLLECTION: &str = v1_path!("/staff/submissions");
        pub const ITEM: &str = v1_path!("/staff/submissions/{id}");
        pub const ACCEPT: &str = v1_path!("/staff/submissions/{id}/accept");
        pub const REJECT: &str = v1_path!("/staff/submissions/{id}/reject");
    }

    pub mod awards {
        pub const BY_CONTEST: &str =
            v1_path!("/staff/contests/{contest_id}/awards");
        pub const BATCH: &str = v1_path!("/staff/awards/batch");
        pub const ITEM: &str = v1_path!("/staff/awards/{id}");
    }

    pub mod campaigns {
        pub const COLLECTION: &str = v1_path!("/campaigns");
        pub const ITEM: &str = v1_path!("/campaigns/{id}");
        pub const STATUS: &str = v1_path!("/campaigns/{id}/status");
        pub const SPONSORS: &str = v1_path!("/campaigns/{id}/sponsors");
    }

    pub mod exhibitions {
        pub const COLLECTION: &str = v1_path!("/exhibitions");
        pub const ITEM: &str = v1_path!("/exhibitions/{id}");
        pub const STATUS: &str = v1_path!("/exhibitions/{id}/status");
    }

    pub mod posts {
        pub const COLLECTION: &str = v1_path!("/posts");
        pub const ITEM: &str = v1_path!("/posts/{id}");
        pub const STATUS: &str = v1_path!("/posts/{id}/status");
    }

    pub mod examiners {
        pub const COLLECTION: &str = v1_path!("/staff/examiners");
        pub const STATUS: &str = v1_path!("/staff/examiners/{id}/status");
    }

    pub mod paintings {
        pub const UPLOAD: &str = v1_path!("/paintings/upload");
        pub const UPLOAD_ROUND2: &str = v1_path!("/paintings/upload/round2");
    }
}

/// Helper utilities for working with route templates
pub mod utils {
    /// Replace a single path parameter (e.g. `"{id}"`) with the provided value.
    pub fn replace_param(
        route: &str,
        param: &str,
        value: impl AsRef<str>,
    ) -> String {
        route.replace(param, value.as_ref())
    }

    /// Append percent-encoded query parameters to the provided route.
    pub fn with_query(route: &str, params: &[(&str, String)]) -> String {
        if params.is_empty() {
            return route.to_string();
        }

        let mut path =
            String::with_capacity(route.len() + 1 + params.len() * 8);
        path.push_str(route);
        path.push('?');

        for (i, (key, value)) in params.iter().enumerate() {
            if i > 0 {
                path.push('&');
            }
            path.push_str(key);
            path.push('=');
            path.push_str(&urlencoding::encode(value));
        }

        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_carry_version_prefix() {
        assert_eq!(v1::users::BAN, "/api/v1/users/{id}/ban");
        assert!(v1::submissions::REJECT.starts_with(v1::ROOT));
    }

    #[test]
    fn query_values_are_encoded() {
        let path = utils::with_query(
            v1::users::COLLECTION,
            &[("page", "1".into()), ("search", "john doe&co".into())],
        );
        assert_eq!(path, "/api/v1/users?page=1&search=john%20doe%26co");
    }
}
