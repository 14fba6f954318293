//! UI labels per language. List logic never branches on the language; pages
//! only look labels up by key.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Vietnamese,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Vietnamese => "vi",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "vi" | "vietnamese" => Ok(Language::Vietnamese),
            other => Err(format!("unsupported language: {other}")),
        }
    }
}

const ENGLISH: &[(&str, &str)] = &[
    ("page", "Page"),
    ("of", "of"),
    ("no_results", "No results"),
    ("loading", "Loading..."),
    ("retry", "Retry"),
    ("search", "Search"),
    ("status", "Status"),
    ("category", "Category"),
    ("actions", "Actions"),
    ("name", "Name"),
    ("title", "Title"),
    ("email", "Email"),
    ("role", "Role"),
    ("created", "Created"),
    ("progress", "Progress"),
    ("competitor", "Competitor"),
    ("round", "Round"),
    ("author", "Author"),
    ("specializations", "Specializations"),
    ("dates", "Dates"),
    ("total", "Total"),
];

const VIETNAMESE: &[(&str, &str)] = &[
    ("page", "Trang"),
    ("of", "/"),
    ("no_results", "Không có kết quả"),
    ("loading", "Đang tải..."),
    ("retry", "Thử lại"),
    ("search", "Tìm kiếm"),
    ("status", "Trạng thái"),
    ("category", "Danh mục"),
    ("actions", "Thao tác"),
    ("name", "Tên"),
    ("title", "Tiêu đề"),
    ("email", "Email"),
    ("role", "Vai trò"),
    ("created", "Ngày tạo"),
    ("progress", "Tiến độ"),
    ("competitor", "Thí sinh"),
    ("round", "Vòng"),
    ("author", "Tác giả"),
    ("specializations", "Chuyên môn"),
    ("dates", "Thời gian"),
    ("total", "Tổng"),
];

/// Precomputed labels for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSettings {
    language: Language,
    labels: HashMap<&'static str, &'static str>,
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl LocaleSettings {
    pub fn new(language: Language) -> Self {
        let table = match language {
            Language::English => ENGLISH,
            Language::Vietnamese => VIETNAMESE,
        };
        Self {
            language,
            labels: table.iter().copied().collect(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Falls back to the key itself for unknown labels.
    pub fn label<'a>(&self, key: &'a str) -> &'a str {
        self.labels.get(key).copied().unwrap_or(key)
    }

    /// "Page 2 of 5" / "Trang 2 / 5".
    pub fn page_label(&self, page: u32, total_pages: u32) -> String {
        format!(
            "{} {} {} {}",
            self.label("page"),
            page,
            self.label("of"),
            total_pages.max(1)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_fall_back() {
        let locale = LocaleSettings::new(Language::Vietnamese);
        assert_eq!(locale.label("status"), "Trạng thái");
        assert_eq!(locale.label("missing_key"), "missing_key");
    }

    #[test]
    fn empty_list_reads_page_one_of_one() {
        assert_eq!(LocaleSettings::default().page_label(1, 0), "Page 1 of 1");
    }

    #[test]
    fn language_parses_codes() {
        assert_eq!("VI".parse::<Language>(), Ok(Language::Vietnamese));
        assert!("fr".parse::<Language>().is_err());
    }
}
