//! Plain-text rendering of list views for the terminal.

use atelier_core::context::LocaleSettings;
use atelier_core::query::PageResult;
use atelier_core::stats::{StatusCounts, progress_percent};
use atelier_core::{ListView, Listable, LoadState, Notice, StatusWorkflow};
use atelier_model::{
    Award, Campaign, Contest, Examiner, Exhibition, PageMeta, Post, Round,
    Submission, User,
};
use chrono::{DateTime, Utc};

/// Entity-specific table columns. Headers are locale label keys.
pub trait TableRow {
    fn headers() -> &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

fn date(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d").to_string()
}

fn span(start: &DateTime<Utc>, end: &DateTime<Utc>) -> String {
    format!("{} - {}", date(start), date(end))
}

impl TableRow for User {
    fn headers() -> &'static [&'static str] {
        &["name", "email", "role", "created"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.full_name.clone(),
            self.email.clone(),
            self.role.label().to_string(),
            date(&self.created_at),
        ]
    }
}

impl TableRow for Contest {
    fn headers() -> &'static [&'static str] {
        &["title", "dates", "round"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            span(&self.start_date, &self.end_date),
            self.rounds.len().to_string(),
        ]
    }
}

impl TableRow for Round {
    fn headers() -> &'static [&'static str] {
        &["name", "category", "dates"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.table.clone().unwrap_or_default(),
            span(&self.start_date, &self.end_date),
        ]
    }
}

impl TableRow for Submission {
    fn headers() -> &'static [&'static str] {
        &["title", "competitor", "round", "created"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.competitor_name.clone(),
            self.round_name.clone().unwrap_or_default(),
            date(&self.created_at),
        ]
    }
}

impl TableRow for Campaign {
    fn headers() -> &'static [&'static str] {
        &["title", "progress", "dates"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            format!(
                "{}% ({:.0}/{:.0})",
                progress_percent(self.current_amount, self.goal_amount),
                self.current_amount,
                self.goal_amount
            ),
            span(&self.start_date, &self.end_date),
        ]
    }
}

impl TableRow for Exhibition {
    fn headers() -> &'static [&'static str] {
        &["title", "dates"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.title.clone(), span(&self.start_date, &self.end_date)]
    }
}

impl TableRow for Post {
    fn headers() -> &'static [&'static str] {
        &["title", "author", "category", "created"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.author_name.clone(),
            self.category.clone(),
            date(&self.created_at),
        ]
    }
}

impl TableRow for Examiner {
    fn headers() -> &'static [&'static str] {
        &["name", "email", "specializations"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.full_name.clone(),
            self.email.clone(),
            self.specializations.join(", "),
        ]
    }
}

impl TableRow for Award {
    fn headers() -> &'static [&'static str] {
        &["rank", "name", "quantity", "prize"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.rank.to_string(),
            self.name.clone(),
            self.quantity.to_string(),
            format!("{:.2}", self.prize),
        ]
    }
}

/// Left-aligned columns separated by two spaces.
fn table(headers: Vec<String>, rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> =
        headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    for row in std::iter::once(&headers).chain(rows.iter()) {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let pad = width.saturating_sub(cell.chars().count());
                format!("{cell}{}", " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn push_line(out: &mut String, text: impl AsRef<str>) {
    out.push_str(text.as_ref());
    out.push('\n');
}

fn footer(out: &mut String, meta: &PageMeta, locale: &LocaleSettings) {
    push_line(
        out,
        format!(
            "{}  ({} {})",
            locale.page_label(meta.page, meta.total_pages),
            meta.total,
            locale.label("total")
        ),
    );
}

/// Render a list view. The page indicator is always printed, also for
/// empty and single-page results.
pub fn render_list<T>(
    view: &ListView<T>,
    locale: &LocaleSettings,
    notice: Option<&Notice>,
) -> String
where
    T: Listable + TableRow,
{
    let mut out = String::new();
    if let Some(notice) = notice {
        push_line(&mut out, notice.to_string());
    }

    match &view.state {
        LoadState::Loading => {
            push_line(&mut out, locale.label("loading"));
            return out;
        }
        LoadState::Errored(message) => {
            push_line(&mut out, format!("error: {message} ({})", locale.label("retry")));
            return out;
        }
        LoadState::Idle | LoadState::Loaded => {}
    }

    if view.is_empty() {
        push_line(&mut out, locale.label("no_results"));
    } else {
        let mut headers = vec!["id".to_string()];
        headers.extend(T::headers().iter().map(|key| locale.label(key).to_string()));
        headers.push(locale.label("status").to_string());
        headers.push(locale.label("actions").to_string());

        let rows = view
            .rows
            .iter()
            .map(|row| {
                let mut cells = vec![row.item.id().to_string()];
                cells.extend(row.item.cells());
                cells.push(row.item.status().to_string());
                cells.push(if row.pending {
                    "(pending)".to_string()
                } else {
                    row.actions
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                });
                cells
            })
            .collect();
        out.push_str(&table(headers, rows));
    }

    footer(&mut out, &view.meta, locale);
    out
}

/// Render a page of rows that have no status workflow.
pub fn render_page<T: TableRow>(page: &PageResult<T>, locale: &LocaleSettings) -> String {
    let mut out = String::new();
    if page.is_empty() {
        push_line(&mut out, locale.label("no_results"));
    } else {
        let headers = T::headers()
            .iter()
            .map(|key| locale.label(key).to_string())
            .collect();
        let rows = page.items.iter().map(TableRow::cells).collect();
        out.push_str(&table(headers, rows));
    }
    footer(&mut out, &page.meta, locale);
    out
}

/// One line of `STATUS: n` badges.
pub fn render_counts<S: StatusWorkflow>(
    counts: &StatusCounts<S>,
    locale: &LocaleSettings,
) -> String {
    let badges = counts
        .entries()
        .into_iter()
        .map(|(status, count)| format!("{status}: {count}"))
        .collect::<Vec<_>>()
        .join("  ");
    format!("{badges}  {}: {}", locale.label("total"), counts.total())
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::Row;
    use atelier_core::context::Language;
    use atelier_core::stats::tally;
    use atelier_core::workflow::row_actions;
    use atelier_model::{UserId, UserRole, UserStatus};

    fn user(name: &str) -> User {
        User {
            id: UserId::new(),
            username: name.to_lowercase(),
            full_name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            role: UserRole::Competitor,
            status: UserStatus::Active,
            phone: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_view_still_shows_page_indicator() {
        let view: ListView<User> = ListView {
            rows: Vec::new(),
            meta: PageMeta::compute(0, 1, 10),
            state: LoadState::Loaded,
        };
        let out = render_list(&view, &LocaleSettings::default(), None);
        assert!(out.contains("No results"), "{out}");
        assert!(out.contains("Page 1 of 1"), "{out}");
    }

    #[test]
    fn rows_list_their_actions() {
        let john = user("John Doe");
        let view = ListView {
            rows: vec![Row {
                actions: row_actions(john.status),
                pending: false,
                item: john.clone(),
            }],
            meta: PageMeta::compute(1, 1, 10),
            state: LoadState::Loaded,
        };
        let out = render_list(&view, &LocaleSettings::default(), None);
        assert!(out.contains("John Doe"));
        assert!(out.contains("edit, suspend"), "{out}");
        assert!(out.contains(&john.id.to_string()));
    }

    #[test]
    fn errored_view_offers_retry() {
        let view: ListView<User> = ListView {
            rows: Vec::new(),
            meta: PageMeta::compute(0, 1, 10),
            state: LoadState::Errored("Could not reach the server".into()),
        };
        let out = render_list(&view, &LocaleSettings::new(Language::English), None);
        assert!(out.starts_with("error: Could not reach the server"));
    }

    #[test]
    fn each_message_ends_its_own_line() {
        let view: ListView<User> = ListView {
            rows: Vec::new(),
            meta: PageMeta::compute(0, 1, 10),
            state: LoadState::Loaded,
        };
        let out = render_list(&view, &LocaleSettings::new(Language::English), None);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2, "{out}");
        assert_eq!(lines[0], "No results");
        assert!(lines[1].starts_with("Page 1 of 1"), "{out}");
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn counts_include_zero_statuses() {
        let counts = tally([UserStatus::Active, UserStatus::Active]);
        let line = render_counts(&counts, &LocaleSettings::default());
        assert!(line.starts_with("ACTIVE: 2  SUSPENDED: 0  PENDING: 0"), "{line}");
    }
}
