//! Label aggregations over an issue collection.
//!
//! Three stateless aggregators turn a flat list of issues into tables:
//!
//! * [`LabelInteractionAggregator`] – users ranked by how often they touched
//!   one label.
//! * [`LabelAdoptionAggregator`] – each label's share of the labeling
//!   activity per calendar year.
//! * [`UserTrendAggregator`] – labeled events per month and label, for one
//!   user or everybody.
//!
//! Each returns [`AggregateOutcome::NoData`] when nothing qualified.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use insights_core::config::{LabelInteractionConfig, UserTrendConfig};
use insights_core::formatting::percentage;
use insights_core::models::Issue;
use insights_core::time_utils::{Calendar, YearMonth};
use serde::Serialize;
use tracing::debug;

/// Number of users forwarded to presentation by the interaction analysis.
pub const TOP_INTERACTIONS: usize = 20;

// ── AggregateOutcome ──────────────────────────────────────────────────────────

/// Result of one aggregation: a table, or the designed "nothing qualified"
/// outcome which callers report and then skip rendering.
///
/// Serializes as the table itself, or `null` for no data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AggregateOutcome<T> {
    Data(T),
    NoData,
}

impl<T> AggregateOutcome<T> {
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }

    /// The table, or `None` for [`AggregateOutcome::NoData`].
    pub fn data(self) -> Option<T> {
        match self {
            Self::Data(t) => Some(t),
            Self::NoData => None,
        }
    }

    pub fn as_data(&self) -> Option<&T> {
        match self {
            Self::Data(t) => Some(t),
            Self::NoData => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> AggregateOutcome<U> {
        match self {
            Self::Data(t) => AggregateOutcome::Data(f(t)),
            Self::NoData => AggregateOutcome::NoData,
        }
    }
}

// ── Label interactions ────────────────────────────────────────────────────────

/// One user's interaction count for the target label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInteractions {
    pub user: String,
    pub interactions: u64,
}

/// Users ranked by interaction count, descending.
///
/// Ties keep the order in which users were first encountered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionTable {
    pub label: String,
    pub rows: Vec<UserInteractions>,
}

impl InteractionTable {
    /// The first `n` rows.
    pub fn top(&self, n: usize) -> &[UserInteractions] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Sum of all interaction counts.
    pub fn total(&self) -> u64 {
        self.rows.iter().map(|r| r.interactions).sum()
    }
}

/// Counts creators and event authors on issues carrying one label.
pub struct LabelInteractionAggregator {
    label: String,
}

impl LabelInteractionAggregator {
    pub fn new(config: &LabelInteractionConfig) -> Self {
        Self {
            label: config.label().to_string(),
        }
    }

    /// For each issue with the target label, count its creator once and the
    /// author of every event on that label once.
    pub fn aggregate(&self, issues: &[Issue]) -> AggregateOutcome<InteractionTable> {
        let mut counts: Vec<UserInteractions> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        let mut bump = |user: &str| {
            let idx = *index.entry(user.to_string()).or_insert_with(|| {
                counts.push(UserInteractions {
                    user: user.to_string(),
                    interactions: 0,
                });
                counts.len() - 1
            });
            counts[idx].interactions += 1;
        };

        for issue in issues.iter().filter(|i| i.has_label(&self.label)) {
            if let Some(creator) = issue.creator() {
                bump(creator);
            }
            for event in issue
                .events
                .iter()
                .filter(|e| e.label() == Some(self.label.as_str()))
            {
                if let Some(author) = event.author() {
                    bump(author);
                }
            }
        }

        counts.retain(|r| r.interactions > 0);
        // Stable sort keeps first-seen order among equal counts.
        counts.sort_by(|a, b| b.interactions.cmp(&a.interactions));

        debug!(
            "label '{}': {} users with interactions",
            self.label,
            counts.len()
        );

        if counts.is_empty() {
            return AggregateOutcome::NoData;
        }

        AggregateOutcome::Data(InteractionTable {
            label: self.label.clone(),
            rows: counts,
        })
    }
}

// ── Label adoption ────────────────────────────────────────────────────────────

/// One label's share of a year's labeling activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdoptionRow {
    pub year: i32,
    pub label: String,
    /// Labeled events for this label in this year.
    pub count: u64,
    /// `count` as a percentage of all labeled events in this year.
    pub percentage: f64,
}

/// Rows ordered by year ascending, then label ascending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdoptionTable {
    pub rows: Vec<AdoptionRow>,
}

impl AdoptionTable {
    /// Distinct years, ascending.
    pub fn years(&self) -> Vec<i32> {
        let set: BTreeSet<i32> = self.rows.iter().map(|r| r.year).collect();
        set.into_iter().collect()
    }

    /// Distinct labels, ascending.
    pub fn labels(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.rows.iter().map(|r| r.label.as_str()).collect();
        set.into_iter().map(str::to_string).collect()
    }

    pub fn rows_for_year(&self, year: i32) -> impl Iterator<Item = &AdoptionRow> {
        self.rows.iter().filter(move |r| r.year == year)
    }

    /// Percentage for `(year, label)`, or `0.0` when the label was not used
    /// that year.
    pub fn percentage(&self, year: i32, label: &str) -> f64 {
        self.rows
            .iter()
            .find(|r| r.year == year && r.label == label)
            .map(|r| r.percentage)
            .unwrap_or(0.0)
    }
}

/// Computes each label's yearly share of labeled events.
pub struct LabelAdoptionAggregator {
    calendar: Calendar,
}

impl LabelAdoptionAggregator {
    pub fn new(calendar: Calendar) -> Self {
        Self { calendar }
    }

    /// A qualifying event is a `labeled` event with a label and a date.
    pub fn aggregate(&self, issues: &[Issue]) -> AggregateOutcome<AdoptionTable> {
        let mut counts: BTreeMap<(i32, String), u64> = BTreeMap::new();
        let mut year_totals: BTreeMap<i32, u64> = BTreeMap::new();

        for event in issues.iter().flat_map(|i| i.labeled_events()) {
            let (Some(label), Some(date)) = (event.label(), event.event_date) else {
                continue;
            };
            let year = self.calendar.year_of(date);
            *counts.entry((year, label.to_string())).or_default() += 1;
            *year_totals.entry(year).or_default() += 1;
        }

        if counts.is_empty() {
            return AggregateOutcome::NoData;
        }

        let rows = counts
            .into_iter()
            .map(|((year, label), count)| {
                let total = year_totals.get(&year).copied().unwrap_or(0);
                AdoptionRow {
                    year,
                    label,
                    count,
                    percentage: percentage(count as f64, total as f64),
                }
            })
            .collect::<Vec<_>>();

        debug!(
            "label adoption: {} (year, label) rows over {} years",
            rows.len(),
            year_totals.len()
        );

        AggregateOutcome::Data(AdoptionTable { rows })
    }
}

// ── User label-usage trend ────────────────────────────────────────────────────

/// Dense month × label matrix of labeled-event counts.
///
/// Rows are the months that had at least one qualifying event, in
/// chronological order; gaps between them are not filled. Every row has one
/// cell per label in `labels`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserTrendTable {
    /// `None` when events of every user were counted.
    pub user: Option<String>,
    pub months: Vec<YearMonth>,
    /// Column names, ascending.
    pub labels: Vec<String>,
    /// `counts[row][col]` is the count for `months[row]` and `labels[col]`.
    pub counts: Vec<Vec<u64>>,
}

impl UserTrendTable {
    /// Count for one cell, `0` when the month or label is unknown.
    pub fn count(&self, month: YearMonth, label: &str) -> u64 {
        let Some(row) = self.months.iter().position(|m| *m == month) else {
            return 0;
        };
        let Some(col) = self.labels.iter().position(|l| l == label) else {
            return 0;
        };
        self.counts[row][col]
    }

    /// One label's counts across all months.
    pub fn column(&self, label: &str) -> Option<Vec<u64>> {
        let col = self.labels.iter().position(|l| l == label)?;
        Some(self.counts.iter().map(|row| row[col]).collect())
    }

    /// Remove label columns whose count is zero in every month.
    pub fn drop_zero_columns(&mut self) {
        let keep: Vec<bool> = (0..self.labels.len())
            .map(|col| self.counts.iter().any(|row| row[col] != 0))
            .collect();

        let mut col = 0;
        self.labels.retain(|_| {
            let k = keep[col];
            col += 1;
            k
        });
        for row in &mut self.counts {
            let mut col = 0;
            row.retain(|_| {
                let k = keep[col];
                col += 1;
                k
            });
        }
    }
}

/// Counts labeled events per month and label.
pub struct UserTrendAggregator {
    user: Option<String>,
    calendar: Calendar,
}

impl UserTrendAggregator {
    pub fn new(config: &UserTrendConfig, calendar: Calendar) -> Self {
        Self {
            user: config.user.clone(),
            calendar,
        }
    }

    /// A qualifying event is a `labeled` event with a label and a date whose
    /// author equals the configured user exactly (any author when no user is
    /// configured).
    pub fn aggregate(&self, issues: &[Issue]) -> AggregateOutcome<UserTrendTable> {
        let mut cells: BTreeMap<(YearMonth, String), u64> = BTreeMap::new();

        for event in issues.iter().flat_map(|i| i.labeled_events()) {
            if let Some(user) = &self.user {
                if event.author.as_deref() != Some(user.as_str()) {
                    continue;
                }
            }
            let (Some(label), Some(date)) = (event.label(), event.event_date) else {
                continue;
            };
            let month = self.calendar.month_of(date);
            *cells.entry((month, label.to_string())).or_default() += 1;
        }

        if cells.is_empty() {
            return AggregateOutcome::NoData;
        }

        let months: Vec<YearMonth> = cells
            .keys()
            .map(|(m, _)| *m)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let labels: Vec<String> = cells
            .keys()
            .map(|(_, l)| l.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut counts = vec![vec![0u64; labels.len()]; months.len()];
        for ((month, label), count) in &cells {
            // Both lookups succeed: months and labels were built from these keys.
            if let (Ok(row), Ok(col)) = (months.binary_search(month), labels.binary_search(label))
            {
                counts[row][col] = *count;
            }
        }

        let mut table = UserTrendTable {
            user: self.user.clone(),
            months,
            labels,
            counts,
        };
        table.drop_zero_columns();

        debug!(
            "user trend ({}): {} months x {} labels",
            self.user.as_deref().unwrap_or("all users"),
            table.months.len(),
            table.labels.len()
        );

        AggregateOutcome::Data(table)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use insights_core::models::Event;

    fn ts(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn labeled(author: Option<&str>, label: &str, date: &str) -> Event {
        Event {
            event_type: "labeled".to_string(),
            author: author.map(str::to_string),
            event_date: Some(ts(date)),
            label: Some(label.to_string()),
            comment: None,
        }
    }

    fn issue(creator: Option<&str>, labels: &[&str], events: Vec<Event>) -> Issue {
        Issue {
            creator: creator.map(str::to_string),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            events,
            ..Default::default()
        }
    }

    fn month(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    fn interactions(label: &str) -> LabelInteractionAggregator {
        LabelInteractionAggregator::new(&LabelInteractionConfig::new(Some(label)).unwrap())
    }

    fn user_trend(user: Option<&str>) -> UserTrendAggregator {
        UserTrendAggregator::new(&UserTrendConfig::new(user), Calendar::utc())
    }

    // ── AggregateOutcome ──────────────────────────────────────────────────────

    #[test]
    fn test_outcome_helpers() {
        let data: AggregateOutcome<u32> = AggregateOutcome::Data(3);
        assert!(!data.is_no_data());
        assert_eq!(data.as_data(), Some(&3));
        assert_eq!(data.map(|v| v * 2).data(), Some(6));

        let none: AggregateOutcome<u32> = AggregateOutcome::NoData;
        assert!(none.is_no_data());
        assert_eq!(none.data(), None);
    }

    // ── LabelInteractionAggregator ────────────────────────────────────────────

    #[test]
    fn test_interactions_creator_and_event_authors() {
        let issues = vec![issue(
            Some("creator_user"),
            &["bug", "enhancement"],
            vec![
                labeled(Some("user1"), "bug", "2023-01-15T00:00:00Z"),
                labeled(Some("user2"), "bug", "2023-02-20T00:00:00Z"),
            ],
        )];

        let table = interactions("bug").aggregate(&issues).data().unwrap();
        assert_eq!(table.label, "bug");
        assert_eq!(table.rows.len(), 3);
        for user in ["creator_user", "user1", "user2"] {
            let row = table.rows.iter().find(|r| r.user == user).unwrap();
            assert_eq!(row.interactions, 1, "user {user}");
        }
    }

    #[test]
    fn test_interactions_sorted_descending_with_stable_ties() {
        let issues = vec![
            issue(Some("zed"), &["bug"], vec![]),
            issue(
                Some("amy"),
                &["bug"],
                vec![labeled(Some("amy"), "bug", "2023-01-01T00:00:00Z")],
            ),
            issue(Some("bob"), &["bug"], vec![]),
        ];

        let table = interactions("bug").aggregate(&issues).data().unwrap();
        let users: Vec<&str> = table.rows.iter().map(|r| r.user.as_str()).collect();
        // amy has 2; zed and bob tie at 1 and keep first-seen order.
        assert_eq!(users, vec!["amy", "zed", "bob"]);
        assert_eq!(table.rows[0].interactions, 2);
    }

    #[test]
    fn test_interactions_skip_missing_creator_and_author() {
        let issues = vec![issue(
            None,
            &["bug"],
            vec![
                labeled(None, "bug", "2023-01-01T00:00:00Z"),
                labeled(Some(""), "bug", "2023-01-02T00:00:00Z"),
                labeled(Some("dev"), "bug", "2023-01-03T00:00:00Z"),
            ],
        )];

        let table = interactions("bug").aggregate(&issues).data().unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].user, "dev");
        assert_eq!(table.total(), 1);
    }

    #[test]
    fn test_interactions_ignore_issues_without_label() {
        let issues = vec![issue(
            Some("someone"),
            &["docs"],
            vec![labeled(Some("other"), "bug", "2023-01-01T00:00:00Z")],
        )];
        assert!(interactions("bug").aggregate(&issues).is_no_data());
    }

    #[test]
    fn test_interactions_ignore_events_on_other_labels() {
        let issues = vec![issue(
            Some("creator"),
            &["bug", "docs"],
            vec![labeled(Some("writer"), "docs", "2023-01-01T00:00:00Z")],
        )];
        let table = interactions("bug").aggregate(&issues).data().unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].user, "creator");
    }

    #[test]
    fn test_interactions_count_any_event_type_on_label() {
        let mut unlabel = labeled(Some("triager"), "bug", "2023-03-01T00:00:00Z");
        unlabel.event_type = "unlabeled".to_string();
        let issues = vec![issue(None, &["bug"], vec![unlabel])];

        let table = interactions("bug").aggregate(&issues).data().unwrap();
        assert_eq!(table.rows[0].user, "triager");
    }

    #[test]
    fn test_interactions_sum_matches_qualifying_records() {
        let issues = vec![
            issue(
                Some("a"),
                &["bug"],
                vec![
                    labeled(Some("b"), "bug", "2023-01-01T00:00:00Z"),
                    labeled(None, "bug", "2023-01-02T00:00:00Z"),
                    labeled(Some("a"), "bug", "2023-01-03T00:00:00Z"),
                ],
            ),
            issue(None, &["bug"], vec![labeled(Some("c"), "bug", "2023-02-01T00:00:00Z")]),
            issue(Some("d"), &["docs"], vec![]),
        ];
        // creators with a login on "bug" issues: 1; events with an author: 3.
        let table = interactions("bug").aggregate(&issues).data().unwrap();
        assert_eq!(table.total(), 4);
        assert!(table.rows.iter().all(|r| r.interactions >= 1));
    }

    #[test]
    fn test_interactions_top_truncates() {
        let issues: Vec<Issue> = (0..25)
            .map(|i| issue(Some(&format!("user{i}")), &["bug"], vec![]))
            .collect();
        let table = interactions("bug").aggregate(&issues).data().unwrap();
        assert_eq!(table.rows.len(), 25);
        assert_eq!(table.top(TOP_INTERACTIONS).len(), 20);
        assert_eq!(table.top(TOP_INTERACTIONS)[0].user, "user0");
        assert_eq!(table.top(100).len(), 25);
    }

    #[test]
    fn test_interactions_empty_input_is_no_data() {
        assert!(interactions("bug").aggregate(&[]).is_no_data());
    }

    // ── LabelAdoptionAggregator ───────────────────────────────────────────────

    #[test]
    fn test_adoption_two_labels_split_evenly() {
        let issues = vec![
            issue(
                None,
                &["bug"],
                vec![labeled(Some("user1"), "bug", "2023-01-15T00:00:00Z")],
            ),
            issue(
                None,
                &["enhancement"],
                vec![labeled(Some("user2"), "enhancement", "2023-02-20T00:00:00Z")],
            ),
        ];

        let table = LabelAdoptionAggregator::new(Calendar::utc())
            .aggregate(&issues)
            .data()
            .unwrap();
        assert_eq!(table.rows.len(), 2);
        assert!((table.percentage(2023, "bug") - 50.0).abs() < 1e-9);
        assert!((table.percentage(2023, "enhancement") - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_adoption_percentages_sum_to_hundred_per_year() {
        let issues = vec![issue(
            None,
            &[],
            vec![
                labeled(Some("a"), "bug", "2022-03-01T00:00:00Z"),
                labeled(Some("a"), "bug", "2022-04-01T00:00:00Z"),
                labeled(Some("b"), "docs", "2022-05-01T00:00:00Z"),
                labeled(Some("c"), "ui", "2023-01-01T00:00:00Z"),
                labeled(Some("c"), "bug", "2023-06-01T00:00:00Z"),
                labeled(Some("c"), "docs", "2023-07-01T00:00:00Z"),
            ],
        )];

        let table = LabelAdoptionAggregator::new(Calendar::utc())
            .aggregate(&issues)
            .data()
            .unwrap();
        assert_eq!(table.years(), vec![2022, 2023]);
        for year in table.years() {
            let sum: f64 = table.rows_for_year(year).map(|r| r.percentage).sum();
            assert!((sum - 100.0).abs() < 1e-6, "year {year} sums to {sum}");
        }
        assert!((table.percentage(2022, "bug") - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(table.percentage(2022, "ui"), 0.0);
    }

    #[test]
    fn test_adoption_rows_ordered_by_year_then_label() {
        let issues = vec![issue(
            None,
            &[],
            vec![
                labeled(None, "zeta", "2024-01-01T00:00:00Z"),
                labeled(None, "alpha", "2024-01-01T00:00:00Z"),
                labeled(None, "zeta", "2021-01-01T00:00:00Z"),
            ],
        )];
        let table = LabelAdoptionAggregator::new(Calendar::utc())
            .aggregate(&issues)
            .data()
            .unwrap();
        let keys: Vec<(i32, &str)> = table
            .rows
            .iter()
            .map(|r| (r.year, r.label.as_str()))
            .collect();
        assert_eq!(keys, vec![(2021, "zeta"), (2024, "alpha"), (2024, "zeta")]);
        assert_eq!(table.labels(), vec!["alpha".to_string(), "zeta".to_string()]);
    }

    #[test]
    fn test_adoption_ignores_non_labeled_and_unlabelled_events() {
        let mut unlabeled = labeled(Some("x"), "bug", "2023-01-01T00:00:00Z");
        unlabeled.event_type = "unlabeled".to_string();
        let mut no_label = labeled(Some("x"), "bug", "2023-01-01T00:00:00Z");
        no_label.label = None;
        let mut no_date = labeled(Some("x"), "bug", "2023-01-01T00:00:00Z");
        no_date.event_date = None;

        let issues = vec![issue(None, &["bug"], vec![unlabeled, no_label, no_date])];
        assert!(LabelAdoptionAggregator::new(Calendar::utc())
            .aggregate(&issues)
            .is_no_data());
    }

    #[test]
    fn test_adoption_does_not_assume_sorted_events() {
        let issues = vec![issue(
            None,
            &[],
            vec![
                labeled(None, "bug", "2024-05-01T00:00:00Z"),
                labeled(None, "bug", "2020-05-01T00:00:00Z"),
            ],
        )];
        let table = LabelAdoptionAggregator::new(Calendar::utc())
            .aggregate(&issues)
            .data()
            .unwrap();
        assert_eq!(table.years(), vec![2020, 2024]);
        assert!((table.percentage(2020, "bug") - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_adoption_empty_input_is_no_data() {
        assert!(LabelAdoptionAggregator::new(Calendar::utc())
            .aggregate(&[])
            .is_no_data());
    }

    // ── UserTrendAggregator ───────────────────────────────────────────────────

    #[test]
    fn test_user_trend_two_months_two_labels() {
        let issues = vec![issue(
            Some("creator_user"),
            &["bug", "enhancement"],
            vec![
                labeled(Some("test_user"), "bug", "2023-01-15T00:00:00Z"),
                labeled(Some("test_user"), "enhancement", "2023-02-20T00:00:00Z"),
            ],
        )];

        let table = user_trend(Some("test_user")).aggregate(&issues).data().unwrap();
        assert_eq!(table.labels, vec!["bug".to_string(), "enhancement".to_string()]);
        assert_eq!(table.months, vec![month("2023-01"), month("2023-02")]);
        assert_eq!(table.count(month("2023-01"), "bug"), 1);
        assert_eq!(table.count(month("2023-02"), "bug"), 0);
        assert_eq!(table.count(month("2023-01"), "enhancement"), 0);
        assert_eq!(table.count(month("2023-02"), "enhancement"), 1);
        assert_eq!(table.user.as_deref(), Some("test_user"));
    }

    #[test]
    fn test_user_trend_filters_author_exactly() {
        let issues = vec![issue(
            None,
            &[],
            vec![
                labeled(Some("Test_User"), "bug", "2023-01-15T00:00:00Z"),
                labeled(Some("test_user "), "bug", "2023-01-16T00:00:00Z"),
                labeled(None, "bug", "2023-01-17T00:00:00Z"),
            ],
        )];
        assert!(user_trend(Some("test_user")).aggregate(&issues).is_no_data());
    }

    #[test]
    fn test_user_trend_all_users_when_unspecified() {
        let issues = vec![issue(
            None,
            &[],
            vec![
                labeled(Some("a"), "bug", "2023-01-15T00:00:00Z"),
                labeled(Some("b"), "bug", "2023-01-20T00:00:00Z"),
                labeled(None, "bug", "2023-01-21T00:00:00Z"),
            ],
        )];
        let table = user_trend(None).aggregate(&issues).data().unwrap();
        assert_eq!(table.count(month("2023-01"), "bug"), 3);
        assert!(table.user.is_none());
    }

    #[test]
    fn test_user_trend_months_sorted_and_not_backfilled() {
        let issues = vec![issue(
            None,
            &[],
            vec![
                labeled(Some("u"), "bug", "2023-06-01T00:00:00Z"),
                labeled(Some("u"), "docs", "2022-11-01T00:00:00Z"),
                labeled(Some("u"), "bug", "2023-01-01T00:00:00Z"),
            ],
        )];
        let table = user_trend(Some("u")).aggregate(&issues).data().unwrap();
        assert_eq!(
            table.months,
            vec![month("2022-11"), month("2023-01"), month("2023-06")]
        );
        // Dense: every row has one cell per label.
        assert!(table.counts.iter().all(|row| row.len() == table.labels.len()));
        assert_eq!(table.column("bug").unwrap(), vec![0, 1, 1]);
        assert_eq!(table.column("docs").unwrap(), vec![1, 0, 0]);
    }

    #[test]
    fn test_user_trend_no_all_zero_columns() {
        let issues = vec![issue(
            None,
            &[],
            vec![
                labeled(Some("u"), "bug", "2023-01-01T00:00:00Z"),
                labeled(Some("other"), "docs", "2023-01-01T00:00:00Z"),
            ],
        )];
        let table = user_trend(Some("u")).aggregate(&issues).data().unwrap();
        assert_eq!(table.labels, vec!["bug".to_string()]);
        for col in 0..table.labels.len() {
            assert!(table.counts.iter().any(|row| row[col] > 0));
        }
    }

    #[test]
    fn test_drop_zero_columns() {
        let mut table = UserTrendTable {
            user: None,
            months: vec![month("2023-01"), month("2023-02")],
            labels: vec!["a".into(), "b".into(), "c".into()],
            counts: vec![vec![1, 0, 0], vec![0, 0, 2]],
        };
        table.drop_zero_columns();
        assert_eq!(table.labels, vec!["a".to_string(), "c".to_string()]);
        assert_eq!(table.counts, vec![vec![1, 0], vec![0, 2]]);
        assert_eq!(table.months.len(), 2);
    }

    #[test]
    fn test_user_trend_ignores_non_labeled_events() {
        let mut commented = labeled(Some("u"), "bug", "2023-01-01T00:00:00Z");
        commented.event_type = "commented".to_string();
        let issues = vec![issue(None, &[], vec![commented])];
        assert!(user_trend(Some("u")).aggregate(&issues).is_no_data());
    }

    #[test]
    fn test_user_trend_empty_input_is_no_data() {
        assert!(user_trend(Some("unknown_user")).aggregate(&[]).is_no_data());
        assert!(user_trend(None).aggregate(&[]).is_no_data());
    }

    #[test]
    fn test_user_trend_calendar_timezone() {
        let issues = vec![issue(
            None,
            &[],
            vec![labeled(Some("u"), "bug", "2023-02-01T02:00:00Z")],
        )];
        let agg = UserTrendAggregator::new(
            &UserTrendConfig::new(Some("u")),
            Calendar::new("America/New_York"),
        );
        let table = agg.aggregate(&issues).data().unwrap();
        assert_eq!(table.months, vec![month("2023-01")]);
    }

    // ── Idempotence ───────────────────────────────────────────────────────────

    #[test]
    fn test_repeated_runs_are_identical() {
        let issues = vec![
            issue(
                Some("c1"),
                &["bug"],
                vec![
                    labeled(Some("u1"), "bug", "2023-01-15T00:00:00Z"),
                    labeled(Some("u2"), "docs", "2024-03-01T00:00:00Z"),
                ],
            ),
            issue(
                Some("c2"),
                &["docs"],
                vec![labeled(Some("u1"), "docs", "2023-01-20T00:00:00Z")],
            ),
        ];

        let ia = interactions("bug");
        assert_eq!(ia.aggregate(&issues), ia.aggregate(&issues));

        let la = LabelAdoptionAggregator::new(Calendar::utc());
        assert_eq!(la.aggregate(&issues), la.aggregate(&issues));

        let ut = user_trend(Some("u1"));
        assert_eq!(ut.aggregate(&issues), ut.aggregate(&issues));
    }
}
