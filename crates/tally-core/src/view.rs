//! Derivation of the displayed task list from canonical state.
//!
//! The pipeline is search, then filter, then a stable sort. Statistics are
//! always computed over the full canonical collection.

use crate::error::CoreError;
use crate::task::Task;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    All,
    Today,
    Overdue,
    Completed,
}

impl FilterMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Overdue => "overdue",
            Self::Completed => "completed",
        }
    }

    fn admits(self, task: &Task, today: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::Today => task.is_due_on(today),
            Self::Overdue => task.is_overdue(today),
            Self::Completed => task.completed,
        }
    }
}

impl FromStr for FilterMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "overdue" => Ok(Self::Overdue),
            "completed" => Ok(Self::Completed),
            _ => Err(CoreError::UnknownFilter(s.to_string())),
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Canonical order.
    #[default]
    Manual,
    Date,
    Priority,
}

impl SortMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Date => "date",
            Self::Priority => "priority",
        }
    }

    fn apply(self, tasks: &mut [&Task]) {
        // sort_by_key is stable, so ties keep canonical order.
        match self {
            Self::Manual => {}
            Self::Date => tasks.sort_by_key(|t| t.date),
            Self::Priority => tasks.sort_by_key(|t| t.priority.rank()),
        }
    }
}

impl FromStr for SortMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manual" => Ok(Self::Manual),
            "date" => Ok(Self::Date),
            "priority" => Ok(Self::Priority),
            _ => Err(CoreError::UnknownSort(s.to_string())),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-chosen search/filter/sort settings. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewParams {
    pub search: String,
    pub filter: FilterMode,
    pub sort: SortMode,
}

impl ViewParams {
    /// Replace whichever parameters are supplied.
    pub fn update(
        &mut self,
        search: Option<String>,
        filter: Option<FilterMode>,
        sort: Option<SortMode>,
    ) {
        if let Some(search) = search {
            self.search = search;
        }
        if let Some(filter) = filter {
            self.filter = filter;
        }
        if let Some(sort) = sort {
            self.sort = sort;
        }
    }
}

/// Aggregate completion figures.
///
/// `total` is the canonical count clamped to at least 1, so an empty
/// collection reads as 0% rather than dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub completed_count: usize,
    pub percent: f64,
}

impl Stats {
    pub fn compute(tasks: &[Task]) -> Self {
        let total = tasks.len().max(1);
        let completed_count = tasks.iter().filter(|t| t.completed).count();
        Self {
            total,
            completed_count,
            percent: 100.0 * completed_count as f64 / total as f64,
        }
    }
}

/// The tasks to display plus statistics.
#[derive(Debug, Clone, Serialize)]
pub struct View<'a> {
    pub tasks: Vec<&'a Task>,
    pub stats: Stats,
    /// Unclamped size of the canonical collection.
    pub canonical_len: usize,
}

impl View<'_> {
    /// Number of tasks that survived search and filter.
    pub fn shown(&self) -> usize {
        self.tasks.len()
    }
}

/// Compute the displayed list and statistics. Pure: reads nothing but its
/// arguments.
pub fn derive_view<'a>(tasks: &'a [Task], params: &ViewParams, today: NaiveDate) -> View<'a> {
    let needle = if params.search.trim().is_empty() {
        None
    } else {
        Some(params.search.to_lowercase())
    };

    let mut shown: Vec<&Task> = tasks
        .iter()
        .filter(|t| needle.as_deref().map_or(true, |n| t.matches_lowercase(n)))
        .filter(|t| params.filter.admits(t, today))
        .collect();
    params.sort.apply(&mut shown);

    View {
        tasks: shown,
        stats: Stats::compute(tasks),
        canonical_len: tasks.len(),
    }
}
