use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::calendar;

/// A recurring chore as persisted in the chore document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChoreItem {
    pub title: String,
    #[serde(
        default = "default_day_interval",
        deserialize_with = "deserialize_day_interval"
    )]
    pub day_interval: u32,
    #[serde(
        default,
        with = "calendar::optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_completed: Option<NaiveDate>,
    #[serde(
        default,
        with = "calendar::optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<NaiveDate>,
    /// Keys this engine does not understand, written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChoreItem {
    /// A never-completed chore seeded with its first due date.
    pub fn new(title: impl Into<String>, day_interval: u32, due_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            day_interval: day_interval.max(1),
            last_completed: None,
            due_date: Some(due_date),
            extra: Map::new(),
        }
    }

    pub fn with_last_completed(mut self, date: NaiveDate) -> Self {
        self.last_completed = Some(date);
        self
    }
}

fn default_day_interval() -> u32 {
    1
}

// Anything that is not a positive integer collapses to one day.
fn deserialize_day_interval<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let interval = value
        .as_i64()
        .filter(|days| *days >= 1)
        .map(|days| u32::try_from(days).unwrap_or(u32::MAX))
        .unwrap_or_else(default_day_interval);
    Ok(interval)
}

/// The whole persisted document: `{"items": [...]}`.
///
/// Other top-level keys are carried through untouched. A `null` date is read
/// as absent and written back without the key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChoreCollection {
    #[serde(default)]
    pub items: Vec<ChoreItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChoreCollection {
    pub fn new(items: Vec<ChoreItem>) -> Self {
        Self {
            items,
            extra: Map::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Positions into `items`, ordered by due date under `order`.
    ///
    /// The sort is stable and undated items always come last, so display
    /// slots and button slots resolve to the same chore.
    pub fn sorted_indices(&self, order: SortOrder) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.items.len()).collect();
        indices.sort_by(|a, b| {
            order.compare(self.items[*a].due_date, self.items[*b].due_date)
        });
        indices
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Earliest due date first.
    #[default]
    Ascending,
    /// Latest due date first.
    Descending,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Ascending),
            "desc" | "descending" => Some(Self::Descending),
            _ => None,
        }
    }

    fn compare(self, a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) => match self {
                Self::Ascending => a.cmp(&b),
                Self::Descending => b.cmp(&a),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}
