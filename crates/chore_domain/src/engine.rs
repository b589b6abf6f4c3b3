//! Due-date and progress rules for recurring chores.
//!
//! Every function here is pure: the caller passes `today` and the collection
//! explicitly and gets values back.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use tracing::{debug, info};

use crate::calendar::{add_days, days_between, format_date};
use crate::chore::{ChoreCollection, ChoreItem, SortOrder};
use crate::error::ChoreError;

/// Short human-readable due status shown under each chore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueLabel {
    /// No due date; renders as an empty string.
    Unscheduled,
    PastDue,
    Today,
    Tomorrow,
    On { month: u32, day: u32 },
}

impl fmt::Display for DueLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unscheduled => Ok(()),
            Self::PastDue => f.write_str("past due"),
            Self::Today => f.write_str("today"),
            Self::Tomorrow => f.write_str("tomorrow"),
            Self::On { month, day } => write!(f, "{month}/{day}"),
        }
    }
}

impl Serialize for DueLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Fill intensity bucket for a progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

pub fn compute_due_label(item: &ChoreItem, today: NaiveDate) -> DueLabel {
    let Some(due) = item.due_date else {
        return DueLabel::Unscheduled;
    };
    match days_between(today, due) {
        d if d < 0 => DueLabel::PastDue,
        0 => DueLabel::Today,
        1 => DueLabel::Tomorrow,
        _ => DueLabel::On {
            month: due.month(),
            day: due.day(),
        },
    }
}

/// Fraction of the interval elapsed since the last completion, clamped to `[0, 1]`.
pub fn compute_progress(item: &ChoreItem, today: NaiveDate) -> f64 {
    let Some(last) = item.last_completed else {
        return 0.0;
    };
    if item.day_interval == 0 {
        return 0.0;
    }
    let elapsed = days_between(last, today) as f64;
    (elapsed / f64::from(item.day_interval)).clamp(0.0, 1.0)
}

pub fn is_past_due(item: &ChoreItem, today: NaiveDate) -> bool {
    item.due_date.is_some_and(|due| due < today)
}

pub fn fill_urgency(progress: f64) -> Urgency {
    if progress >= 0.8 {
        Urgency::High
    } else if progress >= 0.5 {
        Urgency::Medium
    } else {
        Urgency::Low
    }
}

/// Chores in display order, at most `limit` of them. Never pads.
pub fn select_display_items(
    collection: &ChoreCollection,
    order: SortOrder,
    limit: usize,
) -> Vec<ChoreItem> {
    collection
        .sorted_indices(order)
        .into_iter()
        .take(limit)
        .map(|idx| collection.items[idx].clone())
        .collect()
}

/// Marks the chore shown in `slot_index` as done today.
///
/// An empty slot leaves the collection untouched.
pub fn apply_completion(
    mut collection: ChoreCollection,
    slot_index: usize,
    today: NaiveDate,
    order: SortOrder,
) -> Result<ChoreCollection, ChoreError> {
    complete_slot(&mut collection, slot_index, today, order)?;
    Ok(collection)
}

/// In-place form of [`apply_completion`]. Returns the document position of the
/// completed chore, if any.
pub fn complete_slot(
    collection: &mut ChoreCollection,
    slot_index: usize,
    today: NaiveDate,
    order: SortOrder,
) -> Result<Option<usize>, ChoreError> {
    let Some(&position) = collection.sorted_indices(order).get(slot_index) else {
        debug!(
            slot_index,
            item_count = collection.len(),
            "no chore assigned to slot"
        );
        return Ok(None);
    };

    let item = &mut collection.items[position];
    let next_due = add_days(today, u64::from(item.day_interval.max(1)))?;
    item.last_completed = Some(today);
    item.due_date = Some(next_due);
    info!(
        slot_index,
        title = %item.title,
        next_due = %format_date(next_due),
        "chore completed"
    );
    Ok(Some(position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::parse_date;

    fn date(raw: &str) -> NaiveDate {
        parse_date(raw).unwrap()
    }

    fn item(title: &str, interval: u32, due: &str) -> ChoreItem {
        ChoreItem::new(title, interval, date(due))
    }

    #[test]
    fn due_labels_follow_precedence() {
        let today = date("2026-03-01");
        assert_eq!(compute_due_label(&item("a", 1, "2026-02-28"), today), DueLabel::PastDue);
        assert_eq!(compute_due_label(&item("a", 1, "2026-03-01"), today), DueLabel::Today);
        assert_eq!(compute_due_label(&item("a", 1, "2026-03-02"), today), DueLabel::Tomorrow);

        let later = compute_due_label(&item("a", 1, "2026-05-01"), today);
        assert_eq!(later.to_string(), "5/1");

        let mut unscheduled = item("a", 1, "2026-03-01");
        unscheduled.due_date = None;
        assert_eq!(compute_due_label(&unscheduled, today).to_string(), "");
    }

    #[test]
    fn tomorrow_crosses_year_end() {
        let label = compute_due_label(&item("a", 1, "2026-01-01"), date("2025-12-31"));
        assert_eq!(label.to_string(), "tomorrow");
    }

    #[test]
    fn due_label_serializes_as_display_text() {
        let json = serde_json::to_value(DueLabel::PastDue).unwrap();
        assert_eq!(json, serde_json::json!("past due"));
    }

    #[test]
    fn progress_is_zero_without_completion_and_clamps_at_one() {
        let today = date("2026-01-10");
        assert_eq!(compute_progress(&item("a", 7, "2026-01-12"), today), 0.0);

        let done = item("a", 4, "2026-01-12").with_last_completed(date("2026-01-08"));
        assert_eq!(compute_progress(&done, today), 0.5);

        let overdue = item("a", 4, "2026-01-05").with_last_completed(date("2026-01-01"));
        assert_eq!(compute_progress(&overdue, today), 1.0);

        let future = item("a", 4, "2026-01-20").with_last_completed(date("2026-01-16"));
        assert_eq!(compute_progress(&future, today), 0.0);

        let mut zero = done.clone();
        zero.day_interval = 0;
        assert_eq!(compute_progress(&zero, today), 0.0);
    }

    #[test]
    fn past_due_requires_a_date_before_today() {
        let today = date("2026-01-10");
        assert!(is_past_due(&item("a", 1, "2026-01-09"), today));
        assert!(!is_past_due(&item("a", 1, "2026-01-10"), today));
        let mut undated = item("a", 1, "2026-01-01");
        undated.due_date = None;
        assert!(!is_past_due(&undated, today));
    }

    #[test]
    fn urgency_thresholds() {
        assert_eq!(fill_urgency(0.0), Urgency::Low);
        assert_eq!(fill_urgency(0.49), Urgency::Low);
        assert_eq!(fill_urgency(0.5), Urgency::Medium);
        assert_eq!(fill_urgency(0.79), Urgency::Medium);
        assert_eq!(fill_urgency(0.8), Urgency::High);
        assert_eq!(fill_urgency(1.0), Urgency::High);
    }

    #[test]
    fn completion_updates_earliest_due_item_in_ascending_order() {
        let collection = ChoreCollection::new(vec![
            item("A", 7, "2026-01-01"),
            item("B", 3, "2026-01-03"),
        ]);
        let updated =
            apply_completion(collection.clone(), 0, date("2026-01-05"), SortOrder::Ascending)
                .unwrap();

        let a = updated.items.iter().find(|i| i.title == "A").unwrap();
        assert_eq!(a.last_completed, Some(date("2026-01-05")));
        assert_eq!(a.due_date, Some(date("2026-01-12")));

        let b = updated.items.iter().find(|i| i.title == "B").unwrap();
        assert_eq!(b, &collection.items[1]);
    }

    #[test]
    fn completion_in_descending_order_picks_latest_due_item() {
        let collection = ChoreCollection::new(vec![
            item("A", 7, "2026-01-01"),
            item("B", 3, "2026-01-03"),
        ]);
        let updated =
            apply_completion(collection, 0, date("2026-01-05"), SortOrder::Descending).unwrap();
        assert_eq!(updated.items[0].last_completed, None);
        assert_eq!(updated.items[1].due_date, Some(date("2026-01-08")));
    }

    #[test]
    fn out_of_range_slot_is_a_no_op() {
        let collection = ChoreCollection::new(vec![
            item("A", 7, "2026-01-01"),
            item("B", 3, "2026-01-03"),
        ]);
        let updated =
            apply_completion(collection.clone(), 5, date("2026-01-05"), SortOrder::Ascending)
                .unwrap();
        assert_eq!(updated, collection);

        let mut empty = ChoreCollection::default();
        let position =
            complete_slot(&mut empty, 0, date("2026-01-05"), SortOrder::Ascending).unwrap();
        assert_eq!(position, None);
    }

    #[test]
    fn zero_interval_still_schedules_tomorrow() {
        let mut chore = item("Cat litter", 1, "2026-01-04");
        chore.day_interval = 0;
        let updated = apply_completion(
            ChoreCollection::new(vec![chore]),
            0,
            date("2026-01-05"),
            SortOrder::Ascending,
        )
        .unwrap();
        assert_eq!(updated.items[0].due_date, Some(date("2026-01-06")));
        assert!(!is_past_due(&updated.items[0], date("2026-01-05")));
    }

    #[test]
    fn completion_keeps_document_order() {
        let collection = ChoreCollection::new(vec![
            item("Late", 2, "2026-02-01"),
            item("Early", 2, "2026-01-01"),
        ]);
        let mut updated = collection.clone();
        let position =
            complete_slot(&mut updated, 0, date("2026-01-02"), SortOrder::Ascending).unwrap();
        assert_eq!(position, Some(1));
        assert_eq!(updated.items[0], collection.items[0]);
        assert_eq!(updated.items[1].title, "Early");
    }

    #[test]
    fn display_selection_respects_limit_and_order() {
        let collection = ChoreCollection::new(vec![
            item("C", 1, "2026-01-03"),
            item("A", 1, "2026-01-01"),
            item("E", 1, "2026-01-05"),
            item("B", 1, "2026-01-02"),
            item("D", 1, "2026-01-04"),
        ]);
        let titles = |items: Vec<ChoreItem>| -> Vec<String> {
            items.into_iter().map(|i| i.title).collect()
        };
        assert_eq!(
            titles(select_display_items(&collection, SortOrder::Ascending, 4)),
            ["A", "B", "C", "D"]
        );
        assert_eq!(
            titles(select_display_items(&collection, SortOrder::Descending, 2)),
            ["E", "D"]
        );
        assert_eq!(select_display_items(&collection, SortOrder::Ascending, 10).len(), 5);
        assert!(select_display_items(&collection, SortOrder::Ascending, 0).is_empty());
    }

    #[test]
    fn display_slot_and_button_slot_name_the_same_chore() {
        let collection = ChoreCollection::new(vec![
            item("Dishes", 1, "2026-01-04"),
            item("Floors", 7, "2026-01-02"),
            item("Sheets", 14, "2026-01-09"),
            item("Plants", 3, "2026-01-03"),
        ]);
        let today = date("2026-01-05");
        for order in [SortOrder::Ascending, SortOrder::Descending] {
            let shown = select_display_items(&collection, order, 4);
            for (slot, expected) in shown.iter().enumerate() {
                let mut working = collection.clone();
                let position = complete_slot(&mut working, slot, today, order)
                    .unwrap()
                    .expect("slot has a chore");
                assert_eq!(working.items[position].title, expected.title);
            }
        }
    }
}
