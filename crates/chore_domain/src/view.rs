use chrono::NaiveDate;
use serde::Serialize;

use crate::chore::ChoreItem;
use crate::engine::{
    compute_due_label, compute_progress, fill_urgency, is_past_due, DueLabel, Urgency,
};

/// Everything the renderer needs to draw one chore column.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChoreView {
    pub title: String,
    pub due_label: DueLabel,
    pub progress: f64,
    pub urgency: Urgency,
    pub is_past_due: bool,
}

impl ChoreView {
    pub fn from_item(item: &ChoreItem, today: NaiveDate) -> Self {
        let progress = compute_progress(item, today);
        Self {
            title: item.title.clone(),
            due_label: compute_due_label(item, today),
            progress,
            urgency: fill_urgency(progress),
            is_past_due: is_past_due(item, today),
        }
    }
}
