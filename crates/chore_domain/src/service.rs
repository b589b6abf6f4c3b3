use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    battery, calendar,
    chore::SortOrder,
    engine,
    store::ChoreStore,
    view::ChoreView,
    wake::{WakeInput, SLOT_COUNT},
};

/// Render-ready result of one wake cycle.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Dashboard {
    #[serde(serialize_with = "calendar::serialize_date")]
    pub today: NaiveDate,
    pub battery_percent: f64,
    pub items: Vec<ChoreView>,
    /// Title of the chore completed by this wake's button press.
    pub completed: Option<String>,
    /// Whether the chore document was rewritten this cycle.
    pub saved: bool,
}

/// Runs one load → complete → save → view pass per wake.
pub struct ChoreService {
    store: Box<dyn ChoreStore>,
    sort_order: SortOrder,
    display_limit: usize,
}

pub struct ChoreServiceBuilder {
    store: Box<dyn ChoreStore>,
    sort_order: SortOrder,
    display_limit: usize,
}

impl ChoreServiceBuilder {
    pub fn new(store: Box<dyn ChoreStore>) -> Self {
        Self {
            store,
            sort_order: SortOrder::default(),
            display_limit: SLOT_COUNT,
        }
    }

    /// Order used both for the columns on screen and for button lookup.
    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = order;
        self
    }

    pub fn display_limit(mut self, limit: usize) -> Self {
        self.display_limit = limit;
        self
    }

    pub fn build(self) -> ChoreService {
        ChoreService {
            store: self.store,
            sort_order: self.sort_order,
            display_limit: self.display_limit,
        }
    }
}

impl ChoreService {
    pub fn builder(store: impl ChoreStore + 'static) -> ChoreServiceBuilder {
        ChoreServiceBuilder::new(Box::new(store))
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn display_limit(&self) -> usize {
        self.display_limit
    }

    /// Never fails: an unreadable document shows as empty and a failed save
    /// is reported through [`Dashboard::saved`].
    pub fn run_wake_cycle(&self, input: WakeInput) -> Dashboard {
        let today = input.today;
        let mut collection = self.store.load();
        info!(
            today = %calendar::format_date(today),
            reason = ?input.reason,
            item_count = collection.len(),
            "wake cycle started"
        );

        let mut completed = None;
        if let Some(slot) = input.reason.slot() {
            match engine::complete_slot(&mut collection, slot.index(), today, self.sort_order) {
                Ok(Some(position)) => completed = Some(collection.items[position].title.clone()),
                Ok(None) => info!(%slot, "button has no chore, nothing to complete"),
                Err(err) => warn!(%slot, %err, "could not complete chore"),
            }
        }

        let saved = completed.is_some()
            && match self.store.save(&collection) {
                Ok(()) => true,
                Err(err) => {
                    warn!(%err, "failed to save chore document");
                    false
                }
            };

        let items = engine::select_display_items(&collection, self.sort_order, self.display_limit)
            .iter()
            .map(|item| ChoreView::from_item(item, today))
            .collect();

        Dashboard {
            today,
            battery_percent: battery::percent_or_empty(input.battery_voltage),
            items,
            completed,
            saved,
        }
    }
}
