pub mod battery;
pub mod calendar;
pub mod chore;
pub mod engine;
pub mod error;
pub mod ota;
pub mod service;
pub mod store;
pub mod view;
pub mod wake;

pub use crate::chore::{ChoreCollection, ChoreItem, SortOrder};
pub use crate::error::ChoreError;
pub use crate::service::{ChoreService, ChoreServiceBuilder, Dashboard};
pub use crate::store::{ChoreStore, JsonFileStore, MemoryStore};
pub use crate::wake::{ButtonSlot, WakeInput, WakeReason};
