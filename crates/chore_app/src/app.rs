use std::path::PathBuf;

use anyhow::{Context, Result};
use chore_domain::{
    calendar::{format_date, parse_date},
    ota::{should_check_for_update, OtaConfig},
    ButtonSlot, ChoreService, Dashboard, JsonFileStore, SortOrder, WakeInput, WakeReason,
};
use chrono::{Local, NaiveDate};
use tracing::{info, warn};

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub(crate) document_path: PathBuf,
    pub(crate) sort_order: SortOrder,
    pub(crate) display_limit: usize,
    pub(crate) today: Option<NaiveDate>,
    pub(crate) reason: WakeReason,
    pub(crate) battery_voltage: Option<f64>,
    pub(crate) dev_mode: bool,
    pub(crate) ota: OtaConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = lookup("CHORES_PATH").filter(|p| !p.trim().is_empty()) {
            config.document_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup("CHORES_SORT_ORDER") {
            match SortOrder::parse(&raw) {
                Some(order) => config.sort_order = order,
                None => warn!(value = %raw, "unknown CHORES_SORT_ORDER, keeping ascending"),
            }
        }
        if let Some(raw) = lookup("CHORES_DISPLAY_LIMIT") {
            match raw.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => config.display_limit = limit,
                _ => warn!(value = %raw, "invalid CHORES_DISPLAY_LIMIT, keeping default"),
            }
        }
        if let Some(raw) = lookup("CHORES_TODAY") {
            let today = parse_date(raw.trim()).context("CHORES_TODAY must be YYYY-MM-DD")?;
            config.today = Some(today);
        }
        if let Some(raw) = lookup("CHORES_WAKE") {
            match raw.trim().to_ascii_lowercase().as_str() {
                "boot" => config.reason = WakeReason::FreshBoot,
                "timer" => config.reason = WakeReason::Timer,
                _ => warn!(value = %raw, "unknown CHORES_WAKE, assuming timer"),
            }
        }
        if let Some(raw) = lookup("CHORES_BUTTON") {
            match ButtonSlot::parse(&raw) {
                Some(slot) => config.reason = WakeReason::Button(slot),
                None => warn!(value = %raw, "CHORES_BUTTON is not a slot 0-3 or pin D15/D14/D12/D11"),
            }
        }
        if let Some(raw) = lookup("CHORES_BATTERY_VOLTAGE") {
            match raw.trim().parse::<f64>() {
                Ok(volts) if volts.is_finite() => config.battery_voltage = Some(volts),
                _ => warn!(value = %raw, "unreadable battery voltage, reporting empty"),
            }
        }
        if let Some(raw) = lookup("CHORES_DEV_MODE") {
            config.dev_mode = matches!(raw.trim(), "1" | "true" | "yes");
        }
        config.ota.url = lookup("CHORES_OTA_URL");
        config.ota.token = lookup("CHORES_OTA_TOKEN");
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            document_path: PathBuf::from("chores.json"),
            sort_order: SortOrder::Ascending,
            display_limit: 4,
            today: None,
            reason: WakeReason::Timer,
            battery_voltage: None,
            dev_mode: false,
            ota: OtaConfig::default(),
        }
    }
}

/// Runs a single wake cycle against the configured chore document.
pub fn run(config: &AppConfig) -> Result<Dashboard> {
    let today = config.today.unwrap_or_else(|| Local::now().date_naive());
    let store = JsonFileStore::new(&config.document_path);
    let service = ChoreService::builder(store.clone())
        .sort_order(config.sort_order)
        .display_limit(config.display_limit)
        .build();
    info!(
        path = %store.path().display(),
        today = %format_date(today),
        order = ?service.sort_order(),
        display_limit = service.display_limit(),
        "starting chore dashboard"
    );

    if should_check_for_update(&config.ota, config.dev_mode, config.reason) {
        info!(
            url = config.ota.url.as_deref().unwrap_or_default(),
            authenticated = config.ota.authorization_header().is_some(),
            "update check due on this boot"
        );
    }

    let mut input = WakeInput::new(today, config.reason);
    if let Some(volts) = config.battery_voltage {
        input = input.with_battery_voltage(volts);
    }
    let dashboard = service.run_wake_cycle(input);
    info!(
        shown = dashboard.items.len(),
        completed = dashboard.completed.as_deref().unwrap_or("-"),
        saved = dashboard.saved,
        "wake cycle finished"
    );
    Ok(dashboard)
}
