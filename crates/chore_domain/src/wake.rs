//! What woke the board and which button, if any, was pressed.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

pub const SLOT_COUNT: usize = 4;

// Buttons A-D, left to right under the display.
const SLOT_PINS: [&str; SLOT_COUNT] = ["D15", "D14", "D12", "D11"];

/// One of the four buttons / display columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ButtonSlot(u8);

impl ButtonSlot {
    pub fn new(index: usize) -> Option<Self> {
        if index < SLOT_COUNT {
            u8::try_from(index).ok().map(Self)
        } else {
            None
        }
    }

    pub fn from_pin_name(pin: &str) -> Option<Self> {
        let pin = pin.trim();
        SLOT_PINS
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(pin))
            .and_then(Self::new)
    }

    /// Accepts either a slot index (`0`-`3`) or a pin name (`D15`).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().parse::<usize>() {
            Ok(index) => Self::new(index),
            Err(_) => Self::from_pin_name(raw),
        }
    }

    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    pub fn pin_name(self) -> &'static str {
        SLOT_PINS[self.index()]
    }
}

impl fmt::Display for ButtonSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = char::from(b'A' + self.0);
        write!(f, "Button {letter} ({})", self.pin_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WakeReason {
    /// Power-on or reset.
    FreshBoot,
    Timer,
    Button(ButtonSlot),
}

impl WakeReason {
    pub fn slot(self) -> Option<ButtonSlot> {
        match self {
            Self::Button(slot) => Some(slot),
            Self::FreshBoot | Self::Timer => None,
        }
    }
}

/// Inputs gathered by the board before the engine runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WakeInput {
    pub today: NaiveDate,
    pub reason: WakeReason,
    /// Measured battery voltage; `None` when the read failed.
    pub battery_voltage: Option<f64>,
}

impl WakeInput {
    pub fn new(today: NaiveDate, reason: WakeReason) -> Self {
        Self {
            today,
            reason,
            battery_voltage: None,
        }
    }

    pub fn with_battery_voltage(mut self, volts: f64) -> Self {
        self.battery_voltage = Some(volts);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_indices_are_bounded() {
        assert_eq!(ButtonSlot::new(3).map(ButtonSlot::index), Some(3));
        assert_eq!(ButtonSlot::new(4), None);
    }

    #[test]
    fn pins_map_to_slots_left_to_right() {
        let indices: Vec<Option<usize>> = ["D15", "d14", "D12", " D11 ", "D13"]
            .iter()
            .map(|pin| ButtonSlot::from_pin_name(pin).map(ButtonSlot::index))
            .collect();
        assert_eq!(indices, vec![Some(0), Some(1), Some(2), Some(3), None]);
    }

    #[test]
    fn parse_accepts_index_or_pin() {
        assert_eq!(ButtonSlot::parse("2"), ButtonSlot::new(2));
        assert_eq!(ButtonSlot::parse("D11"), ButtonSlot::new(3));
        assert_eq!(ButtonSlot::parse("9"), None);
        assert_eq!(ButtonSlot::parse("B"), None);
    }

    #[test]
    fn display_names_button_and_pin() {
        let slot = ButtonSlot::new(1).unwrap();
        assert_eq!(slot.to_string(), "Button B (D14)");
        assert_eq!(WakeReason::Button(slot).slot(), Some(slot));
        assert_eq!(WakeReason::Timer.slot(), None);
    }
}
