//! LiPo charge estimate from the board's voltage monitor.

/// (volts, percent) points of a single-cell LiPo discharge curve, high to low.
const LIPO_CURVE: [(f64, f64); 14] = [
    (4.20, 100.0),
    (4.15, 95.0),
    (4.10, 90.0),
    (4.05, 85.0),
    (4.00, 80.0),
    (3.90, 70.0),
    (3.80, 60.0),
    (3.70, 50.0),
    (3.60, 40.0),
    (3.50, 30.0),
    (3.40, 20.0),
    (3.30, 10.0),
    (3.20, 5.0),
    (3.00, 0.0),
];

const ADC_FULL_SCALE: f64 = 65535.0;
const ADC_REFERENCE_VOLTS: f64 = 3.3;
// The monitor pin sits behind a 1:2 divider.
const DIVIDER_RATIO: f64 = 2.0;

pub fn adc_to_voltage(raw: u16) -> f64 {
    f64::from(raw) / ADC_FULL_SCALE * ADC_REFERENCE_VOLTS * DIVIDER_RATIO
}

/// Linear interpolation along the discharge curve, clamped to 0-100.
pub fn voltage_to_percent(volts: f64) -> f64 {
    let (top_volts, _) = LIPO_CURVE[0];
    let (bottom_volts, _) = LIPO_CURVE[LIPO_CURVE.len() - 1];
    if volts >= top_volts {
        return 100.0;
    }
    if volts.is_nan() || volts <= bottom_volts {
        return 0.0;
    }
    for pair in LIPO_CURVE.windows(2) {
        let (v_high, p_high) = pair[0];
        let (v_low, p_low) = pair[1];
        if volts >= v_low {
            return p_low + (p_high - p_low) * (volts - v_low) / (v_high - v_low);
        }
    }
    0.0
}

/// A failed read shows as an empty battery rather than blocking the cycle.
pub fn percent_or_empty(volts: Option<f64>) -> f64 {
    volts.map(voltage_to_percent).unwrap_or(0.0)
}
