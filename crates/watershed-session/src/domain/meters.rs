//! The three bounded outcome gauges.

use serde::Serialize;
use watershed_content::{Meter, MeterDelta};

/// Lowest value a meter can hold.
pub const METER_MIN: f64 = 0.0;

/// Highest value a meter can hold.
pub const METER_MAX: f64 = 100.0;

/// Starting value of every meter.
pub const METER_START: f64 = 60.0;

/// Pins `value` to the meter range. NaN lands on the lower bound.
fn clamp(value: f64) -> f64 {
    if value.is_nan() {
        METER_MIN
    } else {
        value.clamp(METER_MIN, METER_MAX)
    }
}

/// Water quality, equity, and cost, each held in `[0, 100]`.
///
/// The fields are private: meters only move by [`Meters::apply`], which
/// clamps, or start over from [`Meters::default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Meters {
    water: f64,
    equity: f64,
    cost: f64,
}

impl Default for Meters {
    fn default() -> Self {
        Self {
            water: METER_START,
            equity: METER_START,
            cost: METER_START,
        }
    }
}

impl Meters {
    /// Builds meters from raw values, clamping each into range.
    #[must_use]
    pub fn new(water: f64, equity: f64, cost: f64) -> Self {
        Self {
            water: clamp(water),
            equity: clamp(equity),
            cost: clamp(cost),
        }
    }

    /// Water quality.
    #[must_use]
    pub const fn water(&self) -> f64 {
        self.water
    }

    /// Equity.
    #[must_use]
    pub const fn equity(&self) -> f64 {
        self.equity
    }

    /// Cost.
    #[must_use]
    pub const fn cost(&self) -> f64 {
        self.cost
    }

    /// Value of `meter`.
    #[must_use]
    pub const fn get(&self, meter: Meter) -> f64 {
        match meter {
            Meter::Water => self.water,
            Meter::Equity => self.equity,
            Meter::Cost => self.cost,
        }
    }

    /// Adds an already weighted delta and clamps each meter.
    #[must_use]
    pub fn apply(&self, weighted: &MeterDelta) -> Self {
        Self::new(
            self.water + weighted.water,
            self.equity + weighted.equity,
            self.cost + weighted.cost,
        )
    }

    /// Whether every meter is inside `[0, 100]`.
    #[must_use]
    pub fn in_bounds(&self) -> bool {
        Meter::ALL
            .iter()
            .all(|meter| (METER_MIN..=METER_MAX).contains(&self.get(*meter)))
    }

    /// Meters rounded to whole numbers for display.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn rounded(&self) -> RoundedMeters {
        RoundedMeters {
            water: self.water.round() as i64,
            equity: self.equity.round() as i64,
            cost: self.cost.round() as i64,
        }
    }
}

/// Whole-number meter values for the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundedMeters {
    /// Water quality.
    pub water: i64,
    /// Equity.
    pub equity: i64,
    /// Cost.
    pub cost: i64,
}

/// One gauge ready for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeterReading {
    /// Which meter.
    pub meter: Meter,
    /// Display label.
    pub label: &'static str,
    /// Current value.
    pub value: f64,
}

impl Meters {
    /// The three gauges in display order.
    #[must_use]
    pub fn readings(&self) -> Vec<MeterReading> {
        Meter::ALL
            .iter()
            .map(|meter| MeterReading {
                meter: *meter,
                label: meter.label(),
                value: self.get(*meter),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_meters_start_at_sixty() {
        let meters = Meters::default();
        assert_eq!(meters, Meters::new(60.0, 60.0, 60.0));
    }

    #[test]
    fn test_apply_clamps_both_ends() {
        // Arrange
        let meters = Meters::new(98.0, 99.0, 2.0);

        // Act
        let next = meters.apply(&MeterDelta::new(9.0, 0.0, -4.0));

        // Assert
        assert_eq!(next, Meters::new(100.0, 99.0, 0.0));
        assert!(next.in_bounds());
    }

    #[test]
    fn test_new_clamps_out_of_range_input() {
        let meters = Meters::new(-5.0, 250.0, 42.5);
        assert_eq!(meters.water(), 0.0);
        assert_eq!(meters.equity(), 100.0);
        assert_eq!(meters.cost(), 42.5);
    }

    #[test]
    fn test_apply_with_nan_delta_stays_in_bounds() {
        // Arrange
        let meters = Meters::default();

        // Act
        let next = meters.apply(&MeterDelta::new(f64::NAN, 0.0, f64::INFINITY));

        // Assert
        assert!(next.in_bounds());
        assert_eq!(next.water(), METER_MIN);
        assert_eq!(next.equity(), 60.0);
        assert_eq!(next.cost(), METER_MAX);
    }

    #[test]
    fn test_rounded_rounds_half_up_for_positive_values() {
        let meters = Meters::new(66.3, 65.5, 57.0);
        assert_eq!(
            meters.rounded(),
            RoundedMeters {
                water: 66,
                equity: 66,
                cost: 57
            }
        );
    }

    #[test]
    fn test_readings_are_labelled_in_display_order() {
        let labels: Vec<&str> = Meters::default()
            .readings()
            .iter()
            .map(|r| r.label)
            .collect();
        assert_eq!(labels, vec!["Water Quality", "Equity", "Cost"]);
    }
}
