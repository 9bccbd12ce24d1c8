//! Meter dimensions and raw meter deltas.

use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use super::roles::RoleMultiplier;

/// One of the three outcome gauges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Meter {
    /// Delivered drinking-water quality.
    Water,
    /// Fairness of burdens and benefits across communities.
    Equity,
    /// Fiscal headroom; lower means more money spent.
    Cost,
}

impl Meter {
    /// All meters in display order.
    pub const ALL: [Meter; 3] = [Meter::Water, Meter::Equity, Meter::Cost];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Meter::Water => "Water Quality",
            Meter::Equity => "Equity",
            Meter::Cost => "Cost",
        }
    }
}

/// A raw change to the three meters, before role weighting.
///
/// Content files may omit any dimension; omitted dimensions load as `0.0`
/// so arithmetic never has to special-case missing keys.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MeterDelta {
    /// Change to water quality.
    #[serde(default)]
    pub water: f64,
    /// Change to equity.
    #[serde(default)]
    pub equity: f64,
    /// Change to cost.
    #[serde(default)]
    pub cost: f64,
}

impl MeterDelta {
    /// The delta that changes nothing.
    pub const ZERO: MeterDelta = MeterDelta {
        water: 0.0,
        equity: 0.0,
        cost: 0.0,
    };

    /// Builds a delta from its three components.
    #[must_use]
    pub const fn new(water: f64, equity: f64, cost: f64) -> Self {
        Self {
            water,
            equity,
            cost,
        }
    }

    /// Returns the component for `meter`.
    #[must_use]
    pub const fn get(&self, meter: Meter) -> f64 {
        match meter {
            Meter::Water => self.water,
            Meter::Equity => self.equity,
            Meter::Cost => self.cost,
        }
    }

    /// True when no component is NaN or infinite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        Meter::ALL.iter().all(|&meter| self.get(meter).is_finite())
    }

    /// Scales each component by the matching role factor.
    #[must_use]
    pub fn weighted(&self, multiplier: &RoleMultiplier) -> Self {
        Self {
            water: self.water * multiplier.water,
            equity: self.equity * multiplier.equity,
            cost: self.cost * multiplier.cost,
        }
    }
}

impl Add for MeterDelta {
    type Output = MeterDelta;

    fn add(self, rhs: MeterDelta) -> MeterDelta {
        MeterDelta {
            water: self.water + rhs.water,
            equity: self.equity + rhs.equity,
            cost: self.cost + rhs.cost,
        }
    }
}

impl Sum for MeterDelta {
    fn sum<I: Iterator<Item = MeterDelta>>(iter: I) -> Self {
        iter.fold(MeterDelta::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a MeterDelta> for MeterDelta {
    fn sum<I: Iterator<Item = &'a MeterDelta>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
