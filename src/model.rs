//! Reference data types: states, solution types and suppliers.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A Brazilian state with its regulated utility tariff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct State {
    /// Two-letter state code (UF), e.g. `"SP"`.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Regulated price per kWh, the baseline for every comparison.
    pub base_tariff_per_kwh: Decimal,
}

/// Energy-supply solution offered by a supplier.
///
/// Closed set. [`SolutionType::ALL`] fixes the order in which solutions are
/// reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolutionType {
    /// Distributed generation.
    #[serde(rename = "GD")]
    Gd,
    /// Free energy market.
    #[serde(rename = "Mercado Livre")]
    OpenMarket,
}

impl SolutionType {
    /// Every solution type, in reporting order.
    pub const ALL: [SolutionType; 2] = [SolutionType::Gd, SolutionType::OpenMarket];

    /// Number of solution types.
    pub const COUNT: usize = Self::ALL.len();

    /// Position of this variant in [`SolutionType::ALL`].
    pub const fn index(self) -> usize {
        match self {
            SolutionType::Gd => 0,
            SolutionType::OpenMarket => 1,
        }
    }

    /// Public tag used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            SolutionType::Gd => "GD",
            SolutionType::OpenMarket => "Mercado Livre",
        }
    }
}

impl fmt::Display for SolutionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-kWh price a supplier charges for each solution it offers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolutionCosts {
    /// Price per kWh for distributed generation.
    pub gd: Option<Decimal>,
    /// Price per kWh on the free market.
    pub open_market: Option<Decimal>,
}

impl SolutionCosts {
    /// Returns the price for `solution`, if the supplier declares one.
    pub fn get(&self, solution: SolutionType) -> Option<Decimal> {
        match solution {
            SolutionType::Gd => self.gd,
            SolutionType::OpenMarket => self.open_market,
        }
    }
}

/// Average customer rating, always within `[0, 5]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Rating(Decimal);

/// Rejected rating value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("rating {0} is outside [0, 5]")]
pub struct RatingOutOfRange(pub Decimal);

impl Rating {
    /// Highest possible rating.
    pub const MAX: u32 = 5;

    /// Returns the rating value.
    pub fn value(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Rating {
    type Error = RatingOutOfRange;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value < Decimal::ZERO || value > Decimal::from(Self::MAX) {
            return Err(RatingOutOfRange(value));
        }
        Ok(Self(value))
    }
}

impl From<Rating> for Decimal {
    fn from(r: Rating) -> Self {
        r.0
    }
}

/// An energy supplier operating in one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Supplier {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Logo image URL.
    pub logo_url: String,
    /// Code of the state the supplier serves.
    pub home_state: String,
    /// Solutions offered, in declaration order.
    pub solution_types: Vec<SolutionType>,
    /// Price per kWh for each offered solution.
    #[serde(default)]
    pub cost_per_kwh: SolutionCosts,
    /// Number of customers served.
    pub total_customers: u32,
    /// Average customer rating.
    pub average_rating: Rating,
}

impl Supplier {
    /// Whether the supplier offers `solution`.
    pub fn offers(&self, solution: SolutionType) -> bool {
        self.solution_types.contains(&solution)
    }
}
