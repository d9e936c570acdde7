//! Savings simulation for one state and monthly consumption.
//!
//! [`simulate`] groups a state's suppliers by solution type, prices every
//! offer with [`compute_savings`] and keeps the best one per solution. The
//! computation is pure: identical inputs always give identical results.

use rust_decimal::Decimal;
use tracing::debug;

use crate::catalog::Catalog;
use crate::model::{SolutionType, State, Supplier};
use crate::savings::{MONTHS_PER_YEAR, SavingsResult, compute_savings};

/// Suppliers offering one solution type, with the most favourable offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionOffer<'a> {
    /// Solution these suppliers offer.
    pub solution_type: SolutionType,
    /// Every supplier in the state offering this solution, in catalog order.
    pub eligible_suppliers: Vec<&'a Supplier>,
    /// Priced offer of each eligible supplier, in the same order.
    pub offers: Vec<SavingsResult<'a>>,
    /// Offer with the greatest monthly savings.
    pub best_offer: SavingsResult<'a>,
}

/// Outcome of a savings simulation, at full precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationResult<'a> {
    /// State simulated.
    pub state: &'a State,
    /// Monthly consumption (kWh).
    pub consumption_kwh: Decimal,
    /// Monthly cost at the regulated tariff.
    pub current_monthly_cost: Decimal,
    /// `current_monthly_cost * 12`.
    pub current_annual_cost: Decimal,
    /// One entry per solution type with at least one supplier, in
    /// [`SolutionType::ALL`] order.
    pub available_solutions: Vec<SolutionOffer<'a>>,
    /// Distinct suppliers in the state.
    pub total_suppliers: usize,
}

/// Simulates the savings available in `state_code` for `consumption_kwh`.
///
/// Returns `None` when the consumption is not positive, the state is
/// unknown, the state has no suppliers, or pricing overflows `Decimal`.
///
/// # Arguments
///
/// * `catalog` - Reference data to simulate against
/// * `state_code` - Two-letter state code (case-sensitive)
/// * `consumption_kwh` - Monthly consumption
///
/// # Examples
///
/// ```
/// use energy_savings::catalog::Catalog;
/// use energy_savings::simulation::simulate;
/// use rust_decimal::Decimal;
///
/// let catalog = Catalog::builtin();
/// let result = simulate(&catalog, "SP", Decimal::from(30_000)).unwrap();
/// assert_eq!(result.total_suppliers, 3);
/// assert!(simulate(&catalog, "XX", Decimal::from(1_000)).is_none());
/// ```
pub fn simulate<'a>(
    catalog: &'a Catalog,
    state_code: &str,
    consumption_kwh: Decimal,
) -> Option<SimulationResult<'a>> {
    if consumption_kwh <= Decimal::ZERO {
        debug!(%consumption_kwh, "consumption must be positive");
        return None;
    }

    let Some(state) = catalog.lookup_state(state_code) else {
        debug!(state_code, "unknown state");
        return None;
    };

    let suppliers = catalog.list_suppliers(state_code);
    if suppliers.is_empty() {
        debug!(state_code, "no suppliers registered in state");
        return None;
    }

    let mut groups: [Vec<&'a Supplier>; SolutionType::COUNT] = Default::default();
    for &supplier in &suppliers {
        for &solution in &supplier.solution_types {
            groups[solution.index()].push(supplier);
        }
    }

    let tariff = state.base_tariff_per_kwh;
    let Some(current_monthly_cost) = consumption_kwh.checked_mul(tariff) else {
        debug!(state_code, %consumption_kwh, "monthly cost overflows");
        return None;
    };
    let Some(current_annual_cost) =
        current_monthly_cost.checked_mul(Decimal::from(MONTHS_PER_YEAR))
    else {
        debug!(state_code, %consumption_kwh, "annual cost overflows");
        return None;
    };

    let mut available_solutions = Vec::with_capacity(SolutionType::COUNT);
    for (solution_type, eligible_suppliers) in SolutionType::ALL.into_iter().zip(groups) {
        let Some(offers) = eligible_suppliers
            .iter()
            .map(|&s| compute_savings(s, solution_type, consumption_kwh, tariff))
            .collect::<Option<Vec<_>>>()
        else {
            debug!(state_code, %solution_type, %consumption_kwh, "offer pricing overflows");
            return None;
        };
        let Some(best_offer) = pick_best_offer(&offers).cloned() else {
            continue;
        };
        available_solutions.push(SolutionOffer {
            solution_type,
            eligible_suppliers,
            offers,
            best_offer,
        });
    }

    debug!(
        state_code,
        %consumption_kwh,
        solutions = available_solutions.len(),
        "simulation complete"
    );

    Some(SimulationResult {
        state,
        consumption_kwh,
        current_monthly_cost,
        current_annual_cost,
        available_solutions,
        total_suppliers: suppliers.len(),
    })
}

/// Picks the offer with strictly greatest monthly savings; ties keep the
/// earliest supplier. `None` for an empty group.
fn pick_best_offer<'o, 'a>(offers: &'o [SavingsResult<'a>]) -> Option<&'o SavingsResult<'a>> {
    offers.iter().reduce(|best, candidate| {
        if candidate.monthly_savings > best.monthly_savings {
            candidate
        } else {
            best
        }
    })
}
