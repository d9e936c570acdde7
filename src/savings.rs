//! Cost and savings of one supplier offer against the regulated tariff.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::model::{SolutionType, Supplier};

/// Months per year used to annualize monthly figures.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Decimal places kept when money leaves the system.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Savings of switching to one supplier's solution, at full precision.
///
/// Values are never rounded here; see [`round_money`] for the output boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavingsResult<'a> {
    /// Supplier making the offer.
    pub supplier: &'a Supplier,
    /// Solution the offer is for.
    pub solution_type: SolutionType,
    /// Monthly cost at the regulated tariff.
    pub current_monthly_cost: Decimal,
    /// Monthly cost with the supplier.
    pub cost_with_supplier: Decimal,
    /// `current_monthly_cost - cost_with_supplier`; negative if the offer is dearer.
    pub monthly_savings: Decimal,
    /// Savings as a percentage of the current cost.
    pub percent_savings: Decimal,
    /// `monthly_savings * 12`.
    pub annual_savings: Decimal,
}

/// Computes the savings of `supplier`'s `solution_type` offer.
///
/// A supplier without a price for `solution_type` is treated as charging
/// zero. Catalog validation rejects such records at load time, so this only
/// matters for hand-built suppliers.
///
/// Returns `None` if any intermediate amount overflows `Decimal`.
///
/// # Arguments
///
/// * `supplier` - Supplier making the offer
/// * `solution_type` - Solution being priced
/// * `consumption_kwh` - Monthly consumption (expected > 0)
/// * `base_tariff` - Regulated price per kWh
///
/// # Examples
///
/// ```
/// use energy_savings::catalog::Catalog;
/// use energy_savings::model::SolutionType;
/// use energy_savings::savings::compute_savings;
/// use rust_decimal::Decimal;
///
/// let catalog = Catalog::builtin();
/// let sp = catalog.list_suppliers("SP");
/// let r = compute_savings(sp[0], SolutionType::Gd, Decimal::from(30_000), Decimal::new(92, 2))
///     .unwrap();
/// assert_eq!(r.monthly_savings, Decimal::from(8_100));
/// assert_eq!(r.annual_savings, Decimal::from(97_200));
/// ```
pub fn compute_savings(
    supplier: &Supplier,
    solution_type: SolutionType,
    consumption_kwh: Decimal,
    base_tariff: Decimal,
) -> Option<SavingsResult<'_>> {
    let current_monthly_cost = consumption_kwh.checked_mul(base_tariff)?;
    let unit_cost = supplier
        .cost_per_kwh
        .get(solution_type)
        .unwrap_or(Decimal::ZERO);
    let cost_with_supplier = consumption_kwh.checked_mul(unit_cost)?;
    let monthly_savings = current_monthly_cost.checked_sub(cost_with_supplier)?;
    let percent_savings = if current_monthly_cost > Decimal::ZERO {
        monthly_savings
            .checked_div(current_monthly_cost)?
            .checked_mul(Decimal::ONE_HUNDRED)?
    } else {
        Decimal::ZERO
    };
    let annual_savings = monthly_savings.checked_mul(Decimal::from(MONTHS_PER_YEAR))?;

    Some(SavingsResult {
        supplier,
        solution_type,
        current_monthly_cost,
        cost_with_supplier,
        monthly_savings,
        percent_savings,
        annual_savings,
    })
}

/// Rounds a value to two decimal places, half away from zero, always
/// carrying exactly two fractional digits (`27600` becomes `27600.00`).
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_DECIMAL_PLACES);
    rounded
}
