//! Rounded, serializable views of simulation output.
//!
//! Every monetary value is rounded to two decimal places here, once, with
//! [`round_money`]. Decimals serialize as strings (`"27600.00"`) so the two
//! fractional digits survive JSON.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::{SolutionType, State, Supplier};
use crate::savings::{SavingsResult, round_money};
use crate::simulation::{SimulationResult, SolutionOffer};

/// Public view of a state.
#[derive(Debug, Clone, Serialize)]
pub struct StateRecord {
    pub code: String,
    pub name: String,
    pub base_tariff_per_kwh: Decimal,
}

impl From<&State> for StateRecord {
    fn from(s: &State) -> Self {
        Self {
            code: s.code.clone(),
            name: s.name.clone(),
            base_tariff_per_kwh: s.base_tariff_per_kwh,
        }
    }
}

/// Public view of a supplier.
#[derive(Debug, Clone, Serialize)]
pub struct SupplierRecord {
    pub id: String,
    pub name: String,
    pub logo_url: String,
    pub home_state: String,
    pub solution_types: Vec<SolutionType>,
    /// Price per kWh for distributed generation, if offered.
    pub cost_per_kwh_gd: Option<Decimal>,
    /// Price per kWh on the free market, if offered.
    pub cost_per_kwh_open_market: Option<Decimal>,
    pub total_customers: u32,
    pub average_rating: Decimal,
}

impl From<&Supplier> for SupplierRecord {
    fn from(s: &Supplier) -> Self {
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            logo_url: s.logo_url.clone(),
            home_state: s.home_state.clone(),
            solution_types: s.solution_types.clone(),
            cost_per_kwh_gd: s.cost_per_kwh.get(SolutionType::Gd),
            cost_per_kwh_open_market: s.cost_per_kwh.get(SolutionType::OpenMarket),
            total_customers: s.total_customers,
            average_rating: s.average_rating.value(),
        }
    }
}

/// Rounded savings of one offer.
#[derive(Debug, Clone, Serialize)]
pub struct SavingsRecord {
    pub supplier: SupplierRecord,
    pub solution_type: SolutionType,
    pub current_monthly_cost: Decimal,
    pub cost_with_supplier: Decimal,
    pub monthly_savings: Decimal,
    pub percent_savings: Decimal,
    pub annual_savings: Decimal,
}

impl From<&SavingsResult<'_>> for SavingsRecord {
    fn from(r: &SavingsResult<'_>) -> Self {
        Self {
            supplier: SupplierRecord::from(r.supplier),
            solution_type: r.solution_type,
            current_monthly_cost: round_money(r.current_monthly_cost),
            cost_with_supplier: round_money(r.cost_with_supplier),
            monthly_savings: round_money(r.monthly_savings),
            percent_savings: round_money(r.percent_savings),
            annual_savings: round_money(r.annual_savings),
        }
    }
}

/// Suppliers and best offer for one solution type.
#[derive(Debug, Clone, Serialize)]
pub struct SolutionRecord {
    pub solution_type: SolutionType,
    pub suppliers: Vec<SupplierRecord>,
    pub best_offer: SavingsRecord,
}

impl From<&SolutionOffer<'_>> for SolutionRecord {
    fn from(o: &SolutionOffer<'_>) -> Self {
        Self {
            solution_type: o.solution_type,
            suppliers: o
                .eligible_suppliers
                .iter()
                .map(|&s| SupplierRecord::from(s))
                .collect(),
            best_offer: SavingsRecord::from(&o.best_offer),
        }
    }
}

/// Rounded simulation outcome, as returned to API and CLI users.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub state: StateRecord,
    /// Consumption as requested, unrounded.
    pub consumption_kwh: Decimal,
    pub current_monthly_cost: Decimal,
    pub current_annual_cost: Decimal,
    pub available_solutions: Vec<SolutionRecord>,
    pub total_suppliers: usize,
}

impl From<&SimulationResult<'_>> for SimulationReport {
    fn from(r: &SimulationResult<'_>) -> Self {
        Self {
            state: StateRecord::from(r.state),
            consumption_kwh: r.consumption_kwh,
            current_monthly_cost: round_money(r.current_monthly_cost),
            current_annual_cost: round_money(r.current_annual_cost),
            available_solutions: r.available_solutions.iter().map(SolutionRecord::from).collect(),
            total_suppliers: r.total_suppliers,
        }
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "--- Savings simulation: {} ({}) ---",
            self.state.name, self.state.code
        )?;
        writeln!(f, "Consumption:           {} kWh/month", self.consumption_kwh)?;
        writeln!(
            f,
            "Tariff:                {} per kWh",
            self.state.base_tariff_per_kwh
        )?;
        writeln!(f, "Current monthly cost:  {}", self.current_monthly_cost)?;
        writeln!(f, "Current annual cost:   {}", self.current_annual_cost)?;
        writeln!(f, "Suppliers in state:    {}", self.total_suppliers)?;
        for solution in &self.available_solutions {
            let best = &solution.best_offer;
            writeln!(f)?;
            writeln!(
                f,
                "[{}] {} supplier(s)",
                solution.solution_type,
                solution.suppliers.len()
            )?;
            writeln!(f, "  Best offer:          {}", best.supplier.name)?;
            writeln!(f, "  Cost with supplier:  {}", best.cost_with_supplier)?;
            writeln!(
                f,
                "  Monthly savings:     {} ({}%)",
                best.monthly_savings, best.percent_savings
            )?;
            writeln!(f, "  Annual savings:      {}", best.annual_savings)?;
        }
        Ok(())
    }
}
