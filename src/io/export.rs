//! CSV export of every offer in a simulation.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::savings::round_money;
use crate::simulation::SimulationResult;

/// Column header for offer export.
const HEADER: &str = "state,consumption_kwh,solution_type,supplier_id,supplier_name,\
                       current_monthly_cost,cost_with_supplier,monthly_savings,\
                       percent_savings,annual_savings,best";

/// Exports every priced offer of a simulation to a CSV file at the given path.
///
/// Writes a header row followed by one row per (solution type, eligible
/// supplier), in report order. Produces deterministic output for identical
/// inputs.
///
/// # Arguments
///
/// * `result` - Simulation to export
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(result: &SimulationResult<'_>, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(result, buf)
}

/// Writes every priced offer of a simulation as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(result: &SimulationResult<'_>, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for solution in &result.available_solutions {
        for offer in &solution.offers {
            let best = offer.supplier.id == solution.best_offer.supplier.id;
            wtr.write_record(&[
                result.state.code.clone(),
                result.consumption_kwh.to_string(),
                solution.solution_type.to_string(),
                offer.supplier.id.clone(),
                offer.supplier.name.clone(),
                round_money(offer.current_monthly_cost).to_string(),
                round_money(offer.cost_with_supplier).to_string(),
                round_money(offer.monthly_savings).to_string(),
                round_money(offer.percent_savings).to_string(),
                round_money(offer.annual_savings).to_string(),
                best.to_string(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
