//! Immutable reference data: the states and suppliers simulations run against.
//!
//! A [`Catalog`] is built once at startup, either from the built-in data set
//! ([`Catalog::builtin`]) or from a TOML file, and is never mutated after.
//! Integrity checks run at load time so that the simulation never has to
//! treat malformed records as runtime errors.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::model::{Rating, SolutionCosts, SolutionType, State, Supplier};

/// States and suppliers available for simulation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    #[serde(default)]
    states: Vec<State>,
    #[serde(default)]
    suppliers: Vec<Supplier>,
}

/// A single integrity violation found in a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogIssue {
    /// Offending record, e.g. `"states[SP]"` or `"suppliers[f3]"`.
    pub record: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.record, self.message)
    }
}

/// Failure to load a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read catalog \"{}\": {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("catalog failed validation: {}", join_issues(.0))]
    Invalid(Vec<CatalogIssue>),
}

fn join_issues(issues: &[CatalogIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Catalog {
    /// Builds a catalog from raw records, rejecting any integrity violation.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Invalid`] listing every issue found.
    pub fn new(states: Vec<State>, suppliers: Vec<Supplier>) -> Result<Self, CatalogError> {
        let catalog = Self { states, suppliers };
        catalog.ensure_valid()?;
        Ok(catalog)
    }

    /// Parses and validates a catalog from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the file cannot be read, parsed or validated.
    pub fn from_toml_file(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates a catalog from a TOML string.
    ///
    /// Decimals should be written as strings (`base_tariff_per_kwh = "0.92"`)
    /// to keep them exact.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the TOML is invalid or fails validation.
    pub fn from_toml_str(s: &str) -> Result<Self, CatalogError> {
        let catalog: Self = toml::from_str(s)?;
        catalog.ensure_valid()?;
        Ok(catalog)
    }

    fn ensure_valid(&self) -> Result<(), CatalogError> {
        let issues = self.validate();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::Invalid(issues))
        }
    }

    /// Looks up a state by exact, case-sensitive code.
    pub fn lookup_state(&self, code: &str) -> Option<&State> {
        self.states.iter().find(|s| s.code == code)
    }

    /// All states, in declaration order.
    pub fn list_states(&self) -> &[State] {
        &self.states
    }

    /// Suppliers whose home state is `state_code`, in declaration order.
    ///
    /// Unknown codes yield an empty list.
    pub fn list_suppliers(&self, state_code: &str) -> Vec<&Supplier> {
        self.suppliers
            .iter()
            .filter(|s| s.home_state == state_code)
            .collect()
    }

    /// Every supplier in the catalog.
    pub fn suppliers(&self) -> &[Supplier] {
        &self.suppliers
    }

    /// Checks all integrity constraints and returns every violation found.
    ///
    /// Returns an empty vector if the catalog is consistent.
    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        let mut codes = HashSet::new();
        for state in &self.states {
            let record = format!("states[{}]", state.code);
            if state.code.len() != 2 || !state.code.chars().all(|c| c.is_ascii_uppercase()) {
                issues.push(CatalogIssue {
                    record: record.clone(),
                    message: "code must be two uppercase ASCII letters".into(),
                });
            }
            if !codes.insert(state.code.as_str()) {
                issues.push(CatalogIssue {
                    record: record.clone(),
                    message: "duplicate state code".into(),
                });
            }
            if state.base_tariff_per_kwh <= Decimal::ZERO {
                issues.push(CatalogIssue {
                    record,
                    message: "base_tariff_per_kwh must be > 0".into(),
                });
            }
        }

        let mut ids = HashSet::new();
        for supplier in &self.suppliers {
            let record = format!("suppliers[{}]", supplier.id);
            if !ids.insert(supplier.id.as_str()) {
                issues.push(CatalogIssue {
                    record: record.clone(),
                    message: "duplicate supplier id".into(),
                });
            }
            if !codes.contains(supplier.home_state.as_str()) {
                issues.push(CatalogIssue {
                    record: record.clone(),
                    message: format!("unknown home_state \"{}\"", supplier.home_state),
                });
            }
            if supplier.solution_types.is_empty() {
                issues.push(CatalogIssue {
                    record: record.clone(),
                    message: "must offer at least one solution type".into(),
                });
            }

            let mut seen = [false; SolutionType::COUNT];
            for &solution in &supplier.solution_types {
                if std::mem::replace(&mut seen[solution.index()], true) {
                    issues.push(CatalogIssue {
                        record: record.clone(),
                        message: format!("solution type \"{solution}\" listed twice"),
                    });
                }
                match supplier.cost_per_kwh.get(solution) {
                    Some(cost) if cost > Decimal::ZERO => {}
                    Some(_) => issues.push(CatalogIssue {
                        record: record.clone(),
                        message: format!("cost for \"{solution}\" must be > 0"),
                    }),
                    None => issues.push(CatalogIssue {
                        record: record.clone(),
                        message: format!("offers \"{solution}\" but declares no cost for it"),
                    }),
                }
            }
        }

        issues
    }

    /// Returns the built-in reference data set.
    pub fn builtin() -> Self {
        let catalog = Self {
            states: builtin_states(),
            suppliers: builtin_suppliers(),
        };
        debug_assert!(catalog.validate().is_empty(), "built-in catalog is invalid");
        catalog
    }
}

fn state(code: &str, name: &str, tariff_cents: i64) -> State {
    State {
        code: code.to_string(),
        name: name.to_string(),
        base_tariff_per_kwh: Decimal::new(tariff_cents, 2),
    }
}

fn builtin_states() -> Vec<State> {
    vec![
        state("SP", "São Paulo", 92),
        state("RJ", "Rio de Janeiro", 98),
        state("MG", "Minas Gerais", 87),
        state("RS", "Rio Grande do Sul", 85),
        state("PR", "Paraná", 83),
        state("SC", "Santa Catarina", 81),
        state("BA", "Bahia", 79),
        state("CE", "Ceará", 77),
    ]
}

/// Compact row for one built-in supplier: costs in cents per kWh, rating in tenths.
struct SupplierRow {
    id: &'static str,
    name: &'static str,
    logo_seed: &'static str,
    home_state: &'static str,
    gd_cents: Option<i64>,
    open_market_cents: Option<i64>,
    total_customers: u32,
    rating_tenths: i64,
}

#[rustfmt::skip]
const SUPPLIER_ROWS: &[SupplierRow] = &[
    SupplierRow { id: "f1", name: "Energia Solar SP", logo_seed: "solar", home_state: "SP", gd_cents: Some(65), open_market_cents: None, total_customers: 1523, rating_tenths: 47 },
    SupplierRow { id: "f2", name: "PowerTrade Brasil", logo_seed: "power", home_state: "SP", gd_cents: None, open_market_cents: Some(58), total_customers: 892, rating_tenths: 45 },
    SupplierRow { id: "f3", name: "GreenEnergy Soluções", logo_seed: "green", home_state: "SP", gd_cents: Some(68), open_market_cents: Some(61), total_customers: 2341, rating_tenths: 48 },
    SupplierRow { id: "f4", name: "Rio Solar Energia", logo_seed: "rio", home_state: "RJ", gd_cents: Some(71), open_market_cents: None, total_customers: 1102, rating_tenths: 46 },
    SupplierRow { id: "f5", name: "Mercado Livre RJ", logo_seed: "livre", home_state: "RJ", gd_cents: None, open_market_cents: Some(64), total_customers: 745, rating_tenths: 44 },
    SupplierRow { id: "f6", name: "Minas Energia Limpa", logo_seed: "minas", home_state: "MG", gd_cents: Some(62), open_market_cents: Some(56), total_customers: 1876, rating_tenths: 49 },
    SupplierRow { id: "f7", name: "Sul Energia Renovável", logo_seed: "sul", home_state: "RS", gd_cents: Some(60), open_market_cents: None, total_customers: 1234, rating_tenths: 47 },
    SupplierRow { id: "f8", name: "Paraná Power", logo_seed: "parana", home_state: "PR", gd_cents: None, open_market_cents: Some(54), total_customers: 934, rating_tenths: 45 },
    SupplierRow { id: "f9", name: "Santa Catarina Solar", logo_seed: "sc", home_state: "SC", gd_cents: Some(58), open_market_cents: None, total_customers: 987, rating_tenths: 46 },
    SupplierRow { id: "f10", name: "Bahia Energia Limpa", logo_seed: "bahia", home_state: "BA", gd_cents: Some(56), open_market_cents: Some(52), total_customers: 1456, rating_tenths: 48 },
    SupplierRow { id: "f11", name: "Ceará Renovável", logo_seed: "ceara", home_state: "CE", gd_cents: None, open_market_cents: Some(50), total_customers: 823, rating_tenths: 45 },
];

// Ratings in the table must lie in [0, 5]; checked at compile time.
const _: () = {
    let mut i = 0;
    while i < SUPPLIER_ROWS.len() {
        let tenths = SUPPLIER_ROWS[i].rating_tenths;
        assert!(tenths >= 0 && tenths <= 10 * Rating::MAX as i64);
        i += 1;
    }
};

fn builtin_suppliers() -> Vec<Supplier> {
    SUPPLIER_ROWS
        .iter()
        .map(|row| {
            let solution_types = SolutionType::ALL
                .into_iter()
                .filter(|s| match s {
                    SolutionType::Gd => row.gd_cents.is_some(),
                    SolutionType::OpenMarket => row.open_market_cents.is_some(),
                })
                .collect();
            let average_rating = Rating::try_from(Decimal::new(row.rating_tenths, 1))
                .expect("built-in ratings are range-checked at compile time");
            Supplier {
                id: row.id.to_string(),
                name: row.name.to_string(),
                logo_url: format!("https://api.dicebear.com/7.x/shapes/svg?seed={}", row.logo_seed),
                home_state: row.home_state.to_string(),
                solution_types,
                cost_per_kwh: SolutionCosts {
                    gd: row.gd_cents.map(|c| Decimal::new(c, 2)),
                    open_market: row.open_market_cents.map(|c| Decimal::new(c, 2)),
                },
                total_customers: row.total_customers,
                average_rating,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::builtin();
        let issues = catalog.validate();
        assert!(issues.is_empty(), "built-in catalog should be valid: {issues:?}");
        assert_eq!(catalog.list_states().len(), 8);
        assert_eq!(catalog.suppliers().len(), SUPPLIER_ROWS.len());
    }

    #[test]
    fn builtin_passes_load_time_checks() {
        let checked = Catalog::new(builtin_states(), builtin_suppliers());
        assert!(checked.is_ok(), "{:?}", checked.err());
        assert_eq!(checked.ok(), Some(Catalog::builtin()));
    }

    #[test]
    fn builtin_ratings_survive_conversion() {
        let catalog = Catalog::builtin();
        for (supplier, row) in catalog.suppliers().iter().zip(SUPPLIER_ROWS) {
            assert_eq!(supplier.id, row.id);
            assert_eq!(supplier.average_rating.value(), Decimal::new(row.rating_tenths, 1));
        }
    }

    #[test]
    fn lookup_state_exists() {
        let catalog = Catalog::builtin();
        let sp = catalog.lookup_state("SP").expect("SP should exist");
        assert_eq!(sp.name, "São Paulo");
        assert_eq!(sp.base_tariff_per_kwh, dec!(0.92));
    }

    #[test]
    fn lookup_state_is_case_sensitive() {
        let catalog = Catalog::builtin();
        assert!(catalog.lookup_state("sp").is_none());
        assert!(catalog.lookup_state("XX").is_none());
    }

    #[test]
    fn list_states_keeps_declaration_order() {
        let catalog = Catalog::builtin();
        let codes: Vec<&str> = catalog.list_states().iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, ["SP", "RJ", "MG", "RS", "PR", "SC", "BA", "CE"]);
    }

    #[test]
    fn list_suppliers_filters_by_home_state() {
        let catalog = Catalog::builtin();
        let sp = catalog.list_suppliers("SP");
        let ids: Vec<&str> = sp.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["f1", "f2", "f3"]);
        assert!(sp.iter().all(|s| s.home_state == "SP"));
    }

    #[test]
    fn list_suppliers_unknown_state_is_empty() {
        let catalog = Catalog::builtin();
        assert!(catalog.list_suppliers("XX").is_empty());
    }

    #[test]
    fn builtin_dual_solution_supplier() {
        let catalog = Catalog::builtin();
        let f3 = catalog
            .suppliers()
            .iter()
            .find(|s| s.id == "f3")
            .expect("f3 should exist");
        assert_eq!(f3.solution_types, [SolutionType::Gd, SolutionType::OpenMarket]);
        assert_eq!(f3.cost_per_kwh.get(SolutionType::OpenMarket), Some(dec!(0.61)));
        assert_eq!(f3.average_rating.value(), dec!(4.8));
    }

    #[test]
    fn validation_catches_missing_cost() {
        let mut catalog = Catalog::builtin();
        catalog.suppliers[0].cost_per_kwh.gd = None;
        let issues = catalog.validate();
        assert!(issues.iter().any(|i| i.record == "suppliers[f1]"
            && i.message.contains("declares no cost")));
    }

    #[test]
    fn validation_catches_unknown_home_state() {
        let mut catalog = Catalog::builtin();
        catalog.suppliers[0].home_state = "ZZ".into();
        let issues = catalog.validate();
        assert!(issues.iter().any(|i| i.message.contains("unknown home_state")));
    }

    #[test]
    fn validation_catches_duplicate_ids_and_codes() {
        let mut catalog = Catalog::builtin();
        catalog.suppliers[1].id = "f1".into();
        catalog.states.push(state("SP", "Duplicate", 50));
        let issues = catalog.validate();
        assert!(issues.iter().any(|i| i.message == "duplicate supplier id"));
        assert!(issues.iter().any(|i| i.message == "duplicate state code"));
    }

    #[test]
    fn validation_catches_bad_state_fields() {
        let mut catalog = Catalog::builtin();
        catalog.states[0].base_tariff_per_kwh = Decimal::ZERO;
        catalog.states[1].code = "rio".into();
        let issues = catalog.validate();
        assert!(issues.iter().any(|i| i.message.contains("must be > 0")));
        assert!(issues.iter().any(|i| i.message.contains("two uppercase")));
    }

    #[test]
    fn validation_catches_empty_and_duplicate_solutions() {
        let mut catalog = Catalog::builtin();
        catalog.suppliers[0].solution_types.clear();
        catalog.suppliers[1].solution_types = vec![SolutionType::OpenMarket; 2];
        let issues = catalog.validate();
        assert!(issues.iter().any(|i| i.record == "suppliers[f1]"
            && i.message.contains("at least one")));
        assert!(issues.iter().any(|i| i.record == "suppliers[f2]"
            && i.message.contains("listed twice")));
    }

    #[test]
    fn new_rejects_invalid_records() {
        let result = Catalog::new(builtin_states(), {
            let mut s = builtin_suppliers();
            s[0].cost_per_kwh.gd = Some(dec!(-0.1));
            s
        });
        assert!(matches!(result, Err(CatalogError::Invalid(ref issues)) if issues.len() == 1));
    }
}
