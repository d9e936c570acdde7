//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use energy_savings::catalog::Catalog;

/// Small catalog with one supplier-less state ("AM") and a tie in "RJ".
pub const FIXTURE_CATALOG: &str = r#"
[[states]]
code = "SP"
name = "São Paulo"
base_tariff_per_kwh = "0.92"

[[states]]
code = "RJ"
name = "Rio de Janeiro"
base_tariff_per_kwh = "1.00"

[[states]]
code = "AM"
name = "Amazonas"
base_tariff_per_kwh = "0.90"

[[suppliers]]
id = "sp-gd"
name = "Solar SP"
logo_url = "https://example.com/sp-gd.svg"
home_state = "SP"
solution_types = ["GD"]
cost_per_kwh = { gd = "0.65" }
total_customers = 1523
average_rating = "4.7"

[[suppliers]]
id = "sp-both"
name = "Green SP"
logo_url = "https://example.com/sp-both.svg"
home_state = "SP"
solution_types = ["GD", "Mercado Livre"]
cost_per_kwh = { gd = "0.68", open_market = "0.61" }
total_customers = 2341
average_rating = "4.8"

[[suppliers]]
id = "rj-first"
name = "Rio First"
logo_url = "https://example.com/rj-first.svg"
home_state = "RJ"
solution_types = ["Mercado Livre"]
cost_per_kwh = { open_market = "0.50" }
total_customers = 10
average_rating = "3.0"

[[suppliers]]
id = "rj-second"
name = "Rio Second"
logo_url = "https://example.com/rj-second.svg"
home_state = "RJ"
solution_types = ["Mercado Livre"]
cost_per_kwh = { open_market = "0.50" }
total_customers = 0
average_rating = "5"
"#;

/// Parses [`FIXTURE_CATALOG`].
pub fn fixture_catalog() -> Catalog {
    Catalog::from_toml_str(FIXTURE_CATALOG).expect("fixture catalog should be valid")
}
