//! View models for the stats bar — one line per currency.
//!
//! Compact magnitude suffixes (1.2K, 3.4M) are produced here because every
//! consumer wants them; locale details like thousands separators stay a UI
//! concern.

use crate::{economy::CurrencyMap, types::Currency};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CurrencyLine {
    pub symbol: &'static str,
    pub balance: f64,
    pub rate: f64,
    pub balance_display: String,
    pub rate_display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Statement {
    pub lines: Vec<CurrencyLine>,
}

impl Statement {
    pub fn build(balances: &CurrencyMap, rates: &CurrencyMap) -> Self {
        let lines = Currency::ALL
            .iter()
            .map(|&currency| CurrencyLine {
                symbol: currency.symbol(),
                balance: balances.get(currency),
                rate: rates.get(currency),
                balance_display: format_amount(balances.get(currency)),
                rate_display: format_amount(rates.get(currency)),
            })
            .collect();
        Self { lines }
    }

    pub fn line(&self, currency: Currency) -> &CurrencyLine {
        // Lines are built in Currency::ALL order.
        let idx = match currency {
            Currency::Emsx => 0,
            Currency::Usdt => 1,
            Currency::Btc => 2,
        };
        &self.lines[idx]
    }
}

/// Compact display form: 950 → "950.00", 12_340 → "12.34K", 5_600_000 → "5.60M".
pub fn format_amount(amount: f64) -> String {
    let abs = amount.abs();
    if abs >= 1_000_000_000.0 {
        format!("{:.2}B", amount / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{:.2}M", amount / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.2}K", amount / 1_000.0)
    } else if abs > 0.0 && abs < 0.01 {
        // BTC-sized trickles would render as 0.00 otherwise.
        format!("{amount:.6}")
    } else {
        format!("{amount:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_amount_picks_the_right_suffix() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(950.0), "950.00");
        assert_eq!(format_amount(12_340.0), "12.34K");
        assert_eq!(format_amount(5_600_000.0), "5.60M");
        assert_eq!(format_amount(2_100_000_000.0), "2.10B");
        assert_eq!(format_amount(0.0001), "0.000100");
    }

    #[test]
    fn statement_has_one_line_per_currency() {
        let balances = CurrencyMap { emsx: 100.0, usdt: 5.0, btc: 0.001 };
        let rates = CurrencyMap { emsx: 2.0, usdt: 0.1, btc: 0.0 };
        let statement = Statement::build(&balances, &rates);
        assert_eq!(statement.lines.len(), 3);
        assert_eq!(statement.line(Currency::Emsx).balance_display, "100.00");
        assert_eq!(statement.line(Currency::Usdt).rate_display, "0.10");
    }
}
