//! The economy engine — balances, accrual rates, and the tick rule.
//!
//! Balances only ever move two ways: upward through `tick` accrual, and
//! downward through an explicit `debit`. Rates are a pure function of the
//! current worker set and the catalog, recomputed whenever that set changes.

use crate::{
    config::WorkerCatalog,
    error::{GameError, GameResult},
    types::Currency,
    worker::Worker,
};
use serde::{Deserialize, Serialize};

/// Per-currency amounts. Used for both balances and per-second rates.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct CurrencyMap {
    pub emsx: f64,
    pub usdt: f64,
    pub btc: f64,
}

impl CurrencyMap {
    pub fn get(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Emsx => self.emsx,
            Currency::Usdt => self.usdt,
            Currency::Btc => self.btc,
        }
    }

    fn get_mut(&mut self, currency: Currency) -> &mut f64 {
        match currency {
            Currency::Emsx => &mut self.emsx,
            Currency::Usdt => &mut self.usdt,
            Currency::Btc => &mut self.btc,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomyEngine {
    balances: CurrencyMap,
    rates: CurrencyMap,
}

impl EconomyEngine {
    pub fn new(starting_emsx: f64) -> Self {
        Self {
            balances: CurrencyMap { emsx: starting_emsx, ..Default::default() },
            rates: CurrencyMap::default(),
        }
    }

    pub fn balances(&self) -> &CurrencyMap {
        &self.balances
    }

    pub fn rates(&self) -> &CurrencyMap {
        &self.rates
    }

    /// Accrue `rate[c] * elapsed_seconds` into every balance.
    ///
    /// Additive: tick(t1) then tick(t2) equals tick(t1 + t2). Negative
    /// elapsed time is a caller defect; it is clamped so balances stay
    /// monotonic.
    pub fn tick(&mut self, elapsed_seconds: f64) {
        debug_assert!(elapsed_seconds >= 0.0, "tick() with negative elapsed time");
        let elapsed = elapsed_seconds.max(0.0);
        for currency in Currency::ALL {
            *self.balances.get_mut(currency) += self.rates.get(currency) * elapsed;
        }
    }

    /// Recompute accrual rates from the worker set.
    ///
    /// A worker contributes its kind's base rate scaled linearly by level.
    /// Pure in the worker set: the same workers always yield the same rates.
    pub fn recompute_rates(&mut self, workers: &[&Worker], catalog: &WorkerCatalog) -> GameResult<()> {
        let mut rates = CurrencyMap::default();
        for worker in workers {
            let config = catalog.get(&worker.kind)?;
            for currency in Currency::ALL {
                *rates.get_mut(currency) +=
                    config.base_rates.get(currency) * worker.level as f64;
            }
        }
        self.rates = rates;
        Ok(())
    }

    /// Whether the primary-token balance covers `cost`.
    pub fn can_afford(&self, cost: f64) -> bool {
        self.balances.emsx >= cost
    }

    /// Subtract `cost` from the EMSX balance.
    ///
    /// Callers pairing a debit with another mutation (hire, unlock) must
    /// validate that mutation first so a later failure never leaves the
    /// balance decremented.
    pub fn debit(&mut self, cost: f64) -> GameResult<()> {
        if !self.can_afford(cost) {
            return Err(GameError::InsufficientFunds {
                needed: cost,
                available: self.balances.emsx,
            });
        }
        self.balances.emsx -= cost;
        Ok(())
    }

    /// Restore persisted balances/rates when resuming a saved game.
    pub fn restore(balances: CurrencyMap, rates: CurrencyMap) -> Self {
        Self { balances, rates }
    }
}
