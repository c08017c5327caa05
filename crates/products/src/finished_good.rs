use serde::{Deserialize, Serialize};

use stillhouse_core::error::{checked_units, ensure_abv, ensure_non_negative};
use stillhouse_core::{DomainError, DomainResult, EngineConfig, Entity, FinishedGoodId};

use crate::metrics::{FinishedGoodMetrics, derive_finished_good_metrics};

/// Raw stock fields of a finished good.
///
/// `singles` counts loose units; `bottled_s` (shipping-packed) and `bottled_i`
/// (in-store-packed) count whole cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StockCounts {
    pub singles: i64,
    pub bottled_s: i64,
    pub bottled_i: i64,
}

impl StockCounts {
    pub fn new(singles: i64, bottled_s: i64, bottled_i: i64) -> Self {
        Self {
            singles,
            bottled_s,
            bottled_i,
        }
    }

    /// All stock expressed in units.
    pub fn total_units(&self, units_per_case: i64) -> DomainResult<i64> {
        checked_units(
            "total units",
            self.bottled_s
                .checked_add(self.bottled_i)
                .and_then(|cases| cases.checked_mul(units_per_case))
                .and_then(|units| units.checked_add(self.singles)),
        )
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.singles < 0 || self.bottled_s < 0 || self.bottled_i < 0 {
            return Err(DomainError::validation("stock counts cannot be negative"));
        }
        Ok(())
    }
}

/// Input for creating a finished good.
///
/// `case_size` defaults to 24 and `abv` to 0.0 (non-alcoholic) through
/// [`NewFinishedGood::named`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFinishedGood {
    pub id: FinishedGoodId,
    pub name: String,
    pub case_size: i64,
    pub stock: StockCounts,
    pub sold: i64,
    pub samples: i64,
    pub abv: f64,
    pub price_per_case: f64,
    pub retail_price_per_case: f64,
}

impl NewFinishedGood {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: FinishedGoodId::new(),
            name: name.into(),
            case_size: EngineConfig::DEFAULT_UNITS_PER_CASE,
            stock: StockCounts::default(),
            sold: 0,
            samples: 0,
            abv: 0.0,
            price_per_case: 0.0,
            retail_price_per_case: 0.0,
        }
    }

    pub fn with_abv(mut self, abv: f64) -> Self {
        self.abv = abv;
        self
    }

    pub fn with_stock(mut self, stock: StockCounts) -> Self {
        self.stock = stock;
        self
    }
}

/// A packaged product with derived stock and tax figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishedGood {
    id: FinishedGoodId,
    name: String,
    case_size: i64,
    stock: StockCounts,
    sold: i64,
    samples: i64,
    abv: f64,
    metrics: FinishedGoodMetrics,
    price_per_case: f64,
    retail_price_per_case: f64,
    revision: u64,
}

impl FinishedGood {
    pub fn create(new: NewFinishedGood, config: &EngineConfig) -> DomainResult<Self> {
        if new.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if new.case_size <= 0 {
            return Err(DomainError::validation("case size must be positive"));
        }
        ensure_abv(new.abv)?;
        new.stock.validate()?;
        ensure_non_negative("price per case", new.price_per_case)?;
        ensure_non_negative("retail price per case", new.retail_price_per_case)?;
        if new.sold < 0 || new.samples < 0 {
            return Err(DomainError::validation("sold and samples cannot be negative"));
        }

        let metrics = Self::derive(new.stock, new.abv, config);
        Ok(Self {
            id: new.id,
            name: new.name,
            case_size: new.case_size,
            stock: new.stock,
            sold: new.sold,
            samples: new.samples,
            abv: new.abv,
            metrics,
            price_per_case: new.price_per_case,
            retail_price_per_case: new.retail_price_per_case,
            revision: 0,
        })
    }

    fn derive(stock: StockCounts, abv: f64, config: &EngineConfig) -> FinishedGoodMetrics {
        derive_finished_good_metrics(stock.singles, stock.bottled_s, stock.bottled_i, abv, config)
    }

    pub fn id_typed(&self) -> FinishedGoodId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stored per-product case size. The metric derivations use the engine's
    /// fixed units-per-case instead.
    pub fn case_size(&self) -> i64 {
        self.case_size
    }

    pub fn stock(&self) -> StockCounts {
        self.stock
    }

    pub fn sold(&self) -> i64 {
        self.sold
    }

    pub fn samples(&self) -> i64 {
        self.samples
    }

    pub fn abv(&self) -> f64 {
        self.abv
    }

    pub fn metrics(&self) -> FinishedGoodMetrics {
        self.metrics
    }

    pub fn current_stock(&self) -> i64 {
        self.metrics.current_stock
    }

    pub fn proof_gallons(&self) -> f64 {
        self.metrics.proof_gallons
    }

    pub fn excise_tax_due(&self) -> f64 {
        self.metrics.excise_tax_due
    }

    pub fn price_per_case(&self) -> f64 {
        self.price_per_case
    }

    pub fn retail_price_per_case(&self) -> f64 {
        self.retail_price_per_case
    }

    /// Replace the stock fields and re-derive metrics.
    pub fn with_stock(&self, stock: StockCounts, config: &EngineConfig) -> DomainResult<Self> {
        stock.validate()?;
        let mut next = self.clone();
        next.stock = stock;
        next.metrics = Self::derive(stock, self.abv, config);
        Ok(next)
    }

    /// Change the ABV and re-derive metrics.
    pub fn with_abv(&self, abv: f64, config: &EngineConfig) -> DomainResult<Self> {
        ensure_abv(abv)?;
        let mut next = self.clone();
        next.abv = abv;
        next.metrics = Self::derive(self.stock, abv, config);
        Ok(next)
    }

    /// Remove shipped cases from stock and count them as sold.
    ///
    /// Shipping-packed cases go first, then in-store cases; any remainder is
    /// taken from singles. Singles hold units, so a remainder of `n` cases
    /// removes `n × units_per_case` singles rather than `n`, never going below
    /// zero.
    pub fn apply_shipment(&self, cases_shipped: i64, config: &EngineConfig) -> DomainResult<Self> {
        if cases_shipped <= 0 {
            return Err(DomainError::validation("cases shipped must be positive"));
        }

        let mut remaining = cases_shipped;
        let from_s = remaining.min(self.stock.bottled_s);
        remaining -= from_s;
        let from_i = remaining.min(self.stock.bottled_i);
        remaining -= from_i;
        let from_singles =
            checked_units("shipped units", remaining.checked_mul(config.units_per_case))?;
        let singles = self.stock.singles.saturating_sub(from_singles).max(0);

        let stock = StockCounts {
            singles,
            bottled_s: self.stock.bottled_s - from_s,
            bottled_i: self.stock.bottled_i - from_i,
        };
        let mut next = self.with_stock(stock, config)?;
        next.sold = checked_units("sold cases", next.sold.checked_add(cases_shipped))?;
        Ok(next)
    }
}

impl Entity for FinishedGood {
    type Id = FinishedGoodId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn set_revision(&mut self, revision: u64) {
        self.revision = revision;
    }
}
