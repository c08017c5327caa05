//! Stateful engine handle: load, compute, write back.
//!
//! Each operation reads the rows it needs, runs the pure calculation from the
//! domain crates, then writes the results in a fixed order:
//!
//! ```text
//! batch production:       bulk spirits -> batch -> batch production log
//! finished-good production: finished good -> production log -> ledger items
//! ```
//!
//! Every update carries the revision that was read, so a concurrent writer
//! produces a conflict instead of a lost update. A failure after the first
//! write is reported as [`EngineError::PartiallyApplied`].

use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;
use std::sync::{Arc, RwLock};

use chrono::NaiveDate;

use stillhouse_core::{
    BatchId, BulkSpiritId, DomainError, EngineConfig, Entity, ExpectedRevision, FinishedGoodId,
    LedgerItemId, Outcome, Warning,
};
use stillhouse_counts::{
    CountRequest, CountSession, PhysicalCount, WasteAnalysis, analyze_waste, count_finished_good,
    count_ledger_item,
};
use stillhouse_inventory::{InventoryLedgerItem, LedgerEdit, NewLedgerItem, reconcile_ledger_edit};
use stillhouse_production::{
    PackagingType, ProductionLogEntry, ProductionRecipe, ProductionRequest, ProductionResult,
    deplete_for_production,
};
use stillhouse_products::{FinishedGood, NewFinishedGood, StockCounts};
use stillhouse_spirits::{
    Batch, BatchProductionLog, BatchRecipe, BlendRequest, BlendResult, BulkSpirit,
    BulkSpiritReceipt, SpiritReceipt, blend_batch, validate_batch_recipe,
};

use crate::error::{EngineError, EngineResult, WriteSteps};
use crate::snapshot::{MonthlySnapshot, build_snapshot};
use crate::tax_report::{TaxReport, TaxReportInputs, build_tax_report};
use crate::store::{InMemoryRowStore, Journal, JournalEntry, RowStore, StoreError};

/// Row stores for the mutable tables.
#[derive(Clone)]
pub struct RowStores {
    pub bulk_spirits: Arc<dyn RowStore<BulkSpirit>>,
    pub batches: Arc<dyn RowStore<Batch>>,
    pub finished_goods: Arc<dyn RowStore<FinishedGood>>,
    pub ledger_items: Arc<dyn RowStore<InventoryLedgerItem>>,
}

impl RowStores {
    pub fn in_memory() -> Self {
        Self {
            bulk_spirits: Arc::new(InMemoryRowStore::new()),
            batches: Arc::new(InMemoryRowStore::new()),
            finished_goods: Arc::new(InMemoryRowStore::new()),
            ledger_items: Arc::new(InMemoryRowStore::new()),
        }
    }
}

/// Where a spirit receipt lands.
#[derive(Debug, Clone, PartialEq)]
pub enum ReceiptTarget {
    /// Create a new bulk spirit row with this name.
    NewSpirit(String),
    /// Add to an existing bulk spirit.
    Existing(BulkSpiritId),
}

pub struct Distillery {
    config: EngineConfig,
    stores: RowStores,
    batch_recipes: RwLock<HashMap<BatchId, Vec<BatchRecipe>>>,
    production_recipes: RwLock<Vec<ProductionRecipe>>,
    receipts: Journal<BulkSpiritReceipt>,
    batch_log: Journal<BatchProductionLog>,
    production_log: Journal<ProductionLogEntry>,
    physical_counts: Journal<PhysicalCount>,
    snapshots: Journal<MonthlySnapshot>,
}

fn require<V>(store: &dyn RowStore<V>, id: &V::Id, kind: &str) -> EngineResult<V>
where
    V: Entity,
    V::Id: Display,
{
    store
        .get(id)?
        .ok_or_else(|| EngineError::Domain(DomainError::not_found(format!("{kind} {id}"))))
}

/// Reject a count that names the same row twice, before anything is written.
fn ensure_counted_once<I>(ids: impl IntoIterator<Item = I>, kind: &str) -> EngineResult<()>
where
    I: Display + Hash + Eq,
{
    let mut seen = HashSet::new();
    for id in ids {
        if seen.contains(&id) {
            let message = format!("{kind} {id} is counted more than once");
            return Err(DomainError::validation(message).into());
        }
        seen.insert(id);
    }
    Ok(())
}

fn surface_warnings(operation: &str, warnings: &[Warning]) {
    for warning in warnings {
        tracing::warn!("{operation}: {warning}");
    }
}

impl Distillery {
    /// Engine with empty in-memory tables.
    pub fn init(config: EngineConfig) -> Self {
        Self::with_stores(config, RowStores::in_memory())
    }

    pub fn with_stores(config: EngineConfig, stores: RowStores) -> Self {
        tracing::info!(
            excise_tax_rate = config.excise_tax_rate,
            gallons_per_case = config.gallons_per_case,
            units_per_case = config.units_per_case,
            "distillery engine initialized"
        );
        Self {
            config,
            stores,
            batch_recipes: RwLock::new(HashMap::new()),
            production_recipes: RwLock::new(Vec::new()),
            receipts: Journal::new(),
            batch_log: Journal::new(),
            production_log: Journal::new(),
            physical_counts: Journal::new(),
            snapshots: Journal::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ----- bulk spirits -----

    /// Receive spirit by weight or volume and log the receipt.
    pub fn receive_spirit(
        &self,
        target: ReceiptTarget,
        receipt: &SpiritReceipt,
    ) -> EngineResult<(BulkSpirit, BulkSpiritReceipt)> {
        let mut steps = WriteSteps::new();
        let (spirit, log) = match target {
            ReceiptTarget::NewSpirit(name) => {
                let (spirit, log) = BulkSpirit::receive_new(BulkSpiritId::new(), name, receipt)?;
                let stored =
                    steps.record("bulk spirit", self.stores.bulk_spirits.insert(spirit))?;
                (stored, log)
            }
            ReceiptTarget::Existing(id) => {
                let current = require(&*self.stores.bulk_spirits, &id, "bulk spirit")?;
                let (spirit, log) = current.receive(receipt)?;
                let stored = steps.record(
                    "bulk spirit",
                    self.stores
                        .bulk_spirits
                        .update(spirit, ExpectedRevision::Exact(current.revision())),
                )?;
                (stored, log)
            }
        };
        steps.record("spirit receipt", self.receipts.append(log.clone()))?;

        tracing::info!(
            "Received {:.2} lbs of {} ({:.2} PG on hand)",
            log.weight_lbs,
            spirit.name(),
            spirit.proof_gallons()
        );
        Ok((spirit, log))
    }

    /// Manual correction of a bulk spirit's weight and ABV.
    pub fn edit_bulk_spirit(
        &self,
        id: BulkSpiritId,
        name: Option<&str>,
        weight_lbs: f64,
        abv: f64,
    ) -> EngineResult<BulkSpirit> {
        let current = require(&*self.stores.bulk_spirits, &id, "bulk spirit")?;
        let next = current.edit(name, weight_lbs, abv)?;
        let stored = self
            .stores
            .bulk_spirits
            .update(next, ExpectedRevision::Exact(current.revision()))?;
        tracing::debug!("Edited bulk spirit {id}");
        Ok(stored)
    }

    /// Remove a bulk spirit. Batch recipes naming it are kept and report
    /// the spirit as missing on the next run.
    pub fn delete_bulk_spirit(&self, id: BulkSpiritId) -> EngineResult<BulkSpirit> {
        let current = require(&*self.stores.bulk_spirits, &id, "bulk spirit")?;
        let mut steps = WriteSteps::new();
        steps.record("bulk spirit", self.stores.bulk_spirits.remove(&id))?;
        tracing::info!(
            "Deleted bulk spirit {} ({:.2} lbs)",
            current.name(),
            current.weight_lbs()
        );
        Ok(current)
    }

    // ----- batches -----

    pub fn create_batch(&self, name: &str, target_abv: f64) -> EngineResult<Batch> {
        let batch = Batch::create(BatchId::new(), name, target_abv)?;
        Ok(self.stores.batches.insert(batch)?)
    }

    pub fn edit_batch(
        &self,
        id: BatchId,
        name: Option<&str>,
        gallons: f64,
        bottled_gallons: f64,
        abv: f64,
    ) -> EngineResult<Batch> {
        let current = require(&*self.stores.batches, &id, "batch")?;
        let next = current.edit(name, gallons, bottled_gallons, abv)?;
        let stored = self
            .stores
            .batches
            .update(next, ExpectedRevision::Exact(current.revision()))?;
        tracing::debug!("Edited batch {id}");
        Ok(stored)
    }

    /// Remove a batch and its recipe. Its production history is kept.
    pub fn delete_batch(&self, id: BatchId) -> EngineResult<Batch> {
        let current = require(&*self.stores.batches, &id, "batch")?;
        let mut steps = WriteSteps::new();
        steps.record("batch", self.stores.batches.remove(&id))?;
        steps.record(
            "batch recipe",
            self.batch_recipes
                .write()
                .map(|mut recipes| recipes.remove(&id))
                .map_err(|_| StoreError::Poisoned),
        )?;
        tracing::info!("Deleted batch {}", current.name());
        Ok(current)
    }

    /// Replace the recipe of a batch. The rows must total 100%.
    pub fn set_batch_recipe(&self, batch_id: BatchId, rows: Vec<BatchRecipe>) -> EngineResult<()> {
        require(&*self.stores.batches, &batch_id, "batch")?;
        validate_batch_recipe(batch_id, &rows, self.config.recipe_tolerance_pct)?;
        let mut recipes = self
            .batch_recipes
            .write()
            .map_err(|_| StoreError::Poisoned)?;
        recipes.insert(batch_id, rows);
        Ok(())
    }

    pub fn batch_recipe(&self, batch_id: BatchId) -> EngineResult<Vec<BatchRecipe>> {
        let recipes = self.batch_recipes.read().map_err(|_| StoreError::Poisoned)?;
        Ok(recipes.get(&batch_id).cloned().unwrap_or_default())
    }

    /// Blend a production run of a batch from its recipe.
    pub fn produce_batch(
        &self,
        batch_id: BatchId,
        request: &BlendRequest,
    ) -> EngineResult<Outcome<BlendResult>> {
        let batch = require(&*self.stores.batches, &batch_id, "batch")?;
        let recipe = self.batch_recipe(batch_id)?;

        let mut spirits: Vec<BulkSpirit> = Vec::new();
        for id in recipe.iter().filter_map(|r| r.bulk_spirit_id) {
            if spirits.iter().any(|s| s.id_typed() == id) {
                continue;
            }
            if let Some(spirit) = self.stores.bulk_spirits.get(&id)? {
                spirits.push(spirit);
            }
        }

        let mut outcome = blend_batch(&batch, &recipe, &spirits, request, &self.config)?;
        surface_warnings("produce_batch", &outcome.warnings);

        let mut steps = WriteSteps::new();
        for depletion in &mut outcome.value.spirit_depletions {
            let expected = ExpectedRevision::Exact(depletion.updated.revision());
            depletion.updated = steps.record(
                format!("bulk spirit {}", depletion.bulk_spirit_id),
                self.stores
                    .bulk_spirits
                    .update(depletion.updated.clone(), expected),
            )?;
            tracing::debug!(
                "Depleted {:.2} lbs from {}",
                depletion.depleted_lbs,
                depletion.updated.name()
            );
        }

        let result = &mut outcome.value;
        result.updated_batch = steps.record(
            "batch",
            self.stores.batches.update(
                result.updated_batch.clone(),
                ExpectedRevision::Exact(batch.revision()),
            ),
        )?;
        steps.record(
            "batch production log",
            self.batch_log.append(result.log_entry.clone()),
        )?;

        tracing::info!(
            "Produced {:.2} gal of {} at {:.2}% ABV ({:.2} PG)",
            result.volume_produced,
            batch.name(),
            result.batch_abv,
            result.proof_gallons_produced
        );
        Ok(outcome)
    }

    // ----- finished goods -----

    pub fn create_finished_good(&self, new: NewFinishedGood) -> EngineResult<FinishedGood> {
        let good = FinishedGood::create(new, &self.config)?;
        Ok(self.stores.finished_goods.insert(good)?)
    }

    /// Operator edit of stock fields and/or ABV; metrics are re-derived.
    pub fn edit_finished_good(
        &self,
        id: FinishedGoodId,
        stock: Option<StockCounts>,
        abv: Option<f64>,
    ) -> EngineResult<FinishedGood> {
        let current = require(&*self.stores.finished_goods, &id, "finished good")?;
        let mut next = current.clone();
        if let Some(abv) = abv {
            next = next.with_abv(abv, &self.config)?;
        }
        if let Some(stock) = stock {
            next = next.with_stock(stock, &self.config)?;
        }
        let stored = self
            .stores
            .finished_goods
            .update(next, ExpectedRevision::Exact(current.revision()))?;
        tracing::debug!("Edited finished good {id}");
        Ok(stored)
    }

    /// Remove a finished good and its production recipes. Production and
    /// count history are kept.
    pub fn delete_finished_good(&self, id: FinishedGoodId) -> EngineResult<FinishedGood> {
        let current = require(&*self.stores.finished_goods, &id, "finished good")?;
        let mut steps = WriteSteps::new();
        steps.record("finished good", self.stores.finished_goods.remove(&id))?;
        steps.record(
            "production recipes",
            self.production_recipes
                .write()
                .map(|mut recipes| recipes.retain(|r| r.finished_good_id != id))
                .map_err(|_| StoreError::Poisoned),
        )?;
        tracing::info!("Deleted finished good {}", current.name());
        Ok(current)
    }

    /// Add a packaging recipe row. The good and the ledger item must exist.
    pub fn add_production_recipe(&self, row: ProductionRecipe) -> EngineResult<()> {
        row.validate()?;
        require(
            &*self.stores.finished_goods,
            &row.finished_good_id,
            "finished good",
        )?;
        require(
            &*self.stores.ledger_items,
            &row.inventory_item_id,
            "inventory item",
        )?;
        let mut recipes = self
            .production_recipes
            .write()
            .map_err(|_| StoreError::Poisoned)?;
        recipes.push(row);
        Ok(())
    }

    /// Replace every recipe row of `(good, packaging)` with `rows`.
    ///
    /// An empty `rows` clears the recipe. All rows are checked before the
    /// swap.
    pub fn set_production_recipe(
        &self,
        good: FinishedGoodId,
        packaging: PackagingType,
        rows: Vec<ProductionRecipe>,
    ) -> EngineResult<()> {
        require(&*self.stores.finished_goods, &good, "finished good")?;
        for row in &rows {
            row.validate()?;
            if !row.applies_to(good, packaging) {
                return Err(DomainError::validation(format!(
                    "recipe row for {} ({}) does not belong to {good} ({packaging})",
                    row.finished_good_id, row.packaging_type
                ))
                .into());
            }
            require(
                &*self.stores.ledger_items,
                &row.inventory_item_id,
                "inventory item",
            )?;
        }

        let mut recipes = self
            .production_recipes
            .write()
            .map_err(|_| StoreError::Poisoned)?;
        recipes.retain(|r| !r.applies_to(good, packaging));
        let count = rows.len();
        recipes.extend(rows);
        tracing::debug!("Set {count} recipe rows for {good} ({packaging})");
        Ok(())
    }

    pub fn production_recipes(
        &self,
        good: FinishedGoodId,
        packaging: PackagingType,
    ) -> EngineResult<Vec<ProductionRecipe>> {
        let recipes = self
            .production_recipes
            .read()
            .map_err(|_| StoreError::Poisoned)?;
        Ok(recipes
            .iter()
            .filter(|r| r.applies_to(good, packaging))
            .cloned()
            .collect())
    }

    /// Record cases produced and deplete packaging per recipe.
    pub fn record_production(
        &self,
        good_id: FinishedGoodId,
        request: &ProductionRequest,
    ) -> EngineResult<Outcome<ProductionResult>> {
        let good = require(&*self.stores.finished_goods, &good_id, "finished good")?;
        if let Some(batch_id) = request.batch_ref {
            require(&*self.stores.batches, &batch_id, "batch")?;
        }
        let recipes = self.production_recipes(good_id, request.packaging_type)?;

        let mut items: Vec<InventoryLedgerItem> = Vec::new();
        for id in recipes.iter().map(|r| r.inventory_item_id) {
            if items.iter().any(|i| i.id_typed() == id) {
                continue;
            }
            if let Some(item) = self.stores.ledger_items.get(&id)? {
                items.push(item);
            }
        }

        let mut outcome =
            deplete_for_production(&good, request, &recipes, &items, &self.config)?;
        surface_warnings("record_production", &outcome.warnings);

        let mut steps = WriteSteps::new();
        let result = &mut outcome.value;
        result.updated_good = steps.record(
            "finished good",
            self.stores.finished_goods.update(
                result.updated_good.clone(),
                ExpectedRevision::Exact(good.revision()),
            ),
        )?;
        steps.record(
            "production log",
            self.production_log.append(result.log_entry.clone()),
        )?;
        for depletion in &mut result.ledger_updates {
            let expected = ExpectedRevision::Exact(depletion.updated.revision());
            depletion.updated = steps.record(
                format!("ledger item {}", depletion.inventory_item_id),
                self.stores
                    .ledger_items
                    .update(depletion.updated.clone(), expected),
            )?;
            tracing::debug!(
                "Depleted {} units of {}",
                depletion.units,
                depletion.updated.item_name()
            );
        }

        tracing::info!(
            "Recorded {} cases of {} ({})",
            request.cases_produced,
            good.name(),
            request.packaging_type
        );
        Ok(outcome)
    }

    /// Ship an order: drain packed cases first, then singles; count as sold.
    pub fn ship_order(&self, good_id: FinishedGoodId, cases: i64) -> EngineResult<FinishedGood> {
        let current = require(&*self.stores.finished_goods, &good_id, "finished good")?;
        let next = current.apply_shipment(cases, &self.config)?;
        let stored = self
            .stores
            .finished_goods
            .update(next, ExpectedRevision::Exact(current.revision()))?;
        tracing::info!("Shipped {cases} cases of {}", stored.name());
        Ok(stored)
    }

    // ----- inventory ledger -----

    pub fn create_ledger_item(&self, new: NewLedgerItem) -> EngineResult<InventoryLedgerItem> {
        let item = InventoryLedgerItem::create(new)?;
        Ok(self.stores.ledger_items.insert(item)?)
    }

    /// Apply an operator edit through the ledger reconciliation rules.
    pub fn edit_ledger_item(
        &self,
        id: LedgerItemId,
        edit: &LedgerEdit,
    ) -> EngineResult<InventoryLedgerItem> {
        let current = require(&*self.stores.ledger_items, &id, "inventory item")?;
        let next = reconcile_ledger_edit(&current, edit)?;
        let stored = self
            .stores
            .ledger_items
            .update(next, ExpectedRevision::Exact(current.revision()))?;
        tracing::debug!(
            "Ledger item {} now {} units ({} cases)",
            stored.item_name(),
            stored.units_remaining(),
            stored.cases_remaining()
        );
        Ok(stored)
    }

    /// Remove a ledger item. Production recipes naming it are kept and
    /// report the item as missing on the next run.
    pub fn delete_ledger_item(&self, id: LedgerItemId) -> EngineResult<InventoryLedgerItem> {
        let current = require(&*self.stores.ledger_items, &id, "inventory item")?;
        let mut steps = WriteSteps::new();
        steps.record("ledger item", self.stores.ledger_items.remove(&id))?;
        tracing::info!("Deleted ledger item {}", current.item_name());
        Ok(current)
    }

    // ----- physical counts -----

    /// Count finished goods; with `request.adjust` the stock is overwritten.
    ///
    /// Every id is resolved before anything is written.
    pub fn count_finished_goods(
        &self,
        counts: &[(FinishedGoodId, StockCounts)],
        request: &CountRequest,
    ) -> EngineResult<CountSession> {
        ensure_counted_once(counts.iter().map(|(id, _)| *id), "finished good")?;
        let mut results = Vec::with_capacity(counts.len());
        for (id, actual) in counts {
            let good = require(&*self.stores.finished_goods, id, "finished good")?;
            let result = count_finished_good(&good, *actual, request, &self.config)?;
            results.push((good, result));
        }

        let mut steps = WriteSteps::new();
        let mut session = CountSession::new();
        for (good, result) in results {
            if let Some(adjusted) = result.adjusted {
                steps.record(
                    format!("finished good {}", good.id_typed()),
                    self.stores
                        .finished_goods
                        .update(adjusted, ExpectedRevision::Exact(good.revision())),
                )?;
            }
            steps.record(
                format!("count of {}", good.id_typed()),
                self.physical_counts.append(result.record.clone()),
            )?;
            session.record(result.record);
        }

        tracing::info!(
            "Saved finished-goods count: {} items, {} with variance",
            session.items_counted(),
            session.items_with_variance()
        );
        Ok(session)
    }

    /// Count ledger items; with `request.adjust` `added` is back-solved.
    pub fn count_ledger_items(
        &self,
        counts: &[(LedgerItemId, i64)],
        request: &CountRequest,
    ) -> EngineResult<CountSession> {
        ensure_counted_once(counts.iter().map(|(id, _)| *id), "inventory item")?;
        let mut results = Vec::with_capacity(counts.len());
        for (id, actual) in counts {
            let item = require(&*self.stores.ledger_items, id, "inventory item")?;
            let result = count_ledger_item(&item, *actual, request)?;
            results.push((item, result));
        }

        let mut steps = WriteSteps::new();
        let mut session = CountSession::new();
        for (item, result) in results {
            if let Some(adjusted) = result.adjusted {
                steps.record(
                    format!("ledger item {}", item.id_typed()),
                    self.stores
                        .ledger_items
                        .update(adjusted, ExpectedRevision::Exact(item.revision())),
                )?;
            }
            steps.record(
                format!("count of {}", item.id_typed()),
                self.physical_counts.append(result.record.clone()),
            )?;
            session.record(result.record);
        }

        tracing::info!(
            "Saved inventory count: {} items, {} with variance",
            session.items_counted(),
            session.items_with_variance()
        );
        Ok(session)
    }

    // ----- snapshots -----

    pub fn create_monthly_snapshot(&self, date: NaiveDate) -> EngineResult<MonthlySnapshot> {
        let snapshot = build_snapshot(
            date,
            &self.stores.finished_goods.list()?,
            &self.stores.bulk_spirits.list()?,
            &self.stores.ledger_items.list()?,
        )?;
        self.snapshots.append(snapshot.clone())?;
        tracing::info!(
            "Created snapshot for {}: {:.2} PG, ${:.2} excise",
            snapshot.snapshot_month,
            snapshot.total_proof_gallons,
            snapshot.total_excise_tax_liability
        );
        Ok(snapshot)
    }

    /// Proof-gallon movement and excise for `year-month`.
    ///
    /// Beginning inventory comes from the previous month's snapshot; ending
    /// inventory is the finished goods on hand now.
    pub fn tax_report(&self, year: i32, month: u32) -> EngineResult<TaxReport> {
        let snapshots = self.snapshots.records()?;
        let production_log = self.production_log.records()?;
        let batch_log = self.batch_log.records()?;
        let finished_goods = self.stores.finished_goods.list()?;
        let bulk_spirits = self.stores.bulk_spirits.list()?;
        let report = build_tax_report(
            year,
            month,
            &TaxReportInputs {
                snapshots: &snapshots,
                production_log: &production_log,
                batch_log: &batch_log,
                finished_goods: &finished_goods,
                bulk_spirits: &bulk_spirits,
            },
            &self.config,
        )?;
        tracing::info!(
            "Tax report {}: {:.2} PG removed, ${:.2} excise on removals",
            report.month,
            report.proof_gallons_removed,
            report.excise_tax_on_removals
        );
        Ok(report)
    }

    /// Finished-good count variance since `since` (all history when `None`).
    pub fn waste_analysis(&self, since: Option<NaiveDate>) -> EngineResult<WasteAnalysis> {
        let counts = self.physical_counts.records()?;
        Ok(analyze_waste(&counts, since))
    }

    // ----- accessors -----

    pub fn bulk_spirit(&self, id: BulkSpiritId) -> EngineResult<Option<BulkSpirit>> {
        Ok(self.stores.bulk_spirits.get(&id)?)
    }

    pub fn batch(&self, id: BatchId) -> EngineResult<Option<Batch>> {
        Ok(self.stores.batches.get(&id)?)
    }

    pub fn finished_good(&self, id: FinishedGoodId) -> EngineResult<Option<FinishedGood>> {
        Ok(self.stores.finished_goods.get(&id)?)
    }

    pub fn ledger_item(&self, id: LedgerItemId) -> EngineResult<Option<InventoryLedgerItem>> {
        Ok(self.stores.ledger_items.get(&id)?)
    }

    pub fn bulk_spirits(&self) -> EngineResult<Vec<BulkSpirit>> {
        Ok(self.stores.bulk_spirits.list()?)
    }

    pub fn batches(&self) -> EngineResult<Vec<Batch>> {
        Ok(self.stores.batches.list()?)
    }

    pub fn finished_goods(&self) -> EngineResult<Vec<FinishedGood>> {
        Ok(self.stores.finished_goods.list()?)
    }

    pub fn ledger_items(&self) -> EngineResult<Vec<InventoryLedgerItem>> {
        Ok(self.stores.ledger_items.list()?)
    }

    pub fn spirit_receipts(&self) -> EngineResult<Vec<JournalEntry<BulkSpiritReceipt>>> {
        Ok(self.receipts.entries()?)
    }

    pub fn batch_production_log(&self) -> EngineResult<Vec<JournalEntry<BatchProductionLog>>> {
        Ok(self.batch_log.entries()?)
    }

    pub fn production_log(&self) -> EngineResult<Vec<JournalEntry<ProductionLogEntry>>> {
        Ok(self.production_log.entries()?)
    }

    pub fn physical_counts(&self) -> EngineResult<Vec<JournalEntry<PhysicalCount>>> {
        Ok(self.physical_counts.entries()?)
    }

    pub fn snapshots(&self) -> EngineResult<Vec<JournalEntry<MonthlySnapshot>>> {
        Ok(self.snapshots.entries()?)
    }
}
