use serde::{Deserialize, Serialize};

use stillhouse_core::error::checked_units;
use stillhouse_core::{DomainError, DomainResult, EngineConfig, Entity, LedgerItemId};

/// Input for creating a ledger item. `added` always starts at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLedgerItem {
    pub id: LedgerItemId,
    pub item_name: String,
    pub units_per_case: i64,
    pub started: i64,
    pub depleted: i64,
}

impl NewLedgerItem {
    /// New item with the default 24 units per case and no stock.
    pub fn named(item_name: impl Into<String>) -> Self {
        Self {
            id: LedgerItemId::new(),
            item_name: item_name.into(),
            units_per_case: EngineConfig::DEFAULT_UNITS_PER_CASE,
            started: 0,
            depleted: 0,
        }
    }

    pub fn units_per_case(mut self, units_per_case: i64) -> Self {
        self.units_per_case = units_per_case;
        self
    }

    pub fn started(mut self, started: i64) -> Self {
        self.started = started;
        self
    }

    pub fn depleted(mut self, depleted: i64) -> Self {
        self.depleted = depleted;
        self
    }
}

/// An operator edit of a ledger row, as submitted by the editing grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEdit {
    pub started: i64,
    pub depleted: i64,
    pub units_per_case: i64,
    pub cases_remaining: i64,
    /// Rename the item; `None` keeps the current name.
    pub item_name: Option<String>,
}

impl LedgerEdit {
    /// An edit that changes nothing relative to `item`.
    pub fn from_item(item: &InventoryLedgerItem) -> Self {
        Self {
            started: item.started,
            depleted: item.depleted,
            units_per_case: item.units_per_case,
            cases_remaining: item.cases_remaining,
            item_name: None,
        }
    }
}

/// A countable packaging/material stock line.
///
/// Invariant: `units_remaining == started - depleted + added` and
/// `cases_remaining == units_remaining / units_per_case` (truncating; 0 when
/// `units_per_case` is not positive), except right after a cases-remaining
/// edit, where the operator-entered case count is kept as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLedgerItem {
    id: LedgerItemId,
    item_name: String,
    units_per_case: i64,
    started: i64,
    /// Negative values record a correction addition.
    depleted: i64,
    added: i64,
    units_remaining: i64,
    cases_remaining: i64,
    revision: u64,
}

fn whole_cases(units: i64, units_per_case: i64) -> i64 {
    if units_per_case > 0 {
        units / units_per_case
    } else {
        0
    }
}

fn ensure_units_per_case(units_per_case: i64) -> DomainResult<()> {
    if units_per_case < 0 {
        return Err(DomainError::validation("units per case cannot be negative"));
    }
    Ok(())
}

impl InventoryLedgerItem {
    pub fn create(new: NewLedgerItem) -> DomainResult<Self> {
        if new.item_name.trim().is_empty() {
            return Err(DomainError::validation("item name cannot be empty"));
        }
        ensure_units_per_case(new.units_per_case)?;
        if new.started < 0 || new.depleted < 0 {
            return Err(DomainError::validation(
                "starting and depleted units cannot be negative",
            ));
        }

        let mut item = Self {
            id: new.id,
            item_name: new.item_name,
            units_per_case: new.units_per_case,
            started: new.started,
            depleted: new.depleted,
            added: 0,
            units_remaining: 0,
            cases_remaining: 0,
            revision: 0,
        };
        item.recompute()?;
        Ok(item)
    }

    pub fn id_typed(&self) -> LedgerItemId {
        self.id
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn units_per_case(&self) -> i64 {
        self.units_per_case
    }

    pub fn started(&self) -> i64 {
        self.started
    }

    pub fn depleted(&self) -> i64 {
        self.depleted
    }

    pub fn added(&self) -> i64 {
        self.added
    }

    pub fn units_remaining(&self) -> i64 {
        self.units_remaining
    }

    pub fn cases_remaining(&self) -> i64 {
        self.cases_remaining
    }

    /// Units beyond the last whole case.
    pub fn leftover_units(&self) -> i64 {
        if self.units_per_case > 0 {
            self.units_remaining.rem_euclid(self.units_per_case)
        } else {
            0
        }
    }

    /// Whether `units_remaining` agrees with the ledger formula.
    pub fn is_balanced(&self) -> bool {
        self.units_remaining == self.started - self.depleted + self.added
    }

    /// Canonical recompute of the derived fields from started/depleted/added.
    fn recompute(&mut self) -> DomainResult<()> {
        self.units_remaining = checked_units(
            "units remaining",
            self.started
                .checked_sub(self.depleted)
                .and_then(|u| u.checked_add(self.added)),
        )?;
        self.cases_remaining = whole_cases(self.units_remaining, self.units_per_case);
        Ok(())
    }

    /// Consume `units` in production. Always the canonical path.
    pub fn apply_depletion(&self, units: i64) -> DomainResult<Self> {
        let mut next = self.clone();
        next.depleted = checked_units("depleted units", next.depleted.checked_add(units))?;
        next.recompute()?;
        Ok(next)
    }

    /// Force `units_remaining` to a physical count by back-solving `added`.
    ///
    /// `started` and `depleted` are kept as history.
    pub fn reconcile_to_count(&self, actual_units: i64) -> DomainResult<Self> {
        if actual_units < 0 {
            return Err(DomainError::validation("counted units cannot be negative"));
        }
        let mut next = self.clone();
        next.added = checked_units(
            "added units",
            actual_units
                .checked_sub(next.started)
                .and_then(|u| u.checked_add(next.depleted)),
        )?;
        next.recompute()?;
        Ok(next)
    }
}

/// Apply an operator edit, classifying it by what changed.
///
/// - Only `cases_remaining` changed: whole cases were added or removed. The
///   leftover units (`units_remaining mod units_per_case`) are preserved and
///   `added` is back-solved so the ledger formula still holds.
/// - `started` and/or `depleted` changed (whether or not cases also changed):
///   `added` is kept and everything is recomputed from the formula.
pub fn reconcile_ledger_edit(
    current: &InventoryLedgerItem,
    requested: &LedgerEdit,
) -> DomainResult<InventoryLedgerItem> {
    ensure_units_per_case(requested.units_per_case)?;
    if requested.started < 0 {
        return Err(DomainError::validation("starting units cannot be negative"));
    }

    let started_changed = requested.started != current.started;
    let depleted_changed = requested.depleted != current.depleted;
    let cases_changed = requested.cases_remaining != current.cases_remaining;

    // An overdrawn item may already show negative cases; only a new value is checked.
    if cases_changed && requested.cases_remaining < 0 {
        return Err(DomainError::validation("cases remaining cannot be negative"));
    }

    let mut next = current.clone();
    if let Some(name) = &requested.item_name {
        if name.trim().is_empty() {
            return Err(DomainError::validation("item name cannot be empty"));
        }
        next.item_name = name.clone();
    }
    next.units_per_case = requested.units_per_case;
    next.started = requested.started;
    next.depleted = requested.depleted;

    if cases_changed && !(started_changed || depleted_changed) {
        let leftover = if requested.units_per_case > 0 {
            current.units_remaining.rem_euclid(requested.units_per_case)
        } else {
            0
        };
        next.units_remaining = checked_units(
            "units remaining",
            requested
                .cases_remaining
                .checked_mul(requested.units_per_case)
                .and_then(|u| u.checked_add(leftover)),
        )?;
        next.added = checked_units(
            "added units",
            next.units_remaining
                .checked_sub(next.started)
                .and_then(|u| u.checked_add(next.depleted)),
        )?;
        next.cases_remaining = requested.cases_remaining;
    } else {
        next.recompute()?;
    }

    Ok(next)
}

impl Entity for InventoryLedgerItem {
    type Id = LedgerItemId;

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

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(started: i64, depleted: i64) -> InventoryLedgerItem {
        InventoryLedgerItem::create(
            NewLedgerItem::named("750ml Bottle (24/cs)")
                .started(started)
                .depleted(depleted),
        )
        .unwrap()
    }

    #[test]
    fn create_derives_remaining() {
        let it = item(100, 10);
        assert_eq!(it.added(), 0);
        assert_eq!(it.units_remaining(), 90);
        assert_eq!(it.cases_remaining(), 3);
        assert_eq!(it.leftover_units(), 18);
    }

    #[test]
    fn create_rejects_empty_name() {
        let err = InventoryLedgerItem::create(NewLedgerItem::named(" ")).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn cases_edit_preserves_leftover_units() {
        let it = item(100, 10);
        let mut edit = LedgerEdit::from_item(&it);
        edit.cases_remaining = 5;

        let next = reconcile_ledger_edit(&it, &edit).unwrap();
        assert_eq!(next.units_remaining(), 138);
        assert_eq!(next.added(), 48);
        assert_eq!(next.cases_remaining(), 5);
        assert_eq!(next.started(), 100);
        assert_eq!(next.depleted(), 10);
        assert!(next.is_balanced());
    }

    #[test]
    fn removing_cases_back_solves_negative_added() {
        let it = item(100, 10);
        let mut edit = LedgerEdit::from_item(&it);
        edit.cases_remaining = 1;

        let next = reconcile_ledger_edit(&it, &edit).unwrap();
        assert_eq!(next.units_remaining(), 42);
        assert_eq!(next.added(), -48);
        assert!(next.is_balanced());
    }

    #[test]
    fn depleted_edit_uses_canonical_formula() {
        let it = item(100, 10);
        let mut edit = LedgerEdit::from_item(&it);
        edit.depleted = 40;

        let next = reconcile_ledger_edit(&it, &edit).unwrap();
        assert_eq!(next.added(), 0);
        assert_eq!(next.units_remaining(), 60);
        assert_eq!(next.cases_remaining(), 2);
    }

    #[test]
    fn started_change_wins_over_cases_change() {
        let it = item(100, 10);
        let edit = LedgerEdit {
            started: 200,
            depleted: 10,
            units_per_case: 24,
            cases_remaining: 50,
            item_name: None,
        };

        let next = reconcile_ledger_edit(&it, &edit).unwrap();
        assert_eq!(next.added(), 0);
        assert_eq!(next.units_remaining(), 190);
        assert_eq!(next.cases_remaining(), 7);
    }

    #[test]
    fn unchanged_edit_is_a_no_op() {
        let it = item(100, 10);
        let next = reconcile_ledger_edit(&it, &LedgerEdit::from_item(&it)).unwrap();
        assert_eq!(next, it);
    }

    #[test]
    fn zero_units_per_case_reports_no_cases() {
        let it = InventoryLedgerItem::create(
            NewLedgerItem::named("Shrink film (ft)")
                .units_per_case(0)
                .started(500),
        )
        .unwrap();
        assert_eq!(it.units_remaining(), 500);
        assert_eq!(it.cases_remaining(), 0);
        assert_eq!(it.leftover_units(), 0);
    }

    #[test]
    fn depletion_is_cumulative_and_canonical() {
        let it = item(100, 0)
            .apply_depletion(30)
            .and_then(|it| it.apply_depletion(30))
            .unwrap();
        assert_eq!(it.depleted(), 60);
        assert_eq!(it.units_remaining(), 40);
        assert_eq!(it.cases_remaining(), 1);
    }

    #[test]
    fn negative_depletion_is_a_correction() {
        let it = item(100, 10).apply_depletion(-5).unwrap();
        assert_eq!(it.depleted(), 5);
        assert_eq!(it.units_remaining(), 95);
    }

    #[test]
    fn overflowing_depletion_is_rejected() {
        let it = item(100, 10);
        assert!(matches!(
            it.apply_depletion(i64::MAX),
            Err(DomainError::Validation(_))
        ));

        let mut edit = LedgerEdit::from_item(&it);
        edit.cases_remaining = i64::MAX / 2;
        assert!(reconcile_ledger_edit(&it, &edit).is_err());
    }

    #[test]
    fn count_reconciliation_keeps_history() {
        let it = item(100, 10);
        let next = it.reconcile_to_count(70).unwrap();
        assert_eq!(next.units_remaining(), 70);
        assert_eq!(next.added(), -20);
        assert_eq!(next.started(), 100);
        assert_eq!(next.depleted(), 10);
        assert_eq!(next.cases_remaining(), 2);
        assert!(it.reconcile_to_count(-1).is_err());
    }

    #[test]
    fn edit_rejects_negative_fields() {
        let it = item(100, 10);
        let mut edit = LedgerEdit::from_item(&it);
        edit.cases_remaining = -1;
        assert!(reconcile_ledger_edit(&it, &edit).is_err());

        let mut edit = LedgerEdit::from_item(&it);
        edit.units_per_case = -24;
        assert!(reconcile_ledger_edit(&it, &edit).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: any sequence of edits and depletions keeps the ledger balanced.
        #[test]
        fn ledger_stays_balanced(
            started in 0i64..10_000,
            steps in prop::collection::vec(
                (0u8..3, 0i64..5_000, 0i64..200, 1i64..48),
                1..20,
            )
        ) {
            let mut it = item(started, 0);
            for (kind, a, b, upc) in steps {
                it = match kind {
                    0 => it.apply_depletion(b).unwrap(),
                    1 => {
                        let mut edit = LedgerEdit::from_item(&it);
                        edit.units_per_case = upc;
                        edit.cases_remaining = b;
                        reconcile_ledger_edit(&it, &edit).unwrap()
                    }
                    _ => {
                        let mut edit = LedgerEdit::from_item(&it);
                        edit.started = a;
                        edit.depleted = b;
                        reconcile_ledger_edit(&it, &edit).unwrap()
                    }
                };
                prop_assert!(it.is_balanced());
            }
        }
    }
}
