//! Entity trait: identity + revision across state changes.

/// A stored record with a stable identity.
///
/// Every mutable record (spirits, batches, finished goods, ledger items) carries a
/// revision that increases by one on each accepted write, so a row store can
/// reject lost updates with [`crate::ExpectedRevision`].
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Ord + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Revision of the stored state (0 = never persisted).
    fn revision(&self) -> u64;

    /// Stamp the revision assigned by the store on an accepted write.
    fn set_revision(&mut self, revision: u64);
}
