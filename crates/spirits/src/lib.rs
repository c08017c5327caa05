//! Bulk spirits and blended batches.
//!
//! Weight-based bulk spirit stock, receipts, batch recipes and the blending
//! calculation that turns spirit weight into batch volume, implemented purely as
//! deterministic domain logic (no IO, no storage).

pub mod batch;
pub mod blending;
pub mod bulk_spirit;
pub mod recipe;

pub use batch::Batch;
pub use blending::{
    BatchProductionLog, BlendRequest, BlendResult, SpiritDepletion, blend_abv, blend_batch,
};
pub use bulk_spirit::{BulkSpirit, BulkSpiritReceipt, SpiritQuantity, SpiritReceipt};
pub use recipe::{BatchRecipe, recipe_total, validate_batch_recipe};
