use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::NaiveDate;
use stillhouse_core::{BatchId, BulkSpiritId, EngineConfig};
use stillhouse_infra::{Distillery, ReceiptTarget};
use stillhouse_inventory::{InventoryLedgerItem, NewLedgerItem};
use stillhouse_production::{
    PackagingType, ProductionRecipe, ProductionRequest, deplete_for_production,
};
use stillhouse_products::{FinishedGood, NewFinishedGood};
use stillhouse_spirits::{
    Batch, BatchRecipe, BlendRequest, BulkSpirit, SpiritQuantity, SpiritReceipt, blend_batch,
};

fn bench_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

/// A finished good with `materials` packaging rows, each backed by a ledger item.
fn production_fixture(
    materials: usize,
) -> (FinishedGood, Vec<ProductionRecipe>, Vec<InventoryLedgerItem>) {
    let cfg = EngineConfig::default();
    let good = FinishedGood::create(NewFinishedGood::named("Bench Cocktail").with_abv(12.0), &cfg)
        .unwrap();
    let items: Vec<InventoryLedgerItem> = (0..materials)
        .map(|i| {
            InventoryLedgerItem::create(
                NewLedgerItem::named(format!("Material {i}")).started(1_000_000),
            )
            .unwrap()
        })
        .collect();
    let recipes = items
        .iter()
        .map(|item| {
            ProductionRecipe::new(
                good.id_typed(),
                item.id_typed(),
                PackagingType::Shipping,
                24.0,
            )
            .with_wastage(0.02)
        })
        .collect();
    (good, recipes, items)
}

fn bench_production_depletion(c: &mut Criterion) {
    let mut group = c.benchmark_group("production_depletion");
    let cfg = EngineConfig::default();

    for materials in [1usize, 8, 64].iter() {
        let (good, recipes, items) = production_fixture(*materials);
        let request = ProductionRequest::new(bench_date(), PackagingType::Shipping, 50);
        group.throughput(Throughput::Elements(*materials as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(materials),
            materials,
            |b, _| {
                b.iter(|| {
                    black_box(
                        deplete_for_production(&good, &request, &recipes, &items, &cfg).unwrap(),
                    )
                })
            },
        );
    }

    group.finish();
}

fn bench_batch_blending(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_blending");
    let cfg = EngineConfig::default();

    for ingredients in [2usize, 10].iter() {
        let batch = Batch::create(BatchId::new(), "Bench Batch", 20.0).unwrap();
        let share = 100.0 / *ingredients as f64;
        let spirits: Vec<BulkSpirit> = (0..*ingredients)
            .map(|i| {
                let receipt =
                    SpiritReceipt::new(bench_date(), SpiritQuantity::Weight(10_000.0), 40.0);
                BulkSpirit::receive_new(BulkSpiritId::new(), format!("Spirit {i}"), &receipt)
                    .unwrap()
                    .0
            })
            .collect();
        let recipe: Vec<BatchRecipe> = spirits
            .iter()
            .map(|s| BatchRecipe::spirit(batch.id_typed(), s.id_typed(), s.name(), share))
            .collect();
        let request = BlendRequest::new(500.0, bench_date());

        group.bench_with_input(
            BenchmarkId::from_parameter(ingredients),
            ingredients,
            |b, _| {
                b.iter(|| black_box(blend_batch(&batch, &recipe, &spirits, &request, &cfg).unwrap()))
            },
        );
    }

    group.finish();
}

fn bench_engine_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_round_trip");

    group.bench_function("receive_spirit", |b| {
        let engine = Distillery::init(EngineConfig::default());
        let receipt = SpiritReceipt::new(bench_date(), SpiritQuantity::Weight(250.0), 40.0);
        b.iter(|| {
            black_box(
                engine
                    .receive_spirit(ReceiptTarget::NewSpirit("Vodka".to_string()), &receipt)
                    .unwrap(),
            )
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_production_depletion,
    bench_batch_blending,
    bench_engine_round_trip
);
criterion_main!(benches);
