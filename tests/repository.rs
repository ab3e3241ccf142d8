use std::sync::{Arc, Mutex};

use diesel::prelude::*;
use pushkind_vineflow::domain::batch::{RawBatchInput, derive_batch};
use pushkind_vineflow::domain::types::{BatchId, BatchStatus, UNTITLED_BATCH_NAME, WineCategory};
use pushkind_vineflow::feed::BatchFeed;
use pushkind_vineflow::repository::{BatchReader, BatchWriter, DieselRepository, RepositoryError};
use pushkind_vineflow::schema::batches;

mod common;

fn raw_input(name: &str, weight: f64, category: WineCategory, brix: f64) -> RawBatchInput {
    RawBatchInput {
        name: name.to_string(),
        raw_weight_kg: weight,
        category,
        starting_brix: brix,
    }
}

#[test]
fn creates_and_reads_back_derived_batch() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let new_batch = derive_batch(raw_input("", 100.0, WineCategory::Red, 22.0));
    let id = repo.create_batch(&new_batch).expect("should create batch");

    let stored = repo
        .get_batch_by_id(id)
        .expect("should query batch")
        .expect("batch should exist");
    assert_eq!(stored.id, id);
    assert_eq!(stored.name, UNTITLED_BATCH_NAME);
    assert_eq!(stored.category, WineCategory::Red);
    assert_eq!(stored.status, BatchStatus::Maceration);
    assert_eq!(stored.raw_weight_kg, 100.0);
    assert_eq!(stored.current_volume_liters, new_batch.current_volume_liters);
    assert_eq!(stored.target_abv, new_batch.target_abv);
}

#[test]
fn create_always_stores_maceration() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let mut new_batch = derive_batch(raw_input("Late", 10.0, WineCategory::White, 20.0));
    new_batch.status = BatchStatus::Bottled;
    let id = repo.create_batch(&new_batch).expect("should create batch");

    let stored = repo.get_batch_by_id(id).unwrap().unwrap();
    assert_eq!(stored.status, BatchStatus::Maceration);
}

#[test]
fn lists_batches_newest_first() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    for name in ["First", "Second", "Third"] {
        repo.create_batch(&derive_batch(raw_input(name, 5.0, WineCategory::Fruit, 18.0)))
            .expect("should create batch");
    }

    let names = repo
        .list_batches()
        .expect("should list batches")
        .into_iter()
        .map(|b| b.name.into_inner())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Third", "Second", "First"]);
}

#[test]
fn updates_only_the_status() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let id = repo
        .create_batch(&derive_batch(raw_input("Pinot", 40.0, WineCategory::Red, 23.0)))
        .unwrap();
    let before = repo.get_batch_by_id(id).unwrap().unwrap();

    let affected = repo
        .update_batch_status(id, BatchStatus::SecondaryFermentation)
        .expect("should update status");
    assert_eq!(affected, 1);

    let after = repo.get_batch_by_id(id).unwrap().unwrap();
    assert_eq!(after.status, BatchStatus::SecondaryFermentation);
    assert_eq!(after.created_at, before.created_at);
    assert_eq!(after.name, before.name);
    assert_eq!(after.target_abv, before.target_abv);
}

#[test]
fn updating_unknown_batch_affects_nothing() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let affected = repo
        .update_batch_status(BatchId::new(404).unwrap(), BatchStatus::Aging)
        .expect("update should not fail");
    assert_eq!(affected, 0);
    assert!(repo.get_batch_by_id(BatchId::new(404).unwrap()).unwrap().is_none());
}

#[test]
fn corrupt_rows_surface_as_validation_errors() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let mut conn = test_db
        .pool()
        .get()
        .expect("should acquire DB connection for setup");
    diesel::insert_into(batches::table)
        .values((
            batches::name.eq("Mystery"),
            batches::category.eq("ROSE"),
            batches::status.eq("MACERATION"),
            batches::raw_weight_kg.eq(1.0),
            batches::current_volume_liters.eq(0.7),
            batches::target_abv.eq(10.0),
            batches::created_at.eq(chrono::Utc::now().naive_utc()),
        ))
        .execute(&mut conn)
        .expect("should insert raw row");

    let err = repo.list_batches().unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError(_)));
}

#[test]
fn feed_pushes_stored_snapshots() {
    let test_db = common::TestDb::new();
    let feed = BatchFeed::new(DieselRepository::new(test_db.pool()));

    let snapshots = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&snapshots);
    let subscription = feed
        .subscribe(move |batches| {
            sink.lock()
                .unwrap()
                .push(batches.iter().map(|b| b.status).collect::<Vec<_>>());
        })
        .expect("should subscribe");

    let id = feed
        .create_batch(&derive_batch(raw_input("Feed", 12.0, WineCategory::White, 21.0)))
        .unwrap();
    feed.update_batch_status(id, BatchStatus::ActiveFermentation)
        .unwrap();
    subscription.unsubscribe();
    feed.update_batch_status(id, BatchStatus::Aging).unwrap();

    let snapshots = snapshots.lock().unwrap();
    assert_eq!(
        *snapshots,
        vec![
            vec![],
            vec![BatchStatus::Maceration],
            vec![BatchStatus::ActiveFermentation],
        ]
    );
}
