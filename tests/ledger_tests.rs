//! Ledger Tests: classification scenarios against the SQLite store
//!
//! 1. Reference grids classify as expected
//! 2. Repeat classification is a pure read
//! 3. Stats follow the ratio law
//! 4. Concurrent callers agree on one record

#![cfg(feature = "native")]

use mutantscan::{DnaRepository, Grid, Ledger, SqliteStore, Stats};
use std::sync::Arc;
use tempfile::TempDir;

fn sqlite_ledger() -> (TempDir, Arc<SqliteStore>, Ledger) {
    let dir = TempDir::new().expect("tempdir");
    let store = Arc::new(SqliteStore::open(&dir.path().join("mutants.sqlite")).expect("store"));
    let ledger = Ledger::new(store.clone());
    (dir, store, ledger)
}

fn grid(rows: &[&str]) -> Grid {
    Grid::new(rows).expect("grid")
}

/// Test 1: reference grids
#[test]
fn reference_grids() {
    let (_dir, _store, ledger) = sqlite_ledger();

    assert!(ledger.classify(&grid(&["AAAA", "CAGT", "TTTT", "AGAG"])).unwrap());
    assert!(ledger.classify(&grid(&["ATGC", "ATGC", "ATGC", "ATGC"])).unwrap());
    assert!(ledger.classify(&grid(&["ATGCGA", "CAGTGC", "TTATGT", "AGAAGG", "CCCCTA", "TCACTG"])).unwrap());
    assert!(!ledger.classify(&grid(&["ACGCGA", "CTGTGC", "TTATGT", "AGAAGG", "CCTATA", "TCACTG"])).unwrap());
}

/// Test 2: second classify reads the stored record instead of inserting
#[test]
fn repeat_classify_is_idempotent() {
    let (_dir, store, ledger) = sqlite_ledger();
    let g = grid(&["AAAA", "CAGT", "TTTT", "AGAG"]);

    assert!(ledger.classify(&g).unwrap());
    let first = store.find_by_key("AAAACAGTTTTTAGAG").unwrap().expect("record");

    assert!(ledger.classify(&g).unwrap());
    let second = store.find_by_key("AAAACAGTTTTTAGAG").unwrap().expect("record");

    assert_eq!(first.id, second.id);
    assert_eq!(store.count_by_verdict(true).unwrap(), 1);
    assert_eq!(store.count_by_verdict(false).unwrap(), 0);
}

/// Test 3: empty, mixed, mutants only, humans only
#[test]
fn stats_ratio() {
    let (_dir, _store, ledger) = sqlite_ledger();
    assert_eq!(ledger.stats().unwrap(), Stats { count_mutant_dna: 0, count_human_dna: 0, ratio: 0.0 });

    ledger.classify(&grid(&["AAAA", "CCCC", "AGTT", "TGGG"])).unwrap();
    ledger.classify(&grid(&["TTTT", "GCCC", "AGTC", "AAAA"])).unwrap();
    let mutants_only = ledger.stats().unwrap();
    assert_eq!((mutants_only.count_mutant_dna, mutants_only.count_human_dna), (2, 0));
    assert_eq!(mutants_only.ratio, 1.0);

    ledger.classify(&grid(&["ATCG", "CAGT", "TTAC", "GCGA"])).unwrap();
    ledger.classify(&grid(&["ACGT", "CGTA", "GTAC", "TACG"])).unwrap();
    assert_eq!(ledger.stats().unwrap(), Stats { count_mutant_dna: 2, count_human_dna: 2, ratio: 0.5 });
}

/// Test 4: racing threads on one new grid leave exactly one record
#[test]
fn concurrent_classify_single_record() {
    let (_dir, store, ledger) = sqlite_ledger();
    let g = grid(&["ATGCGA", "CAGTGC", "TTATGT", "AGAAGG", "CCCCTA", "TCACTG"]);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let ledger = ledger.clone();
            let g = g.clone();
            std::thread::spawn(move || ledger.classify(&g))
        })
        .collect();

    for h in handles {
        assert!(h.join().expect("thread").expect("classify"));
    }
    assert_eq!(store.count_by_verdict(true).unwrap(), 1);
}
