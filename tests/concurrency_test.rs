//! Concurrency tests: deadlock freedom under reciprocal transfers, value
//! conservation under contention, and single-winner semantics for racing
//! creates.
//!
//! A deadlock shows up here as a hung test run; all spawned threads must
//! join for any of these tests to pass.

use rand::Rng;
use std::str::FromStr;
use std::sync::Arc;
use std::thread;
use uuid::Uuid;
use wallet_ledger::{
    Amount, CurrencyCatalog, ErrorKind, HoldingEntry, NewWallet, WalletStore,
};

/// Builds a store with `wallet_count` wallets, each holding `initial` of a
/// single coin. Returns the store, wallet ids, and the coin id.
fn seeded_store(wallet_count: usize, initial: &str) -> (Arc<WalletStore>, Vec<String>, String) {
    let mut catalog = CurrencyCatalog::new();
    let coin = Uuid::new_v4();
    catalog.register(coin, "Testcoin", Amount::from_str("1.0").unwrap());
    let store = Arc::new(WalletStore::new(Arc::new(catalog)));

    let mut wallets = Vec::with_capacity(wallet_count);
    for i in 0..wallet_count {
        let id = Uuid::new_v4().to_string();
        store
            .create(&NewWallet {
                id: id.clone(),
                owner_id: Uuid::new_v4().to_string(),
                owner_name: format!("owner-{i}"),
                cash_balance: "0.0".to_string(),
                holdings: vec![HoldingEntry::new(coin.to_string(), initial)],
            })
            .unwrap();
        wallets.push(id);
    }

    (store, wallets, coin.to_string())
}

fn total_held(store: &WalletStore, wallets: &[String], coin: &str) -> Amount {
    let coin = Uuid::parse_str(coin).unwrap();
    wallets
        .iter()
        .map(|id| store.get(id).unwrap().quantity_of(coin))
        .fold(Amount::ZERO, |acc, q| acc + q)
}

#[test]
fn test_random_transfers_complete_and_conserve_value() {
    const WALLETS: usize = 10;
    const THREADS: usize = 8;
    const TRANSFERS_PER_THREAD: usize = 125;

    let (store, wallets, coin) = seeded_store(WALLETS, "1000.0");
    let expected_total = total_held(&store, &wallets, &coin);

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let store = Arc::clone(&store);
            let wallets = wallets.clone();
            let coin = coin.clone();
            thread::spawn(move || {
                let mut rng = rand::thread_rng();
                for _ in 0..TRANSFERS_PER_THREAD {
                    let from = rng.gen_range(0..WALLETS);
                    let mut to = rng.gen_range(0..WALLETS);
                    while to == from {
                        to = rng.gen_range(0..WALLETS);
                    }
                    match store.transfer(&wallets[from], &wallets[to], &coin, "1.0") {
                        Ok(_) => {}
                        // A drained wallet is a legitimate outcome under
                        // contention; anything else is a bug.
                        Err(e) => assert_eq!(e.kind(), ErrorKind::FailedPrecondition),
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(total_held(&store, &wallets, &coin), expected_total);
}

#[test]
fn test_reciprocal_transfers_between_one_pair_do_not_deadlock() {
    const ROUNDS: usize = 500;

    let (store, wallets, coin) = seeded_store(2, "10000.0");
    let expected_total = total_held(&store, &wallets, &coin);

    // Two threads hammer the same pair in opposite directions. With
    // source-then-destination locking this interleaving deadlocks almost
    // immediately; with ordered locking it must always finish.
    let forward = {
        let store = Arc::clone(&store);
        let (a, b) = (wallets[0].clone(), wallets[1].clone());
        let coin = coin.clone();
        thread::spawn(move || {
            for _ in 0..ROUNDS {
                match store.transfer(&a, &b, &coin, "0.5") {
                    Ok(_) => {}
                    Err(e) => assert_eq!(e.kind(), ErrorKind::FailedPrecondition),
                }
            }
        })
    };
    let backward = {
        let store = Arc::clone(&store);
        let (a, b) = (wallets[0].clone(), wallets[1].clone());
        let coin = coin.clone();
        thread::spawn(move || {
            for _ in 0..ROUNDS {
                match store.transfer(&b, &a, &coin, "0.5") {
                    Ok(_) => {}
                    Err(e) => assert_eq!(e.kind(), ErrorKind::FailedPrecondition),
                }
            }
        })
    };

    forward.join().unwrap();
    backward.join().unwrap();

    assert_eq!(total_held(&store, &wallets, &coin), expected_total);
}

#[test]
fn test_racing_creates_have_a_single_winner() {
    const THREADS: usize = 8;

    let (store, _, _) = seeded_store(0, "0");
    let contested_id = Uuid::new_v4().to_string();

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let store = Arc::clone(&store);
            let id = contested_id.clone();
            thread::spawn(move || {
                store
                    .create(&NewWallet {
                        id,
                        owner_id: Uuid::new_v4().to_string(),
                        owner_name: format!("racer-{i}"),
                        cash_balance: "0.0".to_string(),
                        holdings: vec![],
                    })
                    .map(|_| ())
                    .map_err(|e| e.kind())
            })
        })
        .collect();

    let mut wins = 0;
    for handle in handles {
        match handle.join().unwrap() {
            Ok(()) => wins += 1,
            Err(kind) => assert_eq!(kind, ErrorKind::AlreadyExists),
        }
    }

    assert_eq!(wins, 1);
    assert_eq!(store.wallet_count(), 1);
}

#[test]
fn test_concurrent_additions_to_one_wallet_serialize() {
    const THREADS: usize = 8;
    const ADDS_PER_THREAD: usize = 50;

    let (store, wallets, coin) = seeded_store(1, "0.5");
    let wallet = wallets[0].clone();

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let store = Arc::clone(&store);
            let wallet = wallet.clone();
            let coin = coin.clone();
            thread::spawn(move || {
                for _ in 0..ADDS_PER_THREAD {
                    let update = store
                        .update_holdings(&wallet, &[HoldingEntry::new(coin.clone(), "1.0")], &[])
                        .unwrap();
                    assert_eq!(update.skipped, 0);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let final_quantity = store
        .get(&wallet)
        .unwrap()
        .quantity_of(Uuid::parse_str(&coin).unwrap());
    let expected = Amount::from_str(&format!("{}.5", THREADS * ADDS_PER_THREAD)).unwrap();
    assert_eq!(final_quantity, expected);
}
