//! Concurrency tests for the shared ledger.
//!
//! Many tasks hit one `Ledger` at once; afterwards no seat may be sold twice,
//! ticket numbers must be dense and unique, and every seat must still be
//! accounted for.
//!
//! Run with: `cargo test -p train-ticket-core --test concurrency_test`

#![allow(clippy::expect_used, clippy::unwrap_used)] // Test code can use unwrap/expect

use std::collections::HashSet;
use train_ticket_core::{SeatMap, TicketNumber};
use train_ticket_testing::{assertions, fixtures};

/// 100 concurrent purchases for 20 seats: exactly 20 win.
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_purchases_never_double_book() {
    let ledger = fixtures::standard_ledger();

    let handles: Vec<_> = (0..100)
        .map(|i| {
            let ledger = ledger.clone();
            tokio::spawn(async move {
                ledger
                    .purchase("London", "France", fixtures::passenger(&format!("User{i}")))
                    .await
            })
        })
        .collect();

    let mut sold = Vec::new();
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(receipt) => sold.push(receipt),
            Err(_) => rejected += 1,
        }
    }

    assert_eq!(sold.len(), 20);
    assert_eq!(rejected, 80);

    let seats: HashSet<_> = sold.iter().map(|r| r.seat_number.clone()).collect();
    assert_eq!(seats.len(), 20, "a seat was sold twice");

    let mut numbers: Vec<i32> = sold.iter().map(|r| r.ticket_number.get()).collect();
    numbers.sort_unstable();
    assert_eq!(numbers, (1..=20).collect::<Vec<_>>());

    let snapshot = ledger.snapshot().await;
    assertions::assert_seat_universe(&snapshot, &SeatMap::standard());
    assert_eq!(snapshot.next_ticket_number, TicketNumber::new(21));
}

/// Purchases, removals and seat changes interleaved across tasks.
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_mixed_operations_preserve_seat_universe() {
    let ledger = fixtures::standard_ledger();
    fixtures::purchase_many(&ledger, 12).await;

    let mut handles = Vec::new();
    for i in 1..=12 {
        let ledger = ledger.clone();
        handles.push(tokio::spawn(async move {
            let ticket = TicketNumber::new(i);
            if i % 3 == 0 {
                ledger.remove(ticket).await;
            } else {
                let section = if i % 2 == 0 { "A" } else { "B" };
                let _ = ledger.modify_seat(ticket, section).await;
            }
            let _ = ledger
                .purchase("Paris", "Berlin", fixtures::passenger(&format!("Late{i}")))
                .await;
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    let snapshot = ledger.snapshot().await;
    assertions::assert_seat_universe(&snapshot, &SeatMap::standard());
    assertions::assert_seats_in_home_sections(&snapshot, &SeatMap::standard());
    assertions::assert_ticket_numbers_issued(&snapshot);
}

/// Readers run alongside writers and always see a consistent ledger.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_snapshots_are_consistent_under_load() {
    let ledger = fixtures::standard_ledger();

    let writer = {
        let ledger = ledger.clone();
        tokio::spawn(async move {
            for round in 0..50 {
                if let Ok(receipt) = ledger
                    .purchase("London", "France", fixtures::passenger(&format!("W{round}")))
                    .await
                {
                    if round % 2 == 0 {
                        ledger.remove(receipt.ticket_number).await;
                    }
                }
            }
        })
    };

    let reader = {
        let ledger = ledger.clone();
        tokio::spawn(async move {
            for _ in 0..50 {
                let snapshot = ledger.snapshot().await;
                assertions::assert_seat_universe(&snapshot, &SeatMap::standard());
                tokio::task::yield_now().await;
            }
        })
    };

    writer.await.unwrap();
    reader.await.unwrap();
}
