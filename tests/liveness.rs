//! Starvation behavior: a worker that never arrives must block everyone.
//!
//! There is deliberately no timeout in the barrier, so these tests assert
//! the *absence* of progress within a bounded wait. They leak the blocked
//! threads; the test process exits and takes them along.

use crossbeam_channel::{bounded, RecvTimeoutError};
use sensorgrid_rs::TickBarrier;
use serial_test::serial;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
#[serial]
fn missing_worker_blocks_the_rest() {
    let barrier = Arc::new(TickBarrier::new(3));
    let (done_tx, done_rx) = bounded(2);

    // Workers 0 and 1 arrive; worker 2 never does.
    for worker_id in 0..2 {
        let barrier = barrier.clone();
        let done_tx = done_tx.clone();
        thread::spawn(move || {
            barrier.arrive(worker_id);
            let _ = done_tx.send(worker_id);
        });
    }

    // No spurious release: neither worker may get past the barrier.
    assert_eq!(
        done_rx.recv_timeout(Duration::from_millis(500)),
        Err(RecvTimeoutError::Timeout)
    );
    assert_eq!(barrier.generation(), 0);
}

#[test]
#[serial]
fn late_arrival_releases_everyone() {
    let barrier = Arc::new(TickBarrier::new(3));
    let (done_tx, done_rx) = bounded(3);

    for worker_id in 0..2 {
        let barrier = barrier.clone();
        let done_tx = done_tx.clone();
        thread::spawn(move || {
            barrier.arrive(worker_id);
            let _ = done_tx.send(worker_id);
        });
    }

    // Hold the last worker back long enough that the others are parked.
    thread::sleep(Duration::from_millis(200));
    assert_eq!(barrier.generation(), 0);

    barrier.arrive(2);

    let mut released = vec![2];
    for _ in 0..2 {
        released.push(done_rx.recv_timeout(Duration::from_secs(5)).unwrap());
    }
    released.sort_unstable();
    assert_eq!(released, vec![0, 1, 2]);
    assert_eq!(barrier.generation(), 1);
}
