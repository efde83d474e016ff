//! # Bus Property Tests
//!
//! Admission, FIFO, idempotent subscribe, bulk teardown, budget stall and
//! shutdown, exercised through the public bus API.
//!
//! Run with: cargo test -p herald --test bus_properties

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use herald::core::{Callback, DispatchBudget, Event, EventBus, OwnerGuard, OwnerId};
use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Damage(u32);
impl Event for Damage {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Heal(u32);
impl Event for Heal {}

#[derive(Debug)]
struct Unheard;
impl Event for Unheard {}

type Trace = Arc<Mutex<Vec<String>>>;

fn on_damage(trace: &Trace, tag: &'static str) -> Callback<Damage> {
    let trace = Arc::clone(trace);
    Callback::new(move |e: &Damage| trace.lock().push(format!("{tag}:damage:{}", e.0)))
}

fn on_heal(trace: &Trace, tag: &'static str) -> Callback<Heal> {
    let trace = Arc::clone(trace);
    Callback::new(move |e: &Heal| trace.lock().push(format!("{tag}:heal:{}", e.0)))
}

// ============================================================================
// ADMISSION
// ============================================================================

#[test]
fn admission_rejects_kinds_without_subscribers() {
    let bus = EventBus::default();
    let trace = Trace::default();
    bus.subscribe(&on_damage(&trace, "a"), OwnerId::next());

    let before = bus.pending_count();
    assert!(!bus.publish(Unheard));
    assert!(!bus.publish(Heal(1)));
    assert_eq!(bus.pending_count(), before);

    assert!(bus.publish(Damage(1)));
    assert_eq!(bus.pending_count(), before + 1);
}

// ============================================================================
// ORDERING
// ============================================================================

#[test]
fn fifo_across_kinds() {
    let bus = EventBus::default();
    let trace = Trace::default();
    let owner = OwnerId::next();
    bus.subscribe(&on_damage(&trace, "a"), owner);
    bus.subscribe(&on_damage(&trace, "b"), owner);
    bus.subscribe(&on_heal(&trace, "a"), owner);

    assert!(bus.publish(Damage(1)));
    assert!(bus.publish(Heal(2)));
    assert!(bus.publish(Damage(3)));
    let report = bus.dispatch();

    assert_eq!(report.dispatched, 3);
    assert_eq!(
        *trace.lock(),
        vec![
            "a:damage:1",
            "b:damage:1",
            "a:heal:2",
            "a:damage:3",
            "b:damage:3",
        ]
    );
}

#[test]
fn idempotent_subscribe_invokes_once() {
    let bus = EventBus::default();
    let trace = Trace::default();
    let owner = OwnerId::next();
    let cb = on_damage(&trace, "a");

    bus.subscribe(&cb, owner);
    bus.subscribe(&cb.clone(), owner);

    assert!(bus.publish(Damage(5)));
    assert!(bus.publish(Damage(6)));
    let _ = bus.dispatch();

    assert_eq!(*trace.lock(), vec!["a:damage:5", "a:damage:6"]);
}

// ============================================================================
// TEARDOWN
// ============================================================================

#[test]
fn remove_all_sole_subscriber_closes_admission() {
    let bus = EventBus::default();
    let trace = Trace::default();
    let owner = OwnerId::next();
    bus.subscribe(&on_damage(&trace, "a"), owner);
    bus.subscribe(&on_heal(&trace, "a"), owner);

    assert_eq!(bus.remove_all(owner), 2);
    assert!(!bus.publish(Damage(1)));
    assert!(!bus.publish(Heal(1)));
}

#[test]
fn remove_all_shared_kind_skips_owner() {
    let bus = EventBus::default();
    let trace = Trace::default();
    let (gone, kept) = (OwnerId::next(), OwnerId::next());
    bus.subscribe(&on_damage(&trace, "gone"), gone);
    bus.subscribe(&on_damage(&trace, "kept"), kept);

    let _ = bus.remove_all(gone);
    assert!(bus.publish(Damage(4)));
    let _ = bus.dispatch();

    assert_eq!(*trace.lock(), vec!["kept:damage:4"]);
}

#[test]
fn owner_guard_drop_scrubs_queued_delivery() {
    let bus = Arc::new(EventBus::default());
    let trace = Trace::default();

    let guard = OwnerGuard::new(Arc::clone(&bus));
    guard.subscribe(&on_damage(&trace, "guarded"));
    assert!(bus.publish(Damage(1)));

    drop(guard);
    let report = bus.dispatch();

    assert_eq!(report.stale, 1);
    assert!(trace.lock().is_empty());
}

#[test]
fn shutdown_rejects_everything() {
    let bus = EventBus::default();
    let trace = Trace::default();
    bus.subscribe(&on_damage(&trace, "a"), OwnerId::next());
    bus.subscribe(&on_heal(&trace, "a"), OwnerId::next());
    assert!(bus.publish(Damage(1)));
    assert!(bus.publish(Heal(1)));

    bus.shutdown();

    assert_eq!(bus.pending_count(), 0);
    assert!(!bus.publish(Damage(2)));
    assert!(!bus.publish(Heal(2)));
    assert!(!bus.publish(Unheard));
    assert_eq!(bus.dispatch().processed(), 0);
    assert!(trace.lock().is_empty());
}

// ============================================================================
// BUDGET
// ============================================================================

#[test]
fn budget_stall_resumes_without_duplicates() {
    let bus = EventBus::new(DispatchBudget::Bounded(Duration::from_millis(4)));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_in_cb = Arc::clone(&seen);
    bus.subscribe(
        &Callback::new(move |e: &Damage| {
            thread::sleep(Duration::from_millis(3));
            seen_in_cb.lock().push(e.0);
        }),
        OwnerId::next(),
    );

    let n = 6;
    for i in 0..n {
        assert!(bus.publish(Damage(i)));
    }

    let first = bus.dispatch();
    assert!(first.stalled);
    assert!(first.remaining >= 1);
    assert_eq!(first.processed() as usize + first.remaining, n as usize);

    let mut ticks = 1;
    while bus.pending_count() > 0 {
        let report = bus.dispatch();
        assert!(report.processed() >= 1);
        ticks += 1;
    }

    assert!(ticks >= 2);
    assert_eq!(*seen.lock(), (0..n).collect::<Vec<_>>());
    assert_eq!(bus.stats().dispatched, u64::from(n));
}

#[test]
fn unlimited_budget_drains_in_one_tick() {
    let bus = EventBus::default();
    bus.subscribe(
        &Callback::new(|_: &Damage| thread::sleep(Duration::from_millis(1))),
        OwnerId::next(),
    );
    for i in 0..10 {
        assert!(bus.publish(Damage(i)));
    }

    let report = bus.dispatch();
    assert_eq!(report.dispatched, 10);
    assert!(!report.stalled);
    assert_eq!(bus.pending_count(), 0);
}
