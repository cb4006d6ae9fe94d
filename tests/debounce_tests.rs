//! Debounced values and change-driven effects on a paused clock

use helmdeck::debounce::Debouncer;
use helmdeck::effects::RunOnChange;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, sleep};

const DELAY: Duration = Duration::from_millis(300);

#[tokio::test(start_paused = true)]
async fn test_initial_value_is_visible_immediately() {
    let debouncer = Debouncer::new("start".to_string(), DELAY);
    assert_eq!(debouncer.current(), "start");
    assert!(!debouncer.is_pending());
}

#[tokio::test(start_paused = true)]
async fn test_only_last_value_of_a_burst_settles() {
    let start = Instant::now();
    let mut debouncer = Debouncer::new("", DELAY);

    debouncer.push("v1");
    sleep(Duration::from_millis(100)).await;
    assert!(!debouncer.poll());
    debouncer.push("v2");

    // v1's window has passed, but v2 restarted the delay
    sleep(Duration::from_millis(250)).await;
    assert!(!debouncer.poll());
    assert_eq!(*debouncer.current(), "");

    assert_eq!(*debouncer.settled().await, "v2");
    assert!(start.elapsed() >= Duration::from_millis(400));
    assert!(!debouncer.is_pending());
}

#[tokio::test(start_paused = true)]
async fn test_dropping_debouncer_stops_its_timer() {
    let value = Arc::new(());
    let mut debouncer = Debouncer::new(Arc::new(()), DELAY);
    debouncer.push(value.clone());
    assert_eq!(Arc::strong_count(&value), 2);

    drop(debouncer);
    // well before the deadline, the aborted timer has released the pushed value
    sleep(Duration::from_millis(1)).await;
    assert_eq!(Arc::strong_count(&value), 1);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_then_push_settles_new_value() {
    let mut debouncer = Debouncer::new(0u32, DELAY);
    debouncer.push(1);
    debouncer.cancel();
    assert!(!debouncer.is_pending());

    debouncer.push(2);
    sleep(DELAY + Duration::from_millis(1)).await;
    assert!(debouncer.poll());
    assert_eq!(*debouncer.current(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_unchanged_dependencies_do_not_rerun() {
    let mut effect: RunOnChange<String, String> = RunOnChange::new("search");

    assert!(effect.update(&"nginx".to_string(), |q| {
        let q = q.clone();
        async move { q }
    }));
    assert!(!effect.update(&"nginx".to_string(), |q| {
        let q = q.clone();
        async move { q }
    }));
    assert_eq!(effect.generation(), 1);

    sleep(Duration::from_millis(1)).await;
    assert_eq!(effect.poll().unwrap().unwrap(), "nginx");
}

#[tokio::test(start_paused = true)]
async fn test_slow_superseded_result_is_discarded() {
    let mut effect: RunOnChange<u64, u64> = RunOnChange::new("search");

    effect.update(&500, |&ms| async move {
        sleep(Duration::from_millis(ms)).await;
        ms
    });
    effect.update(&100, |&ms| async move {
        sleep(Duration::from_millis(ms)).await;
        ms
    });
    assert_eq!(effect.in_flight(), 2);

    sleep(Duration::from_millis(150)).await;
    assert_eq!(effect.poll().unwrap().unwrap(), 100);
    assert!(!effect.is_running());

    sleep(Duration::from_millis(400)).await;
    assert!(effect.poll().is_none());
    assert_eq!(effect.in_flight(), 0);
}
