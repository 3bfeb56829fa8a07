use super::*;
use futures::executor::block_on;
use std::cell::{Cell, RefCell};

fn no_sleep(slept: &RefCell<Vec<Duration>>) -> impl FnMut(Duration) -> std::future::Ready<()> + '_ {
    move |d| {
        slept.borrow_mut().push(d);
        std::future::ready(())
    }
}

// =============================================================
// backoff_for
// =============================================================

#[test]
fn backoff_doubles_from_initial() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.backoff_for(1), Duration::from_millis(250));
    assert_eq!(policy.backoff_for(2), Duration::from_millis(500));
    assert_eq!(policy.backoff_for(3), Duration::from_millis(1_000));
}

#[test]
fn backoff_is_capped() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.backoff_for(10), Duration::from_millis(4_000));
    assert_eq!(policy.backoff_for(u32::MAX), Duration::from_millis(4_000));
}

// =============================================================
// with_retry
// =============================================================

#[test]
fn succeeds_first_try_without_sleeping() {
    let slept = RefCell::new(Vec::new());
    let calls = Cell::new(0);
    let result = block_on(with_retry(
        RetryPolicy::default(),
        || {
            calls.set(calls.get() + 1);
            std::future::ready(Ok::<_, FetchError>(7))
        },
        no_sleep(&slept),
    ));
    assert_eq!(result, Ok(7));
    assert_eq!(calls.get(), 1);
    assert!(slept.borrow().is_empty());
}

#[test]
fn retries_transient_failures_then_succeeds() {
    let slept = RefCell::new(Vec::new());
    let calls = Cell::new(0);
    let result = block_on(with_retry(
        RetryPolicy::default(),
        || {
            calls.set(calls.get() + 1);
            let out = if calls.get() < 3 {
                Err(FetchError::Network("reset".to_owned()))
            } else {
                Ok("ok")
            };
            std::future::ready(out)
        },
        no_sleep(&slept),
    ));
    assert_eq!(result, Ok("ok"));
    assert_eq!(calls.get(), 3);
    assert_eq!(*slept.borrow(), vec![Duration::from_millis(250), Duration::from_millis(500)]);
}

#[test]
fn gives_up_after_max_attempts() {
    let slept = RefCell::new(Vec::new());
    let calls = Cell::new(0);
    let result: Result<(), _> = block_on(with_retry(
        RetryPolicy::default(),
        || {
            calls.set(calls.get() + 1);
            std::future::ready(Err(FetchError::from_status(502, "bad gateway")))
        },
        no_sleep(&slept),
    ));
    assert_eq!(result, Err(FetchError::from_status(502, "bad gateway")));
    assert_eq!(calls.get(), 3);
    assert_eq!(slept.borrow().len(), 2);
}

#[test]
fn client_errors_fail_fast() {
    let slept = RefCell::new(Vec::new());
    let calls = Cell::new(0);
    let result: Result<(), _> = block_on(with_retry(
        RetryPolicy::default(),
        || {
            calls.set(calls.get() + 1);
            std::future::ready(Err(FetchError::from_status(400, "name required")))
        },
        no_sleep(&slept),
    ));
    assert!(result.is_err());
    assert_eq!(calls.get(), 1);
    assert!(slept.borrow().is_empty());
}

#[test]
fn zero_attempts_still_tries_once() {
    let slept = RefCell::new(Vec::new());
    let calls = Cell::new(0);
    let policy = RetryPolicy { max_attempts: 0, ..RetryPolicy::default() };
    let _ = block_on(with_retry(
        policy,
        || {
            calls.set(calls.get() + 1);
            std::future::ready(Err::<(), _>(FetchError::Network("down".to_owned())))
        },
        no_sleep(&slept),
    ));
    assert_eq!(calls.get(), 1);
}
