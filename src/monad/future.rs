//! A single-assignment cell that eventually holds one [`Result`].
//!
//! A `Future` is built from a setup routine that receives the only
//! [`Completer`] for it. The routine may settle inline, or keep the
//! completer and settle later from whatever substrate it likes (another
//! thread, a Tokio task, an I/O callback). The first settlement wins and
//! later ones are ignored. Subscribers registered while pending run in
//! registration order at settlement; subscribers registered afterwards run
//! inline.
//!
//! The state lock is only held to flip the state or queue a subscriber.
//! Callbacks always run outside of it, so a subscriber may subscribe again
//! to the same future.

use std::fmt;
use std::mem;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::common::error::Error;
use crate::monad::maybe::Maybe;
use crate::monad::result::{Result, ResultE};

type Subscriber<T> = Box<dyn FnOnce(Arc<Result<T>>) + Send>;

enum State<T> {
    Pending(Vec<Subscriber<T>>),
    Settled(Arc<Result<T>>),
}

type Shared<T> = Arc<Mutex<State<T>>>;

fn lock<T>(state: &Shared<T>) -> MutexGuard<'_, State<T>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle to a deferred [`Result`]. Clones observe the same cell.
pub struct Future<T> {
    state: Shared<T>,
}

/// The capability to settle a [`Future`]. Handed out once, by value.
pub struct Completer<T> {
    state: Shared<T>,
}

/// Return shapes accepted by [`Future::fmap`].
///
/// A [`Result`] settles the new future directly; a [`Future`] is adopted,
/// so the outer future settles with the inner one's value instead of
/// nesting.
pub trait Settle<T> {
    fn settle(self, completer: Completer<T>);
}

impl<T: Send + Sync + 'static> Completer<T> {
    /// Settle with `result`. No-op if already settled.
    pub fn complete(&self, result: Result<T>) {
        self.complete_shared(Arc::new(result));
    }

    /// Settle with `Ok(value)`.
    pub fn complete_ok(&self, value: T) {
        self.complete(ResultE::Ok(value));
    }

    pub fn complete_err(&self, error: Error) {
        self.complete(ResultE::Err(error));
    }

    fn complete_shared(&self, value: Arc<Result<T>>) {
        let subscribers = {
            let mut state = lock(&self.state);
            match &mut *state {
                State::Settled(_) => {
                    // first settlement wins
                    tracing::trace!("ignoring completion of an already settled future");
                    return;
                }
                State::Pending(subscribers) => {
                    let subscribers = mem::take(subscribers);
                    *state = State::Settled(Arc::clone(&value));
                    subscribers
                }
            }
        };

        tracing::debug!(
            subscribers = subscribers.len(),
            ok = value.is_ok(),
            "future settled"
        );
        for subscriber in subscribers {
            subscriber(Arc::clone(&value));
        }
    }
}

impl<T: Send + Sync + 'static> Future<T> {
    /// Run `setup` now, handing it the completer for the new future.
    pub fn new(setup: impl FnOnce(Completer<T>)) -> Self {
        let state: Shared<T> = Arc::new(Mutex::new(State::Pending(Vec::new())));
        setup(Completer {
            state: Arc::clone(&state),
        });
        Self { state }
    }

    /// An already settled `Ok(value)`.
    pub fn unit(value: T) -> Self {
        Self::new(|completer| completer.complete_ok(value))
    }

    /// An already settled `Err(error)`.
    pub fn error(error: Error) -> Self {
        Self::new(|completer| completer.complete_err(error))
    }

    /// Adapt a `Result` transformation into a `Future` transformation.
    pub fn lift1<R, F>(f: F) -> impl Fn(&Future<T>) -> Future<R>
    where
        R: Send + Sync + 'static,
        F: Fn(&Result<T>) -> Result<R> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        move |future: &Future<T>| {
            let f = Arc::clone(&f);
            future.fmap(move |value| (*f)(value))
        }
    }

    /// Settle from an async computation running on the current Tokio runtime.
    ///
    /// Outside a runtime the future settles immediately with an error.
    pub fn spawn<F>(task: F) -> Self
    where
        F: std::future::Future<Output = Result<T>> + Send + 'static,
    {
        Self::new(move |completer| match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move { completer.complete(task.await) });
            }
            Err(e) => completer.complete_err(Error::failure_with_source(
                "Future::spawn requires a Tokio runtime",
                e,
            )),
        })
    }

    pub fn is_settled(&self) -> bool {
        matches!(&*lock(&self.state), State::Settled(_))
    }

    /// The settled value, if any, without subscribing.
    pub fn settled_value(&self) -> Maybe<Arc<Result<T>>> {
        match &*lock(&self.state) {
            State::Settled(value) => Maybe::Just(Arc::clone(value)),
            State::Pending(_) => Maybe::Nothing,
        }
    }

    /// Run `subscriber` with the settled value: now if settled, else at
    /// settlement time.
    pub fn ready(&self, subscriber: impl FnOnce(&Result<T>) + Send + 'static) {
        self.subscribe(Box::new(move |value| subscriber(&value)));
    }

    /// A future settled by applying `f` to this one's value.
    ///
    /// `f` may return a [`Result`] or another [`Future`]; a returned future
    /// is flattened.
    pub fn fmap<R, O>(&self, f: impl FnOnce(&Result<T>) -> O + Send + 'static) -> Future<R>
    where
        R: Send + Sync + 'static,
        O: Settle<R>,
    {
        let source = self.clone();
        Future::new(move |completer| {
            source.ready(move |value| f(value).settle(completer));
        })
    }

    /// Like [`fmap`](Self::fmap) for a plain value, which settles as `Ok`.
    pub fn map<R>(&self, f: impl FnOnce(&Result<T>) -> R + Send + 'static) -> Future<R>
    where
        R: Send + Sync + 'static,
    {
        self.fmap(move |value| ResultE::<R, Error>::Ok(f(value)))
    }

    /// Await the settled value.
    ///
    /// Never resolves if the future never settles. Resolves to `Err` if a
    /// subscriber registered before this one panics during settlement.
    pub async fn wait(&self) -> Arc<Result<T>> {
        let (tx, rx) = tokio::sync::oneshot::channel();
        self.subscribe(Box::new(move |value| {
            let _ = tx.send(value);
        }));
        match rx.await {
            Ok(value) => value,
            // an earlier subscriber panicked while settling, dropping the rest
            Err(e) => Arc::new(ResultE::Err(Error::failure_with_source(
                "a subscriber panicked while the future was settling",
                e,
            ))),
        }
    }

    fn subscribe(&self, subscriber: Subscriber<T>) {
        let inline = {
            let mut state = lock(&self.state);
            match &mut *state {
                State::Pending(subscribers) => {
                    subscribers.push(subscriber);
                    None
                }
                State::Settled(value) => Some((subscriber, Arc::clone(value))),
            }
        };

        if let Some((subscriber, value)) = inline {
            subscriber(value);
        }
    }
}

impl<T> Clone for Future<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Future<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*lock(&self.state) {
            State::Pending(subscribers) => f
                .debug_struct("Future")
                .field("state", &"pending")
                .field("subscribers", &subscribers.len())
                .finish(),
            State::Settled(value) => f.debug_struct("Future").field("value", value).finish(),
        }
    }
}

impl<T: Send + Sync + 'static> Settle<T> for Result<T> {
    fn settle(self, completer: Completer<T>) {
        completer.complete(self);
    }
}

impl<T: Send + Sync + 'static> Settle<T> for Future<T> {
    fn settle(self, completer: Completer<T>) {
        self.subscribe(Box::new(move |value| completer.complete_shared(value)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monad::result::{err, ok};
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    fn recorder<T: Send + Sync + Clone + 'static>() -> (Arc<Mutex<Vec<T>>>, impl Fn(T) + Clone) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |value| sink.lock().unwrap().push(value))
    }

    #[test]
    fn test_second_completion_is_ignored() {
        let future = Future::new(|completer| {
            completer.complete(ok(1));
            completer.complete(ok(2));
            completer.complete_err(Error::failure("late"));
        });

        let (seen, record) = recorder();
        future.ready(move |value| record(value.clone()));
        assert_eq!(*seen.lock().unwrap(), vec![ok(1)]);
        assert_eq!(*future.settled_value().unwrap(), ok(1));
    }

    #[test]
    fn test_subscribers_run_in_registration_order() {
        let mut slot = None;
        let future = Future::<&'static str>::new(|completer| slot = Some(completer));
        let completer = slot.expect("setup stores the completer");

        let (seen, record) = recorder();
        for name in ["A", "B", "C"] {
            let record = record.clone();
            future.ready(move |value| record((name, value.clone())));
        }
        assert!(seen.lock().unwrap().is_empty());
        assert!(!future.is_settled());

        completer.complete_ok("done");
        assert_eq!(
            *seen.lock().unwrap(),
            vec![("A", ok("done")), ("B", ok("done")), ("C", ok("done"))]
        );
    }

    #[test]
    fn test_ready_on_settled_future_runs_inline() {
        let (seen, record) = recorder();
        Future::unit(5).ready(move |value| record(value.clone()));
        assert_eq!(*seen.lock().unwrap(), vec![ok(5)]);
    }

    #[test]
    fn test_fmap_flattens_returned_future() {
        let next = Future::unit(1).fmap(|value| match value {
            ResultE::Ok(v) => Future::unit(v + 1),
            ResultE::Err(e) => Future::error(e.clone()),
        });
        assert_eq!(*next.settled_value().unwrap(), ok(2));
    }

    #[test]
    fn test_fmap_with_result_and_map_with_value() {
        let doubled = Future::unit(21).fmap(|value| value.clone().map(|v| v * 2));
        assert_eq!(*doubled.settled_value().unwrap(), ok(42));

        let described = Future::<i32>::error(Error::failure("nope")).map(|value| value.is_err());
        assert_eq!(*described.settled_value().unwrap(), ok(true));
    }

    #[test]
    fn test_fmap_adopts_a_pending_inner_future() {
        let mut slot = None;
        let inner = Future::<i32>::new(|completer| slot = Some(completer));
        let inner_for_map = inner.clone();
        let outer = Future::unit(()).fmap(move |_| inner_for_map);

        assert!(!outer.is_settled());
        slot.expect("setup stores the completer")
            .complete_err(Error::failure("inner failed"));
        assert_eq!(
            *outer.settled_value().unwrap(),
            err(Error::failure("inner failed"))
        );
    }

    #[test]
    fn test_lift1() {
        let increment = Future::lift1(|value: &Result<i32>| value.clone().map(|v| v + 1));
        assert_eq!(*increment(&Future::unit(1)).settled_value().unwrap(), ok(2));
        assert_eq!(*increment(&Future::unit(9)).settled_value().unwrap(), ok(10));
        assert!(increment(&Future::error(Error::failure("e")))
            .settled_value()
            .unwrap()
            .is_err());
    }

    #[test]
    fn test_subscriber_may_resubscribe_reentrantly() {
        let future = Future::unit(3);
        let (tx, rx) = mpsc::channel();
        let again = future.clone();
        future.ready(move |_| {
            again.ready(move |value| tx.send(value.clone()).unwrap());
        });
        assert_eq!(rx.recv_timeout(Duration::from_secs(1)).unwrap(), ok(3));
    }

    #[test]
    fn test_settles_from_another_thread() {
        let future = Future::new(|completer| {
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(10));
                completer.complete_ok("from thread".to_string());
            });
        });

        let (tx, rx) = mpsc::channel();
        future.ready(move |value| tx.send(value.clone()).unwrap());
        assert_eq!(
            rx.recv_timeout(Duration::from_secs(5)).unwrap(),
            ok("from thread".to_string())
        );
        assert!(future.is_settled());
    }

    #[tokio::test]
    async fn test_spawn_and_wait() {
        let future = Future::spawn(async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            ok::<i32, Error>(7)
        });
        assert_eq!(*future.wait().await, ok(7));
        // waiting again observes the same value
        assert_eq!(*future.wait().await, ok(7));
    }

    #[tokio::test]
    async fn test_wait_reports_panicking_subscriber() {
        let mut slot = None;
        let future = Future::<i32>::new(|completer| slot = Some(completer));
        let completer = slot.expect("setup stores the completer");

        future.ready(|_| panic!("subscriber failed"));
        let mut waiting = Box::pin(future.wait());
        assert!(futures::poll!(&mut waiting).is_pending());

        let settle = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            completer.complete_ok(1)
        }));
        assert!(settle.is_err());

        let outcome = waiting.await;
        assert_eq!(
            (*outcome).as_ref().err().map(|e| e.to_string()),
            Maybe::just("a subscriber panicked while the future was settling".to_string())
        );
        // the value itself is still settled
        assert_eq!(*future.settled_value().unwrap(), ok(1));
    }

    #[test]
    fn test_spawn_without_runtime_settles_with_error() {
        let future = Future::spawn(async { ok::<i32, Error>(1) });
        assert!(future.settled_value().unwrap().is_err());
    }
}
