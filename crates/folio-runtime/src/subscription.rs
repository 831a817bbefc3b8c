#![forbid(unsafe_code)]

//! Subscription system for continuous message sources.
//!
//! A model declares which subscriptions should be alive through
//! [`Model::subscriptions`](crate::Model::subscriptions). After every update
//! the runtime reconciles that declaration against what is running:
//!
//! 1. ids that are new get a thread and a [`StopSignal`]
//! 2. ids that disappeared are signalled and joined
//! 3. ids that are still declared keep running untouched
//!
//! Messages produced by subscriptions are routed back through `update`, so
//! all state changes stay on the single program thread.

use std::collections::HashSet;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, mpsc};
use std::thread;
use std::time::Duration;

/// Stable identifier used to deduplicate subscriptions across updates.
pub type SubId = u64;

/// A source of messages that runs on a background thread.
pub trait Subscription<M: Send + 'static>: Send {
    /// Identity used by the reconciler; equal ids are the same subscription.
    fn id(&self) -> SubId;

    /// Produce messages until the channel closes or `stop` is signalled.
    fn run(&self, sender: mpsc::Sender<M>, stop: StopSignal);
}

type Flag = Arc<(Mutex<bool>, Condvar)>;

fn lock_flag(flag: &Mutex<bool>) -> MutexGuard<'_, bool> {
    // A poisoned flag still holds a valid bool.
    flag.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Receiving half of a stop request, handed to [`Subscription::run`].
#[derive(Clone)]
pub struct StopSignal {
    inner: Flag,
}

impl StopSignal {
    /// Create a connected (signal, trigger) pair.
    pub(crate) fn new() -> (Self, StopTrigger) {
        let inner: Flag = Arc::new((Mutex::new(false), Condvar::new()));
        (
            Self {
                inner: Arc::clone(&inner),
            },
            StopTrigger { inner },
        )
    }

    /// Whether the runtime asked this subscription to stop.
    pub fn is_stopped(&self) -> bool {
        *lock_flag(&self.inner.0)
    }

    /// Sleep for `duration` or until stopped, whichever comes first.
    ///
    /// Returns `true` when the stop signal fired.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let (flag, cvar) = &*self.inner;
        let stopped = lock_flag(flag);
        if *stopped {
            return true;
        }
        let (stopped, _) = cvar
            .wait_timeout_while(stopped, duration, |stopped| !*stopped)
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *stopped
    }
}

impl std::fmt::Debug for StopSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopSignal")
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

/// Sending half of a stop request, kept by the runtime.
pub(crate) struct StopTrigger {
    inner: Flag,
}

impl StopTrigger {
    pub(crate) fn stop(&self) {
        let (flag, cvar) = &*self.inner;
        *lock_flag(flag) = true;
        cvar.notify_all();
    }
}

struct RunningSubscription {
    id: SubId,
    trigger: StopTrigger,
    thread: Option<thread::JoinHandle<()>>,
}

impl RunningSubscription {
    fn stop(mut self) {
        self.trigger.stop();
        if let Some(handle) = self.thread.take()
            && handle.join().is_err()
        {
            tracing::warn!(sub_id = self.id, "subscription thread panicked");
        }
    }
}

impl Drop for RunningSubscription {
    fn drop(&mut self) {
        self.trigger.stop();
    }
}

/// Owns the running subscriptions of one program and their shared channel.
pub(crate) struct SubscriptionManager<M: Send + 'static> {
    active: Vec<RunningSubscription>,
    sender: mpsc::Sender<M>,
    receiver: mpsc::Receiver<M>,
}

impl<M: Send + 'static> SubscriptionManager<M> {
    pub(crate) fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            active: Vec::new(),
            sender,
            receiver,
        }
    }

    /// Bring the running set in line with `declared`.
    pub(crate) fn reconcile(&mut self, declared: Vec<Box<dyn Subscription<M>>>) {
        let wanted: HashSet<SubId> = declared.iter().map(|sub| sub.id()).collect();

        let (keep, retire): (Vec<_>, Vec<_>) = self
            .active
            .drain(..)
            .partition(|running| wanted.contains(&running.id));
        for running in retire {
            tracing::debug!(sub_id = running.id, "stopping subscription");
            running.stop();
        }
        self.active = keep;

        let mut started: HashSet<SubId> = self.active.iter().map(|running| running.id).collect();
        for sub in declared {
            let id = sub.id();
            if !started.insert(id) {
                continue;
            }
            tracing::debug!(sub_id = id, "starting subscription");
            let (signal, trigger) = StopSignal::new();
            let sender = self.sender.clone();
            let thread = thread::spawn(move || sub.run(sender, signal));
            self.active.push(RunningSubscription {
                id,
                trigger,
                thread: Some(thread),
            });
        }
    }

    /// Take every message that arrived since the last drain.
    pub(crate) fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }

    pub(crate) fn active_ids(&self) -> Vec<SubId> {
        self.active.iter().map(|running| running.id).collect()
    }

    pub(crate) fn stop_all(&mut self) {
        for running in self.active.drain(..) {
            running.stop();
        }
    }
}

impl<M: Send + 'static> Drop for SubscriptionManager<M> {
    fn drop(&mut self) {
        self.stop_all();
    }
}

/// Fires `make_msg` every `interval` until stopped.
///
/// ```ignore
/// fn subscriptions(&self) -> Vec<Box<dyn Subscription<Msg>>> {
///     vec![Box::new(Every::new(Duration::from_millis(50), || Msg::Tick(Instant::now())))]
/// }
/// ```
pub struct Every<M: Send + 'static> {
    id: SubId,
    interval: Duration,
    make_msg: Box<dyn Fn() -> M + Send + Sync>,
}

impl<M: Send + 'static> Every<M> {
    /// Tick subscription whose id is derived from the interval.
    pub fn new(interval: Duration, make_msg: impl Fn() -> M + Send + Sync + 'static) -> Self {
        let id = interval.as_nanos() as u64 ^ 0x5449_434B;
        Self::with_id(id, interval, make_msg)
    }

    /// Tick subscription with an explicit id.
    pub fn with_id(
        id: SubId,
        interval: Duration,
        make_msg: impl Fn() -> M + Send + Sync + 'static,
    ) -> Self {
        Self {
            id,
            interval,
            make_msg: Box::new(make_msg),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl<M: Send + 'static> Subscription<M> for Every<M> {
    fn id(&self) -> SubId {
        self.id
    }

    fn run(&self, sender: mpsc::Sender<M>, stop: StopSignal) {
        while !stop.wait_timeout(self.interval) {
            if sender.send((self.make_msg)()).is_err() {
                break;
            }
        }
    }
}
