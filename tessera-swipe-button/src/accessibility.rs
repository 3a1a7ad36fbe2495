//! Screen-reader state tracking.
//!
//! ## Usage
//!
//! Implement [`ScreenReaderService`] on top of the platform's accessibility
//! API and pass it to [`SwipeButton::mount`](crate::SwipeButton::mount).
//! [`ScreenReaderMonitor`] mirrors the platform flag and drops every update
//! that arrives after the owning component started tearing down.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tracing::debug;

use crate::prop::CallbackWith;

/// Platform source of the "screen reader enabled" flag.
///
/// Both callbacks may run later and on another thread.
pub trait ScreenReaderService: Send + Sync {
    /// Registers `listener` for toggle notifications until the returned
    /// [`Subscription`] is dropped.
    fn subscribe(&self, listener: CallbackWith<bool>) -> Subscription;

    /// Asks for the current flag; `reply` runs once the platform answers.
    fn query_enabled(&self, reply: CallbackWith<bool>);
}

/// Registration guard returned by [`ScreenReaderService::subscribe`].
///
/// Dropping it removes the listener.
pub struct Subscription {
    remove: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Creates a guard that runs `remove` when dropped.
    pub fn new<F>(remove: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        Self {
            remove: Some(Box::new(remove)),
        }
    }

    /// A guard with nothing to remove.
    pub fn detached() -> Self {
        Self { remove: None }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.remove.is_some())
            .finish()
    }
}

#[derive(Debug, Default)]
struct MonitorShared {
    tearing_down: AtomicBool,
    enabled: AtomicBool,
}

impl MonitorShared {
    fn with_enabled(enabled: bool) -> Self {
        Self {
            tearing_down: AtomicBool::new(false),
            enabled: AtomicBool::new(enabled),
        }
    }

    /// Stores `enabled` unless teardown began. Returns whether it changed.
    fn apply(&self, enabled: bool, source: &'static str) -> bool {
        if self.tearing_down.load(Ordering::SeqCst) {
            debug!(source, enabled, "screen reader update dropped after teardown");
            return false;
        }
        let previous = self.enabled.swap(enabled, Ordering::SeqCst);
        if previous != enabled {
            debug!(source, enabled, "screen reader state changed");
        }
        previous != enabled
    }
}

/// Mirrors the platform screen-reader flag for one mounted component.
#[derive(Debug, Default)]
pub struct ScreenReaderMonitor {
    shared: Arc<MonitorShared>,
    subscription: Option<Subscription>,
}

impl ScreenReaderMonitor {
    /// Creates a detached monitor reporting `false`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to `service` and issues the initial query.
    ///
    /// Re-attaching starts a fresh generation, so replies owed to an earlier
    /// attachment are discarded.
    pub fn attach(&mut self, service: &dyn ScreenReaderService) {
        self.detach();
        self.shared = Arc::new(MonitorShared::with_enabled(self.is_enabled()));

        let shared = Arc::clone(&self.shared);
        self.subscription = Some(service.subscribe(CallbackWith::new(move |enabled| {
            shared.apply(enabled, "toggle");
        })));

        let shared = Arc::clone(&self.shared);
        service.query_enabled(CallbackWith::new(move |enabled| {
            shared.apply(enabled, "query");
        }));
    }

    /// Marks teardown, then releases the subscription.
    ///
    /// The flag is raised first so a reply racing the removal is dropped.
    pub fn detach(&mut self) {
        self.shared.tearing_down.store(true, Ordering::SeqCst);
        self.subscription = None;
    }

    /// Last known flag.
    pub fn is_enabled(&self) -> bool {
        self.shared.enabled.load(Ordering::SeqCst)
    }
}

impl Drop for ScreenReaderMonitor {
    fn drop(&mut self) {
        self.detach();
    }
}
