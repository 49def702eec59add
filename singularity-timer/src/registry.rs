//! Registry of periodic event-posting tasks.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// One installed timer.
struct TimerTask {
    generation: u64,
    interval: Duration,
    handle: JoinHandle<()>,
}

/// Multiplexes periodic timers keyed by event type.
///
/// At most one task exists per event type. Each task posts its event, sleeps
/// for the interval and repeats for as long as the registry still maps the
/// event type to that task.
pub struct TimerRegistry<E> {
    /// Handles to cancel background tasks, keyed by event type.
    tasks: HashMap<E, TimerTask>,
    /// Generation of the live task per event type, read by the tasks themselves.
    live: Arc<Mutex<HashMap<E, u64>>>,
    next_generation: u64,
    /// Host event queue (cloned to background tasks).
    events: mpsc::UnboundedSender<E>,
    runtime: Handle,
}

impl<E> TimerRegistry<E>
where
    E: Eq + Hash + Clone + Debug + Send + 'static,
{
    /// Create an empty registry posting into `events`, spawning on `runtime`.
    pub fn new(runtime: Handle, events: mpsc::UnboundedSender<E>) -> Self {
        Self {
            tasks: HashMap::new(),
            live: Arc::new(Mutex::new(HashMap::new())),
            next_generation: 0,
            events,
            runtime,
        }
    }

    /// Start or replace the timer for `event_type`.
    ///
    /// Any existing timer for the type is cancelled first. A non-positive
    /// interval leaves the type without a timer.
    pub fn set_timer(&mut self, event_type: E, interval_ms: i64) {
        self.cancel_timer(&event_type);

        let Ok(millis) = u64::try_from(interval_ms) else {
            log::debug!("Timer for {:?} disabled (interval {}ms)", event_type, interval_ms);
            return;
        };
        if millis == 0 {
            log::debug!("Timer for {:?} disabled (interval 0ms)", event_type);
            return;
        }
        let interval = Duration::from_millis(millis);

        self.next_generation += 1;
        let generation = self.next_generation;
        self.live.lock().insert(event_type.clone(), generation);

        let live = Arc::clone(&self.live);
        let tx = self.events.clone();
        let key = event_type.clone();
        let handle = self.runtime.spawn(async move {
            loop {
                let current = live.lock().get(&key).copied();
                if current != Some(generation) {
                    break;
                }
                if tx.send(key.clone()).is_err() {
                    log::debug!("Event queue closed, stopping timer for {:?}", key);
                    break; // Receiver dropped
                }
                tokio::time::sleep(interval).await;
            }
        });

        log::debug!("Timer for {:?} set to {}ms", event_type, millis);
        self.tasks.insert(
            event_type,
            TimerTask {
                generation,
                interval,
                handle,
            },
        );
    }

    /// Cancel the timer for `event_type`, if any.
    ///
    /// The task stops at its next sleep without posting again.
    pub fn cancel_timer(&mut self, event_type: &E) {
        if let Some(task) = self.tasks.remove(event_type) {
            {
                let mut live = self.live.lock();
                if live.get(event_type) == Some(&task.generation) {
                    live.remove(event_type);
                }
            }
            task.handle.abort();
            log::debug!("Timer for {:?} cancelled", event_type);
        }
    }

    /// Cancel every active timer.
    pub fn cancel_all_timers(&mut self) {
        let keys: Vec<E> = self.tasks.keys().cloned().collect();
        for key in &keys {
            self.cancel_timer(key);
        }
    }

    /// Whether a timer is installed for `event_type`.
    pub fn is_active(&self, event_type: &E) -> bool {
        self.tasks.contains_key(event_type)
    }

    /// Interval of the timer installed for `event_type`.
    pub fn interval(&self, event_type: &E) -> Option<Duration> {
        self.tasks.get(event_type).map(|task| task.interval)
    }

    /// Number of installed timers.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Event types with an installed timer, in no particular order.
    pub fn active_event_types(&self) -> Vec<E> {
        self.tasks.keys().cloned().collect()
    }
}

impl<E> Drop for TimerRegistry<E> {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.handle.abort();
        }
        self.live.lock().clear();
    }
}
