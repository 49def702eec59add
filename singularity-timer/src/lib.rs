//! Periodic event timers for Endgame: Singularity.
//!
//! [`TimerRegistry`] maps an event type to one background task that posts
//! that event into the host's event queue at a fixed interval. Setting a timer
//! for a type that already has one replaces it; cancelling is a no-op when no
//! timer exists.
//!
//! Tasks run on the tokio runtime handle given at construction. On a
//! current-thread runtime they only make progress while the host awaits, so
//! registry updates never interleave with a task step.

mod registry;

pub use registry::TimerRegistry;
