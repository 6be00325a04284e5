//! Frame timing and delta time.
//!
//! [`Time`] is owned by the [`World`](crate::ecs::World) and advanced by each
//! [`World::update`](crate::ecs::World::update) call with the host's current
//! timestamp. Nothing here reads the system clock; hosts that run in real
//! time get their timestamps from [`Clock`].

use std::time::Instant;

/// Frame timing state, measured in seconds of host time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Time {
    /// Timestamp recorded at construction.
    start: f64,
    /// Timestamp of the most recent update.
    previous: f64,
    /// `current - previous` from the most recent update. Can be zero or
    /// negative if the host hands us a non-increasing timestamp.
    delta: f64,
    frame_count: u64,
}

impl Time {
    pub fn new(start: f64) -> Self {
        Self {
            start,
            previous: start,
            delta: 0.0,
            frame_count: 0,
        }
    }

    /// Record a new frame timestamp and return the delta to the previous one.
    ///
    /// The first call measures against the construction timestamp, so a host
    /// whose clock does not start at that value sees one large initial delta.
    pub fn advance(&mut self, current: f64) -> f64 {
        self.delta = current - self.previous;
        self.previous = current;
        self.frame_count += 1;
        self.delta
    }

    /// Delta of the most recent update.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Delta in seconds as `f32`, the form physics and particles consume.
    pub fn delta_secs(&self) -> f32 {
        self.delta as f32
    }

    /// Timestamp of the most recent update (the construction time before any).
    pub fn previous(&self) -> f64 {
        self.previous
    }

    /// Host time elapsed between construction and the most recent update.
    pub fn elapsed(&self) -> f64 {
        self.previous - self.start
    }

    /// Number of updates so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Estimated FPS based on the last delta.
    pub fn fps(&self) -> f64 {
        if self.delta > 0.0 { 1.0 / self.delta } else { 0.0 }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Monotonic wall clock reporting seconds since it was created.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    origin: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now_secs(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
