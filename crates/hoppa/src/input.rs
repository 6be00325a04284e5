//! Gesture queue between the platform's input layer and the frame loop.
//!
//! The platform pushes gestures as they are recognized; the
//! [`Host`](crate::host::Host) drains the queue at the start of each frame and
//! handles every gesture in arrival order. Nothing is merged: two taps before
//! a frame are two jumps.

use std::collections::VecDeque;

/// Gestures the platform can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// A single tap anywhere on the view.
    Tap,
}

#[derive(Debug, Clone, Default)]
pub struct GestureQueue {
    pending: VecDeque<Gesture>,
}

impl GestureQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, gesture: Gesture) {
        self.pending.push_back(gesture);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Taps waiting for the next frame.
    pub fn pending_taps(&self) -> usize {
        self.pending.iter().filter(|&&g| g == Gesture::Tap).count()
    }

    /// Take every queued gesture, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = Gesture> + '_ {
        self.pending.drain(..)
    }
}
