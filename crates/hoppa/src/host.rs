//! Host adapter: where the platform's frame loop and gestures meet the world.
//!
//! A [`Host`] owns a [`World`] and the [`Scene`] it drives. The platform calls
//! [`tap`](Host::tap) (or [`gesture`](Host::gesture)) as input arrives, and
//! [`frame`](Host::frame) once per rendered frame. Both happen on one thread,
//! so input and frame ticks never overlap. Every tap is one jump broadcast,
//! even when several arrive between two frames.
//!
//! # Example
//!
//! ```
//! use hoppa::prelude::*;
//!
//! let mut host = Host::new(RecordingScene::new(), SceneConfig::five_boxes());
//! host.setup().unwrap();
//!
//! host.tap();
//! let report = host.frame(1.0 / 60.0).unwrap();
//! assert_eq!(report.impulses, 4);
//! ```

use log::info;

use crate::config::SceneConfig;
use crate::ecs::{Entity, World};
use crate::error::Result;
use crate::input::{Gesture, GestureQueue};
use crate::scene::Scene;

/// What happened during one [`Host::frame`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Seconds since the previous frame.
    pub delta: f64,
    /// Impulses applied by jumps this frame.
    pub impulses: usize,
}

pub struct Host<S: Scene> {
    // Declared before `scene` so entities are dropped before the nodes they
    // point at.
    world: World,
    scene: S,
    input: GestureQueue,
    config: SceneConfig,
}

impl<S: Scene> Host<S> {
    pub fn new(scene: S, config: SceneConfig) -> Self {
        Self {
            world: World::new(),
            scene,
            input: GestureQueue::new(),
            config,
        }
    }

    /// Build the configured boxes. Call once, before the first frame.
    pub fn setup(&mut self) -> Result<Vec<Entity>> {
        self.world.initialize(&mut self.scene, &self.config)
    }

    /// Queue a gesture for the next frame.
    pub fn gesture(&mut self, gesture: Gesture) {
        self.input.push(gesture);
    }

    pub fn tap(&mut self) {
        self.gesture(Gesture::Tap);
    }

    /// Run one frame at host time `current_time`: broadcast one jump per
    /// queued tap, update the world, then let the scene simulate the elapsed
    /// time.
    pub fn frame(&mut self, current_time: f64) -> Result<FrameReport> {
        let taps = self.input.drain().filter(|&g| g == Gesture::Tap).count();
        let mut impulses = 0;
        for _ in 0..taps {
            impulses += self.world.jump(&mut self.scene)?;
        }
        if taps > 0 {
            info!("{taps} tap(s): {impulses} impulses");
        }

        let delta = self.world.update(current_time)?;
        if delta > 0.0 {
            self.scene.step(delta as f32);
        }

        Ok(FrameReport { delta, impulses })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::scene::{NodeId, RecordingScene};

    fn host() -> Host<RecordingScene> {
        let mut host = Host::new(RecordingScene::new(), SceneConfig::five_boxes());
        host.setup().unwrap();
        host
    }

    #[test]
    fn frame_before_setup_fails() {
        let mut host = Host::new(RecordingScene::new(), SceneConfig::five_boxes());
        assert_eq!(host.frame(0.1), Err(Error::NotInitialized));
    }

    #[test]
    fn no_tap_no_impulse() {
        let mut host = host();
        let report = host.frame(0.5).unwrap();
        assert_eq!(report, FrameReport { delta: 0.5, impulses: 0 });
        assert_eq!(host.scene().impulse_count(), 0);
    }

    #[test]
    fn every_tap_in_a_frame_jumps() {
        let mut host = host();
        host.tap();
        host.tap();
        assert_eq!(host.frame(0.1).unwrap().impulses, 8);
        assert_eq!(host.frame(0.2).unwrap().impulses, 0);
        assert_eq!(host.scene().impulse_count(), 8);

        let blue = host.scene().node(NodeId::new(0)).unwrap();
        assert_eq!(blue.impulses.len(), 2);
        assert!(host.scene().node(NodeId::new(1)).unwrap().impulses.is_empty());
    }

    #[test]
    fn taps_wait_for_next_frame() {
        let mut host = host();
        host.tap();
        assert_eq!(host.scene().impulse_count(), 0);
        assert_eq!(host.frame(0.1).unwrap().impulses, 4);
        host.gesture(Gesture::Tap);
        assert_eq!(host.frame(0.2).unwrap().impulses, 4);
    }
}
