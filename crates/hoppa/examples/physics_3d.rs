//! Five boxes on a Rapier ground plane. Taps once the boxes have settled and
//! logs how high each one gets.
//!
//! ```text
//! RUST_LOG=info cargo run --example physics_3d --features physics3d
//! ```

use hoppa::prelude::*;
use log::info;

fn main() -> Result<()> {
    env_logger::init();

    let scene = RapierScene::new().with_ground(20.0);
    let mut host = Host::new(scene, SceneConfig::five_boxes());
    let entities = host.setup()?;

    let nodes: Vec<NodeId> = entities
        .iter()
        .filter_map(|&e| host.world().get(e, ComponentKind::Geometry))
        .filter_map(Component::as_geometry)
        .map(Geometry::node)
        .collect();
    let mut peaks = vec![f32::MIN; nodes.len()];

    for frame in 1..=240u32 {
        if frame == 90 {
            host.tap();
        }
        host.frame(frame as f64 / 60.0)?;

        if frame >= 90 {
            for (peak, &node) in peaks.iter_mut().zip(&nodes) {
                if let Some(position) = host.scene().position(node) {
                    *peak = peak.max(position.y);
                }
            }
        }
    }

    for (entity, peak) in entities.iter().zip(peaks) {
        info!("box {entity} peaked at y = {peak:.2}");
    }
    Ok(())
}
