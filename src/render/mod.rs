//! Rendering for the orbital sandbox.
//!
//! Everything is drawn with gizmos from the coordinator's read-only
//! [`RenderSnapshot`](crate::coordinator::RenderSnapshot); nothing here
//! mutates simulation state.

mod bodies;
mod trajectory;

use bevy::math::DVec2;
use bevy::prelude::*;

use crate::coordinator::{Simulation, SimulationSet};

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(palette::BACKGROUND)).add_systems(
            Update,
            (
                bodies::draw_boundary,
                bodies::draw_bodies,
                trajectory::draw_predicted_path,
                bodies::draw_craft,
            )
                .chain()
                .after(SimulationSet::Step)
                .run_if(resource_exists::<Simulation>),
        );
    }
}

/// Physics position to render coordinates. One scenario unit is one
/// render unit; the camera's zoom handles scale.
pub fn to_render(pos: DVec2) -> Vec2 {
    pos.as_vec2()
}

/// Colors used across the renderers.
pub mod palette {
    use bevy::prelude::Color;

    pub const BACKGROUND: Color = Color::srgb(0.02, 0.02, 0.05);
    pub const BODY: Color = Color::srgb(0.45, 0.65, 0.95);
    pub const CRAFT: Color = Color::srgb(0.95, 0.95, 0.95);
    pub const CRAFT_DESTROYED: Color = Color::srgb(0.9, 0.25, 0.2);
    pub const FLAME: Color = Color::srgb(1.0, 0.6, 0.1);
    pub const BOUNDARY: Color = Color::srgba(0.6, 0.6, 0.7, 0.35);
    pub const BOUNDARY_WARNING: Color = Color::srgb(0.95, 0.3, 0.25);
    pub const PREDICTION: Color = Color::srgba(0.4, 0.9, 0.55, 0.8);
    pub const PREDICTION_IMPACT: Color = Color::srgba(0.95, 0.35, 0.3, 0.9);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_render_preserves_axes() {
        assert_eq!(to_render(DVec2::new(150.0, -20.5)), Vec2::new(150.0, -20.5));
    }
}
