//! 2D camera with zoom, pan and optional craft follow.

use bevy::{
    input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll},
    prelude::*,
};

use crate::coordinator::Simulation;

/// Minimum zoom level (closest zoom).
pub const MIN_ZOOM: f32 = 0.05;

/// Maximum zoom level (whole boundary on screen).
pub const MAX_ZOOM: f32 = 20.0;

/// Default zoom level: Terra and Luna both in view.
pub const DEFAULT_ZOOM: f32 = 2.0;

/// Zoom speed multiplier for scroll wheel and keys.
pub const ZOOM_SPEED: f32 = 0.1;

/// Pan speed multiplier.
pub const PAN_SPEED: f32 = 1.0;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Resource tracking camera state.
#[derive(Resource)]
pub struct CameraState {
    pub zoom: f32,
    /// Keep the craft centered.
    pub follow_craft: bool,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            follow_craft: false,
        }
    }
}

/// Plugin providing camera functionality.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraState>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, (camera_zoom, camera_pan, follow_craft).chain());
    }
}

/// Spawn the main camera with orthographic projection.
fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::from(OrthographicProjection {
            scale: DEFAULT_ZOOM,
            ..OrthographicProjection::default_2d()
        }),
        MainCamera,
    ));
}

/// Next zoom level for a scroll or key step. Positive `steps` zoom in.
pub fn zoom_step(scale: f32, steps: f32) -> f32 {
    (scale * (1.0 - steps * ZOOM_SPEED)).clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Handle mouse scroll wheel and +/- keys for zoom.
fn camera_zoom(
    mouse_scroll: Res<AccumulatedMouseScroll>,
    keys: Res<ButtonInput<KeyCode>>,
    mut camera_query: Query<&mut Projection, With<MainCamera>>,
    mut camera_state: ResMut<CameraState>,
) {
    let mut steps = mouse_scroll.delta.y;
    if keys.pressed(KeyCode::Equal) || keys.pressed(KeyCode::NumpadAdd) {
        steps += 1.0;
    }
    if keys.pressed(KeyCode::Minus) || keys.pressed(KeyCode::NumpadSubtract) {
        steps -= 1.0;
    }
    if steps == 0.0 {
        return;
    }

    let Ok(mut projection) = camera_query.single_mut() else {
        return;
    };

    let Projection::Orthographic(ref mut ortho) = *projection else {
        return;
    };

    ortho.scale = zoom_step(ortho.scale, steps);
    camera_state.zoom = ortho.scale;
}

/// Handle middle mouse button drag for panning. Panning stops following.
fn camera_pan(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mut camera_query: Query<(&mut Transform, &Projection), With<MainCamera>>,
    mut camera_state: ResMut<CameraState>,
) {
    if !mouse_buttons.pressed(MouseButton::Middle) {
        return;
    }

    let Ok((mut transform, projection)) = camera_query.single_mut() else {
        return;
    };

    let Projection::Orthographic(ortho) = projection else {
        return;
    };

    let delta = mouse_motion.delta * ortho.scale * PAN_SPEED;
    transform.translation.x -= delta.x;
    transform.translation.y += delta.y; // Invert Y for natural feel
    if delta != Vec2::ZERO {
        camera_state.follow_craft = false;
    }
}

/// F toggles follow; while on, center on the craft.
fn follow_craft(
    keys: Res<ButtonInput<KeyCode>>,
    sim: Res<Simulation>,
    mut camera_state: ResMut<CameraState>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    if keys.just_pressed(KeyCode::KeyF) {
        camera_state.follow_craft = !camera_state.follow_craft;
        info!(
            "Camera follow {}",
            if camera_state.follow_craft { "on" } else { "off" }
        );
    }
    if !camera_state.follow_craft {
        return;
    }

    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };
    let pos = crate::render::to_render(sim.craft().position);
    transform.translation.x = pos.x;
    transform.translation.y = pos.y;
}
