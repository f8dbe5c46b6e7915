// Camera bounds for the active zone, and the darkness grade on dark zones.
use bevy::prelude::*;

use crate::transition::TransitionController;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(SKY_BLUE)).add_systems(
            Update,
            apply_darkness
                .after(crate::transition::advance_transition)
                .run_if(resource_exists::<TransitionController>),
        );
    }
}

pub const SKY_BLUE: Color = Color::linear_rgb(0.53, 0.81, 0.92);
pub const NIGHT: Color = Color::linear_rgb(0.02, 0.02, 0.06);

/// Horizontal range the camera may occupy: `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBounds {
    pub max: f32,
}

impl CameraBounds {
    pub fn new(max: f32) -> Self {
        Self { max }
    }
}

/// Keeps `camera_x` inside `bounds`. The lower bound wins when `max < 0`.
pub fn clamp_camera(camera_x: f32, bounds: CameraBounds) -> f32 {
    camera_x.min(bounds.max).max(0.0)
}

fn apply_darkness(controller: Res<TransitionController>, mut clear_color: ResMut<ClearColor>) {
    let colour = if controller.is_dark() { NIGHT } else { SKY_BLUE };
    if clear_color.0 != colour {
        clear_color.0 = colour;
    }
}
