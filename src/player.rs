// Side-on player and the camera that tracks it. Movement is driven elsewhere;
// this module only places the entities and keeps the camera over the player.
use bevy::prelude::*;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_player)
            .add_systems(Update, follow_player);
    }
}

#[derive(Component)]
pub struct Player;

/// Camera that tracks the player horizontally, before zone clamping.
#[derive(Component)]
pub struct FollowCamera;

const PLAYER_SIZE: Vec2 = Vec2::new(1.0, 2.0);
const GROUND_Y: f32 = 1.0;
/// World units per screen pixel.
const CAMERA_SCALE: f32 = 1.0 / 16.0;

fn spawn_player(mut commands: Commands) {
    commands.spawn((
        Player,
        Sprite::from_color(Color::srgb(0.9, 0.55, 0.2), PLAYER_SIZE),
        Transform::from_xyz(0.0, GROUND_Y, 0.0),
    ));

    commands.spawn((
        FollowCamera,
        Camera2d,
        Projection::from(OrthographicProjection {
            scale: CAMERA_SCALE,
            ..OrthographicProjection::default_2d()
        }),
        Transform::from_xyz(0.0, GROUND_Y, 0.0),
    ));
}

pub fn follow_player(
    player: Query<&Transform, With<Player>>,
    mut camera: Query<&mut Transform, (With<FollowCamera>, Without<Player>)>,
) {
    let Ok(player) = player.single() else {
        return;
    };
    let Ok(mut camera) = camera.single_mut() else {
        return;
    };
    if camera.translation.x != player.translation.x {
        camera.translation.x = player.translation.x;
    }
}
