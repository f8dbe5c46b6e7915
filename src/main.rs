// Main
mod camera;
mod config;
mod level;
mod player;
mod registry;
mod transition;
mod zone;

use bevy::prelude::*;
use camera::CameraPlugin;
use level::LevelPlugin;
use player::PlayerPlugin;
use transition::TransitionPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins((PlayerPlugin, LevelPlugin, TransitionPlugin, CameraPlugin))
        .run();
}
