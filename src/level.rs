// Zone setup at startup and per-zone visibility.
use bevy::prelude::*;

use crate::config::{ZoneConfig, config_path};
use crate::transition::{TransitionController, advance_transition};
use crate::zone::ZoneName;

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_zones).add_systems(
            Update,
            sync_zone_visibility
                .after(advance_transition)
                .run_if(resource_exists::<TransitionController>),
        );
    }
}

/// Parent entity for everything that belongs to one zone. Hidden while the zone
/// is inactive.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneRoot(pub ZoneName);

fn setup_zones(
    mut commands: Commands,
    config: Option<Res<ZoneConfig>>,
    mut exit: MessageWriter<AppExit>,
) {
    let loaded;
    let config = match config.as_deref() {
        Some(config) => config,
        None => match ZoneConfig::load(config_path()) {
            Ok(config) => {
                loaded = config;
                &loaded
            }
            Err(err) => {
                error!("{err}");
                exit.write(AppExit::error());
                return;
            }
        },
    };

    let controller = match TransitionController::from_config(config) {
        Ok(controller) => controller,
        Err(err) => {
            error!("Invalid zone layout: {err}");
            exit.write(AppExit::error());
            return;
        }
    };

    for zone in controller.registry().iter() {
        commands.spawn((
            ZoneRoot(zone.name()),
            Name::new(zone.name().to_string()),
            Transform::default(),
            visibility(zone.is_active()),
        ));
    }
    info!(
        "Starting in {} with {} zones",
        controller.active_zone(),
        controller.registry().iter().count()
    );

    // Zones live in the controller from here on.
    commands.remove_resource::<ZoneConfig>();
    commands.insert_resource(controller);
}

fn visibility(active: bool) -> Visibility {
    if active {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

fn sync_zone_visibility(
    controller: Res<TransitionController>,
    mut roots: Query<(&ZoneRoot, &mut Visibility)>,
) {
    for (root, mut vis) in &mut roots {
        let active = controller
            .registry()
            .lookup(root.0)
            .is_ok_and(|zone| zone.is_active());
        vis.set_if_neq(visibility(active));
    }
}
