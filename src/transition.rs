// Black-screen fade between zones, and the state machine that drives it.

use bevy::prelude::*;

use crate::camera::{CameraBounds, clamp_camera};
use crate::config::ZoneConfig;
use crate::player::{FollowCamera, Player, follow_player};
use crate::registry::{ZoneError, ZoneRegistry};
use crate::zone::{Zone, ZoneName, next_zone};

pub struct TransitionPlugin;

impl Plugin for TransitionPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ZoneEntered>()
            .add_systems(Startup, spawn_overlay)
            .add_systems(
                Update,
                (advance_transition, fade_overlay, announce_zone)
                    .chain()
                    .after(follow_player)
                    .run_if(resource_exists::<TransitionController>),
            );
    }
}

/// Opacity within this distance of 0 or 1 snaps to the limit. Opacity is summed
/// in `f64`, so the only drift left is the rounding of each `f32` frame delta,
/// which stays below one `f32` epsilon over a whole fade.
const FADE_TOLERANCE: f64 = f32::EPSILON as f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    FadingOut { next: ZoneName },
    FadingIn,
}

/// Written once per completed zone swap.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneEntered {
    pub from: ZoneName,
    pub to: ZoneName,
}

/// World positions the controller reads and writes during one update.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FramePositions {
    pub player_x: f32,
    pub camera_x: f32,
}

/// Owns the zones and steps the fade-out, swap, fade-in cycle one frame at a time.
///
/// The swap from one zone to the next happens entirely inside a single
/// [`update`](Self::update) call, so callers never see two active zones or bounds
/// that belong to the previous zone.
#[derive(Resource, Debug)]
pub struct TransitionController {
    registry: ZoneRegistry,
    active: ZoneName,
    phase: TransitionPhase,
    opacity: f64,
    bounds: CameraBounds,
    fade_rate: f32,
}

impl TransitionController {
    /// Fails if `starting_zone`, or any zone the routing can lead to, is missing,
    /// or if `fade_rate` is not a positive number.
    /// All zones other than `starting_zone` are deactivated.
    pub fn new(
        mut registry: ZoneRegistry,
        starting_zone: ZoneName,
        fade_rate: f32,
    ) -> Result<Self, ZoneError> {
        if !fade_rate.is_finite() || fade_rate <= 0.0 {
            return Err(ZoneError::InvalidFadeRate(fade_rate));
        }
        let start_end = registry.lookup(starting_zone)?.end_point();
        let names: Vec<ZoneName> = registry.iter().map(Zone::name).collect();
        for &name in &names {
            registry.lookup(next_zone(name))?;
        }

        for name in names {
            let zone = registry.lookup_mut(name)?;
            let active = name == starting_zone;
            if zone.is_active() && !active {
                warn!("Zone {name} was configured active, deactivating in favour of {starting_zone}");
            }
            zone.set_active(active);
        }

        Ok(Self {
            registry,
            active: starting_zone,
            phase: TransitionPhase::Idle,
            opacity: 0.0,
            bounds: CameraBounds::new(start_end),
            fade_rate,
        })
    }

    pub fn from_config(config: &ZoneConfig) -> Result<Self, ZoneError> {
        let registry = ZoneRegistry::new(config.zones.iter().cloned())?;
        Self::new(registry, config.starting_zone, config.fade_rate)
    }

    pub fn registry(&self) -> &ZoneRegistry {
        &self.registry
    }

    pub fn active_zone(&self) -> ZoneName {
        self.active
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Overlay opacity in `[0, 1]`.
    pub fn opacity(&self) -> f32 {
        self.opacity as f32
    }

    pub fn bounds(&self) -> CameraBounds {
        self.bounds
    }

    pub fn is_dark(&self) -> bool {
        self.active.is_dark()
    }

    /// Advances the controller by `dt` seconds and clamps `frame.camera_x`.
    ///
    /// `frame.player_x` is only written when a swap happens, in which case the
    /// swap is returned.
    pub fn update(
        &mut self,
        dt: f32,
        frame: &mut FramePositions,
    ) -> Result<Option<ZoneEntered>, ZoneError> {
        let step = f64::from(self.fade_rate) * f64::from(dt.max(0.0));
        let mut entered = None;

        if self.phase == TransitionPhase::Idle {
            let current = self.registry.lookup(self.active)?;
            if frame.player_x >= current.end_point() {
                let next = next_zone(self.active);
                self.registry.lookup(next)?;
                debug!("Player crossed the end of {}, fading out to {next}", self.active);
                self.phase = TransitionPhase::FadingOut { next };
            }
        }

        match self.phase {
            TransitionPhase::Idle => {}
            TransitionPhase::FadingOut { next } => {
                self.opacity = (self.opacity + step).min(1.0);
                if self.opacity >= 1.0 - FADE_TOLERANCE {
                    self.opacity = 1.0;
                    entered = Some(self.swap_to(next, frame)?);
                    self.phase = TransitionPhase::FadingIn;
                }
            }
            TransitionPhase::FadingIn => {
                self.opacity = (self.opacity - step).max(0.0);
                if self.opacity <= FADE_TOLERANCE {
                    self.opacity = 0.0;
                    self.phase = TransitionPhase::Idle;
                }
            }
        }

        frame.camera_x = clamp_camera(frame.camera_x, self.bounds);
        Ok(entered)
    }

    fn swap_to(
        &mut self,
        next: ZoneName,
        frame: &mut FramePositions,
    ) -> Result<ZoneEntered, ZoneError> {
        let previous = self.active;
        let (entry_x, end_point) = {
            let zone = self.registry.lookup(next)?;
            (zone.entry_x(), zone.end_point())
        };
        self.registry.lookup(previous)?;

        self.registry.lookup_mut(previous)?.set_active(false);
        self.registry.lookup_mut(next)?.set_active(true);
        self.active = next;
        self.bounds = CameraBounds::new(end_point);
        frame.player_x = entry_x;
        debug_assert_eq!(self.registry.active_zones().count(), 1);

        Ok(ZoneEntered {
            from: previous,
            to: next,
        })
    }
}

#[derive(Component)]
pub struct FadeOverlay;

fn spawn_overlay(mut commands: Commands) {
    commands.spawn((
        FadeOverlay,
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.0)),
        GlobalZIndex(100),
    ));
}

pub fn advance_transition(
    time: Res<Time>,
    mut controller: ResMut<TransitionController>,
    mut player: Query<&mut Transform, With<Player>>,
    mut camera: Query<&mut Transform, (With<FollowCamera>, Without<Player>)>,
    mut entered: MessageWriter<ZoneEntered>,
    mut exit: MessageWriter<AppExit>,
) {
    let Ok(mut player_transform) = player.single_mut() else {
        return;
    };
    let mut camera_transform = camera.single_mut().ok();

    let mut frame = FramePositions {
        player_x: player_transform.translation.x,
        camera_x: camera_transform
            .as_ref()
            .map_or(0.0, |transform| transform.translation.x),
    };

    let phase = controller.phase();
    let result = controller.update(time.delta_secs(), &mut frame);
    if controller.phase() != phase {
        debug!("Transition {phase:?} -> {:?}", controller.phase());
    }

    match result {
        Ok(Some(swap)) => {
            info!(
                "Entered {} from {}, camera bounded to [0, {}]",
                swap.to,
                swap.from,
                controller.bounds().max
            );
            player_transform.translation.x = frame.player_x;
            entered.write(swap);
        }
        Ok(None) => {}
        Err(err) => {
            error!("Zone transition failed: {err}");
            exit.write(AppExit::error());
            return;
        }
    }

    if let Some(transform) = camera_transform.as_mut() {
        if transform.translation.x != frame.camera_x {
            transform.translation.x = frame.camera_x;
        }
    }
}

fn fade_overlay(
    controller: Res<TransitionController>,
    mut overlays: Query<&mut BackgroundColor, With<FadeOverlay>>,
) {
    for mut bg in &mut overlays {
        bg.set_if_neq(BackgroundColor(Color::srgba(
            0.0,
            0.0,
            0.0,
            controller.opacity(),
        )));
    }
}

fn announce_zone(mut entered: MessageReader<ZoneEntered>) {
    for swap in entered.read() {
        debug!("Zone swap complete: {} -> {}", swap.from, swap.to);
    }
}
