//=========================================================================
// Mover
//=========================================================================
//
// Translates an entity every tick from a two-axis movement source.
//
// The mover depends only on the `MovementInput` capability, never on a
// concrete input device: a player reads the scene input, an AI or a test
// script supplies fixed values.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::input::{Axis, InputState};
use crate::core::scene::{Behaviour, Context};

//=== MovementInput =======================================================

/// Source of movement axes, each roughly in `[-1, 1]`.
pub trait MovementInput: Send {
    fn horizontal(&self, input: &InputState) -> f32;
    fn vertical(&self, input: &InputState) -> f32;
}

/// Reads the raw horizontal and vertical axes of the scene input.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerInput;

impl MovementInput for PlayerInput {
    fn horizontal(&self, input: &InputState) -> f32 {
        input.axis(Axis::Horizontal)
    }

    fn vertical(&self, input: &InputState) -> f32 {
        input.axis(Axis::Vertical)
    }
}

/// Scripted axis values, independent of the scene input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedInput {
    pub horizontal: f32,
    pub vertical: f32,
}

impl FixedInput {
    pub fn new(horizontal: f32, vertical: f32) -> Self {
        Self { horizontal, vertical }
    }
}

impl MovementInput for FixedInput {
    fn horizontal(&self, _input: &InputState) -> f32 {
        self.horizontal
    }

    fn vertical(&self, _input: &InputState) -> f32 {
        self.vertical
    }
}

//=== Movement ============================================================

/// Position delta for one tick.
///
/// The direction `(h, 0, v)` is normalized before scaling, so diagonal
/// input moves exactly as fast as axis-aligned input. Zero input (or
/// non-finite input) yields `Vec3::ZERO`.
pub fn movement_delta(horizontal: f32, vertical: f32, speed: f32, dt: f32) -> Vec3 {
    Vec3::new(horizontal, 0.0, vertical).normalize_or_zero() * speed * dt
}

//=== MoverConfig =========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoverConfig {
    /// Units per second.
    pub speed: f32,
}

impl MoverConfig {
    /// # Panics
    ///
    /// Panics if `speed` is negative or not finite.
    pub fn with_speed(mut self, speed: f32) -> Self {
        assert!(
            speed.is_finite() && speed >= 0.0,
            "Speed must be finite and non-negative, got {}",
            speed
        );
        self.speed = speed;
        self
    }
}

impl Default for MoverConfig {
    fn default() -> Self {
        Self { speed: 5.0 }
    }
}

//=== Mover ===============================================================

/// Moves its entity from the entity's `dyn MovementInput` capability.
///
/// The capability is checked once at start. Without it the mover logs a
/// warning and stays idle for the rest of its life.
pub struct Mover {
    config: MoverConfig,
    has_input: bool,
}

impl Mover {
    pub fn new(config: MoverConfig) -> Self {
        Self {
            config,
            has_input: false,
        }
    }

    pub fn speed(&self) -> f32 {
        self.config.speed
    }
}

impl Default for Mover {
    fn default() -> Self {
        Self::new(MoverConfig::default())
    }
}

impl Behaviour for Mover {
    fn on_start(&mut self, ctx: &mut Context<'_>) {
        self.has_input = ctx.world.capability::<dyn MovementInput>(ctx.entity).is_some();

        if !self.has_input {
            warn!("Mover on entity {} has no movement input; it will not move", ctx.entity);
        }
    }

    fn update(&mut self, ctx: &mut Context<'_>) {
        if !self.has_input {
            return;
        }

        let Some(source) = ctx.world.capability::<dyn MovementInput>(ctx.entity) else {
            return;
        };
        let (h, v) = (source.horizontal(ctx.input), source.vertical(ctx.input));

        let delta = movement_delta(h, v, self.config.speed, ctx.delta_seconds());
        if delta == Vec3::ZERO {
            return;
        }

        if let Some(transform) = ctx.world.transform_mut(ctx.entity) {
            transform.translate(delta);
            debug!("Entity {} moved to {}", ctx.entity, transform.position);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode};
    use crate::core::scene::{EntityBuilder, Scene};
    use crate::core::world::EntityId;
    use std::time::Duration;

    const EPSILON: f32 = 1e-5;

    fn spawn_mover(scene: &mut Scene, input: Option<Box<dyn MovementInput>>) -> EntityId {
        let mover = Mover::new(MoverConfig::default().with_speed(2.0));
        let mut builder = EntityBuilder::new("Player").with_behaviour(mover);
        if let Some(input) = input {
            builder = builder.with_capability::<dyn MovementInput>(input);
        }
        scene.spawn(builder)
    }

    //=====================================================================
    // movement_delta Tests
    //=====================================================================

    #[test]
    fn delta_magnitude_is_speed_times_dt_for_any_nonzero_input() {
        let inputs = [(1.0, 0.0), (0.0, -1.0), (1.0, 1.0), (-0.3, 0.2), (0.01, 0.0)];

        for (h, v) in inputs {
            let delta = movement_delta(h, v, 5.0, 0.1);
            assert!((delta.length() - 0.5).abs() < EPSILON, "input ({}, {})", h, v);
            assert_eq!(delta.y, 0.0);
        }
    }

    #[test]
    fn delta_is_zero_without_input() {
        assert_eq!(movement_delta(0.0, 0.0, 5.0, 0.1), Vec3::ZERO);
        assert_eq!(movement_delta(f32::NAN, 0.0, 5.0, 0.1), Vec3::ZERO);
    }

    #[test]
    fn diagonal_is_not_faster() {
        let straight = movement_delta(1.0, 0.0, 3.0, 1.0);
        let diagonal = movement_delta(1.0, 1.0, 3.0, 1.0);
        assert!((straight.length() - diagonal.length()).abs() < EPSILON);
    }

    #[test]
    fn vertical_axis_maps_to_z() {
        let delta = movement_delta(0.0, 1.0, 1.0, 1.0);
        assert_eq!(delta, Vec3::Z);
    }

    //=====================================================================
    // Config Tests
    //=====================================================================

    #[test]
    fn config_defaults() {
        assert_eq!(MoverConfig::default().speed, 5.0);
    }

    #[test]
    #[should_panic(expected = "Speed must be finite")]
    fn config_rejects_negative_speed() {
        MoverConfig::default().with_speed(-1.0);
    }

    //=====================================================================
    // Behaviour Tests
    //=====================================================================

    #[test]
    fn fixed_input_moves_entity() {
        let mut scene = Scene::new();
        let id = spawn_mover(&mut scene, Some(Box::new(FixedInput::new(1.0, 0.0))));

        scene.tick(Duration::from_millis(500));

        let position = scene.world().position(id).unwrap();
        assert!((position - Vec3::new(1.0, 0.0, 0.0)).length() < EPSILON);
    }

    #[test]
    fn player_input_follows_held_keys() {
        let mut scene = Scene::new();
        let id = spawn_mover(&mut scene, Some(Box::new(PlayerInput)));

        scene.input_mut().process_events(&[
            InputEvent::KeyDown(KeyCode::KeyW),
            InputEvent::KeyDown(KeyCode::KeyD),
        ]);
        scene.tick(Duration::from_secs(1));

        let position = scene.world().position(id).unwrap();
        assert!((position.length() - 2.0).abs() < EPSILON);
        assert!((position.x - position.z).abs() < EPSILON);

        scene.input_mut().process_events(&[
            InputEvent::KeyUp(KeyCode::KeyW),
            InputEvent::KeyUp(KeyCode::KeyD),
        ]);
        scene.tick(Duration::from_secs(1));
        assert_eq!(scene.world().position(id).unwrap(), position);
    }

    #[test]
    fn missing_input_is_a_no_op() {
        let mut scene = Scene::new();
        let id = spawn_mover(&mut scene, None);

        scene.tick(Duration::from_secs(1));
        assert_eq!(scene.world().position(id), Some(Vec3::ZERO));
    }

    #[test]
    fn input_attached_after_start_is_ignored() {
        let mut scene = Scene::new();
        let id = spawn_mover(&mut scene, None);
        scene.tick(Duration::from_secs(1));

        scene
            .world_mut()
            .attach::<dyn MovementInput>(id, Box::new(FixedInput::new(1.0, 0.0)))
            .unwrap();
        scene.tick(Duration::from_secs(1));

        assert_eq!(scene.world().position(id), Some(Vec3::ZERO));
    }
}
