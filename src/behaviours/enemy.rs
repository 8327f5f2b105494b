//=========================================================================
// Enemy Health
//=========================================================================
//
// Health bookkeeping behind the `DamageReceiver` capability, and the one
// place that turns a lethal hit into entity removal.
//
// `receive_damage` takes a `DamageToken` only this crate can build, so
// every hit goes through `deal_damage` and a lethal one always removes
// its entity.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::world::{EntityId, World};

//=== DamageReceiver ======================================================

/// Result of a single hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Health left after the hit.
    Survived(u32),

    /// Health reached zero.
    Killed,
}

/// Proof that a hit comes from [`deal_damage`].
///
/// Implementors receive it but cannot build one, so a receiver looked up
/// with `World::capability_mut` cannot be hit around the removal logic:
///
/// ```compile_fail
/// use scene_behaviours::behaviours::{DamageReceiver, DamageToken, Enemy};
///
/// let mut enemy = Enemy::default();
/// enemy.receive_damage(10, DamageToken::new());
/// ```
#[derive(Debug)]
pub struct DamageToken {
    _private: (),
}

impl DamageToken {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }
}

/// Anything that can take damage.
///
/// Hit receivers with [`deal_damage`].
pub trait DamageReceiver: Send {
    fn health(&self) -> u32;

    /// Subtracts `amount`, flooring health at zero.
    fn receive_damage(&mut self, amount: u32, token: DamageToken) -> DamageOutcome;
}

//=== Enemy ===============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyConfig {
    pub health: u32,
}

impl EnemyConfig {
    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health;
        self
    }
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self { health: 10 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enemy {
    health: u32,
}

impl Enemy {
    pub fn new(config: EnemyConfig) -> Self {
        Self { health: config.health }
    }
}

impl Default for Enemy {
    fn default() -> Self {
        Self::new(EnemyConfig::default())
    }
}

impl DamageReceiver for Enemy {
    fn health(&self) -> u32 {
        self.health
    }

    fn receive_damage(&mut self, amount: u32, _token: DamageToken) -> DamageOutcome {
        self.health = self.health.saturating_sub(amount);

        match self.health {
            0 => DamageOutcome::Killed,
            left => DamageOutcome::Survived(left),
        }
    }
}

//=== deal_damage =========================================================

/// Hits the `dyn DamageReceiver` of `target` and destroys the entity when
/// the hit is lethal.
///
/// Returns `None` if the target is gone or cannot take damage.
pub fn deal_damage(world: &mut World, target: EntityId, amount: u32) -> Option<DamageOutcome> {
    let outcome = world
        .capability_mut::<dyn DamageReceiver>(target)?
        .receive_damage(amount, DamageToken::new());

    match outcome {
        DamageOutcome::Survived(left) => {
            debug!("Entity {} took {} damage, {} health left", target, amount, left)
        }
        DamageOutcome::Killed => {
            info!("Entity {} killed by {} damage", target, amount);
            world.destroy(target);
        }
    }

    Some(outcome)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::{Behaviour, Context, EntityBuilder, Scene};
    use glam::Vec3;
    use std::time::Duration;

    fn spawn_enemy(world: &mut World, health: u32) -> EntityId {
        let id = world.spawn("Enemy", Vec3::ZERO);
        let enemy = Enemy::new(EnemyConfig::default().with_health(health));
        world.attach::<dyn DamageReceiver>(id, Box::new(enemy)).unwrap();
        id
    }

    #[test]
    fn default_health_is_ten() {
        assert_eq!(Enemy::default().health(), 10);
    }

    #[test]
    fn exact_lethal_damage_removes_enemy() {
        let mut world = World::new();
        let id = spawn_enemy(&mut world, 10);

        assert_eq!(deal_damage(&mut world, id, 10), Some(DamageOutcome::Killed));
        assert!(!world.contains(id));
        assert_eq!(world.take_destroyed(), vec![id]);
    }

    #[test]
    fn overkill_is_clamped_at_zero() {
        let mut enemy = Enemy::default();

        assert_eq!(enemy.receive_damage(15, DamageToken::new()), DamageOutcome::Killed);
        assert_eq!(enemy.health(), 0);
    }

    #[test]
    fn overkill_removes_enemy_once() {
        let mut world = World::new();
        let id = spawn_enemy(&mut world, 10);

        assert_eq!(deal_damage(&mut world, id, 15), Some(DamageOutcome::Killed));
        assert_eq!(deal_damage(&mut world, id, 15), None);
        assert_eq!(world.take_destroyed(), vec![id]);
    }

    #[test]
    fn health_never_drops_below_zero() {
        let mut enemy = Enemy::new(EnemyConfig::default().with_health(7));
        let hits = [0, 3, 1, 100, 2];

        for amount in hits {
            enemy.receive_damage(amount, DamageToken::new());
        }
        assert_eq!(enemy.health(), 0);
    }

    #[test]
    fn survivable_damage_keeps_entity() {
        let mut world = World::new();
        let id = spawn_enemy(&mut world, 10);

        assert_eq!(deal_damage(&mut world, id, 4), Some(DamageOutcome::Survived(6)));
        assert_eq!(deal_damage(&mut world, id, 0), Some(DamageOutcome::Survived(6)));
        assert!(world.contains(id));
    }

    #[test]
    fn non_receivers_are_skipped() {
        let mut world = World::new();
        let rock = world.spawn("Rock", Vec3::ZERO);

        assert_eq!(deal_damage(&mut world, rock, 10), None);
        assert!(world.contains(rock));
    }

    //--- Capability Lookup ------------------------------------------------

    /// Deals damage to another entity found through its capability.
    struct Striker {
        target: EntityId,
        amount: u32,
    }

    impl Behaviour for Striker {
        fn update(&mut self, ctx: &mut Context<'_>) {
            if ctx.world.capability::<dyn DamageReceiver>(self.target).is_some() {
                deal_damage(ctx.world, self.target, self.amount);
            }
        }
    }

    #[test]
    fn lethal_hit_through_capability_removes_entity_in_scene() {
        let mut scene = Scene::new();
        let enemy = scene.spawn(
            EntityBuilder::new("Enemy")
                .with_capability::<dyn DamageReceiver>(Box::new(Enemy::default())),
        );
        scene.spawn(EntityBuilder::new("Striker").with_behaviour(Striker {
            target: enemy,
            amount: 10,
        }));

        scene.tick(Duration::from_millis(16));

        assert!(!scene.world().contains(enemy));
        assert!(scene.world().capability::<dyn DamageReceiver>(enemy).is_none());
    }

    #[test]
    fn custom_receivers_are_removed_at_zero() {
        struct Barrel {
            health: u32,
        }

        impl DamageReceiver for Barrel {
            fn health(&self) -> u32 {
                self.health
            }

            fn receive_damage(&mut self, amount: u32, _token: DamageToken) -> DamageOutcome {
                self.health = self.health.saturating_sub(amount);
                match self.health {
                    0 => DamageOutcome::Killed,
                    left => DamageOutcome::Survived(left),
                }
            }
        }

        let mut world = World::new();
        let id = world.spawn("Barrel", Vec3::ZERO);
        world
            .attach::<dyn DamageReceiver>(id, Box::new(Barrel { health: 3 }))
            .unwrap();

        assert_eq!(deal_damage(&mut world, id, 2), Some(DamageOutcome::Survived(1)));
        assert_eq!(deal_damage(&mut world, id, 2), Some(DamageOutcome::Killed));
        assert!(!world.contains(id));
    }
}
