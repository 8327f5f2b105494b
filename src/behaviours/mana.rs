//=========================================================================
// Mana
//=========================================================================
//
// Spell casting against a narrow `ManaUser` capability.
//
// The spender never sees the caster's concrete type, only whether it can
// pay. What happens when a cost exceeds the pool is a `ManaPolicy` of the
// pool itself.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::world::{EntityId, World};

//=== ManaError ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManaError {
    /// The pool rejected a cost larger than what it holds.
    Insufficient { available: i32, cost: u32 },
}

impl fmt::Display for ManaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insufficient { available, cost } => {
                write!(f, "Insufficient mana: {} available, {} required", available, cost)
            }
        }
    }
}

impl std::error::Error for ManaError {}

//=== ManaUser ============================================================

/// Anything that can pay for spells.
pub trait ManaUser: Send {
    fn mana(&self) -> i32;

    /// Pays `cost` and returns the remaining mana.
    fn spend_mana(&mut self, cost: u32) -> Result<i32, ManaError>;
}

//=== ManaPolicy ==========================================================

/// What a pool does when a cost exceeds its mana.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManaPolicy {
    /// Subtract anyway; mana may go negative.
    AllowNegative,

    /// Subtract and floor at zero.
    #[default]
    ClampAtZero,

    /// Refuse the spend and leave mana untouched.
    RejectIfInsufficient,
}

//=== ManaPool ============================================================

/// Plain mana pool with a configurable shortfall policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManaPool {
    mana: i32,
    policy: ManaPolicy,
}

impl ManaPool {
    pub fn new(mana: i32, policy: ManaPolicy) -> Self {
        Self { mana, policy }
    }

    pub fn policy(&self) -> ManaPolicy {
        self.policy
    }
}

impl Default for ManaPool {
    fn default() -> Self {
        Self::new(100, ManaPolicy::default())
    }
}

impl ManaUser for ManaPool {
    fn mana(&self) -> i32 {
        self.mana
    }

    fn spend_mana(&mut self, cost: u32) -> Result<i32, ManaError> {
        let raw = self.mana.saturating_sub_unsigned(cost);

        self.mana = match self.policy {
            ManaPolicy::AllowNegative => raw,
            // A pool that already started below zero is never raised by a spend
            ManaPolicy::ClampAtZero => raw.max(self.mana.min(0)),
            ManaPolicy::RejectIfInsufficient if raw < 0 => {
                return Err(ManaError::Insufficient {
                    available: self.mana,
                    cost,
                });
            }
            ManaPolicy::RejectIfInsufficient => raw,
        };

        Ok(self.mana)
    }
}

//=== ManaSpender =========================================================

/// Casts spells by charging the caster's `dyn ManaUser` capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManaSpender;

impl ManaSpender {
    /// Charges `cost` to `caster`.
    ///
    /// Returns `Ok(None)` when the caster is gone or cannot use mana (a
    /// silent skip), `Ok(Some(remaining))` after a successful spend.
    pub fn cast_spell(
        &self,
        world: &mut World,
        caster: EntityId,
        cost: u32,
    ) -> Result<Option<i32>, ManaError> {
        let Some(user) = world.capability_mut::<dyn ManaUser>(caster) else {
            debug!("Entity {} cannot use mana; spell skipped", caster);
            return Ok(None);
        };

        let remaining = user.spend_mana(cost)?;
        info!("Entity {} cast a spell for {} mana, {} left", caster, cost, remaining);

        Ok(Some(remaining))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn caster(world: &mut World, pool: ManaPool) -> EntityId {
        let id = world.spawn("Caster", Vec3::ZERO);
        world.attach::<dyn ManaUser>(id, Box::new(pool)).unwrap();
        id
    }

    //=====================================================================
    // ManaPool Tests
    //=====================================================================

    #[test]
    fn clamp_policy_floors_at_zero() {
        let mut pool = ManaPool::new(10, ManaPolicy::ClampAtZero);

        assert_eq!(pool.spend_mana(4), Ok(6));
        assert_eq!(pool.spend_mana(9), Ok(0));
        assert_eq!(pool.spend_mana(1), Ok(0));
    }

    #[test]
    fn allow_negative_policy_goes_below_zero() {
        let mut pool = ManaPool::new(10, ManaPolicy::AllowNegative);

        assert_eq!(pool.spend_mana(15), Ok(-5));
        assert_eq!(pool.spend_mana(5), Ok(-10));
    }

    #[test]
    fn reject_policy_leaves_pool_untouched() {
        let mut pool = ManaPool::new(10, ManaPolicy::RejectIfInsufficient);

        assert_eq!(
            pool.spend_mana(11),
            Err(ManaError::Insufficient { available: 10, cost: 11 })
        );
        assert_eq!(pool.mana(), 10);
        assert_eq!(pool.spend_mana(10), Ok(0));
    }

    #[test]
    fn huge_costs_saturate() {
        let mut pool = ManaPool::new(0, ManaPolicy::AllowNegative);
        pool.spend_mana(u32::MAX).unwrap();
        pool.spend_mana(u32::MAX).unwrap();

        assert_eq!(pool.mana(), i32::MIN);
    }

    #[test]
    fn defaults() {
        let pool = ManaPool::default();
        assert_eq!(pool.mana(), 100);
        assert_eq!(pool.policy(), ManaPolicy::ClampAtZero);
    }

    //=====================================================================
    // ManaSpender Tests
    //=====================================================================

    #[test]
    fn cast_spell_charges_caster() {
        let mut world = World::new();
        let id = caster(&mut world, ManaPool::new(50, ManaPolicy::ClampAtZero));

        assert_eq!(ManaSpender.cast_spell(&mut world, id, 20), Ok(Some(30)));
        assert_eq!(world.capability::<dyn ManaUser>(id).unwrap().mana(), 30);
    }

    #[test]
    fn cast_spell_skips_non_mana_users() {
        let mut world = World::new();
        let rock = world.spawn("Rock", Vec3::ZERO);

        assert_eq!(ManaSpender.cast_spell(&mut world, rock, 20), Ok(None));
    }

    #[test]
    fn cast_spell_skips_dead_casters() {
        let mut world = World::new();
        let id = caster(&mut world, ManaPool::default());
        world.destroy(id);

        assert_eq!(ManaSpender.cast_spell(&mut world, id, 20), Ok(None));
    }

    #[test]
    fn cast_spell_reports_rejection() {
        let mut world = World::new();
        let id = caster(&mut world, ManaPool::new(5, ManaPolicy::RejectIfInsufficient));

        let error = ManaSpender.cast_spell(&mut world, id, 6).unwrap_err();
        assert_eq!(error.to_string(), "Insufficient mana: 5 available, 6 required");
    }
}
