//=========================================================================
// Area Damage
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;
use log::debug;

//=== Internal Dependencies ===============================================

use super::enemy::deal_damage;
use crate::core::world::World;

//=== AreaDamage ==========================================================

/// Fixed damage dealt to every receiver inside a sphere.
///
/// Attached as a plain component and looked up by its concrete type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaDamage {
    pub radius: f32,
    pub damage: u32,
}

impl AreaDamage {
    /// # Panics
    ///
    /// Panics if `radius` is negative or not finite.
    pub fn with_radius(mut self, radius: f32) -> Self {
        assert!(
            radius.is_finite() && radius >= 0.0,
            "Radius must be finite and non-negative, got {}",
            radius
        );
        self.radius = radius;
        self
    }

    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = damage;
        self
    }

    /// Damages every `dyn DamageReceiver` within `radius` of `center`
    /// (boundary included), each exactly once.
    ///
    /// Returns the number of receivers hit. Lethal hits destroy their
    /// entity immediately.
    pub fn apply_damage(&self, world: &mut World, center: Vec3) -> usize {
        let hit = world
            .overlap_sphere(center, self.radius)
            .into_iter()
            .filter_map(|id| deal_damage(world, id, self.damage))
            .count();

        debug!("Area damage at {} (r = {}) hit {} receiver(s)", center, self.radius, hit);
        hit
    }
}

impl Default for AreaDamage {
    fn default() -> Self {
        Self {
            radius: 5.0,
            damage: 10,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
