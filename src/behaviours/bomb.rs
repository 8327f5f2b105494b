//=========================================================================
// Bomb
//=========================================================================
//
// Armed → Detonated, once.
//
// Triggers:
//   - the fuse timer scheduled at start comes due
//   - a trigger-kind contact with an entity on a layer in `contact_mask`
//   - an explicit host trigger
//
// Detonation applies the entity's `AreaDamage` component at the bomb's
// position and destroys the bomb, which cancels any timer it still owns.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::area_damage::AreaDamage;
use crate::core::scene::{Behaviour, Contact, ContactKind, Context};
use crate::core::scheduler::TimerHandle;
use crate::core::world::LayerMask;

//=== BombConfig ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BombConfig {
    /// Time from start to detonation.
    pub fuse: Duration,

    /// Layers that detonate the bomb on contact. Empty by default.
    pub contact_mask: LayerMask,
}

impl BombConfig {
    pub fn with_fuse(mut self, fuse: Duration) -> Self {
        self.fuse = fuse;
        self
    }

    pub fn with_contact_mask(mut self, mask: LayerMask) -> Self {
        self.contact_mask = mask;
        self
    }
}

impl Default for BombConfig {
    fn default() -> Self {
        Self {
            fuse: Duration::from_secs(3),
            contact_mask: LayerMask::NONE,
        }
    }
}

//=== BombState ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BombState {
    Armed,
    Detonated,
}

//=== Bomb ================================================================

pub struct Bomb {
    config: BombConfig,
    state: BombState,
    fuse: Option<TimerHandle>,
}

impl Bomb {
    pub fn new(config: BombConfig) -> Self {
        Self {
            config,
            state: BombState::Armed,
            fuse: None,
        }
    }

    pub fn state(&self) -> BombState {
        self.state
    }

    /// Handle of the running fuse, if it is still pending.
    pub fn fuse(&self) -> Option<TimerHandle> {
        self.fuse
    }

    /// Detonates now. A bomb detonates at most once.
    pub fn detonate(&mut self, ctx: &mut Context<'_>) {
        if self.state == BombState::Detonated {
            return;
        }
        self.state = BombState::Detonated;

        if let Some(fuse) = self.fuse.take() {
            ctx.cancel(fuse);
        }

        let area = ctx.world.capability::<AreaDamage>(ctx.entity).copied();
        match (area, ctx.position()) {
            (Some(area), Some(center)) => {
                let hit = area.apply_damage(ctx.world, center);
                info!("Bomb {} detonated at {}, {} receiver(s) hit", ctx.entity, center, hit);
            }
            _ => warn!("Bomb {} detonated without area damage", ctx.entity),
        }

        ctx.destroy_self();
    }
}

impl Default for Bomb {
    fn default() -> Self {
        Self::new(BombConfig::default())
    }
}

impl Behaviour for Bomb {
    fn on_start(&mut self, ctx: &mut Context<'_>) {
        if self.state == BombState::Armed {
            self.fuse = Some(ctx.schedule(self.config.fuse));
        }
    }

    fn on_timer(&mut self, ctx: &mut Context<'_>, timer: TimerHandle) {
        if self.fuse == Some(timer) {
            self.fuse = None;
            self.detonate(ctx);
        }
    }

    fn on_contact(&mut self, ctx: &mut Context<'_>, contact: &Contact) {
        let triggered = contact.kind == ContactKind::Trigger;
        if triggered && self.config.contact_mask.contains(contact.other_layer) {
            self.detonate(ctx);
        }
    }

    fn on_trigger(&mut self, ctx: &mut Context<'_>) {
        self.detonate(ctx);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
