//=========================================================================
// Timer
//=========================================================================
//
// Running → Fired, once, by timeout or `detonate_early`.
//
// Firing raises the configured named event. Two independent flags add
// lifecycle effects:
//   destroy_on_end       destroy the entity after a timeout fire
//   detonate_on_destroy  raise the event again whenever the entity dies
//
// With both flags set a timeout raises the event twice: once on fire and
// once from the destruction it causes. Listeners relying on a single
// notification should not enable both.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::scene::{Behaviour, Context};
use crate::core::scheduler::TimerHandle;

//=== TimerConfig =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerConfig {
    pub duration: Duration,

    /// Event raised when the timer fires.
    pub event: String,

    pub destroy_on_end: bool,
    pub detonate_on_destroy: bool,
}

impl TimerConfig {
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = event.into();
        self
    }

    pub fn with_destroy_on_end(mut self, enabled: bool) -> Self {
        self.destroy_on_end = enabled;
        self
    }

    pub fn with_detonate_on_destroy(mut self, enabled: bool) -> Self {
        self.detonate_on_destroy = enabled;
        self
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(1),
            event: "on_timer_end".to_string(),
            destroy_on_end: false,
            detonate_on_destroy: false,
        }
    }
}

//=== TimerState ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Running,
    Fired,
}

//=== Timer ===============================================================

pub struct Timer {
    config: TimerConfig,
    state: TimerState,
    pending: Option<TimerHandle>,
}

impl Timer {
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            state: TimerState::Running,
            pending: None,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Fires now and stops the countdown.
    ///
    /// Does not destroy the entity, even with `destroy_on_end`. No-op once
    /// the timer has fired.
    pub fn detonate_early(&mut self, ctx: &mut Context<'_>) {
        if self.state == TimerState::Fired {
            debug!("Timer on entity {} already fired", ctx.entity);
            return;
        }

        self.fire(ctx);
        if let Some(pending) = self.pending.take() {
            ctx.cancel(pending);
        }
    }

    fn fire(&mut self, ctx: &mut Context<'_>) {
        self.state = TimerState::Fired;
        info!("Timer on entity {} fired {:?}", ctx.entity, self.config.event);
        ctx.fire(&self.config.event);
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new(TimerConfig::default())
    }
}

impl Behaviour for Timer {
    fn on_start(&mut self, ctx: &mut Context<'_>) {
        if self.state == TimerState::Running {
            self.pending = Some(ctx.schedule(self.config.duration));
        }
    }

    fn on_timer(&mut self, ctx: &mut Context<'_>, timer: TimerHandle) {
        if self.pending != Some(timer) {
            return;
        }
        self.pending = None;

        self.fire(ctx);
        if self.config.destroy_on_end {
            ctx.destroy_self();
        }
    }

    fn on_trigger(&mut self, ctx: &mut Context<'_>) {
        self.detonate_early(ctx);
    }

    fn on_destroy(&mut self, ctx: &mut Context<'_>) {
        if self.config.detonate_on_destroy {
            ctx.fire(&self.config.event);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
