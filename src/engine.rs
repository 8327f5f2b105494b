//=========================================================================
// Engine
//
// Fixed-timestep driver around a scene.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()/spawn()──>  [Loop @ TPS]
//         │                          │
//         ├─ with_tps()              ├─ init()   configure the scene
//         └─ with_channel_capacity() ├─ host()   hand out event senders
//                                    └─ step()   one manual tick
// ```
//
// Each tick:
//   1. Drain host events (bounded) and apply them to the scene
//   2. Tick the scene (start, update, timers)
//   3. Sleep the remainder of the tick (run/spawn only)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Sender};
use log::{error, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::host::{EventCollector, HostEvent, HostHandle, TickControl};
use crate::core::scene::Scene;

//=== Constants ===========================================================

/// Upper bound on host events applied in a single tick.
const MAX_EVENTS_PER_TICK: usize = 100;

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (scene ticks per second)
/// - **Channel capacity**: 128 host events
///
/// # Examples
///
/// ```no_run
/// use scene_behaviours::EngineBuilder;
///
/// let scene = EngineBuilder::new()
///     .with_tps(120.0)
///     .with_channel_capacity(256)
///     .build()
///     .init(|scene| {
///         // spawn entities, subscribe to events...
///     })
///     .run();
/// ```
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
        }
    }

    /// Sets the target ticks per second.
    ///
    /// The tick length handed to behaviours is always `1 / tps`, so the
    /// simulation stays deterministic even when the loop runs late.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps` is not a positive finite number.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0 && tps.is_finite(), "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the capacity of the host → engine event queue.
    ///
    /// Sends on a full queue fail with `HostError::Full` instead of
    /// blocking the host.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Builds the engine around an empty scene.
    pub fn build(self) -> Engine {
        info!("Building engine (TPS: {}, channel: {})", self.tps, self.channel_capacity);

        let (sender, receiver) = bounded(self.channel_capacity);

        Engine {
            scene: Scene::new(),
            collector: EventCollector::new(receiver, MAX_EVENTS_PER_TICK),
            sender,
            tick: Duration::from_secs_f64(1.0 / self.tps),
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Scene runtime driven at a fixed tick rate.
///
/// Create via [`EngineBuilder`]. Other threads reach the scene only through
/// [`HostHandle`]s obtained from [`Engine::host`].
pub struct Engine {
    scene: Scene,
    collector: EventCollector,
    sender: Sender<HostEvent>,
    tick: Duration,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Configures the scene before execution.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut Scene),
    {
        info!("Initializing scene");
        init_fn(&mut self.scene);
        self
    }

    /// Returns a new handle for sending host events to this engine.
    pub fn host(&self) -> HostHandle {
        HostHandle::new(self.sender.clone())
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Length of one tick.
    pub fn tick_duration(&self) -> Duration {
        self.tick
    }

    //--- Execution --------------------------------------------------------

    /// Runs a single tick of length `delta` without pacing.
    ///
    /// Host events queued before a `Shutdown` are still applied; the scene
    /// is not ticked once an exit has been requested.
    pub fn step(&mut self, delta: Duration) -> TickControl {
        Self::advance(&mut self.scene, &mut self.collector, delta)
    }

    /// Runs the fixed-timestep loop on the calling thread.
    ///
    /// Returns the scene once a `Shutdown` arrives or every [`HostHandle`]
    /// has been dropped.
    pub fn run(self) -> Scene {
        let Engine {
            mut scene,
            mut collector,
            sender,
            tick,
        } = self;

        // Only external handles keep the loop alive
        drop(sender);

        info!("Starting engine loop (tick: {:?})", tick);

        loop {
            let frame_start = Instant::now();

            if Self::advance(&mut scene, &mut collector, tick) == TickControl::Exit {
                break;
            }

            let elapsed = frame_start.elapsed();
            if elapsed < tick {
                thread::sleep(tick - elapsed);
            }
        }

        info!("Engine shutdown complete at {:?} scene time", scene.now());
        scene
    }

    /// Runs the loop on a background thread.
    ///
    /// Take the [`HostHandle`]s you need before calling this.
    pub fn spawn(self) -> thread::JoinHandle<Scene> {
        info!("Spawning engine thread");
        thread::spawn(move || self.run())
    }

    //--- Internal Helpers -------------------------------------------------

    fn advance(scene: &mut Scene, collector: &mut EventCollector, delta: Duration) -> TickControl {
        let control = collector.collect_frame();

        for event in collector.take_events() {
            Self::apply(scene, event);
        }

        if control == TickControl::Continue {
            scene.tick(delta);
        }

        control
    }

    fn apply(scene: &mut Scene, event: HostEvent) {
        match event {
            HostEvent::Input(events) => scene.input_mut().process_events(&events),
            HostEvent::Contact { a, b, kind } => {
                scene.apply_contact(a, b, kind);
            }
            HostEvent::Trigger(id) => {
                scene.trigger(id);
            }
            HostEvent::Destroy(id) => {
                if !scene.destroy(id) {
                    warn!("Host asked to destroy unknown entity {}", id);
                }
            }
            // Intercepted by the collector
            HostEvent::Shutdown => error!("Shutdown event reached the scene"),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
