//=========================================================================
// Input State
//=========================================================================
//
// Raw axis input for movement behaviours.
//
// Architecture:
//   InputEvent → process_events() → held keys / analog values → axis(Axis)
//
// Responsibilities:
// - Track which keys are held (persistent across ticks)
// - Track the latest analog value per axis
// - Resolve an axis to a raw value: analog first, then key bindings
//
// Raw axes are not smoothed: a held key reads exactly ±1.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;

//=== External Dependencies ===============================================

use std::collections::{HashMap, HashSet};

use log::debug;

//=== Public API ==========================================================

pub use event::{Axis, InputEvent, KeyCode};

//=== AxisBinding =========================================================

/// Pair of keys driving an axis toward -1 and +1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxisBinding {
    pub negative: KeyCode,
    pub positive: KeyCode,
}

impl AxisBinding {
    pub const fn new(negative: KeyCode, positive: KeyCode) -> Self {
        Self { negative, positive }
    }
}

//=== InputState ==========================================================

/// Persistent input state shared by every behaviour of a scene.
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    analog: HashMap<Axis, f32>,
    bindings: HashMap<Axis, Vec<AxisBinding>>,
}

impl InputState {
    /// Creates an input state with the default bindings.
    ///
    /// - Horizontal: A/D and Left/Right
    /// - Vertical: S/W and Down/Up
    pub fn new() -> Self {
        let mut state = Self::unbound();
        state.bind_axis(Axis::Horizontal, AxisBinding::new(KeyCode::KeyA, KeyCode::KeyD));
        state.bind_axis(
            Axis::Horizontal,
            AxisBinding::new(KeyCode::ArrowLeft, KeyCode::ArrowRight),
        );
        state.bind_axis(Axis::Vertical, AxisBinding::new(KeyCode::KeyS, KeyCode::KeyW));
        state.bind_axis(Axis::Vertical, AxisBinding::new(KeyCode::ArrowDown, KeyCode::ArrowUp));
        state
    }

    /// Creates an input state without any key bindings.
    pub fn unbound() -> Self {
        Self {
            keys_down: HashSet::new(),
            analog: HashMap::new(),
            bindings: HashMap::new(),
        }
    }

    //--- Binding API ------------------------------------------------------

    /// Adds a key pair to an axis. Multiple pairs per axis are allowed.
    pub fn bind_axis(&mut self, axis: Axis, binding: AxisBinding) {
        let bindings = self.bindings.entry(axis).or_default();
        if !bindings.contains(&binding) {
            bindings.push(binding);
        }
    }

    /// Removes every key pair of an axis.
    pub fn unbind_axis(&mut self, axis: Axis) {
        self.bindings.remove(&axis);
    }

    //--- Event Processing -------------------------------------------------

    /// Applies a batch of host input events in order.
    pub fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(*event);
        }
    }

    fn process_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(KeyCode::Unidentified)
            | InputEvent::KeyUp(KeyCode::Unidentified) => {
                debug!("Ignoring unidentified key");
            }
            InputEvent::KeyDown(key) => {
                self.keys_down.insert(key);
            }
            InputEvent::KeyUp(key) => {
                self.keys_down.remove(&key);
            }
            InputEvent::AxisMoved { axis, value } => {
                if value == 0.0 || !value.is_finite() {
                    self.analog.remove(&axis);
                } else {
                    self.analog.insert(axis, value.clamp(-1.0, 1.0));
                }
            }
        }
    }

    //--- Query API --------------------------------------------------------

    /// Returns `true` while `key` is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Raw value of an axis in `[-1, 1]`.
    ///
    /// An active analog value wins over keys. Otherwise each bound pair
    /// contributes -1/+1 and opposing keys cancel out.
    pub fn axis(&self, axis: Axis) -> f32 {
        if let Some(&value) = self.analog.get(&axis) {
            return value;
        }

        let Some(bindings) = self.bindings.get(&axis) else {
            return 0.0;
        };

        let negative = bindings.iter().any(|b| self.is_key_down(b.negative));
        let positive = bindings.iter().any(|b| self.is_key_down(b.positive));

        match (negative, positive) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
