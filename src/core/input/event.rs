//=========================================================================
// Input Event Types
//=========================================================================
//
// Host-facing representation of raw input.
//
// The host (window layer, gamepad driver, test harness) converts its own
// events into these types and sends them to the engine. Only what the
// movement axes need is modelled: physical keys and analog axis values.
//
// Event Flow:
// ```text
// Host input layer
//         ↓
//    InputEvent (this module)
//         ↓
//    InputState (held keys + analog values)
//         ↓
//    Axis readings (Horizontal / Vertical in [-1, 1])
// ```
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the produced character, so
/// `KeyW` stays the "forward" key on non-QWERTY layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Movement Cluster -------------------------------------------------
    KeyW,
    KeyA,
    KeyS,
    KeyD,

    //--- Arrow Keys -------------------------------------------------------
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    //--- Special Keys -----------------------------------------------------
    Space,
    Escape,

    /// Fallback for keys the host could not map.
    Unidentified,
}

//=== Axis ================================================================

/// Named input axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left (-1) to right (+1).
    Horizontal,

    /// Back (-1) to forward (+1).
    Vertical,
}

//=== InputEvent ==========================================================

/// Low-level input event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Key pressed down.
    KeyDown(KeyCode),

    /// Key released.
    KeyUp(KeyCode),

    /// Analog axis moved (gamepad stick, virtual joystick).
    ///
    /// Values are clamped to `[-1, 1]` when read. Sending `0.0` hands the
    /// axis back to its key bindings.
    AxisMoved { axis: Axis, value: f32 },
}
