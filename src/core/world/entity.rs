//=========================================================================
// Entity Types
//=========================================================================
//
// Identity, placement and category data shared by every entity.
//
// - EntityId: generational handle, never aliases a newer entity
// - Layer / LayerMask: category tag and contact filters
// - Transform: world position
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use generational_arena::Index;
use glam::Vec3;

//=== EntityId ============================================================

/// Handle to an entity living in a [`World`](super::World).
///
/// Backed by a generational index: once an entity is destroyed its id
/// stays dead forever, even if the slot is reused by a later spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub(crate) Index);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "#{}v{}", slot, generation)
    }
}

//=== Layer ===============================================================

/// Category tag of an entity, used by contact filters.
///
/// Valid layers are `0..32`, one bit each in a [`LayerMask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Layer(u8);

impl Layer {
    /// Layer every entity starts on unless configured otherwise.
    pub const DEFAULT: Layer = Layer(0);

    /// Number of addressable layers.
    pub const COUNT: u8 = 32;

    /// Creates a layer, rejecting indices outside `0..32`.
    pub fn new(index: u8) -> Result<Self, LayerError> {
        if index < Self::COUNT {
            Ok(Self(index))
        } else {
            Err(LayerError::OutOfRange(index))
        }
    }

    /// Index of this layer.
    pub fn index(self) -> u8 {
        self.0
    }

    /// Single-bit mask for this layer.
    pub fn bit(self) -> u32 {
        1 << self.0
    }
}

impl Default for Layer {
    fn default() -> Self {
        Self::DEFAULT
    }
}

//=== LayerMask ===========================================================

/// Set of layers, one bit per layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayerMask(u32);

impl LayerMask {
    /// Matches nothing.
    pub const NONE: LayerMask = LayerMask(0);

    /// Matches every layer.
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// Builds a mask from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Builds a mask containing exactly the given layers.
    pub fn from_layers(layers: &[Layer]) -> Self {
        layers.iter().fold(Self::NONE, |mask, &layer| mask.with(layer))
    }

    /// Returns a copy of this mask that also contains `layer`.
    pub fn with(self, layer: Layer) -> Self {
        Self(self.0 | layer.bit())
    }

    /// Returns `true` if `layer` is part of this mask.
    pub fn contains(self, layer: Layer) -> bool {
        self.0 & layer.bit() != 0
    }

    /// Raw bit representation.
    pub fn bits(self) -> u32 {
        self.0
    }
}

//=== LayerError ==========================================================

/// Rejected layer construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerError {
    /// Index is not in `0..32`.
    OutOfRange(u8),
}

impl fmt::Display for LayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange(index) => {
                write!(f, "Layer index {} is out of range (max {})", index, Layer::COUNT - 1)
            }
        }
    }
}

impl std::error::Error for LayerError {}

//=== Transform ===========================================================

/// World-space placement of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub position: Vec3,
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self { position }
    }

    /// Moves the entity by `delta` in world space.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_accepts_valid_range() {
        assert_eq!(Layer::new(0).unwrap().index(), 0);
        assert_eq!(Layer::new(31).unwrap().index(), 31);
    }

    #[test]
    fn layer_rejects_out_of_range() {
        assert_eq!(Layer::new(32), Err(LayerError::OutOfRange(32)));
        assert_eq!(Layer::new(u8::MAX), Err(LayerError::OutOfRange(u8::MAX)));
    }

    #[test]
    fn layer_error_message_names_index() {
        let message = LayerError::OutOfRange(40).to_string();
        assert!(message.contains("40"));
    }

    #[test]
    fn mask_matches_shifted_bit() {
        let enemies = Layer::new(8).unwrap();
        let mask = LayerMask::from_bits(1 << 8);

        assert!(mask.contains(enemies));
        assert!(!mask.contains(Layer::DEFAULT));
    }

    #[test]
    fn mask_from_layers_combines_bits() {
        let a = Layer::new(1).unwrap();
        let b = Layer::new(4).unwrap();
        let mask = LayerMask::from_layers(&[a, b]);

        assert_eq!(mask.bits(), 0b10010);
        assert!(mask.contains(a));
        assert!(mask.contains(b));
        assert!(!mask.contains(Layer::new(2).unwrap()));
    }

    #[test]
    fn none_and_all_masks() {
        for index in 0..Layer::COUNT {
            let layer = Layer::new(index).unwrap();
            assert!(!LayerMask::NONE.contains(layer));
            assert!(LayerMask::ALL.contains(layer));
        }
    }

    #[test]
    fn transform_translate_accumulates() {
        let mut transform = Transform::from_position(Vec3::new(1.0, 0.0, 1.0));
        transform.translate(Vec3::new(0.5, 0.0, -2.0));
        transform.translate(Vec3::new(0.5, 0.0, 0.0));

        assert_eq!(transform.position, Vec3::new(2.0, 0.0, -1.0));
    }
}
