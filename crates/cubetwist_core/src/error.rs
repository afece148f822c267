//! Error types.

use thiserror::Error;

use crate::{MAX_LAYER_COUNT, MIN_LAYER_COUNT};

/// Error returned by cube operations.
///
/// Every operation validates its input before touching any state, so an
/// error always means that nothing was changed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
    /// An argument is outside its valid range.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
    /// A part or location index is out of range.
    #[error(transparent)]
    OutOfRange(#[from] IndexOutOfRange),
    /// The layer count is unsupported.
    #[error(
        "layer count {0} is not in the supported range {min}..={max}",
        min = MIN_LAYER_COUNT,
        max = MAX_LAYER_COUNT,
    )]
    LayerCount(u8),
    /// Generated geometry does not form a consistent puzzle.
    ///
    /// This indicates a bug in table generation.
    #[error("inconsistent cube geometry: {0}")]
    Geometry(&'static str),
}

/// Argument that is outside its valid range.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidArgument {
    /// Twist axis is not 0, 1, or 2.
    #[error("invalid twist axis {0}; expected 0, 1, or 2")]
    Axis(i32),
    /// Layer mask selects layers that the cube does not have.
    #[error("invalid layer mask {mask:#b} for a cube with {layer_count} layers")]
    LayerMask {
        /// Requested layer mask.
        mask: u64,
        /// Number of layers on the cube.
        layer_count: u8,
    },
    /// Twist angle is not in `-2..=2`.
    #[error("invalid twist angle {0}; expected -2..=2")]
    Angle(i32),
    /// Swipe direction is not in `0..4`.
    #[error("invalid swipe direction {0}; expected 0..4")]
    SwipeDirection(u8),
    /// Sticker orientation is not valid for the part.
    #[error("invalid sticker orientation {orientation} for a part with {sticker_count} stickers")]
    StickerOrientation {
        /// Requested orientation.
        orientation: u8,
        /// Number of stickers on the part.
        sticker_count: u8,
    },
    /// Two cubes do not have the same layer count.
    #[error("layer count {actual} does not match {expected}")]
    LayerCountMismatch {
        /// Layer count of the cube being modified.
        expected: u8,
        /// Layer count of the other cube.
        actual: u8,
    },
    /// A state assignment has the wrong number of entries.
    #[error("expected {expected} {category} entries, got {actual}")]
    StateLength {
        /// Part category name.
        category: &'static str,
        /// Number of parts in the category.
        expected: usize,
        /// Number of entries supplied.
        actual: usize,
    },
    /// A state assignment places two parts at the same location, or refers
    /// to a part that does not exist.
    #[error("{category} locations are not a permutation")]
    NotAPermutation {
        /// Part category name.
        category: &'static str,
    },
    /// A state assignment contains an orientation that is out of range.
    #[error("{category} orientation {orientation} at location {location} is not below {modulus}")]
    Orientation {
        /// Part category name.
        category: &'static str,
        /// Location of the offending entry.
        location: usize,
        /// Offending orientation.
        orientation: u8,
        /// Orientation modulus for the category.
        modulus: u8,
    },
}

/// Error when an index is out of bounds for a collection.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("{type_name} index {index} out of range; expected less than {count}")]
pub struct IndexOutOfRange {
    /// Name of the indexing type.
    pub type_name: &'static str,
    /// Requested index.
    pub index: usize,
    /// Number of valid indices.
    pub count: usize,
}
