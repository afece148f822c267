//! Twist engine for N-layer cubes.
//!
//! The engine tracks where every corner, edge, and side part of an `N×N×N`
//! cube is and how it is oriented, applies layered twists to that state, and
//! resolves swipe gestures on individual stickers into the twist they
//! designate.
//!
//! Per-size data ([`CubeTables`]) is generated from the cube's geometry the
//! first time a size is requested and then shared by every [`Cube`] of that
//! size.

#[macro_use]
extern crate lazy_static;

#[macro_use]
mod macros;
mod cube;
mod cycle;
mod error;
mod geometry;
mod layer_mask;
mod layout;
mod part_state;
mod slice_table;
mod swipe;
mod tables;
mod twist;

#[cfg(test)]
mod tests;

pub use prelude::*;

/// Prelude of common imports.
pub mod prelude {
    pub use crate::LayerMaskUint;
    pub use crate::cube::{Cube, CubeEvent, CubeListener, SharedCube};
    pub use crate::cycle::{FourCycle, SliceCycle};
    pub use crate::error::{CubeError, IndexOutOfRange, InvalidArgument};
    pub use crate::geometry::{Axis, Face};
    pub use crate::layer_mask::{LayerMask, LayerMaskCodec};
    pub use crate::layout::{CubeLayout, Location, Part, PartCategory, PartType};
    pub use crate::part_state::{CategoryState, PartState};
    pub use crate::slice_table::SliceTwistTable;
    pub use crate::swipe::SwipeResolver;
    pub use crate::tables::{CubeTables, cube_tables};
    pub use crate::twist::{Twist, TwistDecomposer};
}

/// Unsigned integer type used for [`LayerMask`].
pub type LayerMaskUint = u32;

/// Smallest supported layer count.
pub const MIN_LAYER_COUNT: u8 = 2;
/// Largest supported layer count, limited by the width of [`LayerMaskUint`].
pub const MAX_LAYER_COUNT: u8 = LayerMaskUint::BITS as u8;

/// Version string such as `cubetwist_core v1.2.3`.
pub const ENGINE_VERSION_STRING: &str =
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));
