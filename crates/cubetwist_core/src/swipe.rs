//! Resolution of swipe gestures on stickers into twists.
//!
//! A swipe is identified by the part that was touched, which of its stickers
//! was touched, and one of four screen-relative directions. Each sticker of
//! each row has a canonical gesture table giving the axis and angle for every
//! direction; the layer comes from where the part currently is.

use crate::LayerMaskUint;
use crate::error::{CubeError, InvalidArgument};
use crate::geometry::Axis;
use crate::layout::{Part, PartCategory};
use crate::part_state::PartState;
use crate::tables::CubeTables;
use crate::twist::Twist;

/// Canonical `(axis, layer mask, angle)` of a gesture.
///
/// The layer mask is the one for the smallest cube on which the row has a
/// distinct slice: three layers for corners, four layers (band 0) for edges.
/// Resolution always recomputes it from the part's location.
type Gesture = (u8, LayerMaskUint, i8);

/// Gestures of each corner row, by sticker and then direction.
#[rustfmt::skip]
const CORNER_GESTURES: [[[Gesture; 4]; 3]; 8] = [
    [[(2, 4, 1), (0, 4, -1), (2, 4, -1), (0, 4, 1)],
     [(1, 4, 1), (2, 4, -1), (1, 4, -1), (2, 4, 1)],
     [(0, 4, -1), (1, 4, 1), (0, 4, 1), (1, 4, -1)]],
    [[(0, 4, 1), (2, 4, -1), (0, 4, -1), (2, 4, 1)],
     [(1, 1, -1), (0, 4, -1), (1, 1, 1), (0, 4, 1)],
     [(2, 4, -1), (1, 1, -1), (2, 4, 1), (1, 1, 1)]],
    [[(0, 4, 1), (2, 1, 1), (0, 4, -1), (2, 1, -1)],
     [(1, 4, 1), (0, 4, -1), (1, 4, -1), (0, 4, 1)],
     [(2, 1, 1), (1, 4, 1), (2, 1, -1), (1, 4, -1)]],
    [[(2, 1, -1), (0, 4, -1), (2, 1, 1), (0, 4, 1)],
     [(1, 1, -1), (2, 1, 1), (1, 1, 1), (2, 1, -1)],
     [(0, 4, -1), (1, 1, -1), (0, 4, 1), (1, 1, 1)]],
    [[(2, 1, -1), (0, 1, 1), (2, 1, 1), (0, 1, -1)],
     [(1, 4, 1), (2, 1, 1), (1, 4, -1), (2, 1, -1)],
     [(0, 1, 1), (1, 4, 1), (0, 1, -1), (1, 4, -1)]],
    [[(0, 1, -1), (2, 1, 1), (0, 1, 1), (2, 1, -1)],
     [(1, 1, -1), (0, 1, 1), (1, 1, 1), (0, 1, -1)],
     [(2, 1, 1), (1, 1, -1), (2, 1, -1), (1, 1, 1)]],
    [[(0, 1, -1), (2, 4, -1), (0, 1, 1), (2, 4, 1)],
     [(1, 4, 1), (0, 1, 1), (1, 4, -1), (0, 1, -1)],
     [(2, 4, -1), (1, 4, 1), (2, 4, 1), (1, 4, -1)]],
    [[(2, 4, 1), (0, 1, 1), (2, 4, -1), (0, 1, -1)],
     [(1, 1, -1), (2, 4, -1), (1, 1, 1), (2, 4, 1)],
     [(0, 1, 1), (1, 1, -1), (0, 1, -1), (1, 1, 1)]],
];

/// Gestures of each edge row, by sticker and then direction.
#[rustfmt::skip]
const EDGE_GESTURES: [[[Gesture; 4]; 2]; 12] = [
    [[(2, 2, 1), (0, 8, -1), (2, 2, -1), (0, 8, 1)],
     [(2, 2, -1), (1, 8, -1), (2, 2, 1), (1, 8, 1)]],
    [[(1, 2, 1), (2, 8, -1), (1, 2, -1), (2, 8, 1)],
     [(1, 2, -1), (0, 8, -1), (1, 2, 1), (0, 8, 1)]],
    [[(2, 2, -1), (0, 8, -1), (2, 2, 1), (0, 8, 1)],
     [(2, 2, 1), (1, 1, 1), (2, 2, -1), (1, 1, -1)]],
    [[(0, 2, -1), (1, 8, -1), (0, 2, 1), (1, 8, 1)],
     [(0, 2, 1), (2, 1, 1), (0, 2, -1), (2, 1, -1)]],
    [[(1, 2, -1), (2, 1, 1), (1, 2, 1), (2, 1, -1)],
     [(1, 2, 1), (0, 8, -1), (1, 2, -1), (0, 8, 1)]],
    [[(0, 2, 1), (1, 1, 1), (0, 2, -1), (1, 1, -1)],
     [(0, 2, -1), (2, 1, 1), (0, 2, 1), (2, 1, -1)]],
    [[(2, 2, -1), (0, 1, 1), (2, 2, 1), (0, 1, -1)],
     [(2, 2, 1), (1, 8, -1), (2, 2, -1), (1, 8, 1)]],
    [[(1, 2, 1), (2, 1, 1), (1, 2, -1), (2, 1, -1)],
     [(1, 2, -1), (0, 1, 1), (1, 2, 1), (0, 1, -1)]],
    [[(2, 2, 1), (0, 1, 1), (2, 2, -1), (0, 1, -1)],
     [(2, 2, -1), (1, 1, 1), (2, 2, 1), (1, 1, -1)]],
    [[(0, 2, 1), (1, 8, -1), (0, 2, -1), (1, 8, 1)],
     [(0, 2, -1), (2, 8, -1), (0, 2, 1), (2, 8, 1)]],
    [[(1, 2, -1), (2, 8, -1), (1, 2, 1), (2, 8, 1)],
     [(1, 2, 1), (0, 1, 1), (1, 2, -1), (0, 1, -1)]],
    [[(0, 2, -1), (1, 1, 1), (0, 2, 1), (1, 1, -1)],
     [(0, 2, 1), (2, 8, -1), (0, 2, -1), (2, 8, 1)]],
];

/// `(axis, angle)` of each side row, by corrected direction.
///
/// Side masks depend on the band, so there is no canonical mask.
#[rustfmt::skip]
const SIDE_GESTURES: [[(u8, i8); 4]; 6] = [
    [(1, -1), (2, 1), (1, 1), (2, -1)],
    [(2, -1), (0, 1), (2, 1), (0, -1)],
    [(0, -1), (1, 1), (0, 1), (1, -1)],
    [(2, 1), (1, -1), (2, -1), (1, 1)],
    [(0, 1), (2, -1), (0, -1), (2, 1)],
    [(1, 1), (0, -1), (1, -1), (0, 1)],
];

/// Returns which canonical sticker (or, for sides, which canonical
/// direction) a touch corresponds to, given the part's current orientation.
///
/// For corners and edges `touched` is the sticker index; for sides it is
/// the swipe direction.
pub(crate) fn corrected_orientation(category: PartCategory, orientation: u8, touched: u8) -> u8 {
    let k = category.modulus();
    match category {
        PartCategory::Corner | PartCategory::Edge => (k - orientation % k + touched) % k,
        PartCategory::Side => (k - orientation % k + touched % k) % k,
    }
}

/// Returns whether a corner's gesture angle is negated for the part's
/// current orientation and the corrected sticker.
pub(crate) fn corner_angle_flipped(orientation: u8, corrected: u8) -> bool {
    match orientation {
        1 => matches!(corrected, 1 | 2),
        2 => matches!(corrected, 0 | 2),
        _ => false,
    }
}

/// Resolves swipes on a cube of one size.
#[derive(Debug, Copy, Clone)]
pub struct SwipeResolver<'a> {
    tables: &'a CubeTables,
}
impl<'a> SwipeResolver<'a> {
    /// Constructs a resolver for one layer count.
    pub fn new(tables: &'a CubeTables) -> Self {
        Self { tables }
    }

    /// Returns the twist designated by swiping sticker `orientation` of
    /// `part` in `direction`, or `None` for the center part.
    ///
    /// Returns an error if the part does not exist, the direction is not in
    /// `0..4`, or the part does not have the sticker. Side parts have only
    /// sticker 0.
    pub fn resolve(
        &self,
        state: &PartState,
        part: Part,
        orientation: u8,
        direction: u8,
    ) -> Result<Option<Twist>, CubeError> {
        let layout = self.tables.layout;
        let (part_type, index) = layout.split_part(part)?;
        if direction >= 4 {
            return Err(InvalidArgument::SwipeDirection(direction).into());
        }
        let Some(category) = part_type.category() else {
            return Ok(None);
        };
        if orientation >= category.sticker_count() {
            return Err(InvalidArgument::StickerOrientation {
                orientation,
                sticker_count: category.sticker_count(),
            }
            .into());
        }

        let location = state[category]
            .location_of(index)
            .ok_or(CubeError::Geometry("part is missing from state"))?;
        let current = state[category].orientation_at(location).unwrap_or(0);
        let row = location % category.row_count();

        let (axis, angle) = match category {
            PartCategory::Corner => {
                let sticker = corrected_orientation(category, current, orientation);
                let (axis, _, angle) = CORNER_GESTURES[row][sticker as usize][direction as usize];
                let angle = if corner_angle_flipped(current, sticker) {
                    -angle
                } else {
                    angle
                };
                (axis, angle)
            }
            PartCategory::Edge => {
                let sticker = corrected_orientation(category, current, orientation);
                let (axis, _, angle) = EDGE_GESTURES[row][sticker as usize][direction as usize];
                (axis, angle)
            }
            PartCategory::Side => {
                let corrected = corrected_orientation(category, current, direction);
                SIDE_GESTURES[row][corrected as usize]
            }
        };
        let axis = Axis::from_index(axis.into())
            .ok_or(CubeError::Geometry("gesture table has an invalid axis"))?;
        let layers = self.tables.codec.layer_mask(category, location, axis);

        let twist = Twist {
            axis,
            layers,
            angle,
        };
        log::trace!(
            "swipe on {} {index} at location {location} \
             (sticker {orientation}, direction {direction}) resolved to {twist}",
            category.name(),
        );
        Ok(Some(twist))
    }
}
