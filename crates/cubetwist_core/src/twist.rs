//! Layered twists and their decomposition into slice cycles.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::LayerMaskUint;
use crate::cycle::SliceCycle;
use crate::error::InvalidArgument;
use crate::geometry::Axis;
use crate::layer_mask::LayerMask;
use crate::part_state::PartState;
use crate::slice_table::SliceTwistTable;

/// Twist of some layers around an axis.
///
/// A positive angle is clockwise as seen from the positive end of the axis.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Twist {
    /// Axis to twist around.
    pub axis: Axis,
    /// Layers to twist, counting from the negative end of the axis.
    pub layers: LayerMask,
    /// Number of clockwise quarter turns, from -2 to 2.
    pub angle: i8,
}
impl fmt::Display for Twist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:+}", self.axis.name(), self.layers, self.angle)
    }
}
impl Twist {
    /// Validates a raw twist request for a cube with `layer_count` layers.
    pub fn from_raw(
        axis: i32,
        layers: LayerMaskUint,
        angle: i32,
        layer_count: u8,
    ) -> Result<Self, InvalidArgument> {
        let axis = Axis::from_index(axis).ok_or(InvalidArgument::Axis(axis))?;
        if u64::from(layers) >> layer_count != 0 {
            return Err(InvalidArgument::LayerMask {
                mask: u64::from(layers),
                layer_count,
            });
        }
        if !(-2..=2).contains(&angle) {
            return Err(InvalidArgument::Angle(angle));
        }
        Ok(Self {
            axis,
            layers: LayerMask(layers),
            angle: angle as i8,
        })
    }

    /// Returns the inverse twist.
    #[must_use]
    pub fn rev(self) -> Self {
        Self {
            angle: -self.angle,
            ..self
        }
    }

    /// Returns whether the twist has a zero angle. Such twists are skipped
    /// entirely, without notifying anyone.
    pub fn is_noop(self) -> bool {
        self.angle == 0
    }

    /// Returns the number of clockwise quarter turns of each slice that
    /// realize the twist.
    pub fn quarter_turns(self) -> usize {
        match self.angle {
            1 => 1,
            -1 => 3,
            2 | -2 => 2,
            _ => 0,
        }
    }
}

/// Splits twists into the slice cycles that perform them.
///
/// Every twist is realized only by repeating clockwise quarter turns of
/// individual slices, from layer 0 upward.
#[derive(Debug, Copy, Clone)]
pub struct TwistDecomposer<'a> {
    slices: &'a SliceTwistTable,
}
impl<'a> TwistDecomposer<'a> {
    /// Constructs a decomposer for one layer count.
    pub fn new(slices: &'a SliceTwistTable) -> Self {
        Self { slices }
    }

    /// Validates a raw twist request.
    pub fn validate(
        &self,
        axis: i32,
        layers: LayerMaskUint,
        angle: i32,
    ) -> Result<Twist, InvalidArgument> {
        Twist::from_raw(axis, layers, angle, self.slices.layer_count())
    }

    /// Returns the cycles to apply, in order, to perform `twist`.
    pub fn decompose(&self, twist: Twist) -> impl Iterator<Item = &'a SliceCycle> + use<'a> {
        let slices = self.slices;
        let quarter_turns = twist.quarter_turns();
        twist.layers.layers().flat_map(move |layer| {
            (0..quarter_turns).flat_map(move |_| slices.slice(twist.axis, layer))
        })
    }

    /// Applies `twist` to `state`.
    pub fn apply(&self, twist: Twist, state: &mut PartState) {
        for cycle in self.decompose(twist) {
            cycle.apply(state);
        }
    }
}
