//! Atomic permutation primitives.
//!
//! Every twist is a sequence of [`SliceCycle`]s. Applying one performs only
//! in-memory writes on the [`PartState`] and cannot fail, so the indices in a
//! cycle are trusted rather than checked. Cycles come from generated
//! [`crate::SliceTwistTable`]s.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::layout::PartCategory;
use crate::part_state::PartState;

/// Four locations in one category that are permuted cyclically.
///
/// The part at `locations[1]` moves to `locations[0]`, the part at
/// `locations[2]` to `locations[1]`, and so on around. `deltas[i]` is added
/// (modulo the category's orientation count) to the orientation of the part
/// that arrives at `locations[i]`.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FourCycle {
    /// Category of the permuted parts.
    pub category: PartCategory,
    /// Locations in cyclic order.
    pub locations: [u16; 4],
    /// Orientation deltas for the parts arriving at each location.
    pub deltas: [u8; 4],
}
impl FourCycle {
    /// Applies the cycle to `state`.
    pub fn apply(&self, state: &mut PartState) {
        state[self.category].four_cycle(
            self.locations.map(usize::from),
            self.deltas,
            self.category.modulus(),
        );
    }

    /// Returns the same cycle listed starting from its lowest location.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        let start = (0..4)
            .min_by_key(|&i| self.locations[i])
            .unwrap_or(0);
        self.locations.rotate_left(start);
        self.deltas.rotate_left(start);
        self
    }
}
impl fmt::Display for FourCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.locations;
        let [da, db, dc, dd] = self.deltas;
        write!(
            f,
            "{} ({a}, {b}, {c}, {d}) +({da}, {db}, {dc}, {dd})",
            self.category.name(),
        )
    }
}

/// One primitive step of a slice's quarter turn.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SliceCycle {
    /// Four parts trade places.
    Four(FourCycle),
    /// A side part on the twist axis turns in place.
    Spin {
        /// Location of the side part.
        location: u16,
        /// Orientation delta.
        delta: u8,
    },
}
impl SliceCycle {
    /// Applies the step to `state`.
    pub fn apply(&self, state: &mut PartState) {
        match self {
            SliceCycle::Four(cycle) => cycle.apply(state),
            SliceCycle::Spin { location, delta } => state[PartCategory::Side].spin(
                *location as usize,
                *delta,
                PartCategory::Side.modulus(),
            ),
        }
    }

    /// Returns the category of parts affected by the step.
    pub fn category(&self) -> PartCategory {
        match self {
            SliceCycle::Four(cycle) => cycle.category,
            SliceCycle::Spin { .. } => PartCategory::Side,
        }
    }

    /// Returns the four-cycle, if this is one.
    pub fn as_four_cycle(&self) -> Option<&FourCycle> {
        match self {
            SliceCycle::Four(cycle) => Some(cycle),
            SliceCycle::Spin { .. } => None,
        }
    }
}
impl fmt::Display for SliceCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliceCycle::Four(cycle) => write!(f, "{cycle}"),
            SliceCycle::Spin { location, delta } => write!(f, "side ({location}) +{delta}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::layout::CubeLayout;

    #[test]
    fn test_normalized() {
        let cycle = FourCycle {
            category: PartCategory::Edge,
            locations: [12, 1, 2, 16],
            deltas: [1, 0, 1, 0],
        };
        let expected = FourCycle {
            category: PartCategory::Edge,
            locations: [1, 2, 16, 12],
            deltas: [0, 1, 0, 1],
        };
        assert_eq!(expected, cycle.normalized());
        assert_eq!("edge (12, 1, 2, 16) +(1, 0, 1, 0)", cycle.to_string());
    }

    #[test]
    fn test_apply_touches_only_its_category() {
        let layout = CubeLayout::new(3).expect("valid layer count");
        let mut state = PartState::solved(layout);
        let cycle = SliceCycle::Four(FourCycle {
            category: PartCategory::Corner,
            locations: [0, 1, 3, 2],
            deltas: [1, 2, 1, 2],
        });
        cycle.apply(&mut state);
        assert_eq!(&[1, 3, 0, 2, 4, 5, 6, 7], state[PartCategory::Corner].parts());
        assert!(state[PartCategory::Edge].is_solved());

        SliceCycle::Spin {
            location: 0,
            delta: 3,
        }
        .apply(&mut state);
        assert_eq!(Some(3), state[PartCategory::Side].orientation_at(0));
        assert_eq!(PartCategory::Side, SliceCycle::Spin { location: 0, delta: 1 }.category());
    }
}
