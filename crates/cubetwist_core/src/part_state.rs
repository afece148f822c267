use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::error::InvalidArgument;
use crate::layout::{CubeLayout, PartCategory};

/// Locations and orientations of the parts in one category.
///
/// Both arrays are indexed by location: `parts[l]` is the part at location
/// `l` and `orientations[l]` is that part's orientation.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct CategoryState {
    parts: Vec<u16>,
    orientations: Vec<u8>,
}
impl CategoryState {
    /// Constructs the solved state for `count` parts.
    pub fn solved(count: usize) -> Self {
        Self {
            parts: (0..count as u16).collect(),
            orientations: vec![0; count],
        }
    }

    /// Constructs a state from arrays indexed by location, validating that
    /// the locations form a permutation and the orientations are in range.
    pub fn new(
        category: PartCategory,
        parts: Vec<u16>,
        orientations: Vec<u8>,
    ) -> Result<Self, InvalidArgument> {
        let count = parts.len();
        if orientations.len() != count {
            return Err(InvalidArgument::StateLength {
                category: category.name(),
                expected: count,
                actual: orientations.len(),
            });
        }
        let mut seen = vec![false; count];
        for &part in &parts {
            match seen.get_mut(part as usize) {
                Some(slot @ false) => *slot = true,
                _ => {
                    return Err(InvalidArgument::NotAPermutation {
                        category: category.name(),
                    });
                }
            }
        }
        let modulus = category.modulus();
        if let Some((location, &orientation)) =
            orientations.iter().enumerate().find(|(_, o)| **o >= modulus)
        {
            return Err(InvalidArgument::Orientation {
                category: category.name(),
                location,
                orientation,
                modulus,
            });
        }
        Ok(Self {
            parts,
            orientations,
        })
    }

    /// Returns the number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns whether there are no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Returns the part at each location.
    pub fn parts(&self) -> &[u16] {
        &self.parts
    }

    /// Returns the orientation at each location.
    pub fn orientations(&self) -> &[u8] {
        &self.orientations
    }

    /// Returns the part at `location`.
    pub fn part_at(&self, location: usize) -> Option<usize> {
        self.parts.get(location).map(|&p| p as usize)
    }

    /// Returns the location of `part`.
    pub fn location_of(&self, part: usize) -> Option<usize> {
        self.parts.iter().position(|&p| p as usize == part)
    }

    /// Returns the orientation of the part at `location`.
    pub fn orientation_at(&self, location: usize) -> Option<u8> {
        self.orientations.get(location).copied()
    }

    /// Returns whether the part at `location` is the one that belongs there
    /// and has orientation 0.
    pub fn is_solved_at(&self, location: usize) -> bool {
        self.parts.get(location) == Some(&(location as u16))
            && self.orientations.get(location) == Some(&0)
    }

    /// Returns whether every part is at its home location with orientation
    /// 0.
    pub fn is_solved(&self) -> bool {
        (0..self.len()).all(|l| self.is_solved_at(l))
    }

    /// Rotates four locations: the part at `b` moves to `a`, `c` to `b`, `d`
    /// to `c`, and `a` to `d`. The orientation stored at the `i`th location
    /// becomes that of the incoming part plus `deltas[i]`.
    ///
    /// Locations are trusted; see [`crate::FourCycle`].
    pub(crate) fn four_cycle(&mut self, [a, b, c, d]: [usize; 4], deltas: [u8; 4], modulus: u8) {
        let part = self.parts[a];
        self.parts[a] = self.parts[b];
        self.parts[b] = self.parts[c];
        self.parts[c] = self.parts[d];
        self.parts[d] = part;

        let orientation = self.orientations[a];
        self.orientations[a] = (self.orientations[b] + deltas[0]) % modulus;
        self.orientations[b] = (self.orientations[c] + deltas[1]) % modulus;
        self.orientations[c] = (self.orientations[d] + deltas[2]) % modulus;
        self.orientations[d] = (orientation + deltas[3]) % modulus;
    }

    /// Adds `delta` to the orientation at `location` without moving the
    /// part.
    pub(crate) fn spin(&mut self, location: usize, delta: u8, modulus: u8) {
        self.orientations[location] = (self.orientations[location] + delta) % modulus;
    }

    /// Replaces this state with `self` permuted by `tx`: the new part at `l`
    /// is the one that was at `tx.parts[l]`, with `tx`'s orientation at `l`
    /// added to it.
    pub(crate) fn compose(&mut self, tx: &CategoryState, modulus: u8) {
        let (parts, orientations): (Vec<u16>, Vec<u8>) = tx
            .parts
            .iter()
            .zip(&tx.orientations)
            .map(|(&from, &delta)| {
                let from = from as usize;
                (
                    self.parts[from],
                    (self.orientations[from] + delta) % modulus,
                )
            })
            .unzip();
        self.parts = parts;
        self.orientations = orientations;
    }
}

/// Locations and orientations of every movable part of a cube.
///
/// The center part never moves and has no state.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct PartState {
    /// Corner state.
    pub(crate) corners: CategoryState,
    /// Edge state.
    pub(crate) edges: CategoryState,
    /// Side state.
    pub(crate) sides: CategoryState,
}
impl Index<PartCategory> for PartState {
    type Output = CategoryState;

    fn index(&self, category: PartCategory) -> &Self::Output {
        match category {
            PartCategory::Corner => &self.corners,
            PartCategory::Edge => &self.edges,
            PartCategory::Side => &self.sides,
        }
    }
}
impl IndexMut<PartCategory> for PartState {
    fn index_mut(&mut self, category: PartCategory) -> &mut Self::Output {
        match category {
            PartCategory::Corner => &mut self.corners,
            PartCategory::Edge => &mut self.edges,
            PartCategory::Side => &mut self.sides,
        }
    }
}
impl PartState {
    /// Constructs the solved state for a cube.
    pub fn solved(layout: CubeLayout) -> Self {
        Self {
            corners: CategoryState::solved(layout.count(PartCategory::Corner)),
            edges: CategoryState::solved(layout.count(PartCategory::Edge)),
            sides: CategoryState::solved(layout.count(PartCategory::Side)),
        }
    }

    /// Constructs a state from per-category states, validating that each
    /// has the size required by `layout`.
    pub fn new(
        layout: CubeLayout,
        corners: CategoryState,
        edges: CategoryState,
        sides: CategoryState,
    ) -> Result<Self, InvalidArgument> {
        let ret = Self {
            corners,
            edges,
            sides,
        };
        ret.check_layout(layout)?;
        Ok(ret)
    }

    /// Returns an error if the state does not have the size required by
    /// `layout`.
    pub fn check_layout(&self, layout: CubeLayout) -> Result<(), InvalidArgument> {
        for category in PartCategory::iter() {
            let expected = layout.count(category);
            let actual = self[category].len();
            if expected != actual {
                return Err(InvalidArgument::StateLength {
                    category: category.name(),
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }

    /// Returns an error if the state does not have the size required by
    /// `layout`, a location array is not a permutation, or an orientation is
    /// out of range.
    pub fn validate(&self, layout: CubeLayout) -> Result<(), InvalidArgument> {
        self.check_layout(layout)?;
        for category in PartCategory::iter() {
            let s = &self[category];
            CategoryState::new(category, s.parts.clone(), s.orientations.clone())?;
        }
        Ok(())
    }

    /// Returns whether every part is at its home location with orientation
    /// 0.
    pub fn is_solved(&self) -> bool {
        PartCategory::iter().all(|c| self[c].is_solved())
    }

    /// Returns whether the location arrays are permutations and the
    /// orientations are in range.
    pub fn is_valid(&self) -> bool {
        PartCategory::iter().all(|c| {
            let s = &self[c];
            CategoryState::new(c, s.parts.clone(), s.orientations.clone()).is_ok()
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_four_cycle_moves_parts_toward_first_location() {
        let mut s = CategoryState::solved(6);
        s.four_cycle([0, 1, 3, 2], [1, 2, 1, 2], 3);
        assert_eq!(&[1, 3, 0, 2, 4, 5], s.parts());
        // Orientation is indexed by location.
        assert_eq!(&[1, 2, 2, 1, 0, 0], s.orientations());
        assert_eq!(Some(2), s.location_of(0));
        assert_eq!(Some(3), s.part_at(1));
        assert!(!s.is_solved());
        assert!(s.is_solved_at(4));
    }

    #[test]
    fn test_four_cycle_order() {
        let mut s = CategoryState::solved(4);
        for _ in 0..4 {
            s.four_cycle([0, 1, 2, 3], [1, 1, 1, 1], 2);
        }
        assert!(s.is_solved());
    }

    #[test]
    fn test_spin() {
        let mut s = CategoryState::solved(6);
        s.spin(0, 3, 4);
        s.spin(0, 3, 4);
        assert_eq!(Some(2), s.orientation_at(0));
        assert_eq!(Some(0), s.part_at(0));
    }

    #[test]
    fn test_state_validation() {
        let c = PartCategory::Corner;
        assert!(CategoryState::new(c, vec![1, 0, 2], vec![0, 2, 1]).is_ok());
        assert_eq!(
            Err(InvalidArgument::NotAPermutation { category: "corner" }),
            CategoryState::new(c, vec![1, 1, 2], vec![0, 0, 0]),
        );
        assert_eq!(
            Err(InvalidArgument::NotAPermutation { category: "corner" }),
            CategoryState::new(c, vec![0, 1, 3], vec![0, 0, 0]),
        );
        assert_eq!(
            Err(InvalidArgument::Orientation {
                category: "corner",
                location: 1,
                orientation: 3,
                modulus: 3,
            }),
            CategoryState::new(c, vec![0, 1, 2], vec![0, 3, 0]),
        );
        assert!(CategoryState::new(c, vec![0, 1], vec![0]).is_err());
    }

    #[test]
    fn test_compose() {
        let mut s = CategoryState::new(PartCategory::Edge, vec![2, 0, 1], vec![1, 0, 0])
            .expect("valid state");
        let tx = CategoryState::new(PartCategory::Edge, vec![1, 2, 0], vec![0, 1, 1])
            .expect("valid state");
        s.compose(&tx, 2);
        assert_eq!(&[0, 1, 2], s.parts());
        assert_eq!(&[0, 1, 0], s.orientations());
    }

    #[test]
    fn test_solved_state_matches_layout() {
        let layout = CubeLayout::new(5).expect("valid layer count");
        let state = PartState::solved(layout);
        assert!(state.is_solved());
        assert!(state.is_valid());
        assert_eq!(Ok(()), state.check_layout(layout));
        assert_eq!(36, state[PartCategory::Edge].len());
        let other = CubeLayout::new(4).expect("valid layer count");
        assert!(state.check_layout(other).is_err());

        let mut bad = state.clone();
        bad.sides.orientations[3] = 4;
        assert!(!bad.is_valid());
        assert_eq!(
            Err(InvalidArgument::Orientation {
                category: "side",
                location: 3,
                orientation: 4,
                modulus: 4,
            }),
            bad.validate(layout),
        );
    }
}
