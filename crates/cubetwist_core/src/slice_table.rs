//! Generated quarter-turn data for each slice.

use std::collections::{BTreeMap, HashMap};

use strum::IntoEnumIterator;

use crate::cycle::{FourCycle, SliceCycle};
use crate::error::CubeError;
use crate::geometry::{self, Axis, Face, Vec3};
use crate::layout::{CubeLayout, PartCategory, Slot, Slots};

/// Cycles that make up a clockwise quarter turn of each individual slice.
///
/// The table is generated from the positions of every location, so the
/// same rules cover every layer count. Slices are indexed by axis and then by
/// layer, counting from the negative end of the axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceTwistTable {
    layer_count: u8,
    slices: [Vec<Vec<SliceCycle>>; 3],
}
impl SliceTwistTable {
    pub(crate) fn generate(layout: CubeLayout, slots: &Slots) -> Result<Self, CubeError> {
        let n = layout.layer_count();
        let lookup = PartCategory::iter()
            .map(|category| {
                let positions = slots[category]
                    .iter()
                    .enumerate()
                    .map(|(location, slot)| (slot.position, location))
                    .collect::<HashMap<Vec3, usize>>();
                (category, positions)
            })
            .collect::<HashMap<_, _>>();

        let mut slices: [Vec<Vec<SliceCycle>>; 3] = Default::default();
        for axis in Axis::iter() {
            for layer in 0..n as usize {
                let coordinate = geometry::layer_coordinate(layer, n);
                let mut cycles = vec![];
                for category in PartCategory::iter() {
                    cycles.extend(slice_cycles(
                        category,
                        &slots[category],
                        &lookup[&category],
                        axis,
                        coordinate,
                    )?);
                }
                slices[axis.index()].push(cycles);
            }
        }

        let ret = Self {
            layer_count: n,
            slices,
        };
        log::debug!(
            "generated slice twist table for {n} layers with {} cycles",
            ret.iter().map(|(_, _, cycles)| cycles.len()).sum::<usize>(),
        );
        Ok(ret)
    }

    /// Returns the number of layers along each axis.
    pub fn layer_count(&self) -> u8 {
        self.layer_count
    }

    /// Returns the cycles for a quarter turn of one slice, or an empty list if
    /// the layer does not exist.
    pub fn slice(&self, axis: Axis, layer: u8) -> &[SliceCycle] {
        self.slices[axis.index()]
            .get(layer as usize)
            .map_or(&[], |cycles| cycles.as_slice())
    }

    /// Returns an iterator over every slice as `(axis, layer, cycles)`.
    pub fn iter(&self) -> impl Iterator<Item = (Axis, u8, &[SliceCycle])> {
        Axis::iter().flat_map(move |axis| {
            self.slices[axis.index()]
                .iter()
                .enumerate()
                .map(move |(layer, cycles)| (axis, layer as u8, cycles.as_slice()))
        })
    }
}

/// Computes the cycles of one category for a quarter turn of the slice at
/// `coordinate` along `axis`.
fn slice_cycles(
    category: PartCategory,
    slots: &[Slot],
    lookup: &HashMap<Vec3, usize>,
    axis: Axis,
    coordinate: i32,
) -> Result<Vec<SliceCycle>, CubeError> {
    // Destination -> (source, orientation delta)
    let mut sources = BTreeMap::new();
    for (location, slot) in slots.iter().enumerate() {
        if slot.position[axis.index()] != coordinate {
            continue;
        }
        let destination = *lookup
            .get(&geometry::rotate_cw(slot.position, axis))
            .ok_or(CubeError::Geometry("slice turn leaves the surface"))?;
        let delta = orientation_delta(category, slot, &slots[destination], axis)?;
        sources.insert(destination, (location, delta));
    }

    let mut ret = vec![];
    let mut visited = vec![false; slots.len()];
    for &start in sources.keys() {
        if visited[start] {
            continue;
        }
        let (source, delta) = sources[&start];
        if source == start {
            if category != PartCategory::Side {
                return Err(CubeError::Geometry("only side parts can lie on a twist axis"));
            }
            visited[start] = true;
            ret.push(SliceCycle::Spin {
                location: start as u16,
                delta,
            });
            continue;
        }

        let mut locations = [0; 4];
        let mut deltas = [0; 4];
        let mut current = start;
        for i in 0..4 {
            let (source, delta) = *sources
                .get(&current)
                .ok_or(CubeError::Geometry("slice turn is not a permutation"))?;
            visited[current] = true;
            locations[i] = current as u16;
            deltas[i] = delta;
            current = source;
        }
        if current != start {
            return Err(CubeError::Geometry("quarter turn orbit is not a four-cycle"));
        }
        ret.push(SliceCycle::Four(FourCycle {
            category,
            locations,
            deltas,
        }));
    }
    Ok(ret)
}

/// Returns the orientation change of a part moving from `from` to `to` under a
/// clockwise quarter turn around `axis`.
///
/// Sticker `s` of a corner or edge with orientation `o` is on face
/// `faces[(s - o) mod k]`, so if the turn carries `from.faces[0]` onto
/// `to.faces[j]` the orientation changes by `-j`. A side with orientation
/// `o` has its marker 0 pointing along frame direction `-o`, so if the turn
/// carries direction 0 of the old face onto direction `k` of the new face
/// the orientation changes by `-k`.
fn orientation_delta(
    category: PartCategory,
    from: &Slot,
    to: &Slot,
    axis: Axis,
) -> Result<u8, CubeError> {
    let modulus = category.modulus() as usize;
    let first_face = *from
        .faces
        .first()
        .ok_or(CubeError::Geometry("location has no stickers"))?;
    let j = match category {
        PartCategory::Corner | PartCategory::Edge => {
            let face = Face::from_normal(geometry::rotate_cw(first_face.normal(), axis));
            to.faces.iter().position(|&f| Some(f) == face)
        }
        PartCategory::Side => {
            let marker = geometry::rotate_cw(first_face.frame()[0], axis);
            to.faces
                .first()
                .and_then(|f| f.frame().iter().position(|&d| d == marker))
        }
    }
    .ok_or(CubeError::Geometry("turned sticker does not match destination"))?;
    Ok(((modulus - j) % modulus) as u8)
}
