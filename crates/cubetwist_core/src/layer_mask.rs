use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::LayerMaskUint;
use crate::geometry::{self, Axis, Face};
use crate::layout::{CubeLayout, PartCategory, Slots};

/// Bitmask selecting a subset of a cube's layers along one axis.
///
/// Bit `i` selects the `i`th layer counting from the negative end of the
/// axis, so bit 0 is the L, D, or B slice.
#[derive(
    Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(transparent)]
pub struct LayerMask(pub LayerMaskUint);
impl LayerMask {
    /// Empty layer mask.
    pub const NONE: Self = Self(0);

    /// Returns a mask containing a single layer.
    pub fn from_layer(layer: u8) -> Self {
        Self(1 << layer)
    }

    /// Returns a mask containing all layers.
    pub fn all_layers(layer_count: u8) -> Self {
        Self(LayerMaskUint::MAX >> (LayerMaskUint::BITS - layer_count as u32))
    }

    /// Returns whether a layer is selected.
    pub fn contains(self, layer: u8) -> bool {
        self.0 >> layer & 1 != 0
    }

    /// Returns whether no layers are selected.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of selected layers.
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns an iterator over the selected layers, from bit 0 upward.
    pub fn layers(self) -> impl Iterator<Item = u8> {
        (0..LayerMaskUint::BITS as u8).filter(move |&i| self.contains(i))
    }
}
impl fmt::Display for LayerMask {
    /// Formats the mask as a set of 1-indexed layer ranges, such as `{1,3-4}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ranges = self
            .layers()
            .map(|l| l as u32 + 1)
            .chunk_by({
                let mut prev: Option<(u32, u32)> = None;
                move |&l| {
                    // Key each layer by the start of its contiguous run.
                    let start = match prev {
                        Some((p, start)) if p + 1 == l => start,
                        _ => l,
                    };
                    prev = Some((l, start));
                    start
                }
            })
            .into_iter()
            .map(|(start, run)| match run.last() {
                Some(end) if end != start => format!("{start}-{end}"),
                _ => start.to_string(),
            })
            .join(",");
        write!(f, "{{{ranges}}}")
    }
}

/// Layer index of every location along every axis.
///
/// The codec is a precomputed lookup array per category, indexed by
/// location. Because location numbers encode both the row and the band, a
/// lookup answers "which physical slice along this axis contains the part at
/// this band" without any per-band special cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerMaskCodec {
    layer_count: u8,
    corners: Vec<[u8; 3]>,
    edges: Vec<[u8; 3]>,
    sides: Vec<[u8; 3]>,
}
impl LayerMaskCodec {
    pub(crate) fn new(layout: CubeLayout, slots: &Slots) -> Self {
        let n = layout.layer_count();
        let layers_of = |category: PartCategory| -> Vec<[u8; 3]> {
            slots[category]
                .iter()
                .map(|slot| slot.position.map(|x| geometry::coordinate_layer(x, n)))
                .collect()
        };
        Self {
            layer_count: n,
            corners: layers_of(PartCategory::Corner),
            edges: layers_of(PartCategory::Edge),
            sides: layers_of(PartCategory::Side),
        }
    }

    fn table(&self, category: PartCategory) -> &[[u8; 3]] {
        match category {
            PartCategory::Corner => &self.corners,
            PartCategory::Edge => &self.edges,
            PartCategory::Side => &self.sides,
        }
    }

    /// Returns the layer containing a location along an axis, or `None` if
    /// the location does not exist.
    pub fn layer(&self, category: PartCategory, location: usize, axis: Axis) -> Option<u8> {
        Some(self.table(category).get(location)?[axis.index()])
    }

    /// Returns the single-layer mask of the slice containing a location along
    /// an axis, or an empty mask if the location does not exist.
    pub fn layer_mask(&self, category: PartCategory, location: usize, axis: Axis) -> LayerMask {
        self.layer(category, location, axis)
            .map_or(LayerMask::NONE, LayerMask::from_layer)
    }

    /// Returns the mask of the outermost layer on `face`.
    pub fn face_layer_mask(&self, face: Face) -> LayerMask {
        if face.is_positive() {
            LayerMask::from_layer(self.layer_count - 1)
        } else {
            LayerMask::from_layer(0)
        }
    }

    /// Returns every location of a category whose layer along `axis` is
    /// `layer`.
    pub fn locations_in_layer(
        &self,
        category: PartCategory,
        axis: Axis,
        layer: u8,
    ) -> impl Iterator<Item = usize> + '_ {
        self.table(category)
            .iter()
            .positions(move |layers| layers[axis.index()] == layer)
    }

    /// Returns the number of locations in each layer along each axis, for
    /// every category.
    pub fn layer_populations(&self) -> Vec<(PartCategory, Axis, Vec<usize>)> {
        PartCategory::iter()
            .cartesian_product(Axis::iter())
            .map(|(category, axis)| {
                let counts = (0..self.layer_count)
                    .map(|layer| self.locations_in_layer(category, axis, layer).count())
                    .collect();
                (category, axis, counts)
            })
            .collect()
    }
}
