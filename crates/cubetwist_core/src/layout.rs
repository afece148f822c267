//! Part numbering and location geometry.
//!
//! Parts and locations share one global numbering: corners first, then
//! edges, then sides, and finally the immobile center part. Within a
//! category, locations are grouped into _bands_ of identical rows:
//!
//! - corner location = row (`0..8`)
//! - edge location = `band * 12 + row`
//! - side location = `band * 6 + face`
//!
//! Bands are numbered from the middle of the cube outward so that the first
//! band exists on every cube that has the category at all.

use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};
use strum::{EnumIter, IntoEnumIterator};

use crate::error::{CubeError, IndexOutOfRange};
use crate::geometry::{self, Axis, Face, Vec3};
use crate::{MAX_LAYER_COUNT, MIN_LAYER_COUNT};

cube_index_struct! {
    /// Global part ID.
    pub struct Part(pub u16);
    /// Global location ID.
    pub struct Location(pub u16);
}

/// Category of parts that have a location and orientation.
#[derive(
    EnumIter, Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub enum PartCategory {
    /// Part with three stickers at a corner of the cube.
    Corner,
    /// Part with two stickers between two corners.
    Edge,
    /// Part with one sticker on the inside of a face.
    Side,
}
impl PartCategory {
    /// Returns the number of distinct orientations of a part in this
    /// category.
    pub fn modulus(self) -> u8 {
        match self {
            PartCategory::Corner => 3,
            PartCategory::Edge => 2,
            PartCategory::Side => 4,
        }
    }

    /// Returns the number of locations in one band of this category.
    pub fn row_count(self) -> usize {
        match self {
            PartCategory::Corner => 8,
            PartCategory::Edge => 12,
            PartCategory::Side => 6,
        }
    }

    /// Returns the number of stickers on a part in this category.
    pub fn sticker_count(self) -> u8 {
        match self {
            PartCategory::Corner => 3,
            PartCategory::Edge => 2,
            PartCategory::Side => 1,
        }
    }

    /// Returns the lowercase name of the category.
    pub fn name(self) -> &'static str {
        match self {
            PartCategory::Corner => "corner",
            PartCategory::Edge => "edge",
            PartCategory::Side => "side",
        }
    }
}

/// Type of a part, including the immobile center.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PartType {
    /// Corner part.
    Corner,
    /// Edge part.
    Edge,
    /// Side part.
    Side,
    /// The center part, which never moves.
    Center,
}
impl PartType {
    /// Returns the category of the part, or `None` for the center.
    pub fn category(self) -> Option<PartCategory> {
        match self {
            PartType::Corner => Some(PartCategory::Corner),
            PartType::Edge => Some(PartCategory::Edge),
            PartType::Side => Some(PartCategory::Side),
            PartType::Center => None,
        }
    }
}
impl From<PartCategory> for PartType {
    fn from(category: PartCategory) -> Self {
        match category {
            PartCategory::Corner => PartType::Corner,
            PartCategory::Edge => PartType::Edge,
            PartCategory::Side => PartType::Side,
        }
    }
}

/// Stickers of each corner row, in sticker order.
pub(crate) const CORNER_FACES: [[Face; 3]; 8] = {
    use Face::*;
    [
        [U, R, F], // urf
        [D, F, R], // dfr
        [U, B, R], // ubr
        [D, R, B], // drb
        [U, L, B], // ulb
        [D, B, L], // dbl
        [U, F, L], // ufl
        [D, L, F], // dlf
    ]
};

/// Stickers of each edge row, in sticker order.
pub(crate) const EDGE_FACES: [[Face; 2]; 12] = {
    use Face::*;
    [
        [U, R], // ur
        [R, F], // rf
        [D, R], // dr
        [B, U], // bu
        [R, B], // rb
        [B, D], // bd
        [U, L], // ul
        [L, B], // lb
        [D, L], // dl
        [F, U], // fu
        [L, F], // lf
        [F, D], // fd
    ]
};

/// Clockwise twist sign of each sticker of each edge row.
pub(crate) const EDGE_ANGLES: [[i8; 2]; 12] = [
    [1, -1],
    [1, -1],
    [-1, 1],
    [-1, 1],
    [-1, 1],
    [1, -1],
    [-1, 1],
    [1, -1],
    [1, -1],
    [1, -1],
    [-1, 1],
    [-1, 1],
];

/// Returns the axis along which edges in `row` run.
pub(crate) fn edge_row_axis(row: usize) -> Axis {
    let [a, b] = EDGE_FACES[row % 12];
    Axis::iter()
        .find(|&axis| axis != a.axis() && axis != b.axis())
        .unwrap_or(Axis::X)
}

/// Counts and numbering for a cube with a particular number of layers.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CubeLayout {
    layer_count: u8,
}
impl CubeLayout {
    /// Constructs the layout for a cube with `layer_count` layers.
    pub fn new(layer_count: u8) -> Result<Self, CubeError> {
        if !(MIN_LAYER_COUNT..=MAX_LAYER_COUNT).contains(&layer_count) {
            return Err(CubeError::LayerCount(layer_count));
        }
        Ok(Self { layer_count })
    }

    /// Returns the number of layers along each axis.
    pub fn layer_count(self) -> u8 {
        self.layer_count
    }

    /// Returns the number of inner layers along each axis.
    fn inner_layer_count(self) -> usize {
        self.layer_count as usize - 2
    }

    /// Returns the number of bands in a category.
    pub fn band_count(self, category: PartCategory) -> usize {
        let m = self.inner_layer_count();
        match category {
            PartCategory::Corner => 1,
            PartCategory::Edge => m,
            PartCategory::Side => m * m,
        }
    }

    /// Returns the number of parts (and locations) in a category.
    pub fn count(self, category: PartCategory) -> usize {
        category.row_count() * self.band_count(category)
    }

    /// Returns the global index of the first part in a category.
    pub fn offset(self, category: PartCategory) -> usize {
        PartCategory::iter()
            .take_while(|&c| c != category)
            .map(|c| self.count(c))
            .sum()
    }

    /// Returns the global ID of the center part, which is also the total
    /// number of parts with state.
    pub fn center_part(self) -> Part {
        Part(self.offset(PartCategory::Side) as u16 + self.count(PartCategory::Side) as u16)
    }

    /// Returns the total number of parts, including the center.
    pub fn part_count(self) -> usize {
        self.center_part().to_index() + 1
    }

    /// Returns the type of a part along with its index within its category.
    pub fn split_part(self, part: Part) -> Result<(PartType, usize), IndexOutOfRange> {
        self.split_index(part.to_index(), Part::TYPE_NAME)
    }

    /// Returns the category of a location along with its index within the
    /// category. The center's location contains the center part.
    pub fn split_location(self, location: Location) -> Result<(PartType, usize), IndexOutOfRange> {
        self.split_index(location.to_index(), Location::TYPE_NAME)
    }

    fn split_index(
        self,
        index: usize,
        type_name: &'static str,
    ) -> Result<(PartType, usize), IndexOutOfRange> {
        let mut start = 0;
        for category in PartCategory::iter() {
            let end = start + self.count(category);
            if index < end {
                return Ok((category.into(), index - start));
            }
            start = end;
        }
        if index == start {
            Ok((PartType::Center, 0))
        } else {
            Err(IndexOutOfRange {
                type_name,
                index,
                count: self.part_count(),
            })
        }
    }

    /// Returns the global part ID of a part within a category.
    pub fn part(self, category: PartCategory, index: usize) -> Part {
        Part((self.offset(category) + index) as u16)
    }

    /// Returns the global location ID of a location within a category.
    pub fn location(self, category: PartCategory, index: usize) -> Location {
        Location((self.offset(category) + index) as u16)
    }

    /// Returns an iterator over every part, including the center.
    pub fn parts(self) -> impl DoubleEndedIterator<Item = Part> + ExactSizeIterator {
        Part::iter(self.part_count())
    }

    /// Computes where every location of the cube is.
    pub(crate) fn slots(self) -> Slots {
        Slots::new(self)
    }
}

/// Physical position of one location and the faces its stickers are on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Slot {
    /// Centered position of the location.
    pub position: Vec3,
    /// Face of each sticker, in sticker order.
    pub faces: SmallVec<[Face; 3]>,
}

/// Physical positions of every location in each category.
#[derive(Debug, Clone)]
pub(crate) struct Slots {
    pub corners: Vec<Slot>,
    pub edges: Vec<Slot>,
    pub sides: Vec<Slot>,
}
impl std::ops::Index<PartCategory> for Slots {
    type Output = [Slot];

    fn index(&self, category: PartCategory) -> &Self::Output {
        match category {
            PartCategory::Corner => &self.corners,
            PartCategory::Edge => &self.edges,
            PartCategory::Side => &self.sides,
        }
    }
}
impl Slots {
    fn new(layout: CubeLayout) -> Self {
        let n = layout.layer_count;
        let m = layout.inner_layer_count();
        let outer = n as i32 - 1;

        let corners = CORNER_FACES
            .iter()
            .map(|faces| Slot {
                position: faces
                    .iter()
                    .fold([0; 3], |p, f| geometry::add(p, geometry::scale(f.normal(), outer))),
                faces: SmallVec::from_slice(faces),
            })
            .collect();

        let mut edges = Vec::with_capacity(layout.count(PartCategory::Edge));
        for band in 0..m {
            let along = geometry::layer_coordinate(band_position(m, band) + 1, n);
            for (row, faces) in EDGE_FACES.iter().enumerate() {
                let axis = edge_row_axis(row);
                let position = faces
                    .iter()
                    .fold(geometry::scale(axis.unit_vec3(), along), |p, f| {
                        geometry::add(p, geometry::scale(f.normal(), outer))
                    });
                edges.push(Slot {
                    position,
                    faces: SmallVec::from_slice(faces),
                });
            }
        }

        let mut sides = Vec::with_capacity(layout.count(PartCategory::Side));
        for [r, c] in side_cells(m) {
            for face in Face::iter() {
                let [_, _, col_dir, row_dir] = face.frame();
                let col = geometry::layer_coordinate(c + 1, n);
                let row = geometry::layer_coordinate(r + 1, n);
                let position = geometry::add(
                    geometry::scale(face.normal(), outer),
                    geometry::add(geometry::scale(col_dir, col), geometry::scale(row_dir, row)),
                );
                sides.push(Slot {
                    position,
                    faces: smallvec![face],
                });
            }
        }

        Self {
            corners,
            edges,
            sides,
        }
    }
}

/// Returns the position (`0..len`) of `band` along a row of `len` inner
/// cells. The middle comes first, then alternating outward starting with the
/// low side.
pub(crate) fn band_position(len: usize, band: usize) -> usize {
    if len % 2 == 1 {
        let mid = len / 2;
        match band {
            0 => mid,
            b if b % 2 == 1 => mid - (b + 1) / 2,
            b => mid + b / 2,
        }
    } else {
        let k = band / 2;
        if band % 2 == 0 {
            len / 2 - 1 - k
        } else {
            len / 2 + k
        }
    }
}

/// Returns the `[row, column]` cell of each side band on an `m×m` face grid.
///
/// The face center (for odd `m`) is band 0. After that, rings go from the
/// inside out. Each ring lists its corner orbit first and then the orbits
/// through its left column in [`band_position()`] order. Every orbit
/// contributes four consecutive bands, turning clockwise.
pub(crate) fn side_cells(m: usize) -> Vec<[usize; 2]> {
    let mut cells = Vec::with_capacity(m * m);
    if m % 2 == 1 {
        cells.push([m / 2, m / 2]);
    }
    for d in (0..m / 2).rev() {
        let len = m - 2 - 2 * d;
        let representatives =
            std::iter::once([d, d]).chain((0..len).map(|b| [d + 1 + band_position(len, b), d]));
        for mut cell in representatives {
            for _ in 0..4 {
                cells.push(cell);
                cell = [cell[1], m - 1 - cell[0]];
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_part_counts() {
        let layout = CubeLayout::new(6).expect("valid layer count");
        assert_eq!(8, layout.count(PartCategory::Corner));
        assert_eq!(48, layout.count(PartCategory::Edge));
        assert_eq!(96, layout.count(PartCategory::Side));
        assert_eq!(Part(152), layout.center_part());
        assert_eq!(153, layout.part_count());

        let layout = CubeLayout::new(2).expect("valid layer count");
        assert_eq!(0, layout.count(PartCategory::Edge));
        assert_eq!(0, layout.count(PartCategory::Side));
        assert_eq!(9, layout.part_count());

        assert_eq!(Err(CubeError::LayerCount(1)), CubeLayout::new(1));
        assert_eq!(Err(CubeError::LayerCount(33)), CubeLayout::new(33));
    }

    #[test]
    fn test_split_part() {
        let layout = CubeLayout::new(4).expect("valid layer count");
        assert_eq!(Ok((PartType::Corner, 7)), layout.split_part(Part(7)));
        assert_eq!(Ok((PartType::Edge, 0)), layout.split_part(Part(8)));
        assert_eq!(Ok((PartType::Side, 0)), layout.split_part(Part(32)));
        assert_eq!(Ok((PartType::Center, 0)), layout.split_part(Part(56)));
        assert!(layout.split_part(Part(57)).is_err());
        assert_eq!(Part(33), layout.part(PartCategory::Side, 1));
    }

    #[test]
    fn test_band_positions() {
        // Six layers: positions along an edge hold bands 2, 0, 1, 3.
        let order: Vec<usize> = (0..4).map(|b| band_position(4, b)).collect();
        assert_eq!(vec![1, 2, 0, 3], order);
        // Seven layers: positions along an edge hold bands 3, 1, 0, 2, 4.
        let order: Vec<usize> = (0..5).map(|b| band_position(5, b)).collect();
        assert_eq!(vec![2, 1, 3, 0, 4], order);
    }

    #[test]
    fn test_side_cells_six_layers() {
        let m = 4;
        let mut grid = vec![vec![usize::MAX; m]; m];
        for (band, [r, c]) in side_cells(m).into_iter().enumerate() {
            grid[r][c] = band;
        }
        let expected = vec![
            vec![4, 13, 9, 5],
            vec![8, 0, 1, 14],
            vec![12, 3, 2, 10],
            vec![7, 11, 15, 6],
        ];
        assert_eq!(expected, grid);
    }

    #[test]
    fn test_side_cells_cover_grid() {
        for m in 0..8 {
            let mut cells = side_cells(m);
            assert_eq!(m * m, cells.len());
            cells.sort();
            cells.dedup();
            assert_eq!(m * m, cells.len());
        }
    }

    #[test]
    fn test_slots_are_distinct_surface_points() {
        for layer_count in 2..=7 {
            let layout = CubeLayout::new(layer_count).expect("valid layer count");
            let slots = layout.slots();
            let outer = layer_count as i32 - 1;
            for category in PartCategory::iter() {
                assert_eq!(layout.count(category), slots[category].len());
                let mut positions: Vec<Vec3> =
                    slots[category].iter().map(|s| s.position).collect();
                positions.sort();
                positions.dedup();
                assert_eq!(layout.count(category), positions.len());
                for slot in &slots[category] {
                    let extremes = slot.position.iter().filter(|x| x.abs() == outer).count();
                    assert_eq!(category.sticker_count() as usize, extremes);
                    for face in &slot.faces {
                        assert_eq!(outer * face.sign() as i32, slot.position[face.axis().index()]);
                    }
                }
            }
        }
    }

    #[test]
    fn test_edge_row_axes() {
        let expected = [2, 1, 2, 0, 1, 0, 2, 1, 2, 0, 1, 0];
        for (row, &axis) in expected.iter().enumerate() {
            assert_eq!(axis, edge_row_axis(row).index());
        }
    }
}
