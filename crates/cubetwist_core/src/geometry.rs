//! Integer geometry of the cube.
//!
//! Positions use doubled, centered coordinates: layer `i` along an axis of an
//! `N`-layer cube sits at `2i - (N - 1)`. With this convention every quarter
//! turn maps integer points to integer points and the cube's center is the
//! origin.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// Integer vector in cube space.
pub(crate) type Vec3 = [i32; 3];

/// Axis of the cube.
#[derive(
    EnumIter, Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[repr(u8)]
pub enum Axis {
    /// X axis, from the left face to the right face.
    X = 0,
    /// Y axis, from the down face to the up face.
    Y = 1,
    /// Z axis, from the back face to the front face.
    Z = 2,
}
impl Axis {
    /// Returns the axis with the given index, if there is one.
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(Axis::X),
            1 => Some(Axis::Y),
            2 => Some(Axis::Z),
            _ => None,
        }
    }

    /// Returns the index of the axis (0, 1, or 2).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the lowercase name of the axis.
    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }

    /// Returns the two other axes in cyclic order, such that a clockwise
    /// quarter turn around `self` takes the second one to the first one.
    fn cyclic_successors(self) -> [Axis; 2] {
        use Axis::*;
        match self {
            X => [Y, Z],
            Y => [Z, X],
            Z => [X, Y],
        }
    }

    /// Returns the unit vector along the axis.
    pub(crate) fn unit_vec3(self) -> Vec3 {
        let mut ret = [0; 3];
        ret[self.index()] = 1;
        ret
    }
}

/// Face of the cube, numbered the way part locations refer to them.
#[derive(
    EnumIter, Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[repr(u8)]
pub enum Face {
    /// Right face (+X).
    R = 0,
    /// Up face (+Y).
    U = 1,
    /// Front face (+Z).
    F = 2,
    /// Left face (-X).
    L = 3,
    /// Down face (-Y).
    D = 4,
    /// Back face (-Z).
    B = 5,
}
impl Face {
    /// Returns the face with the given index, if there is one.
    pub fn from_index(index: usize) -> Option<Self> {
        Face::iter().nth(index)
    }

    /// Returns the index of the face (0 to 5).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the axis perpendicular to the face.
    pub fn axis(self) -> Axis {
        match self {
            Face::R | Face::L => Axis::X,
            Face::U | Face::D => Axis::Y,
            Face::F | Face::B => Axis::Z,
        }
    }

    /// Returns whether the face is on the positive end of its axis.
    pub fn is_positive(self) -> bool {
        matches!(self, Face::R | Face::U | Face::F)
    }

    /// Returns `1` for faces on the positive end of their axis and `-1`
    /// otherwise. This is also the clockwise twist direction of the face.
    pub fn sign(self) -> i8 {
        if self.is_positive() { 1 } else { -1 }
    }

    /// Returns the outward unit normal of the face.
    pub(crate) fn normal(self) -> Vec3 {
        scale(self.axis().unit_vec3(), self.sign() as i32)
    }

    /// Returns the face whose outward normal is `v`, if there is one.
    pub(crate) fn from_normal(v: Vec3) -> Option<Self> {
        Face::iter().find(|f| f.normal() == v)
    }

    /// Returns the four in-plane directions of the face, in clockwise order
    /// as seen from outside the cube.
    ///
    /// Direction `k` is where marker `k` of an unturned side part on this face
    /// points. The cells of the face are laid out in rows and columns with
    /// columns running along direction 2 and rows running along direction 3,
    /// so the first column is on the side of direction 0.
    pub(crate) fn frame(self) -> [Vec3; 4] {
        let first = match self {
            Face::R => [0, 0, -1],
            Face::U => [-1, 0, 0],
            Face::F => [0, -1, 0],
            Face::L => [0, 1, 0],
            Face::D => [0, 0, 1],
            Face::B => [1, 0, 0],
        };
        let mut ret = [first; 4];
        for k in 1..4 {
            ret[k] = rotate_face_cw(ret[k - 1], self);
        }
        ret
    }
}

/// Rotates `v` by a clockwise quarter turn around the positive end of `axis`.
pub(crate) fn rotate_cw(v: Vec3, axis: Axis) -> Vec3 {
    let [b, c] = axis.cyclic_successors();
    let mut ret = v;
    ret[b.index()] = v[c.index()];
    ret[c.index()] = -v[b.index()];
    ret
}

/// Rotates `v` by a clockwise quarter turn as seen from outside `face`.
pub(crate) fn rotate_face_cw(v: Vec3, face: Face) -> Vec3 {
    let turns = if face.is_positive() { 1 } else { 3 };
    (0..turns).fold(v, |v, _| rotate_cw(v, face.axis()))
}

/// Returns the cross product `a × b`.
#[cfg(test)]
pub(crate) fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Returns `v` scaled by `k`.
pub(crate) fn scale(v: Vec3, k: i32) -> Vec3 {
    v.map(|x| x * k)
}

/// Returns `a + b`.
pub(crate) fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

/// Returns the centered coordinate of `layer` on a cube with `layer_count`
/// layers.
pub(crate) fn layer_coordinate(layer: usize, layer_count: u8) -> i32 {
    2 * layer as i32 - (layer_count as i32 - 1)
}

/// Returns the layer containing the centered coordinate `x` on a cube with
/// `layer_count` layers.
pub(crate) fn coordinate_layer(x: i32, layer_count: u8) -> u8 {
    ((x + layer_count as i32 - 1) / 2) as u8
}
