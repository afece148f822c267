//! Cube state with twist, swipe, and query operations.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::LayerMaskUint;
use crate::error::{CubeError, InvalidArgument};
use crate::geometry::{Axis, Face};
use crate::layer_mask::LayerMask;
use crate::layout::{
    CORNER_FACES, CubeLayout, EDGE_ANGLES, EDGE_FACES, Location, Part, PartCategory, PartType,
    edge_row_axis,
};
use crate::part_state::{CategoryState, PartState};
use crate::swipe::{SwipeResolver, corrected_orientation};
use crate::tables::{CubeTables, cube_tables};
use crate::twist::{Twist, TwistDecomposer};

/// Cube shared between threads, such as a controller and a renderer.
///
/// Every operation on [`Cube`] takes `&mut self`, so a twist including its
/// notifications happens entirely while the lock is held.
pub type SharedCube = Arc<parking_lot::Mutex<Cube>>;

/// Notification sent to [`CubeListener`]s.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CubeEvent {
    /// Layer count of the cube that changed.
    pub layer_count: u8,
    /// Twist that was applied, or `None` if the state was replaced.
    pub twist: Option<Twist>,
}

/// Receiver of cube notifications.
pub trait CubeListener: Send + Sync {
    /// Called after a twist is applied.
    fn cube_twisted(&self, event: &CubeEvent) {
        self.cube_changed(event);
    }
    /// Called after the state changes in any way other than a twist.
    fn cube_changed(&self, event: &CubeEvent);
}

/// Where a movable part currently is.
#[derive(Debug, Copy, Clone)]
struct Placement {
    category: PartCategory,
    location: usize,
    orientation: u8,
}

/// Whole-cube orientation codes, indexed by orientation.
///
/// Entry `i` is `6 * f + r`, where `f` and `r` are the face-center parts at
/// the front and right locations when the whole cube is in orientation `i`.
pub(crate) const CUBE_ORIENTATION_CODES: [u8; 24] = [
    12, 24, 30, 6, 5, 33, 20, 13, 15, 16, 1, 9, //
    22, 2, 23, 4, 27, 19, 26, 29, 34, 31, 11, 8,
];

/// N-layer cube.
pub struct Cube {
    tables: Arc<CubeTables>,
    state: PartState,
    listeners: Vec<Arc<dyn CubeListener>>,
    quiet: bool,
}
impl fmt::Debug for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cube")
            .field("layer_count", &self.layer_count())
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .field("quiet", &self.quiet)
            .finish()
    }
}
impl Clone for Cube {
    /// Clones the state. Listeners are not copied.
    fn clone(&self) -> Self {
        Self {
            tables: Arc::clone(&self.tables),
            state: self.state.clone(),
            listeners: vec![],
            quiet: false,
        }
    }
}
impl PartialEq for Cube {
    fn eq(&self, other: &Self) -> bool {
        self.layer_count() == other.layer_count() && self.state == other.state
    }
}
impl Eq for Cube {}
impl Hash for Cube {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.layer_count().hash(state);
        self.state.hash(state);
    }
}
impl Cube {
    /// Constructs a solved cube with `layer_count` layers.
    pub fn new(layer_count: u8) -> Result<Self, CubeError> {
        let tables = cube_tables(layer_count)?;
        let state = PartState::solved(tables.layout);
        Ok(Self {
            tables,
            state,
            listeners: vec![],
            quiet: false,
        })
    }

    /// Wraps the cube in a lock for sharing between threads.
    pub fn into_shared(self) -> SharedCube {
        Arc::new(parking_lot::Mutex::new(self))
    }

    /// Returns the number of layers along each axis.
    pub fn layer_count(&self) -> u8 {
        self.tables.layer_count()
    }
    /// Returns the part numbering for the cube.
    pub fn layout(&self) -> CubeLayout {
        self.tables.layout
    }
    /// Returns the shared tables for the cube's size.
    pub fn tables(&self) -> &Arc<CubeTables> {
        &self.tables
    }
    /// Returns the current state.
    pub fn state(&self) -> &PartState {
        &self.state
    }
    /// Returns the state of one category.
    pub fn category_state(&self, category: PartCategory) -> &CategoryState {
        &self.state[category]
    }
    /// Returns the number of parts in a category.
    pub fn count(&self, category: PartCategory) -> usize {
        self.layout().count(category)
    }

    /// Adds a listener that is notified of every change.
    pub fn add_listener(&mut self, listener: Arc<dyn CubeListener>) {
        self.listeners.push(listener);
    }
    /// Removes a listener. Returns whether it was present.
    pub fn remove_listener(&mut self, listener: &Arc<dyn CubeListener>) -> bool {
        let len = self.listeners.len();
        self.listeners.retain(|l| !Arc::ptr_eq(l, listener));
        self.listeners.len() != len
    }
    /// Returns whether notifications are suppressed.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
    /// Suppresses or restores notifications. Leaving quiet mode sends a
    /// change notification.
    pub fn set_quiet(&mut self, quiet: bool) {
        let was_quiet = std::mem::replace(&mut self.quiet, quiet);
        if was_quiet && !quiet {
            self.notify_changed();
        }
    }

    fn notify_twisted(&self, twist: Twist) {
        if self.quiet {
            return;
        }
        let event = CubeEvent {
            layer_count: self.layer_count(),
            twist: Some(twist),
        };
        for listener in &self.listeners {
            listener.cube_twisted(&event);
        }
    }
    fn notify_changed(&self) {
        if self.quiet {
            return;
        }
        let event = CubeEvent {
            layer_count: self.layer_count(),
            twist: None,
        };
        for listener in &self.listeners {
            listener.cube_changed(&event);
        }
    }

    /// Twists the layers selected by `layers` around `axis` by `angle`
    /// clockwise quarter turns.
    ///
    /// A zero angle does nothing and sends no notification. An empty layer
    /// mask moves nothing but still notifies listeners of the twist.
    pub fn twist(
        &mut self,
        axis: i32,
        layers: LayerMaskUint,
        angle: i32,
    ) -> Result<(), CubeError> {
        let decomposer = TwistDecomposer::new(&self.tables.slices);
        let twist = decomposer.validate(axis, layers, angle)?;
        if twist.is_noop() {
            return Ok(());
        }
        log::trace!("applying twist {twist} to {}-layer cube", self.layer_count());
        decomposer.apply(twist, &mut self.state);
        self.notify_twisted(twist);
        Ok(())
    }
    /// Applies a twist. See [`Cube::twist()`].
    pub fn apply_twist(&mut self, twist: Twist) -> Result<(), CubeError> {
        self.twist(twist.axis.index() as i32, twist.layers.0, twist.angle.into())
    }

    /// Restores the solved state.
    pub fn reset(&mut self) {
        self.state = PartState::solved(self.layout());
        self.notify_changed();
    }
    /// Returns whether every part is home with orientation 0.
    pub fn is_solved(&self) -> bool {
        self.state.is_solved()
    }
    /// Returns every part that is not at its home location with orientation
    /// 0, in ascending order.
    pub fn unsolved_parts(&self) -> Vec<Part> {
        let layout = self.layout();
        let mut ret: Vec<Part> = PartCategory::iter()
            .flat_map(|category| {
                let s = &self.state[category];
                (0..s.len())
                    .filter(move |&l| !s.is_solved_at(l))
                    .filter_map(move |l| Some(layout.part(category, s.part_at(l)?)))
            })
            .collect();
        ret.sort();
        ret
    }

    /// Replaces the state, after checking that it is valid for this cube.
    pub fn set_state(&mut self, state: PartState) -> Result<(), CubeError> {
        state.validate(self.layout())?;
        self.state = state;
        self.notify_changed();
        Ok(())
    }
    /// Copies the state of another cube with the same layer count.
    pub fn set_to(&mut self, other: &Cube) -> Result<(), CubeError> {
        self.check_same_size(other)?;
        self.state = other.state.clone();
        self.notify_changed();
        Ok(())
    }
    /// Permutes this cube by the state of another cube with the same layer
    /// count.
    ///
    /// If `other` has part `p` at location `l`, then the part that was at
    /// location `p` moves to `l` and `other`'s orientation at `l` is added
    /// to it.
    pub fn transform_by(&mut self, other: &Cube) -> Result<(), CubeError> {
        self.check_same_size(other)?;
        for category in PartCategory::iter() {
            self.state[category].compose(&other.state[category], category.modulus());
        }
        self.notify_changed();
        Ok(())
    }
    fn check_same_size(&self, other: &Cube) -> Result<(), InvalidArgument> {
        if self.layer_count() != other.layer_count() {
            return Err(InvalidArgument::LayerCountMismatch {
                expected: self.layer_count(),
                actual: other.layer_count(),
            });
        }
        Ok(())
    }

    /// Returns the type of a part.
    pub fn part_type(&self, part: Part) -> Result<PartType, CubeError> {
        Ok(self.layout().split_part(part)?.0)
    }

    fn placement(&self, part: Part) -> Result<Option<Placement>, CubeError> {
        let (part_type, index) = self.layout().split_part(part)?;
        let Some(category) = part_type.category() else {
            return Ok(None);
        };
        let s = &self.state[category];
        let location = s
            .location_of(index)
            .ok_or(CubeError::Geometry("part is missing from state"))?;
        Ok(Some(Placement {
            category,
            location,
            orientation: s.orientation_at(location).unwrap_or(0),
        }))
    }

    /// Returns the current location of a part. The center is always at its
    /// own location.
    pub fn part_location(&self, part: Part) -> Result<Location, CubeError> {
        Ok(match self.placement(part)? {
            Some(p) => self.layout().location(p.category, p.location),
            None => Location(part.0),
        })
    }
    /// Returns the current orientation of a part. The center always has
    /// orientation 0.
    pub fn part_orientation(&self, part: Part) -> Result<u8, CubeError> {
        Ok(self.placement(part)?.map_or(0, |p| p.orientation))
    }
    /// Returns the part currently at a location.
    pub fn part_at(&self, location: Location) -> Result<Part, CubeError> {
        let layout = self.layout();
        let (part_type, index) = layout.split_location(location)?;
        let Some(category) = part_type.category() else {
            return Ok(layout.center_part());
        };
        let part = self.state[category]
            .part_at(index)
            .ok_or(CubeError::Geometry("location is missing from state"))?;
        Ok(layout.part(category, part))
    }

    /// Returns the placement of a part and which of its location's faces the
    /// given sticker is on, or `None` for the center.
    fn sticker(
        &self,
        part: Part,
        orientation: u8,
    ) -> Result<Option<(Placement, usize)>, CubeError> {
        let Some(p) = self.placement(part)? else {
            return Ok(None);
        };
        let sticker_count = p.category.sticker_count();
        if orientation >= sticker_count {
            return Err(InvalidArgument::StickerOrientation {
                orientation,
                sticker_count,
            }
            .into());
        }
        let slot = match p.category {
            PartCategory::Side => 0,
            _ => corrected_orientation(p.category, p.orientation, orientation) as usize,
        };
        Ok(Some((p, slot)))
    }

    /// Returns the face that a sticker of a part is currently on, or `None`
    /// for the center.
    pub fn part_face(&self, part: Part, orientation: u8) -> Result<Option<Face>, CubeError> {
        let Some((p, slot)) = self.sticker(part, orientation)? else {
            return Ok(None);
        };
        let row = p.location % p.category.row_count();
        Ok(match p.category {
            PartCategory::Corner => Some(CORNER_FACES[row][slot]),
            PartCategory::Edge => Some(EDGE_FACES[row][slot]),
            PartCategory::Side => Face::from_index(row),
        })
    }
    /// Returns the axis of the face a sticker is on. For edges, this is
    /// instead the axis along which the edge runs.
    pub fn part_axis(&self, part: Part, orientation: u8) -> Result<Option<Axis>, CubeError> {
        let Some((p, _)) = self.sticker(part, orientation)? else {
            return Ok(None);
        };
        match p.category {
            PartCategory::Edge => Ok(Some(edge_row_axis(p.location % 12))),
            _ => Ok(self.part_face(part, orientation)?.map(Face::axis)),
        }
    }
    /// Returns the clockwise twist sign of a sticker: `1` for stickers on the
    /// R, U, and F faces and `-1` on the L, D, and B faces. Edges use their
    /// own per-row signs. The center gives `0`.
    pub fn part_angle(&self, part: Part, orientation: u8) -> Result<i8, CubeError> {
        let Some((p, slot)) = self.sticker(part, orientation)? else {
            return Ok(0);
        };
        match p.category {
            PartCategory::Edge => Ok(EDGE_ANGLES[p.location % 12][slot]),
            _ => Ok(self.part_face(part, orientation)?.map_or(0, Face::sign)),
        }
    }
    /// Returns the layer mask of a part for a sticker.
    ///
    /// Corners and sides give the outer layer of the face the sticker is on.
    /// Edges give the layer containing the edge along its own axis. The
    /// center gives an empty mask.
    pub fn part_layer_mask(&self, part: Part, orientation: u8) -> Result<LayerMask, CubeError> {
        let Some((p, _)) = self.sticker(part, orientation)? else {
            return Ok(LayerMask::NONE);
        };
        let codec = &self.tables.codec;
        Ok(match p.category {
            PartCategory::Edge => {
                codec.layer_mask(p.category, p.location, edge_row_axis(p.location % 12))
            }
            _ => self
                .part_face(part, orientation)?
                .map_or(LayerMask::NONE, |face| codec.face_layer_mask(face)),
        })
    }

    /// Returns the twist designated by swiping a sticker, or `None` for the
    /// center.
    pub fn swipe(
        &self,
        part: Part,
        orientation: u8,
        direction: u8,
    ) -> Result<Option<Twist>, CubeError> {
        SwipeResolver::new(&self.tables).resolve(&self.state, part, orientation, direction)
    }
    /// Returns the axis of the twist designated by a swipe.
    pub fn part_swipe_axis(
        &self,
        part: Part,
        orientation: u8,
        direction: u8,
    ) -> Result<Option<Axis>, CubeError> {
        Ok(self.swipe(part, orientation, direction)?.map(|t| t.axis))
    }
    /// Returns the layer mask of the twist designated by a swipe.
    pub fn part_swipe_layer_mask(
        &self,
        part: Part,
        orientation: u8,
        direction: u8,
    ) -> Result<LayerMask, CubeError> {
        Ok(self
            .swipe(part, orientation, direction)?
            .map_or(LayerMask::NONE, |t| t.layers))
    }
    /// Returns the angle of the twist designated by a swipe.
    pub fn part_swipe_angle(
        &self,
        part: Part,
        orientation: u8,
        direction: u8,
    ) -> Result<i8, CubeError> {
        Ok(self.swipe(part, orientation, direction)?.map_or(0, |t| t.angle))
    }

    /// Returns which of the 24 rotations of the whole cube the face centers
    /// are in, or `None` if the cube has no fixed face centers.
    pub fn cube_orientation(&self) -> Option<u8> {
        if self.layer_count() % 2 == 0 {
            return None;
        }
        let sides = &self.state[PartCategory::Side];
        let front = sides.part_at(Face::F.index())?;
        let right = sides.part_at(Face::R.index())?;
        let code = (front * 6 + right) as u8;
        CUBE_ORIENTATION_CODES
            .iter()
            .position(|&c| c == code)
            .map(|i| i as u8)
    }
}
