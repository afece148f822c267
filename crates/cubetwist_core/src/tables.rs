//! Per-size tables shared by every cube with the same layer count.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::CubeError;
use crate::layer_mask::LayerMaskCodec;
use crate::layout::CubeLayout;
use crate::slice_table::SliceTwistTable;

/// Immutable data for one layer count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeTables {
    /// Part counts and numbering.
    pub layout: CubeLayout,
    /// Layer of every location along every axis.
    pub codec: LayerMaskCodec,
    /// Quarter-turn cycles of every slice.
    pub slices: SliceTwistTable,
}
impl CubeTables {
    /// Generates the tables for a cube with `layer_count` layers.
    ///
    /// Prefer [`cube_tables()`], which caches the result.
    pub fn generate(layer_count: u8) -> Result<Self, CubeError> {
        let layout = CubeLayout::new(layer_count)?;
        let slots = layout.slots();
        Ok(Self {
            layout,
            codec: LayerMaskCodec::new(layout, &slots),
            slices: SliceTwistTable::generate(layout, &slots)?,
        })
    }

    /// Returns the number of layers along each axis.
    pub fn layer_count(&self) -> u8 {
        self.layout.layer_count()
    }
}

/// Returns the tables for a cube with `layer_count` layers, generating them
/// the first time each size is requested.
pub fn cube_tables(layer_count: u8) -> Result<Arc<CubeTables>, CubeError> {
    lazy_static! {
        static ref CACHE: Mutex<HashMap<u8, Arc<CubeTables>>> = Mutex::new(HashMap::new());
    }

    let mut cache = CACHE.lock();
    if let Some(tables) = cache.get(&layer_count) {
        return Ok(Arc::clone(tables));
    }
    let tables = Arc::new(CubeTables::generate(layer_count)?);
    cache.insert(layer_count, Arc::clone(&tables));
    Ok(tables)
}
