//! Population state of a texture's backing storage

use std::cell::{Cell, RefCell};
use crate::texture::desc::Dimensions;
use crate::texture::range::TextureRangeDesc;

/// Lifecycle of a texture's backing storage
///
/// Transitions only move forward: `Unallocated -> Allocated -> Populated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PopulationState {
    /// No native storage exists yet
    Unallocated,
    /// Storage exists with defined extents, content may be undefined
    Allocated,
    /// Every mip level of every layer and face has been written at least once
    Populated,
}

/// Per-(mip level, slice) write tracking
///
/// A slice is one array layer of one cube face. Only writes that cover a
/// whole level of a slice count towards population.
#[derive(Debug)]
pub struct PopulationTracker {
    dimensions: Dimensions,
    num_mip_levels: u32,
    num_layers: u32,
    num_faces: u32,
    state: Cell<PopulationState>,
    written: RefCell<Vec<bool>>,
}

impl PopulationTracker {
    pub fn new(dimensions: Dimensions, num_mip_levels: u32, num_layers: u32, num_faces: u32) -> Self {
        let slots = num_mip_levels as usize * num_layers as usize * num_faces as usize;
        Self {
            dimensions,
            num_mip_levels,
            num_layers,
            num_faces,
            state: Cell::new(PopulationState::Unallocated),
            written: RefCell::new(vec![false; slots]),
        }
    }

    pub fn state(&self) -> PopulationState {
        self.state.get()
    }

    pub fn mark_allocated(&self) {
        if self.state.get() == PopulationState::Unallocated {
            self.state.set(PopulationState::Allocated);
        }
    }

    /// Mark every level of every slice written
    pub fn mark_all_populated(&self) {
        self.written.borrow_mut().fill(true);
        self.state.set(PopulationState::Populated);
    }

    /// Account for a successful write of `range`
    ///
    /// Writes to an unallocated texture are ignored.
    pub fn record_write(&self, range: &TextureRangeDesc) {
        if self.state.get() != PopulationState::Allocated {
            return;
        }
        if !self.covers_level(range) {
            return;
        }

        let mut written = self.written.borrow_mut();
        let last_level = (range.mip_level + range.num_mip_levels).min(self.num_mip_levels);
        let last_layer = (range.layer + range.num_layers).min(self.num_layers);
        let last_face = (range.face + range.num_faces).min(self.num_faces);
        for level in range.mip_level..last_level {
            for layer in range.layer..last_layer {
                for face in range.face..last_face {
                    let index = self.slot(level, layer, face);
                    written[index] = true;
                }
            }
        }

        if written.iter().all(|&w| w) {
            self.state.set(PopulationState::Populated);
        }
    }

    /// Whether `(mip_level, layer, face)` has received a whole-level write
    pub fn is_written(&self, mip_level: u32, layer: u32, face: u32) -> bool {
        if mip_level >= self.num_mip_levels || layer >= self.num_layers || face >= self.num_faces {
            return false;
        }
        self.written.borrow()[self.slot(mip_level, layer, face)]
    }

    fn slot(&self, level: u32, layer: u32, face: u32) -> usize {
        ((level * self.num_layers + layer) * self.num_faces + face) as usize
    }

    fn covers_level(&self, range: &TextureRangeDesc) -> bool {
        let level = self.dimensions.at_mip_level(range.mip_level);
        range.num_mip_levels == 1
            && range.x == 0
            && range.y == 0
            && range.z == 0
            && range.width == level.width
            && range.height == level.height
            && range.depth == level.depth
    }
}

#[cfg(test)]
#[path = "population_tests.rs"]
mod tests;
