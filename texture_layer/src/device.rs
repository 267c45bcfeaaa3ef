//! Device trait - texture factory of one native context

use crate::capabilities::Capabilities;
use crate::error::Result;
use crate::texture::{Texture, TextureDesc};

/// Native backend family of a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendType {
    /// GL-family API with mutable image specification and optional immutable storage
    OpenGl,
    /// Host-visible unified memory with explicit row pitches
    UnifiedMemory,
}

/// Device trait
///
/// Created once per native context. Every texture created by a device uses
/// the capability set the device was built with.
pub trait Device {
    fn backend_type(&self) -> BackendType;

    /// Capability set shared by every texture of this device
    fn capabilities(&self) -> &Capabilities;

    /// Create and allocate a texture
    ///
    /// # Arguments
    ///
    /// * `desc` - Texture descriptor
    /// * `has_external_storage` - Backing store is attached by an external
    ///   producer: only validate the descriptor and create the handle
    ///
    /// # Returns
    ///
    /// A texture in the `Allocated` or `Populated` state
    fn create_texture(&self, desc: &TextureDesc, has_external_storage: bool) -> Result<Box<dyn Texture>>;
}
