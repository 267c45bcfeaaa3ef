//! UnifiedDevice - texture factory over host-addressable memory

use std::cell::RefCell;
use std::rc::Rc;
use rustc_hash::FxHashSet;
use texture_layer::texlayer::{BackendType, Capabilities, Config, Device, Result};
use texture_layer::texlayer::texture::{Texture, TextureDesc};
use texture_layer::texlayer_info;
use crate::unified_texture::UnifiedTexture;

const BACKEND: &str = "texlayer::unified";

/// Resource ids made visible to shaders
///
/// Ids start at 1 and are never reused while the device lives.
#[derive(Debug)]
pub(crate) struct ResidencySet {
    next_id: u64,
    resident: FxHashSet<u64>,
}

impl ResidencySet {
    fn new() -> Self {
        Self {
            next_id: 1,
            resident: FxHashSet::default(),
        }
    }

    pub(crate) fn acquire(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.resident.insert(id);
        id
    }

    pub(crate) fn release(&mut self, id: u64) {
        self.resident.remove(&id);
    }

    pub(crate) fn is_resident(&self, id: u64) -> bool {
        self.resident.contains(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.resident.len()
    }
}

pub(crate) type SharedResidency = Rc<RefCell<ResidencySet>>;

/// Unified-memory device
pub struct UnifiedDevice {
    caps: Rc<Capabilities>,
    config: Config,
    residency: SharedResidency,
}

impl UnifiedDevice {
    /// Create a device from an explicit capability set
    pub fn new(caps: Capabilities, config: Config) -> Self {
        texlayer_info!(
            &config.log_source(BACKEND),
            "Unified device ready, features {:?}",
            caps.features()
        );
        Self {
            caps: Rc::new(caps),
            config,
            residency: Rc::new(RefCell::new(ResidencySet::new())),
        }
    }

    /// Create a device with the capabilities the backend always has
    pub fn with_default_capabilities(bindless: bool, config: Config) -> Self {
        Self::new(crate::unified_format::probe_capabilities(bindless), config)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of textures currently holding a resident id
    pub fn resident_count(&self) -> usize {
        self.residency.borrow().len()
    }

    pub fn is_resident(&self, id: u64) -> bool {
        self.residency.borrow().is_resident(id)
    }

    /// Create a texture with its concrete type
    ///
    /// With `has_external_storage` no host memory is reserved: the texture
    /// only records the descriptor of storage an external producer owns.
    pub fn create_unified_texture(&self, desc: &TextureDesc, has_external_storage: bool) -> Result<UnifiedTexture> {
        UnifiedTexture::create(self.caps.clone(), self.residency.clone(), &self.config, desc, has_external_storage)
    }
}

impl Device for UnifiedDevice {
    fn backend_type(&self) -> BackendType {
        BackendType::UnifiedMemory
    }

    fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    fn create_texture(&self, desc: &TextureDesc, has_external_storage: bool) -> Result<Box<dyn Texture>> {
        Ok(Box::new(self.create_unified_texture(desc, has_external_storage)?))
    }
}
