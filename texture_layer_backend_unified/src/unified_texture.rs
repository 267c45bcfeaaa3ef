//! UnifiedTexture - texture stored in host-addressable memory
//!
//! The whole mip chain lives in one allocation made at creation. Each mip
//! level holds its slices back to back (layers outer, cube faces inner),
//! and every slice is laid out with the native row pitch of its level.
//! Uploads and readbacks copy one row at a time between that layout and the
//! caller's stride.

use std::cell::{Cell, RefCell};
use std::num::NonZeroU64;
use std::rc::Rc;
use texture_layer::texlayer::{Capabilities, Config, DeviceFeatures, Result, TextureFormatCapabilities};
use texture_layer::texlayer::texture::{
    check_upload_size, Dimensions, PopulationState, PopulationTracker, ResidentHandle, Texture,
    TextureCubeFace, TextureDesc, TextureFormat, TextureFormatProperties, TextureRangeDesc, TextureType,
    TextureUsage,
};
use texture_layer::{texlayer_bail, texlayer_bail_warn, texlayer_debug, texlayer_trace};
use crate::unified_device::SharedResidency;
use crate::unified_format::{self, NativePixelFormat};

const BACKEND: &str = "texlayer::unified";

fn check_dimensionality(caps: &Capabilities, texture_type: TextureType, samples: u32, source: &str) -> Result<()> {
    let needed = match texture_type {
        TextureType::OneD => DeviceFeatures::TEXTURE_1D,
        TextureType::OneDArray => DeviceFeatures::TEXTURE_1D | DeviceFeatures::TEXTURE_ARRAY,
        TextureType::TwoDArray => DeviceFeatures::TEXTURE_ARRAY,
        TextureType::ThreeD => DeviceFeatures::TEXTURE_3D,
        TextureType::TwoD | TextureType::Cube | TextureType::ExternalImage => DeviceFeatures::empty(),
    };
    let needed = if samples > 1 { needed | DeviceFeatures::MULTISAMPLE } else { needed };
    if !caps.has_feature(needed) {
        texlayer_bail!(
            source,
            Unsupported,
            "{:?} textures with {} samples need {:?}",
            texture_type, samples, needed.difference(caps.features())
        );
    }
    Ok(())
}

/// Format capability bits a usage needs
fn capabilities_for(usage: TextureUsage) -> TextureFormatCapabilities {
    let mut caps = TextureFormatCapabilities::empty();
    if usage.contains(TextureUsage::SAMPLED) {
        caps |= TextureFormatCapabilities::SAMPLED;
    }
    if usage.contains(TextureUsage::STORAGE) {
        caps |= TextureFormatCapabilities::STORAGE;
    }
    if usage.contains(TextureUsage::ATTACHMENT) {
        caps |= TextureFormatCapabilities::ATTACHMENT;
    }
    caps
}

/// Unified-memory texture
pub struct UnifiedTexture {
    caps: Rc<Capabilities>,
    residency: SharedResidency,
    log_source: String,
    desc: TextureDesc,
    native_format: Option<NativePixelFormat>,
    /// Byte offset of each mip level, empty for external storage
    level_offsets: Vec<usize>,
    storage: RefCell<Vec<u8>>,
    population: PopulationTracker,
    resident: Cell<Option<NonZeroU64>>,
    /// Storage owned by an external producer, never host-accessible
    external: bool,
}

impl UnifiedTexture {
    pub(crate) fn create(
        caps: Rc<Capabilities>,
        residency: SharedResidency,
        config: &Config,
        desc: &TextureDesc,
        has_external_storage: bool,
    ) -> Result<Self> {
        let log_source = config.log_source(BACKEND);
        desc.validate()?;

        if has_external_storage || desc.texture_type == TextureType::ExternalImage {
            let texture = Self {
                native_format: unified_format::to_native(desc.format),
                population: Self::tracker(desc),
                caps,
                residency,
                log_source,
                desc: desc.clone(),
                level_offsets: Vec::new(),
                storage: RefCell::new(Vec::new()),
                resident: Cell::new(None),
                external: true,
            };
            texture.population.mark_allocated();
            texlayer_debug!(
                &texture.log_source,
                "Attached external storage for '{}' {}x{} ({:?})",
                desc.debug_name, desc.width, desc.height, desc.format
            );
            return Ok(texture);
        }

        let render_target_only = desc.texture_type == TextureType::TwoD && desc.num_mip_levels > 1;
        if !desc.usage.intersects(TextureUsage::SAMPLED | TextureUsage::STORAGE) && !render_target_only {
            texlayer_bail_warn!(
                &log_source,
                ArgumentInvalid,
                "Texture '{}': usage {:?} must include SAMPLED or STORAGE",
                desc.debug_name, desc.usage
            );
        }

        check_dimensionality(&caps, desc.texture_type, desc.num_samples, &log_source)?;

        let usage_for_format = if desc.usage.contains(TextureUsage::STORAGE) {
            desc.usage
        } else {
            desc.usage | TextureUsage::SAMPLED
        };
        let required = capabilities_for(usage_for_format);
        let native_format = match unified_format::to_native(desc.format) {
            Some(native) if caps.format_capabilities(desc.format).contains(required) => native,
            _ => {
                texlayer_bail!(
                    &log_source,
                    Unsupported,
                    "Texture '{}': format {:?} has no native equivalent with {:?} on this device",
                    desc.debug_name, desc.format, required
                );
            }
        };

        let props = desc.format.properties();
        let faces = if desc.texture_type == TextureType::Cube { 6 } else { 1 };
        let mut level_offsets = Vec::with_capacity(desc.num_mip_levels as usize);
        let mut total = 0;
        for level in 0..desc.num_mip_levels {
            level_offsets.push(total);
            let slice = props.bytes_per_layer(&level_slice_range(desc.dimensions(), level));
            total += slice * desc.num_layers as usize * faces;
        }
        total *= desc.num_samples as usize;

        let texture = Self {
            population: Self::tracker(desc),
            caps,
            residency,
            log_source,
            desc: desc.clone(),
            native_format: Some(native_format),
            level_offsets,
            storage: RefCell::new(vec![0u8; total]),
            resident: Cell::new(None),
            external: false,
        };

        // Zero-filled memory counts as written unless compressed content
        // cannot be placed into the chain at all
        texture.population.mark_allocated();
        let compressed_writable = texture
            .caps
            .format_capabilities(desc.format)
            .contains(TextureFormatCapabilities::COMPRESSED_UPLOAD_STORAGE);
        if !props.is_compressed() || compressed_writable {
            texture.population.mark_all_populated();
        } else {
            texlayer_debug!(
                &texture.log_source,
                "Skipping initialization of '{}': {} cannot be uploaded into immutable storage",
                desc.debug_name, props.name
            );
        }

        texlayer_debug!(
            &texture.log_source,
            "Created {:?} texture '{}' {}x{}x{} ({:?} as {:?}, {} levels, {} bytes), state {:?}",
            desc.texture_type, desc.debug_name, desc.width, desc.height, desc.depth,
            desc.format, native_format, desc.num_mip_levels, total, texture.population.state()
        );
        Ok(texture)
    }

    fn tracker(desc: &TextureDesc) -> PopulationTracker {
        let faces = if desc.texture_type == TextureType::Cube { 6 } else { 1 };
        PopulationTracker::new(desc.dimensions(), desc.num_mip_levels, desc.num_layers, faces)
    }

    // ===== ACCESSORS =====

    /// Native pixel format (`None` for external images without one)
    pub fn native_format(&self) -> Option<NativePixelFormat> {
        self.native_format
    }

    pub fn debug_name(&self) -> &str {
        &self.desc.debug_name
    }

    /// Native bytes per row of `mip_level`
    pub fn bytes_per_row(&self, mip_level: u32) -> usize {
        let level = self.desc.dimensions().at_mip_level(mip_level);
        self.properties().bytes_per_row(level.width)
    }

    /// Size of the host allocation in bytes
    pub fn allocated_bytes(&self) -> usize {
        self.storage.borrow().len()
    }

    /// Copy `range` out of the texture into `out`, with rows `bytes_per_row` apart
    ///
    /// Uses the same layout rules as [`Texture::upload`]: a stride of 0 means
    /// tightly packed rows and `range` must address a single mip level.
    pub fn read_bytes(&self, range: &TextureRangeDesc, out: &mut [u8], bytes_per_row: usize) -> Result<()> {
        if range.num_mip_levels > 1 {
            texlayer_bail_warn!(
                &self.log_source,
                Unimplemented,
                "Reading more than 1 mip level is not supported ({} requested)",
                range.num_mip_levels
            );
        }
        self.check_host_access("read back")?;
        self.validate_range(range)?;
        check_upload_size(&self.properties(), range, out, bytes_per_row)?;

        let storage = self.storage.borrow();
        self.for_each_row(range, bytes_per_row, |native, client, len| {
            out[client..client + len].copy_from_slice(&storage[native..native + len]);
        });
        Ok(())
    }

    // ===== COPY =====

    /// Reject textures whose content is not host-addressable
    fn check_host_access(&self, verb: &str) -> Result<()> {
        if self.external {
            texlayer_bail_warn!(
                &self.log_source,
                InvalidOperation,
                "Texture '{}' is backed by external storage and cannot be {}",
                self.desc.debug_name, verb
            );
        }
        if self.desc.num_samples > 1 {
            texlayer_bail_warn!(
                &self.log_source,
                Unsupported,
                "Texture '{}' is multisampled and cannot be {}",
                self.desc.debug_name, verb
            );
        }
        Ok(())
    }

    fn slice_offset(&self, props: &TextureFormatProperties, level: u32, layer: u32, face: u32) -> usize {
        let slice = props.bytes_per_layer(&level_slice_range(self.desc.dimensions(), level));
        let index = (layer * self.num_faces() + face) as usize;
        self.level_offsets[level as usize] + index * slice
    }

    /// Visit every row of `range` as (native offset, client offset, row bytes)
    ///
    /// Client rows are ordered layer, then face, then depth slice, then row.
    fn for_each_row(&self, range: &TextureRangeDesc, bytes_per_row: usize, mut copy: impl FnMut(usize, usize, usize)) {
        let props = self.properties();
        let level = self.desc.dimensions().at_mip_level(range.mip_level);

        let row_pitch = props.bytes_per_row(level.width);
        let image_pitch = row_pitch * props.rows(&TextureRangeDesc::new_2d(0, 0, level.width, level.height));
        let tight_row = props.bytes_per_row(range.width);
        let client_stride = if bytes_per_row == 0 { tight_row } else { bytes_per_row };
        let rows = props.rows(&TextureRangeDesc::new_2d(0, 0, range.width, range.height));

        let x_bytes = (range.x / props.block_width as u32) as usize * props.bytes_per_block as usize;
        let first_row = (range.y / props.block_height as u32) as usize;

        let mut client_row = 0;
        for layer in range.layer..range.layer + range.num_layers {
            for face in range.face..range.face + range.num_faces {
                let slice = self.slice_offset(&props, range.mip_level, layer, face);
                for z in range.z..range.z + range.depth {
                    let image = slice + z as usize * image_pitch;
                    for row in 0..rows {
                        let native = image + (first_row + row) * row_pitch + x_bytes;
                        copy(native, client_row * client_stride, tight_row);
                        client_row += 1;
                    }
                }
            }
        }
    }

    fn write(&self, range: &TextureRangeDesc, data: &[u8], bytes_per_row: usize) -> Result<()> {
        self.check_host_access("uploaded to")?;
        if self.properties().is_compressed()
            && !self
                .caps
                .format_capabilities(self.desc.format)
                .contains(TextureFormatCapabilities::COMPRESSED_UPLOAD_STORAGE)
        {
            texlayer_bail!(
                &self.log_source,
                Unsupported,
                "Texture '{}': compressed {:?} data cannot be uploaded on this device",
                self.desc.debug_name, self.desc.format
            );
        }
        self.validate_range(range)?;
        check_upload_size(&self.properties(), range, data, bytes_per_row)?;

        {
            let mut storage = self.storage.borrow_mut();
            self.for_each_row(range, bytes_per_row, |native, client, len| {
                storage[native..native + len].copy_from_slice(&data[client..client + len]);
            });
        }
        self.population.record_write(range);

        texlayer_trace!(
            &self.log_source,
            "Wrote {}x{}x{} at ({}, {}, {}) level {} layers {}+{} faces {}+{} of '{}'",
            range.width, range.height, range.depth, range.x, range.y, range.z, range.mip_level,
            range.layer, range.num_layers, range.face, range.num_faces, self.desc.debug_name
        );
        Ok(())
    }
}

/// One layer of one face covering the whole of `level`
fn level_slice_range(dimensions: Dimensions, level: u32) -> TextureRangeDesc {
    let extents = dimensions.at_mip_level(level);
    TextureRangeDesc::new_3d(0, 0, 0, extents.width, extents.height, extents.depth).with_mip_level(level)
}

impl Texture for UnifiedTexture {
    fn dimensions(&self) -> Dimensions {
        self.desc.dimensions()
    }

    fn num_layers(&self) -> u32 {
        self.desc.num_layers
    }

    fn texture_type(&self) -> TextureType {
        self.desc.texture_type
    }

    fn usage(&self) -> TextureUsage {
        self.desc.usage
    }

    fn samples(&self) -> u32 {
        self.desc.num_samples
    }

    fn num_mip_levels(&self) -> u32 {
        self.desc.num_mip_levels
    }

    fn format(&self) -> TextureFormat {
        self.desc.format
    }

    fn state(&self) -> PopulationState {
        self.population.state()
    }

    fn upload(&self, range: &TextureRangeDesc, data: Option<&[u8]>, bytes_per_row: usize) -> Result<()> {
        if range.num_mip_levels > 1 {
            texlayer_bail_warn!(
                &self.log_source,
                Unimplemented,
                "Uploading to more than 1 mip level is not supported ({} requested)",
                range.num_mip_levels
            );
        }
        let Some(data) = data else {
            return Ok(());
        };
        check_dimensionality(&self.caps, self.desc.texture_type, self.desc.num_samples, &self.log_source)?;
        if self.desc.texture_type == TextureType::Cube {
            return self.write(&range.at_face(0).with_num_faces(6), data, bytes_per_row);
        }
        self.write(range, data, bytes_per_row)
    }

    fn upload_cube(
        &self,
        range: &TextureRangeDesc,
        face: TextureCubeFace,
        data: Option<&[u8]>,
        bytes_per_row: usize,
    ) -> Result<()> {
        if self.desc.texture_type != TextureType::Cube {
            texlayer_bail_warn!(
                &self.log_source,
                InvalidOperation,
                "Texture '{}' is {:?}, cube face uploads need a cube texture",
                self.desc.debug_name, self.desc.texture_type
            );
        }
        if range.num_mip_levels > 1 {
            texlayer_bail_warn!(
                &self.log_source,
                Unimplemented,
                "Uploading to more than 1 mip level is not supported ({} requested)",
                range.num_mip_levels
            );
        }
        let Some(data) = data else {
            return Ok(());
        };
        self.write(&range.at_face(face.index()), data, bytes_per_row)
    }

    fn resident_handle(&self) -> Result<ResidentHandle> {
        if !self.caps.has_feature(DeviceFeatures::BINDLESS_TEXTURE) {
            texlayer_bail_warn!(&self.log_source, Unsupported, "Bindless resource ids are not supported by this device");
        }
        if let Some(id) = self.resident.get() {
            return Ok(ResidentHandle(id.get()));
        }

        let Some(id) = NonZeroU64::new(self.residency.borrow_mut().acquire()) else {
            texlayer_bail!(&self.log_source, BackendError, "Residency set returned a null id");
        };
        self.resident.set(Some(id));

        texlayer_trace!(&self.log_source, "Texture '{}' resident as id {}", self.desc.debug_name, id.get());
        Ok(ResidentHandle(id.get()))
    }
}

impl std::fmt::Debug for UnifiedTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnifiedTexture")
            .field("native_format", &self.native_format)
            .field("bytes", &self.allocated_bytes())
            .field("state", &self.population.state())
            .field("desc", &self.desc)
            .finish()
    }
}

impl Drop for UnifiedTexture {
    fn drop(&mut self) {
        if let Some(id) = self.resident.take() {
            self.residency.borrow_mut().release(id.get());
        }
    }
}

#[cfg(test)]
#[path = "unified_texture_tests.rs"]
mod tests;
