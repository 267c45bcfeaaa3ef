//! GlTexture - GL implementation of the Texture trait
//!
//! Creation picks one of two allocation strategies. Immutable storage
//! allocates the whole mip chain in one call and is only used when the usage
//! includes STORAGE and the format reports storage support. Otherwise every
//! level is specified with a null-payload image call. Uploads then write one
//! mip level per call with either a full image call (legacy textures, range
//! covering the whole level) or a sub-image call.

use std::borrow::Cow;
use std::cell::Cell;
use std::num::NonZeroU64;
use std::rc::Rc;
use texture_layer::texlayer::{Capabilities, Config, DeviceFeatures, Error, Result, TextureFormatCapabilities};
use texture_layer::texlayer::texture::{
    check_upload_size, Dimensions, PopulationState, PopulationTracker, ResidentHandle, Texture,
    TextureCubeFace, TextureDesc, TextureFormat, TextureRangeDesc, TextureType, TextureUsage,
};
use texture_layer::{texlayer_bail, texlayer_bail_warn, texlayer_debug, texlayer_err, texlayer_error, texlayer_trace, texlayer_warn};
use crate::gl_context::GlContext;
use crate::gl_enums::*;
use crate::gl_format::{self, FormatDescGl};

const BACKEND: &str = "texlayer::gl";

/// How the native storage of a texture was allocated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationStrategy {
    /// Whole mip chain allocated at creation, format and extents fixed
    ImmutableStorage,
    /// Each level specified by an image call, re-specifiable by full writes
    LegacyUpload,
    /// Backing store owned by an external producer
    External,
}

/// Native target of a texture type
pub fn target_for(texture_type: TextureType, samples: u32) -> GLenum {
    match texture_type {
        TextureType::OneD => TEXTURE_1D,
        TextureType::OneDArray => TEXTURE_1D_ARRAY,
        TextureType::TwoD if samples > 1 => TEXTURE_2D_MULTISAMPLE,
        TextureType::TwoD => TEXTURE_2D,
        TextureType::TwoDArray => TEXTURE_2D_ARRAY,
        TextureType::ThreeD => TEXTURE_3D,
        TextureType::Cube => TEXTURE_CUBE_MAP,
        TextureType::ExternalImage => TEXTURE_EXTERNAL_OES,
    }
}

/// Unpack alignment under which rows of `tight_row` bytes sit `bytes_per_row` apart
///
/// A stride of 0 means tightly packed. Returns `None` when no alignment in
/// {8, 4, 2, 1} rounds the tight row up to exactly the stride.
pub fn unpack_alignment(tight_row: usize, bytes_per_row: usize) -> Option<GLint> {
    let stride = if bytes_per_row == 0 { tight_row } else { bytes_per_row };
    [8usize, 4, 2, 1]
        .into_iter()
        .find(|&alignment| tight_row.div_ceil(alignment) * alignment == stride)
        .map(|alignment| alignment as GLint)
}

/// Reject dimensionalities the device cannot create or write
fn check_dimensionality(caps: &Capabilities, texture_type: TextureType, samples: u32, source: &str) -> Result<()> {
    let required = match texture_type {
        TextureType::OneD => DeviceFeatures::TEXTURE_1D,
        TextureType::OneDArray => DeviceFeatures::TEXTURE_1D | DeviceFeatures::TEXTURE_ARRAY,
        TextureType::TwoDArray => DeviceFeatures::TEXTURE_ARRAY,
        TextureType::ThreeD => DeviceFeatures::TEXTURE_3D,
        _ => DeviceFeatures::empty(),
    };
    let required = if samples > 1 { required | DeviceFeatures::MULTISAMPLE } else { required };

    if !caps.features().contains(required) {
        texlayer_bail!(
            source,
            Unsupported,
            "{:?} textures with {} samples need device features {:?}",
            texture_type, samples, required.difference(caps.features())
        );
    }
    Ok(())
}

/// Read the native error state and map it onto the portable error kinds
pub(crate) fn check_native_error(ctx: &dyn GlContext, source: &str, operation: &str) -> Result<()> {
    let code = ctx.get_error();
    match code {
        NO_ERROR => Ok(()),
        INVALID_ENUM | INVALID_VALUE => Err(texlayer_err!(
            source,
            ArgumentInvalid,
            "{} failed with GL error 0x{:04X}",
            operation, code
        )),
        INVALID_OPERATION => Err(texlayer_err!(
            source,
            InvalidOperation,
            "{} failed with GL error 0x{:04X}",
            operation, code
        )),
        OUT_OF_MEMORY => {
            texlayer_error!(source, "{} ran out of memory", operation);
            Err(Error::OutOfMemory)
        }
        _ => Err(texlayer_err!(source, BackendError, "{} failed with GL error 0x{:04X}", operation, code)),
    }
}

/// Binds a texture for the lifetime of the scope
///
/// Unbinds on drop and, when an unpack alignment was installed, restores the
/// native default of 4.
struct BindScope<'a> {
    ctx: &'a dyn GlContext,
    target: GLenum,
    restore_alignment: bool,
}

impl<'a> BindScope<'a> {
    fn new(ctx: &'a dyn GlContext, target: GLenum, texture: GLuint) -> Self {
        ctx.bind_texture(target, texture);
        Self {
            ctx,
            target,
            restore_alignment: false,
        }
    }

    fn with_unpack_alignment(mut self, alignment: GLint) -> Self {
        self.ctx.pixel_storei(UNPACK_ALIGNMENT, alignment);
        self.restore_alignment = true;
        self
    }
}

impl Drop for BindScope<'_> {
    fn drop(&mut self) {
        self.ctx.bind_texture(self.target, 0);
        if self.restore_alignment {
            self.ctx.pixel_storei(UNPACK_ALIGNMENT, 4);
        }
    }
}

/// Origin and extent of one native write call
#[derive(Debug, Clone, Copy)]
struct Region {
    dims: u8,
    x: GLint,
    y: GLint,
    z: GLint,
    width: GLsizei,
    height: GLsizei,
    depth: GLsizei,
}

/// GL texture
pub struct GlTexture {
    ctx: Rc<dyn GlContext>,
    caps: Rc<Capabilities>,
    log_source: String,
    check_native_errors: bool,
    desc: TextureDesc,
    id: GLuint,
    target: GLenum,
    format_desc: Option<FormatDescGl>,
    strategy: AllocationStrategy,
    population: PopulationTracker,
    /// Bindless handle, acquired and made resident on first request
    resident: Cell<Option<NonZeroU64>>,
}

impl GlTexture {
    /// Create a texture and allocate its native storage
    ///
    /// With `has_external_storage` (or an `ExternalImage` descriptor) only a
    /// texture name is generated: the backing store belongs to an external
    /// producer, so usage and capability validation are skipped.
    pub fn create(
        ctx: Rc<dyn GlContext>,
        caps: Rc<Capabilities>,
        config: &Config,
        desc: &TextureDesc,
        has_external_storage: bool,
    ) -> Result<Self> {
        let log_source = config.log_source(BACKEND);
        desc.validate()?;

        if has_external_storage || desc.texture_type == TextureType::ExternalImage {
            return Ok(Self::create_external(ctx, caps, config, log_source, desc));
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

        // Formats are chosen as if sampled unless the texture is a storage image
        let usage_for_format = if desc.usage.contains(TextureUsage::STORAGE) {
            desc.usage
        } else {
            desc.usage | TextureUsage::SAMPLED
        };
        let Some(format_desc) = gl_format::resolve(&caps, desc.format, usage_for_format) else {
            texlayer_bail!(
                &log_source,
                Unsupported,
                "Texture '{}': format {:?} has no native equivalent on this device",
                desc.debug_name, desc.format
            );
        };

        if gl_format::needs_alpha_swizzle(&caps, desc.format) && !caps.has_feature(DeviceFeatures::TEXTURE_SWIZZLE) {
            texlayer_bail!(
                &log_source,
                Unsupported,
                "Texture '{}': {:?} needs channel swizzle, which the device lacks",
                desc.debug_name, desc.format
            );
        }

        if desc.usage.contains(TextureUsage::STORAGE) && !caps.has_feature(DeviceFeatures::IMMUTABLE_STORAGE) {
            texlayer_bail!(
                &log_source,
                Unsupported,
                "Texture '{}': STORAGE usage needs immutable texture storage",
                desc.debug_name
            );
        }

        let strategy = if desc.usage.contains(TextureUsage::STORAGE)
            && caps.format_capabilities(desc.format).contains(TextureFormatCapabilities::STORAGE)
        {
            AllocationStrategy::ImmutableStorage
        } else {
            AllocationStrategy::LegacyUpload
        };

        let id = ctx.gen_texture();
        let texture = Self {
            target: target_for(desc.texture_type, desc.num_samples),
            population: Self::tracker(desc),
            ctx,
            caps,
            log_source,
            check_native_errors: config.check_native_errors,
            desc: desc.clone(),
            id,
            format_desc: Some(format_desc),
            strategy,
            resident: Cell::new(None),
        };
        texture.initialize(format_desc)?;

        texlayer_debug!(
            &texture.log_source,
            "Created {:?} texture '{}' {}x{}x{} ({:?}, {} levels) via {:?}, state {:?}",
            desc.texture_type, desc.debug_name, desc.width, desc.height, desc.depth,
            desc.format, desc.num_mip_levels, strategy, texture.population.state()
        );
        Ok(texture)
    }

    fn create_external(
        ctx: Rc<dyn GlContext>,
        caps: Rc<Capabilities>,
        config: &Config,
        log_source: String,
        desc: &TextureDesc,
    ) -> Self {
        let target = if desc.texture_type == TextureType::ExternalImage {
            TEXTURE_EXTERNAL_OES
        } else {
            target_for(desc.texture_type, desc.num_samples)
        };
        let format_desc = gl_format::resolve(&caps, desc.format, desc.usage | TextureUsage::SAMPLED);
        let id = ctx.gen_texture();

        let texture = Self {
            population: Self::tracker(desc),
            ctx,
            caps,
            log_source,
            check_native_errors: config.check_native_errors,
            desc: desc.clone(),
            id,
            target,
            format_desc,
            strategy: AllocationStrategy::External,
            resident: Cell::new(None),
        };
        texture.population.mark_allocated();

        texlayer_debug!(
            &texture.log_source,
            "Attached external texture '{}' {}x{} ({:?})",
            desc.debug_name, desc.width, desc.height, desc.format
        );
        texture
    }

    fn tracker(desc: &TextureDesc) -> PopulationTracker {
        let faces = if desc.texture_type == TextureType::Cube { 6 } else { 1 };
        PopulationTracker::new(desc.dimensions(), desc.num_mip_levels, desc.num_layers, faces)
    }

    // ===== ACCESSORS =====

    /// Native texture name
    pub fn id(&self) -> GLuint {
        self.id
    }

    /// Native binding target
    pub fn target(&self) -> GLenum {
        self.target
    }

    pub fn allocation_strategy(&self) -> AllocationStrategy {
        self.strategy
    }

    /// Resolved native format (`None` for external textures of unmapped formats)
    pub fn format_desc(&self) -> Option<FormatDescGl> {
        self.format_desc
    }

    pub fn debug_name(&self) -> &str {
        &self.desc.debug_name
    }

    // ===== INITIALIZATION =====

    fn initialize(&self, format_desc: FormatDescGl) -> Result<()> {
        let ctx = &*self.ctx;
        let _scope = BindScope::new(ctx, self.target, self.id);

        if self.desc.num_samples == 1 {
            ctx.tex_parameteri(self.target, TEXTURE_MAX_LEVEL, self.desc.num_mip_levels as GLint - 1);
            if self.desc.num_mip_levels == 1 {
                ctx.tex_parameteri(self.target, TEXTURE_MIN_FILTER, NEAREST as GLint);
            }
        }

        if !format_desc.is_compressed() && gl_format::needs_alpha_swizzle(&self.caps, self.desc.format) {
            ctx.tex_parameteri(self.target, TEXTURE_SWIZZLE_R, ZERO as GLint);
            ctx.tex_parameteri(self.target, TEXTURE_SWIZZLE_G, ZERO as GLint);
            ctx.tex_parameteri(self.target, TEXTURE_SWIZZLE_B, ZERO as GLint);
            ctx.tex_parameteri(self.target, TEXTURE_SWIZZLE_A, RED as GLint);
        }

        let populate = self.can_initialize(format_desc);
        match self.strategy {
            // storage is allocated either way, the gate only decides population
            AllocationStrategy::ImmutableStorage => self.initialize_with_storage(format_desc, populate)?,
            _ if populate => self.initialize_with_upload(format_desc)?,
            _ => self.population.mark_allocated(),
        }

        if !populate {
            texlayer_debug!(
                &self.log_source,
                "Texture '{}': no compressed upload support for {:?} on the {:?} path, population skipped",
                self.desc.debug_name, self.desc.format, self.strategy
            );
        }
        Ok(())
    }

    fn can_initialize(&self, format_desc: FormatDescGl) -> bool {
        if !format_desc.is_compressed() {
            return true;
        }
        let format_caps = self.caps.format_capabilities(self.desc.format);
        match self.strategy {
            AllocationStrategy::ImmutableStorage => {
                format_caps.contains(TextureFormatCapabilities::COMPRESSED_UPLOAD_STORAGE)
            }
            _ => format_caps.contains(TextureFormatCapabilities::COMPRESSED_UPLOAD_IMAGE),
        }
    }

    fn initialize_with_storage(&self, format_desc: FormatDescGl, populate: bool) -> Result<()> {
        let ctx = &*self.ctx;
        let desc = &self.desc;
        let levels = desc.num_mip_levels as GLsizei;
        let internal_format = format_desc.internal_format();
        let (width, height, depth) = (desc.width as GLsizei, desc.height as GLsizei, desc.depth as GLsizei);
        let layers = desc.num_layers as GLsizei;

        match desc.texture_type {
            TextureType::TwoD if desc.num_samples > 1 => ctx.tex_storage_2d_multisample(
                self.target,
                desc.num_samples as GLsizei,
                internal_format,
                width,
                height,
                true,
            ),
            TextureType::OneD => ctx.tex_storage_1d(self.target, levels, internal_format, width),
            TextureType::OneDArray => ctx.tex_storage_2d(self.target, levels, internal_format, width, layers),
            TextureType::TwoD | TextureType::Cube => {
                ctx.tex_storage_2d(self.target, levels, internal_format, width, height)
            }
            TextureType::TwoDArray => ctx.tex_storage_3d(self.target, levels, internal_format, width, height, layers),
            TextureType::ThreeD => ctx.tex_storage_3d(self.target, levels, internal_format, width, height, depth),
            TextureType::ExternalImage => unreachable!("external textures are never allocated"),
        }
        self.check_native_error("Immutable storage allocation")?;

        self.population.mark_allocated();
        if populate {
            self.population.mark_all_populated();
        }
        Ok(())
    }

    fn initialize_with_upload(&self, format_desc: FormatDescGl) -> Result<()> {
        if self.desc.num_samples > 1 {
            self.ctx.tex_image_2d_multisample(
                self.target,
                self.desc.num_samples as GLsizei,
                format_desc.internal_format(),
                self.desc.width as GLsizei,
                self.desc.height as GLsizei,
                true,
            );
            self.check_native_error("Multisample image allocation")?;
            self.population.mark_allocated();
            self.population.mark_all_populated();
            return Ok(());
        }

        self.population.mark_allocated();
        for level in 0..self.desc.num_mip_levels {
            let range = self.full_range(level, 1);
            if self.desc.texture_type == TextureType::Cube {
                for face in 0..6 {
                    let face_range = range.at_face(face);
                    self.write_range(format_desc, CUBE_FACE_TARGETS[face as usize], &face_range, None)?;
                    self.population.record_write(&face_range);
                }
            } else {
                self.write_range(format_desc, self.target, &range, None)?;
                self.population.record_write(&range);
            }
        }
        Ok(())
    }

    // ===== UPLOAD =====

    /// Native format of a texture that accepts uploads
    fn writable_format(&self) -> Result<FormatDescGl> {
        if self.strategy == AllocationStrategy::External {
            texlayer_bail_warn!(
                &self.log_source,
                InvalidOperation,
                "Texture '{}' is backed by external storage and cannot be uploaded to",
                self.desc.debug_name
            );
        }
        if self.desc.num_samples > 1 {
            texlayer_bail_warn!(
                &self.log_source,
                Unsupported,
                "Texture '{}' is multisampled and cannot be uploaded to",
                self.desc.debug_name
            );
        }
        match self.format_desc {
            Some(format_desc) => Ok(format_desc),
            None => Err(texlayer_err!(
                &self.log_source,
                InvalidOperation,
                "Texture '{}' has no native format",
                self.desc.debug_name
            )),
        }
    }

    /// Element size of the native transfer type must match the portable texel size
    fn check_element_size(&self, format_desc: FormatDescGl) -> Result<()> {
        if let FormatDescGl::Uncompressed { format, type_, .. } = format_desc {
            let props = self.properties();
            let native = gl_format::texel_size(format, type_);
            if native != Some(props.bytes_per_block as usize) {
                texlayer_bail_warn!(
                    &self.log_source,
                    ArgumentInvalid,
                    "{} texels are {} bytes but the native transfer element is {:?} bytes",
                    props.name, props.bytes_per_block, native
                );
            }
        }
        Ok(())
    }

    /// Pick the unpack alignment for `data`, repacking rows when no alignment fits the stride
    fn prepare_payload<'a>(
        &self,
        range: &TextureRangeDesc,
        data: &'a [u8],
        bytes_per_row: usize,
    ) -> (Cow<'a, [u8]>, usize, GLint) {
        let props = self.properties();
        let tight_row = props.bytes_per_row(range.width);
        if let Some(alignment) = unpack_alignment(tight_row, bytes_per_row) {
            return (Cow::Borrowed(data), bytes_per_row, alignment);
        }

        texlayer_warn!(
            &self.log_source,
            "Row stride {} fits no unpack alignment for {}-byte rows of '{}', repacking tightly",
            bytes_per_row, tight_row, self.desc.debug_name
        );
        let rows = props.rows(range);
        let mut packed = Vec::with_capacity(rows * tight_row);
        for row in 0..rows {
            let start = row * bytes_per_row;
            packed.extend_from_slice(&data[start..start + tight_row]);
        }
        (Cow::Owned(packed), 0, 1)
    }

    /// Whether `range` covers every texel and layer of its mip level
    fn covers_level(&self, range: &TextureRangeDesc) -> bool {
        let level = self.desc.dimensions().at_mip_level(range.mip_level);
        range.x == 0
            && range.y == 0
            && range.z == 0
            && range.width == level.width
            && range.height == level.height
            && range.depth == level.depth
            && range.layer == 0
            && range.num_layers == self.desc.num_layers
    }

    fn region_of(&self, range: &TextureRangeDesc) -> Region {
        let (x, y, z) = (range.x as GLint, range.y as GLint, range.z as GLint);
        let (width, height, depth) = (range.width as GLsizei, range.height as GLsizei, range.depth as GLsizei);
        let (layer, layers) = (range.layer as GLint, range.num_layers as GLsizei);

        match self.desc.texture_type {
            TextureType::OneD => Region { dims: 1, x, y: 0, z: 0, width, height: 1, depth: 1 },
            // layers stand in for rows
            TextureType::OneDArray => Region { dims: 2, x, y: layer, z: 0, width, height: layers, depth: 1 },
            TextureType::TwoD | TextureType::Cube => Region { dims: 2, x, y, z: 0, width, height, depth: 1 },
            TextureType::TwoDArray => Region { dims: 3, x, y, z: layer, width, height, depth: layers },
            TextureType::ThreeD => Region { dims: 3, x, y, z, width, height, depth },
            TextureType::ExternalImage => unreachable!("external textures are never written"),
        }
    }

    /// Issue the native write of `range` into `image_target`
    ///
    /// The range must already be validated and address one face.
    fn write_range(
        &self,
        format_desc: FormatDescGl,
        image_target: GLenum,
        range: &TextureRangeDesc,
        data: Option<&[u8]>,
    ) -> Result<()> {
        let ctx = &*self.ctx;
        let level = range.mip_level as GLint;
        let full_image = self.covers_level(range) && self.strategy != AllocationStrategy::ImmutableStorage;
        let Region { dims, x, y, z, width, height, depth } = self.region_of(range);

        match format_desc {
            FormatDescGl::Uncompressed { internal_format, format, type_ } => {
                let internal_format = internal_format as GLint;
                match (dims, full_image) {
                    (1, true) => ctx.tex_image_1d(image_target, level, internal_format, width, 0, format, type_, data),
                    (1, false) => ctx.tex_sub_image_1d(image_target, level, x, width, format, type_, data),
                    (2, true) => ctx.tex_image_2d(
                        image_target, level, internal_format, width, height, 0, format, type_, data,
                    ),
                    (2, false) => {
                        ctx.tex_sub_image_2d(image_target, level, x, y, width, height, format, type_, data)
                    }
                    (3, true) => ctx.tex_image_3d(
                        image_target, level, internal_format, width, height, depth, 0, format, type_, data,
                    ),
                    _ => ctx.tex_sub_image_3d(
                        image_target, level, x, y, z, width, height, depth, format, type_, data,
                    ),
                }
            }
            FormatDescGl::Compressed { internal_format } => {
                let byte_count = self.properties().bytes_per_range(range);
                assert!(byte_count > 0, "compressed range {:?} has no blocks", range);
                let size = byte_count as GLsizei;
                match (dims, full_image) {
                    (1, true) => ctx.compressed_tex_image_1d(image_target, level, internal_format, width, 0, size, data),
                    (1, false) => {
                        ctx.compressed_tex_sub_image_1d(image_target, level, x, width, internal_format, size, data)
                    }
                    (2, true) => ctx.compressed_tex_image_2d(
                        image_target, level, internal_format, width, height, 0, size, data,
                    ),
                    (2, false) => ctx.compressed_tex_sub_image_2d(
                        image_target, level, x, y, width, height, internal_format, size, data,
                    ),
                    (3, true) => ctx.compressed_tex_image_3d(
                        image_target, level, internal_format, width, height, depth, 0, size, data,
                    ),
                    _ => ctx.compressed_tex_sub_image_3d(
                        image_target, level, x, y, z, width, height, depth, internal_format, size, data,
                    ),
                }
            }
        }

        texlayer_trace!(
            &self.log_source,
            "{} write of '{}' level {} at ({}, {}, {}) {}x{}x{}",
            if full_image { "Image" } else { "Sub-image" },
            self.desc.debug_name, level, x, y, z, width, height, depth
        );
        self.check_native_error("Texture write")
    }

    /// Write the six faces of `range` in face order, stopping at the first failure
    fn write_cube_faces(
        &self,
        format_desc: FormatDescGl,
        range: &TextureRangeDesc,
        data: &[u8],
        bytes_per_row: usize,
    ) -> Result<()> {
        let props = self.properties();
        let mut offset = 0;
        for face in 0..6 {
            let face_range = range.at_face(face);
            self.write_range(format_desc, CUBE_FACE_TARGETS[face as usize], &face_range, Some(&data[offset..]))?;
            self.population.record_write(&face_range);

            offset += if bytes_per_row == 0 {
                props.bytes_per_range(&face_range)
            } else {
                bytes_per_row * props.rows(&face_range)
            };
        }
        Ok(())
    }

    fn check_native_error(&self, operation: &str) -> Result<()> {
        if !self.check_native_errors {
            return Ok(());
        }
        check_native_error(&*self.ctx, &self.log_source, &format!("{} of '{}'", operation, self.desc.debug_name))
    }
}

impl Texture for GlTexture {
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

        let format_desc = self.writable_format()?;
        check_dimensionality(&self.caps, self.desc.texture_type, self.desc.num_samples, &self.log_source)?;

        // Cube uploads always cover all six faces; single faces go through upload_cube
        let range = if self.desc.texture_type == TextureType::Cube {
            range.at_face(0).with_num_faces(6)
        } else {
            *range
        };
        self.validate_range(&range)?;
        self.check_element_size(format_desc)?;
        check_upload_size(&self.properties(), &range, data, bytes_per_row)?;

        let (payload, bytes_per_row, alignment) = self.prepare_payload(&range, data, bytes_per_row);
        let _scope = BindScope::new(&*self.ctx, self.target, self.id).with_unpack_alignment(alignment);

        if self.desc.texture_type == TextureType::Cube {
            return self.write_cube_faces(format_desc, &range, &payload, bytes_per_row);
        }
        self.write_range(format_desc, self.target, &range, Some(&payload))?;
        self.population.record_write(&range);
        Ok(())
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

        let format_desc = self.writable_format()?;
        let face_range = range.at_face(face.index());
        self.validate_range(&face_range)?;
        self.check_element_size(format_desc)?;
        check_upload_size(&self.properties(), &face_range, data, bytes_per_row)?;

        let (payload, _, alignment) = self.prepare_payload(&face_range, data, bytes_per_row);
        let _scope = BindScope::new(&*self.ctx, self.target, self.id).with_unpack_alignment(alignment);

        self.write_range(format_desc, CUBE_FACE_TARGETS[face.index() as usize], &face_range, Some(&payload))?;
        self.population.record_write(&face_range);
        Ok(())
    }

    fn resident_handle(&self) -> Result<ResidentHandle> {
        if !self.caps.has_feature(DeviceFeatures::BINDLESS_TEXTURE) {
            texlayer_bail_warn!(&self.log_source, Unsupported, "Bindless textures are not supported by this device");
        }
        if let Some(handle) = self.resident.get() {
            return Ok(ResidentHandle(handle.get()));
        }

        let Some(handle) = NonZeroU64::new(self.ctx.get_texture_handle(self.id)) else {
            texlayer_bail!(
                &self.log_source,
                BackendError,
                "No bindless handle for texture '{}'",
                self.desc.debug_name
            );
        };
        self.ctx.make_texture_handle_resident(handle.get());
        if let Err(err) = self.check_native_error("Handle residency") {
            self.ctx.make_texture_handle_non_resident(handle.get());
            return Err(err);
        }
        self.resident.set(Some(handle));

        texlayer_trace!(&self.log_source, "Texture '{}' resident as 0x{:X}", self.desc.debug_name, handle.get());
        Ok(ResidentHandle(handle.get()))
    }
}

impl std::fmt::Debug for GlTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlTexture")
            .field("id", &self.id)
            .field("target", &format_args!("0x{:04X}", self.target))
            .field("strategy", &self.strategy)
            .field("state", &self.population.state())
            .field("desc", &self.desc)
            .finish()
    }
}

impl Drop for GlTexture {
    fn drop(&mut self) {
        if self.id == 0 {
            return;
        }
        // Residency must be released before the name is deleted
        if let Some(handle) = self.resident.take() {
            self.ctx.make_texture_handle_non_resident(handle.get());
        }
        self.ctx.delete_texture(self.id);
    }
}

#[cfg(test)]
#[path = "gl_texture_tests.rs"]
mod tests;
