//! Headless in-memory GL context
//!
//! Implements [`GlContext`] without a driver: texel storage lives in host
//! memory per (image target, mip level), every native call is recorded as a
//! [`GlCall`], and the native error rules the texture engine depends on are
//! enforced (immutable storage, bounds, texel size, unpack alignment).

use std::cell::RefCell;
use rustc_hash::{FxHashMap, FxHashSet};
use crate::gl_context::GlContext;
use crate::gl_enums::*;
use crate::gl_format::{base_format_of, compressed_block_info, internal_format_texel_size, texel_size};

/// First bindless handle value handed out
const FIRST_HANDLE: u64 = 0x1000;

/// One recorded native call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlCall {
    GenTexture(GLuint),
    DeleteTexture(GLuint),
    BindTexture { target: GLenum, texture: GLuint },
    TexParameteri { target: GLenum, pname: GLenum, param: GLint },
    PixelStorei { pname: GLenum, param: GLint },
    GetError,
    TexImage {
        dims: u8,
        target: GLenum,
        level: GLint,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
        format: GLenum,
        type_: GLenum,
        has_data: bool,
    },
    TexSubImage {
        dims: u8,
        target: GLenum,
        level: GLint,
        x: GLint,
        y: GLint,
        z: GLint,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
        format: GLenum,
        type_: GLenum,
        has_data: bool,
    },
    CompressedTexImage {
        dims: u8,
        target: GLenum,
        level: GLint,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
        image_size: GLsizei,
        has_data: bool,
    },
    CompressedTexSubImage {
        dims: u8,
        target: GLenum,
        level: GLint,
        x: GLint,
        y: GLint,
        z: GLint,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
        format: GLenum,
        image_size: GLsizei,
        has_data: bool,
    },
    TexStorage {
        dims: u8,
        target: GLenum,
        levels: GLsizei,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
    },
    TexStorageMultisample {
        target: GLenum,
        samples: GLsizei,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
    },
    TexImageMultisample {
        target: GLenum,
        samples: GLsizei,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
    },
    GetTextureHandle(GLuint),
    MakeResident(u64),
    MakeNonResident(u64),
    GenRenderbuffer(GLuint),
    DeleteRenderbuffer(GLuint),
    BindRenderbuffer(GLuint),
    RenderbufferStorage {
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
    },
    RenderbufferStorageMultisample {
        samples: GLsizei,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
    },
}

impl GlCall {
    /// Whether the call allocates or writes texel storage
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            GlCall::TexImage { .. }
                | GlCall::TexSubImage { .. }
                | GlCall::CompressedTexImage { .. }
                | GlCall::CompressedTexSubImage { .. }
                | GlCall::TexStorage { .. }
                | GlCall::TexStorageMultisample { .. }
                | GlCall::TexImageMultisample { .. }
        )
    }
}

/// Extents and format of one stored image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Depth of 3D images, layer count of 2D array images
    pub depth: u32,
    pub internal_format: GLenum,
    pub samples: u32,
}

/// Renderbuffer allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderbufferInfo {
    pub internal_format: GLenum,
    pub width: u32,
    pub height: u32,
    pub samples: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TexelLayout {
    Texel { size: usize },
    Block { width: u32, height: u32, bytes: usize, min_blocks: u32 },
}

impl TexelLayout {
    fn of_internal_format(internal_format: GLenum) -> Option<Self> {
        if let Some((width, height, bytes, min_blocks)) = compressed_block_info(internal_format) {
            return Some(TexelLayout::Block { width, height, bytes, min_blocks });
        }
        internal_format_texel_size(internal_format).map(|size| TexelLayout::Texel { size })
    }

    fn row_bytes(&self, width: u32) -> usize {
        match *self {
            TexelLayout::Texel { size } => width as usize * size,
            TexelLayout::Block { width: bw, bytes, min_blocks, .. } => {
                width.div_ceil(bw).max(min_blocks) as usize * bytes
            }
        }
    }

    fn rows(&self, height: u32) -> usize {
        match *self {
            TexelLayout::Texel { .. } => height as usize,
            TexelLayout::Block { height: bh, min_blocks, .. } => height.div_ceil(bh).max(min_blocks) as usize,
        }
    }
}

#[derive(Debug)]
struct SoftImage {
    info: ImageInfo,
    base_format: GLenum,
    layout: TexelLayout,
    data: Vec<u8>,
}

impl SoftImage {
    fn new(info: ImageInfo, base_format: GLenum, layout: TexelLayout) -> Self {
        let size = layout.row_bytes(info.width)
            * layout.rows(info.height)
            * info.depth as usize
            * info.samples.max(1) as usize;
        Self {
            info,
            base_format,
            layout,
            data: vec![0; size],
        }
    }

    fn row_bytes(&self) -> usize {
        self.layout.row_bytes(self.info.width)
    }

    fn rows(&self) -> usize {
        self.layout.rows(self.info.height)
    }

    /// Copy `rows x depth` rows of `row_len` bytes from `src` (rows `src_stride` apart)
    #[allow(clippy::too_many_arguments)]
    fn copy_rows(
        &mut self,
        dst_x_bytes: usize,
        dst_row: usize,
        dst_slice: usize,
        row_len: usize,
        rows: usize,
        depth: usize,
        src: &[u8],
        src_stride: usize,
    ) {
        let image_rows = self.rows();
        let image_row_bytes = self.row_bytes();
        for z in 0..depth {
            for r in 0..rows {
                let src_offset = (z * rows + r) * src_stride;
                let dst_offset = ((dst_slice + z) * image_rows + dst_row + r) * image_row_bytes + dst_x_bytes;
                self.data[dst_offset..dst_offset + row_len].copy_from_slice(&src[src_offset..src_offset + row_len]);
            }
        }
    }
}

#[derive(Debug, Default)]
struct SoftTexture {
    target: GLenum,
    immutable: bool,
    params: FxHashMap<GLenum, GLint>,
    images: FxHashMap<(GLenum, GLint), SoftImage>,
}

#[derive(Debug)]
struct SoftState {
    next_name: GLuint,
    textures: FxHashMap<GLuint, SoftTexture>,
    bindings: FxHashMap<GLenum, GLuint>,
    renderbuffers: FxHashMap<GLuint, Option<RenderbufferInfo>>,
    bound_renderbuffer: GLuint,
    unpack_alignment: GLint,
    error: GLenum,
    injected_error: Option<(usize, GLenum)>,
    next_handle: u64,
    handles: FxHashMap<GLuint, u64>,
    resident: FxHashSet<u64>,
    calls: Vec<GlCall>,
}

impl Default for SoftState {
    fn default() -> Self {
        Self {
            next_name: 1,
            textures: FxHashMap::default(),
            bindings: FxHashMap::default(),
            renderbuffers: FxHashMap::default(),
            bound_renderbuffer: 0,
            unpack_alignment: 4,
            error: NO_ERROR,
            injected_error: None,
            next_handle: FIRST_HANDLE,
            handles: FxHashMap::default(),
            resident: FxHashSet::default(),
            calls: Vec::new(),
        }
    }
}

type GlResult = std::result::Result<(), GLenum>;

fn binding_point(target: GLenum) -> GLenum {
    if CUBE_FACE_TARGETS.contains(&target) {
        TEXTURE_CUBE_MAP
    } else {
        target
    }
}

fn round_up(value: usize, alignment: usize) -> usize {
    value.div_ceil(alignment) * alignment
}

fn non_negative(values: &[GLint]) -> GlResult {
    if values.iter().any(|&v| v < 0) {
        return Err(INVALID_VALUE);
    }
    Ok(())
}

fn fits(origin: GLint, extent: GLsizei, limit: u32) -> bool {
    origin as u64 + extent as u64 <= limit as u64
}

impl SoftState {
    fn record_error(&mut self, error: GLenum) {
        if self.error == NO_ERROR {
            self.error = error;
        }
    }

    fn take_injected_error(&mut self) -> Option<GLenum> {
        match self.injected_error {
            Some((0, error)) => {
                self.injected_error = None;
                Some(error)
            }
            Some((remaining, error)) => {
                self.injected_error = Some((remaining - 1, error));
                None
            }
            None => None,
        }
    }

    fn bound_texture_mut(&mut self, target: GLenum) -> Option<&mut SoftTexture> {
        let name = *self.bindings.get(&binding_point(target))?;
        self.textures.get_mut(&name)
    }

    #[allow(clippy::too_many_arguments)]
    fn tex_image(
        &mut self,
        target: GLenum,
        level: GLint,
        internal_format: GLint,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
        border: GLint,
        format: GLenum,
        type_: GLenum,
        data: Option<&[u8]>,
    ) -> GlResult {
        if target == TEXTURE_CUBE_MAP {
            return Err(INVALID_ENUM);
        }
        non_negative(&[level, width, height, depth])?;
        if border != 0 {
            return Err(INVALID_VALUE);
        }
        let size = texel_size(format, type_).ok_or(INVALID_ENUM)?;
        let alignment = self.unpack_alignment as usize;
        let texture = self.bound_texture_mut(target).ok_or(INVALID_OPERATION)?;
        if texture.immutable {
            return Err(INVALID_OPERATION);
        }

        let info = ImageInfo {
            width: width as u32,
            height: height as u32,
            depth: depth as u32,
            internal_format: internal_format as GLenum,
            samples: 1,
        };
        let mut image = SoftImage::new(info, base_format_of(internal_format as GLenum), TexelLayout::Texel { size });
        if let Some(data) = data {
            let row_len = width as usize * size;
            let rows = height as usize * depth as usize;
            let stride = round_up(row_len, alignment);
            if rows > 0 && data.len() < stride * (rows - 1) + row_len {
                return Err(INVALID_VALUE);
            }
            image.copy_rows(0, 0, 0, row_len, height as usize, depth as usize, data, stride);
        }
        texture.images.insert((target, level), image);
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn tex_sub_image(
        &mut self,
        target: GLenum,
        level: GLint,
        x: GLint,
        y: GLint,
        z: GLint,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
        format: GLenum,
        type_: GLenum,
        data: Option<&[u8]>,
    ) -> GlResult {
        non_negative(&[level, x, y, z, width, height, depth])?;
        let size = texel_size(format, type_).ok_or(INVALID_ENUM)?;
        let alignment = self.unpack_alignment as usize;
        let texture = self.bound_texture_mut(target).ok_or(INVALID_OPERATION)?;
        let image = texture.images.get_mut(&(target, level)).ok_or(INVALID_OPERATION)?;
        if image.layout != (TexelLayout::Texel { size }) {
            return Err(INVALID_OPERATION);
        }
        if !fits(x, width, image.info.width) || !fits(y, height, image.info.height) || !fits(z, depth, image.info.depth)
        {
            return Err(INVALID_VALUE);
        }

        let Some(data) = data else {
            return Ok(());
        };
        let row_len = width as usize * size;
        let rows = height as usize * depth as usize;
        let stride = round_up(row_len, alignment);
        if rows > 0 && data.len() < stride * (rows - 1) + row_len {
            return Err(INVALID_VALUE);
        }
        image.copy_rows(
            x as usize * size,
            y as usize,
            z as usize,
            row_len,
            height as usize,
            depth as usize,
            data,
            stride,
        );
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn compressed_tex_image(
        &mut self,
        target: GLenum,
        level: GLint,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
        border: GLint,
        image_size: GLsizei,
        data: Option<&[u8]>,
    ) -> GlResult {
        if target == TEXTURE_CUBE_MAP {
            return Err(INVALID_ENUM);
        }
        non_negative(&[level, width, height, depth, image_size])?;
        if border != 0 {
            return Err(INVALID_VALUE);
        }
        let layout = match TexelLayout::of_internal_format(internal_format) {
            Some(layout @ TexelLayout::Block { .. }) => layout,
            _ => return Err(INVALID_ENUM),
        };
        let row_len = layout.row_bytes(width as u32);
        let rows = layout.rows(height as u32);
        let expected = row_len * rows * depth as usize;
        if image_size as usize != expected || data.is_some_and(|d| d.len() < expected) {
            return Err(INVALID_VALUE);
        }
        let texture = self.bound_texture_mut(target).ok_or(INVALID_OPERATION)?;
        if texture.immutable {
            return Err(INVALID_OPERATION);
        }

        let info = ImageInfo {
            width: width as u32,
            height: height as u32,
            depth: depth as u32,
            internal_format,
            samples: 1,
        };
        let mut image = SoftImage::new(info, internal_format, layout);
        if let Some(data) = data {
            image.copy_rows(0, 0, 0, row_len, rows, depth as usize, data, row_len);
        }
        texture.images.insert((target, level), image);
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn compressed_tex_sub_image(
        &mut self,
        target: GLenum,
        level: GLint,
        x: GLint,
        y: GLint,
        z: GLint,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
        format: GLenum,
        image_size: GLsizei,
        data: Option<&[u8]>,
    ) -> GlResult {
        non_negative(&[level, x, y, z, width, height, depth, image_size])?;
        let texture = self.bound_texture_mut(target).ok_or(INVALID_OPERATION)?;
        let image = texture.images.get_mut(&(target, level)).ok_or(INVALID_OPERATION)?;
        let TexelLayout::Block { width: bw, height: bh, bytes, .. } = image.layout else {
            return Err(INVALID_OPERATION);
        };
        if image.info.internal_format != format || x as u32 % bw != 0 || y as u32 % bh != 0 {
            return Err(INVALID_OPERATION);
        }
        if !fits(x, width, image.info.width) || !fits(y, height, image.info.height) || !fits(z, depth, image.info.depth)
        {
            return Err(INVALID_VALUE);
        }

        let row_len = image.layout.row_bytes(width as u32);
        let rows = image.layout.rows(height as u32);
        let dst_x_bytes = (x as u32 / bw) as usize * bytes;
        let dst_row = (y as u32 / bh) as usize;
        if dst_x_bytes + row_len > image.row_bytes() || dst_row + rows > image.rows() {
            return Err(INVALID_VALUE);
        }
        let expected = row_len * rows * depth as usize;
        if image_size as usize != expected || data.is_some_and(|d| d.len() < expected) {
            return Err(INVALID_VALUE);
        }

        if let Some(data) = data {
            image.copy_rows(dst_x_bytes, dst_row, z as usize, row_len, rows, depth as usize, data, row_len);
        }
        Ok(())
    }

    fn tex_storage(
        &mut self,
        target: GLenum,
        levels: GLsizei,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
    ) -> GlResult {
        if CUBE_FACE_TARGETS.contains(&target) {
            return Err(INVALID_ENUM);
        }
        if levels < 1 || width < 1 || height < 1 || depth < 1 {
            return Err(INVALID_VALUE);
        }
        let layout = TexelLayout::of_internal_format(internal_format).ok_or(INVALID_ENUM)?;

        let largest = match target {
            TEXTURE_3D => width.max(height).max(depth),
            TEXTURE_1D | TEXTURE_1D_ARRAY => width,
            _ => width.max(height),
        };
        let max_levels = 32 - (largest as u32).leading_zeros();
        if levels as u32 > max_levels {
            return Err(INVALID_OPERATION);
        }

        let texture = self.bound_texture_mut(target).ok_or(INVALID_OPERATION)?;
        if texture.immutable {
            return Err(INVALID_OPERATION);
        }

        let image_targets: Vec<GLenum> = if target == TEXTURE_CUBE_MAP {
            CUBE_FACE_TARGETS.to_vec()
        } else {
            vec![target]
        };
        for level in 0..levels {
            let shift = |extent: GLsizei| ((extent as u32) >> level).max(1);
            let info = ImageInfo {
                width: shift(width),
                // array layers never shrink
                height: if target == TEXTURE_1D_ARRAY { height as u32 } else { shift(height) },
                depth: if target == TEXTURE_3D { shift(depth) } else { depth as u32 },
                internal_format,
                samples: 1,
            };
            for &image_target in &image_targets {
                texture
                    .images
                    .insert((image_target, level), SoftImage::new(info, base_format_of(internal_format), layout));
            }
        }
        texture.immutable = true;
        Ok(())
    }

    fn multisample(
        &mut self,
        target: GLenum,
        samples: GLsizei,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
        immutable: bool,
    ) -> GlResult {
        if target != TEXTURE_2D_MULTISAMPLE {
            return Err(INVALID_ENUM);
        }
        if samples < 1 || width < 1 || height < 1 {
            return Err(INVALID_VALUE);
        }
        let layout = match TexelLayout::of_internal_format(internal_format) {
            Some(layout @ TexelLayout::Texel { .. }) => layout,
            _ => return Err(INVALID_ENUM),
        };
        let texture = self.bound_texture_mut(target).ok_or(INVALID_OPERATION)?;
        if texture.immutable {
            return Err(INVALID_OPERATION);
        }

        let info = ImageInfo {
            width: width as u32,
            height: height as u32,
            depth: 1,
            internal_format,
            samples: samples as u32,
        };
        texture.images.insert((target, 0), SoftImage::new(info, base_format_of(internal_format), layout));
        texture.immutable = immutable;
        Ok(())
    }

    fn renderbuffer_storage(&mut self, internal_format: GLenum, width: GLsizei, height: GLsizei, samples: GLsizei) -> GlResult {
        if width < 1 || height < 1 || samples < 1 {
            return Err(INVALID_VALUE);
        }
        if internal_format_texel_size(internal_format).is_none() {
            return Err(INVALID_ENUM);
        }
        let bound = self.bound_renderbuffer;
        let slot = self.renderbuffers.get_mut(&bound).ok_or(INVALID_OPERATION)?;
        *slot = Some(RenderbufferInfo {
            internal_format,
            width: width as u32,
            height: height as u32,
            samples: samples as u32,
        });
        Ok(())
    }
}

/// In-memory GL context
#[derive(Debug, Default)]
pub struct SoftGlContext {
    state: RefCell<SoftState>,
}

impl SoftGlContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `call`, then run `op` and latch its error
    fn run(&self, call: GlCall, op: impl FnOnce(&mut SoftState) -> GlResult) {
        let mut state = self.state.borrow_mut();
        let injected = if call.is_write() { state.take_injected_error() } else { None };
        state.calls.push(call);
        let result = match injected {
            Some(error) => Err(error),
            None => op(&mut state),
        };
        if let Err(error) = result {
            state.record_error(error);
        }
    }

    // ===== INSPECTION =====

    /// Every native call made so far, in order
    pub fn calls(&self) -> Vec<GlCall> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Fail the write call that comes after `after` successful write calls
    pub fn inject_error_on_write(&self, after: usize, error: GLenum) {
        self.state.borrow_mut().injected_error = Some((after, error));
    }

    /// Leave `error` pending, as an unchecked failure elsewhere on the context would
    pub fn raise_error(&self, error: GLenum) {
        self.state.borrow_mut().record_error(error);
    }

    /// Texel bytes of one image, tightly packed
    pub fn read_image(&self, texture: GLuint, image_target: GLenum, level: GLint) -> Option<Vec<u8>> {
        let state = self.state.borrow();
        let image = state.textures.get(&texture)?.images.get(&(image_target, level))?;
        Some(image.data.clone())
    }

    pub fn image_info(&self, texture: GLuint, image_target: GLenum, level: GLint) -> Option<ImageInfo> {
        let state = self.state.borrow();
        let image = state.textures.get(&texture)?.images.get(&(image_target, level))?;
        Some(image.info)
    }

    pub fn texture_parameter(&self, texture: GLuint, pname: GLenum) -> Option<GLint> {
        self.state.borrow().textures.get(&texture)?.params.get(&pname).copied()
    }

    pub fn is_immutable(&self, texture: GLuint) -> bool {
        self.state.borrow().textures.get(&texture).is_some_and(|t| t.immutable)
    }

    pub fn unpack_alignment(&self) -> GLint {
        self.state.borrow().unpack_alignment
    }

    /// Texture bound to `target` (0 when none)
    pub fn bound_texture(&self, target: GLenum) -> GLuint {
        self.state.borrow().bindings.get(&target).copied().unwrap_or(0)
    }

    pub fn texture_exists(&self, texture: GLuint) -> bool {
        self.state.borrow().textures.contains_key(&texture)
    }

    pub fn live_textures(&self) -> usize {
        self.state.borrow().textures.len()
    }

    /// Allocation of a live renderbuffer (`None` also when never allocated)
    pub fn renderbuffer(&self, renderbuffer: GLuint) -> Option<RenderbufferInfo> {
        self.state.borrow().renderbuffers.get(&renderbuffer).copied().flatten()
    }

    pub fn renderbuffer_exists(&self, renderbuffer: GLuint) -> bool {
        self.state.borrow().renderbuffers.contains_key(&renderbuffer)
    }

    pub fn is_resident(&self, handle: u64) -> bool {
        self.state.borrow().resident.contains(&handle)
    }

    /// Sample one texel of an 8-bit normalized image as RGBA, applying swizzle
    ///
    /// Missing color channels read as 0 and a missing alpha reads as 255.
    pub fn sample_texel(
        &self,
        texture: GLuint,
        image_target: GLenum,
        level: GLint,
        x: u32,
        y: u32,
        z: u32,
    ) -> Option<[u8; 4]> {
        let state = self.state.borrow();
        let texture = state.textures.get(&texture)?;
        let image = texture.images.get(&(image_target, level))?;
        let TexelLayout::Texel { size } = image.layout else {
            return None;
        };
        let components = match image.base_format {
            RED | ALPHA | LUMINANCE => 1,
            RG | LUMINANCE_ALPHA => 2,
            RGB => 3,
            RGBA => 4,
            _ => return None,
        };
        if size != components || x >= image.info.width || y >= image.info.height || z >= image.info.depth {
            return None;
        }

        let offset = ((z as usize * image.rows()) + y as usize) * image.row_bytes() + x as usize * size;
        let t = &image.data[offset..offset + size];
        let raw = match image.base_format {
            RED => [t[0], 0, 0, 255],
            RG => [t[0], t[1], 0, 255],
            RGB => [t[0], t[1], t[2], 255],
            ALPHA => [0, 0, 0, t[0]],
            LUMINANCE => [t[0], t[0], t[0], 255],
            LUMINANCE_ALPHA => [t[0], t[0], t[0], t[1]],
            _ => [t[0], t[1], t[2], t[3]],
        };

        let swizzle = |pname: GLenum, identity: usize| -> u8 {
            match texture.params.get(&pname).map(|&p| p as GLenum) {
                Some(RED) => raw[0],
                Some(GREEN) => raw[1],
                Some(BLUE) => raw[2],
                Some(ALPHA) => raw[3],
                Some(ZERO) => 0,
                Some(ONE) => 255,
                _ => raw[identity],
            }
        };
        Some([
            swizzle(TEXTURE_SWIZZLE_R, 0),
            swizzle(TEXTURE_SWIZZLE_G, 1),
            swizzle(TEXTURE_SWIZZLE_B, 2),
            swizzle(TEXTURE_SWIZZLE_A, 3),
        ])
    }
}

impl GlContext for SoftGlContext {
    fn gen_texture(&self) -> GLuint {
        let mut state = self.state.borrow_mut();
        let name = state.next_name;
        state.next_name += 1;
        state.textures.insert(name, SoftTexture::default());
        state.calls.push(GlCall::GenTexture(name));
        name
    }

    fn delete_texture(&self, texture: GLuint) {
        self.run(GlCall::DeleteTexture(texture), |state| {
            if state.textures.remove(&texture).is_none() {
                return Ok(());
            }
            for bound in state.bindings.values_mut() {
                if *bound == texture {
                    *bound = 0;
                }
            }
            if let Some(handle) = state.handles.remove(&texture) {
                state.resident.remove(&handle);
            }
            Ok(())
        });
    }

    fn bind_texture(&self, target: GLenum, texture: GLuint) {
        self.run(GlCall::BindTexture { target, texture }, |state| {
            if texture != 0 {
                let tex = state.textures.get_mut(&texture).ok_or(INVALID_OPERATION)?;
                if tex.target == 0 {
                    tex.target = target;
                } else if tex.target != target {
                    return Err(INVALID_OPERATION);
                }
            }
            state.bindings.insert(target, texture);
            Ok(())
        });
    }

    fn tex_parameteri(&self, target: GLenum, pname: GLenum, param: GLint) {
        self.run(GlCall::TexParameteri { target, pname, param }, |state| {
            if CUBE_FACE_TARGETS.contains(&target) {
                return Err(INVALID_ENUM);
            }
            let texture = state.bound_texture_mut(target).ok_or(INVALID_OPERATION)?;
            texture.params.insert(pname, param);
            Ok(())
        });
    }

    fn pixel_storei(&self, pname: GLenum, param: GLint) {
        self.run(GlCall::PixelStorei { pname, param }, |state| {
            if pname != UNPACK_ALIGNMENT {
                return Err(INVALID_ENUM);
            }
            if ![1, 2, 4, 8].contains(&param) {
                return Err(INVALID_VALUE);
            }
            state.unpack_alignment = param;
            Ok(())
        });
    }

    fn get_error(&self) -> GLenum {
        let mut state = self.state.borrow_mut();
        state.calls.push(GlCall::GetError);
        std::mem::replace(&mut state.error, NO_ERROR)
    }

    fn tex_image_1d(
        &self,
        target: GLenum,
        level: GLint,
        internal_format: GLint,
        width: GLsizei,
        border: GLint,
        format: GLenum,
        type_: GLenum,
        data: Option<&[u8]>,
    ) {
        let call = GlCall::TexImage {
            dims: 1,
            target,
            level,
            internal_format: internal_format as GLenum,
            width,
            height: 1,
            depth: 1,
            format,
            type_,
            has_data: data.is_some(),
        };
        self.run(call, |state| {
            state.tex_image(target, level, internal_format, width, 1, 1, border, format, type_, data)
        });
    }

    fn tex_image_2d(
        &self,
        target: GLenum,
        level: GLint,
        internal_format: GLint,
        width: GLsizei,
        height: GLsizei,
        border: GLint,
        format: GLenum,
        type_: GLenum,
        data: Option<&[u8]>,
    ) {
        let call = GlCall::TexImage {
            dims: 2,
            target,
            level,
            internal_format: internal_format as GLenum,
            width,
            height,
            depth: 1,
            format,
            type_,
            has_data: data.is_some(),
        };
        self.run(call, |state| {
            state.tex_image(target, level, internal_format, width, height, 1, border, format, type_, data)
        });
    }

    fn tex_image_3d(
        &self,
        target: GLenum,
        level: GLint,
        internal_format: GLint,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
        border: GLint,
        format: GLenum,
        type_: GLenum,
        data: Option<&[u8]>,
    ) {
        let call = GlCall::TexImage {
            dims: 3,
            target,
            level,
            internal_format: internal_format as GLenum,
            width,
            height,
            depth,
            format,
            type_,
            has_data: data.is_some(),
        };
        self.run(call, |state| {
            state.tex_image(target, level, internal_format, width, height, depth, border, format, type_, data)
        });
    }

    fn tex_sub_image_1d(
        &self,
        target: GLenum,
        level: GLint,
        x: GLint,
        width: GLsizei,
        format: GLenum,
        type_: GLenum,
        data: Option<&[u8]>,
    ) {
        let call = GlCall::TexSubImage {
            dims: 1,
            target,
            level,
            x,
            y: 0,
            z: 0,
            width,
            height: 1,
            depth: 1,
            format,
            type_,
            has_data: data.is_some(),
        };
        self.run(call, |state| state.tex_sub_image(target, level, x, 0, 0, width, 1, 1, format, type_, data));
    }

    fn tex_sub_image_2d(
        &self,
        target: GLenum,
        level: GLint,
        x: GLint,
        y: GLint,
        width: GLsizei,
        height: GLsizei,
        format: GLenum,
        type_: GLenum,
        data: Option<&[u8]>,
    ) {
        let call = GlCall::TexSubImage {
            dims: 2,
            target,
            level,
            x,
            y,
            z: 0,
            width,
            height,
            depth: 1,
            format,
            type_,
            has_data: data.is_some(),
        };
        self.run(call, |state| {
            state.tex_sub_image(target, level, x, y, 0, width, height, 1, format, type_, data)
        });
    }

    fn tex_sub_image_3d(
        &self,
        target: GLenum,
        level: GLint,
        x: GLint,
        y: GLint,
        z: GLint,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
        format: GLenum,
        type_: GLenum,
        data: Option<&[u8]>,
    ) {
        let call = GlCall::TexSubImage {
            dims: 3,
            target,
            level,
            x,
            y,
            z,
            width,
            height,
            depth,
            format,
            type_,
            has_data: data.is_some(),
        };
        self.run(call, |state| {
            state.tex_sub_image(target, level, x, y, z, width, height, depth, format, type_, data)
        });
    }

    fn compressed_tex_image_1d(
        &self,
        target: GLenum,
        level: GLint,
        internal_format: GLenum,
        width: GLsizei,
        border: GLint,
        image_size: GLsizei,
        data: Option<&[u8]>,
    ) {
        let call = GlCall::CompressedTexImage {
            dims: 1,
            target,
            level,
            internal_format,
            width,
            height: 1,
            depth: 1,
            image_size,
            has_data: data.is_some(),
        };
        self.run(call, |state| {
            state.compressed_tex_image(target, level, internal_format, width, 1, 1, border, image_size, data)
        });
    }

    fn compressed_tex_image_2d(
        &self,
        target: GLenum,
        level: GLint,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
        border: GLint,
        image_size: GLsizei,
        data: Option<&[u8]>,
    ) {
        let call = GlCall::CompressedTexImage {
            dims: 2,
            target,
            level,
            internal_format,
            width,
            height,
            depth: 1,
            image_size,
            has_data: data.is_some(),
        };
        self.run(call, |state| {
            state.compressed_tex_image(target, level, internal_format, width, height, 1, border, image_size, data)
        });
    }

    fn compressed_tex_image_3d(
        &self,
        target: GLenum,
        level: GLint,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
        border: GLint,
        image_size: GLsizei,
        data: Option<&[u8]>,
    ) {
        let call = GlCall::CompressedTexImage {
            dims: 3,
            target,
            level,
            internal_format,
            width,
            height,
            depth,
            image_size,
            has_data: data.is_some(),
        };
        self.run(call, |state| {
            state.compressed_tex_image(target, level, internal_format, width, height, depth, border, image_size, data)
        });
    }

    fn compressed_tex_sub_image_1d(
        &self,
        target: GLenum,
        level: GLint,
        x: GLint,
        width: GLsizei,
        format: GLenum,
        image_size: GLsizei,
        data: Option<&[u8]>,
    ) {
        let call = GlCall::CompressedTexSubImage {
            dims: 1,
            target,
            level,
            x,
            y: 0,
            z: 0,
            width,
            height: 1,
            depth: 1,
            format,
            image_size,
            has_data: data.is_some(),
        };
        self.run(call, |state| {
            state.compressed_tex_sub_image(target, level, x, 0, 0, width, 1, 1, format, image_size, data)
        });
    }

    fn compressed_tex_sub_image_2d(
        &self,
        target: GLenum,
        level: GLint,
        x: GLint,
        y: GLint,
        width: GLsizei,
        height: GLsizei,
        format: GLenum,
        image_size: GLsizei,
        data: Option<&[u8]>,
    ) {
        let call = GlCall::CompressedTexSubImage {
            dims: 2,
            target,
            level,
            x,
            y,
            z: 0,
            width,
            height,
            depth: 1,
            format,
            image_size,
            has_data: data.is_some(),
        };
        self.run(call, |state| {
            state.compressed_tex_sub_image(target, level, x, y, 0, width, height, 1, format, image_size, data)
        });
    }

    fn compressed_tex_sub_image_3d(
        &self,
        target: GLenum,
        level: GLint,
        x: GLint,
        y: GLint,
        z: GLint,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
        format: GLenum,
        image_size: GLsizei,
        data: Option<&[u8]>,
    ) {
        let call = GlCall::CompressedTexSubImage {
            dims: 3,
            target,
            level,
            x,
            y,
            z,
            width,
            height,
            depth,
            format,
            image_size,
            has_data: data.is_some(),
        };
        self.run(call, |state| {
            state.compressed_tex_sub_image(target, level, x, y, z, width, height, depth, format, image_size, data)
        });
    }

    fn tex_storage_1d(&self, target: GLenum, levels: GLsizei, internal_format: GLenum, width: GLsizei) {
        let call = GlCall::TexStorage {
            dims: 1,
            target,
            levels,
            internal_format,
            width,
            height: 1,
            depth: 1,
        };
        self.run(call, |state| state.tex_storage(target, levels, internal_format, width, 1, 1));
    }

    fn tex_storage_2d(
        &self,
        target: GLenum,
        levels: GLsizei,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
    ) {
        let call = GlCall::TexStorage {
            dims: 2,
            target,
            levels,
            internal_format,
            width,
            height,
            depth: 1,
        };
        self.run(call, |state| state.tex_storage(target, levels, internal_format, width, height, 1));
    }

    fn tex_storage_3d(
        &self,
        target: GLenum,
        levels: GLsizei,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
    ) {
        let call = GlCall::TexStorage {
            dims: 3,
            target,
            levels,
            internal_format,
            width,
            height,
            depth,
        };
        self.run(call, |state| state.tex_storage(target, levels, internal_format, width, height, depth));
    }

    fn tex_storage_2d_multisample(
        &self,
        target: GLenum,
        samples: GLsizei,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
        _fixed_sample_locations: bool,
    ) {
        let call = GlCall::TexStorageMultisample { target, samples, internal_format, width, height };
        self.run(call, |state| state.multisample(target, samples, internal_format, width, height, true));
    }

    fn tex_image_2d_multisample(
        &self,
        target: GLenum,
        samples: GLsizei,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
        _fixed_sample_locations: bool,
    ) {
        let call = GlCall::TexImageMultisample { target, samples, internal_format, width, height };
        self.run(call, |state| state.multisample(target, samples, internal_format, width, height, false));
    }

    fn get_texture_handle(&self, texture: GLuint) -> u64 {
        let mut handle = 0;
        self.run(GlCall::GetTextureHandle(texture), |state| {
            if !state.textures.contains_key(&texture) {
                return Err(INVALID_VALUE);
            }
            let next = state.next_handle;
            handle = *state.handles.entry(texture).or_insert(next);
            if handle == next {
                state.next_handle += 0x10;
            }
            Ok(())
        });
        handle
    }

    fn make_texture_handle_resident(&self, handle: u64) {
        self.run(GlCall::MakeResident(handle), |state| {
            if !state.handles.values().any(|&h| h == handle) || !state.resident.insert(handle) {
                return Err(INVALID_OPERATION);
            }
            Ok(())
        });
    }

    fn make_texture_handle_non_resident(&self, handle: u64) {
        self.run(GlCall::MakeNonResident(handle), |state| {
            if !state.resident.remove(&handle) {
                return Err(INVALID_OPERATION);
            }
            Ok(())
        });
    }

    fn gen_renderbuffer(&self) -> GLuint {
        let mut state = self.state.borrow_mut();
        let name = state.next_name;
        state.next_name += 1;
        state.renderbuffers.insert(name, None);
        state.calls.push(GlCall::GenRenderbuffer(name));
        name
    }

    fn delete_renderbuffer(&self, renderbuffer: GLuint) {
        self.run(GlCall::DeleteRenderbuffer(renderbuffer), |state| {
            state.renderbuffers.remove(&renderbuffer);
            if state.bound_renderbuffer == renderbuffer {
                state.bound_renderbuffer = 0;
            }
            Ok(())
        });
    }

    fn bind_renderbuffer(&self, target: GLenum, renderbuffer: GLuint) {
        self.run(GlCall::BindRenderbuffer(renderbuffer), |state| {
            if target != RENDERBUFFER {
                return Err(INVALID_ENUM);
            }
            if renderbuffer != 0 && !state.renderbuffers.contains_key(&renderbuffer) {
                return Err(INVALID_OPERATION);
            }
            state.bound_renderbuffer = renderbuffer;
            Ok(())
        });
    }

    fn renderbuffer_storage(&self, target: GLenum, internal_format: GLenum, width: GLsizei, height: GLsizei) {
        let call = GlCall::RenderbufferStorage { internal_format, width, height };
        self.run(call, |state| {
            if target != RENDERBUFFER {
                return Err(INVALID_ENUM);
            }
            state.renderbuffer_storage(internal_format, width, height, 1)
        });
    }

    fn renderbuffer_storage_multisample(
        &self,
        target: GLenum,
        samples: GLsizei,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
    ) {
        let call = GlCall::RenderbufferStorageMultisample { samples, internal_format, width, height };
        self.run(call, |state| {
            if target != RENDERBUFFER {
                return Err(INVALID_ENUM);
            }
            state.renderbuffer_storage(internal_format, width, height, samples)
        });
    }
}

#[cfg(test)]
#[path = "soft_context_tests.rs"]
mod tests;
