/*!
# Texture Layer

Portable GPU texture resources over heterogeneous native backends.

This crate provides the backend-agnostic half of the layer: texture
descriptors, pixel formats and their block math, sub-region descriptors,
the immutable device capability set, and the `Texture` / `Device` traits.
Backend crates (GL-family, unified memory) implement those traits and own
the allocation strategy and region upload logic.

## Architecture

- **Device**: Factory trait creating textures for one native context
- **Texture**: Texture resource trait (upload, cube face upload, resident handle)
- **Capabilities**: Feature flags and per-format capability bits, fixed at device creation
- **TextureDesc / TextureRangeDesc**: What to create / which texels to write
- **upload_mip_chain**: Caller-side pass populating every mip level

All operations on a device and its textures run on the thread that owns the
native context. Nothing here locks except the process-wide logger slot.
*/

// Internal modules
mod error;
mod config;
mod capabilities;
mod device;
pub mod log;
pub mod texture;

// Main texlayer namespace module
pub mod texlayer {
    // Error types
    pub use crate::error::{Error, ErrorKind, Result};

    // Configuration and capabilities
    pub use crate::config::Config;
    pub use crate::capabilities::{
        Capabilities, CapabilitiesBuilder, DeviceFeatures, DeviceRequirements,
        TextureFormatCapabilities,
    };

    // Device factory trait
    pub use crate::device::{BackendType, Device};

    // Logging sub-module (types and slot functions)
    pub mod log {
        pub use crate::log::{
            log, log_detailed, reset_logger, set_logger, DefaultLogger, LogEntry, LogSeverity,
            Logger,
        };
    }

    // Texture sub-module
    pub mod texture {
        pub use crate::texture::*;
    }
}
