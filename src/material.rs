//! Material loading from the bundled shader blob

use crate::engine::{Engine, EngineError, EngineResult};

/// The pre-compiled baked-color material, bundled into the binary and handed
/// to the engine verbatim.
pub const BAKED_COLOR: &[u8] = include_bytes!("../assets/baked_color.wgsl");

/// Check that a material blob is usable as shader source.
///
/// The blob is opaque to everything but the engine; the only validation done
/// here is the UTF-8 requirement of WGSL. Anything deeper is rejected by the
/// engine's own shader validation when the module is built.
pub fn validate_source(bytes: &[u8]) -> EngineResult<&str> {
    std::str::from_utf8(bytes)
        .map_err(|e| EngineError::MaterialInvalid(format!("blob is not valid UTF-8: {e}")))
}

/// A material backed by an engine-owned shader module.
pub struct Material {
    shader: wgpu::ShaderModule,
    name: String,
}

impl Material {
    /// Build a material from an opaque source blob.
    ///
    /// Fails if the blob is malformed. A blob that passes validation here but
    /// is rejected by the engine's shader compiler raises an uncaptured device
    /// error, which terminates the process - the sandbox has no fallback
    /// material.
    pub fn from_bytes(engine: &Engine, name: &str, bytes: &[u8]) -> EngineResult<Self> {
        let source = validate_source(bytes)?;

        let shader = engine
            .device()
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(name),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            });

        log::info!("material '{}' loaded ({} bytes)", name, bytes.len());

        Ok(Self {
            shader,
            name: name.to_string(),
        })
    }

    pub fn shader(&self) -> &wgpu::ShaderModule {
        &self.shader
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_material_is_valid_source() {
        let source = validate_source(BAKED_COLOR).unwrap();
        assert!(source.contains("vs_main"));
        assert!(source.contains("fs_main"));
    }

    #[test]
    fn test_rejects_non_utf8_blob() {
        assert!(validate_source(&[0xff, 0xfe, 0x00, 0x80]).is_err());
    }
}
