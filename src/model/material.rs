//! Material attributes
//!
//! The eleven authorable attributes are the ones the NWN2 toolset exposes
//! per object; the map-name fields beyond the tint map are carried by the
//! MDB material block and preserved for round-tripping.

/// Bit flags stored in the MDB material block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialFlags(pub u32);

impl MaterialFlags {
    pub const TRANSPARENCY_MASK: u32 = 0x01;
    pub const ENVIRONMENT_MAP: u32 = 0x08;
    pub const HEAD: u32 = 0x10;
    pub const GLOW: u32 = 0x20;
    pub const CAST_NO_SHADOWS: u32 = 0x40;
    pub const PROJECTED_TEXTURES: u32 = 0x80;

    pub fn contains(self, bit: u32) -> bool {
        self.0 & bit != 0
    }
}

/// Surface appearance attributes for one mesh.
///
/// Colors are normalized floating values in [0, 1]. Map names are short
/// identifier strings (32-byte fields on disk), empty when unset.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub diffuse_map: String,
    pub normal_map: String,
    pub tint_map: String,
    pub glow_map: String,
    pub diffuse_color: [f32; 3],
    pub specular_color: [f32; 3],
    pub specular_level: f32,
    pub glossiness: f32,
    pub transparency_mask: bool,
    pub head: bool,
    pub cast_no_shadows: bool,
    pub environment_map: bool,
    pub glow: bool,
    pub projected_textures: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse_map: String::new(),
            normal_map: String::new(),
            tint_map: String::new(),
            glow_map: String::new(),
            diffuse_color: [1.0, 1.0, 1.0],
            specular_color: [1.0, 1.0, 1.0],
            specular_level: 1.0,
            glossiness: 20.0,
            transparency_mask: false,
            head: false,
            cast_no_shadows: false,
            environment_map: false,
            glow: false,
            projected_textures: false,
        }
    }
}

impl Material {
    /// Pack the boolean attributes into the MDB flag word.
    pub fn flags(&self) -> MaterialFlags {
        let mut bits = 0;
        if self.transparency_mask {
            bits |= MaterialFlags::TRANSPARENCY_MASK;
        }
        if self.environment_map {
            bits |= MaterialFlags::ENVIRONMENT_MAP;
        }
        if self.head {
            bits |= MaterialFlags::HEAD;
        }
        if self.glow {
            bits |= MaterialFlags::GLOW;
        }
        if self.cast_no_shadows {
            bits |= MaterialFlags::CAST_NO_SHADOWS;
        }
        if self.projected_textures {
            bits |= MaterialFlags::PROJECTED_TEXTURES;
        }
        MaterialFlags(bits)
    }

    /// Unpack the MDB flag word into the boolean attributes.
    pub fn set_flags(&mut self, flags: MaterialFlags) {
        self.transparency_mask = flags.contains(MaterialFlags::TRANSPARENCY_MASK);
        self.environment_map = flags.contains(MaterialFlags::ENVIRONMENT_MAP);
        self.head = flags.contains(MaterialFlags::HEAD);
        self.glow = flags.contains(MaterialFlags::GLOW);
        self.cast_no_shadows = flags.contains(MaterialFlags::CAST_NO_SHADOWS);
        self.projected_textures = flags.contains(MaterialFlags::PROJECTED_TEXTURES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_toolset() {
        let m = Material::default();
        assert_eq!(m.specular_level, 1.0);
        assert_eq!(m.glossiness, 20.0);
        assert_eq!(m.diffuse_color, [1.0, 1.0, 1.0]);
        assert_eq!(m.flags().0, 0);
    }

    #[test]
    fn flags_round_trip() {
        let mut m = Material {
            transparency_mask: true,
            glow: true,
            projected_textures: true,
            ..Material::default()
        };
        let flags = m.flags();
        assert_eq!(flags.0, 0xA1);

        let mut back = Material::default();
        back.set_flags(flags);
        m.tint_map.clear();
        assert_eq!(back.transparency_mask, m.transparency_mask);
        assert_eq!(back.glow, m.glow);
        assert_eq!(back.projected_textures, m.projected_textures);
        assert!(!back.head);
    }
}
