//! Surface descriptions handed to the renderer.
//!
//! Entities only reference textures by id; the front-end owns the GPU
//! resources and swaps placeholders for decoded images as they arrive.

use fnv::FnvHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

/// Where a texture's pixels come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextureSource {
    /// Image file fetched and decoded at runtime (sRGB).
    Url(String),
    /// Procedural seal stripes, see [`crate::crimp`].
    Crimp,
}

/// Deduplicating list of every texture the scene references.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    sources: Vec<TextureSource>,
    by_url: FnvHashMap<String, TextureId>,
    crimp: Option<TextureId>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(&mut self, path: &str) -> TextureId {
        if let Some(id) = self.by_url.get(path) {
            return *id;
        }
        let id = TextureId(self.sources.len());
        self.sources.push(TextureSource::Url(path.to_owned()));
        self.by_url.insert(path.to_owned(), id);
        id
    }

    pub fn crimp(&mut self) -> TextureId {
        if let Some(id) = self.crimp {
            return id;
        }
        let id = TextureId(self.sources.len());
        self.sources.push(TextureSource::Crimp);
        self.crimp = Some(id);
        id
    }

    #[cfg(test)]
    fn get(&self, id: TextureId) -> Option<&TextureSource> {
        self.sources.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TextureId, &TextureSource)> {
        self.sources
            .iter()
            .enumerate()
            .map(|(i, s)| (TextureId(i), s))
    }
}

/// Physically-flavoured material parameters (linear colour).
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialSpec {
    pub color: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
    pub clearcoat: f32,
    pub texture: Option<TextureId>,
}

impl Default for MaterialSpec {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            roughness: 1.0,
            metalness: 0.0,
            clearcoat: 0.0,
            texture: None,
        }
    }
}

impl MaterialSpec {
    pub fn textured(texture: TextureId, roughness: f32, metalness: f32, clearcoat: f32) -> Self {
        Self {
            roughness,
            metalness,
            clearcoat,
            texture: Some(texture),
            ..Default::default()
        }
    }
}

/// Convert a packed sRGB hex colour (`0xRRGGBB`) to linear RGB.
pub fn srgb_hex_to_linear(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xff) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(16), channel(8), channel(0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_deduplicates_paths() {
        let mut reg = TextureRegistry::new();
        let back_a = reg.url("./public/cards/Back.png");
        let front = reg.url("./public/cards/A.png");
        let back_b = reg.url("./public/cards/Back.png");
        let crimp_a = reg.crimp();
        let crimp_b = reg.crimp();
        assert_eq!(back_a, back_b);
        assert_ne!(back_a, front);
        assert_eq!(crimp_a, crimp_b);
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.get(crimp_a), Some(&TextureSource::Crimp));
    }

    #[test]
    fn hex_conversion_endpoints() {
        assert_eq!(srgb_hex_to_linear(0xffffff), [1.0, 1.0, 1.0]);
        assert_eq!(srgb_hex_to_linear(0x000000), [0.0, 0.0, 0.0]);
        let [r, g, b] = srgb_hex_to_linear(0x808080);
        assert!((r - 0.2158).abs() < 1e-3 && r == g && g == b);
    }
}
