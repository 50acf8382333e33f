use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use macroquad::{
    math::{Rect, Vec2 as MacroquadVec2},
    texture::{self, DrawTextureParams, FilterMode, Image, Texture2D},
};
use snake_arena_rendering::{palette, sprites::SpriteInstance};

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Cache of sprite sheet textures keyed by image bank.
#[derive(Debug)]
pub(crate) struct SpriteAtlas {
    textures: HashMap<u8, Texture2D>,
}

impl SpriteAtlas {
    /// Loads every image listed in the manifest at `path`.
    pub(crate) fn from_manifest_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_manifest_with_loader(path, default_loader)
    }

    /// Draws `sprite` at `position` scaled by `scale`.
    ///
    /// Returns `false` when the atlas has no texture for the sprite's image.
    pub(crate) fn draw(&self, sprite: &SpriteInstance, position: MacroquadVec2, scale: f32) -> bool {
        let Some(texture) = self.textures.get(&sprite.image).copied() else {
            return false;
        };

        let (width, height) = sprite.source.size();
        let params = DrawTextureParams {
            dest_size: Some(MacroquadVec2::new(
                width as f32 * scale,
                height as f32 * scale,
            )),
            source: Some(Rect::new(
                sprite.source.u as f32,
                sprite.source.v as f32,
                width as f32,
                height as f32,
            )),
            flip_x: sprite.source.flip_x(),
            flip_y: sprite.source.flip_y(),
            ..DrawTextureParams::default()
        };

        texture::draw_texture_ex(
            texture,
            position.x,
            position.y,
            macroquad::color::WHITE,
            params,
        );
        true
    }

    /// Number of loaded image banks.
    pub(crate) fn len(&self) -> usize {
        self.textures.len()
    }

    fn from_manifest_with_loader(
        path: impl AsRef<Path>,
        mut loader: impl FnMut(u8, &Path) -> Result<Texture2D>,
    ) -> Result<Self> {
        let manifest_path = path.as_ref();
        let contents = fs::read_to_string(manifest_path).with_context(|| {
            format!(
                "failed to read sprite manifest at {}",
                manifest_path.display()
            )
        })?;
        let base = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let entries = parse_manifest(&contents, &base)?;
        Self::from_entries(entries, &mut loader)
    }

    fn from_entries(
        entries: Vec<(u8, PathBuf)>,
        loader: &mut impl FnMut(u8, &Path) -> Result<Texture2D>,
    ) -> Result<Self> {
        let mut textures = HashMap::with_capacity(entries.len());
        for (image, path) in entries {
            let texture = loader(image, &path).with_context(|| {
                format!("failed to load image {image} from {}", path.display())
            })?;
            if textures.insert(image, texture).is_some() {
                bail!("duplicate entry for image {image}");
            }
        }
        Ok(Self { textures })
    }
}

fn default_loader(_image: u8, path: &Path) -> Result<Texture2D> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read sprite sheet at {}", path.display()))?;
    let mut image = Image::from_file_with_format(&bytes, None);
    apply_transparency_key(image.get_image_data_mut(), transparency_key_rgb());
    let texture = Texture2D::from_image(&image);
    texture.set_filter(FilterMode::Nearest);
    Ok(texture)
}

fn transparency_key_rgb() -> [u8; 3] {
    let key = palette(snake_arena_rendering::sprites::TRANSPARENT_KEY);
    [
        (key.red * 255.0).round() as u8,
        (key.green * 255.0).round() as u8,
        (key.blue * 255.0).round() as u8,
    ]
}

/// Clears the alpha channel of every pixel whose colour equals `key`.
fn apply_transparency_key(pixels: &mut [[u8; 4]], key: [u8; 3]) {
    for pixel in pixels {
        if pixel[..3] == key {
            pixel[3] = 0;
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct Manifest {
    version: u32,
    images: HashMap<String, String>,
}

fn parse_manifest(contents: &str, base_path: &Path) -> Result<Vec<(u8, PathBuf)>> {
    let manifest: Manifest =
        toml::from_str(contents).context("failed to parse sprite manifest toml contents")?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        bail!(
            "unsupported sprite manifest version {}; expected {}",
            manifest.version,
            SUPPORTED_MANIFEST_VERSION
        );
    }

    let mut resolved = Vec::with_capacity(manifest.images.len());
    for (name, relative_path) in manifest.images {
        let image = name
            .parse::<u8>()
            .with_context(|| format!("image key `{name}` is not an image bank number"))?;
        resolved.push((image, base_path.join(relative_path)));
    }

    if resolved.is_empty() {
        bail!("sprite manifest lists no images");
    }

    resolved.sort_by_key(|(image, _)| *image);
    Ok(resolved)
}
