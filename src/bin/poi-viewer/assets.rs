//! Scene and image loading from embedded assets or a scene directory on disk.

use poi_viewer::{Scene, SceneError};
use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use thiserror::Error;

/// Embeds all assets from the assets/ directory into the binary.
/// In debug mode, assets are loaded from the filesystem for faster iteration.
/// In release mode, assets are compressed and embedded in the binary.
#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Assets;

/// Name of the bundled scene description.
const SCENE_FILE: &str = "scene.ron";

/// Errors that can occur when loading the scene description.
#[derive(Error, Debug)]
pub enum SceneLoadError {
    #[error("{0} not found in embedded assets")]
    SceneNotFound(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid UTF-8 in scene file: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("failed to parse scene file: {0}")]
    ParseError(#[from] ron::de::SpannedError),
    #[error("invalid scene: {0}")]
    Invalid(#[from] SceneError),
}

/// Errors that can occur when loading and decoding images.
#[derive(Error, Debug)]
pub enum ImageLoadError {
    #[error("asset not found: {0}")]
    AssetNotFound(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode image '{path}': {source}")]
    DecodeError {
        path: String,
        source: image::ImageError,
    },
    #[error("failed to parse SVG '{path}': {source}")]
    SvgError {
        path: String,
        source: resvg::usvg::Error,
    },
    #[error("SVG '{0}' has an empty canvas")]
    EmptySvg(String),
}

/// Where scene files are read from.
#[derive(Debug, Clone)]
pub enum AssetRoot {
    /// Assets compiled into the binary.
    Embedded,
    /// A directory on disk, holding an external scene and its images.
    Directory(PathBuf),
}

impl AssetRoot {
    fn read_image(&self, path: &str) -> Result<Cow<'static, [u8]>, ImageLoadError> {
        match self {
            AssetRoot::Embedded => Assets::get(path)
                .map(|file| file.data)
                .ok_or_else(|| ImageLoadError::AssetNotFound(path.to_string())),
            AssetRoot::Directory(dir) => {
                let full_path = dir.join(path);
                std::fs::read(&full_path)
                    .map(Cow::Owned)
                    .map_err(|source| ImageLoadError::Io {
                        path: full_path,
                        source,
                    })
            }
        }
    }
}

/// Decoded image data ready for texture creation.
pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// State of the background image being loaded asynchronously.
pub enum AssetLoadState {
    /// Image is being decoded in a background thread.
    Loading(mpsc::Receiver<Result<DecodedImage, ImageLoadError>>),
    /// Image has been decoded and is ready for texture creation.
    Ready(DecodedImage),
    /// Loading failed; stores the error message (already displayed via toast).
    Error(String),
}

/// Loads and decodes the background image. SVGs are rasterised at their natural size.
pub fn load_and_decode_image(root: &AssetRoot, path: &str) -> Result<DecodedImage, ImageLoadError> {
    let data = root.read_image(path)?;

    let is_svg = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if is_svg {
        return rasterize_svg(path, &data);
    }

    let img = image::load_from_memory(&data).map_err(|source| ImageLoadError::DecodeError {
        path: path.to_string(),
        source,
    })?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(DecodedImage {
        pixels: rgba.into_raw(),
        width,
        height,
    })
}

fn rasterize_svg(path: &str, data: &[u8]) -> Result<DecodedImage, ImageLoadError> {
    let tree = resvg::usvg::Tree::from_data(data, &resvg::usvg::Options::default()).map_err(
        |source| ImageLoadError::SvgError {
            path: path.to_string(),
            source,
        },
    )?;

    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| ImageLoadError::EmptySvg(path.to_string()))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::default(),
        &mut pixmap.as_mut(),
    );

    // tiny-skia stores premultiplied pixels
    let pixels = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let color = pixel.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
        .collect();

    Ok(DecodedImage {
        pixels,
        width: size.width(),
        height: size.height(),
    })
}

/// Loads and validates the bundled scene.
pub fn load_embedded_scene() -> Result<Scene, SceneLoadError> {
    let file =
        Assets::get(SCENE_FILE).ok_or_else(|| SceneLoadError::SceneNotFound(SCENE_FILE.to_string()))?;
    let ron_string = std::str::from_utf8(&file.data)?;
    parse_scene(ron_string)
}

/// Loads and validates a scene file from disk.
pub fn load_scene_file(path: &Path) -> Result<Scene, SceneLoadError> {
    let ron_string = std::fs::read_to_string(path).map_err(|source| SceneLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_scene(&ron_string)
}

fn parse_scene(ron_string: &str) -> Result<Scene, SceneLoadError> {
    let scene: Scene = ron::from_str(ron_string)?;
    scene.validate()?;
    Ok(scene)
}
