//! Loading source images and writing rendered gradients.

use crate::error::GradientError;
use image::{ImageFormat, RgbaImage};
use log::info;
use std::path::Path;

pub fn is_image_file(path: &Path) -> bool {
    if let Some(extension) = path.extension() {
        if let Some(ext_str) = extension.to_str() {
            matches!(
                ext_str.to_lowercase().as_str(),
                "jpg" | "jpeg" | "png" | "gif" | "tiff" | "tif" | "bmp" | "webp" | "ico" | "tga"
            )
        } else {
            false
        }
    } else {
        false
    }
}

/// Decode any supported raster format into RGBA.
pub fn load_image(path: &Path) -> Result<RgbaImage, GradientError> {
    let img = image::open(path).map_err(|source| GradientError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = img.to_rgba8();
    info!(
        "Loaded {} ({}x{})",
        path.display(),
        rgba.width(),
        rgba.height()
    );
    Ok(rgba)
}

/// Write `raster` as PNG regardless of the path's extension.
pub fn save_png(raster: &RgbaImage, path: &Path) -> Result<(), GradientError> {
    raster
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| GradientError::Save {
            path: path.to_path_buf(),
            source,
        })?;
    info!(
        "Saved {}x{} gradient to {}",
        raster.width(),
        raster.height(),
        path.display()
    );
    Ok(())
}
