//! Decoding source images and saving reconstructed ones

use crate::io::error::{Result, UnshredError};
use crate::spatial::raster::Raster;
use std::path::Path;

/// Decode an image file into a raster
///
/// # Errors
///
/// Returns `InvalidImage` if the file cannot be opened or decoded
pub fn load_raster(path: &Path) -> Result<Raster> {
    let image = image::open(path).map_err(|e| UnshredError::InvalidImage {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(Raster::from_dynamic_image(&image))
}

/// Save a raster as an 8-bit RGB image, creating parent directories
///
/// The format follows the path's extension.
///
/// # Errors
///
/// Returns an error if:
/// - The raster has no pixels
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_raster(raster: &Raster, path: &Path) -> Result<()> {
    if raster.width() == 0 || raster.height() == 0 {
        return Err(UnshredError::InvalidParameter {
            parameter: "raster",
            value: format!("{}x{}", raster.width(), raster.height()),
            reason: "cannot save an empty image".to_string(),
        });
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| UnshredError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    raster
        .to_rgb8()
        .save(path)
        .map_err(|e| UnshredError::ImageExport {
            path: path.to_path_buf(),
            source: e,
        })
}
