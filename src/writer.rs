use std::path::Path;

use crate::{
    error::{FavgenError, FavgenResult},
    raster::RasterImage,
};

pub fn ensure_parent_dir(path: &Path) -> FavgenResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            FavgenError::io(format!(
                "create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

/// Encode `image` as PNG and create or overwrite the file at `path`.
pub fn write_png(image: &RasterImage, path: &Path) -> FavgenResult<()> {
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        &image.rgba8,
        image.width,
        image.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| FavgenError::io(format!("write png '{}': {e}", path.display())))
}
