use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::error::{Error, Result};

/// Writes `image` as a PNG, creating or truncating `path` whatever its extension.
pub fn write_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| Error::WriteOutput {
            path: path.to_path_buf(),
            source,
        })
}
