use crate::extract::SelectedFile;
use egui::ColorImage;
use std::fs;
use std::path::PathBuf;

// Large scans get downscaled before the GPU upload; the preview pane is
// small anyway and some backends cap texture dimensions.
const MAX_PREVIEW_DIMENSION: u32 = 1280;

/// What the preview pane shows. `Image` carries decoded pixels; the
/// texture itself lives on the controller and is dropped whenever the
/// preview changes, so stale GPU handles never outlive their pane.
pub enum PreviewContent {
    Empty,
    Image { name: String, image: ColorImage },
    Pdf { name: String, path: PathBuf },
    Unsupported { name: String },
}

/// Builds preview content for the given file, or the neutral placeholder
/// when nothing is selected. Always yields something displayable; decode
/// failures degrade to the unsupported placeholder.
pub fn build_preview(file: Option<&SelectedFile>) -> PreviewContent {
    let Some(file) = file else {
        return PreviewContent::Empty;
    };

    if file.media_type.starts_with("image/") {
        match decode_image(file) {
            Some(image) => PreviewContent::Image {
                name: file.name.clone(),
                image,
            },
            None => PreviewContent::Unsupported {
                name: file.name.clone(),
            },
        }
    } else if file.media_type == "application/pdf" {
        PreviewContent::Pdf {
            name: file.name.clone(),
            path: file.path.clone(),
        }
    } else {
        PreviewContent::Unsupported {
            name: file.name.clone(),
        }
    }
}

fn decode_image(file: &SelectedFile) -> Option<ColorImage> {
    let bytes = fs::read(&file.path).ok()?;
    let mut decoded = image::load_from_memory(&bytes).ok()?;
    if decoded.width() > MAX_PREVIEW_DIMENSION || decoded.height() > MAX_PREVIEW_DIMENSION {
        decoded = decoded.thumbnail(MAX_PREVIEW_DIMENSION, MAX_PREVIEW_DIMENSION);
    }
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Some(ColorImage::from_rgba_unmultiplied(
        size,
        rgba.as_flat_samples().as_slice(),
    ))
}
