//! Picture slot replacement.

use crate::types::{Shape, Slide};
use serde::Serialize;
use std::path::Path;

/// What [`replace_picture`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PictureOutcome {
    /// The shape at `index` now shows the new image. `renamed` is false when
    /// the slot name could not be carried over to the new shape.
    Replaced { index: usize, renamed: bool },
    /// The image file does not exist; the slide was not modified.
    MissingFile,
    /// The slide has neither a shape with the slot name nor a picture.
    NoTarget,
}

impl PictureOutcome {
    pub fn is_replaced(&self) -> bool {
        matches!(self, PictureOutcome::Replaced { .. })
    }
}

/// Replace the picture slot `target_name` on `slide` with the image at `path`.
///
/// The shape named `target_name` is used if there is one, otherwise the
/// first picture on the slide. The new picture takes the old shape's index,
/// position and size.
pub fn replace_picture(slide: &mut Slide, target_name: &str, path: &Path) -> PictureOutcome {
    if !path.exists() {
        log::warn!("Image not found: {}", path.display());
        return PictureOutcome::MissingFile;
    }

    let Some(index) = slide
        .find_by_name(target_name)
        .or_else(|| slide.first_picture())
    else {
        log::warn!("Picture slot '{}' not found on this slide", target_name);
        return PictureOutcome::NoTarget;
    };

    let Some(old) = slide.shape(index) else {
        return PictureOutcome::NoTarget;
    };
    let mut picture = Shape::picture(old.id, old.frame, path);
    let renamed = match picture.set_name(target_name) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Could not name the new picture: {}", e);
            false
        }
    };
    slide.replace(index, picture);

    log::debug!("Picture slot '{}' now shows {}", target_name, path.display());
    PictureOutcome::Replaced { index, renamed }
}
