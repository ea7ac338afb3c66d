//! Conditional badge icons stacked around an anchor shape.
//!
//! A badge is shown when its column holds the activation value. Active
//! badges are stacked vertically, centered on the template's anchor marker
//! (or on the slide when the template has none). The marker is removed once
//! it has been used.

use crate::data::Row;
use crate::types::{Emu, Rect, Shape, Slide};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the marker shape badges are centered on.
pub const ANCHOR_SHAPE_NAME: &str = "blason_centre";

/// Badge size used when the slide has no anchor marker.
pub const DEFAULT_BADGE_SIZE: Emu = 1_000_000;

/// Distance between consecutive badge centers, relative to badge height.
pub const BADGE_SPACING: f64 = 1.2;

/// One badge: shown when `column` holds the activation value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeIcon {
    pub column: String,
    /// Icon file name, relative to [`BadgeSet::dir`].
    pub icon: String,
}

impl BadgeIcon {
    pub fn new(column: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            icon: icon.into(),
        }
    }
}

/// Every badge a template may show, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BadgeSet {
    /// Directory holding the icon files.
    pub dir: PathBuf,
    /// Cell value that turns a badge on, compared case-insensitively.
    pub activation: String,
    /// Name of the anchor marker shape.
    pub anchor: String,
    pub icons: Vec<BadgeIcon>,
}

impl Default for BadgeSet {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logos"),
            activation: "x".to_string(),
            anchor: ANCHOR_SHAPE_NAME.to_string(),
            icons: Vec::new(),
        }
    }
}

/// Where the badge stack is centered and how big each badge is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeAnchor {
    pub cx: Emu,
    pub cy: Emu,
    pub width: Emu,
    pub height: Emu,
}

impl BadgeAnchor {
    /// Center and size of an anchor marker's frame.
    pub fn from_frame(frame: &Rect) -> Self {
        let (cx, cy) = frame.center();
        Self {
            cx,
            cy,
            width: frame.width,
            height: frame.height,
        }
    }

    /// The slide center, with default-sized badges.
    pub fn slide_center(slide: &Slide) -> Self {
        Self {
            cx: slide.size.cx / 2,
            cy: slide.size.cy / 2,
            width: DEFAULT_BADGE_SIZE,
            height: DEFAULT_BADGE_SIZE,
        }
    }
}

/// Icon paths of the badges `row` turns on, in declaration order.
///
/// Badges whose icon file does not exist are skipped.
pub fn active_badges(row: &Row, set: &BadgeSet) -> Vec<PathBuf> {
    let activation = set.activation.to_lowercase();
    set.icons
        .iter()
        .filter(|badge| row.value(&badge.column).trim().to_lowercase() == activation)
        .filter_map(|badge| {
            let path = set.dir.join(&badge.icon);
            if path.exists() {
                Some(path)
            } else {
                log::warn!(
                    "Badge icon for '{}' not found: {}",
                    badge.column,
                    path.display()
                );
                None
            }
        })
        .collect()
}

/// Frames of `count` badges stacked vertically on `anchor`.
///
/// Badge `i` is centered `(i - count / 2) * spacing` below the anchor center,
/// with integer division, so an even count sits half a step high.
pub fn stack_layout(anchor: &BadgeAnchor, count: usize) -> Vec<Rect> {
    let spacing = anchor.height as f64 * BADGE_SPACING;
    let middle = (count / 2) as f64;
    let x = anchor.cx - anchor.width / 2;

    (0..count)
        .map(|i| {
            let center_y = anchor.cy as f64 + (i as f64 - middle) * spacing;
            let y = (center_y - (anchor.height / 2) as f64).round() as Emu;
            Rect::new(x, y, anchor.width, anchor.height)
        })
        .collect()
}

/// Place the badges `row` turns on and return their icon paths.
///
/// With no active badge nothing changes, the anchor marker included.
/// Otherwise the marker is removed and the badges take its place in the
/// shape order; without a marker they are centered on the slide and added
/// on top.
pub fn layout_badges(slide: &mut Slide, row: &Row, set: &BadgeSet) -> Vec<PathBuf> {
    let active = active_badges(row, set);
    if active.is_empty() {
        return active;
    }

    let (anchor, mut index) = match slide.find_by_name(&set.anchor) {
        Some(idx) => {
            let frame = slide.shape(idx).map(|s| s.frame).unwrap_or_default();
            slide.remove(idx);
            (BadgeAnchor::from_frame(&frame), idx)
        }
        None => {
            log::debug!("No '{}' shape, centering badges on the slide", set.anchor);
            (BadgeAnchor::slide_center(slide), slide.shapes().len())
        }
    };

    for (path, frame) in active.iter().zip(stack_layout(&anchor, active.len())) {
        let id = slide.next_shape_id();
        slide.insert(index, Shape::picture(id, frame, path.as_path()));
        index += 1;
    }

    log::debug!("Placed {} badges", active.len());
    active
}
