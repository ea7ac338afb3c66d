//! Core of the deck template filler: the document model, placeholder
//! scanning and substitution, picture replacement, badge layout and the
//! row-to-slide generation pass.

pub mod badges;
pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod generate;
pub mod normalize;
pub mod picture;
pub mod scan;
pub mod splice;
pub mod types;

pub use badges::{layout_badges, BadgeIcon, BadgeSet};
pub use config::{GenerationConfig, ImageSlot, PlaceholderMapping};
pub use data::{CellValue, Row, Table};
pub use error::{Error, Result};
pub use format::{format_value, ValueFormat};
pub use generate::{generate, GenerationReport, SlideReport};
pub use picture::{replace_picture, PictureOutcome};
pub use scan::{find_placeholders, PlaceholderMap};
pub use splice::{replace_in_slide, substitute};
pub use types::{
    Alignment, Color, Deck, Emu, Extent, FontSize, Paragraph, Picture, PictureSource, Rect, Run,
    RunStyle, Shape, ShapeKind, Slide, TextFrame,
};
