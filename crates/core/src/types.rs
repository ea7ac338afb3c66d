//! In-memory document tree for a slide deck.
//!
//! A [`Deck`] owns its [`Slide`]s, a slide owns an ordered list of
//! [`Shape`]s, and text shapes own paragraphs of styled [`Run`]s. Shapes are
//! addressed by their index in the slide; replacing a shape keeps its index so
//! the z-order seen by a renderer does not change.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// English Metric Units, the document coordinate unit (914 400 per inch).
pub type Emu = i64;

/// Size of a slide or shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Extent {
    pub cx: Emu,
    pub cy: Emu,
}

impl Extent {
    pub fn new(cx: Emu, cy: Emu) -> Self {
        Self { cx, cy }
    }
}

/// Position and size of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: Emu,
    pub y: Emu,
    pub width: Emu,
    pub height: Emu,
}

impl Rect {
    pub fn new(x: Emu, y: Emu, width: Emu, height: Emu) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center point, rounded toward the top-left like integer EMU math.
    pub fn center(&self) -> (Emu, Emu) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }
}

/// A whole presentation.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    /// Slides in presentation order.
    pub slides: Vec<Slide>,

    /// Size shared by every slide.
    pub slide_size: Extent,
}

impl Deck {
    pub fn new(slide_size: Extent) -> Self {
        Self {
            slides: Vec::new(),
            slide_size,
        }
    }

    /// Append an empty slide and return it.
    pub fn add_slide(&mut self) -> &mut Slide {
        self.slides.push(Slide::new(self.slide_size));
        let last = self.slides.len() - 1;
        &mut self.slides[last]
    }
}

/// One slide: an ordered collection of shapes.
#[derive(Debug, Clone, Default)]
pub struct Slide {
    shapes: Vec<Shape>,

    /// Slide size, used when content is centered on the slide itself.
    pub size: Extent,
}

impl Slide {
    pub fn new(size: Extent) -> Self {
        Self {
            shapes: Vec::new(),
            size,
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shapes_mut(&mut self) -> &mut [Shape] {
        &mut self.shapes
    }

    pub fn shape(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    /// Index of the first shape with exactly this name.
    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        self.shapes
            .iter()
            .position(|s| s.name.as_deref() == Some(name))
    }

    /// Index of the first picture shape, in shape order.
    pub fn first_picture(&self) -> Option<usize> {
        self.shapes
            .iter()
            .position(|s| matches!(s.kind, ShapeKind::Picture(_)))
    }

    /// Append a shape on top of the others.
    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Insert a shape at `index`, clamped to the end of the list.
    pub fn insert(&mut self, index: usize, shape: Shape) {
        let index = index.min(self.shapes.len());
        self.shapes.insert(index, shape);
    }

    /// Remove and return the shape at `index`.
    pub fn remove(&mut self, index: usize) -> Option<Shape> {
        (index < self.shapes.len()).then(|| self.shapes.remove(index))
    }

    /// Swap the shape at `index` for `shape`, returning the old one.
    pub fn replace(&mut self, index: usize, shape: Shape) -> Option<Shape> {
        let old = self.remove(index)?;
        self.insert(index, shape);
        Some(old)
    }

    /// A shape id not used by any shape on this slide.
    pub fn next_shape_id(&self) -> u32 {
        self.shapes.iter().map(|s| s.id).max().unwrap_or(1) + 1
    }

    /// Every paragraph of every text shape, in shape order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.shapes.iter().filter_map(Shape::text_frame).flat_map(|f| f.paragraphs.iter())
    }
}

/// A positioned element of a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// Document-level shape id, unique within a slide.
    pub id: u32,

    /// Stable name used to find template slots such as `IMAGE_PROJET`.
    pub name: Option<String>,

    pub frame: Rect,

    pub kind: ShapeKind,
}

impl Shape {
    pub fn new(id: u32, frame: Rect, kind: ShapeKind) -> Self {
        Self {
            id,
            name: None,
            frame,
            kind,
        }
    }

    /// A picture shape whose image is read from `path`.
    pub fn picture(id: u32, frame: Rect, path: impl Into<PathBuf>) -> Self {
        Self::new(
            id,
            frame,
            ShapeKind::Picture(Picture {
                source: PictureSource::File(path.into()),
            }),
        )
    }

    /// Rename the shape.
    ///
    /// Names end up in XML attributes, so empty names and names containing
    /// control characters are refused.
    pub fn set_name(&mut self, name: &str) -> Result<()> {
        if name.is_empty() || name.chars().any(char::is_control) {
            return Err(Error::InvalidShapeName(name.to_string()));
        }
        self.name = Some(name.to_string());
        Ok(())
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn text_frame(&self) -> Option<&TextFrame> {
        match &self.kind {
            ShapeKind::Text(frame) => Some(frame),
            ShapeKind::Picture(_) | ShapeKind::Anchor | ShapeKind::Other => None,
        }
    }

    pub fn text_frame_mut(&mut self) -> Option<&mut TextFrame> {
        match &mut self.kind {
            ShapeKind::Text(frame) => Some(frame),
            ShapeKind::Picture(_) | ShapeKind::Anchor | ShapeKind::Other => None,
        }
    }
}

/// What a shape is.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    /// A shape carrying paragraphs of text.
    Text(TextFrame),
    /// An image.
    Picture(Picture),
    /// A marker that positions dynamic content and is not rendered.
    Anchor,
    /// Anything else (groups, tables, connectors); left untouched.
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    pub source: PictureSource,
}

/// Where a picture's image comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum PictureSource {
    /// Already part of the loaded template.
    Embedded,
    /// To be read from disk when the deck is written.
    File(PathBuf),
}

/// The text body of a text shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextFrame {
    pub paragraphs: Vec<Paragraph>,
}

impl TextFrame {
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }
}

/// Paragraph-level horizontal alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
    Distributed,
}

/// An ordered sequence of runs sharing one alignment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    runs: Vec<Run>,

    /// `None` inherits the alignment from the layout or master.
    pub alignment: Option<Alignment>,
}

impl Paragraph {
    pub fn new(runs: Vec<Run>) -> Self {
        Self {
            runs,
            alignment: None,
        }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Drop every run, keeping the alignment.
    pub fn clear_runs(&mut self) -> Vec<Run> {
        std::mem::take(&mut self.runs)
    }

    pub fn push_run(&mut self, run: Run) {
        self.runs.push(run);
    }
}

/// A span of text with one style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Run {
    pub text: String,
    pub style: RunStyle,
}

impl Run {
    /// An unstyled run, inheriting everything from the paragraph.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: RunStyle::default(),
        }
    }

    pub fn styled(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Copy `style` onto this run.
    ///
    /// Font, size and the boolean attributes are applied first. If the color
    /// is rejected the error is returned and the run keeps everything that
    /// was already applied.
    pub fn apply_style(&mut self, style: &RunStyle) -> Result<()> {
        if style.font.is_some() {
            self.style.font.clone_from(&style.font);
        }
        if style.size.is_some() {
            self.style.size = style.size;
        }
        self.style.bold = style.bold;
        self.style.italic = style.italic;
        self.style.underline = style.underline;
        match &style.color {
            Some(color) => {
                color.validate()?;
                self.style.color = Some(color.clone());
            }
            None => {}
        }
        Ok(())
    }
}

/// Character formatting of a run. `None` means "inherit".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStyle {
    pub font: Option<String>,
    pub size: Option<FontSize>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub color: Option<Color>,
}

impl RunStyle {
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// Font size in hundredths of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FontSize(pub u32);

impl FontSize {
    pub fn from_points(points: f64) -> Self {
        Self((points * 100.0).round().max(0.0) as u32)
    }

    pub fn points(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

/// A run color. Exactly one representation is held at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Color {
    /// Literal red, green, blue.
    Rgb([u8; 3]),
    /// A theme slot such as `accent1`, lightened (> 0) or darkened (< 0).
    Theme {
        color: String,
        brightness: Option<f64>,
    },
    /// An index into a legacy color palette.
    Palette(u32),
}

impl Color {
    fn validate(&self) -> Result<()> {
        match self {
            Color::Theme {
                brightness: Some(b),
                ..
            } if !(-1.0..=1.0).contains(b) => Err(Error::UnsupportedColor(format!(
                "theme brightness {} outside [-1, 1]",
                b
            ))),
            Color::Theme { color, .. } if color.is_empty() => {
                Err(Error::UnsupportedColor("empty theme color id".to_string()))
            }
            _ => Ok(()),
        }
    }
}
