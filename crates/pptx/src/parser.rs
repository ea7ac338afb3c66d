//! PPTX template parser.
//!
//! Each slide's shape tree is split into one XML fragment per top-level
//! shape. Fragments are kept verbatim so that untouched shapes can be
//! written back exactly; text shapes additionally get their paragraphs
//! decoded into the document model.

use crate::document::PptxDocument;
use crate::package::Package;
use crate::xml::{attr, attr_num, local_name, raw_attrs, trailing_number};
use deck_core::badges::ANCHOR_SHAPE_NAME;
use deck_core::{
    Alignment, Color, Deck, Error, Extent, FontSize, Paragraph, Picture, PictureSource, Rect,
    Result, Run, RunStyle, Shape, ShapeKind, Slide, TextFrame,
};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{Read, Seek};

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS: &str = "ppt/_rels/presentation.xml.rels";

/// Slide size PowerPoint assumes when `sldSz` is missing (10 x 7.5 in).
const DEFAULT_SLIDE_SIZE: Extent = Extent {
    cx: 9_144_000,
    cy: 6_858_000,
};

/// A slide part as loaded, minus the shapes held by the model.
#[derive(Debug, Clone)]
pub(crate) struct SlidePart {
    /// Part name, e.g. `ppt/slides/slide1.xml`.
    pub path: String,
    /// Everything before the first shape of the shape tree.
    pub head: String,
    /// Everything from the end of the last shape on.
    pub tail: String,
    /// Original XML of each shape, by shape id.
    pub sources: HashMap<u32, ShapeSource>,
    /// Highest shape id used anywhere on the slide, nested shapes included.
    pub max_id: u32,
    /// Shapes as loaded; a slide still equal to them is not rewritten.
    pub shapes: Vec<Shape>,
}

/// Original XML of one top-level shape.
#[derive(Debug, Clone)]
pub(crate) struct ShapeSource {
    pub raw: String,
    /// Where the paragraphs sit, for text shapes.
    pub text: Option<TextLayout>,
}

/// Byte range of the paragraphs inside [`ShapeSource::raw`], and the
/// paragraph markup the model does not hold.
#[derive(Debug, Clone)]
pub(crate) struct TextLayout {
    pub body_start: usize,
    pub body_end: usize,
    pub paragraphs: Vec<ParagraphSource>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ParagraphSource {
    /// Qualified element name, normally `a:p`.
    pub tag: String,
    pub props: Option<ParagraphProps>,
    /// Raw `a:endParaRPr` element.
    pub end_props: Option<String>,
    /// The whole paragraph element as loaded.
    pub raw: String,
    /// The paragraph as loaded; an equal paragraph is written from `raw`.
    pub original: Paragraph,
    pub runs: Vec<RunSource>,
}

/// Character properties of one loaded run.
#[derive(Debug, Clone, Default)]
pub(crate) struct RunSource {
    pub style: RunStyle,
    /// Raw `a:rPr` element, with everything the model does not hold.
    pub props: Option<String>,
}

/// An `a:pPr` element without its `algn` attribute.
#[derive(Debug, Clone, Default)]
pub(crate) struct ParagraphProps {
    pub tag: String,
    /// Raw, still escaped attributes.
    pub attrs: Vec<(String, String)>,
    /// Raw child elements; `None` for an empty element.
    pub inner: Option<String>,
}

/// Parser for PPTX (Office Open XML) templates.
pub struct PptxParser;

impl PptxParser {
    /// Create a new PPTX parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse a PPTX file from a reader.
    pub fn parse<R: Read + Seek>(&self, reader: R) -> Result<PptxDocument> {
        let package = Package::read(reader)?;

        let presentation = package.get_str(PRESENTATION_PART)?;
        let (slide_size, slide_ids) = parse_presentation(&presentation)?;

        // Get the slide order from presentation.xml and its relationships
        let rels = package.get_str(PRESENTATION_RELS)?;
        let slide_order = self.get_slide_order(&rels, &slide_ids)?;

        let mut deck = Deck::new(slide_size);
        let mut parts = Vec::with_capacity(slide_order.len());
        for slide_path in slide_order {
            let xml = package.get_str(&slide_path)?;
            let (slide, part) = parse_slide(&slide_path, &xml, slide_size)?;
            log::debug!("{}: {} shapes", slide_path, slide.shapes().len());
            deck.slides.push(slide);
            parts.push(part);
        }

        log::info!("Loaded template with {} slides", deck.slides.len());
        Ok(PptxDocument::new(package, deck, parts))
    }

    /// Resolve the slide part names, in presentation order.
    ///
    /// Uses the `sldIdLst` order when present, otherwise the numeric order
    /// of the relationship ids.
    fn get_slide_order(&self, rels_xml: &str, slide_ids: &[String]) -> Result<Vec<String>> {
        let mut slides: Vec<(String, String)> = Vec::new();

        let mut reader = Reader::from_str(rels_xml);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let rel_type = attr(e, b"Type").unwrap_or_default();
                    let target = attr(e, b"Target").unwrap_or_default();
                    let id = attr(e, b"Id").unwrap_or_default();

                    // Check if this is a slide relationship
                    if rel_type.ends_with("/slide") {
                        let full_path = match target.strip_prefix('/') {
                            Some(absolute) => absolute.to_string(),
                            None => format!("ppt/{}", target),
                        };
                        slides.push((id, full_path));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing relationships: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        if !slide_ids.is_empty() {
            let by_id: HashMap<&str, &str> = slides
                .iter()
                .map(|(id, path)| (id.as_str(), path.as_str()))
                .collect();
            return Ok(slide_ids
                .iter()
                .filter_map(|id| match by_id.get(id.as_str()) {
                    Some(path) => Some(path.to_string()),
                    None => {
                        log::warn!("Slide relationship '{}' not found", id);
                        None
                    }
                })
                .collect());
        }

        // Sort slides by their number
        slides.sort_by(|a, b| {
            let na = trailing_number(&a.0).or_else(|| trailing_number(&a.1));
            let nb = trailing_number(&b.0).or_else(|| trailing_number(&b.1));
            match (na, nb) {
                (Some(na), Some(nb)) => na.cmp(&nb),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => a.1.cmp(&b.1),
            }
        });

        Ok(slides.into_iter().map(|(_, path)| path).collect())
    }
}

impl Default for PptxParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Slide size and slide relationship ids, in order, from presentation.xml.
fn parse_presentation(xml: &str) -> Result<(Extent, Vec<String>)> {
    let mut size = DEFAULT_SLIDE_SIZE;
    let mut ids = Vec::new();

    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                match local_name(e.name().as_ref()) {
                    b"sldSz" => {
                        size.cx = attr_num(e, b"cx").unwrap_or(size.cx);
                        size.cy = attr_num(e, b"cy").unwrap_or(size.cy);
                    }
                    b"sldId" => {
                        // the relationship id is the namespaced `r:id`, not the plain `id`
                        let rel_id = e.attributes().flatten().find_map(|a| {
                            let key = a.key.as_ref();
                            (key.contains(&b':') && local_name(key) == b"id")
                                .then(|| String::from_utf8_lossy(&a.value).into_owned())
                        });
                        if let Some(rel_id) = rel_id {
                            ids.push(rel_id);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing presentation.xml: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok((size, ids))
}

/// Split a slide into head, shapes and tail, and decode the shapes.
fn parse_slide(path: &str, xml: &str, size: Extent) -> Result<(Slide, SlidePart)> {
    let fragments = split_shape_tree(xml)
        .map_err(|e| Error::PptxParseError(format!("{}: {}", path, e)))?;

    let mut slide = Slide::new(size);
    let mut sources = HashMap::new();
    let mut max_id = 0;
    let mut parsed = Vec::with_capacity(fragments.shapes.len());
    for raw in &fragments.shapes {
        let shape = parse_shape(raw)
            .map_err(|e| Error::PptxParseError(format!("{}: {}", path, e)))?;
        max_id = max_id.max(shape.max_id);
        parsed.push(shape);
    }

    for mut shape in parsed {
        // a shape without an id, or with one already taken, gets a fresh one
        if shape.shape.id == 0 || sources.contains_key(&shape.shape.id) {
            max_id += 1;
            shape.shape.id = max_id;
        }
        sources.insert(shape.shape.id, shape.source);
        slide.push(shape.shape);
    }

    let part = SlidePart {
        path: path.to_string(),
        head: fragments.head.to_string(),
        tail: fragments.tail.to_string(),
        sources,
        max_id,
        shapes: slide.shapes().to_vec(),
    };
    Ok((slide, part))
}

/// A slide's XML cut around its top-level shapes.
struct ShapeTree<'a> {
    head: &'a str,
    shapes: Vec<&'a str>,
    tail: &'a str,
}

/// Children of `p:spTree` that describe the tree itself, not a shape.
fn is_tree_property(name: &[u8]) -> bool {
    matches!(name, b"nvGrpSpPr" | b"grpSpPr")
}

fn split_shape_tree(xml: &str) -> std::result::Result<ShapeTree<'_>, String> {
    let mut reader = Reader::from_str(xml);

    let mut depth = 0usize;
    let mut tree_level: Option<usize> = None;
    let mut shape_start: Option<usize> = None;
    let mut head_end: Option<usize> = None;
    let mut tail_start: Option<usize> = None;
    let mut shapes = Vec::new();

    loop {
        let pos = reader.buffer_position();
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                depth += 1;
                let qname = e.name();
                let name = local_name(qname.as_ref());
                match tree_level {
                    None if name == b"spTree" => tree_level = Some(depth),
                    Some(level) if depth == level + 1 && tail_start.is_none() => {
                        if name == b"extLst" {
                            tail_start = Some(pos);
                        } else if !is_tree_property(name) {
                            head_end.get_or_insert(pos);
                            shape_start = Some(pos);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::End(_)) => {
                if let Some(level) = tree_level {
                    if depth == level + 1 {
                        if let Some(start) = shape_start.take() {
                            shapes.push(&xml[start..reader.buffer_position()]);
                        }
                    } else if depth == level && tail_start.is_none() {
                        tail_start = Some(pos);
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Empty(ref e)) => {
                let qname = e.name();
                let name = local_name(qname.as_ref());
                if tree_level == Some(depth) && tail_start.is_none() {
                    if name == b"extLst" {
                        tail_start = Some(pos);
                    } else if !is_tree_property(name) {
                        head_end.get_or_insert(pos);
                        shapes.push(&xml[pos..reader.buffer_position()]);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(format!("XML error at byte {}: {}", pos, e)),
            _ => {}
        }
    }

    let Some(tail_start) = tail_start else {
        return Err("slide has no shape tree".to_string());
    };
    let head_end = head_end.unwrap_or(tail_start);

    Ok(ShapeTree {
        head: &xml[..head_end],
        shapes,
        tail: &xml[tail_start..],
    })
}

/// A decoded top-level shape.
struct ParsedShape {
    shape: Shape,
    source: ShapeSource,
    max_id: u32,
}

fn parse_shape(raw: &str) -> std::result::Result<ParsedShape, String> {
    let mut parser = ShapeParser::new(raw);
    let mut reader = Reader::from_str(raw);

    loop {
        let pos = reader.buffer_position();
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                parser.open(e, pos, reader.buffer_position(), false);
                parser.stack.push(local_name(e.name().as_ref()).to_vec());
            }
            Ok(Event::Empty(ref e)) => {
                parser.open(e, pos, reader.buffer_position(), true);
            }
            Ok(Event::End(_)) => {
                let name = parser.stack.pop().unwrap_or_default();
                parser.close(&name, pos, reader.buffer_position());
            }
            Ok(Event::Text(ref t)) => {
                if parser.in_run_text() {
                    let text = t.unescape().map_err(|e| e.to_string())?;
                    parser.push_text(&text);
                }
            }
            Ok(Event::CData(ref t)) => {
                if parser.in_run_text() {
                    parser.push_text(&String::from_utf8_lossy(t));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(format!("XML error in shape: {}", e)),
            _ => {}
        }
    }

    Ok(parser.finish())
}

/// Event-driven state for [`parse_shape`].
struct ShapeParser<'a> {
    raw: &'a str,
    /// Local names of the open elements.
    stack: Vec<Vec<u8>>,
    root: Vec<u8>,

    id: Option<u32>,
    name: Option<String>,
    max_id: u32,
    frame: Rect,
    in_xfrm: bool,
    xfrm_done: bool,

    has_body: bool,
    body_start: Option<usize>,
    body_end: Option<usize>,
    paragraphs: Vec<Paragraph>,
    sources: Vec<ParagraphSource>,
    paragraph: Option<(Paragraph, ParagraphSource)>,
    paragraph_start: usize,
    props_inner_start: usize,
    end_props_start: usize,
    run: Option<Run>,
    run_props_start: usize,
    run_props: Option<String>,
    lum_mod: Option<f64>,
    lum_off: Option<f64>,
}

impl<'a> ShapeParser<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            raw,
            stack: Vec::new(),
            root: Vec::new(),
            id: None,
            name: None,
            max_id: 0,
            frame: Rect::default(),
            in_xfrm: false,
            xfrm_done: false,
            has_body: false,
            body_start: None,
            body_end: None,
            paragraphs: Vec::new(),
            sources: Vec::new(),
            paragraph: None,
            paragraph_start: 0,
            props_inner_start: 0,
            end_props_start: 0,
            run: None,
            run_props_start: 0,
            run_props: None,
            lum_mod: None,
            lum_off: None,
        }
    }

    /// Local name of the open element `n` levels up (0 is the innermost).
    fn ancestor(&self, n: usize) -> &[u8] {
        self.stack
            .len()
            .checked_sub(n + 1)
            .and_then(|i| self.stack.get(i))
            .map(Vec::as_slice)
            .unwrap_or(b"")
    }

    fn in_run_text(&self) -> bool {
        self.run.is_some() && self.ancestor(0) == b"t"
    }

    fn push_text(&mut self, text: &str) {
        if let Some(run) = self.run.as_mut() {
            run.text.push_str(text);
        }
    }

    /// True inside `a:rPr/a:solidFill`, `levels` below the fill element.
    fn in_run_fill(&self, levels: usize) -> bool {
        self.run.is_some()
            && self.ancestor(levels) == b"solidFill"
            && self.ancestor(levels + 1) == b"rPr"
    }

    fn open(&mut self, e: &BytesStart, pos: usize, after: usize, empty: bool) {
        let qname = e.name();
        let name = local_name(qname.as_ref());

        if self.stack.is_empty() && self.root.is_empty() {
            self.root = name.to_vec();
        }

        match name {
            b"cNvPr" => {
                let id = attr_num::<u32>(e, b"id").unwrap_or(0);
                self.max_id = self.max_id.max(id);
                if self.id.is_none() {
                    self.id = Some(id);
                    self.name = attr(e, b"name");
                }
            }
            b"xfrm" if !self.xfrm_done => {
                self.in_xfrm = !empty;
                self.xfrm_done = empty;
            }
            b"off" if self.in_xfrm && self.ancestor(0) == b"xfrm" => {
                self.frame.x = attr_num(e, b"x").unwrap_or(0);
                self.frame.y = attr_num(e, b"y").unwrap_or(0);
            }
            b"ext" if self.in_xfrm && self.ancestor(0) == b"xfrm" => {
                self.frame.width = attr_num(e, b"cx").unwrap_or(0);
                self.frame.height = attr_num(e, b"cy").unwrap_or(0);
            }
            b"txBody" if self.root == b"sp" && self.stack.len() == 1 => {
                self.has_body = true;
            }
            b"p" if self.has_body && self.stack.len() == 2 && self.ancestor(0) == b"txBody" => {
                self.body_start.get_or_insert(pos);
                self.paragraph_start = pos;
                let source = ParagraphSource {
                    tag: String::from_utf8_lossy(qname.as_ref()).into_owned(),
                    ..ParagraphSource::default()
                };
                self.paragraph = Some((Paragraph::default(), source));
                if empty {
                    self.finish_paragraph(after);
                }
            }
            _ if self.paragraph.is_some() => self.open_in_paragraph(e, name, pos, after, empty),
            _ => {}
        }
    }

    fn open_in_paragraph(
        &mut self,
        e: &BytesStart,
        name: &[u8],
        pos: usize,
        after: usize,
        empty: bool,
    ) {
        let parent = self.ancestor(0).to_vec();
        let parent = parent.as_slice();
        match name {
            b"pPr" if parent == b"p" => {
                let alignment = attr(e, b"algn").and_then(|v| parse_alignment(&v));
                let props = ParagraphProps {
                    tag: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                    attrs: raw_attrs(e)
                        .into_iter()
                        .filter(|(k, _)| k != "algn")
                        .collect(),
                    inner: None,
                };
                if let Some((paragraph, source)) = self.paragraph.as_mut() {
                    paragraph.alignment = alignment;
                    source.props = Some(props);
                }
                self.props_inner_start = after;
            }
            b"r" | b"fld" if parent == b"p" => {
                self.run = Some(Run::default());
                self.run_props = None;
                if empty {
                    self.finish_run();
                }
            }
            b"br" if parent == b"p" => {
                self.run = Some(Run::plain("\n"));
                self.run_props = None;
                if empty {
                    self.finish_run();
                }
            }
            b"rPr" if matches!(parent, b"r" | b"fld" | b"br") => {
                if let Some(run) = self.run.as_mut() {
                    let style = &mut run.style;
                    style.bold = attr(e, b"b").map(|v| parse_bool(&v));
                    style.italic = attr(e, b"i").map(|v| parse_bool(&v));
                    style.underline = attr(e, b"u").map(|v| v != "none");
                    style.size = attr_num::<u32>(e, b"sz").map(FontSize);
                }
                self.run_props_start = pos;
                if empty {
                    self.run_props = Some(self.raw[pos..after].to_string());
                }
            }
            b"latin" if parent == b"rPr" => {
                if let Some(run) = self.run.as_mut() {
                    run.style.font = attr(e, b"typeface");
                }
            }
            b"srgbClr" if self.in_run_fill(0) => {
                let color = attr(e, b"val").and_then(|v| parse_rgb(&v)).map(Color::Rgb);
                self.set_color(color);
            }
            b"sysClr" if self.in_run_fill(0) => {
                let color = attr(e, b"lastClr").and_then(|v| parse_rgb(&v)).map(Color::Rgb);
                self.set_color(color);
            }
            b"schemeClr" if self.in_run_fill(0) => {
                self.lum_mod = None;
                self.lum_off = None;
                let color = attr(e, b"val").map(|color| Color::Theme {
                    color,
                    brightness: None,
                });
                self.set_color(color);
            }
            b"lumMod" if parent == b"schemeClr" && self.in_run_fill(1) => {
                self.lum_mod = attr_num::<f64>(e, b"val").map(|v| v / 100_000.0);
            }
            b"lumOff" if parent == b"schemeClr" && self.in_run_fill(1) => {
                self.lum_off = attr_num::<f64>(e, b"val").map(|v| v / 100_000.0);
            }
            b"endParaRPr" if parent == b"p" => {
                self.end_props_start = pos;
                if empty {
                    self.set_end_props(after);
                }
            }
            _ => {}
        }
    }

    fn close(&mut self, name: &[u8], pos: usize, after: usize) {
        let parent = self.ancestor(0).to_vec();
        let parent = parent.as_slice();
        match name {
            b"xfrm" if self.in_xfrm => {
                self.in_xfrm = false;
                self.xfrm_done = true;
            }
            b"p" if self.paragraph.is_some() && parent == b"txBody" => {
                self.finish_paragraph(after);
            }
            b"pPr" if parent == b"p" && self.paragraph.is_some() => {
                let inner = self.raw[self.props_inner_start..pos].to_string();
                if let Some((_, source)) = self.paragraph.as_mut() {
                    if let Some(props) = source.props.as_mut() {
                        props.inner = Some(inner);
                    }
                }
            }
            b"r" | b"fld" | b"br" if parent == b"p" => self.finish_run(),
            b"rPr" if self.run.is_some() && matches!(parent, b"r" | b"fld" | b"br") => {
                self.run_props = Some(self.raw[self.run_props_start..after].to_string());
            }
            b"schemeClr" if self.in_run_fill(0) => {
                let brightness = match (self.lum_off, self.lum_mod) {
                    (Some(off), _) => Some(off),
                    (None, Some(m)) => Some(m - 1.0),
                    (None, None) => None,
                };
                if let Some(run) = self.run.as_mut() {
                    if let Some(Color::Theme { brightness: b, .. }) = run.style.color.as_mut() {
                        *b = brightness;
                    }
                }
            }
            b"endParaRPr" if parent == b"p" && self.paragraph.is_some() => {
                self.set_end_props(after);
            }
            _ => {}
        }
    }

    fn set_color(&mut self, color: Option<Color>) {
        if let Some(run) = self.run.as_mut() {
            run.style.color = color;
        }
    }

    fn set_end_props(&mut self, end: usize) {
        let raw = self.raw[self.end_props_start..end].to_string();
        if let Some((_, source)) = self.paragraph.as_mut() {
            source.end_props = Some(raw);
        }
    }

    fn finish_run(&mut self) {
        let props = self.run_props.take();
        if let (Some(run), Some((paragraph, source))) = (self.run.take(), self.paragraph.as_mut()) {
            source.runs.push(RunSource {
                style: run.style.clone(),
                props,
            });
            paragraph.push_run(run);
        }
    }

    fn finish_paragraph(&mut self, end: usize) {
        if let Some((paragraph, mut source)) = self.paragraph.take() {
            source.raw = self.raw[self.paragraph_start..end].to_string();
            source.original = paragraph.clone();
            self.paragraphs.push(paragraph);
            self.sources.push(source);
            self.body_end = Some(end);
        }
    }

    fn finish(self) -> ParsedShape {
        let kind = if self.name.as_deref() == Some(ANCHOR_SHAPE_NAME) {
            ShapeKind::Anchor
        } else if self.root == b"pic" {
            ShapeKind::Picture(Picture {
                source: PictureSource::Embedded,
            })
        } else if self.root == b"sp" && self.body_start.is_some() {
            ShapeKind::Text(TextFrame::new(self.paragraphs))
        } else {
            ShapeKind::Other
        };

        let text = match (&kind, self.body_start, self.body_end) {
            (ShapeKind::Text(_), Some(body_start), Some(body_end)) => Some(TextLayout {
                body_start,
                body_end,
                paragraphs: self.sources,
            }),
            _ => None,
        };

        let mut shape = Shape::new(self.id.unwrap_or(0), self.frame, kind);
        shape.name = self.name;

        ParsedShape {
            shape,
            source: ShapeSource {
                raw: self.raw.to_string(),
                text,
            },
            max_id: self.max_id,
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "true" | "on")
}

fn parse_rgb(hex: &str) -> Option<[u8; 3]> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([byte(0)?, byte(2)?, byte(4)?])
}

fn parse_alignment(value: &str) -> Option<Alignment> {
    match value {
        "l" => Some(Alignment::Left),
        "ctr" => Some(Alignment::Center),
        "r" => Some(Alignment::Right),
        "just" | "justLow" => Some(Alignment::Justify),
        "dist" | "thaiDist" => Some(Alignment::Distributed),
        _ => None,
    }
}
