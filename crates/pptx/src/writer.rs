//! Renders a filled deck back into the package it was loaded from.

use crate::package::Package;
use crate::parser::{ParagraphSource, RunSource, SlidePart, TextLayout};
use crate::xml::{attr, escape, prefix_of, trailing_number};
use deck_core::{
    Alignment, Color, Deck, Paragraph, Picture, PictureSource, Rect, Result, Run, RunStyle, Shape,
    ShapeKind, Slide, TextFrame,
};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
const IMAGE_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
const RELS_HEADER: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    "\n",
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"></Relationships>"#
);

/// Writes slides, media and relationships into a [`Package`].
pub(crate) struct PptxWriter<'a> {
    package: &'a mut Package,
    /// Media part already written for each image file.
    media: HashMap<PathBuf, String>,
    /// Extensions of every media part added.
    extensions: BTreeSet<String>,
}

impl<'a> PptxWriter<'a> {
    pub fn new(package: &'a mut Package) -> Self {
        Self {
            package,
            media: HashMap::new(),
            extensions: BTreeSet::new(),
        }
    }

    /// Render every slide of `deck` over the part it was loaded from.
    pub fn write_deck(mut self, deck: &Deck, parts: &[SlidePart]) -> Result<()> {
        if deck.slides.len() != parts.len() {
            log::warn!(
                "Deck has {} slides but the template has {}; only the first {} are written",
                deck.slides.len(),
                parts.len(),
                deck.slides.len().min(parts.len())
            );
        }

        for (slide, part) in deck.slides.iter().zip(parts) {
            if slide.shapes() == part.shapes.as_slice() {
                log::debug!("{}: unchanged", part.path);
                continue;
            }
            let xml = self.render_slide(slide, part)?;
            self.package.set(&part.path, xml);
        }

        self.register_content_types()
    }

    fn render_slide(&mut self, slide: &Slide, part: &SlidePart) -> Result<String> {
        let mut rels = SlideRels::load(self.package, &part.path)?;
        let mut next_id = slide
            .shapes()
            .iter()
            .map(|s| s.id)
            .max()
            .unwrap_or(0)
            .max(part.max_id)
            + 1;

        let mut out = String::with_capacity(part.head.len() + part.tail.len() + 1024);
        out.push_str(&part.head);

        for shape in slide.shapes() {
            let source = part.sources.get(&shape.id);
            match (&shape.kind, source) {
                (
                    ShapeKind::Picture(Picture {
                        source: PictureSource::File(path),
                    }),
                    _,
                ) => {
                    // ids of nested shapes are not in `sources`; never reuse one
                    let id = if source.is_some() || shape.id > part.max_id {
                        shape.id
                    } else {
                        let id = next_id;
                        next_id += 1;
                        id
                    };
                    let media = self.add_media(path)?;
                    let rel_id = rels.image(&media);
                    out.push_str(&render_picture(shape, id, &rel_id));
                }
                (ShapeKind::Text(frame), Some(source)) => match &source.text {
                    Some(layout) => out.push_str(&render_text_shape(&source.raw, layout, frame)),
                    None => out.push_str(&source.raw),
                },
                (_, Some(source)) => out.push_str(&source.raw),
                (ShapeKind::Text(frame), None) => out.push_str(&render_new_text_shape(shape, frame)),
                (_, None) => {
                    log::warn!(
                        "{}: shape {} has no markup and is not written",
                        part.path,
                        shape.id
                    );
                }
            }
        }

        out.push_str(&part.tail);
        rels.save(self.package);
        Ok(out)
    }

    /// Copy an image file into `ppt/media`, once per file.
    fn add_media(&mut self, path: &Path) -> Result<String> {
        if let Some(name) = self.media.get(path) {
            return Ok(name.clone());
        }

        let data = std::fs::read(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| "png".to_string());

        let mut n = self
            .package
            .names()
            .filter(|name| name.starts_with("ppt/media/"))
            .filter_map(trailing_number)
            .max()
            .unwrap_or(0)
            + 1;
        let mut name = format!("ppt/media/image{}.{}", n, ext);
        while self.package.contains(&name) {
            n += 1;
            name = format!("ppt/media/image{}.{}", n, ext);
        }

        log::debug!("Embedding {} as {}", path.display(), name);
        self.package.set(&name, data);
        self.media.insert(path.to_path_buf(), name.clone());
        self.extensions.insert(ext);
        Ok(name)
    }

    /// Declare a content type for every media extension added.
    fn register_content_types(&mut self) -> Result<()> {
        if self.extensions.is_empty() {
            return Ok(());
        }

        let xml = self.package.get_str(CONTENT_TYPES_PART)?;
        let mut declared = BTreeSet::new();
        let mut reader = Reader::from_str(&xml);
        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.name().as_ref() == b"Default" =>
                {
                    if let Some(ext) = attr(e, b"Extension") {
                        declared.insert(ext.to_ascii_lowercase());
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(deck_core::Error::XmlError(format!(
                        "Error parsing {}: {}",
                        CONTENT_TYPES_PART, e
                    )));
                }
                _ => {}
            }
        }

        let mut defaults = String::new();
        for ext in self.extensions.difference(&declared) {
            defaults.push_str(&format!(
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                escape(ext),
                content_type(ext)
            ));
        }
        if defaults.is_empty() {
            return Ok(());
        }

        let xml = insert_before_close(&xml, "</Types>", &defaults);
        self.package.set(CONTENT_TYPES_PART, xml);
        Ok(())
    }
}

/// Relationships part of one slide.
struct SlideRels {
    path: String,
    xml: String,
    next_id: usize,
    added: String,
    /// Relationship id already given to each media part.
    targets: HashMap<String, String>,
    slide_dir: String,
}

impl SlideRels {
    fn load(package: &Package, slide_path: &str) -> Result<Self> {
        let (dir, file) = slide_path.rsplit_once('/').unwrap_or(("", slide_path));
        let path = format!("{}/_rels/{}.rels", dir, file);
        let xml = if package.contains(&path) {
            package.get_str(&path)?
        } else {
            RELS_HEADER.to_string()
        };

        let mut max_id = 0;
        let mut reader = Reader::from_str(&xml);
        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    if let Some(n) = attr(e, b"Id").as_deref().and_then(trailing_number) {
                        max_id = max_id.max(n);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(deck_core::Error::XmlError(format!(
                        "Error parsing {}: {}",
                        path, e
                    )));
                }
                _ => {}
            }
        }

        Ok(Self {
            path,
            xml,
            next_id: max_id + 1,
            added: String::new(),
            targets: HashMap::new(),
            slide_dir: dir.to_string(),
        })
    }

    /// Relationship id pointing at a media part, added if needed.
    fn image(&mut self, media: &str) -> String {
        if let Some(id) = self.targets.get(media) {
            return id.clone();
        }

        let id = format!("rId{}", self.next_id);
        self.next_id += 1;
        self.added.push_str(&format!(
            r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
            id,
            IMAGE_REL_TYPE,
            escape(&relative_target(&self.slide_dir, media))
        ));
        self.targets.insert(media.to_string(), id.clone());
        id
    }

    fn save(self, package: &mut Package) {
        if self.added.is_empty() {
            return;
        }
        let xml = insert_before_close(&self.xml, "</Relationships>", &self.added);
        package.set(&self.path, xml);
    }
}

/// Insert `content` before the last `close` tag, or append it.
fn insert_before_close(xml: &str, close: &str, content: &str) -> String {
    match xml.rfind(close) {
        Some(pos) => format!("{}{}{}", &xml[..pos], content, &xml[pos..]),
        None => format!("{}{}", xml, content),
    }
}

/// Path of `target` relative to the directory `from_dir`.
fn relative_target(from_dir: &str, target: &str) -> String {
    let from: Vec<&str> = from_dir.split('/').filter(|s| !s.is_empty()).collect();
    let to: Vec<&str> = target.split('/').collect();
    let common = from
        .iter()
        .zip(&to)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts = vec![".."; from.len() - common];
    parts.extend(&to[common..]);
    parts.join("/")
}

fn content_type(ext: &str) -> &'static str {
    match ext {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        "emf" => "image/x-emf",
        "wmf" => "image/x-wmf",
        _ => "application/octet-stream",
    }
}

fn render_picture(shape: &Shape, id: u32, rel_id: &str) -> String {
    let name = shape
        .name
        .clone()
        .unwrap_or_else(|| format!("Picture {}", id));
    format!(
        concat!(
            r#"<p:pic><p:nvPicPr><p:cNvPr id="{id}" name="{name}"/>"#,
            r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr>"#,
            r#"<p:blipFill><a:blip r:embed="{rel}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>"#,
            r#"<p:spPr>{xfrm}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#
        ),
        id = id,
        name = escape(&name),
        rel = rel_id,
        xfrm = render_xfrm(&shape.frame),
    )
}

fn render_xfrm(frame: &Rect) -> String {
    format!(
        r#"<a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>"#,
        frame.x, frame.y, frame.width, frame.height
    )
}

/// Swap the paragraphs of a loaded text shape for the model's.
///
/// Paragraphs still equal to the loaded ones are copied from their original
/// XML, and an unchanged shape is copied whole.
fn render_text_shape(raw: &str, layout: &TextLayout, frame: &TextFrame) -> String {
    let unchanged = frame.paragraphs.len() == layout.paragraphs.len()
        && frame
            .paragraphs
            .iter()
            .zip(&layout.paragraphs)
            .all(|(paragraph, source)| *paragraph == source.original);
    if unchanged {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    out.push_str(&raw[..layout.body_start]);
    for (i, paragraph) in frame.paragraphs.iter().enumerate() {
        match layout.paragraphs.get(i) {
            Some(source) if *paragraph == source.original => out.push_str(&source.raw),
            Some(source) => render_paragraph(&mut out, paragraph, source),
            None => render_paragraph(&mut out, paragraph, &default_paragraph_source()),
        }
    }
    out.push_str(&raw[layout.body_end..]);
    out
}

/// A text shape created in memory.
fn render_new_text_shape(shape: &Shape, frame: &TextFrame) -> String {
    let name = shape
        .name
        .clone()
        .unwrap_or_else(|| format!("TextBox {}", shape.id));
    let mut out = format!(
        concat!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="{}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>"#,
            r#"<p:spPr>{}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>"#,
            r#"<p:txBody><a:bodyPr wrap="square"/><a:lstStyle/>"#
        ),
        shape.id,
        escape(&name),
        render_xfrm(&shape.frame),
    );
    let source = default_paragraph_source();
    for paragraph in &frame.paragraphs {
        render_paragraph(&mut out, paragraph, &source);
    }
    if frame.paragraphs.is_empty() {
        out.push_str("<a:p/>");
    }
    out.push_str("</p:txBody></p:sp>");
    out
}

fn default_paragraph_source() -> ParagraphSource {
    ParagraphSource {
        tag: "a:p".to_string(),
        ..ParagraphSource::default()
    }
}

fn render_paragraph(out: &mut String, paragraph: &Paragraph, source: &ParagraphSource) {
    let prefix = prefix_of(&source.tag);
    out.push_str(&format!("<{}>", source.tag));

    let alignment = paragraph.alignment.map(alignment_value);
    match &source.props {
        Some(props) => {
            out.push_str(&format!("<{}", props.tag));
            for (key, value) in &props.attrs {
                out.push_str(&format!(r#" {}="{}""#, key, value));
            }
            if let Some(algn) = alignment {
                out.push_str(&format!(r#" algn="{}""#, algn));
            }
            match &props.inner {
                Some(inner) => out.push_str(&format!(">{}</{}>", inner, props.tag)),
                None => out.push_str("/>"),
            }
        }
        None => {
            if let Some(algn) = alignment {
                out.push_str(&format!(r#"<{}pPr algn="{}"/>"#, prefix, algn));
            }
        }
    }

    // runs keep their order through a splice, so each loaded run is matched
    // at most once and never before an earlier match
    let mut next = 0;
    for run in paragraph.runs() {
        let loaded = find_loaded_run(&source.runs[next.min(source.runs.len())..], &run.style);
        let props = match loaded {
            Some((offset, loaded)) => {
                next += offset + 1;
                loaded.props.clone()
            }
            None => render_run_props(&run.style, prefix),
        };
        render_run(out, run, prefix, props.as_deref());
    }

    if let Some(end_props) = &source.end_props {
        out.push_str(end_props);
    }
    out.push_str(&format!("</{}>", source.tag));
}

/// First loaded run with exactly `style`, and its offset in `runs`.
fn find_loaded_run<'a>(runs: &'a [RunSource], style: &RunStyle) -> Option<(usize, &'a RunSource)> {
    runs.iter().enumerate().find(|(_, loaded)| loaded.style == *style)
}

/// A run as `a:r` elements, with each line break as an `a:br`.
fn render_run(out: &mut String, run: &Run, prefix: &str, props: Option<&str>) {
    let lines: Vec<&str> = run.text.split('\n').collect();
    let single = lines.len() == 1;

    for (i, line) in lines.into_iter().enumerate() {
        if i > 0 {
            match props {
                Some(props) => out.push_str(&format!("<{p}br>{}</{p}br>", props, p = prefix)),
                None => out.push_str(&format!("<{}br/>", prefix)),
            }
        }
        if line.is_empty() && !single {
            continue;
        }
        out.push_str(&format!("<{}r>", prefix));
        if let Some(props) = props {
            out.push_str(props);
        }
        out.push_str(&format!("<{p}t>{}</{p}t></{p}r>", escape(line), p = prefix));
    }
}

/// `a:rPr` for a style; `None` when the run inherits everything.
fn render_run_props(style: &RunStyle, prefix: &str) -> Option<String> {
    if style.is_plain() {
        return None;
    }

    let mut attrs = String::new();
    if let Some(size) = style.size {
        attrs.push_str(&format!(r#" sz="{}""#, size.0));
    }
    if let Some(bold) = style.bold {
        attrs.push_str(&format!(r#" b="{}""#, u8::from(bold)));
    }
    if let Some(italic) = style.italic {
        attrs.push_str(&format!(r#" i="{}""#, u8::from(italic)));
    }
    if let Some(underline) = style.underline {
        attrs.push_str(&format!(r#" u="{}""#, if underline { "sng" } else { "none" }));
    }

    let mut children = String::new();
    if let Some(color) = style.color.as_ref().and_then(|c| render_color(c, prefix)) {
        children.push_str(&format!("<{p}solidFill>{}</{p}solidFill>", color, p = prefix));
    }
    if let Some(font) = &style.font {
        children.push_str(&format!(r#"<{}latin typeface="{}"/>"#, prefix, escape(font)));
    }

    Some(if children.is_empty() {
        format!("<{}rPr{}/>", prefix, attrs)
    } else {
        format!("<{p}rPr{}>{}</{p}rPr>", attrs, children, p = prefix)
    })
}

fn render_color(color: &Color, prefix: &str) -> Option<String> {
    match color {
        Color::Rgb([r, g, b]) => Some(format!(
            r#"<{}srgbClr val="{:02X}{:02X}{:02X}"/>"#,
            prefix, r, g, b
        )),
        Color::Theme { color, brightness } => {
            let mods = match brightness {
                Some(b) if *b > 0.0 => format!(
                    r#"<{p}lumMod val="{}"/><{p}lumOff val="{}"/>"#,
                    ((1.0 - b) * 100_000.0).round() as i64,
                    (b * 100_000.0).round() as i64,
                    p = prefix
                ),
                Some(b) if *b < 0.0 => format!(
                    r#"<{}lumMod val="{}"/>"#,
                    prefix,
                    ((1.0 + b) * 100_000.0).round() as i64
                ),
                _ => String::new(),
            };
            Some(if mods.is_empty() {
                format!(r#"<{}schemeClr val="{}"/>"#, prefix, escape(color))
            } else {
                format!(
                    r#"<{p}schemeClr val="{}">{}</{p}schemeClr>"#,
                    escape(color),
                    mods,
                    p = prefix
                )
            })
        }
        Color::Palette(index) => {
            log::warn!("Palette color {} has no OOXML form and is dropped", index);
            None
        }
    }
}

fn alignment_value(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "l",
        Alignment::Center => "ctr",
        Alignment::Right => "r",
        Alignment::Justify => "just",
        Alignment::Distributed => "dist",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParagraphProps;
    use deck_core::FontSize;

    #[test]
    fn test_relative_target() {
        assert_eq!(
            relative_target("ppt/slides", "ppt/media/image1.png"),
            "../media/image1.png"
        );
        assert_eq!(relative_target("ppt", "ppt/media/a.png"), "media/a.png");
    }

    #[test]
    fn test_plain_run_has_no_props() {
        let mut out = String::new();
        render_run(&mut out, &Run::plain("A < B"), "a:", None);
        assert_eq!(out, "<a:r><a:t>A &lt; B</a:t></a:r>");
    }

    #[test]
    fn test_styled_run() {
        let style = RunStyle {
            font: Some("Arial".into()),
            size: Some(FontSize(1800)),
            bold: Some(true),
            italic: Some(false),
            underline: None,
            color: Some(Color::Rgb([0x12, 0xAB, 0x00])),
        };
        let props = render_run_props(&style, "a:");
        let mut out = String::new();
        render_run(&mut out, &Run::styled("Lyon", style), "a:", props.as_deref());
        assert_eq!(
            out,
            concat!(
                r#"<a:r><a:rPr sz="1800" b="1" i="0"><a:solidFill><a:srgbClr val="12AB00"/></a:solidFill>"#,
                r#"<a:latin typeface="Arial"/></a:rPr><a:t>Lyon</a:t></a:r>"#
            )
        );
    }

    #[test]
    fn test_line_breaks_become_br() {
        let mut out = String::new();
        render_run(&mut out, &Run::plain("a\nb"), "a:", None);
        assert_eq!(out, "<a:r><a:t>a</a:t></a:r><a:br/><a:r><a:t>b</a:t></a:r>");
    }

    #[test]
    fn test_theme_brightness() {
        let darker = Color::Theme {
            color: "accent1".into(),
            brightness: Some(-0.25),
        };
        assert_eq!(
            render_color(&darker, "a:").unwrap(),
            r#"<a:schemeClr val="accent1"><a:lumMod val="75000"/></a:schemeClr>"#
        );

        let lighter = Color::Theme {
            color: "tx1".into(),
            brightness: Some(0.4),
        };
        assert_eq!(
            render_color(&lighter, "a:").unwrap(),
            r#"<a:schemeClr val="tx1"><a:lumMod val="60000"/><a:lumOff val="40000"/></a:schemeClr>"#
        );
        assert!(render_color(&Color::Palette(3), "a:").is_none());
    }

    #[test]
    fn test_paragraph_keeps_props_and_rewrites_alignment() {
        let source = ParagraphSource {
            tag: "a:p".into(),
            props: Some(ParagraphProps {
                tag: "a:pPr".into(),
                attrs: vec![("marL".into(), "0".into())],
                inner: Some("<a:buNone/>".into()),
            }),
            end_props: Some(r#"<a:endParaRPr lang="fr-FR"/>"#.into()),
            ..Default::default()
        };
        let paragraph = Paragraph::new(vec![Run::plain("x")]).with_alignment(Alignment::Right);

        let mut out = String::new();
        render_paragraph(&mut out, &paragraph, &source);
        assert_eq!(
            out,
            concat!(
                r#"<a:p><a:pPr marL="0" algn="r"><a:buNone/></a:pPr>"#,
                r#"<a:r><a:t>x</a:t></a:r><a:endParaRPr lang="fr-FR"/></a:p>"#
            )
        );
    }

    fn loaded_run(style: RunStyle, props: &str) -> RunSource {
        RunSource {
            style,
            props: Some(props.to_string()),
        }
    }

    #[test]
    fn test_rewritten_runs_keep_loaded_props() {
        let bold = RunStyle {
            bold: Some(true),
            ..RunStyle::default()
        };
        let grey = RunStyle {
            color: Some(Color::Rgb([0x80, 0x80, 0x80])),
            ..RunStyle::default()
        };
        let source = ParagraphSource {
            tag: "a:p".into(),
            runs: vec![
                loaded_run(
                    bold.clone(),
                    r#"<a:rPr lang="fr-FR" b="1" baseline="30000" strike="sngStrike"/>"#,
                ),
                loaded_run(
                    grey.clone(),
                    r#"<a:rPr lang="fr-FR"><a:solidFill><a:sysClr val="windowText" lastClr="808080"/></a:solidFill><a:hlinkClick r:id="rId9"/></a:rPr>"#,
                ),
            ],
            ..Default::default()
        };
        let paragraph = Paragraph::new(vec![
            Run::styled("Lyon", bold),
            Run::styled("2024", grey),
            Run::plain("!"),
        ]);

        let mut out = String::new();
        render_paragraph(&mut out, &paragraph, &source);
        assert_eq!(
            out,
            concat!(
                r#"<a:p><a:r><a:rPr lang="fr-FR" b="1" baseline="30000" strike="sngStrike"/><a:t>Lyon</a:t></a:r>"#,
                r#"<a:r><a:rPr lang="fr-FR"><a:solidFill><a:sysClr val="windowText" lastClr="808080"/></a:solidFill>"#,
                r#"<a:hlinkClick r:id="rId9"/></a:rPr><a:t>2024</a:t></a:r><a:r><a:t>!</a:t></a:r></a:p>"#
            )
        );
    }

    #[test]
    fn test_loaded_props_are_used_once_and_in_order() {
        let italic = RunStyle {
            italic: Some(true),
            ..RunStyle::default()
        };
        let source = ParagraphSource {
            tag: "a:p".into(),
            runs: vec![loaded_run(italic.clone(), r#"<a:rPr lang="en-US" i="1"/>"#)],
            ..Default::default()
        };
        let paragraph = Paragraph::new(vec![
            Run::styled("a", italic.clone()),
            Run::styled("b", italic),
        ]);

        let mut out = String::new();
        render_paragraph(&mut out, &paragraph, &source);
        assert_eq!(
            out,
            concat!(
                r#"<a:p><a:r><a:rPr lang="en-US" i="1"/><a:t>a</a:t></a:r>"#,
                r#"<a:r><a:rPr i="1"/><a:t>b</a:t></a:r></a:p>"#
            )
        );
    }

    #[test]
    fn test_break_keeps_loaded_props() {
        let mut out = String::new();
        render_run(&mut out, &Run::plain("\n"), "a:", Some(r#"<a:rPr lang="fr-FR"/>"#));
        assert_eq!(out, r#"<a:br><a:rPr lang="fr-FR"/></a:br>"#);
    }

    #[test]
    fn test_unchanged_text_shape_is_copied() {
        let raw = r#"<p:sp><p:txBody><a:bodyPr/><a:p><a:r><a:rPr lang="fr-FR" kern="1200"/><a:t>A</a:t></a:r></a:p><a:p><a:r><a:t>B</a:t></a:r></a:p></p:txBody></p:sp>"#;
        let first = r#"<a:p><a:r><a:rPr lang="fr-FR" kern="1200"/><a:t>A</a:t></a:r></a:p>"#;
        let second = r#"<a:p><a:r><a:t>B</a:t></a:r></a:p>"#;
        let body_start = raw.find(first).unwrap();
        let body_end = raw.find("</p:txBody>").unwrap();
        let layout = TextLayout {
            body_start,
            body_end,
            paragraphs: vec![
                ParagraphSource {
                    tag: "a:p".into(),
                    raw: first.into(),
                    original: Paragraph::new(vec![Run::plain("A")]),
                    ..Default::default()
                },
                ParagraphSource {
                    tag: "a:p".into(),
                    raw: second.into(),
                    original: Paragraph::new(vec![Run::plain("B")]),
                    ..Default::default()
                },
            ],
        };

        let frame = TextFrame::new(vec![
            Paragraph::new(vec![Run::plain("A")]),
            Paragraph::new(vec![Run::plain("B")]),
        ]);
        assert_eq!(render_text_shape(raw, &layout, &frame), raw);

        let frame = TextFrame::new(vec![
            Paragraph::new(vec![Run::plain("A")]),
            Paragraph::new(vec![Run::plain("C")]),
        ]);
        let out = render_text_shape(raw, &layout, &frame);
        assert!(out.contains(first));
        assert!(out.contains("<a:p><a:r><a:t>C</a:t></a:r></a:p></p:txBody>"));
    }

    #[test]
    fn test_content_types_are_added_once() {
        let mut package = Package::default();
        package.set(
            CONTENT_TYPES_PART,
            r#"<Types><Default Extension="png" ContentType="image/png"/></Types>"#,
        );
        let mut writer = PptxWriter::new(&mut package);
        writer.extensions.insert("png".into());
        writer.extensions.insert("jpg".into());
        writer.register_content_types().unwrap();

        assert_eq!(
            package.get_str(CONTENT_TYPES_PART).unwrap(),
            r#"<Types><Default Extension="png" ContentType="image/png"/><Default Extension="jpg" ContentType="image/jpeg"/></Types>"#
        );
    }

    #[test]
    fn test_slide_rels_allocate_after_existing_ids() {
        let mut package = Package::default();
        package.set(
            "ppt/slides/_rels/slide1.xml.rels",
            r#"<Relationships><Relationship Id="rId1" Type="x" Target="../slideLayouts/slideLayout1.xml"/><Relationship Id="rId4" Type="y" Target="z"/></Relationships>"#,
        );

        let mut rels = SlideRels::load(&package, "ppt/slides/slide1.xml").unwrap();
        assert_eq!(rels.image("ppt/media/image1.png"), "rId5");
        assert_eq!(rels.image("ppt/media/image1.png"), "rId5");
        assert_eq!(rels.image("ppt/media/image2.png"), "rId6");
        rels.save(&mut package);

        let xml = package.get_str("ppt/slides/_rels/slide1.xml.rels").unwrap();
        assert!(xml.contains(r#"<Relationship Id="rId6" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image2.png"/></Relationships>"#));
    }
}
