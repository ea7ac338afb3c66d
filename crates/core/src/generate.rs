//! Row-to-slide generation pass.
//!
//! Row `i` fills slide `i`. Rows beyond the last slide are dropped and
//! slides beyond the last row are left as they are. Nothing in a pass is
//! fatal: whatever cannot be filled is recorded in the [`GenerationReport`]
//! and the pass moves on.

use crate::badges::layout_badges;
use crate::config::{GenerationConfig, ImageSlot};
use crate::data::{CellValue, Row, Table};
use crate::format::format_value;
use crate::picture::{replace_picture, PictureOutcome};
use crate::scan::find_placeholders;
use crate::splice::replace_in_slide;
use crate::types::{Deck, Slide};
use serde::Serialize;
use std::path::PathBuf;

/// What happened to one slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SlideReport {
    /// Zero-based slide (and row) index.
    pub index: usize,
    /// Placeholders substituted, as written in the configuration.
    pub replaced: Vec<String>,
    /// Mapped placeholders that do not appear on the slide.
    pub absent: Vec<String>,
    /// Placeholders found by the scan but not substituted.
    pub failed: Vec<String>,
    /// Picture replacement, when a picture was looked for.
    pub picture: Option<PictureReport>,
    /// Badge icons placed, in stacking order.
    pub badges: Vec<PathBuf>,
}

/// Picture lookup for one slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PictureReport {
    /// Image file used, or the last candidate tried.
    pub path: Option<PathBuf>,
    pub outcome: PictureOutcome,
}

/// Outcome of a whole pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationReport {
    pub slides: Vec<SlideReport>,
    /// Rows with no slide left to fill.
    pub dropped_rows: usize,
}

impl GenerationReport {
    pub fn replaced_count(&self) -> usize {
        self.slides.iter().map(|s| s.replaced.len()).sum()
    }

    pub fn pictures_replaced(&self) -> usize {
        self.slides
            .iter()
            .filter(|s| s.picture.as_ref().is_some_and(|p| p.outcome.is_replaced()))
            .count()
    }

    pub fn badges_placed(&self) -> usize {
        self.slides.iter().map(|s| s.badges.len()).sum()
    }
}

/// Fill `deck` from `table` according to `config`.
pub fn generate(deck: &mut Deck, table: &Table, config: &GenerationConfig) -> GenerationReport {
    let mut report = GenerationReport::default();

    for (index, row) in table.rows.iter().enumerate() {
        let Some(slide) = deck.slides.get_mut(index) else {
            report.dropped_rows = table.rows.len() - index;
            log::info!(
                "{} rows left over with no slide to fill",
                report.dropped_rows
            );
            break;
        };

        log::info!("Filling slide {}", index + 1);
        report.slides.push(fill_slide(slide, index, row, config));
    }

    report
}

/// Fill one slide from one row.
pub fn fill_slide(
    slide: &mut Slide,
    index: usize,
    row: &Row,
    config: &GenerationConfig,
) -> SlideReport {
    let mut report = SlideReport {
        index,
        ..SlideReport::default()
    };

    let on_slide = find_placeholders(slide);
    for mapping in &config.placeholders {
        if mapping.column.is_empty() {
            continue;
        }
        let Some(actual) = on_slide.resolve(&mapping.placeholder) else {
            log::debug!("'{}' is not on slide {}", mapping.placeholder, index + 1);
            report.absent.push(mapping.placeholder.clone());
            continue;
        };

        let value = CellValue::coerce(row.value(&mapping.column));
        let text = format_value(&value, mapping.format);
        if replace_in_slide(slide, actual, &text) {
            report.replaced.push(mapping.placeholder.clone());
        } else {
            log::warn!(
                "Placeholder '{}' not found on slide {}",
                actual,
                index + 1
            );
            report.failed.push(mapping.placeholder.clone());
        }
    }

    if let Some(image) = config.image.as_ref().filter(|i| !i.column.is_empty()) {
        report.picture = Some(fill_picture(slide, row, image));
    }

    if let Some(badges) = &config.badges {
        report.badges = layout_badges(slide, row, badges);
    }

    report
}

fn fill_picture(slide: &mut Slide, row: &Row, image: &ImageSlot) -> PictureReport {
    let candidates = image.candidates(row.value(&image.column));
    match candidates.iter().find(|p| p.exists()) {
        Some(path) => PictureReport {
            path: Some(path.clone()),
            outcome: replace_picture(slide, &image.target, path),
        },
        None => {
            log::warn!(
                "No image found for '{}' in {}",
                row.value(&image.column),
                image.dir.display()
            );
            PictureReport {
                path: candidates.last().cloned(),
                outcome: PictureOutcome::MissingFile,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlaceholderMapping;
    use crate::format::ValueFormat;
    use crate::types::{Extent, Paragraph, Rect, Run, Shape, ShapeKind, TextFrame};

    fn slide(text: &str) -> Slide {
        let mut slide = Slide::new(Extent::new(1000, 1000));
        slide.push(Shape::new(
            2,
            Rect::default(),
            ShapeKind::Text(TextFrame::new(vec![Paragraph::new(vec![Run::plain(text)])])),
        ));
        slide
    }

    fn text_of(slide: &Slide) -> String {
        slide.paragraphs().map(Paragraph::text).collect::<Vec<_>>().join("\n")
    }

    fn config() -> GenerationConfig {
        GenerationConfig {
            placeholders: vec![
                PlaceholderMapping::new("{{Ville}}", "Ville"),
                PlaceholderMapping::new("{{Montant}}", "montant")
                    .with_format(ValueFormat::Currency),
                PlaceholderMapping::new("{{Absent}}", "Ville"),
                PlaceholderMapping::new("{{Libre}}", ""),
            ],
            image: None,
            badges: None,
        }
    }

    #[test]
    fn test_rows_fill_slides_positionally() {
        let mut deck = Deck::default();
        deck.slides.push(slide("{{ Ville }} : {{Montant}}"));
        deck.slides.push(slide("{{ville}} {{Libre}}"));
        deck.slides.push(slide("{{Ville}}"));
        let table = Table {
            columns: vec![],
            rows: vec![
                Row::from_pairs([("Ville", "Lyon"), ("montant", "250000")]),
                Row::from_pairs([("Ville", "Caen")]),
            ],
        };

        let report = generate(&mut deck, &table, &config());

        assert_eq!(text_of(&deck.slides[0]), "Lyon : 250 000,00 €");
        assert_eq!(text_of(&deck.slides[1]), "Caen {{Libre}}");
        assert_eq!(text_of(&deck.slides[2]), "{{Ville}}");
        assert_eq!(report.slides.len(), 2);
        assert_eq!(report.slides[0].replaced, vec!["{{Ville}}", "{{Montant}}"]);
        assert_eq!(report.slides[0].absent, vec!["{{Absent}}"]);
        assert_eq!(report.slides[1].absent, vec!["{{Montant}}", "{{Absent}}"]);
        assert_eq!(report.dropped_rows, 0);
        assert_eq!(report.replaced_count(), 3);
    }

    #[test]
    fn test_extra_rows_dropped() {
        let mut deck = Deck::default();
        deck.slides.push(slide("{{Ville}}"));
        let table = Table {
            columns: vec![],
            rows: vec![
                Row::from_pairs([("Ville", "Lyon")]),
                Row::from_pairs([("Ville", "Caen")]),
                Row::from_pairs([("Ville", "Brest")]),
            ],
        };

        let report = generate(&mut deck, &table, &config());
        assert_eq!(text_of(&deck.slides[0]), "Lyon");
        assert_eq!(report.slides.len(), 1);
        assert_eq!(report.dropped_rows, 2);
    }

    #[test]
    fn test_missing_cell_becomes_empty() {
        let mut deck = Deck::default();
        deck.slides.push(slide("Ville : {{Ville}}"));
        let table = Table {
            columns: vec![],
            rows: vec![Row::new()],
        };

        generate(&mut deck, &table, &config());
        assert_eq!(text_of(&deck.slides[0]), "Ville : ");
    }

    #[test]
    fn test_missing_image_is_reported() {
        let mut deck = Deck::default();
        deck.slides.push(slide("x"));
        let table = Table {
            columns: vec![],
            rows: vec![Row::from_pairs([("Numero_Projet", "P12")])],
        };
        let config = GenerationConfig {
            placeholders: vec![],
            image: Some(ImageSlot {
                dir: PathBuf::from("/nonexistent/images"),
                ..ImageSlot::default()
            }),
            badges: None,
        };

        let report = generate(&mut deck, &table, &config);
        let picture = report.slides[0].picture.as_ref().unwrap();
        assert_eq!(picture.outcome, PictureOutcome::MissingFile);
        assert_eq!(
            picture.path,
            Some(PathBuf::from("/nonexistent/images/12.jpeg"))
        );
        assert_eq!(report.pictures_replaced(), 0);
    }
}
