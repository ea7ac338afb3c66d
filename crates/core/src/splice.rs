//! Placeholder substitution that keeps character formatting.
//!
//! A placeholder may span several runs with different formatting. The engine
//! works on the paragraph's concatenated text, replaces the first occurrence
//! of the token and then rebuilds the runs so every surviving character keeps
//! the style it had. The inserted value takes the style of the run holding
//! the token's first character.

use crate::types::{Paragraph, Run, RunStyle, Slide};

/// Byte range of one original run, before and after the replacement.
#[derive(Debug, Clone)]
struct RunSpan {
    start: usize,
    end: usize,
    style: RunStyle,
}

/// Replace the first occurrence of `placeholder` in `paragraph` with `value`.
///
/// Returns `false`, leaving the paragraph untouched, when the placeholder
/// does not occur in the paragraph's text.
pub fn substitute(paragraph: &mut Paragraph, placeholder: &str, value: &str) -> bool {
    if placeholder.is_empty() {
        return false;
    }

    let text = paragraph.text();
    let Some(start) = text.find(placeholder) else {
        return false;
    };

    if text.trim() == placeholder.trim() {
        replace_whole(paragraph, value);
    } else {
        splice_runs(paragraph, &text, start, placeholder.len(), value);
    }
    true
}

/// Substitute in the first paragraph of `slide` that contains `placeholder`.
///
/// Only that one location changes, even if the token appears elsewhere on
/// the slide.
pub fn replace_in_slide(slide: &mut Slide, placeholder: &str, value: &str) -> bool {
    if placeholder.is_empty() {
        return false;
    }

    for shape in slide.shapes_mut() {
        let Some(frame) = shape.text_frame_mut() else {
            continue;
        };
        for paragraph in &mut frame.paragraphs {
            if paragraph.text().contains(placeholder) {
                return substitute(paragraph, placeholder, value);
            }
        }
    }

    log::debug!("Placeholder '{}' not found on this slide", placeholder);
    false
}

/// The paragraph is nothing but the token: one run, first run's style.
fn replace_whole(paragraph: &mut Paragraph, value: &str) {
    let old_runs = paragraph.clear_runs();
    let mut run = Run::plain(value);
    if let Some(first) = old_runs.first() {
        if let Err(e) = run.apply_style(&first.style) {
            log::warn!("Failed to apply run style: {}", e);
        }
    }
    paragraph.push_run(run);
}

/// General case: rewrite the text and rebuild run boundaries around it.
fn splice_runs(paragraph: &mut Paragraph, text: &str, start: usize, len: usize, value: &str) {
    let end = start + len;
    let mut new_text = String::with_capacity(text.len() - len + value.len());
    new_text.push_str(&text[..start]);
    new_text.push_str(value);
    new_text.push_str(&text[end..]);

    let value_end = start + value.len();
    let remap = |offset: usize| -> usize {
        if offset <= start {
            offset
        } else if offset >= end {
            offset - len + value.len()
        } else {
            value_end
        }
    };

    let old_runs = paragraph.clear_runs();
    let mut spans = Vec::with_capacity(old_runs.len());
    let mut offset = 0;
    for run in old_runs {
        let run_end = offset + run.text.len();
        spans.push(RunSpan {
            start: remap(offset),
            end: remap(run_end),
            style: run.style,
        });
        offset = run_end;
    }

    let mut cursor = 0;
    for span in spans {
        if span.start > cursor {
            paragraph.push_run(Run::plain(&new_text[cursor..span.start]));
        }
        if span.end > span.start {
            let mut run = Run::plain(&new_text[span.start..span.end]);
            if let Err(e) = run.apply_style(&span.style) {
                log::warn!("Failed to apply run style: {}", e);
            }
            paragraph.push_run(run);
        }
        cursor = cursor.max(span.end);
    }
    if cursor < new_text.len() {
        paragraph.push_run(Run::plain(&new_text[cursor..]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Alignment, Color, FontSize, Rect, Shape, ShapeKind, TextFrame};

    fn bold() -> RunStyle {
        RunStyle {
            bold: Some(true),
            ..RunStyle::default()
        }
    }

    fn italic() -> RunStyle {
        RunStyle {
            italic: Some(true),
            ..RunStyle::default()
        }
    }

    fn underline() -> RunStyle {
        RunStyle {
            underline: Some(true),
            ..RunStyle::default()
        }
    }

    fn texts(paragraph: &Paragraph) -> Vec<&str> {
        paragraph.runs().iter().map(|r| r.text.as_str()).collect()
    }

    #[test]
    fn test_style_preserved_per_run() {
        let mut p = Paragraph::new(vec![
            Run::styled("A", bold()),
            Run::styled("{{X}}", italic()),
            Run::styled("B", underline()),
        ]);

        assert!(substitute(&mut p, "{{X}}", "42"));
        assert_eq!(texts(&p), vec!["A", "42", "B"]);
        assert_eq!(p.runs()[0].style, bold());
        assert_eq!(p.runs()[1].style, italic());
        assert_eq!(p.runs()[2].style, underline());
    }

    #[test]
    fn test_whole_paragraph_fast_path() {
        let style = RunStyle {
            font: Some("Calibri".into()),
            size: Some(FontSize(2400)),
            bold: Some(true),
            color: Some(Color::Theme {
                color: "accent1".into(),
                brightness: Some(-0.25),
            }),
            ..RunStyle::default()
        };
        let mut p = Paragraph::new(vec![Run::styled("  {{Y}}  ", style.clone())])
            .with_alignment(Alignment::Center);

        assert!(substitute(&mut p, "{{Y}}", "Hello"));
        assert_eq!(p.runs().len(), 1);
        assert_eq!(p.runs()[0].text, "Hello");
        assert_eq!(p.runs()[0].style, style);
        assert_eq!(p.alignment, Some(Alignment::Center));
    }

    #[test]
    fn test_fast_path_uses_first_run_style() {
        let mut p = Paragraph::new(vec![
            Run::styled("{{", bold()),
            Run::styled("Ville", italic()),
            Run::styled("}}", underline()),
        ]);

        assert!(substitute(&mut p, "{{Ville}}", "Lyon"));
        assert_eq!(texts(&p), vec!["Lyon"]);
        assert_eq!(p.runs()[0].style, bold());
    }

    #[test]
    fn test_no_match_leaves_paragraph_untouched() {
        let mut p = Paragraph::new(vec![Run::styled("Ville : ", bold()), Run::plain("{{Ville}}")])
            .with_alignment(Alignment::Right);
        let before = p.clone();

        assert!(!substitute(&mut p, "{{Surface}}", "12"));
        assert_eq!(p, before);
        assert!(!substitute(&mut p, "", "12"));
        assert_eq!(p, before);
    }

    #[test]
    fn test_token_split_across_runs_takes_opening_style() {
        let mut p = Paragraph::new(vec![
            Run::styled("Surface : {{Sur", bold()),
            Run::styled("face}} m2", italic()),
        ]);

        assert!(substitute(&mut p, "{{Surface}}", "120"));
        assert_eq!(p.text(), "Surface : 120 m2");
        assert_eq!(texts(&p), vec!["Surface : 120", " m2"]);
        assert_eq!(p.runs()[0].style, bold());
        assert_eq!(p.runs()[1].style, italic());
    }

    #[test]
    fn test_runs_inside_token_are_dropped() {
        let mut p = Paragraph::new(vec![
            Run::styled("Maître : ", bold()),
            Run::styled("{{", italic()),
            Run::styled("Maitre_Ouvrage", underline()),
            Run::styled("}}", bold()),
            Run::plain("."),
        ]);

        assert!(substitute(&mut p, "{{Maitre_Ouvrage}}", "Ville de Lyon"));
        assert_eq!(texts(&p), vec!["Maître : ", "Ville de Lyon", "."]);
        assert_eq!(p.runs()[1].style, italic());
        assert!(p.runs()[2].style.is_plain());
    }

    #[test]
    fn test_only_first_occurrence_replaced() {
        let mut p = Paragraph::new(vec![Run::styled("{{A}} et {{A}}", bold())]);

        assert!(substitute(&mut p, "{{A}}", "1"));
        assert_eq!(p.text(), "1 et {{A}}");
        assert!(substitute(&mut p, "{{A}}", "2"));
        assert_eq!(p.text(), "1 et 2");
    }

    #[test]
    fn test_length_invariant_with_multibyte_text() {
        let cases = [
            ("{{Montant}}", "100 000,00 €"),
            ("{{Montant}}", ""),
            ("{{Montant}}", "é"),
        ];
        for (placeholder, value) in cases {
            let mut p = Paragraph::new(vec![
                Run::styled("Coût é", bold()),
                Run::styled("{{Mon", italic()),
                Run::styled("tant}}", underline()),
                Run::plain(" HT ²"),
            ]);
            let expected = p.text().replacen(placeholder, value, 1);

            assert!(substitute(&mut p, placeholder, value));
            assert_eq!(p.text(), expected);
            let total: usize = p.runs().iter().map(|r| r.text.len()).sum();
            assert_eq!(total, expected.len());
        }
    }

    #[test]
    fn test_value_shrinks_to_empty() {
        let mut p = Paragraph::new(vec![
            Run::styled("A", bold()),
            Run::styled("{{X}}", italic()),
            Run::styled("B", underline()),
        ]);

        assert!(substitute(&mut p, "{{X}}", ""));
        assert_eq!(texts(&p), vec!["A", "B"]);
        assert_eq!(p.runs()[1].style, underline());
    }

    #[test]
    fn test_replace_in_slide_changes_one_location() {
        let shape = |id| {
            Shape::new(
                id,
                Rect::default(),
                ShapeKind::Text(TextFrame::new(vec![
                    Paragraph::new(vec![Run::plain("intro")]),
                    Paragraph::new(vec![Run::plain("Ville : {{Ville}}")]),
                ])),
            )
        };
        let mut slide = Slide::default();
        slide.push(Shape::new(1, Rect::default(), ShapeKind::Other));
        slide.push(shape(2));
        slide.push(shape(3));

        assert!(replace_in_slide(&mut slide, "{{Ville}}", "Lyon"));
        let texts: Vec<String> = slide.paragraphs().map(Paragraph::text).collect();
        assert_eq!(
            texts,
            vec!["intro", "Ville : Lyon", "intro", "Ville : {{Ville}}"]
        );
        assert!(!replace_in_slide(&mut slide, "{{Absent}}", "x"));
    }
}
