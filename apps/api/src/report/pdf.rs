//! Renders a `CvEvaluation` onto a single-page PDF.
//!
//! Layout mirrors the report contract: a centered title, then three
//! left-aligned word-wrapped blocks — the score line, the
//! "Improvement Areas:" label, and the improvement-areas body — all in
//! black Helvetica. Content past the bottom edge is not paginated; it
//! overflows silently.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::analysis::parser::CvEvaluation;
use crate::errors::AppError;
use crate::report::layout::{helvetica, wrap_text, LayoutConfig};

const REPORT_TITLE: &str = "CV Analysis Report";

/// Builds the report PDF and returns its bytes.
pub fn render_report(evaluation: &CvEvaluation, layout: &LayoutConfig) -> Result<Vec<u8>, AppError> {
    let metrics = helvetica();
    let mut ops: Vec<Operation> = Vec::new();

    // Centered title.
    let title_width = metrics.measure_str(REPORT_TITLE, layout.title_font_size_pt);
    let title_x = layout.margin_pt + (layout.text_width_pt() - title_width) / 2.0;
    let title_y = layout.page_height_pt - layout.margin_pt - layout.title_font_size_pt;
    push_line(&mut ops, REPORT_TITLE, title_x, title_y, layout.title_font_size_pt);

    let mut y = title_y - layout.line_height_pt();

    let score_line = match evaluation.score {
        Some(score) => format!("Score: {score}"),
        None => "Score: unscored".to_string(),
    };

    for block in [
        score_line.as_str(),
        "Improvement Areas:",
        evaluation.improvement_areas.as_str(),
    ] {
        y -= layout.line_height_pt();
        for line in wrap_text(block, metrics, layout.body_font_size_pt, layout.text_width_pt()) {
            push_line(&mut ops, &line, layout.margin_pt, y, layout.body_font_size_pt);
            y -= layout.line_height_pt();
        }
    }

    build_document(ops, layout)
}

/// One text line as its own BT..ET block at an absolute position.
fn push_line(ops: &mut Vec<Operation>, text: &str, x: f32, y: f32, font_size_pt: f32) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec!["F1".into(), font_size_pt.into()],
    ));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new("Tj", vec![Object::string_literal(text)]));
    ops.push(Operation::new("ET", vec![]));
}

fn build_document(ops: Vec<Operation>, layout: &LayoutConfig) -> Result<Vec<u8>, AppError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let content = Content { operations: ops };
    let encoded = content
        .encode()
        .map_err(|e| AppError::Render(format!("could not encode page content: {e}")))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });

    let media_box = vec![
        0.into(),
        0.into(),
        Object::Real(layout.page_width_pt),
        Object::Real(layout.page_height_pt),
    ];
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => media_box,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| AppError::Render(format!("could not serialize PDF: {e}")))?;
    Ok(bytes)
}
