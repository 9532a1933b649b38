//! Cover page generation
//!
//! Builds the one-page PDF placed in front of every merged order:
//! student name, enrollment number and submission date/time, centered on
//! an A4 page. Deterministic for a given (name, id, timestamp).

use super::{DocumentError, DocumentResult};
use chrono::{DateTime, Local};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

/// A4 in PDF points
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;

/// Rough average glyph width for Helvetica, as a fraction of font size.
/// Good enough to center short lines without embedding font metrics.
const GLYPH_WIDTH_RATIO: f32 = 0.5;

struct Line<'a> {
    text: &'a str,
    font_size: f32,
    /// Distance from the top edge, in points
    from_top: f32,
}

fn centered_text_ops(line: &Line<'_>, ops: &mut Vec<Operation>) {
    let width = line.text.chars().count() as f32 * line.font_size * GLYPH_WIDTH_RATIO;
    let x = ((PAGE_WIDTH - width) / 2.0).max(36.0);
    let y = PAGE_HEIGHT - line.from_top;

    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec!["F1".into(), line.font_size.into()],
    ));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::string_literal(line.text)],
    ));
    ops.push(Operation::new("ET", vec![]));
}

fn horizontal_rule_ops(from_top: f32, ops: &mut Vec<Operation>) {
    let y = PAGE_HEIGHT - from_top;
    ops.push(Operation::new("w", vec![2.0f32.into()]));
    ops.push(Operation::new("m", vec![72.0f32.into(), y.into()]));
    ops.push(Operation::new(
        "l",
        vec![(PAGE_WIDTH - 72.0).into(), y.into()],
    ));
    ops.push(Operation::new("S", vec![]));
}

/// Generate the cover page PDF for an order.
pub fn generate(
    student_name: &str,
    student_id: &str,
    date_time: DateTime<Local>,
) -> DocumentResult<Vec<u8>> {
    let name_upper = student_name.to_uppercase();
    let formatted_date = date_time.format("%d %B %Y").to_string();
    let formatted_time = date_time.format("%I:%M %p").to_string();

    let lines = [
        Line { text: "PRINT ORDER", font_size: 36.0, from_top: 180.0 },
        Line { text: "Student Name", font_size: 24.0, from_top: 310.0 },
        Line { text: &name_upper, font_size: 28.0, from_top: 355.0 },
        Line { text: "Enrollment Number", font_size: 24.0, from_top: 450.0 },
        Line { text: student_id, font_size: 28.0, from_top: 495.0 },
        Line { text: "Date & Time", font_size: 24.0, from_top: 590.0 },
        Line { text: &formatted_date, font_size: 28.0, from_top: 635.0 },
        Line { text: &formatted_time, font_size: 24.0, from_top: 675.0 },
        Line { text: "Print Scheduling System", font_size: 12.0, from_top: PAGE_HEIGHT - 72.0 },
    ];

    let mut ops = Vec::new();
    horizontal_rule_ops(215.0, &mut ops);
    for line in &lines {
        centered_text_ops(line, &mut ops);
    }
    horizontal_rule_ops(PAGE_HEIGHT - 108.0, &mut ops);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let content = Content { operations: ops };
    let encoded = content
        .encode()
        .map_err(|e| DocumentError::Cover(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

    // Resources live on the page itself so they survive re-parenting
    // when the cover is merged in front of the submitted documents.
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| DocumentError::Cover(e.to_string()))?;
    Ok(buffer)
}
