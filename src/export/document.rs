//! Fixed-width, bordered, paginated table layout.
//!
//! Cell contents are never truncated or wrapped: a value wider than its
//! column simply runs past the cell border.

use std::ops::Range;

use super::pdf::{self, Canvas, Font, PAGE_HEIGHT, PAGE_WIDTH};

/// Left, top and right page margin, mm.
pub const MARGIN: f64 = 10.0;
/// Distance from the bottom edge at which a new page starts, mm.
pub const BREAK_MARGIN: f64 = 15.0;
/// Height of the title band, mm.
pub const TITLE_HEIGHT: f64 = 10.0;
/// Gap between the title band and the table, mm.
pub const TITLE_GAP: f64 = 10.0;
/// Height of every table row, mm.
pub const ROW_HEIGHT: f64 = 8.0;
/// Widths of the canonical columns, mm.
pub const COLUMN_WIDTHS: [f64; 5] = [25.0, 40.0, 50.0, 20.0, 40.0];
/// Width of any column past the canonical ones, mm.
pub const FALLBACK_WIDTH: f64 = 30.0;

const CELL_PADDING: f64 = 1.0;
const TITLE_SIZE: f64 = 16.0;
const BODY_SIZE: f64 = 10.0;
const FOOTER_SIZE: f64 = 8.0;
const TITLE_COLOR: u8 = 40;
const FOOTER_COLOR: u8 = 100;
const HEADER_FILL: u8 = 200;
const SHADED_FILL: u8 = 245;
const PLAIN_FILL: u8 = 255;

/// Width of column `index`, mm.
pub fn column_width(index: usize) -> f64 {
    COLUMN_WIDTHS.get(index).copied().unwrap_or(FALLBACK_WIDTH)
}

fn body_top() -> f64 {
    MARGIN + TITLE_HEIGHT + TITLE_GAP
}

fn break_at() -> f64 {
    PAGE_HEIGHT - BREAK_MARGIN
}

/// Splits `row_count` data rows into per-page ranges.
///
/// The first page also carries the column header row. There is always at
/// least one page, even with no rows.
pub fn paginate(row_count: usize) -> Vec<Range<usize>> {
    let mut pages = Vec::new();
    let mut start = 0;
    let mut y = body_top() + ROW_HEIGHT;
    for i in 0..row_count {
        if y + ROW_HEIGHT > break_at() {
            pages.push(start..i);
            start = i;
            y = body_top();
        }
        y += ROW_HEIGHT;
    }
    pages.push(start..row_count);
    pages
}

/// Renders a titled table into PDF bytes.
pub fn render(title: &str, headers: &[&str], rows: &[Vec<String>]) -> Vec<u8> {
    let ranges = paginate(rows.len());
    let mut pages = Vec::with_capacity(ranges.len());

    for (page_idx, range) in ranges.into_iter().enumerate() {
        let mut canvas = Canvas::new();
        draw_title(&mut canvas, title);

        let mut y = body_top();
        if page_idx == 0 {
            draw_row(&mut canvas, y, headers.iter().copied(), HEADER_FILL, Font::Bold, true);
            y += ROW_HEIGHT;
        }

        for (offset, row) in rows[range.clone()].iter().enumerate() {
            let fill = if (range.start + offset) % 2 == 1 {
                SHADED_FILL
            } else {
                PLAIN_FILL
            };
            draw_row(&mut canvas, y, row.iter().map(String::as_str), fill, Font::Regular, false);
            y += ROW_HEIGHT;
        }

        draw_footer(&mut canvas, page_idx + 1);
        pages.push(canvas);
    }

    pdf::assemble(title, &pages)
}

fn baseline(top: f64, height: f64, size_pt: f64) -> f64 {
    top + height / 2.0 + 0.3 * pdf::font_size_mm(size_pt)
}

fn centered_x(left: f64, width: f64, font: Font, size_pt: f64, text: &str) -> f64 {
    left + (width - pdf::text_width(font, size_pt, text)) / 2.0
}

fn draw_title(canvas: &mut Canvas, title: &str) {
    let width = PAGE_WIDTH - 2.0 * MARGIN;
    canvas.text(
        centered_x(MARGIN, width, Font::Bold, TITLE_SIZE, title),
        baseline(MARGIN, TITLE_HEIGHT, TITLE_SIZE),
        Font::Bold,
        TITLE_SIZE,
        TITLE_COLOR,
        title,
    );
}

fn draw_row<'a>(
    canvas: &mut Canvas,
    y: f64,
    cells: impl Iterator<Item = &'a str>,
    fill: u8,
    font: Font,
    centered: bool,
) {
    let mut x = MARGIN;
    for (idx, cell) in cells.enumerate() {
        let width = column_width(idx);
        canvas.cell_box(x, y, width, ROW_HEIGHT, Some(fill), true);
        let text_x = if centered {
            centered_x(x, width, font, BODY_SIZE, cell)
        } else {
            x + CELL_PADDING
        };
        canvas.text(text_x, baseline(y, ROW_HEIGHT, BODY_SIZE), font, BODY_SIZE, 0, cell);
        x += width;
    }
}

fn draw_footer(canvas: &mut Canvas, page_no: usize) {
    let label = format!("Page {page_no}");
    let top = PAGE_HEIGHT - BREAK_MARGIN;
    let width = PAGE_WIDTH - 2.0 * MARGIN;
    canvas.text(
        centered_x(MARGIN, width, Font::Italic, FOOTER_SIZE, &label),
        baseline(top, 10.0, FOOTER_SIZE),
        Font::Italic,
        FOOTER_SIZE,
        FOOTER_COLOR,
        &label,
    );
}
