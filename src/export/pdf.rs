//! Minimal PDF 1.4 writer: standard Type1 fonts, gray fills, boxes and text.
//!
//! Coordinates are millimetres from the top-left corner of an A4 page and are
//! converted to PDF points (bottom-left origin) when emitted.

/// Page width in millimetres (A4 portrait).
pub const PAGE_WIDTH: f64 = 210.0;
/// Page height in millimetres (A4 portrait).
pub const PAGE_HEIGHT: f64 = 297.0;

/// Points per millimetre.
const K: f64 = 72.0 / 25.4;
/// Border line width, 0.2 mm.
const LINE_WIDTH: f64 = 0.567;
/// Width used for glyphs outside printable ASCII.
const DEFAULT_GLYPH_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Built-in font faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    /// Helvetica.
    Regular,
    /// Helvetica-Bold.
    Bold,
    /// Helvetica-Oblique.
    Italic,
}

impl Font {
    const ALL: [Font; 3] = [Font::Regular, Font::Bold, Font::Italic];

    fn resource(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
            Self::Italic => "F3",
        }
    }

    fn base_font(self) -> &'static str {
        match self {
            Self::Regular => "Helvetica",
            Self::Bold => "Helvetica-Bold",
            Self::Italic => "Helvetica-Oblique",
        }
    }

    fn glyph_width(self, byte: u8) -> u16 {
        let table = match self {
            Self::Bold => &HELVETICA_BOLD_WIDTHS,
            Self::Regular | Self::Italic => &HELVETICA_WIDTHS,
        };
        match byte {
            32..=126 => table[usize::from(byte - 32)],
            _ => DEFAULT_GLYPH_WIDTH,
        }
    }
}

/// Rendered width of `text` in millimetres.
pub fn text_width(font: Font, size_pt: f64, text: &str) -> f64 {
    let units: u32 = encode_text(text)
        .into_iter()
        .map(|b| u32::from(font.glyph_width(b)))
        .sum();
    f64::from(units) * size_pt / 1000.0 / K
}

/// Font size in millimetres.
pub fn font_size_mm(size_pt: f64) -> f64 {
    size_pt / K
}

/// Maps text to WinAnsi bytes; anything outside Latin-1 becomes `?`.
fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u32::from(c) {
            0x20..=0x7E | 0xA0..=0xFF => c as u8,
            _ => b'?',
        })
        .collect()
}

fn escape_literal(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len() + 2);
    out.push(b'(');
    for &b in bytes {
        if matches!(b, b'(' | b')' | b'\\') {
            out.push(b'\\');
        }
        out.push(b);
    }
    out.push(b')');
    out
}

fn gray(level: u8) -> f64 {
    f64::from(level) / 255.0
}

/// Content stream of one page.
#[derive(Debug, Clone)]
pub struct Canvas {
    ops: Vec<u8>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Empty page with the default border width and black strokes.
    pub fn new() -> Self {
        let mut canvas = Self { ops: Vec::new() };
        canvas.op(format!("{LINE_WIDTH:.3} w 0 G"));
        canvas
    }

    fn op(&mut self, text: String) {
        self.ops.extend_from_slice(text.as_bytes());
        self.ops.push(b'\n');
    }

    /// Draws a `w`×`h` box at (`x`, `y`), filled with `fill` gray and/or bordered.
    pub fn cell_box(&mut self, x: f64, y: f64, w: f64, h: f64, fill: Option<u8>, border: bool) {
        let rect = format!(
            "{:.2} {:.2} {:.2} {:.2} re",
            x * K,
            (PAGE_HEIGHT - y - h) * K,
            w * K,
            h * K
        );
        match (fill, border) {
            (Some(level), true) => self.op(format!("{:.3} g {rect} B", gray(level))),
            (Some(level), false) => self.op(format!("{:.3} g {rect} f", gray(level))),
            (None, true) => self.op(format!("{rect} S")),
            (None, false) => {}
        }
    }

    /// Writes `text` with its baseline at (`x`, `baseline`).
    pub fn text(&mut self, x: f64, baseline: f64, font: Font, size_pt: f64, color: u8, text: &str) {
        let mut line = format!(
            "q {:.3} g BT /{} {:.2} Tf {:.2} {:.2} Td ",
            gray(color),
            font.resource(),
            size_pt,
            x * K,
            (PAGE_HEIGHT - baseline) * K
        )
        .into_bytes();
        line.extend_from_slice(&escape_literal(&encode_text(text)));
        line.extend_from_slice(b" Tj ET Q\n");
        self.ops.extend_from_slice(&line);
    }

    /// Raw content stream bytes.
    pub fn content(&self) -> &[u8] {
        &self.ops
    }
}

/// Serializes `pages` into a complete PDF file.
pub fn assemble(title: &str, pages: &[Canvas]) -> Vec<u8> {
    let mut objects: Vec<Vec<u8>> = Vec::new();

    // 1: catalog, 2: page tree, 3..=5: fonts, 6: resources, then page/content pairs, then info.
    let first_page_obj = 7;
    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", first_page_obj + 2 * i))
        .collect();

    objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());
    objects.push(
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} /MediaBox [0 0 {:.2} {:.2}] >>",
            kids.join(" "),
            pages.len(),
            PAGE_WIDTH * K,
            PAGE_HEIGHT * K
        )
        .into_bytes(),
    );
    for font in Font::ALL {
        objects.push(
            format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                font.base_font()
            )
            .into_bytes(),
        );
    }
    objects.push(b"<< /Font << /F1 3 0 R /F2 4 0 R /F3 5 0 R >> >>".to_vec());

    for (i, page) in pages.iter().enumerate() {
        let content_obj = first_page_obj + 2 * i + 1;
        objects.push(
            format!("<< /Type /Page /Parent 2 0 R /Resources 6 0 R /Contents {content_obj} 0 R >>")
                .into_bytes(),
        );
        let mut stream = format!("<< /Length {} >>\nstream\n", page.content().len()).into_bytes();
        stream.extend_from_slice(page.content());
        stream.extend_from_slice(b"\nendstream");
        objects.push(stream);
    }

    let info_obj = objects.len() + 1;
    let mut info = b"<< /Title ".to_vec();
    info.extend_from_slice(&escape_literal(&encode_text(title)));
    info.extend_from_slice(b" /Producer (trafficlog) >>");
    objects.push(info);

    let mut out = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_at = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
    for offset in offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R /Info {info_obj} 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::{Canvas, Font, assemble, escape_literal, text_width};

    #[test]
    fn literals_escape_delimiters() {
        assert_eq!(escape_literal(b"a(b)c\\"), b"(a\\(b\\)c\\\\)".to_vec());
    }

    #[test]
    fn bold_text_is_wider_than_regular() {
        let regular = text_width(Font::Regular, 10.0, "license_plate");
        let bold = text_width(Font::Bold, 10.0, "license_plate");
        assert!(bold > regular);
        assert!(regular > 20.0 && regular < 25.0, "{regular}");
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let mut page = Canvas::new();
        page.text(10.0, 20.0, Font::Regular, 10.0, 0, "hello");
        let pdf = assemble("t", &[page]);
        let marker = b"startxref\n";
        let at = pdf
            .windows(marker.len())
            .rposition(|w| w == marker)
            .unwrap()
            + marker.len();
        let tail = std::str::from_utf8(&pdf[at..]).unwrap();
        let xref_at: usize = tail.lines().next().unwrap().parse().unwrap();
        assert!(pdf[xref_at..].starts_with(b"xref\n"));

        let xref = std::str::from_utf8(&pdf[xref_at..]).unwrap();
        let first_entry = xref.lines().nth(3).unwrap();
        let offset: usize = first_entry[..10].parse().unwrap();
        assert!(pdf[offset..].starts_with(b"1 0 obj"));
    }
}
