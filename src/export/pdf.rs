//! Minimal PDF writer for summary downloads
//!
//! Emits a PDF 1.4 document by hand: Helvetica 12pt with WinAnsi
//! encoding, greedy word wrap inside A4 margins, one content stream
//! per page, and a correct cross-reference table. Characters outside
//! WinAnsi are replaced with '?'.

use crate::errors::{Result, TriageError};

/// Download filename offered to the browser
pub const PDF_FILENAME: &str = "diagnosis_summary.pdf";

/// A4 page size in points
const PAGE_WIDTH: f64 = 595.28;
const PAGE_HEIGHT: f64 = 841.89;

/// Page margin (10mm)
const MARGIN: f64 = 28.35;

/// Baseline-to-baseline distance (10mm)
const LINE_HEIGHT: f64 = 28.35;

/// Body font size in points
const FONT_SIZE: f64 = 12.0;

/// Baselines that fit between the top and bottom margin
const LINES_PER_PAGE: usize = 28;

/// Upper bound on document size; longer input is rejected
const MAX_PAGES: usize = 100;

/// Render summary text as a complete PDF document
///
/// The text is wrapped to the page width and flows across as many
/// pages as needed. Empty input still produces a valid single-page
/// document.
pub fn render_summary(text: &str) -> Result<Vec<u8>> {
    let max_width = PAGE_WIDTH - 2.0 * MARGIN;

    let mut lines: Vec<Vec<u8>> = Vec::new();
    for paragraph in text.split('\n') {
        let encoded = encode_winansi(paragraph);
        lines.extend(wrap_paragraph(&encoded, max_width));
    }
    if lines.is_empty() {
        lines.push(Vec::new());
    }

    let pages: Vec<&[Vec<u8>]> = lines.chunks(LINES_PER_PAGE).collect();
    if pages.len() > MAX_PAGES {
        return Err(TriageError::Pdf(format!(
            "text needs {} pages, maximum is {}",
            pages.len(),
            MAX_PAGES
        )));
    }

    Ok(assemble_document(&pages))
}

/// Map text to WinAnsi bytes, replacing unsupported characters with '?'
fn encode_winansi(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());

    for ch in text.chars() {
        match ch {
            '\r' => {}
            '\t' => bytes.push(b' '),
            ' '..='~' => bytes.push(ch as u8),
            '\u{2018}' => bytes.push(0x91),
            '\u{2019}' => bytes.push(0x92),
            '\u{201C}' => bytes.push(0x93),
            '\u{201D}' => bytes.push(0x94),
            '\u{2013}' => bytes.push(0x96),
            '\u{2014}' => bytes.push(0x97),
            '\u{2026}' => bytes.push(0x85),
            '\u{2022}' => bytes.push(0x95),
            '\u{20AC}' => bytes.push(0x80),
            '\u{00A0}'..='\u{00FF}' => bytes.push(ch as u32 as u8),
            _ => bytes.push(b'?'),
        }
    }

    bytes
}

/// Helvetica advance width in millesimal units for one WinAnsi byte
fn glyph_width(byte: u8) -> u32 {
    match byte {
        b' ' | b'!' | b',' | b'.' | b'/' | b':' | b';' => 278,
        b'"' => 355,
        b'\'' => 191,
        b'(' | b')' | b'-' | b'`' | b'r' => 333,
        b'*' => 389,
        b'+' | b'<' | b'=' | b'>' | b'~' => 584,
        b'^' => 469,
        b'%' => 889,
        b'&' => 667,
        b'0'..=b'9' | b'#' | b'$' | b'?' | b'_' => 556,
        b'@' => 1015,
        b'A' | b'B' | b'E' | b'K' | b'P' | b'V' | b'X' | b'Y' => 667,
        b'C' | b'D' | b'H' | b'N' | b'R' | b'U' => 722,
        b'F' | b'T' | b'Z' => 611,
        b'G' | b'O' | b'Q' => 778,
        b'I' | b'[' | b'\\' | b']' => 278,
        b'J' | b'k' | b'c' | b'x' | b'y' | b'z' | b's' | b'v' => 500,
        b'L' => 556,
        b'M' => 833,
        b'S' => 667,
        b'W' => 944,
        b'i' | b'j' | b'l' => 222,
        b'f' | b't' => 278,
        b'm' => 833,
        b'w' => 722,
        b'{' | b'}' => 334,
        b'|' => 260,
        0x91 | 0x92 => 222,
        0x93 | 0x94 => 333,
        0x96 => 556,
        0x97 => 1000,
        0x85 => 1000,
        0x95 => 350,
        // Lowercase body and accented letters cluster here
        _ => 556,
    }
}

/// Width of a byte run at the body font size, in points
fn text_width(bytes: &[u8]) -> f64 {
    let millis: u32 = bytes.iter().map(|&b| glyph_width(b)).sum();
    millis as f64 * FONT_SIZE / 1000.0
}

/// Greedy word wrap of one paragraph into lines of at most `max_width`
///
/// Words longer than a full line are hard-broken at the character that
/// would overflow. An empty paragraph yields one empty line.
fn wrap_paragraph(bytes: &[u8], max_width: f64) -> Vec<Vec<u8>> {
    let space_width = text_width(b" ");
    let mut lines: Vec<Vec<u8>> = Vec::new();
    let mut current: Vec<u8> = Vec::new();
    let mut current_width = 0.0;

    for word in bytes.split(|&b| b == b' ').filter(|w| !w.is_empty()) {
        let word_width = text_width(word);
        let needed = if current.is_empty() {
            word_width
        } else {
            current_width + space_width + word_width
        };

        if needed <= max_width {
            if !current.is_empty() {
                current.push(b' ');
                current_width += space_width;
            }
            current.extend_from_slice(word);
            current_width += word_width;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0.0;
        }

        if word_width <= max_width {
            current.extend_from_slice(word);
            current_width = word_width;
        } else {
            for &b in word {
                let width = text_width(&[b]);
                if !current.is_empty() && current_width + width > max_width {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }
                current.push(b);
                current_width += width;
            }
        }
    }

    lines.push(current);
    lines
}

/// Escape bytes for a PDF literal string
fn escape_pdf_string(bytes: &[u8]) -> Vec<u8> {
    let mut escaped = Vec::with_capacity(bytes.len());
    for &b in bytes {
        if b == b'(' || b == b')' || b == b'\\' {
            escaped.push(b'\\');
        }
        escaped.push(b);
    }
    escaped
}

/// Content stream drawing the given lines from the top margin down
fn page_content(lines: &[Vec<u8>]) -> Vec<u8> {
    let first_baseline = PAGE_HEIGHT - MARGIN - FONT_SIZE;

    let mut ops = Vec::new();
    ops.extend_from_slice(b"BT\n");
    ops.extend_from_slice(format!("/F1 {:.0} Tf\n", FONT_SIZE).as_bytes());
    ops.extend_from_slice(format!("{:.2} TL\n", LINE_HEIGHT).as_bytes());
    ops.extend_from_slice(format!("{:.2} {:.2} Td\n", MARGIN, first_baseline).as_bytes());

    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            ops.extend_from_slice(b"T*\n");
        }
        if !line.is_empty() {
            ops.push(b'(');
            ops.extend_from_slice(&escape_pdf_string(line));
            ops.extend_from_slice(b") Tj\n");
        }
    }

    ops.extend_from_slice(b"ET\n");
    ops
}

/// Serialize the full document: header, objects, xref table, trailer
fn assemble_document(pages: &[&[Vec<u8>]]) -> Vec<u8> {
    let page_count = pages.len();
    let total_objects = 3 + 2 * page_count;

    let mut out: Vec<u8> = Vec::new();
    let mut offsets: Vec<usize> = Vec::with_capacity(total_objects);
    out.extend_from_slice(b"%PDF-1.4\n");

    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", 4 + 2 * i))
        .collect();

    push_object(&mut out, &mut offsets, b"<< /Type /Catalog /Pages 2 0 R >>");
    push_object(
        &mut out,
        &mut offsets,
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_count
        )
        .as_bytes(),
    );
    push_object(
        &mut out,
        &mut offsets,
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
    );

    for (i, lines) in pages.iter().enumerate() {
        let content_ref = 5 + 2 * i;
        push_object(
            &mut out,
            &mut offsets,
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                PAGE_WIDTH, PAGE_HEIGHT, content_ref
            )
            .as_bytes(),
        );

        let content = page_content(lines);
        let mut stream_body = Vec::with_capacity(content.len() + 64);
        stream_body
            .extend_from_slice(format!("<< /Length {} >>\nstream\n", content.len()).as_bytes());
        stream_body.extend_from_slice(&content);
        stream_body.extend_from_slice(b"\nendstream");
        push_object(&mut out, &mut offsets, &stream_body);
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", total_objects + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            total_objects + 1,
            xref_offset
        )
        .as_bytes(),
    );

    out
}

/// Append one numbered object, recording its byte offset
fn push_object(out: &mut Vec<u8>, offsets: &mut Vec<usize>, body: &[u8]) {
    offsets.push(out.len());
    let number = offsets.len();
    out.extend_from_slice(format!("{} 0 obj\n", number).as_bytes());
    out.extend_from_slice(body);
    out.extend_from_slice(b"\nendobj\n");
}
