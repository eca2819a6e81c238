//! Page layout for the transcript PDF.
//!
//! Everything here is plain geometry in millimetres measured from the top-left
//! corner of the page; the frontend only has to draw what [`layout`] returns.

use crate::chat::Exchange;

pub const EXPORT_TITLE: &str = "Potato Leaf Disease Chat History";
pub const EXPORT_FILE_NAME: &str = "potato_leaf_chat_history.pdf";
pub const HEADER: [&str; 2] = ["Sender", "Message"];
pub const HEADER_FILL: (u8, u8, u8) = (46, 125, 50);

const PT_TO_MM: f32 = 0.3528;
const LINE_SPACING: f32 = 1.15;
const TYPING_CELL: &str = "...";

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptTable {
    pub header: [String; 2],
    pub rows: Vec<[String; 2]>,
}

impl TranscriptTable {
    pub fn from_transcript(exchanges: &[Exchange]) -> Self {
        let rows = exchanges
            .iter()
            .map(|exchange| {
                let text = if exchange.is_typing { TYPING_CELL.to_string() } else { exchange.text.clone() };
                [exchange.speaker.to_string(), text]
            })
            .collect();

        Self { header: HEADER.map(String::from), rows }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub title_y: f32,
    pub title_font_size: f32,
    pub first_table_top: f32,
    pub next_table_top: f32,
    pub bottom_margin: f32,
    pub cell_padding: f32,
    pub font_size: f32,
    pub column_widths: [f32; 2],
}

impl Default for PageGeometry {
    /// A4 portrait.
    fn default() -> Self {
        Self {
            width: 210.0,
            height: 297.0,
            margin_left: 14.0,
            title_y: 22.0,
            title_font_size: 18.0,
            first_table_top: 30.0,
            next_table_top: 14.0,
            bottom_margin: 14.0,
            cell_padding: 3.0,
            font_size: 10.0,
            column_widths: [30.0, 150.0],
        }
    }
}

impl PageGeometry {
    /// Em size of body text in millimetres.
    pub fn font_height(&self) -> f32 {
        self.font_size * PT_TO_MM
    }

    pub fn line_height(&self) -> f32 {
        self.font_size * PT_TO_MM * LINE_SPACING
    }

    /// Usable line width of the given column, in ems of body text.
    pub fn line_width(&self, column: usize) -> f32 {
        let usable = self.column_widths[column] - 2.0 * self.cell_padding;
        usable / self.font_height()
    }

    fn row_height(&self, lines: usize) -> f32 {
        lines as f32 * self.line_height() + 2.0 * self.cell_padding
    }

    fn bottom_limit(&self) -> f32 {
        self.height - self.bottom_margin
    }

    fn lines_fitting(&self, top: f32) -> usize {
        let available = self.bottom_limit() - top - 2.0 * self.cell_padding;
        if available <= 0.0 {
            0
        } else {
            (available / self.line_height()).floor() as usize
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Header,
    /// Index into [`TranscriptTable::rows`].
    Body(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRow {
    pub kind: RowKind,
    pub top: f32,
    pub height: f32,
    pub cells: [Vec<String>; 2],
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageLayout {
    pub title: Option<String>,
    pub rows: Vec<PlacedRow>,
}

impl PageLayout {
    pub fn body_rows(&self) -> impl Iterator<Item = &PlacedRow> {
        self.rows.iter().filter(|row| matches!(row.kind, RowKind::Body(_)))
    }
}

// Helvetica advance widths for ' '..='~', in thousandths of an em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Advance of `c` in ems. Anything outside printable ASCII is counted as a
/// full em so it can never overflow the cell.
pub fn glyph_width(c: char) -> f32 {
    match c {
        ' '..='~' => f32::from(HELVETICA_WIDTHS[c as usize - 0x20]) / 1000.0,
        _ => 1.0,
    }
}

pub fn text_width(text: &str) -> f32 {
    text.chars().map(glyph_width).sum()
}

/// Byte offset of the longest prefix of `word` no wider than `max_width`.
/// Always at least one character.
fn split_point(word: &str, max_width: f32) -> usize {
    let mut width = 0.0;
    for (offset, c) in word.char_indices() {
        width += glyph_width(c);
        if width > max_width {
            return if offset == 0 { c.len_utf8() } else { offset };
        }
    }
    word.len()
}

/// Greedy word wrap on paragraph boundaries, measuring `max_width` in ems.
/// Words wider than a line are broken between characters.
pub fn wrap_text(text: &str, max_width: f32) -> Vec<String> {
    let space = glyph_width(' ');
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0.0;

        for mut word in paragraph.split_whitespace() {
            while text_width(word) > max_width {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0.0;
                }
                let (head, rest) = word.split_at(split_point(word, max_width));
                lines.push(head.to_string());
                word = rest;
            }
            if word.is_empty() {
                continue;
            }

            let word_width = text_width(word);
            if !line.is_empty() && line_width + space + word_width > max_width {
                lines.push(std::mem::take(&mut line));
                line_width = 0.0;
            }
            if !line.is_empty() {
                line.push(' ');
                line_width += space;
            }
            line.push_str(word);
            line_width += word_width;
        }

        lines.push(line);
    }

    lines
}

/// Replaces characters the built-in PDF fonts cannot encode.
pub fn to_latin1(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\t' => ' ',
            c if (c as u32) < 0x20 && c != '\n' => ' ',
            c if (c as u32) <= 0xFF => c,
            _ => '?',
        })
        .collect()
}

/// Paginates `table` into pages of positioned rows. The header row opens every
/// page and body rows keep transcript order.
pub fn layout(table: &TranscriptTable, geometry: &PageGeometry) -> Vec<PageLayout> {
    let widths = [geometry.line_width(0), geometry.line_width(1)];
    let header_cells = [
        wrap_text(&table.header[0], widths[0]),
        wrap_text(&table.header[1], widths[1]),
    ];
    let header_lines = header_cells[0].len().max(header_cells[1].len());
    let header_height = geometry.row_height(header_lines);
    let page_capacity = geometry.lines_fitting(geometry.next_table_top + header_height).max(1);

    let mut pages = Vec::new();
    let mut page = PageLayout { title: Some(EXPORT_TITLE.to_string()), rows: Vec::new() };
    let mut y = geometry.first_table_top;

    let place_header = |page: &mut PageLayout, y: &mut f32| {
        page.rows.push(PlacedRow {
            kind: RowKind::Header,
            top: *y,
            height: header_height,
            cells: header_cells.clone(),
        });
        *y += header_height;
    };
    place_header(&mut page, &mut y);

    for (index, row) in table.rows.iter().enumerate() {
        let cells = [wrap_text(&row[0], widths[0]), wrap_text(&row[1], widths[1])];
        let total = cells[0].len().max(cells[1].len());
        let mut start = 0;

        while start < total {
            let remaining = total - start;
            let fit = geometry.lines_fitting(y);
            let has_body = page.body_rows().next().is_some();
            // Prefer moving a whole row to a fresh page over splitting it.
            let split_avoidable = fit < remaining && remaining <= page_capacity && has_body;

            if (fit == 0 && has_body) || split_avoidable {
                pages.push(std::mem::take(&mut page));
                y = geometry.next_table_top;
                place_header(&mut page, &mut y);
                continue;
            }

            // A fresh page always accepts at least one line.
            let take = fit.max(1).min(remaining);
            let slice = |lines: &[String]| -> Vec<String> { lines.iter().skip(start).take(take).cloned().collect() };
            let height = geometry.row_height(take);
            page.rows.push(PlacedRow {
                kind: RowKind::Body(index),
                top: y,
                height,
                cells: [slice(&cells[0][..]), slice(&cells[1][..])],
            });
            y += height;
            start += take;
        }
    }

    pages.push(page);
    pages
}
