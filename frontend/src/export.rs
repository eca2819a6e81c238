use gloo_file::{Blob, ObjectUrl};
use gloo_timers::callback::Timeout;
use printpdf::*;
use shared::chat::Exchange;
use shared::report::{
    self, EXPORT_FILE_NAME, EXPORT_TITLE, HEADER_FILL, PageGeometry, PageLayout, RowKind, TranscriptTable,
};
use shared::ExportError;
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

const STRIPE_FILL: (u8, u8, u8) = (245, 245, 245);
const TEXT_COLOR: (u8, u8, u8) = (40, 40, 40);
const HEADER_TEXT: (u8, u8, u8) = (255, 255, 255);

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, None))
}

fn pdf_error(err: impl std::fmt::Display) -> ExportError {
    ExportError::Pdf(err.to_string())
}

/// Renders the transcript to a PDF and hands it to the browser as a download.
pub fn export_transcript(exchanges: &[Exchange]) -> Result<(), ExportError> {
    let table = TranscriptTable::from_transcript(exchanges);
    let bytes = render_pdf(&table, &PageGeometry::default())?;
    log::info!("Exporting {} transcript rows ({} bytes)", table.rows.len(), bytes.len());
    download(&bytes, EXPORT_FILE_NAME)
}

fn render_pdf(table: &TranscriptTable, geometry: &PageGeometry) -> Result<Vec<u8>, ExportError> {
    let pages = report::layout(table, geometry);
    let (doc, first_page, first_layer) =
        PdfDocument::new(EXPORT_TITLE, Mm(geometry.width), Mm(geometry.height), "Layer 1");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?;

    for (number, page) in pages.iter().enumerate() {
        let layer = if number == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) =
                doc.add_page(Mm(geometry.width), Mm(geometry.height), format!("Layer {}", number + 1));
            doc.get_page(page_index).get_layer(layer_index)
        };
        draw_page(&layer, page, geometry, &regular, &bold);
    }

    doc.save_to_bytes().map_err(pdf_error)
}

fn draw_page(
    layer: &PdfLayerReference,
    page: &PageLayout,
    geometry: &PageGeometry,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    // printpdf measures from the bottom edge.
    let flip = |top: f32| Mm(geometry.height - top);
    let left = geometry.margin_left;
    let table_width: f32 = geometry.column_widths.iter().sum();

    if let Some(title) = &page.title {
        layer.set_fill_color(rgb(TEXT_COLOR));
        layer.use_text(report::to_latin1(title), geometry.title_font_size, Mm(left), flip(geometry.title_y), regular);
    }

    for row in &page.rows {
        let (fill, text_color, font) = match row.kind {
            RowKind::Header => (Some(HEADER_FILL), HEADER_TEXT, bold),
            RowKind::Body(index) if index % 2 == 1 => (Some(STRIPE_FILL), TEXT_COLOR, regular),
            RowKind::Body(_) => (None, TEXT_COLOR, regular),
        };

        if let Some(fill) = fill {
            layer.set_fill_color(rgb(fill));
            layer.add_rect(Rect::new(Mm(left), flip(row.top + row.height), Mm(left + table_width), flip(row.top)));
        }

        layer.set_fill_color(rgb(text_color));
        let mut x = left;
        for (column, lines) in row.cells.iter().enumerate() {
            for (n, line) in lines.iter().enumerate() {
                let baseline = row.top + geometry.cell_padding + geometry.font_height() + n as f32 * geometry.line_height();
                layer.use_text(report::to_latin1(line), geometry.font_size, Mm(x + geometry.cell_padding), flip(baseline), font);
            }
            x += geometry.column_widths[column];
        }
    }
}

fn download(bytes: &[u8], file_name: &str) -> Result<(), ExportError> {
    let blob = Blob::new_with_options(bytes, Some("application/pdf"));
    let url = ObjectUrl::from(blob);

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| ExportError::Download("no document available".into()))?;
    let anchor = document
        .create_element("a")
        .map_err(|e| ExportError::Download(format!("{:?}", e)))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| ExportError::Download("created element is not an anchor".into()))?;

    anchor.set_href(&url.to_string());
    anchor.set_download(file_name);
    anchor.click();

    // Keep the object URL alive until the click has been handled.
    Timeout::new(0, move || drop(url)).forget();
    Ok(())
}
