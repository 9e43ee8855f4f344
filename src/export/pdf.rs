use crate::export::pdf_font::{FontSet, PdfFont, RefAlloc};
use crate::export::pdf_image::PdfImage;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Zlib-compress a stream body (`/FlateDecode`).
pub(crate) fn deflate(data: &[u8]) -> Vec<u8> {
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
    // Writing into a Vec cannot fail.
    let _ = enc.write_all(data);
    enc.finish().unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    /// Regular face with a slanted text matrix.
    Italic,
}

pub struct PdfManager {
    pdf: Pdf,
    refs: RefAlloc,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,

    fonts: FontSet,
    regular_id: Ref,
    bold_id: Ref,
    images: Vec<(String, Ref)>,

    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new(FontSet::builtin())
    }
}

impl PdfManager {
    /// A4 portrait document.
    pub fn new(fonts: FontSet) -> Self {
        let mut refs = RefAlloc::new(1);
        let catalog_id = refs.fresh();
        let pages_id = refs.fresh();
        let regular_id = refs.fresh();
        let bold_id = refs.fresh();

        Self {
            pdf: Pdf::new(),
            refs,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            current_content_id: None,

            page_w: 595.0,
            page_h: 842.0,
            margin: 50.0,
            row_h: 20.0,

            fonts,
            regular_id,
            bold_id,
            images: Vec::new(),

            font_size: 9.0,
            header_font_size: 10.0,
            title_font_size: 14.0,
        }
    }

    pub fn page_width(&self) -> f32 {
        self.page_w
    }

    pub fn page_height(&self) -> f32 {
        self.page_h
    }

    /// Embed an image; pages created afterwards can draw it by the returned name.
    pub fn add_image(&mut self, img: &PdfImage) -> String {
        let id = self.refs.fresh();
        let mask_id = img.has_mask().then(|| self.refs.fresh());
        img.write(&mut self.pdf, id, mask_id);

        let name = format!("Im{}", self.images.len() + 1);
        self.images.push((name.clone(), id));
        name
    }

    /// Crea una nuova pagina e relativo oggetto di contenuto
    pub fn new_page(&mut self) -> Content {
        let page_id = self.refs.fresh();
        let content_id = self.refs.fresh();

        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
            .contents(content_id);

        let mut resources = page.resources();
        resources
            .fonts()
            .pair(Name(b"F1"), self.regular_id)
            .pair(Name(b"F2"), self.bold_id);
        if !self.images.is_empty() {
            let mut xobjects = resources.x_objects();
            for (name, id) in &self.images {
                xobjects.pair(Name(name.as_bytes()), *id);
            }
        }
        drop(resources);
        drop(page);

        self.current_content_id = Some(content_id);

        Content::new()
    }

    /// Scrive lo stream della pagina corrente
    pub fn finalize_page(&mut self, content: Content) {
        if let Some(id) = self.current_content_id.take() {
            self.pdf.stream(id, &content.finish());
        }
    }

    fn font(&self, style: FontStyle) -> &PdfFont {
        match style {
            FontStyle::Bold => &self.fonts.bold,
            _ => &self.fonts.regular,
        }
    }

    pub fn text_width(&self, style: FontStyle, size: f32, text: &str) -> f32 {
        self.font(style).width(text, size)
    }

    pub fn draw_text(
        &mut self,
        content: &mut Content,
        x: f32,
        y: f32,
        size: f32,
        style: FontStyle,
        text: &str,
    ) {
        let (name, bytes) = match style {
            FontStyle::Bold => (Name(b"F2"), self.fonts.bold.encode(text)),
            _ => (Name(b"F1"), self.fonts.regular.encode(text)),
        };
        let skew = if style == FontStyle::Italic { 0.2 } else { 0.0 };

        content.begin_text();
        content.set_font(name, size);
        content.set_text_matrix([1.0, 0.0, skew, 1.0, x, y]);
        content.show(Str(&bytes));
        content.end_text();
    }

    pub fn draw_text_right(
        &mut self,
        content: &mut Content,
        right_x: f32,
        y: f32,
        size: f32,
        style: FontStyle,
        text: &str,
    ) {
        let w = self.text_width(style, size, text);
        self.draw_text(content, right_x - w, y, size, style, text);
    }

    pub fn draw_text_centered(
        &mut self,
        content: &mut Content,
        center_x: f32,
        y: f32,
        size: f32,
        style: FontStyle,
        text: &str,
    ) {
        let w = self.text_width(style, size, text);
        self.draw_text(content, center_x - w / 2.0, y, size, style, text);
    }

    pub fn draw_line(&self, content: &mut Content, x1: f32, y1: f32, x2: f32, y2: f32) {
        content.save_state();
        content.set_line_width(0.8);
        content.move_to(x1, y1);
        content.line_to(x2, y2);
        content.stroke();
        content.restore_state();
    }

    /// Draw a registered image with its lower-left corner at (x, y).
    pub fn draw_image(&self, content: &mut Content, name: &str, x: f32, y: f32, w: f32, h: f32) {
        content.save_state();
        content.transform([w, 0.0, 0.0, h, x, y]);
        content.x_object(Name(name.as_bytes()));
        content.restore_state();
    }

    /// Greedy word wrap measured with the actual font.
    /// Returns the input as a single line when it has no words.
    pub fn wrap_text(&self, text: &str, style: FontStyle, size: f32, max_w: f32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();

        for word in text.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if self.text_width(style, size, &candidate) <= max_w || current.is_empty() {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }

        if lines.is_empty() {
            vec![text.to_string()]
        } else {
            lines
        }
    }

    fn draw_cell_borders(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32) {
        content.save_state();
        content.set_stroke_rgb(0.65, 0.65, 0.65);
        content.rect(x, y, w, h);
        content.stroke();
        content.restore_state();
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_row(
        &mut self,
        content: &mut Content,
        y: f32,
        col_widths: &[f32],
        x_start: f32,
        row: &[String],
        font_size: f32,
        style: FontStyle,
    ) {
        let mut x = x_start;

        for (i, text) in row.iter().enumerate() {
            let w = col_widths.get(i).copied().unwrap_or(0.0);
            let fitted = self.truncate_to(text, style, font_size, w - 8.0);
            self.draw_text(content, x + 4.0, y + 6.0, font_size, style, &fitted);
            self.draw_cell_borders(content, x, y, w, self.row_h);
            x += w;
        }
    }

    /// Cut `text` with an ellipsis so it fits `max_w`.
    fn truncate_to(&self, text: &str, style: FontStyle, size: f32, max_w: f32) -> String {
        if self.text_width(style, size, text) <= max_w {
            return text.to_string();
        }
        let mut out = String::new();
        for c in text.chars() {
            out.push(c);
            if self.text_width(style, size, &format!("{out}...")) > max_w {
                out.pop();
                break;
            }
        }
        format!("{out}...")
    }

    /// Calcola larghezza colonne in base a header + contenuto e le adatta alla pagina
    fn compute_col_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let pad = 10.0;
        let mut widths: Vec<f32> = headers
            .iter()
            .map(|h| self.text_width(FontStyle::Bold, self.header_font_size, h) + pad)
            .collect();

        for row in rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                let w = self.text_width(FontStyle::Regular, self.font_size, cell) + pad;
                widths[i] = w.max(widths[i]);
            }
        }

        let total: f32 = widths.iter().sum();
        let max = self.page_w - 2.0 * self.margin;

        if total > max {
            let scale = max / total;
            for w in &mut widths {
                *w *= scale;
            }
        }

        widths
    }

    fn draw_page_header_footer(&mut self, content: &mut Content, title: &str, page: usize) {
        let (title_y, size) = (self.page_h - self.margin + 15.0, self.title_font_size);
        self.draw_text(content, self.margin, title_y, size, FontStyle::Bold, title);

        let pg = format!("Page {}", page);
        let (x, y, size) = (
            self.page_w - self.margin,
            self.margin - 35.0,
            self.font_size,
        );
        self.draw_text_right(content, x, y, size, FontStyle::Regular, &pg);
    }

    fn draw_header_row(&mut self, content: &mut Content, y: f32, col_widths: &[f32], headers: &[&str]) {
        content.save_state();
        content.set_fill_rgb(0.85, 0.87, 0.90);
        content.rect(self.margin, y, col_widths.iter().sum(), self.row_h);
        content.fill_nonzero();
        content.restore_state();

        let header_row: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
        let (margin, size) = (self.margin, self.header_font_size);
        self.draw_row(content, y, col_widths, margin, &header_row, size, FontStyle::Bold);
    }

    /// Tabella multipagina con titolo
    pub fn write_table(&mut self, title: &str, headers: &[&str], rows: &[Vec<String>]) {
        let col_widths = self.compute_col_widths(headers, rows);

        // Nessuna riga: una pagina con solo header
        if rows.is_empty() {
            let mut content = self.new_page();
            self.draw_page_header_footer(&mut content, title, 1);
            let y = self.page_h - self.margin - 30.0;
            self.draw_header_row(&mut content, y, &col_widths, headers);
            self.finalize_page(content);
            return;
        }

        let mut remaining: &[Vec<String>] = rows;
        let mut page_idx = 1;

        while !remaining.is_empty() {
            let mut content = self.new_page();
            self.draw_page_header_footer(&mut content, title, page_idx);

            let mut y = self.page_h - self.margin - 30.0;
            self.draw_header_row(&mut content, y, &col_widths, headers);
            y -= self.row_h;

            let mut consumed = 0;

            for (i, row) in remaining.iter().enumerate() {
                if y - self.row_h < self.margin {
                    break;
                }

                // zebra stripe
                if i % 2 == 0 {
                    content.save_state();
                    content.set_fill_rgb(0.96, 0.96, 0.96);
                    content.rect(self.margin, y, col_widths.iter().sum(), self.row_h);
                    content.fill_nonzero();
                    content.restore_state();
                }

                let (margin, size) = (self.margin, self.font_size);
                self.draw_row(&mut content, y, &col_widths, margin, row, size, FontStyle::Regular);

                y -= self.row_h;
                consumed += 1;
            }

            self.finalize_page(content);
            remaining = &remaining[consumed..];
            page_idx += 1;
        }
    }

    /// Serialize the document (fonts are written last, once glyph usage is known).
    pub fn finish(mut self) -> Vec<u8> {
        self.fonts
            .regular
            .write(&mut self.pdf, self.regular_id, &mut self.refs);
        self.fonts
            .bold
            .write(&mut self.pdf, self.bold_id, &mut self.refs);

        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.iter().copied());
        drop(pages);

        self.pdf.finish()
    }

    pub fn save(self, path: &Path) -> std::io::Result<()> {
        let bytes = self.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_respects_width_and_keeps_long_words() {
        let pdf = PdfManager::default();
        let lines = pdf.wrap_text("aaa bbb ccc", FontStyle::Regular, 10.0, 40.0);
        assert_eq!(lines, vec!["aaa bbb", "ccc"]);

        let long = pdf.wrap_text("Supercalifragilistic x", FontStyle::Regular, 10.0, 20.0);
        assert_eq!(long, vec!["Supercalifragilistic", "x"]);

        assert_eq!(pdf.wrap_text("", FontStyle::Regular, 10.0, 20.0), vec![""]);
    }

    #[test]
    fn table_document_is_a_pdf_with_pages() {
        let mut pdf = PdfManager::default();
        let rows: Vec<Vec<String>> = (0..80)
            .map(|i| vec![i.to_string(), format!("Customer {i}")])
            .collect();
        pdf.write_table("Transactions", &["id", "customer"], &rows);

        let bytes = pdf.finish();
        assert!(bytes.starts_with(b"%PDF-"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Count 3"));
        assert!(text.contains("/WinAnsiEncoding"));
    }
}
