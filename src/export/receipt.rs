//! Single-page A4 receipt renderer.

use crate::errors::{AppError, AppResult};
use crate::export::pdf::{FontStyle, PdfManager};
use crate::export::pdf_font::FontSet;
use crate::export::pdf_image::PdfImage;
use crate::i18n::{Labels, ReceiptTexts};
use crate::models::company::CompanySettings;
use crate::ui::messages::warning;
use clap::ValueEnum;
use std::fs;
use std::path::Path;

const CM: f32 = 28.3465;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReceiptKind {
    /// Payment made to the company
    Payment,
    /// Amount collected by the company
    Collection,
}

impl ReceiptKind {
    pub fn texts<'a>(&self, labels: &'a Labels) -> &'a ReceiptTexts {
        match self {
            ReceiptKind::Payment => &labels.payment,
            ReceiptKind::Collection => &labels.collection,
        }
    }
}

/// Everything printed on a receipt besides the company identity.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptData {
    /// e.g. `#42`
    pub number: String,
    pub customer: String,
    pub amount: f64,
    pub description: String,
    /// Already formatted as `dd/mm/yyyy`.
    pub date: String,
    pub notes: String,
    pub kind: ReceiptKind,
}

/// Decode an optional image path; failures only cost the image.
fn load_image(path: &str, what: &str) -> Option<PdfImage> {
    if path.trim().is_empty() {
        return None;
    }
    match PdfImage::load(Path::new(path)) {
        Ok(img) => Some(img),
        Err(e) => {
            warning(format!("Skipping {what} image: {e}"));
            None
        }
    }
}

/// Render the receipt into PDF bytes.
pub fn render_receipt(
    data: &ReceiptData,
    company: &CompanySettings,
    labels: &Labels,
    fonts: FontSet,
) -> Vec<u8> {
    let texts = data.kind.texts(labels);
    let mut pdf = PdfManager::new(fonts);
    let (w, h) = (pdf.page_width(), pdf.page_height());

    // images must be registered before the page that uses them
    let logo = load_image(&company.logo_path, "logo").map(|img| {
        let size = img.fit(4.0 * CM, 3.0 * CM);
        (pdf.add_image(&img), size)
    });
    let signature = load_image(&company.signature_path, "signature").map(|img| {
        let size = img.fit(4.0 * CM, 2.0 * CM);
        (pdf.add_image(&img), size)
    });

    let mut c = pdf.new_page();

    // 1️⃣ header: logo + company identity
    if let Some((name, (lw, lh))) = &logo {
        pdf.draw_image(&mut c, name, 2.0 * CM, h - 2.0 * CM - lh, *lw, *lh);
    }

    let company_name = if company.company_name.trim().is_empty() {
        labels.company_placeholder
    } else {
        company.company_name.as_str()
    };
    pdf.draw_text(&mut c, 7.0 * CM, h - 2.5 * CM, 16.0, FontStyle::Bold, company_name);

    let identity = [
        (labels.address, &company.address),
        (labels.phone, &company.phone),
        (labels.email, &company.email),
        (labels.tax_id, &company.tax_id),
    ];
    let mut y = h - 3.2 * CM;
    for (label, value) in identity {
        if value.trim().is_empty() {
            continue;
        }
        let line = format!("{label}: {value}");
        pdf.draw_text(&mut c, 7.0 * CM, y, 10.0, FontStyle::Regular, &line);
        y -= 0.5 * CM;
    }

    // 2️⃣ title, number and date
    pdf.draw_text_centered(&mut c, w / 2.0, h - 7.0 * CM, 20.0, FontStyle::Bold, texts.title);

    let number_line = format!("{}: {}", labels.receipt_number, data.number);
    pdf.draw_text(&mut c, 2.0 * CM, h - 8.5 * CM, 11.0, FontStyle::Regular, &number_line);
    let date_line = format!("{}: {}", labels.date, data.date);
    pdf.draw_text_right(&mut c, w - 2.0 * CM, h - 8.5 * CM, 11.0, FontStyle::Regular, &date_line);

    pdf.draw_line(&mut c, 2.0 * CM, h - 9.0 * CM, w - 2.0 * CM, h - 9.0 * CM);

    // 3️⃣ customer
    let mut y = h - 10.0 * CM;
    pdf.draw_text(&mut c, 2.0 * CM, y, 12.0, FontStyle::Bold, texts.customer_heading);
    y -= 0.7 * CM;
    let name_line = format!("{}: {}", labels.name, data.customer);
    pdf.draw_text(&mut c, 2.0 * CM, y, 11.0, FontStyle::Regular, &name_line);

    // 4️⃣ description
    y -= 1.5 * CM;
    pdf.draw_text(&mut c, 2.0 * CM, y, 12.0, FontStyle::Bold, texts.description_heading);
    y -= 0.7 * CM;
    let max_w = w - 4.0 * CM;
    for line in pdf.wrap_text(&data.description, FontStyle::Regular, 11.0, max_w) {
        pdf.draw_text(&mut c, 2.0 * CM, y, 11.0, FontStyle::Regular, &line);
        y -= 0.5 * CM;
    }

    // 5️⃣ amount
    y -= 1.0 * CM;
    pdf.draw_text(&mut c, 2.0 * CM, y, 14.0, FontStyle::Bold, texts.amount_label);
    let amount = format!("{:.2} €", data.amount);
    pdf.draw_text_right(&mut c, w - 2.0 * CM, y, 14.0, FontStyle::Bold, &amount);

    // 6️⃣ notes
    if !data.notes.trim().is_empty() {
        y -= 1.5 * CM;
        let heading = format!("{}:", labels.notes);
        pdf.draw_text(&mut c, 2.0 * CM, y, 11.0, FontStyle::Bold, &heading);
        y -= 0.6 * CM;
        for line in pdf.wrap_text(&data.notes, FontStyle::Regular, 10.0, max_w) {
            pdf.draw_text(&mut c, 2.0 * CM, y, 10.0, FontStyle::Regular, &line);
            y -= 0.5 * CM;
        }
    }

    // 7️⃣ signatures
    let sig_y = 5.0 * CM;
    match &signature {
        Some((name, (sw, sh))) => pdf.draw_image(&mut c, name, 2.0 * CM, sig_y, *sw, *sh),
        None => pdf.draw_line(&mut c, 2.0 * CM, sig_y, 6.0 * CM, sig_y),
    }
    pdf.draw_text_centered(
        &mut c,
        4.0 * CM,
        sig_y - 0.5 * CM,
        9.0,
        FontStyle::Regular,
        labels.company_signature,
    );

    pdf.draw_line(&mut c, w - 8.0 * CM, sig_y, w - 4.0 * CM, sig_y);
    pdf.draw_text_centered(
        &mut c,
        w - 6.0 * CM,
        sig_y - 0.5 * CM,
        9.0,
        FontStyle::Regular,
        labels.customer_signature,
    );

    // 8️⃣ footer
    pdf.draw_text_centered(&mut c, w / 2.0, 1.5 * CM, 8.0, FontStyle::Italic, texts.footer);

    pdf.finalize_page(c);
    pdf.finish()
}

/// Render and write the receipt to `path`.
pub fn save_receipt(
    path: &Path,
    data: &ReceiptData,
    company: &CompanySettings,
    labels: &Labels,
    fonts: FontSet,
) -> AppResult<()> {
    let bytes = render_receipt(data, company, labels, fonts);
    fs::write(path, bytes)
        .map_err(|e| AppError::Receipt(format!("cannot write {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;
    use image::{DynamicImage, Rgba, RgbaImage};

    fn data(kind: ReceiptKind) -> ReceiptData {
        ReceiptData {
            number: "#12".into(),
            customer: "Anna Papadopoulou".into(),
            amount: 124.0,
            description: "Energy certificate for an apartment of ninety square metres".into(),
            date: "05/01/2024".into(),
            notes: "Paid by bank transfer".into(),
            kind,
        }
    }

    #[test]
    fn renders_with_missing_images() {
        let company = CompanySettings {
            company_name: "Acme".into(),
            logo_path: "/nonexistent/logo.png".into(),
            signature_path: "/nonexistent/sig.png".into(),
            address: "Main St 1".into(),
            ..Default::default()
        };
        let bytes = render_receipt(
            &data(ReceiptKind::Payment),
            &company,
            Locale::En.labels(),
            FontSet::builtin(),
        );
        assert!(bytes.starts_with(b"%PDF"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Count 1"));
        assert!(!text.contains("/XObject"));
    }

    #[test]
    fn embeds_logo_with_soft_mask() {
        let dir = std::env::temp_dir();
        let logo = dir.join("officedesk_receipt_logo.png");
        let mut img = RgbaImage::new(4, 2);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 0]));
        DynamicImage::ImageRgba8(img).save(&logo).unwrap();

        let company = CompanySettings {
            company_name: "Acme".into(),
            logo_path: logo.to_string_lossy().into(),
            ..Default::default()
        };
        let out = dir.join("officedesk_receipt_unit.pdf");
        save_receipt(
            &out,
            &data(ReceiptKind::Collection),
            &company,
            Locale::En.labels(),
            FontSet::builtin(),
        )
        .unwrap();

        let bytes = std::fs::read(&out).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Im1"));
        assert!(text.contains("/SMask"));
        std::fs::remove_file(&out).ok();
        std::fs::remove_file(&logo).ok();
    }
}
