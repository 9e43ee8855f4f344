//! Fonts for generated PDFs.
//!
//! A TrueType file is embedded whole as a Type0 / Identity-H font with a
//! ToUnicode map, so any script it covers (Greek included) renders and stays
//! searchable. Without one, the standard Helvetica faces are used with
//! WinAnsi encoding; characters outside it print as `?`.

use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use pdf_writer::types::{CidFontType, FontFlags, SystemInfo, UnicodeCmap};
use pdf_writer::{Filter, Name, Pdf, Rect, Ref, Str};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Sequential object ids for one document.
pub(crate) struct RefAlloc {
    next: i32,
}

impl RefAlloc {
    pub(crate) fn new(first: i32) -> Self {
        Self { next: first }
    }

    pub(crate) fn fresh(&mut self) -> Ref {
        let id = self.next;
        self.next += 1;
        Ref::new(id)
    }
}

/// (regular, bold) candidates probed when no font is configured.
const SYSTEM_FONTS: &[(&str, &str)] = &[
    (
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    ),
    ("C:\\Windows\\Fonts\\arial.ttf", "C:\\Windows\\Fonts\\arialbd.ttf"),
    (
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    ),
    ("/Library/Fonts/Arial.ttf", "/Library/Fonts/Arial Bold.ttf"),
    (
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    ),
];

/// Helvetica advance widths for ' '..='~' (1/1000 em).
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..'?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..'_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 'p'..'~'
];

/// WinAnsi code for `c`, if the encoding has one.
pub(crate) fn win_ansi_byte(c: char) -> Option<u8> {
    let cp = c as u32;
    match cp {
        0x20..=0x7E | 0xA0..=0xFF => Some(cp as u8),
        _ => Some(match c {
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8A,
            '‹' => 0x8B,
            'Œ' => 0x8C,
            'Ž' => 0x8E,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9A,
            '›' => 0x9B,
            'œ' => 0x9C,
            'ž' => 0x9E,
            'Ÿ' => 0x9F,
            _ => return None,
        }),
    }
}

/// A font embedded from a TrueType file.
#[derive(Clone)]
pub struct EmbeddedFont {
    data: Vec<u8>,
    ps_name: String,
    units_per_em: f32,
    ascent: f32,
    descent: f32,
    cap_height: f32,
    bbox: [f32; 4],
    /// glyph id → (first char mapped to it, width in 1/1000 em)
    used: BTreeMap<u16, (char, f32)>,
}

impl EmbeddedFont {
    fn face(&self) -> Option<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.data, 0).ok()
    }

    fn to_pdf_units(&self, v: f32) -> f32 {
        v * 1000.0 / self.units_per_em
    }

    fn glyph(&self, face: Option<&ttf_parser::Face<'_>>, c: char) -> (u16, f32) {
        let Some(face) = face else {
            return (0, 0.0);
        };
        let gid = face.glyph_index(c).unwrap_or(ttf_parser::GlyphId(0));
        let adv = face.glyph_hor_advance(gid).unwrap_or(0) as f32;
        (gid.0, self.to_pdf_units(adv))
    }
}

#[derive(Clone)]
pub enum PdfFont {
    Builtin {
        base: &'static str,
        widths: &'static [u16; 95],
    },
    Embedded(Box<EmbeddedFont>),
}

impl PdfFont {
    pub fn helvetica(bold: bool) -> Self {
        if bold {
            PdfFont::Builtin {
                base: "Helvetica-Bold",
                widths: &HELVETICA_BOLD_WIDTHS,
            }
        } else {
            PdfFont::Builtin {
                base: "Helvetica",
                widths: &HELVETICA_WIDTHS,
            }
        }
    }

    /// Load a TrueType (`glyf`-based) font file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let data = fs::read(path)?;

        if !(data.starts_with(&[0x00, 0x01, 0x00, 0x00]) || data.starts_with(b"true")) {
            return Err(AppError::Receipt(format!(
                "{}: not a TrueType font file",
                path.display()
            )));
        }

        let font = {
            let face = ttf_parser::Face::parse(&data, 0)
                .map_err(|e| AppError::Receipt(format!("{}: {}", path.display(), e)))?;

            let ps_name: String = face
                .names()
                .into_iter()
                .filter(|n| n.name_id == ttf_parser::name_id::POST_SCRIPT_NAME)
                .find_map(|n| n.to_string())
                .unwrap_or_default()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
                .collect();

            let units_per_em = face.units_per_em() as f32;
            let scale = |v: i16| v as f32 * 1000.0 / units_per_em;
            let bb = face.global_bounding_box();

            EmbeddedFont {
                data: Vec::new(),
                ps_name: if ps_name.is_empty() {
                    "EmbeddedFont".to_string()
                } else {
                    ps_name
                },
                units_per_em,
                ascent: scale(face.ascender()),
                descent: scale(face.descender()),
                cap_height: scale(face.capital_height().unwrap_or(face.ascender())),
                bbox: [scale(bb.x_min), scale(bb.y_min), scale(bb.x_max), scale(bb.y_max)],
                used: BTreeMap::new(),
            }
        };

        Ok(PdfFont::Embedded(Box::new(EmbeddedFont { data, ..font })))
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self, PdfFont::Embedded(_))
    }

    /// Text width in points.
    pub fn width(&self, text: &str, size: f32) -> f32 {
        let units: f32 = match self {
            PdfFont::Builtin { widths, .. } => text
                .chars()
                .map(|c| match c as u32 {
                    0x20..=0x7E => widths[(c as u32 - 0x20) as usize] as f32,
                    _ => 556.0,
                })
                .sum(),
            PdfFont::Embedded(f) => {
                let face = f.face();
                text.chars().map(|c| f.glyph(face.as_ref(), c).1).sum()
            }
        };
        units * size / 1000.0
    }

    /// Bytes for a `Tj` operand; records glyph usage for embedded fonts.
    pub fn encode(&mut self, text: &str) -> Vec<u8> {
        match self {
            PdfFont::Builtin { .. } => text
                .chars()
                .map(|c| win_ansi_byte(c).unwrap_or(b'?'))
                .collect(),
            PdfFont::Embedded(f) => {
                let mut out = Vec::with_capacity(text.len() * 2);
                let mut fresh = Vec::new();
                {
                    let face = f.face();
                    for c in text.chars() {
                        let (gid, w) = f.glyph(face.as_ref(), c);
                        out.extend_from_slice(&gid.to_be_bytes());
                        if !f.used.contains_key(&gid) {
                            fresh.push((gid, c, w));
                        }
                    }
                }
                for (gid, c, w) in fresh {
                    f.used.entry(gid).or_insert((c, w));
                }
                out
            }
        }
    }

    /// Write the font dictionary (and, for embedded fonts, its descendants).
    pub(crate) fn write(&self, pdf: &mut Pdf, font_id: Ref, refs: &mut RefAlloc) {
        match self {
            PdfFont::Builtin { base, .. } => {
                pdf.type1_font(font_id)
                    .base_font(Name(base.as_bytes()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
            }
            PdfFont::Embedded(f) => write_embedded(pdf, f, font_id, refs),
        }
    }
}

const IDENTITY: SystemInfo = SystemInfo {
    registry: Str(b"Adobe"),
    ordering: Str(b"Identity"),
    supplement: 0,
};

fn write_embedded(pdf: &mut Pdf, f: &EmbeddedFont, font_id: Ref, refs: &mut RefAlloc) {
    let cid_id = refs.fresh();
    let descriptor_id = refs.fresh();
    let cmap_id = refs.fresh();
    let data_id = refs.fresh();
    let name = Name(f.ps_name.as_bytes());

    pdf.type0_font(font_id)
        .base_font(name)
        .encoding_predefined(Name(b"Identity-H"))
        .descendant_font(cid_id)
        .to_unicode(cmap_id);

    {
        let mut cid = pdf.cid_font(cid_id);
        cid.subtype(CidFontType::Type2);
        cid.base_font(name);
        cid.system_info(IDENTITY);
        cid.font_descriptor(descriptor_id);
        cid.default_width(0.0);
        cid.cid_to_gid_map_predefined(Name(b"Identity"));
        {
            let mut widths = cid.widths();
            for (gid, (_, w)) in &f.used {
                widths.consecutive(*gid, [*w]);
            }
        }
    }

    pdf.font_descriptor(descriptor_id)
        .name(name)
        .flags(FontFlags::NON_SYMBOLIC)
        .bbox(Rect::new(f.bbox[0], f.bbox[1], f.bbox[2], f.bbox[3]))
        .italic_angle(0.0)
        .ascent(f.ascent)
        .descent(f.descent)
        .cap_height(f.cap_height)
        .stem_v(80.0)
        .font_file2(data_id);

    let mut cmap = UnicodeCmap::new(Name(b"Custom"), IDENTITY);
    for (gid, (c, _)) in &f.used {
        if *gid != 0 {
            cmap.pair(*gid, *c);
        }
    }
    pdf.stream(cmap_id, &cmap.finish());

    let compressed = super::pdf::deflate(&f.data);
    pdf.stream(data_id, &compressed)
        .filter(Filter::FlateDecode)
        .pair(Name(b"Length1"), f.data.len() as i32);
}

/// Regular and bold faces used by one document.
#[derive(Clone)]
pub struct FontSet {
    pub regular: PdfFont,
    pub bold: PdfFont,
}

impl FontSet {
    pub fn builtin() -> Self {
        Self {
            regular: PdfFont::helvetica(false),
            bold: PdfFont::helvetica(true),
        }
    }

    /// Configured fonts first, then well-known system fonts, then Helvetica.
    pub fn resolve(regular: Option<&Path>, bold: Option<&Path>) -> Self {
        let try_load = |p: &Path| match PdfFont::load(p) {
            Ok(f) => Some(f),
            Err(e) => {
                warning(format!("Font not usable ({}), trying the next one.", e));
                None
            }
        };

        let configured_bold = bold.and_then(try_load);

        if let Some(reg) = regular.and_then(try_load) {
            let bold = configured_bold.unwrap_or_else(|| reg.clone());
            return Self { regular: reg, bold };
        }

        for (reg_path, bold_path) in SYSTEM_FONTS {
            let reg_path = PathBuf::from(reg_path);
            if !reg_path.is_file() {
                continue;
            }
            if let Some(reg) = try_load(&reg_path) {
                let bold = configured_bold.clone().unwrap_or_else(|| {
                    PdfFont::load(Path::new(bold_path)).unwrap_or_else(|_| reg.clone())
                });
                return Self { regular: reg, bold };
            }
        }

        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_ansi_covers_latin_and_euro_only() {
        assert_eq!(win_ansi_byte('A'), Some(b'A'));
        assert_eq!(win_ansi_byte('é'), Some(0xE9));
        assert_eq!(win_ansi_byte('€'), Some(0x80));
        assert_eq!(win_ansi_byte('Ω'), None);
        assert_eq!(win_ansi_byte('\n'), None);
    }

    #[test]
    fn builtin_encoding_replaces_unmapped_chars() {
        let mut f = PdfFont::helvetica(false);
        assert_eq!(f.encode("Ποσό 10 €"), b"???? 10 \x80".to_vec());
    }

    #[test]
    fn builtin_widths_follow_helvetica_metrics() {
        let f = PdfFont::helvetica(false);
        // "Hi" = 722 + 222
        assert!((f.width("Hi", 10.0) - 9.44).abs() < 1e-4);
        let b = PdfFont::helvetica(true);
        assert!(b.width("Hi", 10.0) > f.width("Hi", 10.0));
    }

    #[test]
    fn non_truetype_files_are_rejected() {
        let p = std::env::temp_dir().join(format!("officedesk_font_{}.ttf", std::process::id()));
        fs::write(&p, b"OTTO not really").unwrap();
        assert!(matches!(PdfFont::load(&p), Err(AppError::Receipt(_))));
        fs::remove_file(&p).ok();
    }

    #[test]
    fn missing_configured_font_falls_back() {
        let set = FontSet::resolve(Some(Path::new("/no/such/font.ttf")), None);
        // Either a system font was found or Helvetica is used; never a panic.
        assert_eq!(set.regular.is_embedded(), set.bold.is_embedded());
    }
}
