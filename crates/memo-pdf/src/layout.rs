//! Page composition on top of lopdf.
//!
//! `Composer` accumulates text operators and placed images per page, with a
//! running y-cursor that triggers a page break when it crosses the bottom
//! margin, then assembles the lopdf document in one pass.

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::{Dictionary, Document, Object, Stream};
use std::io::Write;

use crate::error::MemoPdfError;

// A4 portrait, PDF points.
pub const PAGE_WIDTH: f64 = 595.0;
pub const PAGE_HEIGHT: f64 = 842.0;

pub const LEFT_MARGIN: f64 = 56.0;
pub const RIGHT_MARGIN: f64 = 539.0;
const TOP_MARGIN: f64 = 56.0;
const BOTTOM_MARGIN: f64 = 64.0;

/// Default vertical advance per text line.
pub const LINE_GAP: f64 = 16.0;

struct PlacedImage {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
}

struct PageDraft {
    ops: String,
    images: Vec<PlacedImage>,
}

impl PageDraft {
    fn new() -> Self {
        Self {
            ops: String::new(),
            images: Vec::new(),
        }
    }
}

pub struct Composer {
    pages: Vec<PageDraft>,
    y: f64,
}

impl Composer {
    pub fn new() -> Self {
        Self {
            pages: vec![PageDraft::new()],
            y: PAGE_HEIGHT - TOP_MARGIN,
        }
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn new_page(&mut self) {
        self.pages.push(PageDraft::new());
        self.y = PAGE_HEIGHT - TOP_MARGIN;
    }

    /// Break to a new page unless `needed` points fit above the bottom
    /// margin.
    pub fn ensure_room(&mut self, needed: f64) {
        if self.y - needed < BOTTOM_MARGIN {
            self.new_page();
        }
    }

    pub fn advance(&mut self, dy: f64) {
        self.y -= dy;
        if self.y < BOTTOM_MARGIN {
            self.new_page();
        }
    }

    fn current(&mut self) -> &mut PageDraft {
        self.pages.last_mut().expect("composer always has a page")
    }

    /// Write text at an absolute position on the current page.
    pub fn text_at(&mut self, x: f64, y: f64, size: f64, bold: bool, text: &str) {
        let font = if bold { "F2" } else { "F1" };
        let op = format!(
            "BT /{} {} Tf {:.1} {:.1} Td ({}) Tj ET\n",
            font,
            size,
            x,
            y,
            escape_text(text)
        );
        self.current().ops.push_str(&op);
    }

    /// Write one line at the cursor and advance it.
    pub fn line(&mut self, x: f64, size: f64, bold: bool, text: &str) {
        self.ensure_room(size);
        let y = self.y;
        self.text_at(x, y, size, bold, text);
        self.advance(LINE_GAP);
    }

    /// Horizontal rule at the cursor position.
    pub fn rule(&mut self) {
        self.ensure_room(4.0);
        let op = format!(
            "{:.1} {:.1} m {:.1} {:.1} l S\n",
            LEFT_MARGIN, self.y, RIGHT_MARGIN, self.y
        );
        self.current().ops.push_str(&op);
        self.advance(LINE_GAP);
    }

    /// Place a PNG image with its bottom-left corner at (x, y) on the
    /// current page, scaled to w x h points.
    pub fn image_at(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        png_data: &[u8],
    ) -> Result<(), MemoPdfError> {
        let (width, height, rgb) = decode_png_rgb(png_data)?;
        let page = self.current();
        let index = page.images.len();
        page.images.push(PlacedImage { width, height, rgb });
        let op = format!(
            "q {:.1} 0 0 {:.1} {:.1} {:.1} cm /Im{} Do Q\n",
            w, h, x, y, index
        );
        page.ops.push_str(&op);
        Ok(())
    }

    /// Assemble the composed pages into PDF bytes.
    pub fn finish(self) -> Result<Vec<u8>, MemoPdfError> {
        let mut doc = Document::with_version("1.5");

        let pages_id = doc.new_object_id();

        let f1_id = doc.add_object(font_dict("Helvetica"));
        let f2_id = doc.add_object(font_dict("Helvetica-Bold"));

        let mut page_refs = Vec::new();
        for draft in self.pages {
            let content_id = doc.add_object(Object::Stream(Stream::new(
                Dictionary::new(),
                draft.ops.into_bytes(),
            )));

            let mut xobjects = Dictionary::new();
            for (i, image) in draft.images.into_iter().enumerate() {
                let image_id = doc.add_object(image_xobject(image)?);
                xobjects.set(format!("Im{}", i), Object::Reference(image_id));
            }

            let mut fonts = Dictionary::new();
            fonts.set("F1", Object::Reference(f1_id));
            fonts.set("F2", Object::Reference(f2_id));

            let mut resources = Dictionary::new();
            resources.set("Font", Object::Dictionary(fonts));
            if !xobjects.is_empty() {
                resources.set("XObject", Object::Dictionary(xobjects));
            }

            let mut page = Dictionary::new();
            page.set("Type", Object::Name(b"Page".to_vec()));
            page.set("Parent", Object::Reference(pages_id));
            page.set("Contents", Object::Reference(content_id));
            page.set("Resources", Object::Dictionary(resources));
            page.set(
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(PAGE_WIDTH as f32),
                    Object::Real(PAGE_HEIGHT as f32),
                ]),
            );

            let page_id = doc.add_object(Object::Dictionary(page));
            page_refs.push(Object::Reference(page_id));
        }

        let mut pages = Dictionary::new();
        pages.set("Type", Object::Name(b"Pages".to_vec()));
        pages.set("Count", Object::Integer(page_refs.len() as i64));
        pages.set("Kids", Object::Array(page_refs));
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));
        let catalog_id = doc.add_object(Object::Dictionary(catalog));

        doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| MemoPdfError::Assembly(e.to_string()))?;
        Ok(buffer)
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

fn font_dict(base_font: &str) -> Object {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"Font".to_vec()));
    dict.set("Subtype", Object::Name(b"Type1".to_vec()));
    dict.set("BaseFont", Object::Name(base_font.as_bytes().to_vec()));
    Object::Dictionary(dict)
}

fn image_xobject(image: PlacedImage) -> Result<Object, MemoPdfError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&image.rgb)
        .and_then(|_| encoder.finish())
        .map(|compressed| {
            let mut dict = Dictionary::new();
            dict.set("Type", Object::Name(b"XObject".to_vec()));
            dict.set("Subtype", Object::Name(b"Image".to_vec()));
            dict.set("Width", Object::Integer(image.width as i64));
            dict.set("Height", Object::Integer(image.height as i64));
            dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
            dict.set("BitsPerComponent", Object::Integer(8));
            dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));
            Object::Stream(Stream::new(dict, compressed))
        })
        .map_err(|e| MemoPdfError::Assembly(format!("image compression failed: {}", e)))
}

/// Decode PNG bytes to 8-bit RGB, compositing any alpha channel onto white.
fn decode_png_rgb(data: &[u8]) -> Result<(u32, u32, Vec<u8>), MemoPdfError> {
    let mut decoder = png::Decoder::new(data);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| MemoPdfError::SignatureDecode(e.to_string()))?;
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| MemoPdfError::SignatureDecode(e.to_string()))?;
    buf.truncate(info.buffer_size());

    let blend = |c: u8, a: u8| -> u8 {
        ((c as u32 * a as u32 + 255 * (255 - a as u32)) / 255) as u8
    };

    let rgb = match info.color_type {
        png::ColorType::Rgb => buf,
        png::ColorType::Rgba => buf
            .chunks_exact(4)
            .flat_map(|px| {
                let a = px[3];
                [blend(px[0], a), blend(px[1], a), blend(px[2], a)]
            })
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|g| [*g, *g, *g]).collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|px| {
                let v = blend(px[0], px[1]);
                [v, v, v]
            })
            .collect(),
        other => {
            return Err(MemoPdfError::SignatureDecode(format!(
                "unsupported color type: {:?}",
                other
            )))
        }
    };

    Ok((info.width, info.height, rgb))
}

/// Escape characters with special meaning inside PDF string literals.
pub(crate) fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\n' | '\r' => out.push(' '),
            c if c.is_ascii() => out.push(c),
            // Helvetica via the standard encoding; anything outside ASCII
            // is replaced rather than emitted as broken bytes.
            _ => out.push('?'),
        }
    }
    out
}
