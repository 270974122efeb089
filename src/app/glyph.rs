//! Renders the tray glyph: a bordered 16x16 bitmap with the desktop number.

use super::font;

/// Tray icons are always requested at this size.
pub const ICON_SIZE: u32 = 16;
/// Shown instead of the number once it no longer fits in two characters.
pub const OVERFLOW_MARKER: &str = "++";
/// Pen position of the label text.
pub const TEXT_OFFSET: (u32, u32) = (1, 1);

pub type Rgba = [u8; 4];

pub const FOREGROUND: Rgba = [0xff, 0xff, 0xff, 0xff];
pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

/// Formats a 1-based desktop number into the two-character label.
pub fn desktop_label(index: u32) -> String {
    if index < 100 {
        format!("{index:02}")
    } else {
        OVERFLOW_MARKER.to_string()
    }
}

/// A rendered 16x16 RGBA image, rows top to bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    label: String,
    pixels: Vec<u8>,
}

impl Glyph {
    /// A fully transparent canvas.
    pub fn blank() -> Self {
        Glyph {
            label: String::new(),
            pixels: TRANSPARENT.repeat((ICON_SIZE * ICON_SIZE) as usize),
        }
    }

    /// Draws the border and `label` on a transparent canvas.
    pub fn render(label: &str) -> Self {
        let mut glyph = Glyph::blank();
        glyph.label = label.to_string();
        glyph.draw_border();
        glyph.draw_text(label, TEXT_OFFSET.0, TEXT_OFFSET.1);
        glyph
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let i = self.offset(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        ((y * ICON_SIZE + x) * 4) as usize
    }

    fn put(&mut self, x: u32, y: u32, color: Rgba) {
        if x < ICON_SIZE && y < ICON_SIZE {
            let i = self.offset(x, y);
            self.pixels[i..i + 4].copy_from_slice(&color);
        }
    }

    // One pixel wide, covering the outermost ring of the canvas.
    fn draw_border(&mut self) {
        let last = ICON_SIZE - 1;
        for i in 0..ICON_SIZE {
            self.put(i, 0, FOREGROUND);
            self.put(i, last, FOREGROUND);
            self.put(0, i, FOREGROUND);
            self.put(last, i, FOREGROUND);
        }
    }

    fn draw_text(&mut self, text: &str, x: u32, y: u32) {
        let mut pen_x = x;
        for ch in text.chars() {
            if let Some(bitmap) = font::glyph(ch) {
                for gy in 0..font::GLYPH_HEIGHT {
                    for gx in 0..font::GLYPH_WIDTH {
                        if font::is_set(bitmap, gx, gy) {
                            self.put(
                                pen_x + font::BEARING_X + gx,
                                y + font::BEARING_Y + gy,
                                FOREGROUND,
                            );
                        }
                    }
                }
            }
            pen_x += font::ADVANCE;
        }
    }

    /// Encodes the image as a single-entry `.ico` (32-bit BMP with alpha).
    pub fn to_ico(&self) -> Vec<u8> {
        const DIR_HEADER: u32 = 6;
        const DIR_ENTRY: u32 = 16;
        const BITMAP_INFO: u32 = 40;

        let xor_size = ICON_SIZE * ICON_SIZE * 4;
        // 1 bit per pixel, rows padded to 32 bits.
        let and_stride = ICON_SIZE.div_ceil(32) * 4;
        let and_size = and_stride * ICON_SIZE;
        let image_size = BITMAP_INFO + xor_size + and_size;

        let mut ico = Vec::with_capacity((DIR_HEADER + DIR_ENTRY + image_size) as usize);

        // ICONDIR: reserved, type 1 (icon), one image
        ico.extend_from_slice(&0u16.to_le_bytes());
        ico.extend_from_slice(&1u16.to_le_bytes());
        ico.extend_from_slice(&1u16.to_le_bytes());

        // ICONDIRENTRY
        ico.push(ICON_SIZE as u8);
        ico.push(ICON_SIZE as u8);
        ico.push(0); // palette size
        ico.push(0); // reserved
        ico.extend_from_slice(&1u16.to_le_bytes()); // planes
        ico.extend_from_slice(&32u16.to_le_bytes()); // bits per pixel
        ico.extend_from_slice(&image_size.to_le_bytes());
        ico.extend_from_slice(&(DIR_HEADER + DIR_ENTRY).to_le_bytes());

        // BITMAPINFOHEADER, height covers both XOR and AND masks
        ico.extend_from_slice(&BITMAP_INFO.to_le_bytes());
        ico.extend_from_slice(&(ICON_SIZE as i32).to_le_bytes());
        ico.extend_from_slice(&(2 * ICON_SIZE as i32).to_le_bytes());
        ico.extend_from_slice(&1u16.to_le_bytes());
        ico.extend_from_slice(&32u16.to_le_bytes());
        ico.extend_from_slice(&0u32.to_le_bytes()); // BI_RGB
        ico.extend_from_slice(&(xor_size + and_size).to_le_bytes());
        ico.extend_from_slice(&[0u8; 16]); // resolution and palette counts

        // XOR mask: BGRA, bottom row first
        for y in (0..ICON_SIZE).rev() {
            for x in 0..ICON_SIZE {
                let [r, g, b, a] = self.pixel(x, y);
                ico.extend_from_slice(&[b, g, r, a]);
            }
        }

        // AND mask left clear; the alpha channel carries transparency.
        ico.resize(ico.len() + and_size as usize, 0);
        ico
    }
}
