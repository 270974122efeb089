//! A 1-bit 5x7 pixel font covering the characters a desktop label can contain.
//!
//! Rows run top to bottom; bit 4 of each row is the leftmost pixel.

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;
/// Horizontal distance between the origins of consecutive characters.
pub const ADVANCE: u32 = 6;
/// Offset of the glyph box from the pen position, mimicking the padding a
/// 10 px font leaves above and left of its ink.
pub const BEARING_X: u32 = 2;
pub const BEARING_Y: u32 = 3;

type Bitmap = [u8; GLYPH_HEIGHT as usize];

static DIGITS: [Bitmap; 10] = [
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
    [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
];

static PLUS: Bitmap = [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000];

/// Returns the bitmap for `ch`, or `None` for characters the font lacks.
pub fn glyph(ch: char) -> Option<&'static Bitmap> {
    match ch {
        '0'..='9' => ch.to_digit(10).map(|d| &DIGITS[d as usize]),
        '+' => Some(&PLUS),
        _ => None,
    }
}

/// Whether the pixel at (`x`, `y`) inside the glyph box is ink.
pub fn is_set(bitmap: &Bitmap, x: u32, y: u32) -> bool {
    x < GLYPH_WIDTH && y < GLYPH_HEIGHT && bitmap[y as usize] & (1 << (GLYPH_WIDTH - 1 - x)) != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_label_alphabet() {
        for ch in "0123456789+".chars() {
            assert!(glyph(ch).is_some(), "missing glyph for {ch:?}");
        }
        assert!(glyph('a').is_none());
        assert!(glyph(' ').is_none());
    }

    #[test]
    fn rows_fit_in_glyph_width() {
        for ch in "0123456789+".chars() {
            let bitmap = glyph(ch).unwrap();
            assert!(bitmap.iter().all(|row| *row < 1 << GLYPH_WIDTH));
            assert!(bitmap.iter().any(|row| *row != 0));
        }
    }

    #[test]
    fn plus_is_centered() {
        let plus = glyph('+').unwrap();
        assert!(is_set(plus, 2, 1));
        assert!(is_set(plus, 0, 3));
        assert!(is_set(plus, 4, 3));
        assert!(!is_set(plus, 0, 0));
        assert!(!is_set(plus, 5, 3));
    }
}
