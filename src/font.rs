// ── 3x5 bitmap glyphs ───────────────────────────────────────────────────────

pub const GLYPH_W: i32 = 3;
pub const GLYPH_H: i32 = 5;
/// Horizontal advance: glyph plus one pixel of spacing.
pub const ADVANCE: i32 = GLYPH_W + 1;

#[rustfmt::skip]
static DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

#[rustfmt::skip]
static LETTERS: [(char, [u8; 15]); 10] = [
    ('A', [0,1,0, 1,0,1, 1,1,1, 1,0,1, 1,0,1]),
    ('B', [1,1,0, 1,0,1, 1,1,0, 1,0,1, 1,1,0]),
    ('E', [1,1,1, 1,0,0, 1,1,0, 1,0,0, 1,1,1]),
    ('G', [0,1,1, 1,0,0, 1,0,1, 1,0,1, 0,1,1]),
    ('M', [1,0,1, 1,1,1, 1,1,1, 1,0,1, 1,0,1]),
    ('O', [0,1,0, 1,0,1, 1,0,1, 1,0,1, 0,1,0]),
    ('R', [1,1,0, 1,0,1, 1,1,0, 1,0,1, 1,0,1]),
    ('S', [0,1,1, 1,0,0, 0,1,0, 0,0,1, 1,1,0]),
    ('T', [1,1,1, 0,1,0, 0,1,0, 0,1,0, 0,1,0]),
    ('V', [1,0,1, 1,0,1, 1,0,1, 1,0,1, 0,1,0]),
];

/// Bitmap for `ch`, row-major. Unknown characters (and space) have none.
pub fn glyph(ch: char) -> Option<&'static [u8; 15]> {
    if let Some(d) = ch.to_digit(10) {
        return Some(&DIGITS[d as usize]);
    }
    let upper = ch.to_ascii_uppercase();
    LETTERS
        .iter()
        .find(|(c, _)| *c == upper)
        .map(|(_, bits)| bits)
}

/// Width in pixels of `text` when drawn.
pub fn text_width(text: &str) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 { 0 } else { n * ADVANCE - 1 }
}

/// Lit pixels of `text` with its top-left corner at the origin.
pub fn pixels(text: &str) -> impl Iterator<Item = (i32, i32)> + '_ {
    text.chars().enumerate().flat_map(|(i, ch)| {
        let origin = i as i32 * ADVANCE;
        glyph(ch).into_iter().flat_map(move |bits| {
            (0..GLYPH_H).flat_map(move |row| {
                (0..GLYPH_W).filter_map(move |col| {
                    (bits[(row * GLYPH_W + col) as usize] == 1).then_some((origin + col, row))
                })
            })
        })
    })
}
