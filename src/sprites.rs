//! Pixel-art sprites as string patterns (`'1'` = lit, anything else = blank)
//! and the scaler that maps them onto a grid of terminal cells.

/// Alien, first animation frame (11×8).
pub const ALIEN_A_1: [&str; 8] = [
    "00100000100",
    "00010001000",
    "00111111100",
    "01101110110",
    "11111111111",
    "10111111101",
    "10100000101",
    "00011011000",
];

/// Alien, second animation frame (11×8).
pub const ALIEN_A_2: [&str; 8] = [
    "00100000100",
    "10010001001",
    "10111111101",
    "11101110111",
    "11111111111",
    "01111111110",
    "00100000100",
    "01000000010",
];

/// Player ship (13×8).
pub const PLAYER_SHIP: [&str; 8] = [
    "0000001000000",
    "0000011100000",
    "0000011100000",
    "0111111111110",
    "1111111111111",
    "1111111111111",
    "1111111111111",
    "1111111111111",
];

/// Pattern for an alien's animation frame.
pub fn alien_frame(frame: u8) -> &'static [&'static str] {
    if frame == 0 {
        &ALIEN_A_1
    } else {
        &ALIEN_A_2
    }
}

/// Source index range covered by target cell `i` of `target` cells.
fn span(i: usize, source: usize, target: usize) -> std::ops::Range<usize> {
    let start = i * source / target;
    let end = ((i + 1) * source / target).max(start + 1).min(source);
    start..end
}

/// Scale `pattern` to `cols` × `rows` cells, returned row-major.
///
/// Each cell covers a block of source pixels and is lit when at least half of
/// that block is lit.  Upscaling repeats pixels; an empty pattern or an empty
/// target yields nothing.
pub fn rasterize(pattern: &[&str], cols: usize, rows: usize) -> Vec<Vec<bool>> {
    let src_rows = pattern.len();
    let src_cols = pattern.first().map_or(0, |r| r.len());
    if src_rows == 0 || src_cols == 0 || cols == 0 || rows == 0 {
        return Vec::new();
    }
    let pixels: Vec<&[u8]> = pattern.iter().map(|r| r.as_bytes()).collect();

    (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| {
                    let mut lit = 0;
                    let mut total = 0;
                    for pr in span(r, src_rows, rows) {
                        for pc in span(c, src_cols, cols) {
                            total += 1;
                            if pixels[pr].get(pc) == Some(&b'1') {
                                lit += 1;
                            }
                        }
                    }
                    lit * 2 >= total
                })
                .collect()
        })
        .collect()
}
