// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.


/// Advance widths, in em, of the printable ASCII glyphs `' '..='~'` in the
/// sans-serif face used for gate labels.
#[rustfmt::skip]
const GLYPH_WIDTHS: [f64; 95] = [
    // ' '    '!'    '"'    '#'    '$'    '%'    '&'    '\''
    0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191,
    // '('    ')'    '*'    '+'    ','    '-'    '.'    '/'
    0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
    // '0'..='9'
    0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
    // ':'    ';'    '<'    '='    '>'    '?'    '@'
    0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
    // 'A'..='Z'
    0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500,
    0.667, 0.556, 0.833, 0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611,
    0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
    // '['    '\\'   ']'    '^'    '_'    '`'
    0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
    // 'a'..='z'
    0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222,
    0.500, 0.222, 0.833, 0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278,
    0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
    // '{'    '|'    '}'    '~'
    0.334, 0.260, 0.334, 0.584,
];

/// Width used for any glyph outside the table.
const AVERAGE_GLYPH_WIDTH: f64 = 0.527_927_631_578_947_1;

fn glyph_width(c: char) -> f64 {
    u32::from(c)
        .checked_sub(u32::from(' '))
        .and_then(|i| GLYPH_WIDTHS.get(i as usize))
        .copied()
        .unwrap_or(AVERAGE_GLYPH_WIDTH)
}

/// Estimated rendered width of `text` at `font_size` pixels.
#[must_use]
pub fn string_width(text: &str, font_size: f64) -> f64 {
    text.chars().map(glyph_width).sum::<f64>() * font_size
}
