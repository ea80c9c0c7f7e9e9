//! WinAnsi (cp1252) text encoding.
//!
//! Every face is drawn through a single-byte WinAnsi encoding, and widths are
//! measured on the encoded bytes so that measurement and drawing agree.

/// Characters for codes 0x80..=0x9F; `None` where cp1252 leaves a hole.
const HIGH_CONTROL_RANGE: [Option<char>; 32] = [
    Some('\u{20AC}'), None, Some('\u{201A}'), Some('\u{0192}'),
    Some('\u{201E}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02C6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None, Some('\u{017D}'), None,
    None, Some('\u{2018}'), Some('\u{2019}'), Some('\u{201C}'),
    Some('\u{201D}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02DC}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203A}'),
    Some('\u{0153}'), None, Some('\u{017E}'), Some('\u{0178}'),
];

/// Byte used for characters with no WinAnsi code.
pub const REPLACEMENT: u8 = b'?';

pub fn encode_char(c: char) -> u8 {
    match c {
        '\t' => b' ',
        ' '..='~' => c as u8,
        '\u{00A0}'..='\u{00FF}' => c as u32 as u8,
        _ => HIGH_CONTROL_RANGE
            .iter()
            .position(|mapped| *mapped == Some(c))
            .map(|index| 0x80 + index as u8)
            .unwrap_or(REPLACEMENT),
    }
}

pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(encode_char).collect()
}

/// The character a printable WinAnsi code stands for.
pub fn decode_code(code: u8) -> Option<char> {
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as char),
        0x80..=0x9F => HIGH_CONTROL_RANGE[(code - 0x80) as usize],
        _ => None,
    }
}
