//! Standalone helpers that turn fonts and text into lopdf objects.

use crate::writer::PdfWriter;
use lopdf::{Dictionary, Object, Stream, StringFormat, dictionary};
use tagpress_layout::encoding::encode_win_ansi;
use tagpress_layout::fonts::{EMBEDDED_FIRST_CHAR, EMBEDDED_LAST_CHAR};
use tagpress_layout::{FontFace, StandardFont, TrueTypeFont};

const FLAG_FIXED_PITCH: i64 = 1;
const FLAG_NONSYMBOLIC: i64 = 32;
const FLAG_ITALIC: i64 = 64;

/// Builds the font resource for `face`, embedding TrueType data into `writer`.
pub fn font_dictionary(writer: &mut PdfWriter, face: &FontFace) -> Dictionary {
    match face {
        FontFace::Standard(font) => standard_font_dictionary(font),
        FontFace::TrueType(font) => embed_truetype(writer, font),
    }
}

fn standard_font_dictionary(font: &StandardFont) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn embed_truetype(writer: &mut PdfWriter, font: &TrueTypeFont) -> Dictionary {
    let font_file = Stream::new(
        dictionary! { "Length1" => font.data.len() as i64 },
        font.data.to_vec(),
    );
    let font_file_id = writer.add_object(Object::Stream(font_file));

    let mut flags = FLAG_NONSYMBOLIC;
    if font.is_fixed_pitch {
        flags |= FLAG_FIXED_PITCH;
    }
    if font.italic_angle != 0.0 {
        flags |= FLAG_ITALIC;
    }

    let descriptor_id = writer.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => Object::Name(font.postscript_name.as_bytes().to_vec()),
        "Flags" => flags,
        "FontBBox" => font.bbox.iter().map(|v| Object::Real(*v)).collect::<Vec<Object>>(),
        "ItalicAngle" => font.italic_angle,
        "Ascent" => font.ascent,
        "Descent" => font.descent,
        "CapHeight" => font.cap_height,
        "StemV" => 80i64,
        "FontFile2" => font_file_id,
    });

    dictionary! {
        "Type" => "Font",
        "Subtype" => "TrueType",
        "BaseFont" => Object::Name(font.postscript_name.as_bytes().to_vec()),
        "FirstChar" => EMBEDDED_FIRST_CHAR as i64,
        "LastChar" => EMBEDDED_LAST_CHAR as i64,
        "Widths" => font.widths.iter().map(|w| Object::Integer(*w as i64)).collect::<Vec<Object>>(),
        "Encoding" => "WinAnsiEncoding",
        "FontDescriptor" => descriptor_id,
    }
}

/// A literal PDF string holding `text` in WinAnsi encoding.
pub fn text_string(text: &str) -> Object {
    Object::String(encode_win_ansi(text), StringFormat::Literal)
}
