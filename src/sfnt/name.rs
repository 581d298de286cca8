use crate::{
    error::{FontError, FontResult},
    parse_binary::{BinaryParser, FontStream},
};

use super::{TableDirectory, TableTag};

const PLATFORM_ID_WINDOWS: u16 = 3;
const ENCODING_ID_WINDOWS_UCS2: u16 = 1;
const LANGUAGE_ID_WINDOWS_ENGLISH_US: u16 = 0x0409;

const NAME_ID_FAMILY: u16 = 1;
const NAME_ID_SUBFAMILY: u16 = 2;
const NAME_ID_TYPOGRAPHIC_FAMILY: u16 = 16;
const NAME_ID_TYPOGRAPHIC_SUBFAMILY: u16 = 17;

/// Font name
///
/// `group_family` is used by applications that can only work with font
/// families of no more than 4 styles (regular, italic, bold and bold
/// italic), together with the style flags. For DejaVu Sans Condensed Bold
/// Oblique, `family` is "DejaVu Sans", `style` is "Condensed Bold Oblique",
/// and `group_family` is "DejaVu Sans Condensed" with both style flags set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontName {
    pub family: String,
    pub style: String,
    pub group_family: String,
}

#[derive(Debug)]
struct NameRecord {
    /// Platform identifier code.
    platform_id: u16,
    /// Platform-specific encoding identifier.
    encoding_id: u16,
    /// Language identifier.
    language_id: u16,
    /// Name identifier.
    name_id: u16,
    /// Name string length in bytes.
    length: u16,
    /// Name string offset in bytes from stringOffset.
    offset: u16,
}

fn read_name_record(stream: &mut FontStream) -> FontResult<NameRecord> {
    Ok(NameRecord {
        platform_id: stream.parse_u16()?,
        encoding_id: stream.parse_u16()?,
        language_id: stream.parse_u16()?,
        name_id: stream.parse_u16()?,
        length: stream.parse_u16()?,
        offset: stream.parse_u16()?,
    })
}

fn read_utf16_string(stream: &mut FontStream, pos: usize, byte_len: u16) -> FontResult<String> {
    let resume = stream.cursor();
    stream.seek(pos)?;

    let mut units = Vec::with_capacity(usize::from(byte_len / 2));
    for _ in 0..byte_len / 2 {
        units.push(stream.parse_u16()?);
    }

    stream.seek(resume)?;

    Ok(String::from_utf16_lossy(&units))
}

/// <https://www.microsoft.com/typography/otspec/name.htm>
///
/// Only Windows English (US) names are read. Records are required to be
/// sorted by platform, encoding, language and name id, so the scan stops at
/// the first record that sorts past the names we want. A table violating
/// that order may lose names.
pub fn read_font_name(stream: &mut FontStream, directory: &TableDirectory) -> FontResult<FontName> {
    let table_offset = directory
        .find_table_offset(TableTag::NAME)
        .ok_or_else(|| FontError::stream("Font has no \"name\" table"))?
        as usize;

    stream.seek(table_offset)?;

    let format = stream.parse_u16()?;
    if format != 0 && format != 1 {
        return Err(FontError::stream(format!(
            "Invalid \"name\" table format {}",
            format
        )));
    }

    let count = stream.parse_u16()?;
    if count == 0 {
        return Err(FontError::stream("\"name\" table has no records"));
    }

    let storage_offset = table_offset + usize::from(stream.parse_u16()?);

    let mut name = FontName::default();

    for _ in 0..count {
        let record = read_name_record(stream)?;

        if record.platform_id < PLATFORM_ID_WINDOWS
            || record.language_id < LANGUAGE_ID_WINDOWS_ENGLISH_US
        {
            continue;
        } else if record.platform_id > PLATFORM_ID_WINDOWS
            || record.encoding_id > ENCODING_ID_WINDOWS_UCS2
            || record.language_id > LANGUAGE_ID_WINDOWS_ENGLISH_US
        {
            break;
        }

        if record.name_id > NAME_ID_TYPOGRAPHIC_SUBFAMILY {
            break;
        }

        // Id 17 is read after id 2, so the typographic subfamily wins
        let dst = match record.name_id {
            NAME_ID_FAMILY => &mut name.group_family,
            NAME_ID_SUBFAMILY | NAME_ID_TYPOGRAPHIC_SUBFAMILY => &mut name.style,
            NAME_ID_TYPOGRAPHIC_FAMILY => &mut name.family,
            _ => continue,
        };

        *dst = read_utf16_string(
            stream,
            storage_offset + usize::from(record.offset),
            record.length,
        )?;
    }

    if name.family.is_empty() {
        name.family = name.group_family.clone();
    }

    Ok(name)
}
