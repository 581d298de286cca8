use crate::{
    error::{FontError, FontResult},
    parse_binary::{BinaryParser, FontStream},
};

use super::{TableDirectory, TableTag};

/// The parts of the "head" table a bake needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Head {
    pub units_per_em: u16,
    pub mac_style: MacStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacStyle(pub u16);

impl MacStyle {
    pub const BOLD: u16 = 1 << 0;
    pub const ITALIC: u16 = 1 << 1;

    pub fn is_bold(self) -> bool {
        self.0 & Self::BOLD != 0
    }

    pub fn is_italic(self) -> bool {
        self.0 & Self::ITALIC != 0
    }
}

/// <https://docs.microsoft.com/en-us/typography/opentype/spec/head>
pub fn read_head(stream: &mut FontStream, directory: &TableDirectory) -> FontResult<Head> {
    let offset = directory
        .find_table_offset(TableTag::HEAD)
        .ok_or_else(|| FontError::stream("Font has no \"head\" table"))?;

    // majorVersion, minorVersion, fontRevision, checkSumAdjustment,
    // magicNumber, flags
    stream.seek(offset as usize + 2 * 2 + 3 * 4 + 2)?;

    let units_per_em = stream.parse_u16()?;
    if units_per_em == 0 {
        return Err(FontError::stream("unitsPerEm in \"head\" table is 0"));
    }

    // created, modified, xMin, yMin, xMax, yMax
    stream.skip(2 * 8 + 4 * 2)?;

    let mac_style = MacStyle(stream.parse_u16()?);

    Ok(Head {
        units_per_em,
        mac_style,
    })
}
