use crate::{
    error::FontResult,
    parse_binary::{BinaryParser, FontStream},
};

use super::{TableDirectory, TableTag};

/// Offset of fsSelection from the start of the "OS/2" table
const FS_SELECTION_OFFSET: usize = 62;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Os2 {
    pub fs_selection: FsSelection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsSelection(pub u16);

impl FsSelection {
    pub const ITALIC: u16 = 1 << 0;
    pub const BOLD: u16 = 1 << 5;
    pub const OBLIQUE: u16 = 1 << 9;

    pub fn is_bold(self) -> bool {
        self.0 & Self::BOLD != 0
    }

    /// Oblique fonts are reported as italic
    pub fn is_italic(self) -> bool {
        self.0 & (Self::ITALIC | Self::OBLIQUE) != 0
    }
}

/// <https://docs.microsoft.com/en-us/typography/opentype/spec/os2>
///
/// The table is optional: some Macintosh fonts don't have it.
pub fn read_os2(stream: &mut FontStream, directory: &TableDirectory) -> FontResult<Option<Os2>> {
    let offset = match directory.find_table_offset(TableTag::OS2) {
        Some(offset) => offset,
        None => return Ok(None),
    };

    stream.seek(offset as usize + FS_SELECTION_OFFSET)?;

    let fs_selection = FsSelection(stream.parse_u16()?);

    Ok(Some(Os2 { fs_selection }))
}
