use crate::{
    error::{FontError, FontResult},
    parse_binary::{BinaryParser, FontStream},
};

use super::TableTag;

/// Signature of a font collection (TTC/OTC) header
const COLLECTION_TAG: TableTag = TableTag::new(*b"ttcf");

/// sfnt versions we know how to read tables from
const FONT_SIGNATURES: [u32; 5] = [
    0x0001_0000,
    0x0002_0000,
    TableTag::new(*b"true").to_u32(),
    TableTag::new(*b"typ1").to_u32(),
    TableTag::new(*b"OTTO").to_u32(),
];

/// The table-of-contents of one font, in file order.
///
/// Built once and never modified. Tables are looked up by exact tag match.
#[derive(Debug)]
pub struct TableDirectory {
    records: Vec<TableRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRecord {
    pub tag: TableTag,

    /// Absolute offset from the start of the file
    pub offset: u32,
}

impl TableDirectory {
    /// Reads the table directory of the font at `font_index`.
    ///
    /// A collection header, if present, redirects to the nested directory of
    /// the selected font. A plain font only has index 0.
    pub fn read(stream: &mut FontStream, font_index: u32) -> FontResult<Self> {
        stream.seek(0)?;

        let mut signature = stream.parse_u32()?;

        if signature == COLLECTION_TAG.to_u32() {
            let major_version = stream.parse_u16()?;
            if major_version != 1 && major_version != 2 {
                return Err(FontError::stream(format!(
                    "Invalid collection header major version {}",
                    major_version
                )));
            }

            let minor_version = stream.parse_u16()?;
            if minor_version != 0 {
                return Err(FontError::stream(format!(
                    "Invalid collection header minor version {}",
                    minor_version
                )));
            }

            let num_fonts = stream.parse_u32()?;
            if num_fonts == 0 {
                return Err(FontError::stream("Collection has no fonts"));
            }

            if font_index >= num_fonts {
                return Err(FontError::stream(format!(
                    "Collection contains only {} fonts",
                    num_fonts
                )));
            }

            stream.skip(font_index as usize * 4)?;
            let font_offset = stream.parse_u32()?;
            stream.seek(font_offset as usize)?;

            signature = stream.parse_u32()?;
        } else if font_index > 0 {
            return Err(FontError::stream(format!(
                "Can't load font at index {} because font is not a collection",
                font_index
            )));
        }

        if !FONT_SIGNATURES.contains(&signature) {
            return Err(FontError::stream(format!(
                "Unsupported font format 0x{:08x}",
                signature
            )));
        }

        let number_of_tables = stream.parse_u16()?;
        if number_of_tables == 0 {
            return Err(FontError::stream("Font has no tables"));
        }

        // searchRange, entrySelector, rangeShift
        stream.skip(3 * 2)?;

        let mut records = Vec::with_capacity(usize::from(number_of_tables));

        for _ in 0..number_of_tables {
            let tag = stream.parse_tag()?;
            let _checksum = stream.parse_u32()?;
            let offset = stream.parse_u32()?;
            let _length = stream.parse_u32()?;

            records.push(TableRecord { tag, offset });
        }

        log::debug!("font {} has {} tables", font_index, records.len());

        Ok(Self { records })
    }

    /// Offset of the first table with the given tag.
    ///
    /// Offset 0 always lies inside the file header, so a record pointing
    /// there is reported as absent too.
    pub fn find_table_offset(&self, tag: TableTag) -> Option<u32> {
        self.records
            .iter()
            .find(|record| record.tag == tag)
            .map(|record| record.offset)
            .filter(|&offset| offset != 0)
    }

    pub fn records(&self) -> &[TableRecord] {
        &self.records
    }
}
