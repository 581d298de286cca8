use std::fmt;

use crate::{
    error::{FontError, FontResult},
    sfnt::TableTag,
};

/// Generic trait for parsing big-endian binary formats
pub trait BinaryParser {
    fn buffer(&self) -> &[u8];
    fn cursor(&self) -> usize;
    fn cursor_mut(&mut self) -> &mut usize;

    fn next(&mut self) -> FontResult<u8> {
        let b = self.buffer().get(self.cursor()).copied();
        if b.is_some() {
            *self.cursor_mut() += 1;
        }
        b.ok_or_else(|| FontError::stream(format!("unexpected eof at offset {}", self.cursor())))
    }

    fn peek(&mut self) -> Option<u8> {
        self.buffer().get(self.cursor()).copied()
    }

    /// Moves the cursor to an absolute position. Seeking to the very end of
    /// the buffer is allowed, anything past it is not.
    fn seek(&mut self, pos: usize) -> FontResult<()> {
        if pos > self.buffer().len() {
            return Err(FontError::stream(format!(
                "seek to offset {} past the end of {} byte buffer",
                pos,
                self.buffer().len()
            )));
        }

        *self.cursor_mut() = pos;

        Ok(())
    }

    fn skip(&mut self, n: usize) -> FontResult<()> {
        let pos = self
            .cursor()
            .checked_add(n)
            .ok_or_else(|| FontError::stream("seek offset overflow"))?;
        self.seek(pos)
    }

    fn parse_u16(&mut self) -> FontResult<u16> {
        let b1 = self.next()?;
        let b2 = self.next()?;

        Ok(u16::from_be_bytes([b1, b2]))
    }

    fn parse_i16(&mut self) -> FontResult<i16> {
        let b1 = self.next()?;
        let b2 = self.next()?;

        Ok(i16::from_be_bytes([b1, b2]))
    }

    fn parse_u32(&mut self) -> FontResult<u32> {
        let b1 = self.next()?;
        let b2 = self.next()?;
        let b3 = self.next()?;
        let b4 = self.next()?;

        Ok(u32::from_be_bytes([b1, b2, b3, b4]))
    }

    fn parse_tag(&mut self) -> FontResult<TableTag> {
        let b1 = self.next()?;
        let b2 = self.next()?;
        let b3 = self.next()?;
        let b4 = self.next()?;

        Ok(TableTag::new([b1, b2, b3, b4]))
    }
}

/// Random access cursor over a fully loaded font file
pub struct FontStream<'a> {
    buffer: &'a [u8],
    cursor: usize,
}

impl<'a> FontStream<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, cursor: 0 }
    }
}

impl fmt::Debug for FontStream<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontStream")
            .field("cursor", &self.cursor)
            .field("buffer", &format!("[ {} bytes ]", self.buffer.len()))
            .finish()
    }
}

impl BinaryParser for FontStream<'_> {
    fn buffer(&self) -> &[u8] {
        self.buffer
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn cursor_mut(&mut self) -> &mut usize {
        &mut self.cursor
    }
}
