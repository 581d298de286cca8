//! Helpers for assembling font binaries in tests

#[derive(Default)]
pub(crate) struct BeWriter {
    buffer: Vec<u8>,
}

impl BeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u16(&mut self, n: u16) -> &mut Self {
        self.buffer.extend_from_slice(&n.to_be_bytes());
        self
    }

    pub fn i16(&mut self, n: i16) -> &mut Self {
        self.buffer.extend_from_slice(&n.to_be_bytes());
        self
    }

    pub fn u32(&mut self, n: u32) -> &mut Self {
        self.buffer.extend_from_slice(&n.to_be_bytes());
        self
    }

    pub fn bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buffer.extend_from_slice(bytes);
        self
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn set_u16(&mut self, pos: usize, n: u16) -> &mut Self {
        self.buffer[pos..pos + 2].copy_from_slice(&n.to_be_bytes());
        self
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buffer
    }
}

/// Lays out one font whose first byte will sit at `base` in the final file
fn write_sfnt(w: &mut BeWriter, base: usize, tables: &[([u8; 4], Vec<u8>)]) {
    let header_len = 12 + 16 * tables.len();

    w.u32(0x0001_0000)
        .u16(tables.len() as u16)
        .u16(0)
        .u16(0)
        .u16(0);

    let mut offset = base + header_len;
    for (tag, data) in tables {
        w.bytes(tag)
            .u32(0)
            .u32(offset as u32)
            .u32(data.len() as u32);
        offset += data.len();
    }

    for (_, data) in tables {
        w.bytes(data);
    }
}

pub(crate) fn build_sfnt(tables: &[([u8; 4], Vec<u8>)]) -> Vec<u8> {
    let mut w = BeWriter::new();
    write_sfnt(&mut w, 0, tables);
    w.into_vec()
}

pub(crate) fn build_collection(fonts: &[Vec<([u8; 4], Vec<u8>)>]) -> Vec<u8> {
    let mut w = BeWriter::new();
    w.bytes(b"ttcf").u16(1).u16(0).u32(fonts.len() as u32);

    let mut offset = 12 + 4 * fonts.len();
    for tables in fonts {
        w.u32(offset as u32);
        offset += 12 + tables.iter().map(|(_, data)| 16 + data.len()).sum::<usize>();
    }

    for tables in fonts {
        let base = w.len();
        write_sfnt(&mut w, base, tables);
    }

    w.into_vec()
}
