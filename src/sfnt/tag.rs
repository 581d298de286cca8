use std::fmt::{self, Write};

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableTag([u8; 4]);

impl TableTag {
    pub const HEAD: Self = Self::new(*b"head");
    pub const OS2: Self = Self::new(*b"OS/2");
    pub const NAME: Self = Self::new(*b"name");
    pub const KERN: Self = Self::new(*b"kern");
    pub const GPOS: Self = Self::new(*b"GPOS");

    pub const fn new(tag: [u8; 4]) -> Self {
        Self(tag)
    }

    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }
}

impl fmt::Debug for TableTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.0[0] as char)?;
        f.write_char(self.0[1] as char)?;
        f.write_char(self.0[2] as char)?;
        f.write_char(self.0[3] as char)?;

        Ok(())
    }
}

impl fmt::Display for TableTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{:?}\"", self)
    }
}
