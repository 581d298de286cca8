//! Reading the sfnt container: the table directory and the few metadata
//! tables a bake needs.

mod directory;
mod head;
mod name;
mod os2;
mod tag;

pub use directory::{TableDirectory, TableRecord};
pub use head::{read_head, Head, MacStyle};
pub use name::{read_font_name, FontName};
pub use os2::{read_os2, FsSelection, Os2};
pub use tag::TableTag;
