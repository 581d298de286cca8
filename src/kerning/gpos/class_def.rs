use crate::{
    error::{FontError, FontResult},
    parse_binary::{BinaryParser, FontStream},
};

/// Glyph ids of each class, indexed by class id
pub(super) type GlyphClasses = Vec<Vec<u16>>;

/// Reads a class definition table at the cursor.
///
/// Only glyphs listed in the table end up in the result; class 0 holds
/// just the glyphs explicitly assigned to it.
pub(super) fn read_class_def_table(
    stream: &mut FontStream,
    class_count: u16,
) -> FontResult<GlyphClasses> {
    let mut classes = vec![Vec::new(); usize::from(class_count)];

    let format = stream.parse_u16()?;

    match format {
        1 => {
            let start_glyph_id = stream.parse_u16()?;
            let glyph_count = stream.parse_u16()?;

            for i in 0..glyph_count {
                let glyph_class = stream.parse_u16()?;
                let glyph_id = start_glyph_id.checked_add(i).ok_or_else(|| {
                    FontError::stream(format!(
                        "Class definition table format 1 glyph range {}+{} overflows",
                        start_glyph_id, glyph_count
                    ))
                })?;

                check_class(glyph_class, class_count, format)?;
                classes[usize::from(glyph_class)].push(glyph_id);
            }
        }
        2 => {
            let class_range_count = stream.parse_u16()?;

            for _ in 0..class_range_count {
                let start_glyph_id = stream.parse_u16()?;
                let end_glyph_id = stream.parse_u16()?;
                if start_glyph_id > end_glyph_id {
                    return Err(FontError::stream(format!(
                        "Class definition table format 2 range start id ({}) > end id ({})",
                        start_glyph_id, end_glyph_id
                    )));
                }

                let glyph_class = stream.parse_u16()?;
                check_class(glyph_class, class_count, format)?;

                classes[usize::from(glyph_class)].extend(start_glyph_id..=end_glyph_id);
            }
        }
        _ => {
            return Err(FontError::stream(format!(
                "Unknown format of class definition table: {}",
                format
            )))
        }
    }

    Ok(classes)
}

fn check_class(glyph_class: u16, class_count: u16, format: u16) -> FontResult<()> {
    if glyph_class >= class_count {
        return Err(FontError::stream(format!(
            "Glyph class index ({}) in class definition table format {} exceeds the number of \
             classes ({})",
            glyph_class, format, class_count
        )));
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use crate::{parse_binary::FontStream, test_util::BeWriter};

    use super::read_class_def_table;

    #[test]
    fn format_1() {
        let mut w = BeWriter::new();
        w.u16(1).u16(10).u16(4).u16(1).u16(0).u16(2).u16(1);

        let classes = read_class_def_table(&mut FontStream::new(w.as_slice()), 3).unwrap();
        let expected: Vec<Vec<u16>> = vec![vec![11], vec![10, 13], vec![12]];
        assert_eq!(classes, expected);
    }

    #[test]
    fn format_2() {
        let mut w = BeWriter::new();
        w.u16(2)
            .u16(2)
            .u16(20)
            .u16(22)
            .u16(1)
            .u16(30)
            .u16(30)
            .u16(2);

        let classes = read_class_def_table(&mut FontStream::new(w.as_slice()), 3).unwrap();
        let expected: Vec<Vec<u16>> = vec![vec![], vec![20, 21, 22], vec![30]];
        assert_eq!(classes, expected);
    }

    #[test]
    fn class_out_of_range_fails() {
        let mut w = BeWriter::new();
        w.u16(2).u16(1).u16(20).u16(22).u16(3);

        assert!(read_class_def_table(&mut FontStream::new(w.as_slice()), 3).is_err());

        let mut w = BeWriter::new();
        w.u16(1).u16(10).u16(1).u16(5);

        assert!(read_class_def_table(&mut FontStream::new(w.as_slice()), 2).is_err());
    }
}
