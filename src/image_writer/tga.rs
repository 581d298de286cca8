use std::io::Write;

use crate::{
    error::{FontError, FontResult},
    image::Image,
};

use super::ImageWriter;

const TYPE_GRAYSCALE_RLE: u8 = 11;

/// Image descriptor bits selecting a top left origin
const ORIGIN_TOP_LEFT: u8 = 2 << 4;

const FOOTER: &[u8; 26] = b"\0\0\0\0\0\0\0\0TRUEVISION-XFILE.\0";

/// A packet holds at most this many pixels
const MAX_PACKET_LEN: usize = 128;

/// Run length encoded grayscale Truevision TGA
#[derive(Debug, Clone, Copy, Default)]
pub struct TgaImageWriter;

impl ImageWriter for TgaImageWriter {
    fn extension(&self) -> &'static str {
        ".tga"
    }

    fn write(&self, out: &mut dyn Write, image: &Image) -> FontResult<()> {
        let (width, height) = match (u16::try_from(image.width()), u16::try_from(image.height())) {
            (Ok(width), Ok(height)) => (width, height),
            _ => {
                return Err(FontError::validation(format!(
                    "{}x{} is too big for TGA",
                    image.width(),
                    image.height()
                )))
            }
        };

        let mut header = Vec::with_capacity(18);
        // id length, color map type, image type
        header.extend_from_slice(&[0, 0, TYPE_GRAYSCALE_RLE]);
        // color map specification
        header.extend_from_slice(&[0; 5]);
        // x and y origin
        header.extend_from_slice(&0u16.to_le_bytes());
        header.extend_from_slice(&height.to_le_bytes());
        header.extend_from_slice(&width.to_le_bytes());
        header.extend_from_slice(&height.to_le_bytes());
        // bits per pixel, image descriptor
        header.extend_from_slice(&[8, ORIGIN_TOP_LEFT]);
        out.write_all(&header)?;

        let mut packets = Vec::new();
        for y in 0..image.height() {
            if let Some(row) = image.row(y) {
                packets.clear();
                encode_row(row, &mut packets);
                out.write_all(&packets)?;
            }
        }

        out.write_all(FOOTER)?;

        Ok(())
    }
}

/// Packets never span rows
fn encode_row(row: &[u8], packets: &mut Vec<u8>) {
    let mut i = 0;

    while i < row.len() {
        let run = row[i..]
            .iter()
            .take(MAX_PACKET_LEN)
            .take_while(|&&p| p == row[i])
            .count();

        if run >= 2 {
            packets.push(0x80 | (run - 1) as u8);
            packets.push(row[i]);
            i += run;
            continue;
        }

        // Raw packet up to the start of the next run
        let mut end = i + 1;
        while end < row.len() && end - i < MAX_PACKET_LEN {
            if end + 1 < row.len() && row[end] == row[end + 1] {
                break;
            }
            end += 1;
        }

        packets.push((end - i - 1) as u8);
        packets.extend_from_slice(&row[i..end]);
        i = end;
    }
}

#[cfg(test)]
mod test {
    use crate::{image::Image, image_writer::ImageWriter};

    use super::{encode_row, TgaImageWriter, FOOTER};

    fn encode(row: &[u8]) -> Vec<u8> {
        let mut packets = Vec::new();
        encode_row(row, &mut packets);
        packets
    }

    #[test]
    fn runs_and_raw_packets() {
        assert_eq!(encode(&[7]), [0, 7]);
        assert_eq!(encode(&[0, 0, 0]), [0x82, 0]);
        assert_eq!(encode(&[1, 2, 3, 3, 3, 4]), [1, 1, 2, 0x82, 3, 0, 4]);
    }

    #[test]
    fn long_runs_are_split() {
        let row = vec![9; 130];
        assert_eq!(encode(&row), [0xff, 9, 0x81, 9]);

        let row = (0..=129).map(|i| (i % 2) as u8).collect::<Vec<_>>();
        let packets = encode(&row);
        assert_eq!(packets[0], 127);
        assert_eq!(packets[129], 1);
        assert_eq!(packets.len(), 1 + 128 + 1 + 2);
    }

    #[test]
    fn header_and_footer() {
        let image = Image::new(3, 2);

        let mut out = Vec::new();
        TgaImageWriter.write(&mut out, &image).unwrap();

        assert_eq!(
            &out[..18],
            &[0, 0, 11, 0, 0, 0, 0, 0, 0, 0, 2, 0, 3, 0, 2, 0, 8, 0x20]
        );
        assert_eq!(&out[18..22], &[0x82, 0, 0x82, 0]);
        assert_eq!(&out[22..], FOOTER);
    }
}
