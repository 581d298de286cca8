//! Kerning pair extraction from the "kern" and "GPOS" tables.
//!
//! Both readers produce pairs in glyph index space, already scaled to the
//! requested pixel size. Pairs that scale to 0 are never emitted.

mod gpos;
mod kern;

pub use gpos::read_kerning_pairs_gpos;
pub use kern::read_kerning_pairs_kern;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawKerningPair {
    pub glyph_idx1: u16,
    pub glyph_idx2: u16,
    pub amount: i32,
}

impl RawKerningPair {
    pub const fn new(glyph_idx1: u16, glyph_idx2: u16, amount: i32) -> Self {
        Self {
            glyph_idx1,
            glyph_idx2,
            amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KerningParams {
    pub px_size: i32,
    pub units_per_em: u16,
}

impl KerningParams {
    pub fn scale(&self) -> f32 {
        self.px_size as f32 / f32::from(self.units_per_em)
    }
}

/// Scales a font unit value, rounding half away from zero
fn scale_value(value: i16, scale: f32) -> i32 {
    (f32::from(value) * scale).round() as i32
}

#[cfg(test)]
mod test {
    use super::{scale_value, KerningParams};

    #[test]
    fn scaling_rounds_half_away_from_zero() {
        let scale = KerningParams {
            px_size: 16,
            units_per_em: 1000,
        }
        .scale();

        assert_eq!(scale_value(-50, scale), -1);
        assert_eq!(scale_value(-31, scale), 0);
        assert_eq!(scale_value(32, scale), 1);
        assert_eq!(scale_value(0, scale), 0);

        assert_eq!(scale_value(1, 0.5), 1);
        assert_eq!(scale_value(-1, 0.5), -1);
    }
}
