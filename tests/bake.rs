mod common;

use fontbake::{
    cp_range::CpRange,
    geometry::{Edge, Point, Size},
    image::Image,
    pack::SkylinePacker,
    renderer::{self, FontMetrics},
    BakingOptions, Font, FontResult, KerningPair, KerningSource,
};
use pretty_assertions::assert_eq;

use common::{FontBuilder, MockRenderer};

const A: u32 = 0x41;
const B: u32 = 0x42;
const C: u32 = 0x43;
const V: u32 = 0x56;
const SPACE: u32 = 0x20;

fn renderer() -> MockRenderer {
    MockRenderer::new(12, -4, 18)
        .glyph(0, 0, (4, 6), (0, 6), 5)
        .glyph(SPACE, 3, (0, 0), (0, 0), 4)
        .glyph(A, 36, (6, 8), (0, 8), 7)
        .glyph(B, 37, (5, 8), (1, 8), 6)
        .glyph(V, 57, (6, 8), (0, 8), 6)
}

fn ranges() -> Vec<CpRange> {
    vec![
        CpRange::single(0),
        CpRange::single(SPACE),
        CpRange::new(A, C),
        CpRange::single(V),
    ]
}

fn bake(
    options: BakingOptions,
    data: &[u8],
    ranges: &[CpRange],
    renderer: MockRenderer,
) -> FontResult<Font> {
    let mut packer = SkylinePacker::new(
        options.image_max_size,
        options.glyph_spacing,
        options.image_padding,
    );

    Font::with_renderer(options, data, ranges, Box::new(renderer), &mut packer)
}

fn bake_default(data: &[u8]) -> Font {
    bake(BakingOptions::default(), data, &ranges(), renderer()).unwrap()
}

fn kerning(font: &Font) -> Vec<(u32, u32, i32)> {
    font.kerning_pairs()
        .iter()
        .map(|pair| (pair.cp1, pair.cp2, pair.amount))
        .collect()
}

#[test]
fn missing_glyphs_are_skipped_but_cp_0_is_kept() {
    let font = bake_default(&FontBuilder::new(1000).build());

    let cps = font.glyphs().iter().map(|g| g.cp).collect::<Vec<_>>();
    assert_eq!(cps, [0, SPACE, A, B, V]);

    let missing = &font.glyphs()[0];
    assert_eq!(missing.glyph_idx, 0);
    assert_eq!(missing.size, Size::new(4, 6));
}

#[test]
fn draw_offset_is_measured_from_the_ascender() {
    let font = bake_default(&FontBuilder::new(1000).build());

    let b = font.glyphs().iter().find(|g| g.cp == B).unwrap();
    assert_eq!(b.draw_offset, Point::new(1, 4));
    assert_eq!(b.advance, 6);
    assert_eq!(b.size, Size::new(5, 8));
}

#[test]
fn inner_and_outer_padding() {
    let options = BakingOptions {
        glyph_padding_inner: Edge::new(1, 2, 3, 4),
        glyph_padding_outer: Edge::all(1),
        ..BakingOptions::default()
    };

    let font = bake(
        options,
        &FontBuilder::new(1000).build(),
        &ranges(),
        renderer(),
    )
    .unwrap();

    let a = font.glyphs().iter().find(|g| g.cp == A).unwrap();
    assert_eq!(a.size, Size::new(6 + 3 + 4 + 2, 8 + 1 + 2 + 2));
    assert_eq!(a.draw_offset, Point::new(-1, 12 - 8 - 1 - 1));
    assert_eq!(a.advance, 7 + 3 + 4);

    // Whitespace grows too
    let space = font.glyphs().iter().find(|g| g.cp == SPACE).unwrap();
    assert_eq!(space.size, Size::new(9, 5));
    assert_eq!(space.advance, 11);

    assert_eq!(
        font.font_metrics(),
        FontMetrics {
            ascender: 13,
            descender: -6,
            line_height: 21,
        }
    );
}

#[test]
fn outer_padding_leaves_metrics_alone() {
    let options = BakingOptions {
        glyph_padding_outer: Edge::all(3),
        ..BakingOptions::default()
    };

    let font = bake(
        options,
        &FontBuilder::new(1000).build(),
        &ranges(),
        renderer(),
    )
    .unwrap();

    assert_eq!(
        font.font_metrics(),
        FontMetrics {
            ascender: 12,
            descender: -4,
            line_height: 18,
        }
    );
}

#[test]
fn glyph_too_big_for_a_page() {
    let options = BakingOptions {
        image_max_size: 8,
        ..BakingOptions::default()
    };

    let err = bake(
        options,
        &FontBuilder::new(1000).build(),
        &ranges(),
        renderer(),
    )
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Glyph U+0041 is too big (6x8) for a 8x8 px page"
    );
}

#[test]
fn pages_list_their_glyphs() {
    let options = BakingOptions {
        image_max_size: 10,
        image_padding: Edge::all(0),
        glyph_spacing: Point::new(0, 0),
        ..BakingOptions::default()
    };
    let ranges = [CpRange::single(0), CpRange::single(SPACE), CpRange::new(A, B)];

    let font = bake(
        options,
        &FontBuilder::new(1000).build(),
        &ranges,
        renderer(),
    )
    .unwrap();

    let pages = font.pages();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].size, Size::new(10, 8));
    assert_eq!(pages[0].glyph_indices, [0, 1, 2]);
    assert_eq!(pages[1].size, Size::new(5, 8));
    assert_eq!(pages[1].glyph_indices, [3]);

    let glyphs = font.glyphs();
    assert_eq!(
        (glyphs[0].page_idx, glyphs[0].page_pos),
        (0, Point::new(6, 0))
    );
    assert_eq!(
        (glyphs[2].page_idx, glyphs[2].page_pos),
        (0, Point::new(0, 0))
    );
    assert_eq!(
        (glyphs[3].page_idx, glyphs[3].page_pos),
        (1, Point::new(0, 0))
    );
}

#[test]
fn whitespace_only_font_gets_an_empty_page() {
    let font = bake(
        BakingOptions::default(),
        &FontBuilder::new(1000).build(),
        &[CpRange::single(SPACE)],
        renderer(),
    )
    .unwrap();

    assert_eq!(font.glyphs().len(), 1);
    assert_eq!(font.glyphs()[0].page_idx, 0);
    assert_eq!(font.pages().len(), 1);
    assert_eq!(font.pages()[0].size, Size::new(0, 0));
    assert_eq!(font.pages()[0].glyph_indices, [0]);
}

#[test]
fn style_flags_prefer_os2() {
    let mut builder = FontBuilder::new(1000);
    builder.head(1000, 1 << 1).os2(1 << 5);

    let font = bake_default(&builder.build());
    assert!(font.style_flags().bold);
    assert!(!font.style_flags().italic);

    let mut builder = FontBuilder::new(1000);
    builder.head(1000, 1 << 1);

    let font = bake_default(&builder.build());
    assert!(!font.style_flags().bold);
    assert!(font.style_flags().italic);
}

#[test]
fn font_names() {
    let mut builder = FontBuilder::new(1000);
    builder.name(&[
        (1, "Test Sans Condensed"),
        (2, "Bold"),
        (16, "Test Sans"),
        (17, "Condensed Bold"),
    ]);

    let font = bake_default(&builder.build());
    let name = font.font_name();

    assert_eq!(name.family, "Test Sans");
    assert_eq!(name.style, "Condensed Bold");
    assert_eq!(name.group_family, "Test Sans Condensed");
}

#[test]
fn duplicate_kern_pairs_keep_the_first() {
    let mut builder = FontBuilder::new(1000);
    builder.kern(&[
        &[(36, 57, -100)],
        &[(36, 57, -200), (36, 999, -300), (57, 36, -50)],
    ]);

    let font = bake_default(&builder.build());

    assert_eq!(kerning(&font), [(A, V, -2), (V, A, -1)]);
    assert_eq!(font.kerning_pairs()[0], KerningPair::new(A, V, -2));
}

#[test]
fn kerning_sources() {
    let mut builder = FontBuilder::new(1000);
    builder
        .kern(&[&[(36, 57, -100)]])
        .gpos(&[(36, 57, -500), (37, 36, 100)]);
    let data = builder.build();

    let with_source = |kerning_source| {
        let options = BakingOptions {
            kerning_source,
            ..BakingOptions::default()
        };
        kerning(&bake(options, &data, &ranges(), renderer()).unwrap())
    };

    assert_eq!(with_source(KerningSource::Both), [(A, V, -8), (B, A, 2)]);
    assert_eq!(with_source(KerningSource::Gpos), [(A, V, -8), (B, A, 2)]);
    assert_eq!(with_source(KerningSource::Kern), [(A, V, -2)]);
    assert!(with_source(KerningSource::None).is_empty());
}

#[test]
fn kern_is_a_fallback_for_empty_gpos() {
    let mut builder = FontBuilder::new(1000);
    // Scales to 0 at 16 px
    builder.kern(&[&[(36, 57, -100)]]).gpos(&[(36, 57, 10)]);

    let font = bake_default(&builder.build());

    assert_eq!(kerning(&font), [(A, V, -2)]);
}

#[test]
fn invalid_options_are_named() {
    let data = FontBuilder::new(1000).build();

    let options = BakingOptions {
        font_px_size: 0,
        ..BakingOptions::default()
    };
    let err = bake(options, &data, &ranges(), renderer()).unwrap_err();
    assert_eq!(err.to_string(), "Font size should be > 0");

    let options = BakingOptions {
        font_renderer: "gdi".to_owned(),
        ..BakingOptions::default()
    };
    let err = Font::from_data(options, data, &ranges(), &renderer::registry()).unwrap_err();
    assert_eq!(err.to_string(), "No such font renderer: \"gdi\"");
}

#[test]
fn missing_head_table() {
    let mut builder = FontBuilder::default();
    builder.name(&[(1, "Test Sans")]);

    let err = bake(
        BakingOptions::default(),
        &builder.build(),
        &ranges(),
        renderer(),
    )
    .unwrap_err();

    assert_eq!(err.to_string(), "Font has no \"head\" table");
}

#[test]
fn rendering_skips_the_padding() {
    let options = BakingOptions {
        image_padding: Edge::all(0),
        glyph_spacing: Point::new(0, 0),
        glyph_padding_inner: Edge::new(1, 0, 0, 1),
        glyph_padding_outer: Edge::new(0, 1, 1, 0),
        ..BakingOptions::default()
    };
    let renderer = renderer();
    let rendered = renderer.rendered.clone();

    let mut font = bake(
        options,
        &FontBuilder::new(1000).build(),
        &[CpRange::single(A)],
        renderer,
    )
    .unwrap();

    let a = font.glyphs()[0];
    assert_eq!(a.size, Size::new(8, 10));
    assert_eq!(a.page_pos, Point::new(0, 0));

    let mut image = Image::new(8, 10);
    font.render_page(0, &mut image.region_mut()).unwrap();

    assert_eq!(rendered.borrow().as_slice(), [(36, Size::new(6, 8))]);

    // Top row and left column are padding, as are the bottom row and the
    // right column
    assert_eq!(image.pixel(0, 5), Some(0));
    assert_eq!(image.pixel(7, 5), Some(0));
    assert_eq!(image.pixel(3, 0), Some(0));
    assert_eq!(image.pixel(3, 9), Some(0));
    assert_eq!(image.pixel(1, 1), Some(36));
    assert_eq!(image.pixel(6, 8), Some(36));
    assert_eq!(image.data().iter().filter(|&&p| p == 36).count(), 6 * 8);
}

#[test]
fn render_glyph_inside_padding() {
    let options = BakingOptions {
        glyph_padding_inner: Edge::new(1, 0, 2, 0),
        glyph_padding_outer: Edge::new(0, 1, 0, 1),
        ..BakingOptions::default()
    };
    let renderer = renderer();
    let rendered = renderer.rendered.clone();

    let mut font = bake(
        options,
        &FontBuilder::new(1000).build(),
        &[CpRange::single(A)],
        renderer,
    )
    .unwrap();

    let mut image = Image::new(9, 10);
    font.render_glyph(36, &mut image.region_mut()).unwrap();

    assert_eq!(rendered.borrow().as_slice(), [(36, Size::new(6, 8))]);
    assert_eq!(image.pixel(1, 1), Some(0));
    assert_eq!(image.pixel(2, 0), Some(0));
    assert_eq!(image.pixel(2, 1), Some(36));
    assert_eq!(image.pixel(7, 8), Some(36));
    assert_eq!(image.pixel(8, 8), Some(0));
    assert_eq!(image.pixel(7, 9), Some(0));
    assert_eq!(image.data().iter().filter(|&&p| p == 36).count(), 6 * 8);

    // Nothing is drawn when the padding doesn't fit
    let mut small = Image::new(2, 10);
    font.render_glyph(36, &mut small.region_mut()).unwrap();

    assert_eq!(rendered.borrow().len(), 1);
    assert!(small.data().iter().all(|&p| p == 0));
}

#[test]
fn huge_padding_is_too_big() {
    let options = BakingOptions {
        glyph_padding_outer: Edge::all(i32::MAX),
        ..BakingOptions::default()
    };

    let err = bake(
        options,
        &FontBuilder::new(1000).build(),
        &ranges(),
        renderer(),
    )
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Glyph U+0000 is too big (2147483647x2147483647) for a 1024x1024 px page"
    );
}

#[test]
fn render_page_out_of_range() {
    let mut font = bake_default(&FontBuilder::new(1000).build());
    let mut image = Image::new(4, 4);

    assert!(font.render_page(5, &mut image.region_mut()).is_err());
}
