use super::*;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = Rgb8::new(10, 20, 30);
    assert_eq!(over(dst, Rgba8::new(255, 255, 255, 0)), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = Rgb8::new(10, 20, 30);
    assert_eq!(over(dst, Rgba8::new(200, 100, 50, 255)), Rgb8::new(200, 100, 50));
}

#[test]
fn over_partial_alpha_mixes() {
    let out = over(Rgb8::BLACK, Rgba8::new(255, 255, 255, 128));
    // 255 * 128 / 255 = 128
    assert_eq!(out, Rgb8::gray(128));
}

fn layer(size: usize, px: Rgba8) -> Raster<Rgba8> {
    Raster::filled(size, px)
}

#[test]
fn blend_places_layer_at_offset() {
    let mut dst = Raster::filled(4, Rgb8::BLACK);
    let red = layer(2, Rgba8::new(255, 0, 0, 255));
    blend(&mut dst, &red, Offset::new(1, 2), false);
    for y in 0..4 {
        for x in 0..4 {
            let inside = (1..3).contains(&x) && (2..4).contains(&y);
            let want = if inside {
                Rgb8::new(255, 0, 0)
            } else {
                Rgb8::BLACK
            };
            assert_eq!(dst.at(x, y), want, "({x}, {y})");
        }
    }
}

#[test]
fn blend_clips_negative_and_overflowing_offsets() {
    let white = layer(3, Rgba8::new(255, 255, 255, 255));

    let mut dst = Raster::filled(4, Rgb8::BLACK);
    blend(&mut dst, &white, Offset::new(-2, -2), false);
    assert_eq!(dst.at(0, 0), Rgb8::WHITE);
    assert_eq!(dst.at(1, 0), Rgb8::BLACK);
    assert_eq!(dst.at(0, 1), Rgb8::BLACK);

    let mut dst = Raster::filled(4, Rgb8::BLACK);
    blend(&mut dst, &white, Offset::new(3, 3), false);
    assert_eq!(dst.at(3, 3), Rgb8::WHITE);
    assert_eq!(
        dst.pixels().iter().filter(|&&px| px == Rgb8::WHITE).count(),
        1
    );
}

#[test]
fn blend_fully_outside_is_noop() {
    let white = layer(2, Rgba8::new(255, 255, 255, 255));
    let mut dst = Raster::filled(4, Rgb8::gray(9));
    let before = dst.clone();
    for at in [
        Offset::new(4, 0),
        Offset::new(0, 4),
        Offset::new(-2, 0),
        Offset::new(0, -2),
        Offset::new(i32::MIN, i32::MAX),
    ] {
        blend(&mut dst, &white, at, false);
    }
    assert_eq!(dst, before);
}

#[test]
fn later_layers_win_where_opaque() {
    let mut dst = Raster::filled(2, Rgb8::BLACK);
    blend(&mut dst, &layer(2, Rgba8::new(255, 0, 0, 255)), Offset::default(), false);
    blend(&mut dst, &layer(1, Rgba8::new(0, 0, 255, 255)), Offset::new(1, 1), false);
    assert_eq!(dst.at(0, 0), Rgb8::new(255, 0, 0));
    assert_eq!(dst.at(1, 1), Rgb8::new(0, 0, 255));
}

#[test]
fn transparent_layer_pixels_keep_destination() {
    let mut lay = layer(2, Rgba8::new(255, 255, 255, 255));
    lay.set(0, 0, Rgba8::new(255, 255, 255, 0));
    let mut dst = Raster::filled(2, Rgb8::gray(40));
    blend(&mut dst, &lay, Offset::default(), true);
    assert_eq!(dst.at(0, 0), Rgb8::gray(40));
    assert_eq!(dst.at(1, 1), Rgb8::WHITE);
}
