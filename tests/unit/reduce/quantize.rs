use super::*;

fn bilevel_only(r: &Raster<Rgb8>) -> bool {
    r.pixels()
        .iter()
        .all(|&px| px == Rgb8::WHITE || px == Rgb8::BLACK)
}

#[test]
fn weighted_threshold_boundary() {
    let mut r = Raster::filled(2, Rgb8::BLACK);
    r.set(0, 0, Rgb8::gray(128));
    r.set(1, 0, Rgb8::gray(127));
    // 0.59 * 217 = 128.03
    r.set(0, 1, Rgb8::new(0, 217, 0));
    // 0.3 * 255 + 0.11 * 255 = 104.55
    r.set(1, 1, Rgb8::new(255, 0, 255));
    threshold_weighted(&mut r);
    assert_eq!(r.at(0, 0), Rgb8::WHITE);
    assert_eq!(r.at(1, 0), Rgb8::BLACK);
    assert_eq!(r.at(0, 1), Rgb8::WHITE);
    assert_eq!(r.at(1, 1), Rgb8::BLACK);
}

#[test]
fn unweighted_threshold_uses_channel_sum() {
    let mut r = Raster::filled(2, Rgb8::BLACK);
    r.set(0, 0, Rgb8::new(255, 0, 129));
    r.set(1, 0, Rgb8::new(255, 0, 128));
    r.set(0, 1, Rgb8::new(0, 217, 0));
    threshold_unweighted(&mut r);
    assert_eq!(r.at(0, 0), Rgb8::WHITE);
    assert_eq!(r.at(1, 0), Rgb8::BLACK);
    // weighted would say white here
    assert_eq!(r.at(0, 1), Rgb8::BLACK);
    assert!(bilevel_only(&r));
}

#[test]
fn truncate_maps_channels_independently() {
    let mut r = Raster::filled(1, Rgb8::new(40, 200, 255));
    truncate(&mut r, 4);
    assert_eq!(r.at(0, 0), Rgb8::new(64, 191, 255));
}

#[test]
fn truncate_is_idempotent_on_a_raster() {
    let mut r = Raster::filled(4, Rgb8::BLACK);
    for (i, px) in r.pixels_mut().iter_mut().enumerate() {
        let v = (i * 17) as u8;
        *px = Rgb8::new(v, 255 - v, v / 2);
    }
    for levels in [1, 2, 3, 7, 16, 255] {
        let mut once = r.clone();
        truncate(&mut once, levels);
        let mut twice = once.clone();
        truncate(&mut twice, levels);
        assert_eq!(once, twice, "levels={levels}");
    }
}

#[test]
fn truncate_zero_levels_is_bilevel() {
    let mut r = Raster::filled(2, Rgb8::BLACK);
    r.set(1, 0, Rgb8::new(200, 100, 130));
    truncate(&mut r, 0);
    assert_eq!(r.at(0, 0), Rgb8::BLACK);
    assert_eq!(r.at(1, 0), Rgb8::new(255, 0, 255));
}
