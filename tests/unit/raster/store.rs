use super::*;

use std::path::PathBuf;

fn scratch(name: &str, bytes: &[u8]) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_raster_store");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn rgb_bytes_decode_row_major() {
    let bytes = [
        1, 2, 3, 4, 5, 6, //
        7, 8, 9, 10, 11, 12,
    ];
    let r = Raster::from_rgb_bytes(2, &bytes).unwrap();
    assert_eq!(r.at(1, 0), Rgb8::new(4, 5, 6));
    assert_eq!(r.at(0, 1), Rgb8::new(7, 8, 9));
    assert_eq!(r.row(1), &[Rgb8::new(7, 8, 9), Rgb8::new(10, 11, 12)]);
    assert_eq!(r.to_rgb_bytes(), bytes.to_vec());
}

#[test]
fn trailing_bytes_are_ignored() {
    let mut bytes = vec![50u8; 3 * 4];
    bytes.extend_from_slice(&[1, 2, 3, 4, 5]);
    let r = Raster::from_rgb_bytes(2, &bytes).unwrap();
    assert!(r.pixels().iter().all(|&px| px == Rgb8::gray(50)));
}

#[test]
fn short_buffer_is_rejected() {
    assert!(matches!(
        Raster::from_rgb_bytes(2, &[0; 11]),
        Err(RasterError::Validation(_))
    ));
    assert!(Raster::from_rgba_bytes(2, &[0; 15]).is_err());
}

#[test]
fn from_pixels_checks_length() {
    assert!(Raster::from_pixels(2, vec![Rgb8::BLACK; 4]).is_ok());
    assert!(Raster::from_pixels(2, vec![Rgb8::BLACK; 5]).is_err());
}

#[test]
fn get_is_none_outside_grid() {
    let mut r = Raster::filled(3, Rgb8::BLACK);
    r.set(2, 1, Rgb8::WHITE);
    assert_eq!(r.get(2, 1), Some(Rgb8::WHITE));
    assert_eq!(r.get(-1, 0), None);
    assert_eq!(r.get(0, 3), None);
    assert_eq!(r.pixels()[5], Rgb8::WHITE);
}

#[test]
fn load_rgb_reads_exact_raster() {
    let path = scratch("ok.rgb", &[9u8; 2 * 2 * 3 + 7]);
    let r = load_rgb(&path, 2).unwrap();
    assert_eq!(r.size(), 2);
    assert!(r.pixels().iter().all(|&px| px == Rgb8::gray(9)));
}

#[test]
fn load_rgba_keeps_alpha() {
    let path = scratch("ok.rgba", &[1, 2, 3, 4]);
    let r = load_rgba(&path, 1).unwrap();
    assert_eq!(r.at(0, 0), Rgba8::new(1, 2, 3, 4));
}

#[test]
fn missing_file_reports_path() {
    let path = PathBuf::from("target")
        .join("unit_raster_store")
        .join("does_not_exist.rgb");
    let err = load_rgb(&path, 4).unwrap_err();
    match &err {
        RasterError::Io { path: p, .. } => assert_eq!(p, &path),
        other => panic!("expected io error, got {other:?}"),
    }
    assert!(err.to_string().contains("does_not_exist.rgb"));
}

#[test]
fn short_file_reports_sizes() {
    let path = scratch("short.rgba", &[0u8; 10]);
    match load_rgba(&path, 2) {
        Err(RasterError::ShortResource {
            expected, actual, ..
        }) => {
            assert_eq!(expected, 16);
            assert_eq!(actual, 10);
        }
        other => panic!("expected short resource, got {other:?}"),
    }
}

#[test]
fn zero_size_is_rejected() {
    let path = scratch("zero.rgb", &[]);
    assert!(matches!(
        load_rgb(&path, 0),
        Err(RasterError::Validation(_))
    ));
}
