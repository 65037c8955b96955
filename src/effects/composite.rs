use crate::foundation::core::{Offset, Rgb8, Rgba8};
use crate::foundation::math::over_channel;
use crate::raster::rows::for_each_row;
use crate::raster::store::Raster;

/// Straight-alpha "over": `round(src * a + dst * (1 - a))` per channel.
pub fn over(dst: Rgb8, src: Rgba8) -> Rgb8 {
    match src.a {
        0 => dst,
        255 => src.rgb(),
        a => {
            let alpha = f32::from(a) / 255.0;
            Rgb8::new(
                over_channel(src.r, dst.r, alpha),
                over_channel(src.g, dst.g, alpha),
                over_channel(src.b, dst.b, alpha),
            )
        }
    }
}

/// Blend `layer` onto `dst` with its top-left corner at `at`.
///
/// Layer pixels landing outside `dst` are skipped. Repeated calls compose in call order, so the
/// last layer wins where opaque layers overlap.
pub fn blend(dst: &mut Raster<Rgb8>, layer: &Raster<Rgba8>, at: Offset, parallel: bool) {
    let size = dst.size() as i64;
    let lsize = layer.size() as i64;
    let (ox, oy) = (i64::from(at.x), i64::from(at.y));

    // Column span of the layer that lands inside the destination.
    let x0 = ox.max(0);
    let x1 = (ox + lsize).min(size);
    if x0 >= x1 || oy >= size || oy + lsize <= 0 {
        return;
    }

    for_each_row(dst, parallel, |y, row| {
        let ly = y as i64 - oy;
        if ly < 0 || ly >= lsize {
            return;
        }
        let src_row = layer.row(ly as usize);
        for x in x0..x1 {
            let lx = (x - ox) as usize;
            let out = &mut row[x as usize];
            *out = over(*out, src_row[lx]);
        }
    });
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
