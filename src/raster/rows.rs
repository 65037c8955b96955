use rayon::prelude::*;

use crate::raster::store::Raster;

/// Visit every row of `raster` as `(y, row)`. Rows are independent, so with `parallel` set they
/// are handed to the current rayon pool.
pub(crate) fn for_each_row<P, F>(raster: &mut Raster<P>, parallel: bool, f: F)
where
    P: Copy + Send,
    F: Fn(usize, &mut [P]) + Sync + Send,
{
    let size = raster.size();
    if size == 0 {
        return;
    }
    if parallel {
        raster
            .pixels_mut()
            .par_chunks_mut(size)
            .enumerate()
            .for_each(|(y, row)| f(y, row));
    } else {
        for (y, row) in raster.pixels_mut().chunks_mut(size).enumerate() {
            f(y, row);
        }
    }
}
