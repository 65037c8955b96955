pub(crate) mod composite;
pub(crate) mod convolve;
pub(crate) mod fractal;
pub(crate) mod kernel;
