pub(crate) mod compositor;
pub(crate) mod geometry;
pub(crate) mod resample;
