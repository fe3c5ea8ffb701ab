pub(crate) mod blend;
pub(crate) mod photo;
pub(crate) mod surface;
