pub(crate) mod orientation;
