pub(crate) mod stamp_config;
