pub(crate) mod stamp_session;
pub(crate) mod throttle;
