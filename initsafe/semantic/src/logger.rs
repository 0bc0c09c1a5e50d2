//! Logs every step of the interpreter at `trace` level. The per-expression steps are very
//! noisy, so they are only emitted if the `log_semantic` feature is enabled.

#[cfg(feature = "log_semantic")]
pub const LOG_ENABLED: bool = true;
#[cfg(not(feature = "log_semantic"))]
pub const LOG_ENABLED: bool = false;

macro_rules! log_step {
    ($($args:tt)*) => {
        if $crate::logger::LOG_ENABLED {
            log::trace!($($args)*);
        }
    };
}
