use thiserror::Error;

/// Reasons a [`GameConfig`](crate::config::GameConfig) cannot drive a session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("target frame rate must be at least 1")]
    ZeroFps,

    #[error("screen {width}x{height} is too small: need at least {min_width}x{min_height}")]
    ScreenTooSmall {
        width: i32,
        height: i32,
        min_width: i32,
        min_height: i32,
    },

    #[error("screen {width}x{height} is too large: entity coordinates would overflow")]
    ScreenTooLarge { width: i32, height: i32 },

    #[error("empty {what} range {lo}..={hi}")]
    EmptyRange { what: &'static str, lo: i32, hi: i32 },

    #[error("magazine must hold at least one round")]
    ZeroAmmo,
}
