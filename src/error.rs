use thiserror::Error;

/// Errors raised for invalid caller configuration.
///
/// Grammar artifacts (malformed rules, unbalanced brackets, degenerate bounds) are never
/// errors; they degrade gracefully inside the core.
#[derive(Error, Debug)]
pub enum LsysError {
    #[error("Step length must be positive and at most {max}, got {0}", max = crate::turtle::MAX_STEP_LENGTH)]
    InvalidStepLength(f64),

    #[error("Jitter '{name}' must be between 0 and {max}, got {value}")]
    InvalidJitter { name: &'static str, value: f64, max: f64 },

    #[error("Angle '{name}' must be finite, got {value}")]
    InvalidAngle { name: &'static str, value: f64 },

    #[error("Viewport {width}x{height} with padding {padding} leaves no drawable area")]
    InvalidViewport { width: f64, height: f64, padding: f64 },

    #[error("Expansion would produce {predicted} symbols (limit: {limit})")]
    TooManySymbols { predicted: u64, limit: u64 },

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LsysError>;
