use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// A viewport was constructed with a zero width or height.
    #[error("viewport dimensions must be positive, got {width}x{height}")]
    InvalidRegion { width: u32, height: u32 },

    /// A synthesized gesture was given too few points.
    #[error("gesture requires at least {required} points, got {actual}")]
    InvalidGesture { required: usize, actual: usize },

    /// A similarity comparison was given images of incompatible size.
    #[error(
        "cannot compare images of different dimensions: \
         captured {captured:?}, reference {reference:?}"
    )]
    DimensionMismatch {
        captured: (u32, u32),
        reference: (u32, u32),
    },

    /// A similarity threshold outside of `[0, 1]`.
    #[error("similarity threshold must lie in [0, 1], got {0}")]
    InvalidThreshold(f64),

    /// A performer was run again after it had already terminated.
    #[error("performer has already run")]
    AlreadyRun,

    /// An error surfaced by the delegate, propagated unchanged.
    #[error(transparent)]
    Delegate(#[from] anyhow::Error),

    /// Loading a reference image failed.
    #[error("failed to resolve reference image {source_id:?}")]
    Resolution {
        source_id: String,
        #[source]
        source: anyhow::Error,
    },
}
