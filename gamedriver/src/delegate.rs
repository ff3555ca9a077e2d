use {
    crate::types::{LaunchConfig, Rect},
    image::RgbaImage,
};

/// Capability set supplied by the host integration that owns the on-screen
/// surface. The core never implements this; it forwards input events and
/// consumes captures through it.
///
/// Implementations must tolerate concurrent calls: independent performers
/// share one delegate and their checks may interleave in call order at the
/// delegate's discretion.
pub trait Delegate: Send + Sync {
    /// Prepares a visible, capturable surface and blocks until it is ready.
    fn launch(&self, config: &LaunchConfig) -> anyhow::Result<()>;

    /// Captures the pixels of the given region.
    ///
    /// The returned buffer must be RGBA and match the region's dimensions;
    /// any source-native channel order (such as BGRA) is converted here,
    /// not in the core.
    fn capture_pixels(&self, region: Rect) -> anyhow::Result<RgbaImage>;

    fn pointer_down(&self, x: i32, y: i32) -> anyhow::Result<()>;

    fn pointer_up(&self, x: i32, y: i32) -> anyhow::Result<()>;

    fn pointer_move(&self, x: i32, y: i32) -> anyhow::Result<()>;

    /// Key identifiers are opaque to the core; mapping them to host
    /// keycodes is the delegate's concern.
    fn key_down(&self, key: &str) -> anyhow::Result<()>;

    fn key_up(&self, key: &str) -> anyhow::Result<()>;

    fn wheel(&self, delta: i32) -> anyhow::Result<()>;

    /// Resolves a reference image from a source identifier, decoded to RGBA.
    fn load_image(&self, source: &str) -> anyhow::Result<RgbaImage>;
}
