use {
    crate::{
        action::{Action, Outcome, Performer},
        delegate::Delegate,
        error::Result,
        synthesizer::{EventSynthesizer, SwipeOptions},
        types::{LaunchConfig, Viewport},
    },
    anyhow::Context as _,
    image::{Rgba, RgbaImage},
    std::sync::Arc,
    tracing::debug,
};

struct DriverData {
    delegate: Arc<dyn Delegate>,
    synthesizer: EventSynthesizer,
}

/// Session façade: the single entry point a script uses to launch a
/// surface and perform actions against it, hiding whether a named
/// operation is delegate-forwarded or synthesized.
///
/// Cheap to clone; clones share the same delegate and synthesizer, so a
/// driver can be handed to concurrently running performers.
#[derive(Clone)]
pub struct Driver(Arc<DriverData>);

impl Driver {
    pub fn new(delegate: Arc<dyn Delegate>) -> Self {
        let synthesizer = EventSynthesizer::new(delegate.clone());
        Self(Arc::new(DriverData {
            delegate,
            synthesizer,
        }))
    }

    /// Asks the delegate to prepare a visible, capturable surface and
    /// blocks until it reports readiness.
    ///
    /// Call at most once per session; the behavior of a second launch is
    /// delegate-defined.
    pub fn launch(&self, config: &LaunchConfig) -> Result<()> {
        debug!(
            url = %config.url,
            width = config.width,
            height = config.height,
            "launch"
        );
        Ok(self.0.delegate.launch(config)?)
    }

    pub fn viewport(&self, x: u32, y: u32, width: u32, height: u32) -> Result<Viewport> {
        Viewport::new(x, y, width, height)
    }

    /// Resolves the action's declared performer strategy and runs it
    /// against this driver.
    ///
    /// To cancel a run from outside, build the [`Performer`] yourself and
    /// keep its token.
    pub fn perform(&self, action: &Action) -> Result<Outcome> {
        Performer::for_action(action).run(self, action)
    }

    // Primitive accessors, forwarded straight to the delegate with no
    // translation layer.

    pub fn mouse_move(&self, x: i32, y: i32) -> Result<()> {
        Ok(self.0.delegate.pointer_move(x, y)?)
    }

    pub fn mouse_down(&self, x: i32, y: i32) -> Result<()> {
        Ok(self.0.delegate.pointer_down(x, y)?)
    }

    pub fn mouse_up(&self, x: i32, y: i32) -> Result<()> {
        Ok(self.0.delegate.pointer_up(x, y)?)
    }

    pub fn mouse_wheel(&self, delta: i32) -> Result<()> {
        Ok(self.0.delegate.wheel(delta)?)
    }

    pub fn key_down(&self, key: &str) -> Result<()> {
        Ok(self.0.delegate.key_down(key)?)
    }

    pub fn key_up(&self, key: &str) -> Result<()> {
        Ok(self.0.delegate.key_up(key)?)
    }

    pub fn screenshot(&self, viewport: Viewport) -> Result<RgbaImage> {
        Ok(self.0.delegate.capture_pixels(viewport.rect())?)
    }

    // Composite accessors, forwarded to the event synthesizer.

    pub fn click(&self, x: i32, y: i32) -> Result<()> {
        self.0.synthesizer.click(x, y)
    }

    pub fn press(&self, key: &str) -> Result<()> {
        self.0.synthesizer.press(key)
    }

    pub fn swipe(&self, points: &[(i32, i32)], options: SwipeOptions) -> Result<()> {
        self.0.synthesizer.swipe(points, options)
    }

    /// Color of a single pixel, captured as a 1x1 viewport.
    pub fn pixel(&self, x: u32, y: u32) -> Result<Rgba<u8>> {
        let image = self.screenshot(Viewport::new(x, y, 1, 1)?)?;
        let pixel = image
            .pixels()
            .next()
            .copied()
            .context("delegate returned an empty capture")?;
        Ok(pixel)
    }

    pub(crate) fn delegate(&self) -> &Arc<dyn Delegate> {
        &self.0.delegate
    }
}
