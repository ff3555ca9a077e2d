use {
    crate::{
        driver::Driver,
        error::{Error, Result},
        ssim,
        types::Viewport,
    },
    image::RgbaImage,
    once_cell::sync::OnceCell,
    std::time::Duration,
    tracing::debug,
};

/// Default interval between checks when performed by an interval strategy.
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_millis(100);
/// Default similarity threshold for a check to succeed.
pub const DEFAULT_SIMILARITY: f64 = 0.9;

/// The target image an [`ImageMatcher`] compares live captures against.
#[derive(Debug, Clone)]
pub enum Reference {
    /// An already decoded buffer.
    Buffer(RgbaImage),
    /// A source identifier resolved through the delegate on first check,
    /// then memoized for the matcher's lifetime.
    Source(String),
}

/// Condition-matching action: captures a viewport and compares it against
/// a reference image until the similarity score clears the threshold.
///
/// Each check is pure given its inputs; the capture call is the only side
/// effect.
#[derive(Debug)]
pub struct ImageMatcher {
    viewport: Viewport,
    reference: Reference,
    resolved: OnceCell<RgbaImage>,
    threshold: f64,
    check_interval: Duration,
}

impl ImageMatcher {
    pub fn new(viewport: Viewport, reference: Reference) -> Self {
        let resolved = OnceCell::new();
        if let Reference::Buffer(image) = &reference {
            // The cell is freshly created, so this cannot fail.
            let _ = resolved.set(image.clone());
        }
        Self {
            viewport,
            reference,
            resolved,
            threshold: DEFAULT_SIMILARITY,
            check_interval: DEFAULT_CHECK_INTERVAL,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::InvalidThreshold(threshold));
        }
        self.threshold = threshold;
        Ok(self)
    }

    pub fn with_check_interval(mut self, interval: Duration) -> Self {
        self.check_interval = interval;
        self
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn check_interval(&self) -> Duration {
        self.check_interval
    }

    /// Single-shot check: capture the viewport, resolve the reference if
    /// needed, compare. Succeeds iff `score >= threshold`.
    pub fn check(&self, driver: &Driver) -> Result<bool> {
        let capture = driver.screenshot(self.viewport)?;
        let reference = self.resolve_reference(driver)?;
        let score = ssim::mssim(&capture, reference)?;
        debug!(viewport = ?self.viewport.rect(), score, "similarity");
        Ok(score >= self.threshold)
    }

    /// Resolves the reference at most once per matcher; concurrent callers
    /// block on the same in-flight resolution.
    fn resolve_reference(&self, driver: &Driver) -> Result<&RgbaImage> {
        self.resolved.get_or_try_init(|| match &self.reference {
            Reference::Buffer(image) => Ok(image.clone()),
            Reference::Source(source) => {
                driver
                    .delegate()
                    .load_image(source)
                    .map_err(|err| Error::Resolution {
                        source_id: source.clone(),
                        source: err,
                    })
            }
        })
    }
}
