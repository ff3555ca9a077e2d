use {
    crate::{
        delegate::Delegate,
        error::{Error, Result},
    },
    std::{sync::Arc, thread::sleep, time::Duration},
    tracing::trace,
};

/// Delay between consecutive swipe steps unless overridden.
const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwipeOptions {
    pub step_delay: Duration,
}

impl Default for SwipeOptions {
    fn default() -> Self {
        Self {
            step_delay: DEFAULT_STEP_DELAY,
        }
    }
}

/// Composes primitive input events into gestures. Every primitive is
/// forwarded verbatim to the delegate and completes before the next one
/// is issued; the synthesizer holds no visual state of its own.
#[derive(Clone)]
pub struct EventSynthesizer {
    delegate: Arc<dyn Delegate>,
}

impl EventSynthesizer {
    pub fn new(delegate: Arc<dyn Delegate>) -> Self {
        Self { delegate }
    }

    /// Pointer down, then pointer up at `(x, y)`. No delay is inserted
    /// between the two; callers needing a held click must use the
    /// primitive accessors instead.
    pub fn click(&self, x: i32, y: i32) -> Result<()> {
        trace!(x, y, "click");
        self.delegate.pointer_down(x, y)?;
        self.delegate.pointer_up(x, y)?;
        Ok(())
    }

    /// Key down, then key up for the given key identifier.
    pub fn press(&self, key: &str) -> Result<()> {
        trace!(key, "press");
        self.delegate.key_down(key)?;
        self.delegate.key_up(key)?;
        Ok(())
    }

    /// Pointer down at the first point, a move for each following point in
    /// order, then pointer up at the last point, sleeping `step_delay`
    /// between steps. Requires at least two points.
    pub fn swipe(&self, points: &[(i32, i32)], options: SwipeOptions) -> Result<()> {
        let Some(((first_x, first_y), rest)) = points.split_first() else {
            return Err(Error::InvalidGesture {
                required: 2,
                actual: 0,
            });
        };
        if rest.is_empty() {
            return Err(Error::InvalidGesture {
                required: 2,
                actual: 1,
            });
        }
        trace!(?points, "swipe");
        self.delegate.pointer_down(*first_x, *first_y)?;
        for &(x, y) in rest {
            sleep(options.step_delay);
            self.delegate.pointer_move(x, y)?;
        }
        let (last_x, last_y) = rest[rest.len() - 1];
        sleep(options.step_delay);
        self.delegate.pointer_up(last_x, last_y)?;
        Ok(())
    }
}
