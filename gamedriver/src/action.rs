use {
    crate::{
        driver::Driver,
        error::{Error, Result},
        matcher::ImageMatcher,
        synthesizer::SwipeOptions,
        types::Viewport,
    },
    image::RgbaImage,
    std::{
        sync::{Arc, Condvar, Mutex},
        time::{Duration, Instant},
    },
    tracing::debug,
};

/// A primitive operation forwarded verbatim to the delegate.
#[derive(Debug, Clone, PartialEq)]
pub enum DelegateCall {
    MouseMove { x: i32, y: i32 },
    MouseDown { x: i32, y: i32 },
    MouseUp { x: i32, y: i32 },
    MouseWheel { delta: i32 },
    KeyDown { key: String },
    KeyUp { key: String },
    Screenshot { viewport: Viewport },
}

/// A composite gesture forwarded to the event synthesizer.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Click {
        x: i32,
        y: i32,
    },
    Press {
        key: String,
    },
    Swipe {
        points: Vec<(i32, i32)>,
        options: SwipeOptions,
    },
}

/// A unit of work performable against a [`Driver`]: a pure description
/// bound to no particular run.
#[derive(Debug)]
pub enum Action {
    Delegate(DelegateCall),
    Synthesized(Gesture),
    Match(ImageMatcher),
}

impl Action {
    /// The performer strategy this action declares for itself.
    pub fn strategy(&self) -> Strategy {
        match self {
            Action::Match(matcher) => Strategy::Interval(matcher.check_interval()),
            Action::Delegate(_) | Action::Synthesized(_) => Strategy::Immediate,
        }
    }

    /// Single-shot evaluation against a driver.
    pub(crate) fn evaluate(&self, driver: &Driver) -> Result<Outcome> {
        match self {
            Action::Delegate(call) => match call {
                DelegateCall::MouseMove { x, y } => {
                    driver.mouse_move(*x, *y)?;
                    Ok(Outcome::Done)
                }
                DelegateCall::MouseDown { x, y } => {
                    driver.mouse_down(*x, *y)?;
                    Ok(Outcome::Done)
                }
                DelegateCall::MouseUp { x, y } => {
                    driver.mouse_up(*x, *y)?;
                    Ok(Outcome::Done)
                }
                DelegateCall::MouseWheel { delta } => {
                    driver.mouse_wheel(*delta)?;
                    Ok(Outcome::Done)
                }
                DelegateCall::KeyDown { key } => {
                    driver.key_down(key)?;
                    Ok(Outcome::Done)
                }
                DelegateCall::KeyUp { key } => {
                    driver.key_up(key)?;
                    Ok(Outcome::Done)
                }
                DelegateCall::Screenshot { viewport } => {
                    Ok(Outcome::Image(driver.screenshot(*viewport)?))
                }
            },
            Action::Synthesized(gesture) => match gesture {
                Gesture::Click { x, y } => {
                    driver.click(*x, *y)?;
                    Ok(Outcome::Done)
                }
                Gesture::Press { key } => {
                    driver.press(key)?;
                    Ok(Outcome::Done)
                }
                Gesture::Swipe { points, options } => {
                    driver.swipe(points, *options)?;
                    Ok(Outcome::Done)
                }
            },
            Action::Match(matcher) => Ok(Outcome::Matched(matcher.check(driver)?)),
        }
    }
}

/// Execution strategy for an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Evaluate exactly once; the evaluation's result is the outcome.
    Immediate,
    /// Re-evaluate until success, spacing evaluations by at least the
    /// given interval measured from the end of the previous one.
    Interval(Duration),
}

/// Terminal result of a performer run. Cancellation is an outcome,
/// not an error.
#[derive(Debug)]
pub enum Outcome {
    /// A forwarded call or gesture completed.
    Done,
    /// A screenshot action produced a capture.
    Image(RgbaImage),
    /// A match evaluation's verdict.
    Matched(bool),
    Canceled,
}

impl Outcome {
    pub fn is_canceled(&self) -> bool {
        matches!(self, Outcome::Canceled)
    }
}

#[derive(Default)]
struct TokenInner {
    canceled: Mutex<bool>,
    condvar: Condvar,
}

/// Cancellation handle shared between a performer and outside observers.
///
/// Canceling takes effect at the performer's next wait/check boundary; an
/// evaluation already underway is allowed to complete. A token sleeping out
/// a poll interval wakes immediately.
#[derive(Clone, Default)]
pub struct CancellationToken(Arc<TokenInner>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent; safe to call from any thread at any time.
    pub fn cancel(&self) {
        let mut canceled = self.0.canceled.lock().unwrap();
        *canceled = true;
        self.0.condvar.notify_all();
    }

    pub fn is_canceled(&self) -> bool {
        *self.0.canceled.lock().unwrap()
    }

    /// Blocks for up to `duration`, waking early on cancellation.
    /// Returns whether the token was canceled.
    pub(crate) fn wait(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        let mut canceled = self.0.canceled.lock().unwrap();
        loop {
            if *canceled {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let (guard, _) = self
                .0
                .condvar
                .wait_timeout(canceled, deadline - now)
                .unwrap();
            canceled = guard;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Running,
    Succeeded,
    Canceled,
    Failed,
}

/// Runs one action to completion according to a [`Strategy`].
///
/// A performer may be run only once; a second run fails with
/// [`Error::AlreadyRun`].
pub struct Performer {
    strategy: Strategy,
    token: CancellationToken,
    state: Mutex<State>,
}

impl Performer {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            token: CancellationToken::new(),
            state: Mutex::new(State::Idle),
        }
    }

    /// A performer using the strategy the action declares for itself.
    pub fn for_action(action: &Action) -> Self {
        Self::new(action.strategy())
    }

    /// Handle for canceling this performer from another thread.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn run(&self, driver: &Driver, action: &Action) -> Result<Outcome> {
        self.start()?;
        let result = match self.strategy {
            Strategy::Immediate => self.run_once(driver, action),
            Strategy::Interval(interval) => self.run_interval(driver, action, interval),
        };
        self.finish(&result);
        result
    }

    fn start(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if *state != State::Idle {
            return Err(Error::AlreadyRun);
        }
        *state = State::Running;
        Ok(())
    }

    fn finish(&self, result: &Result<Outcome>) {
        let mut state = self.state.lock().unwrap();
        *state = match result {
            Ok(Outcome::Canceled) => State::Canceled,
            Ok(_) => State::Succeeded,
            Err(_) => State::Failed,
        };
        debug!(state = ?*state, "performer finished");
    }

    fn run_once(&self, driver: &Driver, action: &Action) -> Result<Outcome> {
        if self.token.is_canceled() {
            return Ok(Outcome::Canceled);
        }
        action.evaluate(driver)
    }

    fn run_interval(&self, driver: &Driver, action: &Action, interval: Duration) -> Result<Outcome> {
        let mut last_evaluated: Option<Instant> = None;
        loop {
            if self.token.is_canceled() {
                return Ok(Outcome::Canceled);
            }
            // No wait before the first evaluation; afterwards the interval
            // is measured from the end of the previous one.
            if let Some(last) = last_evaluated {
                let elapsed = last.elapsed();
                if elapsed < interval && self.token.wait(interval - elapsed) {
                    return Ok(Outcome::Canceled);
                }
            }
            let outcome = action.evaluate(driver)?;
            last_evaluated = Some(Instant::now());
            let succeeded = match &outcome {
                Outcome::Matched(matched) => *matched,
                _ => true,
            };
            if succeeded {
                return Ok(outcome);
            }
        }
    }
}
