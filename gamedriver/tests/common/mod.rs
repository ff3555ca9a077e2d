#![allow(dead_code)]

use {
    anyhow::anyhow,
    gamedriver::{Delegate, LaunchConfig, Rect},
    image::{Rgba, RgbaImage},
    std::{
        collections::VecDeque,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Mutex, Once,
        },
    },
};

/// Honors `RUST_LOG` when a test needs the core's debug output.
fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    });
}

pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(rgba))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Launch { url: String },
    Capture(Rect),
    PointerDown { x: i32, y: i32 },
    PointerUp { x: i32, y: i32 },
    PointerMove { x: i32, y: i32 },
    KeyDown(String),
    KeyUp(String),
    Wheel(i32),
    LoadImage(String),
}

type CaptureHook = Box<dyn FnMut(usize) + Send>;

/// Recording delegate: every call is appended to a log, captures are
/// served from a scripted queue (falling back to a fixed image once the
/// queue is drained), and an optional hook observes each capture with its
/// ordinal.
pub struct FakeDelegate {
    calls: Mutex<Vec<Call>>,
    captures: Mutex<VecDeque<RgbaImage>>,
    fallback: RgbaImage,
    reference: Option<RgbaImage>,
    capture_hook: Mutex<Option<CaptureHook>>,
    captures_taken: AtomicUsize,
}

impl FakeDelegate {
    pub fn new(fallback: RgbaImage) -> Self {
        init_tracing();
        Self {
            calls: Mutex::new(Vec::new()),
            captures: Mutex::new(VecDeque::new()),
            fallback,
            reference: None,
            capture_hook: Mutex::new(None),
            captures_taken: AtomicUsize::new(0),
        }
    }

    pub fn with_captures(mut self, captures: impl IntoIterator<Item = RgbaImage>) -> Self {
        self.captures = Mutex::new(captures.into_iter().collect());
        self
    }

    pub fn with_reference(mut self, reference: RgbaImage) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn set_capture_hook(&self, hook: impl FnMut(usize) + Send + 'static) {
        *self.capture_hook.lock().unwrap() = Some(Box::new(hook));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn capture_count(&self) -> usize {
        self.captures_taken.load(Ordering::SeqCst)
    }

    pub fn load_image_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::LoadImage(_)))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Delegate for FakeDelegate {
    fn launch(&self, config: &LaunchConfig) -> anyhow::Result<()> {
        self.record(Call::Launch {
            url: config.url.clone(),
        });
        Ok(())
    }

    fn capture_pixels(&self, region: Rect) -> anyhow::Result<RgbaImage> {
        self.record(Call::Capture(region));
        let taken = self.captures_taken.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(hook) = &mut *self.capture_hook.lock().unwrap() {
            hook(taken);
        }
        let image = self
            .captures
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        Ok(image)
    }

    fn pointer_down(&self, x: i32, y: i32) -> anyhow::Result<()> {
        self.record(Call::PointerDown { x, y });
        Ok(())
    }

    fn pointer_up(&self, x: i32, y: i32) -> anyhow::Result<()> {
        self.record(Call::PointerUp { x, y });
        Ok(())
    }

    fn pointer_move(&self, x: i32, y: i32) -> anyhow::Result<()> {
        self.record(Call::PointerMove { x, y });
        Ok(())
    }

    fn key_down(&self, key: &str) -> anyhow::Result<()> {
        self.record(Call::KeyDown(key.into()));
        Ok(())
    }

    fn key_up(&self, key: &str) -> anyhow::Result<()> {
        self.record(Call::KeyUp(key.into()));
        Ok(())
    }

    fn wheel(&self, delta: i32) -> anyhow::Result<()> {
        self.record(Call::Wheel(delta));
        Ok(())
    }

    fn load_image(&self, source: &str) -> anyhow::Result<RgbaImage> {
        self.record(Call::LoadImage(source.into()));
        self.reference
            .clone()
            .ok_or_else(|| anyhow!("no reference configured for {source:?}"))
    }
}
