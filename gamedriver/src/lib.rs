//! Scripted automation of an on-screen surface: synthetic input, screen
//! capture, and polling visual verification.
//!
//! A script builds an [`Action`] (possibly an [`ImageMatcher`]) and asks a
//! [`Driver`] to perform it. The driver resolves the action's declared
//! [`Performer`] strategy, which either evaluates the action once or polls
//! it on an interval until the condition holds or the run is canceled.
//! The windowing host that owns the surface is supplied from outside as a
//! [`Delegate`].

pub mod action;
pub mod delegate;
pub mod driver;
pub mod error;
pub mod matcher;
pub mod ssim;
pub mod synthesizer;
pub mod types;

pub use crate::{
    action::{Action, CancellationToken, DelegateCall, Gesture, Outcome, Performer, Strategy},
    delegate::Delegate,
    driver::Driver,
    error::{Error, Result},
    matcher::{ImageMatcher, Reference},
    synthesizer::{EventSynthesizer, SwipeOptions},
    types::{LaunchConfig, Rect, Viewport, USER_AGENT_CHROME},
};
