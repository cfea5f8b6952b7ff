//! Copy feedback state machine.
//!
//! ```text
//!            copy()                 copy() (re-arm)
//!   Hidden ─────────▶ Visible ◀──────────┐
//!     ▲                  │  └────────────┘
//!     └──── timeout ─────┘
//! ```
//!
//! The auto-hide countdown is a deadline owned by the controller and polled by
//! the host event loop. Only one deadline exists at a time: re-arming replaces
//! it and cancelling clears it.

use std::time::{Duration, Instant};

use crate::clipboard::{Clipboard, ClipboardError};

/// Default time the tooltip stays visible after a copy.
pub const DEFAULT_FEEDBACK_DURATION: Duration = Duration::from_millis(2000);

/// Longest countdown a timer accepts; longer durations are clamped.
pub const MAX_FEEDBACK_DURATION: Duration = Duration::from_secs(24 * 60 * 60);

/// Tooltip visibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FeedbackState {
    #[default]
    Hidden,
    Visible,
}

impl FeedbackState {
    #[must_use]
    pub fn is_visible(self) -> bool {
        self == Self::Visible
    }
}

/// Single-slot cancellable countdown.
#[derive(Debug)]
pub struct AutoHideTimer {
    duration: Duration,
    deadline: Option<Instant>,
}

impl AutoHideTimer {
    /// Create a disarmed timer. `duration` is clamped to [`MAX_FEEDBACK_DURATION`].
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        if duration > MAX_FEEDBACK_DURATION {
            tracing::warn!(?duration, "Clamping tooltip duration");
        }
        Self {
            duration: duration.min(MAX_FEEDBACK_DURATION),
            deadline: None,
        }
    }

    /// Start the countdown at full duration, replacing any pending one.
    pub fn arm(&mut self, now: Instant) -> Instant {
        let deadline = now + self.duration;
        self.deadline = Some(deadline);
        deadline
    }

    /// Drop the pending countdown. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Consume the countdown if it has elapsed at `now`.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Result of a copy action.
#[derive(Debug)]
pub struct CopyOutcome {
    /// When the tooltip will hide unless copied again.
    pub hide_at: Instant,
    /// Clipboard failure, if the write did not go through.
    pub clipboard_error: Option<ClipboardError>,
}

impl CopyOutcome {
    #[must_use]
    pub fn copied(&self) -> bool {
        self.clipboard_error.is_none()
    }
}

/// Owns the tooltip state and its auto-hide countdown.
#[derive(Debug)]
pub struct FeedbackController {
    state: FeedbackState,
    timer: AutoHideTimer,
}

impl Default for FeedbackController {
    fn default() -> Self {
        Self::new(DEFAULT_FEEDBACK_DURATION)
    }
}

impl FeedbackController {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            state: FeedbackState::Hidden,
            timer: AutoHideTimer::new(duration),
        }
    }

    #[must_use]
    pub fn state(&self) -> FeedbackState {
        self.state
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.state.is_visible()
    }

    /// Pending auto-hide deadline, for scheduling the next [`poll`](Self::poll).
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Copy `text` and show the tooltip.
    ///
    /// The clipboard write happens first and synchronously. A failed write is
    /// logged and reported in the outcome; the tooltip is shown regardless.
    pub fn copy(&mut self, clipboard: &mut dyn Clipboard, text: &str, now: Instant) -> CopyOutcome {
        let clipboard_error = match clipboard.write(text) {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to copy code block to clipboard");
                Some(e)
            }
        };

        let rearmed = self.timer.is_armed();
        self.state = FeedbackState::Visible;
        let hide_at = self.timer.arm(now);
        tracing::debug!(bytes = text.len(), rearmed, "Copied code block");

        CopyOutcome {
            hide_at,
            clipboard_error,
        }
    }

    /// Hide the tooltip if its countdown has elapsed.
    ///
    /// Returns `true` exactly once per elapsed countdown.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.timer.fire_if_due(now) {
            self.state = FeedbackState::Hidden;
            true
        } else {
            false
        }
    }

    /// Cancel the pending countdown. The state is left as is.
    pub fn cancel(&mut self) {
        if self.timer.cancel() {
            tracing::debug!("Cancelled pending tooltip auto-hide");
        }
    }
}
