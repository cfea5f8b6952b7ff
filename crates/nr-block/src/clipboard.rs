//! Clipboard service.
//!
//! [`Clipboard`] is the seam between the copy action and the platform.
//! [`MemoryClipboard`] keeps the text in process; [`SystemClipboard`] (behind
//! the `system-clipboard` feature) writes to the OS clipboard.

/// Error writing to a clipboard.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    /// No clipboard is reachable (headless session, missing permission).
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    /// The clipboard rejected the write.
    #[error("clipboard write failed: {0}")]
    Write(String),
}

/// Destination for copied text. Last write wins.
pub trait Clipboard {
    /// Replace the clipboard contents with `text`.
    fn write(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// In-process clipboard.
///
/// Records the most recent write and the number of writes. Use
/// [`failing`](Self::failing) to simulate an unavailable clipboard.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    writes: usize,
    fail: bool,
}

impl MemoryClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clipboard that rejects every write.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Text from the most recent successful write.
    #[must_use]
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Number of write attempts, successful or not.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Clipboard for MemoryClipboard {
    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.writes += 1;
        if self.fail {
            return Err(ClipboardError::Unavailable("memory clipboard disabled".to_owned()));
        }
        self.contents = Some(text.to_owned());
        Ok(())
    }
}

/// Operating system clipboard.
#[cfg(feature = "system-clipboard")]
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

#[cfg(feature = "system-clipboard")]
impl SystemClipboard {
    /// Connect to the OS clipboard.
    pub fn new() -> Result<Self, ClipboardError> {
        arboard::Clipboard::new()
            .map(|inner| Self { inner })
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }
}

#[cfg(feature = "system-clipboard")]
impl Clipboard for SystemClipboard {
    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner
            .set_text(text)
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}
