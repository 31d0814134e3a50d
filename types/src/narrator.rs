//! Narration seam.

/// Sink for spoken prompts.
///
/// Implementations render text to the user out of band (speech synthesis,
/// console). Announcing is fire-and-forget: cue advancement never waits on
/// narration, so implementations that do slow work must hand it off rather
/// than stall the caller.
pub trait Narrator: Send + Sync {
    fn announce(&self, text: &str);
}

/// Narrator that discards everything. The default for headless use.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentNarrator;

impl Narrator for SilentNarrator {
    fn announce(&self, _text: &str) {}
}
