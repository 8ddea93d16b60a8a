//! Progress reporting hooks for long-running eliminations

/// Receives progress updates as `(message, percent)` pairs
pub trait ProgressSink {
    fn report(&mut self, message: &str, percent: u32);
}

/// Discards every update
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _message: &str, _percent: u32) {}
}

impl<S: ProgressSink + ?Sized> ProgressSink for &mut S {
    fn report(&mut self, message: &str, percent: u32) {
        (**self).report(message, percent)
    }
}

/// Forwards an update to the wrapped sink only when the percentage changed.
///
/// Reaching 100% resets the tracker so the next phase starts fresh.
#[derive(Debug)]
pub struct ProgressTracker<S> {
    sink: S,
    last_percent: Option<u32>,
}

impl<S: ProgressSink> ProgressTracker<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            last_percent: None,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_inner(self) -> S {
        self.sink
    }
}

impl<S: ProgressSink> ProgressSink for ProgressTracker<S> {
    fn report(&mut self, message: &str, percent: u32) {
        let percent = percent.min(100);
        if self.last_percent == Some(percent) {
            return;
        }

        self.sink.report(message, percent);
        self.last_percent = if percent == 100 { None } else { Some(percent) };
    }
}
