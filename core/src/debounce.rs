/// Coalesces a burst of events into one value. Every `push` replaces the
/// pending value; the caller owns the quiet-period timer and calls `flush`
/// when it expires, receiving only the last value of the burst.
#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    wait_ms: u32,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    pub fn new(wait_ms: u32) -> Self {
        Self {
            wait_ms,
            pending: None,
        }
    }

    /// Quiet period the caller's timer must wait after the latest push.
    pub fn wait_ms(&self) -> u32 {
        self.wait_ms
    }

    pub fn push(&mut self, value: T) {
        self.pending = Some(value);
    }

    pub fn flush(&mut self) -> Option<T> {
        self.pending.take()
    }
}
