//! Hand-driven probes.
//!
//! Clones share the same readings, so a caller can keep one handle,
//! give another to the recorder, and move time forward between calls.

use super::Probes;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct ManualProbes {
    now: Rc<Cell<f64>>,
    memory: Rc<Cell<u64>>,
    peak: Rc<Cell<u64>>,
}

impl ManualProbes {
    /// Create probes with the clock at `start_seconds` and no memory in use
    pub fn new(start_seconds: f64) -> Self {
        let probes = Self::default();
        probes.now.set(start_seconds);
        probes
    }

    /// Move the clock forward
    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }

    /// Set the clock to an absolute time
    pub fn set_now(&self, seconds: f64) {
        self.now.set(seconds);
    }

    /// Set current memory usage, raising the peak if needed
    pub fn set_memory(&self, bytes: u64) {
        self.memory.set(bytes);
        if bytes > self.peak.get() {
            self.peak.set(bytes);
        }
    }
}

impl Probes for ManualProbes {
    fn now_seconds(&self) -> f64 {
        self.now.get()
    }

    fn current_memory(&self) -> u64 {
        self.memory.get()
    }

    fn peak_memory(&self) -> u64 {
        self.peak.get()
    }
}
