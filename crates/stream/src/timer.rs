use std::time::Duration;

/// Rolling window of recent frame durations.
#[derive(Debug)]
pub struct FrameTimer {
    samples: Vec<Duration>,
    capacity: usize,
    next: usize,
}

impl FrameTimer {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "frame timer needs room for at least one sample");
        Self {
            samples: Vec::with_capacity(capacity),
            capacity,
            next: 0,
        }
    }

    /// Record one frame, overwriting the oldest once the window is full.
    pub fn record(&mut self, dt: Duration) {
        if self.samples.len() < self.capacity {
            self.samples.push(dt);
        } else {
            self.samples[self.next] = dt;
        }
        self.next = (self.next + 1) % self.capacity;
    }

    pub fn count(&self) -> usize {
        self.samples.len()
    }

    pub fn average(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        self.samples.iter().sum::<Duration>() / self.samples.len() as u32
    }

    pub fn max(&self) -> Duration {
        self.samples.iter().copied().max().unwrap_or_default()
    }

    pub fn min(&self) -> Duration {
        self.samples.iter().copied().min().unwrap_or_default()
    }
}
