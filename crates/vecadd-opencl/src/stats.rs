//! Lap timing and trimmed statistics.
//!
//! Every measured stage runs as a sequence of back-to-back laps. The
//! reported average and stddev are computed over the middle 60% of the
//! sorted laps (the lowest and highest 20% are discarded) to suppress
//! warm-up and outlier noise. For the standard 20 repetitions that keeps
//! ranks 5 through 16.

use std::time::{Duration, Instant};

use serde::Serialize;

/// Bytes in one binary gigabyte, the divisor for all bandwidth figures.
pub const GIB: f64 = (1u64 << 30) as f64;

/// Records consecutive lap durations, each lap measured from the end of
/// the previous one.
#[derive(Debug)]
pub struct LapTimer {
    last: Instant,
    laps: Vec<Duration>,
}

impl LapTimer {
    pub fn start() -> Self {
        Self {
            last: Instant::now(),
            laps: Vec::new(),
        }
    }

    /// Close the current lap and immediately open the next one.
    pub fn next_lap(&mut self) -> Duration {
        let now = Instant::now();
        let lap = now - self.last;
        self.last = now;
        self.laps.push(lap);
        lap
    }

    pub fn laps(&self) -> &[Duration] {
        &self.laps
    }

    pub fn into_laps(self) -> Vec<Duration> {
        self.laps
    }
}

/// Mean/stddev over the retained middle portion of a sorted sample set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrimmedStats {
    /// Mean of the retained laps, in seconds.
    pub mean_s: f64,
    /// Population stddev of the retained laps, in seconds.
    pub stddev_s: f64,
    /// How many laps survived the trim.
    pub retained: usize,
    /// How many laps were recorded in total.
    pub total: usize,
}

impl TrimmedStats {
    /// Trim the lowest and highest 20% of the sorted laps and compute
    /// mean/stddev over what remains. Fewer than five laps means nothing
    /// is trimmed; an empty sample set yields all-zero statistics.
    pub fn from_laps(laps: &[Duration]) -> Self {
        let total = laps.len();
        let mut sorted = laps.to_vec();
        sorted.sort_unstable();

        let drop = total / 5;
        let window = &sorted[drop..total - drop];
        if window.is_empty() {
            return Self {
                mean_s: 0.0,
                stddev_s: 0.0,
                retained: 0,
                total,
            };
        }

        let secs: Vec<f64> = window.iter().map(Duration::as_secs_f64).collect();
        let mean = secs.iter().sum::<f64>() / secs.len() as f64;
        let stddev = {
            let variance =
                secs.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / secs.len() as f64;
            variance.sqrt()
        };

        Self {
            mean_s: mean,
            stddev_s: stddev,
            retained: secs.len(),
            total,
        }
    }
}

/// Additions per second over one launch, in billions. One addition per
/// element, divisor 1e9.
pub fn gflops(elements: usize, mean_s: f64) -> f64 {
    if mean_s <= 0.0 {
        return 0.0;
    }
    elements as f64 / mean_s / 1e9
}

/// Achieved bandwidth in GiB/s for moving `bytes` in `mean_s` seconds.
pub fn gib_per_second(bytes: f64, mean_s: f64) -> f64 {
    if mean_s <= 0.0 {
        return 0.0;
    }
    bytes / mean_s / GIB
}

// ── tests ────────────────────────────────────────────────────────────
