use crate::audio::spectrum::{self, Spectrum};
use crate::error::{Error, Result};

/// Discrete-time audio signal: samples plus one timestamp per sample.
///
/// Slicing operations copy the underlying ranges, so a segment can be
/// handed off and mutated without touching its parent.
#[derive(Debug, Clone)]
pub struct Waveform {
    samples: Vec<f64>,
    timestamps: Vec<f64>,
    sample_rate: u32,
}

impl Waveform {
    /// Builds a waveform with timestamps `i / sample_rate`.
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Self {
        let timestamps = (0..samples.len())
            .map(|i| i as f64 / sample_rate as f64)
            .collect();
        Self {
            samples,
            timestamps,
            sample_rate,
        }
    }

    /// Builds a waveform with explicit timestamps (used by slicing).
    ///
    /// `timestamps` must be monotonically non-decreasing and the same
    /// length as `samples`.
    pub fn with_timestamps(samples: Vec<f64>, timestamps: Vec<f64>, sample_rate: u32) -> Self {
        debug_assert_eq!(samples.len(), timestamps.len());
        Self {
            samples,
            timestamps,
            sample_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// First timestamp.
    pub fn start(&self) -> f64 {
        self.timestamps.first().copied().unwrap_or(0.0)
    }

    /// Last timestamp.
    pub fn end(&self) -> f64 {
        self.timestamps.last().copied().unwrap_or(0.0)
    }

    /// Time spanned by the timestamps (`end - start`).
    pub fn duration(&self) -> f64 {
        self.end() - self.start()
    }

    /// Signal length in seconds, counting one full sample period per
    /// sample. This is what frame scheduling runs on: a 1 s file at
    /// 30 fps yields exactly 30 frames.
    pub fn seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Rescales samples in place so the peak magnitude equals `amp`.
    ///
    /// Idempotent for a fixed `amp`. Fails on an all-zero signal rather
    /// than dividing by zero.
    pub fn normalize(&mut self, amp: f64) -> Result<()> {
        let peak = self
            .samples
            .iter()
            .fold(0.0f64, |acc, &s| acc.max(s.abs()));
        if peak == 0.0 {
            return Err(Error::DegenerateSignal);
        }
        let scale = amp / peak;
        for s in &mut self.samples {
            *s *= scale;
        }
        Ok(())
    }

    /// Nearest sample index for a time value, by linear interpolation
    /// across `[start, end]`. Rounding is half-away-from-zero
    /// (`f64::round`); the same rule is used by every time lookup in
    /// this crate.
    pub fn find_index(&self, t: f64) -> usize {
        self.time_to_index(t).min(self.samples.len().saturating_sub(1))
    }

    /// Like `find_index`, but may return `len` so it can serve as an
    /// exclusive slice end.
    fn time_to_index(&self, t: f64) -> usize {
        let n = self.samples.len();
        if n < 2 {
            return 0;
        }
        let span = self.end() - self.start();
        if span <= 0.0 {
            return 0;
        }
        let i = ((n - 1) as f64 * (t - self.start()) / span).round();
        i.clamp(0.0, n as f64) as usize
    }

    /// Copies the samples covering `[start, start + duration)`.
    ///
    /// `start` defaults to the first timestamp.
    pub fn segment(&self, start: Option<f64>, duration: f64) -> Waveform {
        let (start, i) = match start {
            Some(t) => (t, self.time_to_index(t)),
            None => (self.start(), 0),
        };
        let j = self.time_to_index(start + duration);
        self.slice(i, j)
    }

    /// Copies the index range `[i, j)` into a new waveform.
    pub fn slice(&self, i: usize, j: usize) -> Waveform {
        let n = self.samples.len();
        let i = i.min(n);
        let j = j.clamp(i, n);
        Waveform::with_timestamps(
            self.samples[i..j].to_vec(),
            self.timestamps[i..j].to_vec(),
            self.sample_rate,
        )
    }

    /// Discrete Fourier transform of this waveform. One-sided (real
    /// input symmetry, `N/2 + 1` bins) unless `full` asks for the
    /// two-sided transform.
    pub fn spectrum(&self, full: bool) -> Spectrum {
        spectrum::transform(&self.samples, self.sample_rate, full)
    }
}

/// Index of the value in `xs` closest to `x`, interpolating linearly
/// across `[xs[0], xs[last]]`. Same rounding rule as
/// `Waveform::find_index`.
pub fn find_index(x: f64, xs: &[f64]) -> usize {
    let n = xs.len();
    if n < 2 {
        return 0;
    }
    let start = xs[0];
    let end = xs[n - 1];
    if end <= start {
        return 0;
    }
    let i = ((n - 1) as f64 * (x - start) / (end - start)).round();
    i.clamp(0.0, (n - 1) as f64) as usize
}
