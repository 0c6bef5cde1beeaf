use crate::audio::waveform::Waveform;
use crate::config::SmoothingOptions;

/// One animation frame's worth of spectrum data, ready for a rendering
/// sink: the frequency axis plus the compressed, smoothed magnitudes.
#[derive(Debug, Clone)]
pub struct FrameSpectrum {
    pub index: usize,
    pub frequencies: Vec<f64>,
    pub amplitudes: Vec<f64>,
}

/// Converts waveform segments into per-frame magnitude spectra.
///
/// The raw magnitudes jitter heavily between consecutive 33 ms
/// segments, so each frame is cube-root compressed and low-passed
/// along the bin axis with a Gaussian kernel. Both steps preserve the
/// frequency axis length and ordering.
#[derive(Debug, Clone)]
pub struct SpectrumAnalyzer {
    options: SmoothingOptions,
}

impl SpectrumAnalyzer {
    pub fn new(options: SmoothingOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SmoothingOptions {
        &self.options
    }

    pub fn analyze(&self, index: usize, segment: &Waveform) -> FrameSpectrum {
        let spectrum = segment.spectrum(false);
        let mut amplitudes = spectrum.magnitudes();
        if self.options.cube_root_compression {
            for a in &mut amplitudes {
                *a = a.cbrt();
            }
        }
        let amplitudes = gaussian_filter1d(&amplitudes, self.options.sigma);
        FrameSpectrum {
            index,
            frequencies: spectrum.frequencies,
            amplitudes,
        }
    }
}

/// 1-D Gaussian smoothing, zeroth derivative, kernel truncated at 4
/// standard deviations, reflect boundary handling. `sigma <= 0`
/// disables smoothing.
pub fn gaussian_filter1d(values: &[f64], sigma: f64) -> Vec<f64> {
    if sigma <= 0.0 || values.is_empty() {
        return values.to_vec();
    }

    let radius = (4.0 * sigma + 0.5) as usize;
    let kernel = gaussian_kernel(sigma, radius);
    let n = values.len() as isize;

    (0..n)
        .map(|i| {
            kernel
                .iter()
                .enumerate()
                .map(|(k, &w)| {
                    let j = reflect(i + k as isize - radius as isize, n);
                    w * values[j]
                })
                .sum()
        })
        .collect()
}

fn gaussian_kernel(sigma: f64, radius: usize) -> Vec<f64> {
    let mut kernel: Vec<f64> = (0..=2 * radius)
        .map(|k| {
            let d = k as f64 - radius as f64;
            (-d * d / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= sum;
    }
    kernel
}

/// Mirrors an out-of-range index back into `[0, n)`, repeating the
/// edge sample (`b a | a b c` style reflection).
fn reflect(mut i: isize, n: isize) -> usize {
    loop {
        if i < 0 {
            i = -i - 1;
        } else if i >= n {
            i = 2 * n - 1 - i;
        } else {
            return i as usize;
        }
    }
}
