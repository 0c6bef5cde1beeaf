use realfft::RealFftPlanner;
use rustfft::{num_complex::Complex, FftPlanner};

use crate::audio::waveform::find_index;

/// Frequency-domain view of a waveform segment.
///
/// One bin per frequency; complex amplitudes until the caller takes
/// magnitudes. `full` distinguishes the two-sided transform (bins in
/// fftfreq order, negative frequencies in the back half) from the
/// one-sided real transform (`N/2 + 1` ascending bins).
#[derive(Debug, Clone)]
pub struct Spectrum {
    pub amplitudes: Vec<Complex<f64>>,
    pub frequencies: Vec<f64>,
    pub sample_rate: u32,
    pub full: bool,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Magnitude of each bin.
    pub fn magnitudes(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|c| c.norm()).collect()
    }

    /// Reorders a two-sided spectrum into ascending frequency order and
    /// returns `(frequencies, magnitudes)`, optionally cut to
    /// `[-high, high]`. For a one-sided spectrum the bins are already
    /// ascending and only the cutoff applies.
    pub fn shifted_magnitudes(&self, high: Option<f64>) -> (Vec<f64>, Vec<f64>) {
        let (fs, amps) = if self.full {
            let split = (self.len() + 1) / 2;
            let mut fs: Vec<f64> = self.frequencies[split..].to_vec();
            fs.extend_from_slice(&self.frequencies[..split]);
            let mut amps: Vec<f64> = self.amplitudes[split..].iter().map(|c| c.norm()).collect();
            amps.extend(self.amplitudes[..split].iter().map(|c| c.norm()));
            (fs, amps)
        } else {
            (self.frequencies.clone(), self.magnitudes())
        };

        match high {
            None => (fs, amps),
            Some(high) => {
                let low = if self.full { -high } else { 0.0 };
                let i = find_index(low, &fs);
                let j = (find_index(high, &fs) + 1).min(fs.len());
                (fs[i..j].to_vec(), amps[i..j].to_vec())
            }
        }
    }
}

/// Discrete Fourier transform with frequencies per the sampling
/// theorem: bin `k` sits at `k * sample_rate / n` (negative for the
/// back half of a two-sided transform).
pub(crate) fn transform(samples: &[f64], sample_rate: u32, full: bool) -> Spectrum {
    let n = samples.len();
    if n == 0 {
        return Spectrum {
            amplitudes: Vec::new(),
            frequencies: Vec::new(),
            sample_rate,
            full,
        };
    }

    let amplitudes = if full {
        let mut buffer: Vec<Complex<f64>> =
            samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
        let mut planner = FftPlanner::<f64>::new();
        planner.plan_fft_forward(n).process(&mut buffer);
        buffer
    } else {
        let mut planner = RealFftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(n);
        let mut input = samples.to_vec();
        let mut output = fft.make_output_vec();
        fft.process(&mut input, &mut output)
            .expect("FFT processing failed");
        output
    };

    Spectrum {
        frequencies: frequencies(n, sample_rate, full),
        amplitudes,
        sample_rate,
        full,
    }
}

fn frequencies(n: usize, sample_rate: u32, full: bool) -> Vec<f64> {
    let step = sample_rate as f64 / n as f64;
    if full {
        // fftfreq order: 0..positive, then negative back to -step.
        (0..n)
            .map(|k| {
                if k < (n + 1) / 2 {
                    k as f64 * step
                } else {
                    (k as f64 - n as f64) * step
                }
            })
            .collect()
    } else {
        (0..=n / 2).map(|k| k as f64 * step).collect()
    }
}
