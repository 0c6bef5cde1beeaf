pub mod analysis;
pub mod decode;
pub mod spectrum;
pub mod waveform;

pub use analysis::{FrameSpectrum, SpectrumAnalyzer};
pub use decode::decode;
pub use spectrum::Spectrum;
pub use waveform::Waveform;
