//! Turns raw audio bytes into a frame-synchronized sequence of
//! frequency spectra for an animated visualization, then hands the
//! rendered visual artifact and the original audio to a muxing sink.
//!
//! The core is a pure, lazy pipeline:
//!
//! ```text
//! bytes -> Waveform -> FrameSchedule -> (segment -> Spectrum)* -> sinks
//! ```
//!
//! Rendering and muxing are boundary traits ([`pipeline::sink`]); the
//! crate ships one production muxing adapter ([`mux::FfmpegMuxer`])
//! and leaves rasterization to the caller.

pub mod audio;
pub mod config;
pub mod error;
pub mod mux;
pub mod pipeline;

pub use audio::{decode, FrameSpectrum, Spectrum, SpectrumAnalyzer, Waveform};
pub use config::{load_config, Config, SmoothingOptions};
pub use error::{Error, Result};
pub use mux::FfmpegMuxer;
pub use pipeline::schedule::FrameSchedule;
pub use pipeline::sink::{MuxingSink, RenderingSink};
pub use pipeline::{AnimationPipeline, FrameSequence};
