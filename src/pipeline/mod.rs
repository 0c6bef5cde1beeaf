pub mod schedule;
pub mod sink;

use crate::audio::{self, FrameSpectrum, SpectrumAnalyzer, Waveform};
use crate::config::{Config, SmoothingOptions};
use crate::error::{Error, Result};
use schedule::FrameSchedule;
use sink::{MuxingSink, RenderingSink};

/// Orchestrates decode -> schedule -> per-frame analysis -> rendering
/// sink -> muxing sink for one run.
///
/// A run is linear: any failure aborts it and surfaces the triggering
/// error; no partial artifact is returned. Each run owns its waveform,
/// schedule and frame sequence, so concurrent runs share nothing.
#[derive(Debug, Clone)]
pub struct AnimationPipeline {
    fps: u32,
    smoothing: SmoothingOptions,
}

impl AnimationPipeline {
    pub fn new(fps: u32, smoothing: SmoothingOptions) -> Self {
        Self { fps, smoothing }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.output.fps, config.smoothing)
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Decodes the audio and returns the lazy per-frame spectrum
    /// sequence. Frames are computed one at a time as they are pulled;
    /// the sequence is finite, strictly ordered and not restartable.
    /// Dropping it early is safe.
    pub fn frames(&self, audio: &[u8]) -> Result<FrameSequence> {
        let waveform = audio::decode(audio)?;
        let schedule = FrameSchedule::new(waveform.seconds(), self.fps);
        log::info!(
            "pipeline: {} frames at {} fps over {:.2}s of audio",
            schedule.frame_count(),
            self.fps,
            waveform.seconds()
        );
        Ok(FrameSequence {
            waveform,
            schedule,
            analyzer: SpectrumAnalyzer::new(self.smoothing),
            next: 0,
        })
    }

    /// Runs the whole pipeline: every frame is handed to `renderer` in
    /// order, the finished visual artifact and the original audio
    /// bytes go to `muxer`, and the muxed artifact is returned.
    pub fn run<R, M>(&self, audio: &[u8], mut renderer: R, mut muxer: M) -> Result<M::Artifact>
    where
        R: RenderingSink,
        M: MuxingSink<Visual = R::Artifact>,
    {
        for frame in self.frames(audio)? {
            renderer
                .render_frame(&frame)
                .map_err(Error::RenderingSink)?;
        }
        let visual = renderer.finish().map_err(Error::RenderingSink)?;
        log::info!("rendering sink finished, muxing with original audio");
        let artifact = muxer.mux(audio, visual).map_err(Error::MuxingSink)?;
        log::info!("pipeline done");
        Ok(artifact)
    }
}

/// Lazy, finite, index-ordered sequence of per-frame spectra. Owns the
/// decoded waveform; each pulled frame copies out one segment,
/// analyzes it and discards it.
#[derive(Debug)]
pub struct FrameSequence {
    waveform: Waveform,
    schedule: FrameSchedule,
    analyzer: SpectrumAnalyzer,
    next: usize,
}

impl FrameSequence {
    pub fn waveform(&self) -> &Waveform {
        &self.waveform
    }

    pub fn schedule(&self) -> &FrameSchedule {
        &self.schedule
    }
}

impl Iterator for FrameSequence {
    type Item = FrameSpectrum;

    fn next(&mut self) -> Option<FrameSpectrum> {
        let start = self.schedule.start_time(self.next).ok()?;
        let segment = self
            .waveform
            .segment(Some(start), self.schedule.frame_duration());
        let frame = self.analyzer.analyze(self.next, &segment);
        self.next += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.schedule.frame_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FrameSequence {}
