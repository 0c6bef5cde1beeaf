use crate::audio::FrameSpectrum;

/// External collaborator that rasterizes and accumulates frames.
///
/// Frames arrive strictly in index order, one at a time. How they are
/// drawn and encoded is entirely the sink's business; the pipeline
/// only hands over spectra and collects the finished artifact. A still
/// image, title text or rendering resolution belong to the sink's
/// constructor, not to the pipeline.
pub trait RenderingSink {
    type Artifact;

    fn render_frame(&mut self, frame: &FrameSpectrum) -> anyhow::Result<()>;

    /// Called once after the last frame; yields the visual artifact.
    fn finish(self) -> anyhow::Result<Self::Artifact>;
}

/// External collaborator that combines the original audio with the
/// rendered visual artifact into one deliverable.
pub trait MuxingSink {
    type Visual;
    type Artifact;

    fn mux(&mut self, audio: &[u8], visual: Self::Visual) -> anyhow::Result<Self::Artifact>;
}
