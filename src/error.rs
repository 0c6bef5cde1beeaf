use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between raw audio bytes and a muxed artifact.
#[derive(Debug, Error)]
pub enum Error {
    /// Sample width outside the recognized 8/16/24/32-bit PCM set.
    #[error("unsupported sample width: {0} bits")]
    UnsupportedSampleWidth(u32),

    /// All-zero signal; normalization has no defined scale factor.
    #[error("degenerate signal: cannot normalize an all-zero waveform")]
    DegenerateSignal,

    /// Frame index requested beyond the end of the schedule.
    #[error("frame index {index} out of range for {count}-frame schedule")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("failed to decode audio")]
    Decode(#[from] symphonia::core::errors::Error),

    #[error("no audio track found in input")]
    NoAudioTrack,

    #[error("audio track has no sample rate")]
    UnknownSampleRate,

    /// Opaque failure from the external rendering collaborator.
    #[error("rendering sink failed: {0}")]
    RenderingSink(anyhow::Error),

    /// Opaque failure from the external muxing collaborator.
    #[error("muxing sink failed: {0}")]
    MuxingSink(anyhow::Error),
}
