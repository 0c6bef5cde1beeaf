use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;

use crate::pipeline::sink::MuxingSink;

/// Muxing sink backed by an ffmpeg subprocess: copies the visual
/// stream untouched and re-encodes the audio as AAC.
///
/// The original audio bytes are written to a per-invocation temp file
/// that is removed when muxing finishes, so concurrent runs never
/// collide on a shared filename.
pub struct FfmpegMuxer {
    output: PathBuf,
    audio_bitrate: String,
}

impl FfmpegMuxer {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            audio_bitrate: "192k".into(),
        }
    }

    pub fn with_audio_bitrate(mut self, bitrate: impl Into<String>) -> Self {
        self.audio_bitrate = bitrate.into();
        self
    }
}

impl MuxingSink for FfmpegMuxer {
    type Visual = PathBuf;
    type Artifact = PathBuf;

    fn mux(&mut self, audio: &[u8], visual: PathBuf) -> Result<PathBuf> {
        let mut audio_file =
            NamedTempFile::new().context("Failed to create temporary audio file")?;
        audio_file
            .write_all(audio)
            .context("Failed to write temporary audio file")?;
        audio_file.flush()?;

        log::info!(
            "muxing {} with {} into {}",
            audio_file.path().display(),
            visual.display(),
            self.output.display()
        );

        let output = Command::new("ffmpeg")
            .arg("-y")
            .arg("-i")
            .arg(audio_file.path())
            .arg("-i")
            .arg(&visual)
            .args(["-c:v", "copy", "-c:a", "aac", "-b:a", &self.audio_bitrate])
            .arg(&self.output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .context("Failed to spawn ffmpeg. Is ffmpeg installed?")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("ffmpeg exited with error:\n{}", stderr);
        }

        log::info!("ffmpeg mux complete");
        Ok(self.output.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let muxer = FfmpegMuxer::new("out.mp4").with_audio_bitrate("128k");
        assert_eq!(muxer.output, PathBuf::from("out.mp4"));
        assert_eq!(muxer.audio_bitrate, "128k");
    }
}
