use std::io::Cursor;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::audio::waveform::Waveform;
use crate::error::{Error, Result};

const SUPPORTED_WIDTHS: [u32; 4] = [8, 16, 24, 32];

/// Decodes raw PCM WAV bytes into a normalized mono waveform.
///
/// The sample width must be 8, 16, 24 or 32 bits. Multi-channel input
/// keeps only the first channel (no downmix), and the returned
/// waveform is normalized to an amplitude of 1.0, so silent input is
/// rejected as `DegenerateSignal`.
pub fn decode(raw: &[u8]) -> Result<Waveform> {
    // Gate on the declared sample width before handing the container
    // to the decoder, so an odd width surfaces as its own error.
    if let Some(width) = wav_sample_width(raw) {
        if !SUPPORTED_WIDTHS.contains(&width) {
            return Err(Error::UnsupportedSampleWidth(width));
        }
    }

    let mss = MediaSourceStream::new(Box::new(Cursor::new(raw.to_vec())), Default::default());

    let mut hint = Hint::new();
    hint.with_extension("wav");

    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(Error::NoAudioTrack)?;

    let track_id = track.id;
    let channels = track.codec_params.channels.map_or(1, |c| c.count()).max(1);
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or(Error::UnknownSampleRate)?;
    if let Some(width) = track.codec_params.bits_per_sample {
        if !SUPPORTED_WIDTHS.contains(&width) {
            return Err(Error::UnsupportedSampleWidth(width));
        }
    }

    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut samples: Vec<f64> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(symphonia::core::errors::Error::DecodeError(_)) => continue,
            Err(e) => return Err(e.into()),
        };

        let spec = *decoded.spec();
        let mut sample_buf = SampleBuffer::<f64>::new(decoded.frames() as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);

        // First channel only: every `channels`-th interleaved sample.
        samples.extend(sample_buf.samples().iter().step_by(channels).copied());
    }

    log::info!(
        "decoded audio: {} samples, {} Hz, {:.1}s",
        samples.len(),
        sample_rate,
        samples.len() as f64 / sample_rate as f64
    );

    let mut waveform = Waveform::new(samples, sample_rate);
    waveform.normalize(1.0)?;

    Ok(waveform)
}

/// Bits-per-sample declared by the `fmt ` chunk of a RIFF/WAVE
/// stream, or `None` when the bytes are not a parseable WAV header.
fn wav_sample_width(raw: &[u8]) -> Option<u32> {
    if raw.len() < 12 || &raw[0..4] != b"RIFF" || &raw[8..12] != b"WAVE" {
        return None;
    }
    let mut pos = 12;
    while pos + 8 <= raw.len() {
        let id = &raw[pos..pos + 4];
        let size = u32::from_le_bytes(raw[pos + 4..pos + 8].try_into().ok()?) as usize;
        if id == b"fmt " {
            if pos + 24 > raw.len() {
                return None;
            }
            let bits = u16::from_le_bytes([raw[pos + 22], raw[pos + 23]]);
            return Some(bits as u32);
        }
        // Chunks are word-aligned.
        pos += 8 + size + (size & 1);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal RIFF/WAVE header with an empty data chunk.
    fn wav_header(bits: u16) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&36u32.to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
        bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
        bytes.extend_from_slice(&8000u32.to_le_bytes());
        let block_align = (bits / 8).max(1);
        bytes.extend_from_slice(&(8000u32 * block_align as u32).to_le_bytes());
        bytes.extend_from_slice(&block_align.to_le_bytes());
        bytes.extend_from_slice(&bits.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes
    }

    #[test]
    fn header_width_is_read_from_fmt_chunk() {
        assert_eq!(wav_sample_width(&wav_header(16)), Some(16));
        assert_eq!(wav_sample_width(&wav_header(24)), Some(24));
        assert_eq!(wav_sample_width(&wav_header(12)), Some(12));
        assert_eq!(wav_sample_width(b"not a wav"), None);
    }

    #[test]
    fn unrecognized_width_is_rejected() {
        let result = decode(&wav_header(12));
        assert!(matches!(result, Err(Error::UnsupportedSampleWidth(12))));
    }
}
