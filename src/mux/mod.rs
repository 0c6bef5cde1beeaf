pub mod ffmpeg;

pub use ffmpeg::FfmpegMuxer;
