use crate::error::{Error, Result};

/// Frame timing for one pipeline run: the ordered segment start times
/// for a signal of a given length at a target frame rate.
///
/// `frame_count == floor(seconds * fps)`; a trailing partial frame is
/// dropped rather than rounded or padded, so the rendered frames cover
/// exactly fps-aligned wall-clock time.
#[derive(Debug, Clone)]
pub struct FrameSchedule {
    frame_duration: f64,
    start_times: Vec<f64>,
}

impl FrameSchedule {
    pub fn new(seconds: f64, fps: u32) -> Self {
        let frame_duration = 1.0 / fps as f64;
        let frame_count = (seconds * fps as f64).floor().max(0.0) as usize;
        let start_times = (0..frame_count).map(|i| i as f64 / fps as f64).collect();
        log::debug!(
            "scheduled {} frames of {:.4}s over {:.3}s",
            frame_count,
            frame_duration,
            seconds
        );
        Self {
            frame_duration,
            start_times,
        }
    }

    pub fn frame_duration(&self) -> f64 {
        self.frame_duration
    }

    pub fn frame_count(&self) -> usize {
        self.start_times.len()
    }

    pub fn start_times(&self) -> &[f64] {
        &self.start_times
    }

    /// Start time of the frame at `index`.
    pub fn start_time(&self, index: usize) -> Result<f64> {
        self.start_times
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index,
                count: self.start_times.len(),
            })
    }

    /// Start times in frame order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.start_times.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_count_truncates_partial_frames() {
        assert_eq!(FrameSchedule::new(1.0, 30).frame_count(), 30);
        assert_eq!(FrameSchedule::new(0.9999, 30).frame_count(), 29);
        assert_eq!(FrameSchedule::new(2.5, 24).frame_count(), 60);
        assert_eq!(FrameSchedule::new(0.0, 30).frame_count(), 0);
    }

    #[test]
    fn start_times_step_by_frame_duration() {
        let schedule = FrameSchedule::new(1.0, 30);
        for (i, t) in schedule.iter().enumerate() {
            assert!((t - i as f64 / 30.0).abs() < 1e-12);
        }
        assert!((schedule.frame_duration() - 1.0 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn iteration_is_strictly_ascending() {
        let schedule = FrameSchedule::new(3.3, 30);
        let times: Vec<f64> = schedule.iter().collect();
        for pair in times.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn index_past_the_end_fails() {
        let schedule = FrameSchedule::new(1.0, 30);
        assert!(schedule.start_time(29).is_ok());
        let err = schedule.start_time(30).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::IndexOutOfRange { index: 30, count: 30 }
        ));
    }
}
