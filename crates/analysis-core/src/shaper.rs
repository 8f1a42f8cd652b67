//! Output shaping: bound the payload size regardless of video length.
//!
//! The consumer of the analysis payload can only ingest so much, so the
//! full record sequence is downsampled a second time on top of the sampler's
//! own reduction before it is reported.

use poselens_common::config::DEFAULT_DOWNSAMPLE;
use poselens_pose_model::{AnalysisResult, AnalysisSummary, FrameRecord, KeyFrameSet};

/// Assembles the final payload from the accumulated records.
#[derive(Debug, Clone, Copy)]
pub struct OutputShaper {
    downsample: usize,
}

impl OutputShaper {
    /// Shaper reporting every `downsample`-th record, starting at index 0.
    /// A zero factor is clamped to 1 (report everything).
    pub fn new(downsample: usize) -> Self {
        Self {
            downsample: downsample.max(1),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_DOWNSAMPLE)
    }

    /// Build the analysis payload.
    ///
    /// Returns `None` when no frame produced a record: there is no
    /// meaningful content to report, and the caller must treat the run as
    /// failed rather than emit an empty summary.
    pub fn shape(&self, records: Vec<FrameRecord>, key_frames: KeyFrameSet) -> Option<AnalysisResult> {
        let last = records.last()?;

        let summary = AnalysisSummary {
            total_frames: records.len(),
            duration_sec: last.timestamp_sec,
        };

        let sampled_frames: Vec<FrameRecord> = records
            .iter()
            .step_by(self.downsample)
            .cloned()
            .collect();

        Some(AnalysisResult {
            summary,
            key_frames,
            sampled_frames,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poselens_pose_model::MetricSet;

    fn records(n: usize) -> Vec<FrameRecord> {
        (0..n)
            .map(|i| FrameRecord {
                frame_index: (i * 5) as u64,
                timestamp_sec: i as f64 * 0.17,
                metrics: MetricSet {
                    knee_angle_left: 100.0,
                    knee_angle_right: 100.0,
                    hip_height: 0.5,
                },
            })
            .collect()
    }

    #[test]
    fn test_downsamples_every_sixth_record() {
        let input = records(24);
        let result = OutputShaper::with_defaults()
            .shape(input.clone(), KeyFrameSet::default())
            .unwrap();

        // ceil(24 / 6) = 4, starting at index 0.
        assert_eq!(result.sampled_frames.len(), 4);
        assert_eq!(result.sampled_frames[0], input[0]);
        assert_eq!(result.sampled_frames[1], input[6]);
        assert_eq!(result.sampled_frames[3], input[18]);
    }

    #[test]
    fn test_summary_totals() {
        let input = records(10);
        let result = OutputShaper::with_defaults()
            .shape(input.clone(), KeyFrameSet::default())
            .unwrap();

        assert_eq!(result.summary.total_frames, 10);
        assert_eq!(result.summary.duration_sec, input.last().unwrap().timestamp_sec);
    }

    #[test]
    fn test_empty_records_produce_no_payload() {
        let result = OutputShaper::with_defaults().shape(vec![], KeyFrameSet::default());
        assert!(result.is_none());
    }

    #[test]
    fn test_keyframes_pass_through_unchanged() {
        let input = records(3);
        let key_frames = KeyFrameSet {
            lowest_center_of_gravity: Some(input[2].clone()),
        };
        let result = OutputShaper::with_defaults()
            .shape(input.clone(), key_frames.clone())
            .unwrap();
        assert_eq!(result.key_frames, key_frames);
    }

    #[test]
    fn test_sampled_frames_strictly_increasing() {
        let result = OutputShaper::new(3)
            .shape(records(20), KeyFrameSet::default())
            .unwrap();
        for pair in result.sampled_frames.windows(2) {
            assert!(pair[1].frame_index > pair[0].frame_index);
            assert!(pair[1].timestamp_sec > pair[0].timestamp_sec);
        }
    }

    #[test]
    fn test_zero_downsample_is_clamped() {
        let result = OutputShaper::new(0)
            .shape(records(5), KeyFrameSet::default())
            .unwrap();
        assert_eq!(result.sampled_frames.len(), 5);
    }
}
