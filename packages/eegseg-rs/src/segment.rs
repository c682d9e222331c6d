use crate::config::SegmentParams;
use crate::error::Result;
use crate::types::Recording;
use ndarray::{s, Array3, ArrayView2};

/// Fixed-length windows cut from one recording, laid out segment × channel × sample.
#[derive(Debug, Clone)]
pub struct SegmentSet {
    pub segments: Array3<f64>,
    pub segment_length: usize,
    pub sample_rate: f64,
}

impl SegmentSet {
    pub fn num_segments(&self) -> usize {
        self.segments.len_of(ndarray::Axis(0))
    }

    pub fn num_channels(&self) -> usize {
        self.segments.len_of(ndarray::Axis(1))
    }

    /// Channel × sample view of window `index` (0-based).
    pub fn segment(&self, index: usize) -> ArrayView2<'_, f64> {
        self.segments.slice(s![index, .., ..])
    }
}

/// Scale, truncate and window a recording.
///
/// Only the first `max_samples` samples are used; trailing samples that do not
/// fill a whole window are dropped.
pub fn segment_recording(recording: &Recording, params: &SegmentParams) -> Result<SegmentSet> {
    let segment_length = params.segment_length(recording.sample_rate)?;
    let kept = recording.num_samples().min(params.max_samples);
    let truncated = recording.data.slice(s![.., ..kept]);

    let num_segments = kept / segment_length;
    let num_channels = recording.num_channels();
    let mut segments = Array3::<f64>::zeros((num_segments, num_channels, segment_length));

    for i in 0..num_segments {
        let start = i * segment_length;
        let window = truncated.slice(s![.., start..start + segment_length]);
        segments
            .slice_mut(s![i, .., ..])
            .assign(&window.mapv(|v| v * params.scale));
    }

    log::debug!(
        "{}: {} of {} samples kept, {} segments of {} samples",
        recording.source.display(),
        kept,
        recording.num_samples(),
        num_segments,
        segment_length
    );

    Ok(SegmentSet {
        segments,
        segment_length,
        sample_rate: recording.sample_rate,
    })
}
