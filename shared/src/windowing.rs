//! Sliding windows over sample indices

use std::ops::Range;

/// All contiguous windows of `window_size` indices over a sequence of
/// `sequence_len` items, sliding by one.
///
/// Window `i` covers `i..i + window_size`. Returns nothing when the window does not
/// fit or `window_size` is zero.
pub fn sliding_windows(sequence_len: usize, window_size: usize) -> Vec<Range<usize>> {
    if window_size == 0 || window_size > sequence_len {
        return Vec::new();
    }
    (0..=sequence_len - window_size)
        .map(|start| start..start + window_size)
        .collect()
}

/// Fit a configured window size to the number of samples available: never larger
/// than the data, never below one.
pub fn effective_window_size(configured: usize, sample_count: usize) -> usize {
    configured.min(sample_count).max(1)
}
