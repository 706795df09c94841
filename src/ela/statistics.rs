//! Distributional statistics over ELA residuals.

use image::DynamicImage;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Number of intensity bins in the residual histogram.
pub const HISTOGRAM_BINS: usize = 256;

/// Summary statistics of a decoded ELA residual.
///
/// Computed over every sample of the residual regardless of channel layout,
/// matching how the payload is consumed downstream: a bright tampered patch
/// shifts the mean and raises isolated histogram peaks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElaStatistics {
    /// Mean of all samples.
    pub mean: f64,
    /// Population standard deviation of all samples.
    pub std: f64,
    /// Smallest sample value.
    pub min: u8,
    /// Largest sample value.
    pub max: u8,
    /// Count per intensity value; always 256 entries summing to the
    /// residual's total sample count.
    pub histogram: Vec<u64>,
    /// Bins in `1..=254` whose count exceeds both neighbors' counts and the
    /// sample mean, in ascending order. Isolated peaks in an otherwise
    /// smooth residual distribution are a recompression tell.
    pub peaks: Vec<usize>,
}

impl ElaStatistics {
    /// Computes statistics over every sample of a decoded residual.
    pub fn compute(residual: &DynamicImage) -> Self {
        Self::from_samples(residual.as_bytes())
    }

    /// Computes statistics from a flat sample buffer.
    pub(crate) fn from_samples(samples: &[u8]) -> Self {
        let mut histogram = vec![0u64; HISTOGRAM_BINS];
        let mut sum = 0u64;
        let mut sum_squares = 0u64;
        for &sample in samples {
            histogram[sample as usize] += 1;
            sum += u64::from(sample);
            sum_squares += u64::from(sample) * u64::from(sample);
        }

        let count = samples.len() as f64;
        let (mean, std) = if samples.is_empty() {
            (0.0, 0.0)
        } else {
            let mean = sum as f64 / count;
            let variance = (sum_squares as f64 / count - mean * mean).max(0.0);
            (mean, variance.sqrt())
        };

        let (min, max) = samples
            .iter()
            .copied()
            .minmax()
            .into_option()
            .unwrap_or((0, 0));

        let peaks = find_peaks(&histogram, mean);

        Self {
            mean,
            std,
            min,
            max,
            histogram,
            peaks,
        }
    }

    /// Total sample count the histogram was built from.
    pub fn sample_count(&self) -> u64 {
        self.histogram.iter().sum()
    }
}

/// A bin is a peak iff its count beats both neighbors and the sample mean.
/// Endpoint bins (0 and 255) have only one neighbor and never qualify.
fn find_peaks(histogram: &[u64], mean: f64) -> Vec<usize> {
    (1..histogram.len() - 1)
        .filter(|&i| {
            histogram[i] > histogram[i - 1]
                && histogram[i] > histogram[i + 1]
                && histogram[i] as f64 > mean
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn test_uniform_zero_residual() {
        let stats = ElaStatistics::from_samples(&[0u8; 1000]);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.std, 0.0);
        assert_eq!(stats.min, 0);
        assert_eq!(stats.max, 0);
        assert_eq!(stats.histogram[0], 1000);
        assert!(stats.peaks.is_empty());
    }

    #[test]
    fn test_histogram_sums_to_sample_count() {
        let residual = DynamicImage::ImageRgb8(image::RgbImage::from_fn(17, 13, |x, y| {
            image::Rgb([(x * 7) as u8, (y * 11) as u8, ((x + y) * 3) as u8])
        }));
        let stats = ElaStatistics::compute(&residual);
        assert_eq!(stats.sample_count(), 17 * 13 * 3);
        assert_eq!(stats.histogram.len(), HISTOGRAM_BINS);
    }

    #[test]
    fn test_known_distribution() {
        // Four samples: mean 5, population variance 25 -> std 5.
        let stats = ElaStatistics::from_samples(&[0, 0, 10, 10]);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.std, 5.0);
        assert_eq!(stats.min, 0);
        assert_eq!(stats.max, 10);
    }

    #[test]
    fn test_peak_detection_requires_beating_neighbors_and_mean() {
        // Mostly zeros with a spike of 200 samples at intensity 40 and a
        // smaller bump at 41: bin 40 peaks, bin 41 does not.
        let mut samples = vec![0u8; 1000];
        samples.extend(std::iter::repeat_n(40u8, 200));
        samples.extend(std::iter::repeat_n(41u8, 50));

        let stats = ElaStatistics::from_samples(&samples);
        assert!(stats.mean < 200.0);
        assert_eq!(stats.peaks, vec![40]);
    }

    #[test]
    fn test_peaks_ascend() {
        let mut samples = vec![0u8; 500];
        samples.extend(std::iter::repeat_n(30u8, 300));
        samples.extend(std::iter::repeat_n(90u8, 400));
        samples.extend(std::iter::repeat_n(200u8, 350));

        let stats = ElaStatistics::from_samples(&samples);
        assert_eq!(stats.peaks, vec![30, 90, 200]);
    }

    #[test]
    fn test_single_channel_residual_counts_every_pixel_once() {
        let gray = GrayImage::from_pixel(10, 10, Luma([7]));
        let stats = ElaStatistics::compute(&DynamicImage::ImageLuma8(gray));
        assert_eq!(stats.sample_count(), 100);
        assert_eq!(stats.histogram[7], 100);
    }
}
