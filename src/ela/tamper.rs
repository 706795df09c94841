//! Tamper-region extraction from ELA residuals.

use image::{DynamicImage, GrayImage, Luma};
use imageproc::region_labelling::{Connectivity, connected_components};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::processors::geometry::Region;

/// How suspicious pixels are grouped into regions.
///
/// The strategy is fixed at detector construction so behavior stays
/// predictable within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelingStrategy {
    /// 8-connected component labeling: one region per component above the
    /// size floor. The precise strategy, used by default.
    #[default]
    ConnectedComponents,
    /// Collapse the entire high-intensity mask into a single region whose
    /// box spans all suspicious pixels. A coarser, less precise substitute
    /// for environments without a labeling pass; its output is not
    /// equivalent to per-component regions and callers should treat it as
    /// degraded.
    CoarseBoundingBox,
}

/// Extracts high-residual regions from a decoded ELA image.
#[derive(Debug, Clone, Copy)]
pub struct TamperRegionDetector {
    /// Intensity a pixel must strictly exceed to count as suspicious.
    threshold: u8,
    /// Member-pixel count a component must strictly exceed to be reported.
    min_region_pixels: usize,
    strategy: LabelingStrategy,
}

/// Per-component accumulator for bounding box and intensity.
#[derive(Debug, Clone, Copy)]
struct ComponentStats {
    count: u64,
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
    intensity_sum: u64,
}

impl ComponentStats {
    fn new() -> Self {
        Self {
            count: 0,
            min_x: u32::MAX,
            min_y: u32::MAX,
            max_x: 0,
            max_y: 0,
            intensity_sum: 0,
        }
    }

    fn add(&mut self, x: u32, y: u32, intensity: u8) {
        self.count += 1;
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
        self.intensity_sum += u64::from(intensity);
    }

    /// Box extents are the min/max member coordinates; width and height are
    /// the coordinate spans, matching the published payload format.
    fn into_region(self) -> Region {
        Region::with_intensity(
            self.min_x,
            self.min_y,
            self.max_x - self.min_x,
            self.max_y - self.min_y,
            self.count,
            self.intensity_sum as f64 / self.count as f64,
        )
    }
}

impl TamperRegionDetector {
    /// Creates a detector with the default (connected-components) strategy.
    pub fn new(threshold: u8, min_region_pixels: usize) -> Self {
        Self {
            threshold,
            min_region_pixels,
            strategy: LabelingStrategy::default(),
        }
    }

    /// Selects the grouping strategy.
    pub fn with_strategy(mut self, strategy: LabelingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// The strategy this detector was constructed with.
    pub fn strategy(&self) -> LabelingStrategy {
        self.strategy
    }

    /// Detects suspected tampering regions in a decoded residual.
    ///
    /// The residual is reduced to single-channel intensity first. Regions
    /// come back in label-assignment order (raster order of their first
    /// pixel); the coarse strategy returns at most one region.
    pub fn detect(&self, residual: &DynamicImage) -> Vec<Region> {
        let gray = residual.to_luma8();
        let regions = match self.strategy {
            LabelingStrategy::ConnectedComponents => self.labeled_regions(&gray),
            LabelingStrategy::CoarseBoundingBox => self.coarse_region(&gray),
        };
        debug!(
            strategy = ?self.strategy,
            count = regions.len(),
            "extracted tamper regions"
        );
        regions
    }

    fn labeled_regions(&self, gray: &GrayImage) -> Vec<Region> {
        let mut mask = GrayImage::new(gray.width(), gray.height());
        for (x, y, pixel) in gray.enumerate_pixels() {
            if pixel[0] > self.threshold {
                mask.put_pixel(x, y, Luma([255u8]));
            }
        }

        let labels = connected_components(&mask, Connectivity::Eight, Luma([0u8]));

        let mut components: Vec<ComponentStats> = Vec::new();
        for (x, y, label) in labels.enumerate_pixels() {
            let label = label[0] as usize;
            if label == 0 {
                continue;
            }
            if label > components.len() {
                components.resize(label, ComponentStats::new());
            }
            components[label - 1].add(x, y, gray.get_pixel(x, y)[0]);
        }

        components
            .into_iter()
            .filter(|c| c.count as usize > self.min_region_pixels)
            .map(ComponentStats::into_region)
            .collect()
    }

    fn coarse_region(&self, gray: &GrayImage) -> Vec<Region> {
        let mut stats = ComponentStats::new();
        for (x, y, pixel) in gray.enumerate_pixels() {
            if pixel[0] > self.threshold {
                stats.add(x, y, pixel[0]);
            }
        }

        if stats.count == 0 {
            return Vec::new();
        }
        vec![stats.into_region()]
    }
}
