//! Geometric primitives shared by both pipelines.

use serde::{Deserialize, Serialize};

/// An axis-aligned region in image pixel coordinates, origin top-left.
///
/// Both pipelines emit these: the OCR pipeline for candidate text lines
/// (ranked by bounding-box area) and the ELA pipeline for suspected tamper
/// regions (area is the member-pixel count and `avg_intensity` is set).
/// Regions are transient per-request values, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Left edge of the region.
    pub x: u32,
    /// Top edge of the region.
    pub y: u32,
    /// Horizontal extent in pixels.
    pub width: u32,
    /// Vertical extent in pixels.
    pub height: u32,
    /// Pixel population: bounding-box area for text regions, member-pixel
    /// count for tamper regions.
    pub area: u64,
    /// Mean intensity over member pixels. Only tamper regions carry this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_intensity: Option<f64>,
}

impl Region {
    /// Creates a region without an intensity reading.
    pub fn new(x: u32, y: u32, width: u32, height: u32, area: u64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            area,
            avg_intensity: None,
        }
    }

    /// Creates a region with a mean-intensity reading over its member pixels.
    pub fn with_intensity(
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        area: u64,
        avg_intensity: f64,
    ) -> Self {
        Self {
            x,
            y,
            width,
            height,
            area,
            avg_intensity: Some(avg_intensity),
        }
    }

    /// Rightmost x coordinate covered by the region's extent.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Bottommost y coordinate covered by the region's extent.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_extents() {
        let region = Region::new(10, 20, 30, 15, 450);
        assert_eq!(region.right(), 40);
        assert_eq!(region.bottom(), 35);
        assert!(region.avg_intensity.is_none());
    }

    #[test]
    fn test_intensity_only_serialized_when_present() {
        let plain = serde_json::to_value(Region::new(0, 0, 5, 5, 25)).expect("serialize");
        assert!(plain.get("avg_intensity").is_none());

        let scored =
            serde_json::to_value(Region::with_intensity(0, 0, 5, 5, 25, 127.5)).expect("serialize");
        assert_eq!(scored["avg_intensity"], 127.5);
    }
}
