//! Candidate text-region detection on document images.
//!
//! Independent of the recognition engine: binarize the page so dark-on-light
//! text becomes foreground, trace external contours, and keep the boxes
//! whose shape plausibly belongs to a text line.

use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use imageproc::contrast::{ThresholdType, otsu_level, threshold};
use itertools::Itertools;
use tracing::debug;

use crate::processors::geometry::Region;

/// Maximum number of regions reported per page.
const MAX_REGIONS: usize = 10;

/// Boxes must be strictly wider than this to count as text.
const MIN_WIDTH: u32 = 20;

/// Boxes must be strictly taller than this to count as text.
const MIN_HEIGHT: u32 = 10;

/// Boxes spanning at least this fraction of the page width are layout
/// artifacts (rules, borders), not text lines.
const MAX_WIDTH_FRACTION: f64 = 0.8;

/// Finds candidate text-bearing bounding boxes on a grayscale page.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRegionDetector;

impl TextRegionDetector {
    /// Creates a detector.
    pub fn new() -> Self {
        Self
    }

    /// Detects candidate text regions, largest first, at most ten.
    ///
    /// The page is binarized with inverted global Otsu thresholding so dark
    /// text becomes foreground, then external contours are extracted and
    /// filtered by the size heuristics. A blank page yields an empty list.
    pub fn detect(&self, gray: &GrayImage) -> Vec<Region> {
        let level = otsu_level(gray);
        let binary = threshold(gray, level, ThresholdType::BinaryInverted);

        let max_width = (f64::from(gray.width()) * MAX_WIDTH_FRACTION) as u32;
        let mut regions = Vec::new();

        for contour in find_contours::<u32>(&binary) {
            if contour.border_type != BorderType::Outer || contour.parent.is_some() {
                continue;
            }
            let Some((min_x, max_x)) = contour.points.iter().map(|p| p.x).minmax().into_option()
            else {
                continue;
            };
            let Some((min_y, max_y)) = contour.points.iter().map(|p| p.y).minmax().into_option()
            else {
                continue;
            };

            let width = max_x - min_x + 1;
            let height = max_y - min_y + 1;
            if width > MIN_WIDTH && height > MIN_HEIGHT && width < max_width {
                let area = u64::from(width) * u64::from(height);
                regions.push(Region::new(min_x, min_y, width, height, area));
            }
        }

        // Stable sort keeps contour order among equal areas.
        regions.sort_by(|a, b| b.area.cmp(&a.area));
        regions.truncate(MAX_REGIONS);

        debug!(count = regions.len(), "detected candidate text regions");
        regions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    /// Creates a white page with specified dimensions.
    fn white_page(width: u32, height: u32) -> GrayImage {
        GrayImage::from_pixel(width, height, Luma([255]))
    }

    fn draw_block(page: &mut GrayImage, x: u32, y: u32, width: u32, height: u32) {
        for py in y..y + height {
            for px in x..x + width {
                page.put_pixel(px, py, Luma([0]));
            }
        }
    }

    #[test]
    fn test_blank_page_yields_no_regions() {
        let page = white_page(200, 100);
        assert!(TextRegionDetector::new().detect(&page).is_empty());
    }

    #[test]
    fn test_detects_text_sized_block() {
        let mut page = white_page(200, 100);
        draw_block(&mut page, 50, 40, 30, 15);

        let regions = TextRegionDetector::new().detect(&page);
        assert_eq!(regions.len(), 1);

        let region = regions[0];
        assert_eq!((region.x, region.y), (50, 40));
        assert_eq!((region.width, region.height), (30, 15));
        assert_eq!(region.area, 450);
    }

    #[test]
    fn test_filters_page_width_artifacts() {
        // A rule spanning 90% of the page width must be dropped.
        let mut page = white_page(200, 100);
        draw_block(&mut page, 10, 40, 180, 15);

        assert!(TextRegionDetector::new().detect(&page).is_empty());
    }

    #[test]
    fn test_filters_specks() {
        let mut page = white_page(200, 100);
        draw_block(&mut page, 50, 40, 10, 5);

        assert!(TextRegionDetector::new().detect(&page).is_empty());
    }

    #[test]
    fn test_sorts_by_area_descending_and_caps_count() {
        let mut page = white_page(400, 300);
        // Twelve qualifying blocks of growing area, spaced apart so no two
        // merge into one contour.
        for i in 0..12u32 {
            let width = 22 + 2 * i;
            draw_block(&mut page, 10 + 60 * (i % 6), 20 + 60 * (i / 6), width, 12);
        }

        let regions = TextRegionDetector::new().detect(&page);
        assert_eq!(regions.len(), 10);
        for pair in regions.windows(2) {
            assert!(pair[0].area >= pair[1].area);
        }
    }
}
