//! Histogram construction and PNG rendering.

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, Rgb, RgbImage};

use exotrack_models::DatasetField;

use crate::error::{WorkerError, WorkerResult};

const IMAGE_WIDTH: u32 = 800;
const IMAGE_HEIGHT: u32 = 600;
const MARGIN_LEFT: u32 = 60;
const MARGIN_RIGHT: u32 = 20;
const MARGIN_TOP: u32 = 20;
const MARGIN_BOTTOM: u32 = 40;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([0, 0, 0]);
const BAR: Rgb<u8> = Rgb([70, 130, 180]);

/// Default bucket count when aggregating anything but discovery year.
pub const DEFAULT_BUCKET_COUNT: usize = 20;

/// Ceiling on the bucket count for discovery-year histograms.
///
/// Year windows are unvalidated at submission time, so the span can be
/// anything i64 holds; the bucket vector must stay small regardless.
pub const MAX_BUCKET_COUNT: usize = 1000;

/// Bucket count for a job's aggregation field and year window.
///
/// Discovery-year histograms use one bucket per year of the window,
/// with a floor of one so a single-year (or inverted) window still
/// produces a valid histogram, and a ceiling of `MAX_BUCKET_COUNT` so
/// an extreme window cannot demand an absurd allocation.
pub fn bucket_count_for(field: DatasetField, start_date: i64, end_date: i64) -> usize {
    match field {
        DatasetField::DiscoveryYear => end_date
            .saturating_sub(start_date)
            .clamp(1, MAX_BUCKET_COUNT as i64) as usize,
        _ => DEFAULT_BUCKET_COUNT,
    }
}

/// Bucket counts of a value distribution over `[min, max]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    min: f64,
    max: f64,
    counts: Vec<u64>,
}

impl Histogram {
    /// Bucket `values` into `bucket_count` equal-width buckets.
    ///
    /// An empty input yields all-zero buckets over the unit range. The
    /// maximum value lands in the last bucket.
    pub fn build(values: &[f64], bucket_count: usize) -> Self {
        let n = bucket_count.max(1);
        let mut counts = vec![0u64; n];

        if values.is_empty() {
            return Self {
                min: 0.0,
                max: 1.0,
                counts,
            };
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in values {
            min = min.min(v);
            max = max.max(v);
        }
        // Degenerate range when every value is identical
        let max = if max > min { max } else { min + 1.0 };

        let width = (max - min) / n as f64;
        for &v in values {
            let index = (((v - min) / width) as usize).min(n - 1);
            counts[index] += 1;
        }

        Self { min, max, counts }
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Render the bucket counts as a PNG bar chart.
    ///
    /// The encoding is fully deterministic: identical bucket counts
    /// always produce identical bytes.
    pub fn render_png(&self) -> WorkerResult<Vec<u8>> {
        let mut img = RgbImage::from_pixel(IMAGE_WIDTH, IMAGE_HEIGHT, BACKGROUND);

        let plot_left = MARGIN_LEFT;
        let plot_right = IMAGE_WIDTH - MARGIN_RIGHT;
        let plot_top = MARGIN_TOP;
        let plot_bottom = IMAGE_HEIGHT - MARGIN_BOTTOM;
        let plot_width = plot_right - plot_left;
        let plot_height = plot_bottom - plot_top;

        // Axes
        for x in plot_left..=plot_right {
            img.put_pixel(x, plot_bottom, AXIS);
        }
        for y in plot_top..=plot_bottom {
            img.put_pixel(plot_left, y, AXIS);
        }

        let peak = self.counts.iter().copied().max().unwrap_or(0);
        if peak > 0 {
            let n = self.counts.len() as u32;
            for (i, &count) in self.counts.iter().enumerate() {
                if count == 0 {
                    continue;
                }
                let x0 = plot_left + 1 + (i as u32 * plot_width) / n;
                let x1 = plot_left + ((i as u32 + 1) * plot_width) / n;
                let bar_height =
                    ((count as f64 / peak as f64) * (plot_height as f64 - 1.0)) as u32;
                let y0 = plot_bottom - 1 - bar_height;
                for x in x0..x1 {
                    for y in y0..plot_bottom {
                        img.put_pixel(x, y, BAR);
                    }
                }
            }
        }

        let mut buf = Vec::new();
        PngEncoder::new(&mut buf)
            .write_image(img.as_raw(), IMAGE_WIDTH, IMAGE_HEIGHT, ColorType::Rgb8)
            .map_err(|e| WorkerError::render_failed(e.to_string()))?;
        Ok(buf)
    }
}
