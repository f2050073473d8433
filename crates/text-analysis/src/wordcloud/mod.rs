//! Word-cloud rendering
//!
//! Lemma frequency decides glyph scale; words are placed largest first along
//! an Archimedean spiral that starts at a random point and skips positions
//! overlapping earlier words. The raster is encoded as PNG and carried as
//! base64 text in reports.

mod font;

use std::collections::HashMap;
use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Common color definitions
pub mod colors {
    pub const WHITE: [u8; 3] = [255, 255, 255];
    pub const BLACK: [u8; 3] = [0, 0, 0];

    /// Word colors, picked at random per word
    pub const PALETTE: &[[u8; 3]] = &[
        [68, 1, 84],
        [59, 82, 139],
        [33, 145, 140],
        [94, 201, 98],
        [253, 231, 37],
        [229, 89, 52],
        [33, 150, 243],
        [255, 152, 0],
    ];
}

/// Word-cloud rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordCloudConfig {
    pub width: u32,
    pub height: u32,
    pub background: [u8; 3],
    /// Only the most frequent lemmas are drawn
    pub max_words: usize,
    /// Glyph scale of the least frequent word
    pub min_scale: u32,
    /// Glyph scale of the most frequent word
    pub max_scale: u32,
    /// Share of the scale driven by relative frequency, in `[0, 1]`
    pub relative_scaling: f64,
    /// Free pixels kept around every word
    pub margin: u32,
    /// Fixed seed for reproducible layouts
    pub seed: Option<u64>,
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            background: colors::WHITE,
            max_words: 200,
            min_scale: 1,
            max_scale: 12,
            relative_scaling: 0.5,
            margin: 2,
            seed: None,
        }
    }
}

/// A word positioned on the canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedWord {
    pub text: String,
    pub count: usize,
    pub scale: u32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Canvas occupancy with a summed-area table for constant time box queries
struct Occupancy {
    width: u32,
    height: u32,
    filled: Vec<bool>,
    integral: Vec<u32>,
}

impl Occupancy {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            filled: vec![false; (width * height) as usize],
            integral: vec![0; ((width + 1) * (height + 1)) as usize],
        }
    }

    /// Whether the box, grown by `margin` and clipped to the canvas, is empty
    fn is_free(&self, x: u32, y: u32, width: u32, height: u32, margin: u32) -> bool {
        let x0 = x.saturating_sub(margin);
        let y0 = y.saturating_sub(margin);
        let x1 = (x + width + margin).min(self.width);
        let y1 = (y + height + margin).min(self.height);
        let stride = self.width + 1;
        let at = |cx: u32, cy: u32| self.integral[(cy * stride + cx) as usize];
        at(x1, y1) + at(x0, y0) - at(x0, y1) - at(x1, y0) == 0
    }

    fn mark(&mut self, x: u32, y: u32, width: u32, height: u32) {
        for row in y..(y + height).min(self.height) {
            for col in x..(x + width).min(self.width) {
                self.filled[(row * self.width + col) as usize] = true;
            }
        }

        let stride = self.width + 1;
        for row in 0..self.height {
            let mut run = 0;
            for col in 0..self.width {
                run += u32::from(self.filled[(row * self.width + col) as usize]);
                let above = self.integral[(row * stride + col + 1) as usize];
                self.integral[((row + 1) * stride + col + 1) as usize] = above + run;
            }
        }
    }
}

/// Base64 encoded PNG image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordCloudImage(String);

impl WordCloudImage {
    fn from_png(bytes: &[u8]) -> Self {
        Self(STANDARD.encode(bytes))
    }

    pub fn as_base64(&self) -> &str {
        &self.0
    }

    /// Decode back to raw PNG bytes
    pub fn to_png_bytes(&self) -> std::result::Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.0)
    }
}

/// Anything that can turn a normalized word list into an image
pub trait CloudRenderer: Send + Sync {
    /// `None` when there is nothing to draw or the image could not be produced
    fn render(&self, words: &[String]) -> Option<WordCloudImage>;
}

/// Frequency weighted word-cloud renderer
#[derive(Debug, Clone, Default)]
pub struct WordCloud {
    config: WordCloudConfig,
}

impl WordCloud {
    pub fn new(config: WordCloudConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WordCloudConfig {
        &self.config
    }

    /// Lemma counts, most frequent first, ties in first-seen order
    pub fn frequencies(words: &[String]) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (index, word) in words.iter().enumerate() {
            counts.entry(word.as_str()).or_insert((0, index)).0 += 1;
        }

        let mut ranked: Vec<(&str, usize, usize)> = counts
            .into_iter()
            .map(|(word, (count, first))| (word, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        ranked
            .into_iter()
            .map(|(word, count, _)| (word.to_string(), count))
            .collect()
    }

    /// Target scale for a word occurring `count` times when the top word occurs `max_count` times
    fn target_scale(&self, count: usize, max_count: usize) -> u32 {
        let min = self.config.min_scale.max(1) as f64;
        let max = (self.config.max_scale as f64).max(min);
        let rs = self.config.relative_scaling.clamp(0.0, 1.0);
        let weight = count as f64 / max_count.max(1) as f64;
        (min + (max - min) * (rs * weight + (1.0 - rs))).round().max(1.0) as u32
    }

    /// Place words on the canvas
    ///
    /// Scales never increase along the frequency ranking: when a word does not
    /// fit it is shrunk, and every later word is capped at that scale. Layout
    /// stops at the first word that fits nowhere.
    pub fn layout(&self, words: &[String]) -> Vec<PlacedWord> {
        let ranked = Self::frequencies(words);
        let Some(&(_, max_count)) = ranked.first() else {
            return Vec::new();
        };

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut occupancy = Occupancy::new(self.config.width, self.config.height);
        let mut placed: Vec<PlacedWord> = Vec::new();
        let mut ceiling = u32::MAX;

        for (text, count) in ranked.into_iter().take(self.config.max_words) {
            let mut scale = self.target_scale(count, max_count).min(ceiling);

            while scale >= 1 {
                let (width, height) = font::text_size(&text, scale);
                if let Some((x, y)) = self.find_position(&occupancy, width, height, &mut rng) {
                    occupancy.mark(x, y, width, height);
                    placed.push(PlacedWord {
                        text: text.clone(),
                        count,
                        scale,
                        x,
                        y,
                        width,
                        height,
                    });
                    break;
                }
                scale -= 1;
            }

            if scale == 0 {
                tracing::trace!(word = %text, "word cloud full");
                break;
            }
            ceiling = scale;
        }

        placed
    }

    fn find_position(&self, occupancy: &Occupancy, width: u32, height: u32, rng: &mut StdRng) -> Option<(u32, u32)> {
        let canvas_w = self.config.width;
        let canvas_h = self.config.height;
        if width == 0 || height == 0 || width > canvas_w || height > canvas_h {
            return None;
        }

        let max_x = canvas_w - width;
        let max_y = canvas_h - height;
        let start_x = f64::from(rng.gen_range(0..=max_x)) + f64::from(width) / 2.0;
        let start_y = f64::from(rng.gen_range(0..=max_y)) + f64::from(height) / 2.0;

        let aspect = f64::from(canvas_h) / f64::from(canvas_w);
        let max_radius = f64::from(canvas_w).hypot(f64::from(canvas_h));
        let step = 4.0;
        let mut theta: f64 = 0.0;

        loop {
            let radius = step * theta;
            if radius > max_radius {
                return None;
            }

            let cx = start_x + radius * theta.cos();
            let cy = start_y + radius * theta.sin() * aspect;
            let left = cx - f64::from(width) / 2.0;
            let top = cy - f64::from(height) / 2.0;

            if left >= 0.0 && top >= 0.0 {
                let (x, y) = (left as u32, top as u32);
                if x <= max_x && y <= max_y && occupancy.is_free(x, y, width, height, self.config.margin) {
                    return Some((x, y));
                }
            }

            // Roughly constant arc length between samples
            theta += if radius < 1.0 { 0.5 } else { (2.0 / radius).min(0.5) };
        }
    }

    /// Rasterize a layout
    pub fn rasterize(&self, placed: &[PlacedWord]) -> RgbImage {
        let mut img = RgbImage::from_pixel(self.config.width, self.config.height, Rgb(self.config.background));
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        };

        for word in placed {
            let color = Rgb(colors::PALETTE[rng.gen_range(0..colors::PALETTE.len())]);
            font::for_each_pixel(&word.text, word.scale, |dx, dy| {
                let (px, py) = (word.x + dx, word.y + dy);
                if px < img.width() && py < img.height() {
                    img.put_pixel(px, py, color);
                }
            });
        }

        img
    }

    /// Lay out, rasterize and PNG-encode `words`
    pub fn try_render(&self, words: &[String]) -> Result<Option<WordCloudImage>> {
        let placed = self.layout(words);
        if placed.is_empty() {
            return Ok(None);
        }

        let img = self.rasterize(&placed);
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;

        tracing::debug!(words = placed.len(), bytes = bytes.len(), "rendered word cloud");
        Ok(Some(WordCloudImage::from_png(&bytes)))
    }
}

impl CloudRenderer for WordCloud {
    fn render(&self, words: &[String]) -> Option<WordCloudImage> {
        match self.try_render(words) {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!(error = %e, "word cloud generation failed");
                None
            },
        }
    }
}
