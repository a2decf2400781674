//! Per-pixel radiance accumulation.

use raychi_math::Color;
use std::sync::atomic::{AtomicU32, Ordering};

/// `f32` stored as bits, with atomic addition.
#[derive(Debug, Default)]
struct AtomicF32(AtomicU32);

impl AtomicF32 {
    fn add(&self, value: f32) {
        // The closure always returns Some, so the update cannot fail.
        let _ = self
            .0
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |bits| {
                Some((f32::from_bits(bits) + value).to_bits())
            });
    }

    fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }
}

/// Shared accumulator that every pass adds radiance into.
///
/// Contributions are only ever added, so concurrent writers commute.
pub struct Film {
    width: u32,
    height: u32,
    pixels: Vec<[AtomicF32; 3]>,
}

impl Film {
    /// Create a black film.
    pub fn new(width: u32, height: u32) -> Self {
        let count = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: (0..count).map(|_| Default::default()).collect(),
        }
    }

    /// Add a contribution to pixel `index` (row-major).
    pub fn add(&self, index: usize, color: Color) {
        debug_assert!(
            color.min_element() >= 0.0,
            "negative contribution {:?} to pixel {}",
            color,
            index
        );
        if color == Color::ZERO {
            return;
        }
        let pixel = &self.pixels[index];
        pixel[0].add(color.x);
        pixel[1].add(color.y);
        pixel[2].add(color.z);
    }

    /// Current accumulated sum at pixel `index`.
    pub fn get(&self, index: usize) -> Color {
        let pixel = &self.pixels[index];
        Color::new(pixel[0].load(), pixel[1].load(), pixel[2].load())
    }

    /// Divide every pixel by `samples` to get mean radiance.
    pub fn into_image(self, samples: u32) -> ImageBuffer {
        let scale = 1.0 / samples.max(1) as f32;
        let pixels = (0..self.pixels.len())
            .map(|index| self.get(index) * scale)
            .collect();
        ImageBuffer {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

/// Final image: row-major linear radiance, one `Color` per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Mean of all pixels.
    pub fn mean(&self) -> Color {
        if self.pixels.is_empty() {
            return Color::ZERO;
        }
        self.pixels.iter().copied().sum::<Color>() / self.pixels.len() as f32
    }
}
