//! Tile partitioning of the image.
//!
//! Each tile is rendered as an independent unit with its own ray and
//! ambient pools, so a tile's memory use is bounded by the pool capacities
//! regardless of image size.

use raychi_core::TileOrder;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// X coordinate of the tile's top-left corner
    pub x: u32,
    /// Y coordinate of the tile's top-left corner
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Index of this tile in the render order
    pub index: usize,
}

impl Tile {
    /// Create a new tile.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this tile.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Image coordinates of the `local`-th pixel, row-major within the tile.
    pub fn pixel(&self, local: usize) -> (u32, u32) {
        let local = local as u32;
        (self.x + local % self.width, self.y + local / self.width)
    }
}

/// Partition an image into tiles of at most `tile_width × tile_height`.
///
/// Edge tiles are clipped to the image. Indices follow the returned order.
pub fn generate_tiles(
    width: u32,
    height: u32,
    tile_width: u32,
    tile_height: u32,
    order: TileOrder,
) -> Vec<Tile> {
    let tile_width = tile_width.max(1);
    let tile_height = tile_height.max(1);
    let mut tiles = Vec::new();

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let tw = tile_width.min(width - x);
            let th = tile_height.min(height - y);
            tiles.push(Tile::new(x, y, tw, th, tiles.len()));
            x += tile_width;
        }
        y += tile_height;
    }

    if order == TileOrder::Spiral {
        sort_spiral(&mut tiles, width, height);
        for (i, tile) in tiles.iter_mut().enumerate() {
            tile.index = i;
        }
    }

    tiles
}

/// Sort tiles by distance from the image centre.
fn sort_spiral(tiles: &mut [Tile], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let distance = |t: &Tile| {
        let cx = t.x as f32 + t.width as f32 / 2.0;
        let cy = t.y as f32 + t.height as f32 / 2.0;
        (cx - center_x).powi(2) + (cy - center_y).powi(2)
    };

    tiles.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_tiles_exact_fit() {
        let tiles = generate_tiles(128, 128, 64, 64, TileOrder::Raster);
        assert_eq!(tiles.len(), 4); // 2x2 grid

        let total_pixels: usize = tiles.iter().map(|t| t.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_tiles_partial_fit() {
        let tiles = generate_tiles(100, 50, 64, 16, TileOrder::Raster);
        assert_eq!(tiles.len(), 2 * 4);

        let total_pixels: usize = tiles.iter().map(|t| t.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 50);

        let last = tiles.last().unwrap();
        assert_eq!((last.x, last.y, last.width, last.height), (64, 48, 36, 2));
    }

    #[test]
    fn test_raster_order() {
        let tiles = generate_tiles(32, 32, 16, 16, TileOrder::Raster);
        let origins: Vec<_> = tiles.iter().map(|t| (t.x, t.y)).collect();
        assert_eq!(origins, vec![(0, 0), (16, 0), (0, 16), (16, 16)]);
        assert!(tiles.iter().enumerate().all(|(i, t)| t.index == i));
    }

    #[test]
    fn test_spiral_order() {
        let tiles = generate_tiles(192, 192, 64, 64, TileOrder::Spiral);
        assert_eq!(tiles.len(), 9); // 3x3 grid

        // First tile should be the center one
        assert_eq!((tiles[0].x, tiles[0].y), (64, 64));
        assert_eq!(tiles[0].index, 0);
    }

    #[test]
    fn test_tile_pixels_cover_region() {
        let tile = Tile::new(10, 20, 3, 2, 0);
        let pixels: Vec<_> = (0..tile.pixel_count()).map(|i| tile.pixel(i)).collect();
        assert_eq!(
            pixels,
            vec![(10, 20), (11, 20), (12, 20), (10, 21), (11, 21), (12, 21)]
        );
    }
}
