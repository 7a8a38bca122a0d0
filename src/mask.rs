use std::io;

use crate::constants::MAX_MASK_WIDTH;
use crate::types::Offset;

// --- Mask: per-pixel opacity bitmap used for exact collision tests ---
// Each row is one u128, bit `x` set when column `x` is opaque, so overlap
// testing is a row-by-row shift and AND.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: usize,
    height: usize,
    rows: Vec<u128>,
}

impl Mask {
    pub fn new(width: usize, height: usize) -> io::Result<Self> {
        if width == 0 || height == 0 {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "mask must not be empty"));
        }
        if width > MAX_MASK_WIDTH {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("mask width {} exceeds {}", width, MAX_MASK_WIDTH),
            ));
        }
        Ok(Mask { width, height, rows: vec![0; height] })
    }

    /// Builds a mask from ASCII art, every art cell becoming a `scale`x`scale`
    /// block. Spaces and dots are transparent, anything else is opaque.
    pub fn from_art(art: &[&str], scale: usize) -> io::Result<Self> {
        let art_width = art.first().map(|row| row.chars().count()).unwrap_or(0);
        if let Some((i, row)) = art.iter().enumerate().find(|(_, row)| row.chars().count() != art_width) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("art row {} is {} wide, expected {}", i, row.chars().count(), art_width),
            ));
        }

        let mut mask = Mask::new(art_width * scale, art.len() * scale)?;
        for (art_y, row) in art.iter().enumerate() {
            for (art_x, c) in row.chars().enumerate() {
                if c == ' ' || c == '.' {
                    continue;
                }
                mask.fill_rect(art_x * scale, art_y * scale, (art_x + 1) * scale, (art_y + 1) * scale);
            }
        }
        Ok(mask)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && (self.rows[y] >> x) & 1 == 1
    }

    pub fn set(&mut self, x: usize, y: usize) {
        if x < self.width && y < self.height {
            self.rows[y] |= 1u128 << x;
        }
    }

    /// Sets every pixel in `[x0, x1) x [y0, y1)`, clipped to the mask.
    pub fn fill_rect(&mut self, x0: usize, y0: usize, x1: usize, y1: usize) {
        for y in y0..y1.min(self.height) {
            for x in x0..x1.min(self.width) {
                self.set(x, y);
            }
        }
    }

    pub fn count(&self) -> usize {
        self.rows.iter().map(|row| row.count_ones() as usize).sum()
    }

    pub fn flipped_vertical(&self) -> Self {
        let mut rows = self.rows.clone();
        rows.reverse();
        Mask { width: self.width, height: self.height, rows }
    }

    /// Rotates counterclockwise by `degrees` about the center. The result is
    /// sized to the rotated bounding box, nearest-neighbour sampled.
    pub fn rotated(&self, degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (w, h) = (self.width as f64, self.height as f64);
        let bound = |a: f64, b: f64| ((a * cos.abs() + b * sin.abs()) - 1e-6).ceil().max(1.0) as usize;
        // Wider boxes lose their rightmost columns.
        let new_width = bound(w, h).min(MAX_MASK_WIDTH);
        let new_height = bound(h, w);

        let mut rotated = Mask { width: new_width, height: new_height, rows: vec![0; new_height] };
        let (half_w, half_h) = (new_width as f64 / 2.0, new_height as f64 / 2.0);
        for y in 0..new_height {
            for x in 0..new_width {
                let rx = x as f64 + 0.5 - half_w;
                let ry = y as f64 + 0.5 - half_h;
                let sx = rx * cos - ry * sin + w / 2.0;
                let sy = rx * sin + ry * cos + h / 2.0;
                if sx >= 0.0 && sy >= 0.0 && self.get(sx as usize, sy as usize) {
                    rotated.set(x, y);
                }
            }
        }
        rotated
    }

    /// True when any opaque pixel of `other`, placed with its top-left at
    /// `offset` relative to this mask's top-left, lands on an opaque pixel
    /// of this mask.
    pub fn overlap(&self, other: &Mask, (dx, dy): Offset) -> bool {
        let y_start = dy.max(0);
        let y_end = (dy + other.height as i32).min(self.height as i32);
        (y_start..y_end).any(|y| {
            let theirs = other.rows[(y - dy) as usize];
            let shifted = if dx >= 0 {
                theirs.checked_shl(dx as u32)
            } else {
                theirs.checked_shr(dx.unsigned_abs())
            }
            .unwrap_or(0);
            self.rows[y as usize] & shifted != 0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn block(width: usize, height: usize) -> Mask {
        let mut mask = Mask::new(width, height).unwrap();
        mask.fill_rect(0, 0, width, height);
        mask
    }

    #[test]
    fn from_art_scales_each_cell() {
        let mask = Mask::from_art(&["#.", ".#"], 3).unwrap();
        assert_eq!(mask.width(), 6);
        assert_eq!(mask.height(), 6);
        assert_eq!(mask.count(), 18);
        assert!(mask.get(2, 2));
        assert!(!mask.get(3, 2));
        assert!(mask.get(3, 3));
    }

    #[test]
    fn from_art_rejects_ragged_rows() {
        let err = Mask::from_art(&["###", "##"], 1).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn from_art_rejects_oversized_art() {
        let wide = "#".repeat(40);
        assert!(Mask::from_art(&[wide.as_str()], 4).is_err());
    }

    #[test]
    fn overlap_detects_shared_pixel_only() {
        let a = block(10, 10);
        let b = block(4, 4);
        assert!(a.overlap(&b, (9, 9)));
        assert!(!a.overlap(&b, (10, 0)));
        assert!(!a.overlap(&b, (0, 10)));
        assert!(a.overlap(&b, (-3, -3)));
        assert!(!a.overlap(&b, (-4, 0)));
    }

    #[test]
    fn overlap_ignores_transparent_pixels() {
        let ring = Mask::from_art(&["###", "#.#", "###"], 1).unwrap();
        let dot = block(1, 1);
        assert!(!ring.overlap(&dot, (1, 1)));
        assert!(ring.overlap(&dot, (0, 1)));
    }

    #[test]
    fn overlap_far_away_is_false() {
        let a = block(100, 10);
        let b = block(100, 10);
        assert!(!a.overlap(&b, (500, 0)));
        assert!(!a.overlap(&b, (-500, 0)));
    }

    #[test]
    fn rotate_zero_is_identity() {
        let mask = Mask::from_art(&["##..", ".###"], 2).unwrap();
        assert_eq!(mask.rotated(0.0), mask);
    }

    #[test]
    fn rotate_quarter_turn_swaps_dimensions() {
        let mask = Mask::from_art(&["####", "#..."], 1).unwrap();
        let rotated = mask.rotated(90.0);
        assert_eq!(rotated.width(), 2);
        assert_eq!(rotated.height(), 4);
        assert_eq!(rotated.count(), mask.count());
        // Counterclockwise: the long top edge becomes the left column.
        assert!(rotated.get(0, 0) && rotated.get(0, 3));
        assert!(rotated.get(1, 3));
        assert!(!rotated.get(1, 0));
    }

    #[test]
    fn flip_reverses_rows() {
        let mask = Mask::from_art(&["#.", ".."], 1).unwrap();
        let flipped = mask.flipped_vertical();
        assert!(flipped.get(0, 1));
        assert!(!flipped.get(0, 0));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(w1 in 1usize..60, h1 in 1usize..60, w2 in 1usize..60, h2 in 1usize..60,
                                dx in -80i32..80, dy in -80i32..80) {
            let a = block(w1, h1);
            let b = block(w2, h2);
            prop_assert_eq!(a.overlap(&b, (dx, dy)), b.overlap(&a, (-dx, -dy)));
        }

        #[test]
        fn full_blocks_overlap_iff_rects_intersect(w1 in 1usize..60, h1 in 1usize..60, w2 in 1usize..60,
                                                   h2 in 1usize..60, dx in -80i32..80, dy in -80i32..80) {
            let a = block(w1, h1);
            let b = block(w2, h2);
            let intersects = dx < w1 as i32 && dx + (w2 as i32) > 0 && dy < h1 as i32 && dy + (h2 as i32) > 0;
            prop_assert_eq!(a.overlap(&b, (dx, dy)), intersects);
        }
    }
}
