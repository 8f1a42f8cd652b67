//! Raw video frame container.

/// One decoded video frame in packed RGB8 layout.
///
/// This is the unit handed from the frame source to the pose detector. The
/// pipeline itself never inspects pixels; it only forwards frames that the
/// sampler selected.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Packed RGB8 pixel data, row-major, `width * height * 3` bytes.
    pub data: Vec<u8>,
}

impl VideoFrame {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// RGB triple at pixel coordinates, clamped to the frame bounds.
    pub fn rgb_at(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let x = x.min(self.width.saturating_sub(1));
        let y = y.min(self.height.saturating_sub(1));
        let offset = (y as usize * self.width as usize + x as usize) * 3;
        match self.data.get(offset..offset + 3) {
            Some(px) => (px[0], px[1], px[2]),
            None => (0, 0, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_at_clamps_to_bounds() {
        let frame = VideoFrame::new(2, 2, vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120]);
        assert_eq!(frame.rgb_at(0, 0), (10, 20, 30));
        assert_eq!(frame.rgb_at(1, 1), (100, 110, 120));
        // Out-of-bounds coordinates clamp to the last pixel.
        assert_eq!(frame.rgb_at(5, 5), (100, 110, 120));
    }

    #[test]
    fn test_rgb_at_short_buffer_is_black() {
        let frame = VideoFrame::new(2, 2, vec![1, 2, 3]);
        assert_eq!(frame.rgb_at(1, 1), (0, 0, 0));
    }
}
