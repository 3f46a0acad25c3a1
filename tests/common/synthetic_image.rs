use canny_hough::image::EdgeMap;

/// Vertical step edge at column `x0` with a one-pixel ramp (0 | 100 | 200),
/// so the gradient has a unique maximum on the edge column.
pub fn vertical_ramp_u8(width: usize, height: usize, x0: usize) -> Vec<u8> {
    assert!(x0 < width, "edge column must lie inside the image");
    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in x0..width {
            img[y * width + x] = if x == x0 { 100 } else { 200 };
        }
    }
    img
}

/// Horizontal counterpart of [`vertical_ramp_u8`] at row `y0`.
pub fn horizontal_ramp_u8(width: usize, height: usize, y0: usize) -> Vec<u8> {
    assert!(y0 < height, "edge row must lie inside the image");
    let mut img = vec![0u8; width * height];
    for y in y0..height {
        let v = if y == y0 { 100 } else { 200 };
        img[y * width..(y + 1) * width].fill(v);
    }
    img
}

/// Bright disc on a dark background with deterministic pseudo-random noise.
pub fn noisy_disc_u8(width: usize, height: usize, radius: f32, noise: u8, seed: u32) -> Vec<u8> {
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    let mut state = seed;
    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let jitter = if noise == 0 {
                0
            } else {
                ((state >> 16) % (2 * noise as u32 + 1)) as i32 - noise as i32
            };
            let (dx, dy) = (x as f32 - cx, y as f32 - cy);
            let base = if dx * dx + dy * dy <= radius * radius {
                180
            } else {
                50
            };
            img[y * width + x] = (base + jitter).clamp(0, 255) as u8;
        }
    }
    img
}

/// Edge map with the given pixels set.
pub fn edge_map_from(width: usize, height: usize, pixels: &[(usize, usize)]) -> EdgeMap {
    let mut edges = EdgeMap::new(width, height);
    for &(x, y) in pixels {
        edges.set(x, y, true);
    }
    edges
}
