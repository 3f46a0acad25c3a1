//! Overlay rendering for detected lines.
use super::GrayImageU8;
use crate::hough::Line2d;
use image::{Rgb, RgbImage};

/// Expand a grayscale buffer to RGB so colored overlays can be drawn on it.
pub fn gray_to_rgb(gray: &GrayImageU8) -> RgbImage {
    let (w, h) = (gray.width(), gray.height());
    let data = gray.data();
    RgbImage::from_fn(w as u32, h as u32, |x, y| {
        let v = data[y as usize * w + x as usize];
        Rgb([v, v, v])
    })
}

/// Draw every line that intersects the image, using its clipped endpoints.
pub fn draw_lines(canvas: &mut RgbImage, lines: &[Line2d], color: Rgb<u8>) {
    for line in lines {
        if let Some([p0, p1]) = line.endpoints() {
            draw_segment(
                canvas,
                p0[0].round() as i32,
                p0[1].round() as i32,
                p1[0].round() as i32,
                p1[1].round() as i32,
                color,
            );
        }
    }
}

/// Bresenham segment; pixels outside the canvas are skipped.
pub fn draw_segment(canvas: &mut RgbImage, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb<u8>) {
    let (w, h) = (canvas.width() as i32, canvas.height() as i32);
    let (mut x, mut y) = (x0, y0);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if (0..w).contains(&x) && (0..h).contains(&y) {
            canvas.put_pixel(x as u32, y as u32, color);
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hough::{Accumulator, Peak};

    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    #[test]
    fn gray_expands_to_equal_channels() {
        let gray = GrayImageU8::new(2, 1, vec![10, 200]).unwrap();
        let rgb = gray_to_rgb(&gray);
        assert_eq!(rgb.get_pixel(1, 0), &Rgb([200, 200, 200]));
    }

    #[test]
    fn horizontal_line_paints_full_row() {
        let (w, h) = (16usize, 10usize);
        let acc = Accumulator::new(w, h, 180, 1.0);
        let peak = Peak {
            theta_bin: 90,
            rho_bin: acc.rho_bin(4.0).unwrap(),
            votes: 16,
        };
        let line = Line2d::from_peak(&acc, peak, w, h);
        let mut canvas = RgbImage::new(w as u32, h as u32);
        draw_lines(&mut canvas, &[line], RED);
        for x in 0..w as u32 {
            assert_eq!(canvas.get_pixel(x, 4), &RED);
            assert_eq!(canvas.get_pixel(x, 5), &Rgb([0, 0, 0]));
        }
    }

    #[test]
    fn segment_partly_outside_is_clipped() {
        let mut canvas = RgbImage::new(4, 4);
        draw_segment(&mut canvas, -3, -3, 6, 6, RED);
        for i in 0..4 {
            assert_eq!(canvas.get_pixel(i, i), &RED);
        }
        assert_eq!(canvas.get_pixel(0, 3), &Rgb([0, 0, 0]));
    }
}
