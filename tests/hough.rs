mod common;

use canny_hough::hough::{detect_lines, hough_accumulate, Accumulator};
use canny_hough::image::{EdgeMap, ImageU8};
use canny_hough::PipelineError;
use common::synthetic_image::edge_map_from;

fn empty_acc() -> Accumulator {
    Accumulator::new(1, 1, 1, 1.0)
}

#[test]
fn diagonal_line_votes_into_one_cell() {
    let n = 40;
    let pixels: Vec<(usize, usize)> = (0..n).map(|i| (i + 5, i + 5)).collect();
    let edges = edge_map_from(64, 64, &pixels);
    let acc = hough_accumulate(&edges, 180, 1.0).unwrap();
    let (t, r, votes) = acc.max_cell().unwrap();
    assert!(votes.abs_diff(n as u32) <= 1, "votes={votes}");
    assert!(t.abs_diff(135) <= 1, "theta bin {t}");
    assert!(acc.rho_of(r).abs() <= 1.0, "rho {}", acc.rho_of(r));
}

#[test]
fn horizontal_segment_matches_its_parameters() {
    let pixels: Vec<(usize, usize)> = (3..53).map(|x| (x, 17)).collect();
    let edges = edge_map_from(64, 48, &pixels);
    let mut acc = empty_acc();
    let lines = detect_lines(&edges, Some(&mut acc), 30, 10).unwrap();
    assert_eq!(acc.max_cell().map(|c| c.2), Some(50));
    let best = &lines[0];
    assert_eq!(best.votes(), 50);
    assert_eq!(best.theta_bin(), 90);
    assert!((best.rho() - 17.0).abs() <= 1.0);
    assert!(best.distance_to(30.0, 17.0) < 1.0);
}

#[test]
fn single_pixel_needs_min_votes_of_one() {
    let edges = edge_map_from(20, 20, &[(7, 5)]);
    assert!(detect_lines(&edges, None, 2, 0).unwrap().is_empty());

    let mut acc = empty_acc();
    let lines = detect_lines(&edges, Some(&mut acc), 1, 0).unwrap();
    assert_eq!(lines.len(), acc.theta_bins());
    assert!(lines.iter().all(|l| l.votes() == 1));
    let mut bins: Vec<usize> = lines.iter().map(|l| l.theta_bin()).collect();
    bins.sort_unstable();
    bins.dedup();
    assert_eq!(bins.len(), 180);
    for line in &lines {
        assert!(line.distance_to(7.0, 5.0) <= 0.5 + 1e-4);
    }
}

#[test]
fn accepted_peaks_respect_radius() {
    let mut pixels = Vec::new();
    for k in 0..5 {
        let c = 8 + 12 * k;
        pixels.extend((2..70).map(|x| (x, c)));
        pixels.extend((2..70).map(|y| (c, y)));
    }
    let edges = edge_map_from(72, 72, &pixels);
    let radius = 6;
    let lines = detect_lines(&edges, None, 40, radius).unwrap();
    assert!(lines.len() >= 10, "found {}", lines.len());
    for (i, a) in lines.iter().enumerate() {
        for b in &lines[i + 1..] {
            let d = a
                .theta_bin()
                .abs_diff(b.theta_bin())
                .max(a.rho_bin().abs_diff(b.rho_bin()));
            assert!(d > radius as usize, "{a} and {b} are {d} bins apart");
        }
    }
    assert!(lines.windows(2).all(|w| w[0].votes() >= w[1].votes()));
}

#[test]
fn invalid_parameters_fail_before_voting() {
    let edges = edge_map_from(10, 10, &[(1, 1)]);
    for (votes, radius) in [(0, 1), (-3, 1), (1, -1)] {
        assert!(matches!(
            detect_lines(&edges, None, votes, radius),
            Err(PipelineError::InvalidParameters { .. })
        ));
    }
}

#[test]
fn blank_edge_map_is_not_an_error() {
    let edges = EdgeMap::new(30, 20);
    assert!(detect_lines(&edges, None, 1, 0).unwrap().is_empty());
}

#[test]
fn thresholded_gray_image_feeds_hough() {
    let (w, h) = (32usize, 24usize);
    let mut gray = vec![0u8; w * h];
    for y in 0..h {
        gray[y * w + 11] = 255;
    }
    let view = ImageU8 {
        w,
        h,
        stride: w,
        data: &gray,
    };
    let edges = EdgeMap::from_gray(&view, 127);
    let lines = detect_lines(&edges, None, 20, 5).unwrap();
    assert!(!lines.is_empty());
    // θ does not wrap, so the same column may also show up near θ = π.
    for line in &lines {
        assert!(line.distance_to(11.0, 0.0) < 1.0, "{line}");
        assert!(line.distance_to(11.0, 23.0) < 1.0, "{line}");
    }
    assert_eq!(lines[0].theta_bin(), 0);
    assert!((lines[0].rho() - 11.0).abs() < 1e-4);
    assert_eq!(lines[0].endpoints(), Some([[11.0, 0.0], [11.0, 23.0]]));
}
