// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rectification — warp the document quadrilateral onto the target page.

use flatscan_core::{CornerQuad, TargetRectangle};
use image::RgbImage;
use tracing::{debug, instrument, warn};

use crate::backend::VisionBackend;

/// Warp `image` so the quad's corners land on the target page's corners.
///
/// The output is always exactly `target.width x target.height`. Corner
/// validity is not checked here; a degenerate quad gives a meaningless but
/// correctly sized page, and a quad the solver rejects outright gives a
/// blank (black) page.
#[instrument(skip_all, fields(width = target.width, height = target.height))]
pub fn rectify<B: VisionBackend>(
    backend: &B,
    image: &RgbImage,
    quad: &CornerQuad,
    target: TargetRectangle,
) -> RgbImage {
    let size = (target.width, target.height);

    match backend.compute_homography(&quad.points(), &target.corners()) {
        Some(transform) => {
            let page = backend.warp_image(image, &transform, size);
            if page.dimensions() == size {
                debug!("Page warped");
                page
            } else {
                warn!(
                    got_w = page.width(),
                    got_h = page.height(),
                    "Warp returned the wrong size; substituting a blank page"
                );
                RgbImage::new(target.width, target.height)
            }
        }
        None => {
            warn!(
                corners = ?quad.points(),
                "Homography rejected the document quad; producing a blank page"
            );
            RgbImage::new(target.width, target.height)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SegmentParams;
    use flatscan_core::{Corner, Point, Result};
    use image::{DynamicImage, GrayImage, Rgb};
    use std::cell::RefCell;
    use std::path::Path;

    /// Records what it was asked and fills pages with a marker colour.
    #[derive(Default)]
    struct RecordingBackend {
        reject: bool,
        seen: RefCell<Option<([Point; 4], [Point; 4])>>,
    }

    impl VisionBackend for RecordingBackend {
        type Transform = ();

        fn edge_detect(&self, gray: &GrayImage) -> GrayImage {
            gray.clone()
        }

        fn detect_line_segments(&self, _: &GrayImage, _: &SegmentParams) -> Vec<(Point, Point)> {
            Vec::new()
        }

        fn compute_homography(&self, from: &[Point; 4], to: &[Point; 4]) -> Option<()> {
            *self.seen.borrow_mut() = Some((*from, *to));
            (!self.reject).then_some(())
        }

        fn warp_image(&self, _: &RgbImage, _: &(), size: (u32, u32)) -> RgbImage {
            RgbImage::from_pixel(size.0, size.1, Rgb([1, 2, 3]))
        }

        fn read_image(&self, _: &Path) -> Result<DynamicImage> {
            unreachable!("not used by rectify")
        }

        fn write_image(&self, _: &Path, _: &DynamicImage) -> Result<()> {
            unreachable!("not used by rectify")
        }
    }

    fn quad() -> CornerQuad {
        CornerQuad::new(
            Corner::at(Point::new(10.0, 12.0)),
            Corner::at(Point::new(300.0, 8.0)),
            Corner::at(Point::new(5.0, 410.0)),
            Corner::at(Point::new(310.0, 400.0)),
        )
    }

    #[test]
    fn maps_quad_onto_target_corners_in_order() {
        let backend = RecordingBackend::default();
        let target = TargetRectangle { width: 83, height: 117 };
        let page = rectify(&backend, &RgbImage::new(320, 420), &quad(), target);

        assert_eq!(page.dimensions(), (83, 117));
        assert_eq!(page.get_pixel(0, 0), &Rgb([1, 2, 3]));
        let (from, to) = backend.seen.borrow().expect("homography requested");
        assert_eq!(from, quad().points());
        assert_eq!(to, target.corners());
    }

    #[test]
    fn rejected_quad_still_gives_correct_size() {
        let backend = RecordingBackend {
            reject: true,
            ..RecordingBackend::default()
        };
        let target = TargetRectangle { width: 40, height: 60 };
        let page = rectify(&backend, &RgbImage::new(10, 10), &quad(), target);
        assert_eq!(page.dimensions(), (40, 60));
        assert!(page.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn sentinel_corners_are_passed_through() {
        let backend = RecordingBackend::default();
        let degenerate = CornerQuad::new(
            Corner::SENTINEL,
            Corner::SENTINEL,
            Corner::SENTINEL,
            Corner::SENTINEL,
        );
        let target = TargetRectangle { width: 8, height: 11 };
        let page = rectify(&backend, &RgbImage::new(10, 10), &degenerate, target);
        assert_eq!(page.dimensions(), (8, 11));
        let (from, _) = backend.seen.borrow().expect("homography requested");
        assert_eq!(from, [Point::new(-1.0, -1.0); 4]);
    }
}
