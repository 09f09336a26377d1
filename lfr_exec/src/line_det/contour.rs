//! Contour extraction and polygon moments

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use image::{imageops::replace, GrayImage};
use imageproc::{
    contours::{find_contours, BorderType},
    point::Point,
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Zeroth and first order area moments of a closed polygon.
///
/// Moments are signed, their sign depending on the winding of the polygon. The centroid is
/// independent of the winding.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PolygonMoments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl PolygonMoments {
    /// Compute the moments of the closed polygon with the given vertices using Green's theorem.
    pub fn from_points(points: &[Point<i32>]) -> Self {
        let mut moments = Self::default();

        if points.len() < 3 {
            return moments
        }

        for (i, p0) in points.iter().enumerate() {
            let p1 = &points[(i + 1) % points.len()];
            let (x0, y0) = (p0.x as f64, p0.y as f64);
            let (x1, y1) = (p1.x as f64, p1.y as f64);

            let cross = x0 * y1 - x1 * y0;

            moments.m00 += cross;
            moments.m10 += (x0 + x1) * cross;
            moments.m01 += (y0 + y1) * cross;
        }

        moments.m00 /= 2.0;
        moments.m10 /= 6.0;
        moments.m01 /= 6.0;

        moments
    }

    /// Unsigned area enclosed by the polygon.
    pub fn area(&self) -> f64 {
        self.m00.abs()
    }

    /// Centroid of the polygon, or `None` if the polygon encloses no area.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.m00 == 0.0 {
            None
        } else {
            Some((self.m10 / self.m00, self.m01 / self.m00))
        }
    }
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Find the outer borders of the regions of `mask`, ignoring any region which lies inside a hole
/// of another region.
///
/// Regions touching the edge of the mask are found too. `find_contours` skips any region touching
/// the first column, so the mask is traced inside a one pixel background frame and the points are
/// shifted back into mask coordinates.
pub fn external_contours(mask: &GrayImage) -> Vec<Vec<Point<i32>>> {
    let mut padded = GrayImage::new(mask.width() + 2, mask.height() + 2);
    replace(&mut padded, mask, 1, 1);

    find_contours::<i32>(&padded)
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .map(|c| {
            c.points
                .into_iter()
                .map(|p| Point::new(p.x - 1, p.y - 1))
                .collect()
        })
        .collect()
}

/// Select the contour enclosing the largest area, returning it with its moments.
pub fn largest_contour(
    contours: Vec<Vec<Point<i32>>>
) -> Option<(Vec<Point<i32>>, PolygonMoments)> {
    contours
        .into_iter()
        .map(|c| {
            let moments = PolygonMoments::from_points(&c);
            (c, moments)
        })
        .fold(None, |best, (c, m)| match best {
            Some((_, ref best_m)) if best_m.area() >= m.area() => best,
            _ => Some((c, m)),
        })
}
