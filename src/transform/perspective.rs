//! Projective coefficients from four corner correspondences.

use nalgebra::{Matrix3, SMatrix, SVector, Vector3};

use crate::foundation::core::{CornerQuad, Point};
use crate::foundation::error::{PasteError, PasteResult};

/// The eight coefficients `a..h` of
/// `(x, y) -> ((ax + by + c) / (gx + hy + 1), (dx + ey + f) / (gx + hy + 1))`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PerspectiveCoefficients(pub [f64; 8]);

impl PerspectiveCoefficients {
    /// The identity mapping.
    pub const IDENTITY: Self = Self([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]);

    /// Map a point. `None` when the point lies on the line at infinity.
    #[inline]
    pub fn apply(&self, p: Point) -> Option<Point> {
        let [a, b, c, d, e, f, g, h] = self.0;
        let w = g * p.x + h * p.y + 1.0;
        if w.abs() <= f64::EPSILON {
            return None;
        }
        Some(Point::new(
            (a * p.x + b * p.y + c) / w,
            (d * p.x + e * p.y + f) / w,
        ))
    }

    fn from_matrix(m: &Matrix3<f64>) -> PasteResult<Self> {
        let s = m[(2, 2)];
        if !s.is_finite() || s.abs() <= f64::EPSILON {
            return Err(PasteError::degenerate_geometry(
                "perspective mapping has no affine normalization",
            ));
        }
        let m = *m / s;
        Ok(Self([
            m[(0, 0)],
            m[(0, 1)],
            m[(0, 2)],
            m[(1, 0)],
            m[(1, 1)],
            m[(1, 2)],
            m[(2, 0)],
            m[(2, 1)],
        ]))
    }
}

/// Solve for the coefficients mapping every corner of `from` onto the matching corner of `to`.
///
/// The 8x8 system is built on normalized coordinates and solved through its normal equations
/// with an LU factorization; no explicit inverse is formed.
pub fn solve_perspective(
    from: &CornerQuad,
    to: &CornerQuad,
) -> PasteResult<PerspectiveCoefficients> {
    let src = from.points();
    let dst = to.points();

    let (t_src, src_n) = normalize(&src)?;
    let (t_dst, dst_n) = normalize(&dst)?;

    if CornerQuad::new(src_n).signed_area().abs() <= 1e-9 {
        return Err(PasteError::degenerate_geometry("source corners span no area"));
    }

    let mut a = SMatrix::<f64, 8, 8>::zeros();
    let mut b = SVector::<f64, 8>::zeros();
    for i in 0..4 {
        let (x, y) = (src_n[i].x, src_n[i].y);
        let (u, v) = (dst_n[i].x, dst_n[i].y);

        let r0 = 2 * i;
        let r1 = 2 * i + 1;

        a[(r0, 0)] = x;
        a[(r0, 1)] = y;
        a[(r0, 2)] = 1.0;
        a[(r0, 6)] = -u * x;
        a[(r0, 7)] = -u * y;
        b[r0] = u;

        a[(r1, 3)] = x;
        a[(r1, 4)] = y;
        a[(r1, 5)] = 1.0;
        a[(r1, 6)] = -v * x;
        a[(r1, 7)] = -v * y;
        b[r1] = v;
    }

    let at = a.transpose();
    let ata = at * a;
    let atb = at * b;
    let h = ata
        .lu()
        .solve(&atb)
        .ok_or_else(|| PasteError::degenerate_geometry("perspective system is singular"))?;
    if h.iter().any(|v| !v.is_finite()) {
        return Err(PasteError::degenerate_geometry(
            "perspective solve produced non-finite coefficients",
        ));
    }

    let h_n = Matrix3::new(h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0);
    let t_dst_inv = t_dst.try_inverse().ok_or_else(|| {
        PasteError::degenerate_geometry("destination normalization is not invertible")
    })?;
    let coeffs = PerspectiveCoefficients::from_matrix(&(t_dst_inv * h_n * t_src))?;

    check_reprojection(&coeffs, &src, &dst)?;
    Ok(coeffs)
}

/// Similarity moving the centroid to the origin with mean distance sqrt(2).
fn normalize(points: &[Point; 4]) -> PasteResult<(Matrix3<f64>, [Point; 4])> {
    let cx = points.iter().map(|p| p.x).sum::<f64>() / 4.0;
    let cy = points.iter().map(|p| p.y).sum::<f64>() / 4.0;
    let mean_dist = points
        .iter()
        .map(|p| ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt())
        .sum::<f64>()
        / 4.0;
    if !mean_dist.is_finite() || mean_dist <= f64::EPSILON {
        return Err(PasteError::degenerate_geometry("corner points coincide"));
    }

    let s = std::f64::consts::SQRT_2 / mean_dist;
    let t = Matrix3::new(s, 0.0, -s * cx, 0.0, s, -s * cy, 0.0, 0.0, 1.0);
    let mapped = points.map(|p| {
        let v = t * Vector3::new(p.x, p.y, 1.0);
        Point::new(v[0], v[1])
    });
    Ok((t, mapped))
}

fn check_reprojection(
    coeffs: &PerspectiveCoefficients,
    src: &[Point; 4],
    dst: &[Point; 4],
) -> PasteResult<()> {
    let extent = dst
        .iter()
        .map(|p| p.x.abs().max(p.y.abs()))
        .fold(1.0f64, f64::max);
    let tol = 1e-6 * extent;
    for (s, d) in src.iter().zip(dst) {
        let Some(m) = coeffs.apply(*s) else {
            return Err(PasteError::degenerate_geometry("source corner maps to infinity"));
        };
        if (m.x - d.x).abs() > tol || (m.y - d.y).abs() > tol {
            return Err(PasteError::degenerate_geometry(
                "perspective system is ill-conditioned",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/transform/perspective.rs"]
mod tests;
