use crate::foundation::core::Vec2;

/// Solve `[a11 a12; a21 a22] * [x1; x2] = [b1; b2]`.
///
/// Uses partial pivoting followed by LU elimination. Singular systems are not
/// detected here: the result is simply non-finite, and callers check it with
/// `f64::is_finite`.
pub fn solve_2x2(
    mut a11: f64,
    mut a12: f64,
    mut a21: f64,
    mut a22: f64,
    mut b1: f64,
    mut b2: f64,
) -> (f64, f64) {
    if a11.abs() < a21.abs() {
        std::mem::swap(&mut b1, &mut b2);
        std::mem::swap(&mut a11, &mut a21);
        std::mem::swap(&mut a12, &mut a22);
    }
    let l21 = a21 / a11;
    let u22 = a22 - l21 * a12;
    let z1 = b1;
    let z2 = b2 - l21 * z1;
    let x2 = z2 / u22;
    let x1 = (z1 - a12 * x2) / a11;
    (x1, x2)
}

/// Solve `x1 * c1 + x2 * c2 = b` for column vectors `c1`, `c2`.
pub(crate) fn solve_columns(c1: Vec2, c2: Vec2, b: Vec2) -> (f64, f64) {
    solve_2x2(c1.x, c2.x, c1.y, c2.y, b.x, b.y)
}

pub(crate) fn vec_is_finite(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
