use crate::group::ScalarBits;
use crate::{Point, Projective, Scalar};

const WINDOW_BITS: usize = 4;
const TABLE_SIZE: usize = 1 << WINDOW_BITS;

fn window_table(point: &Projective) -> [Projective; TABLE_SIZE] {
    let mut table = [Projective::INFINITY; TABLE_SIZE];
    table[1] = *point;
    for i in 2..TABLE_SIZE {
        table[i] = table[i - 1] + *point;
    }
    table
}

/// Compute a * G + b * P with interleaved 4-bit windows, sharing the doublings
/// between both scalars.
pub fn double_scalar_mul_basepoint(a: &Scalar, b: &Scalar, point: &Point) -> Point {
    let base_table = window_table(&Projective::generator());
    let point_table = window_table(&Projective::from(point));

    let a_limbs = a.to_u64_limbs();
    let b_limbs = b.to_u64_limbs();
    let mut result = Projective::INFINITY;

    for limb_idx in (0..4).rev() {
        let a_limb = a_limbs[limb_idx];
        let b_limb = b_limbs[limb_idx];
        for shift in (0..64).step_by(WINDOW_BITS).rev() {
            for _ in 0..WINDOW_BITS {
                result = result.double();
            }

            let a_window = ((a_limb >> shift) & 0xF) as usize;
            if a_window != 0 {
                result += base_table[a_window];
            }

            let b_window = ((b_limb >> shift) & 0xF) as usize;
            if b_window != 0 {
                result += point_table[b_window];
            }
        }
    }

    result.to_affine()
}
