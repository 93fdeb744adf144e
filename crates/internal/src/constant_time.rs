//! Constant-time operations to prevent timing attacks

use subtle::{Choice, ConditionallySelectable};

/// Constant-time conditional assignment
///
/// Sets `dst` to `src` if `condition` is set, otherwise leaves `dst`
/// unchanged. Both slices must have the same length.
pub fn ct_assign<T>(dst: &mut [T], src: &[T], condition: Choice)
where
    T: ConditionallySelectable,
{
    debug_assert_eq!(dst.len(), src.len());

    for (d, s) in dst.iter_mut().zip(src.iter()) {
        d.conditional_assign(s, condition);
    }
}

/// Constant-time conditional swap of two equal-length slices
///
/// Swaps the contents of `a` and `b` if `condition` is set. The memory
/// access pattern is identical whether or not the swap happens.
pub fn ct_swap<T>(a: &mut [T], b: &mut [T], condition: Choice)
where
    T: ConditionallySelectable,
{
    debug_assert_eq!(a.len(), b.len());

    for (x, y) in a.iter_mut().zip(b.iter_mut()) {
        T::conditional_swap(x, y, condition);
    }
}
