//! Proportional redistribution of lengths with exact-sum rounding.
//!
//! Rescaling each length on its own and rounding drifts: three thirds of 100
//! round to 33 + 33 + 33 = 99. Instead the cumulative boundaries between
//! consecutive lengths are projected onto the new total and rounded, and the
//! output lengths are the gaps between projected boundaries. The boundaries
//! telescope, so the outputs always sum to the destination exactly, and each
//! output is within one unit of its ideal proportional share.

/// Rescale `lengths` so they sum to exactly `destination`.
///
/// - If the lengths already sum to `destination` they are returned unchanged.
/// - If they sum to zero, `destination` is split into equal shares; the
///   remainder units go to the trailing elements, one each.
/// - An empty input yields an empty output.
///
/// Projected boundaries round half up, computed in exact integer arithmetic.
///
/// ```
/// use sizekit_layout::homothecy;
///
/// assert_eq!(homothecy(&[40, 30], 122), vec![70, 52]);
/// assert_eq!(homothecy(&[1, 1, 1], 100).iter().sum::<u32>(), 100);
/// assert_eq!(homothecy(&[0, 0, 0], 5), vec![1, 2, 2]);
/// ```
#[must_use]
pub fn homothecy(lengths: &[u32], destination: u32) -> Vec<u32> {
    if lengths.is_empty() {
        return Vec::new();
    }

    let total: u64 = lengths.iter().map(|&l| u64::from(l)).sum();
    let destination_wide = u64::from(destination);
    if total == destination_wide {
        return lengths.to_vec();
    }
    if total == 0 {
        return equal_shares(lengths.len(), destination);
    }

    let mut result = Vec::with_capacity(lengths.len());
    let mut cumulative = 0u64;
    let mut previous = 0u64;
    for &length in lengths {
        cumulative += u64::from(length);
        let projected = project(cumulative, total, destination_wide).clamp(previous, destination_wide);
        // projected - previous <= destination, which fits u32.
        result.push((projected - previous) as u32);
        previous = projected;
    }
    result
}

/// `round(position * destination / total)`, half up, without floating point.
fn project(position: u64, total: u64, destination: u64) -> u64 {
    let numerator = 2 * u128::from(position) * u128::from(destination) + u128::from(total);
    let denominator = 2 * u128::from(total);
    (numerator / denominator) as u64
}

/// Split `destination` into `count` near-equal shares, remainder trailing.
fn equal_shares(count: usize, destination: u32) -> Vec<u32> {
    let count_u32 = u32::try_from(count).unwrap_or(u32::MAX);
    let base = destination / count_u32;
    let remainder = (destination % count_u32) as usize;
    let first_bumped = count - remainder;
    (0..count)
        .map(|i| if i >= first_bumped { base + 1 } else { base })
        .collect()
}
