// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

/// Checks that `order` is a permutation of `0..len` and converts it to
/// positions. Length mismatches, out of range (including negative) indices
/// and repeated indices are all rejected.
pub fn validate_permutation(order: &[i64], len: usize) -> Result<Vec<usize>, ValidationError> {
    if order.len() != len {
        return Err(ValidationError(format!(
            "order has {} entries, expected {len}",
            order.len()
        )));
    }
    let mut seen = vec![false; len];
    let mut out = Vec::with_capacity(len);
    for &raw in order {
        let idx = usize::try_from(raw)
            .ok()
            .filter(|i| *i < len)
            .ok_or_else(|| ValidationError(format!("index {raw} out of bounds for {len}")))?;
        if seen[idx] {
            return Err(ValidationError(format!("index {idx} repeated in order")));
        }
        seen[idx] = true;
        out.push(idx);
    }
    Ok(out)
}
