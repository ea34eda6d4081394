//! Native bodies of the builtin plugin functions, operating on materialized `Series`.

mod numeric;
mod strings;

pub use numeric::{larger, largest, to_fahrenheit};
pub use strings::{capitalize, cumulative_join, cumulative_join_pairs};

use polars::prelude::*;

/// Align two inputs for a row-wise operation; a length-1 side is repeated.
pub(crate) fn broadcast_pair(left: &Series, right: &Series) -> PolarsResult<(Series, Series)> {
    match (left.len(), right.len()) {
        (l, r) if l == r => Ok((left.clone(), right.clone())),
        (1, r) => Ok((left.new_from_index(0, r), right.clone())),
        (l, 1) => Ok((left.clone(), right.new_from_index(0, l))),
        (l, r) => polars_bail!(
            ShapeMismatch: "cannot combine series of length {} and {}",
            l,
            r
        ),
    }
}
