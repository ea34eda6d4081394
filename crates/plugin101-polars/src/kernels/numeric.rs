//! Numeric kernels: Fahrenheit conversion and row-wise maximum.

use polars::prelude::*;
use polars_core::utils::try_get_supertype;

use super::broadcast_pair;

pub fn to_fahrenheit(inputs: &[Series]) -> PolarsResult<Series> {
    polars_ensure!(
        inputs.len() == 1,
        ComputeError: "to_fahrenheit expects 1 input, got {}",
        inputs.len()
    );
    let s = &inputs[0];
    match s.dtype() {
        DataType::Int32
        | DataType::Int64
        | DataType::UInt32
        | DataType::UInt64
        | DataType::Float32
        | DataType::Float64 => {}
        dtype => polars_bail!(
            InvalidOperation: "to_fahrenheit: dtype {} not supported, expected a numeric column",
            dtype
        ),
    }
    let celsius = s.cast(&DataType::Float64)?;
    let out: Float64Chunked = celsius.f64()?.apply_values(|c| c * 9.0 / 5.0 + 32.0);
    Ok(out.into_series())
}

fn ensure_comparable(function: &str, dtype: &DataType) -> PolarsResult<()> {
    match dtype {
        DataType::Int32
        | DataType::Int64
        | DataType::UInt32
        | DataType::UInt64
        | DataType::Float32
        | DataType::Float64
        | DataType::String => Ok(()),
        dtype => polars_bail!(
            InvalidOperation: "{}: dtype {} not supported, expected Int32, Int64, UInt32, UInt64, Float32, Float64 or String",
            function,
            dtype
        ),
    }
}

/// NaN is the only value that is unordered against itself.
fn is_nan<N: PartialOrd>(v: N) -> bool {
    v.partial_cmp(&v).is_none()
}

/// NaN sorts above every number, matching Polars' total order, so the pick does
/// not depend on argument order.
fn pick_right<N: PartialOrd + Copy>(l: N, r: N) -> bool {
    match (is_nan(l), is_nan(r)) {
        (_, true) => true,
        (true, false) => false,
        (false, false) => r > l,
    }
}

fn max_numeric<T>(left: &ChunkedArray<T>, right: &ChunkedArray<T>) -> ChunkedArray<T>
where
    T: PolarsNumericType,
{
    let out: ChunkedArray<T> = left
        .into_iter()
        .zip(right)
        .map(|(l, r)| match (l, r) {
            (Some(l), Some(r)) => Some(if pick_right(l, r) { r } else { l }),
            _ => None,
        })
        .collect();
    out.with_name(left.name().clone())
}

fn max_str(left: &StringChunked, right: &StringChunked) -> StringChunked {
    let out: StringChunked = left
        .into_iter()
        .zip(right)
        .map(|(l, r)| match (l, r) {
            (Some(l), Some(r)) => Some(if r > l { r } else { l }),
            _ => None,
        })
        .collect();
    out.with_name(left.name().clone())
}

/// Greater of two same-row values. Both sides are cast to their supertype (the
/// dtype Polars itself compares them in), so the result is symmetric in its
/// arguments. Nulls propagate.
fn max_pair(function: &str, left: &Series, right: &Series) -> PolarsResult<Series> {
    ensure_comparable(function, left.dtype())?;
    ensure_comparable(function, right.dtype())?;
    let dtype = try_get_supertype(left.dtype(), right.dtype())?;
    ensure_comparable(function, &dtype)?;
    let left = left.strict_cast(&dtype)?;
    let right = right.strict_cast(&dtype)?;
    let (left, right) = broadcast_pair(&left, &right)?;
    let out = match dtype {
        DataType::Int32 => max_numeric(left.i32()?, right.i32()?).into_series(),
        DataType::Int64 => max_numeric(left.i64()?, right.i64()?).into_series(),
        DataType::UInt32 => max_numeric(left.u32()?, right.u32()?).into_series(),
        DataType::UInt64 => max_numeric(left.u64()?, right.u64()?).into_series(),
        DataType::Float32 => max_numeric(left.f32()?, right.f32()?).into_series(),
        DataType::Float64 => max_numeric(left.f64()?, right.f64()?).into_series(),
        DataType::String => max_str(left.str()?, right.str()?).into_series(),
        dtype => polars_bail!(InvalidOperation: "{}: dtype {} not supported", function, dtype),
    };
    Ok(out)
}

pub fn larger(inputs: &[Series]) -> PolarsResult<Series> {
    polars_ensure!(
        inputs.len() == 2,
        ComputeError: "larger expects 2 inputs, got {}",
        inputs.len()
    );
    max_pair("larger", &inputs[0], &inputs[1])
}

/// Left fold of the pairwise maximum, so `largest(a, b)` equals `larger(a, b)`.
pub fn largest(inputs: &[Series]) -> PolarsResult<Series> {
    let Some((first, rest)) = inputs.split_first() else {
        polars_bail!(ComputeError: "largest expects at least 1 input, got 0");
    };
    ensure_comparable("largest", first.dtype())?;
    rest.iter()
        .try_fold(first.clone(), |acc, s| max_pair("largest", &acc, s))
}
