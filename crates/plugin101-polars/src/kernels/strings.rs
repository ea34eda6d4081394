//! String kernels: capitalize and the running joins.
//! These run at plan execution time when Polars invokes the plugin closure.

use std::borrow::Cow;

use plugin101_core::{CumulativeJoinOptions, PairJoinOptions};
use polars::prelude::*;

use super::broadcast_pair;

pub(crate) fn string_input<'a>(s: &'a Series, function: &str) -> PolarsResult<&'a StringChunked> {
    match s.dtype() {
        DataType::String => s.str(),
        dtype => polars_bail!(
            InvalidOperation: "{}: dtype {} not supported, expected String",
            function,
            dtype
        ),
    }
}

/// First character uppercased when it has a single-character uppercase form; rest untouched.
fn capitalize_one(value: &str) -> Cow<'_, str> {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return Cow::Borrowed(value);
    };
    let mut upper = first.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) if u != first => {
            let mut out = String::with_capacity(value.len() + u.len_utf8());
            out.push(u);
            out.push_str(chars.as_str());
            Cow::Owned(out)
        }
        (Some(_), Some(_)) => {
            tracing::trace!(%first, "multi-character uppercase form, value left unchanged");
            Cow::Borrowed(value)
        }
        _ => Cow::Borrowed(value),
    }
}

/// Uppercase the first character of each string. A first character whose
/// uppercase form is several characters (`ß` -> `SS`) is kept as is, so the
/// output always has the input's length.
pub fn capitalize(inputs: &[Series]) -> PolarsResult<Series> {
    polars_ensure!(
        inputs.len() == 1,
        ComputeError: "capitalize expects 1 input, got {}",
        inputs.len()
    );
    let ca = string_input(&inputs[0], "capitalize")?;
    let out: StringChunked = ca.apply_values(capitalize_one);
    Ok(out.into_series())
}

/// Append `part` to the running value and return a copy of it.
fn push_running(running: &mut Option<String>, separator: &str, part: &str) -> String {
    match running {
        Some(acc) => {
            acc.push_str(separator);
            acc.push_str(part);
            acc.clone()
        }
        None => running.insert(part.to_string()).clone(),
    }
}

/// Row i holds the join of rows 0..=i. Null rows stay null and are left out of later rows.
pub fn cumulative_join(inputs: &[Series], options: &CumulativeJoinOptions) -> PolarsResult<Series> {
    polars_ensure!(
        inputs.len() == 1,
        ComputeError: "cumulative_join expects 1 input, got {}",
        inputs.len()
    );
    let ca = string_input(&inputs[0], "cumulative_join")?;
    let mut running: Option<String> = None;
    let out: StringChunked = ca
        .into_iter()
        .map(|value| {
            let value = value?;
            let part = if options.trim { value.trim() } else { value };
            Some(push_running(&mut running, &options.separator, part))
        })
        .collect();
    Ok(out.with_name(ca.name().clone()).into_series())
}

/// Row i joins `first[j] + pair_separator + second[j]` for j <= i.
pub fn cumulative_join_pairs(inputs: &[Series], options: &PairJoinOptions) -> PolarsResult<Series> {
    polars_ensure!(
        inputs.len() == 2,
        ComputeError: "cumulative_join_pairs expects 2 inputs, got {}",
        inputs.len()
    );
    let (first, second) = broadcast_pair(&inputs[0], &inputs[1])?;
    let a = string_input(&first, "cumulative_join_pairs")?;
    let b = string_input(&second, "cumulative_join_pairs")?;
    let mut running: Option<String> = None;
    let out: StringChunked = a
        .into_iter()
        .zip(b)
        .map(|(x, y)| {
            let pair = format!("{}{}{}", x?, options.pair_separator, y?);
            Some(push_running(&mut running, &options.separator, &pair))
        })
        .collect();
    Ok(out.with_name(a.name().clone()).into_series())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(s: &Series) -> Vec<Option<String>> {
        s.str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect()
    }

    #[test]
    fn capitalize_one_cases() {
        assert_eq!(capitalize_one("john"), "John");
        assert_eq!(capitalize_one("John"), "John");
        assert_eq!(capitalize_one(""), "");
        assert_eq!(capitalize_one("éclair"), "Éclair");
        assert_eq!(capitalize_one("1st place"), "1st place");
        // 'ß' uppercases to two characters; left alone to keep the length.
        assert_eq!(capitalize_one("ßtraße"), "ßtraße");
    }

    #[test]
    fn capitalize_keeps_nulls_and_name() {
        let s = Series::new("attendees".into(), &[Some("mary"), None, Some("sally")]);
        let out = capitalize(&[s]).unwrap();
        assert_eq!(out.name().as_str(), "attendees");
        assert_eq!(
            strings(&out),
            vec![Some("Mary".into()), None, Some("Sally".into())]
        );
    }

    #[test]
    fn capitalize_rejects_numbers() {
        let s = Series::new("n".into(), &[1i64, 2]);
        let err = capitalize(&[s]).unwrap_err();
        assert!(matches!(err, PolarsError::InvalidOperation(_)));
    }

    #[test]
    fn cumulative_join_trims_elements() {
        let s = Series::new("names".into(), &[" John", "Mary ", "Connor"]);
        let out = cumulative_join(&[s], &CumulativeJoinOptions::new("-", true)).unwrap();
        assert_eq!(
            strings(&out),
            vec![
                Some("John".into()),
                Some("John-Mary".into()),
                Some("John-Mary-Connor".into()),
            ]
        );
    }

    #[test]
    fn cumulative_join_without_trim_keeps_whitespace() {
        let s = Series::new("names".into(), &[" a", "b "]);
        let out = cumulative_join(&[s], &CumulativeJoinOptions::new(",", false)).unwrap();
        assert_eq!(strings(&out), vec![Some(" a".into()), Some(" a,b ".into())]);
    }

    #[test]
    fn cumulative_join_skips_nulls() {
        let s = Series::new("names".into(), &[Some("a"), None, Some("c")]);
        let out = cumulative_join(&[s], &CumulativeJoinOptions::new(", ", true)).unwrap();
        assert_eq!(strings(&out), vec![Some("a".into()), None, Some("a, c".into())]);
    }

    #[test]
    fn pairs_join_row_by_row() {
        let first = Series::new("first".into(), &["John", "Mary"]);
        let last = Series::new("last".into(), &["Smith", "Johnson"]);
        let out = cumulative_join_pairs(&[first, last], &PairJoinOptions::default()).unwrap();
        assert_eq!(
            strings(&out),
            vec![
                Some("John Smith".into()),
                Some("John Smith\nMary Johnson".into()),
            ]
        );
    }

    #[test]
    fn pairs_broadcast_scalar_side() {
        let first = Series::new("first".into(), &["a", "b"]);
        let suffix = Series::new("suffix".into(), &["!"]);
        let options = PairJoinOptions {
            pair_separator: String::new(),
            separator: "|".into(),
        };
        let out = cumulative_join_pairs(&[first, suffix], &options).unwrap();
        assert_eq!(strings(&out), vec![Some("a!".into()), Some("a!|b!".into())]);
    }

    #[test]
    fn capitalize_leaves_multi_char_uppercase_alone() {
        let s = Series::new("w".into(), &["ßtraße", "ǉubljana", "straße"]);
        let out = capitalize(&[s]).unwrap();
        assert_eq!(
            strings(&out),
            vec![
                Some("ßtraße".into()),
                Some("Ǉubljana".into()),
                Some("Straße".into()),
            ]
        );
    }

    #[test]
    fn pairs_null_on_first_side_is_skipped() {
        let first = Series::new("first".into(), &[Some("a"), None, Some("c")]);
        let second = Series::new("second".into(), &["x", "y", "z"]);
        let out = cumulative_join_pairs(&[first, second], &PairJoinOptions::default()).unwrap();
        assert_eq!(
            strings(&out),
            vec![Some("a x".into()), None, Some("a x\nc z".into())]
        );
    }

    #[test]
    fn pairs_null_on_second_side_is_skipped() {
        let first = Series::new("first".into(), &["a", "b", "c"]);
        let second = Series::new("second".into(), &[None, Some("y"), Some("z")]);
        let out = cumulative_join_pairs(&[first, second], &PairJoinOptions::default()).unwrap();
        assert_eq!(
            strings(&out),
            vec![None, Some("b y".into()), Some("b y\nc z".into())]
        );
    }
}
