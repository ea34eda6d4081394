//! Shared helpers for integration tests (session and frame setup).

#![allow(dead_code)]

use plugin101::PluginSession;
use polars::prelude::{df, DataFrame, Series};

/// Session over the builtin kernels.
pub fn session() -> PluginSession {
    PluginSession::new()
}

pub fn attendees_df() -> DataFrame {
    df!["attendees" => &["john", "mary", "connor", "sally"]].unwrap()
}

pub fn temps_df() -> DataFrame {
    df!["temp_in_c" => &[10.0f64, 15.0, 16.0, 14.0]].unwrap()
}

pub fn scores_df() -> DataFrame {
    df![
        "score_1" => &[10i64, 25, 76, 14],
        "score_2" => &[9i64, 36, 16, 14],
        "score_3" => &[80i64, 16, 66, 24],
    ]
    .unwrap()
}

pub fn people_df() -> DataFrame {
    df![
        "first" => &["John", "Mary", "Connor", "Sally"],
        "last" => &["Smith", "Johnson", "McDonald", "Jones"],
    ]
    .unwrap()
}

fn series<'a>(df: &'a DataFrame, name: &str) -> &'a Series {
    df.column(name).unwrap().as_materialized_series()
}

pub fn strings(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    series(df, name)
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect()
}

pub fn ints(df: &DataFrame, name: &str) -> Vec<Option<i64>> {
    series(df, name).i64().unwrap().into_iter().collect()
}

pub fn floats(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    series(df, name).f64().unwrap().into_iter().collect()
}

/// `Some(s)` for each string, for comparing against expected columns.
pub fn some_strings(values: &[&str]) -> Vec<Option<String>> {
    values.iter().map(|s| Some(s.to_string())).collect()
}
