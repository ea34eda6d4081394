//! Walk through every plugin on small frames and print the results.
//!
//! Run with: `cargo run --example try_plugins`
//! Set RUST_LOG=plugin101_core=debug to see declarations as they are built.
//! PLUGIN101_LOCATION / PLUGIN101_CASE_SENSITIVE are honored.

use plugin101::prelude::*;
use plugin101::polars_to_core_error;
use polars::prelude::df;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), EngineError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .init();

    let config = Plugin101Config::from_env()?;
    let session = PluginSession::from_config(&config)?;
    let plugins = session.registry();

    // Attendees: capitalize, then a running guest list.
    let attendees = df!["attendees" => &["john", "mary", "connor", "sally"]]
        .map_err(polars_to_core_error)?;
    let out = session.with_columns(&attendees, &[("names", plugins.capitalize("attendees")?)])?;
    println!("{out}");
    let out_next = session.with_columns(
        &out,
        &[("all_folks", plugins.cumulative_join("names", ", ", true)?)],
    )?;
    println!("{out_next}");

    // Temperatures.
    let temps = df!["temp_in_c" => &[10.0f64, 15.0, 16.0, 14.0]].map_err(polars_to_core_error)?;
    let out2 = session.with_columns(&temps, &[("temp_in_f", plugins.to_fahrenheit("temp_in_c")?)])?;
    println!("{out2}");

    // Scores.
    let scores = df![
        "score_1" => &[10i64, 25, 76, 14],
        "score_2" => &[9i64, 36, 16, 14],
        "score_3" => &[80i64, 16, 66, 24],
    ]
    .map_err(polars_to_core_error)?;
    let out3 = session.with_columns(&scores, &[("higher", plugins.larger("score_1", "score_2")?)])?;
    let out3_again = session.with_columns(
        &scores,
        &[("highest", plugins.largest(["score_1", "score_2", "score_3"])?)],
    )?;
    println!("{out3}");
    println!("{out3_again}");

    // First and last names.
    let people = df![
        "first" => &["John", "Mary", "Connor", "Sally"],
        "last" => &["Smith", "Johnson", "McDonald", "Jones"],
    ]
    .map_err(polars_to_core_error)?;
    let all_folks = plugins.cumulative_join_pairs("first", "last")?;
    tracing::info!(plan = %all_folks.to_json()?, "cumulative_join_pairs plan");
    let out4 = session.with_columns(&people, &[("all_folks", all_folks)])?;
    println!("{out4}");

    Ok(())
}
