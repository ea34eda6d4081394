//! Property-style tests for the transform laws: capitalize shape, exact
//! Fahrenheit arithmetic, and the larger/largest consistency and associativity.
//!
//! Lightweight (no proptest dependency); each test runs over a randomly
//! generated batch of rows.

mod common;

use common::{floats, ints, session, strings};
use polars::prelude::{df, DataFrame};
use rand::Rng;

const ROWS: usize = 64;

fn random_word(rng: &mut impl Rng) -> String {
    let len = rng.gen_range(0..8);
    (0..len)
        .map(|_| {
            if rng.gen_bool(0.2) {
                rng.gen_range(b'A'..=b'Z') as char
            } else {
                rng.gen_range(b'a'..=b'z') as char
            }
        })
        .collect()
}

fn random_ints(rng: &mut impl Rng) -> Vec<i64> {
    (0..ROWS).map(|_| rng.gen_range(-1000..=1000)).collect()
}

fn triples_df(rng: &mut impl Rng) -> DataFrame {
    df![
        "a" => random_ints(rng),
        "b" => random_ints(rng),
        "c" => random_ints(rng),
    ]
    .unwrap()
}

#[test]
fn property_capitalize_uppercases_first_char_only() {
    let mut rng = rand::thread_rng();
    let words: Vec<String> = (0..ROWS).map(|_| random_word(&mut rng)).collect();
    let frame = df!["w" => &words].unwrap();

    let session = session();
    let expr = session.registry().capitalize("w").unwrap();
    let out = session.with_columns(&frame, &[("cap", expr)]).unwrap();

    for (word, cap) in words.iter().zip(strings(&out, "cap")) {
        let cap = cap.unwrap();
        assert_eq!(cap.len(), word.len(), "{word:?} -> {cap:?}");
        let mut expected = word.chars();
        let mut got = cap.chars();
        if let (Some(w0), Some(c0)) = (expected.next(), got.next()) {
            assert_eq!(c0, w0.to_ascii_uppercase());
        }
        assert_eq!(got.as_str(), expected.as_str());
    }
}

#[test]
fn property_fahrenheit_is_exact() {
    let mut rng = rand::thread_rng();
    let celsius: Vec<f64> = (0..ROWS).map(|_| rng.gen_range(-100.0..100.0)).collect();
    let frame = df!["c" => &celsius].unwrap();

    let session = session();
    let expr = session.registry().to_fahrenheit("c").unwrap();
    let out = session.with_columns(&frame, &[("f", expr)]).unwrap();

    for (c, f) in celsius.iter().zip(floats(&out, "f")) {
        assert_eq!(f, Some(c * 9.0 / 5.0 + 32.0));
    }
}

#[test]
fn property_largest_of_two_equals_larger() {
    let mut rng = rand::thread_rng();
    let frame = triples_df(&mut rng);

    let session = session();
    let plugins = session.registry();
    let out = session
        .with_columns(
            &frame,
            &[
                ("pair", plugins.larger("a", "b").unwrap()),
                ("n_ary", plugins.largest(["a", "b"]).unwrap()),
            ],
        )
        .unwrap();
    assert_eq!(ints(&out, "pair"), ints(&out, "n_ary"));
}

#[test]
fn property_largest_is_associative() {
    let mut rng = rand::thread_rng();
    let frame = triples_df(&mut rng);

    let session = session();
    let plugins = session.registry();
    let flat = plugins.largest(["a", "b", "c"]).unwrap();
    let nested = plugins
        .largest([plugins.largest(["a", "b"]).unwrap(), "c".into()])
        .unwrap();
    let out = session
        .with_columns(&frame, &[("flat", flat), ("nested", nested)])
        .unwrap();

    let expected: Vec<Option<i64>> = ints(&frame, "a")
        .into_iter()
        .zip(ints(&frame, "b"))
        .zip(ints(&frame, "c"))
        .map(|((a, b), c)| Some(a?.max(b?).max(c?)))
        .collect();
    assert_eq!(ints(&out, "flat"), expected);
    assert_eq!(ints(&out, "nested"), expected);
}
