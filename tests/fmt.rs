//! Tests for the printf-style substitution engine.

use sectlog::fmt::{FormatArg, FormatErrorKind, render};
use sectlog::{MAX_MESSAGE_SIZE, fmt_args};

#[test]
fn integer_specs() {
    assert_eq!(render("%d", fmt_args![5], MAX_MESSAGE_SIZE).unwrap(), "5");
    assert_eq!(render("%i", fmt_args![-7], MAX_MESSAGE_SIZE).unwrap(), "-7");
    assert_eq!(render("%u", fmt_args![42u32], MAX_MESSAGE_SIZE).unwrap(), "42");
    assert_eq!(render("%x", fmt_args![255u32], MAX_MESSAGE_SIZE).unwrap(), "ff");
}

#[test]
fn float_spec_defaults_to_six_decimals() {
    assert_eq!(
        render("%f", fmt_args![1.5], MAX_MESSAGE_SIZE).unwrap(),
        "1.500000"
    );
}

#[test]
fn float_spec_honors_explicit_precision() {
    assert_eq!(
        render("%.2f", fmt_args![1.5], MAX_MESSAGE_SIZE).unwrap(),
        "1.50"
    );
    assert_eq!(
        render("%.0f", fmt_args![2.71828], MAX_MESSAGE_SIZE).unwrap(),
        "3"
    );
}

#[test]
fn oversized_precision_is_clamped_to_the_message_bound() {
    // More digits than usize can hold must not break the render.
    let format = format!("%.{}f", "9".repeat(25));
    let out = render(&format, fmt_args![1.0], MAX_MESSAGE_SIZE).unwrap();
    assert_eq!(out.len(), MAX_MESSAGE_SIZE);
    assert!(out.starts_with("1."));

    // A representable but absurd precision is bounded the same way.
    let out = render("%.1000000000f", fmt_args![0.5], MAX_MESSAGE_SIZE).unwrap();
    assert_eq!(out.len(), MAX_MESSAGE_SIZE);
    assert!(out.starts_with("0.5"));
}

#[test]
fn string_char_and_literal_percent() {
    assert_eq!(
        render("%s/%c", fmt_args!["dir", 'f'], MAX_MESSAGE_SIZE).unwrap(),
        "dir/f"
    );
    assert_eq!(render("100%%", fmt_args![], MAX_MESSAGE_SIZE).unwrap(), "100%");
}

#[test]
fn time_spec_is_rewritten_to_float() {
    let format = "elapsed %t s";
    assert_eq!(
        render(format, fmt_args![0.25], MAX_MESSAGE_SIZE).unwrap(),
        "elapsed 0.250000 s"
    );
    assert_eq!(format, "elapsed %t s");
}

#[test]
fn time_spec_rewrites_every_occurrence() {
    assert_eq!(
        render("%t..%t", fmt_args![1.0, 2.0], MAX_MESSAGE_SIZE).unwrap(),
        "1.000000..2.000000"
    );
}

#[test]
fn wrong_variant_coerces_where_sensible() {
    // %d with a float truncates toward zero.
    assert_eq!(render("%d", fmt_args![2.9], MAX_MESSAGE_SIZE).unwrap(), "2");
    // %s takes anything via its display form.
    assert_eq!(render("%s", fmt_args![5], MAX_MESSAGE_SIZE).unwrap(), "5");
    // No unsigned reading for a string; falls back to display form.
    assert_eq!(
        render("%u", fmt_args!["abc"], MAX_MESSAGE_SIZE).unwrap(),
        "abc"
    );
    // %f with an int.
    assert_eq!(
        render("%f", fmt_args![3], MAX_MESSAGE_SIZE).unwrap(),
        "3.000000"
    );
}

#[test]
fn missing_argument_error_carries_partial_output() {
    let err = render("a=%d b=%d", fmt_args![1], MAX_MESSAGE_SIZE).unwrap_err();
    assert_eq!(*err.kind(), FormatErrorKind::MissingArgument(1));
    assert_eq!(err.into_partial(), "a=1 b=");
}

#[test]
fn unknown_spec_error() {
    let err = render("x=%q", fmt_args![1], MAX_MESSAGE_SIZE).unwrap_err();
    assert_eq!(*err.kind(), FormatErrorKind::UnknownSpec('q'));
    assert_eq!(err.into_partial(), "x=");
}

#[test]
fn trailing_percent_error() {
    let err = render("50%", fmt_args![], MAX_MESSAGE_SIZE).unwrap_err();
    assert_eq!(*err.kind(), FormatErrorKind::TrailingPercent);
    assert_eq!(err.into_partial(), "50");
}

#[test]
fn output_is_truncated_to_max_len() {
    let long = "y".repeat(100);
    let out = render("%s", fmt_args![long.as_str()], 10).unwrap();
    assert_eq!(out, "y".repeat(10));
}

#[test]
fn truncation_never_splits_a_char() {
    let out = render("%s", fmt_args!["ααα"], 3).unwrap();
    assert_eq!(out, "α");
}

#[test]
fn empty_args_macro_produces_an_empty_slice() {
    let args: &[FormatArg] = fmt_args![];
    assert!(args.is_empty());
    assert_eq!(render("plain", args, MAX_MESSAGE_SIZE).unwrap(), "plain");
}

#[test]
fn bool_arguments() {
    assert_eq!(render("%d", fmt_args![true], MAX_MESSAGE_SIZE).unwrap(), "1");
    assert_eq!(
        render("%s", fmt_args![false], MAX_MESSAGE_SIZE).unwrap(),
        "false"
    );
}
