//! End-to-end tests for transcoding between dialects.
//!
//! These tests verify that:
//! 1. Colors map between the named and numeric-code palettes
//! 2. Unbalanced input always produces balanced bracket output
//! 3. Markup of every dialect can be stripped to plain text
//! 4. Length-limited splitting keeps each line self-contained
//!
//! Run with: cargo test --test e2e_transcode -- --nocapture

mod common;

use chatmarkup::prelude::*;
use chatmarkup::split::sanitize;
use common::assertions::{assert_bracket_balanced_logged, assert_eq_logged};
use common::{init_test_logging, log_test_context, test_phase};

// =============================================================================
// Core scenarios
// =============================================================================

#[test]
fn test_bracket_to_control_byte() {
    init_test_logging();
    log_test_context("bracket_to_control_byte", "named color maps to nearest code");

    let out = transcode("<c=red>hi</c>", Dialect::Bracket, Dialect::ControlByte, false);
    assert_eq_logged("red to code 04", out.as_str(), "\x0304hi\x03");
}

#[test]
fn test_unclosed_bracket_gets_synthesized_close() {
    init_test_logging();

    let out = transcode("<c=blue>never closed", Dialect::Bracket, Dialect::Bracket, false);
    assert_eq_logged("synthesized close", out.as_str(), "<c=blue>never closed</c>");
    assert_bracket_balanced_logged("unclosed", &out);
}

#[test]
fn test_exact_rgb_names_red() {
    init_test_logging();

    let color = Color::from_rgb(255, 0, 0);
    assert_eq_logged("nearest name", color.nearest_name(), "red");
    assert_eq_logged("distance", color.distance(&Color::from_name("red").unwrap()), 0.0);
}

#[test]
fn test_reduce_hex() {
    init_test_logging();

    assert_eq_logged("reducible", Color::reduce_hex("#AABBCC").as_str(), "#ABC");
    assert_eq_logged("not reducible", Color::reduce_hex("#AABBCD").as_str(), "#AABBCD");
}

#[test]
fn test_control_byte_to_plain() {
    init_test_logging();

    let out = transcode("\x034hi\x03", Dialect::ControlByte, Dialect::PlainText, false);
    assert_eq_logged("stripped", out.as_str(), "hi");
}

// =============================================================================
// Palette mapping
// =============================================================================

#[test]
fn test_named_colors_map_to_codes() {
    init_test_logging();

    let cases = [
        ("red", "04"),
        ("blue", "12"),
        ("green", "03"),
        ("white", "00"),
        ("yellow", "08"),
        ("navy", "02"),
    ];
    for (name, code) in cases {
        let out = transcode(&format!("<c={name}>x</c>"), Dialect::Bracket, Dialect::ControlByte, false);
        assert_eq_logged(name, out, format!("\x03{code}x\x03"));
    }
}

#[test]
fn test_codes_map_back_to_bracket() {
    init_test_logging();

    let out = transcode(
        "\x0304,12alert\x03 \x0312,04info",
        Dialect::ControlByte,
        Dialect::Bracket,
        true,
    );
    assert_eq!(out, "<c=red>alert</c> <c=0,0,252>info</c>");
}

#[test]
fn test_background_only_code_is_dropped_in_bracket() {
    init_test_logging();

    let tokens = vec![
        Token::color_start(None, Color::from_code_number(2).ok(), Dialect::ControlByte),
        Token::text("bg", Dialect::ControlByte),
        Token::color_end(Dialect::ControlByte),
    ];
    let balanced = chatmarkup::markup::balance(tokens.clone(), Dialect::Bracket);
    assert_eq!(chatmarkup::markup::render(&balanced, Dialect::Bracket, false), "bg");

    let control = chatmarkup::markup::balance(tokens, Dialect::ControlByte);
    assert_eq!(
        chatmarkup::markup::render(&control, Dialect::ControlByte, false),
        "\x0399,02bg\x03"
    );
}

// =============================================================================
// Balancing
// =============================================================================

#[test]
fn test_nested_scopes_restore_outer_color_in_control_byte() {
    init_test_logging();

    let out = transcode(
        "<c=red>a<c=#00FF00>b</c>c</c>d",
        Dialect::Bracket,
        Dialect::ControlByte,
        false,
    );
    assert_eq!(out, "\x0304a\x0309b\x0304c\x03d");
}

#[test]
fn test_unbalanced_input_is_normalized() {
    init_test_logging();

    let _phase = test_phase("normalize");
    let inputs = [
        ("</c><c=red>x<c=nope>y</c>z", "<c=red>x</c>yz"),
        ("</c></c></c>", ""),
        ("<c=red><c=blue><c=green>deep", "<c=red><c=blue><c=green>deep</c></c></c>"),
        ("a<c=red>b</c>c</c>", "a<c=red>b</c>c"),
    ];
    for (input, expected) in inputs {
        let out = transcode(input, Dialect::Bracket, Dialect::Bracket, false);
        assert_eq_logged(input, out.as_str(), expected);
        assert_bracket_balanced_logged(input, &out);
    }
}

#[test]
fn test_reset_closes_all_scopes() {
    init_test_logging();

    let out = transcode(
        "\x0304red \x0312blue\x0f plain",
        Dialect::ControlByte,
        Dialect::Bracket,
        true,
    );
    assert_eq!(out, "<c=red>red <c=0,0,252>blue</c></c> plain");
}

// =============================================================================
// Plain text
// =============================================================================

#[test]
fn test_plain_text_source_is_verbatim() {
    init_test_logging();

    let out = transcode("<c=red> is not markup here", Dialect::PlainText, Dialect::PlainText, false);
    assert_eq!(out, "<c=red> is not markup here");
}

#[test]
fn test_literal_tags_in_plain_source_stay_balanced_in_bracket() {
    init_test_logging();

    let out = transcode("<c=red> is markup there", Dialect::PlainText, Dialect::Bracket, false);
    assert_eq_logged("literal tag closed", out.as_str(), "<c=red> is markup there</c>");
    assert_bracket_balanced_logged("plain source", &out);
}

#[test]
fn test_dropped_close_does_not_forge_unbalanced_tag() {
    init_test_logging();

    for input in ["<</c>c=red>hi", "<c</c>=red>hi", "x<</c>/c>y"] {
        for compress in [false, true] {
            let out = transcode(input, Dialect::Bracket, Dialect::Bracket, compress);
            assert_bracket_balanced_logged(input, &out);
            assert_eq!(transcode(&out, Dialect::Bracket, Dialect::Bracket, compress), out);
        }
    }
}

#[test]
fn test_strip_everything_to_plain() {
    init_test_logging();

    let bracket = "<c=red>one</c> <c=255,255,0>two</c> <c=#00f>three";
    assert_eq!(
        transcode(bracket, Dialect::Bracket, Dialect::PlainText, false),
        "one two three"
    );

    let control = "\x0304one\x03 \x0308,02two\x0f three";
    assert_eq!(
        transcode(control, Dialect::ControlByte, Dialect::PlainText, false),
        "one two three"
    );
}

#[test]
fn test_empty_input() {
    init_test_logging();

    for source in Dialect::ALL {
        for target in Dialect::ALL {
            assert_eq!(transcode("", source, target, false), "", "{source} -> {target}");
        }
    }
}

// =============================================================================
// Transcoder configuration
// =============================================================================

#[test]
fn test_transcoder_split_bracket() {
    init_test_logging();

    let transcoder = Transcoder::new(Dialect::Bracket, Dialect::Bracket).max_length(Some(20));
    let lines = transcoder.split("<c=red>aaaa bbbb cccc dddd</c>");
    insta::assert_snapshot!(lines.join("\n"), @r"
    <c=red>aaaa bbbb</c>
    <c=red>cccc dddd</c>
    ");
    for line in &lines {
        assert!(line.len() <= 20);
        assert_bracket_balanced_logged("split line", line);
    }
}

#[test]
fn test_transcoder_split_long_chat_line_to_control_byte() {
    init_test_logging();

    let text = format!("<c=red>{}</c>", "word ".repeat(100));
    let transcoder = Transcoder::new(Dialect::Bracket, Dialect::ControlByte).max_length(Some(64));
    let lines = transcoder.split(&text);

    assert!(lines.len() > 1);
    for line in &lines {
        assert!(line.len() <= 64, "{line:?}");
        assert!(line.starts_with("\x0304"), "{line:?}");
    }
    let words: usize = lines.iter().map(|l| l.matches("word").count()).sum();
    assert_eq!(words, 100);
}

#[test]
fn test_transcoder_sanitize_multiline_paste() {
    init_test_logging();

    let transcoder = Transcoder::new(Dialect::Bracket, Dialect::ControlByte).sanitize(true);
    assert_eq!(sanitize("a\r\nb"), "a  b");
    assert_eq!(transcoder.transcode("<c=red>a\nb</c>"), "\x0304a b\x03");
}

#[test]
fn test_dialect_selected_by_name() {
    init_test_logging();

    let source: Dialect = "pesterchum".parse().unwrap();
    let target: Dialect = "irc".parse().unwrap();
    assert_eq!(transcode("<c=red>x", source, target, false), "\x0304x");

    let err = "html".parse::<Dialect>().unwrap_err();
    assert_eq!(err, MarkupError::UnsupportedDialect("html".to_string()));
}
