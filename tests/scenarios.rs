// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Concrete end-to-end match scenarios, one test per named behavior rather
//! than a single giant table, so a failure points straight at the feature
//! that broke.

use re2lite::Regex;

#[test]
fn capturing_groups_split_a_literal_and_a_wildcard() {
    let re = Regex::new(r"(orange)-(.*)").unwrap();
    let m = re.captures("orange-rules").unwrap();
    assert_eq!(m.group(0), Some("orange-rules"));
    assert_eq!(m.group(1), Some("orange"));
    assert_eq!(m.group(2), Some("rules"));
}

#[test]
fn lazy_vs_greedy_quantifier_on_the_same_input() {
    let lazy = Regex::new(r"<.*?>").unwrap();
    let greedy = Regex::new(r"<.*>").unwrap();
    let text = "<tag>content</tag>";
    assert_eq!(lazy.find(text).unwrap().group(0), Some("<tag>"));
    assert_eq!(greedy.find(text).unwrap().group(0), Some("<tag>content</tag>"));
}

#[test]
fn case_insensitive_flag_matches_uppercase_letters() {
    let re = Regex::new(r"(?i)[a-z]+").unwrap();
    assert_eq!(re.find("ORANGE").unwrap().group(0), Some("ORANGE"));
}

#[test]
fn multiline_flag_anchors_each_line() {
    let re = Regex::new(r"(?m)^line2").unwrap();
    let m = re.find("line1\nline2").unwrap();
    assert_eq!(m.start(0), Some(6));
    assert_eq!(m.group(0), Some("line2"));
}

#[test]
fn anchored_literal_with_trailing_digits_takes_the_fast_path() {
    let re = Regex::new(r"^\d+abc$").unwrap();
    let m = re.captures("123abc").unwrap();
    assert_eq!(m.group(0), Some("123abc"));
}

#[test]
fn ungreedy_loop_still_consumes_everything_before_a_mandatory_tail() {
    // `a*?` prefers the shortest match, but only `aaab` as a whole satisfies
    // the `b` that must follow, so the lazy loop is forced to consume every
    // `a` anyway.
    let re = Regex::new(r"a*?b").unwrap();
    let m = re.find("aaab").unwrap();
    assert_eq!(m.group(0), Some("aaab"));
}

#[test]
fn word_boundary_rejects_a_substring_inside_a_larger_word() {
    let re = Regex::new(r"\bcat\b").unwrap();
    assert!(!re.is_match("scatter"));
}

#[test]
fn uri_pattern_splits_every_named_component() {
    let re = Regex::new(
        r"^((?P<scheme>[^:/?#]+):)?(//(?P<authority>[^/?#]*))?(?P<path>[^?#]*)(\?(?P<query>[^#]*))?(#(?P<fragment>.*))?",
    )
    .unwrap();
    let m = re.captures("https://www.google.com/search?q=bazel#frag").unwrap();
    assert_eq!(m.group("scheme"), Some("https"));
    assert_eq!(m.group("authority"), Some("www.google.com"));
    assert_eq!(m.group("path"), Some("/search"));
    assert_eq!(m.group("query"), Some("q=bazel"));
    assert_eq!(m.group("fragment"), Some("frag"));
}

#[test]
fn empty_pattern_matches_empty_string_everywhere() {
    let re = Regex::new("").unwrap();
    let spans: Vec<(usize, usize)> = re.find_iter("ab").map(|m| m.span(0).unwrap()).collect();
    assert_eq!(spans, vec![(0, 0), (1, 1), (2, 2)]);
}

#[test]
fn start_end_anchors_require_an_entirely_empty_string() {
    let re = Regex::new(r"^$").unwrap();
    assert!(re.is_match(""));
    assert!(!re.is_match("x"));
}

#[test]
fn word_boundary_never_matches_in_an_all_punctuation_string() {
    let re = Regex::new(r"\b").unwrap();
    assert!(!re.is_match("...!!!"));
}

#[test]
fn bounded_repetition_zero_to_unbounded_behaves_like_star() {
    let star = Regex::new("a*").unwrap();
    let bounded = Regex::new("a{0,}").unwrap();
    let text = "aaab";
    assert_eq!(star.find(text).unwrap().span(0), bounded.find(text).unwrap().span(0));
}

#[test]
fn exact_zero_repetition_consumes_nothing() {
    let re = Regex::new("a{0}b").unwrap();
    let m = re.find("b").unwrap();
    assert_eq!(m.group(0), Some("b"));
}
