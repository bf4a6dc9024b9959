// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `quickcheck`-driven properties (§8), in the spirit of
//! `BurntSushi-regexp/src/test/quick.rs`'s arbitrary-pattern fuzzing, updated
//! to modern `quickcheck`/`quickcheck_macros` and to this engine's own
//! testable-property list rather than just "never panics."

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

use re2lite::Regex;

/// A pattern string built from regex metacharacters and a small alphabet, the
/// same role `gen_regex_str` plays in the teacher's quickcheck suite: most
/// generated strings are gibberish as regexes, which is exactly the point —
/// `Regex::new` must reject them cleanly (an `Err`, never a panic) rather
/// than assuming every generated string compiles.
#[derive(Clone, Debug)]
struct FuzzPattern(String);

impl Arbitrary for FuzzPattern {
    fn arbitrary(g: &mut Gen) -> FuzzPattern {
        const CHARSET: &[char] =
            &['a', 'b', 'c', 'd', '0', '1', '(', ')', '[', ']', '|', '*', '+', '?', '.', '^', '$', '\\', '-', '{', '}', ','];
        let len = usize::arbitrary(g) % 12;
        let s: String = (0..len).map(|_| *g.choose(CHARSET).unwrap()).collect();
        FuzzPattern(s)
    }
}

/// A haystack built from the same small alphabet the patterns above draw
/// from, so fuzzed patterns and fuzzed haystacks actually have a chance of
/// matching each other instead of missing every time.
#[derive(Clone, Debug)]
struct FuzzHaystack(String);

impl Arbitrary for FuzzHaystack {
    fn arbitrary(g: &mut Gen) -> FuzzHaystack {
        const CHARSET: &[char] = &['a', 'b', 'c', 'd', '0', '1', ' ', '\n'];
        let len = usize::arbitrary(g) % 16;
        let s: String = (0..len).map(|_| *g.choose(CHARSET).unwrap()).collect();
        FuzzHaystack(s)
    }
}

#[quickcheck]
fn no_crashing_on_arbitrary_pattern_text(p: FuzzPattern) -> bool {
    // Whatever `Regex::new` decides (`Ok` or `Err`), it must decide —
    // not panic. Mirrors the teacher's `no_crashing_regex_chars`.
    let _ = Regex::new(&p.0);
    true
}

#[quickcheck]
fn no_crashing_on_arbitrary_input_text(h: FuzzHaystack) -> bool {
    for pattern in ["a*b", r"(a|b)+c?", r"\d+-\w*", "^x$", r"a{1,3}"] {
        let re = Regex::new(pattern).unwrap();
        let _ = re.is_match(&h.0);
        let _ = re.find(&h.0);
        let _ = re.find_iter(&h.0).count();
    }
    true
}

/// §8 property 1: a `search` hit at `start` reproduces under an anchored
/// `match_at` from that same start, with the same end and captures.
#[quickcheck]
fn search_hit_reproduces_under_match_at(h: FuzzHaystack) -> bool {
    for pattern in ["a+", r"(a|b)*c", r"\d+"] {
        let re = Regex::new(pattern).unwrap();
        if let Some(m) = re.find(&h.0) {
            let s = m.start(0).unwrap();
            let e = m.end(0).unwrap();
            let text = &h.0[s..];
            // Anchored re-match from the found start must end at the same
            // absolute offset.
            let anchored = Regex::new(&format!("^(?:{})", pattern)).unwrap();
            match anchored.find(text) {
                Some(am) => {
                    if am.end(0).unwrap() + s != e {
                        return false;
                    }
                }
                None => return false,
            }
        }
    }
    true
}

/// §8 property 2: `fullmatch` succeeds iff an anchored match consumes the
/// entire string.
#[quickcheck]
fn fullmatch_iff_match_consumes_everything(h: FuzzHaystack) -> bool {
    for pattern in ["a*", r"(a|b)+", r"\d+", "x"] {
        let re = Regex::new(pattern).unwrap();
        let full = re.is_fullmatch(&h.0);
        let matches_to_end = re.fullmatch(&h.0).is_some();
        if full != matches_to_end {
            return false;
        }
    }
    true
}

/// §8 property 4: every participating capture's substring equals the
/// original text sliced by its own span.
#[quickcheck]
fn captures_round_trip_through_spans(h: FuzzHaystack) -> bool {
    let re = Regex::new(r"(a+)(b*)(c?)").unwrap();
    if let Some(m) = re.captures(&h.0) {
        for i in 0..=3 {
            if let Some((s, e)) = m.span(i) {
                if m.group(i) != Some(&h.0[s..e]) {
                    return false;
                }
            }
        }
    }
    true
}

/// §8 property 6: greedy vs. lazy share a start but differ in which extreme
/// of length they pick.
#[quickcheck]
fn greedy_and_lazy_share_start_but_bound_length_oppositely(h: FuzzHaystack) -> bool {
    let greedy = Regex::new("a*").unwrap();
    let lazy = Regex::new("a*?").unwrap();
    match (greedy.find(&h.0), lazy.find(&h.0)) {
        (Some(g), Some(l)) => {
            if g.start(0) != l.start(0) {
                return false;
            }
            // `a*?` always prefers zero repetitions when nothing forces more.
            (g.end(0).unwrap() >= l.end(0).unwrap()) && l.group(0) == Some("")
        }
        _ => true,
    }
}

/// §8 property 3: non-overlapping matches from `find_iter` never regress —
/// each match's start is no earlier than the previous match's end.
#[quickcheck]
fn find_iter_matches_never_overlap(h: FuzzHaystack) -> bool {
    let re = Regex::new(r"a+|b+").unwrap();
    let mut last_end = 0;
    for m in re.find_iter(&h.0) {
        let (s, e) = m.span(0).unwrap();
        if s < last_end {
            return false;
        }
        last_end = e;
    }
    true
}

/// §8's "optimizer neutrality" / "fast-path neutrality" properties hold by
/// construction in this crate (the optimizer and fast paths are not
/// separately toggleable at the public API), so instead this checks that a
/// pattern shaped to hit a fast path (anchored literal + digits) agrees with
/// one shaped to force the general simulator (an equivalent pattern wrapped
/// in a capturing group, which disables the fast path per `vm::fast_path`).
#[quickcheck]
fn fast_path_and_general_simulator_agree(h: FuzzHaystack) -> bool {
    let fast = Regex::new(r"^\d+x$").unwrap();
    let general = Regex::new(r"^(\d+)x$").unwrap();
    fast.is_match(&h.0) == general.is_match(&h.0)
}
