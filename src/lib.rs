// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A Python-`re`-compatible, RE2-style regular expression engine with a
//! linear-time Thompson-NFA matching core (§1/§2): parse a pattern into
//! bytecode, peephole-optimize it, and run it through a multi-thread NFA
//! simulation that never backtracks.
//!
//! `Regex` (§10.1) is the public entry point; everything else in this crate
//! is its implementation.

mod ast;
mod char;
mod charset;
mod compiler;
mod error;
mod inst;
mod input;
mod matchobj;
mod optimizer;
mod parser;
mod prefix;
mod program;
mod replacement;
mod vm;

pub use crate::error::{Error, Result};
pub use crate::matchobj::{GroupRef, Match};

use std::borrow::Cow;

use crate::program::CompiledPattern;
use crate::replacement::{parse_replacement_template, ReplacementPiece};

/// A compiled regular expression (§10.1).
///
/// Cheap to clone (`CompiledPattern` holds no interior-mutable scratch
/// state — every VM run allocates its own thread lists), so `Regex` can be
/// shared across threads behind an `Arc` the way the rest of the ecosystem
/// expects without any locking inside the type itself.
#[derive(Clone, Debug)]
pub struct Regex {
    pattern: String,
    compiled: CompiledPattern,
}

impl Regex {
    /// Compiles `pattern`, or returns the first `Error` the parser/compiler
    /// hits (§7).
    pub fn new(pattern: &str) -> Result<Regex> {
        let compiled = program::compile(pattern)?;
        Ok(Regex { pattern: pattern.to_string(), compiled })
    }

    /// The pattern string this `Regex` was compiled from.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// True iff the pattern matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        vm::search(&self.compiled, text, 0).is_some()
    }

    /// The leftmost match anywhere in `text`, or `None`.
    pub fn find<'t>(&self, text: &'t str) -> Option<Match<'t, '_>> {
        self.captures(text)
    }

    /// The leftmost match anywhere in `text`, with full capture-group
    /// access, or `None`.
    pub fn captures<'t>(&self, text: &'t str) -> Option<Match<'t, '_>> {
        let caps = vm::search(&self.compiled, text, 0)?;
        let (_, e) = caps.group_span(0).expect("group 0 always participates in a successful match");
        Some(matchobj::Match::new(text, &self.compiled, caps, 0, e))
    }

    /// True iff the pattern matches the whole of `text`, start to end.
    pub fn is_fullmatch(&self, text: &str) -> bool {
        vm::fullmatch(&self.compiled, text, 0).is_some()
    }

    /// An anchored match requiring the whole of `text` be consumed, or
    /// `None`.
    pub fn fullmatch<'t>(&self, text: &'t str) -> Option<Match<'t, '_>> {
        let caps = vm::fullmatch(&self.compiled, text, 0)?;
        Some(matchobj::Match::new(text, &self.compiled, caps, 0, text.len()))
    }

    /// Every non-overlapping match in `text`, left to right.
    pub fn find_iter<'r, 't>(&'r self, text: &'t str) -> FindMatches<'r, 't> {
        FindMatches { re: self, text, start: 0, done: false }
    }

    /// Alias for `find_iter`: every non-overlapping match, with full
    /// capture-group access (which `find_iter`'s `Match` already provides).
    pub fn captures_iter<'r, 't>(&'r self, text: &'t str) -> FindMatches<'r, 't> {
        self.find_iter(text)
    }

    /// Replaces the first match in `text` with `repl`'s expansion (§6),
    /// returning the original text unchanged (borrowed, no allocation) if
    /// there's no match.
    pub fn replace<'t>(&self, text: &'t str, repl: &str) -> Result<Cow<'t, str>> {
        let pieces = parse_replacement_template(repl, &self.compiled.named_groups)?;
        match self.captures(text) {
            None => Ok(Cow::Borrowed(text)),
            Some(m) => {
                let (s, e) = m.span(0).expect("group 0 always participates");
                let mut out = String::with_capacity(text.len());
                out.push_str(&text[..s]);
                expand(&pieces, &m, &mut out);
                out.push_str(&text[e..]);
                Ok(Cow::Owned(out))
            }
        }
    }

    /// Replaces every non-overlapping match in `text` with `repl`'s
    /// expansion (§6).
    pub fn replace_all<'t>(&self, text: &'t str, repl: &str) -> Result<Cow<'t, str>> {
        let pieces = parse_replacement_template(repl, &self.compiled.named_groups)?;
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        let mut any = false;
        for m in self.find_iter(text) {
            let (s, e) = m.span(0).expect("group 0 always participates");
            out.push_str(&text[last..s]);
            expand(&pieces, &m, &mut out);
            last = e;
            any = true;
        }
        if !any {
            return Ok(Cow::Borrowed(text));
        }
        out.push_str(&text[last..]);
        Ok(Cow::Owned(out))
    }

    /// Splits `text` on every non-overlapping match, keeping the text
    /// between matches (the matches themselves are discarded).
    pub fn split<'r, 't>(&'r self, text: &'t str) -> Split<'r, 't> {
        Split { re: self, text, last: 0, finished: false }
    }
}

fn expand(pieces: &[ReplacementPiece], m: &Match<'_, '_>, out: &mut String) {
    for piece in pieces {
        match piece {
            ReplacementPiece::Literal(s) => out.push_str(s),
            ReplacementPiece::Group(n) => {
                if let Some(s) = m.group(*n) {
                    out.push_str(s);
                }
            }
            ReplacementPiece::Named(name) => {
                if let Some(s) = m.group(name.as_str()) {
                    out.push_str(s);
                }
            }
        }
    }
}

/// Iterator over every non-overlapping match in a string, produced by
/// [`Regex::find_iter`]/[`Regex::captures_iter`].
pub struct FindMatches<'r, 't> {
    re: &'r Regex,
    text: &'t str,
    start: usize,
    done: bool,
}

impl<'r, 't> Iterator for FindMatches<'r, 't> {
    type Item = Match<'t, 'r>;

    fn next(&mut self) -> Option<Match<'t, 'r>> {
        if self.done || self.start > self.text.len() {
            return None;
        }
        let caps = vm::search(&self.re.compiled, self.text, self.start)?;
        let (s, e) = caps.group_span(0).expect("group 0 always participates in a successful match");
        // An empty match can't advance the search position itself, or the
        // same zero-width match would be yielded forever; step forward by
        // one code point instead (not one byte, to stay on a char boundary).
        self.start = if e > self.start {
            e
        } else {
            match self.text[e..].chars().next() {
                Some(c) => e + c.len_utf8(),
                None => {
                    self.done = true;
                    e + 1
                }
            }
        };
        Some(matchobj::Match::new(self.text, &self.re.compiled, caps, s, e))
    }
}

/// Iterator over the substrings between non-overlapping matches, produced
/// by [`Regex::split`].
pub struct Split<'r, 't> {
    re: &'r Regex,
    text: &'t str,
    last: usize,
    finished: bool,
}

impl<'r, 't> Iterator for Split<'r, 't> {
    type Item = &'t str;

    fn next(&mut self) -> Option<&'t str> {
        if self.finished {
            return None;
        }
        match vm::search(&self.re.compiled, self.text, self.last) {
            Some(caps) => {
                let (s, e) = caps.group_span(0).expect("group 0 always participates in a successful match");
                if e == self.last && s == self.last {
                    // A zero-width match right at the cursor would split an
                    // empty piece out forever; treat it as no match here and
                    // stop, matching Python's refusal to split on the empty
                    // string unless capturing groups are involved.
                    self.finished = true;
                    return Some(&self.text[self.last..]);
                }
                let piece = &self.text[self.last..s];
                self.last = e;
                Some(piece)
            }
            None => {
                self.finished = true;
                Some(&self.text[self.last..])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_match_and_find() {
        let re = Regex::new(r"\d+").unwrap();
        assert!(re.is_match("room 42"));
        let m = re.find("room 42").unwrap();
        assert_eq!(m.group(0), Some("42"));
    }

    #[test]
    fn captures_exposes_groups() {
        let re = Regex::new(r"(?P<y>\d{4})-(?P<m>\d{2})").unwrap();
        let caps = re.captures("born 1984-06").unwrap();
        assert_eq!(caps.group("y"), Some("1984"));
        assert_eq!(caps.group("m"), Some("06"));
    }

    #[test]
    fn fullmatch_rejects_partial_input() {
        let re = Regex::new(r"\d+").unwrap();
        assert!(!re.is_fullmatch("42 apples"));
        assert!(re.is_fullmatch("42"));
    }

    #[test]
    fn find_iter_yields_every_non_overlapping_match() {
        let re = Regex::new(r"\d+").unwrap();
        let found: Vec<&str> = re.find_iter("a1 b22 c333").map(|m| m.group(0).unwrap()).collect();
        assert_eq!(found, vec!["1", "22", "333"]);
    }

    #[test]
    fn find_iter_handles_zero_width_matches_without_looping() {
        let re = Regex::new(r"a*").unwrap();
        let found: Vec<&str> = re.find_iter("baab").map(|m| m.group(0).unwrap()).collect();
        assert_eq!(found, vec!["", "aa", "", ""]);
    }

    #[test]
    fn replace_only_touches_first_match() {
        let re = Regex::new(r"\d+").unwrap();
        assert_eq!(re.replace("a1 b2", "#").unwrap(), "a# b2");
    }

    #[test]
    fn replace_all_touches_every_match() {
        let re = Regex::new(r"\d+").unwrap();
        assert_eq!(re.replace_all("a1 b2 c3", "#").unwrap(), "a# b# c#");
    }

    #[test]
    fn replace_all_expands_numbered_and_named_groups() {
        let re = Regex::new(r"(?P<first>\w+) (?P<last>\w+)").unwrap();
        let out = re.replace_all("Ada Lovelace, Grace Hopper", r"\g<last>, \g<first>").unwrap();
        assert_eq!(out, "Lovelace, Ada, Hopper, Grace");
    }

    #[test]
    fn replace_with_no_match_borrows_input() {
        let re = Regex::new(r"zzz").unwrap();
        match re.replace_all("hello", "#").unwrap() {
            Cow::Borrowed(s) => assert_eq!(s, "hello"),
            Cow::Owned(_) => panic!("expected a borrowed Cow when nothing matched"),
        }
    }

    #[test]
    fn split_keeps_the_gaps_between_matches() {
        let re = Regex::new(r",\s*").unwrap();
        let pieces: Vec<&str> = re.split("a, b,c ,  d").collect();
        assert_eq!(pieces, vec!["a", "b", "c ", "d"]);
    }

    #[test]
    fn compile_error_is_returned_not_panicked() {
        assert!(Regex::new("a{5,1}").is_err());
    }
}
