// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Walks the optimized bytecode (§4.3) looking for a fixed literal prefix, a
//! single disjoint `GreedyLoop`, and a fixed literal suffix, so the VM
//! (`vm.rs`) can skip straight to the NFA simulation's hard part instead of
//! running the thread scheduler over every code unit. This is a bytecode
//! shape analysis only — it produces plain data; the actual substring
//! search at match time is done in `vm.rs` with `memchr`, mirroring how the
//! teacher's `literals.rs` (`BuildPrefixes`) is consulted by `nfa.rs` rather
//! than doing its own searching.

use crate::charset::Charset;
use crate::inst::{Inst, InstIdx, Prog};

#[derive(Clone, Debug)]
pub struct GreedySet {
    pub chars: Charset,
    pub negated: bool,
    pub case_insensitive: bool,
}

/// What's known about a compiled pattern's shape ahead of time, so the VM
/// can pick a fast path instead of always stepping the thread scheduler.
#[derive(Clone, Debug, Default)]
pub struct PrefixAnalysis {
    pub is_anchored_start: bool,
    pub is_anchored_end: bool,
    /// A literal run every match must start with, right after the anchor
    /// (if any). Matched case-sensitively unless `prefix_case_insensitive`.
    pub prefix: Option<String>,
    pub prefix_case_insensitive: bool,
    /// A single disjoint greedy loop immediately following the prefix.
    pub greedy_set: Option<GreedySet>,
    /// A literal run every match must end with, immediately after
    /// `greedy_set` (or after `prefix` if there's no greedy set).
    pub suffix: Option<String>,
    pub suffix_case_insensitive: bool,
    /// True iff `suffix`'s first code unit cannot itself be a member of
    /// `greedy_set`. When this holds, a `search`-with-suffix fast path can
    /// find the suffix with a plain `str::find` and trust that the greedy
    /// set could not have eaten into it, without re-running the simulator
    /// to check where the loop actually stopped.
    pub is_suffix_disjoint: bool,
}

impl PrefixAnalysis {
    pub fn analyze(prog: &Prog) -> PrefixAnalysis {
        let mut a = PrefixAnalysis::default();
        if prog.is_empty() {
            return a;
        }
        let mut pc = prog.skip_saves(0);
        if matches!(&prog[pc], Inst::AnchorStart { .. }) {
            a.is_anchored_start = true;
            pc = prog.skip_saves(prog[pc].goto().unwrap());
        }

        if let Some((literal, case_insensitive, next)) = read_literal_run(prog, pc) {
            a.prefix = Some(literal);
            a.prefix_case_insensitive = case_insensitive;
            pc = prog.skip_saves(next);
        }

        if let Inst::GreedyLoop { chars, negated, case_insensitive, exit_pc } = &prog[pc] {
            a.greedy_set =
                Some(GreedySet { chars: chars.clone(), negated: *negated, case_insensitive: *case_insensitive });
            pc = prog.skip_saves(*exit_pc);
        }

        if let Some((literal, case_insensitive, next)) = read_literal_run(prog, pc) {
            a.suffix = Some(literal);
            a.suffix_case_insensitive = case_insensitive;
            pc = prog.skip_saves(next);
        }

        if matches!(&prog[pc], Inst::AnchorEnd { .. }) {
            a.is_anchored_end = true;
        }

        a.is_suffix_disjoint = match (&a.greedy_set, &a.suffix) {
            (Some(set), Some(suffix)) => match suffix.chars().next() {
                Some(first) => {
                    let probe = if set.case_insensitive {
                        first.to_lowercase().next().unwrap_or(first)
                    } else {
                        first
                    };
                    let is_member = set.chars.contains(probe) != set.negated;
                    !is_member
                }
                None => true,
            },
            // No loop for the suffix to collide with, or no suffix to
            // collide: trivially disjoint.
            _ => true,
        };

        a
    }
}

/// If `pc` is a `Char` or `String` instruction, returns its text, whether it
/// is case-insensitive, and the PC it falls through to.
fn read_literal_run(prog: &Prog, pc: InstIdx) -> Option<(String, bool, InstIdx)> {
    match &prog[pc] {
        Inst::Char { c, case_insensitive, goto } => Some((c.to_string(), *case_insensitive, *goto)),
        Inst::String { s, case_insensitive, goto } => Some((s.clone(), *case_insensitive, *goto)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile;
    use crate::optimizer::optimize;
    use crate::parser::parse;

    fn analyze(pattern: &str) -> PrefixAnalysis {
        let parsed = parse(pattern).unwrap();
        let compiled = compile(&parsed.ast);
        let prog = optimize(compiled.prog);
        PrefixAnalysis::analyze(&prog)
    }

    #[test]
    fn finds_anchored_literal_prefix() {
        let a = analyze("^abc");
        assert!(a.is_anchored_start);
        assert_eq!(a.prefix.as_deref(), Some("abc"));
    }

    #[test]
    fn suffix_disjoint_from_greedy_digits() {
        let a = analyze("[0-9]*cd$");
        assert!(a.is_suffix_disjoint);
    }

    #[test]
    fn suffix_not_disjoint_when_first_char_overlaps_set() {
        let a = analyze("[a-z]*az$");
        assert!(!a.is_suffix_disjoint);
    }

    #[test]
    fn finds_prefix_then_greedy_set_then_suffix() {
        let a = analyze("ab[0-9]*cd$");
        assert_eq!(a.prefix.as_deref(), Some("ab"));
        assert!(a.greedy_set.is_some());
        assert_eq!(a.suffix.as_deref(), Some("cd"));
        assert!(a.is_anchored_end);
    }

    #[test]
    fn unanchored_pattern_has_no_prefix_anchor() {
        let a = analyze("a+b");
        assert!(!a.is_anchored_start);
        assert!(!a.is_anchored_end);
    }
}
