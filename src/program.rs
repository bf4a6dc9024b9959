// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The compiled-pattern record (§3/§4) and the pipeline that builds one from
//! a pattern string: parse, compile, optimize, analyze.
//!
//! The teacher's `Program` carries a `Pool<NfaThreads>`/`Pool<BackMachine>`
//! pair of cross-call thread-state caches and a `MatchEngine` heuristic that
//! picks between its NFA and backtracking engines. Neither is reinstated
//! here (DESIGN.md, "Dropped teacher functionality") — there's only one
//! execution engine, and the VM allocates its own thread lists per call.

use std::collections::HashMap;

use crate::compiler;
use crate::error::Result;
use crate::inst::Prog;
use crate::optimizer;
use crate::parser;
use crate::prefix::PrefixAnalysis;

/// Everything the VM and the public façade need to run a pattern: the
/// optimized bytecode, capture-group bookkeeping, and (when the bytecode's
/// shape allows it) the prefix/suffix/greedy-set analysis that lets the VM
/// skip the thread scheduler entirely.
#[derive(Clone, Debug)]
pub struct CompiledPattern {
    pub bytecode: Prog,
    pub named_groups: HashMap<String, usize>,
    pub group_count: usize,
    pub has_case_insensitive: bool,
    pub opt: Option<PrefixAnalysis>,
}

impl CompiledPattern {
    /// Number of capture groups including group 0 (the whole match).
    /// Mirrors the teacher's free function `program::num_captures`, folded
    /// into a method since it now belongs to the record it describes
    /// instead of standing beside it.
    pub fn num_captures(&self) -> usize {
        self.group_count + 1
    }

    /// Length of the flat register vector a VM run allocates: two slots per
    /// capture group (including group 0) plus one trailing `lastindex` slot.
    pub fn num_slots(&self) -> usize {
        2 * self.num_captures() + 1
    }
}

/// Parse, compile, optimize, and analyze a pattern in one pipeline.
pub fn compile(pattern: &str) -> Result<CompiledPattern> {
    let parsed = parser::parse(pattern)?;
    let compiled = compiler::compile(&parsed.ast);
    let bytecode = optimizer::optimize(compiled.prog);
    let opt = Some(PrefixAnalysis::analyze(&bytecode));
    Ok(CompiledPattern {
        bytecode,
        named_groups: parsed.named_groups,
        group_count: parsed.group_count,
        has_case_insensitive: compiled.has_case_insensitive,
        opt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_and_counts_captures() {
        let cp = compile(r"(a)(?P<x>b)").unwrap();
        assert_eq!(cp.group_count, 2);
        assert_eq!(cp.num_captures(), 3);
        assert_eq!(cp.num_slots(), 7);
        assert_eq!(cp.named_groups.get("x"), Some(&2));
    }

    #[test]
    fn clone_is_independent() {
        let cp = compile("abc").unwrap();
        let cp2 = cp.clone();
        assert_eq!(cp2.bytecode.len(), cp.bytecode.len());
    }

    #[test]
    fn rejects_malformed_pattern() {
        assert!(compile("a{3,1}").is_err());
    }
}
