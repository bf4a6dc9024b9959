// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `Ast` to `Prog` (§4.1): a textbook Thompson construction, one recursive
//! call per node. Branching instructions (`Split`, `Jump`) are emitted as
//! placeholders and backpatched once their target PC is known, the same
//! technique `other_examples/.../dacha-pkg-automata-vm-compiler.rs`'s
//! `compile_node` uses directly against bytecode; here it runs over an
//! already-complete tree instead of a single left-to-right token stream, so
//! there's no need to defer compiling an alternation's later branches.

use crate::ast::Ast;
use crate::inst::{Inst, InstIdx, Prog};

pub struct Compiled {
    pub prog: Prog,
    pub has_case_insensitive: bool,
}

pub fn compile(ast: &Ast) -> Compiled {
    let mut c = Compiler { prog: Prog::new(Vec::new()), has_case_insensitive: false };
    c.emit_seq(|goto| Inst::Save { slot: 0, goto });
    c.compile(ast);
    c.emit_seq(|goto| Inst::Save { slot: 1, goto });
    c.prog.push(Inst::Match);
    Compiled { prog: c.prog, has_case_insensitive: c.has_case_insensitive }
}

struct Compiler {
    prog: Prog,
    has_case_insensitive: bool,
}

impl Compiler {
    /// Push an instruction whose successor is simply "whatever gets pushed
    /// next" — true for every instruction the compiler emits except the
    /// branching ones, which always know their own targets by construction.
    fn emit_seq(&mut self, f: impl FnOnce(InstIdx) -> Inst) -> InstIdx {
        let goto = self.prog.len() + 1;
        self.prog.push(f(goto))
    }

    fn compile(&mut self, ast: &Ast) {
        match *ast {
            Ast::Empty => {}
            Ast::Literal { c, case_insensitive } => {
                self.has_case_insensitive |= case_insensitive;
                let c = if case_insensitive { c.to_lowercase().next().unwrap_or(c) } else { c };
                self.emit_seq(|goto| Inst::Char { c, case_insensitive, goto });
            }
            Ast::AnyChar { dot_all } => {
                if dot_all {
                    self.emit_seq(|goto| Inst::AnyWithNewline { goto });
                } else {
                    self.emit_seq(|goto| Inst::AnyExceptNewline { goto });
                }
            }
            Ast::Class { ref set, negated, case_insensitive } => {
                self.has_case_insensitive |= case_insensitive;
                let set = (**set).clone();
                self.emit_seq(|goto| Inst::Set { set, negated, case_insensitive, goto });
            }
            Ast::Concat(ref parts) => {
                for part in parts {
                    self.compile(part);
                }
            }
            Ast::Alternate(ref branches) => self.compile_alternate(branches),
            Ast::Group { slot, ref inner } => self.compile_group(slot, inner),
            Ast::Repeat { ref inner, min, max, greedy } => self.compile_repeat(inner, min, max, greedy),
            Ast::AnchorStart => {
                self.emit_seq(|goto| Inst::AnchorStart { goto });
            }
            Ast::AnchorEnd => {
                self.emit_seq(|goto| Inst::AnchorEnd { goto });
            }
            Ast::AnchorLineStart => {
                self.emit_seq(|goto| Inst::AnchorLineStart { goto });
            }
            Ast::AnchorLineEnd => {
                self.emit_seq(|goto| Inst::AnchorLineEnd { goto });
            }
            Ast::WordBoundary => {
                self.emit_seq(|goto| Inst::WordBoundary { goto });
            }
            Ast::NotWordBoundary => {
                self.emit_seq(|goto| Inst::NotWordBoundary { goto });
            }
        }
    }

    /// Recursive right-leaning chain of binary `Split`s, highest-priority
    /// branch first: `a|b|c` compiles as `Split(a, Split(b, c))`.
    fn compile_alternate(&mut self, branches: &[Ast]) {
        match branches {
            [] => {}
            [only] => self.compile(only),
            [first, rest @ ..] => {
                let split_pc = self.prog.push(Inst::Split { goto1: 0, goto2: 0 });
                let branch1_start = self.prog.len();
                self.compile(first);
                let jump_pc = self.prog.push(Inst::Jump { goto: 0 });
                let branch2_start = self.prog.len();
                self.compile_alternate(rest);
                let end = self.prog.len();
                self.prog[split_pc] = Inst::Split { goto1: branch1_start, goto2: branch2_start };
                self.prog[jump_pc] = Inst::Jump { goto: end };
            }
        }
    }

    fn compile_group(&mut self, slot: Option<usize>, inner: &Ast) {
        match slot {
            Some(i) => {
                self.emit_seq(|goto| Inst::Save { slot: 2 * i, goto });
                self.compile(inner);
                self.emit_seq(|goto| Inst::Save { slot: 2 * i + 1, goto });
            }
            None => self.compile(inner),
        }
    }

    fn compile_repeat(&mut self, inner: &Ast, min: u32, max: Option<u32>, greedy: bool) {
        for _ in 0..min {
            self.compile(inner);
        }
        match max {
            None => self.compile_star(inner, greedy),
            Some(max) => {
                // `{min,max}`: the first `min` copies are required (already
                // emitted above); each of the remaining `max - min` copies is
                // independently optional, so skipping an earlier one still
                // allows a later one to match — together they cover exactly
                // "0 to (max - min) additional repetitions."
                for _ in min..max {
                    self.compile_optional(inner, greedy);
                }
            }
        }
    }

    fn compile_star(&mut self, inner: &Ast, greedy: bool) {
        let split_pc = self.prog.push(Inst::Split { goto1: 0, goto2: 0 });
        let body_start = self.prog.len();
        self.compile(inner);
        self.prog.push(Inst::Jump { goto: split_pc });
        let exit_pc = self.prog.len();
        self.prog[split_pc] = if greedy {
            Inst::Split { goto1: body_start, goto2: exit_pc }
        } else {
            Inst::Split { goto1: exit_pc, goto2: body_start }
        };
    }

    fn compile_optional(&mut self, inner: &Ast, greedy: bool) {
        let split_pc = self.prog.push(Inst::Split { goto1: 0, goto2: 0 });
        let body_start = self.prog.len();
        self.compile(inner);
        let skip_pc = self.prog.len();
        self.prog[split_pc] = if greedy {
            Inst::Split { goto1: body_start, goto2: skip_pc }
        } else {
            Inst::Split { goto1: skip_pc, goto2: body_start }
        };
    }
}
