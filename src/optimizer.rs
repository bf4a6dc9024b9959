// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Three peephole passes over compiled bytecode (§4.2), run in order:
//! greedy-loop collapse, string folding, jump threading (with dead-code
//! sweep). Each pass rebuilds the instruction list and carries a fresh
//! old-PC-to-new-PC map so every `goto`/`goto1`/`goto2`/`exit_pc` reference
//! stays consistent; none of the three changes the language the program
//! accepts, only how the VM walks it.

use std::collections::HashSet;

use crate::inst::{Inst, InstIdx, Prog};

const JUMP_THREAD_LIMIT: usize = 100;

pub fn optimize(prog: Prog) -> Prog {
    let prog = collapse_greedy_loops(prog);
    let prog = fold_strings(prog);
    thread_and_sweep(prog)
}

fn jump_targets(prog: &Prog) -> HashSet<InstIdx> {
    jump_targets_excluding(prog.as_slice(), None)
}

/// Every PC branched into by a `Split`/`Jump`/`GreedyLoop`, plus the entry
/// point 0. When `exclude` is `Some(pc)`, that instruction's own
/// contribution is left out — used to ask "does anything ELSE branch here?"
fn jump_targets_excluding(insts: &[Inst], exclude: Option<InstIdx>) -> HashSet<InstIdx> {
    let mut set = HashSet::new();
    set.insert(0);
    for (i, inst) in insts.iter().enumerate() {
        if Some(i) == exclude {
            continue;
        }
        match *inst {
            Inst::Split { goto1, goto2 } => {
                set.insert(goto1);
                set.insert(goto2);
            }
            Inst::Jump { goto } => {
                set.insert(goto);
            }
            Inst::GreedyLoop { exit_pc, .. } => {
                set.insert(exit_pc);
            }
            _ => {}
        }
    }
    set
}

fn remap_inst(inst: Inst, map: &[InstIdx]) -> Inst {
    use Inst::*;
    match inst {
        Char { c, case_insensitive, goto } => Char { c, case_insensitive, goto: map[goto] },
        String { s, case_insensitive, goto } => String { s, case_insensitive, goto: map[goto] },
        AnyWithNewline { goto } => AnyWithNewline { goto: map[goto] },
        AnyExceptNewline { goto } => AnyExceptNewline { goto: map[goto] },
        Set { set, negated, case_insensitive, goto } => {
            Set { set, negated, case_insensitive, goto: map[goto] }
        }
        Save { slot, goto } => Save { slot, goto: map[goto] },
        Split { goto1, goto2 } => Split { goto1: map[goto1], goto2: map[goto2] },
        Jump { goto } => Jump { goto: map[goto] },
        Match => Match,
        AnchorStart { goto } => AnchorStart { goto: map[goto] },
        AnchorEnd { goto } => AnchorEnd { goto: map[goto] },
        AnchorLineStart { goto } => AnchorLineStart { goto: map[goto] },
        AnchorLineEnd { goto } => AnchorLineEnd { goto: map[goto] },
        WordBoundary { goto } => WordBoundary { goto: map[goto] },
        NotWordBoundary { goto } => NotWordBoundary { goto: map[goto] },
        GreedyLoop { chars, negated, case_insensitive, exit_pc } => {
            GreedyLoop { chars, negated, case_insensitive, exit_pc: map[exit_pc] }
        }
    }
}

/// Collapse `Split(body, exit) ; <single consuming inst> ; Jump(split)` —
/// exactly what `compile_star` in `compiler.rs` emits for `X*` — into one
/// `GreedyLoop`, provided the exit path can't also start with a member of
/// `X`'s set (otherwise the VM's "consume until it stops matching" walk
/// could commit past a position ordinary leftmost-first backtracking would
/// have backed off to).
fn collapse_greedy_loops(prog: Prog) -> Prog {
    let insts = prog.as_slice().to_vec();
    let n = insts.len();

    let mut new_insts: Vec<Inst> = Vec::with_capacity(n);
    let mut map = vec![0usize; n];
    let mut pc = 0;
    while pc < n {
        if let Some((body_pc, exit_pc, jump_pc)) = loop_shape(&insts, pc) {
            if is_disjoint_from_exit(&prog, &insts[body_pc], exit_pc) {
                let new_pc = new_insts.len();
                for old in pc..=jump_pc {
                    map[old] = new_pc;
                }
                new_insts.push(make_greedy_loop(&insts[body_pc], exit_pc));
                pc = jump_pc + 1;
                continue;
            }
        }
        map[pc] = new_insts.len();
        new_insts.push(insts[pc].clone());
        pc += 1;
    }

    let new_insts = new_insts.into_iter().map(|i| remap_inst(i, &map)).collect();
    Prog::new(new_insts)
}

/// If `pc` begins the three-instruction `Split/body/Jump` shape of a
/// compiled `X*`, returns `(body_pc, exit_pc, jump_pc)`.
fn loop_shape(insts: &[Inst], pc: InstIdx) -> Option<(InstIdx, InstIdx, InstIdx)> {
    let (goto1, goto2) = match insts.get(pc)? {
        Inst::Split { goto1, goto2 } => (*goto1, *goto2),
        _ => return None,
    };
    let body_pc = pc + 1;
    let body = insts.get(body_pc)?;
    if !matches!(body, Inst::Char { .. } | Inst::Set { .. }) {
        return None;
    }
    if body.goto() != Some(body_pc + 1) {
        return None;
    }
    let jump_pc = body_pc + 1;
    let jump_target = match insts.get(jump_pc)? {
        Inst::Jump { goto } => *goto,
        _ => return None,
    };
    if jump_target != pc {
        return None;
    }
    // Nothing besides this loop's own Split may branch into the body —
    // i.e. no other instruction treats the body as a jump target.
    if jump_targets_excluding(insts, Some(pc)).contains(&body_pc) {
        return None;
    }
    let exit_pc = jump_pc + 1;
    let is_this_shape =
        (goto1 == body_pc && goto2 == exit_pc) || (goto2 == body_pc && goto1 == exit_pc);
    if !is_this_shape {
        return None;
    }
    Some((body_pc, exit_pc, jump_pc))
}

fn make_greedy_loop(body: &Inst, exit_pc: InstIdx) -> Inst {
    match body {
        Inst::Char { c, case_insensitive, .. } => {
            let mut b = crate::charset::CharsetBuilder::new();
            b.push_char(*c);
            Inst::GreedyLoop {
                chars: b.finish(),
                negated: false,
                case_insensitive: *case_insensitive,
                exit_pc,
            }
        }
        Inst::Set { set, negated, case_insensitive, .. } => Inst::GreedyLoop {
            chars: set.clone(),
            negated: *negated,
            case_insensitive: *case_insensitive,
            exit_pc,
        },
        _ => unreachable!("loop_shape only admits Char/Set bodies"),
    }
}

fn is_disjoint_from_exit(prog: &Prog, body: &Inst, exit_pc: InstIdx) -> bool {
    let target = prog.skip_saves(exit_pc);
    let exit_inst = &prog.as_slice()[target];
    match exit_inst {
        Inst::Match
        | Inst::AnchorStart { .. }
        | Inst::AnchorEnd { .. }
        | Inst::AnchorLineStart { .. }
        | Inst::AnchorLineEnd { .. }
        | Inst::WordBoundary { .. }
        | Inst::NotWordBoundary { .. } => true,
        Inst::Char { c: exit_c, .. } => match body {
            Inst::Char { c, .. } => c != exit_c,
            Inst::Set { set, negated, .. } => set.contains(*exit_c) == *negated,
            _ => false,
        },
        Inst::Set { set: exit_set, negated: exit_negated, .. } => match body {
            Inst::Char { c, .. } => exit_set.contains(*c) == *exit_negated,
            Inst::Set { .. } => false, // conservative: can't cheaply prove two sets disjoint
            _ => false,
        },
        _ => false,
    }
}

/// Fold maximal runs of same-case-sensitivity `Char` instructions, laid out
/// back to back with nothing branching into the middle of the run, into a
/// single `String` instruction.
fn fold_strings(prog: Prog) -> Prog {
    let insts = prog.as_slice().to_vec();
    let n = insts.len();
    let targets = jump_targets(&prog);

    let mut new_insts = Vec::with_capacity(n);
    let mut map = vec![0usize; n];
    let mut pc = 0;
    while pc < n {
        if let Inst::Char { case_insensitive, .. } = &insts[pc] {
            let case_insensitive = *case_insensitive;
            let mut end = pc + 1;
            while end < n && !targets.contains(&end) {
                match (&insts[end - 1], &insts[end]) {
                    (prev, Inst::Char { case_insensitive: ci2, .. })
                        if *ci2 == case_insensitive && prev.goto() == Some(end) =>
                    {
                        end += 1;
                    }
                    _ => break,
                }
            }
            if end - pc >= 2 {
                let s: String = insts[pc..end]
                    .iter()
                    .map(|i| match i {
                        Inst::Char { c, .. } => *c,
                        _ => unreachable!(),
                    })
                    .collect();
                let goto = insts[end - 1].goto().unwrap();
                let new_pc = new_insts.len();
                for old in pc..end {
                    map[old] = new_pc;
                }
                new_insts.push(Inst::String { s, case_insensitive, goto });
                pc = end;
                continue;
            }
        }
        map[pc] = new_insts.len();
        new_insts.push(insts[pc].clone());
        pc += 1;
    }

    let new_insts = new_insts.into_iter().map(|i| remap_inst(i, &map)).collect();
    Prog::new(new_insts)
}

/// Follow chains through `Jump` instructions so every branch points straight
/// at real work, then drop anything unreachable from pc 0 (this is where
/// the now-orphaned `Jump`s threading bypassed get swept away).
fn thread_and_sweep(prog: Prog) -> Prog {
    let mut insts = prog.into_vec();
    let n = insts.len();

    for pc in 0..n {
        thread_one(&mut insts, pc, true);
        thread_one(&mut insts, pc, false);
    }

    let mut reachable = vec![false; n];
    let mut stack = vec![0usize];
    while let Some(pc) = stack.pop() {
        if pc >= n || reachable[pc] {
            continue;
        }
        reachable[pc] = true;
        match &insts[pc] {
            Inst::Split { goto1, goto2 } => {
                stack.push(*goto1);
                stack.push(*goto2);
            }
            Inst::Jump { goto } => stack.push(*goto),
            Inst::GreedyLoop { exit_pc, .. } => stack.push(*exit_pc),
            Inst::Match => {}
            other => {
                if let Some(goto) = other.goto() {
                    stack.push(goto);
                }
            }
        }
    }

    let mut map = vec![0usize; n];
    let mut new_insts = Vec::with_capacity(n);
    for (pc, inst) in insts.iter().enumerate() {
        if reachable[pc] {
            map[pc] = new_insts.len();
            new_insts.push(inst.clone());
        }
    }
    let new_insts = new_insts.into_iter().map(|i| remap_inst(i, &map)).collect();
    Prog::new(new_insts)
}

/// Rewrite `insts[pc]`'s first (`want_goto1 == true`) or second branch
/// target to skip over any chain of `Jump` instructions it points at.
fn thread_one(insts: &mut [Inst], pc: InstIdx, want_goto1: bool) {
    let start = match &insts[pc] {
        Inst::Split { goto1, goto2 } => {
            if want_goto1 {
                *goto1
            } else {
                *goto2
            }
        }
        _ if !want_goto1 => return,
        other => match other.goto() {
            Some(g) => g,
            None => return,
        },
    };
    let mut target = start;
    let mut steps = 0;
    while let Inst::Jump { goto } = &insts[target] {
        target = *goto;
        steps += 1;
        if steps > JUMP_THREAD_LIMIT {
            break;
        }
    }
    if target == start {
        return;
    }
    match &mut insts[pc] {
        Inst::Split { goto1, goto2 } => {
            if want_goto1 {
                *goto1 = target;
            } else {
                *goto2 = target;
            }
        }
        other => {
            if let Some(g) = other.goto_mut() {
                *g = target;
            }
        }
    }
}
