// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Multi-thread NFA simulation (§4.4): Pike's VM over the bytecode the
//! compiler and optimizer produce, plus the prefix/suffix fast paths that
//! let common shapes skip the thread scheduler entirely.
//!
//! The thread-list/epsilon-closure shape is grounded in the teacher's
//! `nfa.rs` (`Threads`, `exec_`'s per-index loop, the `mem::swap`
//! double-buffering of `clist`/`nlist`, unanchored-start injection at PC 0).
//! The closure itself is *not* native recursion, unlike the teacher's
//! `add()` — it walks an explicit stack of `Frame`s instead, the technique
//! `other_examples/.../pikevm.rs`'s `FollowEpsilon::{Ip, Capture}` uses, so
//! that a capture register write made while descending into one branch of a
//! `Split` is undone before the next branch runs, without ever recursing
//! into the Rust call stack.
//!
//! `Inst::String` folds a run of characters into one opcode (§4.2), which
//! means a single static PC can be "partway through" matching that run at
//! several different depths at once across the unanchored start positions
//! a search tries. `AddrMap` gives each (pc, how-many-characters-matched)
//! pair its own slot in the thread lists' dedup space, so those partial
//! matches can't collide the way they would under plain per-PC dedup.

use crate::char::Char;
use crate::charset::Charset;
use crate::inst::{Inst, InstIdx, Prog};
use crate::input::{At, Input};
use crate::prefix::{GreedySet, PrefixAnalysis};
use crate::program::CompiledPattern;

/// The flat capture-register vector a VM run produces: two slots per group
/// (including group 0, the whole match) plus the id of the most recently
/// closed group.
#[derive(Clone, Debug)]
pub struct Captures {
    slots: Vec<Option<usize>>,
    pub lastindex: Option<usize>,
}

impl Captures {
    fn new(num_groups: usize) -> Captures {
        Captures { slots: vec![None; 2 * num_groups], lastindex: None }
    }

    fn set_raw(&mut self, slot: usize, v: Option<usize>) -> Option<usize> {
        let old = self.slots[slot];
        self.slots[slot] = v;
        old
    }

    /// The `(start, end)` byte-offset span of capture group `i` (`i == 0`
    /// is the whole match), or `None` if that group didn't participate.
    pub fn group_span(&self, i: usize) -> Option<(usize, usize)> {
        let s = self.slots.get(2 * i).copied().flatten()?;
        let e = self.slots.get(2 * i + 1).copied().flatten()?;
        Some((s, e))
    }

    /// Number of groups this vector has slots for, including group 0.
    pub fn num_groups(&self) -> usize {
        self.slots.len() / 2
    }
}

/// Maps `(pc, cursor)` pairs to a unique dense index, so a multi-character
/// `String` instruction gets one dedup slot per character already matched
/// instead of sharing a single slot across every depth. Ordinary
/// instructions always use `cursor == 0` and get exactly one slot.
struct AddrMap {
    base: Vec<usize>,
}

impl AddrMap {
    fn build(prog: &Prog) -> AddrMap {
        let mut base = Vec::with_capacity(prog.len() + 1);
        let mut acc = 0usize;
        for inst in prog.as_slice() {
            base.push(acc);
            acc += match inst {
                Inst::String { s, .. } => s.chars().count().max(1),
                _ => 1,
            };
        }
        base.push(acc);
        AddrMap { base }
    }

    fn total(&self) -> usize {
        *self.base.last().unwrap_or(&0)
    }

    fn addr(&self, pc: InstIdx, cursor: usize) -> usize {
        self.base[pc] + cursor
    }
}

/// Precomputed "is there a word character starting/ending here" tables, so
/// `\b`/`\B` become O(1) lookups instead of re-decoding the neighboring
/// UTF-8 character on every check. Built once per run, only when the
/// program actually contains a word-boundary instruction.
struct WordMask {
    starts: Vec<bool>,
    ends: Vec<bool>,
}

impl WordMask {
    fn build(text: &str) -> WordMask {
        let n = text.len();
        let mut starts = vec![false; n + 1];
        let mut ends = vec![false; n + 1];
        for (i, c) in text.char_indices() {
            let is_word = crate::char::is_word_byte_char(c);
            starts[i] = is_word;
            ends[i + c.len_utf8()] = is_word;
        }
        WordMask { starts, ends }
    }

    fn is_boundary(&self, pos: usize) -> bool {
        self.ends[pos] != self.starts[pos]
    }
}

fn prog_needs_word_mask(prog: &Prog) -> bool {
    prog.as_slice().iter().any(|i| matches!(i, Inst::WordBoundary { .. } | Inst::NotWordBoundary { .. }))
}

struct Thread {
    pc: InstIdx,
    cursor: usize,
    caps: Captures,
}

/// A sparse set of virtual addresses (see `AddrMap`), each holding at most
/// one live thread, visited in the priority order they were added.
struct ThreadList {
    sparse: Vec<u32>,
    order: Vec<usize>,
    slots: Vec<Option<Thread>>,
}

impl ThreadList {
    fn new(total_addrs: usize) -> ThreadList {
        ThreadList {
            sparse: vec![0; total_addrs],
            order: Vec::new(),
            slots: (0..total_addrs).map(|_| None).collect(),
        }
    }

    fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn contains(&self, addr: usize) -> bool {
        let s = self.sparse[addr] as usize;
        s < self.order.len() && self.order[s] == addr
    }

    fn mark(&mut self, addr: usize) {
        self.sparse[addr] = self.order.len() as u32;
        self.order.push(addr);
    }

    fn set(&mut self, addr: usize, pc: InstIdx, cursor: usize, caps: Captures) {
        self.slots[addr] = Some(Thread { pc, cursor, caps });
    }

    /// `mark` runs for every PC the closure walks through, but `set` only
    /// for the leaves (consuming instructions and `Match`) that actually
    /// wait for a character; `order` mixes both. `None` means `addr` was
    /// only ever a waypoint, not a thread to step.
    fn take(&mut self, addr: usize) -> Option<Thread> {
        self.slots[addr].take()
    }

    fn clear(&mut self) {
        for &addr in &self.order {
            self.slots[addr] = None;
        }
        self.order.clear();
    }
}

/// A unit of work on the epsilon-closure stack: either "visit this PC" or
/// "undo this capture write", so a `Split`'s second branch sees the
/// register state it would have seen had the first branch never run.
enum Frame {
    Pc(InstIdx),
    RestoreSlot(usize, Option<usize>),
    RestoreLastIndex(Option<usize>),
}

struct Machine<'p, 't> {
    prog: &'p Prog,
    input: Input<'t>,
    addrs: AddrMap,
    word_mask: Option<WordMask>,
}

impl<'p, 't> Machine<'p, 't> {
    fn is_word_boundary(&self, at: At) -> bool {
        match &self.word_mask {
            Some(mask) => mask.is_boundary(at.pos()),
            None => self.input.previous_char(at).is_word_char() != at.char().is_word_char(),
        }
    }

    /// Epsilon closure from `pc`: follow every non-consuming instruction
    /// reachable without consuming input, adding each consuming instruction
    /// or `Match` found along the way to `list` as a leaf awaiting the next
    /// character.
    fn add(&self, list: &mut ThreadList, caps: &mut Captures, pc: InstIdx, at: At, stack: &mut Vec<Frame>) {
        stack.push(Frame::Pc(pc));
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Pc(pc) => self.add_step(list, caps, pc, at, stack),
                Frame::RestoreSlot(slot, old) => {
                    caps.set_raw(slot, old);
                }
                Frame::RestoreLastIndex(old) => caps.lastindex = old,
            }
        }
    }

    fn add_step(&self, list: &mut ThreadList, caps: &mut Captures, mut pc: InstIdx, at: At, stack: &mut Vec<Frame>) {
        loop {
            let addr = self.addrs.addr(pc, 0);
            if list.contains(addr) {
                return;
            }
            match &self.prog[pc] {
                Inst::Jump { goto } => {
                    list.mark(addr);
                    pc = *goto;
                }
                Inst::Save { slot, goto } => {
                    list.mark(addr);
                    let slot = *slot;
                    let goto = *goto;
                    let old = caps.set_raw(slot, Some(at.pos()));
                    stack.push(Frame::RestoreSlot(slot, old));
                    // Slot 1 closes group 0 (the whole match), which isn't
                    // numbered for `lastindex` purposes; only group closes
                    // at slot >= 3 (odd) update it.
                    if slot > 1 && slot % 2 == 1 {
                        let old_li = caps.lastindex;
                        caps.lastindex = Some(slot / 2);
                        stack.push(Frame::RestoreLastIndex(old_li));
                    }
                    pc = goto;
                }
                Inst::Split { goto1, goto2 } => {
                    list.mark(addr);
                    stack.push(Frame::Pc(*goto2));
                    pc = *goto1;
                }
                Inst::AnchorStart { goto } => {
                    list.mark(addr);
                    if at.is_beginning() {
                        pc = *goto;
                    } else {
                        return;
                    }
                }
                Inst::AnchorEnd { goto } => {
                    list.mark(addr);
                    if at.is_end() {
                        pc = *goto;
                    } else {
                        return;
                    }
                }
                Inst::AnchorLineStart { goto } => {
                    list.mark(addr);
                    if at.is_beginning() || self.input.previous_char(at) == '\n' {
                        pc = *goto;
                    } else {
                        return;
                    }
                }
                Inst::AnchorLineEnd { goto } => {
                    list.mark(addr);
                    if at.is_end() || at.char() == '\n' {
                        pc = *goto;
                    } else {
                        return;
                    }
                }
                Inst::WordBoundary { goto } => {
                    list.mark(addr);
                    if self.is_word_boundary(at) {
                        pc = *goto;
                    } else {
                        return;
                    }
                }
                Inst::NotWordBoundary { goto } => {
                    list.mark(addr);
                    if !self.is_word_boundary(at) {
                        pc = *goto;
                    } else {
                        return;
                    }
                }
                Inst::GreedyLoop { exit_pc, .. } => {
                    // A zero-length strip is an epsilon transition to
                    // `exit_pc`: seed it as the low-priority alternative,
                    // same as `Split`'s second branch, so the loop can be
                    // left without consuming another member. The leaf
                    // itself (try to consume one more) stays higher
                    // priority since it's marked into `order` first.
                    list.mark(addr);
                    list.set(addr, pc, 0, caps.clone());
                    stack.push(Frame::Pc(*exit_pc));
                    return;
                }
                _ => {
                    // Match, or any consuming instruction: this is a leaf.
                    // It waits here for the next character.
                    list.mark(addr);
                    list.set(addr, pc, 0, caps.clone());
                    return;
                }
            }
        }
    }

    /// Feed one character to a leaf thread, adding its successor(s) to
    /// `nlist` (the next index's thread list). `require_full`, when set,
    /// is the input length a `Match` must land exactly on to count (used by
    /// `fullmatch`).
    fn step(
        &self,
        nlist: &mut ThreadList,
        best: &mut Option<Captures>,
        matched: &mut bool,
        thread: Thread,
        at: At,
        at_next: At,
        stack: &mut Vec<Frame>,
        require_full: Option<usize>,
    ) {
        let Thread { pc, cursor, mut caps } = thread;
        match &self.prog[pc] {
            Inst::Match => {
                let accept = require_full.map_or(true, |len| at.pos() == len);
                if accept {
                    *best = Some(caps);
                    *matched = true;
                }
            }
            Inst::Char { c, case_insensitive, goto } => {
                if char_matches(at.char(), *c, *case_insensitive) {
                    self.add(nlist, &mut caps, *goto, at_next, stack);
                }
            }
            Inst::AnyWithNewline { goto } => {
                if !at.is_end() {
                    self.add(nlist, &mut caps, *goto, at_next, stack);
                }
            }
            Inst::AnyExceptNewline { goto } => {
                if !at.is_end() && at.char() != '\n' {
                    self.add(nlist, &mut caps, *goto, at_next, stack);
                }
            }
            Inst::Set { set, negated, case_insensitive, goto } => {
                if set_matches(at.char(), set, *negated, *case_insensitive) {
                    self.add(nlist, &mut caps, *goto, at_next, stack);
                }
            }
            Inst::GreedyLoop { chars, negated, case_insensitive, .. } => {
                // Consuming one more member re-adds this same PC at the
                // next index, where `add_step` re-derives the "consume or
                // exit" choice. The exit alternative for *this* index was
                // already seeded when this thread was added to `clist`, so
                // a non-member (or end of input) simply drops the thread.
                if set_matches(at.char(), chars, *negated, *case_insensitive) {
                    self.add(nlist, &mut caps, pc, at_next, stack);
                }
            }
            Inst::String { s, case_insensitive, goto } => {
                let expected = s.chars().nth(cursor).expect("cursor stays within the string's length");
                if char_matches(at.char(), expected, *case_insensitive) {
                    let next_cursor = cursor + 1;
                    if next_cursor == s.chars().count() {
                        self.add(nlist, &mut caps, *goto, at_next, stack);
                    } else {
                        let addr = self.addrs.addr(pc, next_cursor);
                        if !nlist.contains(addr) {
                            nlist.mark(addr);
                            nlist.set(addr, pc, next_cursor, caps);
                        }
                    }
                }
            }
            _ => unreachable!("non-consuming instruction reached as a thread leaf"),
        }
    }
}

fn char_matches(at_char: Char, c: char, case_insensitive: bool) -> bool {
    match at_char.as_char() {
        None => false,
        Some(actual) => {
            if case_insensitive {
                actual.to_lowercase().eq(c.to_lowercase())
            } else {
                actual == c
            }
        }
    }
}

fn set_matches(at_char: Char, set: &Charset, negated: bool, case_insensitive: bool) -> bool {
    match at_char.as_char() {
        None => false,
        Some(c) => {
            let is_member = if case_insensitive {
                let lower = c.to_lowercase().next().unwrap_or(c);
                let upper = c.to_uppercase().next().unwrap_or(c);
                set.contains(c) || set.contains(lower) || set.contains(upper)
            } else {
                set.contains(c)
            };
            is_member != negated
        }
    }
}

/// The general simulator: Pike's VM over `prog`. `unanchored` controls
/// whether a fresh start thread is injected at every index (`search`) or
/// only once, at `start` (`match_at`/`fullmatch`). `require_full` is the
/// input length a `Match` must land on exactly, used by `fullmatch`.
fn run(
    prog: &Prog,
    num_groups: usize,
    text: &str,
    start: usize,
    unanchored: bool,
    require_full: Option<usize>,
) -> Option<Captures> {
    let machine = Machine {
        prog,
        input: Input::new(text),
        addrs: AddrMap::build(prog),
        word_mask: if prog_needs_word_mask(prog) { Some(WordMask::build(text)) } else { None },
    };
    let total = machine.addrs.total();
    let mut clist = ThreadList::new(total);
    let mut nlist = ThreadList::new(total);
    let mut stack = Vec::new();
    let mut best: Option<Captures> = None;
    // Persists across steps: once true, no further start thread is injected
    // and any later higher-index match is by construction lower priority, so
    // it's ignored. `matched_here` below is a separate, per-step flag used
    // only to cancel lower-priority threads once this step's best has fired.
    let mut found_match = false;
    let mut at = machine.input.at(start);

    loop {
        if clist.is_empty() && (found_match || (!unanchored && at.pos() != start)) {
            break;
        }
        // Inject a fresh start thread at the lowest priority: on every step
        // for an unanchored search (until a match locks out later starts),
        // or just once, at `start`, for an anchored search.
        if !found_match && (unanchored || at.pos() == start) {
            let mut caps = Captures::new(num_groups);
            machine.add(&mut clist, &mut caps, 0, at, &mut stack);
        }
        if clist.is_empty() {
            if at.is_end() {
                break;
            }
            at = machine.input.at(at.next_pos());
            continue;
        }
        let at_next = if at.is_end() { at } else { machine.input.at(at.next_pos()) };
        let mut matched_here = false;
        let addrs_this_step = clist.order.clone();
        for addr in addrs_this_step {
            if matched_here {
                continue;
            }
            if let Some(thread) = clist.take(addr) {
                machine.step(&mut nlist, &mut best, &mut matched_here, thread, at, at_next, &mut stack, require_full);
            }
        }
        if matched_here {
            found_match = true;
        }
        clist.clear();
        std::mem::swap(&mut clist, &mut nlist);
        if at.is_end() {
            break;
        }
        at = at_next;
    }
    best
}

fn whole_match(s: usize, e: usize) -> Captures {
    Captures { slots: vec![Some(s), Some(e)], lastindex: None }
}

#[derive(Clone, Copy)]
enum Mode {
    Search,
    MatchAt,
    FullMatch,
}

fn greedy_run_len(set: &GreedySet, hay: &str) -> usize {
    let mut len = 0;
    for c in hay.chars() {
        let is_member = set.chars.contains(c) != set.negated;
        if !is_member {
            break;
        }
        len += c.len_utf8();
    }
    len
}

fn literal_at(hay: &str, lit: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        hay.len() >= lit.len() && hay.as_bytes()[..lit.len()].eq_ignore_ascii_case(lit.as_bytes())
    } else {
        hay.starts_with(lit)
    }
}

/// `match_at`/`fullmatch` fast path: prefix, greedy set, suffix, each
/// optional, consumed strictly left to right from `start`.
fn fast_anchored(opt: &PrefixAnalysis, text: &str, start: usize, require_full: bool) -> Option<Option<Captures>> {
    if opt.is_anchored_start && start != 0 {
        return Some(None);
    }
    let mut pos = start;
    if let Some(prefix) = &opt.prefix {
        let hay = text.get(pos..)?;
        if !literal_at(hay, prefix, opt.prefix_case_insensitive) {
            return Some(None);
        }
        pos += prefix.len();
    }
    if let Some(set) = &opt.greedy_set {
        pos += greedy_run_len(set, &text[pos..]);
    }
    if let Some(suffix) = &opt.suffix {
        if opt.greedy_set.is_some() && !opt.is_suffix_disjoint {
            return None;
        }
        let hay = text.get(pos..)?;
        if !literal_at(hay, suffix, opt.suffix_case_insensitive) {
            return Some(None);
        }
        pos += suffix.len();
    }
    if opt.is_anchored_end && pos != text.len() {
        return Some(None);
    }
    if require_full && pos != text.len() {
        return Some(None);
    }
    Some(Some(whole_match(start, pos)))
}

fn fast_search_prefix_only(
    prefix: &str,
    case_insensitive: bool,
    anchored_end: bool,
    text: &str,
    start: usize,
) -> Option<Option<Captures>> {
    if case_insensitive {
        return None;
    }
    if anchored_end {
        if text.len() < prefix.len() {
            return Some(None);
        }
        let p = text.len() - prefix.len();
        if p < start || &text[p..] != prefix {
            return Some(None);
        }
        return Some(Some(whole_match(p, text.len())));
    }
    match memchr::memmem::find(text[start..].as_bytes(), prefix.as_bytes()) {
        Some(off) => {
            let s = start + off;
            Some(Some(whole_match(s, s + prefix.len())))
        }
        None => Some(None),
    }
}

fn fast_search_prefix_greedy(opt: &PrefixAnalysis, prefix: &str, set: &GreedySet, text: &str, start: usize) -> Option<Option<Captures>> {
    if opt.prefix_case_insensitive || set.case_insensitive {
        return None;
    }
    let mut search_from = start;
    loop {
        if search_from > text.len() {
            return Some(None);
        }
        let off = match memchr::memmem::find(text[search_from..].as_bytes(), prefix.as_bytes()) {
            Some(o) => o,
            None => return Some(None),
        };
        let s = search_from + off;
        let mut pos = s + prefix.len();
        pos += greedy_run_len(set, &text[pos..]);
        if let Some(suffix) = &opt.suffix {
            if !opt.is_suffix_disjoint {
                return None;
            }
            let hay = match text.get(pos..) {
                Some(h) => h,
                None => return Some(None),
            };
            if literal_at(hay, suffix, opt.suffix_case_insensitive) {
                pos += suffix.len();
            } else {
                search_from = s + 1;
                continue;
            }
        }
        if opt.is_anchored_end && pos != text.len() {
            search_from = s + 1;
            continue;
        }
        return Some(Some(whole_match(s, pos)));
    }
}

/// `[pattern]*suffix$` (no prefix, anchored at end): the only possible
/// match end is the literal end of input, so we check the suffix there and
/// scan backward through the greedy set to find the earliest valid start.
fn fast_search_end_anchor(set: &GreedySet, suffix: &str, text: &str, start: usize) -> Option<Option<Captures>> {
    if set.case_insensitive {
        return None;
    }
    if text.len() < suffix.len() {
        return Some(None);
    }
    let suffix_start = text.len() - suffix.len();
    if &text[suffix_start..] != suffix {
        return Some(None);
    }
    let mut i = suffix_start;
    for (idx, c) in text[..suffix_start].char_indices().rev() {
        if set.chars.contains(c) == set.negated {
            break;
        }
        i = idx;
    }
    if i < start {
        i = start;
    }
    Some(Some(whole_match(i, text.len())))
}

/// `[pattern]*suffix` (no prefix, no end anchor): the leftmost occurrence
/// of `suffix` anywhere fixes the match's right edge (disjointness
/// guarantees no earlier occurrence's backward run can reach past it), then
/// the same backward scan finds the earliest valid start.
fn fast_search_suffix_only(set: &GreedySet, suffix: &str, text: &str, start: usize) -> Option<Option<Captures>> {
    if set.case_insensitive {
        return None;
    }
    let off = match memchr::memmem::find(text[start.min(text.len())..].as_bytes(), suffix.as_bytes()) {
        Some(o) => o,
        None => return Some(None),
    };
    let p = start + off;
    let mut i = p;
    for (idx, c) in text[..p].char_indices().rev() {
        if set.chars.contains(c) == set.negated {
            break;
        }
        i = idx;
    }
    if i < start {
        i = start;
    }
    Some(Some(whole_match(i, p + suffix.len())))
}

fn fast_search(opt: &PrefixAnalysis, text: &str, start: usize) -> Option<Option<Captures>> {
    if opt.is_anchored_start {
        if start > 0 {
            return Some(None);
        }
        return fast_anchored(opt, text, 0, false);
    }
    match (&opt.prefix, &opt.greedy_set, &opt.suffix) {
        (Some(prefix), None, None) => {
            fast_search_prefix_only(prefix, opt.prefix_case_insensitive, opt.is_anchored_end, text, start)
        }
        (Some(prefix), Some(set), _) => fast_search_prefix_greedy(opt, prefix, set, text, start),
        (None, Some(set), Some(suffix)) if opt.is_anchored_end => fast_search_end_anchor(set, suffix, text, start),
        (None, Some(set), Some(suffix)) if opt.is_suffix_disjoint => fast_search_suffix_only(set, suffix, text, start),
        _ => None,
    }
}

/// Tries the dedicated fast paths for a pattern shape (§4.4). `None` means
/// "not applicable, fall back to the general simulator"; `Some(_)` is the
/// final answer. Restricted to patterns with no capturing groups beyond the
/// whole match and no case-insensitive instructions, where the match span
/// alone is all the caller needs and prefix/suffix comparisons can be done
/// with a single case-sensitive byte compare.
fn fast_path(cp: &CompiledPattern, text: &str, start: usize, mode: Mode) -> Option<Option<Captures>> {
    if cp.group_count != 0 || cp.has_case_insensitive {
        return None;
    }
    let opt = cp.opt.as_ref()?;
    match mode {
        Mode::Search => fast_search(opt, text, start),
        Mode::MatchAt => fast_anchored(opt, text, start, false),
        Mode::FullMatch => fast_anchored(opt, text, start, true),
    }
}

/// Unanchored search: the leftmost match starting at or after `start`.
pub fn search(cp: &CompiledPattern, text: &str, start: usize) -> Option<Captures> {
    if let Some(result) = fast_path(cp, text, start, Mode::Search) {
        return result;
    }
    run(&cp.bytecode, cp.num_captures(), text, start, true, None)
}

/// Anchored search: a match beginning exactly at `start` (Python's `match`).
pub fn match_at(cp: &CompiledPattern, text: &str, start: usize) -> Option<Captures> {
    if let Some(result) = fast_path(cp, text, start, Mode::MatchAt) {
        return result;
    }
    run(&cp.bytecode, cp.num_captures(), text, start, false, None)
}

/// Anchored search requiring the whole remaining input be consumed
/// (Python's `fullmatch`).
pub fn fullmatch(cp: &CompiledPattern, text: &str, start: usize) -> Option<Captures> {
    if let Some(result) = fast_path(cp, text, start, Mode::FullMatch) {
        return result;
    }
    run(&cp.bytecode, cp.num_captures(), text, start, false, Some(text.len()))
}
