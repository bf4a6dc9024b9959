// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The result of a successful match (§4.5): group access by index or by
//! name, spans, and the bookkeeping fields (`lastindex`/`lastgroup`) that
//! track which capturing group closed most recently.

use std::collections::HashMap;

use crate::program::CompiledPattern;
use crate::vm::Captures;

/// A reference to a capture group, by position or by name. `Match`'s
/// accessors take `impl Into<GroupRef>` so `m.group(0)` and
/// `m.group("year")` both work without two parallel method families.
pub enum GroupRef<'a> {
    Index(usize),
    Name(&'a str),
}

impl From<usize> for GroupRef<'_> {
    fn from(i: usize) -> Self {
        GroupRef::Index(i)
    }
}

impl<'a> From<&'a str> for GroupRef<'a> {
    fn from(name: &'a str) -> Self {
        GroupRef::Name(name)
    }
}

/// A successful match against `string`, carrying the compiled pattern it
/// came from so named-group lookups and `re`-style introspection stay
/// available without re-threading them through every call site.
pub struct Match<'t, 'r> {
    string: &'t str,
    pattern: &'r CompiledPattern,
    caps: Captures,
    pos: usize,
    endpos: usize,
}

impl<'t, 'r> Match<'t, 'r> {
    pub(crate) fn new(string: &'t str, pattern: &'r CompiledPattern, caps: Captures, pos: usize, endpos: usize) -> Self {
        Match { string, pattern, caps, pos, endpos }
    }

    /// The text this match was made against.
    pub fn string(&self) -> &'t str {
        self.string
    }

    /// The compiled pattern this match came from.
    pub fn pattern(&self) -> &'r CompiledPattern {
        self.pattern
    }

    /// The start-of-search bound passed to the engine.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The end-of-search bound passed to the engine.
    pub fn endpos(&self) -> usize {
        self.endpos
    }

    fn resolve<'g>(&self, id: impl Into<GroupRef<'g>>) -> Option<usize> {
        match id.into() {
            GroupRef::Index(i) if i < self.caps.num_groups() => Some(i),
            GroupRef::Index(_) => None,
            GroupRef::Name(name) => self.pattern.named_groups.get(name).copied(),
        }
    }

    /// The `(start, end)` byte-offset span of a group, or `None` if the
    /// group didn't participate in the match (or doesn't exist).
    pub fn span<'g>(&self, id: impl Into<GroupRef<'g>>) -> Option<(usize, usize)> {
        let i = self.resolve(id)?;
        self.caps.group_span(i)
    }

    pub fn start<'g>(&self, id: impl Into<GroupRef<'g>>) -> Option<usize> {
        self.span(id).map(|(s, _)| s)
    }

    pub fn end<'g>(&self, id: impl Into<GroupRef<'g>>) -> Option<usize> {
        self.span(id).map(|(_, e)| e)
    }

    /// The substring a group matched, or `None` if it didn't participate.
    pub fn group<'g>(&self, id: impl Into<GroupRef<'g>>) -> Option<&'t str> {
        let (s, e) = self.span(id)?;
        Some(&self.string[s..e])
    }

    /// Every numbered group (1..=N, excluding group 0), substituting
    /// `default` for groups that didn't participate.
    pub fn groups(&self, default: Option<&'t str>) -> Vec<Option<&'t str>> {
        (1..self.caps.num_groups()).map(|i| self.group(i).or(default)).collect()
    }

    /// Every named group, substituting `default` for ones that didn't
    /// participate.
    pub fn groupdict(&self, default: Option<&'t str>) -> HashMap<String, Option<&'t str>> {
        self.pattern.named_groups.iter().map(|(name, &i)| (name.clone(), self.group(i).or(default))).collect()
    }

    /// The index of the capturing group that closed most recently, or
    /// `None` if the pattern has no capturing groups or none closed.
    pub fn lastindex(&self) -> Option<usize> {
        self.caps.lastindex
    }

    /// The name of the group `lastindex` refers to, if it has one.
    pub fn lastgroup(&self) -> Option<&'r str> {
        let i = self.caps.lastindex?;
        self.pattern.named_groups.iter().find(|&(_, &gi)| gi == i).map(|(name, _)| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::compile;
    use crate::vm;

    #[test]
    fn group_by_index_and_name() {
        let cp = compile(r"(\d+)-(?P<word>[a-z]+)").unwrap();
        let caps = vm::search(&cp, "42-cats", 0).unwrap();
        let m = Match::new("42-cats", &cp, caps, 0, 7);
        assert_eq!(m.group(0), Some("42-cats"));
        assert_eq!(m.group(1), Some("42"));
        assert_eq!(m.group("word"), Some("cats"));
        assert_eq!(m.group(99), None);
    }

    #[test]
    fn groups_substitutes_default_for_missing() {
        let cp = compile(r"(a)|(b)").unwrap();
        let caps = vm::search(&cp, "a", 0).unwrap();
        let m = Match::new("a", &cp, caps, 0, 1);
        assert_eq!(m.groups(Some("?")), vec![Some("a"), Some("?")]);
    }

    #[test]
    fn lastindex_and_lastgroup_track_most_recent_close() {
        let cp = compile(r"(?P<first>a)(?P<second>b)").unwrap();
        let caps = vm::search(&cp, "ab", 0).unwrap();
        let m = Match::new("ab", &cp, caps, 0, 2);
        assert_eq!(m.lastindex(), Some(2));
        assert_eq!(m.lastgroup(), Some("second"));
    }

    #[test]
    fn groupdict_collects_named_groups_only() {
        let cp = compile(r"(\d+)-(?P<word>[a-z]+)").unwrap();
        let caps = vm::search(&cp, "42-cats", 0).unwrap();
        let m = Match::new("42-cats", &cp, caps, 0, 7);
        let dict = m.groupdict(None);
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get("word"), Some(&Some("cats")));
    }
}
