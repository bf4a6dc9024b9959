// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Charset builder: accumulates literal chars, ranges, and POSIX classes
//! (including negated POSIX classes) parsed out of a `[...]` character
//! class, then finalizes them into a searchable set.
//!
//! The finalized `Charset` keeps a 128-entry ASCII bitmap and a flat string
//! of every member so the VM and prefix analyzer can do O(1) ASCII tests
//! and native `str::find`/`trim_start_matches` style fast-path scans
//! instead of walking the range list. `InstRanges::matches` in the
//! teacher's `inst.rs` does the linear-then-binary-search dance this module
//! avoids for the common, small, mostly-ASCII case.

use std::fmt;

/// Ranges larger than this many code points are kept unexpanded rather than
/// materialized into the single-char membership set.
const EXPAND_RANGE_LIMIT: u32 = 512;

/// A POSIX bracket class, e.g. `[:alpha:]`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PosixClass {
    Alnum,
    Alpha,
    Ascii,
    Blank,
    Cntrl,
    Digit,
    Graph,
    Lower,
    Print,
    Punct,
    Space,
    Upper,
    Xdigit,
}

impl PosixClass {
    /// Parse a bracket-class name (without the surrounding `[: :]`).
    pub fn from_name(name: &str) -> Option<PosixClass> {
        use self::PosixClass::*;
        Some(match name {
            "alnum" => Alnum,
            "alpha" => Alpha,
            "ascii" => Ascii,
            "blank" => Blank,
            "cntrl" => Cntrl,
            "digit" => Digit,
            "graph" => Graph,
            "lower" => Lower,
            "print" => Print,
            "punct" => Punct,
            "space" => Space,
            "upper" => Upper,
            "xdigit" => Xdigit,
            _ => return None,
        })
    }

    /// Whether `c` is a member of this POSIX class.
    pub fn contains(&self, c: char) -> bool {
        use self::PosixClass::*;
        match *self {
            Alnum => c.is_ascii_alphanumeric(),
            Alpha => c.is_ascii_alphabetic(),
            Ascii => c.is_ascii(),
            Blank => c == ' ' || c == '\t',
            Cntrl => c.is_ascii_control(),
            Digit => c.is_ascii_digit(),
            Graph => c.is_ascii_graphic(),
            Lower => c.is_ascii_lowercase(),
            Print => c.is_ascii_graphic() || c == ' ',
            Punct => c.is_ascii_punctuation(),
            Space => c.is_ascii_whitespace() || c == '\x0b',
            Upper => c.is_ascii_uppercase(),
            Xdigit => c.is_ascii_hexdigit(),
        }
    }
}

/// Accumulates the raw pieces of a character class as the parser reads it.
#[derive(Clone, Debug, Default)]
pub struct CharsetBuilder {
    singles: Vec<char>,
    ranges: Vec<(char, char)>,
    /// POSIX classes that contribute by their *negation*: `c` is a member of
    /// the charset being built iff `c` is NOT in one of these classes.
    /// (This is how `[[:^alpha:]]` is represented: the charset itself has no
    /// direct membership test other than "is not alpha.")
    posix_negated: Vec<PosixClass>,
}

impl CharsetBuilder {
    pub fn new() -> CharsetBuilder {
        CharsetBuilder::default()
    }

    pub fn push_char(&mut self, c: char) {
        self.singles.push(c);
    }

    pub fn push_range(&mut self, lo: char, hi: char) {
        let span = (hi as u32).saturating_sub(lo as u32);
        if span <= EXPAND_RANGE_LIMIT {
            let mut c = lo as u32;
            while c <= hi as u32 {
                if let Some(ch) = char::from_u32(c) {
                    self.singles.push(ch);
                }
                c += 1;
            }
        } else {
            self.ranges.push((lo, hi));
        }
    }

    /// Add a POSIX class as direct membership (`[[:alpha:]]`).
    pub fn push_posix(&mut self, class: PosixClass) {
        // POSIX classes are always ASCII-scoped; materializing them into
        // the single-char set keeps `matches` a flat scan/bitmap check
        // instead of a per-char `PosixClass::contains` call on every probe.
        for b in 0u8..=127 {
            let c = b as char;
            if class.contains(c) {
                self.singles.push(c);
            }
        }
    }

    /// Add a POSIX class by negation (`[[:^alpha:]]`): every code point NOT
    /// in `class` becomes a member of the charset being built.
    pub fn push_posix_negated(&mut self, class: PosixClass) {
        self.posix_negated.push(class);
    }

    pub fn finish(self) -> Charset {
        let CharsetBuilder { mut singles, ranges, posix_negated } = self;
        singles.sort_unstable();
        singles.dedup();

        let mut ascii_bitmap = [false; 128];
        for &c in &singles {
            if (c as u32) < 128 {
                ascii_bitmap[c as usize] = true;
            }
        }

        let is_simple = ranges.is_empty() && posix_negated.is_empty();
        let members: String = if is_simple { singles.iter().collect() } else { String::new() };

        Charset { singles, ranges, posix_negated, ascii_bitmap, members, is_simple }
    }
}

/// A finalized, searchable character set.
///
/// `is_simple` is true when the set is fully represented by `ascii_bitmap`
/// and `members` alone (no unexpanded ranges, no negated POSIX classes) —
/// this is the condition under which the prefix analyzer and VM fast paths
/// (§4.3, §4.4) are allowed to use native `str` scans instead of the VM.
#[derive(Clone, Debug, Default)]
pub struct Charset {
    singles: Vec<char>,
    ranges: Vec<(char, char)>,
    posix_negated: Vec<PosixClass>,
    ascii_bitmap: [bool; 128],
    members: String,
    is_simple: bool,
}

impl Charset {
    pub fn is_simple(&self) -> bool {
        self.is_simple
    }

    /// The flat string of every member, valid only when `is_simple()`.
    pub fn members(&self) -> &str {
        &self.members
    }

    #[inline]
    pub fn contains(&self, c: char) -> bool {
        if (c as u32) < 128 {
            if self.ascii_bitmap[c as usize] {
                return true;
            }
        } else if self.singles.binary_search(&c).is_ok() {
            return true;
        }
        if self.ranges.iter().any(|&(lo, hi)| c >= lo && c <= hi) {
            return true;
        }
        self.posix_negated.iter().any(|class| !class.contains(c))
    }

    /// Number of distinct single characters directly in the set (does not
    /// count unexpanded ranges or negated-POSIX contributions). Used by the
    /// optimizer/prefix analyzer to decide whether a set is "small enough"
    /// to treat as an explicit char list.
    pub fn single_count(&self) -> usize {
        self.singles.len()
    }

    pub fn singles(&self) -> &[char] {
        &self.singles
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for c in &self.singles {
            write!(f, "{}", c)?;
        }
        for &(lo, hi) in &self.ranges {
            write!(f, "{}-{}", lo, hi)?;
        }
        for class in &self.posix_negated {
            write!(f, "[:^{:?}:]", class)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_range_is_simple_and_ascii_fast() {
        let mut b = CharsetBuilder::new();
        b.push_range('a', 'z');
        let set = b.finish();
        assert!(set.is_simple());
        assert!(set.contains('m'));
        assert!(!set.contains('M'));
        assert_eq!(set.members().len(), 26);
    }

    #[test]
    fn large_range_stays_unexpanded() {
        let mut b = CharsetBuilder::new();
        b.push_range('\u{0}', '\u{ffff}');
        let set = b.finish();
        assert!(!set.is_simple());
        assert!(set.contains('\u{1234}'));
    }

    #[test]
    fn posix_negated_class() {
        let mut b = CharsetBuilder::new();
        b.push_posix_negated(PosixClass::Digit);
        let set = b.finish();
        assert!(!set.is_simple());
        assert!(set.contains('a'));
        assert!(!set.contains('5'));
    }

    #[test]
    fn posix_direct_class() {
        let mut b = CharsetBuilder::new();
        b.push_posix(PosixClass::Digit);
        let set = b.finish();
        assert!(set.is_simple());
        assert!(set.contains('5'));
        assert!(!set.contains('a'));
    }
}
