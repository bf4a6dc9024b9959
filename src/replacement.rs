// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Replacement template parsing (§6): turns a `replace`/`replace_all`
//! template string into a sequence of literal runs and group references,
//! parsed once per call rather than re-scanned per match.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// One piece of a parsed replacement template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplacementPiece {
    Literal(String),
    Group(usize),
    Named(String),
}

/// Parses a replacement template: `\0`-`\9` are numbered backreferences,
/// `\g<name>` or `\g<N>` is a named or braced-numbered backreference, `\\`
/// is a literal backslash, and anything else passes through unchanged.
pub fn parse_replacement_template(repl: &str, named_groups: &HashMap<String, usize>) -> Result<Vec<ReplacementPiece>> {
    let mut pieces = Vec::new();
    let mut literal = String::new();
    let bytes: Vec<char> = repl.chars().collect();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        if c != '\\' {
            literal.push(c);
            i += 1;
            continue;
        }
        let Some(&next) = bytes.get(i + 1) else {
            return Err(Error::BadGroupName { byte_offset: i, reason: "trailing backslash in replacement".into() });
        };
        if next == '\\' {
            literal.push('\\');
            i += 2;
            continue;
        }
        if next.is_ascii_digit() {
            flush_literal(&mut pieces, &mut literal);
            let start = i + 1;
            let mut end = start;
            while end < bytes.len() && bytes[end].is_ascii_digit() && end - start < 2 {
                end += 1;
            }
            let digits: String = bytes[start..end].iter().collect();
            let n: usize = digits.parse().expect("ascii digit run parses as usize");
            pieces.push(ReplacementPiece::Group(n));
            i = end;
            continue;
        }
        if next == 'g' {
            let open = i + 2;
            if bytes.get(open) != Some(&'<') {
                return Err(Error::BadGroupName {
                    byte_offset: i,
                    reason: "`\\g` must be followed by `<name>` or `<N>`".into(),
                });
            }
            let close = bytes[open + 1..]
                .iter()
                .position(|&c| c == '>')
                .map(|rel| open + 1 + rel)
                .ok_or_else(|| Error::BadGroupName { byte_offset: i, reason: "unterminated `\\g<...>`".into() })?;
            let name: String = bytes[open + 1..close].iter().collect();
            flush_literal(&mut pieces, &mut literal);
            if let Ok(n) = name.parse::<usize>() {
                pieces.push(ReplacementPiece::Group(n));
            } else {
                if !named_groups.contains_key(&name) {
                    return Err(Error::BadGroupName {
                        byte_offset: open,
                        reason: format!("no such group: {}", name),
                    });
                }
                pieces.push(ReplacementPiece::Named(name));
            }
            i = close + 1;
            continue;
        }
        return Err(Error::BadEscape { byte_offset: i, reason: format!("invalid escape `\\{}` in replacement", next) });
    }
    flush_literal(&mut pieces, &mut literal);
    Ok(pieces)
}

fn flush_literal(pieces: &mut Vec<ReplacementPiece>, literal: &mut String) {
    if !literal.is_empty() {
        pieces.push(ReplacementPiece::Literal(std::mem::take(literal)));
    }
}
