//! Ant-style path patterns.
//!
//! # Syntax
//! A pattern is a method token glued to a path, split on `/`:
//! ```text
//! GET/org/**/CVS/*.java
//! └┬┘ └┬┘ └┬┘ └┬┘ └──┬─┘
//!  │   │   │   │     └─ `*` matches any run of chars inside one segment
//!  │   │   │   └─ literal segment
//!  │   │   └─ `**` matches zero or more whole segments
//!  │   └─ literal segment
//!  └─ method, itself a segment (so `*` matches any method)
//! ```
//! `?` matches exactly one character within a segment.
//!
//! # Design Decisions
//! - Compiled once, immutable afterwards (`Send + Sync`, no interior state)
//! - Every string is a valid pattern; matching never fails, only returns false
//! - Wildcard-free patterns short-circuit to string equality

pub mod glob;

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// The segment value that spans any number of path segments.
const ANY_PATH: &str = "**";

/// A single compiled pattern segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
    /// Consumes exactly one candidate segment.
    One(SegmentMatch),
    /// `**`: zero or more whole segments.
    AnyPath,
}

/// Matching rule for a segment that consumes exactly one candidate segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum SegmentMatch {
    /// Matches the identical segment text.
    Literal(String),
    /// Contains `?` or `*`; matched with [`glob::matches`].
    Glob(String),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        if raw == ANY_PATH {
            Segment::AnyPath
        } else if glob::has_wildcard(raw) {
            Segment::One(SegmentMatch::Glob(raw.to_string()))
        } else {
            Segment::One(SegmentMatch::Literal(raw.to_string()))
        }
    }
}

impl SegmentMatch {
    fn matches(&self, candidate: &str) -> bool {
        match self {
            SegmentMatch::Literal(text) => text == candidate,
            SegmentMatch::Glob(glob) => glob::matches(glob, candidate),
        }
    }
}

/// A compiled Ant-style pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
    literal: bool,
}

impl Pattern {
    /// Compile a pattern. Accepts any string.
    pub fn compile(source: impl Into<String>) -> Self {
        let source = source.into();
        let mut segments: Vec<Segment> = Vec::new();

        for raw in source.split('/') {
            let segment = Segment::parse(raw);
            // `**/**` is the same as `**`; collapsing keeps backtracking linear per run.
            if segment == Segment::AnyPath && segments.last() == Some(&Segment::AnyPath) {
                continue;
            }
            segments.push(segment);
        }

        let literal = segments
            .iter()
            .all(|segment| matches!(segment, Segment::One(SegmentMatch::Literal(_))));

        Self {
            source,
            segments,
            literal,
        }
    }

    /// Returns true if `candidate` satisfies this pattern.
    pub fn matches(&self, candidate: &str) -> bool {
        if self.literal {
            return self.source == candidate;
        }

        let candidate: Vec<&str> = candidate.split('/').collect();
        Walk::new(&self.segments, &candidate).run(0, 0)
    }

    /// The text the pattern was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// True if the pattern has no wildcards and only matches its own text.
    pub fn is_literal(&self) -> bool {
        self.literal
    }
}

/// Backtracking walk over both segment lists.
///
/// `**` tries every split of the remaining candidate, shortest first, and
/// takes the first one where the rest of the pattern matches. Each
/// `(pattern index, candidate index)` state that failed once is remembered,
/// so a match costs at most one visit per state no matter how many `**`
/// segments the pattern has.
struct Walk<'a> {
    pattern: &'a [Segment],
    candidate: &'a [&'a str],
    failed: Vec<bool>,
}

impl<'a> Walk<'a> {
    fn new(pattern: &'a [Segment], candidate: &'a [&'a str]) -> Self {
        Self {
            pattern,
            candidate,
            failed: vec![false; (pattern.len() + 1) * (candidate.len() + 1)],
        }
    }

    fn state(&self, p: usize, c: usize) -> usize {
        p * (self.candidate.len() + 1) + c
    }

    fn run(&mut self, p: usize, c: usize) -> bool {
        let state = self.state(p, c);
        if self.failed[state] {
            return false;
        }

        let (pattern, candidate) = (self.pattern, self.candidate);
        let matched = match pattern.get(p) {
            None => c == candidate.len(),
            Some(Segment::AnyPath) if p + 1 == pattern.len() => true,
            Some(Segment::AnyPath) => {
                let mut found = false;
                for next in c..=candidate.len() {
                    // A failed `**` at `next` already tried every split from there on.
                    if next > c && self.failed[self.state(p, next)] {
                        break;
                    }
                    if self.run(p + 1, next) {
                        found = true;
                        break;
                    }
                }
                found
            }
            Some(Segment::One(segment)) => {
                c < candidate.len() && segment.matches(candidate[c]) && self.run(p + 1, c + 1)
            }
        };

        if !matched {
            self.failed[state] = true;
        }
        matched
    }
}

/// Compile `source` into a [`Pattern`].
pub fn compile(source: &str) -> Pattern {
    Pattern::compile(source)
}

/// Test `candidate` against a compiled pattern.
pub fn matches(pattern: &Pattern, candidate: &str) -> bool {
    pattern.matches(candidate)
}

impl From<&str> for Pattern {
    fn from(source: &str) -> Self {
        Self::compile(source)
    }
}

impl From<String> for Pattern {
    fn from(source: String) -> Self {
        Self::compile(source)
    }
}

impl FromStr for Pattern {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::compile(s))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
