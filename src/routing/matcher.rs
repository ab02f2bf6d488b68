//! Path pattern matching.
//!
//! # Responsibilities
//! - Parse patterns like `/bookings/{id}` into literal and parameter segments
//! - Match request segments against a pattern and capture parameters
//!
//! # Design Decisions
//! - Segment count must match exactly; no wildcards
//! - Literal segments are case-sensitive
//! - No regex, parameters capture whole segments as text

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(&'static str),
    Param(&'static str),
}

/// A compiled path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

/// Parameters captured by a successful match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params<'a> {
    values: Vec<(&'static str, &'a str)>,
}

impl<'a> Params<'a> {
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.values
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }
}

impl PathPattern {
    /// Compile a pattern. `{name}` segments are parameters.
    pub fn parse(pattern: &'static str) -> Self {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                Some(name) => Segment::Param(name),
                None => Segment::Literal(s),
            })
            .collect();
        Self { segments }
    }

    /// Match request segments, returning captured parameters.
    pub fn matches<'a>(&self, segments: &[&'a str]) -> Option<Params<'a>> {
        if segments.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::default();
        for (expected, actual) in self.segments.iter().zip(segments) {
            match expected {
                Segment::Literal(literal) if literal == actual => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => params.values.push((*name, *actual)),
            }
        }
        Some(params)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "/");
        }
        for segment in &self.segments {
            match segment {
                Segment::Literal(s) => write!(f, "/{}", s)?,
                Segment::Param(name) => write!(f, "/:{}", name)?,
            }
        }
        Ok(())
    }
}
