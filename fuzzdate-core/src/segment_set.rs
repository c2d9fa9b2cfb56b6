//! Ordered, append-only segment container shared by every pipeline stage

use crate::certainty::{normalize_certainty, Certainty};
use crate::segment::{Segment, SegmentType};

/// An ordered sequence of segments plus expression-level metadata
///
/// Segment order is insertion order and is never implicitly reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentSet {
    pub(crate) segments: Vec<Segment>,
    /// Deduplicated, sorted expression-level certainty
    pub certainty: Vec<Certainty>,
    /// Ordered warnings accumulated while processing this set
    pub warnings: Vec<String>,
    /// Original source string, when known
    pub source: Option<String>,
}

impl SegmentSet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty set remembering its source string
    pub fn with_source(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::default()
        }
    }

    /// Append a segment
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True when the set holds no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Borrow the segments in order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Iterate the segments in order
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Ordered list of segment types
    pub fn types(&self) -> Vec<SegmentType> {
        self.segments.iter().map(|s| s.ty).collect()
    }

    /// Extract the first contiguous run whose types equal `pattern`
    ///
    /// Scans the matches of the pattern's final type in order and checks the
    /// window ending at each match backward against the full pattern. Returns
    /// an empty set when nothing matches or the set is shorter than the
    /// pattern. Expression metadata (certainty, warnings, source) is carried
    /// onto the extracted set.
    pub fn extract(&self, pattern: &[SegmentType]) -> SegmentSet {
        let mut out = SegmentSet {
            certainty: self.certainty.clone(),
            source: self.source.clone(),
            ..Self::default()
        };
        if pattern.is_empty() || self.segments.len() < pattern.len() {
            return out;
        }
        let last = *pattern.last().expect("pattern is non-empty");
        for (end, segment) in self.segments.iter().enumerate() {
            if segment.ty != last || end + 1 < pattern.len() {
                continue;
            }
            let start = end + 1 - pattern.len();
            let window = &self.segments[start..=end];
            if window.iter().map(|s| s.ty).eq(pattern.iter().copied()) {
                out.segments = window.to_vec();
                return out;
            }
        }
        out
    }

    /// Map every segment, keeping the typed container
    pub fn map_segments(&self, f: impl FnMut(&Segment) -> Segment) -> SegmentSet {
        SegmentSet {
            segments: self.segments.iter().map(f).collect(),
            certainty: self.certainty.clone(),
            warnings: self.warnings.clone(),
            source: self.source.clone(),
        }
    }

    /// Collect matching segments into a plain ordered sequence
    pub fn collect_if(&self, mut pred: impl FnMut(&Segment) -> bool) -> Vec<Segment> {
        self.segments.iter().filter(|s| pred(s)).cloned().collect()
    }

    /// Keep only segments matching the predicate, preserving metadata
    pub fn retain(&mut self, pred: impl FnMut(&Segment) -> bool) {
        self.segments.retain(pred);
    }

    /// Replace the segment at `index`
    pub fn replace(&mut self, index: usize, segment: Segment) {
        self.segments[index] = segment;
    }

    /// Attach an expression-level certainty tag, dedup-sorted
    pub fn add_certainty(&mut self, certainty: Certainty) {
        self.certainty.push(certainty);
        normalize_certainty(&mut self.certainty);
    }

    /// Append a warning
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Concatenated lexemes of every segment, in order
    pub fn lexeme(&self) -> String {
        self.segments.iter().map(|s| s.lexeme.as_str()).collect()
    }

    /// Drop leading and trailing space segments
    pub fn trim_spaces(&mut self) {
        while self
            .segments
            .first()
            .is_some_and(|s| s.ty == SegmentType::Space)
        {
            self.segments.remove(0);
        }
        while self
            .segments
            .last()
            .is_some_and(|s| s.ty == SegmentType::Space)
        {
            self.segments.pop();
        }
    }
}

impl IntoIterator for SegmentSet {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl FromIterator<Segment> for SegmentSet {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        SegmentSet {
            segments: iter.into_iter().collect(),
            ..Self::default()
        }
    }
}
