//! Interval annotations.
//!
//! The interval editor assigns a label value to one or more inclusive frame
//! ranges, for example `"crimp"` on frames `10..=40` and `90..=120`. Frames
//! covered by no range take the label's default value.

use crate::schema::{LabelDef, LabelValue};

/// Inclusive range of frames.
///
/// A range whose start is after its end contains no frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameInterval {
    /// First frame.
    pub start: usize,
    /// Last frame.
    pub end: usize,
}

impl FrameInterval {
    /// Creates an interval.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Interval covering a single frame.
    #[must_use]
    pub const fn single(frame: usize) -> Self {
        Self::new(frame, frame)
    }

    /// Returns `true` if `frame` lies in the interval.
    #[must_use]
    pub const fn contains(&self, frame: usize) -> bool {
        self.start <= frame && frame <= self.end
    }

    /// Returns `true` if the interval contains no frames.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

/// One value of a label and the frames it covers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntervalValue {
    /// Raw value text, parsed according to the label kind on export.
    pub value: String,
    /// Frames carrying the value.
    pub intervals: Vec<FrameInterval>,
}

impl IntervalValue {
    /// Creates a value covering the given intervals.
    #[must_use]
    pub fn new(value: impl Into<String>, intervals: Vec<FrameInterval>) -> Self {
        Self {
            value: value.into(),
            intervals,
        }
    }
}

/// Interval annotations for a single label.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntervalTrack {
    /// Label being annotated.
    pub def: LabelDef,
    /// Values in priority order.
    pub values: Vec<IntervalValue>,
}

impl IntervalTrack {
    /// Creates a track with no values.
    #[must_use]
    pub const fn new(def: LabelDef) -> Self {
        Self {
            def,
            values: Vec::new(),
        }
    }

    /// Adds a value covering `intervals`.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>, intervals: Vec<FrameInterval>) -> Self {
        self.values.push(IntervalValue::new(value, intervals));
        self
    }

    /// Raw text of the first value whose intervals contain `frame`.
    ///
    /// When ranges overlap, the value added first wins.
    #[must_use]
    pub fn value_at(&self, frame: usize) -> Option<&str> {
        self.values
            .iter()
            .find(|v| v.intervals.iter().any(|i| i.contains(frame)))
            .map(|v| v.value.as_str())
    }

    /// Typed value at `frame`, or the label default if no range covers it.
    #[must_use]
    pub fn resolve(&self, frame: usize) -> LabelValue {
        self.value_at(frame).map_or_else(
            || LabelValue::default_for(self.def.kind),
            |raw| LabelValue::parse(self.def.kind, raw),
        )
    }
}
