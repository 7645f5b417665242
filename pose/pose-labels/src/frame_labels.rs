//! Per-frame label storage.

use tracing::warn;

use crate::error::{LabelError, LabelResult};
use crate::interval::IntervalTrack;
use crate::schema::{LabelKind, LabelSchema, LabelValue};

/// One value per label for every frame of a sequence.
///
/// Values always match the kind declared in the schema.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameLabels {
    schema: LabelSchema,
    rows: Vec<Vec<LabelValue>>,
}

impl FrameLabels {
    /// Creates a store with every value set to its label default.
    #[must_use]
    pub fn new(schema: LabelSchema, frame_count: usize) -> Self {
        let defaults: Vec<LabelValue> = schema
            .defs()
            .iter()
            .map(|d| LabelValue::default_for(d.kind))
            .collect();
        Self {
            rows: vec![defaults; frame_count],
            schema,
        }
    }

    /// Builds a store by resolving interval tracks at every frame.
    ///
    /// Tracks are matched to schema labels by name, and the schema decides
    /// the value kind. Schema labels without a track keep their defaults;
    /// tracks without a schema label are ignored with a warning.
    #[must_use]
    pub fn from_intervals(schema: LabelSchema, tracks: &[IntervalTrack], frame_count: usize) -> Self {
        let mut labels = Self::new(schema, frame_count);

        for track in tracks {
            let Some(column) = labels.schema.index_of(&track.def.name) else {
                warn!(label = %track.def.name, "interval track has no matching label, ignoring");
                continue;
            };
            let kind = labels.schema.defs()[column].kind;
            for (frame, row) in labels.rows.iter_mut().enumerate() {
                if let Some(raw) = track.value_at(frame) {
                    row[column] = LabelValue::parse(kind, raw);
                }
            }
        }

        labels
    }

    /// Label definitions.
    #[must_use]
    pub const fn schema(&self) -> &LabelSchema {
        &self.schema
    }

    /// Number of frames.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.rows.len()
    }

    /// Value of `name` at `frame`.
    #[must_use]
    pub fn get(&self, frame: usize, name: &str) -> Option<&LabelValue> {
        let column = self.schema.index_of(name)?;
        self.rows.get(frame).map(|row| &row[column])
    }

    /// All values of a frame, in schema order.
    #[must_use]
    pub fn row(&self, frame: usize) -> Option<&[LabelValue]> {
        self.rows.get(frame).map(Vec::as_slice)
    }

    /// Sets the value of `name` at `frame`.
    ///
    /// A value of the wrong kind is converted to the label's kind.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::UnknownLabel`] or [`LabelError::FrameOutOfRange`].
    pub fn set(&mut self, frame: usize, name: &str, value: LabelValue) -> LabelResult<()> {
        let column = self
            .schema
            .index_of(name)
            .ok_or_else(|| LabelError::unknown(name))?;
        let kind = self.schema.defs()[column].kind;
        let frame_count = self.rows.len();
        let row = self
            .rows
            .get_mut(frame)
            .ok_or(LabelError::FrameOutOfRange { frame, frame_count })?;
        row[column] = value.into_kind(kind);
        Ok(())
    }

    /// Sets the value of `name` at `frame` from editor text.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::UnknownLabel`] or [`LabelError::FrameOutOfRange`].
    pub fn set_raw(&mut self, frame: usize, name: &str, raw: &str) -> LabelResult<()> {
        let kind = self
            .schema
            .get(name)
            .ok_or_else(|| LabelError::unknown(name))?
            .kind;
        self.set(frame, name, LabelValue::parse(kind, raw))
    }

    /// Changes the kind of a label, converting every stored value.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::UnknownLabel`] if the label does not exist.
    pub fn set_kind(&mut self, name: &str, kind: LabelKind) -> LabelResult<()> {
        let column = self
            .schema
            .index_of(name)
            .ok_or_else(|| LabelError::unknown(name))?;
        self.schema.set_kind(column, kind);
        for row in &mut self.rows {
            let value = std::mem::replace(&mut row[column], LabelValue::default_for(kind));
            row[column] = value.into_kind(kind);
        }
        Ok(())
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Vec<LabelValue>] {
        &mut self.rows
    }
}
