//! Label definitions and values.

use std::fmt;

use tracing::warn;

use crate::error::{LabelError, LabelResult};

/// Value type of a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LabelKind {
    /// Free text, defaulting to the empty string.
    #[default]
    Text,
    /// Floating-point number, defaulting to `0.0`.
    Numeric,
}

/// A named label column.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelDef {
    /// Column name in the exported table.
    pub name: String,
    /// Value type.
    pub kind: LabelKind,
}

impl LabelDef {
    /// Creates a label definition.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: LabelKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Creates a text label.
    #[must_use]
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, LabelKind::Text)
    }

    /// Creates a numeric label.
    #[must_use]
    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name, LabelKind::Numeric)
    }
}

/// The value of one label in one frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LabelValue {
    /// Text value.
    Text(String),
    /// Numeric value.
    Numeric(f64),
}

impl LabelValue {
    /// Creates a text value.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Default value for a kind: `""` or `0.0`.
    #[must_use]
    pub fn default_for(kind: LabelKind) -> Self {
        match kind {
            LabelKind::Text => Self::Text(String::new()),
            LabelKind::Numeric => Self::Numeric(0.0),
        }
    }

    /// Interprets raw cell or editor text as a value of `kind`.
    ///
    /// Text is kept verbatim. Numeric text that does not parse becomes
    /// `0.0` and is reported with a warning.
    #[must_use]
    pub fn parse(kind: LabelKind, raw: &str) -> Self {
        match kind {
            LabelKind::Text => Self::Text(raw.to_string()),
            LabelKind::Numeric => Self::Numeric(parse_numeric(raw)),
        }
    }

    /// Kind of this value.
    #[must_use]
    pub const fn kind(&self) -> LabelKind {
        match self {
            Self::Text(_) => LabelKind::Text,
            Self::Numeric(_) => LabelKind::Numeric,
        }
    }

    /// Numeric payload, if this is a numeric value.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Numeric(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    /// Text payload, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Numeric(_) => None,
        }
    }

    /// Converts to `kind`, parsing text or formatting numbers as needed.
    #[must_use]
    pub fn into_kind(self, kind: LabelKind) -> Self {
        match (self, kind) {
            (Self::Text(s), LabelKind::Numeric) => Self::Numeric(parse_numeric(&s)),
            (Self::Numeric(v), LabelKind::Text) => Self::Text(format!("{v:?}")),
            (value, _) => value,
        }
    }
}

impl fmt::Display for LabelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Numeric(v) => write!(f, "{v:?}"),
        }
    }
}

fn parse_numeric(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse().unwrap_or_else(|_| {
        warn!(value = trimmed, "numeric label value is not a number, using 0.0");
        0.0
    })
}

/// Ordered set of label definitions.
///
/// Names are unique and non-empty. Order is the column order of the
/// exported table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelSchema {
    defs: Vec<LabelDef>,
}

impl LabelSchema {
    /// Builds a schema from definitions.
    ///
    /// Definitions with a blank name are skipped with a warning. Names are
    /// trimmed before comparison.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::DuplicateLabel`] if two definitions share a name.
    pub fn new<I>(defs: I) -> LabelResult<Self>
    where
        I: IntoIterator<Item = LabelDef>,
    {
        let mut schema = Self::default();
        for def in defs {
            schema.push(def)?;
        }
        Ok(schema)
    }

    /// Builds a schema of text labels from names.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::DuplicateLabel`] if a name repeats.
    pub fn from_names<I, S>(names: I) -> LabelResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(LabelDef::text))
    }

    /// Appends a definition.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::DuplicateLabel`] if the name is already present.
    pub fn push(&mut self, def: LabelDef) -> LabelResult<()> {
        let name = def.name.trim();
        if name.is_empty() {
            warn!("skipping label with an empty name");
            return Ok(());
        }
        if self.index_of(name).is_some() {
            return Err(LabelError::duplicate(name));
        }
        self.defs.push(LabelDef::new(name, def.kind));
        Ok(())
    }

    /// Number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Returns `true` if there are no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Definitions in column order.
    #[must_use]
    pub fn defs(&self) -> &[LabelDef] {
        &self.defs
    }

    /// Label names in column order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.defs.iter().map(|d| d.name.as_str())
    }

    /// Column position of a label.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.defs.iter().position(|d| d.name == name)
    }

    /// Definition of a label.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&LabelDef> {
        self.defs.iter().find(|d| d.name == name)
    }

    pub(crate) fn set_kind(&mut self, index: usize, kind: LabelKind) {
        if let Some(def) = self.defs.get_mut(index) {
            def.kind = kind;
        }
    }
}
