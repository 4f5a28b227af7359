//! Untyped input rows.
//!
//! Upstream feeds disagree on column names (`ID` vs `id`, `Lat` vs
//! `latitude`) and on types (numbers arrive as JSON numbers or as strings).
//! `RawRecord` keeps each row exactly as delivered and leaves interpretation to
//! [`coerce`](crate::coerce).

/// One scalar cell as delivered by the source.
#[derive(Clone, Debug, PartialEq)]
pub enum RawValue {
    Null,
    Bool(bool),
    /// A non-negative JSON integer, kept exact beyond f64's 2^53 range.
    Integer(u64),
    Number(f64),
    Text(String),
}

impl RawValue {
    /// `true` for `Null` and for text that is empty after trimming.
    pub fn is_missing(&self) -> bool {
        match self {
            RawValue::Null    => true,
            RawValue::Text(s) => s.trim().is_empty(),
            _                 => false,
        }
    }

    /// Numeric view: numbers as-is, numeric strings parsed after trimming.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Integer(n) => Some(*n as f64),
            RawValue::Number(n) => Some(*n),
            RawValue::Text(s)   => s.trim().parse::<f64>().ok(),
            _                   => None,
        }
    }

    /// Map a JSON value to a cell.  Arrays and objects are not scalars and
    /// become `Null`.
    pub fn from_json(value: &serde_json::Value) -> RawValue {
        use serde_json::Value;
        match value {
            Value::Bool(b)   => RawValue::Bool(*b),
            Value::Number(n) => match n.as_u64() {
                Some(u) => RawValue::Integer(u),
                None    => n.as_f64().map_or(RawValue::Null, RawValue::Number),
            },
            Value::String(s) => RawValue::Text(s.clone()),
            Value::Null | Value::Array(_) | Value::Object(_) => RawValue::Null,
        }
    }
}

/// One input row: field name → value, in source column order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawRecord {
    fields: Vec<(String, RawValue)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field.  Later duplicates of a name are kept but shadowed by
    /// the first occurrence in lookups.
    pub fn push(&mut self, name: impl Into<String>, value: RawValue) {
        self.fields.push((name.into(), value));
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, name: impl Into<String>, value: RawValue) -> Self {
        self.push(name, value);
        self
    }

    /// Build from a JSON object.  Returns `None` for any other JSON value.
    pub fn from_json(value: &serde_json::Value) -> Option<RawRecord> {
        let object = value.as_object()?;
        let fields = object
            .iter()
            .map(|(k, v)| (k.clone(), RawValue::from_json(v)))
            .collect();
        Some(RawRecord { fields })
    }

    /// Build from a CSV header row and one data row.  Empty cells become
    /// `Null`; every other cell is `Text` (coercion parses numbers later).
    pub fn from_csv(headers: &csv::StringRecord, row: &csv::StringRecord) -> RawRecord {
        let fields = headers
            .iter()
            .zip(row.iter())
            .map(|(h, cell)| {
                let value = if cell.trim().is_empty() {
                    RawValue::Null
                } else {
                    RawValue::Text(cell.to_owned())
                };
                (h.trim().to_owned(), value)
            })
            .collect();
        RawRecord { fields }
    }

    /// Position of the first field whose name matches any of `aliases`,
    /// ignoring ASCII case.  Aliases are tried in order.
    pub fn position_ci(&self, aliases: &[&str]) -> Option<usize> {
        aliases.iter().find_map(|alias| {
            self.fields
                .iter()
                .position(|(name, _)| name.eq_ignore_ascii_case(alias))
        })
    }

    /// Case-insensitive lookup by any of `aliases`.
    pub fn get_ci(&self, aliases: &[&str]) -> Option<&RawValue> {
        self.position_ci(aliases).map(|i| &self.fields[i].1)
    }

    pub fn fields(&self) -> &[(String, RawValue)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
