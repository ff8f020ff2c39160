use std::fmt;

/// A flattened leaf from a locale resource file.
///
/// Arrays are homogeneous: the loader rejects mixed-type arrays.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreValue {
    String(String),
    Int(i64),
    Double(f64),
    Bool(bool),
    StringArray(Vec<String>),
    IntArray(Vec<i64>),
    DoubleArray(Vec<f64>),
    BoolArray(Vec<bool>),
}

impl StoreValue {
    pub fn is_array(&self) -> bool {
        matches!(
            self,
            StoreValue::StringArray(_)
                | StoreValue::IntArray(_)
                | StoreValue::DoubleArray(_)
                | StoreValue::BoolArray(_)
        )
    }

    /// Number of elements for arrays, `1` for scalars.
    pub fn len(&self) -> usize {
        match self {
            StoreValue::StringArray(v) => v.len(),
            StoreValue::IntArray(v) => v.len(),
            StoreValue::DoubleArray(v) => v.len(),
            StoreValue::BoolArray(v) => v.len(),
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element `index` of an array value as a scalar value.
    ///
    /// Returns `None` for scalars or when the index is out of range.
    pub fn element(&self, index: usize) -> Option<StoreValue> {
        match self {
            StoreValue::StringArray(v) => v.get(index).cloned().map(StoreValue::String),
            StoreValue::IntArray(v) => v.get(index).copied().map(StoreValue::Int),
            StoreValue::DoubleArray(v) => v.get(index).copied().map(StoreValue::Double),
            StoreValue::BoolArray(v) => v.get(index).copied().map(StoreValue::Bool),
            _ => None,
        }
    }

    /// Scalars as a one-element list, arrays element by element.
    pub fn elements(&self) -> Vec<StoreValue> {
        if self.is_array() {
            (0..self.len()).filter_map(|i| self.element(i)).collect()
        } else {
            vec![self.clone()]
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            StoreValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integral view of numeric scalars. Doubles are truncated.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            StoreValue::Int(i) => Some(*i),
            StoreValue::Double(d) if d.is_finite() => Some(d.trunc() as i64),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreValue::String(_) => "string",
            StoreValue::Int(_) => "int",
            StoreValue::Double(_) => "double",
            StoreValue::Bool(_) => "bool",
            StoreValue::StringArray(_) => "string array",
            StoreValue::IntArray(_) => "int array",
            StoreValue::DoubleArray(_) => "double array",
            StoreValue::BoolArray(_) => "bool array",
        }
    }

    /// Text form of a scalar. Arrays are joined with `", "`.
    pub fn to_text(&self) -> String {
        match self {
            StoreValue::String(s) => s.clone(),
            StoreValue::Int(i) => i.to_string(),
            StoreValue::Double(d) => d.to_string(),
            StoreValue::Bool(b) => b.to_string(),
            _ => self
                .elements()
                .iter()
                .map(StoreValue::to_text)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

impl fmt::Display for StoreValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for StoreValue {
    fn from(s: &str) -> Self {
        StoreValue::String(s.to_string())
    }
}

impl From<String> for StoreValue {
    fn from(s: String) -> Self {
        StoreValue::String(s)
    }
}
