use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Localizable, LocalizationStatus, Resolve, identity_by_id, unresolved};
use crate::core::{BindingId, LocalizableRef, ResolutionPass, format::IntFormat};
use crate::error::ResolveError;

/// Where a pending integer gets its raw number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IntSource {
    Value(i64),
    /// A numeric value in the store.
    Ref(LocalizableRef),
}

/// A localizable integer. The formatting is fixed at construction and applied
/// with the pass's locale.
#[derive(Debug, Clone)]
pub enum LocalizableInt {
    Constant(String),
    Localized { source: IntSource, format: IntFormat },
}

impl LocalizableInt {
    /// An already rendered integer, without grouping.
    pub fn constant(value: i64) -> Self {
        LocalizableInt::Constant(value.to_string())
    }

    pub fn localized(value: i64, format: IntFormat) -> Self {
        LocalizableInt::Localized {
            source: IntSource::Value(value),
            format,
        }
    }

    pub fn from_ref(reference: impl Into<LocalizableRef>, format: IntFormat) -> Self {
        LocalizableInt::Localized {
            source: IntSource::Ref(reference.into()),
            format,
        }
    }

    pub fn resolved_value(&self) -> Result<&str, ResolveError> {
        match self {
            LocalizableInt::Constant(s) => Ok(s),
            LocalizableInt::Localized { .. } => Err(ResolveError::Unbound { id: self.id() }),
        }
    }
}

impl Localizable for LocalizableInt {
    fn is_empty(&self) -> bool {
        matches!(self, LocalizableInt::Localized { .. })
    }

    fn localization_status(&self) -> LocalizationStatus {
        match self {
            LocalizableInt::Constant(_) => LocalizationStatus::Localized,
            LocalizableInt::Localized { .. } => LocalizationStatus::Pending,
        }
    }

    fn id(&self) -> String {
        match self {
            LocalizableInt::Constant(s) => format!("int={s}"),
            LocalizableInt::Localized { source, format } => {
                let source = match source {
                    IntSource::Value(v) => v.to_string(),
                    IntSource::Ref(r) => r.id(),
                };
                format!(
                    "int:{source}:{}:{}",
                    format.grouping, format.group_size
                )
            }
        }
    }

    fn text(&self) -> Result<String, ResolveError> {
        self.resolved_value().map(str::to_string)
    }

    fn binding_id(&self) -> Option<BindingId> {
        match self {
            LocalizableInt::Localized {
                source: IntSource::Ref(r),
                ..
            } => r.binding_id(),
            _ => None,
        }
    }
}

impl Resolve for LocalizableInt {
    fn resolve(&self, pass: &ResolutionPass<'_>) -> Result<Self, ResolveError> {
        let LocalizableInt::Localized { source, format } = self else {
            return Ok(self.clone());
        };

        let localizer = pass.localizer();
        let text = match source {
            IntSource::Value(value) => localizer.int(*value, *format),
            IntSource::Ref(r) => {
                let (key, index) = pass.locate(r)?;
                localizer.int_at(&key, index, *format)?
            }
        };
        Ok(LocalizableInt::Constant(text))
    }
}

identity_by_id!(LocalizableInt);

impl From<i64> for LocalizableInt {
    fn from(value: i64) -> Self {
        Self::constant(value)
    }
}

impl Serialize for LocalizableInt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LocalizableInt::Constant(s) => serializer.serialize_str(s),
            LocalizableInt::Localized { .. } => Err(unresolved(&self.id())),
        }
    }
}

/// Decoders accept the rendered string and, for hand-written payloads, a bare number.
#[derive(Deserialize)]
#[serde(untagged)]
enum IntWire {
    Text(String),
    Number(i64),
}

impl<'de> Deserialize<'de> for LocalizableInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match IntWire::deserialize(deserializer)? {
            IntWire::Text(s) => LocalizableInt::Constant(s),
            IntWire::Number(n) => LocalizableInt::constant(n),
        })
    }
}
