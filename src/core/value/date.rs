use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Localizable, LocalizationStatus, Resolve, identity_by_id, unresolved};
use crate::core::{BindingId, LocalizableRef, ResolutionPass, format::DateFormat};
use crate::error::ResolveError;

/// Where a pending date gets its instant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DateSource {
    Value(DateTime<Utc>),
    /// An RFC 3339 timestamp string in the store.
    Ref(LocalizableRef),
}

/// A localizable date. Style pair or pattern are fixed at construction.
#[derive(Debug, Clone)]
pub enum LocalizableDate {
    Constant(String),
    Localized { source: DateSource, format: DateFormat },
}

impl LocalizableDate {
    pub fn constant(text: impl Into<String>) -> Self {
        LocalizableDate::Constant(text.into())
    }

    pub fn localized(value: DateTime<Utc>, format: DateFormat) -> Self {
        LocalizableDate::Localized {
            source: DateSource::Value(value),
            format,
        }
    }

    pub fn from_ref(reference: impl Into<LocalizableRef>, format: DateFormat) -> Self {
        LocalizableDate::Localized {
            source: DateSource::Ref(reference.into()),
            format,
        }
    }

    pub fn resolved_value(&self) -> Result<&str, ResolveError> {
        match self {
            LocalizableDate::Constant(s) => Ok(s),
            LocalizableDate::Localized { .. } => Err(ResolveError::Unbound { id: self.id() }),
        }
    }
}

impl Localizable for LocalizableDate {
    fn is_empty(&self) -> bool {
        matches!(self, LocalizableDate::Localized { .. })
    }

    fn localization_status(&self) -> LocalizationStatus {
        match self {
            LocalizableDate::Constant(_) => LocalizationStatus::Localized,
            LocalizableDate::Localized { .. } => LocalizationStatus::Pending,
        }
    }

    fn id(&self) -> String {
        match self {
            LocalizableDate::Constant(s) => format!("date={s}"),
            LocalizableDate::Localized { source, format } => {
                let source = match source {
                    DateSource::Value(v) => v.to_rfc3339(),
                    DateSource::Ref(r) => r.id(),
                };
                format!(
                    "date:{source}:{:?}:{:?}:{}",
                    format.date_style,
                    format.time_style,
                    format.pattern.as_deref().unwrap_or_default()
                )
            }
        }
    }

    fn text(&self) -> Result<String, ResolveError> {
        self.resolved_value().map(str::to_string)
    }

    fn binding_id(&self) -> Option<BindingId> {
        match self {
            LocalizableDate::Localized {
                source: DateSource::Ref(r),
                ..
            } => r.binding_id(),
            _ => None,
        }
    }
}

impl Resolve for LocalizableDate {
    fn resolve(&self, pass: &ResolutionPass<'_>) -> Result<Self, ResolveError> {
        let LocalizableDate::Localized { source, format } = self else {
            return Ok(self.clone());
        };

        let localizer = pass.localizer();
        let text = match source {
            DateSource::Value(value) => localizer.date(value, format)?,
            DateSource::Ref(r) => {
                let (key, index) = pass.locate(r)?;
                localizer.date_at(&key, index, format)?
            }
        };
        Ok(LocalizableDate::Constant(text))
    }
}

identity_by_id!(LocalizableDate);

impl Serialize for LocalizableDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LocalizableDate::Constant(s) => serializer.serialize_str(s),
            LocalizableDate::Localized { .. } => Err(unresolved(&self.id())),
        }
    }
}

impl<'de> Deserialize<'de> for LocalizableDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(LocalizableDate::Constant)
    }
}
