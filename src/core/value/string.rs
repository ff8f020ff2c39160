use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Localizable, LocalizationStatus, Resolve, identity_by_id, unresolved};
use crate::core::{BindingId, KeyBinding, LocalizableRef, ResolutionPass};
use crate::error::ResolveError;

/// A localizable string.
#[derive(Debug, Clone, Default)]
pub enum LocalizableString {
    #[default]
    Empty,
    Constant(String),
    Localized(LocalizableRef),
}

impl LocalizableString {
    pub fn constant(value: impl Into<String>) -> Self {
        LocalizableString::Constant(value.into())
    }

    pub fn localized(reference: impl Into<LocalizableRef>) -> Self {
        LocalizableString::Localized(reference.into())
    }

    /// A field whose key is completed from its property name during the pass.
    pub fn bound() -> Self {
        Self::bound_with(KeyBinding::new())
    }

    pub fn bound_with(binding: KeyBinding) -> Self {
        LocalizableString::Localized(LocalizableRef::Bound(binding))
    }

    /// The resolved string, or [`ResolveError::Unbound`] while pending.
    pub fn resolved_value(&self) -> Result<&str, ResolveError> {
        match self {
            LocalizableString::Empty => Ok(""),
            LocalizableString::Constant(s) => Ok(s),
            LocalizableString::Localized(_) => Err(ResolveError::Unbound { id: self.id() }),
        }
    }
}

impl Localizable for LocalizableString {
    fn is_empty(&self) -> bool {
        match self {
            LocalizableString::Empty => true,
            LocalizableString::Constant(s) => s.is_empty(),
            LocalizableString::Localized(_) => true,
        }
    }

    fn localization_status(&self) -> LocalizationStatus {
        match self {
            LocalizableString::Localized(_) => LocalizationStatus::Pending,
            _ => LocalizationStatus::Localized,
        }
    }

    fn id(&self) -> String {
        match self {
            LocalizableString::Empty => "string:empty".to_string(),
            LocalizableString::Constant(s) => format!("string={s}"),
            LocalizableString::Localized(r) => format!("string:{r}"),
        }
    }

    fn text(&self) -> Result<String, ResolveError> {
        self.resolved_value().map(str::to_string)
    }

    fn binding_id(&self) -> Option<BindingId> {
        match self {
            LocalizableString::Localized(r) => r.binding_id(),
            _ => None,
        }
    }
}

impl Resolve for LocalizableString {
    fn resolve(&self, pass: &ResolutionPass<'_>) -> Result<Self, ResolveError> {
        match self {
            LocalizableString::Localized(r) => {
                let text = pass
                    .lookup(r)?
                    .map(|value| value.to_text())
                    .unwrap_or_default();
                Ok(LocalizableString::Constant(text))
            }
            _ => Ok(self.clone()),
        }
    }
}

identity_by_id!(LocalizableString);

impl From<&str> for LocalizableString {
    fn from(s: &str) -> Self {
        Self::constant(s)
    }
}

impl From<String> for LocalizableString {
    fn from(s: String) -> Self {
        Self::constant(s)
    }
}

impl Serialize for LocalizableString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LocalizableString::Empty => serializer.serialize_str(""),
            LocalizableString::Constant(s) => serializer.serialize_str(s),
            LocalizableString::Localized(_) => Err(unresolved(&self.id())),
        }
    }
}

impl<'de> Deserialize<'de> for LocalizableString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(LocalizableString::Constant)
    }
}
