use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{
    Localizable, LocalizableString, LocalizableValue, LocalizationStatus, Resolve,
    identity_by_id, unresolved,
};
use crate::core::{BindingId, KeyBinding, LocalizableRef, ResolutionPass};
use crate::error::ResolveError;

/// A localizable sequence.
///
/// The pending form names a base key. At resolution the store value at that
/// key is either a native array or a scalar, which becomes a one-element array.
#[derive(Debug, Clone, Default)]
pub enum LocalizableArray {
    #[default]
    Empty,
    Constant(Vec<LocalizableValue>),
    Localized(LocalizableRef),
}

impl LocalizableArray {
    pub fn constant<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<LocalizableValue>,
    {
        LocalizableArray::Constant(values.into_iter().map(Into::into).collect())
    }

    pub fn localized(reference: impl Into<LocalizableRef>) -> Self {
        LocalizableArray::Localized(reference.into())
    }

    pub fn bound() -> Self {
        LocalizableArray::Localized(LocalizableRef::Bound(KeyBinding::new()))
    }

    pub fn resolved_value(&self) -> Result<&[LocalizableValue], ResolveError> {
        match self {
            LocalizableArray::Empty => Ok(&[]),
            LocalizableArray::Constant(values) => Ok(values),
            LocalizableArray::Localized(_) => Err(ResolveError::Unbound { id: self.id() }),
        }
    }

    /// Resolved text of every element.
    pub fn texts(&self) -> Result<Vec<String>, ResolveError> {
        self.resolved_value()?.iter().map(Localizable::text).collect()
    }
}

impl Localizable for LocalizableArray {
    fn is_empty(&self) -> bool {
        match self {
            LocalizableArray::Empty => true,
            LocalizableArray::Constant(values) => values.is_empty(),
            LocalizableArray::Localized(_) => true,
        }
    }

    fn localization_status(&self) -> LocalizationStatus {
        match self {
            LocalizableArray::Empty => LocalizationStatus::Localized,
            LocalizableArray::Constant(values) => {
                LocalizationStatus::all(values.iter().map(Localizable::localization_status))
            }
            LocalizableArray::Localized(_) => LocalizationStatus::Pending,
        }
    }

    fn id(&self) -> String {
        match self {
            LocalizableArray::Empty => "array:empty".to_string(),
            LocalizableArray::Constant(values) => {
                let ids: Vec<String> = values.iter().map(Localizable::id).collect();
                format!("array=[{}]", ids.join(","))
            }
            LocalizableArray::Localized(r) => format!("array:{r}"),
        }
    }

    /// Elements joined with `", "`.
    fn text(&self) -> Result<String, ResolveError> {
        Ok(self.texts()?.join(", "))
    }

    fn binding_id(&self) -> Option<BindingId> {
        match self {
            LocalizableArray::Localized(r) => r.binding_id(),
            _ => None,
        }
    }
}

impl Resolve for LocalizableArray {
    fn resolve(&self, pass: &ResolutionPass<'_>) -> Result<Self, ResolveError> {
        match self {
            LocalizableArray::Empty => Ok(LocalizableArray::Empty),
            LocalizableArray::Constant(values) => values
                .iter()
                .map(|v| v.resolve(pass))
                .collect::<Result<Vec<_>, _>>()
                .map(LocalizableArray::Constant),
            LocalizableArray::Localized(r) => {
                let (key, index) = pass.locate(r)?;
                let elements = pass.localizer().array(&key, index);
                Ok(LocalizableArray::Constant(
                    elements
                        .into_iter()
                        .map(|text| LocalizableValue::String(LocalizableString::Constant(text)))
                        .collect(),
                ))
            }
        }
    }
}

identity_by_id!(LocalizableArray);

impl Serialize for LocalizableArray {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LocalizableArray::Empty => Vec::<LocalizableValue>::new().serialize(serializer),
            LocalizableArray::Constant(values) => values.serialize(serializer),
            LocalizableArray::Localized(_) => Err(unresolved(&self.id())),
        }
    }
}

impl<'de> Deserialize<'de> for LocalizableArray {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<LocalizableValue>::deserialize(deserializer).map(LocalizableArray::Constant)
    }
}
