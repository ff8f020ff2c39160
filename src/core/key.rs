use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A dotted lookup key into the locale store (e.g. `"Greeting.title"`).
///
/// Two keys are equal iff their dotted strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleKey(String);

impl LocaleKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Build a key from `[parent_type.]type_name[.parent_key...].property`.
    ///
    /// Blank segments are dropped rather than emitted as empty segments.
    pub fn build<S: AsRef<str>>(
        type_name: &str,
        parent_type: Option<&str>,
        parent_keys: &[S],
        property: &str,
    ) -> Self {
        let segments = parent_type
            .into_iter()
            .chain(std::iter::once(type_name))
            .chain(parent_keys.iter().map(AsRef::as_ref))
            .chain(std::iter::once(property))
            .filter(|s| !s.trim().is_empty());

        let mut key = String::new();
        for segment in segments {
            if !key.is_empty() {
                key.push('.');
            }
            key.push_str(segment);
        }
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocaleKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Strip the module path and generic parameters from a Rust type name.
///
/// `my_app::models::Page<my_app::Item>` becomes `Page`. Distinct generic
/// instantiations of one type therefore share their locale keys.
pub fn base_type_name(full: &str) -> &str {
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
}

/// Random token identifying one bound field instance.
///
/// Minted when the field is constructed; the owning model maps it to the
/// field's declared name in [`LocalizableModel::property_names`](crate::core::LocalizableModel::property_names).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(Uuid);

impl BindingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BindingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Key parts of a field whose property name and owning type are only known
/// once a resolution pass reaches it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub id: BindingId,
    pub parent_type: Option<String>,
    pub parent_keys: Vec<String>,
    pub index: Option<usize>,
}

impl KeyBinding {
    pub fn new() -> Self {
        Self {
            id: BindingId::new(),
            parent_type: None,
            parent_keys: Vec::new(),
            index: None,
        }
    }

    pub fn with_parent_type(mut self, parent_type: impl Into<String>) -> Self {
        self.parent_type = Some(parent_type.into());
        self
    }

    pub fn with_parent_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parent_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Complete the key with the owning type and property name supplied by the pass.
    pub fn key(&self, type_name: &str, property: &str) -> LocaleKey {
        let builder = KeyBuilder::new(type_name)
            .parent_keys(self.parent_keys.iter().cloned())
            .property(property);
        match &self.parent_type {
            Some(parent) => builder.parent_type(parent).key(),
            None => builder.key(),
        }
    }

    pub fn to_ref(&self, type_name: &str, property: &str) -> LocalizableRef {
        let key = self.key(type_name, property);
        match self.index {
            Some(index) => LocalizableRef::ArrayValue { key, index },
            None => LocalizableRef::Value { key },
        }
    }
}

impl Default for KeyBinding {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a pending value reads its payload from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocalizableRef {
    /// The whole value stored at `key`.
    Value { key: LocaleKey },
    /// Element `index` of the array stored at `key`.
    ArrayValue { key: LocaleKey, index: usize },
    /// A field-bound key completed during the pass.
    Bound(KeyBinding),
}

impl LocalizableRef {
    pub fn value(key: impl Into<LocaleKey>) -> Self {
        LocalizableRef::Value { key: key.into() }
    }

    pub fn array_value(key: impl Into<LocaleKey>, index: usize) -> Self {
        LocalizableRef::ArrayValue {
            key: key.into(),
            index,
        }
    }

    /// Stable, locale-independent identity.
    pub fn id(&self) -> String {
        self.to_string()
    }

    pub fn binding_id(&self) -> Option<BindingId> {
        match self {
            LocalizableRef::Bound(binding) => Some(binding.id),
            _ => None,
        }
    }
}

impl fmt::Display for LocalizableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalizableRef::Value { key } => write!(f, "{key}"),
            LocalizableRef::ArrayValue { key, index } => write!(f, "{key}[{index}]"),
            LocalizableRef::Bound(binding) => match binding.index {
                Some(index) => write!(f, "bound:{}[{index}]", binding.id),
                None => write!(f, "bound:{}", binding.id),
            },
        }
    }
}

impl From<LocaleKey> for LocalizableRef {
    fn from(key: LocaleKey) -> Self {
        LocalizableRef::Value { key }
    }
}

/// Builder for [`LocalizableRef`]s following the
/// `[parentType.]typeName[.parentKey...].propertyName[[index]]` layout.
#[derive(Debug, Clone, Default)]
pub struct KeyBuilder {
    type_name: String,
    parent_type: Option<String>,
    parent_keys: Vec<String>,
    property: String,
    index: Option<usize>,
}

impl KeyBuilder {
    /// `type_name` may be a full Rust path; only its base name is used.
    pub fn new(type_name: impl AsRef<str>) -> Self {
        Self {
            type_name: base_type_name(type_name.as_ref()).to_string(),
            ..Default::default()
        }
    }

    /// Start from a Rust type, using its base name.
    pub fn for_type<T: ?Sized>() -> Self {
        Self::new(std::any::type_name::<T>())
    }

    pub fn parent_type(mut self, parent_type: impl AsRef<str>) -> Self {
        self.parent_type = Some(base_type_name(parent_type.as_ref()).to_string());
        self
    }

    pub fn parent_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parent_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn property(mut self, property: impl Into<String>) -> Self {
        self.property = property.into();
        self
    }

    pub fn index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn key(&self) -> LocaleKey {
        LocaleKey::build(
            &self.type_name,
            self.parent_type.as_deref(),
            &self.parent_keys,
            &self.property,
        )
    }

    pub fn build(self) -> LocalizableRef {
        let key = self.key();
        match self.index {
            Some(index) => LocalizableRef::ArrayValue { key, index },
            None => LocalizableRef::Value { key },
        }
    }
}
