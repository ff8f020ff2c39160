use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{
    Localizable, LocalizableString, LocalizableValue, LocalizationStatus, Resolve,
    identity_by_id, unresolved,
};
use crate::core::{BindingId, ResolutionPass, localizer::substitute};
use crate::error::ResolveError;

/// Placeholder name → value.
pub type Substitutions = BTreeMap<String, LocalizableValue>;

/// A template string with `%{name}` placeholders.
#[derive(Debug, Clone)]
pub enum LocalizableSubstitutions {
    Constant(String),
    Template {
        base: LocalizableString,
        substitutions: Substitutions,
    },
}

impl LocalizableSubstitutions {
    pub fn template<I, K, V>(base: LocalizableString, substitutions: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<LocalizableValue>,
    {
        LocalizableSubstitutions::Template {
            base,
            substitutions: substitutions
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn constant(text: impl Into<String>) -> Self {
        LocalizableSubstitutions::Constant(text.into())
    }

    fn expand(base: &LocalizableString, substitutions: &Substitutions) -> Result<String, ResolveError> {
        let base = base.text()?;
        let values = substitutions
            .iter()
            .map(|(name, value)| -> Result<_, ResolveError> { Ok((name.as_str(), value.text()?)) })
            .collect::<Result<HashMap<_, _>, _>>()?;
        Ok(substitute(&base, &values))
    }
}

impl Localizable for LocalizableSubstitutions {
    fn is_empty(&self) -> bool {
        match self {
            LocalizableSubstitutions::Constant(s) => s.is_empty(),
            LocalizableSubstitutions::Template {
                base,
                substitutions,
            } => base.is_empty() && substitutions.values().all(Localizable::is_empty),
        }
    }

    fn localization_status(&self) -> LocalizationStatus {
        match self {
            LocalizableSubstitutions::Constant(_) => LocalizationStatus::Localized,
            LocalizableSubstitutions::Template {
                base,
                substitutions,
            } => LocalizationStatus::all(
                std::iter::once(base.localization_status())
                    .chain(substitutions.values().map(Localizable::localization_status)),
            ),
        }
    }

    fn id(&self) -> String {
        match self {
            LocalizableSubstitutions::Constant(s) => format!("subs={s}"),
            LocalizableSubstitutions::Template {
                base,
                substitutions,
            } => {
                let entries: Vec<String> = substitutions
                    .iter()
                    .map(|(name, value)| format!("{name}={}", value.id()))
                    .collect();
                format!("subs:{}:{{{}}}", base.id(), entries.join(","))
            }
        }
    }

    fn text(&self) -> Result<String, ResolveError> {
        match self {
            LocalizableSubstitutions::Constant(s) => Ok(s.clone()),
            LocalizableSubstitutions::Template {
                base,
                substitutions,
            } => {
                if self.localization_status() == LocalizationStatus::Pending {
                    return Err(ResolveError::Unbound { id: self.id() });
                }
                Self::expand(base, substitutions)
            }
        }
    }

    fn binding_id(&self) -> Option<BindingId> {
        match self {
            LocalizableSubstitutions::Template { base, .. } => base.binding_id(),
            _ => None,
        }
    }
}

impl Resolve for LocalizableSubstitutions {
    fn resolve(&self, pass: &ResolutionPass<'_>) -> Result<Self, ResolveError> {
        let LocalizableSubstitutions::Template {
            base,
            substitutions,
        } = self
        else {
            return Ok(self.clone());
        };

        let base = base.resolve(pass)?;
        let substitutions = substitutions
            .iter()
            .map(|(name, value)| -> Result<_, ResolveError> {
                Ok((name.clone(), value.resolve(pass)?))
            })
            .collect::<Result<Substitutions, _>>()?;
        Self::expand(&base, &substitutions).map(LocalizableSubstitutions::Constant)
    }
}

identity_by_id!(LocalizableSubstitutions);

impl Serialize for LocalizableSubstitutions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.text() {
            Ok(text) => serializer.serialize_str(&text),
            Err(_) => Err(unresolved(&self.id())),
        }
    }
}

impl<'de> Deserialize<'de> for LocalizableSubstitutions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(LocalizableSubstitutions::Constant)
    }
}
