use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{
    Localizable, LocalizableCompound, LocalizableString, LocalizableSubstitutions,
    LocalizableValue, LocalizationStatus, Resolve, Substitutions, unresolved,
};
use crate::core::{BindingId, LocalizableModel, ResolutionPass};
use crate::error::ResolveError;

/// Reads the substitution map off the owning model instance.
pub type SubstitutionsFn<M> = fn(&M) -> Substitutions;

/// Reads compound pieces off the owning model instance.
pub type PiecesFn<M> = fn(&M) -> Vec<LocalizableValue>;

/// A template field whose substitutions come from sibling fields of the model
/// instance that owns it.
///
/// The owning instance is looked up in the pass's model path registry, so each
/// element of `Vec<M>` gets its own values even though they share a key.
pub enum BoundSubstitutions<M> {
    Constant(String),
    Pending {
        base: LocalizableString,
        substitutions: SubstitutionsFn<M>,
    },
}

impl<M> BoundSubstitutions<M> {
    pub fn new(base: LocalizableString, substitutions: SubstitutionsFn<M>) -> Self {
        BoundSubstitutions::Pending {
            base,
            substitutions,
        }
    }

    /// Bound base string whose key is completed from the property name.
    pub fn bound(substitutions: SubstitutionsFn<M>) -> Self {
        Self::new(LocalizableString::bound(), substitutions)
    }

    pub fn resolved_value(&self) -> Result<&str, ResolveError> {
        match self {
            BoundSubstitutions::Constant(s) => Ok(s),
            BoundSubstitutions::Pending { .. } => Err(ResolveError::Unbound { id: self.id() }),
        }
    }
}

impl<M> Localizable for BoundSubstitutions<M> {
    fn is_empty(&self) -> bool {
        match self {
            BoundSubstitutions::Constant(s) => s.is_empty(),
            BoundSubstitutions::Pending { .. } => true,
        }
    }

    fn localization_status(&self) -> LocalizationStatus {
        match self {
            BoundSubstitutions::Constant(_) => LocalizationStatus::Localized,
            BoundSubstitutions::Pending { .. } => LocalizationStatus::Pending,
        }
    }

    fn id(&self) -> String {
        match self {
            BoundSubstitutions::Constant(s) => format!("subs={s}"),
            BoundSubstitutions::Pending { base, .. } => format!("bound-subs:{}", base.id()),
        }
    }

    fn text(&self) -> Result<String, ResolveError> {
        self.resolved_value().map(str::to_string)
    }

    fn binding_id(&self) -> Option<BindingId> {
        match self {
            BoundSubstitutions::Pending { base, .. } => base.binding_id(),
            _ => None,
        }
    }
}

impl<M: LocalizableModel> Resolve for BoundSubstitutions<M> {
    fn resolve(&self, pass: &ResolutionPass<'_>) -> Result<Self, ResolveError> {
        let BoundSubstitutions::Pending {
            base,
            substitutions,
        } = self
        else {
            return Ok(self.clone());
        };

        let owner = pass.current_model::<M>()?;
        let template = LocalizableSubstitutions::Template {
            base: base.clone(),
            substitutions: substitutions(owner),
        };
        template
            .resolve(pass)?
            .text()
            .map(BoundSubstitutions::Constant)
    }
}

impl<M> Clone for BoundSubstitutions<M> {
    fn clone(&self) -> Self {
        match self {
            BoundSubstitutions::Constant(s) => BoundSubstitutions::Constant(s.clone()),
            BoundSubstitutions::Pending {
                base,
                substitutions,
            } => BoundSubstitutions::Pending {
                base: base.clone(),
                substitutions: *substitutions,
            },
        }
    }
}

impl<M> fmt::Debug for BoundSubstitutions<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundSubstitutions::Constant(s) => f.debug_tuple("Constant").field(s).finish(),
            BoundSubstitutions::Pending { base, .. } => f
                .debug_struct("Pending")
                .field("base", base)
                .finish_non_exhaustive(),
        }
    }
}

impl<M> PartialEq for BoundSubstitutions<M> {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl<M> Eq for BoundSubstitutions<M> {}

impl<M> std::hash::Hash for BoundSubstitutions<M> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl<M> Serialize for BoundSubstitutions<M> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BoundSubstitutions::Constant(s) => serializer.serialize_str(s),
            BoundSubstitutions::Pending { .. } => Err(unresolved(&self.id())),
        }
    }
}

impl<'de, M> Deserialize<'de> for BoundSubstitutions<M> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(BoundSubstitutions::Constant)
    }
}

/// A compound whose pieces are taken from the model instance that owns it.
///
/// Pieces are read when the pass reaches the field, so every element of a
/// `Vec<M>` joins its own values.
pub enum BoundCompound<M> {
    Constant(String),
    Pending {
        id: BindingId,
        pieces: PiecesFn<M>,
        separator: Option<LocalizableString>,
    },
}

impl<M> BoundCompound<M> {
    pub fn new(pieces: PiecesFn<M>, separator: Option<LocalizableString>) -> Self {
        BoundCompound::Pending {
            id: BindingId::new(),
            pieces,
            separator,
        }
    }

    pub fn resolved_value(&self) -> Result<&str, ResolveError> {
        match self {
            BoundCompound::Constant(s) => Ok(s),
            BoundCompound::Pending { .. } => Err(ResolveError::Unbound { id: self.id() }),
        }
    }
}

impl<M> Localizable for BoundCompound<M> {
    fn is_empty(&self) -> bool {
        match self {
            BoundCompound::Constant(s) => s.is_empty(),
            BoundCompound::Pending { .. } => true,
        }
    }

    fn localization_status(&self) -> LocalizationStatus {
        match self {
            BoundCompound::Constant(_) => LocalizationStatus::Localized,
            BoundCompound::Pending { .. } => LocalizationStatus::Pending,
        }
    }

    fn id(&self) -> String {
        match self {
            BoundCompound::Constant(s) => format!("compound={s}"),
            BoundCompound::Pending { id, separator, .. } => {
                let separator = separator.as_ref().map(Localizable::id).unwrap_or_default();
                format!("bound-compound:{id}:{separator}")
            }
        }
    }

    fn text(&self) -> Result<String, ResolveError> {
        self.resolved_value().map(str::to_string)
    }
}

impl<M: LocalizableModel> Resolve for BoundCompound<M> {
    fn resolve(&self, pass: &ResolutionPass<'_>) -> Result<Self, ResolveError> {
        let BoundCompound::Pending {
            pieces, separator, ..
        } = self
        else {
            return Ok(self.clone());
        };

        let owner = pass.current_model::<M>()?;
        let compound = LocalizableCompound::Pieces {
            pieces: pieces(owner),
            separator: separator.clone(),
        };
        compound
            .resolve(pass)?
            .text()
            .map(BoundCompound::Constant)
    }
}

impl<M> Clone for BoundCompound<M> {
    fn clone(&self) -> Self {
        match self {
            BoundCompound::Constant(s) => BoundCompound::Constant(s.clone()),
            BoundCompound::Pending {
                id,
                pieces,
                separator,
            } => BoundCompound::Pending {
                id: *id,
                pieces: *pieces,
                separator: separator.clone(),
            },
        }
    }
}

impl<M> fmt::Debug for BoundCompound<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundCompound::Constant(s) => f.debug_tuple("Constant").field(s).finish(),
            BoundCompound::Pending { id, separator, .. } => f
                .debug_struct("Pending")
                .field("id", id)
                .field("separator", separator)
                .finish_non_exhaustive(),
        }
    }
}

impl<M> PartialEq for BoundCompound<M> {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl<M> Eq for BoundCompound<M> {}

impl<M> std::hash::Hash for BoundCompound<M> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl<M> Serialize for BoundCompound<M> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BoundCompound::Constant(s) => serializer.serialize_str(s),
            BoundCompound::Pending { .. } => Err(unresolved(&self.id())),
        }
    }
}

impl<'de, M> Deserialize<'de> for BoundCompound<M> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(BoundCompound::Constant)
    }
}
