//! The localizable value family.
//!
//! Every kind is a small tagged union over an empty state (where the kind has
//! one), a constant (already resolved) state and a pending state that holds a
//! [`LocalizableRef`](crate::core::LocalizableRef) or raw payload. Pending values
//! become constants only by going through a
//! [`ResolutionPass`](crate::core::ResolutionPass).
//!
//! Serialization only ever emits resolved payloads and deserialization always
//! yields constants, so the wire format never needs the store.

mod array;
mod bound;
mod compound;
mod date;
mod int;
mod string;
mod substitutions;

use std::hash::{Hash, Hasher};

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

pub use array::LocalizableArray;
pub use bound::{BoundCompound, BoundSubstitutions, PiecesFn, SubstitutionsFn};
pub use compound::LocalizableCompound;
pub use date::{DateSource, LocalizableDate};
pub use int::{IntSource, LocalizableInt};
pub use string::LocalizableString;
pub use substitutions::{LocalizableSubstitutions, Substitutions};

use crate::core::{BindingId, ResolutionPass};
use crate::error::ResolveError;

/// Whether a value still needs a resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalizationStatus {
    /// At least one pending payload remains.
    Pending,
    /// Fully resolved, or trivially resolvable (empty or constant).
    Localized,
}

impl LocalizationStatus {
    /// `Localized` only if every status is `Localized`.
    pub fn all<I: IntoIterator<Item = LocalizationStatus>>(statuses: I) -> Self {
        if statuses
            .into_iter()
            .all(|s| s == LocalizationStatus::Localized)
        {
            LocalizationStatus::Localized
        } else {
            LocalizationStatus::Pending
        }
    }
}

/// Contract shared by every localizable kind.
#[enum_dispatch]
pub trait Localizable {
    /// `true` for empty values and for pending values.
    ///
    /// Pending values report empty instead of failing so a view can render
    /// "nothing yet" before resolution.
    fn is_empty(&self) -> bool;

    fn localization_status(&self) -> LocalizationStatus;

    /// Locale-independent identity. Equality and hashing use this only.
    fn id(&self) -> String;

    /// Resolved text of the value.
    ///
    /// Fails with [`ResolveError::Unbound`] while a pending payload remains.
    fn text(&self) -> Result<String, ResolveError>;

    /// Id of the field binding this value resolves through, if any.
    fn binding_id(&self) -> Option<BindingId> {
        None
    }
}

/// Produce the constant form of a value for the pass's locale.
pub trait Resolve: Sized {
    fn resolve(&self, pass: &ResolutionPass<'_>) -> Result<Self, ResolveError>;
}

/// Any member of the family, for heterogeneous arrays, compound pieces and
/// substitution maps.
///
/// On the wire the kind is kept as a tag so a decoded value comes back as a
/// constant of the same kind.
#[enum_dispatch(Localizable)]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum LocalizableValue {
    String(LocalizableString),
    Int(LocalizableInt),
    Date(LocalizableDate),
    Array(LocalizableArray),
    Compound(LocalizableCompound),
    Substitutions(LocalizableSubstitutions),
}

impl Resolve for LocalizableValue {
    fn resolve(&self, pass: &ResolutionPass<'_>) -> Result<Self, ResolveError> {
        Ok(match self {
            LocalizableValue::String(v) => LocalizableValue::String(v.resolve(pass)?),
            LocalizableValue::Int(v) => LocalizableValue::Int(v.resolve(pass)?),
            LocalizableValue::Date(v) => LocalizableValue::Date(v.resolve(pass)?),
            LocalizableValue::Array(v) => LocalizableValue::Array(v.resolve(pass)?),
            LocalizableValue::Compound(v) => LocalizableValue::Compound(v.resolve(pass)?),
            LocalizableValue::Substitutions(v) => {
                LocalizableValue::Substitutions(v.resolve(pass)?)
            }
        })
    }
}

impl From<&str> for LocalizableValue {
    fn from(s: &str) -> Self {
        LocalizableValue::String(LocalizableString::constant(s))
    }
}

impl PartialEq for LocalizableValue {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for LocalizableValue {}

impl Hash for LocalizableValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

/// Implements `PartialEq`, `Eq` and `Hash` through [`Localizable::id`].
macro_rules! identity_by_id {
    ($($ty:ty),* $(,)?) => {
        $(
            impl PartialEq for $ty {
                fn eq(&self, other: &Self) -> bool {
                    crate::core::value::Localizable::id(self)
                        == crate::core::value::Localizable::id(other)
                }
            }

            impl Eq for $ty {}

            impl std::hash::Hash for $ty {
                fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                    std::hash::Hash::hash(&crate::core::value::Localizable::id(self), state);
                }
            }
        )*
    };
}

pub(crate) use identity_by_id;

/// Serializer error for a value that has not been resolved yet.
pub(crate) fn unresolved<E: serde::ser::Error>(id: &str) -> E {
    E::custom(format!("value '{id}' is not yet resolved"))
}
