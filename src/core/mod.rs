//! Core resolution engine.
//!
//! - `key`: locale keys, bindings and the key builder
//! - `store`: YAML locale store with region → language fallback
//! - `format`: integer and date rendering
//! - `value`: the localizable value family
//! - `localizer`: locale-bound lookups and `%{placeholder}` substitution
//! - `registry`: property-name and model-path registries
//! - `pass`: the resolution pass and its entry points

pub mod format;
pub mod key;
pub mod localizer;
pub mod pass;
pub mod registry;
pub mod store;
pub mod value;

pub use key::{BindingId, KeyBinding, KeyBuilder, LocaleKey, LocalizableRef, base_type_name};
pub use localizer::{Localizer, substitute};
pub use pass::{
    LocalizableModel, PassState, ResolutionPass, ResolvedModel, resolve, resolve_all,
};
pub use registry::{GraphPath, ModelPathRegistry, PathStep, PropertyNameRegistry, PropertyNames};
pub use store::{LoadOptions, LocaleStore, StoreValue, base_language, normalize_locale};
pub use value::{
    BoundCompound, BoundSubstitutions, DateSource, IntSource, Localizable, LocalizableArray,
    LocalizableCompound, LocalizableDate, LocalizableInt, LocalizableString,
    LocalizableSubstitutions, LocalizableValue, LocalizationStatus, PiecesFn, Resolve,
    Substitutions, SubstitutionsFn,
};
