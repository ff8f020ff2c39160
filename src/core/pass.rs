//! The resolution pass.
//!
//! One pass walks one model graph depth-first for one locale and produces a copy
//! in which every localizable field is a constant. The pass owns its registries,
//! so any number of passes can run at once over a shared [`LocaleStore`].
//!
//! ```no_run
//! use locbake::core::{
//!     LocaleStore, LocalizableModel, LocalizableString, PropertyNames, ResolutionPass,
//! };
//! use locbake::error::ResolveError;
//!
//! struct Greeting {
//!     title: LocalizableString,
//! }
//!
//! impl LocalizableModel for Greeting {
//!     fn property_names(&self) -> PropertyNames {
//!         PropertyNames::new().bind(&self.title, "title")
//!     }
//!
//!     fn localize<'a>(&'a self, pass: &mut ResolutionPass<'a>) -> Result<Self, ResolveError> {
//!         Ok(Greeting {
//!             title: pass.resolve(&self.title)?,
//!         })
//!     }
//! }
//! ```

use std::any::Any;

use rayon::prelude::*;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, trace};

use super::key::base_type_name;
use super::localizer::Localizer;
use super::registry::{GraphPath, ModelPathRegistry, PathStep, PropertyNameRegistry, PropertyNames};
use super::store::{LocaleStore, StoreValue};
use super::value::Resolve;
use super::{LocaleKey, LocalizableRef};
use crate::error::ResolveError;

/// A type whose instances hold localizable fields or nested models.
pub trait LocalizableModel: Any + Sized {
    /// Owning type name used to complete bound keys.
    ///
    /// Defaults to the base name of the Rust type, so `Page<Article>` and
    /// `Page<Comment>` share keys.
    fn type_name() -> &'static str {
        base_type_name(std::any::type_name::<Self>())
    }

    /// Binding id → property name for every bound field of this instance.
    fn property_names(&self) -> PropertyNames {
        PropertyNames::new()
    }

    /// Build the resolved copy of `self`, resolving fields through `pass`.
    fn localize<'a>(&'a self, pass: &mut ResolutionPass<'a>) -> Result<Self, ResolveError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassState {
    NotStarted,
    InProgress,
    Done,
}

/// Per-pass resolution context.
#[derive(Debug)]
pub struct ResolutionPass<'a> {
    localizer: Localizer<'a>,
    names: PropertyNameRegistry,
    models: ModelPathRegistry<'a>,
    path: GraphPath,
    scopes: Vec<&'static str>,
    state: PassState,
}

impl<'a> ResolutionPass<'a> {
    pub fn new(locale: &'a str, store: &'a LocaleStore) -> Self {
        Self {
            localizer: Localizer::new(locale, store),
            names: PropertyNameRegistry::default(),
            models: ModelPathRegistry::default(),
            path: GraphPath::root(),
            scopes: Vec::new(),
            state: PassState::NotStarted,
        }
    }

    pub fn localizer(&self) -> Localizer<'a> {
        self.localizer
    }

    pub fn locale(&self) -> &'a str {
        self.localizer.locale()
    }

    pub fn state(&self) -> PassState {
        self.state
    }

    /// Path of the model instance currently being localized.
    pub fn path(&self) -> &GraphPath {
        &self.path
    }

    /// Type name of the innermost model being localized.
    pub fn current_type(&self) -> Option<&'static str> {
        self.scopes.last().copied()
    }

    pub fn property_name(&self, id: &super::BindingId) -> Option<&'static str> {
        self.names.get(id)
    }

    /// Resolve `model` as the root of the graph and finish the pass.
    pub fn run<M: LocalizableModel>(mut self, model: &'a M) -> Result<M, ResolveError> {
        debug!(locale = self.locale(), model = M::type_name(), "resolution pass started");
        self.state = PassState::InProgress;
        let result = self.enter(model);
        self.state = PassState::Done;
        match &result {
            Ok(_) => debug!(locale = self.locale(), "resolution pass finished"),
            Err(err) => debug!(locale = self.locale(), error = %err, "resolution pass failed"),
        }
        result
    }

    /// Resolve a localizable value of the current model.
    pub fn resolve<T: Resolve>(&self, value: &T) -> Result<T, ResolveError> {
        value.resolve(self)
    }

    /// Nested model stored under `name`.
    pub fn model<M: LocalizableModel>(
        &mut self,
        name: &str,
        model: &'a M,
    ) -> Result<M, ResolveError> {
        self.with_step(PathStep::Property(name.to_string()), |pass| pass.enter(model))
    }

    pub fn optional<M: LocalizableModel>(
        &mut self,
        name: &str,
        model: &'a Option<M>,
    ) -> Result<Option<M>, ResolveError> {
        match model {
            Some(model) => self.model(name, model).map(Some),
            None => Ok(None),
        }
    }

    /// Every element of a model array. Each element gets its own path.
    pub fn each<M: LocalizableModel>(
        &mut self,
        name: &str,
        models: &'a [M],
    ) -> Result<Vec<M>, ResolveError> {
        self.with_step(PathStep::Property(name.to_string()), |pass| {
            pass.elements(models)
        })
    }

    pub fn each_nested<M: LocalizableModel>(
        &mut self,
        name: &str,
        rows: &'a [Vec<M>],
    ) -> Result<Vec<Vec<M>>, ResolveError> {
        self.with_step(PathStep::Property(name.to_string()), |pass| {
            rows.iter()
                .enumerate()
                .map(|(i, row)| pass.with_step(PathStep::Index(i), |pass| pass.elements(row)))
                .collect()
        })
    }

    /// Key and index a reference reads from, with bound keys completed.
    pub fn locate(
        &self,
        reference: &LocalizableRef,
    ) -> Result<(LocaleKey, Option<usize>), ResolveError> {
        match reference {
            LocalizableRef::Value { key } => Ok((key.clone(), None)),
            LocalizableRef::ArrayValue { key, index } => Ok((key.clone(), Some(*index))),
            LocalizableRef::Bound(binding) => {
                let type_name = self
                    .current_type()
                    .ok_or(ResolveError::NoModelScope { id: binding.id })?;
                let Some(property) = self.property_name(&binding.id) else {
                    return Err(ResolveError::UnboundProperty {
                        id: binding.id,
                        type_name: type_name.to_string(),
                    });
                };
                Ok((binding.key(type_name, property), binding.index))
            }
        }
    }

    /// Store value a reference points at. A miss is `Ok(None)`.
    pub fn lookup(&self, reference: &LocalizableRef) -> Result<Option<StoreValue>, ResolveError> {
        let (key, index) = self.locate(reference)?;
        let value = self.localizer.get(&key, index);
        if value.is_none() {
            trace!(key = %key, locale = self.locale(), "no store value");
        }
        Ok(value)
    }

    /// The `M` instance owning the field being resolved.
    pub fn current_model<M: LocalizableModel>(&self) -> Result<&'a M, ResolveError> {
        self.models
            .find::<M>(&self.path)
            .ok_or_else(|| ResolveError::ModelNotFound {
                type_name: M::type_name().to_string(),
                path: self.path.clone(),
            })
    }

    fn elements<M: LocalizableModel>(&mut self, models: &'a [M]) -> Result<Vec<M>, ResolveError> {
        models
            .iter()
            .enumerate()
            .map(|(i, model)| self.with_step(PathStep::Index(i), |pass| pass.enter(model)))
            .collect()
    }

    fn with_step<T>(
        &mut self,
        step: PathStep,
        f: impl FnOnce(&mut Self) -> Result<T, ResolveError>,
    ) -> Result<T, ResolveError> {
        self.path.push(step);
        let result = f(self);
        self.path.pop();
        result
    }

    fn enter<M: LocalizableModel>(&mut self, model: &'a M) -> Result<M, ResolveError> {
        trace!(path = %self.path, model = M::type_name(), "entering model");
        self.models.register(self.path.clone(), model);
        self.names.push(model.property_names());
        self.scopes.push(M::type_name());

        let result = model.localize(self);

        self.scopes.pop();
        self.names.pop();
        self.models.remove(&self.path);
        result
    }
}

/// A model whose localizable fields are all constants for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModel<M> {
    locale: String,
    model: M,
}

impl<M> ResolvedModel<M> {
    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn into_inner(self) -> M {
        self.model
    }
}

impl<M: Serialize> ResolvedModel<M> {
    pub fn to_json(&self) -> Result<String, ResolveError> {
        Ok(serde_json::to_string(&self.model)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ResolveError> {
        Ok(serde_json::to_string_pretty(&self.model)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ResolveError> {
        Ok(serde_json::to_vec(&self.model)?)
    }
}

impl<M: DeserializeOwned> ResolvedModel<M> {
    /// Decode bytes produced by [`to_bytes`](Self::to_bytes). Every value comes
    /// back as a constant, so no store is needed.
    pub fn decode(locale: impl Into<String>, bytes: &[u8]) -> Result<Self, ResolveError> {
        Ok(Self {
            locale: locale.into(),
            model: serde_json::from_slice(bytes)?,
        })
    }
}

/// Resolve `model` for `locale`.
///
/// All or nothing: the first failing field aborts the pass and no partial
/// model is returned.
pub fn resolve<M: LocalizableModel>(
    model: &M,
    locale: &str,
    store: &LocaleStore,
) -> Result<ResolvedModel<M>, ResolveError> {
    let resolved = ResolutionPass::new(locale, store).run(model)?;
    Ok(ResolvedModel {
        locale: locale.to_string(),
        model: resolved,
    })
}

/// Resolve `model` for every locale in parallel, one pass per locale.
pub fn resolve_all<M, S>(
    model: &M,
    locales: &[S],
    store: &LocaleStore,
) -> Result<Vec<ResolvedModel<M>>, ResolveError>
where
    M: LocalizableModel + Send + Sync,
    S: AsRef<str> + Sync,
{
    locales
        .par_iter()
        .map(|locale| resolve(model, locale.as_ref(), store))
        .collect()
}
