//! Pass-scoped registries.
//!
//! [`PropertyNameRegistry`] maps binding ids of anonymous fields to the property
//! names their model declares. [`ModelPathRegistry`] maps graph paths to the model
//! instances living there, so a field can find its own owner among several
//! instances of one type. Both are created by a [`ResolutionPass`] and dropped
//! with it.
//!
//! [`ResolutionPass`]: crate::core::ResolutionPass

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use super::BindingId;
use super::value::Localizable;

/// Binding id → property name table supplied by one model instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyNames(HashMap<BindingId, &'static str>);

impl PropertyNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `value` under `name`. Values without a binding are skipped.
    pub fn bind(self, value: &impl Localizable, name: &'static str) -> Self {
        match value.binding_id() {
            Some(id) => self.bind_id(id, name),
            None => self,
        }
    }

    pub fn bind_id(mut self, id: BindingId, name: &'static str) -> Self {
        self.0.insert(id, name);
        self
    }

    pub fn get(&self, id: &BindingId) -> Option<&'static str> {
        self.0.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Stack of [`PropertyNames`] frames, one per model instance being walked.
#[derive(Debug, Default)]
pub struct PropertyNameRegistry {
    frames: Vec<PropertyNames>,
}

impl PropertyNameRegistry {
    pub fn push(&mut self, names: PropertyNames) {
        self.frames.push(names);
    }

    pub fn pop(&mut self) -> Option<PropertyNames> {
        self.frames.pop()
    }

    /// Innermost frame first.
    pub fn get(&self, id: &BindingId) -> Option<&'static str> {
        self.frames.iter().rev().find_map(|frame| frame.get(id))
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    Property(String),
    Index(usize),
}

/// Steps from the root of a pass to a model instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GraphPath(Vec<PathStep>);

impl GraphPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: PathStep) {
        self.0.push(step);
    }

    pub fn pop(&mut self) -> Option<PathStep> {
        self.0.pop()
    }

    /// Path of the enclosing step, or `None` at the root.
    pub fn parent(&self) -> Option<GraphPath> {
        let (_, rest) = self.0.split_last()?;
        Some(GraphPath(rest.to_vec()))
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for GraphPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, step) in self.0.iter().enumerate() {
            match step {
                PathStep::Property(name) if i == 0 => f.write_str(name)?,
                PathStep::Property(name) => write!(f, ".{name}")?,
                PathStep::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Graph path → model instance for the instances currently being walked.
#[derive(Default)]
pub struct ModelPathRegistry<'a> {
    entries: HashMap<GraphPath, &'a (dyn Any + 'static)>,
}

impl<'a> ModelPathRegistry<'a> {
    pub fn register(&mut self, path: GraphPath, model: &'a (dyn Any + 'static)) {
        self.entries.insert(path, model);
    }

    pub fn remove(&mut self, path: &GraphPath) {
        self.entries.remove(path);
    }

    /// The `M` at `path`, or at the nearest enclosing path holding an `M`.
    pub fn find<M: Any>(&self, path: &GraphPath) -> Option<&'a M> {
        let mut current = Some(path.clone());
        while let Some(path) = current {
            let registered: Option<&'a (dyn Any + 'static)> = self.entries.get(&path).copied();
            if let Some(model) = registered.and_then(|model| model.downcast_ref::<M>()) {
                return Some(model);
            }
            current = path.parent();
        }
        None
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ModelPathRegistry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut paths: Vec<String> = self.entries.keys().map(ToString::to_string).collect();
        paths.sort();
        f.debug_struct("ModelPathRegistry")
            .field("paths", &paths)
            .finish()
    }
}
