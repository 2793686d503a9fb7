//! Prop-to-class resolvers.
//!
//! The decorator layer of the original component stack, minus the
//! framework-specific prop plumbing: each resolver turns one prop value
//! (a variant name, a flag, or nothing) into classes and merges them in
//! front of an existing class string.

use rustc_hash::FxHashMap;

use crate::classes::{join, Classes};

/// Maps a variant-name prop to classes, with an optional not-set fallback
/// variant.
#[derive(Debug, Clone, Default)]
pub struct OptionClasses {
    options: FxHashMap<String, Classes>,
    not_set: Option<String>,
}

impl OptionClasses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the classes for one variant name.
    pub fn variant(mut self, name: impl Into<String>, classes: impl Into<Classes>) -> Self {
        self.options.insert(name.into(), classes.into());
        self
    }

    /// Variant applied when no value is given.
    pub fn not_set(mut self, name: impl Into<String>) -> Self {
        self.not_set = Some(name.into());
        self
    }

    /// Classes for `value`, or the not-set fallback's classes when `value`
    /// is absent. Unknown variant names resolve to nothing.
    pub fn resolve(&self, value: Option<&str>) -> Option<&Classes> {
        match value {
            Some(name) => self.options.get(name),
            None => self
                .not_set
                .as_deref()
                .and_then(|name| self.options.get(name)),
        }
    }

    /// Resolve `value` and prepend the result to an existing class string.
    pub fn apply(&self, value: Option<&str>, class_name: Option<&str>) -> Option<String> {
        join([
            self.resolve(value).cloned(),
            class_name.map(Classes::from),
        ])
    }
}

/// Classes applied when a boolean prop is set, with an optional alternative
/// for the unset case.
#[derive(Debug, Clone)]
pub struct FlagClasses {
    on: Classes,
    not_set: Option<Classes>,
}

impl FlagClasses {
    pub fn new(on: impl Into<Classes>) -> Self {
        Self {
            on: on.into(),
            not_set: None,
        }
    }

    /// Classes applied when the flag is unset.
    pub fn not_set(mut self, classes: impl Into<Classes>) -> Self {
        self.not_set = Some(classes.into());
        self
    }

    pub fn resolve(&self, flag: bool) -> Option<&Classes> {
        if flag {
            Some(&self.on)
        } else {
            self.not_set.as_ref()
        }
    }

    /// Resolve `flag` and prepend the result to an existing class string.
    pub fn apply(&self, flag: bool, class_name: Option<&str>) -> Option<String> {
        join([self.resolve(flag).cloned(), class_name.map(Classes::from)])
    }
}

/// Unconditional base classes prepended before an existing class string.
#[derive(Debug, Clone)]
pub struct StaticClasses {
    base: Classes,
}

impl StaticClasses {
    pub fn new(base: impl Into<Classes>) -> Self {
        Self { base: base.into() }
    }

    pub fn apply(&self, class_name: Option<&str>) -> Option<String> {
        join([Some(self.base.clone()), class_name.map(Classes::from)])
    }
}
