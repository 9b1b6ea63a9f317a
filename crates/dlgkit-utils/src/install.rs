#![forbid(unsafe_code)]

//! Conditional component installation.
//!
//! A host application keeps one [`ComponentRegistry`]; wrapping a component
//! with [`with_install`] augments it with an `install` capability that
//! registers it under its conventional name exactly once. Installing the
//! same name again — from the same wrapper or another component claiming the
//! name — is a no-op, so application code can install unconditionally.

use ahash::AHashMap;
use tracing::debug;

/// A library component with a conventional registration name.
pub trait Component {
    /// The name applications refer to this component by (e.g. `"DlgDialog"`).
    fn component_name(&self) -> &'static str;
}

/// A host application's registry of installed components.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    /// Conventional name → type name of the registered component.
    installed: AHashMap<&'static str, &'static str>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a component is installed under `name`.
    pub fn is_installed(&self, name: &str) -> bool {
        self.installed.contains_key(name)
    }

    /// Names of all installed components.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.installed.keys().copied()
    }

    /// Number of installed components.
    pub fn len(&self) -> usize {
        self.installed.len()
    }

    /// Whether nothing is installed.
    pub fn is_empty(&self) -> bool {
        self.installed.is_empty()
    }

    fn register(&mut self, name: &'static str, type_name: &'static str) -> bool {
        if self.installed.contains_key(name) {
            return false;
        }
        self.installed.insert(name, type_name);
        debug!(name, type_name, "component installed");
        true
    }
}

/// A component augmented with an `install` capability.
///
/// Dereferences to the wrapped component, so the wrapper is a drop-in
/// replacement everywhere the component itself is used.
#[derive(Debug, Clone)]
pub struct WithInstall<C> {
    component: C,
}

/// Augment `component` with an `install` capability.
pub fn with_install<C: Component>(component: C) -> WithInstall<C> {
    WithInstall { component }
}

impl<C: Component> WithInstall<C> {
    /// Register the component under its conventional name.
    ///
    /// Returns `true` on first installation, `false` when the name was
    /// already taken (a no-op).
    pub fn install(&self, registry: &mut ComponentRegistry) -> bool {
        registry.register(self.component.component_name(), std::any::type_name::<C>())
    }

    /// Consume the wrapper, returning the component.
    pub fn into_inner(self) -> C {
        self.component
    }
}

impl<C> std::ops::Deref for WithInstall<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.component
    }
}
