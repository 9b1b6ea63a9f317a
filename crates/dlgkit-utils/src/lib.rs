#![forbid(unsafe_code)]

//! Shared glue for dlgkit components: the install-registration helper and an
//! explicit context map for passing state down a presentation tree.

pub mod context;
pub mod install;

pub use context::ContextMap;
pub use install::{Component, ComponentRegistry, WithInstall, with_install};
