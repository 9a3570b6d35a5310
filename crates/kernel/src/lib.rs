//! Kernel of the course library service: layered settings, the module
//! lifecycle contract, the module registry and validation primitives.

pub mod module;
pub mod registry;
pub mod settings;
pub mod validation;

pub use module::{InitCtx, Module};
pub use registry::ModuleRegistry;
pub use validation::{FieldError, Validate, ValidationErrors};
