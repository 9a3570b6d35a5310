//! Course library application
//!
//! Authors and the courses they own, served as REST resources on top of the
//! courselib kernel and HTTP crates.

pub mod modules;
pub mod utils;

use courselib_db::SharedRepository;
use courselib_kernel::ModuleRegistry;

/// Registry with every resource module wired to `repository`
pub fn registry(repository: SharedRepository) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, repository);
    registry
}
