//! Generator for the virtual module wrapper tables.
//!
//! Reads the plain (`pkcs11.h`) and extended (`pkcs11i.h`) declarations,
//! reconciles them into one signature set and renders forwarding wrappers
//! plus a positional `CK_X_FUNCTION_LIST` initializer.

pub mod codegen;
pub mod config;
pub mod error;
pub mod header;
pub mod order;
pub mod pipeline;
pub mod reconcile;

pub use codegen::render;
pub use config::{GeneratorConfig, TemplateKind};
pub use error::{GenError, GenResult};
pub use pipeline::HeaderSet;
