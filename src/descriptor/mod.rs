//! Configuration descriptor
//!
//! The typed form of the toolchain's descriptor file: which compiler to
//! run, how to tune its optimizer, and which networks can be deployed to.
//! Loading goes text -> raw serde structs -> `${VAR}` interpolation ->
//! validated `ConfigurationDescriptor`, which is never mutated afterwards.

pub mod compiler;
#[allow(clippy::module_inception)]
pub mod descriptor;
pub mod env;
pub mod loader;
pub mod network;
pub mod redacted;
pub mod template;

pub use compiler::{is_semver, CompilerSettings, OptimizerSettings, DEFAULT_OPTIMIZER_RUNS};
pub use descriptor::{ConfigurationDescriptor, DescriptorBuilder, NetworkSigner};
pub use env::{interpolate, EnvSource, Interpolated, ProcessEnv};
pub use loader::{DescriptorFormat, LoadOptions};
pub use network::{NetworkProfile, NetworkProfiles};
pub use redacted::{RedactedDescriptor, RedactedNetwork};
pub use template::{write_template, DESCRIPTOR_TEMPLATE};
