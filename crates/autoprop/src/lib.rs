//! ## Crate layout
//! - `build`: accessor synthesis, scaffold and serialization-metadata units.
//! - `schema`: input records, descriptors, diagnostics and resolution.
//! - `utils`: identifier casing and accessor-name derivation.
//!
//! The `prelude` module covers what a driver needs to run a pass.

pub use autoprop_build as build;
pub use autoprop_schema as schema;
pub use autoprop_utils as utils;

use thiserror::Error as ThisError;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    BuildError(#[from] build::BuildError),

    #[error(transparent)]
    SchemaError(#[from] schema::Error),
}

/// Parse a JSON compilation snapshot and run the selected pipelines.
pub fn generate_from_json(
    json: &str,
    options: &build::GeneratorOptions,
    pipeline: build::Pipeline,
) -> Result<build::GenerationOutput, Error> {
    let compilation = schema::input::Compilation::from_json(json).map_err(schema::Error::from)?;

    Ok(build::generate(&compilation, options, pipeline))
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::build::{
        GeneratedUnit, GenerationOutput, GeneratorOptions, Pipeline, generate,
        generate_accessors, generate_serialization,
    };
    pub use crate::schema::{
        input::{AnnotatedMember, Compilation, TypeDecl},
        prelude::*,
    };
    pub use crate::utils::{mutate, property_name};
}
