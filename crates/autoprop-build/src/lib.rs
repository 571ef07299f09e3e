pub mod accessor;
pub mod group;
pub mod scaffold;
pub mod serialize;
pub mod writer;

use crate::{accessor::AccessorSynthesizer, group::group_by_owner};
use autoprop_schema::{input::Compilation, node::NodeError, prelude::*};
use log::{debug, warn};
use std::{
    any::Any,
    panic::{AssertUnwindSafe, catch_unwind},
};
use thiserror::Error as ThisError;

///
/// BuildError
///
/// Internal failures while producing a unit. They never escape a pass: the
/// group boundary turns them into an UnexpectedError diagnostic.
///

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error(transparent)]
    NodeError(#[from] NodeError),

    #[error("metadata rendering failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("block closed without a matching open")]
    UnbalancedBlock,

    #[error("{0} block(s) left open at end of unit")]
    UnclosedBlock(usize),
}

///
/// GeneratorOptions
///

#[derive(Clone, Debug)]
pub struct GeneratorOptions {
    pub file_suffix: String,
    pub header: String,
    pub emit_scaffold: bool,
    pub default_capability: Capability,
    pub default_naming: NamingConvention,
    pub metadata_suffix: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            file_suffix: ".g.cs".to_string(),
            header: "// <auto-generated/>".to_string(),
            emit_scaffold: true,
            default_capability: Capability::PublicGet,
            default_naming: NamingConvention::LowerCamel,
            metadata_suffix: ".meta.json".to_string(),
        }
    }
}

///
/// Pipeline
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Pipeline {
    Accessors,
    Serialization,
    #[default]
    All,
}

///
/// GeneratedUnit
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedUnit {
    pub hint_name: String,
    pub type_name: String,
    pub source: String,
}

///
/// GenerationOutput
///
/// Everything one pass produced. Diagnostics are returned, never printed.
///

#[derive(Debug, Default)]
pub struct GenerationOutput {
    pub scaffold: Option<GeneratedUnit>,
    pub units: Vec<GeneratedUnit>,
    pub diagnostics: Diagnostics,
}

impl GenerationOutput {
    /// Look up a unit by hint name (`Hero.g.cs`, `Hero.meta.json`).
    #[must_use]
    pub fn unit(&self, hint_name: &str) -> Option<&GeneratedUnit> {
        self.all_units().find(|u| u.hint_name == hint_name)
    }

    /// Units produced for one type, in pipeline order.
    pub fn units_for<'a>(&'a self, type_name: &'a str) -> impl Iterator<Item = &'a GeneratedUnit> {
        self.units.iter().filter(move |u| u.type_name == type_name)
    }

    /// Every produced unit, scaffold first.
    pub fn all_units(&self) -> impl Iterator<Item = &GeneratedUnit> {
        self.scaffold.iter().chain(&self.units)
    }

    #[must_use]
    pub const fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    fn merge(&mut self, other: Self) {
        if self.scaffold.is_none() {
            self.scaffold = other.scaffold;
        }
        self.units.extend(other.units);
        self.diagnostics.extend(other.diagnostics);
    }
}

/// Run the selected pipelines over one compilation snapshot.
#[must_use]
pub fn generate(
    compilation: &Compilation,
    options: &GeneratorOptions,
    pipeline: Pipeline,
) -> GenerationOutput {
    match pipeline {
        Pipeline::Accessors => generate_accessors(compilation, options),
        Pipeline::Serialization => generate_serialization(compilation, options),
        Pipeline::All => {
            let mut output = generate_accessors(compilation, options);
            output.merge(generate_serialization(compilation, options));
            output
        }
    }
}

/// Accessor pipeline: one unit per owning type of annotated members.
#[must_use]
pub fn generate_accessors(compilation: &Compilation, options: &GeneratorOptions) -> GenerationOutput {
    let mut output = GenerationOutput::default();

    if options.emit_scaffold {
        match scaffold::scaffold_unit(options) {
            Ok(unit) => output.scaffold = Some(unit),
            Err(e) => diag!(output.diagnostics, DiagnosticId::UnexpectedError, None, e),
        }
    }

    let synthesizer = AccessorSynthesizer::new(options);
    for group in group_by_owner(compilation) {
        debug!(
            "accessor group {} ({} member(s))",
            group.label(),
            group.members.len()
        );

        let location = group.owner.and_then(|o| o.location.clone());
        if let Some(unit) = isolate(group.label(), location, &mut output.diagnostics, |diags| {
            synthesizer.synthesize(&group, diags)
        }) {
            output.units.push(unit);
        }
    }

    output
}

/// Serialization pipeline: one metadata unit per serializable type.
#[must_use]
pub fn generate_serialization(
    compilation: &Compilation,
    options: &GeneratorOptions,
) -> GenerationOutput {
    let mut output = GenerationOutput::default();

    for decl in compilation.serializable_types() {
        debug!("serializable type {}", decl.name);

        if let Some(unit) = isolate(
            &decl.name,
            decl.location.clone(),
            &mut output.diagnostics,
            |diags| serialize::metadata_unit(decl, compilation, options, diags),
        ) {
            output.units.push(unit);
        }
    }

    output
}

// isolate
// runs one group; errors and panics become a single UnexpectedError and the
// group's output is dropped
fn isolate<F>(
    label: &str,
    location: Option<Location>,
    diags: &mut Diagnostics,
    f: F,
) -> Option<GeneratedUnit>
where
    F: FnOnce(&mut Diagnostics) -> Result<Option<GeneratedUnit>, BuildError>,
{
    let mut local = Diagnostics::new();
    let result = catch_unwind(AssertUnwindSafe(|| f(&mut local)));

    let before = diags.len();
    let unit = match result {
        Ok(Ok(unit)) => unit,
        Ok(Err(e)) => {
            diag!(local, DiagnosticId::UnexpectedError, location, e);
            None
        }
        Err(payload) => {
            diag!(
                local,
                DiagnosticId::UnexpectedError,
                location,
                panic_message(payload.as_ref())
            );
            None
        }
    };
    diags.extend(local);

    if unit.is_none() {
        warn!(
            "group {label} abandoned with {} diagnostic(s)",
            diags.len() - before
        );
    }

    unit
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}
