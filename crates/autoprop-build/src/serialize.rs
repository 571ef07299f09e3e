use crate::{BuildError, GeneratedUnit, GeneratorOptions};
use autoprop_schema::{
    input::{Compilation, TypeDecl},
    prelude::*,
    resolve::resolve_serializable,
};

/// Resolve one serializable type into its metadata unit.
///
/// Returns `None` after recording diagnostics when the type is rejected.
pub fn metadata_unit(
    decl: &TypeDecl,
    compilation: &Compilation,
    options: &GeneratorOptions,
    diags: &mut Diagnostics,
) -> Result<Option<GeneratedUnit>, BuildError> {
    let ty = match resolve_serializable(decl, compilation, options.default_naming) {
        Ok(ty) => ty,
        Err(errs) => {
            diags.extend(errs);
            return Ok(None);
        }
    };

    Ok(Some(GeneratedUnit {
        hint_name: format!("{}{}", ty.name, options.metadata_suffix),
        type_name: ty.name.clone(),
        source: render_metadata(&ty)?,
    }))
}

/// Pretty JSON rendering of a resolved descriptor.
pub fn render_metadata(ty: &TypeDescriptor) -> Result<String, BuildError> {
    let mut json = serde_json::to_string_pretty(ty)?;
    json.push('\n');

    Ok(json)
}
