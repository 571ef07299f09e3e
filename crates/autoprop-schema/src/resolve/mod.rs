//! Resolution of serializable type declarations into descriptors.
//!
//! Type-level shape checks run first, then union entries, then members.
//! Every problem is collected; any diagnostic makes the type fatal.

pub mod members;
pub mod unions;

use crate::{
    input::{Compilation, TypeDecl},
    prelude::*,
};

/// Resolve one serializable declaration, or every diagnostic that rules it out.
pub fn resolve_serializable(
    decl: &TypeDecl,
    compilation: &Compilation,
    default_naming: NamingConvention,
) -> Result<TypeDescriptor, Diagnostics> {
    let naming = decl
        .serializable
        .as_ref()
        .and_then(|marker| marker.naming)
        .unwrap_or(default_naming);

    let mut diags = Diagnostics::new();

    validate_shape(decl, &mut diags);
    let unions = unions::resolve_unions(decl, compilation, &mut diags);
    let members = members::resolve_members(decl, naming, &mut diags);

    if !diags.is_empty() {
        return Err(diags);
    }

    let descriptor = TypeDescriptor::from_decl(decl, naming)
        .with_members(members)
        .with_unions(unions);

    // duplicate tags were already reported above
    descriptor.map_err(|e| {
        let mut diags = Diagnostics::new();
        diag!(diags, DiagnosticId::UnexpectedError, decl.location.clone(), e);
        diags
    })
}

// validate_shape
fn validate_shape(decl: &TypeDecl, diags: &mut Diagnostics) {
    let location = || decl.location.clone();

    if !decl.is_partial {
        diag!(diags, DiagnosticId::MustBePartial, location(), decl.name);
    }
    if decl.is_nested {
        diag!(diags, DiagnosticId::NestedNotAllow, location(), decl.name);
    }

    match (decl.is_abstract_like(), decl.unions.is_empty()) {
        (true, true) => diag!(diags, DiagnosticId::AbstractMustUnion, location(), decl.name),
        (false, false) => {
            diag!(diags, DiagnosticId::ConcreteTypeCantBeUnion, location(), decl.name);
        }
        _ => {}
    }
}
