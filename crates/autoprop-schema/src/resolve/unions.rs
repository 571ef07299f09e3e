use crate::{
    input::{Compilation, TypeDecl, UnionEntry},
    prelude::*,
};
use std::collections::HashSet;

/// Resolve the union entries declared on `decl`.
///
/// Only entries that pass every check are returned; each failed check is
/// reported once against the owning type.
pub fn resolve_unions(
    decl: &TypeDecl,
    compilation: &Compilation,
    diags: &mut Diagnostics,
) -> Vec<UnionDescriptor> {
    let mut seen = HashSet::new();
    let mut unions = Vec::new();

    for entry in &decl.unions {
        if !seen.insert(entry.tag.as_str()) {
            diag!(
                diags,
                DiagnosticId::UnionTagDuplicate,
                decl.location.clone(),
                decl.name,
                entry.tag
            );
            continue;
        }

        let before = diags.len();
        check_subtype(decl, entry, compilation, diags);
        if diags.len() == before {
            unions.push(UnionDescriptor::new(
                &entry.tag,
                TypeRef::new(entry.subtype.as_str()),
            ));
        }
    }

    unions
}

// check_subtype
fn check_subtype(
    decl: &TypeDecl,
    entry: &UnionEntry,
    compilation: &Compilation,
    diags: &mut Diagnostics,
) {
    let location = || decl.location.clone();

    // an undeclared subtype cannot carry the marker
    let Some(subtype) = compilation.find_type(&entry.subtype) else {
        diag!(
            diags,
            DiagnosticId::UnionMemberMustBeSerializable,
            location(),
            decl.name,
            entry.subtype
        );
        return;
    };

    if subtype.kind.is_value_type() {
        diag!(
            diags,
            DiagnosticId::UnionMemberNotAllowStruct,
            location(),
            decl.name,
            subtype.name
        );
    }
    if subtype.serializable.is_none() {
        diag!(
            diags,
            DiagnosticId::UnionMemberMustBeSerializable,
            location(),
            decl.name,
            subtype.name
        );
    }
    if !subtype.derives_from(&decl.id) {
        let id = if decl.kind == TypeKind::Interface {
            DiagnosticId::UnionMemberTypeNotImplementBaseType
        } else {
            DiagnosticId::UnionMemberTypeNotDerivedBaseType
        };
        diag!(diags, id, location(), decl.name, subtype.name);
    }
}
