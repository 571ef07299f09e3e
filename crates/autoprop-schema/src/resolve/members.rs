use crate::{
    input::{SourceMember, TypeDecl},
    prelude::*,
};

/// Whether a source member takes part in serialization.
#[must_use]
pub fn is_serializable_member(member: &SourceMember) -> bool {
    !member.is_static
        && !member.is_implicit
        && !member.ignored
        && member.accessibility == Accessibility::Public
        && !member.is_write_only()
        && !member.is_indexer
}

/// Resolve the serializable members of `decl` in declaration order.
///
/// Sequential order counts only the members that pass the filter. The caller
/// applies the stable sort by effective order.
pub fn resolve_members(
    decl: &TypeDecl,
    naming: NamingConvention,
    diags: &mut Diagnostics,
) -> Vec<MemberDescriptor> {
    let mut members = Vec::new();

    for (seq, member) in decl
        .members
        .iter()
        .filter(|m| is_serializable_member(m))
        .enumerate()
    {
        let Some(ty) = member.ty.clone().filter(TypeRef::is_resolved) else {
            diag!(
                diags,
                DiagnosticId::VariableNameNotFound,
                member.location.clone().or_else(|| decl.location.clone()),
                member.name
            );
            continue;
        };

        let seq = i32::try_from(seq).unwrap_or(i32::MAX);
        match resolve_member(member, ty, naming, seq) {
            Ok(descriptor) => members.push(descriptor),
            Err(e) => diag!(
                diags,
                DiagnosticId::UnexpectedError,
                member.location.clone(),
                e
            ),
        }
    }

    members
}

fn resolve_member(
    member: &SourceMember,
    ty: TypeRef,
    naming: NamingConvention,
    seq: i32,
) -> Result<MemberDescriptor, NodeError> {
    let mut descriptor = MemberDescriptor::new(&member.name, ty, naming, seq)?
        .with_location(member.location.clone());

    if let Some(marker) = &member.member {
        // an empty alias falls back to the derived key name
        if let Some(alias) = marker.alias.as_deref().filter(|a| !a.is_empty()) {
            descriptor = descriptor.with_alias(alias)?;
        }
        if let Some(order) = marker.order {
            descriptor = descriptor.with_order(order);
        }
    }

    Ok(descriptor)
}
