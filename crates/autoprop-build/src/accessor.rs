//! Accessor synthesis for one type group.
//!
//! The owner must be resolvable and partial, and every member type must
//! resolve, or the whole group produces nothing. An unrecognized capability
//! only drops its own member.

use crate::{BuildError, GeneratedUnit, GeneratorOptions, group::TypeGroup, writer::CodeWriter};
use autoprop_schema::{
    input::{AnnotatedMember, TypeDecl},
    prelude::*,
};
use log::trace;

///
/// AccessorSynthesizer
///

pub struct AccessorSynthesizer<'a> {
    options: &'a GeneratorOptions,
}

impl<'a> AccessorSynthesizer<'a> {
    #[must_use]
    pub const fn new(options: &'a GeneratorOptions) -> Self {
        Self { options }
    }

    /// Produce the unit for one group, or `None` when a check failed.
    pub fn synthesize(
        &self,
        group: &TypeGroup<'_>,
        diags: &mut Diagnostics,
    ) -> Result<Option<GeneratedUnit>, BuildError> {
        let Some(owner) = group.owner else {
            diag!(
                diags,
                DiagnosticId::ClassNotFound,
                group.members.first().and_then(|m| m.location.clone()),
                group.member_names()
            );
            return Ok(None);
        };

        if !owner.is_partial {
            diag!(
                diags,
                DiagnosticId::MustBePartial,
                owner.location.clone(),
                owner.name
            );
            return Ok(None);
        }

        let Some(ty) = self.resolve(owner, &group.members, diags)? else {
            return Ok(None);
        };

        let source = self.emit(&ty)?;

        Ok(Some(GeneratedUnit {
            hint_name: format!("{}{}", ty.name, self.options.file_suffix),
            type_name: ty.name,
            source,
        }))
    }

    // resolve
    // builds the descriptor, None if any member type is unresolvable
    fn resolve(
        &self,
        owner: &TypeDecl,
        members: &[&AnnotatedMember],
        diags: &mut Diagnostics,
    ) -> Result<Option<TypeDescriptor>, BuildError> {
        let naming = owner
            .serializable
            .as_ref()
            .and_then(|marker| marker.naming)
            .unwrap_or(self.options.default_naming);

        let mut resolved = Vec::with_capacity(members.len());
        let mut unresolved = false;

        for (seq, member) in members.iter().enumerate() {
            let seq = i32::try_from(seq).unwrap_or(i32::MAX);
            match self.resolve_member(member, naming, seq, diags)? {
                MemberOutcome::Resolved(descriptor) => resolved.push(descriptor),
                MemberOutcome::Skipped => {}
                MemberOutcome::Unresolved => unresolved = true,
            }
        }

        if unresolved {
            return Ok(None);
        }

        Ok(Some(
            TypeDescriptor::from_decl(owner, naming).with_members(resolved),
        ))
    }

    fn resolve_member(
        &self,
        member: &AnnotatedMember,
        naming: NamingConvention,
        seq: i32,
        diags: &mut Diagnostics,
    ) -> Result<MemberOutcome, BuildError> {
        let args = &member.args;
        let storage = member.storage_type.clone().filter(TypeRef::is_resolved);
        let target = match &args.target_type {
            Some(target) => Some(target.clone()).filter(TypeRef::is_resolved),
            None => storage.clone(),
        };

        let (Some(storage), Some(target)) = (storage, target) else {
            diag!(
                diags,
                DiagnosticId::VariableNameNotFound,
                member.location.clone(),
                member.name
            );
            return Ok(MemberOutcome::Unresolved);
        };

        let capability = match &args.capability {
            None => self.options.default_capability,
            Some(raw) => {
                let Some(capability) = raw.resolve() else {
                    diag!(
                        diags,
                        DiagnosticId::CapabilityNotRecognized,
                        member.location.clone(),
                        member.name,
                        raw
                    );
                    return Ok(MemberOutcome::Skipped);
                };
                capability
            }
        };

        let mut descriptor = MemberDescriptor::new(&member.name, storage, naming, seq)?
            .with_target_type(target)?
            .with_capability(capability)
            .with_location(member.location.clone());

        if let Some(alias) = args.alias.as_deref().filter(|a| !a.is_empty()) {
            descriptor = descriptor.with_alias(alias)?;
        }
        if let Some(order) = args.order {
            descriptor = descriptor.with_order(order);
        }
        if let Some(property) = args.property.as_deref().filter(|p| !p.trim().is_empty()) {
            descriptor = descriptor.with_property_name(property);
        }

        Ok(MemberOutcome::Resolved(descriptor))
    }

    // emit
    fn emit(&self, ty: &TypeDescriptor) -> Result<String, BuildError> {
        let mut w = CodeWriter::new();

        if !self.options.header.is_empty() {
            w.append_line(&self.options.header);
        }

        if let Some(namespace) = ty.namespace() {
            w.append_line(format!("namespace {namespace}"));
            w.begin_block();
        }

        w.append_line(format!(
            "{} partial {} {}",
            ty.accessibility.keyword(),
            ty.kind.keyword(),
            ty.name
        ));
        w.begin_block();

        for (i, member) in ty.members().iter().enumerate() {
            if i > 0 {
                w.append_line("");
            }
            emit_accessor(&mut w, member)?;
        }

        w.end_block()?;
        if ty.namespace().is_some() {
            w.end_block()?;
        }

        w.into_string()
    }
}

///
/// MemberOutcome
///

enum MemberOutcome {
    Resolved(MemberDescriptor),
    Skipped,
    Unresolved,
}

// emit_accessor
fn emit_accessor(w: &mut CodeWriter, member: &MemberDescriptor) -> Result<(), BuildError> {
    let shape = member.shape();
    let field = &member.name;

    trace!(
        "accessor {} -> {} ({})",
        member.name, member.property_name, member.capability
    );

    w.append_line(format!(
        "{} {} {}",
        shape.visibility.keyword(),
        member.target_type,
        member.property_name
    ));
    w.begin_block();

    w.append_line("get");
    w.begin_block();
    if member.is_coerced() {
        w.append_line(format!("return ({})this.{field};", member.target_type));
    } else {
        w.append_line(format!("return this.{field};"));
    }
    w.end_block()?;

    if let Some(setter) = shape.setter_keyword() {
        w.append_line(setter);
        w.begin_block();
        if member.is_coerced() {
            w.append_line(format!("this.{field} = ({})value;", member.storage_type));
        } else {
            w.append_line(format!("this.{field} = value;"));
        }
        w.end_block()?;
    }

    w.end_block()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::group_by_owner;
    use autoprop_schema::input::{CapabilityArg, Compilation};

    fn player(namespace: Option<&str>) -> TypeDecl {
        TypeDecl {
            id: "Game.Player".into(),
            name: "Player".into(),
            namespace: namespace.map(Into::into),
            accessibility: Accessibility::Public,
            is_partial: true,
            location: Some(Location::new("Player.cs", 3, 22)),
            ..Default::default()
        }
    }

    fn run(compilation: &Compilation) -> (Option<GeneratedUnit>, Diagnostics) {
        let options = GeneratorOptions::default();
        let groups = group_by_owner(compilation);
        let mut diags = Diagnostics::new();
        let unit = AccessorSynthesizer::new(&options)
            .synthesize(&groups[0], &mut diags)
            .unwrap();

        (unit, diags)
    }

    #[test]
    fn emits_read_only_accessor_in_namespace() {
        let compilation = Compilation {
            types: vec![player(Some("Game"))],
            annotated_members: vec![AnnotatedMember::new("Game.Player", "_health", "int")],
        };

        let (unit, diags) = run(&compilation);
        let unit = unit.unwrap();

        assert!(diags.is_empty());
        assert_eq!(unit.hint_name, "Player.g.cs");
        assert_eq!(
            unit.source,
            "\
// <auto-generated/>
namespace Game
{
    public partial class Player
    {
        public int Health
        {
            get
            {
                return this._health;
            }
        }
    }
}
"
        );
    }

    #[test]
    fn global_namespace_has_no_block() {
        let compilation = Compilation {
            types: vec![player(None)],
            annotated_members: vec![
                AnnotatedMember::new("Game.Player", "_level", "int")
                    .with_capability(Capability::InternalGetSet),
            ],
        };

        let source = run(&compilation).0.unwrap().source;

        assert!(!source.contains("namespace"));
        assert!(source.starts_with("// <auto-generated/>\npublic partial class Player\n{\n"));
        assert!(source.contains("    internal int Level\n"));
        assert!(source.contains("        set\n"));
    }

    #[test]
    fn coercion_goes_both_ways() {
        let compilation = Compilation {
            types: vec![player(None)],
            annotated_members: vec![
                AnnotatedMember::new("Game.Player", "_speed", "int")
                    .with_target_type("float")
                    .with_capability(Capability::ProtectedGetPrivateSet),
            ],
        };

        let source = run(&compilation).0.unwrap().source;

        assert!(source.contains("protected float Speed"));
        assert!(source.contains("return (float)this._speed;"));
        assert!(source.contains("private set"));
        assert!(source.contains("this._speed = (int)value;"));
    }

    #[test]
    fn missing_owner_reports_joined_names() {
        let mut a = AnnotatedMember::new("Nowhere", "_a", "int");
        a.location = Some(Location::new("Lost.cs", 1, 1));
        let compilation = Compilation {
            types: vec![],
            annotated_members: vec![a, AnnotatedMember::new("Nowhere", "_b", "int")],
        };

        let (unit, diags) = run(&compilation);
        let d = diags.iter().next().unwrap();

        assert!(unit.is_none());
        assert_eq!(d.id, DiagnosticId::ClassNotFound);
        assert_eq!(d.args, ["_a/_b"]);
        assert_eq!(d.location, Some(Location::new("Lost.cs", 1, 1)));
    }

    #[test]
    fn unresolved_member_type_aborts_group() {
        let mut broken = AnnotatedMember::new("Game.Player", "_x", "int");
        broken.storage_type = None;
        let compilation = Compilation {
            types: vec![player(None)],
            annotated_members: vec![AnnotatedMember::new("Game.Player", "_ok", "int"), broken],
        };

        let (unit, diags) = run(&compilation);

        assert!(unit.is_none());
        assert_eq!(diags.count(DiagnosticId::VariableNameNotFound), 1);
    }

    #[test]
    fn unrecognized_capability_drops_only_that_member() {
        let mut bad = AnnotatedMember::new("Game.Player", "_mana", "int");
        bad.args.capability = Some(CapabilityArg::Bits(3));
        let compilation = Compilation {
            types: vec![player(None)],
            annotated_members: vec![
                AnnotatedMember::new("Game.Player", "_health", "int"),
                bad,
            ],
        };

        let (unit, diags) = run(&compilation);
        let source = unit.unwrap().source;

        assert_eq!(diags.count(DiagnosticId::CapabilityNotRecognized), 1);
        assert_eq!(diags.iter().next().unwrap().args, ["_mana", "3"]);
        assert!(source.contains("Health"));
        assert!(!source.contains("Mana"));
    }

    #[test]
    fn property_override_and_explicit_order() {
        let mut first = AnnotatedMember::new("Game.Player", "_a", "int");
        first.args.order = Some(10);
        let mut second = AnnotatedMember::new("Game.Player", "_b", "int");
        second.args.property = Some("Bravo".into());
        let compilation = Compilation {
            types: vec![player(None)],
            annotated_members: vec![first, second],
        };

        let source = run(&compilation).0.unwrap().source;
        let bravo = source.find("Bravo").unwrap();
        let alpha = source.find(" A\n").unwrap();

        assert!(bravo < alpha);
    }

    #[test]
    fn struct_and_record_keywords() {
        let mut decl = player(None);
        decl.kind = TypeKind::Struct;
        decl.accessibility = Accessibility::Internal;
        let compilation = Compilation {
            types: vec![decl],
            annotated_members: vec![AnnotatedMember::new("Game.Player", "_x", "int")],
        };

        let source = run(&compilation).0.unwrap().source;
        assert!(source.contains("internal partial struct Player"));
    }
}
