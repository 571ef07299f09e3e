use autoprop_schema::input::{AnnotatedMember, Compilation, TypeDecl};
use std::collections::HashMap;

///
/// TypeGroup
///
/// All annotated members sharing one owner key. `owner` is `None` when the
/// key names no declared type, or when the members carried no owner at all.
///

#[derive(Debug)]
pub struct TypeGroup<'a> {
    pub key: Option<&'a str>,
    pub owner: Option<&'a TypeDecl>,
    pub members: Vec<&'a AnnotatedMember>,
}

impl TypeGroup<'_> {
    /// Member names joined with `/`, as reported when the owner is missing.
    #[must_use]
    pub fn member_names(&self) -> String {
        self.members
            .iter()
            .map(|m| m.name.as_str())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Display name for logging.
    #[must_use]
    pub fn label(&self) -> &str {
        self.owner
            .map(|o| o.name.as_str())
            .or(self.key)
            .unwrap_or("<unknown>")
    }
}

/// Group annotated members by owner, in order of first appearance.
#[must_use]
pub fn group_by_owner(compilation: &Compilation) -> Vec<TypeGroup<'_>> {
    let mut groups: Vec<TypeGroup<'_>> = Vec::new();
    let mut index: HashMap<Option<&str>, usize> = HashMap::new();

    for member in &compilation.annotated_members {
        let key = member.owner.as_deref();
        let idx = *index.entry(key).or_insert_with(|| {
            groups.push(TypeGroup {
                key,
                owner: key.and_then(|id| compilation.find_type(id)),
                members: Vec::new(),
            });
            groups.len() - 1
        });

        groups[idx].members.push(member);
    }

    groups
}
