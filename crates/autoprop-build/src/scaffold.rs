use crate::{BuildError, GeneratedUnit, GeneratorOptions, writer::CodeWriter};
use autoprop_schema::prelude::*;

pub const SCAFFOLD_NAMESPACE: &str = "AutoProperty";
pub const ATTRIBUTE_NAME: &str = "AutoPropAttribute";
pub const CAPABILITY_ENUM: &str = "Capability";

/// The annotation and capability enum declarations, emitted once per pass.
pub fn scaffold_unit(options: &GeneratorOptions) -> Result<GeneratedUnit, BuildError> {
    let default = options.default_capability;
    let mut w = CodeWriter::new();

    if !options.header.is_empty() {
        w.append_line(&options.header);
    }
    w.append_line("using System;");
    w.append_line("");
    w.append_line(format!("namespace {SCAFFOLD_NAMESPACE}"));
    w.begin_block();

    w.append_line(
        "[AttributeUsage(AttributeTargets.Field, Inherited = false, AllowMultiple = false)]",
    );
    w.append_line(format!("sealed class {ATTRIBUTE_NAME} : Attribute"));
    w.begin_block();
    w.append_line("public Type Type { get; set; }");
    w.append_line(format!("public {CAPABILITY_ENUM} Access {{ get; set; }}"));
    w.append_line("public string Key { get; set; }");
    w.append_line("public string Property { get; set; }");
    w.append_line("public int Order { get; set; }");
    w.append_line("");
    w.append_line(format!(
        "public {ATTRIBUTE_NAME}({CAPABILITY_ENUM} access = {CAPABILITY_ENUM}.{default})"
    ));
    w.begin_block();
    w.append_line("Access = access;");
    w.end_block()?;
    w.append_line("");
    w.append_line(format!(
        "public {ATTRIBUTE_NAME}(Type type, {CAPABILITY_ENUM} access = {CAPABILITY_ENUM}.{default})"
    ));
    w.begin_block();
    w.append_line("Type = type;");
    w.append_line("Access = access;");
    w.end_block()?;
    w.end_block()?;

    w.append_line("");
    w.append_line("[Flags]");
    w.append_line(format!("internal enum {CAPABILITY_ENUM}"));
    w.begin_block();
    for capability in Capability::ALL {
        w.append_line(format!("{capability} = {},", flag_expr(capability.bits())));
    }
    w.end_block()?;

    w.end_block()?;

    Ok(GeneratedUnit {
        hint_name: format!("{ATTRIBUTE_NAME}{}", options.file_suffix),
        type_name: ATTRIBUTE_NAME.to_string(),
        source: w.into_string()?,
    })
}

// `1` for the lowest flag, `1 << n` after that
fn flag_expr(bits: u32) -> String {
    match bits.trailing_zeros() {
        0 => "1".to_string(),
        shift => format!("1 << {shift}"),
    }
}
