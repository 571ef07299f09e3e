use autoprop::build::GeneratedUnit;
use log::info;
use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};

/// Write every unit into `dir`, creating it when missing.
///
/// Hint names must be plain file names; nothing is written when any unit
/// would land outside `dir`.
pub fn write_units<'a>(
    dir: &Path,
    units: impl IntoIterator<Item = &'a GeneratedUnit>,
) -> io::Result<Vec<PathBuf>> {
    let units: Vec<_> = units.into_iter().collect();
    for unit in &units {
        check_hint_name(&unit.hint_name)?;
    }

    fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for unit in units {
        let path = dir.join(&unit.hint_name);
        fs::write(&path, &unit.source)?;
        info!("wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

fn check_hint_name(hint: &str) -> io::Result<()> {
    let mut components = Path::new(hint).components();
    let plain = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !hint.contains(['/', '\\']);

    if plain {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("unit hint name '{hint}' is not a plain file name"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(hint: &str) -> GeneratedUnit {
        GeneratedUnit {
            hint_name: hint.into(),
            type_name: "A".into(),
            source: "// a\n".into(),
        }
    }

    #[test]
    fn writes_units_under_hint_names() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("generated");
        let units = [
            GeneratedUnit {
                hint_name: "A.g.cs".into(),
                type_name: "A".into(),
                source: "// a\n".into(),
            },
            GeneratedUnit {
                hint_name: "A.meta.json".into(),
                type_name: "A".into(),
                source: "{}\n".into(),
            },
        ];

        let written = write_units(&out, &units).unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(fs::read_to_string(out.join("A.g.cs")).unwrap(), "// a\n");
        assert_eq!(fs::read_to_string(out.join("A.meta.json")).unwrap(), "{}\n");
    }

    #[test]
    fn hint_names_cannot_leave_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("generated");

        for hint in ["../escape.g.cs", "nested/A.g.cs", "/abs.g.cs", "..", ".", "", "a\\b.g.cs"] {
            let err = write_units(&out, &[unit("Ok.g.cs"), unit(hint)]).unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput, "{hint:?}");
        }

        assert!(!dir.path().join("escape.g.cs").exists());
        assert!(!out.exists());
    }
}
