use std::fmt::Display;
use std::path::Path;

use log::debug;

use crate::error::AppError;
use crate::snapshot::SnapshotSource;
use crate::source::RawSource;

/// The kinds of files a [`RawSource`] can be opened from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    ThermoRaw,
    Snapshot,
    Unknown,
}

impl Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Given a path, infer the file format from its extension
pub fn infer_from_path<P: AsRef<Path>>(path: P) -> SourceFormat {
    let ext = path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("raw") => SourceFormat::ThermoRaw,
        Some("json") => SourceFormat::Snapshot,
        _ => SourceFormat::Unknown,
    }
}

/// Open `path` with whichever [`RawSource`] implementation handles its format
pub fn open_path(path: &Path) -> Result<Box<dyn RawSource>, AppError> {
    let format = infer_from_path(path);
    debug!("Opening {} as {format}", path.display());
    let open_err = |source| AppError::Open {
        path: path.to_path_buf(),
        source,
    };
    match format {
        SourceFormat::Snapshot => Ok(Box::new(SnapshotSource::open(path).map_err(open_err)?)),
        #[cfg(feature = "thermo")]
        SourceFormat::ThermoRaw => Ok(Box::new(
            crate::thermo::ThermoSource::open(path).map_err(open_err)?,
        )),
        #[cfg(not(feature = "thermo"))]
        SourceFormat::ThermoRaw => Err(AppError::UnsupportedFormat {
            path: path.to_path_buf(),
            reason: "built without the `thermo` feature".to_string(),
        }),
        SourceFormat::Unknown => Err(AppError::UnsupportedFormat {
            path: path.to_path_buf(),
            reason: "expected a .raw or .json file".to_string(),
        }),
    }
}


#[cfg(test)]
mod test {
    use std::fs;
    use std::io;

    use super::*;

    #[test]
    fn test_infer_from_path() {
        assert_eq!(infer_from_path("run.RAW"), SourceFormat::ThermoRaw);
        assert_eq!(infer_from_path("dir/run.raw"), SourceFormat::ThermoRaw);
        assert_eq!(infer_from_path("run.json"), SourceFormat::Snapshot);
        assert_eq!(infer_from_path("run.mzML"), SourceFormat::Unknown);
        assert_eq!(infer_from_path("run"), SourceFormat::Unknown);
    }

    #[test]
    fn test_open_unknown_format() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("run.mgf");
        fs::write(&path, b"BEGIN IONS")?;
        assert!(matches!(
            open_path(&path),
            Err(AppError::UnsupportedFormat { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_open_malformed_snapshot() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("run.json");
        fs::write(&path, b"{\"instruments\": 3}")?;
        assert!(matches!(open_path(&path), Err(AppError::Open { .. })));
        Ok(())
    }
}
