//! Zip archive of the populated documents.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::PipelineError;

/// Zip `files` into `archive`, each stored under its bare file name.
///
/// The archive is built in a temporary file next to `archive` and only
/// renamed into place once complete, so a failure never leaves a partial
/// archive behind. An existing archive of the same name is replaced.
///
/// # Errors
///
/// Returns `PipelineError::Io` if a file cannot be read or the archive
/// cannot be written, or `PipelineError::Zip` on archive encoding errors.
pub fn write_archive<P: AsRef<Path>>(archive: &Path, files: &[P]) -> Result<(), PipelineError> {
    let dir = match archive.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let staging = NamedTempFile::new_in(dir)?;
    {
        let mut zip = ZipWriter::new(staging.as_file());
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut buf = Vec::new();
        for file in files {
            let file = file.as_ref();
            let name = file
                .file_name()
                .unwrap_or(file.as_os_str())
                .to_string_lossy()
                .into_owned();

            buf.clear();
            File::open(file)?.read_to_end(&mut buf)?;

            zip.start_file(name, options)?;
            zip.write_all(&buf)?;
        }

        zip.finish()?.flush()?;
    }

    staging
        .persist(archive)
        .map_err(|e| PipelineError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use zip::ZipArchive;

    #[test]
    fn test_write_archive_entries() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("manifest.yaml");
        let b = dir.path().join("samples.yaml");
        std::fs::write(&a, "a: 1\n").unwrap();
        std::fs::write(&b, "- id: x\n").unwrap();

        let archive = dir.path().join("out.zip");
        write_archive(&archive, &[&a, &b]).unwrap();

        let mut zip = ZipArchive::new(File::open(&archive).unwrap()).unwrap();
        assert_eq!(zip.len(), 2);

        let mut content = String::new();
        zip.by_name("samples.yaml")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "- id: x\n");
    }

    #[test]
    fn test_write_archive_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("clinical.yaml");
        std::fs::write(&a, "id: new\n").unwrap();

        let archive = dir.path().join("out.zip");
        std::fs::write(&archive, "not a zip").unwrap();
        write_archive(&archive, &[&a]).unwrap();

        let zip = ZipArchive::new(File::open(&archive).unwrap()).unwrap();
        assert_eq!(zip.len(), 1);
    }

    #[test]
    fn test_missing_input_leaves_no_archive() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("out.zip");
        let missing = dir.path().join("missing.yaml");

        assert!(write_archive(&archive, &[&missing]).is_err());
        assert!(!archive.exists());
        // The staging file is removed as well
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
