use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database file to `dest_file`, optionally replacing the copy
    /// with a `.zip` archive. Returns the path of the file that was written.
    pub fn backup(db_path: &str, dest_file: &str, compress: bool) -> AppResult<PathBuf> {
        let src = Path::new(db_path);
        let dest = Path::new(dest_file);

        // 1️⃣ Check DB exists
        if !src.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )
            .into());
        }

        // 2️⃣ Ensure destination folder exists
        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // 3️⃣ Copy database
        fs::copy(src, dest)?;

        // 4️⃣ Optional compression
        if !compress {
            return Ok(dest.to_path_buf());
        }

        let compressed = compress_backup(dest)?;
        if let Err(e) = fs::remove_file(dest) {
            tracing::warn!("failed to remove uncompressed backup {}: {e}", dest.display());
        }

        Ok(compressed)
    }
}

/// Compress a backup using .zip
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let entry_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| AppError::Other(format!("invalid backup path: {}", path.display())))?;

    let mut f = fs::File::open(path)?;
    zip.start_file(entry_name, options)
        .map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    Ok(zip_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_and_compressed_backups() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("src.sqlite");
        fs::write(&db, b"sqlite bytes").unwrap();
        let db = db.to_string_lossy().to_string();

        let plain = dir.path().join("out/copy.sqlite");
        let written = BackupLogic::backup(&db, &plain.to_string_lossy(), false).unwrap();
        assert_eq!(written, plain);
        assert_eq!(fs::read(&plain).unwrap(), b"sqlite bytes");

        let zipped = dir.path().join("z.sqlite");
        let written = BackupLogic::backup(&db, &zipped.to_string_lossy(), true).unwrap();
        assert_eq!(written, dir.path().join("z.zip"));
        assert!(written.exists());
        assert!(!zipped.exists());
    }

    #[test]
    fn missing_database_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("none.sqlite");
        let dest = dir.path().join("b.sqlite");
        assert!(
            BackupLogic::backup(&missing.to_string_lossy(), &dest.to_string_lossy(), false).is_err()
        );
    }
}
