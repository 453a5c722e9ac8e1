//! Uploaded listing images.

use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

/// Directory name for uploaded images under the storage root.
pub const UPLOADS_DIR: &str = "uploads";

/// Copy an image into the uploads directory, returning the stored path.
///
/// The file keeps its original name; a second upload with the same name
/// overwrites the first.
pub async fn store_image(root_dir: &Path, source: &Path) -> Result<PathBuf> {
    let file_name = source
        .file_name()
        .ok_or_else(|| AppError::validation(format!("Not a file path: {}", source.display())))?;

    let dir = root_dir.join(UPLOADS_DIR);
    tokio::fs::create_dir_all(&dir).await?;

    let dest = dir.join(file_name);
    tokio::fs::copy(source, &dest).await?;
    log::info!("Stored listing image at {}", dest.display());

    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_store_image_copies_into_uploads() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("cam.jpg");
        tokio::fs::write(&src, b"jpeg-bytes").await.unwrap();

        let stored = store_image(tmp.path(), &src).await.unwrap();
        assert_eq!(stored, tmp.path().join(UPLOADS_DIR).join("cam.jpg"));
        assert_eq!(tokio::fs::read(&stored).await.unwrap(), b"jpeg-bytes");
    }

    #[tokio::test]
    async fn test_store_image_rejects_bare_root() {
        let tmp = TempDir::new().unwrap();
        let err = store_image(tmp.path(), Path::new("/")).await;
        assert!(err.is_err());
    }
}
