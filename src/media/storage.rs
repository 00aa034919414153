use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufReader};
use uuid::Uuid;

use super::image_ops;
use crate::error::{Error, Result};

const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Enforced before anything touches disk; the HTTP layer carries the same
/// cap as a body limit.
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Subfolder an upload lands in under the uploads root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFolder {
    Projects,
    Gallery,
}

impl MediaFolder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MediaFolder::Projects => "projects",
            MediaFolder::Gallery => "gallery",
        }
    }
}

/// Result of persisting one upload.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    /// Path relative to the uploads root, e.g. "projects/<uuid>_house.jpg".
    pub relative_path: String,
    pub storage_name: String,
    pub original_name: String,
}

#[derive(Clone)]
pub struct MediaStorage {
    base_path: PathBuf,
}

impl MediaStorage {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            base_path: data_dir.join("uploads"),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.base_path
    }

    fn file_path(&self, relative: &str) -> PathBuf {
        self.base_path.join(relative)
    }

    fn temp_path(&self) -> PathBuf {
        self.base_path.join("tmp").join(Uuid::new_v4().to_string())
    }

    /// Persists an upload under `folder` with a collision-free name and
    /// normalizes oversized images in place. Normalization failures keep the
    /// stored original and are only logged.
    pub async fn store(
        &self,
        folder: MediaFolder,
        original_name: &str,
        data: &[u8],
    ) -> Result<StoredUpload> {
        allowed_extension(original_name)?;

        if data.len() > MAX_UPLOAD_BYTES {
            return Err(Error::InvalidArgument(format!(
                "upload of {} bytes exceeds the {MAX_UPLOAD_BYTES} byte limit",
                data.len()
            )));
        }

        let storage_name = format!("{}_{}", Uuid::new_v4(), sanitize_filename(original_name));
        let relative_path = format!("{}/{storage_name}", folder.as_str());

        let temp_path = self.temp_path();
        if let Some(parent) = temp_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut temp_file = File::create(&temp_path).await?;
        temp_file.write_all(data).await?;
        temp_file.sync_all().await?;
        drop(temp_file);

        let final_path = self.file_path(&relative_path);
        if let Some(parent) = final_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::rename(&temp_path, &final_path).await?;

        if let Err(e) = image_ops::normalize_in_place(&final_path) {
            tracing::warn!("Image normalization failed for {relative_path}: {e}");
        }

        Ok(StoredUpload {
            relative_path,
            storage_name,
            original_name: original_name.to_string(),
        })
    }

    /// Opens a stored file for streaming. The relative path is resolved
    /// strictly under the uploads root.
    pub async fn open(&self, relative: &str) -> Result<(BufReader<File>, i64)> {
        validate_relative_path(relative)?;

        let path = self.file_path(relative);
        let file = File::open(&path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::NotFound
            } else {
                Error::Io(e)
            }
        })?;

        let metadata = file.metadata().await?;
        let size = metadata.len() as i64;

        Ok((BufReader::new(file), size))
    }

    /// Removes a stored file. A missing file is not an error.
    pub async fn delete(&self, relative: &str) -> Result<bool> {
        validate_relative_path(relative)?;

        let path = self.file_path(relative);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::Io(e)),
        }
    }
}

fn allowed_extension(filename: &str) -> Result<String> {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty());

    match extension {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(ext),
        _ => Err(Error::UnsupportedMediaType(filename.to_string())),
    }
}

/// Strips path separators and unsafe characters from a client-supplied
/// filename. The original name is kept separately for display.
#[must_use]
pub fn sanitize_filename(filename: &str) -> String {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = sanitized.trim_matches(['.', '_']).to_string();
    if trimmed.is_empty() {
        "upload".to_string()
    } else {
        trimmed
    }
}

fn validate_relative_path(relative: &str) -> Result<()> {
    let traverses = relative.starts_with('/')
        || relative
            .split(['/', '\\'])
            .any(|segment| segment == ".." || segment.contains('\0'));

    if traverses {
        return Err(Error::InvalidArgument(format!(
            "invalid upload path: {relative}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::io::AsyncReadExt;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        use image::{DynamicImage, RgbImage};
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            image::Rgb([40, 90, 160]),
        ));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[tokio::test]
    async fn test_store_and_open() {
        let temp = TempDir::new().unwrap();
        let storage = MediaStorage::new(temp.path());

        let data = png_bytes(64, 64);
        let stored = storage
            .store(MediaFolder::Projects, "site photo.png", &data)
            .await
            .unwrap();

        assert!(stored.relative_path.starts_with("projects/"));
        assert!(stored.storage_name.ends_with("_site_photo.png"));
        assert_eq!(stored.original_name, "site photo.png");

        let (mut reader, size) = storage.open(&stored.relative_path).await.unwrap();
        assert_eq!(size, data.len() as i64);

        let mut content = Vec::new();
        reader.read_to_end(&mut content).await.unwrap();
        assert_eq!(content, data);
    }

    #[tokio::test]
    async fn test_unique_names_per_store() {
        let temp = TempDir::new().unwrap();
        let storage = MediaStorage::new(temp.path());
        let data = png_bytes(8, 8);

        let first = storage
            .store(MediaFolder::Gallery, "hero.png", &data)
            .await
            .unwrap();
        let second = storage
            .store(MediaFolder::Gallery, "hero.png", &data)
            .await
            .unwrap();

        assert_ne!(first.relative_path, second.relative_path);
    }

    #[tokio::test]
    async fn test_disallowed_extension_rejected() {
        let temp = TempDir::new().unwrap();
        let storage = MediaStorage::new(temp.path());

        for name in ["report.pdf", "script.sh", "noextension", "trailing."] {
            let result = storage.store(MediaFolder::Projects, name, b"data").await;
            assert!(
                matches!(result, Err(Error::UnsupportedMediaType(_))),
                "{name} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_oversize_rejected_before_write() {
        let temp = TempDir::new().unwrap();
        let storage = MediaStorage::new(temp.path());

        let data = vec![0u8; MAX_UPLOAD_BYTES + 1];
        let result = storage.store(MediaFolder::Projects, "big.png", &data).await;
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_oversized_image_normalized_on_store() {
        let temp = TempDir::new().unwrap();
        let storage = MediaStorage::new(temp.path());

        let data = png_bytes(2400, 1400);
        let stored = storage
            .store(MediaFolder::Projects, "pano.png", &data)
            .await
            .unwrap();

        use image::GenericImageView;
        let img = image::open(storage.root().join(&stored.relative_path)).unwrap();
        let (width, height) = img.dimensions();
        assert!(width <= 1920);
        assert!(height <= 1080);
    }

    #[tokio::test]
    async fn test_undecodable_payload_kept_as_is() {
        let temp = TempDir::new().unwrap();
        let storage = MediaStorage::new(temp.path());

        // Valid extension, garbage bytes: normalization fails, file stays.
        let stored = storage
            .store(MediaFolder::Projects, "broken.jpg", b"not really a jpeg")
            .await
            .unwrap();

        let (_, size) = storage.open(&stored.relative_path).await.unwrap();
        assert_eq!(size, b"not really a jpeg".len() as i64);
    }

    #[tokio::test]
    async fn test_delete_is_tolerant() {
        let temp = TempDir::new().unwrap();
        let storage = MediaStorage::new(temp.path());

        let stored = storage
            .store(MediaFolder::Gallery, "hero.png", &png_bytes(8, 8))
            .await
            .unwrap();

        assert!(storage.delete(&stored.relative_path).await.unwrap());
        assert!(!storage.delete(&stored.relative_path).await.unwrap());
        assert!(matches!(
            storage.open(&stored.relative_path).await,
            Err(Error::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_traversal_rejected() {
        let temp = TempDir::new().unwrap();
        let storage = MediaStorage::new(temp.path());

        for path in ["../secrets.txt", "projects/../../etc/passwd", "/etc/passwd"] {
            assert!(matches!(
                storage.open(path).await,
                Err(Error::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("site photo.png"), "site_photo.png");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("c:\\temp\\shot.jpg"), "shot.jpg");
        assert_eq!(sanitize_filename("héllo.png"), "h_llo.png");
        assert_eq!(sanitize_filename("...."), "upload");
    }
}
