use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::{MediaFolder, MediaStorage};
use crate::error::{Error, Result};
use crate::store::Store;
use crate::types::MediaAsset;

/// Owner ref for the site-wide hero image collection, which has no owning
/// entity row.
pub const HERO_GALLERY: &str = "hero-gallery";

/// One file of an upload batch, as handed over by the transport layer.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Keeps an owner's image set, its single main-image designation, and the
/// files on disk consistent with the database rows. The database is
/// authoritative: rows are deleted before files, and file failures after a
/// confirmed row change are logged, never propagated.
#[derive(Clone)]
pub struct Gallery {
    store: Arc<dyn Store>,
    media: MediaStorage,
}

impl Gallery {
    pub fn new(store: Arc<dyn Store>, media: MediaStorage) -> Self {
        Self { store, media }
    }

    /// Stores a batch of project images in input order. Files that fail
    /// validation, storage, or insertion are skipped and the batch
    /// continues; only the stored subset is returned.
    ///
    /// At most one file per batch becomes the main image: the first stored
    /// file when `requested_main` is set, or when the owner had no main
    /// image yet. An existing main is demoted through the same
    /// clear-then-set transaction as `set_main`, so the owner never holds
    /// two main images.
    pub async fn upload_batch(
        &self,
        owner_ref: &str,
        files: Vec<UploadFile>,
        requested_main: bool,
    ) -> Result<Vec<MediaAsset>> {
        let mut has_existing_main = self.store.count_main_assets(owner_ref)? > 0;
        let mut force_main = requested_main;
        let mut first_stored = true;
        let mut stored = Vec::new();

        for file in files {
            let upload = match self
                .media
                .store(MediaFolder::Projects, &file.filename, &file.data)
                .await
            {
                Ok(upload) => upload,
                Err(e) => {
                    tracing::warn!("Skipping upload '{}': {e}", file.filename);
                    continue;
                }
            };

            let make_main = first_stored && (force_main || !has_existing_main);

            let mut asset = MediaAsset {
                id: Uuid::new_v4().to_string(),
                owner_ref: owner_ref.to_string(),
                relative_path: upload.relative_path.clone(),
                original_name: Some(upload.original_name.clone()),
                alt_text: None,
                is_main: make_main && !has_existing_main,
                display_order: 0,
                created_at: Utc::now(),
            };

            if let Err(e) = self.store.insert_asset(&asset) {
                tracing::warn!("Skipping upload '{}': {e}", file.filename);
                if let Err(e) = self.media.delete(&upload.relative_path).await {
                    tracing::warn!("Could not remove file {}: {e}", upload.relative_path);
                }
                continue;
            }

            if make_main && has_existing_main {
                // Demote the previous main atomically.
                self.store.set_main_asset(owner_ref, &asset.id)?;
                asset.is_main = true;
            }

            if make_main {
                has_existing_main = true;
                force_main = false;
            }
            first_stored = false;

            stored.push(asset);
        }

        Ok(stored)
    }

    /// Stores hero-gallery images. No main-image bookkeeping; display order
    /// follows batch position.
    pub async fn upload_hero(&self, files: Vec<UploadFile>) -> Result<Vec<MediaAsset>> {
        let mut stored = Vec::new();

        for file in files {
            let upload = match self
                .media
                .store(MediaFolder::Gallery, &file.filename, &file.data)
                .await
            {
                Ok(upload) => upload,
                Err(e) => {
                    tracing::warn!("Skipping upload '{}': {e}", file.filename);
                    continue;
                }
            };

            let asset = MediaAsset {
                id: Uuid::new_v4().to_string(),
                owner_ref: HERO_GALLERY.to_string(),
                relative_path: upload.relative_path.clone(),
                original_name: Some(upload.original_name.clone()),
                alt_text: Some(format!("Hero Image {}", stored.len() + 1)),
                is_main: false,
                display_order: stored.len() as i64,
                created_at: Utc::now(),
            };

            if let Err(e) = self.store.insert_asset(&asset) {
                tracing::warn!("Skipping upload '{}': {e}", file.filename);
                if let Err(e) = self.media.delete(&upload.relative_path).await {
                    tracing::warn!("Could not remove file {}: {e}", upload.relative_path);
                }
                continue;
            }

            stored.push(asset);
        }

        Ok(stored)
    }

    /// Makes `asset_id` the owner's only main image.
    pub fn set_main(&self, owner_ref: &str, asset_id: &str) -> Result<()> {
        self.store.set_main_asset(owner_ref, asset_id)
    }

    /// Deletes one asset: row first, then the file best-effort. Deleting the
    /// current main image leaves the owner without one; no replacement is
    /// promoted.
    pub async fn delete_asset(&self, owner_ref: &str, asset_id: &str) -> Result<MediaAsset> {
        let asset = self
            .store
            .get_asset(owner_ref, asset_id)?
            .ok_or(Error::NotFound)?;

        if !self.store.delete_asset(owner_ref, asset_id)? {
            return Err(Error::NotFound);
        }

        if let Err(e) = self.media.delete(&asset.relative_path).await {
            tracing::warn!("Could not delete file {}: {e}", asset.relative_path);
        }

        Ok(asset)
    }

    /// Deletes every asset of an owner: all rows, then all files
    /// best-effort. Returns the number of rows removed.
    pub async fn delete_owner(&self, owner_ref: &str) -> Result<usize> {
        let assets = self.store.list_assets(owner_ref)?;
        let removed = self.store.delete_assets_for_owner(owner_ref)?;

        for asset in &assets {
            if let Err(e) = self.media.delete(&asset.relative_path).await {
                tracing::warn!("Could not delete file {}: {e}", asset.relative_path);
            }
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteStore;
    use tempfile::TempDir;

    fn test_gallery() -> (TempDir, Arc<SqliteStore>, Gallery) {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(SqliteStore::new(temp.path().join("test.db")).unwrap());
        store.initialize().unwrap();
        let media = MediaStorage::new(temp.path());
        let gallery = Gallery::new(store.clone(), media);
        (temp, store, gallery)
    }

    fn png_upload(name: &str) -> UploadFile {
        use image::{DynamicImage, RgbImage};
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 16, image::Rgb([200, 60, 30])));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        UploadFile {
            filename: name.to_string(),
            data: out.into_inner(),
        }
    }

    fn main_count(store: &SqliteStore, owner: &str) -> i64 {
        store.count_main_assets(owner).unwrap()
    }

    #[tokio::test]
    async fn test_first_upload_auto_promoted() {
        let (_temp, store, gallery) = test_gallery();

        let stored = gallery
            .upload_batch(
                "p-1",
                vec![png_upload("a.png"), png_upload("b.png"), png_upload("c.png")],
                false,
            )
            .await
            .unwrap();

        assert_eq!(stored.len(), 3);
        assert!(stored[0].is_main);
        assert!(!stored[1].is_main);
        assert!(!stored[2].is_main);
        assert_eq!(main_count(&store, "p-1"), 1);
    }

    #[tokio::test]
    async fn test_second_batch_does_not_promote() {
        let (_temp, store, gallery) = test_gallery();

        gallery
            .upload_batch("p-1", vec![png_upload("a.png")], false)
            .await
            .unwrap();
        let second = gallery
            .upload_batch("p-1", vec![png_upload("b.png")], false)
            .await
            .unwrap();

        assert!(!second[0].is_main);
        assert_eq!(main_count(&store, "p-1"), 1);
    }

    #[tokio::test]
    async fn test_requested_main_demotes_previous() {
        let (_temp, store, gallery) = test_gallery();

        let first = gallery
            .upload_batch("p-1", vec![png_upload("a.png")], false)
            .await
            .unwrap();
        assert!(first[0].is_main);

        let second = gallery
            .upload_batch("p-1", vec![png_upload("b.png")], true)
            .await
            .unwrap();
        assert!(second[0].is_main);

        let previous = store.get_asset("p-1", &first[0].id).unwrap().unwrap();
        assert!(!previous.is_main);
        assert_eq!(main_count(&store, "p-1"), 1);
    }

    #[tokio::test]
    async fn test_requested_main_marks_only_first_of_batch() {
        let (_temp, store, gallery) = test_gallery();

        let stored = gallery
            .upload_batch(
                "p-1",
                vec![png_upload("a.png"), png_upload("b.png"), png_upload("c.png")],
                true,
            )
            .await
            .unwrap();

        assert!(stored[0].is_main);
        assert!(!stored[1].is_main);
        assert!(!stored[2].is_main);
        assert_eq!(main_count(&store, "p-1"), 1);
    }

    #[tokio::test]
    async fn test_invalid_file_skipped_batch_continues() {
        let (_temp, store, gallery) = test_gallery();

        let stored = gallery
            .upload_batch(
                "p-1",
                vec![
                    UploadFile {
                        filename: "notes.txt".to_string(),
                        data: b"not an image".to_vec(),
                    },
                    png_upload("b.png"),
                ],
                false,
            )
            .await
            .unwrap();

        // The rejected file does not consume the promotion slot.
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].original_name.as_deref(), Some("b.png"));
        assert!(stored[0].is_main);
        assert_eq!(main_count(&store, "p-1"), 1);
    }

    #[tokio::test]
    async fn test_deleting_main_does_not_promote_replacement() {
        let (_temp, store, gallery) = test_gallery();

        let stored = gallery
            .upload_batch("p-1", vec![png_upload("a.png"), png_upload("b.png")], false)
            .await
            .unwrap();

        gallery.delete_asset("p-1", &stored[0].id).await.unwrap();

        assert_eq!(main_count(&store, "p-1"), 0);
        let remaining = store.list_assets("p-1").unwrap();
        assert_eq!(remaining.len(), 1);
        assert!(!remaining[0].is_main);
    }

    #[tokio::test]
    async fn test_delete_removes_row_and_file() {
        let (_temp, store, gallery) = test_gallery();

        let stored = gallery
            .upload_batch("p-1", vec![png_upload("a.png")], false)
            .await
            .unwrap();
        let path = gallery.media.root().join(&stored[0].relative_path);
        assert!(path.exists());

        gallery.delete_asset("p-1", &stored[0].id).await.unwrap();

        assert!(!path.exists());
        assert!(store.get_asset("p-1", &stored[0].id).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_asset_is_not_found() {
        let (_temp, _store, gallery) = test_gallery();

        let result = gallery.delete_asset("p-1", "missing").await;
        assert!(matches!(result, Err(Error::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_owner_removes_rows_and_files() {
        let (_temp, store, gallery) = test_gallery();

        let stored = gallery
            .upload_batch("p-1", vec![png_upload("a.png"), png_upload("b.png")], false)
            .await
            .unwrap();

        let removed = gallery.delete_owner("p-1").await.unwrap();
        assert_eq!(removed, 2);
        assert!(store.list_assets("p-1").unwrap().is_empty());
        for asset in &stored {
            assert!(!gallery.media.root().join(&asset.relative_path).exists());
        }
    }

    #[tokio::test]
    async fn test_set_main_missing_asset_keeps_current_main() {
        let (_temp, store, gallery) = test_gallery();

        let stored = gallery
            .upload_batch("p-1", vec![png_upload("a.png")], false)
            .await
            .unwrap();

        let result = gallery.set_main("p-1", "missing");
        assert!(matches!(result, Err(Error::NotFound)));
        assert!(store.get_asset("p-1", &stored[0].id).unwrap().unwrap().is_main);
    }

    #[tokio::test]
    async fn test_main_invariant_across_operation_sequence() {
        let (_temp, store, gallery) = test_gallery();

        let batch1 = gallery
            .upload_batch("p-1", vec![png_upload("a.png"), png_upload("b.png")], false)
            .await
            .unwrap();
        gallery
            .upload_batch("p-1", vec![png_upload("c.png")], true)
            .await
            .unwrap();
        gallery.set_main("p-1", &batch1[1].id).unwrap();
        gallery.delete_asset("p-1", &batch1[1].id).await.unwrap();
        let batch3 = gallery
            .upload_batch("p-1", vec![png_upload("d.png")], false)
            .await
            .unwrap();

        // After deleting the main, nothing was promoted until the next
        // upload observed an empty main set.
        assert!(batch3[0].is_main);
        assert!(main_count(&store, "p-1") <= 1);
    }

    #[tokio::test]
    async fn test_hero_uploads_carry_no_main_flag() {
        let (_temp, store, gallery) = test_gallery();

        let stored = gallery
            .upload_hero(vec![png_upload("one.png"), png_upload("two.png")])
            .await
            .unwrap();

        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|a| !a.is_main));
        assert_eq!(stored[0].display_order, 0);
        assert_eq!(stored[1].display_order, 1);
        assert_eq!(stored[0].alt_text.as_deref(), Some("Hero Image 1"));
        assert_eq!(main_count(&store, HERO_GALLERY), 0);

        let listed = store.list_assets(HERO_GALLERY).unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed[0].relative_path.starts_with("gallery/"));
    }
}
