//! Uploaded image storage.
//!
//! Images are written to the media directory and served from `/media`. Only
//! the public URL is kept in the database.

use std::path::{Path, PathBuf};

use sanndikaa_core::ShopId;
use thiserror::Error;
use tracing::instrument;

use crate::config::MediaConfig;

/// Public path prefix the media directory is served under.
pub const MEDIA_URL_PREFIX: &str = "/media";

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "avif"];

/// Errors from storing an upload.
#[derive(Debug, Error)]
pub enum MediaError {
    /// Not an image, or an image format we do not serve.
    #[error("unsupported file type")]
    UnsupportedType,

    /// Larger than the configured limit.
    #[error("file is larger than {max} bytes")]
    TooLarge { max: usize },

    /// Writing the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// What an image is for. Used as the file name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Product,
    Logo,
    Banner,
}

impl MediaKind {
    const fn prefix(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Logo => "logo",
            Self::Banner => "banner",
        }
    }
}

/// An uploaded file as read from a multipart field.
#[derive(Debug, Default)]
pub struct Upload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Writes uploads into the media directory.
#[derive(Debug, Clone)]
pub struct MediaStore {
    dir: PathBuf,
    max_upload_bytes: usize,
}

impl MediaStore {
    #[must_use]
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            max_upload_bytes: config.max_upload_bytes,
        }
    }

    /// Directory served under [`MEDIA_URL_PREFIX`].
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Largest accepted upload.
    #[must_use]
    pub const fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Store an upload and return its public URL.
    ///
    /// An empty upload (no file chosen) returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::UnsupportedType` for non-image uploads,
    /// `MediaError::TooLarge` above the limit, and `MediaError::Io` if the
    /// file cannot be written.
    #[instrument(skip(self, upload), fields(size = upload.bytes.len()))]
    pub async fn save(
        &self,
        kind: MediaKind,
        shop_id: ShopId,
        upload: &Upload,
    ) -> Result<Option<String>, MediaError> {
        if upload.bytes.is_empty() {
            return Ok(None);
        }
        if upload.bytes.len() > self.max_upload_bytes {
            return Err(MediaError::TooLarge {
                max: self.max_upload_bytes,
            });
        }
        let extension = validate_image(upload)?;

        let file_name = format!(
            "{}-{shop_id}-{}.{extension}",
            kind.prefix(),
            uuid::Uuid::new_v4()
        );

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(&file_name), &upload.bytes).await?;

        tracing::debug!(file = %file_name, "Stored upload");
        Ok(Some(format!("{MEDIA_URL_PREFIX}/{file_name}")))
    }

    /// Delete a file [`MediaStore::save`] stored for `shop_id`.
    ///
    /// URLs that do not name one of the shop's files in the media directory
    /// (external images, other shops' uploads) are left alone. Failures are
    /// logged, not returned: the row pointing at the file has already
    /// changed.
    #[instrument(skip(self), fields(shop_id = %shop_id))]
    pub async fn remove(&self, shop_id: ShopId, url: &str) {
        let Some(path) = self.local_path(shop_id, url) else {
            return;
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::debug!(url, "Removed upload"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(error = %e, url, "Could not remove upload"),
        }
    }

    /// Remove `old` once `new` has replaced it in the database.
    ///
    /// Nothing happens when no new image was stored.
    pub async fn remove_replaced(&self, shop_id: ShopId, old: Option<&str>, new: Option<&str>) {
        if let (Some(old), Some(new)) = (old, new)
            && old != new
        {
            self.remove(shop_id, old).await;
        }
    }

    /// Path of a `/media/<kind>-<shop id>-<uuid>.<ext>` URL inside the
    /// media directory.
    fn local_path(&self, shop_id: ShopId, url: &str) -> Option<PathBuf> {
        let name = url.strip_prefix(MEDIA_URL_PREFIX)?.strip_prefix('/')?;
        let plain = !name.is_empty()
            && !name.contains(['/', '\\'])
            && name != "."
            && name != "..";
        let owned = name.split('-').nth(1) == Some(shop_id.to_string().as_str());
        (plain && owned).then(|| self.dir.join(name))
    }
}

/// Check content type and extension, returning the normalized extension.
fn validate_image(upload: &Upload) -> Result<String, MediaError> {
    let is_image = upload
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.starts_with("image/"));
    if !is_image {
        return Err(MediaError::UnsupportedType);
    }

    let extension = upload
        .file_name
        .as_deref()
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or(MediaError::UnsupportedType)?;

    if ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(extension)
    } else {
        Err(MediaError::UnsupportedType)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn store(dir: &Path) -> MediaStore {
        MediaStore::new(&MediaConfig {
            dir: dir.to_path_buf(),
            max_upload_bytes: 16,
        })
    }

    fn upload(name: &str, content_type: &str, bytes: &[u8]) -> Upload {
        Upload {
            file_name: Some(name.to_string()),
            content_type: Some(content_type.to_string()),
            bytes: bytes.to_vec(),
        }
    }

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sanndikaa-media-{name}-{}", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_save_writes_file_and_returns_url() {
        let dir = temp_dir("save");
        let url = store(&dir)
            .save(
                MediaKind::Product,
                ShopId::new(4),
                &upload("Juice.PNG", "image/png", b"png-bytes"),
            )
            .await
            .unwrap()
            .unwrap();

        assert!(url.starts_with("/media/product-4-"));
        assert!(url.ends_with(".png"));
        let file = dir.join(url.trim_start_matches("/media/"));
        assert_eq!(tokio::fs::read(&file).await.unwrap(), b"png-bytes");
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_deletes_stored_file() {
        let dir = temp_dir("remove");
        let s = store(&dir);
        let url = s
            .save(
                MediaKind::Logo,
                ShopId::new(2),
                &upload("logo.webp", "image/webp", b"logo"),
            )
            .await
            .unwrap()
            .unwrap();
        let file = dir.join(url.trim_start_matches("/media/"));
        assert!(file.exists());

        // another shop cannot remove it
        s.remove(ShopId::new(3), &url).await;
        assert!(file.exists());

        s.remove(ShopId::new(2), &url).await;
        assert!(!file.exists());

        // already gone
        s.remove(ShopId::new(2), &url).await;
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_replaced_keeps_image_without_new_upload() {
        let dir = temp_dir("replace");
        let s = store(&dir);
        let old = s
            .save(
                MediaKind::Product,
                ShopId::new(3),
                &upload("a.png", "image/png", b"old"),
            )
            .await
            .unwrap()
            .unwrap();
        let new = s
            .save(
                MediaKind::Product,
                ShopId::new(3),
                &upload("b.png", "image/png", b"new"),
            )
            .await
            .unwrap()
            .unwrap();
        let old_file = dir.join(old.trim_start_matches("/media/"));
        let new_file = dir.join(new.trim_start_matches("/media/"));

        s.remove_replaced(ShopId::new(3), Some(&old), None).await;
        assert!(old_file.exists());

        s.remove_replaced(ShopId::new(3), Some(&old), Some(&new)).await;
        assert!(!old_file.exists());
        assert!(new_file.exists());
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[test]
    fn test_local_path_stays_in_media_dir() {
        let s = store(Path::new("/srv/media"));
        let shop = ShopId::new(1);
        assert_eq!(
            s.local_path(shop, "/media/product-1-x.png"),
            Some(PathBuf::from("/srv/media/product-1-x.png"))
        );
        assert_eq!(s.local_path(ShopId::new(11), "/media/product-1-x.png"), None);
        assert_eq!(s.local_path(shop, "/media/../logo-1-x.png"), None);
        assert_eq!(s.local_path(shop, "/media/.."), None);
        assert_eq!(s.local_path(shop, "/media/"), None);
        assert_eq!(s.local_path(shop, "/mediax/logo-1-x.png"), None);
        assert_eq!(
            s.local_path(shop, "https://cdn.example.com/media/logo-1-x.png"),
            None
        );
    }

    #[tokio::test]
    async fn test_empty_upload_is_no_image() {
        let dir = temp_dir("empty");
        let result = store(&dir)
            .save(MediaKind::Logo, ShopId::new(1), &Upload::default())
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn test_rejects_large_and_non_images() {
        let dir = temp_dir("reject");
        let s = store(&dir);
        assert!(matches!(
            s.save(
                MediaKind::Banner,
                ShopId::new(1),
                &upload("big.jpg", "image/jpeg", &[0u8; 17])
            )
            .await,
            Err(MediaError::TooLarge { max: 16 })
        ));
        assert!(matches!(
            s.save(
                MediaKind::Product,
                ShopId::new(1),
                &upload("notes.txt", "text/plain", b"hi")
            )
            .await,
            Err(MediaError::UnsupportedType)
        ));
        assert!(matches!(
            s.save(
                MediaKind::Product,
                ShopId::new(1),
                &upload("shell.php", "image/png", b"<?php")
            )
            .await,
            Err(MediaError::UnsupportedType)
        ));
    }
}
