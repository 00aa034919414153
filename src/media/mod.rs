mod gallery;
mod image_ops;
mod storage;

pub use gallery::{Gallery, HERO_GALLERY, UploadFile};
pub use storage::{MAX_UPLOAD_BYTES, MediaFolder, MediaStorage, StoredUpload, sanitize_filename};
