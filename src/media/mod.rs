pub mod cloudinary;

use async_trait::async_trait;

use crate::error::Result;

pub use cloudinary::CloudinaryUploader;

/// Hosts inline image data and returns a durable public URL for it.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload_image(&self, data: &str) -> Result<String>;
}
