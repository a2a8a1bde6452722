//! Image and video handling: normalization of the stored image field,
//! Cloudinary display-URL optimization, YouTube embed extraction, and the
//! upload path for admin-submitted image files.

pub mod images;
pub mod upload;
pub mod video;

pub use images::{PLACEHOLDER_IMAGE, cover_url, image_urls, optimized_url};
pub use upload::ImageUploader;
pub use video::embed_url;
