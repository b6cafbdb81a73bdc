pub mod cloudinary;
pub mod media_storage;
pub mod staging;
