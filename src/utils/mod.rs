pub mod file_size;
pub mod media_type;
