pub mod upload;

pub use upload::{MindUploadResponse, VideoUploadResponse};
