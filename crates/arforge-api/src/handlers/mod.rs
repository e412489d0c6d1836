pub mod health;
pub mod mind_upload;
pub mod video_upload;
