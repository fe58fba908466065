pub mod fs_photo_store;
pub mod snapshot_camera;
