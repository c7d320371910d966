/// Manifest file access
pub mod manifest_store;

pub use manifest_store::ManifestStore;
