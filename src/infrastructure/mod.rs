/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - File system operations (manifest files)
pub mod filesystem;

// Re-export commonly used types
pub use filesystem::manifest_store::ManifestStore;
