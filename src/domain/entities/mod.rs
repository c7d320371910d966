/// マニフェスト定義
pub mod manifest;

pub use manifest::{Manifest, RepoManifest, DEFAULT_MANIFEST_FILE};
