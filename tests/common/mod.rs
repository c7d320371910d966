//! 統合テスト共通のヘルパー

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// 標準的なマニフェスト（3リポジトリ、うち1つはパス指定あり）
pub const SAMPLE_MANIFEST: &str = r#"repos:
  - git: https://github.com/example/frontend.git
  - git: git@github.com:example/backend.git
    path: services/backend
  - git: https://github.com/example/docs
"#;

/// ワークスペース用の一時ディレクトリを作成し、マニフェストを書き込む
pub fn workspace_with_manifest(file_name: &str, content: &str) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write_file(dir.path(), file_name, content);
    dir
}

/// `root` 配下にファイルを書き込む（親ディレクトリも作成）
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    std::fs::write(&path, content).expect("Failed to write file");
    path
}
