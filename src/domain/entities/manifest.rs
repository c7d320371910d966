use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::monad::result::{self, Result};
use crate::monad::Maybe;

/// マニフェストファイルのデフォルト名
pub const DEFAULT_MANIFEST_FILE: &str = "manyrepo.yml";

/// マニフェストのリポジトリ定義
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoManifest {
    /// リポジトリのURL
    pub git: String,

    /// ワークスペース内での相対パス（省略時はURLから決定）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl RepoManifest {
    /// 新しいRepoManifestインスタンスを作成
    pub fn new(git: impl Into<String>) -> Self {
        Self {
            git: git.into(),
            path: None,
        }
    }

    /// 相対パスを設定
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// クローン先のディレクトリ名
    ///
    /// `path` が指定されていればそれを、なければURLの最後のセグメントから
    /// `.git` を除いたものを返す。
    pub fn destination(&self) -> Maybe<String> {
        Maybe::maybe(self.path.clone())
            .or_else(|| Self::name_from_url(&self.git))
            .and_then(|dest| {
                if dest.trim().is_empty() {
                    Maybe::nothing()
                } else {
                    Maybe::just(dest)
                }
            })
    }

    fn name_from_url(url: &str) -> Maybe<String> {
        let trimmed = url.trim().trim_end_matches('/');
        let without_git = trimmed.strip_suffix(".git").unwrap_or(trimmed);
        Maybe::maybe(without_git.rsplit(['/', ':']).next())
            .map(str::to_string)
            .and_then(|name| {
                if name == without_git && !url.contains(['/', ':']) {
                    // bare word, not a URL
                    Maybe::nothing()
                } else {
                    Maybe::just(name)
                }
            })
    }
}

/// マニフェスト全体
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// リポジトリのリスト
    #[serde(default)]
    pub repos: Vec<RepoManifest>,
}

impl Manifest {
    /// 新しいManifestインスタンスを作成
    pub fn new(repos: Vec<RepoManifest>) -> Self {
        Self { repos }
    }

    /// 全リポジトリのクローン先を解決する
    ///
    /// 一つでも決定できないものがあれば、最初のものを `Missing` として返す。
    pub fn destinations(&self) -> Result<Vec<String>> {
        result::all(self.repos.iter().enumerate().map(|(index, repo)| {
            result::missing_with_info(
                repo.destination().into_option(),
                format!("destination for {}", repo.git),
                json!({ "index": index, "git": repo.git }),
            )
        }))
    }
}
