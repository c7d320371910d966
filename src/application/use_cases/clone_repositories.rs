use std::path::{Path, PathBuf};

use futures::future::join_all;

use crate::domain::entities::manifest::RepoManifest;
use crate::infrastructure::filesystem::manifest_store::ManifestStore;
use crate::monad::result::{self, Result, ResultE};
use crate::monad::Future;

/// 1リポジトリ分のクローン結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClonedRepository {
    /// リポジトリのURL
    pub git: String,

    /// クローン先の絶対パス
    pub destination: PathBuf,

    /// クローン先に既にディレクトリが存在したか
    pub already_present: bool,
}

/// リポジトリをクローンする外部コラボレータ
///
/// 実際のgit操作はこのトレイトの実装側に閉じ込められる。
#[cfg_attr(test, mockall::automock)]
pub trait RepositoryCloner: Send + Sync {
    /// `repo` を `destination` にクローンし、完了時に決着するFutureを返す
    fn clone_repository(&self, repo: &RepoManifest, destination: &Path) -> Future<ClonedRepository>;
}

/// git操作を行わず、クローン先の解決だけを行う実装
#[derive(Debug, Clone, Default)]
pub struct PlanOnlyCloner;

impl RepositoryCloner for PlanOnlyCloner {
    fn clone_repository(&self, repo: &RepoManifest, destination: &Path) -> Future<ClonedRepository> {
        let planned = ClonedRepository {
            git: repo.git.clone(),
            destination: destination.to_path_buf(),
            already_present: destination.is_dir(),
        };
        Future::new(move |completer| completer.complete_ok(planned))
    }
}

/// クローン処理の設定
#[derive(Debug, Clone)]
pub struct CloneRepositoriesConfig {
    /// ワークスペースのルートディレクトリ
    pub workspace_root: PathBuf,

    /// マニフェストファイル（Noneの場合はデフォルト名）
    pub manifest_file: Option<PathBuf>,
}

impl CloneRepositoriesConfig {
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            manifest_file: None,
        }
    }

    pub fn with_manifest_file(mut self, manifest_file: impl Into<PathBuf>) -> Self {
        self.manifest_file = Some(manifest_file.into());
        self
    }
}

/// クローン処理全体の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneSummary {
    /// 読み込んだマニフェストのパス
    pub manifest_path: PathBuf,

    /// マニフェストの順序どおりのクローン結果
    pub repositories: Vec<ClonedRepository>,
}

/// マニフェストに従ってリポジトリをクローンするユースケース
pub struct CloneRepositoriesUseCase<C: RepositoryCloner> {
    config: CloneRepositoriesConfig,
    cloner: C,
}

impl<C: RepositoryCloner> CloneRepositoriesUseCase<C> {
    pub fn new(config: CloneRepositoriesConfig, cloner: C) -> Self {
        Self { config, cloner }
    }

    /// Read the manifest, start one clone per repository and gather them.
    ///
    /// All clones are started before any is awaited. The first failure in
    /// manifest order is returned.
    pub async fn execute(&self) -> Result<CloneSummary> {
        let store = ManifestStore::new(&self.config.workspace_root);
        let manifest_file = self.config.manifest_file.as_deref();
        let manifest_path = store.manifest_path(manifest_file);

        let planned = store.read_manifest(manifest_file).and_then(|manifest| {
            manifest
                .destinations()
                .map(|destinations| manifest.repos.into_iter().zip(destinations).collect::<Vec<_>>())
        });
        let planned = match planned {
            ResultE::Ok(planned) => planned,
            ResultE::Err(e) => return ResultE::Err(e),
        };

        tracing::info!("Cloning {} repositories", planned.len());
        let pending: Vec<Future<ClonedRepository>> = planned
            .iter()
            .map(|(repo, destination)| {
                tracing::debug!("{} -> {}", repo.git, destination);
                self.cloner
                    .clone_repository(repo, &store.root().join(destination))
            })
            .collect();

        let settled = join_all(pending.iter().map(|future| future.wait())).await;
        result::all(settled.iter().map(|value| (**value).clone())).map(|repositories| {
            CloneSummary {
                manifest_path,
                repositories,
            }
        })
    }
}
