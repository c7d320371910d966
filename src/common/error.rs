use std::backtrace::Backtrace;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error as ThisError;

/// 共有可能なエラーソース
///
/// `Error` は `Future` の購読者間で共有されるため `Clone` が必要になる。
pub type SharedSource = Arc<dyn std::error::Error + Send + Sync>;

/// 「値が存在しない」ことを表すエラー種別
///
/// 操作の失敗ではなく、期待した値が見つからなかったことを示す。
/// 自由記述のメッセージとは別に、診断用のペイロードを保持できる。
#[derive(ThisError, Debug, Clone, PartialEq, Default)]
#[error("Missing: {message}")]
pub struct Missing {
    /// 補足メッセージ（空文字列の場合あり）
    pub message: String,

    /// 診断情報（オプション）
    pub info: Option<serde_json::Value>,
}

impl Missing {
    /// 新しいMissingインスタンスを作成
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            info: None,
        }
    }

    /// 診断情報を設定
    pub fn with_info(mut self, info: serde_json::Value) -> Self {
        self.info = Some(info);
        self
    }
}

/// manyrepo全体で使用するエラー型
///
/// `Result<T>` と `Res<T>` の失敗側は常にこの型になる。
#[derive(ThisError, Debug, Clone)]
pub enum Error {
    #[error("{message}")]
    Failure {
        message: String,
        #[source]
        source: Option<SharedSource>,
    },

    #[error(transparent)]
    Missing(#[from] Missing),

    #[error("{message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Arc<std::io::Error>>,
    },

    #[error("{message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<SharedSource>,
    },
}

impl Error {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
            source: None,
        }
    }

    pub fn failure_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Failure {
            message: message.into(),
            source: Some(Arc::new(source)),
        }
    }

    pub fn missing(message: impl Into<String>) -> Self {
        Self::Missing(Missing::new(message))
    }

    pub fn filesystem_error(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::FileSystem {
            message: message.into(),
            path,
            source: None,
        }
    }

    pub fn filesystem_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path,
            source: Some(Arc::new(source)),
        }
    }

    pub fn serialization_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Serialization {
            message: message.into(),
            source: Some(Arc::new(source)),
        }
    }

    /// Missing種別であればその参照を返す
    pub fn as_missing(&self) -> Option<&Missing> {
        match self {
            Self::Missing(missing) => Some(missing),
            _ => None,
        }
    }

    fn source_text(&self) -> Option<String> {
        std::error::Error::source(self).map(|s| s.to_string())
    }
}

// 構造的等価性: 種別・メッセージ・付随情報が一致すること。
// ソースは表示文字列で比較する。
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        let same_kind = match (self, other) {
            (Self::Failure { message: a, .. }, Self::Failure { message: b, .. }) => a == b,
            (Self::Missing(a), Self::Missing(b)) => a == b,
            (
                Self::FileSystem {
                    message: a,
                    path: pa,
                    ..
                },
                Self::FileSystem {
                    message: b,
                    path: pb,
                    ..
                },
            ) => a == b && pa == pb,
            (Self::Serialization { message: a, .. }, Self::Serialization { message: b, .. }) => {
                a == b
            }
            _ => false,
        };

        same_kind && self.source_text() == other.source_text()
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::filesystem_error_with_source("File system operation failed", None, error)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(error: serde_yaml::Error) -> Self {
        Self::serialization_error_with_source("YAML parsing failed", error)
    }
}

/// Error kinds that can carry a [`Missing`].
///
/// `is_missing` and the Missing arm of `case_of` dispatch through this.
pub trait MissingKind: Sized {
    fn as_missing(&self) -> Option<&Missing>;

    /// Take the `Missing` out, or give the error back unchanged.
    fn into_missing(self) -> Result<Missing, Self>;
}

impl MissingKind for Error {
    fn as_missing(&self) -> Option<&Missing> {
        Error::as_missing(self)
    }

    fn into_missing(self) -> Result<Missing, Self> {
        match self {
            Self::Missing(missing) => Ok(missing),
            other => Err(other),
        }
    }
}

impl MissingKind for Missing {
    fn as_missing(&self) -> Option<&Missing> {
        Some(self)
    }

    fn into_missing(self) -> Result<Missing, Self> {
        Ok(self)
    }
}

/// 不正な構築（空の値からのJust/Ok/Err）
#[derive(ThisError, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("`Just` requires a value")]
    NullJust,

    #[error("`Ok` requires a value")]
    NullOk,

    #[error("`Err` requires an error")]
    NullErr,
}

/// Which encoding an unwrap failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnwrapOrigin {
    Result,
    Res,
}

impl fmt::Display for UnwrapOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Result => write!(f, "Result"),
            Self::Res => write!(f, "Res"),
        }
    }
}

/// Raised (as a panic payload) when `unwrap()` is called on an `Err`.
///
/// This is a programmer-error signal, not something to branch on. The
/// original error is kept as text together with the backtrace at the
/// unwrap site so the cause is not lost.
#[derive(Debug)]
pub struct UnwrapError {
    origin: UnwrapOrigin,
    cause: String,
    backtrace: Backtrace,
}

impl UnwrapError {
    pub fn new(origin: UnwrapOrigin, cause: &impl fmt::Debug) -> Self {
        Self {
            origin,
            cause: format!("{:?}", cause),
            backtrace: Backtrace::capture(),
        }
    }

    pub fn origin(&self) -> UnwrapOrigin {
        self.origin
    }

    /// The original error, rendered with `Debug`.
    pub fn cause(&self) -> &str {
        &self.cause
    }

    /// Log the failure and abort the current operation with it as payload.
    pub(crate) fn raise(self) -> ! {
        tracing::error!("{}", self);
        std::panic::panic_any(self)
    }
}

impl fmt::Display for UnwrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.Err was unwrapped.\n\tError is: {}\n\tWith stack: {}",
            self.origin, self.cause, self.backtrace
        )
    }
}

impl std::error::Error for UnwrapError {}
