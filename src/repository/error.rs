use thiserror::Error;

/// 仓库层对外的错误
///
/// 存储服务的各种失败统一归为 Communication，只保留底层错误的文本
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Error while communicating with {repository}: {message}")]
    Communication { repository: String, message: String },
    #[error("Access key is required to connect to the OSS bucket")]
    NeedAccessKey,
    #[error("Cannot download this file")]
    CannotDownload,
}

impl RepositoryError {
    pub(crate) fn communication(repository: &str, err: impl std::fmt::Display) -> Self {
        RepositoryError::Communication {
            repository: repository.to_owned(),
            message: err.to_string(),
        }
    }
    /// 对应的语言字符串标识
    pub fn string_key(&self) -> &'static str {
        match self {
            RepositoryError::Communication { .. } => "errorwhilecommunicatingwith",
            RepositoryError::NeedAccessKey => "needaccesskey",
            RepositoryError::CannotDownload => "cannotdownload",
        }
    }
}
