//! 错误类型
//!
//! 数据集读取过程中所有可能出现的错误。

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = DatasetError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DatasetError {
    /// 样本索引越界
    #[error("index {index} out of range for dataset of length {len}")]
    OutOfRange { index: usize, len: usize },

    /// 文件不存在或无法读取
    #[error("cannot access {path:?}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 相机文件格式错误
    #[error("bad camera file {path:?}: {message}")]
    Format { path: PathBuf, message: String },

    /// 图像或光流解码失败
    #[error("cannot decode {path:?}: {message}")]
    Decode { path: PathBuf, message: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// split 文件中的非法行
    #[error("malformed split line {line} in {path:?}: {content:?}")]
    SplitParse {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("sequence {0:?} is not in the catalog")]
    UnknownSequence(String),

    /// 内部数组的形状或像素格式不符合预期
    #[error("unexpected layout: {0}")]
    Shape(String),

    #[error(transparent)]
    OpenCv(#[from] opencv::Error),
}

impl DatasetError {
    pub(crate) fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn decode(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn format(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Format {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
