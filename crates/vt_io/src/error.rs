// crates/vt_io/src/error.rs
//! IO 错误类型定义
//!
//! 所有错误最终可转换为 VtError 以实现跨层错误传递。

use std::path::PathBuf;

use thiserror::Error;
use vt_foundation::VtError;

/// IO 模块结果类型别名
pub type IoResult<T> = Result<T, IoError>;

/// IO 错误枚举
#[derive(Error, Debug)]
pub enum IoError {
    /// 打开输出文件失败
    #[error("无法打开输出文件 {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 写入失败
    #[error("写入失败 {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 基础层错误转换
    #[error("基础层错误: {0}")]
    Foundation(#[from] VtError),
}

impl IoError {
    /// 写入错误
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

impl From<IoError> for VtError {
    fn from(err: IoError) -> Self {
        match err {
            IoError::Open { path, source } => {
                VtError::io_with_source(format!("无法打开输出文件: {}", path.display()), source)
            }
            IoError::Write { path, source } => {
                VtError::io_with_source(format!("写入失败: {}", path.display()), source)
            }
            IoError::Foundation(vt_err) => vt_err,
        }
    }
}
