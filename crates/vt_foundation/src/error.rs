// crates/vt_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `VtError` 枚举和 `VtResult` 类型别名，用于整个项目的错误处理。
//!
//! 错误分三类：
//!
//! 1. **配置错误**: 网格数非正、包围盒无效、粒子数与网格体积不符，构造时检测
//! 2. **IO 错误**: 输出文件无法打开或写入，向调用方传播
//! 3. **索引错误**: 粒子或网格节点越界访问，属于编程错误，不做静默截断
//!
//! # 示例
//!
//! ```
//! use vt_foundation::error::{VtError, VtResult};
//!
//! fn read_particle(index: usize, len: usize) -> VtResult<()> {
//!     if index >= len {
//!         return Err(VtError::index_out_of_bounds("particle", index, len));
//!     }
//!     Ok(())
//! }
//!
//! assert!(read_particle(3, 3).is_err());
//! ```

use thiserror::Error;

/// 统一结果类型
pub type VtResult<T> = Result<T, VtError>;

/// VortexTracer 错误类型
#[derive(Error, Debug)]
pub enum VtError {
    // ========================================================================
    // 配置错误
    // ========================================================================

    /// 配置错误
    #[error("配置错误: {message}")]
    Config {
        /// 具体错误信息
        message: String,
    },

    /// 配置值无效
    #[error("配置值无效: {key}={value}, 原因: {reason}")]
    InvalidConfig {
        /// 配置键名
        key: String,
        /// 配置值
        value: String,
        /// 无效原因说明
        reason: String,
    },

    /// 数量不匹配（如粒子数与网格体积）
    #[error("数量不匹配: {name} 期望{expected}, 实际{actual}")]
    SizeMismatch {
        /// 数据名称
        name: &'static str,
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },

    /// 解析错误
    #[error("解析错误: {input}: {message}")]
    Parse {
        /// 原始输入
        input: String,
        /// 错误信息
        message: String,
    },

    // ========================================================================
    // 索引错误
    // ========================================================================

    /// 索引越界
    #[error("索引越界: {index_type} 索引 {index} 超出范围 0..{len}")]
    IndexOutOfBounds {
        /// 索引类别描述
        index_type: &'static str,
        /// 访问的索引
        index: usize,
        /// 上界（长度）
        len: usize,
    },

    // ========================================================================
    // IO 错误
    // ========================================================================

    /// IO 错误
    #[error("IO错误: {message}")]
    Io {
        /// 描述性错误信息
        message: String,
        /// 可选的底层 IO 错误
        #[source]
        source: Option<std::io::Error>,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl VtError {
    /// 配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 配置值无效
    pub fn invalid_config(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// 数量不匹配
    pub fn size_mismatch(name: &'static str, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            name,
            expected,
            actual,
        }
    }

    /// 解析错误
    pub fn parse(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            message: message.into(),
        }
    }

    /// 索引越界
    pub fn index_out_of_bounds(index_type: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds {
            index_type,
            index,
            len,
        }
    }

    /// IO 错误
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// IO 错误（带源）
    pub fn io_with_source(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(source),
        }
    }

    /// 是否为配置类错误
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::Config { .. }
                | Self::InvalidConfig { .. }
                | Self::SizeMismatch { .. }
                | Self::Parse { .. }
        )
    }

    /// 是否为索引类错误
    pub fn is_index_error(&self) -> bool {
        matches!(self, Self::IndexOutOfBounds { .. })
    }

    /// 是否为 IO 类错误
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

impl From<std::io::Error> for VtError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::Io {
                message: "文件或目录不存在".into(),
                source: Some(err),
            }
        } else {
            Self::Io {
                message: err.to_string(),
                source: Some(err),
            }
        }
    }
}
