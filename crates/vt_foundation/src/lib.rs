// crates/vt_foundation/src/lib.rs

//! VortexTracer Foundation Layer
//!
//! 基础层，提供整个项目共享的错误类型和物理常量。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型 [`VtError`] 与结果别名 [`VtResult`]
//! - [`constants`]: 全局只读常量（π 等）
//!
//! # 示例
//!
//! ```
//! use vt_foundation::{VtError, VtResult};
//!
//! fn check_count(n: usize) -> VtResult<usize> {
//!     if n == 0 {
//!         return Err(VtError::invalid_config("grid.nx", "0", "网格数必须为正"));
//!     }
//!     Ok(n)
//! }
//!
//! assert!(check_count(0).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod constants;
pub mod error;

// 重导出常用类型
pub use constants::PI;
pub use error::{VtError, VtResult};
