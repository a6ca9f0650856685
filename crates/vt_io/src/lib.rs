// crates/vt_io/src/lib.rs

//! VortexTracer IO 模块
//!
//! 以原始二进制格式输出模拟结果。
//!
//! # 模块
//!
//! - [`byte_output`]: 轨迹、浓度场、速度场三种字节流
//! - [`error`]: IO 错误类型
//!
//! # 使用示例
//!
//! ```rust,ignore
//! use vt_io::ByteOutput;
//!
//! let mut out = ByteOutput::create("output/trajectories.bin")?;
//! out.write_trajectories(true, 0.0, grid.delimiter(), &particles)?;
//! out.close()?;
//! ```

pub mod byte_output;
pub mod error;

pub use byte_output::{read_f64s, ByteOutput, FileByteOutput};
pub use error::{IoError, IoResult};
