// crates/vt_io/src/byte_output.rs

//! 原始二进制输出
//!
//! 所有数值均为 8 字节 IEEE-754 双精度，本机字节序，无填充无分隔。
//!
//! # 流格式
//!
//! ```text
//! 轨迹   首次: [xmin, xmax, ymin, ymax, zmin, zmax]
//!        每粒子: [time, id, x, y, z, speed]
//! 浓度   首次: [xmin, nx, xmax, ymin, ny, ymax, zmin, nz, zmax, timestep]
//!        每次: nx*ny*nz 个单元值, (i, j, k) 行主序
//! 速度场 每次: [time, xmin, nx, xmax, ymin, ny, ymax, zmin, nz, zmax]
//!        随后 nx*ny*nz 组 (vx, vy, vz), (i, j, k) 行主序
//! ```
//!
//! 三种流相互独立，通常各自写入一个文件。

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use vt_foundation::VtError;
use vt_physics::{Delimiter, GridDescriptor, ParticleStore, ScalarField, VectorField};

use crate::error::{IoError, IoResult};

/// 单个双精度值的字节数
const F64_BYTES: usize = std::mem::size_of::<f64>();

/// 文件输出
pub type FileByteOutput = ByteOutput<BufWriter<File>>;

/// 二进制输出流
///
/// 持有底层写入器。`close` 消耗自身并刷新缓冲；未调用 `close` 时，
/// 析构会尽力刷新并释放句柄。一次写入失败后，后续写入直接返回错误。
#[derive(Debug)]
pub struct ByteOutput<W: Write> {
    writer: Option<W>,
    path: PathBuf,
    failed: bool,
    bytes_written: u64,
}

impl FileByteOutput {
    /// 创建（截断）输出文件
    pub fn create<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| IoError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("打开二进制输出: {}", path.display());
        Ok(Self::new(BufWriter::new(file), path))
    }
}

impl<W: Write> ByteOutput<W> {
    /// 包装任意写入器，`path` 仅用于错误信息
    pub fn new(writer: W, path: impl Into<PathBuf>) -> Self {
        Self {
            writer: Some(writer),
            path: path.into(),
            failed: false,
            bytes_written: 0,
        }
    }

    /// 输出路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 已写入字节数
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// 写入粒子轨迹
    ///
    /// 首次调用先写入计算域边界。
    pub fn write_trajectories(
        &mut self,
        first_call: bool,
        time: f64,
        delimiter: &Delimiter,
        particles: &ParticleStore,
    ) -> IoResult<()> {
        let header = if first_call { 6 } else { 0 };
        let mut values = Vec::with_capacity(header + 6 * particles.len());

        if first_call {
            values.extend_from_slice(&delimiter.to_flat());
        }
        for particle in particles {
            let p = particle.position;
            values.extend_from_slice(&[
                time,
                particle.id() as f64,
                p.x,
                p.y,
                p.z,
                particle.speed(),
            ]);
        }
        self.put(&values)
    }

    /// 写入浓度场
    ///
    /// 首次调用先写入网格头和时间步长。
    pub fn write_concentration(
        &mut self,
        first_call: bool,
        timestep: f64,
        grid: &GridDescriptor,
        field: &ScalarField,
    ) -> IoResult<()> {
        check_shape("concentration", grid, field.dim())?;

        let mut values = Vec::with_capacity(10 + field.len());
        if first_call {
            values.extend_from_slice(&grid_header(grid));
            values.push(timestep);
        }
        values.extend(field.iter().copied());
        self.put(&values)
    }

    /// 写入速度场快照
    ///
    /// 每次调用都写入时间和网格头。
    pub fn write_velocity_field(
        &mut self,
        time: f64,
        grid: &GridDescriptor,
        field: &VectorField,
    ) -> IoResult<()> {
        check_shape("velocity_field", grid, field.dim())?;

        let mut values = Vec::with_capacity(10 + 3 * field.len());
        values.push(time);
        values.extend_from_slice(&grid_header(grid));
        for v in field.iter() {
            values.extend_from_slice(&v.to_array());
        }
        self.put(&values)
    }

    /// 刷新缓冲
    pub fn flush(&mut self) -> IoResult<()> {
        let path = &self.path;
        let writer = self.writer.as_mut().ok_or_else(|| closed(path))?;
        writer.flush().map_err(|e| IoError::write(path, e))
    }

    /// 刷新并取回底层写入器
    pub fn finish(mut self) -> IoResult<W> {
        self.flush()?;
        self.writer.take().ok_or_else(|| closed(&self.path))
    }

    /// 刷新并关闭
    pub fn close(self) -> IoResult<()> {
        let path = self.path.clone();
        let bytes = self.bytes_written;
        self.finish()?;
        log::debug!("关闭二进制输出: {} ({} 字节)", path.display(), bytes);
        Ok(())
    }

    fn put(&mut self, values: &[f64]) -> IoResult<()> {
        if self.failed {
            return Err(IoError::write(
                &self.path,
                std::io::Error::new(std::io::ErrorKind::Other, "输出流在先前的写入中已失败"),
            ));
        }
        let writer = self.writer.as_mut().ok_or_else(|| closed(&self.path))?;

        let mut bytes = Vec::with_capacity(values.len() * F64_BYTES);
        for value in values {
            bytes.extend_from_slice(&value.to_ne_bytes());
        }

        if let Err(e) = writer.write_all(&bytes) {
            self.failed = true;
            return Err(IoError::write(&self.path, e));
        }
        self.bytes_written += bytes.len() as u64;
        Ok(())
    }
}

impl<W: Write> Drop for ByteOutput<W> {
    fn drop(&mut self) {
        if let Some(writer) = self.writer.as_mut() {
            if let Err(e) = writer.flush() {
                log::warn!("释放输出流 {} 时刷新失败: {}", self.path.display(), e);
            }
        }
    }
}

/// 网格头 `[xmin, nx, xmax, ymin, ny, ymax, zmin, nz, zmax]`
fn grid_header(grid: &GridDescriptor) -> [f64; 9] {
    let d = grid.delimiter();
    let n = grid.counts();
    let mut header = [0.0; 9];
    for axis in 0..3 {
        header[3 * axis] = d.min(axis);
        header[3 * axis + 1] = n[axis] as f64;
        header[3 * axis + 2] = d.max(axis);
    }
    header
}

fn check_shape(name: &'static str, grid: &GridDescriptor, dim: (usize, usize, usize)) -> IoResult<()> {
    let [nx, ny, nz] = grid.counts();
    if dim != (nx, ny, nz) {
        return Err(VtError::size_mismatch(name, nx * ny * nz, dim.0 * dim.1 * dim.2).into());
    }
    Ok(())
}

fn closed(path: &Path) -> IoError {
    IoError::write(
        path,
        std::io::Error::new(std::io::ErrorKind::Other, "输出流已关闭"),
    )
}

/// 把本机字节序的字节流解码为双精度数组，末尾不足 8 字节的部分被忽略
pub fn read_f64s(bytes: &[u8]) -> Vec<f64> {
    bytes
        .chunks_exact(F64_BYTES)
        .map(|chunk| {
            let mut buf = [0u8; F64_BYTES];
            buf.copy_from_slice(chunk);
            f64::from_ne_bytes(buf)
        })
        .collect()
}
