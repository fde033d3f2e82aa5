//! # 核心错误类型
//!
//! 隐写核心 (比特编解码、容量规划、噪声生成、嵌入/提取) 的所有失败情形。
//! 文件 I/O 和图像格式错误不在此列，它们由 `handler` 层通过 `anyhow` 直接上报。

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// 载荷比特数超出载体在给定 (或最大) 深度下的可用容量。
    #[error("payload needs {required} bits but only {available} bits are available")]
    CapacityExceeded { required: usize, available: usize },

    /// 深度不在 1..=8 范围内。
    #[error("invalid LSB depth {0}, expected a value between 1 and 8")]
    InvalidDepth(u8),

    /// 噪声长度公式算出的比特数为负 (图像太小或填充比例太低)。
    #[error("noise fill of {fill} bits cannot hold the 16-bit end marker")]
    NoiseTooShort { fill: usize },
}
