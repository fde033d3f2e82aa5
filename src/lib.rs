//! # varlsb 库
//!
//! 本库包含可变深度 LSB 隐写工具的核心逻辑：比特编解码、容量规划、噪声生成，
//! 以及基于深度头部的嵌入与提取。

pub mod bits;
pub mod capacity;
pub mod cli;
pub mod constants;
pub mod error;
pub mod handler;
pub mod header;
pub mod noise;
pub mod payload;
pub mod steganography;

pub use capacity::{BitDepth, capacity_bits, plan_depth};
pub use error::StegoError;
pub use steganography::{PayloadMode, decode, embed, encode};
