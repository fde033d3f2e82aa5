//! # 载荷来源
//!
//! 从一个或多个文本文件读取待隐藏的内容：去掉非 ASCII 字节和首尾空白，
//! 多个文件之间以单个换行符连接。

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

/// 只保留 0x00..=0x7F 范围内的字节。
pub fn sanitize(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().copied().filter(u8::is_ascii).collect()
}

/// 读取单个文本文件并清洗其内容。
///
/// # Errors
///
/// 文件无法读取时返回错误，错误信息中包含文件路径。
pub fn read_payload_file(path: &Path) -> Result<Vec<u8>> {
    let raw = fs::read(path).with_context(|| {
        format!(
            "Unable to read text file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    Ok(sanitize(&raw).trim_ascii().to_vec())
}

/// 按顺序读取所有文件，并用 `\n` 连接。
pub fn combine_payloads<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<u8>> {
    let parts = paths
        .iter()
        .map(|path| read_payload_file(path.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    Ok(parts.join(&b'\n'))
}
