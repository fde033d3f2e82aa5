//! # 比特编解码
//!
//! 字节序列与扁平比特流之间的转换。每个字节按大端 (MSB 在前) 展开为 8 个比特。

use log::debug;

/// 有序比特序列，`true` 表示 1。
pub type BitStream = Vec<bool>;

/// 将字节序列展开为比特流，每个字节 MSB 在前。空输入得到空比特流。
pub fn bytes_to_bits(payload: &[u8]) -> BitStream {
    payload
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1 == 1))
        .collect()
}

/// 将比特流按 8 位一组重新拼装为字节。
///
/// 调用方应保证长度是 8 的倍数；若末尾存在不完整的分组，则直接丢弃该分组而不报错。
pub fn bits_to_bytes(bits: &[bool]) -> Vec<u8> {
    let chunks = bits.chunks_exact(8);
    if !chunks.remainder().is_empty() {
        debug!(
            "Dropping {} trailing bits that do not form a whole byte",
            chunks.remainder().len()
        );
    }

    chunks
        .map(|group| group.iter().fold(0u8, |acc, &bit| (acc << 1) | bit as u8))
        .collect()
}
