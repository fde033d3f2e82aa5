//! # 深度头部
//!
//! 像素 (0,0) 的 R/G/B 低位分别存放深度字节的高 3 位、中间 3 位和低 2 位，
//! 各通道其余高位保持不变。解码端只凭这一像素即可得知嵌入深度。

use crate::capacity::BitDepth;
use crate::constants::HEADER_FIELD_BITS;
use image::Rgb;

/// 把深度写入头部像素。
pub fn pack_depth(pixel: &mut Rgb<u8>, depth: BitDepth) {
    let value = depth.get();
    let mut remaining = 8;

    for (channel, &width) in pixel.0.iter_mut().zip(HEADER_FIELD_BITS.iter()) {
        remaining -= width;
        let mask = field_mask(width);
        *channel = (*channel & !mask) | ((value >> remaining) & mask);
    }
}

/// 从头部像素读出原始深度字节。
///
/// 返回值未经校验：未经隐写的图像可能得到 0 或大于 8 的值。
pub fn unpack_depth(pixel: &Rgb<u8>) -> u8 {
    pixel
        .0
        .iter()
        .zip(HEADER_FIELD_BITS.iter())
        .fold(0u8, |acc, (&channel, &width)| {
            (acc << width) | (channel & field_mask(width))
        })
}

fn field_mask(width: u8) -> u8 {
    (1u8 << width) - 1
}
