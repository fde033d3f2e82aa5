//! # 容量规划
//!
//! 根据图像尺寸和载荷比特数，找出能够容纳载荷的最小 LSB 深度。

use crate::constants::{CHANNELS, MAX_DEPTH, MIN_DEPTH};
use crate::error::StegoError;
use log::debug;
use std::fmt;

/// 每个通道用于隐写的低位数量，取值范围 1..=8。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitDepth(u8);

impl BitDepth {
    pub const MIN: BitDepth = BitDepth(MIN_DEPTH);
    pub const MAX: BitDepth = BitDepth(MAX_DEPTH);

    pub fn new(value: u8) -> Result<Self, StegoError> {
        if (MIN_DEPTH..=MAX_DEPTH).contains(&value) {
            Ok(BitDepth(value))
        } else {
            Err(StegoError::InvalidDepth(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// 覆盖通道低 `depth` 位的掩码，例如深度 3 对应 `0b0000_0111`。
    pub fn mask(self) -> u8 {
        (((1u16) << self.0) - 1) as u8
    }

    /// 从最小深度到最大深度依次迭代。
    fn ascending() -> impl Iterator<Item = BitDepth> {
        (MIN_DEPTH..=MAX_DEPTH).map(BitDepth)
    }
}

impl TryFrom<u8> for BitDepth {
    type Error = StegoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        BitDepth::new(value)
    }
}

impl From<BitDepth> for u8 {
    fn from(depth: BitDepth) -> u8 {
        depth.0
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 计算给定深度下可用于载荷的比特数。
///
/// 像素 (0,0) 专门存放深度头部，不承载任何载荷，因此不计入容量。
pub fn capacity_bits(width: u32, height: u32, depth: BitDepth) -> usize {
    let pixels = width as usize * height as usize;
    pixels.saturating_sub(1) * CHANNELS * depth.get() as usize
}

/// 从深度 1 开始逐级尝试，返回第一个 (即最小的) 能容纳 `payload_bits` 的深度。
///
/// # Errors
///
/// 如果深度 8 仍然放不下载荷，返回 [`StegoError::CapacityExceeded`]，
/// 其中 `available` 为最大深度下的容量。
pub fn plan_depth(width: u32, height: u32, payload_bits: usize) -> Result<BitDepth, StegoError> {
    for depth in BitDepth::ascending() {
        let capacity = capacity_bits(width, height, depth);
        debug!(
            "Trying {} LSB(s): capacity {} bits, payload {} bits, {:.2}% of available space",
            depth,
            capacity,
            payload_bits,
            utilization(payload_bits, capacity)
        );

        if payload_bits <= capacity {
            return Ok(depth);
        }
    }

    Err(StegoError::CapacityExceeded {
        required: payload_bits,
        available: capacity_bits(width, height, BitDepth::MAX),
    })
}

fn utilization(payload_bits: usize, capacity: usize) -> f64 {
    if capacity == 0 {
        f64::INFINITY
    } else {
        payload_bits as f64 / capacity as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_bounds() {
        assert_eq!(BitDepth::new(0), Err(StegoError::InvalidDepth(0)));
        assert_eq!(BitDepth::try_from(9), Err(StegoError::InvalidDepth(9)));
        for value in 1..=8 {
            assert_eq!(BitDepth::new(value).map(u8::from), Ok(value));
        }
    }

    #[test]
    fn test_masks() {
        assert_eq!(BitDepth::MIN.mask(), 0b0000_0001);
        assert_eq!(BitDepth::new(3).unwrap().mask(), 0b0000_0111);
        assert_eq!(BitDepth::MAX.mask(), 0xFF);
    }

    #[test]
    fn test_capacity_strictly_increasing() {
        let mut previous = 0;
        for depth in BitDepth::ascending() {
            let capacity = capacity_bits(40, 30, depth);
            assert!(capacity > previous);
            previous = capacity;
        }
    }

    #[test]
    fn test_header_pixel_excluded() {
        assert_eq!(capacity_bits(2, 2, BitDepth::MIN), 9);
        assert_eq!(capacity_bits(1, 1, BitDepth::MAX), 0);
    }

    #[test]
    fn test_plan_depth_picks_minimum() {
        // 2x2 图像：去掉头部像素后剩 9 个通道，"A" + 终止标记共 24 位
        assert_eq!(plan_depth(2, 2, 24), BitDepth::new(3));

        // 恰好等于容量时不升级
        assert_eq!(plan_depth(10, 10, 99 * 3), Ok(BitDepth::MIN));
        assert_eq!(plan_depth(10, 10, 99 * 3 + 1), BitDepth::new(2));
    }

    #[test]
    fn test_plan_depth_infeasible() {
        let result = plan_depth(4, 4, 4 * 4 * 3 * 8 + 1);
        assert_eq!(
            result,
            Err(StegoError::CapacityExceeded {
                required: 385,
                available: 15 * 3 * 8,
            })
        );
    }
}
