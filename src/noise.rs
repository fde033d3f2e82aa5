//! # 噪声生成
//!
//! "lorem" 模式使用的伪随机比特流，用于隐写分析测试，不是安全原语。

use crate::bits::BitStream;
use crate::capacity::{BitDepth, capacity_bits};
use crate::constants::END_MARKER_BITS;
use crate::error::StegoError;
use rand::Rng;

/// 生成 `bit_length` 个独立且均匀分布的随机比特。
pub fn generate_noise(bit_length: usize) -> BitStream {
    let mut rng = rand::rng();
    (0..bit_length).map(|_| rng.random::<bool>()).collect()
}

/// 计算噪声模式下应生成的噪声比特数 (不含终止标记)。
///
/// 按深度 1 时的可用通道数乘以 `depth` 和 `percent / 100` 向下取整，再减去终止标记的 16 位。
/// 基数取 `capacity_bits(w, h, 1)` 即 `(w*h - 1) * 3`，而非 `w*h*3`：头部像素不承载数据，
/// 用后者时 100% 填充会比可用空间多出一个像素，必然溢出。
///
/// 填充量在生成任何噪声之前就与该深度下的容量比较，超出时不会分配内存。
///
/// # Errors
///
/// * 填充量超过 `depth` 下的容量 (例如 `percent > 100`) 时返回 [`StegoError::CapacityExceeded`]。
/// * 填充量不足以放下终止标记时返回 [`StegoError::NoiseTooShort`]，不会静默截断为 0。
pub fn noise_bit_length(
    width: u32,
    height: u32,
    depth: BitDepth,
    percent: u32,
) -> Result<usize, StegoError> {
    let base = capacity_bits(width, height, BitDepth::MIN) as u128;
    let fill = base * depth.get() as u128 * percent as u128 / 100;
    let available = capacity_bits(width, height, depth);

    let fill = match usize::try_from(fill) {
        Ok(fill) if fill <= available => fill,
        Ok(fill) => {
            return Err(StegoError::CapacityExceeded {
                required: fill,
                available,
            });
        }
        Err(_) => {
            return Err(StegoError::CapacityExceeded {
                required: usize::MAX,
                available,
            });
        }
    };

    fill.checked_sub(END_MARKER_BITS)
        .ok_or(StegoError::NoiseTooShort { fill })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_length() {
        assert!(generate_noise(0).is_empty());
        assert_eq!(generate_noise(1234).len(), 1234);
    }

    #[test]
    fn test_noise_is_balanced() {
        let n = 200_000;
        let ones = generate_noise(n).into_iter().filter(|&bit| bit).count();
        let ratio = ones as f64 / n as f64;
        // 标准差约为 0.0011，这里留出很宽的余量
        assert!((0.48..0.52).contains(&ratio), "ratio of ones was {ratio}");
    }

    #[test]
    fn test_noise_bit_length_formula() {
        let depth = BitDepth::new(4).unwrap();
        // 10x10 图像：99 个像素 * 3 通道 = 297 位 (深度 1)
        assert_eq!(noise_bit_length(10, 10, depth, 100), Ok(297 * 4 - 16));
        assert_eq!(noise_bit_length(10, 10, depth, 50), Ok(297 * 4 / 2 - 16));
        // 297 * 2 * 33 / 100 = 196.02，向下取整
        assert_eq!(
            noise_bit_length(10, 10, BitDepth::new(2).unwrap(), 33),
            Ok(196 - 16)
        );
    }

    #[test]
    fn test_fill_above_capacity_rejected() {
        // 10x10 图像，深度 8：297 * 8 * 101 / 100 = 2399 > 2376
        assert_eq!(
            noise_bit_length(10, 10, BitDepth::MAX, 101),
            Err(StegoError::CapacityExceeded {
                required: 2399,
                available: 2376,
            })
        );
    }

    #[test]
    fn test_huge_percent_rejected_before_generation() {
        // 约 1e11 位：必须在分配之前失败
        let result = noise_bit_length(10, 10, BitDepth::MAX, u32::MAX);
        assert!(matches!(
            result,
            Err(StegoError::CapacityExceeded {
                available: 2376,
                ..
            })
        ));
    }

    #[test]
    fn test_noise_bit_length_too_small() {
        // 2x2 图像，深度 1：9 位，放不下终止标记
        assert_eq!(
            noise_bit_length(2, 2, BitDepth::MIN, 100),
            Err(StegoError::NoiseTooShort { fill: 9 })
        );
        assert_eq!(
            noise_bit_length(100, 100, BitDepth::MAX, 0),
            Err(StegoError::NoiseTooShort { fill: 0 })
        );
    }
}
