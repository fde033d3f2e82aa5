//! # 可变深度 LSB 嵌入与提取
//!
//! 编码时先把深度写入像素 (0,0)，再按光栅顺序 (从上到下、从左到右，跳过头部像素)
//! 依次把比特流写入每个像素 R、G、B 通道的低 `depth` 位。比特流以 16 个 1 组成的
//! 终止标记结尾，解码端扫描到该标记即停止。
//!
//! 终止标记没有转义：若载荷自身在字节边界上包含连续 16 个 1，解码会提前结束。

use crate::bits::{BitStream, bits_to_bytes, bytes_to_bits};
use crate::capacity::{BitDepth, capacity_bits, plan_depth};
use crate::constants::{END_MARKER, END_MARKER_BITS, END_MARKER_WORD};
use crate::error::StegoError;
use crate::header::{pack_depth, unpack_depth};
use crate::noise::{generate_noise, noise_bit_length};
use image::RgbImage;
use log::{debug, info, warn};

/// 要嵌入的内容：真实载荷，或指定深度和填充比例的随机噪声。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadMode {
    Message(Vec<u8>),
    Noise { depth: BitDepth, percent: u32 },
}

/// 将载荷转换为比特流并追加终止标记。
pub fn message_bits(payload: &[u8]) -> BitStream {
    let mut bits = bytes_to_bits(payload);
    bits.extend_from_slice(&END_MARKER);
    bits
}

/// 按 `mode` 准备比特流和深度，然后嵌入到 `grid` 中。
///
/// 消息模式下深度由 [`plan_depth`] 自动选择最小可行值；噪声模式使用调用方给定的深度。
///
/// # Errors
///
/// * 载荷在深度 8 下仍放不下时返回 [`StegoError::CapacityExceeded`]。
/// * 噪声填充量不足 16 位时返回 [`StegoError::NoiseTooShort`]。
pub fn embed(grid: RgbImage, mode: &PayloadMode) -> Result<(RgbImage, BitDepth), StegoError> {
    let (width, height) = grid.dimensions();

    let (bits, depth) = match mode {
        PayloadMode::Message(payload) => {
            let bits = message_bits(payload);
            let depth = plan_depth(width, height, bits.len())?;
            (bits, depth)
        }
        PayloadMode::Noise { depth, percent } => {
            let length = noise_bit_length(width, height, *depth, *percent)?;
            debug!("Generating {} noise bits ({}% fill)", length, percent);
            let mut bits = generate_noise(length);
            bits.extend_from_slice(&END_MARKER);
            (bits, *depth)
        }
    };

    info!(
        "Embedding {} bits into {}x{} image using {} LSB(s)",
        bits.len(),
        width,
        height,
        depth
    );

    let grid = encode(grid, &bits, depth)?;
    Ok((grid, depth))
}

/// 把深度头部和比特流写入 `grid` 并返回修改后的图像。
///
/// 每个通道消耗至多 `depth` 个比特；最后一个通道若剩余比特不足 `depth` 个，
/// 则写入该通道低 `depth` 位中靠高位的部分，其余位保持原样。比特写完即停止扫描，
/// 之后的像素不做任何修改。
///
/// # Errors
///
/// 比特数超过该深度下的容量时返回 [`StegoError::CapacityExceeded`]，此时图像未被改动。
pub fn encode(mut grid: RgbImage, bits: &[bool], depth: BitDepth) -> Result<RgbImage, StegoError> {
    let available = capacity_bits(grid.width(), grid.height(), depth);
    if bits.len() > available {
        return Err(StegoError::CapacityExceeded {
            required: bits.len(),
            available,
        });
    }

    let mut pixels = grid.pixels_mut();
    if let Some(header) = pixels.next() {
        pack_depth(header, depth);
    }

    let mut groups = bits.chunks(depth.get() as usize);
    'scan: for pixel in pixels {
        for channel in pixel.0.iter_mut() {
            let Some(group) = groups.next() else {
                break 'scan;
            };
            *channel = write_group(*channel, group, depth);
        }
    }

    Ok(grid)
}

fn write_group(channel: u8, group: &[bool], depth: BitDepth) -> u8 {
    let len = group.len() as u32;
    let shift = depth.get() as u32 - len;
    let value = group.iter().fold(0u16, |acc, &bit| (acc << 1) | bit as u16);
    let mask = ((1u16 << len) - 1) << shift;

    ((channel as u16 & !mask) | (value << shift)) as u8
}

/// 从图像中提取隐藏的载荷。
///
/// 先从像素 (0,0) 读取深度，再按与 [`encode`] 相同的光栅顺序逐通道读取低 `depth` 位。
/// 每读入一个比特，若末尾 16 位恰为终止标记且其前的比特能组成完整字节，则终止标记之前的
/// 部分即为载荷，去掉末尾空白后返回。
///
/// 头部深度不在 1..=8 范围内，或扫描完整幅图像都没有遇到终止标记时，返回 `None`。
pub fn decode(grid: &RgbImage) -> Option<Vec<u8>> {
    let mut pixels = grid.pixels();
    let raw_depth = unpack_depth(pixels.next()?);
    let depth = match BitDepth::new(raw_depth) {
        Ok(depth) => depth,
        Err(_) => {
            warn!("Header depth {} is out of range, no message embedded", raw_depth);
            return None;
        }
    };
    info!("Detected LSB depth: {}", depth);

    let mut collector = BitCollector::default();
    for pixel in pixels {
        for &channel in pixel.0.iter() {
            for shift in (0..depth.get()).rev() {
                if collector.push((channel >> shift) & 1 == 1) {
                    let mut payload = collector.into_payload();
                    debug!("End marker found after {} payload bytes", payload.len());

                    let trimmed = payload.trim_ascii_end().len();
                    payload.truncate(trimmed);
                    return Some(payload);
                }
            }
        }
    }

    debug!(
        "Scanned {} bits without finding the end marker",
        collector.bit_count
    );
    None
}

/// 解码时的比特累加器：整字节存入 `bytes`，同时用一个 16 位滑动窗口匹配终止标记，
/// 内存占用为已扫描比特数的 1/8。
#[derive(Debug, Default)]
struct BitCollector {
    bytes: Vec<u8>,
    pending: BitStream,
    window: u16,
    bit_count: usize,
}

impl BitCollector {
    /// 追加一个比特；当终止标记恰好结束在字节边界上时返回 `true`。
    fn push(&mut self, bit: bool) -> bool {
        self.window = (self.window << 1) | bit as u16;
        self.bit_count += 1;

        self.pending.push(bit);
        if self.pending.len() == 8 {
            self.bytes.extend(bits_to_bytes(&self.pending));
            self.pending.clear();
        }

        self.bit_count >= END_MARKER_BITS
            && self.pending.is_empty()
            && self.window == END_MARKER_WORD
    }

    /// 去掉末尾属于终止标记的两个字节，返回载荷。
    fn into_payload(mut self) -> Vec<u8> {
        let payload_len = self.bytes.len().saturating_sub(END_MARKER_BITS / 8);
        self.bytes.truncate(payload_len);
        self.bytes
    }
}
