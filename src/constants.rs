/// 终止标记：附加在载荷比特流末尾的 16 个连续的 1。
pub const END_MARKER: [bool; END_MARKER_BITS] = [true; END_MARKER_BITS];

/// 终止标记作为 16 位整数的形式，供解码时的滑动窗口比较。
pub const END_MARKER_WORD: u16 = u16::MAX;

/// 终止标记的比特长度。
pub const END_MARKER_BITS: usize = 16;

/// 每个像素参与隐写的通道数 (R, G, B)。
pub const CHANNELS: usize = 3;

/// 允许的最小/最大 LSB 深度。
pub const MIN_DEPTH: u8 = 1;
pub const MAX_DEPTH: u8 = 8;

/// 头部像素 (0,0) 中各通道用于存放深度值的低位数量：R 3 位，G 3 位，B 2 位。
/// 三者相加恰好为 8 位，对应深度值的一个完整字节。
pub const HEADER_FIELD_BITS: [u8; CHANNELS] = [3, 3, 2];

/// 隐写结果图像的默认输出目录。
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// 噪声模式下默认的填充百分比。
pub const DEFAULT_FILL_PERCENT: u32 = 100;

/// `run` 命令默认保存解码文本的文件。
pub const DEFAULT_RESULT_FILE: &str = "result.txt";
