//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 参数默认值取自 `constants` 模块。

use crate::constants::{DEFAULT_FILL_PERCENT, DEFAULT_OUTPUT_DIR, DEFAULT_RESULT_FILE};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// 一款可变深度 LSB 隐写工具：自动选择能容纳文本的最小 LSB 位数，并把位数写入图像本身。
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 把文本 (或随机噪声) 隐藏到图像中，输出为 PNG。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的文本。
    Recover(RecoverArgs),

    /// 先隐藏，再从生成的图像中解码，并保存解码结果以供核对。
    Run(RunArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Args, Debug, Clone)]
pub struct HideArgs {
    /// 载体图像路径 (任意可解码格式，alpha 通道会被丢弃)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文本文件，可指定多个，内容以换行连接。
    #[arg(short, long, num_args = 1.., required_unless_present = "lorem")]
    pub text: Vec<PathBuf>,

    /// 输出根目录，结果保存在 `<out_dir>/<图像名>/LSB<深度>.png`。
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub out_dir: PathBuf,

    /// 用随机噪声代替文本。
    #[arg(long)]
    pub lorem: bool,

    /// 噪声模式使用的 LSB 位数 (1-8)。
    #[arg(short, long, requires = "lorem", required_if_eq("lorem", "true"))]
    pub depth: Option<u8>,

    /// 噪声模式下填充可用空间的百分比。
    #[arg(short, long, default_value_t = DEFAULT_FILL_PERCENT)]
    pub percent: u32,
}

/// 'recover' 命令所需的参数。
#[derive(Args, Debug, Clone)]
pub struct RecoverArgs {
    /// 已隐藏文本数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复文本后，保存文本内容的输出路径。
    #[arg(short, long)]
    pub text: PathBuf,
}

/// 'run' 命令所需的参数。
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub hide: HideArgs,

    /// 保存解码结果的文本文件。
    #[arg(long, default_value = DEFAULT_RESULT_FILE)]
    pub output_text: PathBuf,
}
