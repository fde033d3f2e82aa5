//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `run` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::capacity::BitDepth;
use crate::cli::{HideArgs, RecoverArgs, RunArgs};
use crate::payload::combine_payloads;
use crate::steganography::{PayloadMode, decode, embed};
use anyhow::{Context, Result};
use colored::Colorize;
use image::RgbImage;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// 根据载体文件名和深度生成输出路径：`<out_dir>/<载体名>/LSB<深度>[_Percent<百分比>].png`。
///
/// 输出固定为 PNG，任何有损压缩都会破坏低位数据。
pub fn output_image_path(
    out_dir: &Path,
    carrier: &Path,
    depth: BitDepth,
    noise_percent: Option<u32>,
) -> PathBuf {
    let stem = carrier
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    let file_name = match noise_percent {
        Some(percent) => format!("LSB{}_Percent{}.png", depth, percent),
        None => format!("LSB{}.png", depth),
    };

    out_dir.join(stem).join(file_name)
}

/// 处理 'Hide' 命令的执行逻辑，返回生成的图像路径。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取载体图像或文本文件。
/// * 噪声模式下深度不合法，或填充量放不下终止标记。
/// * 载荷在最大深度下仍超出图像容量。
/// * 无法创建输出目录或写入结果图像。
pub fn handle_hide(args: HideArgs) -> Result<PathBuf> {
    let mode = payload_mode(&args)?;
    hide_with(&args, &mode)
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 图像中没有隐藏信息时只向用户报告，不视为错误。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let recovered = recover_from(&args.image)?;
    save_recovered(&args.text, recovered.as_deref())
}

/// 处理 'Run' 命令：隐藏后立即从输出图像解码，保存解码结果并核对是否与原文一致。
pub fn handle_run(args: RunArgs) -> Result<()> {
    let mode = payload_mode(&args.hide)?;
    let encoded_path = hide_with(&args.hide, &mode)?;

    let recovered = recover_from(&encoded_path)?;
    save_recovered(&args.output_text, recovered.as_deref())?;

    if let PayloadMode::Message(payload) = &mode {
        if recovered.as_deref() == Some(payload.trim_ascii_end()) {
            info!("Round-trip verified: recovered text matches the input");
        } else {
            warn!("Round-trip mismatch: recovered text differs from the input");
        }
    }

    Ok(())
}

fn payload_mode(args: &HideArgs) -> Result<PayloadMode> {
    if !args.lorem {
        anyhow::ensure!(
            !args.text.is_empty(),
            "No text file given to hide. \nPass at least one --text file or use --lorem."
        );
        return Ok(PayloadMode::Message(combine_payloads(&args.text)?));
    }

    let value = args.depth.context("Noise mode requires an explicit --depth")?;
    let depth = BitDepth::new(value)?;
    Ok(PayloadMode::Noise {
        depth,
        percent: args.percent,
    })
}

fn hide_with(args: &HideArgs, mode: &PayloadMode) -> Result<PathBuf> {
    let carrier = load_carrier(&args.image)?;

    let (encoded, depth) = embed(carrier, mode).with_context(|| {
        format!(
            "Unable to embed the payload into image: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let noise_percent = match mode {
        PayloadMode::Noise { percent, .. } => Some(*percent),
        PayloadMode::Message(_) => None,
    };
    let dest = output_image_path(&args.out_dir, &args.image, depth, noise_percent);

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!(
                "Unable to create output directory: {}",
                parent.to_string_lossy().red().bold()
            )
        })?;
    }

    encoded.save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The payload has been hidden using {} LSB(s) and saved: {}",
        depth.to_string().green().bold(),
        dest.to_string_lossy().green().bold()
    );

    Ok(dest)
}

fn recover_from(image: &Path) -> Result<Option<Vec<u8>>> {
    let picture = load_carrier(image)?;
    Ok(decode(&picture))
}

fn save_recovered(dest: &Path, recovered: Option<&[u8]>) -> Result<()> {
    let Some(text) = recovered else {
        println!("{}", "No hidden message found".yellow().bold());
        return Ok(());
    };

    fs::write(dest, text).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully recovered and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

fn load_carrier(path: &Path) -> Result<RgbImage> {
    let picture = image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    Ok(picture.to_rgb8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_image_path() {
        let depth = BitDepth::new(3).unwrap();
        let carrier = Path::new("images/small_img.jpg");

        assert_eq!(
            output_image_path(Path::new("output"), carrier, depth, None),
            Path::new("output/small_img/LSB3.png")
        );
        assert_eq!(
            output_image_path(Path::new("output"), carrier, depth, Some(40)),
            Path::new("output/small_img/LSB3_Percent40.png")
        );
    }
}
