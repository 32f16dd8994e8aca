//! 图像、光流和相机内参的尺寸归一化
//!
//! 所有模态使用同一组 (target_size, crop)，保证空间上的一致性。

mod flow;
mod image;
mod proj;
mod target;

pub use flow::{get_flow_selector, load_flow, process_flow, FlowLookup, FlowPair, FlowSelector, KeyframeFlowSelector};
pub use image::{process_img, read_image};
pub use proj::process_proj;
pub use target::get_target_size_and_crop;

use ndarray::{s, Array3};
use opencv::core::{Mat, Size};
use opencv::imgproc;
use opencv::prelude::*;

use crate::error::Result;
use crate::global_cast::mat_to_array3;
use crate::global_types::{Crop, ImageSize};

/// 缩放并裁剪，返回 (H, W, C) 数组以及 x、y 方向的缩放比例
fn resize_and_crop(
    mat: &Mat,
    target_size: ImageSize,
    crop: Option<&Crop>,
) -> Result<(Array3<f32>, (f32, f32))> {
    let resized_size = crop.map_or(target_size, |crop| crop.resized);
    let original = ImageSize::new(mat.rows() as usize, mat.cols() as usize);

    let resized = if resized_size == original {
        mat.try_clone()?
    } else {
        let mut dst = Mat::default();
        imgproc::resize(
            mat,
            &mut dst,
            Size::new(resized_size.width as i32, resized_size.height as i32),
            0.0,
            0.0,
            imgproc::INTER_LINEAR,
        )?;
        dst
    };
    let scale = (
        resized_size.width as f32 / original.width as f32,
        resized_size.height as f32 / original.height as f32,
    );

    let array = mat_to_array3(&resized)?;
    let array = match crop {
        Some(crop) => array
            .slice(s![
                crop.top..crop.top + target_size.height,
                crop.left..crop.left + target_size.width,
                ..
            ])
            .to_owned(),
        None => array,
    };
    Ok((array, scale))
}

/// (H, W, C) -> (C, H, W)
fn to_channel_first(array: Array3<f32>) -> Array3<f32> {
    array.permuted_axes([2, 0, 1]).as_standard_layout().into_owned()
}
