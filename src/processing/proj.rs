use nalgebra::Matrix3;

use crate::global_types::{Crop, ImageSize};

/// 根据缩放与裁剪调整内参，并转换到归一化图像坐标 [-1, 1]
pub fn process_proj(
    proj: &Matrix3<f32>,
    original_size: ImageSize,
    target_size: ImageSize,
    crop: Option<&Crop>,
) -> Matrix3<f32> {
    let resized = crop.map_or(target_size, |crop| crop.resized);
    let scale_x = resized.width as f32 / original_size.width as f32;
    let scale_y = resized.height as f32 / original_size.height as f32;
    let (top, left) = crop.map_or((0.0, 0.0), |crop| (crop.top as f32, crop.left as f32));

    let mut proj = *proj;
    proj.row_mut(0).scale_mut(scale_x);
    proj.row_mut(1).scale_mut(scale_y);
    proj[(0, 2)] -= left;
    proj[(1, 2)] -= top;

    // 像素坐标 -> [-1, 1]
    let width = target_size.width as f32;
    let height = target_size.height as f32;
    proj.row_mut(0).scale_mut(2.0 / width);
    proj.row_mut(1).scale_mut(2.0 / height);
    proj[(0, 2)] -= 1.0;
    proj[(1, 2)] -= 1.0;
    proj
}
