//! 全局类型转换
//!
//! opencv [Mat] 与 nalgebra 矩阵到 ndarray 的转换，样本中的张量统一使用 ndarray。
//!
//! 时间： 2026-10-17
//! 作者： qi-xmu
//! 版本： 0.1.0
//!

use nalgebra::SMatrix;
use ndarray::{Array2, Array3};
use opencv::core::{Mat, Vec2f, Vec3f, CV_32F};
use opencv::prelude::*;

use crate::error::{DatasetError, Result};

/// 将 `CV_32FCn` (n = 1, 2, 3) 的 [Mat] 转换为 (H, W, C) 的 [Array3]
pub fn mat_to_array3(mat: &Mat) -> Result<Array3<f32>> {
    if mat.depth() != CV_32F {
        return Err(DatasetError::Shape(format!(
            "expected a CV_32F mat, got depth {}",
            mat.depth()
        )));
    }
    let rows = mat.rows() as usize;
    let cols = mat.cols() as usize;
    let channels = mat.channels() as usize;

    // data_typed 要求连续内存（例如 ROI 需要先拷贝）
    let owned;
    let mat = if mat.is_continuous() {
        mat
    } else {
        owned = mat.try_clone()?;
        &owned
    };

    let values: Vec<f32> = match channels {
        1 => mat.data_typed::<f32>()?.to_vec(),
        2 => mat.data_typed::<Vec2f>()?.iter().flat_map(|v| v.0).collect(),
        3 => mat.data_typed::<Vec3f>()?.iter().flat_map(|v| v.0).collect(),
        n => {
            return Err(DatasetError::Shape(format!(
                "unsupported channel count {}",
                n
            )))
        }
    };

    Array3::from_shape_vec((rows, cols, channels), values)
        .map_err(|err| DatasetError::Shape(err.to_string()))
}

/// 将 nalgebra 的定长矩阵转换为 [Array2]
pub fn matrix_to_array2<const R: usize, const C: usize>(matrix: &SMatrix<f32, R, C>) -> Array2<f32> {
    Array2::from_shape_fn((R, C), |(i, j)| matrix[(i, j)])
}
