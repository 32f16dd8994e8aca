//! 相机参数
//!
//! 每一帧对应一个 `.cam` 二进制文件，包含内参矩阵和外参矩阵。

pub(crate) mod cam_file;
pub use cam_file::CamFile;

use nalgebra::{Matrix3, Matrix4};

/// 单帧的相机参数，已转换为单精度。
#[derive(Debug, Clone, PartialEq)]
pub struct CameraFrame {
    /// 内参矩阵 K（未做任何变换）
    pub proj: Matrix3<f32>,
    /// 相机到世界坐标系的位姿，即外参的逆
    pub pose: Matrix4<f32>,
}
