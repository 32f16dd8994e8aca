use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use nalgebra::{Matrix3, Matrix3x4, Matrix4};

use super::CameraFrame;
use crate::config::CAM_TAG_FLOAT;
use crate::error::{DatasetError, Result};

/// `.cam` 文件的内容
///
/// 布局（小端）：
/// - 4 字节 f32 校验值，必须等于 [CAM_TAG_FLOAT]
/// - 9 个 f64，行优先的 3x3 内参矩阵
/// - 12 个 f64，行优先的 3x4 外参矩阵（世界到相机）
#[derive(Debug, Clone, PartialEq)]
pub struct CamFile {
    pub intrinsic: Matrix3<f64>,
    pub extrinsic: Matrix3x4<f64>,
}

impl CamFile {
    const INTRINSIC_LEN: usize = 9;
    const EXTRINSIC_LEN: usize = 12;

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| DatasetError::file_access(path, err))?;
        Self::read_from(BufReader::new(file), path)
    }

    /// 从任意 reader 解析，`path` 只用于错误信息
    pub fn read_from(mut reader: impl Read, path: &Path) -> Result<Self> {
        let truncated = |err: std::io::Error| DatasetError::format(path, format!("truncated: {}", err));

        let tag = reader.read_f32::<LittleEndian>().map_err(truncated)?;
        if tag != CAM_TAG_FLOAT {
            return Err(DatasetError::format(
                path,
                format!(
                    "wrong tag (should be {}, is {}), big-endian file?",
                    CAM_TAG_FLOAT, tag
                ),
            ));
        }

        let mut intrinsic = [0f64; Self::INTRINSIC_LEN];
        reader
            .read_f64_into::<LittleEndian>(&mut intrinsic)
            .map_err(truncated)?;
        let mut extrinsic = [0f64; Self::EXTRINSIC_LEN];
        reader
            .read_f64_into::<LittleEndian>(&mut extrinsic)
            .map_err(truncated)?;

        Ok(Self {
            intrinsic: Matrix3::from_row_slice(&intrinsic),
            extrinsic: Matrix3x4::from_row_slice(&extrinsic),
        })
    }

    /// 外参嵌入 4x4 齐次矩阵
    pub fn extrinsic_homogeneous(&self) -> Matrix4<f64> {
        let mut matrix = Matrix4::identity();
        matrix.fixed_view_mut::<3, 4>(0, 0).copy_from(&self.extrinsic);
        matrix
    }

    /// 相机到世界的位姿（外参的逆），`path` 只用于错误信息
    pub fn pose(&self, path: &Path) -> Result<Matrix4<f64>> {
        self.extrinsic_homogeneous()
            .try_inverse()
            .ok_or_else(|| DatasetError::format(path, "extrinsic matrix is singular"))
    }

    pub fn to_camera_frame(&self, path: &Path) -> Result<CameraFrame> {
        Ok(CameraFrame {
            proj: self.intrinsic.cast::<f32>(),
            pose: self.pose(path)?.cast::<f32>(),
        })
    }
}

#[cfg(test)]
pub(crate) fn encode_cam(tag: f32, intrinsic: &Matrix3<f64>, extrinsic: &Matrix3x4<f64>) -> Vec<u8> {
    use byteorder::WriteBytesExt;

    let mut bytes = vec![];
    bytes.write_f32::<LittleEndian>(tag).unwrap();
    for i in 0..3 {
        for j in 0..3 {
            bytes.write_f64::<LittleEndian>(intrinsic[(i, j)]).unwrap();
        }
    }
    for i in 0..3 {
        for j in 0..4 {
            bytes.write_f64::<LittleEndian>(extrinsic[(i, j)]).unwrap();
        }
    }
    bytes
}
