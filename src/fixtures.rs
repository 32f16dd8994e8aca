//! 测试用的临时数据集

use std::path::Path;

use nalgebra::{Matrix3, Matrix3x4, Rotation3, Vector3};
use opencv::core::{Mat, Scalar, Vector, CV_16UC3, CV_8UC3};
use opencv::imgcodecs;
use tempfile::TempDir;

use crate::camera::cam_file::encode_cam;
use crate::config::CAM_TAG_FLOAT;
use crate::dataset::layout;

/// 测试结束时自动删除的临时目录
pub fn temp_dir(name: &str) -> TempDir {
    tempfile::Builder::new()
        .prefix(&format!("sintel-rs-{}-", name))
        .tempdir()
        .unwrap()
}

pub fn write_png(path: &Path, mat: &Mat) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    assert!(imgcodecs::imwrite(path.to_str().unwrap(), mat, &Vector::new()).unwrap());
}

pub fn write_flow_png(path: &Path, rows: i32, cols: i32, (u, v): (f64, f64)) {
    // BGR：B 为有效位，G 为 v，R 为 u
    let mat = Mat::new_rows_cols_with_default(
        rows,
        cols,
        CV_16UC3,
        Scalar::new(1.0, v * 64.0 + 32768.0, u * 64.0 + 32768.0, 0.0),
    )
    .unwrap();
    write_png(path, &mat);
}

/// 第 `id` 帧的外参：绕 y 轴旋转并沿 x 平移
pub fn extrinsic_for(id: i64) -> Matrix3x4<f64> {
    let rotation = Rotation3::from_euler_angles(0.0, 0.05 * id as f64, 0.0);
    let mut extrinsic = Matrix3x4::zeros();
    extrinsic
        .fixed_view_mut::<3, 3>(0, 0)
        .copy_from(rotation.matrix());
    extrinsic.set_column(3, &Vector3::new(0.1 * id as f64, 0.0, 1.0));
    extrinsic
}

pub fn intrinsic() -> Matrix3<f64> {
    Matrix3::new(40.0, 0.0, 16.0, 0.0, 40.0, 8.0, 0.0, 0.0, 1.0)
}

pub fn write_cam(path: &Path, tag: f32, id: i64) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, encode_cam(tag, &intrinsic(), &extrinsic_for(id))).unwrap();
}

/// 生成一个序列：`len` 张 16x32 的图像和对应的相机文件。
/// 第 `id` 帧的红色通道等于 `id`，用来确认读取的是哪一帧。
pub fn write_sequence(root: &Path, sequence: &str, len: i64) {
    for id in 0..len {
        let mat = Mat::new_rows_cols_with_default(
            16,
            32,
            CV_8UC3,
            Scalar::new(0.0, 128.0, id as f64, 0.0),
        )
        .unwrap();
        write_png(&layout::image_path(root, sequence, id), &mat);
        write_cam(&layout::cam_path(root, sequence, id), CAM_TAG_FLOAT, id);
    }
}

pub fn write_flows(preprocessed: &Path, sequence: &str, len: i64) {
    for id in 0..len {
        write_flow_png(&layout::flow_path(preprocessed, sequence, id, true), 16, 32, (1.0, 0.0));
        write_flow_png(&layout::flow_path(preprocessed, sequence, id, false), 16, 32, (-1.0, 0.0));
    }
}
