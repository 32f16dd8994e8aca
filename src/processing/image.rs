use std::path::Path;

use ndarray::Array3;
use opencv::core::{Mat, CV_32F};
use opencv::imgcodecs;
use opencv::imgproc::{self, COLOR_BGR2RGB};
use opencv::prelude::*;

use super::{resize_and_crop, to_channel_first};
use crate::error::{DatasetError, Result};
use crate::global_types::{Crop, ImageSize};

/// 读取 8 位彩色图像，转换为 RGB，数值归一化到 [0, 1]
pub fn read_image(path: &Path) -> Result<Mat> {
    let path_str = path
        .to_str()
        .ok_or_else(|| DatasetError::decode(path, "path is not valid utf-8"))?;
    let bgr = imgcodecs::imread(path_str, imgcodecs::IMREAD_COLOR)
        .map_err(|err| DatasetError::decode(path, err))?;
    // imread 读取失败时返回空矩阵
    if bgr.empty() {
        return Err(DatasetError::decode(path, "missing or unreadable image"));
    }

    let mut rgb = Mat::default();
    imgproc::cvt_color(&bgr, &mut rgb, COLOR_BGR2RGB, 0)?;
    let mut img = Mat::default();
    rgb.convert_to(&mut img, CV_32F, 1.0 / 255.0, 0.0)?;
    Ok(img)
}

/// 缩放、裁剪，输出 (3, H, W)
pub fn process_img(img: &Mat, target_size: ImageSize, crop: Option<&Crop>) -> Result<Array3<f32>> {
    let (array, _) = resize_and_crop(img, target_size, crop)?;
    Ok(to_channel_first(array))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::temp_dir;
    use approx::assert_relative_eq;
    use opencv::core::{Scalar, Vector, CV_8UC3};

    fn write_png(path: &Path, rows: i32, cols: i32, bgr: (f64, f64, f64)) {
        let mat = Mat::new_rows_cols_with_default(
            rows,
            cols,
            CV_8UC3,
            Scalar::new(bgr.0, bgr.1, bgr.2, 0.0),
        )
        .unwrap();
        imgcodecs::imwrite(path.to_str().unwrap(), &mat, &Vector::new()).unwrap();
    }

    #[test]
    fn test_read_image_rgb_order() {
        let dir = temp_dir("read_image");
        let path = dir.path().join("frame.png");
        // B = 255, G = 0, R = 51
        write_png(&path, 4, 6, (255.0, 0.0, 51.0));

        let img = read_image(&path).unwrap();
        assert_eq!((img.rows(), img.cols()), (4, 6));
        let array = process_img(&img, ImageSize::new(4, 6), None).unwrap();
        assert_eq!(array.shape(), &[3, 4, 6]);
        assert_relative_eq!(array[[0, 0, 0]], 0.2, epsilon = 1e-6);
        assert_relative_eq!(array[[1, 2, 3]], 0.0);
        assert_relative_eq!(array[[2, 3, 5]], 1.0);
    }

    #[test]
    fn test_read_missing_image() {
        let err = read_image(Path::new("/nonexistent/frame_left_0000.png")).unwrap_err();
        assert!(matches!(err, DatasetError::Decode { .. }));
    }

    #[test]
    fn test_process_img_crop() {
        let dir = temp_dir("process_img");
        let path = dir.path().join("frame.png");
        write_png(&path, 20, 40, (0.0, 255.0, 0.0));
        let img = read_image(&path).unwrap();

        let target = ImageSize::new(8, 8);
        let crop = Crop {
            resized: ImageSize::new(8, 16),
            top: 0,
            left: 4,
        };
        let array = process_img(&img, target, Some(&crop)).unwrap();
        assert_eq!(array.shape(), &[3, 8, 8]);
        assert!(array
            .index_axis(ndarray::Axis(0), 1)
            .iter()
            .all(|&v| (v - 1.0).abs() < 1e-6));
    }
}
