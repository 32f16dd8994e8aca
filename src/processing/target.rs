use crate::global_types::{Crop, ImageSize};

/// 计算目标尺寸和裁剪方式
///
/// 未指定 `image_size` 时保持原尺寸；否则等比缩放到刚好覆盖目标尺寸，再居中裁剪。
pub fn get_target_size_and_crop(
    image_size: Option<ImageSize>,
    original_size: ImageSize,
) -> (ImageSize, Option<Crop>) {
    let target = match image_size {
        Some(target) if target != original_size => target,
        _ => return (original_size, None),
    };

    let scale = f64::max(
        target.height as f64 / original_size.height as f64,
        target.width as f64 / original_size.width as f64,
    );
    let resized = ImageSize::new(
        ((original_size.height as f64 * scale).round() as usize).max(target.height),
        ((original_size.width as f64 * scale).round() as usize).max(target.width),
    );
    let crop = Crop {
        resized,
        top: (resized.height - target.height) / 2,
        left: (resized.width - target.width) / 2,
    };
    (target, Some(crop))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_image_size() {
        let original = ImageSize::new(436, 1024);
        assert_eq!(get_target_size_and_crop(None, original), (original, None));
        assert_eq!(
            get_target_size_and_crop(Some(original), original),
            (original, None)
        );
    }

    #[test]
    fn test_same_aspect() {
        let (target, crop) =
            get_target_size_and_crop(Some(ImageSize::new(218, 512)), ImageSize::new(436, 1024));
        assert_eq!(target, ImageSize::new(218, 512));
        let crop = crop.unwrap();
        assert_eq!(crop.resized, ImageSize::new(218, 512));
        assert_eq!((crop.top, crop.left), (0, 0));
    }

    #[test]
    fn test_center_crop() {
        let (target, crop) =
            get_target_size_and_crop(Some(ImageSize::new(192, 640)), ImageSize::new(436, 1024));
        assert_eq!(target, ImageSize::new(192, 640));
        let crop = crop.unwrap();
        // 宽度方向比例更大：640 / 1024 = 0.625
        assert_eq!(crop.resized, ImageSize::new(273, 640));
        assert_eq!((crop.top, crop.left), (40, 0));
    }
}
