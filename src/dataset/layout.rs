//! 固定的目录结构与文件命名

use std::path::{Path, PathBuf};

use crate::config::{CAMDATA_LEFT_DIR, FINAL_PASS_DIR, FLOW_DIR, FRAME_LEFT_DIR};

/// `<root>/<sequence>/frame_left`
pub fn frame_dir(root: &Path, sequence: &str) -> PathBuf {
    root.join(sequence).join(FRAME_LEFT_DIR)
}

/// `<root>/<sequence>/frame_left/frame_left_<id:04d>.png`
pub fn image_path(root: &Path, sequence: &str, id: i64) -> PathBuf {
    frame_dir(root, sequence).join(format!("frame_left_{:04}.png", id))
}

/// `<root>/camdata_left/<sequence>/frame_<id+1:04d>.cam`，文件编号从 1 开始
pub fn cam_path(root: &Path, sequence: &str, id: i64) -> PathBuf {
    root.join(CAMDATA_LEFT_DIR)
        .join(sequence)
        .join(format!("frame_{:04}.cam", id + 1))
}

/// `<preprocessed>/unimatch_flows/<sequence>/frame_<id+1:04d>_{fwd|bwd}.png`
pub fn flow_path(preprocessed: &Path, sequence: &str, id: i64, forward: bool) -> PathBuf {
    let direction = if forward { "fwd" } else { "bwd" };
    preprocessed
        .join(FLOW_DIR)
        .join(sequence)
        .join(format!("frame_{:04}_{}.png", id + 1, direction))
}

/// `<root>/final/<sequence>/frame_<id+1:04d>.png`
pub fn final_pass_path(root: &Path, sequence: &str, id: i64) -> PathBuf {
    root.join(FINAL_PASS_DIR)
        .join(sequence)
        .join(format!("frame_{:04}.png", id + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let root = Path::new("/data/sintel");
        assert_eq!(
            image_path(root, "alley_1", 7),
            Path::new("/data/sintel/alley_1/frame_left/frame_left_0007.png")
        );
        assert_eq!(
            cam_path(root, "alley_1", 7),
            Path::new("/data/sintel/camdata_left/alley_1/frame_0008.cam")
        );
        assert_eq!(
            flow_path(Path::new("/pre"), "alley_1", 0, false),
            Path::new("/pre/unimatch_flows/alley_1/frame_0001_bwd.png")
        );
        assert_eq!(
            final_pass_path(root, "bamboo_2", 41),
            Path::new("/data/sintel/final/bamboo_2/frame_0042.png")
        );
    }
}
