use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, Result};

/// 左目图像目录
pub const FRAME_LEFT_DIR: &str = "frame_left";
/// 左目相机参数目录
pub const CAMDATA_LEFT_DIR: &str = "camdata_left";
/// 预计算光流目录
pub const FLOW_DIR: &str = "unimatch_flows";
/// 渲染后的 final pass 图像目录
pub const FINAL_PASS_DIR: &str = "final";

/// 相机文件头部的校验值
pub const CAM_TAG_FLOAT: f32 = 202021.25;

fn default_frame_count() -> usize {
    2
}

fn default_dilation() -> usize {
    1
}

/// 数据集的构造参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// 数据集根目录
    pub data_path: PathBuf,
    /// 显式的 split 文件，为空时使用全部序列
    #[serde(default)]
    pub split_path: Option<PathBuf>,
    /// 目标尺寸 (height, width)
    #[serde(default)]
    pub image_size: Option<[usize; 2]>,
    /// 每个样本的帧数
    #[serde(default = "default_frame_count")]
    pub frame_count: usize,
    #[serde(default)]
    pub keyframe_offset: i64,
    /// 相邻帧之间的步长
    #[serde(default = "default_dilation")]
    pub dilation: usize,
    #[serde(default)]
    pub return_depth: bool,
    /// 保留字段，目前不影响读取
    #[serde(default)]
    pub full_size_depth: bool,
    #[serde(default)]
    pub return_flow: bool,
    /// 预处理结果（光流）所在目录
    #[serde(default)]
    pub preprocessed_path: Option<PathBuf>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::new(),
            split_path: None,
            image_size: None,
            frame_count: default_frame_count(),
            keyframe_offset: 0,
            dilation: default_dilation(),
            return_depth: false,
            full_size_depth: false,
            return_flow: false,
            preprocessed_path: None,
        }
    }
}

impl DatasetConfig {
    pub fn new(data_path: impl AsRef<Path>) -> Self {
        Self {
            data_path: data_path.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|err| DatasetError::file_access(path, err))?;
        serde_json::from_str(&content).map_err(|err| {
            DatasetError::InvalidArgument(format!("cannot parse config {:?}: {}", path, err))
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.frame_count == 0 {
            return Err(DatasetError::InvalidArgument(
                "frame_count must be at least 1".into(),
            ));
        }
        if self.dilation == 0 {
            return Err(DatasetError::InvalidArgument(
                "dilation must be at least 1".into(),
            ));
        }
        if let Some([height, width]) = self.image_size {
            if height == 0 || width == 0 {
                return Err(DatasetError::InvalidArgument(format!(
                    "image_size must be positive, got {}x{}",
                    height, width
                )));
            }
        }
        if self.return_flow && self.preprocessed_path.is_none() {
            return Err(DatasetError::InvalidArgument(
                "return_flow requires preprocessed_path".into(),
            ));
        }
        Ok(())
    }

    /// 关键帧之前的帧数（乘以 dilation）
    pub fn left_offset(&self) -> i64 {
        ((self.frame_count as i64 - 1) / 2 + self.keyframe_offset) * self.dilation as i64
    }

    /// 一个样本覆盖的帧跨度
    pub fn sub_seq_len(&self) -> usize {
        self.frame_count.saturating_sub(1) * self.dilation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_json() {
        let config: DatasetConfig = serde_json::from_str(r#"{"data_path": "/data/sintel"}"#).unwrap();
        assert_eq!(config.frame_count, 2);
        assert_eq!(config.dilation, 1);
        assert_eq!(config.keyframe_offset, 0);
        assert!(config.split_path.is_none());
        assert!(!config.return_flow);
        config.validate().unwrap();
    }

    #[test]
    fn test_left_offset() {
        let mut config = DatasetConfig::new("/data");
        config.frame_count = 3;
        assert_eq!(config.left_offset(), 1);
        config.dilation = 2;
        assert_eq!(config.left_offset(), 2);
        config.keyframe_offset = -1;
        assert_eq!(config.left_offset(), 0);
        assert_eq!(config.sub_seq_len(), 4);
    }

    #[test]
    fn test_validate() {
        let mut config = DatasetConfig::new("/data");
        config.dilation = 0;
        assert!(matches!(
            config.validate(),
            Err(DatasetError::InvalidArgument(_))
        ));

        for image_size in [[0, 16], [16, 0], [0, 0]] {
            let mut config = DatasetConfig::new("/data");
            config.image_size = Some(image_size);
            assert!(matches!(
                config.validate(),
                Err(DatasetError::InvalidArgument(_))
            ));
        }
        let mut config = DatasetConfig::new("/data");
        config.image_size = Some([192, 448]);
        config.validate().unwrap();

        let mut config = DatasetConfig::new("/data");
        config.return_flow = true;
        assert!(config.validate().is_err());
        config.preprocessed_path = Some("/pre".into());
        config.validate().unwrap();
    }
}
