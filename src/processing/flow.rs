use std::path::Path;

use ndarray::{Array3, Axis};
use opencv::core::{self, Mat, Vector, CV_16UC3, CV_32F};
use opencv::imgcodecs;
use opencv::prelude::*;

use super::{resize_and_crop, to_channel_first};
use crate::error::{DatasetError, Result};
use crate::global_types::{Crop, ImageSize};

/// 16 位 PNG 光流编码：value = flow * 64 + 2^15
const FLOW_SCALE: f64 = 64.0;
const FLOW_OFFSET: f64 = 32768.0;

/// 查找一张预计算光流：帧号以及方向（`true` 为 fwd）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowLookup {
    pub id: i64,
    pub forward: bool,
}

impl FlowLookup {
    pub fn new(id: i64, forward: bool) -> Self {
        Self { id, forward }
    }
}

/// 一对正向、反向光流
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowPair {
    pub fwd: FlowLookup,
    pub bwd: FlowLookup,
}

/// 由帧号列表决定需要读取哪些光流
pub trait FlowSelector: Send + Sync {
    fn select(&self, ids: &[i64]) -> Vec<FlowPair>;
}

impl<F> FlowSelector for F
where
    F: Fn(&[i64]) -> Vec<FlowPair> + Send + Sync,
{
    fn select(&self, ids: &[i64]) -> Vec<FlowPair> {
        self(ids)
    }
}

/// 默认策略：关键帧到每个邻居的光流，以及邻居回到关键帧的光流
#[derive(Debug, Clone, Copy)]
pub struct KeyframeFlowSelector {
    pub frame_count: usize,
}

impl FlowSelector for KeyframeFlowSelector {
    fn select(&self, ids: &[i64]) -> Vec<FlowPair> {
        let Some((&keyframe, neighbors)) = ids.split_first() else {
            return vec![];
        };
        neighbors
            .iter()
            .take(self.frame_count.saturating_sub(1))
            .map(|&id| {
                let forward = id >= keyframe;
                FlowPair {
                    fwd: FlowLookup::new(keyframe, forward),
                    bwd: FlowLookup::new(id, !forward),
                }
            })
            .collect()
    }
}

pub fn get_flow_selector(frame_count: usize) -> Box<dyn FlowSelector> {
    Box::new(KeyframeFlowSelector { frame_count })
}

/// 读取预计算的光流，返回 `CV_32FC2` (u, v)
pub fn load_flow(path: &Path) -> Result<Mat> {
    std::fs::metadata(path).map_err(|err| DatasetError::file_access(path, err))?;
    let path_str = path
        .to_str()
        .ok_or_else(|| DatasetError::decode(path, "path is not valid utf-8"))?;

    let encoded = imgcodecs::imread(path_str, imgcodecs::IMREAD_UNCHANGED)
        .map_err(|err| DatasetError::decode(path, err))?;
    if encoded.empty() {
        return Err(DatasetError::decode(path, "unreadable flow image"));
    }
    if encoded.typ() != CV_16UC3 {
        return Err(DatasetError::decode(path, "expected a 16-bit 3-channel flow png"));
    }

    let mut decoded = Mat::default();
    encoded.convert_to(&mut decoded, CV_32F, 1.0 / FLOW_SCALE, -FLOW_OFFSET / FLOW_SCALE)?;

    // opencv 按 BGR 存储：R 为 u，G 为 v
    let mut channels = Vector::<Mat>::new();
    core::split(&decoded, &mut channels)?;
    let mut uv = Vector::<Mat>::new();
    uv.push(channels.get(2)?);
    uv.push(channels.get(1)?);
    let mut flow = Mat::default();
    core::merge(&uv, &mut flow)?;
    Ok(flow)
}

/// 缩放、裁剪光流，并按缩放比例调整光流大小，输出 (2, H, W)
pub fn process_flow(flow: &Mat, target_size: ImageSize, crop: Option<&Crop>) -> Result<Array3<f32>> {
    let (mut array, (scale_x, scale_y)) = resize_and_crop(flow, target_size, crop)?;
    array.index_axis_mut(Axis(2), 0).mapv_inplace(|u| u * scale_x);
    array.index_axis_mut(Axis(2), 1).mapv_inplace(|v| v * scale_y);
    Ok(to_channel_first(array))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{temp_dir, write_flow_png};
    use approx::assert_relative_eq;

    #[test]
    fn test_keyframe_selector() {
        let selector = get_flow_selector(3);
        let pairs = selector.select(&[5, 4, 6]);
        assert_eq!(
            pairs,
            vec![
                FlowPair {
                    fwd: FlowLookup::new(5, false),
                    bwd: FlowLookup::new(4, true),
                },
                FlowPair {
                    fwd: FlowLookup::new(5, true),
                    bwd: FlowLookup::new(6, false),
                },
            ]
        );
        assert!(selector.select(&[]).is_empty());
    }

    #[test]
    fn test_closure_selector() {
        let selector = |ids: &[i64]| {
            vec![FlowPair {
                fwd: FlowLookup::new(ids[0], true),
                bwd: FlowLookup::new(ids[1], false),
            }]
        };
        assert_eq!(selector.select(&[1, 2]).len(), 1);
    }

    #[test]
    fn test_load_flow() {
        let dir = temp_dir("load_flow");
        let path = dir.path().join("frame_0001_fwd.png");
        write_flow_png(&path, 6, 8, (1.5, -2.0));

        let flow = load_flow(&path).unwrap();
        let array = process_flow(&flow, ImageSize::new(6, 8), None).unwrap();
        assert_eq!(array.shape(), &[2, 6, 8]);
        assert!(array.index_axis(Axis(0), 0).iter().all(|&u| u == 1.5));
        assert!(array.index_axis(Axis(0), 1).iter().all(|&v| v == -2.0));
    }

    #[test]
    fn test_process_flow_scales_vectors() {
        let dir = temp_dir("process_flow");
        let path = dir.path().join("frame_0001_fwd.png");
        write_flow_png(&path, 8, 16, (2.0, 4.0));

        let flow = load_flow(&path).unwrap();
        let array = process_flow(&flow, ImageSize::new(4, 8), None).unwrap();
        assert_eq!(array.shape(), &[2, 4, 8]);
        assert_relative_eq!(array[[0, 1, 1]], 1.0, epsilon = 1e-5);
        assert_relative_eq!(array[[1, 2, 3]], 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_missing_flow() {
        let err = load_flow(Path::new("/nonexistent/frame_0001_fwd.png")).unwrap_err();
        assert!(matches!(err, DatasetError::FileAccess { .. }));
    }
}
