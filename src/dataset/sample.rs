use ndarray::{Array1, Array3, Array4};

/// 一个样本，所有逐帧数组的第一维与 `ids` 一一对应
#[derive(Debug, Clone)]
pub struct Sample {
    /// (N, 3, H, W)，RGB，[0, 1]
    pub imgs: Array4<f32>,
    /// (N, 3, 3)，归一化后的内参
    pub projs: Array3<f32>,
    /// (N, 4, 4)，相机到世界的位姿
    pub poses: Array3<f32>,
    /// (N,)，截断后的帧号，`ids[0]` 为关键帧
    pub ids: Array1<i64>,
    /// 样本索引
    pub data_id: usize,
    /// (1, 1, H, W)
    pub depths: Option<Array4<f32>>,
    /// (M, 2, H, W)
    pub flows_fwd: Option<Array4<f32>>,
    /// (M, 2, H, W)
    pub flows_bwd: Option<Array4<f32>>,
}

impl Sample {
    pub fn frame_count(&self) -> usize {
        self.ids.len()
    }
}
