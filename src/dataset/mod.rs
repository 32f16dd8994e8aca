//! 数据集处理
//!
//! MPI Sintel 风格的数据集：每个序列一个目录，逐帧存储图像和相机参数。

mod catalog;
mod index;
pub mod layout;
mod sample;
mod sintel;
mod split;

pub use catalog::SequenceCatalog;
pub use index::{clamp_ids, neighborhood, IndexSelector};
pub use sample::Sample;
pub use sintel::{SintelDataset, SintelDatasetBuilder};
pub use split::{full_split, load_split, ExhaustiveSampler, SequenceSampler};

use std::path::PathBuf;

use crate::error::Result;

pub type DefaultDataset = SintelDataset;

pub trait DatasetTrait {
    const NAME: &'static str;

    /// 样本数量
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 读取并组装一个样本
    fn get(&self, index: usize) -> Result<Sample>;

    /// 样本中每一帧对应的图像路径
    fn get_image_paths(&self, index: usize) -> Result<Vec<PathBuf>>;

    /// 样本所属的序列
    fn get_sequence_name(&self, index: usize) -> Result<&str>;
}
