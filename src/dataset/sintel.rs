use std::path::{Path, PathBuf};

use ndarray::{Array2, Array3, Axis};
use opencv::core::Mat;
use opencv::prelude::*;

use super::catalog::SequenceCatalog;
use super::index::{clamp_ids, neighborhood, IndexSelector};
use super::layout;
use super::sample::Sample;
use super::split::{full_split, load_split, ExhaustiveSampler, SequenceSampler};
use super::DatasetTrait;
use crate::camera::{CamFile, CameraFrame};
use crate::config::DatasetConfig;
use crate::error::{DatasetError, Result};
use crate::global_cast::matrix_to_array2;
use crate::global_types::{Datapoint, ImageSize};
use crate::processing::{
    get_flow_selector, get_target_size_and_crop, load_flow, process_flow, process_img,
    process_proj, read_image, FlowSelector,
};

pub struct SintelDatasetBuilder {
    config: DatasetConfig,
    sequence_sampler: Option<Box<dyn SequenceSampler>>,
    index_selector: Option<Box<dyn IndexSelector>>,
    flow_selector: Option<Box<dyn FlowSelector>>,
}

impl SintelDatasetBuilder {
    pub fn new(config: DatasetConfig) -> Self {
        Self {
            config,
            sequence_sampler: None,
            index_selector: None,
            flow_selector: None,
        }
    }

    /// 替换默认的全序列采样，只在没有 split 文件时生效
    pub fn sequence_sampler(mut self, sampler: impl SequenceSampler + 'static) -> Self {
        self.sequence_sampler = Some(Box::new(sampler));
        self
    }

    pub fn index_selector(mut self, selector: impl IndexSelector + 'static) -> Self {
        self.index_selector = Some(Box::new(selector));
        self
    }

    pub fn flow_selector(mut self, selector: impl FlowSelector + 'static) -> Self {
        self.flow_selector = Some(Box::new(selector));
        self
    }

    pub fn build(self) -> Result<SintelDataset> {
        let Self {
            config,
            sequence_sampler,
            index_selector,
            flow_selector,
        } = self;
        config.validate()?;

        let left_offset = config.left_offset();
        let sequences = SequenceCatalog::scan(&config.data_path)?;

        let datapoints = match &config.split_path {
            Some(split_path) => {
                let datapoints = load_split(split_path)?;
                log::info!("loaded {} datapoints from {:?}", datapoints.len(), split_path);
                for datapoint in &datapoints {
                    if sequences.len_of(&datapoint.sequence).is_none() {
                        log::warn!("split entry {} names an unknown sequence", datapoint);
                    }
                }
                datapoints
            }
            None => {
                let sampler = sequence_sampler.unwrap_or_else(|| Box::new(ExhaustiveSampler));
                let datapoints =
                    full_split(&sequences, left_offset, config.sub_seq_len(), sampler.as_ref());
                log::info!(
                    "generated {} datapoints from {} sequences",
                    datapoints.len(),
                    sequences.len()
                );
                datapoints
            }
        };

        let flow_selector = flow_selector.unwrap_or_else(|| get_flow_selector(config.frame_count));

        Ok(SintelDataset {
            config,
            left_offset,
            sequences,
            datapoints,
            index_selector,
            flow_selector,
        })
    }
}

/// Sintel 数据集
///
/// 构造后只读，`get` 每次都重新从磁盘读取，可以在多个线程中同时调用。
pub struct SintelDataset {
    config: DatasetConfig,
    left_offset: i64,
    sequences: SequenceCatalog,
    datapoints: Vec<Datapoint>,
    index_selector: Option<Box<dyn IndexSelector>>,
    flow_selector: Box<dyn FlowSelector>,
}

impl SintelDataset {
    pub fn new(config: DatasetConfig) -> Result<Self> {
        SintelDatasetBuilder::new(config).build()
    }

    pub fn builder(config: DatasetConfig) -> SintelDatasetBuilder {
        SintelDatasetBuilder::new(config)
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    pub fn sequences(&self) -> &SequenceCatalog {
        &self.sequences
    }

    pub fn datapoints(&self) -> &[Datapoint] {
        &self.datapoints
    }

    /// 样本索引 -> (序列名, 截断后的帧号)
    pub fn index_to_seq_ids(&self, index: usize) -> Result<(&str, Vec<i64>)> {
        let datapoint = self
            .datapoints
            .get(index)
            .ok_or(DatasetError::OutOfRange {
                index,
                len: self.datapoints.len(),
            })?;
        let sequence = datapoint.sequence.as_str();
        let seq_len = self
            .sequences
            .len_of(sequence)
            .ok_or_else(|| DatasetError::UnknownSequence(sequence.to_string()))?;

        let frame_count = self.config.frame_count;
        let dilation = self.config.dilation;
        let mut ids = match &self.index_selector {
            Some(selector) => selector.select(datapoint.id, frame_count, dilation, self.left_offset),
            None => neighborhood(datapoint.id, frame_count, dilation, self.left_offset),
        };
        clamp_ids(&mut ids, seq_len);

        Ok((sequence, ids))
    }

    pub fn load_images(&self, sequence: &str, ids: &[i64]) -> Result<Vec<Mat>> {
        ids.iter()
            .map(|&id| read_image(&layout::image_path(&self.config.data_path, sequence, id)))
            .collect()
    }

    /// 该数据集没有深度，返回 (1, H, W) 的全 1 数组
    pub fn load_depth(&self, target_size: Option<ImageSize>) -> Result<Array3<f32>> {
        let target_size = target_size.ok_or_else(|| {
            DatasetError::InvalidArgument("depth requires a target size".into())
        })?;
        Ok(Array3::ones((1, target_size.height, target_size.width)))
    }

    /// 读取预计算的光流，返回 (fwd, bwd)
    pub fn load_flows(&self, sequence: &str, ids: &[i64]) -> Result<(Vec<Mat>, Vec<Mat>)> {
        let preprocessed = self.preprocessed_path()?;
        let mut flows_fwd = vec![];
        let mut flows_bwd = vec![];
        for pair in self.flow_selector.select(ids) {
            flows_fwd.push(load_flow(&layout::flow_path(
                preprocessed,
                sequence,
                pair.fwd.id,
                pair.fwd.forward,
            ))?);
            flows_bwd.push(load_flow(&layout::flow_path(
                preprocessed,
                sequence,
                pair.bwd.id,
                pair.bwd.forward,
            ))?);
        }
        Ok((flows_fwd, flows_bwd))
    }

    pub fn load_cams(&self, sequence: &str, ids: &[i64]) -> Result<Vec<CameraFrame>> {
        ids.iter()
            .map(|&id| {
                let path = layout::cam_path(&self.config.data_path, sequence, id);
                CamFile::open(&path)?.to_camera_frame(&path)
            })
            .collect()
    }

    fn preprocessed_path(&self) -> Result<&Path> {
        self.config.preprocessed_path.as_deref().ok_or_else(|| {
            DatasetError::InvalidArgument("flow requires preprocessed_path".into())
        })
    }
}

impl DatasetTrait for SintelDataset {
    const NAME: &'static str = "Sintel";

    fn len(&self) -> usize {
        self.datapoints.len()
    }

    fn get(&self, index: usize) -> Result<Sample> {
        let (sequence, ids) = self.index_to_seq_ids(index)?;

        let imgs = self.load_images(sequence, &ids)?;
        let first = imgs.first().ok_or_else(|| {
            DatasetError::InvalidArgument(format!("sample {} selects no frames", index))
        })?;
        let original_size = ImageSize::new(first.rows() as usize, first.cols() as usize);
        let image_size = self.config.image_size.map(ImageSize::from);
        let (target_size, crop) = get_target_size_and_crop(image_size, original_size);
        log::debug!(
            "sample {}: {} {:?}, {} -> {}",
            index,
            sequence,
            ids,
            original_size,
            target_size
        );

        let depths = if self.config.return_depth {
            Some(self.load_depth(Some(target_size))?.insert_axis(Axis(0)))
        } else {
            None
        };

        let flows = if self.config.return_flow {
            Some(self.load_flows(sequence, &ids)?)
        } else {
            None
        };

        let imgs = imgs
            .iter()
            .map(|img| process_img(img, target_size, crop.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let imgs = stack(&imgs, (3, target_size.height, target_size.width))?;

        let (flows_fwd, flows_bwd) = match flows {
            Some((fwd, bwd)) => {
                let empty = (2, target_size.height, target_size.width);
                let process = |flows: Vec<Mat>| {
                    flows
                        .iter()
                        .map(|flow| process_flow(flow, target_size, crop.as_ref()))
                        .collect::<Result<Vec<_>>>()
                };
                (
                    Some(stack(&process(fwd)?, empty)?),
                    Some(stack(&process(bwd)?, empty)?),
                )
            }
            None => (None, None),
        };

        let cams = self.load_cams(sequence, &ids)?;
        let projs: Vec<Array2<f32>> = cams
            .iter()
            .map(|cam| {
                matrix_to_array2(&process_proj(&cam.proj, original_size, target_size, crop.as_ref()))
            })
            .collect();
        let poses: Vec<Array2<f32>> = cams.iter().map(|cam| matrix_to_array2(&cam.pose)).collect();

        Ok(Sample {
            imgs,
            projs: stack(&projs, (3, 3))?,
            poses: stack(&poses, (4, 4))?,
            ids: ids.into_iter().collect(),
            data_id: index,
            depths,
            flows_fwd,
            flows_bwd,
        })
    }

    fn get_image_paths(&self, index: usize) -> Result<Vec<PathBuf>> {
        let (sequence, ids) = self.index_to_seq_ids(index)?;
        Ok(ids
            .iter()
            .map(|&id| layout::final_pass_path(&self.config.data_path, sequence, id))
            .collect())
    }

    fn get_sequence_name(&self, index: usize) -> Result<&str> {
        let (sequence, _) = self.index_to_seq_ids(index)?;
        Ok(sequence)
    }
}

/// 沿新的第 0 维堆叠，列表为空时按 `shape` 生成长度为 0 的数组
fn stack<D, Sh>(arrays: &[ndarray::Array<f32, D>], shape: Sh) -> Result<ndarray::Array<f32, D::Larger>>
where
    D: ndarray::Dimension,
    D::Larger: ndarray::RemoveAxis,
    Sh: ndarray::IntoDimension<Dim = D>,
{
    if arrays.is_empty() {
        let shape = shape.into_dimension().insert_axis(Axis(0));
        return Ok(ndarray::Array::zeros(shape));
    }
    let views: Vec<_> = arrays.iter().map(|array| array.view()).collect();
    ndarray::stack(Axis(0), &views).map_err(|err| DatasetError::Shape(err.to_string()))
}
