//! Sintel 风格多帧数据集读取
//!
//! opencv
//! https://docs.rs/opencv/latest/opencv/all.html
//!
//! nalgebra
//! https://docs.rs/nalgebra/latest/nalgebra/
//!
//! ndarray
//! https://docs.rs/ndarray/latest/ndarray/all.html
//!
//! 时间： 2026-10-17
//! 作者： qi-xmu
//! 版本： 0.1.0
//!
// data path /data/sintel/training/<sequence>/frame_left/ **

pub mod camera;
pub mod config;
pub mod dataset;
pub mod error;
pub mod global_cast;
pub mod global_types;
pub mod processing;

#[cfg(test)]
pub(crate) mod fixtures;

pub use config::DatasetConfig;
pub use dataset::{DatasetTrait, Sample, SintelDataset};
pub use error::{DatasetError, Result};
