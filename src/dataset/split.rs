//! 样本列表：从 split 文件读取，或者遍历所有序列生成

use std::path::Path;

use super::catalog::SequenceCatalog;
use crate::error::{DatasetError, Result};
use crate::global_types::Datapoint;

/// 为一个序列生成样本
pub trait SequenceSampler: Send + Sync {
    /// 参数依次为序列名、序列帧数、left offset、子序列跨度
    fn sample(&self, sequence: &str, seq_len: usize, left_offset: i64, sub_seq_len: usize) -> Vec<Datapoint>;
}

impl<F> SequenceSampler for F
where
    F: Fn(&str, usize, i64, usize) -> Vec<Datapoint> + Send + Sync,
{
    fn sample(&self, sequence: &str, seq_len: usize, left_offset: i64, sub_seq_len: usize) -> Vec<Datapoint> {
        self(sequence, seq_len, left_offset, sub_seq_len)
    }
}

/// 默认采样：跳过过短的序列，否则取 `[0, seq_len - 2]` 中的每一帧
#[derive(Debug, Clone, Copy, Default)]
pub struct ExhaustiveSampler;

impl SequenceSampler for ExhaustiveSampler {
    fn sample(&self, sequence: &str, seq_len: usize, _left_offset: i64, sub_seq_len: usize) -> Vec<Datapoint> {
        if seq_len < sub_seq_len {
            log::warn!(
                "skip sequence {} ({} frames, need {})",
                sequence,
                seq_len,
                sub_seq_len
            );
            return vec![];
        }
        // 最后一帧不作为起点，至少保留两帧
        (0..seq_len.saturating_sub(1))
            .map(|id| Datapoint::new(sequence, id as i64))
            .collect()
    }
}

/// 读取 split 文件，每行 `<sequence> <id>`，保持文件中的顺序
pub fn load_split(path: &Path) -> Result<Vec<Datapoint>> {
    let content = std::fs::read_to_string(path).map_err(|err| DatasetError::file_access(path, err))?;
    parse_split(&content, path)
}

fn parse_split(content: &str, path: &Path) -> Result<Vec<Datapoint>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_no, line)| {
            let malformed = || DatasetError::SplitParse {
                path: path.to_path_buf(),
                line: line_no + 1,
                content: line.to_string(),
            };
            let mut segments = line.split_whitespace();
            let sequence = segments.next().ok_or_else(malformed)?;
            let id = segments
                .next()
                .and_then(|id| id.parse::<i64>().ok())
                .ok_or_else(malformed)?;
            Ok(Datapoint::new(sequence, id))
        })
        .collect()
}

/// 遍历所有序列生成样本
pub fn full_split(
    catalog: &SequenceCatalog,
    left_offset: i64,
    sub_seq_len: usize,
    sampler: &dyn SequenceSampler,
) -> Vec<Datapoint> {
    catalog
        .iter()
        .flat_map(|(sequence, seq_len)| sampler.sample(sequence, seq_len, left_offset, sub_seq_len))
        .collect()
}
