use std::collections::HashMap;
use std::path::Path;

use super::layout;
use crate::error::{DatasetError, Result};

/// 数据集中的所有序列及其帧数
#[derive(Debug, Clone, Default)]
pub struct SequenceCatalog {
    sequences: Vec<(String, usize)>,
    lookup: HashMap<String, usize>,
}

impl SequenceCatalog {
    /// 扫描根目录，只有包含 `frame_left` 子目录的才算序列。
    /// 序列按名称排序。
    pub fn scan(root: &Path) -> Result<Self> {
        let entries = std::fs::read_dir(root).map_err(|err| DatasetError::file_access(root, err))?;

        let mut sequences = vec![];
        for entry in entries {
            let entry = entry.map_err(|err| DatasetError::file_access(root, err))?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                log::warn!("skip non utf-8 entry {:?}", entry.path());
                continue;
            };
            let frame_dir = layout::frame_dir(root, &name);
            if !frame_dir.is_dir() {
                continue;
            }
            let len = std::fs::read_dir(&frame_dir)
                .map_err(|err| DatasetError::file_access(&frame_dir, err))?
                .count();
            sequences.push((name, len));
        }
        sequences.sort();

        log::info!("found {} sequences in {:?}", sequences.len(), root);
        Ok(Self::from_sequences(sequences))
    }

    pub fn from_sequences(sequences: Vec<(String, usize)>) -> Self {
        let lookup = sequences
            .iter()
            .map(|(name, len)| (name.clone(), *len))
            .collect();
        Self { sequences, lookup }
    }

    /// 序列的帧数
    pub fn len_of(&self, sequence: &str) -> Option<usize> {
        self.lookup.get(sequence).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.sequences.iter().map(|(name, len)| (name.as_str(), *len))
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}
