//! 样本索引到帧号的映射

/// 自定义帧号选择，替换默认的邻域策略
pub trait IndexSelector: Send + Sync {
    /// 参数依次为起始帧、帧数、dilation、left offset，返回未截断的帧号
    fn select(&self, start_id: i64, frame_count: usize, dilation: usize, left_offset: i64) -> Vec<i64>;
}

impl<F> IndexSelector for F
where
    F: Fn(i64, usize, usize, i64) -> Vec<i64> + Send + Sync,
{
    fn select(&self, start_id: i64, frame_count: usize, dilation: usize, left_offset: i64) -> Vec<i64> {
        self(start_id, frame_count, dilation, left_offset)
    }
}

/// 默认邻域：关键帧在最前，之后是 `start_id - left_offset` 起、步长为 dilation 的
/// `frame_count` 个候选中不等于关键帧的那些
pub fn neighborhood(start_id: i64, frame_count: usize, dilation: usize, left_offset: i64) -> Vec<i64> {
    let first = start_id - left_offset;
    let end = first + (frame_count * dilation) as i64;
    std::iter::once(start_id)
        .chain(
            (first..end)
                .step_by(dilation.max(1))
                .filter(|&id| id != start_id),
        )
        .collect()
}

/// 截断到 `[0, seq_len - 1]`，越界的帧重复边界帧
pub fn clamp_ids(ids: &mut [i64], seq_len: usize) {
    let last = seq_len as i64 - 1;
    for id in ids.iter_mut() {
        *id = (*id).min(last).max(0);
    }
}
