use std::fmt::Display;

/// 图像尺寸 (height, width)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageSize {
    pub height: usize,
    pub width: usize,
}

impl ImageSize {
    pub fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from([height, width]: [usize; 2]) -> Self {
        Self { height, width }
    }
}

impl Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

/// 先缩放到 `resized`，再从 (top, left) 处裁剪出目标尺寸。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crop {
    pub resized: ImageSize,
    pub top: usize,
    pub left: usize,
}

/// 一个样本的锚点：序列名与起始帧
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Datapoint {
    pub sequence: String,
    pub id: i64,
}

impl Datapoint {
    pub fn new(sequence: impl Into<String>, id: i64) -> Self {
        Self {
            sequence: sequence.into(),
            id,
        }
    }
}

impl Display for Datapoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.sequence, self.id)
    }
}

#[test]
fn test_datapoint_display() {
    let datapoint = Datapoint::new("alley_1", 12);
    assert_eq!(datapoint.to_string(), "alley_1 12");
    assert_eq!(ImageSize::from([436, 1024]).to_string(), "436x1024");
}
