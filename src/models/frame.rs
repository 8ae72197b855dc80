// Data structures for video frames entering the pipeline

/// A video frame delivered by the upstream frame source
///
/// The pipeline treats frame contents as opaque: it hands them to the pose
/// detector and echoes them on the overlay event so a presentation layer can
/// draw on top of the original image.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub timestamp: i64,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub format: PixelFormat,
}

/// Pixel format of delivered frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    RGBA8,
    BGRA8,
}
