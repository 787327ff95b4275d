//! Buffer construction parameters.

/// Treatment of the ends of buffered lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CapStyle {
    /// Semicircular cap of the buffer radius.
    #[default]
    Round,
    /// The line ends flush; no cap beyond the endpoint.
    Flat,
    /// Square cap extending half the buffer width past the endpoint.
    Square,
}

/// Knobs for buffer curve generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferParams {
    /// Number of line segments approximating a quarter circle.
    pub quadrant_segments: u32,
    pub cap_style: CapStyle,
}

impl Default for BufferParams {
    fn default() -> Self {
        Self { quadrant_segments: Self::DEFAULT_QUADRANT_SEGMENTS, cap_style: CapStyle::Round }
    }
}

impl BufferParams {
    pub const DEFAULT_QUADRANT_SEGMENTS: u32 = 8;

    pub fn with_quadrant_segments(quadrant_segments: u32) -> Self {
        Self { quadrant_segments: quadrant_segments.max(1), ..Self::default() }
    }

    pub fn with_cap_style(cap_style: CapStyle) -> Self {
        Self { cap_style, ..Self::default() }
    }
}
