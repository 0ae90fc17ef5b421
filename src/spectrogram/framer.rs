use crate::spectrogram::error::{Result, SpectrogramError};

/// Slices a sample buffer into overlapping fixed-length windows at a fixed
/// stride. Frames overlap whenever the stride is shorter than the window
/// (the default 10ms stride / 20ms window gives 50% overlap).
#[derive(Debug)]
pub struct Framer {
    pub window_size: usize,
    pub stride_size: usize,
}

impl Framer {
    pub fn new(sample_rate: u32, window_ms: f32, stride_ms: f32) -> Result<Self> {
        let window_size = (0.001 * sample_rate as f64 * window_ms as f64) as usize;
        let stride_size = (0.001 * sample_rate as f64 * stride_ms as f64) as usize;

        if window_size == 0 || stride_size == 0 {
            return Err(SpectrogramError::InvalidConfiguration(format!(
                "window ({}ms) and stride ({}ms) must each span at least one sample at {}Hz",
                window_ms, stride_ms, sample_rate
            )));
        }

        Ok(Self {
            window_size,
            stride_size,
        })
    }

    /// Zero-copy view of the overlapping frames in `samples`.
    ///
    /// Trailing samples that do not fill a whole stride past the last frame
    /// (fewer than `stride_size` of them) are dropped and never analyzed.
    pub fn frames<'a>(&self, samples: &'a [f32]) -> Result<Frames<'a>> {
        if samples.len() < self.window_size {
            return Err(SpectrogramError::InsufficientSamples {
                got: samples.len(),
                needed: self.window_size,
            });
        }

        let truncate = (samples.len() - self.window_size) % self.stride_size;
        let samples = &samples[..samples.len() - truncate];
        let count = (samples.len() - self.window_size) / self.stride_size + 1;

        Ok(Frames {
            samples,
            window_size: self.window_size,
            stride_size: self.stride_size,
            count,
        })
    }
}

/// Borrowed frame sequence. Frames share the underlying sample storage and
/// are independently addressable, so per-frame work can be striped across
/// workers without locking.
#[derive(Clone, Copy, Debug)]
pub struct Frames<'a> {
    samples: &'a [f32],
    window_size: usize,
    stride_size: usize,
    count: usize,
}

impl<'a> Frames<'a> {
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Frame `i` covers samples `[i*stride, i*stride + window_size)`.
    pub fn get(&self, i: usize) -> &'a [f32] {
        let start = i * self.stride_size;
        &self.samples[start..start + self.window_size]
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a [f32]> + 'a {
        let frames = *self;
        (0..frames.count).map(move |i| frames.get(i))
    }
}
