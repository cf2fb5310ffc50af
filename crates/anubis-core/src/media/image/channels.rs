/// `Rgba<u8>` channel indices in slot order: alpha, red, green, blue
const ARGB: [usize; 4] = [3, 0, 1, 2];
/// `Rgba<u8>` channel indices in slot order when alpha is not used
const RGB: [usize; 3] = [0, 1, 2];

const CHANNELS_PER_PIXEL: usize = 4;

/// Fixed channel visiting order, decided once per carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ChannelOrder {
    channels: &'static [usize],
}

impl ChannelOrder {
    pub fn new(use_alpha: bool) -> Self {
        Self {
            channels: if use_alpha { &ARGB } else { &RGB },
        }
    }

    /// channels visited per pixel
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Byte offsets into a row major RGBA buffer of `pixels` pixels, one per
    /// slot: top to bottom, left to right, then channel by channel.
    pub fn offsets(self, pixels: usize) -> impl Iterator<Item = usize> {
        (0..pixels).flat_map(move |p| {
            self.channels
                .iter()
                .map(move |c| p * CHANNELS_PER_PIXEL + c)
        })
    }
}
