use std::io::{BufWriter, Read, Write};

use log::debug;

use super::wave::{WaveHeader, WaveReader, WaveWriter};
use crate::media::{Carrier, SlotFlow, WaveOptions};
use crate::result::Result;

/// WAV audio carrier, streams frames from the source into the destination
///
/// Every channel of every frame is one slot, its bytes are the little endian
/// sample as stored in the file. Frames are never held in memory all at once.
pub struct AudioCarrier<R> {
    reader: WaveReader<R>,
}

impl<R: Read> AudioCarrier<R> {
    /// Parses the header, the stream is left at the first sample byte
    pub fn decode(source: R, options: &WaveOptions) -> Result<Self> {
        let reader = WaveReader::new(source, options)?;
        debug!("wav carrier: {:?}", reader.header().format());

        Ok(Self { reader })
    }

    pub fn header(&self) -> &WaveHeader {
        self.reader.header()
    }
}

impl<R: Read> Carrier for AudioCarrier<R> {
    fn slot_count(&self) -> u64 {
        self.header().channel_sample_count()
    }

    /// Counts every byte of the data chunk once per channel, which is more than
    /// the slots really offer for multi byte samples. A message that passes this
    /// check can still run out of slots.
    fn capacity(&self, lsb_depth: u8) -> u64 {
        let header = self.header();
        u64::from(header.data_chunk_size())
            * u64::from(header.format().num_channels())
            * u64::from(lsb_depth)
    }

    fn rewrite(
        self,
        destination: &mut dyn Write,
        visit: &mut dyn FnMut(&mut [u8]) -> Result<SlotFlow>,
    ) -> Result<()> {
        let mut reader = self.reader;
        let mut writer = WaveWriter::new(BufWriter::new(destination), reader.header());
        let mut flow = SlotFlow::Continue;

        while let Some(mut frame) = reader.next_frame()? {
            if flow == SlotFlow::Continue {
                for channel in frame.channels_mut() {
                    flow = visit(channel)?;
                    if flow == SlotFlow::Stop {
                        break;
                    }
                }
            }
            writer.write_frame(&frame)?;
        }
        writer.finish()?;

        Ok(())
    }

    fn scan(self, visit: &mut dyn FnMut(&[u8]) -> Result<()>) -> Result<()> {
        for frame in self.reader {
            for channel in frame?.channels() {
                visit(channel)?;
            }
        }

        Ok(())
    }
}
