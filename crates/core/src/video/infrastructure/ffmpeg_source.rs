use std::path::Path;

use crate::shared::error::SourceError;
use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::frame_source::{FrameSource, ReadOutcome};

/// libavformat seek timestamps are expressed in AV_TIME_BASE units
/// (microseconds).
const AV_TIME_BASE: f64 = 1_000_000.0;

/// Decodes video frames via ffmpeg-next (libavformat + libavcodec).
///
/// Every decoded frame is converted to RGB24 through the software scaler
/// before it leaves this module, so the rest of the crate never sees a
/// planar or padded pixel format.
pub struct FfmpegFrameSource {
    stream: Option<OpenStream>,
}

// Safety: FfmpegFrameSource is only used from a single thread at a time.
// The raw pointers inside ffmpeg types are not shared across threads.
unsafe impl Send for FfmpegFrameSource {}

impl FfmpegFrameSource {
    pub fn new() -> Self {
        Self { stream: None }
    }
}

impl Default for FfmpegFrameSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for FfmpegFrameSource {
    fn open(&mut self, path: &Path) -> Result<(VideoMetadata, Frame), SourceError> {
        if !path.exists() {
            return Err(SourceError::NotFound(path.to_path_buf()));
        }

        let unopenable = |source: ffmpeg_next::Error| SourceError::UnopenableStream {
            path: path.to_path_buf(),
            source,
        };

        ffmpeg_next::init().map_err(unopenable)?;

        let input = ffmpeg_next::format::input(path).map_err(unopenable)?;

        let (video_stream_index, fps, total_frames, parameters) = {
            let stream = input
                .streams()
                .best(ffmpeg_next::media::Type::Video)
                .ok_or_else(|| unopenable(ffmpeg_next::Error::StreamNotFound))?;
            let rate = stream.rate();
            let fps = if rate.denominator() != 0 {
                rate.numerator() as f64 / rate.denominator() as f64
            } else {
                0.0
            };
            (
                stream.index(),
                fps,
                stream.frames().max(0) as usize,
                stream.parameters(),
            )
        };

        let codec_ctx =
            ffmpeg_next::codec::context::Context::from_parameters(parameters).map_err(unopenable)?;
        let decoder = codec_ctx.decoder().video().map_err(unopenable)?;

        let metadata = VideoMetadata {
            width: decoder.width(),
            height: decoder.height(),
            fps,
            total_frames,
            codec: decoder
                .codec()
                .map(|c| c.name().to_string())
                .unwrap_or_default(),
            source_path: Some(path.to_path_buf()),
        };

        let scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            metadata.width,
            metadata.height,
            ffmpeg_next::format::Pixel::RGB24,
            metadata.width,
            metadata.height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )
        .map_err(unopenable)?;

        let mut opened = OpenStream {
            input,
            decoder,
            scaler,
            video_stream_index,
            metadata: metadata.clone(),
            position: 0,
            flushing: false,
            finished: false,
        };

        let first = opened
            .decode_next(0)
            .map_err(unopenable)?
            .ok_or_else(|| unopenable(ffmpeg_next::Error::Eof))?;

        self.stream = Some(opened);
        Ok((metadata, first))
    }

    fn read_next(&mut self) -> Result<ReadOutcome, SourceError> {
        let Some(stream) = self.stream.as_mut() else {
            return Ok(ReadOutcome::EndOfStream);
        };

        let next = stream.position + 1;
        match stream.decode_next(next).map_err(SourceError::DecodeFailure)? {
            Some(frame) => {
                stream.position = next;
                Ok(ReadOutcome::Frame(frame))
            }
            None => Ok(ReadOutcome::EndOfStream),
        }
    }

    fn seek_by(&mut self, delta_seconds: f64) -> Result<Option<Frame>, SourceError> {
        let Some(stream) = self.stream.as_mut() else {
            return Ok(None);
        };
        let fps = stream.metadata.fps;
        if fps <= 0.0 {
            return Ok(None);
        }

        let delta_frames = (delta_seconds * fps).round() as i64;
        let target =
            clamp_frame_target(stream.position, delta_frames, stream.metadata.total_frames);
        stream.seek_to(target).map_err(SourceError::DecodeFailure)
    }

    fn rewind(&mut self) -> Result<Option<Frame>, SourceError> {
        let Some(stream) = self.stream.as_mut() else {
            return Ok(None);
        };
        stream.seek_to(0).map_err(SourceError::DecodeFailure)
    }

    fn position(&self) -> usize {
        self.stream.as_ref().map(|s| s.position).unwrap_or(0)
    }

    fn metadata(&self) -> Option<&VideoMetadata> {
        self.stream.as_ref().map(|s| &s.metadata)
    }

    fn close(&mut self) {
        self.stream = None;
    }
}

/// Decoder state for one open video: the demuxer, the codec context, the
/// RGB24 scaler and the packet-pump bookkeeping.
struct OpenStream {
    input: ffmpeg_next::format::context::Input,
    decoder: ffmpeg_next::decoder::Video,
    scaler: ffmpeg_next::software::scaling::Context,
    video_stream_index: usize,
    metadata: VideoMetadata,
    position: usize,
    flushing: bool,
    finished: bool,
}

impl OpenStream {
    /// Decodes the next frame, feeding packets to the decoder as needed.
    ///
    /// Returns `Ok(None)` once the stream is exhausted, including the
    /// decoder's trailing flushed frames.
    fn decode_next(&mut self, index: usize) -> Result<Option<Frame>, ffmpeg_next::Error> {
        if self.finished {
            return Ok(None);
        }

        if let Some(frame) = self.try_receive(index)? {
            return Ok(Some(frame));
        }

        if self.flushing {
            self.finished = true;
            return Ok(None);
        }

        loop {
            let Some((stream, packet)) = self.input.packets().next() else {
                let _ = self.decoder.send_eof();
                self.flushing = true;
                if let Some(frame) = self.try_receive(index)? {
                    return Ok(Some(frame));
                }
                self.finished = true;
                return Ok(None);
            };

            if stream.index() != self.video_stream_index {
                continue;
            }

            self.decoder.send_packet(&packet)?;

            if let Some(frame) = self.try_receive(index)? {
                return Ok(Some(frame));
            }
        }
    }

    fn try_receive(&mut self, index: usize) -> Result<Option<Frame>, ffmpeg_next::Error> {
        let mut decoded = ffmpeg_next::util::frame::video::Video::empty();
        if self.decoder.receive_frame(&mut decoded).is_err() {
            return Ok(None);
        }

        let mut rgb = ffmpeg_next::util::frame::video::Video::empty();
        self.scaler.run(&decoded, &mut rgb)?;

        let width = self.metadata.width;
        let height = self.metadata.height;
        let pixels = strip_row_padding(&rgb, width, height);
        Ok(Some(Frame::new(pixels, width, height, 3, index)))
    }

    /// Seeks the container to `target` and decodes one frame there.
    ///
    /// The container lands on a keyframe at or before the requested
    /// timestamp; the first decodable frame after that point is returned
    /// and `position` is set to `target`.
    fn seek_to(&mut self, target: usize) -> Result<Option<Frame>, ffmpeg_next::Error> {
        let fps = self.metadata.fps;
        let mut ts = if fps > 0.0 {
            (target as f64 / fps * AV_TIME_BASE) as i64
        } else {
            0
        };
        let duration = self.input.duration();
        if duration > 0 {
            ts = ts.min(duration);
        }

        self.input.seek(ts, ..=ts)?;
        self.decoder.flush();
        self.flushing = false;
        self.finished = false;

        match self.decode_next(target)? {
            Some(frame) => {
                self.position = target;
                Ok(Some(frame))
            }
            None => Ok(None),
        }
    }
}

/// Clamps `position + delta_frames` into the valid frame range.
///
/// `total_frames == 0` means the container did not report a count, so only
/// the lower bound applies.
fn clamp_frame_target(position: usize, delta_frames: i64, total_frames: usize) -> usize {
    let target = (position as i64 + delta_frames).max(0) as usize;
    if total_frames > 0 {
        target.min(total_frames - 1)
    } else {
        target
    }
}

/// Copies pixel data from an ffmpeg frame into a tightly packed RGB buffer.
///
/// ffmpeg rows may carry trailing padding bytes (stride > width * 3); the
/// padding is dropped row by row.
fn strip_row_padding(
    rgb: &ffmpeg_next::util::frame::video::Video,
    width: u32,
    height: u32,
) -> Vec<u8> {
    let stride = rgb.stride(0);
    let data = rgb.data(0);
    let row_bytes = width as usize * 3;

    let mut pixels = Vec::with_capacity(row_bytes * height as usize);
    for row in 0..height as usize {
        let start = row * stride;
        pixels.extend_from_slice(&data[start..start + row_bytes]);
    }
    pixels
}
