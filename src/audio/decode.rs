use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;

/// Failures while turning a container file into mono samples.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unrecognized audio format: {0}")]
    UnknownFormat(SymphoniaError),
    #[error("no decodable audio track")]
    NoAudioTrack,
    #[error("track does not declare a sample rate")]
    UnknownSampleRate,
    #[error("codec failure: {0}")]
    Codec(SymphoniaError),
}

/// Mono samples plus their sample rate, the only contract the engine needs.
/// Format sniffing, codec decoding, and channel mixing all end here.
pub struct DecodedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl DecodedAudio {
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Decode a whole file to mono.
pub fn decode_audio(path: &Path) -> Result<DecodedAudio, DecodeError> {
    decode_audio_range(path, 0.0, None)
}

/// Decode up to `duration` seconds of mono audio starting `offset` seconds
/// into the stream. Bounds are applied on the decoded mono timeline, so they
/// are exact to the sample; an offset past the end yields an empty buffer.
pub fn decode_audio_range(
    path: &Path,
    offset: f64,
    duration: Option<f64>,
) -> Result<DecodedAudio, DecodeError> {
    let file = std::fs::File::open(path).map_err(|source| DecodeError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let mut format = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(DecodeError::UnknownFormat)?
        .format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(DecodeError::NoAudioTrack)?;
    let track_id = track.id;
    let channels = track.codec_params.channels.map_or(1, |c| c.count()).max(1);
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or(DecodeError::UnknownSampleRate)?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(DecodeError::Codec)?;

    let skip = (offset.max(0.0) * sample_rate as f64) as usize;
    let take = duration.map(|d| (d.max(0.0) * sample_rate as f64) as usize);

    let mut mono: Vec<f32> = Vec::new();
    // Mono sample index from the stream start, counted across packets so the
    // offset lands on the exact sample regardless of packet sizes.
    let mut cursor = 0usize;
    let mut done = take == Some(0);

    while !done {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            // symphonia signals a clean end of stream as an IO EOF
            Err(SymphoniaError::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(DecodeError::Codec(e)),
        };
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            // recoverable bitstream damage; resume at the next packet
            Err(SymphoniaError::DecodeError(_)) => continue,
            Err(e) => return Err(DecodeError::Codec(e)),
        };

        let mut interleaved = SampleBuffer::<f32>::new(decoded.frames() as u64, *decoded.spec());
        interleaved.copy_interleaved_ref(decoded);

        for frame in interleaved.samples().chunks(channels) {
            if cursor >= skip {
                mono.push(frame.iter().sum::<f32>() / channels as f32);
                if take.is_some_and(|n| mono.len() >= n) {
                    done = true;
                    break;
                }
            }
            cursor += 1;
        }
    }

    log::info!(
        "Decoded audio: {} mono samples at {}Hz ({:.2}s, offset {:.2}s)",
        mono.len(),
        sample_rate,
        mono.len() as f64 / sample_rate as f64,
        offset.max(0.0)
    );

    Ok(DecodedAudio {
        samples: mono,
        sample_rate,
    })
}
