//! Audio transcoding
//!
//! Converts an arbitrary uploaded container (mp3/ogg/m4a/wav/webm, whatever
//! symphonia can probe) into a 16-bit PCM WAV the recognition backend is
//! guaranteed to accept. Decode failure is not an error at this layer: the
//! caller falls back to submitting the original bytes as-is.

use std::io::Cursor;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::warn;

/// Outcome of a transcode attempt.
///
/// `Fallback` is an intentional recovery, not a swallowed error: it carries
/// the decode failure reason so the distinction stays observable and
/// testable.
#[derive(Debug)]
pub enum TranscodeOutcome {
    /// Upload decoded successfully; WAV bytes ready for transcription
    Converted(Vec<u8>),
    /// Upload could not be decoded; submit the original bytes unchanged
    Fallback {
        /// Why decoding failed
        reason: String,
    },
}

impl TranscodeOutcome {
    /// True when the upload was converted
    pub fn is_converted(&self) -> bool {
        matches!(self, Self::Converted(_))
    }
}

/// Transcode uploaded audio to mono 16-bit PCM WAV at the source sample rate.
pub fn transcode_to_wav(data: &[u8]) -> TranscodeOutcome {
    match decode_to_mono_f32(data) {
        Ok((samples, sample_rate)) => match encode_wav(&samples, sample_rate) {
            Ok(wav) => TranscodeOutcome::Converted(wav),
            Err(reason) => TranscodeOutcome::Fallback { reason },
        },
        Err(reason) => TranscodeOutcome::Fallback { reason },
    }
}

/// Decode any supported container to interleaved mono f32 samples.
fn decode_to_mono_f32(data: &[u8]) -> Result<(Vec<f32>, u32), String> {
    let cursor = Cursor::new(data.to_vec());
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

    let hint = Hint::new();
    let format_opts = FormatOptions::default();
    let metadata_opts = MetadataOptions::default();
    let decoder_opts = DecoderOptions::default();

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &format_opts, &metadata_opts)
        .map_err(|e| format!("probe: {}", e))?;

    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| "no audio track found".to_string())?;

    let track_id = track.id;
    let codec_params = track.codec_params.clone();
    let sample_rate = codec_params
        .sample_rate
        .ok_or_else(|| "unknown sample rate".to_string())?;
    let channels = codec_params.channels.map(|c| c.count()).unwrap_or(1);

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &decoder_opts)
        .map_err(|e| format!("codec: {}", e))?;

    let mut all_samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(format!("packet: {}", e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(symphonia::core::errors::Error::DecodeError(e)) => {
                warn!(error = %e, "Skipping corrupt audio frame");
                continue;
            }
            Err(e) => return Err(format!("decode: {}", e)),
        };

        let spec = *decoded.spec();
        let num_frames = decoded.frames();
        if num_frames == 0 {
            continue;
        }

        let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);
        let samples = sample_buf.samples();

        // Downmix to mono if multi-channel
        if channels > 1 {
            for frame in samples.chunks(channels) {
                let mono: f32 = frame.iter().sum::<f32>() / channels as f32;
                all_samples.push(mono);
            }
        } else {
            all_samples.extend_from_slice(samples);
        }
    }

    if all_samples.is_empty() {
        return Err("no audio samples decoded".to_string());
    }

    Ok((all_samples, sample_rate))
}

/// Encode mono f32 samples as a 16-bit PCM WAV in memory.
fn encode_wav(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>, String> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .map_err(|e| format!("wav writer: {}", e))?;
        for &sample in samples {
            let clamped = sample.clamp(-1.0, 1.0);
            writer
                .write_sample((clamped * i16::MAX as f32) as i16)
                .map_err(|e| format!("wav write: {}", e))?;
        }
        writer.finalize().map_err(|e| format!("wav finalize: {}", e))?;
    }

    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a small valid WAV so the round trip exercises a real decode.
    fn sine_wav(sample_rate: u32, channels: u16, frames: usize) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for i in 0..frames {
            let t = i as f32 / sample_rate as f32;
            let v = ((t * 440.0 * 2.0 * std::f32::consts::PI).sin() * 8000.0) as i16;
            for _ in 0..channels {
                writer.write_sample(v).unwrap();
            }
        }
        writer.finalize().unwrap();
        cursor.into_inner()
    }

    #[test]
    fn test_transcode_valid_wav() {
        let input = sine_wav(22_050, 1, 2205);
        let outcome = transcode_to_wav(&input);
        match outcome {
            TranscodeOutcome::Converted(wav) => {
                let reader = hound::WavReader::new(Cursor::new(wav)).unwrap();
                let spec = reader.spec();
                assert_eq!(spec.channels, 1);
                assert_eq!(spec.sample_rate, 22_050);
                assert_eq!(spec.bits_per_sample, 16);
            }
            TranscodeOutcome::Fallback { reason } => panic!("unexpected fallback: {}", reason),
        }
    }

    #[test]
    fn test_transcode_downmixes_stereo() {
        let input = sine_wav(16_000, 2, 1600);
        let outcome = transcode_to_wav(&input);
        match outcome {
            TranscodeOutcome::Converted(wav) => {
                let reader = hound::WavReader::new(Cursor::new(wav)).unwrap();
                assert_eq!(reader.spec().channels, 1);
                assert_eq!(reader.len() as usize, 1600);
            }
            TranscodeOutcome::Fallback { reason } => panic!("unexpected fallback: {}", reason),
        }
    }

    #[test]
    fn test_transcode_garbage_falls_back() {
        let outcome = transcode_to_wav(b"definitely not audio");
        match outcome {
            TranscodeOutcome::Fallback { reason } => assert!(!reason.is_empty()),
            TranscodeOutcome::Converted(_) => panic!("garbage bytes should not decode"),
        }
    }

    #[test]
    fn test_transcode_empty_input_falls_back() {
        assert!(!transcode_to_wav(&[]).is_converted());
    }
}
