use std::io::Cursor;
use std::path::Path;

use crate::application::ports::SegmenterError;

/// Read a mono 16-bit PCM WAV file into raw samples plus its sample rate.
pub fn read_mono_wav(path: &Path) -> Result<(Vec<i16>, u32), SegmenterError> {
    let reader = hound::WavReader::open(path)
        .map_err(|e| SegmenterError::Decode(format!("open: {}", e)))?;
    let spec = reader.spec();

    if spec.channels != 1 {
        return Err(SegmenterError::Decode(format!(
            "expected mono audio, got {} channels",
            spec.channels
        )));
    }
    if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(SegmenterError::Decode(format!(
            "expected 16-bit PCM, got {}-bit {:?}",
            spec.bits_per_sample, spec.sample_format
        )));
    }

    let samples = reader
        .into_samples::<i16>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| SegmenterError::Decode(format!("samples: {}", e)))?;

    Ok((samples, spec.sample_rate))
}

/// Encode raw mono samples as a WAV byte buffer, ready for upload.
pub fn encode_mono_wav(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>, hound::Error> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for &sample in samples {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}
