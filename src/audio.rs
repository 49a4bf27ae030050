// ---------------- Native audio (cpal) ----------------
//
// The voice is moved into the device callback; the game thread only talks
// to it through the OscillatorBank handle.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use shortwave_core::{OscillatorBank, OscillatorConfig, OscillatorVoice};

pub struct AudioOutput {
    pub bank: OscillatorBank,
    // dropping the stream silences the device
    _stream: cpal::Stream,
}

/// Open the default output device and start the feedback voice on it.
/// Returns `None` (after logging why) when no usable device exists; the game
/// then runs silently.
pub fn start_feedback_audio(config: OscillatorConfig) -> Option<AudioOutput> {
    match try_start(config) {
        Ok(output) => Some(output),
        Err(err) => {
            log::warn!("[audio] feedback tone disabled: {err:#}");
            None
        }
    }
}

fn try_start(config: OscillatorConfig) -> anyhow::Result<AudioOutput> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow::anyhow!("no default output device"))?;
    let supported = device.default_output_config()?;
    let sample_rate = supported.sample_rate().0;
    let channels = supported.channels() as usize;

    let (bank, voice) = OscillatorBank::new(config, sample_rate)?;

    let err_fn = |err| log::error!("[audio] stream error: {err}");
    let stream_config: cpal::StreamConfig = supported.config();

    let stream = match supported.sample_format() {
        cpal::SampleFormat::F32 => {
            build_stream_f32(&device, &stream_config, channels, voice, err_fn)?
        }
        cpal::SampleFormat::I16 => {
            build_stream_i16(&device, &stream_config, channels, voice, err_fn)?
        }
        cpal::SampleFormat::U16 => {
            build_stream_u16(&device, &stream_config, channels, voice, err_fn)?
        }
        other => anyhow::bail!("unsupported sample format {other:?}"),
    };
    stream.play()?;

    log::info!(
        "[audio] output started: {sample_rate} Hz, {channels} channel(s), {:?}",
        supported.sample_format()
    );
    Ok(AudioOutput {
        bank,
        _stream: stream,
    })
}

fn build_stream_f32(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    mut voice: OscillatorVoice,
    err_fn: impl FnMut(cpal::StreamError) + Send + 'static,
) -> Result<cpal::Stream, cpal::BuildStreamError> {
    device.build_output_stream(
        config,
        move |data: &mut [f32], _| voice.fill(data, channels, |s| s),
        err_fn,
        None,
    )
}

fn build_stream_i16(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    mut voice: OscillatorVoice,
    err_fn: impl FnMut(cpal::StreamError) + Send + 'static,
) -> Result<cpal::Stream, cpal::BuildStreamError> {
    device.build_output_stream(
        config,
        move |data: &mut [i16], _| {
            voice.fill(data, channels, |s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
        },
        err_fn,
        None,
    )
}

fn build_stream_u16(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    mut voice: OscillatorVoice,
    err_fn: impl FnMut(cpal::StreamError) + Send + 'static,
) -> Result<cpal::Stream, cpal::BuildStreamError> {
    device.build_output_stream(
        config,
        move |data: &mut [u16], _| {
            voice.fill(data, channels, |s| {
                ((s.clamp(-1.0, 1.0) * 0.5 + 0.5) * u16::MAX as f32) as u16
            })
        },
        err_fn,
        None,
    )
}
