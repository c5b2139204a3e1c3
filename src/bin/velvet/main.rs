//! velvet - reverb demo
//!
//! Renders a repeating pluck through the hall preset to the default audio
//! device. Run with: cargo run

use std::f32::consts::TAU;
use std::time::Duration;

use color_eyre::eyre::eyre;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SampleFormat;

use velvet_dsp::{EffectNode, RenderCtx, ReverbNode};

/// A 220 Hz damped sine, retriggered once per second.
fn pluck(n: usize, sample_rate: f32) -> f32 {
    let period = sample_rate as usize;
    let t = (n % period.max(1)) as f32 / sample_rate;
    (TAU * 220.0 * t).sin() * (-t * 8.0).exp() * 0.6
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device"))?;
    let supported = device.default_output_config()?;
    if supported.sample_format() != SampleFormat::F32 {
        return Err(eyre!(
            "demo supports f32 output only, device offers {:?}",
            supported.sample_format()
        ));
    }
    let config: cpal::StreamConfig = supported.into();
    let sample_rate = config.sample_rate.0 as f32;
    let channels = config.channels as usize;

    let mut reverb = ReverbNode::hall(0.35);
    let ctx = RenderCtx::new(sample_rate);
    let mut mono = vec![0.0_f32; 4096];
    let mut clock = 0_usize;

    let stream = device.build_output_stream(
        &config,
        move |data: &mut [f32], _| {
            for block in data.chunks_mut(channels * mono.len()) {
                let frames = block.len() / channels;
                for (i, slot) in mono[..frames].iter_mut().enumerate() {
                    *slot = pluck(clock + i, sample_rate);
                }
                clock += frames;
                reverb.render_block(&mut mono[..frames], &ctx);
                for (frame, &sample) in block.chunks_mut(channels).zip(&mono[..frames]) {
                    frame.fill(sample);
                }
            }
        },
        |err| eprintln!("stream error: {err}"),
        None,
    )?;
    stream.play()?;

    println!("playing plucks through the hall preset at {sample_rate} Hz, ctrl-c to stop");
    std::thread::sleep(Duration::from_secs(12));
    Ok(())
}
