mod allpass;
mod biquad;
mod delay;
mod reverb;

pub use allpass::bench_allpass;
pub use biquad::bench_biquad;
pub use delay::bench_delay;
pub use reverb::bench_reverb;
