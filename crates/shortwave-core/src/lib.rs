pub mod config;
pub mod console;
pub mod constants;
pub mod error;
pub mod levels;
pub mod noise;
pub mod oscillator;
pub mod param;
pub mod sampler;
pub mod scoring;
pub mod session;
pub mod timer;
pub mod wave;

pub use config::*;
pub use console::ConsoleText;
pub use constants::*;
pub use error::ConfigError;
pub use levels::*;
pub use oscillator::*;
pub use sampler::*;
pub use scoring::*;
pub use session::*;
pub use wave::*;
