//! Configuration value types.
//!
//! Each type mirrors one settings group from the original system
//! (`audio`, `duration`, `file`, `silence`, `logging`), is `Deserialize`
//! so a host can bind it from whatever source it likes, and carries a
//! `Default` matching the documented defaults. Loading these from the
//! environment or `.env` files is a separate, outer concern — see
//! [`env`] — gated behind the `env-config` feature; the core strategy
//! types only ever accept already-constructed config values.

mod audio;
mod duration;
mod file;
mod logging;
mod silence;

pub use audio::AudioConfig;
pub use duration::DurationConfig;
pub use file::{FileConfig, FileType};
pub use logging::{LogFormat, LogLevel, LoggingConfig};
pub use silence::SilenceConfig;

#[cfg(feature = "env-config")]
pub mod env;
