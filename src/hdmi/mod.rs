//! s5pxx18 HDMI transmitter: PHY, link timing, infoframes and audio.

pub mod infoframe;
pub mod presets;
pub mod regs;
pub mod types;

mod device;

pub use device::{DisplayController, Hdmi};
pub use infoframe::{AcrParams, Infoframe};
pub use presets::{CtrlInfo, Preset, SyncTiming};
pub use types::*;
