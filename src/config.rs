//! Compile-time knobs for the drone_ref board.
//! Edit these constants and rebuild.

// ------------------ Memory ------------------

/// Physical DRAM fitted on the board.
pub const SYS_MEM_SIZE: u64 = 0x4000_0000;
/// Top-of-memory carve-out kept away from the bootloader (33 MiB).
pub const SYS_RESERVE_MEM_SIZE: u64 = 0x0210_0000;
pub const SYS_SDRAM_BASE: u64 = 0x4000_0000;
pub const SYS_SDRAM_SIZE: u64 = SYS_MEM_SIZE - SYS_RESERVE_MEM_SIZE;
/// ATAG/boot parameter block, relative to the SDRAM base.
pub const BOOT_PARAMS_OFFSET: u64 = 0x100;

// ------------------ Recovery ------------------

pub const ALIVE_BASE: usize = 0xC001_0800;
/// ALIVE scratch 1, read side (0xC00108B4).
pub const ALIVE_SCRATCH1_READ_OFFSET: usize = 0xB4;
/// ALIVE scratch 1, reset side (0xC00108AC). Writing ones clears the read side.
pub const ALIVE_SCRATCH1_RESET_OFFSET: usize = 0xAC;
/// "RESC" left behind by the OS when it asks for a recovery boot.
pub const RECOVERY_SIGNATURE: u32 = 0x5245_5343;
pub const RECOVERY_BOOTCMD: &str = "run recoveryboot";

// ------------------ Splash ------------------

pub const SPLASH_MMC_DEVPART: &str = "0:1";
pub const SPLASH_MMC_OFFSET: u32 = 0x002e_4200;

// ------------------ AXP228 ------------------

/// Charge current used when only VBUS (no adapter) is present, in µA.
pub const CHARGE_CURRENT_NO_ADAPTER_UA: u32 = 500_000;
/// How long to wait for a USB host to enumerate us before treating VBUS as a dumb adapter.
pub const USB_HOST_CHECK_TIMEOUT_MS: u32 = 500;
pub const VBATT_SAMPLES: u32 = 5;
pub const VBATT_SAMPLE_INTERVAL_MS: u32 = 1;

// ------------------ HDMI ------------------

pub const HDMI_PHY_READY_POLLS: u32 = 500;
pub const HDMI_PHY_READY_INTERVAL_MS: u32 = 10;

pub const HDMI_AUDIO_SAMPLE_RATE: u32 = 48_000;
pub const HDMI_AUDIO_BITS_PER_SAMPLE: u32 = 16;

/// Drive the link's internal pattern generator instead of the display controller output.
pub const HDMI_PATTERN: bool = cfg!(feature = "hdmi-pattern");
