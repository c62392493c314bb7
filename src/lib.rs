//! Board support for the Nexell s5p4418/s5p6818 `drone_ref` board.
//!
//! * [`axp228`]: X-Powers AXP228 PMIC, voltage rails and battery charger over I²C.
//! * [`hdmi`]: HDMI PHY, link timing, infoframe and audio clock bring-up.
//! * [`board`]: boot-time entry points (GPIO, DRAM, splash, recovery, power).
#![cfg_attr(not(test), no_std)]

// must come first so the logging macros are visible to every module
#[macro_use]
mod fmt;

pub mod config;
pub mod fdt;
pub mod mmio;

pub mod axp228;
pub mod hdmi;

pub mod board;

#[cfg(test)]
mod testutil;
