//! Supported output modes: sync timing, PHY coefficients and controller parameters.

use super::types::{HdmiError, OutputFormat, Resolution};

const PHY_74_25: [u8; 32] = [
    0xd1, 0x1f, 0x10, 0x40, 0x40, 0xf8, 0xc8, 0x81,
    0xe8, 0xba, 0xd8, 0x45, 0xa0, 0xac, 0x80, 0x08,
    0x80, 0x09, 0x84, 0x05, 0x22, 0x24, 0x86, 0x54,
    0xa5, 0x24, 0x01, 0x00, 0x00, 0x01, 0x80, 0x10,
];

const PHY_83_5: [u8; 32] = [
    0xd1, 0x23, 0x11, 0x40, 0x0c, 0xfb, 0xc8, 0x85,
    0xe8, 0xd1, 0xd8, 0x45, 0xa0, 0xac, 0x80, 0x08,
    0x80, 0x09, 0x84, 0x05, 0x22, 0x24, 0x86, 0x54,
    0x93, 0x24, 0x01, 0x00, 0x00, 0x01, 0x80, 0x10,
];

const PHY_148_5: [u8; 32] = [
    0xd1, 0x1f, 0x00, 0x40, 0x40, 0xf8, 0xc8, 0x81,
    0xe8, 0xba, 0xd8, 0x45, 0xa0, 0xac, 0x80, 0x08,
    0x80, 0x09, 0x84, 0x05, 0x22, 0x24, 0x86, 0x54,
    0x4b, 0x25, 0x03, 0x00, 0x00, 0x01, 0x80, 0x10,
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Preset {
    /// 1280x720p60
    Hd720 = 0,
    /// 1920x1080p60
    Fhd1080 = 1,
    /// 1920x720p60
    Wide1920x720 = 2,
}

impl Preset {
    pub fn from_index(i: u8) -> Result<Self, HdmiError> {
        match i {
            0 => Ok(Preset::Hd720),
            1 => Ok(Preset::Fhd1080),
            2 => Ok(Preset::Wide1920x720),
            other => Err(HdmiError::UnsupportedPreset(other)),
        }
    }

    pub fn timing(self) -> SyncTiming {
        match self {
            Preset::Hd720 => SyncTiming {
                pixel_clock_hz: 74_250_000,
                h_active: 1280,
                h_sync_width: 40,
                h_back_porch: 220,
                h_front_porch: 110,
                h_sync_invert: false,
                v_active: 720,
                v_sync_width: 5,
                v_back_porch: 20,
                v_front_porch: 5,
                v_sync_invert: false,
            },
            Preset::Fhd1080 => SyncTiming {
                pixel_clock_hz: 148_500_000,
                h_active: 1920,
                h_sync_width: 44,
                h_back_porch: 148,
                h_front_porch: 88,
                h_sync_invert: false,
                v_active: 1080,
                v_sync_width: 5,
                v_back_porch: 36,
                v_front_porch: 4,
                v_sync_invert: false,
            },
            Preset::Wide1920x720 => SyncTiming {
                pixel_clock_hz: 83_500_000,
                h_active: 1920,
                h_sync_width: 40,
                h_back_porch: 44,
                h_front_porch: 44,
                h_sync_invert: false,
                v_active: 720,
                v_sync_width: 2,
                v_back_porch: 4,
                v_front_porch: 4,
                v_sync_invert: false,
            },
        }
    }

    /// PHY coefficients written from REG04 upwards. The 148.5 MHz table stops one short.
    pub fn phy_table(self) -> &'static [u8] {
        match self {
            Preset::Hd720 => &PHY_74_25,
            Preset::Fhd1080 => &PHY_148_5[..31],
            Preset::Wide1920x720 => &PHY_83_5,
        }
    }

    /// CEA-861 video identification code, 0 when the mode has none.
    pub fn vic(self) -> u8 {
        match self {
            Preset::Hd720 => 4,
            Preset::Fhd1080 => 16,
            Preset::Wide1920x720 => 0,
        }
    }

    pub fn resolution(self) -> Resolution {
        let t = self.timing();
        Resolution { width: t.h_active, height: t.v_active }
    }

    pub fn ctrl_info(self) -> CtrlInfo {
        CtrlInfo::for_timing(&self.timing())
    }
}

/// Raw sync parameters. Everything the link and display-top registers need is derived.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncTiming {
    pub pixel_clock_hz: u32,
    pub h_active: u16,
    pub h_sync_width: u16,
    pub h_back_porch: u16,
    pub h_front_porch: u16,
    pub h_sync_invert: bool,
    pub v_active: u16,
    pub v_sync_width: u16,
    pub v_back_porch: u16,
    pub v_front_porch: u16,
    pub v_sync_invert: bool,
}

impl SyncTiming {
    pub fn h_blank(&self) -> u32 {
        u32::from(self.h_front_porch) + u32::from(self.h_sync_width) + u32::from(self.h_back_porch)
    }

    pub fn v_blank(&self) -> u32 {
        u32::from(self.v_front_porch) + u32::from(self.v_sync_width) + u32::from(self.v_back_porch)
    }

    pub fn v2_blank(&self) -> u32 { u32::from(self.v_active) + self.v_blank() }

    pub fn v_line(&self) -> u32 { u32::from(self.v_active) + self.v_blank() }

    pub fn h_line(&self) -> u32 { u32::from(self.h_active) + self.h_blank() }

    pub fn h_sync_start(&self) -> u32 { u32::from(self.h_front_porch) }

    pub fn h_sync_end(&self) -> u32 { u32::from(self.h_front_porch) + u32::from(self.h_sync_width) }

    pub fn v_sync_line_bef_1(&self) -> u32 { u32::from(self.v_front_porch) }

    pub fn v_sync_line_bef_2(&self) -> u32 { u32::from(self.v_front_porch) + u32::from(self.v_sync_width) }

    // display-top sync generator

    pub fn vsync_start(&self) -> u32 {
        u32::from(self.v_sync_width) + u32::from(self.v_back_porch) + u32::from(self.v_active) - 1
    }

    pub fn hactive_start(&self) -> u32 { u32::from(self.h_sync_width) + u32::from(self.h_back_porch) }

    pub fn hactive_end(&self) -> u32 { u32::from(self.h_active) + self.hactive_start() }

    pub fn vsync_hs_start(&self) -> u32 { self.hactive_start() + 1 }

    pub fn vsync_hs_end(&self) -> u32 { self.hactive_start() + 2 }

    /// The only mode that goes out with 4:3 aspect is 720x480 at 27 MHz (or 27.027 MHz).
    pub fn is_4_3(&self) -> bool {
        self.h_active == 720
            && self.v_active == 480
            && matches!(self.pixel_clock_hz, 27_000_000 | 27_027_000)
    }
}

pub const SYNC_DELAY_RGB_PVD: u8 = 1 << 0;
pub const SYNC_DELAY_HSYNC_CP1: u8 = 1 << 1;
pub const SYNC_DELAY_VSYNC_FRAM: u8 = 1 << 2;
pub const SYNC_DELAY_DE_CP: u8 = 1 << 3;

/// Display controller parameters for driving the HDMI link.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CtrlInfo {
    pub clk_src_lv0: u8,
    pub clk_div_lv0: u8,
    pub clk_src_lv1: u8,
    pub clk_div_lv1: u8,
    pub out_format: OutputFormat,
    pub delay_mask: u8,
    pub d_rgb_pvd: u8,
    pub d_hsync_cp1: u8,
    pub d_vsync_fram: u8,
    pub d_de_cp2: u8,
    pub vs_start_offset: u32,
    pub vs_end_offset: u32,
    pub ev_start_offset: u32,
    pub ev_end_offset: u32,
}

impl CtrlInfo {
    pub fn for_timing(t: &SyncTiming) -> Self {
        // last pixel of the line
        let offset = t.h_line() - 1;
        Self {
            clk_src_lv0: 4,
            clk_div_lv0: 1,
            clk_src_lv1: 7,
            clk_div_lv1: 1,
            out_format: OutputFormat::Rgb888,
            delay_mask: SYNC_DELAY_RGB_PVD | SYNC_DELAY_HSYNC_CP1 | SYNC_DELAY_VSYNC_FRAM | SYNC_DELAY_DE_CP,
            d_rgb_pvd: 0,
            d_hsync_cp1: 0,
            d_vsync_fram: 0,
            d_de_cp2: 7,
            vs_start_offset: offset,
            vs_end_offset: 0,
            ev_start_offset: offset,
            ev_end_offset: 0,
        }
    }
}
