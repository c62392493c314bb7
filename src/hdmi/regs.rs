//! Register offsets within the HDMI window and the display-top block.
//!
//! The HDMI window holds five sub-blocks: control, link (core), SPDIF receiver, I2S
//! receiver and the PHY. All registers are 32 bits wide; byte-sized fields sit in bits 7:0.

// ------------------ Control ------------------

pub const INTC_CON_0: usize = 0x0000;
pub const   INTC_EN_GLOBAL: u32 = 1 << 6;
pub const   INTC_EN_HPD_PLUG: u32 = 1 << 3;
pub const   INTC_EN_HPD_UNPLUG: u32 = 1 << 2;
pub const PHY_STATUS_0: usize = 0x0020;
pub const   PHY_STATUS_READY: u32 = 1 << 0;

// ------------------ Link ------------------

const LINK: usize = 0x1_0000;

pub const HDMI_CON_0: usize = LINK + 0x000;
pub const   CON0_SYSTEM_EN: u32 = 1 << 0;
pub const   ASP_ENABLE: u32 = 1 << 2;
pub const   CON0_ENC_NORMAL_ORDER: u32 = 1 << 4;
pub const   CON0_BLUE_SCREEN_EN: u32 = 1 << 5;
pub const HDMI_CON_1: usize = LINK + 0x004;
pub const HDMI_CON_2: usize = LINK + 0x008;
pub const   VID_PREAMBLE_EN: u32 = 0 << 5;
pub const   VID_PREAMBLE_DIS: u32 = 1 << 5;
pub const   GUARD_BAND_EN: u32 = 0 << 1;
pub const   GUARD_BAND_DIS: u32 = 1 << 1;
pub const STATUS_EN: usize = LINK + 0x020;
pub const HPD: usize = LINK + 0x030;
pub const MODE_SEL: usize = LINK + 0x040;
pub const   MODE_DVI_EN: u32 = 1 << 0;
pub const   MODE_HDMI_EN: u32 = 1 << 1;
pub const   MODE_MASK: u32 = 0x3;

pub const BLUE_SCREEN_B_0: usize = LINK + 0x050;
pub const BLUE_SCREEN_B_1: usize = LINK + 0x054;
pub const BLUE_SCREEN_G_0: usize = LINK + 0x058;
pub const BLUE_SCREEN_G_1: usize = LINK + 0x05C;
pub const BLUE_SCREEN_R_0: usize = LINK + 0x060;
pub const BLUE_SCREEN_R_1: usize = LINK + 0x064;

// 16-bit timing values are split into a low register and a high register 4 bytes above it.
pub const H_BLANK: usize = LINK + 0x0A0;
pub const V2_BLANK: usize = LINK + 0x0B0;
pub const V1_BLANK: usize = LINK + 0x0B8;
pub const V_LINE: usize = LINK + 0x0C0;
pub const H_LINE: usize = LINK + 0x0C8;
pub const HSYNC_POL: usize = LINK + 0x0E0;
pub const VSYNC_POL: usize = LINK + 0x0E4;
pub const INT_PRO_MODE: usize = LINK + 0x0E8;

pub const H_SYNC_START: usize = LINK + 0x170;
pub const H_SYNC_END: usize = LINK + 0x178;
pub const V_SYNC_LINE_BEF_2: usize = LINK + 0x180;
pub const V_SYNC_LINE_BEF_1: usize = LINK + 0x188;
/// `V_SYNC_LINE_AFT_1..6`, one low/high pair every 8 bytes.
pub const V_SYNC_LINE_AFT: usize = LINK + 0x190;
pub const V_SYNC_LINE_AFT_PXL: usize = LINK + 0x1C0;
pub const VACT_SPACE: usize = LINK + 0x1F0;
pub const FIELD_PAIRS: usize = 6;

pub const CSC_MUX: usize = LINK + 0x230;
pub const SYNC_GEN_MUX: usize = LINK + 0x234;
pub const SEND_START_0: usize = LINK + 0x240;
pub const SEND_START_1: usize = LINK + 0x244;
pub const SEND_END_0: usize = LINK + 0x248;
pub const SEND_END_1: usize = LINK + 0x24C;
pub const SEND_END_2: usize = LINK + 0x250;
pub const DC_CONTROL: usize = LINK + 0x260;
pub const VIDEO_PATTERN_GEN: usize = LINK + 0x264;

pub const ACR_CON: usize = LINK + 0x400;
pub const   ACR_TX_MODE_NO_TX: u32 = 0;
pub const   ACR_TX_MODE_MEASURED_CTS: u32 = 4;
pub const ACR_N0: usize = LINK + 0x430;
pub const ACR_N1: usize = LINK + 0x434;
pub const ACR_N2: usize = LINK + 0x438;

pub const GCP_CON: usize = LINK + 0x500;

// Infoframe packets. CON selects the transmit mode; bytes follow the header.
pub const CON_DO_NOT_TRANSMIT: u32 = 0;
pub const CON_EVERY_VSYNC: u32 = 1 << 1;

pub const AVI_CON: usize = LINK + 0x700;
pub const AVI_HEADER: usize = LINK + 0x710;
pub const AVI_CHECK_SUM: usize = LINK + 0x71C;
pub const AVI_BYTE: usize = LINK + 0x720;

pub const AUI_CON: usize = LINK + 0x800;
pub const AUI_HEADER: usize = LINK + 0x810;
pub const AUI_CHECK_SUM: usize = LINK + 0x81C;
pub const AUI_BYTE: usize = LINK + 0x820;

pub const VSI_CON: usize = LINK + 0xA00;
pub const VSI_HEADER: usize = LINK + 0xA10;
/// DATA00 carries the checksum, DATA01.. the payload.
pub const VSI_DATA: usize = LINK + 0xA20;

// ------------------ SPDIF receiver ------------------

const SPDIF: usize = 0x3_0000;

pub const SPDIFIN_CLK_CTRL: usize = SPDIF + 0x000;
pub const   SPDIFIN_CLK_ON: u32 = 1 << 0;
pub const SPDIFIN_OP_CTRL: usize = SPDIF + 0x004;
pub const   SPDIFIN_STATUS_CHECK_MODE: u32 = 2;
pub const   SPDIFIN_STATUS_CHECK_MODE_HDMI: u32 = 3;
pub const SPDIFIN_CONFIG_1: usize = SPDIF + 0x010;
pub const   SPDIFIN_CFG_NOISE_FILTER_2_SAMPLE: u32 = 1 << 6;
pub const   SPDIFIN_CFG_PCPD_MANUAL: u32 = 1 << 4;
pub const   SPDIFIN_CFG_WORD_LENGTH_MANUAL: u32 = 1 << 3;
pub const   SPDIFIN_CFG_UVCP_REPORT: u32 = 1 << 2;
pub const   SPDIFIN_CFG_HDMI_2_BURST: u32 = 1 << 1;
pub const   SPDIFIN_CFG_DATA_ALIGN_32: u32 = 1 << 0;
pub const SPDIFIN_CONFIG_2: usize = SPDIF + 0x014;
pub const SPDIFIN_USER_VALUE_1: usize = SPDIF + 0x020;
pub const   SPDIFIN_USER_VAL_WORD_LENGTH_24: u32 = 0xB;
pub const SPDIFIN_USER_VALUE_2: usize = SPDIF + 0x024;
pub const SPDIFIN_USER_VALUE_3: usize = SPDIF + 0x028;
pub const SPDIFIN_USER_VALUE_4: usize = SPDIF + 0x02C;

// ------------------ I2S receiver ------------------

const I2S: usize = 0x4_0000;

pub const I2S_CLK_CON: usize = I2S + 0x000;
pub const   I2S_CLK_ENABLE: u32 = 1 << 0;
pub const I2S_MUX_CON: usize = I2S + 0x048;
pub const   I2S_IN_ENABLE: u32 = 1 << 4;
pub const   I2S_AUD_SPDIF: u32 = 0 << 2;
pub const   I2S_MUX_ENABLE: u32 = 1 << 0;
pub const I2S_MUX_CH: usize = I2S + 0x04C;
pub const   I2S_CH_ALL_EN: u32 = 0xFF;
pub const I2S_MUX_CUV: usize = I2S + 0x050;
pub const   I2S_CUV_RL_EN: u32 = 0x03;

// ------------------ PHY ------------------

const PHY: usize = 0x5_0000;

pub const PHY_REG04: usize = PHY + 0x04;
pub const PHY_REG24: usize = PHY + 0x24;
pub const PHY_REG7C: usize = PHY + 0x7C;
pub const   PHY_MODE_SET_DONE: u32 = 1 << 7;
pub const   PHY_REG24_INIT: u32 = 1 << 7;

// ------------------ Display top ------------------

pub const DISPTOP_HDMIMUX: usize = 0x10;
pub const   HDMIMUX_ENABLE: u32 = 1 << 31;
pub const   HDMIMUX_SEL_MASK: u32 = 0x3;
pub const DISPTOP_HDMI_SYNC_CTRL0: usize = 0x140;
/// hactive end in 31:16, start in 15:0
pub const DISPTOP_HDMI_SYNC_CTRL1: usize = 0x144;
/// vsync hs end in 31:16, start in 15:0
pub const DISPTOP_HDMI_SYNC_CTRL2: usize = 0x148;
