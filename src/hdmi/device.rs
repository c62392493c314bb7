//! HDMI transmitter bring-up.
//!
//! Sequence, with the state reached after each step:
//! `phy_enable` (PhyConfigured), `release_resets` (ResetReleased), `wait_phy_ready`
//! (PhyReady), `prepare` (TimingPrepared), `set_infoframes` (InfoframesSet), `enable`
//! (Enabled). [`Hdmi::display`] runs all of it for one preset.

use embedded_hal::delay::DelayNs;

use crate::config;
use crate::mmio::RegisterBlock;

use super::infoframe::{AcrParams, Infoframe};
use super::presets::{CtrlInfo, Preset, SyncTiming};
use super::regs::*;
use super::types::*;

/// Display controller side of the pipeline, programmed between link setup and enable.
pub trait DisplayController {
    fn configure(&mut self, module: u8, screen: Resolution, sync: &SyncTiming, ctrl: &CtrlInfo);
}

pub struct Hdmi<R, T, C> {
    regs: R,
    top: T,
    rst: C,
    state: HdmiState,
    dvi: bool,
}

impl<R, T, C> Hdmi<R, T, C>
where
    R: RegisterBlock,
    T: RegisterBlock,
    C: ResetControl,
{
    /// `regs` is the HDMI window, `top` the display-top block.
    pub fn new(regs: R, top: T, rst: C) -> Self {
        Self { regs, top, rst, state: HdmiState::Uninitialized, dvi: false }
    }

    pub fn state(&self) -> HdmiState { self.state }

    pub fn release(self) -> (R, T, C) { (self.regs, self.top, self.rst) }

    fn require(&self, want: HdmiState) -> Result<(), HdmiError> {
        if self.state == want { Ok(()) } else { Err(HdmiError::InvalidState(self.state)) }
    }

    fn write_pair(&mut self, lo: usize, val: u32) {
        self.regs.write32(lo, val & 0xFF);
        self.regs.write32(lo + 4, (val >> 8) & 0xFF);
    }

    // PHY registers need every write issued twice to settle.
    fn phy_write(&mut self, offset: usize, val: u32) {
        self.regs.write32(offset, val);
        self.regs.write32(offset, val);
    }

    /// Pulse the PHY and core resets.
    pub fn init(&mut self) {
        self.rst.assert_reset(ResetId::HdmiPhy);
        self.rst.assert_reset(ResetId::Hdmi);
        self.rst.deassert_reset(ResetId::HdmiPhy);
        self.rst.deassert_reset(ResetId::Hdmi);
    }

    /// Load the PHY coefficients for `preset`.
    pub fn phy_enable(&mut self, preset: Preset) {
        self.phy_write(PHY_REG7C, 0);
        self.phy_write(PHY_REG04, 0);
        self.phy_write(PHY_REG24, PHY_REG24_INIT);
        for (i, b) in preset.phy_table().iter().enumerate() {
            self.phy_write(PHY_REG04 + 4 * i, u32::from(*b));
        }
        self.phy_write(PHY_REG7C, PHY_MODE_SET_DONE);
        self.phy_write(PHY_REG7C, PHY_MODE_SET_DONE);
        debug!("HDMI: phy configured for preset {}", preset as u8);
        self.state = HdmiState::PhyConfigured;
    }

    /// Take the PHY out of mode-set and forget all bring-up progress.
    pub fn disable(&mut self) {
        self.phy_write(PHY_REG7C, 0);
        self.state = HdmiState::Uninitialized;
    }

    /// Pulse the video, SPDIF and TMDS resets.
    pub fn release_resets(&mut self) -> Result<(), HdmiError> {
        self.require(HdmiState::PhyConfigured)?;
        for id in [ResetId::HdmiVideo, ResetId::HdmiSpdif, ResetId::HdmiTmds] {
            self.rst.assert_reset(id);
        }
        for id in [ResetId::HdmiVideo, ResetId::HdmiSpdif, ResetId::HdmiTmds] {
            self.rst.deassert_reset(id);
        }
        self.state = HdmiState::ResetReleased;
        Ok(())
    }

    /// Poll for PHY lock. On timeout the PHY is disabled.
    pub fn wait_phy_ready<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), HdmiError> {
        self.require(HdmiState::ResetReleased)?;
        for _ in 0..config::HDMI_PHY_READY_POLLS {
            if self.regs.read32(PHY_STATUS_0) & PHY_STATUS_READY != 0 {
                info!("HDMI: phy ready...");
                self.state = HdmiState::PhyReady;
                return Ok(());
            }
            delay.delay_ms(config::HDMI_PHY_READY_INTERVAL_MS);
        }
        error!("HDMI: failed to wait for hdmiphy ready");
        self.disable();
        Err(HdmiError::PhyNotReady)
    }

    /// Route `source` into the HDMI link.
    pub fn select_source(&mut self, source: Source) {
        self.top.write32(DISPTOP_HDMIMUX, HDMIMUX_ENABLE | (source as u32 & HDMIMUX_SEL_MASK));
    }

    fn set_display_sync(&mut self, vsync_start: u32, hactive: (u32, u32), vsync_hs: (u32, u32)) {
        self.top.write32(DISPTOP_HDMI_SYNC_CTRL0, vsync_start);
        self.top.write32(DISPTOP_HDMI_SYNC_CTRL1, (hactive.1 << 16) | (hactive.0 & 0xFFFF));
        self.top.write32(DISPTOP_HDMI_SYNC_CTRL2, (vsync_hs.1 << 16) | (vsync_hs.0 & 0xFFFF));
    }

    /// Program the link timing registers.
    pub fn prepare(&mut self, t: &SyncTiming) -> Result<(), HdmiError> {
        if !matches!(self.state, HdmiState::PhyReady | HdmiState::TimingPrepared) {
            return Err(HdmiError::InvalidState(self.state));
        }

        // no blue screen, encoding order as is
        self.regs.write32(HDMI_CON_0, CON0_ENC_NORMAL_ORDER);
        for reg in [BLUE_SCREEN_R_0, BLUE_SCREEN_R_1, BLUE_SCREEN_G_0, BLUE_SCREEN_G_1, BLUE_SCREEN_B_0, BLUE_SCREEN_B_1] {
            self.regs.write32(reg, 0x5555);
        }
        self.regs.write32(HDMI_CON_1, 0);
        self.regs.write32(HDMI_CON_2, 0);
        self.regs.write32(INTC_CON_0, INTC_EN_GLOBAL | INTC_EN_HPD_PLUG | INTC_EN_HPD_UNPLUG);
        self.regs.write32(STATUS_EN, 0x17);
        self.regs.write32(HPD, 0);
        self.regs.write32(MODE_SEL, MODE_HDMI_EN);

        self.write_pair(H_BLANK, t.h_blank());
        self.write_pair(V1_BLANK, t.v_blank());
        self.write_pair(V2_BLANK, t.v2_blank());
        self.write_pair(V_LINE, t.v_line());
        self.write_pair(H_LINE, t.h_line());

        let pol = u32::from(t.h_active == 1280);
        self.regs.write32(HSYNC_POL, pol);
        self.regs.write32(VSYNC_POL, pol);
        self.regs.write32(INT_PRO_MODE, 0);

        // low bytes are programmed two pixels early
        let start = t.h_sync_start();
        let end = t.h_sync_end();
        self.regs.write32(H_SYNC_START, (start & 0xFF).wrapping_sub(2));
        self.regs.write32(H_SYNC_START + 4, start >> 8);
        self.regs.write32(H_SYNC_END, (end & 0xFF).wrapping_sub(2));
        self.regs.write32(H_SYNC_END + 4, end >> 8);
        self.write_pair(V_SYNC_LINE_BEF_1, t.v_sync_line_bef_1());
        self.write_pair(V_SYNC_LINE_BEF_2, t.v_sync_line_bef_2());

        for base in [V_SYNC_LINE_AFT, V_SYNC_LINE_AFT_PXL, VACT_SPACE] {
            for i in 0..FIELD_PAIRS {
                self.write_pair(base + 8 * i, 0xFFFF);
            }
        }

        self.regs.write32(CSC_MUX, 0);
        self.regs.write32(SYNC_GEN_MUX, 0);
        self.regs.write32(SEND_START_0, 0xfd);
        self.regs.write32(SEND_START_1, 0x01);
        self.regs.write32(SEND_END_0, 0x0d);
        self.regs.write32(SEND_END_1, 0x3a);
        self.regs.write32(SEND_END_2, 0x08);
        self.regs.write32(DC_CONTROL, 0);
        self.regs.write32(VIDEO_PATTERN_GEN, u32::from(config::HDMI_PATTERN));
        self.regs.write32(GCP_CON, 0x0a);

        self.state = HdmiState::TimingPrepared;
        Ok(())
    }

    fn write_frame(&mut self, frame: &Infoframe, header: usize, payload: usize, csum: usize) {
        for (i, b) in frame.header.iter().enumerate() {
            self.regs.write32(header + 4 * i, u32::from(*b));
        }
        for (i, b) in frame.payload().iter().enumerate() {
            self.regs.write32(payload + 4 * i, u32::from(*b));
        }
        self.regs.write32(csum, u32::from(frame.checksum()));
    }

    /// Load the vendor, AVI and audio infoframes. In DVI mode all three are switched off.
    pub fn set_infoframes(&mut self, vic: u8, timing: &SyncTiming, format: VideoFormat) -> Result<(), HdmiError> {
        self.require(HdmiState::TimingPrepared)?;

        if self.dvi {
            self.regs.write32(VSI_CON, CON_DO_NOT_TRANSMIT);
            self.regs.write32(AVI_CON, CON_DO_NOT_TRANSMIT);
            self.regs.write32(AUI_CON, CON_DO_NOT_TRANSMIT);
            self.state = HdmiState::InfoframesSet;
            return Ok(());
        }

        match Infoframe::vendor(format) {
            Some(vsi) => {
                self.regs.write32(VSI_CON, CON_EVERY_VSYNC);
                self.write_frame(&vsi, VSI_HEADER, VSI_DATA + 4, VSI_DATA);
                debug!("HDMI: VSI checksum = 0x{:02x}", vsi.checksum());
            }
            None => self.regs.write32(VSI_CON, CON_DO_NOT_TRANSMIT),
        }

        let avi = Infoframe::avi(vic, timing);
        self.regs.write32(AVI_CON, CON_EVERY_VSYNC);
        self.write_frame(&avi, AVI_HEADER, AVI_BYTE, AVI_CHECK_SUM);
        debug!("HDMI: AVI checksum = 0x{:02x}", avi.checksum());

        let aui = Infoframe::audio();
        self.regs.write32(AUI_CON, CON_EVERY_VSYNC);
        self.write_frame(&aui, AUI_HEADER, AUI_BYTE, AUI_CHECK_SUM);
        debug!("HDMI: AUI checksum = 0x{:02x}", aui.checksum());

        self.state = HdmiState::InfoframesSet;
        Ok(())
    }

    /// Audio clock regeneration. DVI sinks get no ACR packets.
    pub fn set_acr(&mut self, sample_rate: u32) {
        if self.dvi {
            self.regs.write32(ACR_CON, ACR_TX_MODE_NO_TX);
            return;
        }
        let acr = AcrParams::for_rate(sample_rate);
        if acr.n == 0 {
            warn!("HDMI: no ACR parameters for {} Hz", sample_rate);
        }
        let [n0, n1, n2] = acr.n_bytes();
        self.regs.write32(ACR_N0, u32::from(n0));
        self.regs.write32(ACR_N1, u32::from(n1));
        self.regs.write32(ACR_N2, u32::from(n2));
        self.regs.write32(ACR_CON, ACR_TX_MODE_MEASURED_CTS);
    }

    /// Configure the SPDIF receiver and route it into the audio sample path.
    pub fn spdif_init(&mut self, codec: AudioCodec, bits_per_sample: u32) {
        self.regs.write32(I2S_CLK_CON, I2S_CLK_ENABLE);
        self.regs.write32(
            SPDIFIN_CONFIG_1,
            SPDIFIN_CFG_NOISE_FILTER_2_SAMPLE
                | SPDIFIN_CFG_PCPD_MANUAL
                | SPDIFIN_CFG_WORD_LENGTH_MANUAL
                | SPDIFIN_CFG_UVCP_REPORT
                | SPDIFIN_CFG_HDMI_2_BURST
                | SPDIFIN_CFG_DATA_ALIGN_32,
        );
        self.regs.write32(SPDIFIN_CONFIG_2, 0);

        let bps = if codec == AudioCodec::Pcm { bits_per_sample } else { 16 };
        let rep_time: u32 = if codec == AudioCodec::Ac3 { 1536 * 2 - 1 } else { 0 };
        trace!("HDMI: spdif {:?} {} bit, repetition {}", codec, bps, rep_time);
        self.regs.write32(SPDIFIN_USER_VALUE_1, ((rep_time & 0xF) << 4) | SPDIFIN_USER_VAL_WORD_LENGTH_24);
        self.regs.write32(SPDIFIN_USER_VALUE_2, (rep_time >> 4) & 0xFF);
        self.regs.write32(SPDIFIN_USER_VALUE_3, 0);
        self.regs.write32(SPDIFIN_USER_VALUE_4, 0);

        self.regs.write32(I2S_MUX_CON, I2S_IN_ENABLE | I2S_AUD_SPDIF | I2S_MUX_ENABLE);
        self.regs.write32(I2S_MUX_CH, I2S_CH_ALL_EN);
        self.regs.write32(I2S_MUX_CUV, I2S_CUV_RL_EN);

        self.regs.write_mask(SPDIFIN_CLK_CTRL, 0, SPDIFIN_CLK_ON);
        self.regs.write_mask(SPDIFIN_CLK_CTRL, !0, SPDIFIN_CLK_ON);
        self.regs.write32(SPDIFIN_OP_CTRL, SPDIFIN_STATUS_CHECK_MODE);
        self.regs.write32(SPDIFIN_OP_CTRL, SPDIFIN_STATUS_CHECK_MODE_HDMI);
    }

    /// Default audio path: 48 kHz 16-bit PCM over SPDIF.
    pub fn audio_init(&mut self) {
        self.set_acr(config::HDMI_AUDIO_SAMPLE_RATE);
        self.spdif_init(AudioCodec::Pcm, config::HDMI_AUDIO_BITS_PER_SAMPLE);
    }

    pub fn audio_enable(&mut self, on: bool) {
        self.regs.write_mask(HDMI_CON_0, if on { !0 } else { 0 }, ASP_ENABLE);
    }

    /// Select DVI or HDMI signalling. DVI drops video preambles and guard bands.
    pub fn set_dvi_mode(&mut self, dvi: bool) {
        self.dvi = dvi;
        self.regs.write_mask(MODE_SEL, if dvi { MODE_DVI_EN } else { MODE_HDMI_EN }, MODE_MASK);
        let con2 = if dvi {
            VID_PREAMBLE_DIS | GUARD_BAND_DIS
        } else {
            VID_PREAMBLE_EN | GUARD_BAND_EN
        };
        self.regs.write32(HDMI_CON_2, con2);
    }

    /// Load the PHY, release the link resets, wait for lock, pick the source and program
    /// the link timing.
    pub fn setup<D: DelayNs>(&mut self, source: Source, preset: Preset, delay: &mut D) -> Result<(), HdmiError> {
        self.phy_enable(preset);
        self.release_resets()?;
        self.wait_phy_ready(delay)?;
        self.select_source(source);
        // sync generator must start from zero before timing is set up
        self.set_display_sync(0, (0, 0), (0, 0));
        self.prepare(&preset.timing())
    }

    /// Infoframes, audio, HDMI mode, then switch the link on and start the display-top
    /// sync generator.
    pub fn enable(&mut self, preset: Preset) -> Result<(), HdmiError> {
        let t = preset.timing();
        self.prepare(&t)?;
        self.set_infoframes(preset.vic(), &t, VideoFormat::TwoD)?;

        self.audio_init();
        self.audio_enable(true);
        self.set_dvi_mode(false);

        let con0 = self.regs.read32(HDMI_CON_0);
        self.regs.write32(HDMI_CON_0, con0 | CON0_SYSTEM_EN);

        self.set_display_sync(
            t.vsync_start(),
            (t.hactive_start(), t.hactive_end()),
            (t.vsync_hs_start(), t.vsync_hs_end()),
        );
        self.state = HdmiState::Enabled;
        Ok(())
    }

    /// Full bring-up of display controller `module` at `preset`.
    pub fn display<P, D>(&mut self, module: u8, preset: u8, dpc: &mut P, delay: &mut D) -> Result<Resolution, HdmiError>
    where
        P: DisplayController,
        D: DelayNs,
    {
        info!("HDMI: display.{}", module);
        let preset = Preset::from_index(preset).inspect_err(|_| {
            error!("HDMI: not support preset {}", preset);
        })?;
        let source = Source::try_from(module).inspect_err(|_| {
            error!("HDMI: no source for display.{}", module);
        })?;
        let screen = preset.resolution();
        info!(
            "HDMI: display.{}, preset {} ({} * {})",
            module, preset as u8, screen.width, screen.height
        );

        self.init();
        self.setup(source, preset, delay)?;
        dpc.configure(module, screen, &preset.timing(), &preset.ctrl_info());
        self.enable(preset)?;
        Ok(screen)
    }
}
