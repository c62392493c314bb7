#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HdmiError {
    /// PHY did not report ready within the poll budget. The PHY has been switched off.
    PhyNotReady,
    UnsupportedPreset(u8),
    /// Only the two display controllers and the resolution converter can feed HDMI.
    UnsupportedSource(u8),
    /// Step called out of order.
    InvalidState(HdmiState),
}

/// Bring-up progress. Each step requires the one before it; `disable` returns to the start.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HdmiState {
    #[default]
    Uninitialized,
    PhyConfigured,
    ResetReleased,
    PhyReady,
    TimingPrepared,
    InfoframesSet,
    Enabled,
}

/// Display-top HDMI mux input.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Source {
    /// Primary multi-layer controller (display controller 0).
    Dp0 = 0,
    Dp1 = 1,
    ResConv = 2,
}

impl TryFrom<u8> for Source {
    type Error = HdmiError;

    fn try_from(v: u8) -> Result<Self, HdmiError> {
        match v {
            0 => Ok(Source::Dp0),
            1 => Ok(Source::Dp1),
            2 => Ok(Source::ResConv),
            other => Err(HdmiError::UnsupportedSource(other)),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetId {
    Hdmi,
    HdmiPhy,
    HdmiVideo,
    HdmiSpdif,
    HdmiTmds,
}

/// SoC reset controller lines.
pub trait ResetControl {
    fn assert_reset(&mut self, id: ResetId);
    fn deassert_reset(&mut self, id: ResetId);
}

impl<T: ResetControl + ?Sized> ResetControl for &mut T {
    fn assert_reset(&mut self, id: ResetId) { (**self).assert_reset(id) }
    fn deassert_reset(&mut self, id: ResetId) { (**self).deassert_reset(id) }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AudioCodec {
    Pcm,
    Ac3,
    Mp3,
}

/// 3D structure signalled in the vendor infoframe.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Structure3d {
    FramePacking = 0x0,
    TopAndBottom = 0x6,
    SideBySideHalf = 0x8,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VideoFormat {
    #[default]
    TwoD,
    ThreeD(Structure3d),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputFormat {
    Rgb888,
}

/// Screen size in pixels.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Resolution {
    pub width: u16,
    pub height: u16,
}
