//! CEA-861 infoframes and audio clock regeneration parameters.

use super::presets::SyncTiming;
use super::types::{Structure3d, VideoFormat};

pub const TYPE_VENDOR: u8 = 0x81;
pub const TYPE_AVI: u8 = 0x82;
pub const TYPE_AUDIO: u8 = 0x84;

pub const VSI_VERSION: u8 = 0x01;
pub const VSI_LENGTH: u8 = 0x05;
pub const AVI_VERSION: u8 = 0x02;
pub const AVI_LENGTH: u8 = 0x0d;
pub const AUI_VERSION: u8 = 0x01;
pub const AUI_LENGTH: u8 = 0x0a;

/// Largest payload a single infoframe can carry.
pub const MAX_PAYLOAD: usize = 27;

// AVI byte 1
const OUTPUT_RGB888: u8 = 0x0 << 5;
const AVI_ACTIVE_FORMAT_VALID: u8 = 1 << 4;
const AVI_UNDERSCAN: u8 = 2 << 0;
// AVI byte 2
const PICTURE_ASPECT_4_3: u8 = 1;
const PICTURE_ASPECT_16_9: u8 = 2;
const AVI_SAME_AS_PIC_ASPECT_RATIO: u8 = 0x8;
const AVI_ITU709: u8 = 2 << 6;
// AVI byte 3
const AVI_LIMITED_RANGE: u8 = 1 << 2;

const IEEE_OUI_HDMI: u32 = 0x000C03;
const H_SUB_SAMPLE: u8 = 0x1;

/// `0x100 - (sum of header and payload)`, so that everything including the checksum sums to
/// zero modulo 256.
pub fn checksum(header: &[u8; 3], payload: &[u8]) -> u8 {
    let sum = header.iter().chain(payload).fold(0u8, |acc, b| acc.wrapping_add(*b));
    0u8.wrapping_sub(sum)
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Infoframe {
    /// Type, version, payload length.
    pub header: [u8; 3],
    payload: [u8; MAX_PAYLOAD],
}

impl Infoframe {
    fn new(kind: u8, version: u8, len: u8) -> Self {
        Self { header: [kind, version, len], payload: [0; MAX_PAYLOAD] }
    }

    pub fn kind(&self) -> u8 { self.header[0] }

    pub fn payload(&self) -> &[u8] {
        &self.payload[..usize::from(self.header[2])]
    }

    pub fn checksum(&self) -> u8 {
        checksum(&self.header, self.payload())
    }

    /// Auxiliary video information: RGB, limited range, 16:9 unless the mode is 720x480.
    pub fn avi(vic: u8, timing: &SyncTiming) -> Self {
        let mut f = Self::new(TYPE_AVI, AVI_VERSION, AVI_LENGTH);
        let (aspect, vic) = if timing.is_4_3() { (PICTURE_ASPECT_4_3, 17) } else { (PICTURE_ASPECT_16_9, vic) };
        f.payload[0] = OUTPUT_RGB888 | AVI_ACTIVE_FORMAT_VALID | AVI_UNDERSCAN;
        f.payload[1] = aspect | AVI_SAME_AS_PIC_ASPECT_RATIO | AVI_ITU709;
        f.payload[2] = AVI_LIMITED_RANGE;
        f.payload[3] = vic;
        f
    }

    /// Audio infoframe with every field "refer to stream header".
    pub fn audio() -> Self {
        Self::new(TYPE_AUDIO, AUI_VERSION, AUI_LENGTH)
    }

    /// HDMI vendor-specific infoframe. `None` for 2D, which sends no VSI at all.
    pub fn vendor(format: VideoFormat) -> Option<Self> {
        let VideoFormat::ThreeD(s) = format else { return None };
        let mut f = Self::new(TYPE_VENDOR, VSI_VERSION, VSI_LENGTH);
        let oui = IEEE_OUI_HDMI.to_le_bytes();
        f.payload[..3].copy_from_slice(&oui[..3]);
        f.payload[3] = 0x2 << 5; // HDMI_Video_Format: 3D
        f.payload[4] = (s as u8) << 4;
        if s == Structure3d::SideBySideHalf {
            f.payload[5] = H_SUB_SAMPLE << 4;
            f.header[2] += 1;
        }
        Some(f)
    }
}

/// Audio clock regeneration N/CTS for a sample rate.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct AcrParams {
    pub n: u32,
    pub cts: u32,
}

impl AcrParams {
    /// Unknown rates give `0/0`.
    pub fn for_rate(sample_rate: u32) -> Self {
        let (n, cts) = match sample_rate {
            32_000 => (4096, 27_000),
            44_100 => (6272, 30_000),
            48_000 => (6144, 27_000),
            88_200 => (12_544, 30_000),
            96_000 => (12_288, 27_000),
            176_400 => (25_088, 30_000),
            192_000 => (24_576, 27_000),
            _ => (0, 0),
        };
        Self { n, cts }
    }

    /// N split over ACR_N0..N2, low byte first.
    pub fn n_bytes(&self) -> [u8; 3] {
        let b = self.n.to_le_bytes();
        [b[0], b[1], b[2]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hdmi::presets::Preset;

    fn total(f: &Infoframe) -> u8 {
        f.header
            .iter()
            .chain(f.payload())
            .fold(f.checksum(), |acc, b| acc.wrapping_add(*b))
    }

    #[test]
    fn avi_for_720p() {
        let f = Infoframe::avi(Preset::Hd720.vic(), &Preset::Hd720.timing());
        assert_eq!(f.header, [0x82, 0x02, 0x0d]);
        assert_eq!(&f.payload()[..4], &[0x12, 0x8A, 0x04, 4]);
        assert_eq!(f.payload().len(), 13);
        assert_eq!(f.checksum(), 0xCB);
        assert_eq!(total(&f), 0);
    }

    #[test]
    fn avi_480p_switches_to_4_3() {
        let mut t = Preset::Hd720.timing();
        t.h_active = 720;
        t.v_active = 480;
        t.pixel_clock_hz = 27_000_000;
        let f = Infoframe::avi(3, &t);
        assert_eq!(f.payload()[1] & 0x3, 1);
        assert_eq!(f.payload()[3], 17);
        assert_eq!(total(&f), 0);
    }

    #[test]
    fn audio_checksum() {
        let f = Infoframe::audio();
        assert_eq!(f.checksum(), 0x71);
        assert_eq!(total(&f), 0);
    }

    #[test]
    fn checksum_of_zero_sum_is_zero() {
        assert_eq!(checksum(&[0x80, 0x80, 0], &[]), 0);
    }

    #[test]
    fn vendor_frame_only_for_3d() {
        assert_eq!(Infoframe::vendor(VideoFormat::TwoD), None);

        let tb = Infoframe::vendor(VideoFormat::ThreeD(Structure3d::TopAndBottom)).unwrap();
        assert_eq!(tb.header, [0x81, 0x01, 0x05]);
        assert_eq!(tb.payload(), &[0x03, 0x0c, 0x00, 0x40, 0x60]);
        assert_eq!(total(&tb), 0);

        let sbs = Infoframe::vendor(VideoFormat::ThreeD(Structure3d::SideBySideHalf)).unwrap();
        assert_eq!(sbs.header[2], 6);
        assert_eq!(sbs.payload()[5], 0x10);
        assert_eq!(total(&sbs), 0);
    }

    #[test]
    fn acr_table() {
        assert_eq!(AcrParams::for_rate(48_000), AcrParams { n: 6144, cts: 27_000 });
        assert_eq!(AcrParams::for_rate(44_100), AcrParams { n: 6272, cts: 30_000 });
        assert_eq!(AcrParams::for_rate(192_000).n, 24_576);
        assert_eq!(AcrParams::for_rate(22_050), AcrParams { n: 0, cts: 0 });
        assert_eq!(AcrParams::for_rate(48_000).n_bytes(), [0x00, 0x18, 0x00]);
    }
}
