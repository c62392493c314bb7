//! Unit conversions between physical values and AXP228 register fields.
//!
//! Every encoder here is lossy and monotonic: decoding an encoded value lands within one
//! quantization step of the input, never above the hardware maximum.

use super::regs::*;

// ------------------ Charge current ------------------

pub const CHARGE_CUR_MIN_UA: i32 = 300_000;
pub const CHARGE_CUR_MAX_UA: i32 = 2_550_000;
pub const CHARGE_CUR_STEP_UA: i32 = 150_000;

/// CHARGE1[3:0] / CHARGE3[3:0] code for a current in µA.
pub fn encode_charge_current(ua: i32) -> u8 {
    if ua < CHARGE_CUR_MIN_UA {
        0x0
    } else if ua > CHARGE_CUR_MAX_UA {
        0xF
    } else {
        ((ua - 200_001) / CHARGE_CUR_STEP_UA) as u8 & CHARGE_CUR_MASK
    }
}

pub fn decode_charge_current(code: u8) -> u32 {
    (u32::from(code & CHARGE_CUR_MASK) * 150 + 300) * 1000
}

// ------------------ VBUS limits ------------------

/// IPS_SET[1:0] code for a VBUS current limit in µA.
pub fn encode_usb_limit(ua: u32) -> u8 {
    if ua < 900_000 {
        USB_LIMIT_500
    } else if ua < 1_500_000 {
        USB_LIMIT_900
    } else {
        USB_LIMIT_NONE
    }
}

/// VBUS current limit in µA, `0` meaning unlimited.
pub fn decode_usb_limit(code: u8) -> u32 {
    match code & VBUS_CLIMIT_MASK {
        USB_LIMIT_900 => 900_000,
        USB_LIMIT_500 => 500_000,
        _ => 0,
    }
}

/// IPS_SET[5:3] bits for a VBUS hold voltage, 4000..=4700 mV in 100 mV steps.
pub fn encode_usb_vhold(mv: i32) -> Option<u8> {
    if !(4000..=4700).contains(&mv) {
        return None;
    }
    Some((((mv - 4000) / 100) as u8) << 3)
}

// ------------------ Power key ------------------

/// POK_SET[7:6]: power-on press time.
pub fn pek_on_bits(ms: i32) -> u8 {
    match ms {
        i32::MIN..=999 => 0x00,
        1000..=1999 => 0x40,
        2000..=2999 => 0x80,
        _ => 0xC0,
    }
}

/// POK_SET[5:4]: long-press time, 1000..=2500 ms in 500 ms steps.
pub fn pek_long_bits(ms: i32) -> u8 {
    let t = ms.clamp(1000, 2500);
    (((t - 1000) / 500) as u8) << 4
}

/// POK_SET[1:0]: power-off press time, 4000..=10000 ms in 2000 ms steps.
pub fn pek_off_bits(ms: i32) -> u8 {
    let t = ms.clamp(4000, 10_000);
    ((t - 4000) / 2000) as u8
}

/// OFF_CTL[1:0]: power-key debounce delay.
pub fn pek_delay_bits(ms: i32) -> u8 {
    (ms / 8 - 1).clamp(0, i32::from(PEK_DELAY_MASK)) as u8
}

// ------------------ Fuel gauge ------------------

/// Battery internal resistance in mΩ to the 13-bit RDC code.
pub fn encode_rdc(mohm: i32) -> u16 {
    ((mohm * 10_000 + 5371) / 10_742) as u16
}

/// RDC0/RDC1 bytes, with the write-enable bit set in RDC0.
pub fn rdc_bytes(rdc: u16) -> [u8; 2] {
    [((rdc >> 8) as u8 & RDC_HIGH_MASK) | RDC_WRITE_EN, rdc as u8]
}

/// Battery capacity in mAh to the coulomb-counter full scale.
pub fn encode_capacity(mah: i32) -> u16 {
    (mah * 1000 / 1456) as u16
}

/// BATFULLCAPH/L bytes, with the "calibration present" bit set in the high byte.
pub fn capacity_bytes(cc: u16) -> [u8; 2] {
    [(cc >> 8) as u8 | BATCAP_VALID, cc as u8]
}

/// WARNING_LEVEL byte: level 1 is 5..=20 %, level 2 is 0..=15 %.
pub fn warning_level(lv1: i32, lv2: i32) -> Option<u8> {
    if !(5..=20).contains(&lv1) || !(0..=15).contains(&lv2) {
        return None;
    }
    Some((((lv1 - 5) << 4) + lv2) as u8)
}

// ------------------ ADC ------------------

/// 12-bit ADC result from its H[7:0] and L[3:0] halves.
pub fn adc12(h: u8, l: u8) -> u16 {
    (u16::from(h) << 4) | u16::from(l & 0x0F)
}

pub fn vbat_mv(raw: u16) -> u32 { u32::from(raw) * 1100 / 1000 }
pub fn ocv_mv(raw: u16) -> u32 { u32::from(raw) * 1100 / 1000 }
pub fn vdc_mv(raw: u16) -> u32 { u32::from(raw) * 1700 / 1000 }
pub fn ibat_ma(raw: u16) -> u32 { u32::from(raw) }
pub fn icharge_ma(raw: u16) -> u32 { u32::from(raw) }
pub fn iac_ma(raw: u16) -> u32 { u32::from(raw) * 625 / 1000 }
pub fn iusb_ma(raw: u16) -> u32 { u32::from(raw) * 375 / 1000 }
