//! Human-readable decoders for status registers and the optional register dump.

use super::bus::{RegisterAccessible, Result};
use super::regs::*;

fn log_named_bits(tag: &str, val: u8, map: &[(&'static str, u8)]) {
    let mut any = false;
    for (name, mask) in map {
        if (val & *mask) != 0 {
            if !any { info!("{}:", tag); any = true; }
            info!("  - {}", *name);
        }
    }
    if !any {
        info!("{}: (none set, 0x{:02x})", tag, val);
    }
}

pub fn log_status(st: u8) {
    // REG0x00 – input power status
    const MAP: &[(&str, u8)] = &[
        ("ACEN",      STATUS_ACEN),
        ("ACVA",      STATUS_ACVA),
        ("USBEN",     STATUS_USBEN),
        ("USBVA",     STATUS_USBVA),
        ("USBLAVHO",  STATUS_USBLAVHO),
        ("BATCURDIR", STATUS_BATCURDIR),  // 1 = charging
        ("ACUSBSH",   STATUS_ACUSBSH),
        ("SOURCE",    STATUS_SOURCE),     // boot source is ACIN/VBUS
    ];
    info!("AXP228 Charger: STATUS 0x{:02x}:0x{:02x}", REG_STATUS, st);
    log_named_bits("STATUS bits", st, MAP);
}

pub fn log_chg_status(cs: u8) {
    // REG0x01 – charge status
    const MAP: &[(&str, u8)] = &[
        ("ICTEMOV", CHGSTATUS_ICTEMOV),
        ("INCHAR",  CHGSTATUS_INCHAR),
        ("BATEN",   CHGSTATUS_BATEN),
        ("BATINACT", CHGSTATUS_BATINACT),
    ];
    info!("AXP228 Charger: MODE_CHGSTATUS 0x{:02x}:0x{:02x}", REG_MODE_CHGSTATUS, cs);
    log_named_bits("MODE_CHGSTATUS bits", cs, MAP);
}

/// Read and decode both status registers.
pub fn log_power_status<B: RegisterAccessible>(bus: &mut B) -> Result<(), B::Error> {
    let st = bus.read_u8(REG_STATUS)?;
    let cs = bus.read_u8(REG_MODE_CHGSTATUS)?;
    log_status(st);
    log_chg_status(cs);
    Ok(())
}

/// Print every register, 16 to a row. `missing` flags the columns that failed to read.
pub fn reg_dump<B: RegisterAccessible>(bus: &mut B, title: &str) {
    info!("AXP228: {}", title);
    let count = bus.reg_count();
    let mut base = 0usize;
    while base <= count {
        let mut r = [0u8; 16];
        let mut missing = 0u16;
        for (i, slot) in r.iter_mut().enumerate() {
            let reg = base + i;
            if reg > count {
                break;
            }
            match bus.read_u8(reg as u8) {
                Ok(v) => *slot = v,
                Err(_) => missing |= 1 << i,
            }
        }
        info!(
            "  {:02x}: {:02x} {:02x} {:02x} {:02x}  {:02x} {:02x} {:02x} {:02x}  {:02x} {:02x} {:02x} {:02x}  {:02x} {:02x} {:02x} {:02x}  missing 0x{:04x}",
            base as u8, r[0], r[1], r[2], r[3], r[4], r[5], r[6], r[7],
            r[8], r[9], r[10], r[11], r[12], r[13], r[14], r[15], missing
        );
        base += 16;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axp228::bus::Axp228Bus;
    use crate::testutil::MockI2c;

    #[test]
    fn dump_reads_every_register_once() {
        let mut i2c = MockI2c::default();
        i2c.fail_reg = Some(0x20);
        let mut bus = Axp228Bus::new(&mut i2c);
        reg_dump(&mut bus, "test");
        assert_eq!(i2c.reads.len(), NUM_OF_REGS); // 0x20 fails before it is recorded
        assert!(i2c.writes.is_empty());
    }
}
