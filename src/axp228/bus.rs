//! Register access and the write-only-if-changed update policy.

use embedded_hal::i2c::{I2c, Operation};

use super::regs::{I2C_ADDR, NUM_OF_REGS};
use super::types::{BusOp, Error};

pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Byte-register device reachable over a bus.
///
/// `read`/`write` are one bus transaction each and never retry. The remaining methods
/// are built on them and skip the write entirely when the register already holds the
/// requested value, so applying the same update twice costs one write at most.
pub trait RegisterAccessible {
    type Error;

    fn reg_count(&self) -> usize;
    fn read(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), Self::Error>;
    fn write(&mut self, reg: u8, bytes: &[u8]) -> Result<(), Self::Error>;

    fn read_u8(&mut self, reg: u8) -> Result<u8, Self::Error> {
        let mut b = [0u8; 1];
        self.read(reg, &mut b)?;
        Ok(b[0])
    }

    fn write_u8(&mut self, reg: u8, val: u8) -> Result<(), Self::Error> {
        self.write(reg, &[val])
    }

    /// Replace the `mask` bits of `reg` with `bits`. Returns whether a write was issued.
    fn update(&mut self, reg: u8, mask: u8, bits: u8) -> Result<bool, Self::Error> {
        if bits & !mask != 0 {
            return Err(Error::InvalidInput);
        }
        let cur = self.read_u8(reg)?;
        let next = (cur & !mask) | bits;
        if next == cur {
            return Ok(false);
        }
        self.write_u8(reg, next)?;
        Ok(true)
    }

    fn set_bits(&mut self, reg: u8, mask: u8) -> Result<bool, Self::Error> {
        self.update(reg, mask, mask)
    }

    fn clear_bits(&mut self, reg: u8, mask: u8) -> Result<bool, Self::Error> {
        self.update(reg, mask, 0)
    }

    /// Set or clear `mask` depending on `on`.
    fn assign_bits(&mut self, reg: u8, mask: u8, on: bool) -> Result<bool, Self::Error> {
        self.update(reg, mask, if on { mask } else { 0 })
    }
}

/// The AXP228 as seen on I²C. Shared by the PMIC, regulator and charger front-ends.
pub struct Axp228Bus<I2C> {
    i2c: I2C,
    addr: u8,
}

impl<I2C> Axp228Bus<I2C>
where
    I2C: I2c,
{
    /// Create with default 7-bit I²C address (0x34).
    pub fn new(i2c: I2C) -> Self { Self { i2c, addr: I2C_ADDR } }

    pub fn with_address(i2c: I2C, addr: u8) -> Self { Self { i2c, addr } }

    pub fn address(&self) -> u8 { self.addr }

    pub fn release(self) -> I2C { self.i2c }
}

impl<I2C> RegisterAccessible for Axp228Bus<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn reg_count(&self) -> usize {
        NUM_OF_REGS
    }

    fn read(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), I2C::Error> {
        let addr = self.addr;
        self.i2c.write_read(addr, &[reg], buf).map_err(|err| {
            error!("AXP228: read error from dev 0x{:02x} reg 0x{:02x}", addr, reg);
            Error::Bus { addr, reg, op: BusOp::Read, err }
        })
    }

    fn write(&mut self, reg: u8, bytes: &[u8]) -> Result<(), I2C::Error> {
        let addr = self.addr;
        self.i2c
            .transaction(addr, &mut [Operation::Write(&[reg]), Operation::Write(bytes)])
            .map_err(|err| {
                error!("AXP228: write error to dev 0x{:02x} reg 0x{:02x}", addr, reg);
                Error::Bus { addr, reg, op: BusOp::Write, err }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockI2c;

    #[test]
    fn update_twice_writes_once() {
        let mut i2c = MockI2c::with(&[(0x31, 0b1010_0000)]);
        let mut bus = Axp228Bus::new(&mut i2c);
        assert_eq!(bus.update(0x31, 0x07, 0x03), Ok(true));
        assert_eq!(bus.update(0x31, 0x07, 0x03), Ok(false));
        assert_eq!(i2c.writes, std::vec![(0x31, std::vec![0b1010_0011])]);
    }

    #[test]
    fn set_and_clear_skip_when_already_there() {
        let mut i2c = MockI2c::with(&[(0x84, 0xC0)]);
        let mut bus = Axp228Bus::new(&mut i2c);
        assert_eq!(bus.set_bits(0x84, 0x40), Ok(false));
        assert_eq!(bus.clear_bits(0x84, 0x01), Ok(false));
        assert_eq!(bus.set_bits(0x84, 0x03), Ok(true));
        assert_eq!(bus.clear_bits(0x84, 0x80), Ok(true));
        assert_eq!(i2c.regs[0x84], 0x43);
        assert_eq!(i2c.writes.len(), 2);
    }

    #[test]
    fn bits_outside_mask_are_rejected() {
        let mut i2c = MockI2c::default();
        let mut bus = Axp228Bus::new(&mut i2c);
        assert_eq!(bus.update(0x10, 0x0F, 0x10), Err(Error::InvalidInput));
        assert!(i2c.reads.is_empty());
    }

    #[test]
    fn bus_error_names_device_and_register() {
        let mut i2c = MockI2c::default();
        i2c.fail_reg = Some(0x33);
        let mut bus = Axp228Bus::with_address(&mut i2c, 0x35);
        match bus.update(0x33, 0x80, 0x80) {
            Err(Error::Bus { addr, reg, op, .. }) => {
                assert_eq!((addr, reg, op), (0x35, 0x33, BusOp::Read));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn multi_byte_write_lands_consecutively() {
        let mut i2c = MockI2c::default();
        let mut bus = Axp228Bus::new(&mut i2c);
        bus.write(0xC0, &[1, 2, 3]).unwrap();
        let mut back = [0u8; 3];
        bus.read(0xC0, &mut back).unwrap();
        assert_eq!(back, [1, 2, 3]);
    }
}
