//! Host-side stand-ins for the bus, delay and register windows.

use std::collections::HashMap;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};

use crate::mmio::RegisterBlock;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MockError;

impl embedded_hal::i2c::Error for MockError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// 256-byte register file behind a 7-bit address with an auto-incrementing pointer.
pub struct MockI2c {
    pub regs: [u8; 256],
    /// Every write transaction as (start register, bytes).
    pub writes: Vec<(u8, Vec<u8>)>,
    pub reads: Vec<u8>,
    /// Accesses to this register fail.
    pub fail_reg: Option<u8>,
}

impl Default for MockI2c {
    fn default() -> Self {
        Self { regs: [0; 256], writes: Vec::new(), reads: Vec::new(), fail_reg: None }
    }
}

impl MockI2c {
    pub fn with(init: &[(u8, u8)]) -> Self {
        let mut m = Self::default();
        for &(r, v) in init {
            m.regs[r as usize] = v;
        }
        m
    }

    pub fn writes_to(&self, reg: u8) -> Vec<Vec<u8>> {
        self.writes.iter().filter(|(r, _)| *r == reg).map(|(_, b)| b.clone()).collect()
    }
}

impl ErrorType for MockI2c {
    type Error = MockError;
}

impl I2c for MockI2c {
    fn transaction(&mut self, _address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
        let mut ptr: Option<u8> = None;
        let mut payload = Vec::new();
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    for &b in bytes.iter() {
                        if ptr.is_none() {
                            ptr = Some(b);
                        } else {
                            payload.push(b);
                        }
                    }
                }
                Operation::Read(buf) => {
                    let start = ptr.unwrap_or(0);
                    if self.fail_reg == Some(start) {
                        return Err(MockError);
                    }
                    for (i, b) in buf.iter_mut().enumerate() {
                        *b = self.regs[(start as usize + i) & 0xff];
                    }
                    self.reads.push(start);
                }
            }
        }
        if let (Some(start), false) = (ptr, payload.is_empty()) {
            if self.fail_reg == Some(start) {
                return Err(MockError);
            }
            for (i, b) in payload.iter().enumerate() {
                self.regs[(start as usize + i) & 0xff] = *b;
            }
            self.writes.push((start, payload));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct NoDelay {
    pub total_ns: u64,
}

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

/// Sparse 32-bit register window that logs every write in order.
#[derive(Default)]
pub struct MockRegs {
    pub values: HashMap<usize, u32>,
    pub writes: Vec<(usize, u32)>,
}

impl MockRegs {
    pub fn get(&self, offset: usize) -> u32 {
        self.values.get(&offset).copied().unwrap_or(0)
    }

    pub fn writes_to(&self, offset: usize) -> Vec<u32> {
        self.writes.iter().filter(|(o, _)| *o == offset).map(|(_, v)| *v).collect()
    }
}

impl RegisterBlock for MockRegs {
    fn read32(&self, offset: usize) -> u32 {
        self.get(offset)
    }

    fn write32(&mut self, offset: usize, val: u32) {
        self.values.insert(offset, val);
        self.writes.push((offset, val));
    }
}
