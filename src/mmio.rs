//! 32-bit memory-mapped register windows.

/// A block of 32-bit registers addressed by byte offset from the block base.
pub trait RegisterBlock {
    fn read32(&self, offset: usize) -> u32;
    fn write32(&mut self, offset: usize, val: u32);

    /// Replace the bits selected by `mask` with the matching bits of `val`.
    fn write_mask(&mut self, offset: usize, val: u32, mask: u32) {
        let cur = self.read32(offset);
        self.write32(offset, (cur & !mask) | (val & mask));
    }
}

/// Volatile access to a physical register window.
pub struct Mmio {
    base: usize,
}

impl Mmio {
    /// # Safety
    /// `base` must be the start of a mapped device register block that nothing else
    /// accesses for the lifetime of the returned value, and every offset passed to it
    /// must stay inside that block.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    pub fn base(&self) -> usize {
        self.base
    }
}

impl RegisterBlock for Mmio {
    fn read32(&self, offset: usize) -> u32 {
        // SAFETY: covered by the contract of `Mmio::new`.
        unsafe { core::ptr::read_volatile((self.base + offset) as *const u32) }
    }

    fn write32(&mut self, offset: usize, val: u32) {
        // SAFETY: covered by the contract of `Mmio::new`.
        unsafe { core::ptr::write_volatile((self.base + offset) as *mut u32, val) }
    }
}

impl<T: RegisterBlock + ?Sized> RegisterBlock for &mut T {
    fn read32(&self, offset: usize) -> u32 {
        (**self).read32(offset)
    }

    fn write32(&mut self, offset: usize, val: u32) {
        (**self).write32(offset, val)
    }
}
