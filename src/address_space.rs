//! GC address-space numbering.
//!
//! The backend marks garbage-collected references by placing them in
//! dedicated LLVM address spaces. Address space 0 is the ordinary
//! untracked space; the special spaces start at [`GcAddressSpace::Tracked`].

use inkwell::AddressSpace;

/// Address spaces recognized by the GC-aware backend.
///
/// The numeric values are part of the IR contract between the code
/// generator and the collector passes and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum GcAddressSpace {
    /// Ordinary pointer, invisible to the collector.
    Generic = 0,
    /// Pointer the collector roots and may relocate.
    Tracked = 10,
    /// Interior pointer derived from a tracked pointer.
    Derived = 11,
    /// Pointer the callee is responsible for rooting.
    CalleeRooted = 12,
    /// Pointer loaded from tracked memory.
    Loaded = 13,
}

impl GcAddressSpace {
    /// The raw address-space number as it appears in the IR.
    pub const fn raw(self) -> u16 {
        self as u16
    }

    /// Whether this space is one of the GC-special spaces.
    pub const fn is_special(self) -> bool {
        !matches!(self, GcAddressSpace::Generic)
    }
}

impl From<GcAddressSpace> for AddressSpace {
    fn from(space: GcAddressSpace) -> AddressSpace {
        AddressSpace::from(space.raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbering_is_stable() {
        assert_eq!(GcAddressSpace::Generic.raw(), 0);
        assert_eq!(GcAddressSpace::Tracked.raw(), 10);
        assert_eq!(GcAddressSpace::Derived.raw(), 11);
        assert_eq!(GcAddressSpace::CalleeRooted.raw(), 12);
        assert_eq!(GcAddressSpace::Loaded.raw(), 13);
    }

    #[test]
    fn generic_is_not_special() {
        assert!(!GcAddressSpace::Generic.is_special());
        assert!(GcAddressSpace::Tracked.is_special());
        assert!(GcAddressSpace::Loaded.is_special());
    }

    #[test]
    fn converts_to_llvm_address_space() {
        assert_eq!(
            AddressSpace::from(GcAddressSpace::Generic),
            AddressSpace::default()
        );
        assert_eq!(
            AddressSpace::from(GcAddressSpace::Tracked),
            AddressSpace::from(10u16)
        );
    }
}
