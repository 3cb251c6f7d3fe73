use std::fmt;

/// Width of a pointer in every AArch64 address space.
pub const POINTER_BITS: u32 = 64;

/// Low-level type annotation of a generic instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LowLevelType {
    Scalar(u32),
    Pointer(u32),
    Vector { lanes: u32, elt_bits: u32 },
    Unsized,
}

impl LowLevelType {
    #[must_use]
    pub const fn scalar(bits: u32) -> Self {
        Self::Scalar(bits)
    }

    #[must_use]
    pub const fn pointer(addr_space: u32) -> Self {
        Self::Pointer(addr_space)
    }

    #[must_use]
    pub const fn is_sized(self) -> bool {
        !matches!(self, Self::Unsized)
    }

    #[must_use]
    pub const fn is_pointer(self) -> bool {
        matches!(self, Self::Pointer(_))
    }

    #[must_use]
    pub const fn size_in_bits(self) -> Option<u32> {
        match self {
            Self::Scalar(bits) => Some(bits),
            Self::Pointer(_) => Some(POINTER_BITS),
            Self::Vector { lanes, elt_bits } => Some(lanes * elt_bits),
            Self::Unsized => None,
        }
    }

    /// Parse the textual form (`s32`, `p0`, `<2 x s32>`, `unsized`).
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text == "unsized" {
            return Some(Self::Unsized);
        }
        if let Some(bits) = text.strip_prefix('s') {
            return bits.parse().ok().filter(|&b| b > 0).map(Self::Scalar);
        }
        if let Some(space) = text.strip_prefix('p') {
            return space.parse().ok().map(Self::Pointer);
        }
        let inner = text.strip_prefix('<')?.strip_suffix('>')?;
        let (lanes, elt) = inner.split_once(" x ")?;
        let lanes: u32 = lanes.trim().parse().ok().filter(|&l| l > 1)?;
        let elt_bits: u32 = elt.trim().strip_prefix('s')?.parse().ok().filter(|&b| b > 0)?;
        Some(Self::Vector { lanes, elt_bits })
    }
}

impl fmt::Display for LowLevelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(bits) => write!(f, "s{bits}"),
            Self::Pointer(space) => write!(f, "p{space}"),
            Self::Vector { lanes, elt_bits } => write!(f, "<{lanes} x s{elt_bits}>"),
            Self::Unsized => f.write_str("unsized"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_types() {
        assert_eq!(LowLevelType::parse("s64"), Some(LowLevelType::Scalar(64)));
        assert_eq!(LowLevelType::parse("p0"), Some(LowLevelType::Pointer(0)));
        assert_eq!(LowLevelType::parse(" p3 "), Some(LowLevelType::Pointer(3)));
        assert_eq!(
            LowLevelType::parse("<4 x s16>"),
            Some(LowLevelType::Vector {
                lanes: 4,
                elt_bits: 16
            })
        );
        assert_eq!(LowLevelType::parse("unsized"), Some(LowLevelType::Unsized));
        assert_eq!(LowLevelType::parse("s0"), None);
        assert_eq!(LowLevelType::parse("i32"), None);
        assert_eq!(LowLevelType::parse("<1 x s8>"), None);
    }

    #[test]
    fn sizes() {
        assert_eq!(LowLevelType::scalar(32).size_in_bits(), Some(32));
        assert_eq!(LowLevelType::pointer(1).size_in_bits(), Some(64));
        assert_eq!(
            LowLevelType::Vector {
                lanes: 2,
                elt_bits: 32
            }
            .size_in_bits(),
            Some(64)
        );
        assert!(!LowLevelType::Unsized.is_sized());
        assert_eq!(LowLevelType::Unsized.size_in_bits(), None);
    }
}
