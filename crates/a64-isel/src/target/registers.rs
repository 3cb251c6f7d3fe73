// AArch64 register files, banks and classes.
//
// Banks are the coarse split used before selection (which register file a
// value lives in). Classes are the precise sets assigned by constraint
// finalization once an opcode has been chosen.

use std::fmt;

/// Number of numbered general-purpose registers (`x0`-`x30`).
pub const NUM_GPRS: u8 = 31;

/// Number of numbered floating-point registers (`d0`-`d31`).
pub const NUM_FPRS: u8 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PhysReg {
    /// 32-bit view of a general-purpose register.
    W(u8),
    /// 64-bit general-purpose register.
    X(u8),
    Wzr,
    Xzr,
    Wsp,
    Sp,
    /// 32-bit floating-point register.
    S(u8),
    /// 64-bit floating-point register.
    D(u8),
}

impl PhysReg {
    #[must_use]
    pub const fn bank(self) -> RegBank {
        match self {
            Self::W(_) | Self::X(_) | Self::Wzr | Self::Xzr | Self::Wsp | Self::Sp => RegBank::Gpr,
            Self::S(_) | Self::D(_) => RegBank::Fpr,
        }
    }

    #[must_use]
    pub const fn size_bits(self) -> u32 {
        match self {
            Self::W(_) | Self::Wzr | Self::Wsp | Self::S(_) => 32,
            Self::X(_) | Self::Xzr | Self::Sp | Self::D(_) => 64,
        }
    }

    /// The zero register of the given width, if the width has one.
    #[must_use]
    pub const fn zero(bits: u32) -> Option<Self> {
        match bits {
            32 => Some(Self::Wzr),
            64 => Some(Self::Xzr),
            _ => None,
        }
    }

    /// Parse an assembler-style register name without the `$` sigil.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "wzr" => return Some(Self::Wzr),
            "xzr" => return Some(Self::Xzr),
            "wsp" => return Some(Self::Wsp),
            "sp" => return Some(Self::Sp),
            _ => {}
        }
        let (prefix, num) = name.split_at_checked(1)?;
        let n: u8 = num.parse().ok()?;
        match prefix {
            "w" if n < NUM_GPRS => Some(Self::W(n)),
            "x" if n < NUM_GPRS => Some(Self::X(n)),
            "s" if n < NUM_FPRS => Some(Self::S(n)),
            "d" if n < NUM_FPRS => Some(Self::D(n)),
            _ => None,
        }
    }
}

impl fmt::Display for PhysReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::W(n) => write!(f, "$w{n}"),
            Self::X(n) => write!(f, "$x{n}"),
            Self::Wzr => f.write_str("$wzr"),
            Self::Xzr => f.write_str("$xzr"),
            Self::Wsp => f.write_str("$wsp"),
            Self::Sp => f.write_str("$sp"),
            Self::S(n) => write!(f, "$s{n}"),
            Self::D(n) => write!(f, "$d{n}"),
        }
    }
}

/// Register bank assigned by bank inference before selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegBank {
    Gpr,
    Fpr,
}

impl RegBank {
    #[must_use]
    pub const fn id(self) -> u32 {
        match self {
            Self::Gpr => 0,
            Self::Fpr => 1,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gpr => "gpr",
            Self::Fpr => "fpr",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "gpr" => Some(Self::Gpr),
            "fpr" => Some(Self::Fpr),
            _ => None,
        }
    }
}

impl fmt::Display for RegBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Register classes referenced by the instruction descriptors.
///
/// The `sp` classes admit the stack pointer but not the zero register; the
/// plain classes admit the zero register but not the stack pointer; the
/// `common` classes are their intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(non_camel_case_types)]
pub enum RegClass {
    GPR32,
    GPR32sp,
    GPR32common,
    GPR64,
    GPR64sp,
    GPR64common,
    FPR32,
    FPR64,
}

impl RegClass {
    pub const ALL: [Self; 8] = [
        Self::GPR32,
        Self::GPR32sp,
        Self::GPR32common,
        Self::GPR64,
        Self::GPR64sp,
        Self::GPR64common,
        Self::FPR32,
        Self::FPR64,
    ];

    #[must_use]
    pub const fn bank(self) -> RegBank {
        match self {
            Self::FPR32 | Self::FPR64 => RegBank::Fpr,
            _ => RegBank::Gpr,
        }
    }

    #[must_use]
    pub const fn size_bits(self) -> u32 {
        match self {
            Self::GPR32 | Self::GPR32sp | Self::GPR32common | Self::FPR32 => 32,
            Self::GPR64 | Self::GPR64sp | Self::GPR64common | Self::FPR64 => 64,
        }
    }

    #[must_use]
    pub const fn contains(self, reg: PhysReg) -> bool {
        match self {
            Self::GPR32 => matches!(reg, PhysReg::W(_) | PhysReg::Wzr),
            Self::GPR32sp => matches!(reg, PhysReg::W(_) | PhysReg::Wsp),
            Self::GPR32common => matches!(reg, PhysReg::W(_)),
            Self::GPR64 => matches!(reg, PhysReg::X(_) | PhysReg::Xzr),
            Self::GPR64sp => matches!(reg, PhysReg::X(_) | PhysReg::Sp),
            Self::GPR64common => matches!(reg, PhysReg::X(_)),
            Self::FPR32 => matches!(reg, PhysReg::S(_)),
            Self::FPR64 => matches!(reg, PhysReg::D(_)),
        }
    }

    #[must_use]
    pub const fn is_subclass_of(self, other: Self) -> bool {
        if self as u8 == other as u8 {
            return true;
        }
        matches!(
            (self, other),
            (Self::GPR32common, Self::GPR32 | Self::GPR32sp)
                | (Self::GPR64common, Self::GPR64 | Self::GPR64sp)
        )
    }

    /// Largest class contained in both `self` and `other`.
    #[must_use]
    pub fn common_subclass(self, other: Self) -> Option<Self> {
        if self.is_subclass_of(other) {
            return Some(self);
        }
        if other.is_subclass_of(self) {
            return Some(other);
        }
        match (self, other) {
            (Self::GPR32, Self::GPR32sp) | (Self::GPR32sp, Self::GPR32) => Some(Self::GPR32common),
            (Self::GPR64, Self::GPR64sp) | (Self::GPR64sp, Self::GPR64) => Some(Self::GPR64common),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GPR32 => "gpr32",
            Self::GPR32sp => "gpr32sp",
            Self::GPR32common => "gpr32common",
            Self::GPR64 => "gpr64",
            Self::GPR64sp => "gpr64sp",
            Self::GPR64common => "gpr64common",
            Self::FPR32 => "fpr32",
            Self::FPR64 => "fpr64",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for RegClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
