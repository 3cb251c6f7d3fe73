use std::fmt;

/// Target-specific AArch64 opcodes produced by the selector.
///
/// Suffixes follow the usual AArch64 naming: `W`/`X` for 32/64-bit register
/// forms, `rr`/`rrr` for register operands, `ri` for a shifted immediate and
/// `ui` for base plus unsigned scaled immediate addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(non_camel_case_types)]
pub enum A64Opcode {
    Copy,
    B,
    ADDXri,
    // Base + unsigned immediate loads and stores
    LDRWui,
    LDRXui,
    STRWui,
    STRXui,
    // Multiply-add: dst = src1 * src2 + src3
    MADDWrrr,
    MADDXrrr,
    // 32-bit register-register
    ORRWrr,
    EORWrr,
    ANDWrr,
    ADDWrr,
    SUBWrr,
    LSLVWr,
    LSRVWr,
    ASRVWr,
    SDIVWr,
    UDIVWr,
    // 64-bit register-register
    ORRXrr,
    EORXrr,
    ANDXrr,
    ADDXrr,
    SUBXrr,
    LSLVXr,
    LSRVXr,
    ASRVXr,
    SDIVXr,
    UDIVXr,
}

impl A64Opcode {
    pub const ALL: [Self; 29] = [
        Self::Copy,
        Self::B,
        Self::ADDXri,
        Self::LDRWui,
        Self::LDRXui,
        Self::STRWui,
        Self::STRXui,
        Self::MADDWrrr,
        Self::MADDXrrr,
        Self::ORRWrr,
        Self::EORWrr,
        Self::ANDWrr,
        Self::ADDWrr,
        Self::SUBWrr,
        Self::LSLVWr,
        Self::LSRVWr,
        Self::ASRVWr,
        Self::SDIVWr,
        Self::UDIVWr,
        Self::ORRXrr,
        Self::EORXrr,
        Self::ANDXrr,
        Self::ADDXrr,
        Self::SUBXrr,
        Self::LSLVXr,
        Self::LSRVXr,
        Self::ASRVXr,
        Self::SDIVXr,
        Self::UDIVXr,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Copy => "COPY",
            Self::B => "B",
            Self::ADDXri => "ADDXri",
            Self::LDRWui => "LDRWui",
            Self::LDRXui => "LDRXui",
            Self::STRWui => "STRWui",
            Self::STRXui => "STRXui",
            Self::MADDWrrr => "MADDWrrr",
            Self::MADDXrrr => "MADDXrrr",
            Self::ORRWrr => "ORRWrr",
            Self::EORWrr => "EORWrr",
            Self::ANDWrr => "ANDWrr",
            Self::ADDWrr => "ADDWrr",
            Self::SUBWrr => "SUBWrr",
            Self::LSLVWr => "LSLVWr",
            Self::LSRVWr => "LSRVWr",
            Self::ASRVWr => "ASRVWr",
            Self::SDIVWr => "SDIVWr",
            Self::UDIVWr => "UDIVWr",
            Self::ORRXrr => "ORRXrr",
            Self::EORXrr => "EORXrr",
            Self::ANDXrr => "ANDXrr",
            Self::ADDXrr => "ADDXrr",
            Self::SUBXrr => "SUBXrr",
            Self::LSLVXr => "LSLVXr",
            Self::LSRVXr => "LSRVXr",
            Self::ASRVXr => "ASRVXr",
            Self::SDIVXr => "SDIVXr",
            Self::UDIVXr => "UDIVXr",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    #[must_use]
    pub const fn may_load(self) -> bool {
        matches!(self, Self::LDRWui | Self::LDRXui)
    }

    #[must_use]
    pub const fn may_store(self) -> bool {
        matches!(self, Self::STRWui | Self::STRXui)
    }
}

impl fmt::Display for A64Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
