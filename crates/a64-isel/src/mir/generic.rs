use std::fmt;

/// Target-independent opcodes of the generic machine IR.
///
/// Every generic opcode the IR can carry is listed here, including those the
/// AArch64 selector does not handle yet, so dispatch over this enum stays
/// exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GenericOpcode {
    // === Control flow ===
    Br,
    BrCond,
    Phi,

    // === Memory ===
    FrameIndex,
    Load,
    Store,
    PtrAdd,

    // === Integer arithmetic ===
    Add,
    Sub,
    Mul,
    SDiv,
    UDiv,
    SRem,
    URem,

    // === Bitwise ===
    And,
    Or,
    Xor,
    Shl,
    LShr,
    AShr,

    // === Constants and casts ===
    Constant,
    ImplicitDef,
    ZExt,
    SExt,
    AnyExt,
    Trunc,

    // === Comparison ===
    ICmp,
    Select,
}

impl GenericOpcode {
    pub const ALL: [Self; 28] = [
        Self::Br,
        Self::BrCond,
        Self::Phi,
        Self::FrameIndex,
        Self::Load,
        Self::Store,
        Self::PtrAdd,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::SDiv,
        Self::UDiv,
        Self::SRem,
        Self::URem,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Shl,
        Self::LShr,
        Self::AShr,
        Self::Constant,
        Self::ImplicitDef,
        Self::ZExt,
        Self::SExt,
        Self::AnyExt,
        Self::Trunc,
        Self::ICmp,
        Self::Select,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Br => "G_BR",
            Self::BrCond => "G_BRCOND",
            Self::Phi => "G_PHI",
            Self::FrameIndex => "G_FRAME_INDEX",
            Self::Load => "G_LOAD",
            Self::Store => "G_STORE",
            Self::PtrAdd => "G_PTR_ADD",
            Self::Add => "G_ADD",
            Self::Sub => "G_SUB",
            Self::Mul => "G_MUL",
            Self::SDiv => "G_SDIV",
            Self::UDiv => "G_UDIV",
            Self::SRem => "G_SREM",
            Self::URem => "G_UREM",
            Self::And => "G_AND",
            Self::Or => "G_OR",
            Self::Xor => "G_XOR",
            Self::Shl => "G_SHL",
            Self::LShr => "G_LSHR",
            Self::AShr => "G_ASHR",
            Self::Constant => "G_CONSTANT",
            Self::ImplicitDef => "G_IMPLICIT_DEF",
            Self::ZExt => "G_ZEXT",
            Self::SExt => "G_SEXT",
            Self::AnyExt => "G_ANYEXT",
            Self::Trunc => "G_TRUNC",
            Self::ICmp => "G_ICMP",
            Self::Select => "G_SELECT",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    /// Generic opcodes that carry no type annotation.
    #[must_use]
    pub const fn is_untyped(self) -> bool {
        matches!(self, Self::Br)
    }
}

impl fmt::Display for GenericOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Register-register operations with a direct AArch64 counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Or,
    Xor,
    And,
    Add,
    Sub,
    Shl,
    LShr,
    AShr,
    SDiv,
    UDiv,
}

impl BinaryOp {
    pub const ALL: [Self; 10] = [
        Self::Or,
        Self::Xor,
        Self::And,
        Self::Add,
        Self::Sub,
        Self::Shl,
        Self::LShr,
        Self::AShr,
        Self::SDiv,
        Self::UDiv,
    ];

    #[must_use]
    pub const fn generic(self) -> GenericOpcode {
        match self {
            Self::Or => GenericOpcode::Or,
            Self::Xor => GenericOpcode::Xor,
            Self::And => GenericOpcode::And,
            Self::Add => GenericOpcode::Add,
            Self::Sub => GenericOpcode::Sub,
            Self::Shl => GenericOpcode::Shl,
            Self::LShr => GenericOpcode::LShr,
            Self::AShr => GenericOpcode::AShr,
            Self::SDiv => GenericOpcode::SDiv,
            Self::UDiv => GenericOpcode::UDiv,
        }
    }
}

/// Direction of a memory access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemOp {
    Load,
    Store,
}

impl MemOp {
    #[must_use]
    pub const fn generic(self) -> GenericOpcode {
        match self {
            Self::Load => GenericOpcode::Load,
            Self::Store => GenericOpcode::Store,
        }
    }
}
