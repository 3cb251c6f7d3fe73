use super::{BlockId, GenericOpcode, LowLevelType, MachineOperand, Register};
use crate::target::A64Opcode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Generic(GenericOpcode),
    Target(A64Opcode),
}

impl Opcode {
    #[must_use]
    pub const fn is_pre_isel_generic(self) -> bool {
        matches!(self, Self::Generic(_))
    }

    #[must_use]
    pub const fn as_generic(self) -> Option<GenericOpcode> {
        match self {
            Self::Generic(op) => Some(op),
            Self::Target(_) => None,
        }
    }

    #[must_use]
    pub const fn as_target(self) -> Option<A64Opcode> {
        match self {
            Self::Target(op) => Some(op),
            Self::Generic(_) => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Generic(op) => op.name(),
            Self::Target(op) => op.name(),
        }
    }

    /// Resolve an opcode name, generic names first.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        GenericOpcode::from_name(name)
            .map(Self::Generic)
            .or_else(|| A64Opcode::from_name(name).map(Self::Target))
    }
}

impl From<GenericOpcode> for Opcode {
    fn from(op: GenericOpcode) -> Self {
        Self::Generic(op)
    }
}

impl From<A64Opcode> for Opcode {
    fn from(op: A64Opcode) -> Self {
        Self::Target(op)
    }
}

/// A single machine instruction: opcode, operands and (for generic
/// instructions) the low-level types of its type indices.
///
/// For loads and stores `ty(0)` is the memory type and `ty(1)` the pointer
/// type; every other generic instruction carries at most one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineInstr {
    opcode: Opcode,
    operands: Vec<MachineOperand>,
    types: Vec<LowLevelType>,
    parent: Option<BlockId>,
}

impl MachineInstr {
    #[must_use]
    pub fn new(opcode: impl Into<Opcode>) -> Self {
        Self {
            opcode: opcode.into(),
            operands: Vec::new(),
            types: Vec::new(),
            parent: None,
        }
    }

    #[must_use]
    pub fn with_type(mut self, ty: LowLevelType) -> Self {
        self.types.push(ty);
        self
    }

    #[must_use]
    pub fn with_operand(mut self, operand: MachineOperand) -> Self {
        self.operands.push(operand);
        self
    }

    #[must_use]
    pub fn with_def(self, reg: impl Into<Register>) -> Self {
        self.with_operand(MachineOperand::def(reg))
    }

    #[must_use]
    pub fn with_use(self, reg: impl Into<Register>) -> Self {
        self.with_operand(MachineOperand::use_reg(reg))
    }

    #[must_use]
    pub fn with_imm(self, value: i64) -> Self {
        self.with_operand(MachineOperand::Imm(value))
    }

    #[must_use]
    pub const fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn set_opcode(&mut self, opcode: impl Into<Opcode>) {
        self.opcode = opcode.into();
    }

    #[must_use]
    pub fn operands(&self) -> &[MachineOperand] {
        &self.operands
    }

    #[must_use]
    pub fn operand(&self, idx: usize) -> Option<&MachineOperand> {
        self.operands.get(idx)
    }

    #[must_use]
    pub fn num_operands(&self) -> usize {
        self.operands.len()
    }

    #[must_use]
    pub fn num_explicit_operands(&self) -> usize {
        self.operands.iter().filter(|op| !op.is_implicit()).count()
    }

    pub fn add_operand(&mut self, operand: MachineOperand) {
        self.operands.push(operand);
    }

    #[must_use]
    pub fn types(&self) -> &[LowLevelType] {
        &self.types
    }

    #[must_use]
    pub fn ty(&self, idx: usize) -> Option<LowLevelType> {
        self.types.get(idx).copied()
    }

    pub fn remove_types(&mut self) {
        self.types.clear();
    }

    #[must_use]
    pub const fn parent(&self) -> Option<BlockId> {
        self.parent
    }

    pub fn set_parent(&mut self, block: BlockId) {
        self.parent = Some(block);
    }

    /// Number of leading explicit def operands.
    #[must_use]
    pub fn num_defs(&self) -> usize {
        self.operands
            .iter()
            .take_while(|op| op.is_def() && !op.is_implicit())
            .count()
    }
}
