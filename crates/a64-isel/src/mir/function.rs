use std::collections::BTreeMap;

use super::{BlockId, MachineInstr, VReg};
use crate::target::{RegBank, RegClass};

/// Per-virtual-register information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VRegData {
    pub size_bits: u32,
    /// Bank assigned by upstream bank inference.
    pub bank: Option<RegBank>,
    /// Class assigned by constraint finalization.
    pub class: Option<RegClass>,
}

/// Virtual register table of a function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VRegInfo {
    vregs: BTreeMap<VReg, VRegData>,
}

impl VRegInfo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh virtual register numbered after the highest one in use.
    pub fn create(&mut self, size_bits: u32, bank: Option<RegBank>) -> VReg {
        let next = self.vregs.keys().next_back().map_or(0, |v| v.0 + 1);
        let vreg = VReg(next);
        self.declare(
            vreg,
            VRegData {
                size_bits,
                bank,
                class: None,
            },
        );
        vreg
    }

    /// Declare (or redeclare) `vreg` with the given data.
    pub fn declare(&mut self, vreg: VReg, data: VRegData) {
        self.vregs.insert(vreg, data);
    }

    #[must_use]
    pub fn get(&self, vreg: VReg) -> Option<&VRegData> {
        self.vregs.get(&vreg)
    }

    #[must_use]
    pub fn contains(&self, vreg: VReg) -> bool {
        self.vregs.contains_key(&vreg)
    }

    #[must_use]
    pub fn size_bits(&self, vreg: VReg) -> Option<u32> {
        self.get(vreg).map(|d| d.size_bits)
    }

    #[must_use]
    pub fn bank(&self, vreg: VReg) -> Option<RegBank> {
        self.get(vreg).and_then(|d| d.bank)
    }

    #[must_use]
    pub fn class(&self, vreg: VReg) -> Option<RegClass> {
        self.get(vreg).and_then(|d| d.class)
    }

    /// Set the register class of a declared vreg. Returns `false` if `vreg`
    /// is unknown.
    pub fn set_class(&mut self, vreg: VReg, class: RegClass) -> bool {
        match self.vregs.get_mut(&vreg) {
            Some(data) => {
                data.class = Some(class);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (VReg, &VRegData)> {
        self.vregs.iter().map(|(v, d)| (*v, d))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vregs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vregs.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineBasicBlock {
    pub id: BlockId,
    pub instrs: Vec<MachineInstr>,
}

impl MachineBasicBlock {
    #[must_use]
    pub fn new(id: BlockId) -> Self {
        Self {
            id,
            instrs: Vec::new(),
        }
    }

    /// Append `instr`, recording this block as its parent.
    pub fn push(&mut self, mut instr: MachineInstr) {
        instr.set_parent(self.id);
        self.instrs.push(instr);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineFunction {
    pub name: String,
    pub blocks: Vec<MachineBasicBlock>,
    pub regs: VRegInfo,
}

impl MachineFunction {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            blocks: Vec::new(),
            regs: VRegInfo::new(),
        }
    }

    /// Append a new empty block and return it.
    pub fn add_block(&mut self) -> &mut MachineBasicBlock {
        let id = BlockId(u32::try_from(self.blocks.len()).unwrap_or(u32::MAX));
        self.blocks.push(MachineBasicBlock::new(id));
        let last = self.blocks.len() - 1;
        &mut self.blocks[last]
    }

    pub fn instrs(&self) -> impl Iterator<Item = &MachineInstr> {
        self.blocks.iter().flat_map(|bb| bb.instrs.iter())
    }

    #[must_use]
    pub fn num_instrs(&self) -> usize {
        self.blocks.iter().map(|bb| bb.instrs.len()).sum()
    }
}
