// Reader for the textual machine IR printed by `display.rs`.
//
// Format (one item per line, `;` starts a comment):
//
//   func @name
//     vreg %0 64 gpr [gpr64]
//   bb.0:
//     %2 = G_ADD {s64} %0, %1
//     G_BR bb.1

use super::{
    BlockId, LowLevelType, MachineFunction, MachineInstr, MachineOperand, Opcode, Register, VReg,
    VRegData,
};
use crate::target::{PhysReg, RegBank, RegClass};
use crate::{Error, Result};

fn parse_error(line: usize, message: impl Into<String>) -> Error {
    Error::Parse {
        line,
        message: message.into(),
    }
}

/// Parse every function in `text`.
pub fn parse_module(text: &str) -> Result<Vec<MachineFunction>> {
    let mut functions: Vec<MachineFunction> = Vec::new();
    // Line of the `func` header for each function, used to report bad block refs.
    let mut headers: Vec<usize> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_num = idx + 1;
        let line = raw.split_once(';').map_or(raw, |(code, _)| code).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix("func ") {
            let name = rest
                .trim()
                .strip_prefix('@')
                .filter(|n| !n.is_empty() && !n.contains(char::is_whitespace))
                .ok_or_else(|| parse_error(line_num, "expected 'func @name'"))?;
            functions.push(MachineFunction::new(name));
            headers.push(line_num);
            continue;
        }

        let func = functions
            .last_mut()
            .ok_or_else(|| parse_error(line_num, "expected 'func @name' before body"))?;

        if let Some(rest) = line.strip_prefix("vreg ") {
            let (vreg, data) = parse_vreg_decl(rest, line_num)?;
            func.regs.declare(vreg, data);
        } else if let Some(label) = line.strip_suffix(':') {
            let id = parse_block_ref(label)
                .ok_or_else(|| parse_error(line_num, format!("invalid block label '{label}'")))?;
            if id.0 as usize != func.blocks.len() {
                return Err(parse_error(
                    line_num,
                    format!("expected block bb.{}, found {id}", func.blocks.len()),
                ));
            }
            func.add_block();
        } else {
            let instr = parse_instr(line, func, line_num)?;
            let block = func
                .blocks
                .last_mut()
                .ok_or_else(|| parse_error(line_num, "instruction outside of a block"))?;
            block.push(instr);
        }
    }

    for (func, &line) in functions.iter().zip(&headers) {
        check_block_refs(func, line)?;
    }

    Ok(functions)
}

/// Parse text holding exactly one function.
pub fn parse_function(text: &str) -> Result<MachineFunction> {
    let mut functions = parse_module(text)?;
    match functions.len() {
        1 => Ok(functions.remove(0)),
        n => Err(parse_error(1, format!("expected one function, found {n}"))),
    }
}

fn check_block_refs(func: &MachineFunction, header_line: usize) -> Result<()> {
    for instr in func.instrs() {
        for op in instr.operands() {
            if let MachineOperand::Block(bb) = op
                && bb.0 as usize >= func.blocks.len()
            {
                return Err(parse_error(
                    header_line,
                    format!("function @{} branches to undefined block {bb}", func.name),
                ));
            }
        }
    }
    Ok(())
}

fn parse_vreg_decl(rest: &str, line: usize) -> Result<(VReg, VRegData)> {
    let mut parts = rest.split_whitespace();
    let vreg = parts
        .next()
        .and_then(parse_vreg)
        .ok_or_else(|| parse_error(line, "expected 'vreg %N SIZE [BANK] [CLASS]'"))?;
    let size_bits: u32 = parts
        .next()
        .and_then(|s| s.parse().ok())
        .filter(|&s| s > 0)
        .ok_or_else(|| parse_error(line, format!("missing or invalid size for {vreg}")))?;

    let mut data = VRegData {
        size_bits,
        bank: None,
        class: None,
    };
    for word in parts {
        if let Some(bank) = RegBank::from_name(word) {
            data.bank = Some(bank);
        } else if let Some(class) = RegClass::from_name(word) {
            data.class = Some(class);
        } else {
            return Err(parse_error(
                line,
                format!("unknown bank or class '{word}' for {vreg}"),
            ));
        }
    }
    Ok((vreg, data))
}

fn parse_vreg(text: &str) -> Option<VReg> {
    text.strip_prefix('%')?.parse().ok().map(VReg)
}

fn parse_block_ref(text: &str) -> Option<BlockId> {
    text.strip_prefix("bb.")?.parse().ok().map(BlockId)
}

fn parse_register(text: &str, func: &MachineFunction, line: usize) -> Result<Register> {
    if let Some(name) = text.strip_prefix('$') {
        return PhysReg::parse(name)
            .map(Register::Physical)
            .ok_or_else(|| parse_error(line, format!("unknown physical register '{text}'")));
    }
    let vreg =
        parse_vreg(text).ok_or_else(|| parse_error(line, format!("expected register, found '{text}'")))?;
    if !func.regs.contains(vreg) {
        return Err(parse_error(line, format!("use of undeclared register {vreg}")));
    }
    Ok(Register::Virtual(vreg))
}

fn parse_operand(text: &str, func: &MachineFunction, line: usize) -> Result<MachineOperand> {
    if let Some(reg) = text.strip_prefix("implicit-def ") {
        let reg = parse_register(reg.trim(), func, line)?;
        return Ok(MachineOperand::Reg {
            reg,
            is_def: true,
            is_implicit: true,
        });
    }
    if let Some(reg) = text.strip_prefix("implicit ") {
        let reg = parse_register(reg.trim(), func, line)?;
        return Ok(MachineOperand::implicit_use(reg));
    }
    if let Some(idx) = text.strip_prefix("%stack.") {
        return idx
            .parse()
            .map(MachineOperand::FrameIndex)
            .map_err(|_| parse_error(line, format!("invalid frame index '{text}'")));
    }
    if let Some(bb) = parse_block_ref(text) {
        return Ok(MachineOperand::Block(bb));
    }
    if text.starts_with('%') || text.starts_with('$') {
        return parse_register(text, func, line).map(MachineOperand::use_reg);
    }
    text.parse()
        .map(MachineOperand::Imm)
        .map_err(|_| parse_error(line, format!("invalid operand '{text}'")))
}

fn parse_instr(text: &str, func: &MachineFunction, line: usize) -> Result<MachineInstr> {
    let (defs, rest) = match text.split_once('=') {
        Some((defs, rest)) => (Some(defs.trim()), rest.trim()),
        None => (None, text),
    };

    let (name, mut rest) = rest
        .split_once(char::is_whitespace)
        .map_or((rest, ""), |(n, r)| (n, r.trim()));
    let opcode =
        Opcode::from_name(name).ok_or_else(|| parse_error(line, format!("unknown opcode '{name}'")))?;
    let mut instr = MachineInstr::new(opcode);

    if let Some(defs) = defs {
        for def in defs.split(',') {
            let reg = parse_register(def.trim(), func, line)?;
            instr.add_operand(MachineOperand::def(reg));
        }
    }

    if let Some(types) = rest.strip_prefix('{') {
        let (types, after) = types
            .split_once('}')
            .ok_or_else(|| parse_error(line, "unterminated type list"))?;
        for ty in types.split(',') {
            let parsed = LowLevelType::parse(ty)
                .ok_or_else(|| parse_error(line, format!("invalid type '{}'", ty.trim())))?;
            instr = instr.with_type(parsed);
        }
        rest = after.trim();
    }

    if !rest.is_empty() {
        for op in rest.split(',') {
            instr.add_operand(parse_operand(op.trim(), func, line)?);
        }
    }

    Ok(instr)
}
