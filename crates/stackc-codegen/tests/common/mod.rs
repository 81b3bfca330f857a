//! Interpreter for the x86-64 subset the generator emits
//!
//! Stands in for the assembler, linker and runtime so tests can observe what
//! a compiled program prints. Calls to the print routine record `%rax`; the
//! exit routine halts the machine. Reading or writing a data symbol that was
//! never declared with `.lcomm` panics, like an undefined symbol at link time.

#![allow(dead_code)]

use std::collections::HashMap;

use stackc_codegen::{compile, CodegenOptions};

const INITIAL_SP: i64 = 0x10_0000;
const STEP_LIMIT: usize = 1_000_000;

/// Compile source with default options and return everything it printed
pub fn compile_and_run(source: &str) -> Vec<i64> {
    run_source(source).output
}

/// Compile source with default options and run it to completion
pub fn run_source(source: &str) -> Machine {
    let asm = compile(source, &CodegenOptions::default())
        .unwrap_or_else(|e| panic!("compile failed: {}", e));
    let mut machine = Machine::load(&asm, &CodegenOptions::default());
    machine.run();
    machine
}

struct Instruction {
    mnemonic: String,
    operands: Vec<String>,
}

pub struct Machine {
    code: Vec<Instruction>,
    labels: HashMap<String, usize>,
    globals: HashMap<String, i64>,
    memory: HashMap<i64, i64>,
    rax: i64,
    rbx: i64,
    rdx: i64,
    rsp: i64,
    rbp: i64,
    /// Operands of the last `cmp`: (destination, source)
    flags: (i64, i64),
    pc: usize,
    halted: bool,
    print_routine: String,
    exit_routine: String,
    entry_label: String,
    /// Values passed to the print routine, in order
    pub output: Vec<i64>,
    /// Names of program functions called, in order
    pub calls: Vec<String>,
}

impl Machine {
    pub fn load(asm: &str, options: &CodegenOptions) -> Self {
        let mut code = Vec::new();
        let mut labels = HashMap::new();
        let mut globals = HashMap::new();

        for line in asm.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(label) = line.strip_suffix(':') {
                let previous = labels.insert(label.to_string(), code.len());
                assert!(previous.is_none(), "duplicate label {}", label);
                continue;
            }
            if let Some(rest) = line.strip_prefix(".lcomm ") {
                let name = rest.split(',').next().unwrap_or("").trim();
                globals.insert(name.to_string(), 0);
                continue;
            }
            if line.starts_with('.') {
                continue;
            }
            let (mnemonic, rest) = line.split_once(' ').unwrap_or((line, ""));
            let operands = rest
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            code.push(Instruction {
                mnemonic: mnemonic.to_string(),
                operands,
            });
        }

        Self {
            code,
            labels,
            globals,
            memory: HashMap::new(),
            rax: 0,
            rbx: 0,
            rdx: 0,
            rsp: INITIAL_SP,
            rbp: 0,
            flags: (0, 0),
            pc: 0,
            halted: false,
            print_routine: options.print_routine.clone(),
            exit_routine: options.exit_routine.clone(),
            entry_label: options.entry_label.clone(),
            output: Vec::new(),
            calls: Vec::new(),
        }
    }

    pub fn run(&mut self) {
        self.pc = self.label(&self.entry_label.clone());
        let mut steps = 0;
        while !self.halted {
            assert!(self.pc < self.code.len(), "execution fell off the end of the program");
            steps += 1;
            assert!(steps < STEP_LIMIT, "step limit exceeded");
            self.step();
        }
    }

    /// Value of a data-segment symbol
    pub fn global(&self, name: &str) -> i64 {
        *self
            .globals
            .get(name)
            .unwrap_or_else(|| panic!("no data symbol {}", name))
    }

    /// Whether the stack pointer is back where the program started
    pub fn stack_balanced(&self) -> bool {
        self.rsp == INITIAL_SP
    }

    fn label(&self, name: &str) -> usize {
        *self
            .labels
            .get(name)
            .unwrap_or_else(|| panic!("undefined label {}", name))
    }

    fn step(&mut self) {
        let Instruction { mnemonic, operands } = &self.code[self.pc];
        let mnemonic = mnemonic.clone();
        let ops = operands.clone();
        self.pc += 1;

        match mnemonic.as_str() {
            "mov" => {
                let value = self.read(&ops[0]);
                self.write(&ops[1], value);
            }
            "movzbl" => {
                let value = self.read(&ops[0]) & 0xff;
                self.write(&ops[1], value);
            }
            "push" => {
                let value = self.read(&ops[0]);
                self.push(value);
            }
            "pop" => {
                let value = self.pop();
                self.write(&ops[0], value);
            }
            "add" => {
                let value = self.read(&ops[1]).wrapping_add(self.read(&ops[0]));
                self.write(&ops[1], value);
            }
            "sub" => {
                let value = self.read(&ops[1]).wrapping_sub(self.read(&ops[0]));
                self.write(&ops[1], value);
            }
            "imul" => {
                let value = self.read(&ops[1]).wrapping_mul(self.read(&ops[0]));
                self.write(&ops[1], value);
            }
            "cqo" => {
                self.rdx = if self.rax < 0 { -1 } else { 0 };
            }
            "idiv" => {
                let divisor = self.read(&ops[0]);
                assert!(divisor != 0, "division by zero");
                let dividend = self.rax;
                self.rax = dividend.wrapping_div(divisor);
                self.rdx = dividend.wrapping_rem(divisor);
            }
            "cmp" => {
                self.flags = (self.read(&ops[1]), self.read(&ops[0]));
            }
            "sete" | "setne" | "setl" | "setg" | "setle" | "setge" => {
                let (dst, src) = self.flags;
                let bit = match mnemonic.as_str() {
                    "sete" => dst == src,
                    "setne" => dst != src,
                    "setl" => dst < src,
                    "setg" => dst > src,
                    "setle" => dst <= src,
                    _ => dst >= src,
                };
                self.write(&ops[0], bit as i64);
            }
            "jmp" => self.pc = self.label(&ops[0]),
            "jz" => {
                if self.flags.0 == self.flags.1 {
                    self.pc = self.label(&ops[0]);
                }
            }
            "jnz" => {
                if self.flags.0 != self.flags.1 {
                    self.pc = self.label(&ops[0]);
                }
            }
            "call" => {
                let target = &ops[0];
                if *target == self.print_routine {
                    self.output.push(self.rax);
                } else if *target == self.exit_routine {
                    self.halted = true;
                } else {
                    self.calls.push(target.clone());
                    let return_to = self.pc as i64;
                    self.push(return_to);
                    self.pc = self.label(target);
                }
            }
            "ret" => {
                self.pc = self.pop() as usize;
            }
            other => panic!("unsupported instruction {}", other),
        }
    }

    fn push(&mut self, value: i64) {
        self.rsp -= 8;
        self.memory.insert(self.rsp, value);
    }

    fn pop(&mut self) -> i64 {
        let value = self.memory.get(&self.rsp).copied().unwrap_or(0);
        self.rsp += 8;
        value
    }

    fn read(&self, operand: &str) -> i64 {
        if let Some(imm) = operand.strip_prefix('$') {
            return imm.parse().unwrap_or_else(|_| panic!("bad immediate {}", operand));
        }
        if let Some(offset) = operand.strip_suffix("(%rbp)") {
            let offset: i64 = offset.parse().unwrap_or_else(|_| panic!("bad offset {}", operand));
            return self.memory.get(&(self.rbp + offset)).copied().unwrap_or(0);
        }
        if let Some(name) = operand.strip_suffix("(%rip)") {
            return self.global(name);
        }
        match operand {
            "%rax" => self.rax,
            "%eax" => self.rax & 0xffff_ffff,
            "%al" => self.rax & 0xff,
            "%rbx" => self.rbx,
            "%rdx" => self.rdx,
            "%rsp" => self.rsp,
            "%rbp" => self.rbp,
            other => panic!("unsupported operand {}", other),
        }
    }

    fn write(&mut self, operand: &str, value: i64) {
        if let Some(offset) = operand.strip_suffix("(%rbp)") {
            let offset: i64 = offset.parse().unwrap_or_else(|_| panic!("bad offset {}", operand));
            assert!(offset != 0, "store would clobber the saved frame pointer");
            self.memory.insert(self.rbp + offset, value);
            return;
        }
        if let Some(name) = operand.strip_suffix("(%rip)") {
            let slot = self
                .globals
                .get_mut(name)
                .unwrap_or_else(|| panic!("no data symbol {}", name));
            *slot = value;
            return;
        }
        match operand {
            "%rax" => self.rax = value,
            // 32-bit writes zero the upper half
            "%eax" => self.rax = value & 0xffff_ffff,
            "%al" => self.rax = (self.rax & !0xff) | (value & 0xff),
            "%rbx" => self.rbx = value,
            "%rdx" => self.rdx = value,
            "%rsp" => self.rsp = value,
            "%rbp" => self.rbp = value,
            other => panic!("unsupported operand {}", other),
        }
    }
}
