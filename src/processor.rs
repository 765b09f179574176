mod execute;

use crate::display::{Framebuffer, HIGH_RES_VIEWPORT, LOW_RES_VIEWPORT};
use crate::error::{ErrorDetail, MachineError};
use crate::font::{Font, FONT_START_ADDRESS, HIRES_FONT_START_ADDRESS};
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::memory::{Memory, MEMORY_SIZE_BYTES};
use crate::options::Quirks;
use crate::program::{Program, PROGRAM_START_ADDRESS};
use crate::stack::Stack;

/// The outcome of a single [Processor::step] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// One instruction was fetched and executed.
    Executed,
    /// The processor is suspended on a pending key-wait and did not fetch
    /// anything.
    Blocked,
    /// The processor is halted; only `reset()`/`set_state()` will un-halt it.
    Halted,
}

/// A frame's worth of framebuffer state handed to the renderer.
pub struct FramebufferSnapshot {
    pub width: usize,
    pub height: usize,
    /// One byte per pixel (0 or 1), row-major.
    pub bits: Vec<u8>,
    /// Whether the framebuffer changed since the last snapshot was taken.
    pub dirty: bool,
}

/// A lightweight, point-in-time summary of machine state, bundled into a
/// [crate::error::MachineError] for host diagnostics at the moment of a fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    pub program_counter: u16,
    pub index_register: u16,
    pub variable_registers: [u8; 16],
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub cycles: u64,
    pub halted: bool,
}

/// The CHIP-8/SUPER-CHIP-1.1/XO-CHIP-subset virtual machine: owns all mutable
/// machine state and exposes [Processor::step]/[Processor::tick_timers]/
/// [Processor::press]/[Processor::release] as its only entry points. The
/// processor never consults the wall clock — cadence is entirely the
/// surrounding scheduler's responsibility.
pub struct Processor {
    memory: Memory,
    stack: Stack,
    framebuffer: Framebuffer,
    keypad: Keypad,
    low_res_font: Font,
    high_res_font: Font,
    program: Program,

    pub(crate) variable_registers: [u8; 16],
    pub(crate) index_register: u16,
    pub(crate) program_counter: u16,
    pub(crate) delay_timer: u8,
    pub(crate) sound_timer: u8,
    pub(crate) rpl_flags: [u8; 8],
    pub(crate) hires_mode: bool,
    pub(crate) halted: bool,
    pub(crate) draw_dirty: bool,
    /// Set by `DXYN` when `display_wait` is active; consumed (and cleared) by
    /// the scheduler via [Processor::take_display_wait_pending] to decide
    /// whether to keep issuing `step()` calls for the rest of the frame. This
    /// is scheduling advice, not a core suspension state: `step()` never
    /// blocks on it.
    display_wait_pending: bool,
    cycles: u64,
    pub quirks: Quirks,
    last_fault: Option<MachineError>,
}

impl Processor {
    /// Constructs a new processor with the given quirks configuration, at
    /// power-on (equivalent to calling [Processor::reset] immediately).
    pub fn new(quirks: Quirks) -> Self {
        let mut processor = Processor {
            memory: Memory::new(),
            stack: Stack::new(),
            framebuffer: Framebuffer::new(),
            keypad: Keypad::new(),
            low_res_font: Font::default_low_resolution(),
            high_res_font: Font::default_high_resolution(),
            program: Program::default(),
            variable_registers: [0; 16],
            index_register: 0,
            program_counter: PROGRAM_START_ADDRESS,
            delay_timer: 0,
            sound_timer: 0,
            rpl_flags: [0; 8],
            hires_mode: false,
            halted: false,
            draw_dirty: false,
            display_wait_pending: false,
            cycles: 0,
            quirks,
            last_fault: None,
        };
        processor.reset();
        processor
    }

    /// Reconfigures the active quirks. Takes effect on the next instruction.
    pub fn set_quirks(&mut self, quirks: Quirks) {
        self.quirks = quirks;
    }

    /// Resets the machine to power-on: memory, registers, stack, timers,
    /// framebuffer, keys, key-wait, halted and draw-dirty are all cleared and
    /// the fonts are (re)installed. `rpl_flags` survive a reset.
    pub fn reset(&mut self) {
        self.memory.clear();
        self.memory
            .write_bytes(FONT_START_ADDRESS, self.low_res_font.font_data())
            .expect("font data fits below program space");
        self.memory
            .write_bytes(HIRES_FONT_START_ADDRESS, self.high_res_font.font_data())
            .expect("font data fits below program space");
        self.stack.clear();
        self.framebuffer.clear();
        self.keypad.clear();
        self.variable_registers = [0; 16];
        self.index_register = 0;
        self.program_counter = PROGRAM_START_ADDRESS;
        self.delay_timer = 0;
        self.sound_timer = 0;
        self.hires_mode = false;
        self.halted = false;
        self.draw_dirty = false;
        self.display_wait_pending = false;
        self.cycles = 0;
        self.last_fault = None;
    }

    /// Performs a reset, then copies `rom` into memory starting at `0x200`.
    /// Rejects ROMs larger than the available program space, leaving the
    /// machine's prior state untouched.
    pub fn load_rom(&mut self, rom: Vec<u8>) -> Result<(), ErrorDetail> {
        let program = Program::new(rom)?;
        self.reset();
        self.memory
            .write_bytes(PROGRAM_START_ADDRESS, program.program_data())
            .expect("validated program fits within memory");
        self.program = program;
        Ok(())
    }

    /// Reads one byte at `address`, wrapping modulo [MEMORY_SIZE_BYTES]
    /// instead of erroring. Used where an oversized `i` must clamp/wrap
    /// rather than raise a hard fault (FX33/FX55/FX65/draw).
    pub(crate) fn memory_read_wrapping(&self, address: u16) -> u8 {
        self.memory.bytes[address as usize % MEMORY_SIZE_BYTES]
    }

    pub(crate) fn memory_write_wrapping(&mut self, address: u16, value: u8) {
        let index = address as usize % MEMORY_SIZE_BYTES;
        self.memory.bytes[index] = value;
    }

    /// Reads `length` bytes starting at `address`, each independently
    /// wrapped modulo [MEMORY_SIZE_BYTES].
    pub(crate) fn memory_read_bytes_wrapping(&self, address: u16, length: usize) -> Vec<u8> {
        (0..length)
            .map(|offset| self.memory.bytes[(address as usize + offset) % MEMORY_SIZE_BYTES])
            .collect()
    }

    pub(crate) fn active_dimensions(&self) -> (usize, usize) {
        if self.hires_mode {
            HIGH_RES_VIEWPORT
        } else {
            LOW_RES_VIEWPORT
        }
    }

    /// Fetches, decodes and executes one instruction, if the machine is
    /// runnable. Unknown opcodes are a soft fault: the program counter
    /// advances and execution continues. Hard faults halt the machine.
    pub fn step(&mut self) -> StepResult {
        if self.halted {
            return StepResult::Halted;
        }
        if self.keypad.key_wait().is_some() {
            return StepResult::Blocked;
        }
        match self.fetch_and_execute() {
            Ok(()) => StepResult::Executed,
            Err(fault) => {
                self.halted = true;
                let state_snapshot_dump = self.state_snapshot();
                self.last_fault = Some(MachineError {
                    state_snapshot_dump,
                    inner_error: fault,
                });
                StepResult::Halted
            }
        }
    }

    fn fetch_and_execute(&mut self) -> Result<(), ErrorDetail> {
        if self.program_counter as usize >= MEMORY_SIZE_BYTES - 1 {
            return Err(ErrorDetail::ProgramCounterOutOfBounds {
                pc: self.program_counter,
            });
        }
        let opcode = self.memory.read_two_bytes(self.program_counter)?;
        match Instruction::decode_from(opcode) {
            Ok(instruction) => self.execute(instruction),
            Err(_unknown) => {
                self.program_counter = self.program_counter.wrapping_add(2);
                Ok(())
            }
        }
    }

    /// Delivers one 60 Hz timer decrement pulse.
    pub fn tick_timers(&mut self) {
        if self.delay_timer > 0 {
            self.delay_timer -= 1;
        }
        if self.sound_timer > 0 {
            self.sound_timer -= 1;
        }
    }

    /// Returns whether `DXYN` has run with `display_wait` active since the
    /// last call, clearing the flag. The scheduler consults this after each
    /// `step()` to decide whether to keep issuing further steps this frame;
    /// the core itself places no significance on the flag.
    pub(crate) fn take_display_wait_pending(&mut self) -> bool {
        let pending = self.display_wait_pending;
        self.display_wait_pending = false;
        pending
    }

    /// Marks `key` pressed. If a key-wait is pending, this press edge
    /// satisfies it: the destination register is written and `pc` advances.
    pub fn press(&mut self, key: u8) -> Result<(), ErrorDetail> {
        if let Some(key_wait) = self.keypad.press(key)? {
            self.variable_registers[key_wait.register] = key;
            self.program_counter = self.program_counter.wrapping_add(2);
        }
        Ok(())
    }

    /// Marks `key` released.
    pub fn release(&mut self, key: u8) -> Result<(), ErrorDetail> {
        self.keypad.release(key)
    }

    /// Returns true iff `sound_timer > 0`.
    pub fn sound_active(&self) -> bool {
        self.sound_timer > 0
    }

    /// Returns the current framebuffer contents for the active viewport,
    /// clearing `draw_dirty`.
    pub fn framebuffer_snapshot(&mut self) -> FramebufferSnapshot {
        let (width, height) = self.active_dimensions();
        let dirty = self.draw_dirty;
        self.draw_dirty = false;
        FramebufferSnapshot {
            width,
            height,
            bits: self.framebuffer.active_viewport_bits(width, height),
            dirty,
        }
    }

    /// Returns a point-in-time diagnostic summary of machine state.
    pub(crate) fn state_snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            program_counter: self.program_counter,
            index_register: self.index_register,
            variable_registers: self.variable_registers,
            delay_timer: self.delay_timer,
            sound_timer: self.sound_timer,
            cycles: self.cycles,
            halted: self.halted,
        }
    }

    /// Returns the cause of the most recent hard fault, if any, bundled with
    /// a snapshot of machine state at the moment it occurred. Retained until
    /// the next `reset()`/`set_state()`.
    pub fn last_fault(&self) -> Option<MachineError> {
        self.last_fault.clone()
    }

    /// Returns true once the machine has halted, whether from a hard fault
    /// or an explicit `EXIT` (`00FD`).
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Returns the number of instructions executed since the last reset.
    pub fn cycle_count(&self) -> u64 {
        self.cycles
    }

    /// Serializes all mutable machine state into an opaque byte string; see
    /// the crate-level snapshot format documentation for the exact layout.
    pub fn get_state(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(4096 + 16 + 2 + 2 + 32 + 1 + 1 + 1 + 1 + 8 + 1024 + 2);
        buf.extend_from_slice(&self.memory.bytes);
        buf.extend_from_slice(&self.variable_registers);
        buf.extend_from_slice(&self.index_register.to_le_bytes());
        buf.extend_from_slice(&self.program_counter.to_le_bytes());
        for slot in self.stack.bytes.iter() {
            buf.extend_from_slice(&slot.to_le_bytes());
        }
        buf.push(self.stack.pointer as u8);
        buf.push(self.delay_timer);
        buf.push(self.sound_timer);
        buf.push(self.hires_mode as u8);
        buf.extend_from_slice(&self.rpl_flags);
        buf.extend_from_slice(&self.framebuffer.packed_bytes());
        match self.keypad.key_wait() {
            None => {
                buf.push(0);
                buf.push(0);
            }
            Some(key_wait) => {
                buf.push(1);
                buf.push(key_wait.register as u8);
            }
        }
        buf
    }

    /// Restores machine state from a byte string produced by [Processor::get_state].
    /// On failure, the machine is left exactly as it was before the call.
    pub fn set_state(&mut self, bytes: &[u8]) -> Result<(), ErrorDetail> {
        const MEMORY_LEN: usize = MEMORY_SIZE_BYTES;
        const FRAMEBUFFER_LEN: usize = 1024;
        let expected_len = MEMORY_LEN + 16 + 2 + 2 + 32 + 1 + 1 + 1 + 1 + 8 + FRAMEBUFFER_LEN + 2;
        if bytes.len() != expected_len {
            return Err(ErrorDetail::InvalidSnapshot {
                reason: "unexpected snapshot length",
            });
        }
        let mut offset = 0;
        let memory_bytes = &bytes[offset..offset + MEMORY_LEN];
        offset += MEMORY_LEN;
        let registers = &bytes[offset..offset + 16];
        offset += 16;
        let index_register = u16::from_le_bytes([bytes[offset], bytes[offset + 1]]);
        offset += 2;
        let program_counter = u16::from_le_bytes([bytes[offset], bytes[offset + 1]]);
        offset += 2;
        let mut stack_values = [0u16; 16];
        for slot in stack_values.iter_mut() {
            *slot = u16::from_le_bytes([bytes[offset], bytes[offset + 1]]);
            offset += 2;
        }
        let stack_pointer = bytes[offset] as usize;
        offset += 1;
        let delay_timer = bytes[offset];
        offset += 1;
        let sound_timer = bytes[offset];
        offset += 1;
        let hires_mode = bytes[offset] != 0;
        offset += 1;
        let mut rpl_flags = [0u8; 8];
        rpl_flags.copy_from_slice(&bytes[offset..offset + 8]);
        offset += 8;
        let framebuffer_bytes = &bytes[offset..offset + FRAMEBUFFER_LEN];
        offset += FRAMEBUFFER_LEN;
        let key_wait_tag = bytes[offset];
        offset += 1;
        let key_wait_register = bytes[offset];

        if stack_pointer > 16 {
            return Err(ErrorDetail::InvalidSnapshot {
                reason: "stack pointer out of range",
            });
        }
        if key_wait_tag > 1 || (key_wait_tag == 1 && key_wait_register > 15) {
            return Err(ErrorDetail::InvalidSnapshot {
                reason: "malformed key-wait tag",
            });
        }

        self.memory.bytes.copy_from_slice(memory_bytes);
        self.variable_registers.copy_from_slice(registers);
        self.index_register = index_register;
        self.program_counter = program_counter;
        self.stack.bytes = stack_values;
        self.stack.pointer = stack_pointer;
        self.delay_timer = delay_timer;
        self.sound_timer = sound_timer;
        self.hires_mode = hires_mode;
        self.rpl_flags = rpl_flags;
        self.framebuffer.set_packed_bytes(framebuffer_bytes);
        self.keypad.clear();
        if key_wait_tag == 1 {
            self.keypad.begin_key_wait(key_wait_register as usize);
        }
        self.halted = false;
        self.display_wait_pending = false;
        self.draw_dirty = true;
        self.cycles = 0;
        self.last_fault = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_resets_pc_and_installs_fonts() {
        let processor = Processor::new(Quirks::cosmac());
        assert_eq!(processor.program_counter, PROGRAM_START_ADDRESS);
        assert_eq!(processor.memory.read_byte(FONT_START_ADDRESS).unwrap(), 0xF0);
        assert_eq!(
            processor.memory.read_byte(HIRES_FONT_START_ADDRESS).unwrap(),
            0x3C
        );
    }

    #[test]
    fn test_load_rom_and_step() {
        let mut processor = Processor::new(Quirks::cosmac());
        processor.load_rom(vec![0x60, 0x05]).unwrap();
        assert_eq!(processor.step(), StepResult::Executed);
        assert_eq!(processor.variable_registers[0], 0x05);
        assert_eq!(processor.program_counter, PROGRAM_START_ADDRESS + 2);
    }

    #[test]
    fn test_load_rom_too_large_is_rejected_and_state_unchanged() {
        let mut processor = Processor::new(Quirks::cosmac());
        processor.load_rom(vec![0x60, 0x05]).unwrap();
        let oversized = vec![0u8; 4000];
        assert!(processor.load_rom(oversized).is_err());
        // Untouched: still the small program from before the rejected load.
        assert_eq!(processor.variable_registers, [0; 16]);
        assert_eq!(processor.program_counter, PROGRAM_START_ADDRESS);
    }

    #[test]
    fn test_reset_clears_everything_except_rpl_flags() {
        let mut processor = Processor::new(Quirks::cosmac());
        processor.rpl_flags[0] = 0x42;
        processor.variable_registers[0] = 0xFF;
        processor.halted = true;
        processor.reset();
        assert_eq!(processor.variable_registers, [0; 16]);
        assert!(!processor.halted);
        assert_eq!(processor.rpl_flags[0], 0x42);
    }

    #[test]
    fn test_unknown_opcode_is_soft_and_advances() {
        let mut processor = Processor::new(Quirks::cosmac());
        processor.load_rom(vec![0xFF, 0xFF]).unwrap();
        assert_eq!(processor.step(), StepResult::Executed);
        assert_eq!(processor.program_counter, PROGRAM_START_ADDRESS + 2);
        assert!(!processor.halted);
    }

    #[test]
    fn test_pc_out_of_bounds_is_a_hard_fault() {
        let mut processor = Processor::new(Quirks::cosmac());
        processor.program_counter = (MEMORY_SIZE_BYTES - 1) as u16;
        assert_eq!(processor.step(), StepResult::Halted);
        assert!(processor.halted);
        assert_eq!(processor.step(), StepResult::Halted);
    }

    #[test]
    fn test_state_round_trip() {
        let mut processor = Processor::new(Quirks::cosmac());
        processor.load_rom(vec![0x60, 0x2A, 0xA3, 0x00]).unwrap();
        processor.step().eq(&StepResult::Executed);
        processor.step().eq(&StepResult::Executed);
        let snapshot = processor.get_state();
        let mut restored = Processor::new(Quirks::cosmac());
        restored.set_state(&snapshot).unwrap();
        assert_eq!(restored.variable_registers, processor.variable_registers);
        assert_eq!(restored.program_counter, processor.program_counter);
        assert_eq!(restored.index_register, processor.index_register);
    }

    #[test]
    fn test_set_state_rejects_wrong_length() {
        let mut processor = Processor::new(Quirks::cosmac());
        assert!(processor.set_state(&[0u8; 10]).is_err());
    }

    #[test]
    fn test_press_release_without_step_leaves_state_unchanged() {
        let mut processor = Processor::new(Quirks::cosmac());
        processor.press(0x5).unwrap();
        processor.release(0x5).unwrap();
        assert_eq!(processor.keypad.pressed_mask(), 0);
    }

    #[test]
    fn test_draw_with_display_wait_does_not_block_step() {
        // Cosmac quirks have `display_wait` set; drawing still reports
        // `Executed`, never `Blocked` — the core has no fourth suspension
        // state, only the scheduler acts on the pending flag.
        let mut processor = Processor::new(Quirks::cosmac());
        processor.load_rom(vec![0xD0, 0x01]).unwrap();
        assert_eq!(processor.step(), StepResult::Executed);
        assert!(processor.take_display_wait_pending());
        assert!(!processor.take_display_wait_pending());
    }

    #[test]
    fn test_draw_without_display_wait_quirk_never_sets_pending() {
        let mut processor = Processor::new(Quirks {
            display_wait: false,
            ..Quirks::cosmac()
        });
        processor.load_rom(vec![0xD0, 0x01]).unwrap();
        assert_eq!(processor.step(), StepResult::Executed);
        assert!(!processor.take_display_wait_pending());
    }
}

/// End-to-end programs run from a fresh reset, mirroring how a host would
/// drive the processor: load a ROM, call `step()` a known number of times,
/// inspect the resulting state.
#[cfg(test)]
mod scenario_tests {
    use super::*;

    fn run(rom: Vec<u8>, steps: usize) -> Processor {
        let mut processor = Processor::new(Quirks::cosmac());
        processor.load_rom(rom).unwrap();
        for _ in 0..steps {
            processor.step();
        }
        processor
    }

    #[test]
    fn test_scenario_add_without_carry() {
        let processor = run(vec![0x60, 0x05, 0x61, 0x07, 0x80, 0x14], 3);
        assert_eq!(processor.variable_registers[0], 0x0C);
        assert_eq!(processor.variable_registers[1], 0x07);
        assert_eq!(processor.variable_registers[0xF], 0);
    }

    #[test]
    fn test_scenario_add_with_carry_wraps() {
        let processor = run(vec![0x60, 0xFF, 0x61, 0x01, 0x80, 0x14], 3);
        assert_eq!(processor.variable_registers[0], 0x00);
        assert_eq!(processor.variable_registers[0xF], 1);
    }

    #[test]
    fn test_scenario_draw_glyph_at_origin() {
        // ANNN -> I=0x210; v0=0; v1=0; DXYN draws the 8x5 "0" glyph stored at
        // I; JP loops back on itself. Padding bytes carry the glyph from
        // 0x20A up to I=0x210.
        let rom = vec![
            0xA2, 0x10, // I = 0x210
            0x60, 0x00, // v0 = 0
            0x61, 0x00, // v1 = 0
            0xD0, 0x15, // draw 8x5 sprite at (v0, v1)
            0x12, 0x08, // JP 0x208 (self-loop)
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // padding up to 0x210
            0xF0, 0x90, 0x90, 0x90, 0xF0, // glyph "0"
        ];
        let mut processor = Processor::new(Quirks::cosmac());
        processor.load_rom(rom).unwrap();
        for _ in 0..5 {
            processor.step();
        }
        assert_eq!(processor.variable_registers[0xF], 0);
        let snapshot = processor.framebuffer_snapshot();
        assert!(snapshot.dirty);
        let width = snapshot.width;
        assert_eq!(snapshot.bits[0], 1); // top-left pixel of "F0" row set
        assert_eq!(snapshot.bits[4], 0);
        assert_eq!(snapshot.bits[width], 1); // second row, leftmost column ("90")
    }

    #[test]
    fn test_scenario_call_then_return_lands_after_call() {
        // CALL 0x204 (the RET two bytes later); the intervening JP at 0x202
        // is never reached because control returns to 0x202 after RET pops.
        let processor = run(vec![0x22, 0x04, 0x12, 0x02, 0x00, 0xEE], 2);
        assert_eq!(processor.program_counter, 0x202);
        assert_eq!(processor.stack.pointer, 0);
    }

    #[test]
    fn test_scenario_timer_reaches_zero_after_ten_ticks() {
        let mut processor = Processor::new(Quirks::cosmac());
        processor.load_rom(vec![0x60, 0x0A, 0xF0, 0x15]).unwrap();
        processor.step();
        processor.step();
        assert_eq!(processor.delay_timer, 10);
        for _ in 0..10 {
            processor.tick_timers();
        }
        assert_eq!(processor.delay_timer, 0);
    }

    #[test]
    fn test_scenario_key_wait_resolves_on_press() {
        let mut processor = Processor::new(Quirks::cosmac());
        processor.load_rom(vec![0xF0, 0x0A, 0x60, 0xAA]).unwrap();
        assert_eq!(processor.step(), StepResult::Executed); // arms the wait
        assert_eq!(processor.step(), StepResult::Blocked);
        processor.press(0x7).unwrap();
        assert_eq!(processor.variable_registers[0], 0x07);
        assert_eq!(processor.program_counter, 0x202);
    }
}
