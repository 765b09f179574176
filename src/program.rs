use crate::error::ErrorDetail;
use crate::memory::MEMORY_SIZE_BYTES;

/// Address at which ROM images are loaded.
pub const PROGRAM_START_ADDRESS: u16 = 0x200;
/// Largest payload `load_rom`/[Program::set_program_data] will accept.
pub const MAX_PROGRAM_SIZE_BYTES: usize = MEMORY_SIZE_BYTES - PROGRAM_START_ADDRESS as usize;

/// An abstraction of a CHIP-8 ROM, ready for loading into the virtual machine.
pub struct Program {
    /// A byte vector containing the program data as loaded from the ROM.
    program_data: Vec<u8>,
}

impl Default for Program {
    /// Constructor that returns an empty [Program] instance.
    fn default() -> Self {
        Program {
            program_data: Vec::new(),
        }
    }
}

impl Program {
    /// Constructor that returns a [Program] instance representing the passed program data.
    ///
    /// Returns [ErrorDetail::ProgramTooLarge] if `data` exceeds [MAX_PROGRAM_SIZE_BYTES].
    pub fn new(data: Vec<u8>) -> Result<Self, ErrorDetail> {
        let mut program = Program::default();
        program.set_program_data(data)?;
        Ok(program)
    }

    /// Sets the program data as per the specified byte vector.
    ///
    /// Returns [ErrorDetail::ProgramTooLarge] if `data` exceeds [MAX_PROGRAM_SIZE_BYTES].
    pub fn set_program_data(&mut self, data: Vec<u8>) -> Result<(), ErrorDetail> {
        if data.len() > MAX_PROGRAM_SIZE_BYTES {
            return Err(ErrorDetail::ProgramTooLarge {
                size: data.len(),
                limit: MAX_PROGRAM_SIZE_BYTES,
            });
        }
        self.program_data = data;
        Ok(())
    }

    /// Returns a reference to the program data held in this instance.
    pub fn program_data(&self) -> &Vec<u8> {
        &self.program_data
    }

    /// Returns the size of the instance's program data (in bytes).
    pub(crate) fn program_data_size(&self) -> usize {
        self.program_data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test_program() -> Vec<u8> {
        vec![0xA1, 0x14, 0x0C, 0xFD, 0xA3]
    }

    #[test]
    fn test_program_data() {
        let mut program = Program::default();
        let test_program = setup_test_program();
        program.set_program_data(test_program.clone()).unwrap();
        assert_eq!(program.program_data(), &test_program);
    }

    #[test]
    fn test_program_data_size() {
        let mut program = Program::default();
        let test_program = setup_test_program();
        program.set_program_data(test_program.clone()).unwrap();
        assert_eq!(program.program_data_size(), test_program.len());
    }

    #[test]
    fn test_program_too_large_is_rejected() {
        let oversized = vec![0u8; MAX_PROGRAM_SIZE_BYTES + 1];
        assert_eq!(
            Program::default().set_program_data(oversized).unwrap_err(),
            ErrorDetail::ProgramTooLarge {
                size: MAX_PROGRAM_SIZE_BYTES + 1,
                limit: MAX_PROGRAM_SIZE_BYTES,
            }
        );
    }

    #[test]
    fn test_program_at_exact_limit_is_accepted() {
        let exact = vec![0u8; MAX_PROGRAM_SIZE_BYTES];
        assert!(Program::new(exact).is_ok());
    }
}
