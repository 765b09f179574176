use crate::program::PROGRAM_START_ADDRESS;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The original COSMAC VIP's documented instruction rate.
pub const COSMAC_VIP_PROCESSOR_SPEED_HERTZ: u64 = 500;
/// A reasonable default instruction rate for the SUPER-CHIP/XO-CHIP dialects,
/// which ran noticeably faster hardware than the COSMAC VIP.
const DEFAULT_PROCESSOR_SPEED_HERTZ: u64 = 1000;

/// The six behavioral flags that distinguish CHIP-8 dialects from one another.
///
/// Each flag gates exactly one documented divergence; see the instruction
/// semantics in [crate::Processor] for where each is consulted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quirks {
    /// `8XY1`/`8XY2`/`8XY3` reset `v[0xF]` to zero.
    pub vf_reset: bool,
    /// `FX55`/`FX65` advance `i` by `x + 1` after the transfer.
    pub memory_increment: bool,
    /// `DXYN` yields until the next frame boundary before the next draw.
    pub display_wait: bool,
    /// Sprites clip at the active viewport edges instead of wrapping.
    pub clipping: bool,
    /// `8XY6`/`8XYE` shift `v[x]` in place instead of shifting `v[y]` into `v[x]`.
    pub shifting: bool,
    /// `BNNN` adds `v[x]` (the register named by the high nibble of `nnn`)
    /// instead of `v[0]`.
    pub jumping: bool,
}

impl Quirks {
    /// The original COSMAC VIP CHIP-8 behavior. This is the specification
    /// default.
    pub fn cosmac() -> Self {
        Quirks {
            vf_reset: true,
            memory_increment: true,
            display_wait: true,
            clipping: true,
            shifting: false,
            jumping: false,
        }
    }

    /// The CHIP-48 calculator dialect.
    pub fn chip48() -> Self {
        Quirks {
            vf_reset: false,
            memory_increment: false,
            display_wait: true,
            clipping: true,
            shifting: true,
            jumping: true,
        }
    }

    /// SUPER-CHIP 1.1, enabling the high-resolution/scroll/RPL opcode family.
    pub fn super_chip_11() -> Self {
        Quirks {
            vf_reset: false,
            memory_increment: false,
            display_wait: true,
            clipping: true,
            shifting: true,
            jumping: true,
        }
    }

    /// The XO-CHIP subset this crate implements (ranged register save/load,
    /// scroll-up): wrapping sprites instead of clipping, otherwise as
    /// SUPER-CHIP 1.1.
    pub fn xo_chip_subset() -> Self {
        Quirks {
            clipping: false,
            ..Quirks::super_chip_11()
        }
    }
}

impl Default for Quirks {
    fn default() -> Self {
        Quirks::cosmac()
    }
}

/// Start-up parameters for a virtual machine instance.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Options {
    pub processor_speed_hertz: u64,
    pub program_start_address: u16,
    pub quirks: Quirks,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            processor_speed_hertz: DEFAULT_PROCESSOR_SPEED_HERTZ,
            program_start_address: PROGRAM_START_ADDRESS,
            quirks: Quirks::default(),
        }
    }
}

impl Options {
    /// Loads a previously saved options file (JSON).
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Saves this instance to a file as JSON.
    pub fn save_to_file(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_quirks_match_cosmac() {
        assert_eq!(Quirks::default(), Quirks::cosmac());
    }

    #[test]
    fn test_xo_chip_subset_disables_clipping_only() {
        let xo = Quirks::xo_chip_subset();
        let sc11 = Quirks::super_chip_11();
        assert!(!xo.clipping);
        assert_eq!(
            Quirks {
                clipping: true,
                ..xo
            },
            sc11
        );
    }

    #[test]
    fn test_options_round_trip_through_json() {
        let options = Options {
            processor_speed_hertz: 1234,
            program_start_address: 0x200,
            quirks: Quirks::chip48(),
        };
        let serialized = serde_json::to_string(&options).unwrap();
        let deserialized: Options = serde_json::from_str(&serialized).unwrap();
        assert_eq!(options, deserialized);
    }
}
