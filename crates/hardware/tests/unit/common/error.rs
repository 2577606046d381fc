//! Error Classification Tests.
//!
//! Verifies the fatal/recoverable split that decides whether a step is rolled back
//! or the instruction is reported and skipped.

use rstest::rstest;
use rvss_core::common::error::SimError;
use rvss_core::common::reg::RegisterClass;
use rvss_core::config::IsaMode;

#[rstest]
#[case::memory(SimError::MemoryOutOfRange { address: 0x10, size: 4, memory_size: 0x10 })]
#[case::register(SimError::InvalidRegister { class: RegisterClass::Gpr, index: 32 })]
#[case::csr(SimError::InvalidCsr(0x1000))]
#[case::config(SimError::InvalidConfig("bad".into()))]
#[case::too_large(SimError::ProgramTooLarge { start: 0, len: 8, limit: 4 })]
fn bounds_and_setup_errors_are_fatal(#[case] error: SimError) {
    assert!(error.is_fatal(), "{error} should be fatal");
}

#[rstest]
#[case::mode(SimError::UnsupportedInMode { pc: 0, word: 0, mode: IsaMode::Rv32 })]
#[case::pipeline(SimError::UnsupportedInPipeline { pc: 0, word: 0 })]
#[case::rounding(SimError::InvalidRoundingMode { pc: 0, rm: 5 })]
#[case::syscall(SimError::UnknownSyscall { pc: 0, number: 99 })]
#[case::queue(SimError::InputQueueFull { capacity: 1 })]
#[case::undo(SimError::UndoUnavailable)]
#[case::breakpoint(SimError::MisalignedBreakpoint(3))]
#[case::line(SimError::UnknownLine(7))]
fn instruction_level_errors_are_recoverable(#[case] error: SimError) {
    assert!(!error.is_fatal(), "{error} should be recoverable");
}

#[test]
fn messages_include_the_offending_values() {
    let err = SimError::MemoryOutOfRange {
        address: 0xFFFF_FFFE,
        size: 4,
        memory_size: 0x1_0000_0000,
    };
    let text = err.to_string();
    assert!(text.contains("0xfffffffe"), "{text}");
    assert!(text.contains("4 byte(s)"), "{text}");

    let err = SimError::UnsupportedInMode {
        pc: 0x8,
        word: 0x0000_3003,
        mode: IsaMode::Rv32,
    };
    assert!(err.to_string().contains("rv32"));
}

#[test]
fn json_errors_convert_into_parse() {
    let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
    let err: SimError = json_err.into();
    assert!(matches!(err, SimError::Parse(_)));
    assert!(err.is_fatal());
}
