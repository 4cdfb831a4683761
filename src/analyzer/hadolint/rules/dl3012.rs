//! DL3012: Multiple HEALTHCHECK instructions
//!
//! Only one HEALTHCHECK instruction is allowed per stage.

use crate::analyzer::hadolint::parser::instruction::Instruction;
use crate::analyzer::hadolint::rules::{custom_rule, CustomRule, RuleState};
use crate::analyzer::hadolint::shell::ParsedShell;
use crate::analyzer::hadolint::types::Severity;

pub fn rule() -> CustomRule<impl Fn(&mut RuleState, u32, &Instruction, Option<&ParsedShell>) + Send + Sync> {
    custom_rule(
        "DL3012",
        Severity::Error,
        "Multiple `HEALTHCHECK` instructions.",
        |state, line, instr, _shell| {
            match instr {
                Instruction::From(_) => {
                    // Reset healthcheck count for new stage
                    state.data.set_int("healthcheck_count", 0);
                }
                Instruction::Healthcheck(_) => {
                    let count = state.data.get_int("healthcheck_count");
                    if count > 0 {
                        state.add_failure(
                            "DL3012",
                            Severity::Error,
                            "Multiple `HEALTHCHECK` instructions.",
                            line,
                        );
                    }
                    state.data.set_int("healthcheck_count", count + 1);
                }
                _ => {}
            }
        },
    )
}
