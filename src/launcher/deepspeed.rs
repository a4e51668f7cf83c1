//! launcher::deepspeed
//!
//! The real launcher: spawns the distributed launcher process.

use std::process::Command;

use crate::core::invocation::Invocation;

use super::{LaunchError, Launcher};

/// Dispatches invocations through the `deepspeed` process launcher.
///
/// The child inherits gantry's stdio so training logs stream straight to
/// the terminal. Nothing is captured or interpreted.
#[derive(Debug, Default)]
pub struct DeepspeedLauncher;

impl Launcher for DeepspeedLauncher {
    fn launch(&self, invocation: &Invocation) -> Result<i32, LaunchError> {
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .envs(invocation.env.iter().map(|(k, v)| (k, v)))
            .status()
            .map_err(|e| LaunchError::Spawn {
                program: invocation.program.clone(),
                source: e,
            })?;

        status.code().ok_or_else(|| LaunchError::Terminated {
            program: invocation.program.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::invocation::Invocation;
    use std::path::PathBuf;

    #[test]
    fn missing_program_is_a_spawn_error() {
        let invocation = Invocation {
            program: PathBuf::from("gantry-test-no-such-launcher"),
            args: vec![],
            env: vec![],
        };

        let result = DeepspeedLauncher.launch(&invocation);
        assert!(matches!(result, Err(LaunchError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn exit_code_is_propagated() {
        // `false` is universally available and exits 1.
        let invocation = Invocation {
            program: PathBuf::from("false"),
            args: vec![],
            env: vec![],
        };

        let code = DeepspeedLauncher.launch(&invocation).unwrap();
        assert_eq!(code, 1);
    }
}
