//! Binary resolution and launch strategies.
//!
//! [`launch`] re-resolves `args[0]` on the search path and hands the result
//! to a [`Strategy`]. Two strategies ship with the crate: [`exec`], which
//! replaces the current process image, and [`spawn`], which starts a
//! detached child and returns.

use crate::error::{LaunchError, Result};
use crate::util::env_pairs;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

/// Anything that can run a resolved binary with an argv and an environment
/// list. Implemented for plain functions and closures of the same shape.
pub trait Strategy {
    fn launch(&self, binary: &Path, args: &[String], env: &[String]) -> Result<()>;
}

impl<F> Strategy for F
where
    F: Fn(&Path, &[String], &[String]) -> Result<()>,
{
    fn launch(&self, binary: &Path, args: &[String], env: &[String]) -> Result<()> {
        self(binary, args, env)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LaunchMode {
    /// Replace the current process image.
    #[default]
    Replace,
    /// Start a child process and return without waiting.
    Spawn,
}

impl Strategy for LaunchMode {
    fn launch(&self, binary: &Path, args: &[String], env: &[String]) -> Result<()> {
        match self {
            LaunchMode::Replace => exec(binary, args, env),
            LaunchMode::Spawn => spawn(binary, args, env),
        }
    }
}

/// Resolves `args[0]` on `PATH` and runs it through `strategy`.
pub fn launch<S>(args: &[String], env: &[String], strategy: &S) -> Result<()>
where
    S: Strategy + ?Sized,
{
    dispatch(None, args, env, strategy)
}

pub(crate) fn dispatch<S>(
    search_path: Option<&OsStr>,
    args: &[String],
    env: &[String],
    strategy: &S,
) -> Result<()>
where
    S: Strategy + ?Sized,
{
    let name = args.first().ok_or(LaunchError::MissingCommand)?;
    let binary = resolve(search_path, name)?;
    log::debug!("resolved {name} to {}", binary.display());
    log::trace!("launching {} with {} args", binary.display(), args.len());
    strategy.launch(&binary, args, env)
}

pub(crate) fn resolve(search_path: Option<&OsStr>, name: &str) -> Result<PathBuf> {
    let found = match search_path {
        Some(paths) => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            which::which_in(name, Some(paths), cwd)
        }
        None => which::which(name),
    };
    found.map_err(|source| LaunchError::LookupFailed {
        name: name.to_string(),
        source,
    })
}

/// Replaces the current process with `binary`. Only returns on failure.
///
/// `args[0]` is passed through as argv[0] and the environment is exactly
/// `env`; nothing is inherited from the current process besides open file
/// descriptors, signal dispositions and the pid.
#[cfg(unix)]
pub fn exec(binary: &Path, args: &[String], env: &[String]) -> Result<()> {
    use std::os::unix::process::CommandExt;
    use std::process::Command;

    let mut command = Command::new(binary);
    if let Some((arg0, rest)) = args.split_first() {
        command.arg0(arg0).args(rest);
    }
    command.env_clear().envs(env_pairs(env));

    let source = command.exec();
    Err(LaunchError::LaunchFailed {
        binary: binary.to_path_buf(),
        source,
    })
}

/// Without in-place replacement, run the binary to completion with the
/// caller's stdio and exit with its status.
#[cfg(not(unix))]
pub fn exec(binary: &Path, args: &[String], env: &[String]) -> Result<()> {
    use std::process::{Command, Stdio};

    let status = Command::new(binary)
        .args(args.iter().skip(1))
        .env_clear()
        .envs(env_pairs(env))
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| LaunchError::LaunchFailed {
            binary: binary.to_path_buf(),
            source,
        })?;
    std::process::exit(status.code().unwrap_or(1));
}

/// Starts `binary` as a child with stdout wired to ours and returns as soon
/// as it is running. The child is never waited on.
///
/// An empty `env` leaves the child with our environment; otherwise it gets
/// exactly `env`.
pub fn spawn(binary: &Path, args: &[String], env: &[String]) -> Result<()> {
    let failed = |source: io::Error| LaunchError::LaunchFailed {
        binary: binary.to_path_buf(),
        source,
    };
    let stdout = os_pipe::dup_stdout().map_err(failed)?;
    let mut expression = duct::cmd(binary, args.iter().skip(1));
    if !env.is_empty() {
        expression = expression.full_env(env_pairs(env));
    }
    let _handle = expression
        .stdin_null()
        .stdout_file(stdout)
        .stderr_null()
        .unchecked()
        .start()
        .map_err(failed)?;
    log::debug!("spawned {}", binary.display());
    Ok(())
}
