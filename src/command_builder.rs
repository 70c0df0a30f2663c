use crate::command_spec::{select_range, CommandSpec};
use crate::config::Config;
use crate::error::{LaunchError, Result};
use crate::launcher::{self, LaunchMode, Strategy};
use crate::util::env_value_to_string;
use rhai::Dynamic;
use serde::Serialize;
use std::ffi::OsString;
use std::fmt;
use std::sync::Arc;

/// Accumulates a binary, its arguments and an environment list, then hands
/// them to the launcher.
///
/// ```no_run
/// use rhai_launcher::{CommandBuilder, Config};
///
/// let mut cmd = CommandBuilder::new("x86_64-linux-gnu-", Config::from_env())
///     .args(["-O2"])
///     .inherit(1);
/// cmd.look_path("gcc")?;
/// cmd.execute()?;
/// # Ok::<(), rhai_launcher::LaunchError>(())
/// ```
#[derive(Clone, Debug)]
pub struct CommandBuilder {
    pub(crate) config: Arc<Config>,
    pub(crate) command: CommandSpec,
}

impl CommandBuilder {
    pub fn new(prefix: impl Into<String>, config: Config) -> Self {
        Self::with_shared_config(Arc::new(config), prefix.into())
    }

    pub(crate) fn with_shared_config(config: Arc<Config>, prefix: String) -> Self {
        Self {
            config,
            command: CommandSpec::new(prefix),
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.command.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.command.args.push(arg.into());
        self
    }

    /// Appends raw `KEY=VALUE` entries.
    pub fn env<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.command.env.extend(entries.into_iter().map(Into::into));
        self
    }

    /// Appends `KEY=VALUE` for each pair. String values are used as-is,
    /// other values are rendered and escaped to ASCII.
    pub fn env_map<I, K>(mut self, map: I) -> Self
    where
        I: IntoIterator<Item = (K, Dynamic)>,
        K: Into<String>,
    {
        for (key, value) in map {
            let key: String = key.into();
            let value = env_value_to_string(&value);
            self.command.env.push(format!("{key}={value}"));
        }
        self
    }

    /// Forwards this process's own arguments from index `from` onwards and
    /// copies its whole environment. A negative `from` counts back from the
    /// end.
    pub fn inherit(self, from: i64) -> Self {
        let (args, env) = current_process();
        let to = i64::try_from(args.len()).unwrap_or(i64::MAX);
        self.inherit_from(from, to, args, env)
    }

    /// Like [`inherit`](Self::inherit) with an explicit, possibly negative,
    /// end index.
    pub fn inherit_window(self, from: i64, to: i64) -> Self {
        let (args, env) = current_process();
        self.inherit_from(from, to, args, env)
    }

    /// Window selection over an explicit argument list and environment.
    pub fn inherit_from<A, E>(mut self, from: i64, to: i64, args: A, env: E) -> Self
    where
        A: IntoIterator<Item = String>,
        E: IntoIterator<Item = String>,
    {
        self.command.env.extend(env);
        let args: Vec<String> = args.into_iter().collect();
        match select_range(from, to, args.len()) {
            Some(range) => {
                log::debug!(
                    "inherit from:{from} to:{to} -> {}..{} of {}",
                    range.start,
                    range.end,
                    args.len()
                );
                self.command.args.extend_from_slice(&args[range]);
            }
            None => {
                log::debug!("inherit from:{from} to:{to} selects nothing of {}", args.len());
            }
        }
        self
    }

    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.command.binary = binary.into();
        self
    }

    /// Resolves `prefix + name` on the search path and records the result as
    /// the binary. On failure the builder is left untouched.
    pub fn look_path(&mut self, name: &str) -> Result<&mut Self> {
        let wanted = format!("{}{name}", self.command.prefix);
        let found = launcher::resolve(self.config.search_paths(), &wanted)?;
        self.command.binary = found.to_string_lossy().into_owned();
        Ok(self)
    }

    pub fn prefix(&self) -> &str {
        &self.command.prefix
    }

    pub fn binary(&self) -> &str {
        &self.command.binary
    }

    pub fn arguments(&self) -> &[String] {
        &self.command.args
    }

    pub fn environment(&self) -> &[String] {
        &self.command.env
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Launches with the configured [`LaunchMode`]. With the default
    /// `Replace` mode this only returns on failure.
    pub fn execute(self) -> Result<()> {
        let mode = self.config.mode();
        self.execute_with(&mode)
    }

    pub fn spawn(self) -> Result<()> {
        self.execute_with(&LaunchMode::Spawn)
    }

    pub fn execute_with<S>(self, strategy: &S) -> Result<()>
    where
        S: Strategy + ?Sized,
    {
        if self.command.binary.is_empty() {
            return Err(LaunchError::MissingBinary);
        }
        if self.config.is_debug() {
            self.dump();
        }
        launcher::dispatch(
            self.config.search_paths(),
            &self.command.argv(),
            &self.command.env,
            strategy,
        )
    }

    fn dump(&self) {
        match self.render_dump() {
            Ok(yaml) => eprintln!("{yaml}"),
            Err(err) => log::warn!("could not render command dump: {err}"),
        }
    }

    fn render_dump(&self) -> std::result::Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&Dump {
            binary: &self.command.binary,
            args: &self.command.args,
        })
    }
}

#[derive(Serialize)]
struct Dump<'a> {
    binary: &'a str,
    args: &'a [String],
}

impl fmt::Display for CommandBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.command, f)
    }
}

fn current_process() -> (Vec<String>, Vec<String>) {
    let args = std::env::args_os().skip(1).map(lossy).collect();
    let env = std::env::vars_os()
        .map(|(key, value)| format!("{}={}", lossy(key), lossy(value)))
        .collect();
    (args, env)
}

fn lossy(value: OsString) -> String {
    value.to_string_lossy().into_owned()
}
