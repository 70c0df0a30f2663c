#![doc = include_str!("../README.md")]

mod command_builder;
mod command_spec;
mod config;
mod error;
pub mod launcher;
mod registration;
mod util;

pub use command_builder::CommandBuilder;
pub use config::{Config, DEBUG_ENV_VAR};
pub use error::{LaunchError, Result};
pub use launcher::{launch, LaunchMode, Strategy};
pub use registration::{builder_module, module, register, LauncherPackage, MODULE_NAME};

use rhai::EvalAltResult;

#[cfg(not(feature = "no_index"))]
pub(crate) type RhaiArray = rhai::Array;
#[cfg(feature = "no_index")]
pub(crate) type RhaiArray = Vec<rhai::Dynamic>;

type RhaiResult<T> = std::result::Result<T, Box<EvalAltResult>>;
