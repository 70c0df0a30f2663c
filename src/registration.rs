use crate::command_builder::CommandBuilder;
use crate::config::Config;
use crate::RhaiResult;
use rhai::packages::Package;
use rhai::plugin::*;
use rhai::{Engine, ImmutableString, Module, Shared, INT};
use std::sync::Arc;

/// Namespace the launcher module is registered under, as in
/// `launcher::command("arm-none-eabi-")`.
pub const MODULE_NAME: &str = "launcher";

pub fn module(config: Config) -> Module {
    let shared = Arc::new(config);
    let mut module = Module::new();
    attach_custom_types(&mut module);

    {
        let config = Arc::clone(&shared);
        module.set_native_fn("command", move || -> RhaiResult<CommandBuilder> {
            Ok(CommandBuilder::with_shared_config(
                Arc::clone(&config),
                String::new(),
            ))
        });
    }

    {
        let config = Arc::clone(&shared);
        module.set_native_fn(
            "command",
            move |prefix: ImmutableString| -> RhaiResult<CommandBuilder> {
                Ok(CommandBuilder::with_shared_config(
                    Arc::clone(&config),
                    prefix.into(),
                ))
            },
        );
    }

    module
}

pub fn register(engine: &mut Engine, config: Config) {
    LauncherPackage::new(config).register_into_engine(engine);
}

pub fn builder_module() -> Module {
    let mut module = exported_module!(builder_api_module);
    attach_custom_types(&mut module);
    module
}

#[derive(Clone)]
pub struct LauncherPackage {
    builder_module: Shared<Module>,
    launcher_module: Shared<Module>,
}

impl LauncherPackage {
    pub fn new(config: Config) -> Self {
        Self {
            builder_module: builder_module().into(),
            launcher_module: module(config).into(),
        }
    }
}

impl Package for LauncherPackage {
    fn init(_: &mut Module) {}

    fn as_shared_module(&self) -> Shared<Module> {
        self.builder_module.clone()
    }

    fn register_into_engine(&self, engine: &mut Engine) -> &Self {
        engine.register_global_module(self.builder_module.clone());
        engine.register_global_module(self.launcher_module.clone());
        engine.register_static_module(MODULE_NAME, self.launcher_module.clone());
        self
    }
}

fn attach_custom_types(module: &mut Module) {
    module.set_custom_type::<CommandBuilder>("CommandBuilder");
}

#[export_module]
pub mod builder_api_module {
    use super::*;
    use crate::util::{dynamic_to_string, env_value_to_string, map_launch_err};
    use crate::RhaiArray;
    use rhai::Map as RhaiMap;

    #[rhai_fn(name = "args", return_raw)]
    pub fn builder_args(builder: CommandBuilder, args: RhaiArray) -> RhaiResult<CommandBuilder> {
        let mut list = Vec::with_capacity(args.len());
        for arg in args {
            list.push(dynamic_to_string(arg, "command argument")?);
        }
        Ok(builder.args(list))
    }

    #[rhai_fn(name = "arg")]
    pub fn builder_arg(builder: CommandBuilder, arg: ImmutableString) -> CommandBuilder {
        builder.arg(arg)
    }

    #[rhai_fn(name = "env")]
    pub fn builder_env(builder: CommandBuilder, entry: ImmutableString) -> CommandBuilder {
        builder.env([entry])
    }

    #[rhai_fn(name = "env", return_raw)]
    pub fn builder_env_list(
        builder: CommandBuilder,
        entries: RhaiArray,
    ) -> RhaiResult<CommandBuilder> {
        let mut list = Vec::with_capacity(entries.len());
        for entry in entries {
            list.push(dynamic_to_string(entry, "environment entry")?);
        }
        Ok(builder.env(list))
    }

    #[rhai_fn(name = "env_map")]
    pub fn builder_env_map(builder: CommandBuilder, map: RhaiMap) -> CommandBuilder {
        builder.env_map(map)
    }

    #[rhai_fn(name = "inherit")]
    pub fn builder_inherit(builder: CommandBuilder, from: INT) -> CommandBuilder {
        builder.inherit(i64::from(from))
    }

    #[rhai_fn(name = "inherit")]
    pub fn builder_inherit_window(builder: CommandBuilder, from: INT, to: INT) -> CommandBuilder {
        builder.inherit_window(i64::from(from), i64::from(to))
    }

    #[rhai_fn(name = "with_binary")]
    pub fn builder_with_binary(builder: CommandBuilder, binary: ImmutableString) -> CommandBuilder {
        builder.with_binary(binary)
    }

    #[rhai_fn(name = "look_path", return_raw)]
    pub fn builder_look_path(
        builder: &mut CommandBuilder,
        name: ImmutableString,
    ) -> RhaiResult<CommandBuilder> {
        builder.look_path(&name).map_err(map_launch_err)?;
        Ok(builder.clone())
    }

    #[rhai_fn(get = "binary", pure)]
    pub fn builder_binary(builder: &mut CommandBuilder) -> String {
        builder.binary().to_string()
    }

    #[rhai_fn(get = "prefix", pure)]
    pub fn builder_prefix(builder: &mut CommandBuilder) -> String {
        builder.prefix().to_string()
    }

    #[rhai_fn(global, name = "to_string", pure)]
    pub fn builder_to_string(builder: &mut CommandBuilder) -> String {
        builder.to_string()
    }

    #[rhai_fn(global, name = "to_debug", pure)]
    pub fn builder_to_debug(builder: &mut CommandBuilder) -> String {
        format!("CommandBuilder({builder})")
    }

    #[rhai_fn(name = "execute", return_raw)]
    pub fn builder_execute(builder: CommandBuilder) -> RhaiResult<()> {
        builder.execute().map_err(map_launch_err)
    }

    /// `spawn` is reserved in Rhai, so the detached launch is `start`.
    #[rhai_fn(name = "start", return_raw)]
    pub fn builder_start(builder: CommandBuilder) -> RhaiResult<()> {
        builder.spawn().map_err(map_launch_err)
    }

    /// Renders a map value the way `env_map` would, for scripts that build
    /// entries by hand.
    #[rhai_fn(name = "env_value")]
    pub fn env_value(value: Dynamic) -> String {
        env_value_to_string(&value)
    }
}
