use rhai::packages::Package;
use rhai::{Engine, EvalAltResult};
use rhai_launcher::{Config, LaunchMode, LauncherPackage};

fn main() -> Result<(), Box<EvalAltResult>> {
    env_logger::init();
    let mut engine = Engine::new();

    let package = LauncherPackage::new(Config::from_env().launch_mode(LaunchMode::Spawn));
    package.register_into_engine(&mut engine);

    engine.run(
        r#"
        let cmd = launcher::command()
                    .env_map(#{ "GREETING": "hello", "COUNT": 3 })
                    .arg("hello from a spawned child");
        cmd.look_path("echo");
        print(cmd.to_string());
        cmd.execute();
        "#,
    )?;

    Ok(())
}
