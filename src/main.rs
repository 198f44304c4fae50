use std::process::ExitCode;

use rt3d_demo::DemoConfig;

fn main() -> ExitCode {
    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    logger.target(env_logger::Target::Stdout);
    if let Err(e) = logger.try_init() {
        eprintln!("Logger already initialized: {e}");
    }

    let config = DemoConfig::from_env();
    log::info!(
        "Starting with shaders {} and {}",
        config.vertex_shader.display(),
        config.fragment_shader.display()
    );

    rt3d_demo::run(config)
}
