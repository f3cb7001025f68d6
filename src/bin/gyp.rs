use anstyle::Style;
use anyhow::{Context, Result};
use gyp_shim::{Config, Error, LaunchSpec, Launcher, Resolver, script_path};
use std::{
    env::{args_os, current_exe},
    io::{IsTerminal, Write, stderr},
    process::exit,
};

fn main() {
    env_logger::try_init().unwrap_or_default();

    let launcher = Launcher::new();
    let code = match run(&launcher) {
        Ok(code) => code,
        Err(error) => {
            report(&error);
            error
                .downcast_ref::<Error>()
                .map_or(1, |error| launcher.error_code(error))
        }
    };
    exit(code);
}

fn run(launcher: &Launcher) -> Result<i32> {
    let interpreter = Resolver::new(Config::from_env()).resolve()?;
    let exe = current_exe().context("failed to locate the running executable")?;
    let spec = LaunchSpec::new(interpreter.program, script_path(&exe), args_os().skip(1));
    let code = launcher.launch(&spec)?;
    Ok(code)
}

fn report(error: &anyhow::Error) {
    let style = if stderr().is_terminal() {
        Style::new().bold()
    } else {
        Style::new()
    };
    let _: std::io::Result<()> = writeln!(stderr(), "{style}gyp: error:{style:#} {error:#}");
}
