use coderun::Dispatcher;
use env_logger::Env;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init_from_env(Env::new().filter("CODERUN_LOG"));

    let args: Vec<String> = std::env::args().collect();
    let command_name = args
        .first()
        .and_then(|arg0| Path::new(arg0).file_name())
        .and_then(|name| name.to_str())
        .unwrap_or("coderun");
    let rest: Vec<&str> = args.iter().skip(1).map(String::as_str).collect();

    let status = coderun::cli::run(
        command_name,
        &rest,
        &Dispatcher::default(),
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    );
    ExitCode::from(status)
}
