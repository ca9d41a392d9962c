//! create-native-module entry point.
//! Parses arguments, builds the configuration once and runs the pipeline;
//! errors are turned into the process exit status in one place.

use create_native_module::{
    cli::{get_args, Args},
    collector::GitIdentity,
    command::SystemRunner,
    config::Config,
    error::{default_error_handler, Result},
    logger::init_logger,
    pipeline::Pipeline,
    prompt::DialoguerPrompter,
};

fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let prompt = DialoguerPrompter::new();
    let runner = SystemRunner;

    let pipeline = Pipeline::new(&config, &prompt, &runner, GitIdentity::from_git_config());
    pipeline.run(args.command_options())?;
    Ok(())
}
