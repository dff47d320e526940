use {
    anyhow::Result,
    cl_option_zone::{Cli, JsonFileSource, run},
    clap::Parser,
    std::panic,
};

#[tokio::main]
async fn main() -> Result<()> {
    panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        log::error!("CRITICAL PANIC:\n{}\nStack Trace:\n{}", info, backtrace);
    }));

    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    } else {
        (log::LevelFilter::Error, log::LevelFilter::Error)
    };

    env_logger::Builder::new()
        .filter(None, global_level)
        .filter(Some("cl_option_zone"), my_code_level)
        .parse_default_env()
        .init();

    let args = Cli::parse();
    let source = JsonFileSource::new(&args.input);

    match run(&args, &source).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            log::error!("{:#}", e);
            Err(e)
        }
    }
}
