use quadshow::{Command, Settings, Slideshow};
use std::env;
use std::error::Error;
use std::process;

fn main() {
    env_logger::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let command = match Settings::from_env().and_then(|s| s.with_args(env::args_os().skip(1))) {
        Ok(command) => command,
        Err(err) => {
            log::error!("{}", err);
            eprintln!("{}", quadshow::USAGE);
            process::exit(2);
        }
    };

    let settings = match command {
        Command::Run(settings) => settings,
        Command::Help => {
            println!("{}", quadshow::USAGE);
            return;
        }
    };

    let result = Slideshow::new(&settings).and_then(|mut slideshow| slideshow.run());
    if let Err(err) = result {
        log::error!("{}", err);
        let mut source = err.source();
        while let Some(cause) = source {
            log::error!("caused by: {}", cause);
            source = cause.source();
        }
        process::exit(1);
    }
}
