use std::fs::OpenOptions;
use std::io;
use std::process::exit;
use argparse::{ArgumentParser, Store};
use log::{debug, info};

mod config;
mod error;
mod probe;
mod render;
mod runner;

use config::Configuration;
use probe::{Platform, ProbeScheduler, SystemDriver, ToolSet};
use render::TableRenderer;
use runner::{Runner, StopRequestRef};


struct CommandLineParameters {
    config_file: String,
    cycles: u64,
}


fn parse_args_or_exit() -> CommandLineParameters {
    let mut config_file = String::new();
    let mut cycles: u64 = 0;

    {
        let mut ap = ArgumentParser::new();
        ap.set_description("Taschenmesser Network Check");
        ap.refer(&mut config_file).add_option(&["-c", "--config"], Store, "Configuration file (default: built-in probe table)");
        ap.refer(&mut cycles).add_option(&["-n", "--cycles"], Store, "Stop after this many cycles (default: 0, run forever)");
        ap.parse_args_or_exit();
    }

    CommandLineParameters {
        config_file,
        cycles,
    }
}


fn init_config_or_exit(config_file: String) -> Configuration {
    let configuration = if config_file.is_empty() {
        Configuration::builtin()
    } else {
        Configuration::from_file(config_file)
    };

    match configuration {
        Ok(configuration) => {
            configuration
        },
        Err(e) => {
            println!("Error: {}", e);
            exit(10);
        }
    }
}


fn init_logger_or_exit(configuration: &Configuration) {
    let application = configuration.get_application();
    let log_level = application.get_log_level();
    let env = env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV,
                                                   log_level.to_string());
    let mut builder = env_logger::Builder::from_env(env);

    if let Some(log_file) = application.get_log_file() {
        match OpenOptions::new().create(true).append(true).open(&log_file) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            },
            Err(e) => {
                println!("Error: cannot open log file {}: {}", log_file, e);
                exit(10);
            }
        }
    }

    builder.init();
}


fn init_toolset_or_exit(configuration: &Configuration) -> ToolSet {
    match Platform::detect() {
        Ok(platform) => {
            debug!("Detected platform {:?}", platform);
            configuration.build_toolset(platform)
        },
        Err(e) => {
            println!("Error: {}", e);
            exit(e.exit_code());
        }
    }
}


fn init_runner_or_exit(configuration: &Configuration, cycles: u64) -> Runner<SystemDriver> {
    let interval = match configuration.get_interval() {
        Ok(interval) => interval,
        Err(e) => {
            println!("Error: {}", e);
            exit(10);
        }
    };

    let registry = configuration.build_registry();
    debug!("Loaded {} probes", registry.len());
    let toolset = init_toolset_or_exit(configuration);
    let scheduler = ProbeScheduler::new(
        &registry,
        toolset,
        SystemDriver::new(),
        configuration.get_history_limit(),
    );
    let renderer = TableRenderer::new(&registry, configuration.get_terminal_width());

    return Runner::new(scheduler, renderer, interval, cycles);
}


fn init_stop_handler_or_exit(stop_request: StopRequestRef) {
    let result = ctrlc::set_handler(move || {
        match stop_request.lock() {
            Ok(mut stop_requested) => {
                *stop_requested = true;
            },
            Err(e) => {
                println!("Error acquiring lock: {}", e);
                exit(24);
            }
        }
    });

    if let Err(e) = result {
        println!("Error setting Ctrl-C handler: {}", e);
        exit(10);
    }
}


fn main() {
    let params = parse_args_or_exit();
    let configuration = init_config_or_exit(params.config_file);
    init_logger_or_exit(&configuration);

    let mut runner = init_runner_or_exit(&configuration, params.cycles);
    init_stop_handler_or_exit(runner.stop_request());

    let result = {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        runner.run(&mut out)
    };

    match result {
        Ok(cycles) => {
            info!("Stopped after {} cycles", cycles);
        },
        Err(e) => {
            println!("Error: {}", e);
            exit(e.exit_code());
        }
    }
}
