pub mod args;
pub mod output;
pub mod runner;

pub use args::{
    get_log_level_from_verbose, parse_cli, AskArgs, Cli, Commands, OutputFormat, RunArgs,
};
pub use output::write_answers;
pub use runner::run;
