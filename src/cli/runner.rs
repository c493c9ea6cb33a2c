use crate::{
    cli::{
        args::{AskArgs, Cli, Commands, RunArgs},
        output::write_answers,
    },
    config::Config,
    error::Result,
    prompt::{Console, Mode, PromptRequest, Prompter, ScriptedPrompter, SelectOption, Theme},
};
use log::debug;
use std::io::{self, Write};

/// Runs one parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run(args) => run_survey(args),
        Commands::Ask(args) => run_ask(args),
    }
}

/// Picks the prompter for a command and the theme that suits it.
fn prompter(non_interactive: bool) -> (Box<dyn Prompter>, Theme) {
    if non_interactive {
        debug!("non-interactive run, every prompt takes its default");
        return (Box::new(ScriptedPrompter::new()), Theme::plain());
    }
    let console = Console::stdio();
    let theme = match console.mode() {
        Mode::Terminal => Theme::colored(),
        _ => Theme::plain(),
    };
    (Box::new(console), theme)
}

fn run_survey(args: RunArgs) -> Result<()> {
    let mut config = Config::load_config(&args.survey)?;
    let Config::V1(v1) = &mut config;
    if args.no_undo {
        v1.undo = false;
    }
    if args.end_card {
        v1.end_card = true;
    }

    let (prompter, theme) = prompter(args.non_interactive);
    let mut survey = config.into_survey(prompter, &theme)?;
    survey.run()?;

    write_answers(&mut io::stdout().lock(), &survey.answer_pairs(), args.format)
}

/// Parses `LABEL` or `LABEL=VALUE`.
pub fn parse_option(raw: &str) -> SelectOption {
    match raw.split_once('=') {
        Some((label, value)) => SelectOption::new(label, value),
        None => SelectOption::new(raw, ""),
    }
}

/// Builds the request described by `ask` arguments.
pub fn build_request(args: &AskArgs, theme: Theme) -> PromptRequest {
    let mut request = PromptRequest::new(args.label.as_str()).with_theme(theme);
    if let Some(default) = &args.default {
        request = request.with_default(default.as_str());
    }
    if args.confirm {
        request = request.confirm();
    } else if !args.options.is_empty() {
        request = request.with_options(args.options.iter().map(|raw| parse_option(raw)));
        if args.multi {
            request = request.multi_select();
        }
    }
    if let Some(text) = &args.continue_text {
        request = request.with_continue_text(text.as_str());
    }
    request
}

fn run_ask(args: AskArgs) -> Result<()> {
    let (mut prompter, theme) = prompter(args.non_interactive);
    let request = build_request(&args, theme);
    let answer = prompter.prompt(&request)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{answer}")?;
    stdout.flush()?;
    Ok(())
}
