//! # screenstack CLI
//!
//! Demo shell for the screenstack engine: a hub screen with a spoke screen, a
//! modal question and a modal password entry.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{cell::RefCell, io, path::PathBuf, rc::Rc};

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use screenstack::{
    constants::LOG_ENV_VAR, Config, Content, Engine, KeyOutcome, PasswordDialog, Prompt, Screen,
    ScreenArgs, ScreenBase, TextWidget, YesNoDialog,
};

const ABOUT_TEXT: &str = "\
Screens live on a stack. The hub you came from is still below this one; \
continue closes this screen and takes you back to it.

Modal screens run their own main loop. The question and the password entry \
in the hub are modal: the hub waits for them to close before it continues.

Long text like this is wrapped to the configured width and shown page by \
page when it does not fit on one screen.";

#[derive(Parser)]
#[command(name = "screenstack")]
#[command(author = "Dominic Rodemer")]
#[command(version)]
#[command(about = "Demo of a stack-based terminal screen engine")]
#[command(
    after_help = "Configuration:\n  \
~/.config/screenstack/config.toml   Title, width, quit confirmation, key bindings\n\n\
Logging:\n  \
SCREENSTACK_LOG=debug screenstack   Log filter (falls back to RUST_LOG)"
)]
struct Cli {
    /// Config file to use instead of the default one
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Render width in columns
    #[arg(long, value_name = "N")]
    width: Option<usize>,

    /// Ask for confirmation before quitting
    #[arg(long)]
    confirm_quit: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match cli.config.or_else(Config::default_path) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };
    if let Some(width) = cli.width {
        config.width = width;
    }
    config.confirm_quit |= cli.confirm_quit;

    let mut engine = config.engine_builder().build();

    let hub = Rc::new(HubScreen::new());
    if hub.setup(&None) {
        engine.schedule_screen(hub, None);
    }

    let completed = engine.run().context("Engine stopped unexpectedly")?;
    if !completed {
        println!("{}", "Bye.".green());
    }
    Ok(())
}

/// Installs the stderr log subscriber.
///
/// Filter priority: `SCREENSTACK_LOG`, then `RUST_LOG`, then `--verbose`.
fn init_tracing(verbose: bool) {
    let filter = std::env::var(LOG_ENV_VAR)
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .compact()
        .init();
}

// =============================================================================
// Demo Screens
// =============================================================================

/// Entry screen linking to the others.
struct HubScreen {
    base: ScreenBase,
    status: RefCell<Option<String>>,
}

impl HubScreen {
    fn new() -> Self {
        Self {
            base: ScreenBase::default(),
            status: RefCell::new(None),
        }
    }
}

impl Screen for HubScreen {
    fn base(&self) -> &ScreenBase {
        &self.base
    }

    fn title(&self) -> &str {
        "Hub"
    }

    fn refresh(&self, engine: &mut Engine, _args: &ScreenArgs) -> screenstack::Result<bool> {
        let mut window = vec![
            Content::from(engine.header()),
            Content::blank(),
            "1) About this demo".into(),
            "2) Answer a question".into(),
            "3) Enter a password".into(),
        ];
        if let Some(status) = self.status.borrow().as_deref() {
            window.push(Content::blank());
            window.push(status.into());
        }
        self.base.set_window(window);
        Ok(true)
    }

    fn input(
        &self,
        engine: &mut Engine,
        _args: &ScreenArgs,
        key: &str,
    ) -> screenstack::Result<KeyOutcome> {
        match key {
            "1" => {
                let about = Rc::new(AboutScreen::new());
                engine.switch_screen_with_return(about, None);
            }
            "2" => {
                let question = Rc::new(YesNoDialog::new("Do you like stacks?"));
                engine.switch_screen_modal(question.clone(), None)?;
                let status = match question.response() {
                    Some(true) => "You like stacks.",
                    Some(false) => "You don't like stacks.",
                    None => "No answer.",
                };
                *self.status.borrow_mut() = Some(status.to_string());
            }
            "3" => {
                let entry = Rc::new(PasswordDialog::new("Password", "Enter any password"));
                engine.switch_screen_modal(entry.clone(), None)?;
                let length = entry.password().map_or(0, |p| p.chars().count());
                *self.status.borrow_mut() = Some(format!("Password has {length} characters."));
            }
            _ => return Ok(KeyOutcome::Forward(key.to_string())),
        }
        Ok(KeyOutcome::Consumed)
    }

    fn prompt(&self, engine: &mut Engine, _args: &ScreenArgs) -> screenstack::Result<Option<Prompt>> {
        let mut prompt = Prompt::default();
        prompt.add_option("1", "read about");
        prompt.add_option("2", "answer");
        prompt.add_option("3", "enter a password");
        prompt.add_quit_option(engine.keymap());
        Ok(Some(prompt))
    }
}

/// Spoke screen with wrapped long text.
struct AboutScreen {
    base: ScreenBase,
}

impl AboutScreen {
    fn new() -> Self {
        Self {
            base: ScreenBase::default(),
        }
    }
}

impl Screen for AboutScreen {
    fn base(&self) -> &ScreenBase {
        &self.base
    }

    fn title(&self) -> &str {
        "About"
    }

    fn refresh(&self, _engine: &mut Engine, _args: &ScreenArgs) -> screenstack::Result<bool> {
        self.base.set_window(vec![
            self.title().into(),
            Content::blank(),
            TextWidget::new(ABOUT_TEXT).into(),
        ]);
        Ok(true)
    }
}
