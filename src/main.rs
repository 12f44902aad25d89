// tinypas: catalog-driven lexer and recognizer with annotated error display

use std::io;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use tinypas::cli::Args;
use tinypas::config::Settings;
use tinypas::driver::{self, DriverError, Mode};
use tinypas::logging;
use tinypas::report::{Console, Palette, Role};
use tinypas::ui::App;

fn main() -> ExitCode {
    logging::init();
    let args = Args::parse();
    let settings = args.settings();

    let result = if args.view {
        view(&settings, &args.input)
    } else {
        let console = Console::new(io::stdout(), Palette::new(settings.color));
        driver::run(&settings, &args.input, args.mode(), &console).map(|_| ())
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let palette = Palette::new(settings.color);
            eprintln!("{}", palette.paint(Role::Error, format!("ERROR - {}", err)));
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

/// Check `input` silently, then browse the result in the terminal viewer.
fn view(settings: &Settings, input: &Path) -> Result<(), DriverError> {
    let console = Console::new(io::sink(), Palette::plain());
    let outcome = driver::check(settings, input, Mode::Parse, &console)?;
    let source = driver::read_source(input)?;
    let mut app = App::new(input.display().to_string(), &source, &outcome.log, settings.tab_size);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.map_err(DriverError::from)
}
