// stepviz: step-by-step algorithm walkthroughs in the terminal

use std::fs::File;
use std::io;
use std::sync::Mutex;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use stepviz::cli::Opts;
use stepviz::playback::session::{Session, Walkthrough};
use stepviz::ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::parse();

    // The TUI owns the terminal, so logs only go to a file when requested
    if let Some(path) = &opts.log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_max_level(opts.log_level)
            .init();
    }

    let session = match Session::new(opts.session_settings()) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run with --help for usage information.");
            std::process::exit(1);
        }
    };

    if opts.print {
        print_walkthrough(session.walkthrough());
        return Ok(());
    }

    eprintln!(
        "Generated {} steps for {} {}.",
        session.len(),
        session.algorithm().title(),
        session.walkthrough().input_label()
    );

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session, opts.language, opts.theme);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn print_walkthrough(walkthrough: &Walkthrough) {
    println!(
        "{} {}",
        walkthrough.algorithm().title(),
        walkthrough.input_label()
    );
    for (i, record) in walkthrough.records().iter().enumerate() {
        println!(
            "{:>4}  {:<10} {}",
            i + 1,
            record.stage_tag(),
            record.description()
        );
    }
}
