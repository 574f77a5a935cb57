use clap::Parser;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use ratatui::DefaultTerminal;
use std::sync::mpsc::channel;
use tubedash::{App, AppConfig, AppEvent, Args, ConfigManager, OpenOptions, Theme};

fn load_theme() -> Theme {
    let config = ConfigManager::new(tubedash::APP_NAME)
        .and_then(|manager| manager.load_config())
        .unwrap_or_else(|e| {
            eprintln!("Warning: could not load config: {}. Using defaults.", e);
            AppConfig::default()
        });
    Theme::from_config(&config.theme).unwrap_or_else(|e| {
        eprintln!("Warning: {}. Using default theme.", e);
        Theme::default()
    })
}

fn render(terminal: &mut DefaultTerminal, app: &mut App) -> Result<()> {
    terminal.draw(|frame| frame.render_widget(app, frame.area()))?;
    Ok(())
}

fn run(mut terminal: DefaultTerminal, args: &Args) -> Result<()> {
    let (tx, rx) = channel::<AppEvent>();
    let mut app = App::new_with_theme(tx.clone(), load_theme());
    if args.debug {
        app.enable_debug();
    }
    let opts: OpenOptions = args.into();
    render(&mut terminal, &mut app)?;
    tx.send(AppEvent::Open(args.path.clone(), opts))?;

    loop {
        if crossterm::event::poll(std::time::Duration::from_millis(25))? {
            match crossterm::event::read()? {
                crossterm::event::Event::Key(key) => tx.send(AppEvent::Key(key))?,
                crossterm::event::Event::Resize(cols, rows) => {
                    tx.send(AppEvent::Resize(cols, rows))?
                }
                _ => {}
            }
        }

        let updated = match rx.recv_timeout(std::time::Duration::from_millis(0)) {
            Ok(event) => {
                match event {
                    AppEvent::Exit => break,
                    AppEvent::Crash(msg) => {
                        return Err(eyre!(msg));
                    }
                    event => {
                        if let Some(event) = app.event(&event) {
                            tx.send(event)?;
                        }
                    }
                }
                true
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => false,
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        };

        if updated {
            render(&mut terminal, &mut app)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    color_eyre::install()?;

    // A missing input file is fatal: abort before entering the terminal UI
    // so no partial dashboard is ever rendered.
    if !args.path.exists() {
        return Err(eyre!(
            "{} not found. Please add your CSV file.",
            args.path.display()
        ));
    }

    let terminal = ratatui::init();
    let result = run(terminal, &args);
    ratatui::restore();
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    Ok(())
}
