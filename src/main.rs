use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use std::fs;
use std::io::Write;
use std::rc::Rc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use eclipse_map::app::{App, BuildMode, DirectoryFactory};
use eclipse_map::config::{Config, OutputFormat};
use eclipse_map::data::ClassNames;
use eclipse_map::map::MountedMap;
use eclipse_map::page::Page;
use eclipse_map::reload::DataWatcher;
use eclipse_map::ui;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    if config.watch && config.mode != BuildMode::Development {
        bail!("--watch needs --mode development");
    }

    let classes = match &config.styles {
        Some(path) => ClassNames::load(path)?,
        None => ClassNames::default(),
    };
    let app = Rc::new(App::new(DirectoryFactory::new(&config.data_dir, classes), config.mode));
    tracing::info!(mode = ?app.mode(), data_dir = %config.data_dir.display(), "Starting");

    let mut page = Page::with_anchors(&config.anchors).ready_event(&config.ready_event);
    if config.ready {
        page.signal_ready()?;
    }

    let hook_app = Rc::clone(&app);
    page.on_ready(move |page| hook_app.init(page))?;

    // Nothing else raises the ready event for a standalone run
    page.signal_ready()?;
    write_output(&config, &page)?;

    if config.preview {
        match page.anchors().iter().find_map(|a| a.mounted()) {
            Some(map) => preview(map)?,
            None => tracing::warn!("No map was drawn, nothing to preview"),
        }
    }

    if config.watch {
        watch(&config, &app, &mut page)?;
    }

    Ok(())
}

fn write_output(config: &Config, page: &Page) -> Result<()> {
    let rendered = match config.format {
        OutputFormat::Html => page.to_html(),
        OutputFormat::Svg => page.first_svg().map(|svg| svg.to_markup()).context("no map was drawn")?,
    };

    match &config.out {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => std::io::stdout().write_all(rendered.as_bytes())?,
    }
    Ok(())
}

fn watch(config: &Config, app: &App<DirectoryFactory>, page: &mut Page) -> Result<()> {
    let watcher = DataWatcher::new(&config.data_dir)?;
    while let Some(changed) = watcher.wait_for_change(None) {
        for path in &changed {
            tracing::debug!("Changed: {}", path.display());
        }
        app.reload(page)?;
        write_output(config, page)?;
    }
    Ok(())
}

fn preview(map: &MountedMap) -> Result<()> {
    let mut terminal = ratatui::init();
    terminal.clear()?;

    let result = run(&mut terminal, map);

    ratatui::restore();
    result
}

fn run(terminal: &mut DefaultTerminal, map: &MountedMap) -> Result<()> {
    loop {
        // Rasterizes at the current size, so a resize just redraws
        terminal.draw(|frame| ui::render(frame, map))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    break;
                }
            }
        }
    }
    Ok(())
}
