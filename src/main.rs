use anyhow::Result;
use calloop::{EventLoop, LoopSignal};
use clap::Parser;
use hatch::categories;
use hatch::config;
use hatch::desktop::ParseContext;
use hatch::frontend::{DrawerView, Frontend, HeadlessFrontend};
use hatch::index::{self, EntryIndex, RebuildSummary};
use hatch::model::Category;
use hatch::pins::Pins;
use hatch::session::{self, ControlMsg, Ownership, Session, SessionError, Transition};
use hatch::watcher::{self, WatchEvent};
use log::{debug, info, warn};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Stay resident in memory after the window hides
    #[arg(short, long)]
    resident: bool,

    /// Start a resident instance with the window already visible
    #[arg(long)]
    visible: bool,

    /// Show the drawer of the running instance and exit
    #[arg(long)]
    open: bool,

    /// Hide the drawer of the running instance and exit
    #[arg(long)]
    close: bool,

    /// Force language, e.g. "en", "pl"
    #[arg(long)]
    lang: Option<String>,

    /// Application descriptor directories (default: XDG data dirs)
    #[arg(long = "app-dir")]
    app_dirs: Vec<PathBuf>,

    /// Turn on debug messages
    #[arg(short, long)]
    debug: bool,
}

struct App {
    ctx: ParseContext,
    catalog: Vec<Category>,
    index: EntryIndex,
    pins: Pins,
    session: Session,
    frontend: Box<dyn Frontend>,
    summary: RebuildSummary,
    app_dirs: Vec<PathBuf>,
    loop_signal: LoopSignal,
}

impl App {
    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::None => {}
            Transition::Quit => self.loop_signal.stop(),
            Transition::Hide => self.frontend.withdraw(),
            Transition::Show {
                refresh_index,
                refresh_pins,
            } => {
                if refresh_index {
                    let files = index::list_desktop_files(&self.app_dirs);
                    self.summary = self.index.rebuild(&files, &self.ctx);
                    info!("index rebuilt: {}", self.summary);
                }
                if refresh_pins {
                    self.pins.reload();
                }
                let view = DrawerView::build(
                    self.summary.to_string(),
                    &self.catalog,
                    &self.index,
                    &self.pins,
                );
                self.frontend.present(&view);
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    // Relay action when another instance already owns the lock.
    let action = if args.open {
        ControlMsg::Open
    } else if args.close {
        ControlMsg::Close
    } else {
        ControlMsg::Toggle
    };

    let lock_path = config::data_home()?.join("hatch.lock");
    let lock = match session::acquire(&lock_path, args.resident) {
        Ok(Ownership::Owned(lock)) => lock,
        Ok(Ownership::Held { pid }) => {
            // Relay and die; the resident instance does the work.
            if let Err(err) = session::relay(pid, action) {
                warn!("{err}");
            }
            return Ok(());
        }
        Err(SessionError::AlreadyRunning(pid)) => {
            warn!("Resident instance already running (PID {pid})");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let config = config::load_config()?;
    let ctx = ParseContext {
        lang: config::language(args.lang.as_deref().or(config.general.lang.as_deref())),
        current_desktop: config::current_desktop(),
    };
    info!("lang: {}", ctx.lang);

    let pinned_file = config::cache_dir()?.join("pin-cache");
    let pins = Pins::load(pinned_file.clone());
    info!("Found {} pinned items", pins.items().len());

    let app_dirs = if args.app_dirs.is_empty() {
        config::app_dirs()
    } else {
        args.app_dirs.clone()
    };
    let catalog = match config::drawer_data_dir() {
        Some(dir) => categories::load(&dir, &ctx.lang),
        None => Vec::new(),
    };

    let desktop_files = index::list_desktop_files(&app_dirs);
    info!("Found {} desktop files", desktop_files.len());
    let mut entry_index = EntryIndex::new();
    let summary = entry_index.rebuild(&desktop_files, &ctx);
    info!(
        "Skipped {} duplicates; {} entries hidden, {} unreadable",
        summary.duplicates, summary.hidden, summary.unparsed
    );

    let mut event_loop: EventLoop<App> = EventLoop::try_new()?;
    let loop_signal = event_loop.get_signal();

    // Signals are masked before any other thread exists, so every later
    // thread inherits the mask and only the listener ever sees them.
    let (sig_tx, sig_rx) = calloop::channel::channel();
    session::spawn_signal_listener(sig_tx)?;

    let (watch_tx, watch_rx) = calloop::channel::channel();
    let _fs_watcher = match watcher::spawn(&app_dirs, &pinned_file, watch_tx) {
        Ok(w) => Some(w),
        Err(err) => {
            warn!("file watching unavailable: {err}");
            None
        }
    };

    event_loop
        .handle()
        .insert_source(sig_rx, |event, _, app: &mut App| {
            if let calloop::channel::Event::Msg(msg) = event {
                let transition = app.session.handle(msg);
                app.apply(transition);
            }
        })
        .unwrap();

    event_loop
        .handle()
        .insert_source(watch_rx, |event, _, app: &mut App| {
            if let calloop::channel::Event::Msg(ev) = event {
                match ev {
                    WatchEvent::IndexDirty => {
                        debug!(".desktop file changed");
                        app.session.mark_index_dirty();
                    }
                    WatchEvent::PinsDirty => {
                        debug!("pinned file changed");
                        app.session.mark_pins_dirty();
                    }
                }
            }
        })
        .unwrap();

    let session = Session::new(lock, args.resident);
    let mut app = App {
        ctx,
        catalog,
        index: entry_index,
        pins,
        session,
        frontend: Box::new(HeadlessFrontend),
        summary,
        app_dirs,
        loop_signal,
    };

    // Transient mode shows immediately; resident starts hidden unless asked.
    if !args.resident || args.visible {
        let transition = app.session.startup();
        app.apply(transition);
    }

    event_loop.run(None, &mut app, |_| {})?;
    info!("bye bye");
    Ok(())
}
