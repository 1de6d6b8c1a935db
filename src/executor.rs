//! Launching external commands detached from the drawer process.

use crate::config::PreferredApp;
use anyhow::{Result, bail};
use log::{info, warn};
use std::env;
use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};
use std::thread;

/// Resolved launch options from config/flags.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub terminal: String,
    pub file_manager: String,
    pub wm: String,
    pub preferred: Vec<PreferredApp>,
}

impl LaunchOptions {
    pub fn from_config(general: &crate::config::GeneralConfig, preferred: Vec<PreferredApp>) -> Self {
        Self {
            terminal: general.terminal.clone(),
            file_manager: general.file_manager.clone(),
            wm: general.wm.clone(),
            preferred,
        }
    }
}

/// Run one entry's Exec command.
///
/// Terminal entries go through the configured emulator; otherwise the
/// command may be dispatched via the compositor when one is configured.
pub fn launch(exec: &str, terminal: bool, opts: &LaunchOptions) -> Result<()> {
    let argv = build_launch_argv(exec, terminal, opts);
    spawn_detached(argv)
}

/// Open a path with xdg-open, a preferred-application override, or the
/// file manager for directories.
pub fn open_path(path: &str, is_dir: bool, opts: &LaunchOptions) -> Result<()> {
    let argv = if is_dir {
        vec![opts.file_manager.clone(), path.to_string()]
    } else {
        match opts.preferred.iter().find(|p| p.pattern.is_match(path)) {
            Some(p) => vec![p.command.clone(), path.to_string()],
            None => vec!["xdg-open".to_string(), path.to_string()],
        }
    };
    spawn_detached(argv)
}

pub fn build_launch_argv(exec: &str, terminal: bool, opts: &LaunchOptions) -> Vec<String> {
    let words = |s: &str| s.split_whitespace().map(String::from).collect::<Vec<_>>();

    if terminal {
        // foot takes the command verbatim, everything else via -e
        let mut argv = vec![opts.terminal.clone()];
        if opts.terminal == "foot" {
            argv.extend(words(exec));
        } else {
            argv.push("-e".to_string());
            argv.push(exec.to_string());
        }
        return argv;
    }

    match opts.wm.as_str() {
        "sway" => {
            if env::var_os("SWAYSOCK").is_some() {
                return vec!["swaymsg".into(), "exec".into(), exec.to_string()];
            }
            warn!("Unable to find SWAYSOCK, running command directly");
        }
        "hyprland" | "Hyprland" => {
            if env::var_os("HYPRLAND_INSTANCE_SIGNATURE").is_some() {
                let mut argv = vec!["hyprctl".into(), "dispatch".into(), "exec".into()];
                argv.push(exec.to_string());
                return argv;
            }
            warn!("Unable to find HYPRLAND_INSTANCE_SIGNATURE, running command directly");
        }
        "uwsm" => {
            let mut argv = vec!["uwsm".into(), "app".into(), "--".into()];
            argv.extend(words(exec));
            return argv;
        }
        _ => {}
    }
    words(exec)
}

/// Spawn in its own process group with null stdio, and reap the child from
/// a background thread so it never zombies while the drawer stays resident.
fn spawn_detached(argv: Vec<String>) -> Result<()> {
    let Some((program, args)) = argv.split_first() else {
        bail!("empty command");
    };
    info!("executing {program:?} with args {args:?}");

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .process_group(0)
        .spawn()?;

    thread::spawn(move || {
        let _ = child.wait();
    });
    Ok(())
}
