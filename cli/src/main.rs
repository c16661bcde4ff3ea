//! adgrid CLI: drive the ad-space grid against a layout file on disk.
//!
//! Every invocation loads the stored layout into a fresh `Sys`, runs the
//! requested commands, and writes the layout back when it changed.

use std::path::{Path, PathBuf};
use std::process;

use adgrid_core::command::Command;
use adgrid_core::engine::headless::HeadlessProvider;
use adgrid_core::grid::selection::ClickTarget;
use adgrid_core::response::{Action, Response};
use adgrid_core::sys::Sys;
use adgrid_core::types::config::GridSettings;
use adgrid_core::types::item::ItemId;
use tracing_subscriber::EnvFilter;


fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let arg_refs: Vec<&str> = args[1..].iter().map(|s| s.as_str()).collect();

    let (layout_override, rest) = match split_layout_flag(&arg_refs) {
        Ok(split) => split,
        Err(e) => {
            eprintln!("adgrid: {}", e);
            process::exit(1);
        }
    };

    let commands = match parse_args(&rest) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("adgrid: {}", e);
            process::exit(1);
        }
    };

    let config_dir = resolve_config_dir();
    let layout_path = layout_override.unwrap_or_else(|| config_dir.join("layout.json"));
    let settings = GridSettings::load(&config_dir.join("settings.yaml"));

    let mut sys = Sys::new(settings);
    if !sys.initialize(&HeadlessProvider) {
        eprintln!("adgrid error: grid engine unavailable");
        process::exit(1);
    }

    if let Err(e) = restore(&mut sys, &layout_path) {
        eprintln!("adgrid error: {}", e);
        process::exit(1);
    }

    let mut dirty = false;
    for cmd in commands {
        dirty |= cmd.mutates_layout();
        match sys.execute(cmd) {
            Response::Ok { output } => {
                if !output.is_empty() {
                    println!("{}", output);
                }
            }
            Response::Error { message } => {
                eprintln!("adgrid error: {}", message);
                process::exit(1);
            }
        }
    }

    if dirty {
        if let Err(e) = persist(&mut sys, &layout_path) {
            eprintln!("adgrid error: {}", e);
            process::exit(1);
        }
    }
}


fn resolve_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ADGRID_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("adgrid")
}


/// Load the stored layout, if there is one.
fn restore(sys: &mut Sys, path: &Path) -> Result<(), String> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(format!("cannot read {}: {}", path.display(), e)),
    };
    match sys.execute(Command::LoadLayout { data }) {
        Response::Ok { .. } => Ok(()),
        Response::Error { message } => Err(format!("{}: {}", path.display(), message)),
    }
}


/// Save the layout through the `onLayoutSaved` action and write it to disk.
fn persist(sys: &mut Sys, path: &Path) -> Result<(), String> {
    if let Response::Error { message } = sys.execute(Command::SaveLayout) {
        return Err(message);
    }
    let data = sys
        .drain_actions()
        .into_iter()
        .find_map(|action| match action {
            Action::LayoutSaved { data } => Some(data),
            _ => None,
        })
        .ok_or_else(|| "layout was not saved".to_string())?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("cannot create {}: {}", parent.display(), e))?;
    }
    std::fs::write(path, data).map_err(|e| format!("cannot write {}: {}", path.display(), e))?;
    tracing::info!(path = %path.display(), "layout written");
    Ok(())
}


fn split_layout_flag<'a>(args: &[&'a str]) -> Result<(Option<PathBuf>, Vec<&'a str>), String> {
    let mut layout = None;
    let mut rest = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if *arg == "--layout" {
            let path = iter
                .next()
                .ok_or_else(|| "Usage: adgrid --layout <path> <command>".to_string())?;
            layout = Some(PathBuf::from(path));
        } else {
            rest.push(*arg);
        }
    }
    Ok((layout, rest))
}


fn parse_args(args: &[&str]) -> Result<Vec<Command>, String> {
    if args.is_empty() {
        return Err("No command specified. Run 'adgrid help' for usage.".into());
    }

    match args[0] {
        "show" => Ok(vec![Command::View]),
        "status" => Ok(vec![Command::Status]),
        "help" => Ok(vec![Command::Help {
            topic: args.get(1).map(|s| s.to_string()),
        }]),
        "export" => Ok(vec![Command::SaveLayout]),
        "import" => {
            if args.len() < 2 {
                return Err("Usage: adgrid import <file>".into());
            }
            let data = std::fs::read_to_string(args[1])
                .map_err(|e| format!("cannot read {}: {}", args[1], e))?;
            Ok(vec![Command::LoadLayout { data }])
        }
        "add" => Ok(vec![Command::AddItem]),
        "remove" => {
            let id = parse_id(args, "Usage: adgrid remove <id>")?;
            Ok(vec![select(id), Command::RemoveSelected])
        }
        "lock" => {
            let id = parse_id(args, "Usage: adgrid lock <id>")?;
            Ok(vec![select(id), Command::ToggleLock])
        }
        "move" => {
            let usage = "Usage: adgrid move <id> <x> <y>";
            let id = parse_id(args, usage)?;
            let x = parse_number(args, 2, usage)?;
            let y = parse_number(args, 3, usage)?;
            Ok(vec![
                Command::DragStart { id },
                Command::DragStop { id, x, y },
            ])
        }
        "resize" => {
            let usage = "Usage: adgrid resize <id> <w> <h>";
            let id = parse_id(args, usage)?;
            let w = parse_number(args, 2, usage)?;
            let h = parse_number(args, 3, usage)?;
            Ok(vec![
                Command::ResizeStart { id },
                Command::Resize { id, w, h },
                Command::ResizeStop { id },
            ])
        }
        _ => Err(format!("Unknown command: '{}'. Run 'adgrid help' for usage.", args[0])),
    }
}


fn select(id: ItemId) -> Command {
    Command::Click {
        target: ClickTarget::Item(id),
    }
}


fn parse_id(args: &[&str], usage: &str) -> Result<ItemId, String> {
    args.get(1)
        .and_then(|a| a.parse::<u64>().ok())
        .map(ItemId)
        .ok_or_else(|| usage.to_string())
}


fn parse_number(args: &[&str], index: usize, usage: &str) -> Result<u32, String> {
    args.get(index)
        .and_then(|a| a.parse::<u32>().ok())
        .ok_or_else(|| usage.to_string())
}
