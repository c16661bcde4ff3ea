//! adgrid desktop application library.
//!
//! This crate provides the Tauri backend for the ad-space grid editor.
//! It bridges the webview page (which binds `loadSerializedLayout`,
//! `saveLayout`, `addNewAdSpace`, `removeSelectedAdSpace` and `toggleLock`)
//! to the core `Sys` runtime via IPC commands.
//!
//! # Architecture
//!
//! 1. **AppState** (this module) -- wraps `Sys` in a `Mutex` for thread-safe
//!    access from Tauri command handlers.
//!
//! 2. **IPC handlers** (`ipc` module) -- thin `#[tauri::command]` functions
//!    that pull `AppState` from Tauri's managed state, delegate to it, and
//!    relay the resulting actions to the webview as events.
//!
//! 3. **`run()`** -- assembles the Tauri application, registers all IPC
//!    handlers, and starts the event loop.

pub mod ipc;

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use adgrid_core::command::Command;
use adgrid_core::engine::EngineProvider;
use adgrid_core::engine::headless::HeadlessProvider;
use adgrid_core::response::{Action, Response};
use adgrid_core::sys::Sys;
use adgrid_core::types::config::GridSettings;
use tauri::{Emitter, Runtime};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;


/// Event names the webview listens for.
pub mod events {
    /// Carries the serialized layout; the page forwards it to `onLayoutSaved`.
    pub const LAYOUT_SAVED: &str = "layout-saved";
    /// Every other action (render, remove, raw engine event).
    pub const GRID_ACTION: &str = "grid-action";
}


/// Application state shared across Tauri commands.
///
/// Wraps the core `Sys` runtime in a `Mutex` so that IPC command handlers
/// can safely access it from arbitrary threads.
pub struct AppState {
    sys: Mutex<Sys>,
}


impl AppState {
    pub fn new(settings: GridSettings) -> AppState {
        AppState {
            sys: Mutex::new(Sys::new(settings)),
        }
    }

    fn sys(&self) -> MutexGuard<'_, Sys> {
        self.sys.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Bring up the grid engine. Failure is logged and leaves the state usable.
    pub fn initialize(&self, provider: &dyn EngineProvider) -> bool {
        self.sys().initialize(provider)
    }

    /// Execute a command and drain its actions under one lock.
    pub fn dispatch(&self, cmd: Command) -> (Response, Vec<Action>) {
        let mut sys = self.sys();
        let resp = sys.execute(cmd);
        let actions = sys.drain_actions();
        (resp, actions)
    }

    /// Execute a read-only command; its actions are discarded.
    fn query(&self, cmd: Command) -> Response {
        let mut sys = self.sys();
        let resp = sys.execute(cmd);
        sys.drain_actions();
        resp
    }

    /// Grid configuration the page needs to size its canvas, as JSON.
    pub fn grid_config(&self) -> String {
        let sys = self.sys();
        serde_json::to_string(&sys.settings().grid).unwrap_or_else(|_| "{}".into())
    }

    // -------------------------------------------------------------------
    // Boundary functions
    // -------------------------------------------------------------------

    pub fn load_serialized_layout(&self, data: String) -> (Response, Vec<Action>) {
        self.dispatch(Command::LoadLayout { data })
    }

    pub fn save_layout(&self) -> (Response, Vec<Action>) {
        self.dispatch(Command::SaveLayout)
    }

    pub fn add_new_ad_space(&self) -> (Response, Vec<Action>) {
        self.dispatch(Command::AddItem)
    }

    pub fn remove_selected_ad_space(&self) -> (Response, Vec<Action>) {
        self.dispatch(Command::RemoveSelected)
    }

    pub fn toggle_lock(&self) -> (Response, Vec<Action>) {
        self.dispatch(Command::ToggleLock)
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    pub fn view(&self) -> Response {
        self.query(Command::View)
    }

    pub fn status(&self) -> Response {
        self.query(Command::Status)
    }

    pub fn help(&self, topic: Option<String>) -> Response {
        self.query(Command::Help { topic })
    }
}


/// Forward actions to the webview, `LayoutSaved` on its own channel.
pub fn relay<R: Runtime>(emitter: &impl Emitter<R>, actions: Vec<Action>) {
    for action in actions {
        let sent = match &action {
            Action::LayoutSaved { data } => emitter.emit(events::LAYOUT_SAVED, data),
            other => emitter.emit(events::GRID_ACTION, other),
        };
        if let Err(e) = sent {
            warn!(error = %e, "failed to emit action to webview");
        }
    }
}


fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ADGRID_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("adgrid")
}


/// Assemble and run the Tauri application.
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let settings = GridSettings::load(&config_dir().join("settings.yaml"));
    let state = AppState::new(settings);
    if !state.initialize(&HeadlessProvider) {
        warn!("grid engine unavailable; boundary functions will report errors");
    }

    tauri::Builder::default()
        .manage(state)
        .invoke_handler(tauri::generate_handler![
            // Boundary functions
            ipc::load_serialized_layout,
            ipc::save_layout,
            ipc::add_new_ad_space,
            ipc::remove_selected_ad_space,
            ipc::toggle_lock,
            // Pointer input
            ipc::dispatch,
            // Queries
            ipc::grid_view,
            ipc::grid_config,
            ipc::grid_status,
            ipc::grid_help,
        ])
        .setup(|_app| {
            debug!("webview handlers registered");
            info!("adgrid desktop ready");
            Ok(())
        })
        .run(tauri::generate_context!())
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "error while running tauri application");
            std::process::exit(1);
        });
}


#[cfg(test)]
mod tests {
    use super::*;
    use adgrid_core::grid::selection::ClickTarget;
    use adgrid_core::types::item::ItemView;

    fn test_state() -> AppState {
        let state = AppState::new(GridSettings::default());
        assert!(state.initialize(&HeadlessProvider));
        state
    }

    fn is_ok(r: &Response) -> bool {
        matches!(r, Response::Ok { .. })
    }

    fn output(r: &Response) -> &str {
        match r {
            Response::Ok { output } => output,
            Response::Error { message } => message,
        }
    }

    fn views(state: &AppState) -> Vec<ItemView> {
        serde_json::from_str(output(&state.view())).unwrap()
    }

    #[test]
    fn status_ok() {
        let state = test_state();
        let r = state.status();
        assert!(is_ok(&r));
        assert!(output(&r).contains("0 items"));
    }

    #[test]
    fn view_returns_json_array() {
        let state = test_state();
        let r = state.view();
        assert!(is_ok(&r));
        let parsed: serde_json::Value = serde_json::from_str(output(&r)).unwrap();
        assert!(parsed.is_array());
    }

    #[test]
    fn help_overview() {
        let state = test_state();
        let r = state.help(None);
        assert!(is_ok(&r));
        assert!(output(&r).contains("adgrid"));
    }

    #[test]
    fn add_new_ad_space_renders_item() {
        let state = test_state();
        let (r, actions) = state.add_new_ad_space();
        assert!(is_ok(&r));
        assert!(actions
            .iter()
            .any(|a| matches!(a, Action::Render { view } if view.label == "Width: 3, Height: 3")));
        assert_eq!(views(&state).len(), 1);
    }

    #[test]
    fn save_layout_yields_layout_saved() {
        let state = test_state();
        state.add_new_ad_space();
        let (r, actions) = state.save_layout();
        assert!(is_ok(&r));
        assert_eq!(
            actions,
            vec![Action::LayoutSaved {
                data: output(&r).to_string()
            }]
        );
    }

    #[test]
    fn load_then_remove_selected() {
        let state = test_state();
        let (r, _) = state.load_serialized_layout(r#"[{"x":0,"y":0,"w":4,"h":4}]"#.into());
        assert!(is_ok(&r));
        let id = views(&state)[0].id;
        state.dispatch(Command::Click {
            target: ClickTarget::Item(id),
        });
        let (r, actions) = state.remove_selected_ad_space();
        assert!(is_ok(&r));
        assert!(actions.contains(&Action::Remove { id }));
        assert!(views(&state).is_empty());
    }

    #[test]
    fn toggle_lock_without_selection_is_noop() {
        let state = test_state();
        state.add_new_ad_space();
        let (r, actions) = state.toggle_lock();
        assert!(is_ok(&r));
        assert!(actions.is_empty());
    }

    #[test]
    fn malformed_layout_is_error() {
        let state = test_state();
        let (r, actions) = state.load_serialized_layout("{not json".into());
        assert!(!is_ok(&r));
        assert!(actions.is_empty());
    }

    #[test]
    fn uninitialized_state_reports_errors() {
        let state = AppState::new(GridSettings::default());
        let (r, _) = state.add_new_ad_space();
        assert!(!is_ok(&r));
        assert!(is_ok(&state.status()));
    }

    #[test]
    fn dispatch_returns_only_its_own_actions() {
        let state = test_state();
        let (_, actions) = state.dispatch(Command::AddItem);
        assert!(!actions.is_empty());
        let (r, actions) = state.dispatch(Command::Status);
        assert!(is_ok(&r));
        assert!(actions.is_empty());
    }

    #[test]
    fn queries_leave_no_actions_behind() {
        let state = test_state();
        state.add_new_ad_space();
        state.view();
        let (_, actions) = state.dispatch(Command::Help { topic: None });
        assert!(actions.is_empty());
    }

    #[test]
    fn grid_config_has_column_count() {
        let state = test_state();
        let parsed: serde_json::Value = serde_json::from_str(&state.grid_config()).unwrap();
        assert_eq!(parsed["column"], 17);
        assert_eq!(parsed["cellHeight"], "2.5vw");
    }

    #[test]
    fn event_names_are_distinct() {
        assert_ne!(events::LAYOUT_SAVED, events::GRID_ACTION);
        assert_eq!(events::LAYOUT_SAVED, "layout-saved");
    }

    #[test]
    fn concurrent_adds_serialize() {
        use std::sync::Arc;
        use std::thread;

        let state = Arc::new(test_state());
        let mut handles = Vec::new();

        for _ in 0..6 {
            let s = Arc::clone(&state);
            handles.push(thread::spawn(move || {
                let (r, _) = s.add_new_ad_space();
                assert!(is_ok(&r));
            }));
        }

        for h in handles {
            h.join().unwrap();
        }
        let placed = views(&state);
        assert_eq!(placed.len(), 6);
        let mut ys: Vec<u32> = placed.iter().map(|v| v.y).collect();
        ys.sort();
        assert_eq!(ys, vec![0, 3, 6, 9, 12, 15]);
    }
}
