//! Tauri IPC command handlers for adgrid.
//!
//! Each function is a Tauri command that bridges the webview page to the
//! core Sys runtime via AppState. Actions produced by a command are relayed
//! to the webview before the command returns.

use adgrid_core::command::Command;
use adgrid_core::response::{Action, Response};
use serde::{Deserialize, Serialize};
use tauri::{AppHandle, Runtime, State};

use crate::{relay, AppState};


/// Uniform response type for all IPC commands.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IpcResponse {
    pub ok: bool,
    pub data: String,
}


impl IpcResponse {
    pub fn success(data: String) -> Self {
        IpcResponse { ok: true, data }
    }

    pub fn error(msg: String) -> Self {
        IpcResponse { ok: false, data: msg }
    }
}


fn to_ipc(resp: Response) -> IpcResponse {
    match resp {
        Response::Ok { output } => IpcResponse::success(output),
        Response::Error { message } => IpcResponse::error(message),
    }
}


fn relayed<R: Runtime>(app: &AppHandle<R>, (resp, actions): (Response, Vec<Action>)) -> IpcResponse {
    relay(app, actions);
    to_ipc(resp)
}


// ---------------------------------------------------------------------------
// Boundary functions
// ---------------------------------------------------------------------------

#[tauri::command]
pub fn load_serialized_layout<R: Runtime>(
    app: AppHandle<R>,
    state: State<'_, AppState>,
    serialized_data: String,
) -> IpcResponse {
    relayed(&app, state.load_serialized_layout(serialized_data))
}

#[tauri::command]
pub fn save_layout<R: Runtime>(app: AppHandle<R>, state: State<'_, AppState>) -> IpcResponse {
    relayed(&app, state.save_layout())
}

#[tauri::command]
pub fn add_new_ad_space<R: Runtime>(app: AppHandle<R>, state: State<'_, AppState>) -> IpcResponse {
    relayed(&app, state.add_new_ad_space())
}

#[tauri::command]
pub fn remove_selected_ad_space<R: Runtime>(
    app: AppHandle<R>,
    state: State<'_, AppState>,
) -> IpcResponse {
    relayed(&app, state.remove_selected_ad_space())
}

#[tauri::command]
pub fn toggle_lock<R: Runtime>(app: AppHandle<R>, state: State<'_, AppState>) -> IpcResponse {
    relayed(&app, state.toggle_lock())
}


// ---------------------------------------------------------------------------
// Pointer input
// ---------------------------------------------------------------------------

/// Any `Command` in its JSON form, e.g. `{"command":"click","target":"canvas"}`.
#[tauri::command]
pub fn dispatch<R: Runtime>(
    app: AppHandle<R>,
    state: State<'_, AppState>,
    command: Command,
) -> IpcResponse {
    relayed(&app, state.dispatch(command))
}


// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[tauri::command]
pub fn grid_view(state: State<'_, AppState>) -> IpcResponse {
    to_ipc(state.view())
}

#[tauri::command]
pub fn grid_config(state: State<'_, AppState>) -> IpcResponse {
    IpcResponse::success(state.grid_config())
}

#[tauri::command]
pub fn grid_status(state: State<'_, AppState>) -> IpcResponse {
    to_ipc(state.status())
}

#[tauri::command]
pub fn grid_help(state: State<'_, AppState>, topic: Option<String>) -> IpcResponse {
    to_ipc(state.help(topic))
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
