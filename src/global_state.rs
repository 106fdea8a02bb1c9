use crate::app::CaptureStatus;
use crate::domain::theme::Theme;
use leptos::*;
use once_cell::sync::OnceCell;

pub struct Globals {
    pub theme: RwSignal<Theme>,
    pub capture_status: RwSignal<CaptureStatus>,
    pub last_saved: RwSignal<Option<String>>,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals {
        theme: create_rw_signal(Theme::default()),
        capture_status: create_rw_signal(CaptureStatus::Idle),
        last_saved: create_rw_signal(None),
    })
}

crate::global_signals! {
    pub theme => theme: Theme,
    pub capture_status => capture_status: CaptureStatus,
    pub last_saved => last_saved: Option<String>,
}
