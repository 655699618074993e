// ============================================================================
// USE SCAN SESSION HOOK - Une la sesión de escaneo con el ciclo de vida Yew
// ============================================================================
// El estado real vive en ScanSession; este hook la suscribe al re-render,
// expone callbacks para la UI y garantiza el stop al desmontar.
// ============================================================================

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::config::CONFIG;
use crate::decoder::{create_decoder, DecoderEngine};
use crate::services::MediaDeviceService;
use crate::state::{ScanSession, ScanSnapshot};
use crate::utils::constants::DOM_READY_DELAY_MS;
use crate::viewmodels::ScanViewModel;

#[derive(Clone)]
pub struct UseScanSessionHandle {
    pub state: UseStateHandle<ScanSnapshot>,
    pub start: Callback<()>,
    pub stop: Callback<()>,
    pub scan_another: Callback<()>,
}

#[hook]
pub fn use_scan_session(engine: DecoderEngine) -> UseScanSessionHandle {
    let session = use_memo((), |_| ScanSession::new());
    let state = use_state(|| session.snapshot());

    let viewmodel = {
        let session = session.clone();
        use_memo(engine, move |engine| {
            ScanViewModel::new(
                MediaDeviceService::new(),
                create_decoder(*engine),
                (*session).clone(),
                &CONFIG,
            )
        })
    };

    // Arranque compartido por el botón, el auto-start y "escanear otro".
    // Si falla, el mensaje de usuario (si hay) se muestra con alert, como
    // hacía el widget original.
    let run_start: Rc<dyn Fn()> = {
        let viewmodel = viewmodel.clone();
        Rc::new(move || {
            let viewmodel = viewmodel.clone();
            spawn_local(async move {
                if let Err(error) = viewmodel.start_scan().await {
                    if let Some(message) = error.user_message() {
                        if let Some(window) = web_sys::window() {
                            let _ = window.alert_with_message(&message);
                        }
                    }
                }
            });
        })
    };

    let start = {
        let run_start = run_start.clone();
        Callback::from(move |_| run_start())
    };

    let stop = {
        let viewmodel = viewmodel.clone();
        Callback::from(move |_| viewmodel.stop_scan())
    };

    let scan_another = {
        let viewmodel = viewmodel.clone();
        let run_start = run_start.clone();
        Callback::from(move |_| {
            viewmodel.reset();
            run_start();
        })
    };

    // Suscripción al estado (una sola vez por montaje)
    {
        let session = session.clone();
        let state = state.clone();
        use_effect_with((), move |_| {
            let snapshot_source = (*session).clone();
            let state = state.clone();
            session.subscribe(Rc::new(move || {
                state.set(snapshot_source.snapshot());
            }));
        });
    }

    // Ciclo de vida por motor: auto-start al montar (con delay para que el
    // <video> exista en el DOM) y stop al desmontar o cambiar de motor. El
    // destructor es dueño del Timeout: si todavía no disparó, ahí se cancela.
    {
        let session = session.clone();
        let run_start = run_start.clone();
        use_effect_with(engine, move |engine| {
            log::info!("📷 [HOOK] Scanner montado con motor {}", engine);
            let pending_start = CONFIG.auto_start.then(|| {
                let run_start = run_start.clone();
                Timeout::new(DOM_READY_DELAY_MS, move || run_start())
            });
            move || {
                drop(pending_start);
                session.stop();
            }
        });
    }

    UseScanSessionHandle {
        state,
        start,
        stop,
        scan_another,
    }
}
