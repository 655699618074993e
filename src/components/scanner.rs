// ============================================================================
// SCANNER COMPONENT - Widget de escaneo QR
// ============================================================================
// Render puro sobre el snapshot de la sesión; toda la lógica vive en el
// hook y el viewmodel.
// ============================================================================

use yew::prelude::*;

use crate::config::CONFIG;
use crate::decoder::DecoderEngine;
use crate::hooks::use_scan_session;
use crate::models::ScanPhase;

#[derive(Properties, PartialEq)]
pub struct ScannerProps {
    /// Motor de decodificación a usar
    #[prop_or_default]
    pub engine: DecoderEngine,
    /// Notificación hacia afuera con el texto decodificado
    #[prop_or_default]
    pub on_decoded: Callback<String>,
}

#[function_component(Scanner)]
pub fn scanner(props: &ScannerProps) -> Html {
    let scan = use_scan_session(props.engine);
    let snapshot = (*scan.state).clone();

    // Avisar hacia afuera exactamente una vez por decodificación
    {
        let on_decoded = props.on_decoded.clone();
        use_effect_with(
            (snapshot.phase, snapshot.last_result.clone()),
            move |(phase, last_result)| {
                if *phase == ScanPhase::Decoded {
                    if let Some(text) = last_result {
                        on_decoded.emit(text.clone());
                    }
                }
                || {}
            },
        );
    }

    let (icon, text, class) = match snapshot.phase {
        ScanPhase::Idle => ("⏸", "Camera off".to_string(), "scan-indicator idle"),
        ScanPhase::Requesting => (
            "⏳",
            "Starting camera...".to_string(),
            "scan-indicator requesting",
        ),
        ScanPhase::Scanning => {
            let label = snapshot
                .selected_device
                .as_ref()
                .map(|d| d.label.clone())
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| "camera".to_string());
            ("📷", format!("Scanning with {}", label), "scan-indicator scanning")
        }
        ScanPhase::Decoded => ("✅", "QR decoded".to_string(), "scan-indicator decoded"),
    };

    let controls = match snapshot.phase {
        ScanPhase::Idle => html! {
            <button class="btn-scan" onclick={scan.start.reform(|_| ())}>
                {"Start scanning"}
            </button>
        },
        ScanPhase::Requesting | ScanPhase::Scanning => html! {
            <button class="btn-scan" onclick={scan.stop.reform(|_| ())}>
                {"Stop"}
            </button>
        },
        ScanPhase::Decoded => html! {
            <button class="btn-scan" onclick={scan.scan_another.reform(|_| ())}>
                {"Scan another"}
            </button>
        },
    };

    html! {
        <div class="qr-scanner">
            <div class={class}>
                <span class="scan-icon">{icon}</span>
                <span class="scan-text">{text}</span>
            </div>

            <video
                id={CONFIG.video_element_id.clone()}
                class="scan-video"
                autoplay=true
                muted=true
                playsinline=true
            />

            <p class="scan-line">
                {
                    match &snapshot.last_result {
                        Some(text) => format!("✅ {}", text),
                        None => "📷 Scan a QR code".to_string(),
                    }
                }
            </p>

            {
                if let Some(message) = &snapshot.user_error {
                    html! { <p class="scan-error">{message}</p> }
                } else {
                    html! {}
                }
            }

            <div class="scan-controls">{controls}</div>
        </div>
    }
}
