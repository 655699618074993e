// ============================================================================
// APP COMPONENT - Shell de demo que hospeda el widget
// ============================================================================

use yew::prelude::*;

use crate::config::CONFIG;
use crate::decoder::DecoderEngine;
use crate::components::scanner::Scanner;

#[function_component(App)]
pub fn app() -> Html {
    let engine = use_state(|| CONFIG.decoder_engine());
    let show_scanner = use_state(|| true);
    let last_decoded = use_state(|| None::<String>);

    let on_decoded = {
        let last_decoded = last_decoded.clone();
        Callback::from(move |text: String| {
            last_decoded.set(Some(text));
        })
    };

    let toggle_engine = {
        let engine = engine.clone();
        Callback::from(move |_| {
            let next = match *engine {
                DecoderEngine::Zxing => DecoderEngine::Html5Qrcode,
                DecoderEngine::Html5Qrcode => DecoderEngine::Zxing,
            };
            log::info!("🔀 [APP] Cambiando motor a {}", next);
            engine.set(next);
        })
    };

    let toggle_visibility = {
        let show_scanner = show_scanner.clone();
        Callback::from(move |_| {
            show_scanner.set(!*show_scanner);
        })
    };

    html! {
        <div class="app">
            <header class="app-header">
                <h1>{"QR Scanner"}</h1>
                <div class="app-controls">
                    <button class="btn-engine" onclick={toggle_engine}>
                        {format!("Engine: {}", *engine)}
                    </button>
                    <button class="btn-visibility" onclick={toggle_visibility}>
                        { if *show_scanner { "Hide scanner" } else { "Show scanner" } }
                    </button>
                </div>
            </header>

            {
                if *show_scanner {
                    html! { <Scanner engine={*engine} on_decoded={on_decoded} /> }
                } else {
                    html! {}
                }
            }

            {
                if let Some(text) = &*last_decoded {
                    html! { <p class="app-last-result">{format!("Last decoded: {}", text)}</p> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
