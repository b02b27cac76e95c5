use shared::{catalog_view, redeem_notice, CatalogView, CodeEntry, RequestState, LOADING_CODES};
use yew::prelude::*;

use crate::api;
use crate::components::CodeCard;

fn notify(message: &str) {
    match web_sys::window() {
        Some(w) => {
            if let Err(e) = w.alert_with_message(message) {
                log::error!("Failed to show notification: {:?}", e);
            }
        }
        None => log::warn!("No window to notify: {}", message),
    }
}

#[function_component(Home)]
pub fn home() -> Html {
    let catalog = use_state(RequestState::<Vec<CodeEntry>>::default);

    {
        let catalog = catalog.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let result = api::fetch_codes().await;
                if let Err(e) = &result {
                    log::error!("Error fetching codes: {}", e);
                }
                catalog.set(result.into());
            });
            || ()
        });
    }

    // Redeem results never touch the list.
    let on_redeem = Callback::from(|entry: CodeEntry| {
        wasm_bindgen_futures::spawn_local(async move {
            let result = api::redeem(&entry.redeem_request()).await;
            notify(&redeem_notice(result));
        });
    });

    let content = match catalog_view(&catalog) {
        CatalogView::Loading => html! { <p>{ LOADING_CODES }</p> },
        CatalogView::Grid(entries) => html! {
            <div class="codes-grid">
                { for entries.iter().enumerate().map(|(index, entry)| html! {
                    <CodeCard key={index} entry={entry.clone()} on_redeem={on_redeem.clone()} />
                })}
            </div>
        },
    };

    html! {
        <main class="main-content">
            <h2>{ "Available Game Codes" }</h2>
            { content }
        </main>
    }
}
