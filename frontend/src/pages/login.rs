use shared::{
    complete_login, redirect_after, LoginOutcome, LoginRequest, RedirectCancel, REDIRECT_DELAY,
};
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::session::SessionContext;
use crate::Route;

fn input_value(e: &InputEvent) -> Option<String> {
    e.target()
        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
}

#[function_component(Login)]
pub fn login() -> Html {
    let username = use_state(String::new);
    let password = use_state(String::new);
    let message = use_state(|| None::<&'static str>);
    let redirect_pending = use_state(|| false);
    let session = use_context::<SessionContext>();
    let navigator = use_navigator();

    // Leave for the catalog once the token is stored; dropped if the view
    // unmounts before the delay runs out.
    {
        use_effect_with(*redirect_pending, move |pending| {
            let cancel = RedirectCancel::new();
            if *pending {
                let cancel = cancel.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let delay = yew::platform::time::sleep(REDIRECT_DELAY);
                    redirect_after(delay, cancel, move || match navigator {
                        Some(navigator) => navigator.push(&Route::Home),
                        None => log::warn!("No router available to leave the login page"),
                    })
                    .await;
                });
            }
            move || cancel.cancel()
        });
    }

    let on_username_input = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(value) = input_value(&e) {
                username.set(value);
            }
        })
    };

    let on_password_input = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(value) = input_value(&e) {
                password.set(value);
            }
        })
    };

    let on_submit = {
        let username = username.clone();
        let password = password.clone();
        let message = message.clone();
        let redirect_pending = redirect_pending.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let form = LoginRequest {
                username: (*username).clone(),
                password: (*password).clone(),
            };
            let message = message.clone();
            let redirect_pending = redirect_pending.clone();
            let session = session.clone();

            wasm_bindgen_futures::spawn_local(async move {
                let result = api::login(&form).await;
                let outcome = match session {
                    Some(session) => {
                        let mut next = (*session).clone();
                        let outcome = complete_login(result, &mut next);
                        session.set(next);
                        outcome
                    }
                    None => {
                        log::error!("No session context for the login page");
                        LoginOutcome::Errored
                    }
                };

                message.set(Some(outcome.message()));
                if outcome.redirects() {
                    redirect_pending.set(true);
                }
            });
        })
    };

    html! {
        <main class="login-content">
            <div class="login-form-container">
                <h2>{ "Login" }</h2>
                <form onsubmit={on_submit} class="login-form">
                    <div class="form-group">
                        <label for="username">{ "Username" }</label>
                        <input
                            type="text"
                            id="username"
                            value={(*username).clone()}
                            oninput={on_username_input}
                            required={true}
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">{ "Password" }</label>
                        <input
                            type="password"
                            id="password"
                            value={(*password).clone()}
                            oninput={on_password_input}
                            required={true}
                        />
                    </div>

                    <button type="submit" class="submit-btn">{ "Login" }</button>
                </form>

                if let Some(text) = *message {
                    <p class="message">{ text }</p>
                }
            </div>
        </main>
    }
}
