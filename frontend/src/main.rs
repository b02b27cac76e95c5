use shared::Session;
use yew::prelude::*;
use yew_router::prelude::*;

mod api;
mod components;
mod pages;
mod session;

use components::Layout;
use session::{BrowserStore, SessionContext};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <pages::home::Home /> },
        Route::Login => html! { <pages::login::Login /> },
        Route::NotFound => html! { <pages::home::Home /> },
    }
}

#[function_component(App)]
fn app() -> Html {
    let session = use_state(|| Session::restore(BrowserStore));

    html! {
        <ContextProvider<SessionContext> context={session}>
            <BrowserRouter>
                <Layout>
                    <Switch<Route> render={switch} />
                </Layout>
            </BrowserRouter>
        </ContextProvider<SessionContext>>
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
