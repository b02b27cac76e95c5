use yew::prelude::*;
use yew_router::prelude::*;

use crate::session::SessionContext;
use crate::Route;

#[function_component(Header)]
pub fn header() -> Html {
    let session = use_context::<SessionContext>();

    let logout = match session {
        Some(session) if session.is_authenticated() => {
            let on_logout = Callback::from(move |_: MouseEvent| {
                let mut next = (*session).clone();
                match next.clear() {
                    Ok(()) => session.set(next),
                    Err(e) => log::error!("{}", e),
                }
            });
            html! {
                <button class="nav-link btn-logout" onclick={on_logout}>{ "Logout" }</button>
            }
        }
        _ => html! {},
    };

    html! {
        <header class="header">
            <h1>{ "Hoyoverse Codes Hub" }</h1>
            <nav>
                <Link<Route> to={Route::Home} classes={classes!("nav-link")}>{ "Home" }</Link<Route>>
                <Link<Route> to={Route::Login} classes={classes!("nav-link")}>{ "Login" }</Link<Route>>
                { logout }
            </nav>
        </header>
    }
}
