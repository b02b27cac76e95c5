use yew::prelude::*;

use super::Header;

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    #[prop_or_default]
    pub children: Html,
}

/// Shell shared by every route: one header above the routed view.
#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    html! {
        <div class="app">
            <Header />
            { props.children.clone() }
        </div>
    }
}
