use shared::CodeEntry;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CodeCardProps {
    pub entry: CodeEntry,
    pub on_redeem: Callback<CodeEntry>,
}

#[function_component(CodeCard)]
pub fn code_card(props: &CodeCardProps) -> Html {
    let on_click = {
        let on_redeem = props.on_redeem.clone();
        let entry = props.entry.clone();
        Callback::from(move |_: MouseEvent| {
            on_redeem.emit(entry.clone());
        })
    };

    html! {
        <div class="code-card">
            <h3>{ &props.entry.game }</h3>
            <div class="code-display">{ &props.entry.code }</div>
            <p class="reward">{ &props.entry.reward }</p>
            if let Some(line) = props.entry.expiry_line() {
                <p class="expires">{ line }</p>
            }
            <button class="redeem-btn" onclick={on_click}>
                { "Redeem Code" }
            </button>
        </div>
    }
}
