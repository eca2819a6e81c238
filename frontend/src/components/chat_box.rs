use super::chat_screen::ChatScreen;
use shared::chat::{Exchange, Speaker};
use shared::render::{render_bot_message, MessageBody};
use yew::prelude::*;

pub fn render_chat_box(screen: &ChatScreen) -> Html {
    html! {
        <div
            class="chat-box p-3 rounded-4 bg-light border mb-3"
            ref={screen.chat_box.clone()}
        >
            { for screen.transcript.exchanges().iter().map(render_exchange) }
        </div>
    }
}

fn render_exchange(exchange: &Exchange) -> Html {
    let bubble = match exchange.speaker {
        Speaker::Bot => "bg-white text-success align-self-start",
        Speaker::User => "bg-success text-white align-self-end",
    };

    html! {
        <div key={exchange.id.to_string()} class={classes!("chat-message", "p-3", "my-2", "rounded-4", bubble)}>
            <strong>{ format!("{}:", exchange.speaker) }</strong>{" "}
            { render_body(exchange) }
        </div>
    }
}

fn render_body(exchange: &Exchange) -> Html {
    if exchange.is_typing {
        return html! {
            <span class="typing-dots">
                <span class="dot"></span>
                <span class="dot"></span>
                <span class="dot"></span>
            </span>
        };
    }

    match exchange.speaker {
        Speaker::User => html! { <span class="user-text">{ exchange.text.clone() }</span> },
        Speaker::Bot => match render_bot_message(&exchange.text) {
            MessageBody::Image(src) => html! {
                <img class="img-fluid rounded mt-2 bot-image" src={src} alt="Bot response" />
            },
            MessageBody::Html(markup) => html! {
                <div class="bot-markdown">{ Html::from_html_unchecked(AttrValue::from(markup)) }</div>
            },
        },
    }
}
