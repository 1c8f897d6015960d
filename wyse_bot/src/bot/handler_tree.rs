use anyhow::Result;
use teloxide::{
    dispatching::{DpHandlerDescription, HandlerExt, UpdateFilterExt},
    dptree::{self, Handler},
    types::{Message, Update},
};
use wyse_core::helpers::bot_commands::Command;

use crate::{
    bot::{answers::answers, handler::handle_text},
    welcome::handler::handle_chat_member,
};

pub fn handler_tree() -> Handler<'static, Result<()>, DpHandlerDescription> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(answers),
                )
                // Free text only; unknown commands fall through silently
                .branch(
                    dptree::entry()
                        .filter(|msg: Message| {
                            msg.text().is_some_and(|text| !text.starts_with('/'))
                        })
                        .endpoint(handle_text),
                ),
        )
        .branch(Update::filter_chat_member().endpoint(handle_chat_member))
}
