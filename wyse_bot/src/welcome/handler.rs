use anyhow::Result;
use teloxide::{
    prelude::*,
    types::{ChatMemberUpdated, ParseMode},
};

use crate::welcome::{
    dto::MemberStatus,
    helpers::{is_join_event, welcome_text},
};

pub async fn handle_chat_member(bot: Bot, update: ChatMemberUpdated) -> Result<()> {
    let old = MemberStatus::from(&update.old_chat_member.kind);
    let new = MemberStatus::from(&update.new_chat_member.kind);

    if !is_join_event(old, new) {
        return Ok(());
    }

    let user = &update.new_chat_member.user;
    log::info!("User {} joined chat {}", user.id.0, update.chat.id.0);

    bot.send_message(update.chat.id, welcome_text(&user.first_name))
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
