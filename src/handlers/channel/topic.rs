//! Topic handlers: TOPIC, 331 RPL_NOTOPIC, 332 RPL_TOPIC, 333 RPL_TOPICWHOTIME.

use super::super::{Context, Handler, HandlerResult, server_line};
use crate::hooks::Target;
use chrono::{DateTime, Utc};
use slirc_proto::Line;

/// TOPIC change broadcast by the server.
pub struct TopicHandler;

impl Handler for TopicHandler {
    fn handle(&self, ctx: &mut Context<'_>, line: &Line) -> HandlerResult {
        // TOPIC <channel> :<topic>
        let (Some(channel), Some(topic)) = (line.param(0), line.param(1)) else {
            return Ok(());
        };

        ctx.session.set_topic(channel, Some(topic.to_owned()));
        if let Some(setter) = line.source_nick() {
            ctx.session
                .set_topic_meta(channel, setter, Some(Utc::now().timestamp()));
        }

        if !topic.is_empty() {
            ctx.push(
                Target::Channel(channel.to_owned()),
                server_line(
                    "TOPIC",
                    format!("Topic for {channel} is \"{topic}\""),
                    vec![channel.to_owned(), topic.to_owned()],
                ),
            );
        }
        Ok(())
    }
}

/// 331: the channel has no topic.
pub struct NoTopicHandler;

impl Handler for NoTopicHandler {
    fn handle(&self, ctx: &mut Context<'_>, line: &Line) -> HandlerResult {
        // 331 <me> <channel> :No topic is set
        if let Some(channel) = line.param(1) {
            ctx.session.set_topic(channel, None);
        }
        Ok(())
    }
}

/// 332: current topic, sent on join or on request.
pub struct TopicReplyHandler;

impl Handler for TopicReplyHandler {
    fn handle(&self, ctx: &mut Context<'_>, line: &Line) -> HandlerResult {
        // 332 <me> <channel> :<topic>
        let (Some(channel), Some(topic)) = (line.param(1), line.param(2)) else {
            return Ok(());
        };
        if topic.is_empty() {
            return Ok(());
        }

        ctx.session.set_topic(channel, Some(topic.to_owned()));
        ctx.push(
            Target::Channel(channel.to_owned()),
            server_line(
                "TOPIC",
                format!("Topic for {channel}: \"{topic}\""),
                vec![channel.to_owned(), topic.to_owned()],
            ),
        );
        Ok(())
    }
}

/// 333: who set the topic and when.
pub struct TopicWhoTimeHandler;

impl Handler for TopicWhoTimeHandler {
    fn handle(&self, ctx: &mut Context<'_>, line: &Line) -> HandlerResult {
        // 333 <me> <channel> <setter> <unix time>
        let (Some(channel), Some(setter)) = (line.param(1), line.param(2)) else {
            return Ok(());
        };
        let set_at = line.param(3).and_then(|t| t.parse::<i64>().ok());

        ctx.session.set_topic_meta(channel, setter, set_at);

        let when = format_topic_time(set_at.unwrap_or(0));
        ctx.push(
            Target::Channel(channel.to_owned()),
            server_line(
                "TOPICWHOTIME",
                format!("Topic set by {setter} on {when}"),
                vec![channel.to_owned(), setter.to_owned(), when],
            ),
        );
        Ok(())
    }
}

fn format_topic_time(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| secs.to_string())
}
