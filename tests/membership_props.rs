//! Property-based tests for membership bookkeeping.
//!
//! Feeds random sequences of JOIN, PART, QUIT, KICK, NICK, MODE, 353 and
//! 366 lines through an engine and checks after every line that:
//! 1. Users and channels reference each other in both directions
//! 2. Ops and voice are subsets of a channel's members
//! 3. No empty channel survives outside an open NAMES window
//! 4. Each line had its own effect (eviction, privilege round trip,
//!    NICK re-keying, KICK removal)

use proptest::prelude::*;
use slirc_client::{Commands, Engine, NoopHooks, NullSink, Outbox, Session};
use std::collections::{BTreeSet, HashSet};
use tokio::sync::mpsc::UnboundedReceiver;

const NICKS: &[&str] = &["me", "alice", "bob", "carol", "dave"];
const CHANNELS: &[&str] = &["#a", "#b", "#c"];
const NAMES_PREFIXES: &[&str] = &["", "@", "+", "@+"];
const PRIVILEGES: &[char] = &['o', 'v'];

#[derive(Debug, Clone)]
enum Event {
    Join(&'static str, &'static str),
    Part(&'static str, &'static str),
    Quit(&'static str),
    Kick {
        by: &'static str,
        nick: &'static str,
        channel: &'static str,
    },
    Nick(&'static str, &'static str),
    Mode {
        channel: &'static str,
        adding: bool,
        mode: char,
        nick: &'static str,
    },
    Names(&'static str, Vec<(&'static str, &'static str)>),
    EndOfNames(&'static str),
}

impl Event {
    fn raw(&self) -> String {
        match self {
            Event::Join(nick, channel) => format!(":{nick}!u@h JOIN {channel}"),
            Event::Part(nick, channel) => format!(":{nick}!u@h PART {channel} :bye"),
            Event::Quit(nick) => format!(":{nick}!u@h QUIT :gone"),
            Event::Kick { by, nick, channel } => {
                format!(":{by}!u@h KICK {channel} {nick} :out")
            }
            Event::Nick(old, new) => format!(":{old}!u@h NICK :{new}"),
            Event::Mode {
                channel,
                adding,
                mode,
                nick,
            } => {
                let sign = if *adding { '+' } else { '-' };
                format!(":srv MODE {channel} {sign}{mode} {nick}")
            }
            Event::Names(channel, entries) => {
                let names = entries
                    .iter()
                    .map(|(prefix, nick)| format!("{prefix}{nick}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                format!(":srv 353 me = {channel} :{names}")
            }
            Event::EndOfNames(channel) => {
                format!(":srv 366 me {channel} :End of /NAMES list.")
            }
        }
    }
}

fn nick() -> impl Strategy<Value = &'static str> {
    prop::sample::select(NICKS)
}

fn channel() -> impl Strategy<Value = &'static str> {
    prop::sample::select(CHANNELS)
}

fn names_entries() -> impl Strategy<Value = Vec<(&'static str, &'static str)>> {
    (
        prop::sample::subsequence(NICKS.to_vec(), 1..=NICKS.len()),
        prop::collection::vec(prop::sample::select(NAMES_PREFIXES), NICKS.len()),
    )
        .prop_map(|(nicks, prefixes)| prefixes.into_iter().zip(nicks).collect())
}

fn event_strategy() -> impl Strategy<Value = Event> {
    prop_oneof![
        3 => (nick(), channel()).prop_map(|(n, c)| Event::Join(n, c)),
        2 => (nick(), channel()).prop_map(|(n, c)| Event::Part(n, c)),
        1 => nick().prop_map(Event::Quit),
        1 => (nick(), nick(), channel())
            .prop_map(|(by, nick, channel)| Event::Kick { by, nick, channel }),
        1 => (nick(), nick()).prop_map(|(old, new)| Event::Nick(old, new)),
        2 => (channel(), any::<bool>(), prop::sample::select(PRIVILEGES), nick()).prop_map(
            |(channel, adding, mode, nick)| Event::Mode {
                channel,
                adding,
                mode,
                nick,
            }
        ),
        1 => (channel(), names_entries()).prop_map(|(c, e)| Event::Names(c, e)),
        1 => channel().prop_map(Event::EndOfNames),
    ]
}

/// Pre-line facts an event's own check needs.
enum Before {
    None,
    Part { sole: bool, own: bool },
    Nick(Vec<(String, bool, bool)>),
}

fn capture(session: &Session, event: &Event) -> Before {
    match event {
        Event::Part(nick, channel) => Before::Part {
            sole: session
                .channel(channel)
                .is_some_and(|ch| ch.users().len() == 1 && ch.has_user(nick)),
            own: session.is_own_nick(nick),
        },
        Event::Nick(old, _) => Before::Nick(
            session
                .user(old)
                .map(|u| {
                    u.channels
                        .iter()
                        .map(|name| {
                            let ch = session.channel(name);
                            (
                                name.clone(),
                                ch.is_some_and(|c| c.is_op(old)),
                                ch.is_some_and(|c| c.has_voice(old)),
                            )
                        })
                        .collect()
                })
                .unwrap_or_default(),
        ),
        _ => Before::None,
    }
}

fn check_links(session: &Session, names_open: &HashSet<&str>) -> Result<(), TestCaseError> {
    for chan in session.channels() {
        prop_assert!(chan.ops().is_subset(chan.users()), "ops outside {}", chan.name);
        prop_assert!(chan.voice().is_subset(chan.users()), "voice outside {}", chan.name);
        prop_assert!(
            !chan.is_empty() || names_open.contains(chan.name.as_str()),
            "empty channel {} kept",
            chan.name
        );
        for nick in chan.users() {
            let user = session.user(nick);
            prop_assert!(
                user.is_some_and(|u| u.is_in(&chan.name)),
                "{} lists {} but the user does not list it",
                chan.name,
                nick
            );
        }
    }
    for user in session.users() {
        for name in &user.channels {
            prop_assert!(
                session.channel(name).is_some_and(|c| c.has_user(&user.nick)),
                "{} lists {} but the channel does not list it",
                user.nick,
                name
            );
        }
    }
    Ok(())
}

fn check_effect(session: &Session, event: &Event, before: Before) -> Result<(), TestCaseError> {
    match (event, before) {
        (Event::Join(nick, channel), _) => {
            prop_assert!(session.channel(channel).is_some_and(|c| c.has_user(nick)));
            prop_assert!(session.user(nick).is_some_and(|u| u.is_in(channel)));
        }
        (Event::Part(nick, channel), Before::Part { sole, own }) => {
            prop_assert!(session.channel(channel).is_none_or(|c| !c.has_user(nick)));
            prop_assert!(session.user(nick).is_none_or(|u| !u.is_in(channel)));
            if own {
                prop_assert!(session.channel(channel).is_none());
                prop_assert!(!session.has_joined(channel));
            }
            // Eviction may wait for 366 if a NAMES window is open; the
            // link check covers that case.
            if sole {
                prop_assert!(session.channel(channel).is_none_or(|c| c.is_empty()));
            }
        }
        (Event::Quit(nick), _) => {
            prop_assert!(session.user(nick).is_none());
            prop_assert!(session.channels().all(|c| !c.has_user(nick)));
        }
        (Event::Kick { nick, channel, .. }, _) => {
            let kicked_cleared = session.channel(channel).is_none_or(|c| {
                !c.has_user(nick) && !c.is_op(nick) && !c.has_voice(nick)
            });
            prop_assert!(kicked_cleared);
            prop_assert!(session.user(nick).is_none_or(|u| !u.is_in(channel)));
        }
        (Event::Nick(old, new), Before::Nick(memberships)) if old != new => {
            prop_assert!(session.user(old).is_none());
            prop_assert!(session.channels().all(|c| !c.has_user(old)));
            let user = session.user(new);
            prop_assert!(user.is_some());
            let expected: BTreeSet<String> =
                memberships.iter().map(|(name, _, _)| name.clone()).collect();
            prop_assert_eq!(user.map(|u| u.channels.clone()), Some(expected));
            for (name, op, voice) in &memberships {
                let chan = session.channel(name);
                prop_assert!(chan.is_some_and(|c| c.has_user(new)));
                prop_assert_eq!(chan.map(|c| c.is_op(new)), Some(*op));
                prop_assert_eq!(chan.map(|c| c.has_voice(new)), Some(*voice));
            }
        }
        (
            Event::Mode {
                channel,
                adding,
                mode,
                nick,
            },
            _,
        ) => {
            let chan = session.channel(channel);
            prop_assert!(chan.is_some_and(|c| c.has_user(nick)));
            let granted = if *mode == 'o' {
                chan.is_some_and(|c| c.is_op(nick))
            } else {
                chan.is_some_and(|c| c.has_voice(nick))
            };
            prop_assert_eq!(granted, *adding);
        }
        (Event::Names(channel, entries), _) => {
            let chan = session.channel(channel);
            for (prefix, nick) in entries {
                prop_assert!(chan.is_some_and(|c| c.has_user(nick)));
                if prefix.contains('@') {
                    prop_assert!(chan.is_some_and(|c| c.is_op(nick)));
                }
                if prefix.contains('+') {
                    prop_assert!(chan.is_some_and(|c| c.has_voice(nick)));
                }
            }
        }
        _ => {}
    }
    Ok(())
}

fn engine() -> (Engine, UnboundedReceiver<String>) {
    let (outbox, rx) = Outbox::channel();
    let mut engine = Engine::new(Commands::new(outbox), Box::new(NoopHooks), Box::new(NullSink));
    engine.handle_raw(":srv 001 me :Welcome");
    (engine, rx)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn membership_stays_consistent(events in prop::collection::vec(event_strategy(), 1..80)) {
        let (mut engine, mut rx) = engine();
        let mut names_open: HashSet<&str> = HashSet::new();

        for event in &events {
            let before = capture(engine.session(), event);
            engine.handle_raw(&event.raw());
            while rx.try_recv().is_ok() {}

            match event {
                Event::Names(channel, _) => {
                    names_open.insert(*channel);
                }
                Event::EndOfNames(channel) => {
                    names_open.remove(*channel);
                }
                _ => {}
            }
            // Dropping a channel closes its NAMES window too.
            names_open.retain(|c| engine.session().channel(c).is_some());

            check_links(engine.session(), &names_open)?;
            check_effect(engine.session(), event, before)?;
        }
    }

    #[test]
    fn join_then_part_leaves_nothing(
        nick in prop::sample::select(NICKS[1..].to_vec()),
        channel in channel(),
    ) {
        let (mut engine, _rx) = engine();
        engine.handle_raw(&Event::Join(nick, channel).raw());
        engine.handle_raw(&Event::Part(nick, channel).raw());
        prop_assert!(engine.session().channel(channel).is_none());
        prop_assert!(engine.session().user(nick).is_none_or(|u| u.channels.is_empty()));
    }

    #[test]
    fn privilege_round_trip(
        nick in nick(),
        channel in channel(),
        mode in prop::sample::select(PRIVILEGES),
    ) {
        let (mut engine, _rx) = engine();
        engine.handle_raw(&Event::Join(nick, channel).raw());
        for adding in [true, false] {
            engine.handle_raw(&Event::Mode { channel, adding, mode, nick }.raw());
        }
        let chan = engine.session().channel(channel);
        prop_assert!(chan.is_some_and(|c| c.has_user(nick)));
        prop_assert!(chan.is_some_and(|c| !c.is_op(nick) && !c.has_voice(nick)));
    }
}
