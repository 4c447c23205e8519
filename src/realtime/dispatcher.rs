//! Typed handler registration
//!
//! Handlers are registered per event kind and receive the decoded payload
//! together with mutable access to the caller's state. Dispatch happens on
//! the event loop, one event at a time.

use super::messages::{
    BadgesUnlocked, BoopReceived, BoopSent, ConnectedAck, RealtimeEvent, ServerEvent,
};
use crate::model::GlobalStats;

type Handler<S, P> = Box<dyn FnMut(&mut S, &P) + Send>;

pub struct EventDispatcher<S> {
    connect: Vec<Handler<S, ()>>,
    disconnect: Vec<Handler<S, Option<String>>>,
    connected: Vec<Handler<S, ConnectedAck>>,
    boop_received: Vec<Handler<S, BoopReceived>>,
    boop_sent: Vec<Handler<S, BoopSent>>,
    badges_unlocked: Vec<Handler<S, BadgesUnlocked>>,
    global_stats_update: Vec<Handler<S, GlobalStats>>,
}

impl<S> Default for EventDispatcher<S> {
    fn default() -> Self {
        Self {
            connect: Vec::new(),
            disconnect: Vec::new(),
            connected: Vec::new(),
            boop_received: Vec::new(),
            boop_sent: Vec::new(),
            badges_unlocked: Vec::new(),
            global_stats_update: Vec::new(),
        }
    }
}

impl<S> EventDispatcher<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_connect(&mut self, mut handler: impl FnMut(&mut S) + Send + 'static) -> &mut Self {
        self.connect.push(Box::new(move |state, _| handler(state)));
        self
    }

    pub fn on_disconnect(
        &mut self,
        handler: impl FnMut(&mut S, &Option<String>) + Send + 'static,
    ) -> &mut Self {
        self.disconnect.push(Box::new(handler));
        self
    }

    pub fn on_connected(
        &mut self,
        handler: impl FnMut(&mut S, &ConnectedAck) + Send + 'static,
    ) -> &mut Self {
        self.connected.push(Box::new(handler));
        self
    }

    pub fn on_boop_received(
        &mut self,
        handler: impl FnMut(&mut S, &BoopReceived) + Send + 'static,
    ) -> &mut Self {
        self.boop_received.push(Box::new(handler));
        self
    }

    pub fn on_boop_sent(
        &mut self,
        handler: impl FnMut(&mut S, &BoopSent) + Send + 'static,
    ) -> &mut Self {
        self.boop_sent.push(Box::new(handler));
        self
    }

    pub fn on_badges_unlocked(
        &mut self,
        handler: impl FnMut(&mut S, &BadgesUnlocked) + Send + 'static,
    ) -> &mut Self {
        self.badges_unlocked.push(Box::new(handler));
        self
    }

    pub fn on_global_stats_update(
        &mut self,
        handler: impl FnMut(&mut S, &GlobalStats) + Send + 'static,
    ) -> &mut Self {
        self.global_stats_update.push(Box::new(handler));
        self
    }

    /// Run every handler registered for `event`, in registration order.
    /// Returns how many ran.
    pub fn dispatch(&mut self, state: &mut S, event: &RealtimeEvent) -> usize {
        let handled = match event {
            RealtimeEvent::Connect => run(&mut self.connect, state, &()),
            RealtimeEvent::Disconnect { reason } => run(&mut self.disconnect, state, reason),
            RealtimeEvent::Server(server) => match server {
                ServerEvent::Connected(ack) => run(&mut self.connected, state, ack),
                ServerEvent::BoopReceived(received) => {
                    run(&mut self.boop_received, state, received)
                }
                ServerEvent::BoopSent(sent) => run(&mut self.boop_sent, state, sent),
                ServerEvent::BadgesUnlocked(unlocked) => {
                    run(&mut self.badges_unlocked, state, unlocked)
                }
                ServerEvent::GlobalStatsUpdate(stats) => {
                    run(&mut self.global_stats_update, state, stats)
                }
            },
        };

        if handled == 0 {
            tracing::debug!(event = ?event, "No handler registered");
        }
        handled
    }
}

fn run<S, P>(handlers: &mut [Handler<S, P>], state: &mut S, payload: &P) -> usize {
    for handler in handlers.iter_mut() {
        handler(state, payload);
    }
    handlers.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::realtime::messages::BoopSender;
    use crate::model::PawStyle;

    #[derive(Default)]
    struct Log(Vec<String>);

    fn received(from: &str) -> RealtimeEvent {
        RealtimeEvent::Server(ServerEvent::BoopReceived(BoopReceived {
            sender: BoopSender {
                id: 1,
                display_name: from.to_string(),
                color_theme: None,
                paw_style: PawStyle::Default,
            },
            boop_id: None,
            global_stats: None,
        }))
    }

    #[test]
    fn test_handlers_run_in_registration_order() {
        let mut dispatcher = EventDispatcher::<Log>::new();
        dispatcher
            .on_boop_received(|log, ev| log.0.push(format!("first:{}", ev.sender.display_name)))
            .on_boop_received(|log, ev| log.0.push(format!("second:{}", ev.sender.display_name)));

        let mut log = Log::default();
        let handled = dispatcher.dispatch(&mut log, &received("Two"));

        assert_eq!(handled, 2);
        assert_eq!(log.0, vec!["first:Two", "second:Two"]);
    }

    #[test]
    fn test_only_matching_kind_runs() {
        let mut dispatcher = EventDispatcher::<Log>::new();
        dispatcher
            .on_connect(|log| log.0.push("connect".to_string()))
            .on_disconnect(|log, reason| log.0.push(format!("disconnect:{:?}", reason)))
            .on_global_stats_update(|log, stats| {
                log.0.push(format!("total:{}", stats.total_boops))
            });

        let mut log = Log::default();
        dispatcher.dispatch(&mut log, &RealtimeEvent::Connect);
        dispatcher.dispatch(
            &mut log,
            &RealtimeEvent::Server(ServerEvent::GlobalStatsUpdate(GlobalStats {
                total_boops: 7,
                ..Default::default()
            })),
        );
        assert_eq!(dispatcher.dispatch(&mut log, &received("x")), 0);
        dispatcher.dispatch(&mut log, &RealtimeEvent::Disconnect { reason: None });

        assert_eq!(log.0, vec!["connect", "total:7", "disconnect:None"]);
    }

    #[test]
    fn test_handlers_can_keep_their_own_state() {
        let mut dispatcher = EventDispatcher::<Log>::new();
        let mut seen = 0;
        dispatcher.on_boop_sent(move |log, sent| {
            seen += 1;
            log.0.push(format!("{}:{}", seen, sent.success));
        });

        let sent = RealtimeEvent::Server(ServerEvent::BoopSent(BoopSent {
            success: true,
            recipient_id: Some(2),
            new_badges: Vec::new(),
            global_stats: None,
        }));
        let mut log = Log::default();
        dispatcher.dispatch(&mut log, &sent);
        dispatcher.dispatch(&mut log, &sent);

        assert_eq!(log.0, vec!["1:true", "2:true"]);
    }
}
