//! Client state and operations
//!
//! `App` owns everything the live client knows: the favorite set, the last
//! fetched sections, counters and the real-time handle. It is driven by a
//! single event loop, so nothing here is shared or locked. Failures are
//! logged and the state is left as it was.

use std::sync::Arc;

use chrono::Utc;

use super::command::{Command, HELP};
use super::view::{boop_notification, View};
use crate::api::{ApiResult, BoopApi};
use crate::directory::{FavoriteSet, UserSections};
use crate::model::{Badge, GlobalStats, UserId, UserStats};
use crate::notifications::NewBoopsSummary;
use crate::realtime::{
    BadgesUnlocked, BoopReceived, BoopSent, ConnectedAck, EventDispatcher, RealtimeHandle,
};

pub struct App {
    api: Arc<dyn BoopApi>,
    favorites: FavoriteSet,
    sections: UserSections,
    global_total: Option<u64>,
    my_stats: Option<UserStats>,
    session_user: Option<UserId>,
    realtime: Option<RealtimeHandle>,
    view: Box<dyn View>,
}

impl App {
    pub fn new(api: Arc<dyn BoopApi>, view: Box<dyn View>) -> Self {
        Self {
            api,
            favorites: FavoriteSet::new(),
            sections: UserSections::default(),
            global_total: None,
            my_stats: None,
            session_user: None,
            realtime: None,
            view,
        }
    }

    /// Hook every real-time reaction into `dispatcher`
    pub fn register_handlers(dispatcher: &mut EventDispatcher<App>) {
        dispatcher
            .on_connect(App::on_connect)
            .on_disconnect(|app, reason| app.on_disconnect(reason.as_deref()))
            .on_connected(App::on_connected)
            .on_boop_received(App::on_boop_received)
            .on_boop_sent(App::on_boop_sent)
            .on_badges_unlocked(App::on_badges_unlocked)
            .on_global_stats_update(App::on_global_stats);
    }

    pub fn attach_realtime(&mut self, handle: RealtimeHandle) {
        self.realtime = Some(handle);
    }

    pub fn is_connected(&self) -> bool {
        self.realtime.as_ref().is_some_and(RealtimeHandle::is_connected)
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    pub fn sections(&self) -> &UserSections {
        &self.sections
    }

    pub fn global_total(&self) -> Option<u64> {
        self.global_total
    }

    pub fn my_stats(&self) -> Option<UserStats> {
        self.my_stats
    }

    /// User id the server acknowledged for this socket
    pub fn session_user(&self) -> Option<UserId> {
        self.session_user
    }

    /// Everything the page shows on first load
    pub async fn refresh_all(&mut self) {
        self.load_users().await;
        self.load_global_stats().await;
        self.load_my_stats().await;
        self.load_new_boops().await;
    }

    /// Run one typed command. Returns false when the user asked to quit.
    pub async fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::Boop(id) => self.send_boop(id).await,
            Command::Favorite(id) => self.toggle_favorite(id).await,
            Command::Users => self.load_users().await,
            Command::Stats => {
                self.load_my_stats().await;
                self.load_global_stats().await;
            }
            Command::Seen => self.mark_boops_seen().await,
            Command::Help => self.view.status(HELP),
            Command::Quit => return false,
        }
        true
    }

    pub async fn load_users(&mut self) {
        if let Err(e) = self.try_load_users().await {
            tracing::error!(error = %e, "Failed to load users");
        }
    }

    async fn try_load_users(&mut self) -> ApiResult<()> {
        let ids = self.api.favorite_ids().await?;
        self.favorites.replace_all(ids);

        let (all, favorites, mutuals) = tokio::try_join!(
            self.api.users(),
            self.api.favorites(),
            self.api.mutuals()
        )?;

        self.sections = UserSections::build(all, favorites, mutuals, &self.favorites);
        tracing::debug!(
            favorites = self.sections.favorites.len(),
            mutuals = self.sections.mutuals.len(),
            everyone = self.sections.everyone.len(),
            "Users loaded"
        );
        self.view.render_sections(&self.sections, Utc::now());
        Ok(())
    }

    /// Star or unstar `user_id`. The set only changes once the server agrees.
    pub async fn toggle_favorite(&mut self, user_id: UserId) {
        let result = if self.favorites.contains(user_id) {
            self.api.remove_favorite(user_id).await.map(|()| {
                self.favorites.remove(user_id);
            })
        } else {
            self.api.add_favorite(user_id).await.map(|_| {
                self.favorites.insert(user_id);
            })
        };

        match result {
            Ok(()) => {
                tracing::info!(
                    user_id,
                    favorited = self.favorites.contains(user_id),
                    "Favorite toggled"
                );
                self.load_users().await;
            }
            Err(e) => tracing::error!(user_id, error = %e, "Failed to toggle favorite"),
        }
    }

    pub async fn load_global_stats(&mut self) {
        match self.api.global_stats().await {
            Ok(stats) => self.apply_global_stats(&stats),
            Err(e) => tracing::error!(error = %e, "Failed to load global stats"),
        }
    }

    pub async fn load_my_stats(&mut self) {
        match self.api.my_stats().await {
            Ok(stats) => {
                self.my_stats = Some(stats);
                self.view.render_my_stats(stats);
            }
            Err(e) => tracing::error!(error = %e, "Failed to load my stats"),
        }
    }

    /// Fetch boops since last login and show them grouped by sender.
    /// An empty batch shows nothing.
    pub async fn load_new_boops(&mut self) {
        match self.api.new_boops().await {
            Ok(boops) => {
                if let Some(summary) = NewBoopsSummary::from_batch(boops) {
                    tracing::info!(
                        total = summary.total,
                        senders = summary.senders.len(),
                        "New boops since last visit"
                    );
                    self.view.render_new_boops(&summary);
                }
            }
            Err(e) => tracing::error!(error = %e, "Failed to load new boops"),
        }
    }

    pub async fn mark_boops_seen(&mut self) {
        match self.api.mark_boops_seen().await {
            Ok(()) => self.view.status("New boops marked as seen"),
            Err(e) => tracing::error!(error = %e, "Failed to mark boops seen"),
        }
    }

    /// Boop over the socket, then refresh our own counters
    pub async fn send_boop(&mut self, recipient_id: UserId) {
        match self.realtime.as_ref().filter(|h| h.is_connected()) {
            Some(handle) => {
                if let Err(e) = handle.send_boop(recipient_id) {
                    tracing::error!(recipient_id, error = %e, "Failed to send boop");
                }
            }
            None => tracing::warn!(recipient_id, "Not connected, boop not sent"),
        }
        self.load_my_stats().await;
    }

    fn apply_global_stats(&mut self, stats: &GlobalStats) {
        self.global_total = Some(stats.total_boops);
        self.view.render_global_total(stats.total_boops);
    }

    fn show_badges(&mut self, badges: &[Badge]) {
        for badge in badges {
            tracing::info!(badge = %badge.name, "Badge unlocked");
            self.view.badge_unlocked(badge);
        }
    }

    fn on_connect(&mut self) {
        tracing::info!("Connected to boop server");
        self.view.status("Connected");
    }

    fn on_disconnect(&mut self, reason: Option<&str>) {
        tracing::info!(reason, "Disconnected from boop server");
        self.realtime = None;
        self.session_user = None;
        self.view.status("Disconnected");
    }

    fn on_connected(&mut self, ack: &ConnectedAck) {
        tracing::debug!(user_id = ack.user_id, "Session acknowledged");
        self.session_user = Some(ack.user_id);
    }

    fn on_boop_received(&mut self, event: &BoopReceived) {
        let sender = &event.sender;
        tracing::info!(sender_id = sender.id, boop_id = ?event.boop_id, "Boop received");
        self.view.incoming_paw(sender.paw_style);
        self.view
            .notify(&boop_notification(&sender.display_name), sender.color_theme.as_deref());
        if let Some(stats) = &event.global_stats {
            self.apply_global_stats(stats);
        }
    }

    fn on_boop_sent(&mut self, event: &BoopSent) {
        if event.success {
            tracing::info!(recipient_id = ?event.recipient_id, "Boop sent");
            if let Some(stats) = &event.global_stats {
                self.apply_global_stats(stats);
            }
        } else {
            tracing::warn!(recipient_id = ?event.recipient_id, "Boop was not delivered");
        }
        self.show_badges(&event.new_badges);
    }

    fn on_badges_unlocked(&mut self, event: &BadgesUnlocked) {
        self.show_badges(&event.badges);
    }

    fn on_global_stats(&mut self, stats: &GlobalStats) {
        self.apply_global_stats(stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, BoopReceipt, ProfileUpdate};
    use crate::model::{NewBoop, PawInfo, PawStyle, ReceivedBoop, Timestamp, User};
    use crate::realtime::{BoopSender, RealtimeEvent, ServerEvent};
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn user(id: UserId, name: &str) -> User {
        User {
            id,
            username: None,
            display_name: name.to_string(),
            tagline: None,
            color_theme: None,
            paw_style: PawStyle::Default,
            last_active: None,
        }
    }

    #[derive(Default)]
    struct FakeServer {
        users: Vec<User>,
        favorite_ids: Vec<UserId>,
        mutual_ids: Vec<UserId>,
        new_boops: Vec<NewBoop>,
        stats: UserStats,
        total_boops: u64,
        fail_toggles: bool,
        calls: Vec<String>,
    }

    #[derive(Default)]
    struct FakeApi(Mutex<FakeServer>);

    impl FakeApi {
        fn with(server: FakeServer) -> Arc<Self> {
            Arc::new(Self(Mutex::new(server)))
        }

        fn calls(&self) -> Vec<String> {
            self.0.lock().unwrap().calls.clone()
        }

        fn record(&self, call: &str) -> std::sync::MutexGuard<'_, FakeServer> {
            let mut server = self.0.lock().unwrap();
            server.calls.push(call.to_string());
            server
        }

        fn pick(&self, call: &str, ids: fn(&FakeServer) -> Vec<UserId>) -> Vec<User> {
            let server = self.record(call);
            let wanted = ids(&server);
            server
                .users
                .iter()
                .filter(|u| wanted.contains(&u.id))
                .cloned()
                .collect()
        }
    }

    #[async_trait]
    impl BoopApi for FakeApi {
        async fn users(&self) -> ApiResult<Vec<User>> {
            Ok(self.record("users").users.clone())
        }

        async fn current_user(&self) -> ApiResult<User> {
            Ok(user(1, "Me"))
        }

        async fn update_profile(&self, _update: &ProfileUpdate) -> ApiResult<User> {
            Ok(user(1, "Me"))
        }

        async fn my_stats(&self) -> ApiResult<UserStats> {
            Ok(self.record("my_stats").stats)
        }

        async fn my_badges(&self) -> ApiResult<Vec<Badge>> {
            Ok(Vec::new())
        }

        async fn unlocked_paws(&self) -> ApiResult<Vec<PawStyle>> {
            Ok(PawStyle::STARTER.to_vec())
        }

        async fn all_paws(&self) -> ApiResult<Vec<PawInfo>> {
            Ok(Vec::new())
        }

        async fn new_boops(&self) -> ApiResult<Vec<NewBoop>> {
            Ok(self.record("new_boops").new_boops.clone())
        }

        async fn mark_boops_seen(&self) -> ApiResult<()> {
            self.record("mark_boops_seen").new_boops.clear();
            Ok(())
        }

        async fn send_boop(
            &self,
            _recipient_id: UserId,
            _paw_style: Option<PawStyle>,
        ) -> ApiResult<BoopReceipt> {
            Err(ApiError::Unavailable)
        }

        async fn received_boops(&self) -> ApiResult<Vec<ReceivedBoop>> {
            Ok(Vec::new())
        }

        async fn global_stats(&self) -> ApiResult<GlobalStats> {
            let server = self.record("global_stats");
            Ok(GlobalStats {
                total_boops: server.total_boops,
                total_users: server.users.len() as u64,
                last_updated: None,
            })
        }

        async fn favorites(&self) -> ApiResult<Vec<User>> {
            Ok(self.pick("favorites", |s| s.favorite_ids.clone()))
        }

        async fn favorite_ids(&self) -> ApiResult<Vec<UserId>> {
            Ok(self.record("favorite_ids").favorite_ids.clone())
        }

        async fn add_favorite(&self, user_id: UserId) -> ApiResult<bool> {
            let mut server = self.record("add_favorite");
            if server.fail_toggles {
                return Err(ApiError::Timeout);
            }
            server.favorite_ids.push(user_id);
            Ok(true)
        }

        async fn remove_favorite(&self, user_id: UserId) -> ApiResult<()> {
            let mut server = self.record("remove_favorite");
            if server.fail_toggles {
                return Err(ApiError::Timeout);
            }
            server.favorite_ids.retain(|id| *id != user_id);
            Ok(())
        }

        async fn mutuals(&self) -> ApiResult<Vec<User>> {
            Ok(self.pick("mutuals", |s| s.mutual_ids.clone()))
        }
    }

    #[derive(Clone, Default)]
    struct RecordingView(Arc<Mutex<Vec<String>>>);

    impl RecordingView {
        fn entries(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }

        fn push(&self, entry: String) {
            self.0.lock().unwrap().push(entry);
        }
    }

    impl View for RecordingView {
        fn render_sections(&mut self, sections: &UserSections, _now: Timestamp) {
            self.push(format!(
                "sections f={} m={} e={}",
                sections.favorites.len(),
                sections.mutuals.len(),
                sections.everyone.len()
            ));
        }

        fn render_global_total(&mut self, total_boops: u64) {
            self.push(format!("total {}", total_boops));
        }

        fn render_my_stats(&mut self, stats: UserStats) {
            self.push(format!("stats {}", crate::app::view::stats_line(stats)));
        }

        fn render_new_boops(&mut self, summary: &NewBoopsSummary) {
            self.push(format!("new {} from {}", summary.total, summary.senders.len()));
        }

        fn incoming_paw(&mut self, paw: PawStyle) {
            self.push(format!("paw {}", paw));
        }

        fn notify(&mut self, message: &str, color: Option<&str>) {
            self.push(format!("notify {} {:?}", message, color));
        }

        fn badge_unlocked(&mut self, badge: &Badge) {
            self.push(format!("badge {}", badge.name));
        }

        fn status(&mut self, message: &str) {
            self.push(format!("status {}", message));
        }
    }

    fn directory() -> FakeServer {
        FakeServer {
            users: vec![user(2, "Two"), user(3, "Three"), user(4, "Four")],
            favorite_ids: vec![2],
            mutual_ids: vec![3],
            total_boops: 1234,
            ..Default::default()
        }
    }

    fn app(api: Arc<FakeApi>) -> (App, RecordingView) {
        let view = RecordingView::default();
        (App::new(api, Box::new(view.clone())), view)
    }

    fn new_boop(sender_id: UserId, created_at: &str) -> NewBoop {
        serde_json::from_value(serde_json::json!({
            "sender_id": sender_id,
            "sender_name": format!("s{}", sender_id),
            "created_at": created_at,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_load_users_partitions_sections() {
        let api = FakeApi::with(directory());
        let (mut app, view) = app(api.clone());

        app.load_users().await;

        assert!(app.favorites().contains(2));
        assert_eq!(app.sections().everyone.len(), 1);
        assert_eq!(app.sections().everyone[0].user.id, 4);
        assert_eq!(view.entries(), vec!["sections f=1 m=1 e=1"]);
        assert_eq!(api.calls()[0], "favorite_ids");
    }

    #[tokio::test]
    async fn test_toggle_favorite_flips_and_reloads() {
        let api = FakeApi::with(directory());
        let (mut app, view) = app(api.clone());
        app.load_users().await;

        app.toggle_favorite(2).await;
        assert!(!app.favorites().contains(2));
        assert!(api.calls().contains(&"remove_favorite".to_string()));

        app.toggle_favorite(4).await;
        assert!(app.favorites().contains(4));
        assert!(api.calls().contains(&"add_favorite".to_string()));
        assert_eq!(view.entries().last().unwrap(), "sections f=1 m=1 e=1");
        assert_eq!(app.sections().favorites[0].user.id, 4);
    }

    #[tokio::test]
    async fn test_toggle_favorite_failure_leaves_set_alone() {
        let api = FakeApi::with(FakeServer {
            fail_toggles: true,
            ..directory()
        });
        let (mut app, view) = app(api);
        app.load_users().await;

        app.toggle_favorite(2).await;
        app.toggle_favorite(4).await;

        assert!(app.favorites().contains(2));
        assert!(!app.favorites().contains(4));
        assert_eq!(view.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_stats_and_global_counter() {
        let api = FakeApi::with(FakeServer {
            stats: UserStats {
                boops_sent: 3,
                boops_received: 5,
            },
            ..directory()
        });
        let (mut app, view) = app(api);

        app.handle_command(Command::Stats).await;

        assert_eq!(app.global_total(), Some(1234));
        assert_eq!(app.my_stats().map(|s| s.boops_sent), Some(3));
        assert_eq!(view.entries(), vec!["stats 3 sent / 5 received", "total 1234"]);
    }

    #[tokio::test]
    async fn test_new_boops_banner_only_when_non_empty() {
        let api = FakeApi::with(FakeServer {
            new_boops: vec![
                new_boop(1, "2024-01-01T00:00:10Z"),
                new_boop(2, "2024-01-01T00:00:05Z"),
                new_boop(1, "2024-01-01T00:00:20Z"),
            ],
            ..Default::default()
        });
        let (mut app, view) = app(api);

        app.load_new_boops().await;
        app.mark_boops_seen().await;
        app.load_new_boops().await;

        assert_eq!(
            view.entries(),
            vec!["new 3 from 2", "status New boops marked as seen"]
        );
    }

    #[tokio::test]
    async fn test_send_boop_without_connection_still_refreshes_stats() {
        let api = FakeApi::with(FakeServer::default());
        let (mut app, _view) = app(api.clone());

        assert!(app.handle_command(Command::Boop(2)).await);
        assert_eq!(api.calls(), vec!["my_stats"]);
        assert!(!app.handle_command(Command::Quit).await);
    }

    #[tokio::test]
    async fn test_realtime_reactions() {
        let api = FakeApi::with(FakeServer::default());
        let (mut app, view) = app(api);
        let mut dispatcher = EventDispatcher::new();
        App::register_handlers(&mut dispatcher);

        let events = vec![
            RealtimeEvent::Connect,
            RealtimeEvent::Server(ServerEvent::Connected(ConnectedAck { user_id: 1 })),
            RealtimeEvent::Server(ServerEvent::BoopReceived(BoopReceived {
                sender: BoopSender {
                    id: 2,
                    display_name: "Two".to_string(),
                    color_theme: Some("#FF69B4".to_string()),
                    paw_style: PawStyle::Ghost,
                },
                boop_id: Some(9),
                global_stats: Some(GlobalStats {
                    total_boops: 50,
                    ..Default::default()
                }),
            })),
            RealtimeEvent::Server(ServerEvent::BoopSent(BoopSent {
                success: true,
                recipient_id: Some(2),
                new_badges: vec![Badge {
                    name: "Booper".to_string(),
                    description: "Send 10 boops".to_string(),
                    icon: "🏅".to_string(),
                    unlocks_paw: None,
                    threshold: None,
                    earned_at: None,
                }],
                global_stats: None,
            })),
            RealtimeEvent::Server(ServerEvent::GlobalStatsUpdate(GlobalStats {
                total_boops: 51,
                ..Default::default()
            })),
            RealtimeEvent::Server(ServerEvent::BadgesUnlocked(BadgesUnlocked {
                badges: vec![Badge {
                    name: "Popular".to_string(),
                    description: "Get booped 10 times".to_string(),
                    icon: "⭐".to_string(),
                    unlocks_paw: Some(PawStyle::Heart),
                    threshold: Some(10),
                    earned_at: None,
                }],
            })),
        ];
        for event in &events {
            dispatcher.dispatch(&mut app, event);
        }
        assert_eq!(app.session_user(), Some(1));

        dispatcher.dispatch(&mut app, &RealtimeEvent::Disconnect { reason: None });

        assert_eq!(
            view.entries(),
            vec![
                "status Connected",
                "paw ghost",
                "notify Two booped you! Some(\"#FF69B4\")",
                "total 50",
                "badge Booper",
                "total 51",
                "badge Popular",
                "status Disconnected",
            ]
        );
        assert_eq!(app.global_total(), Some(51));
        assert_eq!(app.session_user(), None);
        assert!(!app.is_connected());
    }
}
