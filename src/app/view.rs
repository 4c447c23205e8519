//! Terminal rendering
//!
//! `View` is everything the client state asks to be shown. The text helpers
//! are free functions so the CLI can reuse them.

use std::io::Write;

use chrono::Utc;

use crate::directory::{Activity, UserCard, UserSections};
use crate::model::{Badge, PawStyle, Timestamp, UserStats};
use crate::notifications::{NewBoopsSummary, SenderAggregate};

/// Border colour used when the sender has none
pub const DEFAULT_NOTIFICATION_COLOR: &str = "#ff00ff";

pub trait View: Send {
    fn render_sections(&mut self, sections: &UserSections, now: Timestamp);

    fn render_global_total(&mut self, total_boops: u64);

    fn render_my_stats(&mut self, stats: UserStats);

    fn render_new_boops(&mut self, summary: &NewBoopsSummary);

    /// A boop just landed; show the sender's paw
    fn incoming_paw(&mut self, paw: PawStyle);

    fn notify(&mut self, message: &str, color: Option<&str>);

    fn badge_unlocked(&mut self, badge: &Badge);

    /// Connection state and command feedback
    fn status(&mut self, message: &str);
}

/// 1234567 -> "1,234,567"
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Strip control characters so user-chosen names can't drive the terminal
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

pub fn stats_line(stats: UserStats) -> String {
    format!("{} sent / {} received", stats.boops_sent, stats.boops_received)
}

pub fn boop_notification(display_name: &str) -> String {
    format!("{} booped you!", sanitize(display_name))
}

pub fn user_card_line(card: &UserCard, now: Timestamp) -> String {
    let star = if card.favorited { "★" } else { "☆" };
    let activity = Activity::classify(card.user.last_active, now);
    let mut line = format!(
        "{} {} {:>5}  {} {}",
        star,
        activity.marker(),
        card.user.id,
        card.user.paw_style.emoji(),
        sanitize(&card.user.display_name)
    );
    if let Some(tagline) = card.user.tagline.as_deref().filter(|t| !t.is_empty()) {
        line.push_str(&format!("  \"{}\"", sanitize(tagline)));
    }
    line
}

pub fn new_boop_line(sender: &SenderAggregate) -> String {
    format!(
        "{} {}{}",
        sender.paw_style.unwrap_or_default().emoji(),
        sanitize(&sender.sender_name),
        sender.count_suffix()
    )
}

pub fn new_boops_heading(total: usize) -> String {
    if total == 1 {
        "You got 1 new boop while you were away!".to_string()
    } else {
        format!("You got {} new boops while you were away!", format_number(total as u64))
    }
}

/// Lines of a badge unlock announcement
pub fn badge_unlock_lines(badge: &Badge) -> Vec<String> {
    let mut lines = vec![
        format!("{} {}", badge.icon, sanitize(&badge.name)),
        sanitize(&badge.description),
    ];
    if let Some(paw) = badge.unlocks_paw {
        lines.push(format!("Unlocked: {} paw!", paw));
    }
    lines
}

/// Wrap `text` in a 24-bit ANSI colour taken from a `#RRGGBB` string
pub fn colorize(text: &str, hex: &str) -> String {
    match parse_hex_color(hex) {
        Some((r, g, b)) => format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, text),
        None => text.to_string(),
    }
}

fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Line-oriented view over any writer, stdout by default
pub struct TerminalView<W: Write + Send> {
    out: W,
    color: bool,
}

impl TerminalView<std::io::Stdout> {
    pub fn stdout(color: bool) -> Self {
        Self::new(std::io::stdout(), color)
    }
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            tracing::warn!(error = %e, "Failed to write to terminal");
        }
    }

    fn section(&mut self, title: &str, cards: &[UserCard], now: Timestamp) {
        if cards.is_empty() {
            return;
        }
        self.line(&format!("{} ({})", title, cards.len()));
        for card in cards {
            let text = user_card_line(card, now);
            self.line(&format!("  {}", text));
        }
    }
}

impl<W: Write + Send> View for TerminalView<W> {
    fn render_sections(&mut self, sections: &UserSections, now: Timestamp) {
        self.section("Favorites", &sections.favorites, now);
        self.section("Boop buddies", &sections.mutuals, now);
        self.line("Everyone");
        match sections.everyone_placeholder() {
            Some(message) => self.line(&format!("  {}", message)),
            None => {
                for card in &sections.everyone {
                    let text = user_card_line(card, now);
                    self.line(&format!("  {}", text));
                }
            }
        }
    }

    fn render_global_total(&mut self, total_boops: u64) {
        self.line(&format!("Total boops: {}", format_number(total_boops)));
    }

    fn render_my_stats(&mut self, stats: UserStats) {
        self.line(&format!("You: {}", stats_line(stats)));
    }

    fn render_new_boops(&mut self, summary: &NewBoopsSummary) {
        self.line(&new_boops_heading(summary.total));
        for sender in &summary.senders {
            let text = new_boop_line(sender);
            self.line(&format!("  {}", text));
        }
    }

    fn incoming_paw(&mut self, paw: PawStyle) {
        self.line(paw.emoji());
    }

    fn notify(&mut self, message: &str, color: Option<&str>) {
        let text = if self.color {
            colorize(message, color.unwrap_or(DEFAULT_NOTIFICATION_COLOR))
        } else {
            message.to_string()
        };
        self.line(&text);
    }

    fn badge_unlocked(&mut self, badge: &Badge) {
        self.line("Badge unlocked!");
        for text in badge_unlock_lines(badge) {
            self.line(&format!("  {}", text));
        }
    }

    fn status(&mut self, message: &str) {
        self.line(&format!("[{}] {}", Utc::now().format("%H:%M:%S"), message));
    }
}
