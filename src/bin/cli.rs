//! Booping CLI
//!
//! One-shot commands against a boop server:
//! - List users, favorites and boop buddies
//! - Star and unstar users
//! - Send boops and check stats
//! - Catch up on boops received while away

use anyhow::{bail, Context};
use booping::api::{BoopApi, BoopClient, ProfileUpdate};
use booping::app::view::{
    badge_unlock_lines, format_number, new_boop_line, new_boops_heading, sanitize, stats_line,
};
use booping::config::{generate_default_config, Config};
use booping::directory::{Activity, FavoriteSet, UserCard, UserSections};
use booping::logging::init_logging;
use booping::notifications::NewBoopsSummary;
use booping::{PawStyle, User, UserId};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "booping-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Boop people from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Boop server URL (overrides config)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List everyone, split into favorites, boop buddies and the rest
    Users,

    /// List your favorites
    Favorites,

    /// List boop buddies (people who booped you back)
    Mutuals,

    /// Star a user, or unstar them if already starred
    Favorite {
        /// User ID
        id: UserId,
    },

    /// Show your stats and the global counter
    Stats,

    /// Show boops received since your last visit
    NewBoops {
        /// Mark them as seen afterwards
        #[arg(long)]
        mark_seen: bool,
    },

    /// Show the latest boops you received
    Received,

    /// Boop a user
    Boop {
        /// User ID
        id: UserId,
        /// Paw style (must be unlocked)
        #[arg(short, long)]
        paw: Option<PawStyle>,
    },

    /// List your badges
    Badges,

    /// List paw styles and which ones are unlocked
    Paws,

    /// Show your profile, or update it when any option is given
    Profile {
        #[arg(long)]
        display_name: Option<String>,
        #[arg(long)]
        tagline: Option<String>,
        /// Colour as #RRGGBB
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        paw: Option<PawStyle>,
    },

    /// Create an account
    Register {
        username: String,
        display_name: String,
        #[arg(long)]
        password: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let config = generate_default_config();

        match output {
            Some(path) => {
                // Create parent directory if needed
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, &config)?;
                println!("Config written to {:?}", path);
            }
            None => {
                print!("{}", config);
            }
        }
        return Ok(());
    }

    let mut config = Config::load_default(cli.config.as_deref())?;
    if let Some(server) = &cli.server {
        config.server.base_url = server.clone();
    }
    init_logging(&config.logging)?;

    let client = BoopClient::new(&config.server.base_url, config.server.request_timeout())?;
    let json = cli.format == "json";

    if let Commands::Register {
        username,
        display_name,
        password,
    } = &cli.command
    {
        let user = client.register(username, password, display_name).await?;
        println!("Welcome, {}! Your user ID is {}", user.display_name, user.id);
        return Ok(());
    }

    let (username, password) = config
        .server
        .credentials()
        .context("No login configured: set server.username and server.password, or BOOPING_USERNAME and BOOPING_PASSWORD")?;
    let me = client
        .login(username, password)
        .await
        .with_context(|| format!("Cannot log in to {}", config.server.base_url))?;

    match cli.command {
        Commands::Users => {
            let mut favorite_ids = FavoriteSet::new();
            favorite_ids.replace_all(client.favorite_ids().await?);
            let (all, favorites, mutuals) =
                tokio::try_join!(client.users(), client.favorites(), client.mutuals())?;
            let sections = UserSections::build(all, favorites, mutuals, &favorite_ids);

            if json {
                let cards = |cards: &[UserCard]| {
                    cards
                        .iter()
                        .map(|c| serde_json::json!({"user": c.user, "favorited": c.favorited}))
                        .collect::<Vec<_>>()
                };
                let value = serde_json::json!({
                    "favorites": cards(&sections.favorites),
                    "mutuals": cards(&sections.mutuals),
                    "everyone": cards(&sections.everyone),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                print_section("Favorites", &sections.favorites);
                print_section("Boop buddies", &sections.mutuals);
                match sections.everyone_placeholder() {
                    Some(message) => println!("{}", message),
                    None => print_section("Everyone", &sections.everyone),
                }
            }
        }

        Commands::Favorites => {
            let users = client.favorites().await?;
            print_users(
                &users,
                json,
                "No favorites yet. Star someone with: booping-cli favorite <id>",
            )?;
        }

        Commands::Mutuals => {
            let users = client.mutuals().await?;
            print_users(&users, json, "No boop buddies yet. Boop someone who booped you!")?;
        }

        Commands::Favorite { id } => {
            let favorite_ids: FavoriteSet = client.favorite_ids().await?.into_iter().collect();
            if favorite_ids.contains(id) {
                client.remove_favorite(id).await?;
                println!("Removed #{} from favorites", id);
            } else {
                client.add_favorite(id).await?;
                println!("Added #{} to favorites", id);
            }
        }

        Commands::Stats => {
            let (mine, global) = tokio::try_join!(client.my_stats(), client.global_stats())?;

            if json {
                let value = serde_json::json!({"me": mine, "global": global});
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("You:         {}", stats_line(mine));
                println!("Total boops: {}", format_number(global.total_boops));
                println!("Boopers:     {}", format_number(global.total_users));
            }
        }

        Commands::NewBoops { mark_seen } => {
            let boops = client.new_boops().await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&boops)?);
            } else {
                match NewBoopsSummary::from_batch(boops) {
                    Some(summary) => {
                        println!("{}", new_boops_heading(summary.total));
                        for sender in &summary.senders {
                            println!("  {}", new_boop_line(sender));
                        }
                    }
                    None => println!("No new boops."),
                }
            }

            if mark_seen {
                client.mark_boops_seen().await?;
                println!("Marked as seen.");
            }
        }

        Commands::Received => {
            let boops = client.received_boops().await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&boops)?);
            } else if boops.is_empty() {
                println!("Nobody has booped you yet.");
            } else {
                println!("{:<20} {:<6} {}", "When", "Paw", "From");
                println!("{}", "-".repeat(50));
                for boop in boops {
                    println!(
                        "{:<20} {:<6} {}",
                        boop.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                        boop.paw_style.unwrap_or_default().emoji(),
                        sanitize(&boop.sender_name)
                    );
                }
            }
        }

        Commands::Boop { id, paw } => {
            let receipt = client.send_boop(id, paw).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&receipt)?);
            } else {
                println!("{} Booped #{}!", sent_paw(paw, &me).emoji(), id);
                for badge in &receipt.new_badges {
                    println!();
                    println!("Badge unlocked!");
                    for line in badge_unlock_lines(badge) {
                        println!("  {}", line);
                    }
                }
            }
        }

        Commands::Badges => {
            let badges = client.my_badges().await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&badges)?);
            } else if badges.is_empty() {
                println!("No badges yet. Keep booping!");
            } else {
                println!("{:<4} {:<20} {}", "", "Badge", "Description");
                println!("{}", "-".repeat(60));
                for badge in badges {
                    println!(
                        "{:<4} {:<20} {}",
                        badge.icon,
                        sanitize(&badge.name),
                        sanitize(&badge.description)
                    );
                }
            }
        }

        Commands::Paws => {
            let paws = client.all_paws().await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&paws)?);
            } else {
                println!("{:<4} {:<12} {}", "", "Paw", "Status");
                println!("{}", "-".repeat(50));
                for paw in paws {
                    let status = if paw.unlocked {
                        "unlocked".to_string()
                    } else {
                        paw.unlock_hint.unwrap_or_else(|| "locked".to_string())
                    };
                    println!("{:<4} {:<12} {}", paw.name.emoji(), paw.name, status);
                }
            }
        }

        Commands::Profile {
            display_name,
            tagline,
            color,
            paw,
        } => {
            let update = ProfileUpdate {
                display_name,
                tagline,
                color_theme: color,
                paw_style: paw,
            };

            let user = if update.is_empty() {
                client.current_user().await?
            } else {
                if let Some(paw) = update.paw_style {
                    let unlocked = client.unlocked_paws().await?;
                    if !unlocked.contains(&paw) {
                        bail!("The {} paw is still locked", paw);
                    }
                }
                client.update_profile(&update).await?
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&user)?);
            } else {
                print_profile(&user);
            }
        }

        // Handled before login
        Commands::Register { .. } | Commands::Config { .. } => {}
    }

    Ok(())
}

/// The server falls back to the sender's profile paw when none is chosen
fn sent_paw(chosen: Option<PawStyle>, me: &User) -> PawStyle {
    chosen.unwrap_or(me.paw_style)
}

fn print_section(title: &str, cards: &[UserCard]) {
    if cards.is_empty() {
        return;
    }
    println!("{}", title);
    println!(
        "{:<2} {:<2} {:<6} {:<4} {:<24} {}",
        "", "", "ID", "Paw", "Name", "Tagline"
    );
    println!("{}", "-".repeat(70));
    let now = Utc::now();
    for card in cards {
        let star = if card.favorited { "★" } else { "☆" };
        print_user_row(star, &card.user, now);
    }
    println!();
}

fn print_users(users: &[User], json: bool, empty: &str) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(users)?);
        return Ok(());
    }
    if users.is_empty() {
        println!("{}", empty);
        return Ok(());
    }
    println!("{:<2} {:<6} {:<4} {:<24} {}", "", "ID", "Paw", "Name", "Tagline");
    println!("{}", "-".repeat(70));
    let now = Utc::now();
    for user in users {
        print_user_row("", user, now);
    }
    Ok(())
}

fn print_user_row(star: &str, user: &User, now: chrono::DateTime<Utc>) {
    let activity = Activity::classify(user.last_active, now);
    let prefix = if star.is_empty() {
        String::new()
    } else {
        format!("{:<2} ", star)
    };
    println!(
        "{}{:<2} {:<6} {:<4} {:<24} {}",
        prefix,
        activity.marker(),
        user.id,
        user.paw_style.emoji(),
        sanitize(&user.display_name),
        user.tagline.as_deref().map(sanitize).unwrap_or_default()
    );
}

fn print_profile(user: &User) {
    println!("{} {}", user.paw_style.emoji(), sanitize(&user.display_name));
    if let Some(username) = &user.username {
        println!("  Username: {}", username);
    }
    println!("  ID:       {}", user.id);
    if let Some(tagline) = &user.tagline {
        println!("  Tagline:  {}", sanitize(tagline));
    }
    if let Some(color) = &user.color_theme {
        println!("  Colour:   {}", color);
    }
    println!("  Paw:      {}", user.paw_style);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn me(paw_style: PawStyle) -> User {
        User {
            id: 1,
            username: Some("frog".to_string()),
            display_name: "Frog".to_string(),
            tagline: None,
            color_theme: None,
            paw_style,
            last_active: None,
        }
    }

    #[test]
    fn test_sent_paw_defaults_to_profile() {
        assert_eq!(sent_paw(None, &me(PawStyle::Ghost)), PawStyle::Ghost);
        assert_eq!(sent_paw(Some(PawStyle::Star), &me(PawStyle::Ghost)), PawStyle::Star);
    }
}
