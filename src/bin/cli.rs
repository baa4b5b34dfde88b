//! HBnB CLI
//!
//! Command-line front end for the HBnB API:
//! - Log in and print the session token
//! - Browse places, with the same price filter as the index page
//! - Read and post reviews
//! - Preview page HTML and the shadow animation

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hbnb::animation::{FrameDriver, Recorder, ShadowField};
use hbnb::client::{HbnbClient, PlacesApi};
use hbnb::config::{generate_default_config, Config, LoggingConfig};
use hbnb::controller::{NoticeKind, PageController, PageElements, Paint, PriceFilter};
use hbnb::render::{review_cards, to_html, Fragment, Node};
use hbnb::session::{CookieJar, SessionStore};

#[derive(Parser)]
#[command(name = "hbnb")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse and review HBnB places from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: platform config dir, then ./hbnb.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL, including the version prefix
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Session token from a previous login
    #[arg(long, env = "HBNB_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and print the access token
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// List places
    Places {
        /// Hide places above this price per night
        #[arg(short, long)]
        max_price: Option<String>,
    },

    /// Show one place with its reviews
    Place { id: String },

    /// List the reviews of a place
    Reviews { id: String },

    /// Post a review (requires a token)
    Review {
        /// Place id
        id: String,
        #[arg(short, long)]
        text: String,
        /// 1 to 5
        #[arg(short, long)]
        rating: u8,
    },

    /// Print the HTML the index page (or a place page) would render
    Preview {
        #[arg(long)]
        place: Option<String>,
    },

    /// Run the shadow animation headless and print a summary
    Shadows {
        /// Frames to simulate at 60 fps
        #[arg(short, long, default_value = "600")]
        frames: u32,
        #[arg(short, long, default_value = "1")]
        seed: u64,
        #[arg(long, default_value = "1280")]
        width: f64,
        #[arg(long, default_value = "720")]
        height: f64,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

type Controller = PageController<HbnbClient, CookieJar>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
        config.validate()?;
    }
    init_logging(&config.logging);

    let session = match cli.token.as_deref() {
        Some(token) => CookieJar::with_token(config.session.clone(), token),
        None => CookieJar::new(config.session.clone()),
    };

    match cli.command {
        Commands::Login { email, password } => {
            let ctl = controller(&config, session)?;
            ctl.load(PageElements::login(), None).await;
            let paints = ctl.login(&email, &password).await;
            report(&paints)?;

            let token = ctl
                .session()
                .token()
                .context("login returned no token")?;
            println!("{}", token);
        }

        Commands::Places { max_price } => {
            let ctl = controller(&config, session)?;
            let mut paints = ctl.load(PageElements::index(), None).await;
            if let Some(max) = max_price {
                let filter: PriceFilter = max.parse()?;
                paints.extend(ctl.set_price_filter(filter));
            }
            report(&paints)?;

            // The last Places paint reflects the final filter
            let cards = paints.iter().rev().find_map(|p| match p {
                Paint::Places(cards) => Some(cards),
                _ => None,
            });
            let visible: Vec<&Fragment> = cards
                .into_iter()
                .flatten()
                .filter(|c| c.is_visible())
                .collect();

            if visible.is_empty() {
                println!("No places found.");
            } else {
                println!("{:<38} {:<30} {}", "ID", "Title", "Price");
                println!("{}", "-".repeat(80));
                for card in visible {
                    println!(
                        "{:<38} {:<30} {}",
                        card.get_attr("data-id").unwrap_or("-"),
                        text_of(card, "place-name"),
                        card.get_attr("data-price").filter(|p| !p.is_empty()).unwrap_or("-"),
                    );
                }
            }
        }

        Commands::Place { id } => {
            let ctl = controller(&config, session)?;
            let paints = ctl.load(PageElements::place(), Some(&id)).await;
            report(&paints)?;

            for paint in &paints {
                match paint {
                    Paint::PlaceDetails(details) => {
                        println!("{}", text_of(details, "place-title"));
                        if let Some(info) = details.find_by_class("place-info") {
                            for node in info.nodes() {
                                if let Node::Element(line) = node {
                                    println!("{}", line.text_content());
                                }
                            }
                        }
                        println!();
                    }
                    Paint::Reviews(cards) => print_reviews(cards),
                    _ => {}
                }
            }
        }

        Commands::Reviews { id } => {
            let client = HbnbClient::new(&config.api)?;
            let token = session.token();
            let reviews = client
                .list_reviews(&id, token.as_deref())
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            print_reviews(&review_cards(&reviews));
        }

        Commands::Review { id, text, rating } => {
            if session.token().is_none() {
                bail!("Posting a review requires --token or HBNB_TOKEN");
            }
            let ctl = controller(&config, session)?;
            let elements = PageElements {
                reviews: true,
                error_region: true,
                ..PageElements::default()
            };
            ctl.load(elements, Some(&id)).await;

            let paints = ctl.submit_review(&text, rating).await;
            report(&paints)?;
            for paint in &paints {
                if let Paint::Reviews(cards) = paint {
                    print_reviews(cards);
                }
            }
        }

        Commands::Preview { place } => {
            let ctl = controller(&config, session)?;
            let paints = match place.as_deref() {
                Some(id) => ctl.load(PageElements::place(), Some(id)).await,
                None => ctl.load(PageElements::index(), None).await,
            };
            for paint in paints {
                match paint {
                    Paint::Places(cards) | Paint::Reviews(cards) => println!("{}", to_html(&cards)),
                    Paint::PlaceDetails(details) => println!("{}", details.to_html()),
                    Paint::Notice(notice) => eprintln!("{}", notice.text),
                    _ => {}
                }
            }
        }

        Commands::Shadows {
            frames,
            seed,
            width,
            height,
        } => {
            let field = ShadowField::new(config.animation.clone(), StdRng::seed_from_u64(seed));
            let mut driver = FrameDriver::new(field);
            let mut surface = Recorder::new(width, height);
            let dt = config.animation.nominal_dt;

            let mut peak = 0;
            let mut drawn = 0;
            for frame in 0..frames {
                driver.frame(f64::from(frame) * dt, &mut surface);
                drawn += surface.ellipses_since_clear().len();
                peak = peak.max(driver.field().len());
                surface.take_ops();
            }

            println!("Frames:        {}", driver.frames());
            println!("Field clock:   {:.2}s", driver.field().now());
            println!("Live shadows:  {}", driver.field().len());
            println!("Peak shadows:  {}", peak);
            println!("Ellipses drawn: {}", drawn);
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("hbnb={}", config.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn controller(config: &Config, session: CookieJar) -> anyhow::Result<Controller> {
    let client = HbnbClient::new(&config.api)?;
    Ok(PageController::new(client, session, config.ui.clone()))
}

/// Print notices; an error notice fails the command
fn report(paints: &[Paint]) -> anyhow::Result<()> {
    for paint in paints {
        match paint {
            Paint::Notice(notice) if notice.kind == NoticeKind::Error => bail!("{}", notice.text),
            Paint::Notice(notice) => eprintln!("{}", notice.text),
            Paint::Redirect(to) => tracing::debug!(to = %to, "redirect"),
            _ => {}
        }
    }
    Ok(())
}

fn text_of(fragment: &Fragment, class: &str) -> String {
    fragment
        .find_by_class(class)
        .map(|f| f.text_content())
        .unwrap_or_default()
}

fn print_reviews(cards: &[Fragment]) {
    for card in cards {
        if card.has_class("no-reviews") {
            println!("{}", card.text_content());
            continue;
        }
        println!("{}", text_of(card, "review-author"));
        println!("  {}", text_of(card, "review-rating"));
        println!("  {}", text_of(card, "review-text"));
    }
}
