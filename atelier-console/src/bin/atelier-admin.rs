use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use atelier_console::config::{CliOverrides, ConfigLoader, ConfigLoaderOptions};
use atelier_console::pages::{
    AwardsPage, CampaignsPage, ContestsPage, ExaminersPage, ExhibitionsPage,
    PostsPage, RoundsPage, SubmissionsPage, UsersPage,
};
use atelier_console::render::{
    TableRow, render_counts, render_list, render_page,
};
use atelier_console::{ApiClient, ConsoleConfig, Services, demo};
use atelier_core::context::{Language, LocaleSettings, Session};
use atelier_core::stats::tally;
use atelier_core::validation::ImageUpload;
use atelier_core::{
    CategoryFilter, ListViewController, Listable, LoadState, StatusAction,
    StatusFilter, StatusWorkflow,
};
use atelier_model::{
    AwardId, CampaignId, ContestId, CreateCampaignRequest, NewAward, RoundId,
    UploadPaintingRequest, UserId,
};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "atelier-admin",
    about = "Administer the Atelier art-contest platform",
    version
)]
struct Cli {
    /// Path to config.toml (defaults to <config dir>/atelier/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// API base URL, e.g. https://api.example.com
    #[arg(long, global = true)]
    server: Option<String>,
    /// Bearer token for the API
    #[arg(long, global = true)]
    token: Option<String>,
    /// Label language: en or vi
    #[arg(long, global = true)]
    lang: Option<Language>,
    /// Rows per page (1-100)
    #[arg(long, global = true)]
    page_size: Option<u32>,
    /// Run against built-in sample data instead of a server
    #[arg(long, global = true)]
    demo: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the signed-in staff member
    Whoami,
    /// Platform accounts
    Users {
        #[command(subcommand)]
        action: UserCommand,
    },
    /// Contests
    Contests {
        #[command(subcommand)]
        action: RowCommand,
    },
    /// Rounds of one contest
    Rounds {
        contest: ContestId,
        #[command(subcommand)]
        action: RowCommand,
    },
    /// Painting submissions
    Submissions {
        #[command(subcommand)]
        action: SubmissionCommand,
    },
    /// Awards of one contest
    Awards {
        contest: ContestId,
        #[command(subcommand)]
        action: AwardCommand,
    },
    /// Sponsorship campaigns
    Campaigns {
        #[command(subcommand)]
        action: CampaignCommand,
    },
    /// Exhibitions
    Exhibitions {
        #[command(subcommand)]
        action: DeletableCommand,
    },
    /// Blog posts
    Posts {
        #[command(subcommand)]
        action: DeletableCommand,
    },
    /// Examiners
    Examiners {
        #[command(subcommand)]
        action: RowCommand,
    },
}

/// Filters applied before a list is shown or a row is looked up.
#[derive(Args)]
struct ListArgs {
    /// Case-insensitive text search
    #[arg(long, default_value = "")]
    search: String,
    /// Status to show, or "all"
    #[arg(long, default_value = "all")]
    status: String,
    /// Category to show, or "all"
    #[arg(long, default_value = "all")]
    category: String,
    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Print per-status counts for the shown rows
    #[arg(long)]
    stats: bool,
}

#[derive(Args)]
struct ActionArgs {
    /// Row id
    id: String,
    /// Status action, e.g. publish, suspend, close
    action: StatusAction,
    #[command(flatten)]
    list: ListArgs,
}

#[derive(Subcommand)]
enum RowCommand {
    /// List rows
    List(ListArgs),
    /// Run a status action on a row
    Action(ActionArgs),
}

#[derive(Subcommand)]
enum DeletableCommand {
    /// List rows
    List(ListArgs),
    /// Run a status action on a row
    Action(ActionArgs),
    /// Delete a row
    Delete {
        id: String,
        #[command(flatten)]
        list: ListArgs,
    },
}

#[derive(Subcommand)]
enum UserCommand {
    /// List accounts
    List(ListArgs),
    /// Run a status action on an account
    Action(ActionArgs),
    /// Suspend an active account or reactivate it
    Toggle {
        id: UserId,
        #[command(flatten)]
        list: ListArgs,
    },
}

#[derive(Subcommand)]
enum SubmissionCommand {
    /// List submissions
    List(ListArgs),
    /// Accept a pending submission
    Accept {
        id: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Reject a pending submission
    Reject {
        id: String,
        /// Why the painting was rejected (5-500 characters)
        #[arg(long)]
        reason: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Upload a painting on behalf of a competitor
    Upload {
        /// Image file
        file: PathBuf,
        #[arg(long)]
        contest: ContestId,
        #[arg(long)]
        competitor: UserId,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        round: Option<RoundId>,
        /// Use the second-round upload endpoint
        #[arg(long)]
        round2: bool,
    },
}

#[derive(Subcommand)]
enum AwardCommand {
    /// List awards by rank
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Create awards in one batch
    Create {
        /// NAME:RANK:QUANTITY:PRIZE, repeatable
        #[arg(long = "award", required = true, value_parser = parse_award)]
        awards: Vec<NewAward>,
    },
    /// Delete an award
    Delete { id: AwardId },
}

#[derive(Subcommand)]
enum CampaignCommand {
    /// List campaigns
    List(ListArgs),
    /// Run a status action on a campaign
    Action(ActionArgs),
    /// Create a draft campaign
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        goal: f64,
        /// RFC 3339, e.g. 2025-06-01T00:00:00Z
        #[arg(long)]
        start: DateTime<Utc>,
        #[arg(long)]
        end: DateTime<Utc>,
    },
    /// List a campaign's sponsors
    Sponsors {
        id: CampaignId,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
}

fn parse_award(raw: &str) -> Result<NewAward, String> {
    let parts: Vec<&str> = raw.split(':').collect();
    let [name, rank, quantity, prize] = parts.as_slice() else {
        return Err(format!("expected NAME:RANK:QUANTITY:PRIZE, got '{raw}'"));
    };
    Ok(NewAward {
        name: name.trim().to_string(),
        rank: rank.trim().parse().map_err(|_| format!("bad rank '{rank}'"))?,
        quantity: quantity
            .trim()
            .parse()
            .map_err(|_| format!("bad quantity '{quantity}'"))?,
        prize: prize.trim().parse().map_err(|_| format!("bad prize '{prize}'"))?,
    })
}

fn parse_status<S: StatusWorkflow>(raw: &str) -> Result<StatusFilter<S>> {
    let wanted = raw.trim();
    if wanted.is_empty() || wanted.eq_ignore_ascii_case("all") {
        return Ok(StatusFilter::All);
    }
    S::variants()
        .iter()
        .copied()
        .find(|status| status.to_string().eq_ignore_ascii_case(wanted))
        .map(StatusFilter::Only)
        .ok_or_else(|| {
            let known: Vec<String> =
                S::variants().iter().map(ToString::to_string).collect();
            anyhow!(
                "unknown {} status '{wanted}' (expected one of: all, {})",
                S::ENTITY,
                known.join(", ")
            )
        })
}

fn parse_id<I>(raw: &str) -> Result<I>
where
    I: FromStr,
    I::Err: Display,
{
    raw.parse().map_err(|err| anyhow!("{err}"))
}

/// Apply the filters and load the requested page.
async fn load<T: Listable>(
    list: &mut ListViewController<T>,
    args: &ListArgs,
) -> Result<()> {
    list.set_search(args.search.clone());
    list.set_status_filter(parse_status(&args.status)?);
    list.set_category(CategoryFilter::parse(&args.category));
    list.refresh().await?;
    if args.page > 1 {
        list.set_page(args.page);
        list.ensure_fresh().await?;
    }
    Ok(())
}

fn show<T: Listable + TableRow>(
    list: &ListViewController<T>,
    args: &ListArgs,
    locale: &LocaleSettings,
) {
    let view = list.view();
    print!("{}", render_list(&view, locale, list.notice()));
    if args.stats {
        let counts = tally(view.rows.iter().map(|row| row.item.status()));
        println!("{}", render_counts(&counts, locale));
    }
}

async fn list_rows<T: Listable + TableRow>(
    list: &mut ListViewController<T>,
    args: &ListArgs,
    locale: &LocaleSettings,
) -> Result<()> {
    let loaded = load(list, args).await;
    if !matches!(list.state(), LoadState::Idle) {
        show(list, args, locale);
    }
    loaded
}

async fn run_action<T>(
    list: &mut ListViewController<T>,
    args: &ActionArgs,
    locale: &LocaleSettings,
) -> Result<()>
where
    T: Listable + TableRow,
    T::Id: FromStr,
    <T::Id as FromStr>::Err: Display,
{
    let id = parse_id::<T::Id>(&args.id)?;
    load(list, &args.list).await?;
    let outcome = list.run_action(id, args.action).await;
    show(list, &args.list, locale);
    outcome?;
    Ok(())
}

async fn rows<T>(
    list: &mut ListViewController<T>,
    command: RowCommand,
    locale: &LocaleSettings,
) -> Result<()>
where
    T: Listable + TableRow,
    T::Id: FromStr,
    <T::Id as FromStr>::Err: Display,
{
    match command {
        RowCommand::List(args) => list_rows(list, &args, locale).await,
        RowCommand::Action(args) => run_action(list, &args, locale).await,
    }
}

async fn run(cli: Cli, config: ConsoleConfig) -> Result<()> {
    let locale = LocaleSettings::new(config.language);
    let page_size = config.page_size;

    let (services, session) = if cli.demo {
        info!("running against demo data");
        (
            Services::in_memory(demo::seeded_backend()),
            Session::new("demo"),
        )
    } else {
        let client = ApiClient::new(&config.server_url, config.request_timeout)?;
        client.set_token(config.token.clone()).await;
        let mut session = Session::new(client.base_url());
        if let Some(token) = &config.token {
            session = session.with_token(token.clone());
        }
        (Services::from_client(Arc::new(client)), session)
    };

    match cli.command {
        Command::Whoami => {
            let user = services.auth.current_user().await?;
            let session = session.with_user(user);
            println!("{} ({})", session.display_user(), session.base_url);
        }
        Command::Users { action } => {
            let mut page = UsersPage::new(&services, page_size);
            match action {
                UserCommand::List(args) => {
                    list_rows(page.list_mut(), &args, &locale).await?
                }
                UserCommand::Action(args) => {
                    run_action(page.list_mut(), &args, &locale).await?
                }
                UserCommand::Toggle { id, list } => {
                    load(page.list_mut(), &list).await?;
                    let outcome = page.toggle(id).await;
                    show(page.list(), &list, &locale);
                    outcome?;
                }
            }
        }
        Command::Contests { action } => {
            let mut page = ContestsPage::new(&services, page_size);
            rows(page.list_mut(), action, &locale).await?;
        }
        Command::Rounds { contest, action } => {
            let mut page = RoundsPage::new(&services, contest, page_size);
            rows(page.list_mut(), action, &locale).await?;
        }
        Command::Submissions { action } => {
            let mut page = SubmissionsPage::new(&services, page_size);
            match action {
                SubmissionCommand::List(args) => {
                    list_rows(page.list_mut(), &args, &locale).await?
                }
                SubmissionCommand::Accept { id, list } => {
                    let id = parse_id(&id)?;
                    load(page.list_mut(), &list).await?;
                    let outcome = page.accept(id).await;
                    show(page.list(), &list, &locale);
                    outcome?;
                }
                SubmissionCommand::Reject { id, reason, list } => {
                    let id = parse_id(&id)?;
                    load(page.list_mut(), &list).await?;
                    let outcome = page.reject(id, &reason).await;
                    show(page.list(), &list, &locale);
                    outcome?;
                }
                SubmissionCommand::Upload {
                    file,
                    contest,
                    competitor,
                    title,
                    description,
                    round,
                    round2,
                } => {
                    let bytes = std::fs::read(&file).with_context(|| {
                        format!("failed to read {}", file.display())
                    })?;
                    let file_name = file
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_else(|| "painting".to_string());
                    let request = UploadPaintingRequest {
                        contest_id: contest,
                        competitor_id: competitor,
                        round_id: round,
                        title,
                        description,
                    };
                    let submission = page
                        .upload(request, ImageUpload::new(file_name, bytes), round2)
                        .await?;
                    println!("uploaded {} ({})", submission.title, submission.id);
                }
            }
        }
        Command::Awards { contest, action } => {
            let mut page = AwardsPage::new(&services, contest, page_size);
            match action {
                AwardCommand::List { page: number } => {
                    page.refresh().await?;
                    page.set_page(number);
                    print!("{}", render_page(&page.view(), &locale));
                }
                AwardCommand::Create { awards } => {
                    page.refresh().await?;
                    let created = page.create(awards).await?;
                    println!("created {} awards", created.len());
                    print!("{}", render_page(&page.view(), &locale));
                }
                AwardCommand::Delete { id } => {
                    page.refresh().await?;
                    page.delete(id).await?;
                    print!("{}", render_page(&page.view(), &locale));
                }
            }
        }
        Command::Campaigns { action } => {
            let mut page = CampaignsPage::new(&services, page_size);
            match action {
                CampaignCommand::List(args) => {
                    list_rows(page.list_mut(), &args, &locale).await?
                }
                CampaignCommand::Action(args) => {
                    run_action(page.list_mut(), &args, &locale).await?
                }
                CampaignCommand::Create {
                    title,
                    description,
                    goal,
                    start,
                    end,
                } => {
                    let request = CreateCampaignRequest {
                        title,
                        description,
                        goal_amount: goal,
                        start_date: start,
                        end_date: end,
                    };
                    let campaign = page.create(request).await?;
                    println!("created {} ({})", campaign.title, campaign.id);
                }
                CampaignCommand::Sponsors { id, page: number } => {
                    let sponsors = page.sponsors(id, number, page_size).await?;
                    for sponsor in &sponsors.data {
                        println!("{}  {:.0}", sponsor.name, sponsor.amount);
                    }
                    println!(
                        "{}",
                        locale.page_label(sponsors.meta.page, sponsors.meta.total_pages)
                    );
                }
            }
        }
        Command::Exhibitions { action } => {
            let mut page = ExhibitionsPage::new(&services, page_size);
            match action {
                DeletableCommand::List(args) => {
                    list_rows(page.list_mut(), &args, &locale).await?
                }
                DeletableCommand::Action(args) => {
                    run_action(page.list_mut(), &args, &locale).await?
                }
                DeletableCommand::Delete { id, list } => {
                    let id = parse_id(&id)?;
                    load(page.list_mut(), &list).await?;
                    let outcome = page.delete(id).await;
                    show(page.list(), &list, &locale);
                    outcome?;
                }
            }
        }
        Command::Posts { action } => {
            let mut page = PostsPage::new(&services, page_size);
            match action {
                DeletableCommand::List(args) => {
                    list_rows(page.list_mut(), &args, &locale).await?
                }
                DeletableCommand::Action(args) => {
                    run_action(page.list_mut(), &args, &locale).await?
                }
                DeletableCommand::Delete { id, list } => {
                    let id = parse_id(&id)?;
                    load(page.list_mut(), &list).await?;
                    let outcome = page.delete(id).await;
                    show(page.list(), &list, &locale);
                    outcome?;
                }
            }
        }
        Command::Examiners { action } => {
            let mut page = ExaminersPage::new(&services, page_size);
            rows(page.list_mut(), action, &locale).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let overrides = CliOverrides {
        server_url: cli.server.clone(),
        token: cli.token.clone(),
        language: cli.lang,
        page_size: cli.page_size,
    };
    let loader = ConfigLoader::with_options(ConfigLoaderOptions {
        config_path: cli.config.clone(),
        env_file: None,
    });
    let config = loader
        .load(&overrides)
        .context("failed to load configuration")?;

    run(cli, config).await
}
