//! Command-line entry point: drives the client views against the placeholder
//! API with headless browser capabilities.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Context, Result, bail, eyre};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use social_feed::ClientSettings;
use social_feed::domain::ports::{
    ElementFocus, LoginError, LoginService, MapSurface, PlaceholderSource,
};
use social_feed::domain::{
    AddressView, Coordinate, DashboardService, FeedView, LngLat, LoginCredentials, MAP_ELEMENT_ID,
    PlaceholderLoginService, PostId, RegistrationError, RegistrationInput, RegistrationSchema,
    RegistrationView, Route, RouteDecision, Session, SessionStatus, TextField, find_user, guard,
    login_failure_errors,
};
use social_feed::outbound::headless::{HeadlessMapSurface, RecordingFocus};
use social_feed::outbound::phone::LibphonenumberValidator;
use social_feed::outbound::placeholder::PlaceholderHttpSource;

#[derive(Debug, Parser)]
#[command(name = "social-feed", version, about = "Social feed client views")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct CredentialArgs {
    /// Account email.
    #[arg(long)]
    email: String,
    /// Account password; placeholder users sign in with their username.
    #[arg(long)]
    password: String,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and print the session.
    Login(CredentialArgs),
    /// List the posts visible to the session.
    Feed {
        #[command(flatten)]
        credentials: CredentialArgs,
        /// Post whose comments to show.
        #[arg(long)]
        open: Option<u64>,
    },
    /// Print the admin dashboard series.
    Dashboard(CredentialArgs),
    /// Show a user's address and the map calls it issues.
    Address {
        #[command(flatten)]
        credentials: CredentialArgs,
        /// Display name of the user.
        #[arg(long)]
        account_name: String,
    },
    /// Validate a registration candidate read from a JSON file.
    Register {
        /// Path to the candidate JSON.
        #[arg(long)]
        input: PathBuf,
        /// Map click as `lng,lat`; repeat to click several times.
        #[arg(long = "click", value_parser = parse_click)]
        clicks: Vec<LngLat>,
    },
}

fn parse_click(raw: &str) -> Result<LngLat, String> {
    let (lng, lat) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected lng,lat but got {raw:?}"))?;
    let parse = |value: &str| {
        value
            .trim()
            .parse::<f64>()
            .map_err(|error| format!("{value:?} is not a number: {error}"))
    };
    Ok(LngLat::new(parse(lng)?, parse(lat)?))
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build client runtime")?;
    runtime.block_on(run(cli))
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Register { input, clicks } => register(&input, clicks),
        Command::Login(credentials) => {
            let session = sign_in(&source()?, &credentials).await?;
            println!("{}", serde_json::to_string_pretty(&session)?);
            Ok(())
        }
        Command::Feed { credentials, open } => {
            let source = source()?;
            let session = sign_in(&source, &credentials).await?;
            enter(&Route::Home, &session)?;
            show_feed(source, &session, open.map(PostId::new)).await
        }
        Command::Dashboard(credentials) => {
            let source = source()?;
            let session = sign_in(&source, &credentials).await?;
            enter(&Route::Dashboard, &session)?;
            let summary = DashboardService::new(source).summarize(&session).await?;
            println!("{}", serde_json::to_string_pretty(&summary.series())?);
            Ok(())
        }
        Command::Address {
            credentials,
            account_name,
        } => {
            let source = source()?;
            let session = sign_in(&source, &credentials).await?;
            enter(
                &Route::Address {
                    account_name: account_name.clone(),
                },
                &session,
            )?;
            show_address(source.as_ref(), &account_name).await
        }
    }
}

fn source() -> Result<Arc<dyn PlaceholderSource>> {
    let settings = ClientSettings::load_from_iter([OsString::from("social-feed")])
        .wrap_err("failed to load client settings")?;
    let source = PlaceholderHttpSource::new(settings.api_base_url()?, settings.request_timeout())
        .wrap_err("failed to build placeholder client")?;
    Ok(Arc::new(source))
}

async fn sign_in(
    source: &Arc<dyn PlaceholderSource>,
    credentials: &CredentialArgs,
) -> Result<Session> {
    let credentials =
        match LoginCredentials::try_from_parts(&credentials.email, &credentials.password) {
            Ok(credentials) => credentials,
            Err(errors) => {
                for (field, message) in errors.iter() {
                    println!("{field:?}: {message}");
                }
                bail!("login form is invalid");
            }
        };

    let service = PlaceholderLoginService::new(Arc::clone(source));
    match service.authenticate(&credentials).await {
        Ok(session) => Ok(session),
        Err(LoginError::InvalidCredentials) => {
            for (field, message) in login_failure_errors().iter() {
                println!("{field:?}: {message}");
            }
            bail!("sign-in rejected")
        }
        Err(error) => Err(eyre!(error).wrap_err("sign-in failed")),
    }
}

fn enter(route: &Route, session: &Session) -> Result<()> {
    match guard(route, &SessionStatus::Authenticated(session.clone())) {
        RouteDecision::Render => Ok(()),
        RouteDecision::Redirect(target) => bail!("{route} redirects to {target}"),
        RouteDecision::Loading => bail!("session is still loading"),
    }
}

async fn show_feed(
    source: Arc<dyn PlaceholderSource>,
    session: &Session,
    open: Option<PostId>,
) -> Result<()> {
    let mut feed = FeedView::load(source, session).await?;
    for entry in feed.entries() {
        let post = &entry.post;
        println!("#{} {} by {}", post.id, post.title, entry.author);
    }
    if let Some(post) = open {
        for comment in feed.open_post(post).await? {
            println!("  {} <{}>: {}", comment.name, comment.email, comment.body);
        }
    }
    Ok(())
}

async fn show_address(source: &dyn PlaceholderSource, account_name: &str) -> Result<()> {
    let users = source.users().await?;
    let user = find_user(&users, account_name)?.clone();
    let surface = Rc::new(HeadlessMapSurface::new());
    let view = AddressView::mount(user, Rc::clone(&surface) as Rc<dyn MapSurface>)?;
    view.on_marker_click()?;

    let user = view.user();
    println!("{} ({}) <{}>", user.name, user.username, user.email);
    println!(
        "{}, {}, {} {}",
        user.address.street, user.address.suite, user.address.city, user.address.zipcode
    );
    drop(view);
    for call in surface.calls() {
        println!("{call:?}");
    }
    Ok(())
}

fn register(path: &Path, clicks: Vec<LngLat>) -> Result<()> {
    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let input: RegistrationInput = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let schema = RegistrationSchema::new(Arc::new(LibphonenumberValidator));
    let surface = Rc::new(HeadlessMapSurface::new());
    let focus = Rc::new(RecordingFocus::new([MAP_ELEMENT_ID]));
    let mut view =
        RegistrationView::mount(schema, surface, Rc::clone(&focus) as Rc<dyn ElementFocus>)?;

    view.set_text(TextField::FirstName, input.first_name);
    view.set_text(TextField::LastName, input.last_name);
    view.set_text(TextField::Email, input.email);
    view.set_text(TextField::Phone, input.phone);
    view.set_text(TextField::Password, input.password);

    let prefilled = (!input.coordinate.is_sentinel())
        .then(|| LngLat::new(input.coordinate.longitude, input.coordinate.latitude));
    for click in prefilled.into_iter().chain(clicks) {
        let Coordinate {
            latitude,
            longitude,
        } = view.on_map_click(click)?;
        println!("pinned lat={latitude} lng={longitude}");
    }

    match view.submit() {
        Ok(accepted) => {
            println!(
                "accepted {} {} <{}> at lat={} lng={}",
                accepted.first_name,
                accepted.last_name,
                accepted.email,
                accepted.coordinate.latitude,
                accepted.coordinate.longitude
            );
            Ok(())
        }
        Err(RegistrationError::CoordinateUnset) => {
            println!("focused: {}", focus.focused().join(", "));
            bail!("no location selected on the map")
        }
        Err(error @ RegistrationError::FieldValidation { .. }) => {
            for (field, message) in view.form().errors().iter() {
                println!("{field}: {message}");
            }
            Err(eyre!(error))
        }
        Err(error) => Err(eyre!(error).wrap_err("registration failed")),
    }
}
