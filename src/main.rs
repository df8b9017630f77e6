use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use postdesk::app::App;
use postdesk::config::{PlatformConfig, Timeouts};
use postdesk::pages::PageError;
use postdesk::platform::PlatformError;
use postdesk::platform::appwrite::AppwriteClient;
use postdesk::platform::types::FileUpload;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("unknown command `{0}`; try `help`")]
    Unknown(String),
    #[error("cannot read {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Page(#[from] PageError),
    #[error("client setup failed: {0}")]
    Platform(#[from] PlatformError),
    #[error("stdin: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "postdesk", about = "Terminal blog client for an Appwrite-compatible backend")]
struct Cli {
    #[arg(long, env = "APPWRITE_URL")]
    endpoint: String,

    #[arg(long, env = "APPWRITE_PROJECT_ID")]
    project: String,

    #[arg(long, env = "APPWRITE_DATABASE_ID")]
    database: String,

    #[arg(long, env = "APPWRITE_COLLECTION_ID")]
    collection: String,

    #[arg(long, env = "APPWRITE_BUCKET_ID")]
    bucket: String,

    /// Path to open once the session is resolved.
    #[arg(long, default_value = "/")]
    start: String,
}

impl Cli {
    fn platform_config(&self) -> PlatformConfig {
        let mut config =
            PlatformConfig::new(&self.endpoint, &self.project, &self.database, &self.collection, &self.bucket);
        config.timeouts = Timeouts::from_env();
        config
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Go(String),
    Login { email: String, password: String },
    Signup { email: String, password: String, name: String },
    Logout,
    New { title: String, image: PathBuf, content: String },
    Edit { slug: String, title: String, image: Option<PathBuf>, content: String },
    Delete,
    Whoami,
    Help,
    Quit,
}

const HELP: &str = "\
commands:
  go <path>                                   open a page (/, /all-posts, /post/<slug>, ...)
  login <email> <password>
  signup <email> <password> <name...>
  logout
  new <title> | <image-path> | <content>      publish a post
  edit <slug> <title> | [image-path] | <content>
  delete                                      delete the open post
  whoami
  help
  quit";

/// Split `a | b | c` into exactly three trimmed fields.
fn three_fields(rest: &str) -> Option<(String, String, String)> {
    let mut parts = rest.splitn(3, '|').map(|p| p.trim().to_string());
    Some((parts.next()?, parts.next()?, parts.next()?))
}

fn parse_command(line: &str) -> Result<Option<Command>, CliError> {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let command = match verb {
        "" => return Ok(None),
        "go" if !rest.is_empty() => Command::Go(rest.to_string()),
        "go" => return Err(CliError::Usage("go <path>")),
        "login" => match rest.split_whitespace().collect::<Vec<_>>().as_slice() {
            [email, password] => Command::Login { email: (*email).into(), password: (*password).into() },
            _ => return Err(CliError::Usage("login <email> <password>")),
        },
        "signup" => {
            let mut words = rest.split_whitespace();
            match (words.next(), words.next()) {
                (Some(email), Some(password)) => {
                    let name = words.collect::<Vec<_>>().join(" ");
                    if name.is_empty() {
                        return Err(CliError::Usage("signup <email> <password> <name...>"));
                    }
                    Command::Signup { email: email.into(), password: password.into(), name }
                }
                _ => return Err(CliError::Usage("signup <email> <password> <name...>")),
            }
        }
        "logout" => Command::Logout,
        "new" => match three_fields(rest) {
            Some((title, image, content)) if !image.is_empty() => {
                Command::New { title, image: PathBuf::from(image), content }
            }
            _ => return Err(CliError::Usage("new <title> | <image-path> | <content>")),
        },
        "edit" => {
            let (slug, fields) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            match three_fields(fields) {
                Some((title, image, content)) if !slug.is_empty() => Command::Edit {
                    slug: slug.to_string(),
                    title,
                    image: (!image.is_empty()).then(|| PathBuf::from(image)),
                    content,
                },
                _ => return Err(CliError::Usage("edit <slug> <title> | [image-path] | <content>")),
            }
        }
        "delete" => Command::Delete,
        "whoami" => Command::Whoami,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CliError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

async fn read_image(path: PathBuf) -> Result<FileUpload, CliError> {
    FileUpload::from_path(&path)
        .await
        .map_err(|source| CliError::Image { path, source })
}

/// Run one command. Returns `false` when the session should end.
async fn execute(app: &mut App, command: Command) -> Result<bool, CliError> {
    match command {
        Command::Go(path) => {
            app.navigate(&path).await;
        }
        Command::Login { email, password } => app.login(&email, &password).await?,
        Command::Signup { email, password, name } => app.signup(&email, &password, &name).await?,
        Command::Logout => app.logout().await,
        Command::New { title, image, content } => {
            let upload = read_image(image).await?;
            app.navigate("/add-post").await;
            app.submit_post(move |form| {
                form.set_title(title);
                form.set_content(content);
                form.set_image(upload);
            })
            .await?;
        }
        Command::Edit { slug, title, image, content } => {
            let upload = match image {
                Some(path) => Some(read_image(path).await?),
                None => None,
            };
            app.navigate(&format!("/edit-post/{slug}")).await;
            app.submit_post(move |form| {
                // Plain assignment: set_title would re-derive the slug, and an edit keeps its document id.
                form.title = title;
                form.set_content(content);
                if let Some(upload) = upload {
                    form.set_image(upload);
                }
            })
            .await?;
        }
        Command::Delete => {
            if !app.delete_current_post().await? {
                println!("post was not deleted");
            }
        }
        Command::Whoami => {
            match app.current_user() {
                Some(user) => println!("{} <{}>", user.name, user.email),
                None => println!("not signed in"),
            }
            return Ok(true);
        }
        Command::Help => {
            println!("{HELP}");
            return Ok(true);
        }
        Command::Quit => return Ok(false),
    }
    print!("{}", app.screen());
    Ok(true)
}

// =============================================================================
// MAIN
// =============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = Arc::new(AppwriteClient::new(cli.platform_config())?);
    let mut app = App::from_client(client);

    app.navigate(&cli.start).await;
    match app.start().await {
        Ok(resolution) => tracing::info!(?resolution, "session resolved"),
        Err(e) => tracing::warn!(error = %e, "bootstrap skipped"),
    }
    print!("{}", app.screen());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };
        match execute(&mut app, command).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => eprintln!("error: {e}"),
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
