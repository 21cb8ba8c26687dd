use crate::admin::{AdminConsole, Notice};
use crate::api::{ApiClient, User};
use crate::app::forms::{LoginForm, REGISTER_REDIRECT_DELAY, RegisterForm};
use crate::auth::{FileTokenStore, SessionManager};
use crate::chat::{Orchestrator, Scraper, SubmitOutcome};
use crate::cli::{AdminCommands, Cli, Commands};
use crate::config::ClientConfig;
use crate::routing::{NavLink, Navigation, View, evaluate, nav_links};
use crate::ui::{render_entry, style};
use anyhow::{Context, Result, bail};
use dialoguer::{Confirm, Input, Password};
use std::io::IsTerminal;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

const DELETE_USER_PROMPT: &str = "Tem certeza que deseja deletar este utilizador?";
const CLEAR_CACHE_PROMPT: &str =
    "Tem certeza que deseja apagar TODO o cache de scraping? Todos os sites terão de ser re-analisados.";

/// Everything a command needs: the service client and the restored session.
pub struct App {
    config: ClientConfig,
    api: ApiClient,
    session: SessionManager,
}

impl App {
    /// Wire the client to the persisted session and restore it.
    pub fn new(config: ClientConfig) -> Self {
        let api = ApiClient::from_config(&config);
        let store = Arc::new(FileTokenStore::new(config.token_store_path()));
        let mut session = SessionManager::new(store, api.bearer().clone());
        session.initialize();
        Self {
            config,
            api,
            session,
        }
    }

    /// Consult the guard for `view`. Redirects are reported and end the
    /// command.
    fn enter(&self, view: View) -> Result<()> {
        match evaluate(self.session.session(), view) {
            Navigation::Allow(_) => Ok(()),
            Navigation::Deferred => bail!("Session is still being restored"),
            Navigation::Redirect(View::Login) => {
                bail!(
                    "{} requires a signed-in account. Run `dossier login` first.",
                    view.path()
                )
            }
            Navigation::Redirect(target) if view == View::Admin => {
                bail!(
                    "{} is reserved for administrators (redirected to {}).",
                    view.path(),
                    target.path()
                )
            }
            Navigation::Redirect(target) => {
                bail!(
                    "Already signed in as {} (redirected to {}). Run `dossier logout` to switch accounts.",
                    self.subject(),
                    target.path()
                )
            }
        }
    }

    fn subject(&self) -> &str {
        self.session
            .claims()
            .map_or("unknown", |claims| claims.subject.as_str())
    }

    async fn login(&mut self, email: Option<String>, password: Option<String>) -> Result<()> {
        self.enter(View::Login)?;
        let email = prompt_email(email)?;
        let password = prompt_password(password)?;

        let mut form = LoginForm::new();
        if !form.submit(&self.api, &mut self.session, &email, &password).await {
            bail!("{}", form.error().unwrap_or("Erro ao fazer login."));
        }

        println!(
            "  {} Signed in as {}",
            style::success("✓"),
            style::header(self.subject())
        );
        self.print_nav();
        Ok(())
    }

    async fn register(&mut self, email: Option<String>, password: Option<String>) -> Result<()> {
        self.enter(View::Register)?;
        let email = prompt_email(email)?;
        let password = prompt_password(password)?;

        let mut form = RegisterForm::new();
        if !form.submit(&self.api, &email, &password).await {
            bail!("{}", form.error().unwrap_or("Erro ao registrar."));
        }
        println!(
            "  {} {}",
            style::success("✓"),
            form.success().unwrap_or_default()
        );

        tokio::time::sleep(REGISTER_REDIRECT_DELAY).await;
        if !std::io::stdin().is_terminal() {
            println!("  {}", style::dim("Run `dossier login` to sign in."));
            return Ok(());
        }
        self.login(Some(email), None).await
    }

    fn logout(&mut self) {
        let was_signed_in = self.session.is_authenticated();
        self.session.logout();
        if was_signed_in {
            println!("  {} Signed out", style::success("✓"));
        } else {
            println!("  {}", style::dim("No active session."));
        }
    }

    fn whoami(&self) {
        let Some(claims) = self.session.claims() else {
            println!("  {}", style::dim("Not signed in."));
            return;
        };

        println!("  {}", style::header(&claims.subject));
        let role = if claims.is_privileged() {
            "administrator"
        } else {
            "standard"
        };
        println!("  {} {role}", style::dim("Role:"));
        println!(
            "  {} {}",
            style::dim("Expires:"),
            claims.expires_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        self.print_nav();
    }

    fn print_nav(&self) {
        let links: Vec<&str> = nav_links(self.session.session())
            .into_iter()
            .map(|link| match link {
                NavLink::Dashboard => "scrape/chat",
                NavLink::Admin => "admin",
                NavLink::Logout => "logout",
            })
            .collect();
        if !links.is_empty() {
            println!("  {} {}", style::dim("Available:"), links.join(", "));
        }
    }

    async fn scrape(&self, url: &str) -> Result<()> {
        self.enter(View::Dashboard)?;
        let orchestrator = Orchestrator::new(self.api.clone());

        let outcome =
            with_working_indicator(&orchestrator, orchestrator.submit(url), print_indicator).await;
        let transcript = orchestrator.transcript();

        match outcome {
            SubmitOutcome::Rejected(rejection) => bail!("{}", rejection.message()),
            SubmitOutcome::Answered => {
                if let Some(entry) = transcript.last() {
                    println!("{}", render_entry(entry));
                }
                Ok(())
            }
            SubmitOutcome::Failed { message } => {
                if let Some(entry) = transcript.last() {
                    eprintln!("{}", render_entry(entry));
                }
                bail!("analysis failed: {message}")
            }
        }
    }

    async fn chat(&self) -> Result<()> {
        self.enter(View::Dashboard)?;
        let orchestrator = match self.config.greeting() {
            Some(greeting) => Orchestrator::with_greeting(self.api.clone(), greeting),
            None => Orchestrator::new(self.api.clone()),
        };
        for entry in &orchestrator.transcript() {
            println!("{}", render_entry(entry));
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let Some(line) = lines
                .next_line()
                .await
                .context("Failed to read from stdin")?
            else {
                break;
            };
            if line.trim().is_empty() {
                break;
            }

            orchestrator.set_input(&line);
            let seen = orchestrator.transcript_len();

            match with_working_indicator(&orchestrator, orchestrator.submit_input(), print_indicator)
                .await
            {
                SubmitOutcome::Rejected(rejection) => {
                    println!("  {}", style::error(rejection.message()));
                    continue;
                }
                SubmitOutcome::Answered | SubmitOutcome::Failed { .. } => {}
            }

            // The request echo is already on screen as the typed line.
            for entry in orchestrator.transcript().entries().iter().skip(seen + 1) {
                println!("{}", render_entry(entry));
            }
        }

        debug!(
            entries = orchestrator.transcript_len(),
            "conversation ended"
        );
        Ok(())
    }

    async fn admin(&self, command: AdminCommands) -> Result<()> {
        self.enter(View::Admin)?;
        let session = self.session.session();
        let mut console = AdminConsole::new(self.api.clone());

        match command {
            AdminCommands::Users => {
                let users = console.refresh_users(session).await?.to_vec();
                if let Some(notice) = console.notice() {
                    print_notice(notice);
                }
                print_users(&users);
            }
            AdminCommands::CreateUser {
                email,
                password,
                admin,
            } => {
                let password = prompt_password(password)?;
                let notice = console
                    .create_user(session, &email, &password, admin)
                    .await?
                    .clone();
                print_notice(&notice);
                print_listing(&console, &notice);
            }
            AdminCommands::DeleteUser { id, yes } => {
                if !confirm(DELETE_USER_PROMPT, yes)? {
                    println!("  {}", style::dim("Cancelled."));
                    return Ok(());
                }
                let notice = console.delete_user(session, id).await?.clone();
                print_notice(&notice);
                print_listing(&console, &notice);
            }
            AdminCommands::ClearCache { yes } => {
                if !confirm(CLEAR_CACHE_PROMPT, yes)? {
                    println!("  {}", style::dim("Cancelled."));
                    return Ok(());
                }
                let notice = console.clear_cache(session).await?;
                print_notice(notice);
            }
        }
        Ok(())
    }
}

fn print_indicator(indicator: &str) {
    println!("  {}", style::dim(indicator));
}

/// Drive `submission` and call `on_pending` once the orchestrator has
/// accepted it and is waiting on the service. Rejected submissions never
/// show the indicator.
async fn with_working_indicator<S, F>(
    orchestrator: &Orchestrator<S>,
    submission: F,
    on_pending: impl FnOnce(&str),
) -> SubmitOutcome
where
    S: Scraper,
    F: Future<Output = SubmitOutcome>,
{
    tokio::pin!(submission);
    tokio::select! {
        biased;
        outcome = &mut submission => return outcome,
        () = std::future::ready(()) => {}
    }

    if let Some(indicator) = orchestrator.working_indicator() {
        on_pending(indicator);
    }
    submission.await
}

fn print_notice(notice: &Notice) {
    match notice {
        Notice::Success(message) => println!("  {} {message}", style::success("✓")),
        Notice::Error(message) => println!("  {} {message}", style::error("✗")),
    }
}

/// Listing shown after a successful change, or why it could not be reloaded.
fn print_listing(console: &AdminConsole, notice: &Notice) {
    if notice.is_error() {
        return;
    }
    match console.listing_error() {
        Some(error) => println!("  {} {error}", style::error("✗")),
        None => print_users(console.users()),
    }
}

fn print_users(users: &[User]) {
    if users.is_empty() {
        println!("  {}", style::dim("No users."));
        return;
    }
    println!(
        "  {}",
        style::header(format!("{:<6} {:<32} {:<6} {}", "ID", "Email", "Admin", "Created"))
    );
    for user in users {
        println!(
            "  {:<6} {:<32} {:<6} {}",
            user.id,
            user.email,
            if user.is_admin { "yes" } else { "no" },
            user.created_at.as_deref().unwrap_or("-")
        );
    }
}

/// Ask before a destructive admin operation; `--yes` answers up front.
fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        bail!("Refusing to continue without confirmation; pass --yes in non-interactive mode");
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("Failed to read confirmation from terminal")
}

fn prompt_email(email: Option<String>) -> Result<String> {
    if let Some(email) = email {
        return Ok(email);
    }
    if !std::io::stdin().is_terminal() {
        bail!("--email is required in non-interactive mode");
    }
    Input::<String>::new()
        .with_prompt("Email")
        .interact_text()
        .context("Failed to read email from terminal")
}

fn prompt_password(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    if !std::io::stdin().is_terminal() {
        bail!("--password is required in non-interactive mode");
    }
    Password::new()
        .with_prompt("Password (input hidden)")
        .allow_empty_password(false)
        .interact()
        .context("Failed to read password from terminal")
}

pub async fn dispatch(cli: Cli, config: ClientConfig) -> Result<()> {
    info!(api_url = %config.api_url, "starting dossier client");
    let mut app = App::new(config);

    match cli.command {
        Commands::Login { email, password } => app.login(email, password).await,
        Commands::Register { email, password } => app.register(email, password).await,
        Commands::Logout => {
            app.logout();
            Ok(())
        }
        Commands::Whoami => {
            app.whoami();
            Ok(())
        }
        Commands::Scrape { url } => app.scrape(&url).await,
        Commands::Chat => app.chat().await,
        Commands::Admin { admin_command } => app.admin(admin_command).await,
    }
}
