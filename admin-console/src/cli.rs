//! Command line surface of the `admin-console` binary

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use admin_client::{AdminApi, FileTokenStore, Session};
use clap::{Parser, Subcommand, ValueEnum};
use shared::client::{CheckoutItem, UpdateUserRequest};
use shared::{AffiliateTier, Filter, PaymentStatus, PlanTier, Transaction, User};

use crate::config::ConsoleConfig;
use crate::error::{ConsoleError, ConsoleResult};
use crate::format::{format_currency, format_date, format_percent, initials};
use crate::store::Store;
use crate::validation::{
    ChangePasswordForm, ForgotPasswordForm, LoginForm, ProfileForm, ResetPasswordForm,
};
use crate::views::{PaymentsTable, PayoutsPanel, TableView, UsersTable};

#[derive(Debug, Parser)]
#[command(name = "admin-console")]
#[command(about = "Admin console for the auto-reply SaaS backend")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConsoleConfig,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and persist the session token
    Login {
        #[arg(long, env = "ADMIN_EMAIL", required_unless_present = "google_token")]
        email: Option<String>,
        #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Sign in with a Google ID token instead
        #[arg(long, conflicts_with_all = ["email", "password"])]
        google_token: Option<String>,
    },
    /// Forget the persisted session token
    Logout,
    /// Show the signed-in admin
    Whoami,
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },
    Payments {
        #[command(subcommand)]
        command: PaymentsCommand,
    },
    Payouts {
        #[command(subcommand)]
        command: PayoutsCommand,
    },
    /// Headline figures and the revenue series
    Dashboard,
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    Password {
        #[command(subcommand)]
        command: PasswordCommand,
    },
    Subscription {
        #[command(subcommand)]
        command: SubscriptionCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        plan: Filter<PlanTier>,
        #[arg(long, default_value = "all")]
        tier: Filter<AffiliateTier>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    Show {
        id: String,
    },
    /// Change a user's affiliate tier (none, tier1, tier2)
    SetTier {
        id: String,
        tier: AffiliateTier,
    },
    SetStatus {
        id: String,
        status: String,
    },
    SetPlan {
        id: String,
        plan: PlanTier,
    },
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum PaymentsCommand {
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        status: Filter<PaymentStatus>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Also write the page to `<dir>/payments-YYYY-MM-DD.csv`
        #[arg(long, value_name = "DIR")]
        export: Option<PathBuf>,
    },
    Show {
        id: String,
    },
    Refund {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    Stats,
}

#[derive(Debug, Subcommand)]
pub enum PayoutsCommand {
    List,
    /// Record the full wallet balance of an affiliate as paid out
    Confirm {
        user_id: String,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Rename the signed-in admin
    Update {
        #[arg(long)]
        name: String,
        /// Hosted avatar URL
        #[arg(long)]
        image_url: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum PasswordCommand {
    Change {
        #[arg(long, env = "ADMIN_CURRENT_PASSWORD", hide_env_values = true)]
        current: String,
        #[arg(long = "new", env = "ADMIN_NEW_PASSWORD", hide_env_values = true)]
        new_password: String,
        #[arg(long)]
        confirm: String,
    },
    /// Email a reset code to `email`
    Forgot {
        #[arg(long)]
        email: String,
    },
    /// Set a new password with the emailed code
    Reset {
        #[arg(long)]
        email: String,
        #[arg(long)]
        otp: String,
        #[arg(long = "new", env = "ADMIN_NEW_PASSWORD", hide_env_values = true)]
        new_password: String,
        #[arg(long)]
        confirm: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum SubscriptionCommand {
    /// Open a Stripe checkout session for a plan or top-up
    Checkout {
        #[arg(value_enum)]
        item: CheckoutArg,
    },
    /// Open the Stripe billing portal
    Portal,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CheckoutArg {
    Basic,
    Pro,
    ProPlus,
    TopUp,
}

impl From<CheckoutArg> for CheckoutItem {
    fn from(arg: CheckoutArg) -> Self {
        match arg {
            CheckoutArg::Basic => CheckoutItem::Basic,
            CheckoutArg::Pro => CheckoutItem::Pro,
            CheckoutArg::ProPlus => CheckoutItem::ProPlus,
            CheckoutArg::TopUp => CheckoutItem::TopUp,
        }
    }
}

/// Build the store from `config`, restoring any persisted token
pub fn build_store(config: &ConsoleConfig) -> ConsoleResult<Arc<Store>> {
    config.validate()?;
    let token_store = Arc::new(FileTokenStore::new(config.token_path()));
    let session = Arc::new(Session::restore(token_store)?);
    let api = AdminApi::connect(&config.client_config(), session)?;
    Ok(Arc::new(Store::new(Arc::new(api))))
}

fn confirm_prompt(question: &str) -> ConsoleResult<bool> {
    print!("{question} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn require_session(store: &Store) -> ConsoleResult<()> {
    if store.session().is_authenticated() {
        Ok(())
    } else {
        Err(ConsoleError::NotSignedIn)
    }
}

fn print_user(u: &User) {
    println!(
        "{:<26} {:<24} {:<32} {:<10} {:<16} {:>12}",
        u.id,
        u.name,
        u.email,
        u.plan.display_name(),
        u.affiliate_tier.label(),
        format_currency(u.wallet_balance)
    );
}

fn print_transaction(t: &Transaction) {
    println!(
        "{:<26} {:<24} {:>10} {:<10} {:<10} {}",
        t.id,
        t.user_name().unwrap_or("N/A"),
        format_currency(t.amount),
        t.status.as_str(),
        t.plan_type.as_deref().unwrap_or("-"),
        format_date(t.created_at)
    );
}

fn print_table<T>(view: TableView<'_, T>, print_row: impl Fn(&T)) {
    match view {
        TableView::Loading => println!("Loading..."),
        TableView::Empty => println!("No results found."),
        TableView::Rows(rows) => rows.iter().for_each(print_row),
    }
}

/// Run the parsed command line, printing queued notices afterwards
pub async fn run(cli: Cli) -> ConsoleResult<()> {
    let store = build_store(&cli.config)?;
    let result = execute(store.clone(), &cli.config, cli.command).await;
    for notice in store.notices().drain() {
        if notice.is_error() {
            eprintln!("{notice}");
        } else {
            println!("{notice}");
        }
    }
    result
}

/// Run one command against `store`; notices are printed by the caller
pub async fn execute(store: Arc<Store>, config: &ConsoleConfig, command: Command) -> ConsoleResult<()> {
    match command {
        Command::Login {
            email,
            password,
            google_token,
        } => {
            let profile = match google_token {
                Some(token) => store.google_login(&token).await?,
                None => {
                    let form = LoginForm::new(email.unwrap_or_default(), password.unwrap_or_default());
                    store.login(&form).await?
                }
            };
            println!("Signed in as {} <{}>", profile.name, profile.email);
        }
        Command::Logout => {
            store.logout();
            println!("Signed out");
        }
        Command::Whoami => {
            require_session(&store)?;
            let profile = store.fetch_profile().await?;
            println!(
                "[{}] {} <{}>",
                initials(Some(&profile.name)),
                profile.name,
                profile.email
            );
            if let Some(role) = profile.role {
                println!("role: {role}");
            }
        }
        Command::Users { command } => users(store, config, command).await?,
        Command::Payments { command } => payments(store, config, command).await?,
        Command::Payouts { command } => payouts(store, command).await?,
        Command::Dashboard => {
            require_session(&store)?;
            let summary = store.load_dashboard().await?;
            for (label, value) in summary.cards() {
                println!("{label:<22} {value}");
            }
            println!(
                "{:<22} {}",
                "User Growth",
                format_percent(summary.stats.user_growth)
            );
            for point in &summary.revenue {
                println!("{:<8} {:>12} {:>6}", point.month, format_currency(point.revenue), point.users);
            }
        }
        Command::Profile {
            command: ProfileCommand::Update { name, image_url },
        } => {
            require_session(&store)?;
            let form = ProfileForm {
                name,
                profile_image: image_url,
            };
            let profile = store.update_profile(&form).await?;
            println!("{} <{}>", profile.name, profile.email);
        }
        Command::Password { command } => match command {
            PasswordCommand::Change {
                current,
                new_password,
                confirm,
            } => {
                require_session(&store)?;
                let form = ChangePasswordForm {
                    current_password: current,
                    new_password,
                    confirm_password: confirm,
                };
                store.change_password(&form).await?;
            }
            PasswordCommand::Forgot { email } => {
                store.forgot_password(&ForgotPasswordForm { email }).await?;
            }
            PasswordCommand::Reset {
                email,
                otp,
                new_password,
                confirm,
            } => {
                let form = ResetPasswordForm {
                    email,
                    otp,
                    new_password,
                    confirm_password: confirm,
                };
                store.reset_password(&form).await?;
            }
        },
        Command::Subscription { command } => {
            require_session(&store)?;
            let subscription = store.api().subscription();
            let session = match command {
                SubscriptionCommand::Checkout { item } => {
                    let item = CheckoutItem::from(item);
                    let price_id = std::env::var(item.price_env_var()).ok().filter(|s| !s.is_empty());
                    subscription.create_checkout_session(item, price_id).await
                }
                SubscriptionCommand::Portal => subscription.create_portal_session().await,
            };
            match session {
                Ok(session) => println!("{}", session.url),
                Err(e) => {
                    store.report(&e, "Failed to create session");
                    return Err(e.into());
                }
            }
        }
    }
    Ok(())
}

async fn users(store: Arc<Store>, config: &ConsoleConfig, command: UsersCommand) -> ConsoleResult<()> {
    require_session(&store)?;
    match command {
        UsersCommand::List {
            search,
            plan,
            tier,
            page,
        } => {
            let quiet = config.search_debounce();
            let mut table = UsersTable::new(store.clone(), quiet).with_page_size(config.page_size);
            let now = Instant::now();
            table.set_search(search, now);
            table.set_plan(plan);
            table.set_affiliate_tier(tier);
            table.tick(now + quiet).await?;
            if page > 1 {
                table.set_page(page);
                table.tick(now + quiet).await?;
            }
            table.with_table(|view| print_table(view, print_user));
            println!("{}", table.pagination().summary());
        }
        UsersCommand::Show { id } => {
            let user = store.api().users().get(&id).await.inspect_err(|e| {
                store.report(e, "Failed to load user");
            })?;
            print_user(&user);
            if let Some(code) = &user.referral_code {
                println!("referral code: {code}");
            }
            if let Some(by) = &user.referred_by {
                println!("referred by: {by}");
            }
            println!("joined: {}", format_date(user.created_at));
        }
        UsersCommand::SetTier { id, tier } => {
            store.update_tier(&id, tier).await?;
        }
        UsersCommand::SetStatus { id, status } => {
            store.api().users().set_status(&id, &status).await.inspect_err(|e| {
                store.report(e, "Failed to update status");
            })?;
            println!("Status of {id} set to {status}");
        }
        UsersCommand::SetPlan { id, plan } => {
            let req = UpdateUserRequest {
                plan: Some(plan),
                ..UpdateUserRequest::default()
            };
            store.api().users().update(&id, &req).await.inspect_err(|e| {
                store.report(e, "Failed to update user");
            })?;
            println!("Plan of {id} set to {}", plan.display_name());
        }
        UsersCommand::Delete { id, yes } => {
            if !yes && !confirm_prompt(&format!("Delete user {id}?"))? {
                return Ok(());
            }
            store.api().users().delete(&id).await.inspect_err(|e| {
                store.report(e, "Failed to delete user");
            })?;
            println!("Deleted {id}");
        }
    }
    Ok(())
}

async fn payments(
    store: Arc<Store>,
    config: &ConsoleConfig,
    command: PaymentsCommand,
) -> ConsoleResult<()> {
    require_session(&store)?;
    match command {
        PaymentsCommand::List {
            search,
            status,
            page,
            export,
        } => {
            let quiet = config.search_debounce();
            let mut table = PaymentsTable::new(store.clone(), quiet);
            let now = Instant::now();
            table.set_search(search, now);
            table.set_status(status);
            table.tick(now + quiet).await?;
            if page > 1 {
                table.set_page(page);
                table.tick(now + quiet).await?;
            }
            table.with_table(|view| print_table(view, print_transaction));
            println!("{}", table.pagination().summary());
            if let Some(dir) = export {
                let path = table.export_csv(&dir, chrono::Local::now().date_naive())?;
                println!("Wrote {}", path.display());
            }
        }
        PaymentsCommand::Show { id } => {
            let txn = store.api().payments().get(&id).await.inspect_err(|e| {
                store.report(e, "Failed to load payment");
            })?;
            print_transaction(&txn);
            println!("email: {}", txn.user_email().unwrap_or("N/A"));
            println!("method: {}", txn.payment_method.as_deref().unwrap_or("-"));
        }
        PaymentsCommand::Refund { id, yes } => {
            if !yes && !confirm_prompt(&format!("Refund payment {id}?"))? {
                return Ok(());
            }
            store.refund_payment(&id).await?;
        }
        PaymentsCommand::Stats => {
            store.fetch_payment_stats().await?;
            let stats = store.payments().stats;
            println!("{:<18} {}", "Total Revenue", format_currency(stats.total_revenue));
            println!("{:<18} {}", "Monthly Revenue", format_currency(stats.monthly_revenue));
            println!("{:<18} {}", "Pending Payouts", format_currency(stats.pending_payouts));
            println!("{:<18} {}", "Success Rate", format_percent(stats.success_rate));
        }
    }
    Ok(())
}

async fn payouts(store: Arc<Store>, command: PayoutsCommand) -> ConsoleResult<()> {
    require_session(&store)?;
    let mut panel = PayoutsPanel::new(store.clone());
    panel.activate().await?;
    match command {
        PayoutsCommand::List => {
            panel.with_table(|view| {
                print_table(view, |p| {
                    println!(
                        "{:<26} {:<24} {:<32} {:<16} {:>12}",
                        p.user_id,
                        p.name,
                        p.email,
                        p.affiliate_tier.label(),
                        format_currency(p.wallet_balance)
                    )
                })
            });
        }
        PayoutsCommand::Confirm { user_id, yes } => {
            panel.select(&user_id)?;
            let prompt = panel.dialog().prompt().unwrap_or_default();
            if !yes && !confirm_prompt(&prompt)? {
                panel.cancel();
                return Ok(());
            }
            panel.confirm().await?;
        }
    }
    Ok(())
}
