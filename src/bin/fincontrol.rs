//! CLI front end for the fincontrol personal finance tracker.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, Table};
use fincontrol::aggregate::{BudgetProgress, Dashboard, GoalProgress, Totals};
use fincontrol::format;
use fincontrol::models::{
    self, BillId, Category, CategoryCatalog, Credentials, NaiveDate, NewBill, NewBudget, NewGoal,
    Theme, Transaction, TransactionDraft, TransactionId, TransactionType,
};
use fincontrol::notifications::{self, PendingBill};
use fincontrol::report::{DateRange, DocumentRenderer, JsonRenderer, ReportGenerator, TableRenderer};
use fincontrol::storage::{FileStorage, Storage};
use fincontrol::store::{Confirm, DeleteOutcome, RecordStore};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use secrecy::SecretString;

/// Environment variable overriding the storage directory.
const DATA_DIR_ENV: &str = "FINCONTROL_DATA_DIR";

/// Track income, expenses, budgets, goals and bills.
#[derive(Debug, Parser)]
#[command(name = "fincontrol", version, about)]
struct Cli {
    /// Override the storage directory (default: `$FINCONTROL_DATA_DIR`, then
    /// the XDG data dir).
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Start a session. Any non-empty email and password is accepted.
    Login {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },
    /// End the session and restore all records to their defaults.
    Logout {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Record an income or expense.
    Add(AddArgs),
    /// Delete a transaction by id.
    Delete {
        /// Transaction id.
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// List all transactions, newest first.
    Transactions,
    /// Show totals, recent transactions, budgets and goals.
    Dashboard,
    /// Show spend against every budget.
    Budgets,
    /// Create a category budget.
    BudgetAdd {
        /// Expense category the budget applies to.
        #[arg(long)]
        category: String,
        /// Spending limit.
        #[arg(long, value_parser = parse_money)]
        limit: f64,
    },
    /// Show progress of every savings goal.
    Goals,
    /// Create a savings goal.
    GoalAdd {
        /// Goal name.
        #[arg(long)]
        name: String,
        /// Amount to reach.
        #[arg(long, value_parser = parse_money)]
        target: f64,
        /// Amount saved so far.
        #[arg(long, value_parser = parse_money, default_value = "0")]
        current: f64,
    },
    /// List unpaid bills by due date.
    Bills,
    /// Create a bill reminder.
    BillAdd {
        /// Bill name.
        #[arg(long)]
        name: String,
        /// Amount due.
        #[arg(long, value_parser = parse_money)]
        amount: f64,
        /// Due date (YYYY-MM-DD).
        #[arg(long, value_parser = parse_date)]
        due: NaiveDate,
    },
    /// Mark a bill as paid.
    Pay {
        /// Bill id.
        id: String,
    },
    /// Export a report for a date range.
    Report(ReportArgs),
    /// List the category catalog.
    Categories,
    /// Show or switch the color theme. Toggles when no theme is given.
    Theme {
        /// Theme to switch to.
        #[arg(value_enum)]
        theme: Option<ThemeArg>,
    },
    /// Turn bill notifications on or off.
    Notifications {
        /// New state.
        #[arg(value_enum)]
        state: Switch,
    },
}

impl Command {
    /// Whether the command needs a logged-in session.
    const fn requires_session(&self) -> bool {
        !matches!(self, Self::Login { .. } | Self::Categories)
    }
}

/// Arguments for the `add` subcommand.
#[derive(Debug, Args)]
struct AddArgs {
    /// Transaction type (income or expense).
    #[arg(long = "type", value_name = "TYPE")]
    kind: TransactionType,
    /// Amount; a comma is accepted as decimal separator.
    #[arg(long)]
    amount: String,
    /// Category name (default: first catalog category of the type).
    #[arg(long)]
    category: Option<String>,
    /// Date (YYYY-MM-DD, default: today).
    #[arg(long)]
    date: Option<String>,
    /// Free-text description.
    #[arg(long)]
    description: String,
}

/// Arguments for the `report` subcommand.
#[derive(Debug, Args)]
struct ReportArgs {
    /// Start date (inclusive, YYYY-MM-DD). Requires --to.
    #[arg(long, requires = "to", value_parser = parse_date)]
    from: Option<NaiveDate>,
    /// End date (inclusive, YYYY-MM-DD). Requires --from.
    #[arg(long, requires = "from", value_parser = parse_date)]
    to: Option<NaiveDate>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Json)]
    format: ReportFormat,
    /// Directory the report is written to (default: current directory).
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    /// Pretty-printed JSON document.
    Json,
    /// Plain-text tables.
    Table,
}

/// Theme argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ThemeArg {
    /// Light background.
    Light,
    /// Dark background.
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
        }
    }
}

/// On/off argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Switch {
    /// Enable.
    On,
    /// Disable.
    Off,
}

/// Parses a date string in `YYYY-MM-DD` format for clap.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    models::parse_date(s).map_err(|err| format!("{err}"))
}

/// Parses a non-negative amount for clap.
fn parse_money(s: &str) -> Result<f64, String> {
    models::parse_amount(s).map_err(|err| format!("{err}"))
}

/// Confirmation read as `y/N` from stdin.
#[derive(Debug, Clone, Copy)]
struct Prompt {
    /// Answer yes without asking.
    assume_yes: bool,
}

impl Confirm for Prompt {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        ask(&mut io::stdin().lock(), &mut io::stderr().lock(), prompt).unwrap_or(false)
    }
}

/// Writes `prompt` to `output` and reads a yes/no answer from `input`.
/// Anything but an explicit yes counts as no.
fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> io::Result<bool> {
    write!(output, "{prompt} [y/N] ")?;
    output.flush()?;
    let mut answer = String::new();
    let _read = input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "sim"
    ))
}

/// Runs the CLI, returning an appropriate exit code.
fn run() -> io::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let _dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let storage = match create_storage(cli.data_dir) {
        Ok(storage) => storage,
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to initialize storage: {err}",
                "error:".red().bold()
            )?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut store = match RecordStore::builder().storage(storage).build() {
        Ok(store) => store,
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to open store: {err}",
                "error:".red().bold()
            )?;
            return Ok(ExitCode::FAILURE);
        }
    };

    dispatch(&mut store, cli.command)
}

/// Creates the storage backend from `data_dir`, then
/// `$FINCONTROL_DATA_DIR`, then the default XDG data directory.
fn create_storage(data_dir: Option<PathBuf>) -> fincontrol::error::Result<FileStorage> {
    let dir = match data_dir.or_else(env_data_dir) {
        Some(dir) => dir,
        None => FileStorage::default_dir()?,
    };
    FileStorage::new(dir)
}

/// Reads the storage directory override from the environment.
fn env_data_dir() -> Option<PathBuf> {
    std::env::var_os(DATA_DIR_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Dispatches to the appropriate subcommand handler.
fn dispatch<S: Storage>(store: &mut RecordStore<S>, command: Command) -> io::Result<ExitCode> {
    if command.requires_session() && !store.is_authenticated() {
        let mut err = io::stderr().lock();
        writeln!(err, "{} not logged in", "error:".red().bold())?;
        writeln!(
            err,
            "  {} run {} first",
            "hint:".cyan(),
            "fincontrol login --email <EMAIL> --password <PASSWORD>".bold()
        )?;
        return Ok(ExitCode::FAILURE);
    }

    match command {
        Command::Login { email, password } => cmd_login(store, email, password),
        Command::Logout { yes } => cmd_logout(store, &Prompt { assume_yes: yes }),
        Command::Add(args) => cmd_add(store, args),
        Command::Delete { id, yes } => cmd_delete(store, id, &Prompt { assume_yes: yes }),
        Command::Transactions => print_transactions(store.transactions()),
        Command::Dashboard => print_dashboard(&store.dashboard(), store.notification_badge()),
        Command::Budgets => print_budgets(&store.budgets_progress()),
        Command::BudgetAdd { category, limit } => cmd_budget_add(store, category, limit),
        Command::Goals => print_goals(&store.goals_progress()),
        Command::GoalAdd {
            name,
            target,
            current,
        } => cmd_goal_add(store, name, target, current),
        Command::Bills => print_bills(
            &store.pending_bills(notifications::today()),
            store.notification_badge(),
        ),
        Command::BillAdd { name, amount, due } => cmd_bill_add(store, name, amount, due),
        Command::Pay { id } => cmd_pay(store, id),
        Command::Report(args) => cmd_report(store, args),
        Command::Categories => print_categories(CategoryCatalog::default().all()),
        Command::Theme { theme } => cmd_theme(store, theme),
        Command::Notifications { state } => cmd_notifications(store, state),
    }
}

/// Executes the `login` subcommand.
fn cmd_login<S: Storage>(
    store: &mut RecordStore<S>,
    email: String,
    password: String,
) -> io::Result<ExitCode> {
    let credentials = Credentials::new(email, SecretString::from(password));
    match store.login(&credentials) {
        Ok(()) => {
            writeln!(
                io::stdout().lock(),
                "{} logged in as {}",
                "ok:".green().bold(),
                credentials.email.bold()
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            writeln!(io::stderr().lock(), "{} {err}", "error:".red().bold())?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `logout` subcommand.
fn cmd_logout<S: Storage, C: Confirm>(store: &mut RecordStore<S>, confirm: &C) -> io::Result<ExitCode> {
    let mut out = io::stdout().lock();
    if store.logout(confirm) {
        writeln!(out, "{} logged out, records restored", "ok:".green().bold())?;
    } else {
        writeln!(out, "{}", "Logout cancelled.".dimmed())?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes the `add` subcommand: validates the entry and stores it.
fn cmd_add<S: Storage>(store: &mut RecordStore<S>, args: AddArgs) -> io::Result<ExitCode> {
    let category = args.category.unwrap_or_else(|| {
        CategoryCatalog::default()
            .default_for(args.kind)
            .map(|category| category.name.clone())
            .unwrap_or_default()
    });
    let date = args
        .date
        .unwrap_or_else(|| notifications::today().format("%Y-%m-%d").to_string());
    let draft = TransactionDraft {
        kind: args.kind,
        amount: args.amount,
        category,
        date,
        description: args.description,
    };

    match store.submit_transaction(&draft) {
        Ok(id) => {
            writeln!(
                io::stdout().lock(),
                "{} added transaction {}",
                "ok:".green().bold(),
                id.bold()
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            writeln!(io::stderr().lock(), "{} {err}", "error:".red().bold())?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `delete` subcommand.
fn cmd_delete<S: Storage, C: Confirm>(
    store: &mut RecordStore<S>,
    id: String,
    confirm: &C,
) -> io::Result<ExitCode> {
    let id = TransactionId::new(id);
    match store.delete_transaction(&id, confirm) {
        DeleteOutcome::Deleted => {
            writeln!(
                io::stdout().lock(),
                "{} deleted transaction {id}",
                "ok:".green().bold()
            )?;
            Ok(ExitCode::SUCCESS)
        }
        DeleteOutcome::Cancelled => {
            writeln!(io::stdout().lock(), "{}", "Deletion cancelled.".dimmed())?;
            Ok(ExitCode::SUCCESS)
        }
        DeleteOutcome::NotFound => {
            writeln!(
                io::stderr().lock(),
                "{} transaction not found: {id}",
                "error:".red().bold()
            )?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `budget-add` subcommand.
fn cmd_budget_add<S: Storage>(
    store: &mut RecordStore<S>,
    category: String,
    limit: f64,
) -> io::Result<ExitCode> {
    let id = store.add_budget(NewBudget { category, limit });
    writeln!(io::stdout().lock(), "{} added budget {}", "ok:".green().bold(), id.bold())?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `goal-add` subcommand.
fn cmd_goal_add<S: Storage>(
    store: &mut RecordStore<S>,
    name: String,
    target_amount: f64,
    current_amount: f64,
) -> io::Result<ExitCode> {
    let id = store.add_goal(NewGoal {
        name,
        target_amount,
        current_amount,
    });
    writeln!(io::stdout().lock(), "{} added goal {}", "ok:".green().bold(), id.bold())?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `bill-add` subcommand.
fn cmd_bill_add<S: Storage>(
    store: &mut RecordStore<S>,
    name: String,
    amount: f64,
    due_date: NaiveDate,
) -> io::Result<ExitCode> {
    let id = store.add_bill(NewBill {
        name,
        amount,
        due_date,
    });
    writeln!(io::stdout().lock(), "{} added bill {}", "ok:".green().bold(), id.bold())?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `pay` subcommand.
fn cmd_pay<S: Storage>(store: &mut RecordStore<S>, id: String) -> io::Result<ExitCode> {
    let id = BillId::new(id);
    if store.mark_bill_paid(&id) {
        writeln!(
            io::stdout().lock(),
            "{} bill {id} paid {}",
            "ok:".green().bold(),
            format_args!("({} pending)", store.pending_bill_count()).dimmed()
        )?;
        Ok(ExitCode::SUCCESS)
    } else {
        writeln!(
            io::stderr().lock(),
            "{} no unpaid bill with id {id}",
            "error:".red().bold()
        )?;
        Ok(ExitCode::FAILURE)
    }
}

/// Executes the `report` subcommand: renders the report and writes it to
/// the output directory.
fn cmd_report<S: Storage>(store: &RecordStore<S>, args: ReportArgs) -> io::Result<ExitCode> {
    let range = match args.from.zip(args.to) {
        Some((start, end)) => DateRange::new(start, end),
        None => DateRange::spanning(store.transactions()).unwrap_or_else(|| {
            let today = notifications::today();
            DateRange::new(today, today)
        }),
    };
    if range.start > range.end {
        writeln!(
            io::stderr().lock(),
            "{} --from must not be after --to",
            "error:".red().bold()
        )?;
        return Ok(ExitCode::FAILURE);
    }

    let out_dir = args.out.unwrap_or_else(|| PathBuf::from("."));
    match args.format {
        ReportFormat::Json => write_report(
            &ReportGenerator::new(JsonRenderer),
            store.transactions(),
            range,
            &out_dir,
        ),
        ReportFormat::Table => write_report(
            &ReportGenerator::new(TableRenderer),
            store.transactions(),
            range,
            &out_dir,
        ),
    }
}

/// Generates a report with a spinner and saves it under `out_dir`.
fn write_report<R: DocumentRenderer>(
    generator: &ReportGenerator<R>,
    transactions: &[Transaction],
    range: DateRange,
    out_dir: &Path,
) -> io::Result<ExitCode> {
    let spinner = make_spinner("Generating report...");
    let result = generator.generate(transactions, range);
    spinner.finish_and_clear();

    let generated = match result {
        Ok(generated) => generated,
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} report generation failed: {err}",
                "error:".red().bold()
            )?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let path = out_dir.join(&generated.file_name);
    if let Err(err) = std::fs::write(&path, &generated.bytes) {
        writeln!(
            io::stderr().lock(),
            "{} failed to write {}: {err}",
            "error:".red().bold(),
            path.display()
        )?;
        return Ok(ExitCode::FAILURE);
    }

    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{} {} {}",
        "Report saved".green().bold(),
        path.display(),
        format_args!("({} transactions)", generated.row_count).dimmed()
    )?;
    write_totals(&mut out, &generated.totals)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `theme` subcommand.
fn cmd_theme<S: Storage>(store: &mut RecordStore<S>, theme: Option<ThemeArg>) -> io::Result<ExitCode> {
    let theme = match theme {
        Some(theme) => {
            store.set_theme(theme.into());
            store.theme()
        }
        None => store.toggle_theme(),
    };
    let name = match theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
    };
    writeln!(io::stdout().lock(), "{} theme is now {}", "ok:".green().bold(), name.bold())?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `notifications` subcommand.
fn cmd_notifications<S: Storage>(store: &mut RecordStore<S>, state: Switch) -> io::Result<ExitCode> {
    store.set_notifications_enabled(state == Switch::On);
    let mut out = io::stdout().lock();
    match store.notification_badge() {
        Some(count) => writeln!(
            out,
            "{} notifications on {}",
            "ok:".green().bold(),
            format_args!("({count} pending bills)").dimmed()
        )?,
        None => writeln!(out, "{} notifications off", "ok:".green().bold())?,
    }
    Ok(ExitCode::SUCCESS)
}

// ── Output formatting ────────────────────────────────────────────────

/// Creates a spinner with the given message.
fn make_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(core::time::Duration::from_millis(80));
    spinner
}

/// Creates a table with the shared preset and a cyan header.
fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(
        header
            .iter()
            .map(|title| Cell::new(title).fg(Color::Cyan))
            .collect::<Vec<_>>(),
    );
    table
}

/// Writes income, expenses and balance lines.
fn write_totals<W: Write>(out: &mut W, totals: &Totals) -> io::Result<()> {
    writeln!(out, "  {} {}", "Income:  ".bold(), format::currency(totals.income).green())?;
    writeln!(out, "  {} {}", "Expenses:".bold(), format::currency(totals.expenses).red())?;
    let balance = format::currency(totals.balance);
    if totals.balance < 0.0_f64 {
        writeln!(out, "  {} {}", "Balance: ".bold(), balance.red())?;
    } else {
        writeln!(out, "  {} {}", "Balance: ".bold(), balance.green())?;
    }
    Ok(())
}

/// Builds the transactions table.
fn transactions_table(txs: &[Transaction]) -> Table {
    let mut table = new_table(&["Date", "Description", "Category", "Amount", "ID"]);
    for tx in txs {
        let color = match tx.kind {
            TransactionType::Income => Color::Green,
            TransactionType::Expense => Color::Red,
        };
        _ = table.add_row(vec![
            Cell::new(format::date(tx.date)),
            Cell::new(&tx.description),
            Cell::new(&tx.category),
            Cell::new(format::signed_currency(tx.kind, tx.amount)).fg(color),
            Cell::new(&tx.id).fg(Color::DarkGrey),
        ]);
    }
    if let Some(column) = table.column_mut(3) {
        _ = column.set_cell_alignment(CellAlignment::Right);
    }
    table
}

/// Builds the budget progress table.
fn budgets_table(progress: &[BudgetProgress]) -> Table {
    let mut table = new_table(&["Category", "Spent", "Limit", "Used", "Remaining"]);
    for item in progress {
        let color = if item.is_over_budget {
            Color::Red
        } else if item.percentage >= 80.0_f64 {
            Color::Yellow
        } else {
            Color::Green
        };
        _ = table.add_row(vec![
            Cell::new(&item.budget.category),
            Cell::new(format::currency(item.spent)),
            Cell::new(format::currency(item.budget.limit)),
            Cell::new(format!("{:.0}%", item.percentage)).fg(color),
            Cell::new(format::currency(item.remaining)).fg(color),
        ]);
    }
    table
}

/// Builds the goal progress table.
fn goals_table(progress: &[GoalProgress]) -> Table {
    let mut table = new_table(&["Goal", "Saved", "Target", "Progress", "Status"]);
    for item in progress {
        let status = if item.is_complete {
            Cell::new("done").fg(Color::Green)
        } else {
            Cell::new("in progress").fg(Color::DarkGrey)
        };
        _ = table.add_row(vec![
            Cell::new(&item.goal.name),
            Cell::new(format::currency(item.goal.current_amount)),
            Cell::new(format::currency(item.goal.target_amount)),
            Cell::new(format!("{:.0}%", item.percentage)),
            status,
        ]);
    }
    table
}

/// Prints transactions in a table.
fn print_transactions(txs: &[Transaction]) -> io::Result<ExitCode> {
    let mut out = io::stdout().lock();
    if txs.is_empty() {
        writeln!(out, "{}", "No transactions found.".dimmed())?;
        return Ok(ExitCode::SUCCESS);
    }
    writeln!(
        out,
        "{} {}",
        "Transactions".green().bold(),
        format_args!("({})", txs.len()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{}", transactions_table(txs))?;
    Ok(ExitCode::SUCCESS)
}

/// Prints the dashboard: totals, recent transactions, budgets and goals.
fn print_dashboard(view: &Dashboard, badge: Option<usize>) -> io::Result<ExitCode> {
    let mut out = io::stdout().lock();
    write!(out, "{}", "Dashboard".green().bold())?;
    if let Some(count) = badge
        && count > 0
    {
        write!(out, " {}", format_args!("[{count} pending bills]").yellow())?;
    }
    writeln!(out)?;
    writeln!(out)?;
    write_totals(&mut out, &view.totals)?;

    writeln!(out)?;
    writeln!(out, "{}", "Recent transactions".bold())?;
    if view.recent.is_empty() {
        writeln!(out, "{}", "No transactions yet.".dimmed())?;
    } else {
        writeln!(out, "{}", transactions_table(&view.recent))?;
    }

    if !view.budgets.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", "Budgets".bold())?;
        writeln!(out, "{}", budgets_table(&view.budgets))?;
    }
    if !view.goals.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", "Goals".bold())?;
        writeln!(out, "{}", goals_table(&view.goals))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Prints budget progress in a table.
fn print_budgets(progress: &[BudgetProgress]) -> io::Result<ExitCode> {
    let mut out = io::stdout().lock();
    if progress.is_empty() {
        writeln!(out, "{}", "No budgets found.".dimmed())?;
        return Ok(ExitCode::SUCCESS);
    }
    writeln!(out, "{}", "Budgets".green().bold())?;
    writeln!(out)?;
    writeln!(out, "{}", budgets_table(progress))?;
    Ok(ExitCode::SUCCESS)
}

/// Prints goal progress in a table.
fn print_goals(progress: &[GoalProgress]) -> io::Result<ExitCode> {
    let mut out = io::stdout().lock();
    if progress.is_empty() {
        writeln!(out, "{}", "No goals found.".dimmed())?;
        return Ok(ExitCode::SUCCESS);
    }
    writeln!(out, "{}", "Goals".green().bold())?;
    writeln!(out)?;
    writeln!(out, "{}", goals_table(progress))?;
    Ok(ExitCode::SUCCESS)
}

/// Prints unpaid bills in a table.
fn print_bills(pending: &[PendingBill], badge: Option<usize>) -> io::Result<ExitCode> {
    let mut out = io::stdout().lock();
    if pending.is_empty() {
        writeln!(out, "{}", "No pending bills.".dimmed())?;
        return Ok(ExitCode::SUCCESS);
    }

    let mut table = new_table(&["Due", "Bill", "Amount", "Status", "ID"]);
    for item in pending {
        let status = if item.overdue {
            Cell::new("overdue").fg(Color::Red)
        } else {
            Cell::new("pending").fg(Color::Yellow)
        };
        _ = table.add_row(vec![
            Cell::new(format::date(item.bill.due_date)),
            Cell::new(&item.bill.name),
            Cell::new(format::currency(item.bill.amount)),
            status,
            Cell::new(&item.bill.id).fg(Color::DarkGrey),
        ]);
    }

    write!(out, "{}", "Pending bills".green().bold())?;
    match badge {
        Some(count) => writeln!(out, " {}", format_args!("({count})").dimmed())?,
        None => writeln!(out, " {}", "(notifications off)".dimmed())?,
    }
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(ExitCode::SUCCESS)
}

/// Builds the category catalog table.
fn categories_table(categories: &[Category]) -> Table {
    let mut table = new_table(&["Name", "Type", "Icon"]);
    for category in categories {
        _ = table.add_row(vec![
            Cell::new(&category.name),
            Cell::new(category.kind),
            Cell::new(category.icon).fg(Color::DarkGrey),
        ]);
    }
    table
}

/// Prints the category catalog.
fn print_categories(categories: &[Category]) -> io::Result<ExitCode> {
    let mut out = io::stdout().lock();
    writeln!(out, "{}", "Categories".green().bold())?;
    writeln!(out)?;
    writeln!(out, "{}", categories_table(categories))?;
    Ok(ExitCode::SUCCESS)
}

/// Entry point.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            // stderr itself may be gone; nothing left to report to.
            let _ignored = writeln!(io::stderr(), "fatal I/O error: {err}");
            ExitCode::FAILURE
        }
    }
}
