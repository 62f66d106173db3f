use anyhow::Context;
use checkin_admin_frontend::{
    api::{ApiClient, ExportKind},
    components::table::{render_text, TableView},
    config::Config,
    pages::{render_attendance_page, render_leave_page, ExportForm},
    state::{
        filters::{DateType, FilterState, QuickFilter},
        session::{LoginForm, Session},
        Dashboard, Tab,
    },
    utils::time::today_in_tz,
};
use clap::{Args, Parser, Subcommand};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "checkin-admin", version, about = "Attendance and leave admin dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show attendance events with daily and monthly worked hours.
    Attendance {
        #[command(flatten)]
        filters: FilterArgs,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Show leave requests.
    Leave {
        #[command(flatten)]
        filters: FilterArgs,
        /// Date field the filter applies to.
        #[arg(long)]
        date_type: Option<DateType>,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Print the Excel download link for a month.
    Export {
        #[arg(long)]
        kind: ExportKind,
        #[arg(long)]
        month: Option<u32>,
        #[arg(long)]
        year: Option<i32>,
        /// Tab whose filters a combined export follows.
        #[arg(long, default_value = "attendance")]
        tab: Tab,
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long)]
        date_type: Option<DateType>,
    },
}

#[derive(Debug, Args)]
struct FilterArgs {
    /// today, week, month, year or all.
    #[arg(long)]
    filter: Option<QuickFilter>,
    /// Start of an explicit range (YYYY-MM-DD).
    #[arg(long, requires = "to")]
    from: Option<String>,
    /// End of an explicit range (YYYY-MM-DD).
    #[arg(long, requires = "from")]
    to: Option<String>,
    #[arg(long)]
    search: Option<String>,
}

#[derive(Debug, Args)]
struct ViewArgs {
    /// Column header to click; repeat to cycle the order.
    #[arg(long = "sort")]
    sort: Vec<String>,
    #[arg(long, default_value_t = 1)]
    page: usize,
    #[arg(long)]
    page_size: Option<usize>,
    /// Print the page view model as JSON.
    #[arg(long)]
    json: bool,
}

fn apply_filter_args(
    filters: &mut FilterState,
    args: &FilterArgs,
    date_type: Option<DateType>,
) -> anyhow::Result<()> {
    if let Some(filter) = args.filter {
        filters.set_quick_filter(filter)?;
    }
    if let (Some(from), Some(to)) = (&args.from, &args.to) {
        filters.set_date_range(from, to)?;
    }
    if let Some(search) = &args.search {
        filters.set_search(search);
    }
    if let Some(date_type) = date_type {
        filters.set_date_type(date_type)?;
    }
    Ok(())
}

fn login_form() -> LoginForm {
    LoginForm::new(
        env::var("DASHBOARD_EMAIL").unwrap_or_default(),
        env::var("DASHBOARD_PASSWORD").unwrap_or_default(),
    )
}

async fn show_table(
    api: &ApiClient,
    dashboard: &mut Dashboard,
    tab: Tab,
    view: &ViewArgs,
) -> anyhow::Result<()> {
    dashboard.set_active_tab(tab);
    if let Some(outcome) = dashboard.login(api, &login_form()).await? {
        outcome.into_result().context("Failed to load records")?;
    }
    if let Some(session) = dashboard.session() {
        tracing::info!(role = ?session.role, "{}", session.greeting());
    }

    for column in &view.sort {
        dashboard.sort_by(column)?;
    }
    if let Some(page_size) = view.page_size {
        dashboard.set_page_size(page_size)?;
    }
    dashboard.goto_page(view.page);

    let rendered: TableView = match tab {
        Tab::Attendance => {
            let state = dashboard.attendance();
            render_attendance_page(&state.table.page(), state.table.sort_spec())
        }
        Tab::Leave => {
            let state = dashboard.leave();
            render_leave_page(&state.table.page(), state.table.sort_spec())
        }
    };
    if view.json {
        println!("{}", serde_json::to_string_pretty(&rendered)?);
    } else {
        print!("{}", render_text(&rendered));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "checkin_admin_frontend=info,checkin_admin=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    tracing::info!(
        api_base_url = %config.api_base_url,
        page_size = config.page_size,
        time_zone = %config.time_zone,
        "Loaded configuration from environment/.env"
    );

    let api = ApiClient::new(&config);
    let mut dashboard = Dashboard::new(&config);

    match cli.command {
        Command::Attendance { filters, view } => {
            apply_filter_args(dashboard.filters_mut(Tab::Attendance), &filters, None)?;
            show_table(&api, &mut dashboard, Tab::Attendance, &view).await
        }
        Command::Leave {
            filters,
            date_type,
            view,
        } => {
            apply_filter_args(dashboard.filters_mut(Tab::Leave), &filters, date_type)?;
            show_table(&api, &mut dashboard, Tab::Leave, &view).await
        }
        Command::Export {
            kind,
            month,
            year,
            tab,
            filters,
            date_type,
        } => {
            let filter_tab = match kind {
                ExportKind::Attendance => Tab::Attendance,
                ExportKind::Leave => Tab::Leave,
                ExportKind::Combined => tab,
            };
            apply_filter_args(dashboard.filters_mut(filter_tab), &filters, date_type)?;
            dashboard.set_active_tab(tab);

            let today = today_in_tz(&config.time_zone);
            let defaults = ExportForm::for_today(today);
            let form = ExportForm {
                kind: Some(kind),
                month: month.or(defaults.month),
                year: year.or(defaults.year),
            };
            let (kind, period) = form.validate()?;

            let request = login_form().validate()?;
            let response = api.login(&request).await?;
            dashboard.set_session(Session::from_login(&request, &response));

            let url = dashboard.export_url(&api, kind, period)?;
            println!("{}", url);
            Ok(())
        }
    }
}
