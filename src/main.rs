use std::net::SocketAddr;
use std::process;

use axum::Router;
use clap::{Parser, Subcommand};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use vreport::api::{build_api_router, ApiState};
use vreport::capacity::{parse_utilization, remaining_capacity, MAX_UTILIZATION_PCT};
use vreport::config::{self, DEFAULT_API_PORT, DEFAULT_HOST, DEFAULT_PORT};
use vreport::dashboard::build_app;
use vreport::models::AppState;
use vreport::routes::RouteTable;
use vreport::shell::{Credentials, SessionShell, SessionState};
use vreport::util::value_to_cell;
use vreport::vcenter::{build_http_client, VcenterClient};

fn exit_with(msg: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("{}: {}", yansi::Paint::new(msg).red(), err);
    process::exit(1);
}

fn shell_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(format!("vreport/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| exit_with("Failed to create HTTP client", e))
}

fn build_dashboard_state(env_file: Option<&str>, backend_url: Option<String>) -> AppState {
    config::load_env_file(env_file);
    let backend_url = backend_url
        .map(|u| config::sanitize_base_url(&u))
        .unwrap_or_else(config::get_backend_url);
    AppState::new(
        RouteTable::default_table(),
        SessionShell::new(shell_client(), &backend_url),
    )
}

fn build_api_state(env_file: Option<&str>) -> ApiState {
    config::load_env_file(env_file);
    let client = build_http_client().unwrap_or_else(|e| exit_with("Failed to create HTTP client", e));
    ApiState::new(
        VcenterClient::new(client, &config::get_vcenter_scheme()),
        config::get_vcenter_server(),
    )
}

async fn start_server(app: Router, host: &str, port: u16, label: &str) {
    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            exit_with("Invalid host/port format", e);
        }
    };
    tracing::info!(%addr, label, "Starting server");
    println!(
        "{} {} {}",
        yansi::Paint::new(label).green(),
        yansi::Paint::new("running on").green(),
        yansi::Paint::new(format!("http://{}", addr)).cyan()
    );
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(%e, "Server encountered an error while running");
                exit_with("Server error", e);
            }
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!(
                "{}: {}\n{}",
                yansi::Paint::new(format!("Failed to bind to {}", addr)).red(),
                e,
                yansi::Paint::new("Stop any process using this port, or pass a different --port value.").yellow()
            );
            process::exit(1);
        }
    }
}

async fn serve_dashboard(
    host: &str,
    port: u16,
    env_file: Option<&str>,
    backend_url: Option<String>,
    stylesheet: Option<String>,
) {
    let mut state = build_dashboard_state(env_file, backend_url);
    if let Some(path) = stylesheet {
        match std::fs::read_to_string(&path) {
            Ok(css) => {
                state.custom_css = Some(css);
                tracing::info!("Loaded custom stylesheet from {}", path);
            }
            Err(e) => {
                tracing::error!(%e, "Failed to read custom stylesheet");
                exit_with(&format!("Failed to read custom stylesheet at {}", path), e);
            }
        }
    }
    tracing::info!(backend = %state.shell.backend_url(), "Dashboard talks to report API");
    start_server(build_app(state), host, port, "Dashboard").await;
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table
}

fn print_overview(value: &serde_json::Value) {
    match value {
        serde_json::Value::Object(obj) => {
            let mut table = new_table();
            table.set_header(vec!["Field", "Value"]);
            for (k, v) in obj {
                table.add_row(vec![k.clone(), value_to_cell(v)]);
            }
            println!("\n{table}\n");
        }
        other => println!("{}", serde_json::to_string_pretty(other).unwrap_or_default()),
    }
}

#[derive(Parser)]
#[command(
    name = "vreport",
    author,
    version,
    about = "vCenter report dashboard",
    long_about = r#"vreport — log in to vCenter and browse a summary of the managed environment.

Two servers make up the product: the report API (`vreport api`) talks to vCenter,
and the dashboard (`vreport serve`) renders the pages and logs in through the API.

Examples:
  1) Run both locally:
      vreport api --port 8000
      vreport serve --port 8080 --backend-url http://127.0.0.1:8000
  2) Log in from the terminal:
      vreport login --server vc.example.com --username admin --password secret
  3) Remaining capacity below the 85% ceiling:
      vreport capacity cpu=40 memory=90
"#,
    after_help = "Use `vreport <subcommand> --help` to get subcommand specific options."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response logging
    #[arg(long, global = true)]
    silent: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the dashboard web server
    Serve {
        /// Host to bind to
        #[arg(long, default_value_t = String::from(DEFAULT_HOST))]
        host: String,
        /// Port to bind to
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
        /// Report API base URL (overrides BACKEND_URL)
        #[arg(long)]
        backend_url: Option<String>,
        /// Path to a custom stylesheet to serve instead of the default
        #[arg(long)]
        stylesheet: Option<String>,
    },
    /// Start the report API that proxies logins and overview requests to vCenter
    Api {
        #[arg(long, default_value_t = String::from(DEFAULT_HOST))]
        host: String,
        #[arg(long, default_value_t = DEFAULT_API_PORT)]
        port: u16,
        #[arg(long)]
        env_file: Option<String>,
    },
    /// Log in through the report API and print the overview
    #[command(long_about = "Run the same login flow as the dashboard's login form and print the overview payload the report API returns.")]
    Login {
        #[arg(long)]
        server: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        backend_url: Option<String>,
        #[arg(long)]
        env_file: Option<String>,
    },
    /// List the dashboard routes
    Routes,
    /// Compute remaining capacity from resource=percent pairs
    Capacity {
        /// Utilization entries such as cpu=40 memory=90
        #[arg(required = true)]
        entries: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }
    if cli.silent {
        vreport::shell::set_silent(true);
    }

    let Some(command) = cli.command else {
        serve_dashboard(DEFAULT_HOST, DEFAULT_PORT, None, None, None).await;
        return;
    };

    match command {
        Commands::Serve {
            host,
            port,
            env_file,
            backend_url,
            stylesheet,
        } => {
            serve_dashboard(&host, port, env_file.as_deref(), backend_url, stylesheet).await;
        }
        Commands::Api {
            host,
            port,
            env_file,
        } => {
            let state = build_api_state(env_file.as_deref());
            start_server(build_api_router(state), &host, port, "Report API").await;
        }
        Commands::Login {
            server,
            username,
            password,
            backend_url,
            env_file,
        } => {
            let state = build_dashboard_state(env_file.as_deref(), backend_url);
            let mut session = SessionState::default();
            let result = state
                .shell
                .login(&mut session, Credentials::new(&server, &username, &password))
                .await;
            if let Err(e) = result {
                exit_with("Login", e);
            }
            println!("{} {}@{}", yansi::Paint::new("Logged in as").green(), username, server);
            if let Some(overview) = &session.overview {
                print_overview(overview.as_value());
            }
        }
        Commands::Routes => {
            let table_data = RouteTable::default_table();
            let mut table = new_table();
            table.set_header(vec!["Path", "Name", "Page"]);
            for entry in table_data.entries() {
                table.add_row(vec![entry.path.clone(), entry.name.clone(), entry.page.to_string()]);
            }
            println!("\n{table}\n");
        }
        Commands::Capacity { entries } => {
            let utilization = parse_utilization(&entries).unwrap_or_else(|e| exit_with("Capacity", e));
            let remaining = remaining_capacity(&utilization);
            let mut table = new_table();
            table.set_header(vec!["Resource", "Used %", "Remaining %"]);
            for (resource, used) in &utilization {
                let left = remaining.get(resource).copied().unwrap_or_default();
                table.add_row(vec![resource.clone(), format!("{:.1}", used), format!("{:.1}", left)]);
            }
            println!("\n{table}");
            println!(
                "{}\n",
                yansi::Paint::new(format!("Ceiling: {}% utilization", MAX_UTILIZATION_PCT)).dim()
            );
        }
    }
}
