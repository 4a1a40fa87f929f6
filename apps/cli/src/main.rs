use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use indicatif::ProgressBar;
use output::{OutputFormat, Renderer};
use progress::spinner;
use settings::Settings;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use trending_client::{ClientConfig, Since, TrendingClient};
use trending_core::{bootstrap, DashboardConfig, SourceMode};
use trending_server::{run_server, ServerConfig};

#[derive(Debug, Parser, Clone)]
#[command(
    name = "trending",
    version,
    about = "Scrape GitHub trending listings and track what keeps trending."
)]
struct Cli {
    /// TOML file with default settings. `TRENDING_*` environment variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Preferred renderer for command output.
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,
    /// Disable ANSI colors in log output.
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable progress indicators.
    #[arg(long, global = true)]
    no_progress: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand, Clone)]
enum Command {
    /// Serve `GET /api/trending` over HTTP.
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        /// Origin to scrape instead of https://github.com.
        #[arg(long)]
        github_base: Option<String>,
    },
    /// Scrape one trending listing and print it.
    Fetch {
        #[arg(long, default_value = "python")]
        language: String,
        /// daily, weekly or monthly.
        #[arg(long, default_value = "daily")]
        since: String,
        #[arg(long)]
        github_base: Option<String>,
    },
    /// Load every window for a set of languages and print the dashboard.
    Dashboard {
        /// Comma separated language slugs.
        #[arg(long, value_delimiter = ',')]
        languages: Vec<String>,
        /// Only show repositories whose name, owner or description contains this.
        #[arg(long)]
        search: Option<String>,
        /// Scrape GitHub in-process instead of calling a running server.
        #[arg(long)]
        direct: bool,
        #[arg(long)]
        backend_url: Option<String>,
        #[arg(long)]
        github_base: Option<String>,
        #[arg(long)]
        cache_ttl_secs: Option<i64>,
    },
    /// List the languages offered by the dashboard.
    Languages,
    /// Generate shell completion scripts.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    fn progress_enabled(&self) -> bool {
        !self.no_progress
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let settings = settings::load(cli.config.as_deref())?;
    let renderer = Renderer::new(cli.format);

    match cli.command.clone() {
        Command::Serve {
            host,
            port,
            github_base,
        } => {
            let mut config = server_config(&settings);
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(base) = github_base {
                config.client.base_url = base;
            }
            run_server(config).await
        }
        Command::Fetch {
            language,
            since,
            github_base,
        } => {
            let mut client_config = client_config(&settings);
            if let Some(base) = github_base {
                client_config.base_url = base;
            }
            handle_fetch(&cli, &renderer, client_config, &language, &since).await
        }
        Command::Dashboard {
            languages,
            search,
            direct,
            backend_url,
            github_base,
            cache_ttl_secs,
        } => {
            let mut settings = settings.clone();
            if !languages.is_empty() {
                settings.languages = languages;
            }
            if let Some(url) = backend_url {
                settings.backend_url = url;
            }
            if let Some(base) = github_base {
                settings.github_base = base;
            }
            if let Some(secs) = cache_ttl_secs {
                settings.cache_ttl_secs = secs;
            }
            let config = dashboard_config(&settings, direct);
            handle_dashboard(&cli, &renderer, config, search.as_deref()).await
        }
        Command::Languages => {
            renderer.print(&renderer.languages(trending_core::languages::SUPPORTED_LANGUAGES)?);
            Ok(())
        }
        Command::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "trending", &mut std::io::stdout());
            Ok(())
        }
    }
}

async fn handle_fetch(
    cli: &Cli,
    renderer: &Renderer,
    config: ClientConfig,
    language: &str,
    since: &str,
) -> Result<()> {
    let since = since.parse::<Since>().context("invalid --since value")?;
    let client = TrendingClient::with_config(config).context("failed to build trending scraper")?;

    let spinner = spinner(
        cli.progress_enabled(),
        format!("Scraping {language} ({since})..."),
    );
    let result = client.fetch_response(language, since).await;
    finish_spinner(spinner, None);

    let response = result.with_context(|| format!("failed to fetch trending {language}"))?;
    info!(
        target: "trending_cli",
        language,
        %since,
        count = response.repositories.len(),
        "fetched trending listing"
    );
    renderer.print(&renderer.trending(&response)?);
    Ok(())
}

async fn handle_dashboard(
    cli: &Cli,
    renderer: &Renderer,
    config: DashboardConfig,
    search: Option<&str>,
) -> Result<()> {
    let label = format!("Loading {}...", config.languages.join(", "));
    let dashboard = bootstrap(config).await?;

    let spinner = spinner(cli.progress_enabled(), label);
    dashboard.wait_idle().await;
    finish_spinner(spinner, None);

    let snapshot = dashboard.snapshot(search).await;
    renderer.print(&renderer.dashboard(&snapshot)?);
    Ok(())
}

fn client_config(settings: &Settings) -> ClientConfig {
    ClientConfig {
        base_url: settings.github_base.clone(),
        timeout: timeout(settings),
        ..ClientConfig::default()
    }
}

fn timeout(settings: &Settings) -> Option<std::time::Duration> {
    settings.timeout_secs.map(std::time::Duration::from_secs)
}

fn server_config(settings: &Settings) -> ServerConfig {
    ServerConfig {
        host: settings.host.clone(),
        port: settings.port,
        client: client_config(settings),
    }
}

fn dashboard_config(settings: &Settings, direct: bool) -> DashboardConfig {
    let source = if direct {
        SourceMode::Direct(client_config(settings))
    } else {
        SourceMode::Backend {
            url: settings.backend_url.clone(),
            timeout: timeout(settings),
        }
    };
    DashboardConfig {
        source,
        cache_ttl: time::Duration::seconds(settings.cache_ttl_secs),
        languages: settings.languages.clone(),
    }
}

fn init_tracing(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,trending=info"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .without_time()
        .with_ansi(!cli.no_color)
        .compact()
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow!("failed to initialize logging: {error}"))
}

fn finish_spinner(spinner: Option<ProgressBar>, message: Option<String>) {
    if let Some(progress) = spinner {
        if let Some(msg) = message {
            progress.finish_with_message(msg);
        } else {
            progress.finish_and_clear();
        }
    }
}

mod settings {
    use std::{collections::HashMap, path::Path};

    use anyhow::{Context, Result};
    use serde::Deserialize;
    use trending_client::GITHUB_BASE_URL;
    use trending_core::{languages::DEFAULT_LANGUAGES, DEFAULT_BACKEND_URL, DEFAULT_TTL};
    use trending_server::config::{DEFAULT_HOST, DEFAULT_PORT};

    pub const ENV_PREFIX: &str = "TRENDING";

    /// Values shared by every subcommand before flags are applied.
    #[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
    #[serde(default)]
    pub struct Settings {
        pub host: String,
        pub port: u16,
        pub github_base: String,
        pub backend_url: String,
        pub cache_ttl_secs: i64,
        pub languages: Vec<String>,
        pub timeout_secs: Option<u64>,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
                github_base: GITHUB_BASE_URL.to_string(),
                backend_url: DEFAULT_BACKEND_URL.to_string(),
                cache_ttl_secs: DEFAULT_TTL.whole_seconds(),
                languages: DEFAULT_LANGUAGES.iter().map(ToString::to_string).collect(),
                timeout_secs: None,
            }
        }
    }

    pub fn load(path: Option<&Path>) -> Result<Settings> {
        load_with_env(path, None)
    }

    /// Layer the optional file under `TRENDING_*` variables. `env` replaces the
    /// process environment when given.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Settings> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let environment = config::Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("languages")
            .source(env);

        builder
            .add_source(environment)
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }
}

mod output {
    use std::fmt::Write;

    use anyhow::Result;
    use clap::ValueEnum;
    use serde_json::json;
    use trending_client::{trending_url, Repository, Since, TrendingResponse, GITHUB_BASE_URL};
    use trending_core::{
        languages::Language,
        services::{tier, ConsistencyTier},
        DashboardSnapshot, WindowSlot,
    };

    #[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
    pub enum OutputFormat {
        Json,
        Table,
        Text,
    }

    #[derive(Copy, Clone, Debug)]
    pub struct Renderer {
        format: OutputFormat,
    }

    impl Renderer {
        pub fn new(format: OutputFormat) -> Self {
            Self { format }
        }

        #[allow(clippy::unused_self)]
        pub fn print(&self, rendered: &str) {
            print!("{rendered}");
        }

        pub fn trending(&self, response: &TrendingResponse) -> Result<String> {
            let mut out = String::new();
            match self.format {
                OutputFormat::Json => {
                    writeln!(out, "{}", serde_json::to_string_pretty(response)?)?;
                }
                OutputFormat::Table => {
                    let rows: Vec<Vec<String>> = response
                        .repositories
                        .iter()
                        .map(|repo| {
                            vec![
                                repo.key(),
                                repo.language.clone(),
                                repo.stars.to_string(),
                                repo.forks.to_string(),
                                repo.stars_today.to_string(),
                            ]
                        })
                        .collect();
                    render_table(
                        &mut out,
                        &["Repository", "Language", "Stars", "Forks", "Today"],
                        &rows,
                    )?;
                }
                OutputFormat::Text => {
                    writeln!(
                        out,
                        "{} trending {} ({})  {}",
                        response.repositories.len(),
                        response.language,
                        response.since.label(),
                        trending_url(GITHUB_BASE_URL, &response.language, response.since)
                    )?;
                    for (idx, repo) in response.repositories.iter().enumerate() {
                        write_repository(&mut out, idx + 1, repo, None)?;
                    }
                }
            }
            Ok(out)
        }

        pub fn dashboard(&self, snapshot: &DashboardSnapshot) -> Result<String> {
            let mut out = String::new();
            if self.format == OutputFormat::Json {
                writeln!(out, "{}", serde_json::to_string_pretty(snapshot)?)?;
                return Ok(out);
            }

            for view in &snapshot.languages {
                writeln!(out, "{}", view.display_name)?;
                let scores = snapshot.consistency.get(&view.language);
                for since in Since::ALL {
                    let slot = view.data.slot(since);
                    write_window(&mut out, &view.language, since, slot, |repo| {
                        scores
                            .and_then(|scores| scores.get(&repo.key()))
                            .map_or(ConsistencyTier::Normal, |score| tier(*score))
                    })?;
                }
                writeln!(out)?;
            }

            let stats = snapshot.stats;
            match &snapshot.search {
                Some(term) => writeln!(
                    out,
                    "Showing {} of {} repositories matching \"{term}\"",
                    snapshot.filtered_repositories, snapshot.total_repositories
                )?,
                None => writeln!(out, "{} repositories", snapshot.total_repositories)?,
            }
            writeln!(
                out,
                "Super trending: {}  Trending: {}  Normal: {}  Stars today: {}",
                stats.super_trending, stats.trending, stats.normal, snapshot.stars_today
            )?;
            Ok(out)
        }

        pub fn languages(&self, languages: &[Language]) -> Result<String> {
            let mut out = String::new();
            match self.format {
                OutputFormat::Json => {
                    let payload = json!({ "languages": languages });
                    writeln!(out, "{}", serde_json::to_string_pretty(&payload)?)?;
                }
                OutputFormat::Table => {
                    let rows: Vec<Vec<String>> = languages
                        .iter()
                        .map(|language| {
                            vec![language.display_name.to_string(), language.value.to_string()]
                        })
                        .collect();
                    render_table(&mut out, &["Language", "Value"], &rows)?;
                }
                OutputFormat::Text => {
                    for language in languages {
                        writeln!(out, "{:<14} {}", language.display_name, language.value)?;
                    }
                }
            }
            Ok(out)
        }
    }

    /// Window heading followed by its rows. The heading links to the listing on GitHub.
    fn write_window<F>(
        out: &mut String,
        language: &str,
        since: Since,
        slot: &WindowSlot,
        tier_of: F,
    ) -> Result<()>
    where
        F: Fn(&Repository) -> ConsistencyTier,
    {
        let url = trending_url(GITHUB_BASE_URL, language, since);
        if slot.loading {
            writeln!(out, "  {} (loading)  {url}", since.label())?;
            return Ok(());
        }
        if let Some(error) = &slot.error {
            writeln!(out, "  {}  {url}", since.label())?;
            writeln!(out, "    ! {error}")?;
            return Ok(());
        }

        writeln!(out, "  {} ({})  {url}", since.label(), slot.repositories.len())?;
        if slot.repositories.is_empty() {
            writeln!(out, "    No repositories found")?;
        }
        for (idx, repo) in slot.repositories.iter().enumerate() {
            write_repository(out, idx + 1, repo, tier_of(repo).badge())?;
        }
        Ok(())
    }

    fn write_repository(
        out: &mut String,
        rank: usize,
        repo: &Repository,
        badge: Option<&str>,
    ) -> Result<()> {
        write!(
            out,
            "    {rank:>2}. {}  {} stars",
            repo.key(),
            repo.stars
        )?;
        if repo.stars_today > 0 {
            write!(out, "  +{} today", repo.stars_today)?;
        }
        if let Some(badge) = badge {
            write!(out, "  [{badge}]")?;
        }
        writeln!(out)?;
        if !repo.description.is_empty() {
            writeln!(out, "        {}", truncate(&repo.description, 100))?;
        }
        Ok(())
    }

    fn render_table(out: &mut String, headers: &[&str], rows: &[Vec<String>]) -> Result<()> {
        let mut widths: Vec<usize> = headers.iter().map(|header| header.len()).collect();
        for row in rows {
            for (idx, cell) in row.iter().enumerate() {
                widths[idx] = widths[idx].max(cell.chars().count());
            }
        }

        fn render_line(out: &mut String, columns: &[&str], widths: &[usize]) -> Result<()> {
            for (idx, value) in columns.iter().enumerate() {
                let width = widths[idx];
                write!(out, "| {value:width$} ")?;
            }
            writeln!(out, "|")?;
            Ok(())
        }

        render_line(out, headers, &widths)?;
        let separator: String = widths
            .iter()
            .map(|width| format!("|{:-^1$}", "", width + 2))
            .collect();
        writeln!(out, "{separator}|")?;

        for row in rows {
            let cols: Vec<&str> = row.iter().map(String::as_str).collect();
            render_line(out, &cols, &widths)?;
        }
        Ok(())
    }

    fn truncate(value: &str, max: usize) -> String {
        if value.chars().count() <= max {
            value.to_string()
        } else {
            let mut truncated = value
                .chars()
                .take(max.saturating_sub(1))
                .collect::<String>();
            truncated.push('…');
            truncated
        }
    }

    #[cfg(test)]
    mod tests {
        use std::collections::HashMap;

        use time::macros::datetime;
        use trending_core::{
            services::ConsistencyStats, state::FETCH_FAILED_MESSAGE, LanguageData, LanguageView,
        };

        use super::*;

        fn repo(name: &str, stars_today: u64) -> Repository {
            Repository {
                owner: "octo".to_string(),
                name: name.to_string(),
                description: format!("{name} does things"),
                url: format!("https://github.com/octo/{name}"),
                language: "Rust".to_string(),
                stars: 1200,
                forks: 30,
                stars_today,
                built_by: vec![],
            }
        }

        fn snapshot() -> DashboardSnapshot {
            let mut data = LanguageData::pending();
            data.daily.loaded(vec![repo("cat", 40), repo("dog", 0)]);
            data.weekly.loaded(vec![repo("cat", 0)]);
            data.monthly.failed(FETCH_FAILED_MESSAGE);

            let scores = HashMap::from([("octo/cat".to_string(), 2), ("octo/dog".to_string(), 1)]);
            DashboardSnapshot {
                epoch: 1,
                search: None,
                languages: vec![LanguageView {
                    language: "rust".to_string(),
                    display_name: "Rust".to_string(),
                    data,
                }],
                consistency: HashMap::from([("rust".to_string(), scores)]),
                stats: ConsistencyStats {
                    super_trending: 0,
                    trending: 1,
                    normal: 1,
                },
                total_repositories: 3,
                filtered_repositories: 3,
                stars_today: 40,
            }
        }

        #[test]
        fn text_dashboard_shows_badges_and_errors() {
            let rendered = Renderer::new(OutputFormat::Text)
                .dashboard(&snapshot())
                .unwrap();

            assert!(rendered.starts_with("Rust\n"));
            assert!(rendered.contains(
                "  Today (2)  https://github.com/trending/rust?since=daily\n"
            ));
            assert!(rendered.contains("octo/cat  1200 stars  +40 today  [Trending]"));
            assert!(rendered.contains("octo/dog  1200 stars\n"));
            assert!(rendered.contains(
                "  This Month  https://github.com/trending/rust?since=monthly\n    ! Failed to fetch repositories\n"
            ));
            assert!(rendered.contains("  This Week (1)  https://github.com/trending/rust?since=weekly\n"));
            assert!(rendered.contains("3 repositories\n"));
            assert!(rendered.contains("Trending: 1"));
        }

        #[test]
        fn text_dashboard_reports_search_counts() {
            let mut snapshot = snapshot();
            snapshot.search = Some("cat".to_string());
            snapshot.filtered_repositories = 2;

            let rendered = Renderer::new(OutputFormat::Text)
                .dashboard(&snapshot)
                .unwrap();
            assert!(rendered.contains("Showing 2 of 3 repositories matching \"cat\""));
        }

        #[test]
        fn json_dashboard_is_camel_case() {
            let rendered = Renderer::new(OutputFormat::Json)
                .dashboard(&snapshot())
                .unwrap();
            let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
            assert_eq!(value["totalRepositories"], 3);
            assert_eq!(value["stats"]["superTrending"], 0);
            assert_eq!(value["languages"][0]["displayName"], "Rust");
        }

        #[test]
        fn trending_table_lists_every_repository() {
            let response = TrendingResponse {
                repositories: vec![repo("cat", 40), repo("dog", 0)],
                language: "rust".to_string(),
                since: Since::Weekly,
                last_updated: datetime!(2024-03-01 12:00 UTC),
            };
            let rendered = Renderer::new(OutputFormat::Table)
                .trending(&response)
                .unwrap();
            let lines: Vec<&str> = rendered.lines().collect();
            assert_eq!(lines.len(), 4);
            assert!(lines[0].starts_with("| Repository"));
            assert!(lines[2].contains("octo/cat"));
        }

        #[test]
        fn text_listing_links_to_github() {
            let response = TrendingResponse {
                repositories: vec![repo("cat", 40)],
                language: "c++".to_string(),
                since: Since::Monthly,
                last_updated: datetime!(2024-03-01 12:00 UTC),
            };
            let rendered = Renderer::new(OutputFormat::Text)
                .trending(&response)
                .unwrap();
            assert!(rendered.starts_with(
                "1 trending c++ (This Month)  https://github.com/trending/c%2B%2B?since=monthly\n"
            ));
        }

        #[test]
        fn truncates_on_char_boundaries() {
            assert_eq!(truncate("short", 10), "short");
            assert_eq!(truncate("ééééé", 3), "éé…");
        }
    }
}

mod progress {
    use std::time::Duration;

    use indicatif::{ProgressBar, ProgressStyle};

    pub fn spinner(message_enabled: bool, message: impl Into<String>) -> Option<ProgressBar> {
        if !message_enabled {
            return None;
        }
        let progress = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        progress.set_style(style);
        progress.set_message(message.into());
        progress.enable_steady_tick(Duration::from_millis(80));
        Some(progress)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, io::Write};

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
                .collect(),
        )
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn dashboard_languages_split_on_commas() {
        let cli = Cli::parse_from(["trending", "dashboard", "--languages", "rust,go", "--direct"]);
        match cli.command {
            Command::Dashboard {
                languages, direct, ..
            } => {
                assert_eq!(languages, vec!["rust", "go"]);
                assert!(direct);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn settings_default_without_sources() {
        let settings = settings::load_with_env(None, env(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.cache_ttl_secs, 900);
        assert_eq!(settings.languages, vec!["python", "typescript"]);
    }

    #[test]
    fn environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "port = 4000\nbackend_url = \"http://file:3000\"\nlanguages = [\"go\"]"
        )
        .unwrap();

        let settings = settings::load_with_env(
            Some(file.path()),
            env(&[
                ("TRENDING_BACKEND_URL", "http://env:3000"),
                ("TRENDING_LANGUAGES", "rust,zig"),
                ("TRENDING_CACHE_TTL_SECS", "60"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.port, 4000);
        assert_eq!(settings.backend_url, "http://env:3000");
        assert_eq!(settings.languages, vec!["rust", "zig"]);
        assert_eq!(settings.cache_ttl_secs, 60);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(settings::load_with_env(Some(&path), env(&[])).is_err());
    }

    #[test]
    fn backend_mode_defaults_to_no_timeout() {
        let config = dashboard_config(&Settings::default(), false);
        assert_eq!(config.source, SourceMode::default());
        assert_eq!(config.languages, vec!["python", "typescript"]);
    }

    #[test]
    fn settings_map_onto_component_configs() {
        let settings = Settings {
            github_base: "http://127.0.0.1:4000".to_string(),
            timeout_secs: Some(5),
            cache_ttl_secs: 120,
            ..Settings::default()
        };

        let server = server_config(&settings);
        assert_eq!(server.client.base_url, "http://127.0.0.1:4000");
        assert_eq!(server.client.timeout, Some(std::time::Duration::from_secs(5)));

        let backend = dashboard_config(&settings, false);
        assert_eq!(
            backend.source,
            SourceMode::Backend {
                url: settings.backend_url.clone(),
                timeout: Some(std::time::Duration::from_secs(5)),
            }
        );
        assert_eq!(backend.cache_ttl, time::Duration::minutes(2));

        let direct = dashboard_config(&settings, true);
        assert!(matches!(direct.source, SourceMode::Direct(config) if config.base_url == "http://127.0.0.1:4000"));
    }
}
