//! Best-effort season stat loading for the comparison game.
//!
//! Players are looked up in small concurrent batches. Each lookup may fail
//! on its own; a failure only removes that player from the result. The load
//! as a whole fails only on timeout or when too few players remain.

use crate::error::{FetchError, LoadError};
use crate::profile::SportProfile;
use crate::schema::Record;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

const MLB_STATS_API: &str = "https://statsapi.mlb.com/api/v1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichOptions {
    pub batch_size: usize,
    pub batch_pause_ms: u64,
    pub load_timeout_ms: u64,
    pub min_active: usize,
    pub season: u16,
    pub min_at_bats: u32,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            batch_size: 5,
            batch_pause_ms: 100,
            load_timeout_ms: 10_000,
            min_active: 10,
            season: 2025,
            min_at_bats: 10,
        }
    }
}

impl EnrichOptions {
    #[must_use]
    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }

    #[must_use]
    pub fn batch_pause(&self) -> Duration {
        Duration::from_millis(self.batch_pause_ms)
    }
}

/// The roster entry a lookup starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRef {
    pub name: String,
    pub team: String,
    pub league: String,
}

impl PlayerRef {
    #[must_use]
    pub fn from_record(profile: &SportProfile, record: &Record) -> Self {
        Self {
            name: profile.identity(record).to_string(),
            team: profile.team(record).to_string(),
            league: record.text("League").to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeasonStats {
    pub avg: f64,
    pub home_runs: u32,
    pub rbi: u32,
    pub runs: u32,
    pub hits: u32,
    pub stolen_bases: u32,
    pub ops: f64,
    pub doubles: u32,
    pub at_bats: u32,
    pub games_played: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivePlayer {
    pub id: u64,
    pub name: String,
    pub team: String,
    pub league: String,
    pub stats: SeasonStats,
}

/// Where season stats come from.
pub trait StatSource: Send + Sync + 'static {
    /// `Ok(None)` means the player exists but has no qualifying season.
    fn fetch(
        &self,
        player: &PlayerRef,
    ) -> impl Future<Output = Result<Option<ActivePlayer>, FetchError>> + Send;
}

/// Look up every player, tolerating individual failures.
///
/// # Errors
/// `LoadError::Timeout` when the whole load exceeds the configured budget and
/// `LoadError::NotEnoughPlayers` when fewer than `min_active` players have stats.
pub async fn enrich_players<S: StatSource>(
    source: Arc<S>,
    players: Vec<PlayerRef>,
    options: &EnrichOptions,
) -> Result<Vec<ActivePlayer>, LoadError> {
    let budget = options.load_timeout();
    let active = tokio::time::timeout(budget, load_in_batches(source, players, options))
        .await
        .map_err(|_| LoadError::Timeout(budget))?;

    if active.len() < options.min_active {
        return Err(LoadError::NotEnoughPlayers {
            found: active.len(),
            required: options.min_active,
        });
    }
    log::info!("Loaded {} season stats for {} active players", options.season, active.len());
    Ok(active)
}

async fn load_in_batches<S: StatSource>(
    source: Arc<S>,
    players: Vec<PlayerRef>,
    options: &EnrichOptions,
) -> Vec<ActivePlayer> {
    let total = players.len();
    let batch_size = options.batch_size.max(1);
    let mut active = Vec::new();
    let mut failed = 0;

    for (batch_index, batch) in players.chunks(batch_size).enumerate() {
        let mut tasks = JoinSet::new();
        for (offset, player) in batch.iter().cloned().enumerate() {
            let source = Arc::clone(&source);
            tasks.spawn(async move {
                let result = source.fetch(&player).await;
                (offset, player.name, result)
            });
        }

        let mut settled = Vec::with_capacity(batch.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => settled.push(outcome),
                Err(e) => {
                    failed += 1;
                    log::warn!("Stat lookup task failed: {e}");
                }
            }
        }
        settled.sort_by_key(|(offset, _, _)| *offset);

        for (_, name, result) in settled {
            match result {
                Ok(Some(player)) => active.push(player),
                Ok(None) => log::debug!("No qualifying {} stats for {name}", options.season),
                Err(e) => {
                    failed += 1;
                    log::warn!("Failed to fetch stats for {name}: {e}");
                }
            }
        }

        let processed = ((batch_index + 1) * batch_size).min(total);
        log::info!(
            "Loading stats... {processed}/{total} players processed. Found {} active players.",
            active.len()
        );
        if processed < total {
            tokio::time::sleep(options.batch_pause()).await;
        }
    }

    log::info!(
        "Successfully loaded stats for {} players, {failed} failed",
        active.len()
    );
    active
}

/// MLB Stats API client.
#[derive(Debug, Clone)]
pub struct HttpStatSource {
    client: reqwest::Client,
    base_url: String,
    season: u16,
    min_at_bats: u32,
}

impl HttpStatSource {
    #[must_use]
    pub fn new(options: &EnrichOptions) -> Self {
        Self::with_base_url(MLB_STATS_API, options)
    }

    #[must_use]
    pub fn with_base_url(base_url: &str, options: &EnrichOptions) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            season: options.season,
            min_at_bats: options.min_at_bats,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

impl StatSource for HttpStatSource {
    async fn fetch(&self, player: &PlayerRef) -> Result<Option<ActivePlayer>, FetchError> {
        let search: PeopleSearch = self
            .get_json(
                &format!("{}/people/search", self.base_url),
                &[("names", player.name.as_str())],
            )
            .await?;
        let Some(person) = search.people.first() else {
            return Ok(None);
        };

        let season = self.season.to_string();
        let response: StatsResponse = self
            .get_json(
                &format!("{}/people/{}/stats", self.base_url, person.id),
                &[("stats", "season"), ("season", &season), ("group", "hitting")],
            )
            .await?;

        Ok(response
            .season_line()
            .filter(|line| line.at_bats >= self.min_at_bats)
            .map(|line| ActivePlayer {
                id: person.id,
                name: player.name.clone(),
                team: player.team.clone(),
                league: player.league.clone(),
                stats: SeasonStats::from(line),
            }))
    }
}

#[derive(Debug, Deserialize)]
struct PeopleSearch {
    #[serde(default)]
    people: Vec<Person>,
}

#[derive(Debug, Deserialize)]
struct Person {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct StatsResponse {
    #[serde(default)]
    stats: Vec<StatGroup>,
}

impl StatsResponse {
    fn season_line(&self) -> Option<&HittingLine> {
        self.stats
            .first()
            .and_then(|group| group.splits.first())
            .map(|split| &split.stat)
    }
}

#[derive(Debug, Deserialize)]
struct StatGroup {
    #[serde(default)]
    splits: Vec<Split>,
}

#[derive(Debug, Deserialize)]
struct Split {
    stat: HittingLine,
}

/// Rate stats arrive as strings such as `".312"`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct HittingLine {
    avg: Option<String>,
    home_runs: u32,
    rbi: u32,
    runs: u32,
    hits: u32,
    stolen_bases: u32,
    ops: Option<String>,
    doubles: u32,
    at_bats: u32,
    games_played: u32,
}

fn rate(value: Option<&String>) -> f64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0.0)
}

impl From<&HittingLine> for SeasonStats {
    fn from(line: &HittingLine) -> Self {
        Self {
            avg: rate(line.avg.as_ref()),
            home_runs: line.home_runs,
            rbi: line.rbi,
            runs: line.runs,
            hits: line.hits,
            stolen_bases: line.stolen_bases,
            ops: rate(line.ops.as_ref()),
            doubles: line.doubles,
            at_bats: line.at_bats,
            games_played: line.games_played,
        }
    }
}
