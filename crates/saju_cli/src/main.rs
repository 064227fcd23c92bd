use std::path::{Path, PathBuf};

use chrono::{Datelike, FixedOffset, NaiveDate, Utc};
use clap::{ArgGroup, Parser, Subcommand};
use saju_base::{
    Branch, InteractionSet, Stem, StemBranch, TenGod, hidden_stem_ten_gods, interactions, ten_god,
    year_stem_branch,
};
use saju_chart::{BirthInput, ChartEngine, ChartPayload, ChartRecord, compare_payload_json};
use saju_config::EngineConfig;
use saju_time::{parse_date, utc_offset_from_minutes};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "saju", about = "Four-pillar (saju) chart CLI")]
struct Cli {
    /// Engine configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// UTC offset of the birth clock in minutes (default 540, KST)
    #[arg(long, global = true, allow_hyphen_values = true)]
    utc_offset: Option<i32>,
    /// Solar-term boundary tolerance in minutes
    #[arg(long, global = true)]
    tolerance: Option<u32>,
    /// Almanac JSON overriding computed solar terms
    #[arg(long, global = true)]
    solar_terms: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full chart for a birth
    Chart {
        /// Birth date (YYYY-MM-DD or YYMMDD)
        #[arg(long)]
        date: String,
        /// Birth time (HH:MM); omit when unknown
        #[arg(long)]
        time: Option<String>,
        /// male | female
        #[arg(long)]
        gender: String,
        /// Print the full record as JSON
        #[arg(long)]
        json: bool,
        /// Print only the persisted payload as JSON
        #[arg(long, conflicts_with = "json")]
        payload: bool,
    },
    /// Yearly fortune window (21 years)
    Yearly {
        /// Birth date (YYYY-MM-DD or YYMMDD)
        #[arg(long)]
        date: String,
        /// Center year (default: current year)
        #[arg(long)]
        year: Option<i32>,
    },
    /// Combinations and clashes among stems, branches or pillars
    Interactions {
        /// Tokens such as 甲 子 or 甲子 (hanja or Korean)
        #[arg(required = true)]
        tokens: Vec<String>,
    },
    /// Solar-term instants for a year
    SolarTerms {
        #[arg(long)]
        year: i32,
        /// Only the twelve month-boundary terms
        #[arg(long)]
        boundary: bool,
    },
    /// Stem-branch pair by cycle index or year
    #[command(group(ArgGroup::new("which").required(true).args(["index", "year"])))]
    Pillar {
        /// Position in the 60-step cycle (any integer)
        #[arg(long, allow_hyphen_values = true)]
        index: Option<i64>,
        /// Calendar year (no 입춘 adjustment)
        #[arg(long)]
        year: Option<i32>,
    },
    /// Ten-god relation of a target stem or branch to a day stem
    TenGod {
        /// Day stem (甲 or 갑)
        day_stem: String,
        /// Target stem or branch
        target: String,
    },
    /// Compare two stored payload files
    Diff { a: PathBuf, b: PathBuf },
    /// Recompute a stored payload and report drift
    Verify { payload: PathBuf },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "saju=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Chart {
            date,
            time,
            gender,
            json,
            payload,
        } => {
            let engine = load_engine(&cli);
            let birth = require_birth(date, time.as_deref(), gender);
            let record = engine.compute_chart(&birth);
            if *json {
                print_json(&record);
            } else if *payload {
                print_json(&record.payload());
            } else {
                print_chart(&record);
            }
        }

        Commands::Yearly { date, year } => {
            let birth_date = require_date(date);
            let window_year = year.unwrap_or_else(|| Utc::now().year());
            for entry in saju_chart::yearly_progression(birth_date, window_year) {
                let mark = if entry.is_current { " *" } else { "" };
                println!("{} {} (age {}){mark}", entry.year, entry.pillar, entry.age);
            }
        }

        Commands::Interactions { tokens } => {
            let (stems, branches) = require_tokens(tokens);
            print_interactions(&interactions(&stems, &branches));
        }

        Commands::SolarTerms { year, boundary } => {
            let engine = load_engine(&cli);
            let offset = require_offset(engine.config().utc_offset_minutes);
            let table = engine.table();
            if !table.covers(*year) {
                eprintln!("No solar-term data for {year}");
                std::process::exit(1);
            }
            let events = if *boundary {
                table.boundary_events_in(*year..=*year)
            } else {
                table.events_in(*year..=*year)
            };
            for event in events {
                let local = event.instant.with_timezone(&offset);
                println!(
                    "{:<4} {} {:<22} {}",
                    event.term.korean(),
                    event.term.hanja(),
                    event.term.english(),
                    local.format("%Y-%m-%d %H:%M %:z")
                );
            }
        }

        Commands::Pillar { index, year } => {
            let pillar = match (index, year) {
                (Some(i), _) => StemBranch::from_cycle_index(*i),
                (None, Some(y)) => year_stem_branch(*y),
                (None, None) => {
                    eprintln!("Pass --index or --year");
                    std::process::exit(1);
                }
            };
            println!(
                "{pillar} ({}) - cycle index {} - {} {}",
                pillar.korean(),
                pillar.cycle_index(),
                pillar.stem.element().hanja(),
                pillar.branch.animal()
            );
        }

        Commands::TenGod { day_stem, target } => {
            let day: Stem = day_stem.parse().unwrap_or_else(|e| {
                eprintln!("{e}");
                std::process::exit(1);
            });
            if let Ok(stem) = target.parse::<Stem>() {
                print_ten_god(stem, ten_god(day, stem));
            } else if let Ok(branch) = target.parse::<Branch>() {
                for (stem, god) in hidden_stem_ten_gods(day, branch) {
                    print_ten_god(stem, god);
                }
            } else {
                eprintln!("Invalid stem or branch: {target}");
                std::process::exit(1);
            }
        }

        Commands::Diff { a, b } => {
            let a = read_file(a);
            let b = read_file(b);
            let drift = compare_payload_json(&a, &b).unwrap_or_else(|e| {
                eprintln!("{e}");
                std::process::exit(1);
            });
            println!("{drift}");
            if !drift.is_empty() {
                std::process::exit(2);
            }
        }

        Commands::Verify { payload } => {
            let engine = load_engine(&cli);
            let content = read_file(payload);
            let stored = ChartPayload::from_json(&content).unwrap_or_else(|e| {
                eprintln!("{e}");
                std::process::exit(1);
            });
            let drift = engine.verify_payload(&stored);
            println!("{drift}");
            if !drift.is_empty() {
                std::process::exit(2);
            }
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<EngineConfig, String> {
    let mut config = EngineConfig::resolve(cli.config.as_deref()).map_err(|e| e.to_string())?;
    if let Some(minutes) = cli.utc_offset {
        config.utc_offset_minutes = minutes;
    }
    if let Some(tolerance) = cli.tolerance {
        config.boundary_tolerance_minutes = tolerance;
    }
    if let Some(path) = &cli.solar_terms {
        config.solar_terms.file = Some(path.clone());
    }
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn load_engine(cli: &Cli) -> ChartEngine {
    let config = resolve_config(cli).unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    });
    debug!(?config, "engine configuration");
    let engine = ChartEngine::new(config).unwrap_or_else(|e| {
        eprintln!("Failed to build engine: {e}");
        std::process::exit(1);
    });
    info!(years = engine.table().years().count(), "solar-term table ready");
    engine
}

fn require_birth(date: &str, time: Option<&str>, gender: &str) -> BirthInput {
    BirthInput::parse(date, time, gender).unwrap_or_else(|e| {
        eprintln!("Invalid birth input: {e}");
        std::process::exit(1);
    })
}

fn require_date(date: &str) -> NaiveDate {
    parse_date(date).unwrap_or_else(|e| {
        eprintln!("Invalid birth date: {e}");
        std::process::exit(1);
    })
}

fn require_offset(minutes: i32) -> FixedOffset {
    utc_offset_from_minutes(minutes).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    })
}

/// Split tokens into stems and branches; a two-glyph token counts as both.
fn require_tokens(tokens: &[String]) -> (Vec<Stem>, Vec<Branch>) {
    let mut stems = Vec::new();
    let mut branches = Vec::new();
    for token in tokens {
        if let Ok(pillar) = token.parse::<StemBranch>() {
            stems.push(pillar.stem);
            branches.push(pillar.branch);
        } else if let Ok(stem) = token.parse::<Stem>() {
            stems.push(stem);
        } else if let Ok(branch) = token.parse::<Branch>() {
            branches.push(branch);
        } else {
            eprintln!("Invalid token: {token}");
            eprintln!("Expected a stem (甲/갑), a branch (子/자) or a pillar (甲子/갑자)");
            std::process::exit(1);
        }
    }
    (stems, branches)
}

fn read_file(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {e}", path.display());
        std::process::exit(1);
    })
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("Failed to serialize: {e}");
            std::process::exit(1);
        }
    }
}

fn print_ten_god(stem: Stem, god: TenGod) {
    println!("{stem} -> {} ({}) - {}", god.korean(), god.hanja(), god.description());
}

fn print_interactions(set: &InteractionSet) {
    if set.is_empty() {
        println!("No combinations or clashes");
        return;
    }
    for label in set.combination_labels() {
        println!("합 {label}");
    }
    for label in set.clash_labels() {
        println!("충 {label}");
    }
}

fn print_chart(record: &ChartRecord) {
    let b = &record.birth;
    let time = b.time.map_or_else(|| "unknown".to_string(), |t| t.to_string());
    println!("Birth: {} {time} ({})", b.date, b.gender.korean());
    println!();

    println!("Pillars:");
    for (slot, pillar) in record.pillars.slots() {
        println!(
            "  {:<5} {pillar} ({}) {}{}",
            slot.label(),
            pillar.korean(),
            pillar.stem.element().hanja(),
            pillar.branch.element().hanja()
        );
    }
    if record.pillars.hour.is_none() {
        println!("  hour  -");
    }
    println!();

    let tg = &record.ten_gods;
    println!("Ten gods (day master {}):", record.pillars.day.stem);
    println!("  year   {} / {}", tg.year_stem.korean(), tg.year_branch.korean());
    println!("  month  {} / {}", tg.month_stem.korean(), tg.month_branch.korean());
    println!("  day    - / {}", tg.day_branch.korean());
    match (tg.hour_stem, tg.hour_branch) {
        (Some(s), Some(br)) => println!("  hour   {} / {}", s.korean(), br.korean()),
        _ => println!("  hour   -"),
    }
    println!();

    println!("Markers:");
    if record.markers.is_empty() {
        println!("  none");
    }
    for marker in record.markers.to_list() {
        let positions: Vec<String> = marker.positions.iter().map(|p| p.korean()).collect();
        println!(
            "  {} ({}) [{}] - {}",
            marker.kind.korean(),
            marker.kind.hanja(),
            marker.kind.category(),
            positions.join(", ")
        );
    }
    println!();

    println!("Interactions:");
    print_interactions(&record.interactions());
    println!();

    let mf = &record.major_fortune;
    println!("Major fortune ({}, from age {}):", mf.direction.korean(), mf.start_age);
    for cycle in &mf.cycles {
        println!("  {:>3}-{:<3} {}", cycle.start_age, cycle.end_age, cycle.pillar);
    }
    println!();

    println!("Reliability: {}", record.reliability);
    for w in &record.warnings {
        println!("  ! {w}");
    }
}
